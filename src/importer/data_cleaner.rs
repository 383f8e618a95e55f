// ==========================================
// 卷材横切排产系统 - 数据清洗器实现
// ==========================================
// 职责: TRIM / NULL 标准化 / 数量强转 / 容错日期解析
// 红线: 行级脏数据一律降级为哨兵值,不报错
// ==========================================

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime};

/// Excel 序列日期纪元（1899-12-30）
const EXCEL_EPOCH: (i32, u32, u32) = (1899, 12, 30);

/// Excel 可表示的最大序列号（9999-12-31）
const EXCEL_MAX_SERIAL: f64 = 2_958_465.0;

// 日期时间格式（日在前）
const DATETIME_FORMATS: &[&str] = &[
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%d-%m-%Y %H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
];

// 四位年份日期格式
const DATE_FORMATS: &[&str] = &["%d/%m/%Y", "%d-%m-%Y", "%d.%m.%Y", "%Y-%m-%d", "%Y/%m/%d"];

// 两位年份日期格式
const SHORT_YEAR_DATE_FORMATS: &[&str] = &["%d/%m/%y", "%d-%m-%y", "%d.%m.%y"];

pub struct DataCleaner;

impl DataCleaner {
    /// 空白字符串标准化为 None
    pub fn normalize_null(&self, value: Option<&String>) -> Option<String> {
        value.and_then(|v| {
            let trimmed = v.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
    }

    /// 透传字段: 全空白视为 None,否则原文保留
    pub fn non_blank(&self, value: Option<&String>) -> Option<String> {
        value.filter(|v| !v.trim().is_empty()).cloned()
    }

    /// 数量强转为数值
    ///
    /// 非数值/非有限值 → 0
    pub fn coerce_quantity(&self, value: &str) -> f64 {
        match value.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => v,
            _ => 0.0,
        }
    }

    /// 容错日期解析
    ///
    /// # 规则
    /// 1) 数值 → Excel 序列日期（纪元 1899-12-30，小数部分为当日时刻）
    /// 2) 文本 → 日在前格式（dd/mm/yyyy 等），兼容 ISO yyyy-mm-dd
    /// 3) 其他 → None
    pub fn parse_date_tolerant(&self, value: &str) -> Option<NaiveDateTime> {
        let v = value.trim();
        if v.is_empty() {
            return None;
        }

        if let Ok(serial) = v.parse::<f64>() {
            return Self::from_excel_serial(serial);
        }

        for fmt in DATETIME_FORMATS {
            if let Ok(dt) = NaiveDateTime::parse_from_str(v, fmt) {
                return Some(dt);
            }
        }

        // %Y 会接受两位年份,需排除后再尝试 %y
        for fmt in DATE_FORMATS {
            if let Ok(d) = NaiveDate::parse_from_str(v, fmt) {
                if d.year() >= 1000 {
                    return d.and_hms_opt(0, 0, 0);
                }
            }
        }

        for fmt in SHORT_YEAR_DATE_FORMATS {
            if let Ok(d) = NaiveDate::parse_from_str(v, fmt) {
                return d.and_hms_opt(0, 0, 0);
            }
        }

        None
    }

    /// Excel 序列号 → 日期时间
    fn from_excel_serial(serial: f64) -> Option<NaiveDateTime> {
        if !serial.is_finite() || serial.abs() > EXCEL_MAX_SERIAL {
            return None;
        }

        let (y, m, d) = EXCEL_EPOCH;
        let epoch = NaiveDate::from_ymd_opt(y, m, d)?.and_hms_opt(0, 0, 0)?;
        let millis = (serial * 86_400_000.0).round() as i64;
        epoch.checked_add_signed(Duration::milliseconds(millis))
    }

    /// 格式化为 dd/mm/yyyy
    pub fn format_date_dmy(&self, value: &NaiveDateTime) -> String {
        value.format("%d/%m/%Y").to_string()
    }

    /// 透传日期列: 可解析则统一为 dd/mm/yyyy，否则原样保留
    pub fn reformat_date_text(&self, value: Option<String>) -> Option<String> {
        value.map(|v| match self.parse_date_tolerant(&v) {
            Some(dt) => self.format_date_dmy(&dt),
            None => v,
        })
    }
}
