// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 提供测试所需的临时输入文件、基准时刻等
// ==========================================

#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use csv::Writer;
use std::error::Error;
use tempfile::{Builder, NamedTempFile};

/// 标准输入表头
pub const STANDARD_HEADER: &[&str] = &[
    "LOTE",
    "PC",
    "PEDIDO",
    "PRODUTO",
    "QTDE",
    "PREVISÃO",
    "OBS.:",
    "DT PRODUÇÃO",
    "TURNO",
    "PESO BOB",
    "DATA DE ENTREGA",
];

/// 固定基准时刻: 2024-06-15 10:00:00
pub fn fixed_now() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 15)
        .unwrap()
        .and_hms_opt(10, 0, 0)
        .unwrap()
}

/// 写出临时 CSV 文件
///
/// # 返回
/// - NamedTempFile: 临时文件（需要保持存活）
pub fn write_csv(header: &[&str], rows: &[Vec<&str>]) -> Result<NamedTempFile, Box<dyn Error>> {
    let temp_file = Builder::new().suffix(".csv").tempfile()?;
    {
        let mut writer = Writer::from_path(temp_file.path())?;
        writer.write_record(header)?;
        for row in rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
    }
    Ok(temp_file)
}

/// 标准表头下的一行
///
/// 参数顺序: 批号, 产品, 数量, 交货期
pub fn standard_row<'a>(lot: &'a str, product: &'a str, qty: &'a str, due: &'a str) -> Vec<&'a str> {
    vec![lot, "PC-1", "PED-1", product, qty, "", "", "", "A", "", due]
}
