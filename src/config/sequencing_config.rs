use serde::{Deserialize, Serialize};

/// 排产参数（单次运行内不变）
///
/// 文件格式：JSON，缺省字段取默认值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SequencingConfig {
    /// 批次目标重量（吨），批次累计重量达到即视为达标
    pub weight_goal_t: f64,

    /// 细刨厚度上限（mm，含边界）
    pub fine_planer_max_thickness_mm: f64,

    /// 降级品标记（大小写不敏感，命中即不解析尺寸）
    pub reduced_marker: String,

    /// 无法识别厚度时的排序哨兵值
    pub missing_thickness_sentinel: f64,

    /// Excel 输入工作表名称
    pub sheet_name: String,
}

impl Default for SequencingConfig {
    fn default() -> Self {
        Self {
            weight_goal_t: 120.0,
            fine_planer_max_thickness_mm: 4.75,
            reduced_marker: "REBAIXAD".to_string(),
            missing_thickness_sentinel: 999.0,
            sheet_name: "Fagor".to_string(),
        }
    }
}
