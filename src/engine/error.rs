// ==========================================
// 卷材横切排产系统 - 引擎层错误类型
// ==========================================

use crate::importer::error::ImportError;
use thiserror::Error;

/// 排产运行错误
#[derive(Error, Debug)]
pub enum ScheduleError {
    /// 导入阶段错误（含缺必需列）
    #[error(transparent)]
    Import(#[from] ImportError),

    #[error("排序优先级无效: {0}（需包含 urgency_tier / setup_key / thickness 各一次）")]
    InvalidPriorityOrder(String),

    #[error("未知排序键: {0}")]
    UnknownPriorityKey(String),

    /// 无有效批号，调用方应提示"无可处理数据"而非视为崩溃
    #[error("未找到可处理的有效批号")]
    EmptyResult,
}

impl ScheduleError {
    /// 是否为"无数据可处理"（非致命）
    pub fn is_empty_result(&self) -> bool {
        matches!(self, ScheduleError::EmptyResult)
    }
}

pub type ScheduleResult<T> = Result<T, ScheduleError>;
