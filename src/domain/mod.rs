// ==========================================
// 卷材横切排产系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含文件访问逻辑,不含引擎逻辑
// ==========================================

pub mod lot;
pub mod types;

// 重导出核心类型
pub use lot::{AggregatedLot, Batch, LineItem, SETUP_UNDEFINED};
pub use types::{PlanerCategory, PriorityKey, UrgencyLevel};
