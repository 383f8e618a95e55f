// ==========================================
// 卷材横切排产系统 - 核心库
// ==========================================
// 技术栈: Rust + calamine/csv
// 系统定位: 决策支持系统 (人工选择排序优先级)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 业务规则
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 配置层 - 排产参数
pub mod config;

// 报表层 - 结果输出
pub mod report;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    AggregatedLot, Batch, LineItem, PlanerCategory, PriorityKey, UrgencyLevel, SETUP_UNDEFINED,
};

// 引擎
pub use engine::{
    LotAggregator, PriorityOrder, PrioritySorter, ScheduleError, ScheduleOrchestrator,
    ScheduleRun, SequenceOutcome, Sequencer, SetupClassifier, UrgencyEngine,
};

// 配置
pub use config::{ConfigManager, SequencingConfig};

// 报表
pub use report::{ReportWriter, ScheduleReport};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "卷材横切排产系统";
