// ==========================================
// 卷材横切排产系统 - 引擎层
// ==========================================
// 职责: 描述解析 / 换型判定 / 紧急判定 / 批号汇总 / 排序分批
// 红线: 引擎不做文件 I/O,基准时刻显式传入
// ==========================================

pub mod aggregator;
pub mod descriptor;
pub mod error;
pub mod orchestrator;
pub mod priority;
pub mod sequencer;
pub mod setup;
pub mod urgency;

// 重导出核心引擎
pub use aggregator::LotAggregator;
pub use descriptor::{DescriptorParser, Dimensions};
pub use error::{ScheduleError, ScheduleResult};
pub use orchestrator::{RunSummary, ScheduleOrchestrator, ScheduleRun};
pub use priority::{PriorityOrder, PrioritySorter};
pub use sequencer::{SequenceOutcome, Sequencer};
pub use setup::SetupClassifier;
pub use urgency::UrgencyEngine;
