// ==========================================
// 卷材横切排产系统 - 报表层
// ==========================================
// 职责: 排序结果 → 明细报表 / 指标表 / 紧急分布表
// 输出格式（CSV/JSON）由 writer 负责
// ==========================================

pub mod detail;
pub mod metrics;
pub mod writer;

pub use detail::{DetailReportBuilder, ReportRow, DETAIL_HEADERS};
pub use metrics::{
    urgency_distribution, MetricRow, SequenceMetrics, UrgencyDistributionRow,
    DISTRIBUTION_HEADERS, METRICS_HEADERS,
};
pub use writer::{ReportError, ReportWriter};

use crate::domain::lot::LineItem;
use crate::engine::sequencer::SequenceOutcome;
use serde::{Deserialize, Serialize};

/// 三张逻辑报表
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleReport {
    pub detail: Vec<ReportRow>,
    pub metrics: SequenceMetrics,
    pub distribution: Vec<UrgencyDistributionRow>,
}

impl ScheduleReport {
    pub fn build(outcome: &SequenceOutcome, items: &[LineItem], weight_goal_t: f64) -> Self {
        Self {
            detail: DetailReportBuilder::new().build(&outcome.lots, items),
            metrics: SequenceMetrics::compute(&outcome.lots, &outcome.batches, weight_goal_t),
            distribution: urgency_distribution(&outcome.lots),
        }
    }

    pub fn metric_rows(&self) -> Vec<MetricRow> {
        self.metrics.to_rows()
    }
}
