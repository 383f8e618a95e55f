// ==========================================
// 卷材横切排产系统 - 绩效指标
// ==========================================
// 指标: 批号数 / 总重量 / 批次数 / 换型次数 / 达标批次 / 平均批重
// 分布: 各紧急标签下的批号数
// ==========================================

use crate::domain::lot::{AggregatedLot, Batch};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// 指标表列名
pub const METRICS_HEADERS: [&str; 2] = ["Métrica", "Valor"];

/// 紧急分布表列名
pub const DISTRIBUTION_HEADERS: [&str; 2] = ["Nível de Urgência", "Qtd. Lotes"];

// ==========================================
// SequenceMetrics - 汇总指标
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceMetrics {
    pub total_lots: usize,
    pub total_weight_t: f64,
    pub batch_count: usize,
    pub setup_changes: usize,
    pub batches_meeting_goal: usize,
    pub pct_batches_meeting_goal: f64,
    pub avg_batch_weight_t: f64,
    pub weight_goal_t: f64,
}

/// 指标表行（名称, 值）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricRow {
    pub name: String,
    pub value: String,
}

/// 紧急分布行（标签, 批号数）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrgencyDistributionRow {
    pub urgency_label: String,
    pub lot_count: usize,
}

impl SequenceMetrics {
    /// 计算汇总指标
    ///
    /// 无批次时各项为 0
    pub fn compute(sequence: &[AggregatedLot], batches: &[Batch], weight_goal_t: f64) -> Self {
        let total_lots = sequence
            .iter()
            .map(|l| l.lot_id.as_str())
            .collect::<HashSet<_>>()
            .len();

        let batch_count = batches.len();
        let total_weight_t: f64 = batches.iter().map(|b| b.total_weight_t).sum();
        let batches_meeting_goal = batches.iter().filter(|b| b.meets_target).count();

        let (pct_batches_meeting_goal, avg_batch_weight_t) = if batch_count > 0 {
            (
                batches_meeting_goal as f64 / batch_count as f64 * 100.0,
                total_weight_t / batch_count as f64,
            )
        } else {
            (0.0, 0.0)
        };

        Self {
            total_lots,
            total_weight_t,
            batch_count,
            setup_changes: batch_count.saturating_sub(1),
            batches_meeting_goal,
            pct_batches_meeting_goal,
            avg_batch_weight_t,
            weight_goal_t,
        }
    }

    /// 输出为（名称, 值）表，重量/百分比保留两位小数
    pub fn to_rows(&self) -> Vec<MetricRow> {
        let row = |name: String, value: String| MetricRow { name, value };

        vec![
            row("Total Lots Processed".to_string(), self.total_lots.to_string()),
            row(
                "Total Weight Processed (t)".to_string(),
                format!("{:.2}", self.total_weight_t),
            ),
            row("Total Batches Created".to_string(), self.batch_count.to_string()),
            row("Total Setup Changes".to_string(), self.setup_changes.to_string()),
            row(
                format!("Batches Meeting the {}t Goal", self.weight_goal_t),
                self.batches_meeting_goal.to_string(),
            ),
            row(
                "% of Batches Meeting Goal".to_string(),
                format!("{:.2}%", self.pct_batches_meeting_goal),
            ),
            row(
                "Average Weight per Batch (t)".to_string(),
                format!("{:.2}", self.avg_batch_weight_t),
            ),
        ]
    }
}

/// 按紧急标签统计批号数
///
/// 批号数降序,同数按标签升序
pub fn urgency_distribution(sequence: &[AggregatedLot]) -> Vec<UrgencyDistributionRow> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut counts: HashMap<&'static str, usize> = HashMap::new();

    for lot in sequence {
        if seen.insert(lot.lot_id.as_str()) {
            *counts.entry(lot.urgency_label()).or_insert(0) += 1;
        }
    }

    let mut rows: Vec<UrgencyDistributionRow> = counts
        .into_iter()
        .map(|(label, count)| UrgencyDistributionRow {
            urgency_label: label.to_string(),
            lot_count: count,
        })
        .collect();

    rows.sort_by(|a, b| {
        b.lot_count
            .cmp(&a.lot_count)
            .then_with(|| a.urgency_label.cmp(&b.urgency_label))
    });
    rows
}
