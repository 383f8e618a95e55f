// ==========================================
// 卷材横切排产系统 - 排序与换型批次
// ==========================================
// 职责: 多键排序 → 单遍贪心分批（相邻同换型键合并）
// 红线: 非组合优化；无回溯；同一输入同一顺序必得同一结果
// ==========================================

use crate::domain::lot::{AggregatedLot, Batch};
use crate::engine::priority::{PriorityOrder, PrioritySorter};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// 排序结果
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SequenceOutcome {
    pub lots: Vec<AggregatedLot>,
    pub batches: Vec<Batch>,
}

impl SequenceOutcome {
    pub fn is_empty(&self) -> bool {
        self.lots.is_empty()
    }
}

// ==========================================
// Sequencer - 排序器
// ==========================================
pub struct Sequencer {
    weight_goal_t: f64,
}

impl Sequencer {
    pub fn new(weight_goal_t: f64) -> Self {
        Self { weight_goal_t }
    }

    /// 排序并分批
    ///
    /// 空输入返回空结果（调用方视为"无可处理数据"）
    #[instrument(skip(self, lots, order), fields(lots = lots.len(), order = %order))]
    pub fn sequence(&self, lots: Vec<AggregatedLot>, order: PriorityOrder) -> SequenceOutcome {
        let lots = PrioritySorter::new(order).sort(lots);
        let batches = self.build_batches(&lots);

        debug!(batches = batches.len(), "分批完成");
        SequenceOutcome { lots, batches }
    }

    /// 单遍贪心分批
    ///
    /// 换型键变化即关闭当前批次；最后一个批次无条件关闭
    pub fn build_batches(&self, lots: &[AggregatedLot]) -> Vec<Batch> {
        let mut batches: Vec<Batch> = Vec::new();

        for lot in lots {
            if let Some(current) = batches
                .last_mut()
                .filter(|b| b.setup_key == lot.setup_key)
            {
                current.total_weight_t += lot.total_weight_t;
                current.lot_count += 1;
                continue;
            }

            batches.push(Batch {
                batch_no: batches.len() + 1,
                setup_key: lot.setup_key.clone(),
                total_weight_t: lot.total_weight_t,
                lot_count: 1,
                meets_target: false,
            });
        }

        for batch in &mut batches {
            batch.meets_target = batch.total_weight_t >= self.weight_goal_t;
        }

        batches
    }
}
