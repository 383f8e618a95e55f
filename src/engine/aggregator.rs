// ==========================================
// 卷材横切排产系统 - 批号汇总
// ==========================================
// 职责: 明细行按批号分组 → AggregatedLot
// 红线: 每个批号一条；重量为全部明细之和；保持首次出现顺序
// ==========================================

use crate::config::SequencingConfig;
use crate::domain::lot::{AggregatedLot, LineItem};
use crate::engine::descriptor::{DescriptorParser, Dimensions};
use crate::engine::setup::SetupClassifier;
use crate::engine::urgency::UrgencyEngine;
use chrono::NaiveDateTime;
use std::collections::HashMap;
use tracing::{debug, instrument};

/// 分组累加器
struct LotAccumulator<'a> {
    lot_id: &'a str,
    total_weight_t: f64,
    earliest_due_date: Option<NaiveDateTime>,
    dimensions: Option<Dimensions>,
}

// ==========================================
// LotAggregator - 批号汇总器
// ==========================================
pub struct LotAggregator {
    descriptor_parser: DescriptorParser,
    setup_classifier: SetupClassifier,
    urgency_engine: UrgencyEngine,
    missing_thickness_sentinel: f64,
}

impl LotAggregator {
    pub fn new(config: &SequencingConfig) -> Self {
        Self {
            descriptor_parser: DescriptorParser::new(&config.reduced_marker),
            setup_classifier: SetupClassifier::new(config.fine_planer_max_thickness_mm),
            urgency_engine: UrgencyEngine::new(),
            missing_thickness_sentinel: config.missing_thickness_sentinel,
        }
    }

    /// 汇总明细行
    ///
    /// # 规则
    /// 1) 重量 = 组内数量之和
    /// 2) 最早交期 = 组内非空交期的最小值（全空则为空）
    /// 3) 尺寸 = 组内按原始顺序第一个可解析的产品描述
    /// 4) 换型键/紧急等级由尺寸/最早交期派生
    ///
    /// # 参数
    /// - `items`: 明细行
    /// - `now`: 本次运行基准时刻
    #[instrument(skip(self, items), fields(items = items.len()))]
    pub fn aggregate(&self, items: &[LineItem], now: NaiveDateTime) -> Vec<AggregatedLot> {
        let mut order: Vec<LotAccumulator<'_>> = Vec::new();
        let mut index: HashMap<&str, usize> = HashMap::new();

        for item in items {
            let idx = *index.entry(item.lot_id.as_str()).or_insert_with(|| {
                order.push(LotAccumulator {
                    lot_id: item.lot_id.as_str(),
                    total_weight_t: 0.0,
                    earliest_due_date: None,
                    dimensions: None,
                });
                order.len() - 1
            });
            let acc = &mut order[idx];

            acc.total_weight_t += item.quantity_t;

            acc.earliest_due_date = match (acc.earliest_due_date, item.due_date) {
                (Some(current), Some(due)) => Some(current.min(due)),
                (current, due) => current.or(due),
            };

            if acc.dimensions.is_none() {
                acc.dimensions = self.descriptor_parser.parse(Some(item.product.as_str()));
            }
        }

        let lots: Vec<AggregatedLot> = order
            .into_iter()
            .map(|acc| self.finish(acc, now))
            .collect();

        debug!(lots = lots.len(), "批号汇总完成");
        lots
    }

    fn finish(&self, acc: LotAccumulator<'_>, now: NaiveDateTime) -> AggregatedLot {
        let thickness_mm = acc.dimensions.map(|d| d.thickness_mm);
        let width_mm = acc.dimensions.map(|d| d.width_mm);

        if acc.dimensions.is_none() {
            debug!(lot_id = acc.lot_id, "产品描述无法识别尺寸，换型键未定义");
        }

        AggregatedLot {
            lot_id: acc.lot_id.to_string(),
            total_weight_t: acc.total_weight_t,
            earliest_due_date: acc.earliest_due_date,
            thickness_mm,
            width_mm,
            sort_thickness_mm: thickness_mm.unwrap_or(self.missing_thickness_sentinel),
            setup_key: self.setup_classifier.classify(thickness_mm, width_mm),
            urgency: self.urgency_engine.evaluate(acc.earliest_due_date, now),
        }
    }
}
