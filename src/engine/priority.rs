// ==========================================
// 卷材横切排产系统 - 多键排序
// ==========================================
// 排序键: 调用方选定的三键顺序 + 最早交期（隐式末键,空值最后）
// 升序,稳定排序
// ==========================================

use crate::domain::lot::AggregatedLot;
use crate::domain::types::PriorityKey;
use crate::engine::error::{ScheduleError, ScheduleResult};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

// ==========================================
// PriorityOrder - 三键排序顺序
// ==========================================
// 构造时校验: 三个键各出现一次
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriorityOrder([PriorityKey; 3]);

impl PriorityOrder {
    pub fn new(keys: [PriorityKey; 3]) -> ScheduleResult<Self> {
        for key in PriorityKey::ALL {
            if !keys.contains(&key) {
                return Err(ScheduleError::InvalidPriorityOrder(format!(
                    "缺少 {}",
                    key
                )));
            }
        }
        Ok(Self(keys))
    }

    /// 从文本列表解析（如 "setup,urgency,thickness"）
    pub fn parse_list(raw: &str) -> ScheduleResult<Self> {
        let keys = raw
            .split(',')
            .map(|s| {
                s.parse::<PriorityKey>()
                    .map_err(|_| ScheduleError::UnknownPriorityKey(s.trim().to_string()))
            })
            .collect::<ScheduleResult<Vec<_>>>()?;

        let keys: [PriorityKey; 3] = keys
            .try_into()
            .map_err(|v: Vec<PriorityKey>| {
                ScheduleError::InvalidPriorityOrder(format!("需要 3 个键，实际 {} 个", v.len()))
            })?;

        Self::new(keys)
    }

    pub fn keys(&self) -> &[PriorityKey; 3] {
        &self.0
    }
}

impl Default for PriorityOrder {
    /// 紧急等级 → 换型键 → 厚度
    fn default() -> Self {
        Self(PriorityKey::ALL)
    }
}

impl fmt::Display for PriorityOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c] = self.0;
        write!(f, "{},{},{}", a, b, c)
    }
}

// ==========================================
// PrioritySorter - 多键排序器
// ==========================================
pub struct PrioritySorter {
    order: PriorityOrder,
}

impl PrioritySorter {
    pub fn new(order: PriorityOrder) -> Self {
        Self { order }
    }

    /// 稳定排序（键相同保持输入顺序）
    pub fn sort(&self, mut lots: Vec<AggregatedLot>) -> Vec<AggregatedLot> {
        lots.sort_by(|a, b| self.compare(a, b));
        lots
    }

    /// 比较两个批号
    ///
    /// Ordering::Less 表示 a 排在 b 之前
    pub fn compare(&self, a: &AggregatedLot, b: &AggregatedLot) -> Ordering {
        for key in self.order.keys() {
            match Self::compare_key(*key, a, b) {
                Ordering::Equal => {}
                other => return other,
            }
        }

        Self::compare_due_date(a.earliest_due_date, b.earliest_due_date)
    }

    fn compare_key(key: PriorityKey, a: &AggregatedLot, b: &AggregatedLot) -> Ordering {
        match key {
            PriorityKey::UrgencyTier => a.urgency_tier().cmp(&b.urgency_tier()),
            PriorityKey::SetupKey => a.setup_key.cmp(&b.setup_key),
            PriorityKey::Thickness => a.sort_thickness_mm.total_cmp(&b.sort_thickness_mm),
        }
    }

    /// 交期升序,无交期排最后
    fn compare_due_date(a: Option<NaiveDateTime>, b: Option<NaiveDateTime>) -> Ordering {
        match (a, b) {
            (Some(x), Some(y)) => x.cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    }
}
