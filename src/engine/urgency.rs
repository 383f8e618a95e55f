// ==========================================
// 卷材横切排产系统 - 紧急等级判定引擎
// ==========================================
// 红线: 紧急等级是"等级制",不是评分制
// 红线: 基准时刻每次运行只取一次,由调用方显式传入
// ==========================================
// 输入: 最早交货期 + 基准时刻
// 输出: UrgencyLevel（等级序号 + 标签）
// ==========================================

use crate::domain::types::UrgencyLevel;
use chrono::NaiveDateTime;

const SECONDS_PER_DAY: i64 = 86_400;

// ==========================================
// UrgencyEngine - 紧急等级判定引擎
// ==========================================
pub struct UrgencyEngine {
    // 无状态引擎
}

impl Default for UrgencyEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl UrgencyEngine {
    pub fn new() -> Self {
        Self {}
    }

    /// 超期天数（正数 = 已超期）
    ///
    /// 按整日向下取整: 交期在基准时刻之后不足一天,记为 -1
    pub fn days_late(due_date: NaiveDateTime, now: NaiveDateTime) -> i64 {
        (now - due_date).num_seconds().div_euclid(SECONDS_PER_DAY)
    }

    /// 判定紧急等级
    ///
    /// | 超期天数   | 等级 |
    /// |-----------|------|
    /// | > 10      | 1    |
    /// | 5..=10    | 2    |
    /// | 0..=4     | 3    |
    /// | -10..=-1  | 4    |
    /// | < -10     | 5    |
    ///
    /// 无交期 → 5（NO DATE 标签），不按紧急处理
    pub fn evaluate(&self, due_date: Option<NaiveDateTime>, now: NaiveDateTime) -> UrgencyLevel {
        match due_date {
            None => UrgencyLevel::NoDate,
            Some(due) => Self::level_for_days_late(Self::days_late(due, now)),
        }
    }

    /// 按超期天数分级（边界保持原口径,不做调整）
    pub fn level_for_days_late(days_late: i64) -> UrgencyLevel {
        match days_late {
            d if d > 10 => UrgencyLevel::MostUrgent,
            5..=10 => UrgencyLevel::Urgent,
            0..=4 => UrgencyLevel::Late,
            -10..=-1 => UrgencyLevel::OnTime,
            _ => UrgencyLevel::WithSlack,
        }
    }
}

// ==========================================
// 单元测试
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 15)
            .unwrap()
            .and_hms_opt(14, 30, 0)
            .unwrap()
    }

    fn due_days_ago(days: i64) -> NaiveDateTime {
        // 交期为当天零点
        now().date().and_hms_opt(0, 0, 0).unwrap() - Duration::days(days)
    }

    #[test]
    fn test_boundaries() {
        let engine = UrgencyEngine::new();
        let cases = [
            (11, 1),
            (10, 2),
            (5, 2),
            (4, 3),
            (0, 3),
            (-1, 4),
            (-10, 4),
            (-11, 5),
        ];
        for (days, tier) in cases {
            let level = engine.evaluate(Some(due_days_ago(days)), now());
            assert_eq!(level.tier(), tier, "days_late={}", days);
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(UrgencyEngine::level_for_days_late(30).label(), "1 - MOST URGENT");
        assert_eq!(UrgencyEngine::level_for_days_late(7).label(), "2 - URGENT");
        assert_eq!(UrgencyEngine::level_for_days_late(2).label(), "3 - LATE");
        assert_eq!(UrgencyEngine::level_for_days_late(-3).label(), "4 - ON TIME");
        assert_eq!(UrgencyEngine::level_for_days_late(-30).label(), "5 - WITH SLACK");
    }

    #[test]
    fn test_no_date_is_least_urgent() {
        let level = UrgencyEngine::new().evaluate(None, now());
        assert_eq!(level, UrgencyLevel::NoDate);
        assert_eq!(level.tier(), 5);
        assert_eq!(level.label(), "5 - WITH SLACK (NO DATE)");
    }

    #[test]
    fn test_days_late_floors_partial_days() {
        // 交期为明天零点,基准为今天 14:30 → 提前不足一天,记 -1
        let tomorrow = now().date().succ_opt().unwrap().and_hms_opt(0, 0, 0).unwrap();
        assert_eq!(UrgencyEngine::days_late(tomorrow, now()), -1);

        // 交期为今天零点 → 0
        let today = now().date().and_hms_opt(0, 0, 0).unwrap();
        assert_eq!(UrgencyEngine::days_late(today, now()), 0);
    }
}
