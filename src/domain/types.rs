// ==========================================
// 卷材横切排产系统 - 领域类型定义
// ==========================================
// 紧急等级 / 刨刀类别 / 排序优先键
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 紧急等级 (Urgency Level)
// ==========================================
// 红线: 等级制,不是评分制
// 无交期与"有余量"同属第 5 级,但标签不同
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum UrgencyLevel {
    MostUrgent, // 超期 > 10 天
    Urgent,     // 超期 5..=10 天
    Late,       // 超期 0..=4 天
    OnTime,     // 提前 1..=10 天
    WithSlack,  // 提前 > 10 天
    NoDate,     // 无交期
}

impl UrgencyLevel {
    /// 排序用的等级序号（1 最紧急，5 最宽松）
    pub fn tier(&self) -> u8 {
        match self {
            UrgencyLevel::MostUrgent => 1,
            UrgencyLevel::Urgent => 2,
            UrgencyLevel::Late => 3,
            UrgencyLevel::OnTime => 4,
            UrgencyLevel::WithSlack | UrgencyLevel::NoDate => 5,
        }
    }

    /// 报表展示标签
    pub fn label(&self) -> &'static str {
        match self {
            UrgencyLevel::MostUrgent => "1 - MOST URGENT",
            UrgencyLevel::Urgent => "2 - URGENT",
            UrgencyLevel::Late => "3 - LATE",
            UrgencyLevel::OnTime => "4 - ON TIME",
            UrgencyLevel::WithSlack => "5 - WITH SLACK",
            UrgencyLevel::NoDate => "5 - WITH SLACK (NO DATE)",
        }
    }
}

impl fmt::Display for UrgencyLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

// ==========================================
// 刨刀类别 (Planer Category)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PlanerCategory {
    FinePlaner,   // 细刨（薄料）
    CoarsePlaner, // 粗刨（厚料）
}

impl fmt::Display for PlanerCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PlanerCategory::FinePlaner => write!(f, "FINE_PLANER"),
            PlanerCategory::CoarsePlaner => write!(f, "COARSE_PLANER"),
        }
    }
}

// ==========================================
// 排序优先键 (Priority Key)
// ==========================================
// 由调用方选择顺序,三者必须各出现一次
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriorityKey {
    UrgencyTier,
    SetupKey,
    Thickness,
}

impl PriorityKey {
    pub const ALL: [PriorityKey; 3] = [
        PriorityKey::UrgencyTier,
        PriorityKey::SetupKey,
        PriorityKey::Thickness,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PriorityKey::UrgencyTier => "urgency_tier",
            PriorityKey::SetupKey => "setup_key",
            PriorityKey::Thickness => "thickness",
        }
    }
}

impl fmt::Display for PriorityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for PriorityKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "urgency" | "urgency_tier" | "urgency-tier" => Ok(PriorityKey::UrgencyTier),
            "setup" | "setup_key" | "setup-key" => Ok(PriorityKey::SetupKey),
            "thickness" => Ok(PriorityKey::Thickness),
            other => Err(format!("未知排序键: {}", other)),
        }
    }
}
