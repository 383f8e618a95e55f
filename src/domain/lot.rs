// ==========================================
// 卷材横切排产系统 - 批号领域模型
// ==========================================
// 输入行 (LineItem) → 批号汇总 (AggregatedLot) → 换型批次 (Batch)
// ==========================================

use crate::domain::types::UrgencyLevel;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// 无法识别尺寸时的统一换型键（所有未识别批号归为一组,不再细分）
pub const SETUP_UNDEFINED: &str = "SETUP_UNDEFINED";

// ==========================================
// LineItem - 输入明细行
// ==========================================
// 用途: 导入层写入,引擎层只读
// 透传字段原样保留,仅用于报表输出
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineItem {
    // ===== 主键 =====
    pub lot_id: String,  // 批号 (LOTE)
    pub product: String, // 产品描述 (PRODUTO)

    // ===== 数量与交期 =====
    pub quantity_t: f64,                    // 数量/重量 (QTDE)，非数值按 0
    pub due_date: Option<NaiveDateTime>,    // 交货期 (DATA DE ENTREGA)

    // ===== 透传字段 =====
    pub order_pc: Option<String>,        // PC
    pub order_pedido: Option<String>,    // PEDIDO
    pub forecast_date: Option<String>,   // PREVISÃO
    pub observation: Option<String>,     // OBS.:
    pub production_date: Option<String>, // DT PRODUÇÃO
    pub shift: Option<String>,           // TURNO
    pub coil_weight: Option<String>,     // PESO BOB

    // ===== 元信息 =====
    pub row_number: usize, // 源文件行号（含表头,从 1 开始）
}

// ==========================================
// AggregatedLot - 批号汇总
// ==========================================
// 红线: 每个批号仅一条,重量为全部明细之和
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregatedLot {
    pub lot_id: String,
    pub total_weight_t: f64,
    pub earliest_due_date: Option<NaiveDateTime>,

    // ===== 尺寸（取组内第一个可解析的产品描述）=====
    pub thickness_mm: Option<f64>,
    pub width_mm: Option<u32>,
    pub sort_thickness_mm: f64, // 排序用厚度（未识别时为哨兵值）

    // ===== 派生字段 =====
    pub setup_key: String,
    pub urgency: UrgencyLevel,
}

impl AggregatedLot {
    pub fn urgency_tier(&self) -> u8 {
        self.urgency.tier()
    }

    pub fn urgency_label(&self) -> &'static str {
        self.urgency.label()
    }
}

// ==========================================
// Batch - 换型批次
// ==========================================
// 排序后相邻且换型键相同的批号组成一个批次
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Batch {
    pub batch_no: usize, // 批次序号（从 1 开始）
    pub setup_key: String,
    pub total_weight_t: f64,
    pub lot_count: usize,
    pub meets_target: bool, // total_weight_t >= 目标重量
}
