// ==========================================
// 卷材横切排产系统 - 排产明细报表
// ==========================================
// 职责: 批号顺序 → 回展为明细行,附加顺序号/换型键/紧急标签
// 红线: 不在排序结果中的批号行直接丢弃,不报错
// ==========================================

use crate::domain::lot::{AggregatedLot, LineItem};
use crate::importer::columns;
use crate::importer::data_cleaner::DataCleaner;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{instrument, warn};

/// 明细报表列（顺序固定）
pub const DETAIL_HEADERS: [&str; 14] = [
    "Posição na Sequência",
    columns::LOT,
    columns::ORDER_PC,
    columns::ORDER_PEDIDO,
    columns::PRODUCT,
    columns::QUANTITY,
    columns::FORECAST_DATE,
    columns::OBSERVATION,
    columns::PRODUCTION_DATE,
    columns::SHIFT,
    columns::COIL_WEIGHT,
    columns::DUE_DATE,
    "SETUP",
    "URGENCIA",
];

// ==========================================
// ReportRow - 明细报表行
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    pub sequence_position: usize, // 批号在排序中的位置（从 1 开始）
    pub lot_id: String,
    pub order_pc: String,
    pub order_pedido: String,
    pub product: String,
    pub quantity_t: f64,
    pub forecast_date: String,
    pub observation: String,
    pub production_date: String,
    pub shift: String,
    pub coil_weight: String,
    pub due_date: String, // dd/mm/yyyy 或空
    pub setup_key: String,
    pub urgency_label: String,
}

impl ReportRow {
    /// 按 DETAIL_HEADERS 顺序输出
    pub fn to_record(&self) -> [String; 14] {
        [
            self.sequence_position.to_string(),
            self.lot_id.clone(),
            self.order_pc.clone(),
            self.order_pedido.clone(),
            self.product.clone(),
            self.quantity_t.to_string(),
            self.forecast_date.clone(),
            self.observation.clone(),
            self.production_date.clone(),
            self.shift.clone(),
            self.coil_weight.clone(),
            self.due_date.clone(),
            self.setup_key.clone(),
            self.urgency_label.clone(),
        ]
    }
}

// ==========================================
// DetailReportBuilder
// ==========================================
pub struct DetailReportBuilder {
    cleaner: DataCleaner,
}

impl Default for DetailReportBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DetailReportBuilder {
    pub fn new() -> Self {
        Self {
            cleaner: DataCleaner,
        }
    }

    /// 生成明细报表
    ///
    /// # 参数
    /// - `sequence`: 排序后的批号
    /// - `items`: 原始明细行
    ///
    /// # 返回
    /// 按顺序号稳定排序的明细行（同一批号内保持原始行序）
    #[instrument(skip_all, fields(lots = sequence.len(), items = items.len()))]
    pub fn build(&self, sequence: &[AggregatedLot], items: &[LineItem]) -> Vec<ReportRow> {
        let mut position_of: HashMap<&str, (usize, &AggregatedLot)> = HashMap::new();
        for (idx, lot) in sequence.iter().enumerate() {
            position_of.entry(lot.lot_id.as_str()).or_insert((idx + 1, lot));
        }

        let mut rows: Vec<ReportRow> = Vec::with_capacity(items.len());
        for item in items {
            let Some(&(position, lot)) = position_of.get(item.lot_id.as_str()) else {
                warn!(lot_id = %item.lot_id, row = item.row_number, "批号不在排序结果中，丢弃该行");
                continue;
            };
            rows.push(self.to_row(position, lot, item));
        }

        rows.sort_by_key(|r| r.sequence_position);
        rows
    }

    fn to_row(&self, position: usize, lot: &AggregatedLot, item: &LineItem) -> ReportRow {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();

        ReportRow {
            sequence_position: position,
            lot_id: item.lot_id.clone(),
            order_pc: text(&item.order_pc),
            order_pedido: text(&item.order_pedido),
            product: item.product.clone(),
            quantity_t: item.quantity_t,
            forecast_date: text(&item.forecast_date),
            observation: text(&item.observation),
            production_date: text(&item.production_date),
            shift: text(&item.shift),
            coil_weight: text(&item.coil_weight),
            due_date: item
                .due_date
                .map(|d| self.cleaner.format_date_dmy(&d))
                .unwrap_or_default(),
            setup_key: lot.setup_key.clone(),
            urgency_label: lot.urgency_label().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::UrgencyLevel;
    use chrono::NaiveDate;

    fn item(lot_id: &str, row: usize) -> LineItem {
        LineItem {
            lot_id: lot_id.to_string(),
            product: format!("CHAPA {}", row),
            quantity_t: row as f64,
            due_date: NaiveDate::from_ymd_opt(2024, 3, 5).and_then(|d| d.and_hms_opt(0, 0, 0)),
            order_pc: Some("PC1".to_string()),
            order_pedido: None,
            forecast_date: None,
            observation: None,
            production_date: None,
            shift: None,
            coil_weight: None,
            row_number: row,
        }
    }

    fn lot(lot_id: &str, setup: &str) -> AggregatedLot {
        AggregatedLot {
            lot_id: lot_id.to_string(),
            total_weight_t: 0.0,
            earliest_due_date: None,
            thickness_mm: None,
            width_mm: None,
            sort_thickness_mm: 999.0,
            setup_key: setup.to_string(),
            urgency: UrgencyLevel::Late,
        }
    }

    #[test]
    fn test_rows_follow_sequence_positions() {
        let sequence = vec![lot("B", "S1"), lot("A", "S2")];
        let items = vec![item("A", 2), item("B", 3), item("A", 4), item("B", 5)];

        let rows = DetailReportBuilder::new().build(&sequence, &items);

        let view: Vec<(usize, &str, usize)> = rows
            .iter()
            .map(|r| (r.sequence_position, r.lot_id.as_str(), r.quantity_t as usize))
            .collect();
        assert_eq!(view, vec![(1, "B", 3), (1, "B", 5), (2, "A", 2), (2, "A", 4)]);
        assert_eq!(rows[0].setup_key, "S1");
        assert_eq!(rows[0].urgency_label, "3 - LATE");
        assert_eq!(rows[0].due_date, "05/03/2024");
    }

    #[test]
    fn test_unknown_lot_rows_are_dropped() {
        let sequence = vec![lot("A", "S1")];
        let items = vec![item("A", 2), item("GHOST", 3)];
        let rows = DetailReportBuilder::new().build(&sequence, &items);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].lot_id, "A");
    }

    #[test]
    fn test_absent_columns_are_empty() {
        let rows = DetailReportBuilder::new().build(&[lot("A", "S1")], &[item("A", 2)]);
        let record = rows[0].to_record();
        assert_eq!(record.len(), DETAIL_HEADERS.len());
        assert_eq!(record[0], "1");
        assert_eq!(record[2], "PC1");
        assert_eq!(record[3], "");
        assert_eq!(record[5], "2");
        assert_eq!(record[10], "");
    }
}
