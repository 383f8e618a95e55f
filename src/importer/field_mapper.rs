// ==========================================
// 卷材横切排产系统 - 字段映射器实现
// ==========================================
// 职责: 表头校验 + 源字段 → LineItem 映射 + 类型转换
// 红线: 缺必需列 → 致命；缺必需值 → 丢弃该行
// ==========================================

use crate::domain::lot::LineItem;
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::{RawRow, RawTable};
use std::collections::HashMap;
use tracing::debug;

// ==========================================
// 源表列名
// ==========================================
pub mod columns {
    pub const LOT: &str = "LOTE";
    pub const PRODUCT: &str = "PRODUTO";
    pub const QUANTITY: &str = "QTDE";
    pub const DUE_DATE: &str = "DATA DE ENTREGA";
    pub const ORDER_PC: &str = "PC";
    pub const ORDER_PEDIDO: &str = "PEDIDO";
    pub const FORECAST_DATE: &str = "PREVISÃO";
    pub const OBSERVATION: &str = "OBS.:";
    pub const PRODUCTION_DATE: &str = "DT PRODUÇÃO";
    pub const SHIFT: &str = "TURNO";
    pub const COIL_WEIGHT: &str = "PESO BOB";

    /// 必需列（缺任一列即终止运行）
    pub const REQUIRED: &[&str] = &[LOT, PRODUCT, QUANTITY];
}

pub struct FieldMapper {
    cleaner: DataCleaner,
}

impl Default for FieldMapper {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldMapper {
    pub fn new() -> Self {
        Self {
            cleaner: DataCleaner,
        }
    }

    /// 校验必需列
    pub fn validate_columns(&self, table: &RawTable) -> ImportResult<()> {
        for col in columns::REQUIRED {
            if !table.has_column(col) {
                return Err(ImportError::MissingColumn(col.to_string()));
            }
        }
        Ok(())
    }

    /// 表格 → 明细行
    ///
    /// 先校验表头,再逐行映射；必需值缺失的行被丢弃
    pub fn map_table(&self, table: &RawTable) -> ImportResult<Vec<LineItem>> {
        self.validate_columns(table)?;

        let mut items = Vec::with_capacity(table.rows.len());
        let mut dropped = 0usize;

        for row in &table.rows {
            match self.map_row(row) {
                Some(item) => items.push(item),
                None => {
                    dropped += 1;
                    debug!(row = row.row_number, "必需字段缺失，丢弃该行");
                }
            }
        }

        debug!(mapped = items.len(), dropped, "字段映射完成");
        Ok(items)
    }

    /// 单行映射（必需字段缺失返回 None）
    pub fn map_row(&self, row: &RawRow) -> Option<LineItem> {
        let values = &row.values;

        let lot_id = self.get_string(values, columns::LOT)?;
        let product = self.get_text(values, columns::PRODUCT)?;
        let quantity_raw = self.get_string(values, columns::QUANTITY)?;

        let quantity_t = self.cleaner.coerce_quantity(&quantity_raw);
        if quantity_t == 0.0 && quantity_raw.trim().parse::<f64>().is_err() {
            debug!(row = row.row_number, value = %quantity_raw, "数量非数值，按 0 计");
        }

        let due_date = self
            .get_string(values, columns::DUE_DATE)
            .and_then(|raw| {
                let parsed = self.cleaner.parse_date_tolerant(&raw);
                if parsed.is_none() {
                    debug!(row = row.row_number, value = %raw, "交货期无法解析，视为无交期");
                }
                parsed
            });

        Some(LineItem {
            lot_id,
            product,
            quantity_t,
            due_date,
            order_pc: self.get_text(values, columns::ORDER_PC),
            order_pedido: self.get_text(values, columns::ORDER_PEDIDO),
            forecast_date: self
                .cleaner
                .reformat_date_text(self.get_text(values, columns::FORECAST_DATE)),
            observation: self.get_text(values, columns::OBSERVATION),
            production_date: self
                .cleaner
                .reformat_date_text(self.get_text(values, columns::PRODUCTION_DATE)),
            shift: self.get_text(values, columns::SHIFT),
            coil_weight: self.get_text(values, columns::COIL_WEIGHT),
            row_number: row.row_number,
        })
    }

    /// 提取键字段（裁剪首尾空白）
    fn get_string(&self, row: &HashMap<String, String>, key: &str) -> Option<String> {
        Self::aliases(key)
            .iter()
            .find_map(|alias| self.cleaner.normalize_null(row.get(*alias)))
    }

    /// 提取透传字段（原文保留）
    fn get_text(&self, row: &HashMap<String, String>, key: &str) -> Option<String> {
        Self::aliases(key)
            .iter()
            .find_map(|alias| self.cleaner.non_blank(row.get(*alias)))
    }

    /// 列名别名（无重音写法）
    fn aliases(key: &str) -> Vec<&str> {
        match key {
            columns::FORECAST_DATE => vec![columns::FORECAST_DATE, "PREVISAO"],
            columns::OBSERVATION => vec![columns::OBSERVATION, "OBS.", "OBS"],
            columns::PRODUCTION_DATE => vec![columns::PRODUCTION_DATE, "DT PRODUCAO"],
            _ => vec![key],
        }
    }
}
