// ==========================================
// 卷材横切排产系统 - 导入层
// ==========================================
// 职责: 外部表格读取,生成明细行
// 支持: Excel, CSV
// ==========================================

// 模块声明
pub mod data_cleaner;
pub mod error;
pub mod field_mapper;
pub mod file_parser;

// 重导出核心类型
pub use data_cleaner::DataCleaner;
pub use error::{ImportError, ImportResult};
pub use field_mapper::{columns, FieldMapper};
pub use file_parser::{CsvParser, ExcelParser, FileParser, RawRow, RawTable, UniversalFileParser};

use crate::domain::lot::LineItem;
use std::path::Path;
use tracing::{info, instrument};

/// 读取文件并映射为明细行
///
/// # 流程
/// 1. 文件解析（按扩展名选择解析器，Excel 读取指定工作表）
/// 2. 表头校验（缺必需列即失败）
/// 3. 逐行映射（缺必需值的行丢弃）
#[instrument(skip_all, fields(path = %file_path.as_ref().display(), sheet = sheet_name))]
pub fn read_line_items<P: AsRef<Path>>(file_path: P, sheet_name: &str) -> ImportResult<Vec<LineItem>> {
    let table = UniversalFileParser::new(sheet_name).parse(file_path.as_ref())?;
    let items = FieldMapper::new().map_table(&table)?;
    info!(rows = table.rows.len(), items = items.len(), "明细行读取完成");
    Ok(items)
}
