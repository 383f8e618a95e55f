// ==========================================
// 卷材横切排产系统 - 文件解析器实现
// ==========================================
// 阶段 0: 文件读取与解析
// 支持: Excel (.xlsx/.xls, 指定工作表) / CSV (.csv)
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use calamine::{open_workbook_auto, Data, Reader};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::path::Path;
use tracing::{debug, info};

// ==========================================
// RawTable - 解析结果
// ==========================================
// 表头保留原始顺序,便于表头校验
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

#[derive(Debug, Clone)]
pub struct RawRow {
    pub row_number: usize, // 源文件行号（表头为第 1 行）
    pub values: HashMap<String, String>, // 单元格原文,不做裁剪
}

impl RawTable {
    pub fn has_column(&self, name: &str) -> bool {
        self.headers.iter().any(|h| h == name)
    }

    fn push_row(&mut self, row_number: usize, cells: Vec<String>) {
        let mut values = HashMap::new();
        for (col_idx, value) in cells.into_iter().enumerate() {
            if let Some(header) = self.headers.get(col_idx) {
                values.insert(header.clone(), value);
            }
        }

        // 跳过完全空白的行
        if values.values().all(|v| v.trim().is_empty()) {
            return;
        }

        self.rows.push(RawRow { row_number, values });
    }
}

/// 表头标准化: 去除首尾空白（含 BOM）
fn normalize_header(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}').trim().to_string()
}

// ==========================================
// FileParser Trait
// ==========================================
pub trait FileParser {
    fn parse_to_raw_table(&self, file_path: &Path) -> ImportResult<RawTable>;
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_to_raw_table(&self, file_path: &Path) -> ImportResult<RawTable> {
        let path = file_path;

        // 检查文件存在
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        // 打开 CSV 文件
        let file = File::open(path)?;
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(file);

        let mut table = RawTable {
            headers: reader.headers()?.iter().map(normalize_header).collect(),
            rows: Vec::new(),
        };

        for (row_idx, result) in reader.records().enumerate() {
            let record = result?;
            // 引号内换行会使记录跨多行,以记录起始行为准
            let row_number = record
                .position()
                .map(|p| p.line() as usize)
                .unwrap_or(row_idx + 2);
            table.push_row(row_number, record.iter().map(|v| v.to_string()).collect());
        }

        debug!(rows = table.rows.len(), "CSV 解析完成");
        Ok(table)
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser {
    sheet_name: String,
}

impl ExcelParser {
    pub fn new(sheet_name: impl Into<String>) -> Self {
        Self {
            sheet_name: sheet_name.into(),
        }
    }

    /// 目标工作表必须存在（名称精确匹配）
    fn ensure_sheet(&self, sheet_names: &[String]) -> ImportResult<()> {
        if sheet_names.iter().any(|name| name == &self.sheet_name) {
            return Ok(());
        }
        Err(ImportError::SheetNotFound {
            sheet: self.sheet_name.clone(),
            available: sheet_names.join(", "),
        })
    }
}

/// 单元格转文本
///
/// 日期单元格输出 Excel 序列号,交由日期解析器统一处理
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::Float(f) => f.to_string(),
        Data::DateTime(dt) => dt.as_f64().to_string(),
        other => other.to_string(),
    }
}

impl FileParser for ExcelParser {
    fn parse_to_raw_table(&self, file_path: &Path) -> ImportResult<RawTable> {
        let path = file_path;

        // 检查文件存在
        if !path.exists() {
            return Err(ImportError::FileNotFound(path.display().to_string()));
        }

        // 打开 Excel 文件
        let mut workbook = open_workbook_auto(path)?;

        // 按名称选择工作表
        self.ensure_sheet(&workbook.sheet_names())?;

        let range = workbook.worksheet_range(&self.sheet_name)?;

        // 提取表头（第一行）
        let mut rows = range.rows();
        let header_row = rows
            .next()
            .ok_or_else(|| ImportError::EmptySheet(self.sheet_name.clone()))?;

        let mut table = RawTable {
            headers: header_row
                .iter()
                .map(|cell| normalize_header(&cell_to_string(cell)))
                .collect(),
            rows: Vec::new(),
        };

        // 读取数据行
        for (row_idx, data_row) in rows.enumerate() {
            table.push_row(row_idx + 2, data_row.iter().map(cell_to_string).collect());
        }

        info!(sheet = %self.sheet_name, rows = table.rows.len(), "Excel 解析完成");
        Ok(table)
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser {
    sheet_name: String,
}

impl UniversalFileParser {
    pub fn new(sheet_name: impl Into<String>) -> Self {
        Self {
            sheet_name: sheet_name.into(),
        }
    }

    pub fn parse<P: AsRef<Path>>(&self, file_path: P) -> ImportResult<RawTable> {
        let path = file_path.as_ref();
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => CsvParser.parse_to_raw_table(path),
            "xlsx" | "xlsm" | "xls" => ExcelParser::new(self.sheet_name.clone()).parse_to_raw_table(path),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::importer::data_cleaner::DataCleaner;
    use calamine::{ExcelDateTime, ExcelDateTimeType};
    use chrono::NaiveDate;
    use std::io::Write;
    use tempfile::{Builder, NamedTempFile};

    fn csv_file(lines: &[&str]) -> NamedTempFile {
        let mut temp_file = Builder::new().suffix(".csv").tempfile().unwrap();
        for line in lines {
            writeln!(temp_file, "{}", line).unwrap();
        }
        temp_file
    }

    #[test]
    fn test_csv_parser_valid_file() {
        let temp_file = csv_file(&[" LOTE ,PRODUTO,QTDE", "L001,CHAPA 4.75X1250,50", "L002,CHAPA 6X1000,80"]);

        let table = CsvParser.parse_to_raw_table(temp_file.path()).unwrap();

        assert_eq!(table.headers, vec!["LOTE", "PRODUTO", "QTDE"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].row_number, 2);
        assert_eq!(table.rows[0].values.get("LOTE"), Some(&"L001".to_string()));
        assert_eq!(table.rows[1].values.get("QTDE"), Some(&"80".to_string()));
    }

    #[test]
    fn test_csv_parser_file_not_found() {
        let result = CsvParser.parse_to_raw_table(Path::new("non_existent.csv"));
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }

    #[test]
    fn test_csv_parser_skip_empty_rows() {
        let temp_file = csv_file(&["LOTE,QTDE", "L001,2.5", ",", "L002,3.0"]);

        let table = CsvParser.parse_to_raw_table(temp_file.path()).unwrap();

        // 应跳过空行,行号保持源文件位置
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1].row_number, 4);
    }

    #[test]
    fn test_csv_header_only() {
        let temp_file = csv_file(&["LOTE,PRODUTO,QTDE"]);
        let table = CsvParser.parse_to_raw_table(temp_file.path()).unwrap();
        assert!(table.has_column("PRODUTO"));
        assert!(table.rows.is_empty());
    }

    #[test]
    fn test_universal_parser_rejects_unknown_extension() {
        let parser = UniversalFileParser::new("Fagor");
        let result = parser.parse("plan.txt");
        assert!(matches!(result, Err(ImportError::UnsupportedFormat(ref ext)) if ext == "txt"));
    }

    #[test]
    fn test_cell_to_string() {
        assert_eq!(cell_to_string(&Data::Empty), "");
        assert_eq!(cell_to_string(&Data::Float(130.0)), "130");
        assert_eq!(cell_to_string(&Data::Float(4.5)), "4.5");
        assert_eq!(cell_to_string(&Data::String("L001".to_string())), "L001");
    }

    #[test]
    fn test_date_cell_becomes_excel_serial() {
        let cell = Data::DateTime(ExcelDateTime::new(45444.0, ExcelDateTimeType::DateTime, false));
        let text = cell_to_string(&cell);
        assert_eq!(text, "45444");

        let parsed = DataCleaner.parse_date_tolerant(&text);
        let expected = NaiveDate::from_ymd_opt(2024, 6, 1).and_then(|d| d.and_hms_opt(0, 0, 0));
        assert_eq!(parsed, expected);
    }

    #[test]
    fn test_excel_sheet_selection() {
        let sheets = vec!["Outra".to_string(), "Fagor".to_string()];

        assert!(ExcelParser::new("Fagor").ensure_sheet(&sheets).is_ok());

        // 名称精确匹配,大小写不同视为不存在
        let err = ExcelParser::new("fagor").ensure_sheet(&sheets).unwrap_err();
        match err {
            ImportError::SheetNotFound { sheet, available } => {
                assert_eq!(sheet, "fagor");
                assert_eq!(available, "Outra, Fagor");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_csv_row_number_follows_multiline_record() {
        let temp_file = csv_file(&[
            "LOTE,OBS.:",
            "L001,\"linha 1",
            "linha 2\"",
            "L002,ok",
        ]);

        let table = CsvParser.parse_to_raw_table(temp_file.path()).unwrap();

        assert_eq!(table.rows[0].row_number, 2);
        assert_eq!(table.rows[1].row_number, 4);
        assert_eq!(table.rows[0].values["OBS.:"], "linha 1\nlinha 2");
    }

    #[test]
    fn test_cells_kept_verbatim() {
        let temp_file = csv_file(&["LOTE,OBS.:", " L001 ,  ligar antes  ", "  ,  "]);

        let table = CsvParser.parse_to_raw_table(temp_file.path()).unwrap();

        // 全空白行跳过,其余单元格保持原文
        assert_eq!(table.rows.len(), 1);
        assert_eq!(table.rows[0].values["LOTE"], " L001 ");
        assert_eq!(table.rows[0].values["OBS.:"], "  ligar antes  ");
    }
}
