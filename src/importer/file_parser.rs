// ==========================================
// 库存补货建议系统 - 文件解析器实现
// ==========================================
// 支持: Excel (.xlsx/.xls/.xlsm/.ods) / CSV (.csv)
// 约定: 表头位于固定偏移行（默认第 2 行），不自动探测
// ==========================================

use crate::domain::types::CellValue;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::inventory_importer_trait::FileParser;
use calamine::{open_workbook_auto_from_rs, Data, Reader};
use csv::ReaderBuilder;
use std::io::Cursor;
use std::path::Path;

// ==========================================
// 原始表结构
// ==========================================

/// 数据行（保留源文件行号用于错误定位）
#[derive(Debug, Clone, PartialEq)]
pub struct RawRow {
    /// 源文件行号（从 1 开始，与 Excel 行号一致）
    pub sheet_row: usize,
    /// 与表头等长
    pub cells: Vec<CellValue>,
}

/// 解析结果: 表头 + 数据行
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RawSheet {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

impl RawSheet {
    /// 补齐/截断行长度并跳过完全空白的行
    fn push_row(&mut self, sheet_row: usize, mut cells: Vec<CellValue>) {
        cells.resize(self.headers.len(), CellValue::Empty);
        if cells.iter().all(CellValue::is_empty) {
            return;
        }
        self.rows.push(RawRow { sheet_row, cells });
    }
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse_bytes(&self, bytes: &[u8], header_row: usize) -> ImportResult<RawSheet> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true) // 允许行长度不一致
            .from_reader(bytes);

        let mut sheet = RawSheet::default();
        let mut header_seen = false;

        for (row_idx, result) in reader.records().enumerate() {
            let record = result?;
            if row_idx < header_row {
                continue;
            }
            if row_idx == header_row {
                sheet.headers = record.iter().map(|h| h.trim().to_string()).collect();
                header_seen = true;
                continue;
            }

            let cells = record
                .iter()
                .map(|value| {
                    let trimmed = value.trim();
                    if trimmed.is_empty() {
                        CellValue::Empty
                    } else {
                        CellValue::Text(trimmed.to_string())
                    }
                })
                .collect();
            sheet.push_row(row_idx + 1, cells);
        }

        if !header_seen {
            return Err(ImportError::HeaderRowMissing { header_row });
        }

        tracing::debug!(
            columns = sheet.headers.len(),
            rows = sheet.rows.len(),
            "CSV 解析完成"
        );
        Ok(sheet)
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
pub struct ExcelParser;

impl FileParser for ExcelParser {
    fn parse_bytes(&self, bytes: &[u8], header_row: usize) -> ImportResult<RawSheet> {
        let mut workbook = open_workbook_auto_from_rs(Cursor::new(bytes.to_vec()))?;

        // 读取第一个 sheet
        let sheet_names = workbook.sheet_names();
        let sheet_name = sheet_names
            .first()
            .cloned()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无工作表".to_string()))?;

        let range = workbook.worksheet_range(&sheet_name)?;

        // Range 从第一个非空单元格开始，需换算为工作表绝对行列
        let (start_row, start_col) = match range.start() {
            Some((r, c)) => (r as usize, c as usize),
            None => return Err(ImportError::HeaderRowMissing { header_row }),
        };

        let mut sheet = RawSheet::default();
        let mut header_seen = false;

        // 表头行位于数据区之前（整行为空）
        if header_row < start_row {
            let width = start_col + range.width();
            sheet.headers = vec![String::new(); width];
            header_seen = true;
        }

        for (offset, data_row) in range.rows().enumerate() {
            let abs_row = start_row + offset;
            if abs_row < header_row {
                continue;
            }

            let mut cells = vec![CellValue::Empty; start_col];
            cells.extend(data_row.iter().map(convert_cell));

            if abs_row == header_row {
                sheet.headers = cells.iter().map(|c| c.to_string().trim().to_string()).collect();
                header_seen = true;
                continue;
            }

            sheet.push_row(abs_row + 1, cells);
        }

        if !header_seen {
            return Err(ImportError::HeaderRowMissing { header_row });
        }

        tracing::debug!(
            sheet = %sheet_name,
            columns = sheet.headers.len(),
            rows = sheet.rows.len(),
            "Excel 解析完成"
        );
        Ok(sheet)
    }
}

/// calamine 单元格 → CellValue
fn convert_cell(cell: &Data) -> CellValue {
    match cell {
        Data::Empty => CellValue::Empty,
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Float(f) => CellValue::Number(*f),
        Data::Bool(b) => CellValue::Bool(*b),
        Data::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                CellValue::Empty
            } else {
                CellValue::Text(trimmed.to_string())
            }
        }
        other => CellValue::Text(other.to_string()),
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl UniversalFileParser {
    /// 根据文件名扩展名选择解析器
    pub fn parse(&self, file_name: &str, bytes: &[u8], header_row: usize) -> ImportResult<RawSheet> {
        let ext = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => CsvParser.parse_bytes(bytes, header_row),
            "xlsx" | "xlsm" | "xls" | "ods" => ExcelParser.parse_bytes(bytes, header_row),
            _ => Err(ImportError::UnsupportedFormat(ext)),
        }
    }
}
