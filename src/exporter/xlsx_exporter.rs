// ==========================================
// 库存补货建议系统 - Excel 导出
// ==========================================
// 单工作表 "Inventario"，表头加粗
// ==========================================

use crate::domain::types::CellValue;
use crate::engine::view::InventoryView;
use crate::exporter::error::ExportResult;
use rust_xlsxwriter::{Format, Workbook};
use std::path::Path;

/// 工作表名称
pub const SHEET_NAME: &str = "Inventario";

fn build_workbook(view: &InventoryView) -> ExportResult<Workbook> {
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, name) in view.columns.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, name, &header_format)?;
    }

    for (idx, row) in view.rows.iter().enumerate() {
        let r = (idx + 1) as u32;
        for (col, cell) in row.cells.iter().enumerate() {
            let c = col as u16;
            match cell {
                CellValue::Empty => {}
                CellValue::Text(s) => {
                    worksheet.write_string(r, c, s)?;
                }
                CellValue::Number(n) => {
                    worksheet.write_number(r, c, *n)?;
                }
                CellValue::Bool(b) => {
                    worksheet.write_boolean(r, c, *b)?;
                }
            }
        }
    }

    worksheet.autofit();
    Ok(workbook)
}

/// 视图 → xlsx 字节
pub fn to_xlsx_bytes(view: &InventoryView) -> ExportResult<Vec<u8>> {
    let mut workbook = build_workbook(view)?;
    Ok(workbook.save_to_buffer()?)
}

/// 视图 → xlsx 文件
pub fn write_xlsx(view: &InventoryView, path: &Path) -> ExportResult<()> {
    let mut workbook = build_workbook(view)?;
    workbook.save(path)?;
    tracing::info!(path = %path.display(), rows = view.len(), "Excel 导出完成");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{AlertLevel, RowId};
    use crate::engine::view::ViewRow;
    use crate::importer::file_parser::UniversalFileParser;

    #[test]
    fn test_xlsx_readable_by_parser() {
        let view = InventoryView {
            columns: vec!["Código".to_string(), "Existencias".to_string()],
            rows: vec![ViewRow {
                position: 0,
                row_id: RowId(0),
                alert: AlertLevel::Ok,
                cells: vec![CellValue::Text("A1".to_string()), CellValue::Number(12.5)],
            }],
        };

        let bytes = to_xlsx_bytes(&view).unwrap();
        // 导出文件的表头位于第 0 行
        let sheet = UniversalFileParser.parse("inventario.xlsx", &bytes, 0).unwrap();

        assert_eq!(sheet.headers, vec!["Código".to_string(), "Existencias".to_string()]);
        assert_eq!(sheet.rows.len(), 1);
        assert_eq!(sheet.rows[0].cells[1], CellValue::Number(12.5));
    }
}
