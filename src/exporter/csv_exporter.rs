// ==========================================
// 库存补货建议系统 - CSV 导出
// ==========================================
// 导出内容与当前显示视图一致（列与行）
// ==========================================

use crate::engine::view::InventoryView;
use crate::exporter::error::{ExportError, ExportResult};
use std::path::Path;

/// 视图 → UTF-8 CSV 字节（含表头，不含索引列）
pub fn to_csv_bytes(view: &InventoryView) -> ExportResult<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(&view.columns)?;
    for row in &view.rows {
        writer.write_record(row.cells.iter().map(|c| c.to_string()))?;
    }
    writer
        .into_inner()
        .map_err(|e| ExportError::FileWriteError(e.into_error()))
}

/// 视图 → CSV 文件
pub fn write_csv(view: &InventoryView, path: &Path) -> ExportResult<()> {
    let bytes = to_csv_bytes(view)?;
    std::fs::write(path, bytes)?;
    tracing::info!(path = %path.display(), rows = view.len(), "CSV 导出完成");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{AlertLevel, CellValue, RowId};
    use crate::engine::view::ViewRow;

    fn view() -> InventoryView {
        InventoryView {
            columns: vec!["Código".to_string(), "Existencias".to_string(), "Alerta".to_string()],
            rows: vec![ViewRow {
                position: 0,
                row_id: RowId(7),
                alert: AlertLevel::Critical,
                cells: vec![
                    CellValue::Text("A,1".to_string()),
                    CellValue::Number(0.0),
                    CellValue::Text("🔴".to_string()),
                ],
            }],
        }
    }

    #[test]
    fn test_csv_bytes_header_and_quoting() {
        let text = String::from_utf8(to_csv_bytes(&view()).unwrap()).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("Código,Existencias,Alerta"));
        assert_eq!(lines.next(), Some("\"A,1\",0,🔴"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_empty_view_writes_header_only() {
        let empty = InventoryView {
            columns: vec!["Código".to_string()],
            rows: vec![],
        };
        let text = String::from_utf8(to_csv_bytes(&empty).unwrap()).unwrap();
        assert_eq!(text, "Código\n");
    }

    #[test]
    fn test_write_csv_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventario.csv");
        write_csv(&view(), &path).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().starts_with("Código"));
    }
}
