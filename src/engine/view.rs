// ==========================================
// 库存补货建议系统 - 显示视图投影
// ==========================================
// 职责: 筛选结果 → 显示列（主列 + 选中的可选列 + Alerta）
// 导出与显示使用同一视图
// ==========================================

use crate::domain::item::columns;
use crate::domain::suggestion::{SuggestedRow, SuggestionTable};
use crate::domain::types::{AlertLevel, CellValue, RowId};
use serde::{Deserialize, Serialize};

/// 视图行
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewRow {
    /// 视图内位置（从 0 开始，连续）
    pub position: usize,
    /// 稳定行标识（删除使用）
    pub row_id: RowId,
    pub alert: AlertLevel,
    /// 与 InventoryView::columns 一一对应
    pub cells: Vec<CellValue>,
}

/// 当前显示视图
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InventoryView {
    pub columns: Vec<String>,
    pub rows: Vec<ViewRow>,
}

impl InventoryView {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// 视图位置 → 行标识
    pub fn row_id_at(&self, position: usize) -> Option<RowId> {
        self.rows.get(position).map(|r| r.row_id)
    }

    /// 构建视图
    ///
    /// # 参数
    /// - table: 建议表（提供列结构）
    /// - rows: 筛选后的行
    /// - extra_columns: 选中的可选列（未知列名被忽略）
    pub fn build(table: &SuggestionTable, rows: &[&SuggestedRow], extra_columns: &[String]) -> Self {
        let extras: Vec<&String> = extra_columns
            .iter()
            .filter(|c| is_optional_column(table, c))
            .collect();

        let mut header: Vec<String> = columns::MAIN.iter().map(|c| c.to_string()).collect();
        header.extend(extras.iter().map(|c| c.to_string()));
        header.push(columns::ALERT.to_string());

        let view_rows = rows
            .iter()
            .enumerate()
            .map(|(position, row)| {
                let mut cells = main_cells(row);
                cells.extend(extras.iter().map(|c| extra_cell(table, row, c)));
                cells.push(CellValue::Text(row.alert.symbol().to_string()));
                ViewRow {
                    position,
                    row_id: row.item.id,
                    alert: row.alert,
                    cells,
                }
            })
            .collect();

        Self {
            columns: header,
            rows: view_rows,
        }
    }
}

fn is_optional_column(table: &SuggestionTable, column: &str) -> bool {
    (table.has_category && column == columns::CATEGORY)
        || table.extra_columns.iter().any(|c| c == column)
}

fn main_cells(row: &SuggestedRow) -> Vec<CellValue> {
    let item = &row.item;
    vec![
        CellValue::Text(item.code.clone()),
        CellValue::Text(item.name.clone()),
        CellValue::Number(item.monthly_avg),
        CellValue::Number(item.stock),
        CellValue::Number(row.min_purchase_qty),
        CellValue::Number(row.suggested_min),
        CellValue::Number(row.suggested_max),
        item.last_cost.map(CellValue::Number).unwrap_or_default(),
        item.last_supplier
            .clone()
            .map(CellValue::Text)
            .unwrap_or_default(),
    ]
}

fn extra_cell(table: &SuggestionTable, row: &SuggestedRow, column: &str) -> CellValue {
    if column == columns::CATEGORY {
        return row.item.category.clone().map(CellValue::Text).unwrap_or_default();
    }
    table
        .extra_columns
        .iter()
        .position(|c| c == column)
        .and_then(|idx| row.item.extras.get(idx).cloned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::item::{InventoryTable, ItemRow};
    use crate::domain::suggestion::ThresholdParams;
    use crate::engine::suggestion::SuggestionEngine;

    fn table() -> SuggestionTable {
        let inventory = InventoryTable {
            extra_columns: vec!["ubicacion".to_string()],
            has_category: true,
            has_supplier: false,
            rows: vec![ItemRow {
                id: RowId(7),
                code: "A1".to_string(),
                name: "Tornillo".to_string(),
                monthly_avg: 60.0,
                stock: 45.0,
                last_cost: Some(1.5),
                last_supplier: Some("ACME".to_string()),
                category: Some("Ferretería".to_string()),
                extras: vec![CellValue::Text("B-12".to_string())],
            }],
        };
        SuggestionEngine::new().compute(&inventory, ThresholdParams::default())
    }

    #[test]
    fn test_view_main_columns_and_alert_last() {
        let table = table();
        let rows: Vec<&SuggestedRow> = table.rows.iter().collect();
        let view = InventoryView::build(&table, &rows, &[]);

        assert_eq!(view.columns.len(), 10);
        assert_eq!(view.columns[0], "Código");
        assert_eq!(view.columns[9], "Alerta");
        assert_eq!(view.rows[0].cells[9], CellValue::Text("🟢".to_string()));
        assert_eq!(view.rows[0].row_id, RowId(7));
    }

    #[test]
    fn test_view_selected_extras() {
        let table = table();
        let rows: Vec<&SuggestedRow> = table.rows.iter().collect();
        let selection = vec![
            "ubicacion".to_string(),
            "Categoría".to_string(),
            "desconocida".to_string(),
        ];
        let view = InventoryView::build(&table, &rows, &selection);

        assert_eq!(&view.columns[9..], &["ubicacion", "Categoría", "Alerta"]);
        assert_eq!(view.rows[0].cells[9], CellValue::Text("B-12".to_string()));
        assert_eq!(view.rows[0].cells[10], CellValue::Text("Ferretería".to_string()));
    }

    #[test]
    fn test_row_id_at() {
        let table = table();
        let rows: Vec<&SuggestedRow> = table.rows.iter().collect();
        let view = InventoryView::build(&table, &rows, &[]);
        assert_eq!(view.row_id_at(0), Some(RowId(7)));
        assert_eq!(view.row_id_at(1), None);
    }
}
