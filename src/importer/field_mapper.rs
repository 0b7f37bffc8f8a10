// ==========================================
// 库存补货建议系统 - 字段映射器实现
// ==========================================
// 职责: 规范化表 → InventoryTable + 类型转换 + 行标识分配
// ==========================================

use crate::domain::item::{columns, InventoryTable, ItemRow};
use crate::domain::types::{CellValue, RowId};
use crate::importer::column_normalizer::NormalizedSheet;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::RawRow;
use crate::importer::inventory_importer_trait::FieldMapper as FieldMapperTrait;

pub struct FieldMapper;

/// 标准列在规范化表中的位置
struct ColumnLayout {
    code: usize,
    name: usize,
    monthly_avg: usize,
    stock: usize,
    last_cost: Option<usize>,
    last_supplier: Option<usize>,
    category: Option<usize>,
    /// (列名， 位置)
    extras: Vec<(String, usize)>,
}

impl ColumnLayout {
    fn resolve(sheet: &NormalizedSheet) -> ImportResult<Self> {
        let required = |name: &str| {
            sheet
                .column_index(name)
                .ok_or_else(|| ImportError::MissingRequiredColumns(vec![name.to_string()]))
        };

        let known: [&str; 7] = [
            columns::CODE,
            columns::NAME,
            columns::MONTHLY_AVG,
            columns::STOCK,
            columns::LAST_COST,
            columns::LAST_SUPPLIER,
            columns::CATEGORY,
        ];

        let extras = sheet
            .columns
            .iter()
            .enumerate()
            .filter(|(_, c)| !known.contains(&c.as_str()))
            .map(|(idx, c)| (c.clone(), idx))
            .collect();

        Ok(Self {
            code: required(columns::CODE)?,
            name: required(columns::NAME)?,
            monthly_avg: required(columns::MONTHLY_AVG)?,
            stock: required(columns::STOCK)?,
            last_cost: sheet.column_index(columns::LAST_COST),
            last_supplier: sheet.column_index(columns::LAST_SUPPLIER),
            category: sheet.column_index(columns::CATEGORY),
            extras,
        })
    }
}

impl FieldMapperTrait for FieldMapper {
    fn map_to_table(&self, sheet: NormalizedSheet) -> ImportResult<InventoryTable> {
        let layout = ColumnLayout::resolve(&sheet)?;

        let mut rows = Vec::with_capacity(sheet.rows.len());
        for (idx, raw) in sheet.rows.iter().enumerate() {
            rows.push(self.map_row(&layout, raw, RowId(idx as u64))?);
        }

        Ok(InventoryTable {
            extra_columns: layout.extras.iter().map(|(name, _)| name.clone()).collect(),
            has_category: layout.category.is_some(),
            has_supplier: layout.last_supplier.is_some(),
            rows,
        })
    }
}

impl FieldMapper {
    fn map_row(&self, layout: &ColumnLayout, raw: &RawRow, id: RowId) -> ImportResult<ItemRow> {
        Ok(ItemRow {
            id,
            code: self.get_text(raw, layout.code).unwrap_or_default(),
            name: self.get_text(raw, layout.name).unwrap_or_default(),
            monthly_avg: self
                .parse_f64(raw, layout.monthly_avg, columns::MONTHLY_AVG)?
                .unwrap_or(0.0),
            stock: self
                .parse_f64(raw, layout.stock, columns::STOCK)?
                .unwrap_or(0.0),
            last_cost: match layout.last_cost {
                Some(idx) => self.parse_f64(raw, idx, columns::LAST_COST)?,
                None => None,
            },
            last_supplier: layout.last_supplier.and_then(|idx| self.get_text(raw, idx)),
            category: layout.category.and_then(|idx| self.get_text(raw, idx)),
            extras: layout
                .extras
                .iter()
                .map(|(_, idx)| raw.cells.get(*idx).cloned().unwrap_or_default())
                .collect(),
        })
    }

    /// 提取文本字段（空值返回 None）
    fn get_text(&self, raw: &RawRow, idx: usize) -> Option<String> {
        match raw.cells.get(idx) {
            None | Some(CellValue::Empty) => None,
            Some(cell) => {
                let text = cell.to_string();
                let trimmed = text.trim();
                if trimmed.is_empty() {
                    None
                } else {
                    Some(trimmed.to_string())
                }
            }
        }
    }

    /// 解析浮点数（空值返回 None，无法解析时报错）
    fn parse_f64(&self, raw: &RawRow, idx: usize, field: &str) -> ImportResult<Option<f64>> {
        match raw.cells.get(idx) {
            None | Some(CellValue::Empty) => Ok(None),
            Some(CellValue::Text(value)) if value.trim().is_empty() => Ok(None),
            Some(cell) => cell
                .as_f64()
                .map(Some)
                .ok_or_else(|| ImportError::TypeConversionError {
                    row: raw.sheet_row,
                    field: field.to_string(),
                    message: format!("无法解析为数值: {}", cell),
                }),
        }
    }
}
