// ==========================================
// 库存补货建议系统 - 列名规范化器实现
// ==========================================
// 职责: 表头 TRIM / 去重音 / 小写 → 同义词改名为标准列 → 必需列检查
// ==========================================

use crate::domain::item::columns;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::{RawRow, RawSheet};
use crate::importer::inventory_importer_trait::HeaderNormalizer;
use unicode_normalization::UnicodeNormalization;

/// 同义词表: 规范化表头 → 标准列名
///
/// 键均为去重音后的小写形式；多个同义词指向同一标准列
const SYNONYMS: &[(&str, &str)] = &[
    ("codigo", columns::CODE),
    ("nombre", columns::NAME),
    ("promedio mensual vendido", columns::MONTHLY_AVG),
    ("promedio mensual", columns::MONTHLY_AVG),
    ("existencias", columns::STOCK),
    ("costo ultima compra", columns::LAST_COST),
    ("ultimo costo unitario con descuento", columns::LAST_COST),
    ("ultimo costo", columns::LAST_COST),
    ("ultimo proveedor", columns::LAST_SUPPLIER),
    ("proveedor", columns::LAST_SUPPLIER),
    ("categoria", columns::CATEGORY),
];

/// 列名已规范化的表
#[derive(Debug, Clone, PartialEq, Default)]
pub struct NormalizedSheet {
    /// 标准列名或规范化后的透传列名（无重复）
    pub columns: Vec<String>,
    pub rows: Vec<RawRow>,
}

impl NormalizedSheet {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }
}

pub struct ColumnNormalizer;

impl ColumnNormalizer {
    /// 查找标准列名
    pub fn canonical_label(normalized: &str) -> Option<&'static str> {
        SYNONYMS
            .iter()
            .find(|(key, _)| *key == normalized)
            .map(|(_, label)| *label)
    }
}

impl HeaderNormalizer for ColumnNormalizer {
    fn normalize_header(&self, raw: &str) -> String {
        // NFKD 分解后丢弃全部非 ASCII 码点（重音符号随之消失）
        raw.trim()
            .nfkd()
            .filter(|c| c.is_ascii())
            .collect::<String>()
            .trim()
            .to_lowercase()
    }

    fn normalize(&self, sheet: RawSheet) -> ImportResult<NormalizedSheet> {
        let mut columns: Vec<String> = Vec::with_capacity(sheet.headers.len());
        let mut kept: Vec<usize> = Vec::with_capacity(sheet.headers.len());

        for (idx, header) in sheet.headers.iter().enumerate() {
            let mut normalized = self.normalize_header(header);
            if normalized.is_empty() {
                normalized = format!("unnamed: {}", idx);
            }

            let label = match Self::canonical_label(&normalized) {
                Some(label) => label.to_string(),
                None => normalized,
            };

            // 同名列: 保留最左侧一列
            if columns.contains(&label) {
                tracing::warn!(column = %label, source = %header, "重复列已忽略");
                continue;
            }

            columns.push(label);
            kept.push(idx);
        }

        // 必需列检查（一次性列出全部缺失列）
        let missing: Vec<String> = columns::REQUIRED
            .iter()
            .filter(|required| !columns.iter().any(|c| c == *required))
            .map(|required| required.to_string())
            .collect();
        if !missing.is_empty() {
            tracing::warn!(missing = ?missing, "缺少必需列");
            return Err(ImportError::MissingRequiredColumns(missing));
        }

        let rows = if kept.len() == sheet.headers.len() {
            sheet.rows
        } else {
            sheet
                .rows
                .into_iter()
                .map(|row| RawRow {
                    sheet_row: row.sheet_row,
                    cells: kept.iter().map(|&i| row.cells[i].clone()).collect(),
                })
                .collect()
        };

        Ok(NormalizedSheet { columns, rows })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::CellValue;

    fn sheet(headers: &[&str]) -> RawSheet {
        RawSheet {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: vec![RawRow {
                sheet_row: 3,
                cells: headers
                    .iter()
                    .enumerate()
                    .map(|(i, _)| CellValue::Number(i as f64))
                    .collect(),
            }],
        }
    }

    #[test]
    fn test_normalize_header_strips_accents() {
        let normalizer = ColumnNormalizer;
        assert_eq!(normalizer.normalize_header("  Código "), "codigo");
        assert_eq!(normalizer.normalize_header("ÚLTIMO PROVEEDOR"), "ultimo proveedor");
        assert_eq!(normalizer.normalize_header("Categoría"), "categoria");
        assert_eq!(normalizer.normalize_header("Año €"), "ano");
    }

    #[test]
    fn test_synonyms_map_to_canonical() {
        let normalizer = ColumnNormalizer;
        let result = normalizer
            .normalize(sheet(&[
                "CODIGO",
                "Nombre",
                "Promedio Mensual Vendido",
                "Existencias",
                "Proveedor",
                "Costo última compra",
                "categoría",
            ]))
            .unwrap();

        assert_eq!(
            result.columns,
            vec![
                "Código",
                "Nombre",
                "Promedio mensual",
                "Existencias",
                "Último proveedor",
                "Último costo",
                "Categoría",
            ]
        );
    }

    #[test]
    fn test_canonical_labels_map_to_themselves() {
        let normalizer = ColumnNormalizer;
        let labels = [
            columns::CODE,
            columns::NAME,
            columns::MONTHLY_AVG,
            columns::STOCK,
            columns::LAST_COST,
            columns::LAST_SUPPLIER,
            columns::CATEGORY,
        ];
        let result = normalizer.normalize(sheet(&labels)).unwrap();
        assert_eq!(result.columns, labels.to_vec());
    }

    #[test]
    fn test_unknown_headers_pass_through() {
        let normalizer = ColumnNormalizer;
        let result = normalizer
            .normalize(sheet(&["Código", "Nombre", "Promedio mensual", "Existencias", "Ubicación"]))
            .unwrap();
        assert_eq!(result.columns[4], "ubicacion");
    }

    #[test]
    fn test_missing_required_columns_listed() {
        let normalizer = ColumnNormalizer;
        let result = normalizer.normalize(sheet(&["Código", "Descripción"]));

        match result {
            Err(ImportError::MissingRequiredColumns(missing)) => {
                assert_eq!(missing, vec!["Nombre", "Promedio mensual", "Existencias"]);
            }
            other => panic!("期望 MissingRequiredColumns, 实际 {:?}", other),
        }
    }

    #[test]
    fn test_duplicate_synonym_keeps_first() {
        let normalizer = ColumnNormalizer;
        let result = normalizer
            .normalize(sheet(&[
                "Código",
                "Nombre",
                "Promedio mensual",
                "Existencias",
                "Proveedor",
                "Último proveedor",
            ]))
            .unwrap();

        assert_eq!(result.columns.len(), 5);
        assert_eq!(result.rows[0].cells.len(), 5);
        // 保留最左侧的 Proveedor 列（值为 4）
        assert_eq!(result.rows[0].cells[4], CellValue::Number(4.0));
    }

    #[test]
    fn test_empty_header_named_by_index() {
        let normalizer = ColumnNormalizer;
        let result = normalizer
            .normalize(sheet(&["Código", "Nombre", "Promedio mensual", "Existencias", ""]))
            .unwrap();
        assert_eq!(result.columns[4], "unnamed: 4");
    }
}
