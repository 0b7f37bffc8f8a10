// ==========================================
// 库存补货建议系统 - 库存条目与库存表
// ==========================================
// 职责: 标准列名 / ItemRow / InventoryTable
// ==========================================

use crate::domain::types::{CellValue, RowId};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

// ==========================================
// 标准列名 (Canonical Columns)
// ==========================================
pub mod columns {
    pub const CODE: &str = "Código";
    pub const NAME: &str = "Nombre";
    pub const MONTHLY_AVG: &str = "Promedio mensual";
    pub const STOCK: &str = "Existencias";
    pub const LAST_COST: &str = "Último costo";
    pub const LAST_SUPPLIER: &str = "Último proveedor";
    pub const CATEGORY: &str = "Categoría";

    // 派生列
    pub const DAILY_CONSUMPTION: &str = "Consumo diario";
    pub const SUGGESTED_MIN: &str = "Mínimo sugerido";
    pub const SUGGESTED_MAX: &str = "Máximo sugerido";
    pub const MIN_PURCHASE: &str = "Cantidad mínima a comprar";
    pub const ALERT: &str = "Alerta";

    /// 加载后必须存在的列
    pub const REQUIRED: [&str; 4] = [CODE, NAME, MONTHLY_AVG, STOCK];

    /// 视图主列（固定顺序）
    pub const MAIN: [&str; 9] = [
        CODE,
        NAME,
        MONTHLY_AVG,
        STOCK,
        MIN_PURCHASE,
        SUGGESTED_MIN,
        SUGGESTED_MAX,
        LAST_COST,
        LAST_SUPPLIER,
    ];
}

/// 内容指纹（SHA-256）
pub type Fingerprint = [u8; 32];

// ==========================================
// ItemRow - 单个库存条目
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRow {
    pub id: RowId,
    pub code: String,
    pub name: String,
    /// 月均销量
    pub monthly_avg: f64,
    /// 当前库存（可为 0 或负数）
    pub stock: f64,
    pub last_cost: Option<f64>,
    pub last_supplier: Option<String>,
    pub category: Option<String>,
    /// 透传列的值，与 InventoryTable::extra_columns 一一对应
    pub extras: Vec<CellValue>,
}

// ==========================================
// InventoryTable - 库存表
// ==========================================
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct InventoryTable {
    /// 透传列名（规范化后，未匹配同义词的列，按源顺序）
    pub extra_columns: Vec<String>,
    /// 源文件是否包含 Categoría 列
    pub has_category: bool,
    /// 源文件是否包含 Último proveedor 列
    #[serde(default)]
    pub has_supplier: bool,
    pub rows: Vec<ItemRow>,
}

impl InventoryTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, id: RowId) -> Option<&ItemRow> {
        self.rows.iter().find(|r| r.id == id)
    }

    pub fn contains(&self, id: RowId) -> bool {
        self.rows.iter().any(|r| r.id == id)
    }

    /// 可选显示列: 全部透传列，存在时含 Categoría
    pub fn optional_columns(&self) -> Vec<String> {
        let mut optional = Vec::with_capacity(self.extra_columns.len() + 1);
        if self.has_category {
            optional.push(columns::CATEGORY.to_string());
        }
        optional.extend(self.extra_columns.iter().cloned());
        optional
    }

    /// 内容指纹（建议缓存键的一部分）
    ///
    /// 浮点数按位模式参与哈希，保证相同内容得到相同指纹
    pub fn fingerprint(&self) -> Fingerprint {
        let mut hasher = Sha256::new();
        hasher.update((self.extra_columns.len() as u64).to_le_bytes());
        for column in &self.extra_columns {
            hash_str(&mut hasher, column);
        }
        hasher.update([self.has_category as u8, self.has_supplier as u8]);
        hasher.update((self.rows.len() as u64).to_le_bytes());
        for row in &self.rows {
            hasher.update(row.id.0.to_le_bytes());
            hash_str(&mut hasher, &row.code);
            hash_str(&mut hasher, &row.name);
            hasher.update(row.monthly_avg.to_bits().to_le_bytes());
            hasher.update(row.stock.to_bits().to_le_bytes());
            hash_opt_f64(&mut hasher, row.last_cost);
            hash_opt_str(&mut hasher, row.last_supplier.as_deref());
            hash_opt_str(&mut hasher, row.category.as_deref());
            for value in &row.extras {
                hash_cell(&mut hasher, value);
            }
        }
        hasher.finalize().into()
    }
}

fn hash_str(hasher: &mut Sha256, value: &str) {
    hasher.update((value.len() as u64).to_le_bytes());
    hasher.update(value.as_bytes());
}

fn hash_opt_str(hasher: &mut Sha256, value: Option<&str>) {
    match value {
        Some(v) => {
            hasher.update([1]);
            hash_str(hasher, v);
        }
        None => hasher.update([0]),
    }
}

fn hash_opt_f64(hasher: &mut Sha256, value: Option<f64>) {
    match value {
        Some(v) => {
            hasher.update([1]);
            hasher.update(v.to_bits().to_le_bytes());
        }
        None => hasher.update([0]),
    }
}

fn hash_cell(hasher: &mut Sha256, value: &CellValue) {
    match value {
        CellValue::Empty => hasher.update([0]),
        CellValue::Text(s) => {
            hasher.update([1]);
            hash_str(hasher, s);
        }
        CellValue::Number(n) => {
            hasher.update([2]);
            hasher.update(n.to_bits().to_le_bytes());
        }
        CellValue::Bool(b) => hasher.update([3, *b as u8]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(id: u64, code: &str, stock: f64) -> ItemRow {
        ItemRow {
            id: RowId(id),
            code: code.to_string(),
            name: format!("Item {}", code),
            monthly_avg: 30.0,
            stock,
            last_cost: None,
            last_supplier: None,
            category: None,
            extras: vec![],
        }
    }

    #[test]
    fn test_fingerprint_stable() {
        let table = InventoryTable {
            extra_columns: vec![],
            has_category: false,
            has_supplier: false,
            rows: vec![row(0, "A1", 5.0), row(1, "A2", 6.0)],
        };
        assert_eq!(table.fingerprint(), table.clone().fingerprint());
    }

    #[test]
    fn test_fingerprint_changes_with_content() {
        let a = InventoryTable {
            extra_columns: vec![],
            has_category: false,
            has_supplier: false,
            rows: vec![row(0, "A1", 5.0)],
        };
        let mut b = a.clone();
        b.rows[0].stock = 5.5;
        assert_ne!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn test_optional_columns_include_category() {
        let table = InventoryTable {
            extra_columns: vec!["ubicacion".to_string()],
            has_category: true,
            has_supplier: false,
            rows: vec![],
        };
        assert_eq!(
            table.optional_columns(),
            vec!["Categoría".to_string(), "ubicacion".to_string()]
        );
    }
}
