// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use inventory_reorder::domain::{CellValue, InventoryTable, ItemRow, RowId};

// ==========================================
// ItemRow 构建器
// ==========================================

pub struct ItemBuilder {
    code: String,
    name: String,
    monthly_avg: f64,
    stock: f64,
    last_cost: Option<f64>,
    last_supplier: Option<String>,
    category: Option<String>,
}

impl ItemBuilder {
    pub fn new(code: &str) -> Self {
        Self {
            code: code.to_string(),
            name: format!("Artículo {}", code),
            monthly_avg: 30.0,
            stock: 0.0,
            last_cost: None,
            last_supplier: None,
            category: None,
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn monthly_avg(mut self, avg: f64) -> Self {
        self.monthly_avg = avg;
        self
    }

    pub fn stock(mut self, stock: f64) -> Self {
        self.stock = stock;
        self
    }

    pub fn cost(mut self, cost: f64) -> Self {
        self.last_cost = Some(cost);
        self
    }

    pub fn supplier(mut self, supplier: &str) -> Self {
        self.last_supplier = Some(supplier.to_string());
        self
    }

    pub fn category(mut self, category: &str) -> Self {
        self.category = Some(category.to_string());
        self
    }

    pub fn build(self, id: u64, extras: Vec<CellValue>) -> ItemRow {
        ItemRow {
            id: RowId(id),
            code: self.code,
            name: self.name,
            monthly_avg: self.monthly_avg,
            stock: self.stock,
            last_cost: self.last_cost,
            last_supplier: self.last_supplier,
            category: self.category,
            extras,
        }
    }
}

// ==========================================
// InventoryTable 构建器
// ==========================================

#[derive(Default)]
pub struct TableBuilder {
    extra_columns: Vec<String>,
    has_category: bool,
    has_supplier: bool,
    items: Vec<(ItemBuilder, Vec<CellValue>)>,
}

impl TableBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn extra_column(mut self, name: &str) -> Self {
        self.extra_columns.push(name.to_string());
        self
    }

    pub fn with_category(mut self) -> Self {
        self.has_category = true;
        self
    }

    /// 含供应商列（即使所有行的供应商为空）
    pub fn with_supplier_column(mut self) -> Self {
        self.has_supplier = true;
        self
    }

    pub fn item(mut self, item: ItemBuilder) -> Self {
        let extras = vec![CellValue::Empty; self.extra_columns.len()];
        self.items.push((item, extras));
        self
    }

    pub fn item_with_extras(mut self, item: ItemBuilder, extras: Vec<CellValue>) -> Self {
        self.items.push((item, extras));
        self
    }

    /// 生成 n 个连续编码的条目（库存递增）
    pub fn items(mut self, n: usize) -> Self {
        for i in 0..n {
            let item = ItemBuilder::new(&format!("IT-{:03}", i)).stock(i as f64);
            self = self.item(item);
        }
        self
    }

    /// 行标识按加入顺序从 0 开始分配
    ///
    /// 任一条目设置了供应商时视为含供应商列
    pub fn build(self) -> InventoryTable {
        let has_supplier =
            self.has_supplier || self.items.iter().any(|(item, _)| item.last_supplier.is_some());
        InventoryTable {
            extra_columns: self.extra_columns,
            has_category: self.has_category,
            has_supplier,
            rows: self
                .items
                .into_iter()
                .enumerate()
                .map(|(idx, (item, extras))| item.build(idx as u64, extras))
                .collect(),
        }
    }
}
