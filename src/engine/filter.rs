// ==========================================
// 库存补货建议系统 - 筛选与搜索
// ==========================================
// 职责: 告警等级 / 供应商 / 类别 / 关键字筛选
// 红线: 纯函数，不修改工作表
// ==========================================

use crate::domain::item::InventoryTable;
use crate::domain::suggestion::{SuggestedRow, SuggestionTable};
use crate::domain::types::AlertLevel;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

// ==========================================
// FilterParams - 筛选参数
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterParams {
    /// 允许的告警等级
    pub alerts: BTreeSet<AlertLevel>,
    /// 允许的供应商（None = 不启用该筛选，仅用于无供应商列的表）
    pub suppliers: Option<BTreeSet<String>>,
    /// 允许的类别（None = 不启用该筛选）
    pub categories: Option<BTreeSet<String>>,
    /// 编码/名称关键字（不区分大小写，空串匹配全部）
    pub search: String,
}

impl Default for FilterParams {
    fn default() -> Self {
        Self {
            alerts: AlertLevel::ALL.into_iter().collect(),
            suppliers: None,
            categories: None,
            search: String::new(),
        }
    }
}

impl FilterParams {
    /// 某张库存表的默认筛选
    ///
    /// 含供应商列时，供应商筛选默认启用并选中全部非空供应商，
    /// 因此缺失供应商的行默认不显示
    pub fn for_table(table: &InventoryTable) -> Self {
        Self {
            suppliers: default_suppliers(table),
            ..Self::default()
        }
    }

    /// 单行是否通过全部筛选条件
    pub fn matches(&self, row: &SuggestedRow) -> bool {
        self.matches_alert(row) && self.matches_supplier(row) && self.matches_category(row) && self.matches_search(row)
    }

    fn matches_alert(&self, row: &SuggestedRow) -> bool {
        self.alerts.contains(&row.alert)
    }

    /// 启用后，缺失供应商的行不通过
    fn matches_supplier(&self, row: &SuggestedRow) -> bool {
        match &self.suppliers {
            None => true,
            Some(allowed) => row
                .item
                .last_supplier
                .as_ref()
                .is_some_and(|s| allowed.contains(s)),
        }
    }

    fn matches_category(&self, row: &SuggestedRow) -> bool {
        match &self.categories {
            None => true,
            Some(allowed) => row
                .item
                .category
                .as_ref()
                .is_some_and(|c| allowed.contains(c)),
        }
    }

    /// 字面量子串匹配（非正则）
    fn matches_search(&self, row: &SuggestedRow) -> bool {
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        row.item.code.to_lowercase().contains(&needle)
            || row.item.name.to_lowercase().contains(&needle)
    }
}

/// 默认供应商允许集: 表中全部非空供应商；无供应商列时不启用
pub fn default_suppliers(table: &InventoryTable) -> Option<BTreeSet<String>> {
    table.has_supplier.then(|| {
        table
            .rows
            .iter()
            .filter_map(|r| r.last_supplier.clone())
            .collect()
    })
}

/// 按筛选参数过滤建议表，保持原顺序
pub fn apply_filters<'a>(table: &'a SuggestionTable, params: &FilterParams) -> Vec<&'a SuggestedRow> {
    let rows: Vec<&SuggestedRow> = table.rows.iter().filter(|row| params.matches(row)).collect();
    tracing::debug!(total = table.len(), matched = rows.len(), "筛选完成");
    rows
}

// ==========================================
// FilterOptions - 多选项候选值
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FilterOptions {
    pub alerts: Vec<AlertLevel>,
    /// 非空供应商，按首次出现顺序去重
    pub suppliers: Vec<String>,
    /// 仅当存在 Categoría 列时为 Some
    pub categories: Option<Vec<String>>,
    /// 可选显示列
    pub optional_columns: Vec<String>,
}

impl FilterOptions {
    pub fn from_table(table: &InventoryTable) -> Self {
        let suppliers = distinct(table.rows.iter().filter_map(|r| r.last_supplier.as_deref()));
        let categories = table
            .has_category
            .then(|| distinct(table.rows.iter().filter_map(|r| r.category.as_deref())));

        Self {
            alerts: AlertLevel::ALL.to_vec(),
            suppliers,
            categories,
            optional_columns: table.optional_columns(),
        }
    }
}

fn distinct<'a>(values: impl Iterator<Item = &'a str>) -> Vec<String> {
    let mut seen = BTreeSet::new();
    let mut out = Vec::new();
    for value in values {
        if seen.insert(value) {
            out.push(value.to_string());
        }
    }
    out
}
