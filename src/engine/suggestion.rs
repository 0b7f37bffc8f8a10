// ==========================================
// 库存补货建议系统 - 补货建议引擎
// ==========================================
// 红线: 告警等级按固定优先级判定，命中即返回
// ==========================================
// 职责: 计算日消耗 / 建议最小值 / 建议最大值 / 最小采购量 / 告警等级
// 输入: InventoryTable + ThresholdParams
// 输出: SuggestionTable（不回写输入表）
// ==========================================

use crate::domain::item::{InventoryTable, ItemRow};
use crate::domain::suggestion::{SuggestedRow, SuggestionTable, ThresholdParams};
use crate::domain::types::AlertLevel;
use crate::engine::cache::{SuggestionCache, SuggestionKey};
use std::sync::Arc;
use tracing::instrument;

/// 月 → 日换算天数（固定常量，无条件使用）
pub const DAYS_PER_MONTH: f64 = 30.0;

/// High 等级容忍上限: 建议最大值的 120%
pub const HIGH_TOLERANCE: f64 = 1.2;

// ==========================================
// SuggestionEngine - 补货建议引擎
// ==========================================
pub struct SuggestionEngine;

impl SuggestionEngine {
    pub fn new() -> Self {
        Self
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 批量计算建议（纯函数: 相同输入必得相同输出）
    #[instrument(skip(self, table), fields(rows = table.len(), min_days = params.min_days, max_days = params.max_days, margin_pct = params.margin_pct))]
    pub fn compute(&self, table: &InventoryTable, params: ThresholdParams) -> SuggestionTable {
        let rows: Vec<SuggestedRow> = table
            .rows
            .iter()
            .map(|item| self.suggest_row(item, params))
            .collect();

        tracing::debug!(count = rows.len(), "补货建议计算完成");

        SuggestionTable {
            params,
            source: table.fingerprint(),
            extra_columns: table.extra_columns.clone(),
            has_category: table.has_category,
            rows,
        }
    }

    /// 带缓存的计算: 库存表指纹 + 参数相同则复用上次结果
    pub fn compute_cached(
        &self,
        cache: &mut SuggestionCache,
        table: &InventoryTable,
        params: ThresholdParams,
    ) -> Arc<SuggestionTable> {
        let key = SuggestionKey::new(table, params);
        cache.get_or_insert_with(key, || self.compute(table, params))
    }

    /// 单条目计算
    pub fn suggest_row(&self, item: &ItemRow, params: ThresholdParams) -> SuggestedRow {
        let daily_consumption = item.monthly_avg / DAYS_PER_MONTH;
        let suggested_min = daily_consumption * params.min_days as f64;
        let suggested_max =
            daily_consumption * params.max_days as f64 * (1.0 + params.margin_pct as f64 / 100.0);
        let min_purchase_qty = (suggested_min - item.stock).max(0.0);
        let alert = classify_alert(item.stock, suggested_min, suggested_max);

        SuggestedRow {
            item: item.clone(),
            daily_consumption,
            suggested_min,
            suggested_max,
            min_purchase_qty,
            alert,
        }
    }
}

impl Default for SuggestionEngine {
    fn default() -> Self {
        Self::new()
    }
}

// ==========================================
// 告警等级判定
// ==========================================

/// 判定告警等级
///
/// 规则（顺序执行，命中即返回）:
/// 1) e <= 0 → Critical
/// 2) e < mn → Low
/// 3) mn <= e <= mx → Ok
/// 4) e <= mx * 1.2 → High
/// 5) 其他 → Excess
///
/// 边界: e == mn == mx == 0 由规则 1 判为 Critical
pub fn classify_alert(stock: f64, suggested_min: f64, suggested_max: f64) -> AlertLevel {
    if stock <= 0.0 {
        return AlertLevel::Critical;
    }
    if stock < suggested_min {
        return AlertLevel::Low;
    }
    if suggested_min <= stock && stock <= suggested_max {
        return AlertLevel::Ok;
    }
    if stock <= suggested_max * HIGH_TOLERANCE {
        return AlertLevel::High;
    }
    AlertLevel::Excess
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::RowId;

    fn item(monthly_avg: f64, stock: f64) -> ItemRow {
        ItemRow {
            id: RowId(0),
            code: "A1".to_string(),
            name: "Tornillo".to_string(),
            monthly_avg,
            stock,
            last_cost: None,
            last_supplier: None,
            category: None,
            extras: vec![],
        }
    }

    #[test]
    fn test_worked_example() {
        let engine = SuggestionEngine::new();
        let params = ThresholdParams::new(15, 30, 0);

        let row = engine.suggest_row(&item(60.0, 20.0), params);
        assert_eq!(row.daily_consumption, 2.0);
        assert_eq!(row.suggested_min, 30.0);
        assert_eq!(row.suggested_max, 60.0);
        assert_eq!(row.min_purchase_qty, 10.0);

        let alerts: Vec<AlertLevel> = [0.0, 20.0, 45.0, 65.0, 80.0]
            .iter()
            .map(|stock| engine.suggest_row(&item(60.0, *stock), params).alert)
            .collect();
        assert_eq!(
            alerts,
            vec![
                AlertLevel::Critical,
                AlertLevel::Low,
                AlertLevel::Ok,
                AlertLevel::High,
                AlertLevel::Excess,
            ]
        );
    }

    #[test]
    fn test_margin_scales_max_only() {
        let engine = SuggestionEngine::new();
        let row = engine.suggest_row(&item(60.0, 50.0), ThresholdParams::new(15, 30, 50));
        assert_eq!(row.suggested_min, 30.0);
        assert_eq!(row.suggested_max, 90.0);
    }

    #[test]
    fn test_min_purchase_never_negative() {
        let engine = SuggestionEngine::new();
        let row = engine.suggest_row(&item(60.0, 100.0), ThresholdParams::default());
        assert_eq!(row.min_purchase_qty, 0.0);
    }

    #[test]
    fn test_zero_average_degenerate_case() {
        // 月均为 0: 最小值/最大值均为 0
        assert_eq!(classify_alert(0.0, 0.0, 0.0), AlertLevel::Critical);
        assert_eq!(classify_alert(1.0, 0.0, 0.0), AlertLevel::Excess);
    }

    #[test]
    fn test_boundary_values() {
        assert_eq!(classify_alert(30.0, 30.0, 60.0), AlertLevel::Ok);
        assert_eq!(classify_alert(60.0, 30.0, 60.0), AlertLevel::Ok);
        assert_eq!(classify_alert(72.0, 30.0, 60.0), AlertLevel::High);
        assert_eq!(classify_alert(-5.0, -10.0, -1.0), AlertLevel::Critical);
    }

    #[test]
    fn test_classify_alert_max_below_min() {
        // 最大值小于最小值: 低于最小值仍为 🟡，否则直接按最大值判定
        assert_eq!(classify_alert(5.0, 10.0, 2.0), AlertLevel::Low);
        assert_eq!(classify_alert(12.0, 10.0, 2.0), AlertLevel::Excess);
        assert_eq!(classify_alert(2.2, 1.0, 2.0), AlertLevel::High);
        // 最大值为负: 任意正库存都是 🔵
        assert_eq!(classify_alert(2.0, 1.0, -3.0), AlertLevel::Excess);
        assert_eq!(classify_alert(0.5, 0.0, 0.0), AlertLevel::Excess);
    }

    #[test]
    fn test_compute_cached_reuses_result() {
        let engine = SuggestionEngine::new();
        let mut cache = SuggestionCache::new();
        let table = InventoryTable {
            extra_columns: vec![],
            has_category: false,
            has_supplier: false,
            rows: vec![item(60.0, 20.0)],
        };

        let first = engine.compute_cached(&mut cache, &table, ThresholdParams::default());
        let second = engine.compute_cached(&mut cache, &table, ThresholdParams::default());
        assert!(Arc::ptr_eq(&first, &second));

        // 参数变化 → 重新计算
        let third = engine.compute_cached(&mut cache, &table, ThresholdParams::new(10, 30, 0));
        assert!(!Arc::ptr_eq(&first, &third));
        assert_eq!(cache.stats().misses, 2);
    }
}
