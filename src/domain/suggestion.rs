// ==========================================
// 库存补货建议系统 - 补货建议领域对象
// ==========================================
// 职责: 阈值参数 / 建议行 / 建议表
// ==========================================

use crate::domain::item::{Fingerprint, ItemRow};
use crate::domain::types::AlertLevel;
use serde::{Deserialize, Serialize};

/// 参数取值范围（闭区间）
pub const MIN_DAYS_RANGE: (u32, u32) = (1, 60);
pub const MAX_DAYS_RANGE: (u32, u32) = (1, 90);
pub const MARGIN_PCT_RANGE: (u32, u32) = (0, 100);

// ==========================================
// ThresholdParams - 阈值参数
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ThresholdParams {
    /// 最小覆盖天数
    pub min_days: u32,
    /// 最大覆盖天数
    pub max_days: u32,
    /// 额外余量（百分比）
    pub margin_pct: u32,
}

impl Default for ThresholdParams {
    fn default() -> Self {
        Self {
            min_days: 15,
            max_days: 30,
            margin_pct: 0,
        }
    }
}

impl ThresholdParams {
    pub fn new(min_days: u32, max_days: u32, margin_pct: u32) -> Self {
        Self {
            min_days,
            max_days,
            margin_pct,
        }
    }

    /// 校验取值范围，返回第一个越界项的说明
    pub fn validate(&self) -> Result<(), String> {
        check_range("min_days", self.min_days, MIN_DAYS_RANGE)?;
        check_range("max_days", self.max_days, MAX_DAYS_RANGE)?;
        check_range("margin_pct", self.margin_pct, MARGIN_PCT_RANGE)?;
        Ok(())
    }
}

fn check_range(field: &str, value: u32, (min, max): (u32, u32)) -> Result<(), String> {
    if value < min || value > max {
        Err(format!("{}={} 超出范围 [{}, {}]", field, value, min, max))
    } else {
        Ok(())
    }
}

// ==========================================
// SuggestedRow - 带派生字段的条目
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestedRow {
    pub item: ItemRow,
    /// 日消耗 = 月均 / 30
    pub daily_consumption: f64,
    pub suggested_min: f64,
    pub suggested_max: f64,
    /// 最小采购量 = max(0, 建议最小值 - 库存)
    pub min_purchase_qty: f64,
    pub alert: AlertLevel,
}

// ==========================================
// SuggestionTable - 建议表（建议引擎输出）
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuggestionTable {
    pub params: ThresholdParams,
    /// 输入表指纹
    pub source: Fingerprint,
    pub extra_columns: Vec<String>,
    pub has_category: bool,
    pub rows: Vec<SuggestedRow>,
}

impl SuggestionTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_params_valid() {
        let params = ThresholdParams::default();
        assert_eq!(params, ThresholdParams::new(15, 30, 0));
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_params_out_of_range() {
        assert!(ThresholdParams::new(0, 30, 0).validate().is_err());
        assert!(ThresholdParams::new(61, 30, 0).validate().is_err());
        assert!(ThresholdParams::new(15, 91, 0).validate().is_err());
        assert!(ThresholdParams::new(15, 30, 101).validate().is_err());
        assert!(ThresholdParams::new(60, 90, 100).validate().is_ok());
    }
}
