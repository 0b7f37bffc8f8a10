// ==========================================
// 库存补货建议系统 - 领域类型定义
// ==========================================
// 职责: 告警等级 / 行标识 / 单元格值
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 告警等级 (Alert Level)
// ==========================================
// 红线: 等级制，按固定优先级判定，不是区间并列
// 顺序: Critical < Low < Ok < High < Excess
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertLevel {
    Critical, // 库存 <= 0
    Low,      // 低于建议最小值
    Ok,       // 最小值与最大值之间
    High,     // 超出最大值但不超过 20%
    Excess,   // 超出最大值 20% 以上
}

impl AlertLevel {
    /// 全部等级（按严重程度排序）
    pub const ALL: [AlertLevel; 5] = [
        AlertLevel::Critical,
        AlertLevel::Low,
        AlertLevel::Ok,
        AlertLevel::High,
        AlertLevel::Excess,
    ];

    /// 显示符号（导出与界面统一使用）
    pub fn symbol(&self) -> &'static str {
        match self {
            AlertLevel::Critical => "🔴",
            AlertLevel::Low => "🟡",
            AlertLevel::Ok => "🟢",
            AlertLevel::High => "🟠",
            AlertLevel::Excess => "🔵",
        }
    }

    /// 图例说明
    pub fn legend(&self) -> &'static str {
        match self {
            AlertLevel::Critical => "≤ 0 (Rojo)",
            AlertLevel::Low => "< mínimo (Amarillo claro)",
            AlertLevel::Ok => "Entre mínimo y máximo (Verde)",
            AlertLevel::High => "≤20% sobre máximo (Naranja)",
            AlertLevel::Excess => ">20% sobre máximo (Azul)",
        }
    }

    /// 英文名称（命令行参数使用）
    pub fn name(&self) -> &'static str {
        match self {
            AlertLevel::Critical => "critical",
            AlertLevel::Low => "low",
            AlertLevel::Ok => "ok",
            AlertLevel::High => "high",
            AlertLevel::Excess => "excess",
        }
    }
}

impl fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for AlertLevel {
    type Err = String;

    /// 同时接受符号与英文名称（不区分大小写）
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        AlertLevel::ALL
            .iter()
            .copied()
            .find(|level| {
                level.symbol() == trimmed || level.name().eq_ignore_ascii_case(trimmed)
            })
            .ok_or_else(|| format!("未知告警等级: {}", trimmed))
    }
}

// ==========================================
// 行标识 (Row Id)
// ==========================================
// 会话内稳定且唯一，删除后不复用，不随显示位置变化
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RowId(pub u64);

impl fmt::Display for RowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

// ==========================================
// 单元格值 (Cell Value)
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum CellValue {
    #[default]
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
}

impl CellValue {
    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Empty => true,
            CellValue::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }

    /// 数值视图（文本尝试解析，空值返回 None）
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            CellValue::Text(s) => s.trim().parse::<f64>().ok(),
            CellValue::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
            CellValue::Empty => None,
        }
    }
}

impl fmt::Display for CellValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CellValue::Empty => Ok(()),
            CellValue::Text(s) => write!(f, "{}", s),
            CellValue::Number(n) => write!(f, "{}", format_number(*n)),
            CellValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

/// 数值格式化: 整数值不带小数部分（Excel 中的编码 1001.0 显示为 1001）
pub fn format_number(n: f64) -> String {
    if n.is_finite() && n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alert_level_order() {
        assert!(AlertLevel::Critical < AlertLevel::Low);
        assert!(AlertLevel::Ok < AlertLevel::High);
        assert!(AlertLevel::High < AlertLevel::Excess);
    }

    #[test]
    fn test_alert_level_parse() {
        assert_eq!("🔴".parse::<AlertLevel>().unwrap(), AlertLevel::Critical);
        assert_eq!("OK".parse::<AlertLevel>().unwrap(), AlertLevel::Ok);
        assert_eq!(" excess ".parse::<AlertLevel>().unwrap(), AlertLevel::Excess);
        assert!("purple".parse::<AlertLevel>().is_err());
    }

    #[test]
    fn test_cell_value_display() {
        assert_eq!(CellValue::Number(1001.0).to_string(), "1001");
        assert_eq!(CellValue::Number(2.5).to_string(), "2.5");
        assert_eq!(CellValue::Empty.to_string(), "");
        assert_eq!(CellValue::Text("abc".into()).to_string(), "abc");
    }

    #[test]
    fn test_cell_value_as_f64() {
        assert_eq!(CellValue::Text(" 12 ".into()).as_f64(), Some(12.0));
        assert_eq!(CellValue::Text("x".into()).as_f64(), None);
        assert_eq!(CellValue::Empty.as_f64(), None);
        assert!(CellValue::Text("   ".into()).is_empty());
    }
}
