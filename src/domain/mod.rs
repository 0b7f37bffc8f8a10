// ==========================================
// 库存补货建议系统 - 领域层
// ==========================================
// 职责: 实体与类型定义，不含计算逻辑
// ==========================================

pub mod item;
pub mod suggestion;
pub mod types;

// 重导出核心类型
pub use item::{columns, Fingerprint, InventoryTable, ItemRow};
pub use suggestion::{SuggestedRow, SuggestionTable, ThresholdParams};
pub use types::{AlertLevel, CellValue, RowId};
