// ==========================================
// 库存补货建议系统 - 引擎层
// ==========================================
// 职责: 补货建议计算、筛选、视图投影、结果缓存
// 红线: 引擎均为纯函数，不持有会话状态
// ==========================================

pub mod cache;
pub mod filter;
pub mod suggestion;
pub mod view;

// 重导出核心引擎
pub use cache::{CacheStats, Memo, NormalizerCache, SuggestionCache, SuggestionKey, UploadKey};
pub use filter::{apply_filters, FilterOptions, FilterParams};
pub use suggestion::{classify_alert, SuggestionEngine, DAYS_PER_MONTH, HIGH_TOLERANCE};
pub use view::{InventoryView, ViewRow};
