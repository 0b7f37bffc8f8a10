// ==========================================
// 库存补货建议系统 - 核心库
// ==========================================
// 职责: 库存表上传 → 补货建议 → 筛选/删除/撤销 → 导出
// 系统定位: 单用户交互会话，数据只存在于会话内存中
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 导入层 - 外部数据
pub mod importer;

// 引擎层 - 补货建议与筛选
pub mod engine;

// 会话层 - 工作表与撤销历史
pub mod session;

// 导出层 - CSV / Excel
pub mod exporter;

// 配置层 - 应用配置
pub mod config;

// 日志系统
pub mod logging;

// API 层 - 会话接口
pub mod api;

// 应用层 - 命令行交互
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{AlertLevel, CellValue, RowId};

// 领域实体
pub use domain::{InventoryTable, ItemRow, SuggestedRow, SuggestionTable, ThresholdParams};

// 引擎
pub use engine::{FilterParams, InventoryView, SuggestionEngine};

// 会话
pub use session::SessionState;

// API
pub use api::{ApiError, ApiResult, InventoryApi};

// 配置
pub use config::AppConfig;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "库存补货建议系统";
