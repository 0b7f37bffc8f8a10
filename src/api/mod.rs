// ==========================================
// 库存补货建议系统 - API 层
// ==========================================
// 职责: 提供会话 API 接口，供命令行交互层调用
// ==========================================

pub mod error;
pub mod inventory_api;

// 重导出核心类型
pub use error::{ApiError, ApiResult};
pub use inventory_api::{
    AlertCount, InventoryApi, LegendEntry, StatusResponse, UploadResponse,
};
