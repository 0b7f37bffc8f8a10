// ==========================================
// 库存补货建议系统 - API 层错误类型
// ==========================================
// 职责: 统一导入 / 会话 / 导出 / 配置错误，转换为用户可读的消息
// 红线: 所有错误均可恢复，出错时会话状态保持不变
// ==========================================

use crate::config::ConfigError;
use crate::exporter::ExportError;
use crate::importer::ImportError;
use crate::session::SessionError;
use thiserror::Error;

/// API 层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 加载错误
    // ==========================================
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}")]
    UnsupportedFormat(String),

    #[error("缺少必需列: {}", .0.join(", "))]
    MissingRequiredColumns(Vec<String>),

    #[error("文件加载失败: {0}")]
    LoadFailed(String),

    // ==========================================
    // 会话错误
    // ==========================================
    #[error("尚未加载库存文件")]
    NoData,

    /// 非致命警告
    #[error("没有可撤销的删除")]
    NothingToUndo,

    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("未知列: {0}")]
    UnknownColumn(String),

    #[error("视图位置越界: {position}（当前视图共 {len} 行）")]
    InvalidPosition { position: usize, len: usize },

    // ==========================================
    // 导出与配置错误
    // ==========================================
    #[error("导出失败: {0}")]
    ExportFailed(String),

    #[error("配置错误: {0}")]
    ConfigError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ApiError {
    /// 错误代码（结构化输出使用）
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::FileNotFound(_) => "FILE_NOT_FOUND",
            ApiError::UnsupportedFormat(_) => "UNSUPPORTED_FORMAT",
            ApiError::MissingRequiredColumns(_) => "MISSING_REQUIRED_COLUMNS",
            ApiError::LoadFailed(_) => "LOAD_FAILED",
            ApiError::NoData => "NO_DATA",
            ApiError::NothingToUndo => "NOTHING_TO_UNDO",
            ApiError::InvalidInput(_) => "INVALID_INPUT",
            ApiError::UnknownColumn(_) => "UNKNOWN_COLUMN",
            ApiError::InvalidPosition { .. } => "INVALID_POSITION",
            ApiError::ExportFailed(_) => "EXPORT_FAILED",
            ApiError::ConfigError(_) => "CONFIG_ERROR",
            ApiError::InternalError(_) => "INTERNAL_ERROR",
            ApiError::Other(_) => "OTHER_ERROR",
        }
    }

    /// 是否为仅需提示的警告
    pub fn is_warning(&self) -> bool {
        matches!(self, ApiError::NothingToUndo)
    }
}

// ==========================================
// 从下层错误转换
// ==========================================
impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::FileNotFound(path) => ApiError::FileNotFound(path),
            ImportError::UnsupportedFormat(ext) => ApiError::UnsupportedFormat(ext),
            ImportError::MissingRequiredColumns(cols) => ApiError::MissingRequiredColumns(cols),
            ImportError::InternalError(msg) => ApiError::InternalError(msg),
            ImportError::Other(e) => ApiError::Other(e),
            other => ApiError::LoadFailed(other.to_string()),
        }
    }
}

impl From<SessionError> for ApiError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::NoData => ApiError::NoData,
            SessionError::NothingToUndo => ApiError::NothingToUndo,
            SessionError::InvalidParameter(msg) => ApiError::InvalidInput(msg),
            SessionError::UnknownColumn(col) => ApiError::UnknownColumn(col),
        }
    }
}

impl From<ExportError> for ApiError {
    fn from(err: ExportError) -> Self {
        ApiError::ExportFailed(err.to_string())
    }
}

impl From<ConfigError> for ApiError {
    fn from(err: ConfigError) -> Self {
        ApiError::ConfigError(err.to_string())
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
