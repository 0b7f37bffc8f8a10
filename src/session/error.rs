// ==========================================
// 库存补货建议系统 - 会话错误类型
// ==========================================
// 所有会话错误均可恢复: 出错时会话状态保持不变
// ==========================================

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    #[error("尚未加载库存文件")]
    NoData,

    /// 非致命警告
    #[error("没有可撤销的删除")]
    NothingToUndo,

    #[error("参数无效: {0}")]
    InvalidParameter(String),

    #[error("未知列: {0}")]
    UnknownColumn(String),
}

impl SessionError {
    /// 是否为仅需提示的警告
    pub fn is_warning(&self) -> bool {
        matches!(self, SessionError::NothingToUndo)
    }
}

/// Result 类型别名
pub type SessionResult<T> = Result<T, SessionError>;
