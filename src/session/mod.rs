// ==========================================
// 库存补货建议系统 - 会话层
// ==========================================
// 职责: 单个交互会话的状态管理（工作表 / 撤销历史 / 参数）
// ==========================================

pub mod error;
pub mod state;
pub mod undo_history;

// 重导出
pub use error::{SessionError, SessionResult};
pub use state::{DeleteOutcome, LoadOutcome, SessionPhase, SessionState, UndoOutcome};
pub use undo_history::{Snapshot, UndoHistory, UNDO_CAPACITY};
