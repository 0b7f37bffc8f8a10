// ==========================================
// 库存补货建议系统 - 应用层
// ==========================================
// 职责: 命令行交互，连接用户输入与会话 API
// ==========================================

pub mod commands;
pub mod shell;

// 重导出
pub use commands::{map_api_error, parse_command, to_error_response, Command, ErrorResponse, HELP};
pub use shell::{render_view, Reply, Shell, DEFAULT_SHOW_LIMIT};
