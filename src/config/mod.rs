// ==========================================
// 库存补货建议系统 - 配置层
// ==========================================
// 职责: 应用配置加载与校验
// 存储: JSON 文件（可选），缺省使用内置默认值
// ==========================================

pub mod app_config;
pub mod import_config_trait;

// 重导出核心配置
pub use app_config::{default_config_path, AppConfig, ConfigError, LogFormat, CONFIG_ENV_VAR};
pub use import_config_trait::ImportConfigReader;
