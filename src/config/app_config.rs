// ==========================================
// 库存补货建议系统 - 应用配置
// ==========================================
// 职责: 配置加载、默认值、校验
// 来源（优先级从高到低）:
// 1. 环境变量 INVENTORY_REORDER_CONFIG 指向的 JSON 文件
// 2. <用户配置目录>/inventory-reorder/config.json
// 3. 内置默认值
// ==========================================

use crate::config::import_config_trait::ImportConfigReader;
use crate::domain::suggestion::ThresholdParams;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// 配置文件路径环境变量
pub const CONFIG_ENV_VAR: &str = "INVENTORY_REORDER_CONFIG";

/// 默认表头偏移（第 2 行，从 0 开始计为 1）
pub const DEFAULT_HEADER_ROW: usize = 1;

/// 表头偏移上限（防止误配置导致读取整表为空）
pub const MAX_HEADER_ROW: usize = 100;

/// 配置错误
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {message}")]
    ReadError { path: String, message: String },

    #[error("配置文件格式错误 ({path}): {message}")]
    ParseError { path: String, message: String },

    #[error("配置值错误 (key: {key}): {message}")]
    ValueError { key: String, message: String },
}

/// 日志输出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

// ==========================================
// AppConfig - 应用配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// 表头所在行（从 0 开始）
    pub header_row: usize,
    /// 阈值参数默认值（全部重置时恢复为此值）
    pub default_thresholds: ThresholdParams,
    /// 导出目录（None = 当前目录）
    pub export_dir: Option<PathBuf>,
    /// 导出文件名（不含扩展名）
    pub export_basename: String,
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            header_row: DEFAULT_HEADER_ROW,
            default_thresholds: ThresholdParams::default(),
            export_dir: None,
            export_basename: "inventario".to_string(),
            log_format: LogFormat::Text,
        }
    }
}

impl AppConfig {
    /// 按优先级加载配置
    pub fn load() -> Result<Self, ConfigError> {
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            tracing::info!("使用环境变量指定的配置文件: {}", path);
            return Self::from_path(Path::new(&path));
        }

        if let Some(path) = default_config_path() {
            if path.exists() {
                tracing::info!("使用配置文件: {}", path.display());
                return Self::from_path(&path);
            }
        }

        tracing::debug!("未找到配置文件，使用默认配置");
        Ok(Self::default())
    }

    /// 从 JSON 文件加载（缺省字段取默认值）
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&content).map_err(|e| match e {
            ConfigError::ParseError { message, .. } => ConfigError::ParseError {
                path: path.display().to_string(),
                message,
            },
            other => other,
        })
    }

    /// 从 JSON 文本解析并校验
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let config: AppConfig =
            serde_json::from_str(content).map_err(|e| ConfigError::ParseError {
                path: "<inline>".to_string(),
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.header_row > MAX_HEADER_ROW {
            return Err(ConfigError::ValueError {
                key: "header_row".to_string(),
                message: format!("{} 超出上限 {}", self.header_row, MAX_HEADER_ROW),
            });
        }
        self.default_thresholds
            .validate()
            .map_err(|message| ConfigError::ValueError {
                key: "default_thresholds".to_string(),
                message,
            })?;
        if self.export_basename.trim().is_empty() {
            return Err(ConfigError::ValueError {
                key: "export_basename".to_string(),
                message: "不能为空".to_string(),
            });
        }
        Ok(())
    }

    /// 导出文件路径
    pub fn export_path(&self, extension: &str) -> PathBuf {
        let file_name = format!("{}.{}", self.export_basename, extension);
        match &self.export_dir {
            Some(dir) => dir.join(file_name),
            None => PathBuf::from(file_name),
        }
    }
}

impl ImportConfigReader for AppConfig {
    fn header_row(&self) -> usize {
        self.header_row
    }

    fn default_thresholds(&self) -> ThresholdParams {
        self.default_thresholds
    }
}

/// 默认配置文件路径
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("inventory-reorder").join("config.json"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.header_row, 1);
        assert_eq!(config.default_thresholds, ThresholdParams::new(15, 30, 0));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = AppConfig::from_json(r#"{ "header_row": 0 }"#).unwrap();
        assert_eq!(config.header_row, 0);
        assert_eq!(config.export_basename, "inventario");
    }

    #[test]
    fn test_invalid_thresholds_rejected() {
        let result = AppConfig::from_json(
            r#"{ "default_thresholds": { "min_days": 0, "max_days": 30, "margin_pct": 0 } }"#,
        );
        assert!(matches!(result, Err(ConfigError::ValueError { .. })));
    }

    #[test]
    fn test_malformed_json_rejected() {
        assert!(matches!(
            AppConfig::from_json("{ not json"),
            Err(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn test_export_path() {
        let config = AppConfig {
            export_dir: Some(PathBuf::from("/tmp/salida")),
            ..AppConfig::default()
        };
        assert_eq!(
            config.export_path("csv"),
            PathBuf::from("/tmp/salida/inventario.csv")
        );
    }
}
