// ==========================================
// 库存补货建议系统 - 交互命令
// ==========================================
// 职责: 文本命令解析 + 错误映射
// 命令格式: <动词> [参数...]，多值参数以逗号分隔
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::types::AlertLevel;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::PathBuf;

/// 交互命令
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Load(PathBuf),
    Show { limit: Option<usize> },
    MinDays(u32),
    MaxDays(u32),
    Margin(u32),
    Alert(BTreeSet<AlertLevel>),
    /// None = 不启用供应商筛选
    Supplier(Option<BTreeSet<String>>),
    Category(Option<BTreeSet<String>>),
    Search(String),
    Columns(Vec<String>),
    Options,
    /// 当前视图位置（从 0 开始）
    Delete(Vec<usize>),
    Undo,
    ResetFilters,
    ResetAll,
    ExportCsv(Option<PathBuf>),
    ExportXlsx(Option<PathBuf>),
    Legend,
    Status,
    Help,
    Quit,
}

/// 帮助文本
pub const HELP: &str = "\
命令:
  load <文件>                 上传库存文件 (.xlsx/.xls/.csv)
  show [行数]                 显示当前视图
  min <天数>                  最小库存天数 (1-60)
  max <天数>                  最大库存天数 (1-90)
  margin <百分比>             安全余量 (0-100)
  alert <等级,...|all>        告警筛选 (critical,low,ok,high,excess 或符号)
  supplier <名称,...|all>     供应商筛选
  category <名称,...|all>     类别筛选
  search [关键字]             按编码或名称搜索，省略则清除
  columns <列名,...|none>     选择额外显示列
  options                     列出筛选候选值与可选列
  delete <位置> [位置...]     删除当前视图中的行
  undo                        撤销最近一次删除
  reset-filters               重置筛选与额外列
  reset-all                   恢复原始数据并重置全部参数
  export-csv [路径]           导出 CSV
  export-xlsx [路径]          导出 Excel
  legend                      告警图例
  status                      会话状态
  help                        显示帮助
  quit                        退出";

/// 解析单行命令
///
/// 空行返回 Ok(None)
pub fn parse_command(line: &str) -> ApiResult<Option<Command>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let command = match verb.to_lowercase().as_str() {
        "load" | "upload" => Command::Load(PathBuf::from(required(verb, rest)?)),
        "show" | "view" => Command::Show {
            limit: optional_number(verb, rest)?,
        },
        "min" => Command::MinDays(number(verb, rest)?),
        "max" => Command::MaxDays(number(verb, rest)?),
        "margin" => Command::Margin(number(verb, rest)?),
        "alert" | "alerts" => Command::Alert(parse_alerts(rest)?),
        "supplier" | "suppliers" => Command::Supplier(parse_allow_set(rest)),
        "category" | "categories" => Command::Category(parse_allow_set(rest)),
        "search" => Command::Search(rest.to_string()),
        "columns" => Command::Columns(parse_columns(rest)),
        "options" => Command::Options,
        "delete" | "del" => Command::Delete(parse_positions(verb, rest)?),
        "undo" => Command::Undo,
        "reset-filters" => Command::ResetFilters,
        "reset-all" => Command::ResetAll,
        "export-csv" => Command::ExportCsv(optional_path(rest)),
        "export-xlsx" => Command::ExportXlsx(optional_path(rest)),
        "legend" => Command::Legend,
        "status" => Command::Status,
        "help" | "?" => Command::Help,
        "quit" | "exit" => Command::Quit,
        other => {
            return Err(ApiError::InvalidInput(format!(
                "未知命令: {}（输入 help 查看命令列表）",
                other
            )))
        }
    };
    Ok(Some(command))
}

fn required<'a>(verb: &str, rest: &'a str) -> ApiResult<&'a str> {
    if rest.is_empty() {
        return Err(ApiError::InvalidInput(format!("{} 缺少参数", verb)));
    }
    Ok(rest)
}

fn number<T: std::str::FromStr>(verb: &str, rest: &str) -> ApiResult<T> {
    required(verb, rest)?
        .parse::<T>()
        .map_err(|_| ApiError::InvalidInput(format!("{} 需要非负整数参数: {}", verb, rest)))
}

fn optional_number(verb: &str, rest: &str) -> ApiResult<Option<usize>> {
    if rest.is_empty() {
        Ok(None)
    } else {
        number(verb, rest).map(Some)
    }
}

fn optional_path(rest: &str) -> Option<PathBuf> {
    (!rest.is_empty()).then(|| PathBuf::from(rest))
}

fn split_list(rest: &str) -> impl Iterator<Item = &str> {
    rest.split(',').map(str::trim).filter(|s| !s.is_empty())
}

fn parse_alerts(rest: &str) -> ApiResult<BTreeSet<AlertLevel>> {
    if rest.is_empty() || rest.eq_ignore_ascii_case("all") {
        return Ok(AlertLevel::ALL.into_iter().collect());
    }
    split_list(rest)
        .map(|s| s.parse::<AlertLevel>().map_err(ApiError::InvalidInput))
        .collect()
}

fn parse_allow_set(rest: &str) -> Option<BTreeSet<String>> {
    if rest.is_empty() || rest.eq_ignore_ascii_case("all") {
        return None;
    }
    Some(split_list(rest).map(str::to_string).collect())
}

fn parse_columns(rest: &str) -> Vec<String> {
    if rest.eq_ignore_ascii_case("none") {
        return Vec::new();
    }
    split_list(rest).map(str::to_string).collect()
}

fn parse_positions(verb: &str, rest: &str) -> ApiResult<Vec<usize>> {
    required(verb, rest)?
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<usize>()
                .map_err(|_| ApiError::InvalidInput(format!("无效的行位置: {}", s)))
        })
        .collect()
}

// ==========================================
// 错误映射
// ==========================================

/// 错误响应（结构化输出）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// 错误代码
    pub code: String,

    /// 错误消息
    pub message: String,

    /// 详细信息（可选）
    pub details: Option<serde_json::Value>,
}

/// 将 ApiError 转换为结构化响应
pub fn to_error_response(err: &ApiError) -> ErrorResponse {
    ErrorResponse {
        code: err.code().to_string(),
        message: err.to_string(),
        details: match err {
            ApiError::MissingRequiredColumns(columns) => {
                Some(serde_json::json!({ "missing": columns }))
            }
            ApiError::InvalidPosition { position, len } => Some(serde_json::json!({
                "position": position,
                "len": len,
            })),
            _ => None,
        },
    }
}

/// 将 ApiError 转换为 JSON 字符串
pub fn map_api_error(err: &ApiError) -> String {
    serde_json::to_string(&to_error_response(err)).unwrap_or_else(|_| err.to_string())
}
