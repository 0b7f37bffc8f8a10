// ==========================================
// 库存补货建议系统 - 交互会话外壳
// ==========================================
// 职责: 读取命令 → 调用 InventoryApi → 渲染文本输出
// 每个进程一个会话，会话结束即丢弃全部状态
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::api::InventoryApi;
use crate::app::commands::{map_api_error, parse_command, Command, HELP};
use crate::domain::suggestion::ThresholdParams;
use crate::domain::types::CellValue;
use crate::engine::view::InventoryView;
use crate::session::LoadOutcome;
use std::fmt::Write as _;
use std::io::{BufRead, Write};

/// 默认显示行数
pub const DEFAULT_SHOW_LIMIT: usize = 50;

/// 命令执行结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    Quit,
}

pub struct Shell {
    api: InventoryApi,
}

impl Shell {
    pub fn new(api: InventoryApi) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &InventoryApi {
        &self.api
    }

    pub fn api_mut(&mut self) -> &mut InventoryApi {
        &mut self.api
    }

    /// 执行单行输入，错误以结构化 JSON 文本返回
    pub fn handle_line(&mut self, line: &str) -> Reply {
        let result = parse_command(line).and_then(|cmd| match cmd {
            Some(cmd) => self.execute(cmd),
            None => Ok(Reply::Text(String::new())),
        });

        match result {
            Ok(reply) => reply,
            Err(err) if err.is_warning() => Reply::Text(format!("⚠ {}", err)),
            Err(err) => {
                tracing::debug!(code = err.code(), error = %err, "命令执行失败");
                Reply::Text(format!("错误: {}", map_api_error(&err)))
            }
        }
    }

    /// 执行命令
    pub fn execute(&mut self, command: Command) -> ApiResult<Reply> {
        let text = match command {
            Command::Load(path) => {
                let response = self.api.upload(&path)?;
                match response.outcome {
                    LoadOutcome::Installed => format!(
                        "已加载 {}: {} 行",
                        response.file_name, response.rows
                    ),
                    LoadOutcome::Retained => format!(
                        "会话已有数据（{}），保留当前工作表",
                        response.file_name
                    ),
                }
            }
            Command::Show { limit } => {
                let view = self.api.view()?;
                render_view(&view, limit.unwrap_or(DEFAULT_SHOW_LIMIT))
            }
            Command::MinDays(days) => {
                let current = self.api.thresholds();
                self.update_thresholds(ThresholdParams { min_days: days, ..current })?
            }
            Command::MaxDays(days) => {
                let current = self.api.thresholds();
                self.update_thresholds(ThresholdParams { max_days: days, ..current })?
            }
            Command::Margin(pct) => {
                let current = self.api.thresholds();
                self.update_thresholds(ThresholdParams { margin_pct: pct, ..current })?
            }
            Command::Alert(alerts) => {
                let symbols: Vec<&str> = alerts.iter().map(|a| a.symbol()).collect();
                self.api.set_alert_filter(alerts.clone());
                format!("告警筛选: {}", symbols.join(" "))
            }
            Command::Supplier(suppliers) => {
                let text = describe_allow_set("供应商筛选", suppliers.as_ref());
                self.api.set_supplier_filter(suppliers);
                text
            }
            Command::Category(categories) => {
                let text = describe_allow_set("类别筛选", categories.as_ref());
                self.api.set_category_filter(categories)?;
                text
            }
            Command::Search(search) => {
                self.api.set_search(&search);
                if search.is_empty() {
                    "已清除搜索".to_string()
                } else {
                    format!("搜索: {}", search)
                }
            }
            Command::Columns(columns) => {
                let text = if columns.is_empty() {
                    "不显示额外列".to_string()
                } else {
                    format!("额外列: {}", columns.join(", "))
                };
                self.api.select_extra_columns(columns)?;
                text
            }
            Command::Options => {
                let options = self.api.filter_options()?;
                to_pretty_json(&options)?
            }
            Command::Delete(positions) => {
                let outcome = self.api.delete_displayed(&positions)?;
                if outcome.deleted == 0 {
                    "未删除任何行".to_string()
                } else {
                    format!(
                        "已删除 {} 行，剩余 {} 行（可撤销 {} 次）",
                        outcome.deleted, outcome.remaining, outcome.history_len
                    )
                }
            }
            Command::Undo => {
                let outcome = self.api.undo_delete()?;
                format!(
                    "已恢复 {} 行（剩余可撤销 {} 次）",
                    outcome.restored_rows, outcome.history_len
                )
            }
            Command::ResetFilters => {
                self.api.reset_filters();
                "筛选已重置".to_string()
            }
            Command::ResetAll => {
                self.api.reset_all()?;
                "已恢复原始数据，全部参数已重置".to_string()
            }
            Command::ExportCsv(path) => {
                let target = self.api.export_csv(path.as_deref())?;
                format!("已导出: {}", target.display())
            }
            Command::ExportXlsx(path) => {
                let target = self.api.export_xlsx(path.as_deref())?;
                format!("已导出: {}", target.display())
            }
            Command::Legend => self
                .api
                .legend()
                .iter()
                .map(|entry| format!("{} {}", entry.symbol, entry.legend))
                .collect::<Vec<_>>()
                .join("\n"),
            Command::Status => {
                let status = self.api.status();
                to_pretty_json(&status)?
            }
            Command::Help => HELP.to_string(),
            Command::Quit => return Ok(Reply::Quit),
        };
        Ok(Reply::Text(text))
    }

    fn update_thresholds(&mut self, params: ThresholdParams) -> ApiResult<String> {
        let applied = self.api.set_thresholds(params)?;
        Ok(format!(
            "阈值: 最小 {} 天，最大 {} 天，余量 {}%",
            applied.min_days, applied.max_days, applied.margin_pct
        ))
    }

    /// 交互循环: 逐行读取命令直到 quit 或输入结束
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> anyhow::Result<()> {
        write!(output, "> ")?;
        output.flush()?;

        for line in input.lines() {
            let line = line?;
            match self.handle_line(&line) {
                Reply::Quit => break,
                Reply::Text(text) => {
                    if !text.is_empty() {
                        writeln!(output, "{}", text)?;
                    }
                }
            }
            write!(output, "> ")?;
            output.flush()?;
        }
        writeln!(output)?;
        Ok(())
    }
}

fn describe_allow_set(label: &str, values: Option<&std::collections::BTreeSet<String>>) -> String {
    match values {
        None => format!("{}: 全部", label),
        Some(set) => format!(
            "{}: {}",
            label,
            set.iter().cloned().collect::<Vec<_>>().join(", ")
        ),
    }
}

fn to_pretty_json<T: serde::Serialize>(value: &T) -> ApiResult<String> {
    serde_json::to_string_pretty(value).map_err(|e| ApiError::InternalError(e.to_string()))
}

// ==========================================
// 视图渲染
// ==========================================

/// 单元格显示文本: 数值最多保留 2 位小数
fn display_cell(cell: &CellValue) -> String {
    match cell {
        CellValue::Number(n) if n.fract() != 0.0 => {
            let text = format!("{:.2}", n);
            text.trim_end_matches('0').trim_end_matches('.').to_string()
        }
        other => other.to_string(),
    }
}

/// 视图 → 对齐的文本表格（首列为视图位置）
pub fn render_view(view: &InventoryView, limit: usize) -> String {
    if view.is_empty() {
        return "（无匹配行）".to_string();
    }

    let mut header = vec!["#".to_string()];
    header.extend(view.columns.iter().cloned());

    let body: Vec<Vec<String>> = view
        .rows
        .iter()
        .take(limit)
        .map(|row| {
            let mut cells = vec![row.position.to_string()];
            cells.extend(row.cells.iter().map(display_cell));
            cells
        })
        .collect();

    let widths: Vec<usize> = (0..header.len())
        .map(|col| {
            body.iter()
                .map(|r| r[col].chars().count())
                .chain(std::iter::once(header[col].chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    for cells in std::iter::once(&header).chain(body.iter()) {
        let line: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:<width$}", cell, width = width))
            .collect();
        let _ = writeln!(out, "{}", line.join(" | ").trim_end());
    }

    if view.len() > limit {
        let _ = write!(out, "… 共 {} 行，仅显示前 {} 行", view.len(), limit);
    } else {
        let _ = write!(out, "共 {} 行", view.len());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "Reporte\n\
                       Código,Nombre,Promedio mensual,Existencias,Proveedor\n\
                       A1,Tornillo,60,0,ACME\n\
                       A2,Tuerca,30,20,Ferromax\n";

    fn shell_with_data() -> (Shell, tempfile::TempDir) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inventario.csv");
        std::fs::write(&path, CSV).unwrap();

        let mut shell = Shell::new(InventoryApi::default());
        let reply = shell.handle_line(&format!("load {}", path.display()));
        assert!(matches!(reply, Reply::Text(ref t) if t.contains("2 行")));
        (shell, dir)
    }

    #[test]
    fn test_show_without_data_reports_no_data() {
        let mut shell = Shell::new(InventoryApi::default());
        match shell.handle_line("show") {
            Reply::Text(text) => assert!(text.contains("NO_DATA")),
            Reply::Quit => panic!("不应退出"),
        }
    }

    #[test]
    fn test_undo_without_history_is_warning() {
        let (mut shell, _dir) = shell_with_data();
        match shell.handle_line("undo") {
            Reply::Text(text) => assert!(text.starts_with('⚠')),
            Reply::Quit => panic!("不应退出"),
        }
    }

    #[test]
    fn test_delete_and_show() {
        let (mut shell, _dir) = shell_with_data();
        shell.handle_line("delete 0");
        match shell.handle_line("show") {
            Reply::Text(text) => {
                assert!(text.contains("A2"));
                assert!(!text.contains("Tornillo"));
                assert!(text.ends_with("共 1 行"));
            }
            Reply::Quit => panic!("不应退出"),
        }
    }

    #[test]
    fn test_run_loop_until_quit() {
        let (mut shell, _dir) = shell_with_data();
        let input = "legend\nquit\nshow\n";
        let mut output = Vec::new();
        shell.run(input.as_bytes(), &mut output).unwrap();

        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("🔴"));
        assert!(!text.contains("Código"));
    }

    #[test]
    fn test_display_cell_rounds() {
        assert_eq!(display_cell(&CellValue::Number(1.0 / 3.0)), "0.33");
        assert_eq!(display_cell(&CellValue::Number(2.5)), "2.5");
        assert_eq!(display_cell(&CellValue::Number(15.0)), "15");
    }
}
