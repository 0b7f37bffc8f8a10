// ==========================================
// 库存补货建议系统 - 命令行主入口
// ==========================================
// 用法:
//   inventory-reorder [库存文件]
// 启动后进入交互会话，输入 help 查看命令
// ==========================================

use anyhow::Context;
use inventory_reorder::app::{Reply, Shell};
use inventory_reorder::{logging, AppConfig, InventoryApi, APP_NAME, VERSION};
use std::io::{self, Write};

fn main() -> anyhow::Result<()> {
    // 配置在日志初始化之前加载，加载过程本身不输出日志
    let config = AppConfig::load().context("加载配置失败")?;
    logging::init_with(config.log_format);

    tracing::info!("==================================================");
    tracing::info!("{} v{}", APP_NAME, VERSION);
    tracing::info!(header_row = config.header_row, "表头行");
    tracing::info!("==================================================");

    let mut shell = Shell::new(InventoryApi::new(config));

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "{} v{}（输入 help 查看命令）", APP_NAME, VERSION)?;

    // 可选: 启动时直接加载文件
    if let Some(path) = std::env::args().nth(1) {
        if let Reply::Text(text) = shell.handle_line(&format!("load {}", path)) {
            writeln!(out, "{}", text)?;
        }
    }

    let stdin = io::stdin();
    shell.run(stdin.lock(), out)?;

    tracing::info!("会话结束");
    Ok(())
}
