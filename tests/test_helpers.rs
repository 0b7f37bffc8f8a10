// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 生成临时库存文件（CSV / Excel）供集成测试上传
// ==========================================
#![allow(dead_code)]

use rust_xlsxwriter::Workbook;
use std::error::Error;
use std::path::PathBuf;
use tempfile::TempDir;

/// 标题行（表头位于第 1 行）
pub const TITLE_ROW: &str = "Reporte de existencias";

pub const HEADERS: [&str; 8] = [
    "Código",
    "Nombre",
    "Promedio mensual vendido",
    "Existencias",
    "Costo última compra",
    "Último proveedor",
    "Categoría",
    "Ubicación",
];

/// 标准测试数据
///
/// 默认阈值（15 / 30 / 0）下的告警:
/// - TOR-01: 月均 60, 库存 0   → 🔴
/// - TUE-02: 月均 30, 库存 10  → 🟡（最小 15）
/// - ARA-03: 月均 30, 库存 20  → 🟢
/// - CLA-04: 月均 30, 库存 33  → 🟠（最大 30 × 1.2 = 36）
/// - BRO-05: 月均 30, 库存 100 → 🔵
pub const ROWS: [[&str; 8]; 5] = [
    ["TOR-01", "Tornillo 1/4", "60", "0", "1.5", "ACME", "Ferretería", "A1"],
    ["TUE-02", "Tuerca 1/4", "30", "10", "0.8", "Ferromax", "Ferretería", "A2"],
    ["ARA-03", "Arandela", "30", "20", "0.3", "ACME", "Ferretería", "B1"],
    ["CLA-04", "Clavo 2\"", "30", "33", "", "Ferromax", "Construcción", "B2"],
    ["BRO-05", "Broca 3/8", "30", "100", "12", "Herramientas SA", "", "C1"],
];

/// 生成标准库存 CSV 内容
pub fn standard_csv() -> String {
    let mut writer = csv::Writer::from_writer(Vec::new());
    let mut title = vec![TITLE_ROW.to_string()];
    title.resize(HEADERS.len(), String::new());
    writer.write_record(&title).unwrap();
    writer.write_record(HEADERS).unwrap();
    for row in ROWS {
        writer.write_record(row).unwrap();
    }
    String::from_utf8(writer.into_inner().unwrap()).unwrap()
}

/// 在临时目录中写入 CSV 文件
///
/// # 返回
/// - TempDir: 临时目录（需要保持存活）
/// - PathBuf: 文件路径
pub fn create_test_csv(content: &str) -> Result<(TempDir, PathBuf), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("inventario.csv");
    std::fs::write(&path, content)?;
    Ok((dir, path))
}

/// 在临时目录中写入标准库存 Excel 文件
///
/// 数值列写为数字单元格，空字符串留空
pub fn create_test_xlsx() -> Result<(TempDir, PathBuf), Box<dyn Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("inventario.xlsx");

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.write_string(0, 0, TITLE_ROW)?;
    for (col, header) in HEADERS.iter().enumerate() {
        worksheet.write_string(1, col as u16, *header)?;
    }
    for (idx, row) in ROWS.iter().enumerate() {
        let r = (idx + 2) as u32;
        for (col, value) in row.iter().enumerate() {
            if value.is_empty() {
                continue;
            }
            match value.parse::<f64>() {
                Ok(n) if (2..=4).contains(&col) => {
                    worksheet.write_number(r, col as u16, n)?;
                }
                _ => {
                    worksheet.write_string(r, col as u16, *value)?;
                }
            }
        }
    }
    workbook.save(&path)?;
    Ok((dir, path))
}
