// ==========================================
// 库存补货建议系统 - 导出层
// ==========================================
// 职责: 当前视图 → CSV / Excel
// ==========================================

pub mod csv_exporter;
pub mod error;
pub mod xlsx_exporter;

pub use csv_exporter::{to_csv_bytes, write_csv};
pub use error::{ExportError, ExportResult};
pub use xlsx_exporter::{to_xlsx_bytes, write_xlsx, SHEET_NAME};
