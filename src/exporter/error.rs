// ==========================================
// 库存补货建议系统 - 导出错误类型
// ==========================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("文件写入失败: {0}")]
    FileWriteError(#[from] std::io::Error),

    #[error("CSV 写入失败: {0}")]
    CsvWriteError(#[from] csv::Error),

    #[error("Excel 写入失败: {0}")]
    XlsxWriteError(#[from] rust_xlsxwriter::XlsxError),
}

/// Result 类型别名
pub type ExportResult<T> = Result<T, ExportError>;
