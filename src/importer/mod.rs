// ==========================================
// 库存补货建议系统 - 导入层
// ==========================================
// 职责: 上传文件 → 标准库存表
// 支持: Excel, CSV
// ==========================================

// 模块声明
pub mod column_normalizer;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod inventory_importer;
pub mod inventory_importer_trait;

// 重导出核心类型
pub use column_normalizer::{ColumnNormalizer, NormalizedSheet};
pub use error::{ImportError, ImportResult};
pub use field_mapper::FieldMapper as FieldMapperImpl;
pub use file_parser::{CsvParser, ExcelParser, RawRow, RawSheet, UniversalFileParser};
pub use inventory_importer::{ImportOutcome, InventoryImporterImpl, UploadInfo};

// 重导出 Trait 接口
pub use inventory_importer_trait::{FieldMapper, FileParser, HeaderNormalizer, InventoryImporter};
