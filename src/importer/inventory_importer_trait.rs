// ==========================================
// 库存补货建议系统 - 库存导入 Trait
// ==========================================
// 职责: 定义导入管道各阶段接口（不包含实现）
// ==========================================

use crate::domain::item::InventoryTable;
use crate::importer::error::ImportResult;
use crate::importer::file_parser::RawSheet;
use crate::importer::column_normalizer::NormalizedSheet;
use crate::importer::inventory_importer::ImportOutcome;
use std::path::Path;

// ==========================================
// InventoryImporter Trait
// ==========================================
// 用途: 库存导入主接口
// 实现者: InventoryImporterImpl
pub trait InventoryImporter: Send + Sync {
    /// 从内存中的上传内容导入库存表
    ///
    /// # 参数
    /// - file_name: 上传文件名（用于判断格式）
    /// - bytes: 文件内容
    ///
    /// # 返回
    /// - Ok(ImportOutcome): 上传信息 + 标准库存表
    /// - Err: 解析失败、缺少必需列、类型转换失败
    ///
    /// # 导入流程（3个阶段）
    /// 1. 文件解析（表头位于固定偏移行）
    /// 2. 列名规范化 + 必需列检查
    /// 3. 字段映射与类型转换
    fn import_bytes(&self, file_name: &str, bytes: &[u8]) -> ImportResult<ImportOutcome>;

    /// 从文件路径导入库存表
    fn import_file(&self, file_path: &Path) -> ImportResult<ImportOutcome>;
}

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件解析接口（阶段 1）
// 实现者: ExcelParser, CsvParser
pub trait FileParser: Send + Sync {
    /// 解析文件内容为原始表（表头 + 行）
    ///
    /// # 参数
    /// - bytes: 文件内容
    /// - header_row: 表头所在行（从 0 开始），其上方的行被忽略
    fn parse_bytes(&self, bytes: &[u8], header_row: usize) -> ImportResult<RawSheet>;
}

// ==========================================
// HeaderNormalizer Trait
// ==========================================
// 用途: 列名规范化接口（阶段 2）
// 实现者: ColumnNormalizer
pub trait HeaderNormalizer: Send + Sync {
    /// 规范化单个表头文本（TRIM + 去重音 + 小写）
    fn normalize_header(&self, raw: &str) -> String;

    /// 规范化整张表的表头并改名为标准列，检查必需列
    ///
    /// # 返回
    /// - Ok(NormalizedSheet): 列名已改写的表
    /// - Err(MissingRequiredColumns): 列出全部缺失的必需列
    fn normalize(&self, sheet: RawSheet) -> ImportResult<NormalizedSheet>;
}

// ==========================================
// FieldMapper Trait
// ==========================================
// 用途: 字段映射接口（阶段 3）
// 实现者: FieldMapper
pub trait FieldMapper: Send + Sync {
    /// 将规范化后的表映射为库存表，并分配稳定行标识
    fn map_to_table(&self, sheet: NormalizedSheet) -> ImportResult<InventoryTable>;
}
