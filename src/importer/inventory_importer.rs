// ==========================================
// 库存补货建议系统 - 库存导入器实现
// ==========================================
// 职责: 串联 文件解析 → 列名规范化 → 字段映射
// 红线: 任一阶段失败即整体失败，不返回部分结果
// ==========================================

use crate::config::ImportConfigReader;
use crate::domain::item::{Fingerprint, InventoryTable};
use crate::importer::column_normalizer::ColumnNormalizer;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::field_mapper::FieldMapper;
use crate::importer::file_parser::UniversalFileParser;
use crate::importer::inventory_importer_trait::{
    FieldMapper as FieldMapperTrait, HeaderNormalizer, InventoryImporter,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::Path;
use std::time::Instant;
use uuid::Uuid;

// ==========================================
// 上传信息
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadInfo {
    /// 上传批次 ID
    pub upload_id: Uuid,
    pub file_name: String,
    /// 文件内容哈希
    pub content_hash: Fingerprint,
    pub loaded_at: DateTime<Utc>,
    pub row_count: usize,
}

impl UploadInfo {
    pub fn new(file_name: &str, bytes: &[u8], table: &InventoryTable) -> Self {
        Self {
            upload_id: Uuid::new_v4(),
            file_name: file_name.to_string(),
            content_hash: Sha256::digest(bytes).into(),
            loaded_at: Utc::now(),
            row_count: table.len(),
        }
    }
}

/// 导入结果
#[derive(Debug, Clone, PartialEq)]
pub struct ImportOutcome {
    pub upload: UploadInfo,
    pub table: InventoryTable,
}

// ==========================================
// InventoryImporterImpl
// ==========================================
pub struct InventoryImporterImpl {
    parser: UniversalFileParser,
    normalizer: ColumnNormalizer,
    mapper: FieldMapper,
    header_row: usize,
}

impl InventoryImporterImpl {
    pub fn new(header_row: usize) -> Self {
        Self {
            parser: UniversalFileParser,
            normalizer: ColumnNormalizer,
            mapper: FieldMapper,
            header_row,
        }
    }

    pub fn from_config(config: &dyn ImportConfigReader) -> Self {
        Self::new(config.header_row())
    }

    pub fn header_row(&self) -> usize {
        self.header_row
    }

    /// 解析 + 规范化 + 映射，只产出库存表（供缓存复用）
    pub fn build_table(&self, file_name: &str, bytes: &[u8]) -> ImportResult<InventoryTable> {
        let start = Instant::now();

        // === 阶段 1: 文件解析 ===
        let raw = self.parser.parse(file_name, bytes, self.header_row)?;
        tracing::debug!(rows = raw.rows.len(), "阶段 1 完成: 文件解析");

        // === 阶段 2: 列名规范化 ===
        let normalized = self.normalizer.normalize(raw)?;
        tracing::debug!(columns = ?normalized.columns, "阶段 2 完成: 列名规范化");

        // === 阶段 3: 字段映射 ===
        let table = self.mapper.map_to_table(normalized)?;

        tracing::info!(
            file = %file_name,
            rows = table.len(),
            extra_columns = table.extra_columns.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "库存表加载完成"
        );
        Ok(table)
    }
}

impl InventoryImporter for InventoryImporterImpl {
    fn import_bytes(&self, file_name: &str, bytes: &[u8]) -> ImportResult<ImportOutcome> {
        let table = self.build_table(file_name, bytes)?;
        Ok(ImportOutcome {
            upload: UploadInfo::new(file_name, bytes, &table),
            table,
        })
    }

    fn import_file(&self, file_path: &Path) -> ImportResult<ImportOutcome> {
        if !file_path.exists() {
            return Err(ImportError::FileNotFound(file_path.display().to_string()));
        }
        let bytes = std::fs::read(file_path)?;
        let file_name = file_path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();
        self.import_bytes(&file_name, &bytes)
    }
}
