// ==========================================
// 库存补货建议系统 - 纯函数结果缓存
// ==========================================
// 职责: 规范化结果 / 建议结果的显式记忆化
// 失效规则:
// - 新上传（内容哈希变化）→ 规范化缓存失效
// - 库存表内容或阈值参数变化 → 建议缓存失效
// 缓存只是记忆化，丢弃后重新计算结果不变
// ==========================================

use crate::domain::item::{Fingerprint, InventoryTable};
use crate::domain::suggestion::{SuggestionTable, ThresholdParams};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::Path;
use std::sync::Arc;

/// 缓存命中统计
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
}

// ==========================================
// Memo - 单条目记忆化缓存
// ==========================================
// 仅保留最近一次的键值；键不同即视为失效并替换
#[derive(Debug)]
pub struct Memo<K, V> {
    entry: Option<(K, Arc<V>)>,
    stats: CacheStats,
}

impl<K, V> Default for Memo<K, V> {
    fn default() -> Self {
        Self {
            entry: None,
            stats: CacheStats::default(),
        }
    }
}

impl<K: PartialEq, V> Memo<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// 查询（不计入统计）
    pub fn peek(&self, key: &K) -> Option<Arc<V>> {
        match &self.entry {
            Some((k, v)) if k == key => Some(Arc::clone(v)),
            _ => None,
        }
    }

    /// 命中则返回缓存值，否则计算并替换条目
    ///
    /// 计算失败时保留原条目，不写入任何部分结果
    pub fn get_or_try_insert_with<E, F>(&mut self, key: K, compute: F) -> Result<Arc<V>, E>
    where
        F: FnOnce() -> Result<V, E>,
    {
        if let Some(hit) = self.peek(&key) {
            self.stats.hits += 1;
            return Ok(hit);
        }

        self.stats.misses += 1;
        let value = Arc::new(compute()?);
        self.entry = Some((key, Arc::clone(&value)));
        Ok(value)
    }

    /// 不可失败版本
    pub fn get_or_insert_with<F>(&mut self, key: K, compute: F) -> Arc<V>
    where
        F: FnOnce() -> V,
    {
        match self.get_or_try_insert_with::<std::convert::Infallible, _>(key, || Ok(compute())) {
            Ok(value) => value,
            Err(never) => match never {},
        }
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}

// ==========================================
// 缓存键
// ==========================================

/// 上传标识: 文件格式 + 内容哈希 + 表头偏移
///
/// 扩展名决定解析器，同一内容换扩展名必须视为不同输入
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UploadKey {
    /// 小写扩展名（无扩展名时为空串）
    pub format: String,
    pub content: Fingerprint,
    pub header_row: usize,
}

impl UploadKey {
    pub fn new(file_name: &str, bytes: &[u8], header_row: usize) -> Self {
        let format = Path::new(file_name)
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        Self {
            format,
            content: Sha256::digest(bytes).into(),
            header_row,
        }
    }
}

/// 建议缓存键: 库存表指纹 + 阈值参数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SuggestionKey {
    pub table: Fingerprint,
    pub params: ThresholdParams,
}

impl SuggestionKey {
    pub fn new(table: &InventoryTable, params: ThresholdParams) -> Self {
        Self {
            table: table.fingerprint(),
            params,
        }
    }
}

pub type NormalizerCache = Memo<UploadKey, InventoryTable>;
pub type SuggestionCache = Memo<SuggestionKey, SuggestionTable>;
