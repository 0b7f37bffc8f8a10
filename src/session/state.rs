// ==========================================
// 库存补货建议系统 - 会话状态
// ==========================================
// 职责: 持有工作表、原始表、撤销历史、筛选与阈值参数
// 红线:
// - 显式状态对象，由会话独占，不使用全局状态
// - 每个操作原子化: 要么完整生效，要么不改变任何状态
// ==========================================
// 状态机: NoData → Loaded（每个会话仅一次）
// Loaded 内的转换: 删除 / 撤销 / 重置筛选 / 全部重置
// ==========================================

use crate::config::ImportConfigReader;
use crate::domain::item::{columns, InventoryTable};
use crate::domain::suggestion::ThresholdParams;
use crate::domain::types::{AlertLevel, RowId};
use crate::engine::filter::{default_suppliers, FilterParams};
use crate::importer::inventory_importer::UploadInfo;
use crate::session::error::{SessionError, SessionResult};
use crate::session::undo_history::{Snapshot, UndoHistory};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

/// 会话阶段
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SessionPhase {
    NoData,
    Loaded,
}

/// 加载结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LoadOutcome {
    /// 首次加载，已安装为原始表与工作表
    Installed,
    /// 会话已有数据，保留现有工作表
    Retained,
}

/// 删除结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteOutcome {
    pub deleted: usize,
    pub remaining: usize,
    pub history_len: usize,
}

/// 撤销结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UndoOutcome {
    pub restored_rows: usize,
    pub history_len: usize,
}

#[derive(Debug, Clone)]
struct LoadedData {
    upload: UploadInfo,
    /// 上传时的不可变快照，仅供全部重置使用
    original: Arc<InventoryTable>,
    working: Arc<InventoryTable>,
    history: UndoHistory,
}

// ==========================================
// SessionState - 会话状态
// ==========================================
#[derive(Debug, Clone)]
pub struct SessionState {
    data: Option<LoadedData>,
    filters: FilterParams,
    extra_columns: Vec<String>,
    thresholds: ThresholdParams,
    default_thresholds: ThresholdParams,
}

impl SessionState {
    pub fn new(default_thresholds: ThresholdParams) -> Self {
        Self {
            data: None,
            filters: FilterParams::default(),
            extra_columns: Vec::new(),
            thresholds: default_thresholds,
            default_thresholds,
        }
    }

    /// 按配置的默认阈值创建会话
    pub fn from_config(config: &dyn ImportConfigReader) -> Self {
        Self::new(config.default_thresholds())
    }

    // ==========================================
    // 查询
    // ==========================================

    pub fn phase(&self) -> SessionPhase {
        match self.data {
            Some(_) => SessionPhase::Loaded,
            None => SessionPhase::NoData,
        }
    }

    pub fn upload(&self) -> Option<&UploadInfo> {
        self.data.as_ref().map(|d| &d.upload)
    }

    pub fn working(&self) -> SessionResult<&Arc<InventoryTable>> {
        self.loaded().map(|d| &d.working)
    }

    pub fn original(&self) -> SessionResult<&Arc<InventoryTable>> {
        self.loaded().map(|d| &d.original)
    }

    pub fn history_len(&self) -> usize {
        self.data.as_ref().map(|d| d.history.len()).unwrap_or(0)
    }

    pub fn thresholds(&self) -> ThresholdParams {
        self.thresholds
    }

    pub fn filters(&self) -> &FilterParams {
        &self.filters
    }

    pub fn extra_columns(&self) -> &[String] {
        &self.extra_columns
    }

    fn loaded(&self) -> SessionResult<&LoadedData> {
        self.data.as_ref().ok_or(SessionError::NoData)
    }

    // ==========================================
    // 加载
    // ==========================================

    /// 安装上传的库存表
    ///
    /// 仅在 NoData 阶段生效；已加载时保留现有工作表。
    /// 加载前未设置供应商筛选时，默认选中表中全部非空供应商
    pub fn load(&mut self, upload: UploadInfo, table: Arc<InventoryTable>) -> LoadOutcome {
        if let Some(existing) = &self.data {
            tracing::warn!(
                current = %existing.upload.file_name,
                incoming = %upload.file_name,
                "会话已加载库存表，保留现有工作表"
            );
            return LoadOutcome::Retained;
        }

        tracing::info!(
            upload_id = %upload.upload_id,
            file = %upload.file_name,
            rows = table.len(),
            "库存表已安装"
        );
        if self.filters.suppliers.is_none() {
            self.filters.suppliers = default_suppliers(&table);
        }
        self.data = Some(LoadedData {
            upload,
            original: Arc::clone(&table),
            working: table,
            history: UndoHistory::new(),
        });
        LoadOutcome::Installed
    }

    // ==========================================
    // 参数设置
    // ==========================================

    pub fn set_thresholds(&mut self, params: ThresholdParams) -> SessionResult<()> {
        params.validate().map_err(SessionError::InvalidParameter)?;
        self.thresholds = params;
        Ok(())
    }

    pub fn set_alert_filter(&mut self, alerts: BTreeSet<AlertLevel>) {
        self.filters.alerts = alerts;
    }

    /// None 表示恢复默认: 工作表中全部非空供应商
    pub fn set_supplier_filter(&mut self, suppliers: Option<BTreeSet<String>>) {
        self.filters.suppliers = match suppliers {
            Some(set) => Some(set),
            None => self.data.as_ref().and_then(|d| default_suppliers(&d.working)),
        };
    }

    /// 类别筛选仅在工作表含 Categoría 列时可用
    pub fn set_category_filter(&mut self, categories: Option<BTreeSet<String>>) -> SessionResult<()> {
        if categories.is_some() && !self.working()?.has_category {
            return Err(SessionError::UnknownColumn(columns::CATEGORY.to_string()));
        }
        self.filters.categories = categories;
        Ok(())
    }

    pub fn set_search(&mut self, search: impl Into<String>) {
        self.filters.search = search.into();
    }

    /// 选择额外显示列（必须来自可选列）
    pub fn select_extra_columns(&mut self, selection: Vec<String>) -> SessionResult<()> {
        let optional = self.working()?.optional_columns();
        if let Some(unknown) = selection.iter().find(|c| !optional.contains(c)) {
            return Err(SessionError::UnknownColumn(unknown.clone()));
        }
        self.extra_columns = selection;
        Ok(())
    }

    // ==========================================
    // 删除 / 撤销
    // ==========================================

    /// 删除指定行
    ///
    /// 1. 不在工作表中的行标识被忽略
    /// 2. 实际删除 0 行 → 空操作，不压入快照
    /// 3. 否则先压入当前工作表快照（超出 5 个时淘汰最旧），再替换工作表
    pub fn delete_rows(&mut self, ids: &[RowId]) -> SessionResult<DeleteOutcome> {
        let data = self.data.as_mut().ok_or(SessionError::NoData)?;

        let present: HashSet<RowId> = data.working.rows.iter().map(|r| r.id).collect();
        let targets: BTreeSet<RowId> = ids.iter().copied().filter(|id| present.contains(id)).collect();

        if targets.is_empty() {
            tracing::debug!(requested = ids.len(), "无可删除的行，忽略");
            return Ok(DeleteOutcome {
                deleted: 0,
                remaining: data.working.len(),
                history_len: data.history.len(),
            });
        }

        let next = InventoryTable {
            extra_columns: data.working.extra_columns.clone(),
            has_category: data.working.has_category,
            has_supplier: data.working.has_supplier,
            rows: data
                .working
                .rows
                .iter()
                .filter(|r| !targets.contains(&r.id))
                .cloned()
                .collect(),
        };

        data.history.push(Snapshot {
            table: Arc::clone(&data.working),
            deleted: targets.iter().copied().collect(),
            taken_at: Utc::now(),
        });
        data.working = Arc::new(next);

        tracing::info!(
            deleted = targets.len(),
            remaining = data.working.len(),
            history = data.history.len(),
            "已删除行"
        );
        Ok(DeleteOutcome {
            deleted: targets.len(),
            remaining: data.working.len(),
            history_len: data.history.len(),
        })
    }

    /// 撤销最近一次删除
    pub fn undo(&mut self) -> SessionResult<UndoOutcome> {
        let data = self.data.as_mut().ok_or(SessionError::NoData)?;
        let snapshot = data.history.pop().ok_or(SessionError::NothingToUndo)?;

        data.working = snapshot.table;
        tracing::info!(
            restored = snapshot.deleted.len(),
            history = data.history.len(),
            "已撤销删除"
        );
        Ok(UndoOutcome {
            restored_rows: snapshot.deleted.len(),
            history_len: data.history.len(),
        })
    }

    // ==========================================
    // 重置
    // ==========================================

    /// 重置筛选: 不影响工作表、撤销历史与阈值参数
    pub fn reset_filters(&mut self) {
        self.filters = match &self.data {
            Some(data) => FilterParams::for_table(&data.working),
            None => FilterParams::default(),
        };
        self.extra_columns.clear();
        tracing::info!("筛选条件已重置");
    }

    /// 全部重置: 恢复原始表，清空撤销历史，筛选与阈值恢复默认
    pub fn reset_all(&mut self) -> SessionResult<()> {
        let data = self.data.as_mut().ok_or(SessionError::NoData)?;

        data.working = Arc::clone(&data.original);
        data.history.clear();
        self.filters = FilterParams::for_table(&data.original);
        self.extra_columns.clear();
        self.thresholds = self.default_thresholds;

        tracing::info!(rows = data.working.len(), "会话已全部重置");
        Ok(())
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(ThresholdParams::default())
    }
}
