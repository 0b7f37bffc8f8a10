// ==========================================
// 库存补货建议系统 - 库存会话 API
// ==========================================
// 职责: 对外暴露的全部会话操作
// 上传 → 阈值/筛选 → 视图 → 删除/撤销 → 导出
// 红线:
// - 单线程同步执行，会话状态由 API 实例独占
// - 任一操作失败时会话状态保持不变
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::AppConfig;
use crate::domain::item::InventoryTable;
use crate::domain::suggestion::{SuggestionTable, ThresholdParams};
use crate::domain::types::{AlertLevel, RowId};
use crate::engine::cache::{CacheStats, NormalizerCache, SuggestionCache, UploadKey};
use crate::engine::filter::{apply_filters, FilterOptions, FilterParams};
use crate::engine::suggestion::SuggestionEngine;
use crate::engine::view::InventoryView;
use crate::exporter;
use crate::importer::{ImportError, InventoryImporterImpl, UploadInfo};
use crate::session::{
    DeleteOutcome, LoadOutcome, SessionPhase, SessionState, UndoOutcome, UNDO_CAPACITY,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use uuid::Uuid;

// ==========================================
// 响应 DTO
// ==========================================

/// 上传响应
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadResponse {
    pub outcome: LoadOutcome,
    /// 当前工作表对应的上传批次
    pub upload_id: Uuid,
    pub file_name: String,
    /// 本次上传文件的行数
    pub rows: usize,
    /// 本次上传的可选显示列
    pub optional_columns: Vec<String>,
    /// 是否命中规范化缓存
    pub cache_hit: bool,
}

/// 告警图例条目
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegendEntry {
    pub alert: AlertLevel,
    pub symbol: String,
    pub legend: String,
}

/// 告警计数
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AlertCount {
    pub alert: AlertLevel,
    pub count: usize,
}

/// 会话状态摘要
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub phase: SessionPhase,
    pub upload: Option<UploadInfo>,
    /// 工作表行数
    pub working_rows: usize,
    /// 当前视图行数
    pub visible_rows: usize,
    pub history_len: usize,
    pub history_capacity: usize,
    pub thresholds: ThresholdParams,
    pub filters: FilterParams,
    pub extra_columns: Vec<String>,
    /// 工作表中各告警等级的行数
    pub alert_counts: Vec<AlertCount>,
    pub normalizer_cache: CacheStats,
    pub suggestion_cache: CacheStats,
}

// ==========================================
// InventoryApi - 库存会话 API
// ==========================================

/// 库存会话 API
///
/// 职责:
/// 1. 上传与加载（带规范化缓存）
/// 2. 阈值参数、筛选、可选列设置
/// 3. 视图计算（带建议缓存）
/// 4. 删除与撤销（最多 5 步）
/// 5. 导出 CSV / Excel
pub struct InventoryApi {
    config: AppConfig,
    importer: InventoryImporterImpl,
    engine: SuggestionEngine,
    session: SessionState,
    normalizer_cache: NormalizerCache,
    suggestion_cache: SuggestionCache,
}

impl InventoryApi {
    pub fn new(config: AppConfig) -> Self {
        Self {
            importer: InventoryImporterImpl::from_config(&config),
            engine: SuggestionEngine::new(),
            session: SessionState::from_config(&config),
            normalizer_cache: NormalizerCache::new(),
            suggestion_cache: SuggestionCache::new(),
            config,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    // ==========================================
    // 上传
    // ==========================================

    /// 从路径上传
    pub fn upload(&mut self, path: &Path) -> ApiResult<UploadResponse> {
        let bytes = std::fs::read(path).map_err(ImportError::from)?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| ApiError::InvalidInput(format!("无效的文件路径: {}", path.display())))?;
        self.upload_bytes(file_name, &bytes)
    }

    /// 上传文件内容
    ///
    /// 同一格式、内容与表头行命中规范化缓存时不重新解析。
    /// 会话已加载时文件仍会被校验，但保留现有工作表。
    pub fn upload_bytes(&mut self, file_name: &str, bytes: &[u8]) -> ApiResult<UploadResponse> {
        let key = UploadKey::new(file_name, bytes, self.importer.header_row());
        let cache_hit = self.normalizer_cache.peek(&key).is_some();

        let importer = &self.importer;
        let table: Arc<InventoryTable> = self
            .normalizer_cache
            .get_or_try_insert_with(key, || importer.build_table(file_name, bytes))
            .map_err(|e| {
                tracing::warn!(file = %file_name, error = %e, "文件加载失败");
                ApiError::from(e)
            })?;

        let upload = UploadInfo::new(file_name, bytes, &table);
        let rows = table.len();
        let optional_columns = table.optional_columns();
        let outcome = self.session.load(upload, table);

        let current = self
            .session
            .upload()
            .ok_or_else(|| ApiError::InternalError("加载后缺少上传信息".to_string()))?;

        Ok(UploadResponse {
            outcome,
            upload_id: current.upload_id,
            file_name: current.file_name.clone(),
            rows,
            optional_columns,
            cache_hit,
        })
    }

    // ==========================================
    // 参数设置
    // ==========================================

    pub fn thresholds(&self) -> ThresholdParams {
        self.session.thresholds()
    }

    pub fn set_thresholds(&mut self, params: ThresholdParams) -> ApiResult<ThresholdParams> {
        self.session.set_thresholds(params)?;
        tracing::debug!(?params, "阈值参数已更新");
        Ok(params)
    }

    pub fn set_alert_filter(&mut self, alerts: BTreeSet<AlertLevel>) {
        self.session.set_alert_filter(alerts);
    }

    pub fn set_supplier_filter(&mut self, suppliers: Option<BTreeSet<String>>) {
        self.session.set_supplier_filter(suppliers);
    }

    pub fn set_category_filter(&mut self, categories: Option<BTreeSet<String>>) -> ApiResult<()> {
        Ok(self.session.set_category_filter(categories)?)
    }

    pub fn set_search(&mut self, search: &str) {
        self.session.set_search(search);
    }

    pub fn select_extra_columns(&mut self, columns: Vec<String>) -> ApiResult<()> {
        Ok(self.session.select_extra_columns(columns)?)
    }

    // ==========================================
    // 视图
    // ==========================================

    fn suggestions(&mut self) -> ApiResult<Arc<SuggestionTable>> {
        let working = Arc::clone(self.session.working()?);
        let params = self.session.thresholds();
        Ok(self
            .engine
            .compute_cached(&mut self.suggestion_cache, &working, params))
    }

    /// 当前显示视图: 工作表 → 建议 → 筛选 → 投影
    pub fn view(&mut self) -> ApiResult<InventoryView> {
        let suggestions = self.suggestions()?;
        let rows = apply_filters(&suggestions, self.session.filters());
        Ok(InventoryView::build(
            &suggestions,
            &rows,
            self.session.extra_columns(),
        ))
    }

    /// 多选筛选的候选值（基于工作表）
    pub fn filter_options(&self) -> ApiResult<FilterOptions> {
        Ok(FilterOptions::from_table(self.session.working()?))
    }

    // ==========================================
    // 删除 / 撤销
    // ==========================================

    pub fn delete_rows(&mut self, ids: &[RowId]) -> ApiResult<DeleteOutcome> {
        Ok(self.session.delete_rows(ids)?)
    }

    /// 按当前视图位置删除
    ///
    /// 所有位置先校验，任一越界则整体拒绝
    pub fn delete_displayed(&mut self, positions: &[usize]) -> ApiResult<DeleteOutcome> {
        let view = self.view()?;
        let ids = positions
            .iter()
            .map(|&position| {
                view.row_id_at(position).ok_or(ApiError::InvalidPosition {
                    position,
                    len: view.len(),
                })
            })
            .collect::<ApiResult<Vec<RowId>>>()?;
        self.delete_rows(&ids)
    }

    pub fn undo_delete(&mut self) -> ApiResult<UndoOutcome> {
        Ok(self.session.undo()?)
    }

    // ==========================================
    // 重置
    // ==========================================

    pub fn reset_filters(&mut self) {
        self.session.reset_filters();
    }

    pub fn reset_all(&mut self) -> ApiResult<()> {
        Ok(self.session.reset_all()?)
    }

    // ==========================================
    // 导出
    // ==========================================

    pub fn csv_bytes(&mut self) -> ApiResult<Vec<u8>> {
        let view = self.view()?;
        Ok(exporter::to_csv_bytes(&view)?)
    }

    pub fn xlsx_bytes(&mut self) -> ApiResult<Vec<u8>> {
        let view = self.view()?;
        Ok(exporter::to_xlsx_bytes(&view)?)
    }

    /// 导出 CSV，未指定路径时使用配置的默认路径
    pub fn export_csv(&mut self, path: Option<&Path>) -> ApiResult<PathBuf> {
        let view = self.view()?;
        let target = path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.config.export_path("csv"));
        exporter::write_csv(&view, &target)?;
        Ok(target)
    }

    /// 导出 Excel，未指定路径时使用配置的默认路径
    pub fn export_xlsx(&mut self, path: Option<&Path>) -> ApiResult<PathBuf> {
        let view = self.view()?;
        let target = path
            .map(Path::to_path_buf)
            .unwrap_or_else(|| self.config.export_path("xlsx"));
        exporter::write_xlsx(&view, &target)?;
        Ok(target)
    }

    // ==========================================
    // 查询
    // ==========================================

    pub fn legend(&self) -> Vec<LegendEntry> {
        AlertLevel::ALL
            .iter()
            .map(|alert| LegendEntry {
                alert: *alert,
                symbol: alert.symbol().to_string(),
                legend: alert.legend().to_string(),
            })
            .collect()
    }

    pub fn status(&mut self) -> StatusResponse {
        let (working_rows, visible_rows, alert_counts) = match self.suggestions() {
            Ok(suggestions) => {
                let visible = apply_filters(&suggestions, self.session.filters()).len();
                let counts = AlertLevel::ALL
                    .iter()
                    .map(|alert| AlertCount {
                        alert: *alert,
                        count: suggestions.rows.iter().filter(|r| r.alert == *alert).count(),
                    })
                    .collect();
                (suggestions.len(), visible, counts)
            }
            Err(_) => (0, 0, Vec::new()),
        };

        StatusResponse {
            phase: self.session.phase(),
            upload: self.session.upload().cloned(),
            working_rows,
            visible_rows,
            history_len: self.session.history_len(),
            history_capacity: UNDO_CAPACITY,
            thresholds: self.session.thresholds(),
            filters: self.session.filters().clone(),
            extra_columns: self.session.extra_columns().to_vec(),
            alert_counts,
            normalizer_cache: self.normalizer_cache.stats(),
            suggestion_cache: self.suggestion_cache.stats(),
        }
    }
}

impl Default for InventoryApi {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}
