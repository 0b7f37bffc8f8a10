// ==========================================
// Mock 配置实现 - 用于集成测试
// ==========================================

use inventory_reorder::config::ImportConfigReader;
use inventory_reorder::domain::ThresholdParams;

/// Mock 配置结构
#[derive(Debug, Clone)]
pub struct MockConfig {
    pub header_row: usize,
    pub default_thresholds: ThresholdParams,
}

impl MockConfig {
    /// 创建默认配置（表头位于第 1 行）
    pub fn default() -> Self {
        Self {
            header_row: 1,
            default_thresholds: ThresholdParams::default(),
        }
    }

    /// 表头位于首行的文件
    pub fn header_first() -> Self {
        Self {
            header_row: 0,
            ..Self::default()
        }
    }
}

impl ImportConfigReader for MockConfig {
    fn header_row(&self) -> usize {
        self.header_row
    }

    fn default_thresholds(&self) -> ThresholdParams {
        self.default_thresholds
    }
}
