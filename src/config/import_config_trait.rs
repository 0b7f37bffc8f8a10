// ==========================================
// 库存补货建议系统 - 导入配置读取 Trait
// ==========================================
// 用途: 导入器与会话只依赖此接口，不依赖具体配置来源
// 实现者: AppConfig（测试中可用 Mock 实现）
// ==========================================

use crate::domain::suggestion::ThresholdParams;

pub trait ImportConfigReader: Send + Sync {
    /// 表头所在行（从 0 开始）
    ///
    /// 源文件布局的固定假设，不做自动探测
    fn header_row(&self) -> usize;

    /// 阈值参数默认值
    fn default_thresholds(&self) -> ThresholdParams;
}
