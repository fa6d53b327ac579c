// ==========================================
// 餐厅库存智能分析 - 核心库
// ==========================================
// 输入: 月度菜品销售 / 配方用量 / 到货档案
// 输出: 食材消耗、库存指标、异常、预测等看板数据表
// 运行方式: 单线程批处理,每次运行整体重算
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 配置层 - 策略参数与路径
pub mod config;

// 引擎层 - 计算规则
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 输出层 - CSV / SQLite
pub mod exporter;

// 数据库基础设施（连接初始化/PRAGMA 统一）
pub mod db;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{Month, RiskLevel, ShipmentFrequency, StockStatus};

// 领域实体
pub use domain::{
    AnomalyRecord, ConsumptionRecord, CostEfficiencyRecord, ForecastRecord, GrowthRecord,
    IngredientProfile, InventoryMetric, MonthlyIngredientAggregate, RecipeVector, RunSummary,
    SalesRecord, ShipmentProfile, SimulatedInventoryStatus,
};

// 配置
pub use config::{ConfigManager, InventoryPolicy, PipelineConfig, ShipmentNameMapping};

// 引擎
pub use engine::{
    PipelineError, PipelineInputs, PipelineOrchestrator, PipelineOutput, PipelineRunContext,
    RecipeBook,
};

// 导入 / 输出
pub use exporter::{CsvTableWriter, SqliteTableStore};
pub use importer::InventoryDataLoader;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "餐厅库存智能分析";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
