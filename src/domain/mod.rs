// ==========================================
// 餐厅库存智能分析 - 领域模型层
// ==========================================
// 职责: 定义输入快照、派生表、指标表与领域类型
// 红线: 不含文件读写逻辑,不含计算逻辑
// ==========================================

pub mod consumption;
pub mod metrics;
pub mod sales;
pub mod types;

// 重导出核心类型
pub use consumption::{
    ConsumptionRecord, ConsumptionWithShipment, IngredientProfile, ItemSalesMatch,
    MonthlyIngredientAggregate,
};
pub use metrics::{
    AnomalyRecord, CostEfficiencyRecord, ForecastRecord, GrowthRecord, InventoryMetric,
    MonthlySalesTotal, RunSummary, SimulatedInventoryStatus,
};
pub use sales::{RecipeVector, SalesRecord, ShipmentProfile};
pub use types::{Month, RiskLevel, ShipmentFrequency, StockStatus};
