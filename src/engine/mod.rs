// ==========================================
// 餐厅库存智能分析 - 引擎层
// ==========================================
// 职责: 纯计算,不做 IO
// 红线: 退化统计量 (样本不足 / 分母为 0) 一律走定义好的回退或不输出,不 panic
// ==========================================

pub mod anomaly;
pub mod consumption;
pub mod efficiency;
pub mod error;
pub mod forecast;
pub mod growth;
pub mod inventory_metrics;
pub mod orchestrator;
pub mod profile;
pub mod recipe_matcher;
pub mod simulation;
pub mod stats;

// 重导出核心引擎
pub use anomaly::AnomalyDetector;
pub use consumption::{series_by_ingredient, ConsumptionAggregator};
pub use efficiency::CostEfficiencyAnalyzer;
pub use error::{PipelineError, PipelineResult};
pub use forecast::TrendForecaster;
pub use growth::GrowthAnalyzer;
pub use inventory_metrics::InventoryMetricsEngine;
pub use orchestrator::{
    PipelineInputs, PipelineOrchestrator, PipelineOutput, PipelineRunContext,
};
pub use profile::IngredientProfileBuilder;
pub use recipe_matcher::{MatchOutcome, MatchReport, RecipeBook, RecipeMatcher};
pub use simulation::InventorySimulator;
