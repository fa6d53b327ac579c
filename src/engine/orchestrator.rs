// ==========================================
// 餐厅库存智能分析 - 流水线编排器
// ==========================================
// 用途: 协调各引擎的执行顺序
// 顺序: 输入校验 → 配方匹配 → 消耗聚合 → 食材档案
//       → 库存指标 / 异常 / 预测 / 效率 / 增长 → 模拟库存 → 运行汇总
// 红线:
// - 单线程批处理,上一阶段全部完成后才进入下一阶段
// - 运行状态只存在于 PipelineRunContext,不使用全局变量
// - 输出全部在内存中算完,由 exporter 整体替换落盘
// ==========================================

use crate::config::config_manager::PipelineConfig;
use crate::domain::consumption::{
    ConsumptionRecord, ConsumptionWithShipment, IngredientProfile, ItemSalesMatch,
    MonthlyIngredientAggregate,
};
use crate::domain::metrics::{
    AnomalyRecord, CostEfficiencyRecord, ForecastRecord, GrowthRecord, InventoryMetric,
    MonthlySalesTotal, RunSummary, SimulatedInventoryStatus,
};
use crate::domain::sales::{SalesRecord, ShipmentProfile};
use crate::domain::types::{Month, RiskLevel};
use crate::engine::anomaly::AnomalyDetector;
use crate::engine::consumption::ConsumptionAggregator;
use crate::engine::efficiency::CostEfficiencyAnalyzer;
use crate::engine::error::{PipelineError, PipelineResult};
use crate::engine::forecast::TrendForecaster;
use crate::engine::growth::GrowthAnalyzer;
use crate::engine::inventory_metrics::InventoryMetricsEngine;
use crate::engine::profile::IngredientProfileBuilder;
use crate::engine::recipe_matcher::{MatchReport, RecipeBook, RecipeMatcher};
use crate::engine::simulation::InventorySimulator;
use crate::engine::stats::safe_div;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use tracing::{debug, info};
use uuid::Uuid;

// ==========================================
// PipelineInputs - 不可变输入快照
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct PipelineInputs {
    pub sales: Vec<SalesRecord>,
    pub recipes: RecipeBook,
    pub shipments: Vec<ShipmentProfile>,
}

// ==========================================
// PipelineRunContext - 单次运行上下文
// ==========================================
#[derive(Debug, Clone)]
pub struct PipelineRunContext {
    pub run_id: String,
    pub started_at: DateTime<Utc>,
    pub config: PipelineConfig,
    pub inputs: PipelineInputs,
}

impl PipelineRunContext {
    pub fn new(config: PipelineConfig, inputs: PipelineInputs) -> Self {
        Self {
            run_id: Uuid::new_v4().to_string(),
            started_at: Utc::now(),
            config,
            inputs,
        }
    }
}

// ==========================================
// PipelineOutput - 运行结果 (全部输出表)
// ==========================================
#[derive(Debug, Clone)]
pub struct PipelineOutput {
    pub consumption_detailed: Vec<ConsumptionRecord>,
    pub monthly_consumption: Vec<MonthlyIngredientAggregate>,
    pub consumption_with_shipments: Vec<ConsumptionWithShipment>,
    pub item_sales_matches: Vec<ItemSalesMatch>,
    pub ingredient_profiles: Vec<IngredientProfile>,
    pub inventory_metrics: Vec<InventoryMetric>,
    pub anomalies: Vec<AnomalyRecord>,
    pub forecasts: Vec<ForecastRecord>,
    pub cost_efficiency: Vec<CostEfficiencyRecord>,
    pub growth: Vec<GrowthRecord>,
    pub inventory_status: Vec<SimulatedInventoryStatus>,
    pub monthly_sales_totals: Vec<MonthlySalesTotal>,
    pub summary: RunSummary,
}

// ==========================================
// PipelineOrchestrator - 流水线编排器
// ==========================================
pub struct PipelineOrchestrator {
    matcher: RecipeMatcher,
    aggregator: ConsumptionAggregator,
    efficiency: CostEfficiencyAnalyzer,
}

impl PipelineOrchestrator {
    pub fn new() -> Self {
        Self {
            matcher: RecipeMatcher::new(),
            aggregator: ConsumptionAggregator::new(),
            efficiency: CostEfficiencyAnalyzer::new(),
        }
    }

    /// 执行完整流水线
    ///
    /// # 返回
    /// - Ok(PipelineOutput): 全部输出表 + 运行汇总
    /// - Err(PipelineError): 输入快照或策略配置不合法 (整次运行拒绝)
    pub fn run(&self, ctx: &PipelineRunContext) -> PipelineResult<PipelineOutput> {
        let inputs = &ctx.inputs;
        let policy = &ctx.config.policy;

        info!(
            run_id = %ctx.run_id,
            sales_rows = inputs.sales.len(),
            recipes = inputs.recipes.len(),
            shipments = inputs.shipments.len(),
            "开始执行分析流水线"
        );

        // ==========================================
        // 步骤0: 输入校验 (fail fast)
        // ==========================================
        policy.validate()?;
        validate_inputs(inputs)?;

        // ==========================================
        // 步骤1: 配方匹配
        // ==========================================
        debug!("步骤1: 配方匹配");
        let report = self.matcher.match_sales(&inputs.sales, &inputs.recipes);

        // ==========================================
        // 步骤2: 消耗展开与月度聚合
        // ==========================================
        debug!("步骤2: 消耗聚合");
        let consumption_detailed = self.aggregator.expand(&report.matched);
        let monthly_consumption = self.aggregator.aggregate(&consumption_detailed);

        // ==========================================
        // 步骤3: 食材档案 + 到货关联
        // ==========================================
        debug!("步骤3: 食材档案");
        let builder =
            IngredientProfileBuilder::new(&ctx.config.shipment_mapping, &inputs.shipments);
        let ingredient_profiles = builder.build(&monthly_consumption);
        let consumption_with_shipments = builder.join_shipments(&monthly_consumption);

        // ==========================================
        // 步骤4: 指标计算
        // ==========================================
        debug!("步骤4: 库存指标 / 异常 / 预测 / 效率 / 增长");
        let inventory_metrics =
            InventoryMetricsEngine::new(policy).compute(&ingredient_profiles, &monthly_consumption);
        let anomalies = AnomalyDetector::new(policy).detect(&monthly_consumption);
        let forecasts = TrendForecaster::new(policy).forecast(&monthly_consumption);
        let cost_efficiency = self.efficiency.analyze(&monthly_consumption);
        let growth = GrowthAnalyzer::new(policy).analyze(&monthly_consumption);

        // ==========================================
        // 步骤5: 模拟库存状态
        // ==========================================
        debug!("步骤5: 模拟库存状态");
        let inventory_status = InventorySimulator::new(policy).simulate(&inventory_metrics, &forecasts);

        // ==========================================
        // 步骤6: 运行汇总
        // ==========================================
        let monthly_sales_totals = monthly_sales_totals(&inputs.sales);
        let summary = build_summary(
            ctx,
            &report,
            &monthly_sales_totals,
            &ingredient_profiles,
            &inventory_metrics,
            anomalies.len(),
            forecasts.len(),
        );

        info!(
            run_id = %ctx.run_id,
            ingredients = summary.unique_ingredients,
            high_risk = summary.high_risk_count,
            anomalies = summary.anomaly_count,
            forecasts = summary.forecast_count,
            "分析流水线执行完成"
        );

        Ok(PipelineOutput {
            item_sales_matches: report.item_matches,
            consumption_detailed,
            monthly_consumption,
            consumption_with_shipments,
            ingredient_profiles,
            inventory_metrics,
            anomalies,
            forecasts,
            cost_efficiency,
            growth,
            inventory_status,
            monthly_sales_totals,
            summary,
        })
    }
}

impl Default for PipelineOrchestrator {
    fn default() -> Self {
        Self::new()
    }
}

// ==========================================
// 输入校验
// ==========================================

/// 校验输入快照
///
/// 规则:
/// - 销售数据非空; 菜品名非空; 销售额有限且非负
/// - 配方用量有限且非负
/// - 到货档案: 食材名非空且唯一, 单次到货量有限且非负
pub fn validate_inputs(inputs: &PipelineInputs) -> PipelineResult<()> {
    if inputs.sales.is_empty() {
        return Err(PipelineError::EmptySales);
    }

    for (idx, record) in inputs.sales.iter().enumerate() {
        let row = idx + 1;
        if record.item_name.trim().is_empty() {
            return Err(PipelineError::InvalidSalesRecord {
                row,
                field: "item_name".to_string(),
                message: "菜品名为空".to_string(),
            });
        }
        if !record.revenue.is_finite() || record.revenue < 0.0 {
            return Err(PipelineError::InvalidSalesRecord {
                row,
                field: "revenue".to_string(),
                message: format!("销售额必须为非负数,实际 {}", record.revenue),
            });
        }
    }

    for recipe in inputs.recipes.iter() {
        for (ingredient, amount) in &recipe.ingredients {
            if !amount.is_finite() || *amount < 0.0 {
                return Err(PipelineError::InvalidRecipe {
                    item_name: recipe.item_name.clone(),
                    ingredient: ingredient.clone(),
                    message: format!("单位用量必须为非负数,实际 {}", amount),
                });
            }
        }
    }

    let mut seen = HashSet::new();
    for shipment in &inputs.shipments {
        let name = shipment.ingredient_name.trim();
        if name.is_empty() {
            return Err(PipelineError::InvalidShipment {
                ingredient: shipment.ingredient_name.clone(),
                message: "食材名为空".to_string(),
            });
        }
        if !seen.insert(name) {
            return Err(PipelineError::InvalidShipment {
                ingredient: name.to_string(),
                message: "同一食材存在多条到货档案".to_string(),
            });
        }
        if !shipment.quantity_per_shipment.is_finite() || shipment.quantity_per_shipment < 0.0 {
            return Err(PipelineError::InvalidShipment {
                ingredient: name.to_string(),
                message: format!(
                    "单次到货量必须为非负数,实际 {}",
                    shipment.quantity_per_shipment
                ),
            });
        }
    }

    Ok(())
}

// ==========================================
// 汇总
// ==========================================

/// 月度销售汇总 (含未匹配菜品),按日历顺序
pub fn monthly_sales_totals(sales: &[SalesRecord]) -> Vec<MonthlySalesTotal> {
    let mut totals: BTreeMap<Month, (f64, u64)> = BTreeMap::new();
    for record in sales {
        let entry = totals.entry(record.month).or_insert((0.0, 0));
        entry.0 += record.revenue;
        entry.1 += record.units_sold;
    }
    totals
        .into_iter()
        .map(|(month, (revenue, items_sold))| MonthlySalesTotal {
            month,
            revenue,
            items_sold,
        })
        .collect()
}

fn build_summary(
    ctx: &PipelineRunContext,
    report: &MatchReport<'_>,
    monthly: &[MonthlySalesTotal],
    profiles: &[IngredientProfile],
    metrics: &[InventoryMetric],
    anomaly_count: usize,
    forecast_count: usize,
) -> RunSummary {
    let sales = &ctx.inputs.sales;
    let total_revenue: f64 = sales.iter().map(|r| r.revenue).sum();
    let total_items_sold: u64 = sales.iter().map(|r| r.units_sold).sum();
    let unique_items: BTreeSet<&str> = sales.iter().map(|r| r.item_name.trim()).collect();

    let months = monthly.len();
    let avg_monthly_revenue = safe_div(total_revenue, months as f64).unwrap_or(0.0);
    let avg_monthly_items = safe_div(total_items_sold as f64, months as f64).unwrap_or(0.0);

    // 首末有数据月份之间的销售额增长
    let revenue_growth_pct = match (monthly.first(), monthly.last()) {
        (Some(first), Some(last)) if months >= 2 && first.revenue > 0.0 => {
            safe_div(last.revenue - first.revenue, first.revenue).map(|r| r * 100.0)
        }
        _ => None,
    };

    let risk_count = |level: RiskLevel| metrics.iter().filter(|m| m.risk_level == level).count();

    RunSummary {
        run_id: ctx.run_id.clone(),
        generated_at: Utc::now(),
        total_revenue,
        total_items_sold,
        unique_items: unique_items.len(),
        months_analyzed: months,
        avg_monthly_revenue,
        avg_monthly_items,
        revenue_growth_pct,
        matched_items: report.matched_items.len(),
        items_without_ingredient_data: report.items_without_ingredient_data(),
        unmatched_sales_rows: report.unmatched_rows,
        unique_ingredients: profiles.len(),
        ingredients_with_shipment_data: profiles.iter().filter(|p| p.has_shipment_data()).count(),
        high_risk_count: risk_count(RiskLevel::High),
        medium_risk_count: risk_count(RiskLevel::Medium),
        low_risk_count: risk_count(RiskLevel::Low),
        anomaly_count,
        forecast_count,
    }
}
