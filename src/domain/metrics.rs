// ==========================================
// 餐厅库存智能分析 - 库存指标领域模型
// ==========================================
// 职责: 指标引擎的输出表 (每表一行一键)
// 用途: 看板只读数据源,每次运行整体重算
// ==========================================

use crate::domain::types::{Month, RiskLevel, ShipmentFrequency, StockStatus};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// InventoryMetric - 安全库存 / 再订货点
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryMetric {
    #[serde(rename = "ingredient")]
    pub ingredient_name: String,
    pub avg_monthly_consumption: f64,
    pub std_monthly_consumption: f64, // 单月时为 0 (样本标准差无定义)
    pub max_monthly_consumption: f64,
    pub min_monthly_consumption: f64,
    pub safety_stock: f64,
    pub reorder_point: f64,
    pub has_shipment_data: bool,
    pub frequency: Option<ShipmentFrequency>,
    pub quantity_per_shipment: Option<f64>,
    pub risk_level: RiskLevel,
}

// ==========================================
// AnomalyRecord - Z-score 异常月份
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnomalyRecord {
    pub ingredient: String,
    pub month: Month,
    pub consumption: f64,
    pub z_score: f64,
    pub deviation: f64, // 相对均值的带符号百分比偏差
}

// ==========================================
// ForecastRecord - 趋势与下月预测
// ==========================================
// 注意: trend_slope (最小二乘) 与 avg_monthly_change (平均差分)
// 是两个独立的趋势估计,forecast_next_month 只使用后者
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastRecord {
    pub ingredient: String,
    pub trend_slope: f64,
    pub avg_monthly_change: f64,
    pub last_value: f64,
    pub forecast_next_month: f64,
    pub volatility: f64,
}

// ==========================================
// CostEfficiencyRecord - 单位消耗销售额
// ==========================================
// 销售额是全额归属口径,只能用于相对排序,不是真实单位成本
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostEfficiencyRecord {
    pub ingredient: String,
    pub total_consumption: f64,
    #[serde(rename = "revenue")]
    pub total_revenue: f64,
    pub revenue_per_unit: f64,
}

// ==========================================
// GrowthRecord - 首末月增长与波动
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthRecord {
    pub ingredient: String,
    pub first_month_consumption: Option<f64>,
    pub last_month_consumption: Option<f64>,
    pub growth_pct: Option<f64>,
    pub is_significant: bool,
    pub volatility_cv: Option<f64>,
}

// ==========================================
// SimulatedInventoryStatus - 模拟库存状态
// ==========================================
// 红线: 没有真实在库数据,当前库存 = 再订货点 × 模拟比例
// is_simulated 恒为 true,供下游识别
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulatedInventoryStatus {
    pub ingredient: String,
    pub is_simulated: bool,
    pub simulated_current_inventory: f64,
    pub reorder_point: f64,
    pub status: StockStatus,
    pub forecasted_consumption: f64,
    pub days_of_supply: Option<f64>,
    pub recommended_order_qty: f64,
    pub days_until_reorder: Option<f64>,
    pub is_overstocked: bool,
}

// ==========================================
// MonthlySalesTotal - 月度销售汇总 (含未匹配菜品)
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlySalesTotal {
    pub month: Month,
    pub revenue: f64,
    pub items_sold: u64,
}

// ==========================================
// RunSummary - 单次运行汇总
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub run_id: String,
    pub generated_at: DateTime<Utc>,

    // ===== 销售口径 =====
    pub total_revenue: f64,
    pub total_items_sold: u64,
    pub unique_items: usize,
    pub months_analyzed: usize,
    pub avg_monthly_revenue: f64,
    pub avg_monthly_items: f64,
    pub revenue_growth_pct: Option<f64>,

    // ===== 数据质量 =====
    pub matched_items: usize,
    pub items_without_ingredient_data: usize,
    pub unmatched_sales_rows: usize,

    // ===== 食材口径 =====
    pub unique_ingredients: usize,
    pub ingredients_with_shipment_data: usize,
    pub high_risk_count: usize,
    pub medium_risk_count: usize,
    pub low_risk_count: usize,
    pub anomaly_count: usize,
    pub forecast_count: usize,
}
