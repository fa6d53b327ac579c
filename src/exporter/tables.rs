// ==========================================
// 餐厅库存智能分析 - 输出表定义
// ==========================================
// 表名即 CSV 文件名 / SQLite 表名,列名沿用看板既有命名
// ==========================================

use crate::domain::consumption::{
    ConsumptionRecord, ConsumptionWithShipment, IngredientProfile, ItemSalesMatch,
    MonthlyIngredientAggregate,
};
use crate::domain::metrics::{
    AnomalyRecord, CostEfficiencyRecord, ForecastRecord, GrowthRecord, InventoryMetric,
    MonthlySalesTotal, SimulatedInventoryStatus,
};
use crate::domain::types::ShipmentFrequency;
use serde::{Deserialize, Serialize};

pub const TABLE_CONSUMPTION_DETAILED: &str = "ingredient_consumption_detailed";
pub const TABLE_CONSUMPTION_MONTHLY: &str = "ingredient_consumption_monthly";
pub const TABLE_CONSUMPTION_WITH_SHIPMENTS: &str = "ingredient_consumption_with_shipments";
pub const TABLE_INGREDIENT_SUMMARY: &str = "ingredient_summary";
pub const TABLE_ITEM_SALES_WITH_INGREDIENTS: &str = "item_sales_with_ingredients";
pub const TABLE_INVENTORY_OPTIMIZATION: &str = "inventory_optimization";
pub const TABLE_DETECTED_ANOMALIES: &str = "detected_anomalies";
pub const TABLE_FORECASTING_DATA: &str = "forecasting_data";
pub const TABLE_COST_EFFICIENCY: &str = "cost_efficiency";
pub const TABLE_INGREDIENT_GROWTH: &str = "ingredient_growth";
pub const TABLE_INVENTORY_STATUS_SIMULATED: &str = "inventory_status_simulated";
pub const TABLE_MONTHLY_SALES_TOTALS: &str = "monthly_sales_totals";
pub const TABLE_PIPELINE_RUN: &str = "pipeline_run";

pub const SUMMARY_FILE: &str = "summary_statistics.json";
pub const CONFIG_SNAPSHOT_FILE: &str = "config_snapshot.json";

// ==========================================
// TableColumns - 输出表列名
// ==========================================
// 顺序与 serde 序列化字段一致; 空表也必须写出表头
pub trait TableColumns {
    const COLUMNS: &'static [&'static str];
}

macro_rules! table_columns {
    ($ty:ty => [$($col:literal),+ $(,)?]) => {
        impl TableColumns for $ty {
            const COLUMNS: &'static [&'static str] = &[$($col),+];
        }
    };
}

table_columns!(ConsumptionRecord => [
    "month", "item_name", "sales_count", "ingredient", "consumption_per_item",
    "total_consumption", "revenue",
]);
table_columns!(MonthlyIngredientAggregate => [
    "month", "ingredient", "total_consumption", "sales_count", "revenue",
]);
table_columns!(ConsumptionWithShipment => [
    "month", "ingredient", "total_consumption", "sales_count", "revenue",
    "shipment_ingredient_name", "quantity_per_shipment", "unit", "frequency",
    "num_shipments", "estimated_shipments_needed",
]);
table_columns!(IngredientProfileRow => [
    "ingredient", "total_consumption_6months", "avg_monthly_consumption", "months_active",
    "has_shipment_data", "shipment_ingredient_name", "quantity_per_shipment", "unit",
    "num_shipments", "frequency",
]);
table_columns!(ItemSalesMatch => [
    "month", "item_name", "sales_count", "revenue", "has_ingredient_data",
]);
table_columns!(InventoryMetric => [
    "ingredient", "avg_monthly_consumption", "std_monthly_consumption",
    "max_monthly_consumption", "min_monthly_consumption", "safety_stock", "reorder_point",
    "has_shipment_data", "frequency", "quantity_per_shipment", "risk_level",
]);
table_columns!(AnomalyRecord => ["ingredient", "month", "consumption", "z_score", "deviation"]);
table_columns!(ForecastRecord => [
    "ingredient", "trend_slope", "avg_monthly_change", "last_value", "forecast_next_month",
    "volatility",
]);
table_columns!(CostEfficiencyRecord => [
    "ingredient", "total_consumption", "revenue", "revenue_per_unit",
]);
table_columns!(GrowthRecord => [
    "ingredient", "first_month_consumption", "last_month_consumption", "growth_pct",
    "is_significant", "volatility_cv",
]);
table_columns!(SimulatedInventoryStatus => [
    "ingredient", "is_simulated", "simulated_current_inventory", "reorder_point", "status",
    "forecasted_consumption", "days_of_supply", "recommended_order_qty",
    "days_until_reorder", "is_overstocked",
]);
table_columns!(MonthlySalesTotal => ["month", "revenue", "items_sold"]);

// ==========================================
// IngredientProfileRow - 食材档案扁平行
// ==========================================
// 到货字段展开为独立列,无到货数据时为空
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientProfileRow {
    pub ingredient: String,
    pub total_consumption_6months: f64,
    pub avg_monthly_consumption: f64,
    pub months_active: usize,
    pub has_shipment_data: bool,
    pub shipment_ingredient_name: Option<String>,
    pub quantity_per_shipment: Option<f64>,
    pub unit: Option<String>,
    pub num_shipments: Option<u32>,
    pub frequency: Option<ShipmentFrequency>,
}

impl From<&IngredientProfile> for IngredientProfileRow {
    fn from(profile: &IngredientProfile) -> Self {
        let shipment = profile.shipment.as_ref();
        Self {
            ingredient: profile.ingredient_name.clone(),
            total_consumption_6months: profile.total_consumption_6months,
            avg_monthly_consumption: profile.avg_monthly_consumption,
            months_active: profile.months_active,
            has_shipment_data: profile.has_shipment_data(),
            shipment_ingredient_name: shipment.map(|s| s.ingredient_name.clone()),
            quantity_per_shipment: shipment.map(|s| s.quantity_per_shipment),
            unit: shipment.map(|s| s.unit.clone()),
            num_shipments: shipment.map(|s| s.num_shipments),
            frequency: shipment.map(|s| s.frequency),
        }
    }
}
