// ==========================================
// 餐厅库存智能分析 - 消耗推导领域模型
// ==========================================
// 职责: 消耗明细 / 月度聚合 / 食材档案
// 红线: 菜品销售额全额归属到其使用的每一种食材 (不按比例拆分)
// 列名: 与看板读取的既有列名保持一致 (ingredient / revenue / sales_count)
// ==========================================

use crate::domain::sales::ShipmentProfile;
use crate::domain::types::{Month, ShipmentFrequency};
use serde::{Deserialize, Serialize};

// ==========================================
// ConsumptionRecord - 消耗明细 (菜品 × 食材)
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsumptionRecord {
    pub month: Month,
    pub item_name: String,
    #[serde(rename = "sales_count")]
    pub units_sold: u64,
    #[serde(rename = "ingredient")]
    pub ingredient_name: String,
    #[serde(rename = "consumption_per_item")]
    pub amount_per_unit: f64,
    pub total_consumption: f64,      // units_sold × amount_per_unit
    #[serde(rename = "revenue")]
    pub attributed_revenue: f64,     // 销售记录的全额销售额
}

// ==========================================
// MonthlyIngredientAggregate - 月度食材聚合
// ==========================================
// 主键: (month, ingredient_name)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyIngredientAggregate {
    pub month: Month,
    #[serde(rename = "ingredient")]
    pub ingredient_name: String,
    pub total_consumption: f64,
    pub sales_count: u64,
    #[serde(rename = "revenue")]
    pub total_revenue: f64,
}

// ==========================================
// IngredientProfile - 食材 6 个月档案
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientProfile {
    pub ingredient_name: String,
    pub total_consumption_6months: f64,
    pub avg_monthly_consumption: f64, // 仅对有数据的月份求均值
    pub months_active: usize,
    pub shipment: Option<ShipmentProfile>, // None = 无到货数据 (不是数量为 0)
}

impl IngredientProfile {
    pub fn has_shipment_data(&self) -> bool {
        self.shipment.is_some()
    }

    pub fn frequency(&self) -> Option<ShipmentFrequency> {
        self.shipment.as_ref().map(|s| s.frequency)
    }

    pub fn quantity_per_shipment(&self) -> Option<f64> {
        self.shipment.as_ref().map(|s| s.quantity_per_shipment)
    }
}

// ==========================================
// ConsumptionWithShipment - 月度消耗 + 到货信息
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsumptionWithShipment {
    pub month: Month,
    pub ingredient: String,
    pub total_consumption: f64,
    pub sales_count: u64,
    pub revenue: f64,
    pub shipment_ingredient_name: Option<String>,
    pub quantity_per_shipment: Option<f64>,
    pub unit: Option<String>,
    pub frequency: Option<ShipmentFrequency>,
    pub num_shipments: Option<u32>,
    pub estimated_shipments_needed: Option<f64>, // 单位未换算,仅作估计
}

// ==========================================
// ItemSalesMatch - 销售行的配方匹配结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemSalesMatch {
    pub month: Month,
    pub item_name: String,
    pub sales_count: u64,
    pub revenue: f64,
    pub has_ingredient_data: bool,
}
