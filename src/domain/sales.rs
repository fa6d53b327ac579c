// ==========================================
// 餐厅库存智能分析 - 输入快照领域模型
// ==========================================
// 职责: 销售记录 / 配方向量 / 到货档案
// 红线: 导入后不可变,流水线只读
// ==========================================

use crate::domain::types::{Month, ShipmentFrequency};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// SalesRecord - 菜品月销售记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    pub month: Month,      // 月份
    pub item_name: String, // 菜品名称
    pub units_sold: u64,   // 销量
    pub revenue: f64,      // 销售额
}

impl SalesRecord {
    pub fn new(month: Month, item_name: impl Into<String>, units_sold: u64, revenue: f64) -> Self {
        Self {
            month,
            item_name: item_name.into(),
            units_sold,
            revenue,
        }
    }
}

// ==========================================
// RecipeVector - 单位菜品的食材用量
// ==========================================
// 用量为 0 表示该菜品不使用此食材
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecipeVector {
    pub item_name: String,
    pub ingredients: BTreeMap<String, f64>, // ingredient_name -> amount_per_unit
}

impl RecipeVector {
    pub fn new(item_name: impl Into<String>) -> Self {
        Self {
            item_name: item_name.into(),
            ingredients: BTreeMap::new(),
        }
    }

    /// 链式添加食材用量
    pub fn with_ingredient(mut self, ingredient: impl Into<String>, amount_per_unit: f64) -> Self {
        self.ingredients.insert(ingredient.into(), amount_per_unit);
        self
    }

    /// 实际使用的食材 (用量 > 0)
    pub fn used_ingredients(&self) -> impl Iterator<Item = (&str, f64)> {
        self.ingredients
            .iter()
            .filter(|(_, amount)| **amount > 0.0)
            .map(|(name, amount)| (name.as_str(), *amount))
    }
}

// ==========================================
// ShipmentProfile - 到货档案
// ==========================================
// ingredient_name 为到货表中的名称 (如 "Beef"),
// 与用量表列名 (如 "braised_beef_g") 通过固定映射表对应
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentProfile {
    pub ingredient_name: String,
    pub quantity_per_shipment: f64,
    pub unit: String,
    pub frequency: ShipmentFrequency,
    pub num_shipments: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_used_ingredients_skips_zero() {
        let recipe = RecipeVector::new("Beef Noodle")
            .with_ingredient("beef_g", 150.0)
            .with_ingredient("egg_count", 0.0)
            .with_ingredient("noodle_g", 200.0);

        let used: Vec<_> = recipe.used_ingredients().collect();
        assert_eq!(used, vec![("beef_g", 150.0), ("noodle_g", 200.0)]);
    }
}
