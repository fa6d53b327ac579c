// ==========================================
// 餐厅库存智能分析 - 食材档案构建
// ==========================================
// 职责: 汇总每种食材的 6 个月消耗,并关联到货档案
// 输入: 月度聚合 + 到货档案 + 名称映射表
// 输出: IngredientProfile / ConsumptionWithShipment
// 红线:
// - 缺失月份不补 0; avg 只对有数据的月份求均值
// - 无到货数据用 None 表示,不能写成 0
// ==========================================

use crate::config::shipment_mapping::ShipmentNameMapping;
use crate::domain::consumption::{
    ConsumptionWithShipment, IngredientProfile, MonthlyIngredientAggregate,
};
use crate::domain::sales::ShipmentProfile;
use crate::engine::stats::safe_div;
use std::collections::BTreeMap;

// ==========================================
// IngredientProfileBuilder - 食材档案构建器
// ==========================================
pub struct IngredientProfileBuilder<'a> {
    mapping: &'a ShipmentNameMapping,
    shipments: &'a [ShipmentProfile],
}

impl<'a> IngredientProfileBuilder<'a> {
    pub fn new(mapping: &'a ShipmentNameMapping, shipments: &'a [ShipmentProfile]) -> Self {
        Self { mapping, shipments }
    }

    /// 构建食材档案 (按食材名排序)
    pub fn build(&self, aggregates: &[MonthlyIngredientAggregate]) -> Vec<IngredientProfile> {
        // ingredient -> (total, months_active)
        let mut totals: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
        for row in aggregates {
            let entry = totals.entry(row.ingredient_name.as_str()).or_insert((0.0, 0));
            entry.0 += row.total_consumption;
            entry.1 += 1;
        }

        let profiles: Vec<IngredientProfile> = totals
            .into_iter()
            .map(|(ingredient, (total, months_active))| {
                let shipment = self.mapping.find_shipment(ingredient, self.shipments).cloned();
                IngredientProfile {
                    ingredient_name: ingredient.to_string(),
                    total_consumption_6months: total,
                    avg_monthly_consumption: total / months_active as f64,
                    months_active,
                    shipment,
                }
            })
            .collect();

        let with_shipment = profiles.iter().filter(|p| p.has_shipment_data()).count();
        tracing::info!(
            ingredients = profiles.len(),
            with_shipment_data = with_shipment,
            "食材档案构建完成"
        );
        profiles
    }

    /// 月度消耗关联到货信息,估算所需到货次数
    ///
    /// # 说明
    /// - 单位未做换算,estimated_shipments_needed 只是量级估计
    /// - 无到货数据或单次到货量为 0 时为 None
    pub fn join_shipments(
        &self,
        aggregates: &[MonthlyIngredientAggregate],
    ) -> Vec<ConsumptionWithShipment> {
        aggregates
            .iter()
            .map(|row| {
                let shipment = self.mapping.find_shipment(&row.ingredient_name, self.shipments);
                ConsumptionWithShipment {
                    month: row.month,
                    ingredient: row.ingredient_name.clone(),
                    total_consumption: row.total_consumption,
                    sales_count: row.sales_count,
                    revenue: row.total_revenue,
                    // 看板口径: 关联成功时填用量表列名,而非到货表原名
                    shipment_ingredient_name: shipment.map(|_| row.ingredient_name.clone()),
                    quantity_per_shipment: shipment.map(|s| s.quantity_per_shipment),
                    unit: shipment.map(|s| s.unit.clone()),
                    frequency: shipment.map(|s| s.frequency),
                    num_shipments: shipment.map(|s| s.num_shipments),
                    estimated_shipments_needed: shipment.and_then(|s| {
                        if s.quantity_per_shipment > 0.0 {
                            safe_div(row.total_consumption, s.quantity_per_shipment)
                        } else {
                            None
                        }
                    }),
                }
            })
            .collect()
    }
}
