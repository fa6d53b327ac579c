// ==========================================
// 餐厅库存智能分析 - 模拟库存状态
// ==========================================
// 红线: 没有真实在库数据
// - 当前库存 = simulated_inventory_ratio × 再订货点 (默认 80%)
// - 每行 is_simulated = true
// - 日均消耗 <= 0 时可供天数为 None,不使用哨兵值
// ==========================================

use crate::config::inventory_policy::InventoryPolicy;
use crate::domain::metrics::{ForecastRecord, InventoryMetric, SimulatedInventoryStatus};
use crate::domain::types::StockStatus;
use std::collections::HashMap;

pub struct InventorySimulator<'a> {
    policy: &'a InventoryPolicy,
}

impl<'a> InventorySimulator<'a> {
    pub fn new(policy: &'a InventoryPolicy) -> Self {
        Self { policy }
    }

    /// 库存状态分档
    ///
    /// - Good: 库存 > 再订货点
    /// - Low: 库存 > low_stock_ratio × 再订货点
    /// - Critical: 其他
    pub fn classify(&self, inventory: f64, reorder_point: f64) -> StockStatus {
        if inventory > reorder_point {
            StockStatus::Good
        } else if inventory > reorder_point * self.policy.low_stock_ratio {
            StockStatus::Low
        } else {
            StockStatus::Critical
        }
    }

    /// 单个食材的模拟状态
    pub fn simulate_one(&self, metric: &InventoryMetric, forecast: &ForecastRecord) -> SimulatedInventoryStatus {
        let reorder_point = metric.reorder_point;
        let inventory = reorder_point * self.policy.simulated_inventory_ratio;
        let forecasted = forecast.forecast_next_month;
        let daily = forecasted / self.policy.days_per_month;

        let (days_of_supply, days_until_reorder) = if daily > 0.0 {
            (
                Some(inventory / daily),
                Some(((inventory - reorder_point) / daily).max(0.0)),
            )
        } else {
            (None, None)
        };

        SimulatedInventoryStatus {
            ingredient: metric.ingredient_name.clone(),
            is_simulated: true,
            simulated_current_inventory: inventory,
            reorder_point,
            status: self.classify(inventory, reorder_point),
            forecasted_consumption: forecasted,
            days_of_supply,
            recommended_order_qty: (reorder_point - inventory + metric.safety_stock).max(0.0),
            days_until_reorder,
            is_overstocked: inventory > forecasted * self.policy.overstock_ratio,
        }
    }

    /// 仅对同时有库存指标和预测的食材输出,顺序跟随 metrics
    pub fn simulate(
        &self,
        metrics: &[InventoryMetric],
        forecasts: &[ForecastRecord],
    ) -> Vec<SimulatedInventoryStatus> {
        let by_ingredient: HashMap<&str, &ForecastRecord> =
            forecasts.iter().map(|f| (f.ingredient.as_str(), f)).collect();

        let statuses: Vec<SimulatedInventoryStatus> = metrics
            .iter()
            .filter_map(|metric| {
                by_ingredient
                    .get(metric.ingredient_name.as_str())
                    .map(|forecast| self.simulate_one(metric, forecast))
            })
            .collect();

        let critical = statuses
            .iter()
            .filter(|s| s.status == StockStatus::Critical)
            .count();
        tracing::info!(rows = statuses.len(), critical, "模拟库存状态计算完成 (模拟数据)");
        statuses
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::RiskLevel;

    fn metric(reorder_point: f64, safety_stock: f64) -> InventoryMetric {
        InventoryMetric {
            ingredient_name: "rice_g".to_string(),
            avg_monthly_consumption: reorder_point - safety_stock,
            std_monthly_consumption: 0.0,
            max_monthly_consumption: 0.0,
            min_monthly_consumption: 0.0,
            safety_stock,
            reorder_point,
            has_shipment_data: false,
            frequency: None,
            quantity_per_shipment: None,
            risk_level: RiskLevel::Low,
        }
    }

    fn forecast(value: f64) -> ForecastRecord {
        ForecastRecord {
            ingredient: "rice_g".to_string(),
            trend_slope: 0.0,
            avg_monthly_change: 0.0,
            last_value: value,
            forecast_next_month: value,
            volatility: 0.0,
        }
    }

    #[test]
    fn test_simulated_status_fields() {
        let policy = InventoryPolicy::default();
        let simulator = InventorySimulator::new(&policy);

        let status = simulator.simulate_one(&metric(100.0, 20.0), &forecast(60.0));
        assert!(status.is_simulated);
        assert_eq!(status.simulated_current_inventory, 80.0);
        assert_eq!(status.status, StockStatus::Low);
        assert_eq!(status.days_of_supply, Some(40.0));
        assert_eq!(status.days_until_reorder, Some(0.0));
        assert_eq!(status.recommended_order_qty, 40.0);
        assert!(!status.is_overstocked);
    }

    #[test]
    fn test_non_positive_forecast_has_no_days() {
        let policy = InventoryPolicy::default();
        let simulator = InventorySimulator::new(&policy);

        let status = simulator.simulate_one(&metric(100.0, 20.0), &forecast(-5.0));
        assert_eq!(status.days_of_supply, None);
        assert_eq!(status.days_until_reorder, None);
        assert!(status.is_overstocked);
    }

    #[test]
    fn test_classify() {
        let policy = InventoryPolicy::default();
        let simulator = InventorySimulator::new(&policy);
        assert_eq!(simulator.classify(101.0, 100.0), StockStatus::Good);
        assert_eq!(simulator.classify(100.0, 100.0), StockStatus::Low);
        assert_eq!(simulator.classify(50.0, 100.0), StockStatus::Critical);
    }

    #[test]
    fn test_only_ingredients_with_forecast() {
        let policy = InventoryPolicy::default();
        let simulator = InventorySimulator::new(&policy);
        let mut other = metric(10.0, 2.0);
        other.ingredient_name = "cilantro".to_string();

        let statuses = simulator.simulate(&[metric(100.0, 20.0), other], &[forecast(60.0)]);
        assert_eq!(statuses.len(), 1);
        assert_eq!(statuses[0].ingredient, "rice_g");
    }
}
