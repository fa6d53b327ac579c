// ==========================================
// 餐厅库存智能分析 - 库存指标引擎
// ==========================================
// 职责: 安全库存 / 再订货点 / 风险分档
// 输入: 食材档案 + 月度聚合序列
// 输出: InventoryMetric (每种食材一行,每次运行整体重算)
// ==========================================

use crate::config::inventory_policy::InventoryPolicy;
use crate::domain::consumption::{IngredientProfile, MonthlyIngredientAggregate};
use crate::domain::metrics::InventoryMetric;
use crate::domain::types::RiskLevel;
use crate::engine::consumption::series_by_ingredient;
use crate::engine::stats::sample_std;

// ==========================================
// InventoryMetricsEngine - 库存指标引擎
// ==========================================
pub struct InventoryMetricsEngine<'a> {
    policy: &'a InventoryPolicy,
}

impl<'a> InventoryMetricsEngine<'a> {
    pub fn new(policy: &'a InventoryPolicy) -> Self {
        Self { policy }
    }

    // ==========================================
    // 单项计算
    // ==========================================

    /// 安全库存
    ///
    /// # 规则
    /// - std > 0: z × std (z 默认 1.65,约 95% 单侧服务水平)
    /// - 否则: fallback_ratio × avg (单月序列 std 无定义)
    pub fn safety_stock(&self, std_monthly: f64, avg_monthly: f64) -> f64 {
        if std_monthly > 0.0 {
            self.policy.service_level_z * std_monthly
        } else {
            avg_monthly * self.policy.safety_stock_fallback_ratio
        }
    }

    /// 再订货点 = 月均消耗 + 安全库存
    pub fn reorder_point(&self, avg_monthly: f64, safety_stock: f64) -> f64 {
        avg_monthly + safety_stock
    }

    /// 评估风险等级
    ///
    /// 规则 (严格大于,分档不重叠):
    /// - HIGH: std > 0.5 × avg
    /// - MEDIUM: std > 0.3 × avg
    /// - LOW: 其他
    pub fn assess_risk_level(&self, std_monthly: f64, avg_monthly: f64) -> RiskLevel {
        if std_monthly > avg_monthly * self.policy.risk_high_ratio {
            RiskLevel::High
        } else if std_monthly > avg_monthly * self.policy.risk_medium_ratio {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    // ==========================================
    // 批量计算
    // ==========================================

    /// 计算全部食材的库存指标
    ///
    /// # 参数
    /// - `profiles`: 食材档案 (提供 avg 与到货字段)
    /// - `aggregates`: 月度聚合 (提供 std / max / min)
    pub fn compute(
        &self,
        profiles: &[IngredientProfile],
        aggregates: &[MonthlyIngredientAggregate],
    ) -> Vec<InventoryMetric> {
        let series = series_by_ingredient(aggregates);

        let metrics: Vec<InventoryMetric> = profiles
            .iter()
            .filter_map(|profile| {
                let points = series.get(&profile.ingredient_name)?;
                let values: Vec<f64> = points.iter().map(|(_, v)| *v).collect();
                if values.is_empty() {
                    return None;
                }

                let avg = profile.avg_monthly_consumption;
                let std = sample_std(&values).unwrap_or(0.0);
                let max = values.iter().copied().fold(f64::MIN, f64::max);
                let min = values.iter().copied().fold(f64::MAX, f64::min);
                let safety_stock = self.safety_stock(std, avg);

                Some(InventoryMetric {
                    ingredient_name: profile.ingredient_name.clone(),
                    avg_monthly_consumption: avg,
                    std_monthly_consumption: std,
                    max_monthly_consumption: max,
                    min_monthly_consumption: min,
                    safety_stock,
                    reorder_point: self.reorder_point(avg, safety_stock),
                    has_shipment_data: profile.has_shipment_data(),
                    frequency: profile.frequency(),
                    quantity_per_shipment: profile.quantity_per_shipment(),
                    risk_level: self.assess_risk_level(std, avg),
                })
            })
            .collect();

        let high = metrics.iter().filter(|m| m.risk_level == RiskLevel::High).count();
        tracing::info!(ingredients = metrics.len(), high_risk = high, "库存指标计算完成");
        for metric in metrics.iter().filter(|m| m.risk_level == RiskLevel::High) {
            tracing::debug!(
                ingredient = %metric.ingredient_name,
                avg = metric.avg_monthly_consumption,
                std = metric.std_monthly_consumption,
                "高风险食材"
            );
        }
        metrics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::Month;

    fn profile(name: &str, values: &[f64]) -> (IngredientProfile, Vec<MonthlyIngredientAggregate>) {
        let aggregates: Vec<MonthlyIngredientAggregate> = values
            .iter()
            .zip(Month::ALL.iter())
            .map(|(v, m)| MonthlyIngredientAggregate {
                month: *m,
                ingredient_name: name.to_string(),
                total_consumption: *v,
                sales_count: 1,
                total_revenue: 1.0,
            })
            .collect();
        let total: f64 = values.iter().sum();
        let profile = IngredientProfile {
            ingredient_name: name.to_string(),
            total_consumption_6months: total,
            avg_monthly_consumption: total / values.len() as f64,
            months_active: values.len(),
            shipment: None,
        };
        (profile, aggregates)
    }

    #[test]
    fn test_safety_stock_uses_std_when_positive() {
        let policy = InventoryPolicy::default();
        let engine = InventoryMetricsEngine::new(&policy);
        assert!((engine.safety_stock(10.0, 100.0) - 16.5).abs() < 1e-9);
        assert_eq!(engine.safety_stock(0.0, 100.0), 20.0);
    }

    #[test]
    fn test_risk_level_boundaries_are_strict() {
        let policy = InventoryPolicy::default();
        let engine = InventoryMetricsEngine::new(&policy);

        assert_eq!(engine.assess_risk_level(50.0, 100.0), RiskLevel::Medium); // == 0.5 不是 HIGH
        assert_eq!(engine.assess_risk_level(50.1, 100.0), RiskLevel::High);
        assert_eq!(engine.assess_risk_level(30.0, 100.0), RiskLevel::Low); // == 0.3 不是 MEDIUM
        assert_eq!(engine.assess_risk_level(30.1, 100.0), RiskLevel::Medium);
        assert_eq!(engine.assess_risk_level(0.0, 0.0), RiskLevel::Low);
    }

    #[test]
    fn test_constant_series() {
        let policy = InventoryPolicy::default();
        let engine = InventoryMetricsEngine::new(&policy);
        let (p, aggs) = profile("x", &[100.0, 100.0, 100.0, 100.0]);

        let metrics = engine.compute(&[p], &aggs);
        let m = &metrics[0];
        assert_eq!(m.std_monthly_consumption, 0.0);
        assert_eq!(m.safety_stock, 20.0);
        assert_eq!(m.reorder_point, 120.0);
        assert_eq!(m.risk_level, RiskLevel::Low);
    }

    #[test]
    fn test_single_month_falls_back() {
        let policy = InventoryPolicy::default();
        let engine = InventoryMetricsEngine::new(&policy);
        let (p, aggs) = profile("saffron", &[55.0]);

        let metrics = engine.compute(&[p], &aggs);
        assert_eq!(metrics[0].safety_stock, 0.2 * 55.0);
        assert_eq!(metrics[0].max_monthly_consumption, 55.0);
        assert_eq!(metrics[0].min_monthly_consumption, 55.0);
        assert_eq!(metrics[0].risk_level, RiskLevel::Low);
    }

    #[test]
    fn test_volatile_series_is_high_risk() {
        let policy = InventoryPolicy::default();
        let engine = InventoryMetricsEngine::new(&policy);
        let (p, aggs) = profile("chicken_wings_pcs", &[10.0, 200.0, 15.0, 190.0]);

        let metrics = engine.compute(&[p], &aggs);
        let m = &metrics[0];
        assert_eq!(m.risk_level, RiskLevel::High);
        assert!((m.safety_stock - 1.65 * m.std_monthly_consumption).abs() < 1e-9);
        assert_eq!(m.max_monthly_consumption, 200.0);
        assert_eq!(m.min_monthly_consumption, 10.0);
    }
}
