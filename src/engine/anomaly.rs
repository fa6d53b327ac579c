// ==========================================
// 餐厅库存智能分析 - 消耗异常检测
// ==========================================
// 方法: 静态窗口 Z-score (总体均值 / 总体标准差),不做季节调整
// 规则:
// - 有效月份 < anomaly_min_months: 跳过,不报告
// - std == 0: 跳过
// - z = |v - mean| / std > threshold: 异常
// ==========================================

use crate::config::inventory_policy::InventoryPolicy;
use crate::domain::consumption::MonthlyIngredientAggregate;
use crate::domain::metrics::AnomalyRecord;
use crate::domain::types::Month;
use crate::engine::consumption::series_by_ingredient;
use crate::engine::stats::{mean, population_std, safe_div};

pub struct AnomalyDetector<'a> {
    policy: &'a InventoryPolicy,
}

impl<'a> AnomalyDetector<'a> {
    pub fn new(policy: &'a InventoryPolicy) -> Self {
        Self { policy }
    }

    /// 检测单个食材的异常月份
    pub fn detect_series(&self, ingredient: &str, points: &[(Month, f64)]) -> Vec<AnomalyRecord> {
        if points.len() < self.policy.anomaly_min_months {
            return Vec::new();
        }

        let values: Vec<f64> = points.iter().map(|(_, v)| *v).collect();
        let (Some(m), Some(std)) = (mean(&values), population_std(&values)) else {
            return Vec::new();
        };
        if std <= 0.0 {
            return Vec::new();
        }

        points
            .iter()
            .filter_map(|(month, value)| {
                let z = (value - m).abs() / std;
                if z > self.policy.anomaly_z_threshold {
                    Some(AnomalyRecord {
                        ingredient: ingredient.to_string(),
                        month: *month,
                        consumption: *value,
                        z_score: z,
                        deviation: safe_div(value - m, m).map(|r| r * 100.0).unwrap_or(0.0),
                    })
                } else {
                    None
                }
            })
            .collect()
    }

    /// 检测全部食材,按 z_score 降序输出
    pub fn detect(&self, aggregates: &[MonthlyIngredientAggregate]) -> Vec<AnomalyRecord> {
        let mut anomalies: Vec<AnomalyRecord> = series_by_ingredient(aggregates)
            .iter()
            .flat_map(|(ingredient, points)| self.detect_series(ingredient, points))
            .collect();

        anomalies.sort_by(|a, b| b.z_score.total_cmp(&a.z_score));

        tracing::info!(anomalies = anomalies.len(), "异常检测完成");
        anomalies
    }
}
