// ==========================================
// 餐厅库存智能分析 - 趋势与下月预测
// ==========================================
// 输出两套相互独立的趋势估计:
// - trend_slope: 一阶最小二乘斜率 (x = 0..n-1)
// - avg_monthly_change: 相邻月份差分均值
// forecast_next_month = last_value + avg_monthly_change (与斜率无关)
// 两者不做调和,由下游自行取舍
// ==========================================

use crate::config::inventory_policy::InventoryPolicy;
use crate::domain::consumption::MonthlyIngredientAggregate;
use crate::domain::metrics::ForecastRecord;
use crate::domain::types::Month;
use crate::engine::consumption::series_by_ingredient;
use crate::engine::stats::{linear_slope, mean, mean_diff, safe_div, sample_std};

pub struct TrendForecaster<'a> {
    policy: &'a InventoryPolicy,
}

impl<'a> TrendForecaster<'a> {
    pub fn new(policy: &'a InventoryPolicy) -> Self {
        Self { policy }
    }

    /// 单个食材的趋势预测
    ///
    /// 有效月份 < forecast_min_months 时返回 None
    pub fn forecast_series(&self, ingredient: &str, points: &[(Month, f64)]) -> Option<ForecastRecord> {
        if points.len() < self.policy.forecast_min_months {
            return None;
        }

        let values: Vec<f64> = points.iter().map(|(_, v)| *v).collect();
        let last_value = *values.last()?;
        let trend_slope = linear_slope(&values)?;
        let avg_monthly_change = mean_diff(&values).unwrap_or(0.0);

        let m = mean(&values)?;
        let volatility = if m > 0.0 {
            sample_std(&values)
                .and_then(|std| safe_div(std, m))
                .unwrap_or(0.0)
        } else {
            0.0
        };

        Some(ForecastRecord {
            ingredient: ingredient.to_string(),
            trend_slope,
            avg_monthly_change,
            last_value,
            forecast_next_month: last_value + avg_monthly_change,
            volatility,
        })
    }

    /// 全部食材的趋势预测,按 forecast_next_month 降序输出
    pub fn forecast(&self, aggregates: &[MonthlyIngredientAggregate]) -> Vec<ForecastRecord> {
        let mut forecasts: Vec<ForecastRecord> = series_by_ingredient(aggregates)
            .iter()
            .filter_map(|(ingredient, points)| self.forecast_series(ingredient, points))
            .collect();

        forecasts.sort_by(|a, b| b.forecast_next_month.total_cmp(&a.forecast_next_month));

        tracing::info!(forecasts = forecasts.len(), "趋势预测完成");
        forecasts
    }
}
