// ==========================================
// 餐厅库存智能分析 - 首末月增长与波动
// ==========================================
// growth_pct = (末月 - 首月) / 首月 × 100
// 首月/末月取日历首末月 (5 月 / 10 月),任一缺失或首月为 0 时无增长值
// ==========================================

use crate::config::inventory_policy::InventoryPolicy;
use crate::domain::consumption::MonthlyIngredientAggregate;
use crate::domain::metrics::GrowthRecord;
use crate::domain::types::Month;
use crate::engine::consumption::series_by_ingredient;
use crate::engine::stats::{mean, safe_div, sample_std};
use std::cmp::Ordering;

pub struct GrowthAnalyzer<'a> {
    policy: &'a InventoryPolicy,
}

impl<'a> GrowthAnalyzer<'a> {
    pub fn new(policy: &'a InventoryPolicy) -> Self {
        Self { policy }
    }

    /// 单个食材的增长与变异系数
    pub fn analyze_series(&self, ingredient: &str, points: &[(Month, f64)]) -> GrowthRecord {
        let value_at = |month: Month| points.iter().find(|(m, _)| *m == month).map(|(_, v)| *v);
        let first = value_at(Month::first());
        let last = value_at(Month::last());

        let growth_pct = match (first, last) {
            (Some(f), Some(l)) if f > 0.0 => safe_div(l - f, f).map(|r| r * 100.0),
            _ => None,
        };

        let values: Vec<f64> = points.iter().map(|(_, v)| *v).collect();
        let volatility_cv = match (sample_std(&values), mean(&values)) {
            (Some(std), Some(m)) => safe_div(std, m),
            _ => None,
        };

        GrowthRecord {
            ingredient: ingredient.to_string(),
            first_month_consumption: first,
            last_month_consumption: last,
            growth_pct,
            is_significant: growth_pct
                .map(|g| g.abs() > self.policy.growth_significance_pct)
                .unwrap_or(false),
            volatility_cv,
        }
    }

    /// 全部食材,按 |growth_pct| 降序,无增长值的排在最后
    pub fn analyze(&self, aggregates: &[MonthlyIngredientAggregate]) -> Vec<GrowthRecord> {
        let mut records: Vec<GrowthRecord> = series_by_ingredient(aggregates)
            .iter()
            .map(|(ingredient, points)| self.analyze_series(ingredient, points))
            .collect();

        records.sort_by(|a, b| match (a.growth_pct, b.growth_pct) {
            (Some(x), Some(y)) => y.abs().total_cmp(&x.abs()),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });

        let significant = records.iter().filter(|r| r.is_significant).count();
        tracing::info!(ingredients = records.len(), significant, "增长分析完成");
        records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn agg(month: Month, ingredient: &str, consumption: f64) -> MonthlyIngredientAggregate {
        MonthlyIngredientAggregate {
            month,
            ingredient_name: ingredient.to_string(),
            total_consumption: consumption,
            sales_count: 1,
            total_revenue: 1.0,
        }
    }

    #[test]
    fn test_growth_between_calendar_endpoints() {
        let policy = InventoryPolicy::default();
        let analyzer = GrowthAnalyzer::new(&policy);
        let points = vec![(Month::May, 100.0), (Month::July, 500.0), (Month::October, 150.0)];

        let record = analyzer.analyze_series("beef", &points);
        assert_eq!(record.first_month_consumption, Some(100.0));
        assert_eq!(record.last_month_consumption, Some(150.0));
        assert_eq!(record.growth_pct, Some(50.0));
        assert!(record.is_significant);
        assert!(record.volatility_cv.is_some());
    }

    #[test]
    fn test_growth_absent_when_endpoint_missing_or_zero() {
        let policy = InventoryPolicy::default();
        let analyzer = GrowthAnalyzer::new(&policy);

        let missing = analyzer.analyze_series("x", &[(Month::June, 1.0), (Month::October, 2.0)]);
        assert_eq!(missing.growth_pct, None);
        assert!(!missing.is_significant);

        let zero = analyzer.analyze_series("y", &[(Month::May, 0.0), (Month::October, 2.0)]);
        assert_eq!(zero.growth_pct, None);
    }

    #[test]
    fn test_single_month_has_no_volatility() {
        let policy = InventoryPolicy::default();
        let analyzer = GrowthAnalyzer::new(&policy);
        let record = analyzer.analyze_series("x", &[(Month::May, 10.0)]);
        assert_eq!(record.volatility_cv, None);
    }

    #[test]
    fn test_sorted_by_absolute_growth_with_absent_last() {
        let policy = InventoryPolicy::default();
        let analyzer = GrowthAnalyzer::new(&policy);
        let records = analyzer.analyze(&[
            agg(Month::May, "a", 100.0),
            agg(Month::October, "a", 110.0),
            agg(Month::May, "b", 100.0),
            agg(Month::October, "b", 40.0),
            agg(Month::June, "c", 5.0),
        ]);

        let order: Vec<&str> = records.iter().map(|r| r.ingredient.as_str()).collect();
        assert_eq!(order, vec!["b", "a", "c"]);
        assert!(records[0].is_significant);
        assert!(!records[1].is_significant);
    }
}
