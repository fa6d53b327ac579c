// ==========================================
// 餐厅库存智能分析 - 单位消耗销售额
// ==========================================
// revenue_per_unit = 归属销售额合计 / 消耗合计
// 销售额是全额归属口径 (一道菜的销售额计入其每种食材),
// 结果只能作相对排序,不可解读为成本
// ==========================================

use crate::domain::consumption::MonthlyIngredientAggregate;
use crate::domain::metrics::CostEfficiencyRecord;
use crate::engine::stats::safe_div;
use std::collections::BTreeMap;

pub struct CostEfficiencyAnalyzer {
    // 无状态引擎
}

impl CostEfficiencyAnalyzer {
    pub fn new() -> Self {
        Self {}
    }

    /// 按食材汇总并计算单位消耗销售额,按 revenue_per_unit 降序输出
    pub fn analyze(&self, aggregates: &[MonthlyIngredientAggregate]) -> Vec<CostEfficiencyRecord> {
        let mut totals: BTreeMap<&str, (f64, f64)> = BTreeMap::new();
        for row in aggregates {
            let entry = totals.entry(row.ingredient_name.as_str()).or_insert((0.0, 0.0));
            entry.0 += row.total_consumption;
            entry.1 += row.total_revenue;
        }

        let mut records: Vec<CostEfficiencyRecord> = totals
            .into_iter()
            .map(|(ingredient, (consumption, revenue))| CostEfficiencyRecord {
                ingredient: ingredient.to_string(),
                total_consumption: consumption,
                total_revenue: revenue,
                revenue_per_unit: safe_div(revenue, consumption).unwrap_or(0.0),
            })
            .collect();

        records.sort_by(|a, b| b.revenue_per_unit.total_cmp(&a.revenue_per_unit));

        tracing::info!(ingredients = records.len(), "单位消耗销售额计算完成");
        records
    }
}

impl Default for CostEfficiencyAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}
