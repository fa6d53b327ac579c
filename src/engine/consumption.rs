// ==========================================
// 餐厅库存智能分析 - 消耗聚合引擎
// ==========================================
// 职责: (菜品, 月份, 销量) × (食材, 单位用量) → 消耗明细 → 月度聚合
// 输入: 配方匹配结果
// 输出: ConsumptionRecord 明细 + MonthlyIngredientAggregate
// 红线:
// - 单位用量为 0 视为不使用,不生成 0 消耗记录
// - 销售额全额归属到每一种食材 (不拆分)
// - 输出按 (月份日历顺序, 食材名) 排序
// ==========================================

use crate::domain::consumption::{ConsumptionRecord, MonthlyIngredientAggregate};
use crate::domain::sales::{RecipeVector, SalesRecord};
use crate::domain::types::Month;
use std::collections::BTreeMap;

/// 月度聚合累加器
#[derive(Debug, Default)]
struct AggregateAccumulator {
    total_consumption: f64,
    total_revenue: f64,
    sales_count: u64,
}

// ==========================================
// ConsumptionAggregator - 消耗聚合引擎
// ==========================================
pub struct ConsumptionAggregator {
    // 无状态引擎
}

impl ConsumptionAggregator {
    pub fn new() -> Self {
        Self {}
    }

    /// 展开单条销售记录的消耗明细
    pub fn expand_record(&self, record: &SalesRecord, recipe: &RecipeVector) -> Vec<ConsumptionRecord> {
        recipe
            .used_ingredients()
            .map(|(ingredient, amount_per_unit)| ConsumptionRecord {
                month: record.month,
                item_name: record.item_name.trim().to_string(),
                units_sold: record.units_sold,
                ingredient_name: ingredient.to_string(),
                amount_per_unit,
                total_consumption: record.units_sold as f64 * amount_per_unit,
                attributed_revenue: record.revenue,
            })
            .collect()
    }

    /// 展开全部已匹配销售记录
    pub fn expand(&self, matched: &[(&SalesRecord, &RecipeVector)]) -> Vec<ConsumptionRecord> {
        let details: Vec<ConsumptionRecord> = matched
            .iter()
            .flat_map(|(record, recipe)| self.expand_record(record, recipe))
            .collect();

        tracing::info!(
            matched_rows = matched.len(),
            consumption_records = details.len(),
            "消耗明细展开完成"
        );
        details
    }

    /// 按 (月份, 食材) 聚合
    ///
    /// # 说明
    /// - 主键唯一,每个键一行
    /// - BTreeMap 键序即输出顺序: Month 按日历顺序,食材按名称
    pub fn aggregate(&self, details: &[ConsumptionRecord]) -> Vec<MonthlyIngredientAggregate> {
        let mut groups: BTreeMap<(Month, &str), AggregateAccumulator> = BTreeMap::new();

        for record in details {
            let acc = groups
                .entry((record.month, record.ingredient_name.as_str()))
                .or_default();
            acc.total_consumption += record.total_consumption;
            acc.total_revenue += record.attributed_revenue;
            acc.sales_count += record.units_sold;
        }

        let aggregates: Vec<MonthlyIngredientAggregate> = groups
            .into_iter()
            .map(|((month, ingredient), acc)| MonthlyIngredientAggregate {
                month,
                ingredient_name: ingredient.to_string(),
                total_consumption: acc.total_consumption,
                sales_count: acc.sales_count,
                total_revenue: acc.total_revenue,
            })
            .collect();

        tracing::info!(rows = aggregates.len(), "月度食材消耗聚合完成");
        aggregates
    }
}

impl Default for ConsumptionAggregator {
    fn default() -> Self {
        Self::new()
    }
}

/// 将月度聚合按食材拆分为日历顺序的序列
///
/// 缺失月份不补 0,直接不出现在序列中
pub fn series_by_ingredient(
    aggregates: &[MonthlyIngredientAggregate],
) -> BTreeMap<String, Vec<(Month, f64)>> {
    let mut series: BTreeMap<String, Vec<(Month, f64)>> = BTreeMap::new();
    for row in aggregates {
        series
            .entry(row.ingredient_name.clone())
            .or_default()
            .push((row.month, row.total_consumption));
    }
    for points in series.values_mut() {
        points.sort_by_key(|(month, _)| *month);
    }
    series
}
