// ==========================================
// 餐厅库存智能分析 - 配方匹配引擎
// ==========================================
// 职责: 销售菜品名 → 配方向量
// 输入: 销售记录 + 配方库
// 输出: 匹配结果 + 未匹配菜品统计
// 红线: 永不报错; 未匹配菜品保留在销售汇总中,只是不产生消耗
// ==========================================

use crate::domain::consumption::ItemSalesMatch;
use crate::domain::sales::{RecipeVector, SalesRecord};
use std::collections::{BTreeSet, HashMap};

// ==========================================
// RecipeBook - 配方库
// ==========================================
// 键: TRIM 后的菜品名
#[derive(Debug, Clone, Default)]
pub struct RecipeBook {
    recipes: HashMap<String, RecipeVector>,
}

impl RecipeBook {
    /// 从配方向量构建
    ///
    /// 同名配方只保留第一条
    pub fn from_vectors<I: IntoIterator<Item = RecipeVector>>(vectors: I) -> Self {
        let mut recipes = HashMap::new();
        for vector in vectors {
            let key = normalize_name(&vector.item_name);
            if recipes.contains_key(&key) {
                tracing::warn!(item_name = %key, "配方重复,保留第一条");
                continue;
            }
            recipes.insert(key, vector);
        }
        Self { recipes }
    }

    pub fn get(&self, item_name: &str) -> Option<&RecipeVector> {
        self.recipes.get(&normalize_name(item_name))
    }

    pub fn len(&self) -> usize {
        self.recipes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RecipeVector> {
        self.recipes.values()
    }
}

/// 名称标准化 (仅 TRIM,大小写敏感)
pub fn normalize_name(name: &str) -> String {
    name.trim().to_string()
}

// ==========================================
// MatchOutcome - 单个菜品的匹配结果
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchOutcome<'a> {
    Matched(&'a RecipeVector),
    Unmatched,
}

// ==========================================
// MatchReport - 批量匹配结果
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct MatchReport<'a> {
    /// 已匹配的 (销售记录, 配方)
    pub matched: Vec<(&'a SalesRecord, &'a RecipeVector)>,
    /// 每条销售记录的匹配标记 (含未匹配)
    pub item_matches: Vec<ItemSalesMatch>,
    /// 已匹配的菜品名 (去重)
    pub matched_items: BTreeSet<String>,
    /// 没有配方数据的菜品名 (去重)
    pub unmatched_items: BTreeSet<String>,
    /// 未匹配的销售行数
    pub unmatched_rows: usize,
}

impl MatchReport<'_> {
    /// "无配方数据的菜品数" (数据质量指标)
    pub fn items_without_ingredient_data(&self) -> usize {
        self.unmatched_items.len()
    }
}

// ==========================================
// RecipeMatcher - 配方匹配引擎
// ==========================================
pub struct RecipeMatcher {
    // 无状态引擎
}

impl RecipeMatcher {
    pub fn new() -> Self {
        Self {}
    }

    /// 匹配单个菜品
    pub fn match_item<'a>(&self, item_name: &str, book: &'a RecipeBook) -> MatchOutcome<'a> {
        match book.get(item_name) {
            Some(recipe) => MatchOutcome::Matched(recipe),
            None => MatchOutcome::Unmatched,
        }
    }

    /// 批量匹配销售记录
    ///
    /// # 返回
    /// MatchReport: 匹配对 + 逐行标记 + 未匹配统计
    pub fn match_sales<'a>(&self, sales: &'a [SalesRecord], book: &'a RecipeBook) -> MatchReport<'a> {
        let mut report = MatchReport::default();

        for record in sales {
            let item_name = normalize_name(&record.item_name);
            let outcome = self.match_item(&item_name, book);

            report.item_matches.push(ItemSalesMatch {
                month: record.month,
                item_name: item_name.clone(),
                sales_count: record.units_sold,
                revenue: record.revenue,
                has_ingredient_data: matches!(outcome, MatchOutcome::Matched(_)),
            });

            match outcome {
                MatchOutcome::Matched(recipe) => {
                    report.matched.push((record, recipe));
                    report.matched_items.insert(item_name);
                }
                MatchOutcome::Unmatched => {
                    report.unmatched_rows += 1;
                    report.unmatched_items.insert(item_name);
                }
            }
        }

        if !report.unmatched_items.is_empty() {
            tracing::warn!(
                items = report.unmatched_items.len(),
                rows = report.unmatched_rows,
                "存在无配方数据的菜品,不计入食材消耗"
            );
            tracing::debug!(items = ?report.unmatched_items, "未匹配菜品明细");
        }

        tracing::info!(
            sales_rows = sales.len(),
            matched_rows = report.matched.len(),
            matched_items = report.matched_items.len(),
            "配方匹配完成"
        );

        report
    }
}

impl Default for RecipeMatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::Month;

    fn create_test_book() -> RecipeBook {
        RecipeBook::from_vectors(vec![
            RecipeVector::new("Beef Noodle")
                .with_ingredient("beef_g", 150.0)
                .with_ingredient("noodle_g", 200.0),
            RecipeVector::new(" Fried Rice ").with_ingredient("rice_g", 250.0),
        ])
    }

    #[test]
    fn test_match_item_trims_names() {
        let matcher = RecipeMatcher::new();
        let book = create_test_book();

        assert!(matches!(
            matcher.match_item("  Beef Noodle ", &book),
            MatchOutcome::Matched(r) if r.item_name == "Beef Noodle"
        ));
        assert!(matches!(matcher.match_item("Fried Rice", &book), MatchOutcome::Matched(_)));
    }

    #[test]
    fn test_match_item_is_case_sensitive() {
        let matcher = RecipeMatcher::new();
        let book = create_test_book();
        assert_eq!(matcher.match_item("beef noodle", &book), MatchOutcome::Unmatched);
    }

    #[test]
    fn test_match_sales_counts_unmatched() {
        let matcher = RecipeMatcher::new();
        let book = create_test_book();
        let sales = vec![
            SalesRecord::new(Month::May, "Beef Noodle", 100, 800.0),
            SalesRecord::new(Month::May, "Bubble Tea", 40, 200.0),
            SalesRecord::new(Month::June, "Bubble Tea", 30, 150.0),
            SalesRecord::new(Month::June, "Gift Card", 1, 50.0),
        ];

        let report = matcher.match_sales(&sales, &book);

        assert_eq!(report.matched.len(), 1);
        assert_eq!(report.unmatched_rows, 3);
        assert_eq!(report.items_without_ingredient_data(), 2);
        assert_eq!(report.item_matches.len(), 4);
        assert!(report.item_matches[0].has_ingredient_data);
        assert!(!report.item_matches[1].has_ingredient_data);
    }

    #[test]
    fn test_duplicate_recipe_keeps_first() {
        let book = RecipeBook::from_vectors(vec![
            RecipeVector::new("Dumpling").with_ingredient("flour_g", 30.0),
            RecipeVector::new("Dumpling").with_ingredient("flour_g", 99.0),
        ]);
        assert_eq!(book.len(), 1);
        assert_eq!(book.get("Dumpling").unwrap().ingredients["flour_g"], 30.0);
    }
}
