// ==========================================
// 餐厅库存智能分析 - 字段映射器
// ==========================================
// 职责: 源字段 → 领域结构 + 类型转换
// 源表:
// - 月度销售 (菜品级): month / level_name / Count / Amount [/ data_level]
// - 配方用量: item_name + 每种食材一列
// - 到货档案: ingredient / quantity_per_shipment / unit / num_shipments / frequency
// ==========================================

use crate::domain::sales::{RecipeVector, SalesRecord, ShipmentProfile};
use crate::domain::types::Month;
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::importer_trait::RawRow;

// ===== 标准字段名 =====
pub const FIELD_MONTH: &str = "month";
pub const FIELD_ITEM_NAME: &str = "item_name";
pub const FIELD_COUNT: &str = "Count";
pub const FIELD_AMOUNT: &str = "Amount";
pub const FIELD_DATA_LEVEL: &str = "data_level";
pub const FIELD_INGREDIENT: &str = "ingredient";
pub const FIELD_QUANTITY_PER_SHIPMENT: &str = "quantity_per_shipment";
pub const FIELD_UNIT: &str = "unit";
pub const FIELD_NUM_SHIPMENTS: &str = "num_shipments";
pub const FIELD_FREQUENCY: &str = "frequency";

/// 菜品级销售数据的 data_level 取值
const ITEM_LEVEL: &str = "item";

/// 到货表中不属于档案的派生列
const SHIPMENT_DERIVED_COLUMNS: [&str; 1] = ["ingredient_usage_column"];

/// 配方表头标准化后的更正 (原始表头拼写与用量列名不一致)
const RECIPE_COLUMN_CORRECTIONS: [(&str, &str); 2] = [
    ("braised_beef_used_g", "braised_beef_g"),
    ("boychoy_g", "bokchoy_g"),
];

pub struct FieldMapper {
    cleaner: DataCleaner,
}

impl FieldMapper {
    pub fn new() -> Self {
        Self {
            cleaner: DataCleaner,
        }
    }

    // ==========================================
    // 月度销售
    // ==========================================

    /// 映射一行销售数据
    ///
    /// # 返回
    /// - Ok(None): 非菜品级汇总行 (data_level 为 group/category),跳过
    /// - Ok(Some(SalesRecord))
    /// - Err: 缺菜品名 / 缺月份 / 未知月份 / 数值无法解析
    pub fn map_sales_row(&self, row: &RawRow, row_number: usize) -> ImportResult<Option<SalesRecord>> {
        if let Some(level) = self.get_string(row, FIELD_DATA_LEVEL) {
            if !level.eq_ignore_ascii_case(ITEM_LEVEL) {
                tracing::debug!(row = row_number, data_level = %level, "跳过非菜品级销售行");
                return Ok(None);
            }
        }

        let month_label = self.require_string(row, FIELD_MONTH, row_number)?;
        let month = Month::parse(&month_label).ok_or(ImportError::UnknownMonth {
            row: row_number,
            value: month_label.clone(),
        })?;

        let item_name = self.require_string(row, FIELD_ITEM_NAME, row_number)?;
        let units_sold = self.cleaner.clean_count(
            &self.get_string(row, FIELD_COUNT).unwrap_or_default(),
            row_number,
            FIELD_COUNT,
        )?;
        let revenue = self.cleaner.clean_amount(
            &self.get_string(row, FIELD_AMOUNT).unwrap_or_default(),
            row_number,
            FIELD_AMOUNT,
        )?;

        Ok(Some(SalesRecord::new(month, item_name, units_sold, revenue)))
    }

    // ==========================================
    // 配方用量
    // ==========================================

    /// 映射一行配方数据 (菜品名列以外的每一列都是食材)
    pub fn map_recipe_row(&self, row: &RawRow, row_number: usize) -> ImportResult<RecipeVector> {
        let item_name = self.require_string(row, FIELD_ITEM_NAME, row_number)?;
        let item_aliases = Self::aliases(FIELD_ITEM_NAME);

        let mut recipe = RecipeVector::new(item_name.clone());
        for (header, value) in row {
            if item_aliases.contains(&header.as_str()) {
                continue;
            }
            let ingredient = self.ingredient_column_name(header);
            if ingredient.is_empty() {
                continue;
            }
            let amount = self.cleaner.clean_recipe_amount(value, &item_name, &ingredient);
            recipe = recipe.with_ingredient(ingredient, amount);
        }
        Ok(recipe)
    }

    /// 配方表头 → 用量列名
    ///
    /// 例: "braised beef used (g)" → "braised_beef_g"
    pub fn ingredient_column_name(&self, header: &str) -> String {
        let normalized = self.cleaner.normalize_header(header);
        RECIPE_COLUMN_CORRECTIONS
            .iter()
            .find(|(raw, _)| *raw == normalized)
            .map(|(_, corrected)| corrected.to_string())
            .unwrap_or(normalized)
    }

    // ==========================================
    // 到货档案
    // ==========================================

    /// 映射一行到货数据
    pub fn map_shipment_row(&self, row: &RawRow, row_number: usize) -> ImportResult<ShipmentProfile> {
        let ingredient_name = self.require_string(row, FIELD_INGREDIENT, row_number)?;

        let quantity_per_shipment = self.cleaner.clean_amount(
            &self.get_string(row, FIELD_QUANTITY_PER_SHIPMENT).unwrap_or_default(),
            row_number,
            FIELD_QUANTITY_PER_SHIPMENT,
        )?;

        let num_shipments = self.cleaner.clean_count(
            &self.get_string(row, FIELD_NUM_SHIPMENTS).unwrap_or_default(),
            row_number,
            FIELD_NUM_SHIPMENTS,
        )?;
        let num_shipments =
            u32::try_from(num_shipments).map_err(|_| ImportError::TypeConversionError {
                row: row_number,
                field: FIELD_NUM_SHIPMENTS.to_string(),
                message: format!("到货次数超出范围: {}", num_shipments),
            })?;

        let frequency = self
            .cleaner
            .clean_frequency(&self.require_string(row, FIELD_FREQUENCY, row_number)?, row_number)?;

        let extra: Vec<&str> = row
            .keys()
            .map(String::as_str)
            .filter(|k| SHIPMENT_DERIVED_COLUMNS.contains(k))
            .collect();
        if !extra.is_empty() {
            tracing::debug!(row = row_number, columns = ?extra, "忽略到货表派生列");
        }

        Ok(ShipmentProfile {
            ingredient_name,
            quantity_per_shipment,
            unit: self.get_string(row, FIELD_UNIT).unwrap_or_default(),
            frequency,
            num_shipments,
        })
    }

    // ==========================================
    // 取值工具
    // ==========================================

    /// 列名别名
    fn aliases(key: &str) -> &'static [&'static str] {
        match key {
            FIELD_MONTH => &["month", "Month"],
            FIELD_ITEM_NAME => &["item_name", "level_name", "Item Name", "Item name"],
            FIELD_COUNT => &["Count", "count", "units_sold", "sales_count"],
            FIELD_AMOUNT => &["Amount", "amount", "revenue"],
            FIELD_DATA_LEVEL => &["data_level"],
            FIELD_INGREDIENT => &["ingredient", "Ingredient"],
            FIELD_QUANTITY_PER_SHIPMENT => &["quantity_per_shipment", "Quantity per shipment"],
            FIELD_UNIT => &["unit", "Unit of shipment"],
            FIELD_NUM_SHIPMENTS => &["num_shipments", "Number of shipments"],
            FIELD_FREQUENCY => &["frequency", "Frequency"],
            _ => &[],
        }
    }

    /// 提取字符串字段 (按别名顺序取第一个非空值)
    fn get_string(&self, row: &RawRow, key: &str) -> Option<String> {
        Self::aliases(key)
            .iter()
            .filter_map(|alias| row.get(*alias))
            .map(|v| v.trim())
            .find(|v| !v.is_empty())
            .map(str::to_string)
    }

    fn require_string(&self, row: &RawRow, key: &str, row_number: usize) -> ImportResult<String> {
        self.get_string(row, key)
            .ok_or_else(|| ImportError::MissingRequiredField {
                row: row_number,
                field: key.to_string(),
            })
    }
}

impl Default for FieldMapper {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::ShipmentFrequency;

    fn row(pairs: &[(&str, &str)]) -> RawRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_map_sales_row_with_aliases() {
        let mapper = FieldMapper::new();
        let record = mapper
            .map_sales_row(
                &row(&[
                    ("month", "May"),
                    ("Item Name", "Beef Noodle"),
                    ("Count", "1,000"),
                    ("Amount", "$8,000.50"),
                ]),
                1,
            )
            .unwrap()
            .unwrap();

        assert_eq!(record.month, Month::May);
        assert_eq!(record.item_name, "Beef Noodle");
        assert_eq!(record.units_sold, 1000);
        assert_eq!(record.revenue, 8000.5);
    }

    #[test]
    fn test_map_sales_row_skips_non_item_level() {
        let mapper = FieldMapper::new();
        let result = mapper
            .map_sales_row(
                &row(&[("month", "May"), ("data_level", "group"), ("level_name", "Noodles")]),
                1,
            )
            .unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_map_sales_row_fails_fast() {
        let mapper = FieldMapper::new();

        let unknown = mapper.map_sales_row(&row(&[("month", "Dec"), ("level_name", "A")]), 4);
        assert!(matches!(unknown, Err(ImportError::UnknownMonth { row: 4, .. })));

        let missing = mapper.map_sales_row(&row(&[("month", "May"), ("Count", "1")]), 5);
        assert!(matches!(
            missing,
            Err(ImportError::MissingRequiredField { row: 5, ref field }) if field == "item_name"
        ));

        let bad_number = mapper.map_sales_row(
            &row(&[("month", "May"), ("level_name", "A"), ("Count", "many")]),
            6,
        );
        assert!(matches!(bad_number, Err(ImportError::TypeConversionError { row: 6, .. })));
    }

    #[test]
    fn test_map_recipe_row_normalizes_columns() {
        let mapper = FieldMapper::new();
        let recipe = mapper
            .map_recipe_row(
                &row(&[
                    ("Item name", "Beef Noodle"),
                    ("braised beef used (g)", "150"),
                    ("Boychoy(g)", ""),
                    ("Egg(count)", "x"),
                ]),
                1,
            )
            .unwrap();

        assert_eq!(recipe.item_name, "Beef Noodle");
        assert_eq!(recipe.ingredients.get("braised_beef_g"), Some(&150.0));
        assert_eq!(recipe.ingredients.get("bokchoy_g"), Some(&0.0));
        assert_eq!(recipe.ingredients.get("egg_count"), Some(&0.0));
        assert_eq!(recipe.ingredients.len(), 3);
    }

    #[test]
    fn test_map_shipment_row() {
        let mapper = FieldMapper::new();
        let shipment = mapper
            .map_shipment_row(
                &row(&[
                    ("Ingredient", "Beef"),
                    ("Quantity per shipment", "40"),
                    ("Unit of shipment", "lbs"),
                    ("Number of shipments", "4"),
                    ("frequency", "Weekly "),
                    ("ingredient_usage_column", "braised_beef_g"),
                ]),
                1,
            )
            .unwrap();

        assert_eq!(shipment.ingredient_name, "Beef");
        assert_eq!(shipment.quantity_per_shipment, 40.0);
        assert_eq!(shipment.unit, "lbs");
        assert_eq!(shipment.num_shipments, 4);
        assert_eq!(shipment.frequency, ShipmentFrequency::Weekly);
    }

    #[test]
    fn test_map_shipment_row_unknown_frequency() {
        let mapper = FieldMapper::new();
        let result = mapper.map_shipment_row(
            &row(&[("ingredient", "Rice"), ("frequency", "daily")]),
            2,
        );
        assert!(matches!(result, Err(ImportError::UnknownFrequency { row: 2, .. })));
    }
}
