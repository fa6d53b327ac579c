// ==========================================
// 餐厅库存智能分析 - 数据清洗器
// ==========================================
// 职责: 金额 / 销量 / 配方用量 / 到货频率 / 表头 标准化
// 规则:
// - 空白数值单元格 → 0
// - 销售数值无法解析 → 报错 (fail fast)
// - 配方用量无法解析 → 0 并告警
// ==========================================

use crate::domain::types::ShipmentFrequency;
use crate::importer::error::{ImportError, ImportResult};

pub struct DataCleaner;

impl DataCleaner {
    /// 金额清洗: "$1,234.56" → 1234.56
    pub fn clean_amount(&self, value: &str, row: usize, field: &str) -> ImportResult<f64> {
        let cleaned = value.replace(['$', ','], "");
        let cleaned = cleaned.trim();
        if cleaned.is_empty() {
            return Ok(0.0);
        }
        cleaned
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| ImportError::TypeConversionError {
                row,
                field: field.to_string(),
                message: format!("无法解析为金额: {}", value),
            })
    }

    /// 销量清洗: "1,234" → 1234
    ///
    /// 带小数的销量 (Excel 数值单元格) 截断取整; 负数报错
    pub fn clean_count(&self, value: &str, row: usize, field: &str) -> ImportResult<u64> {
        let cleaned = value.replace(',', "");
        let cleaned = cleaned.trim();
        if cleaned.is_empty() {
            return Ok(0);
        }
        let conversion_error = |message: String| ImportError::TypeConversionError {
            row,
            field: field.to_string(),
            message,
        };

        let parsed = cleaned
            .parse::<f64>()
            .map_err(|_| conversion_error(format!("无法解析为销量: {}", value)))?;
        if !parsed.is_finite() || parsed < 0.0 {
            return Err(conversion_error(format!("销量必须为非负数: {}", value)));
        }
        Ok(parsed.trunc() as u64)
    }

    /// 配方单位用量清洗
    ///
    /// 空白或非数值 → 0 (视为不使用); 负数同样按 0 处理
    pub fn clean_recipe_amount(&self, value: &str, item_name: &str, ingredient: &str) -> f64 {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return 0.0;
        }
        match trimmed.parse::<f64>() {
            Ok(v) if v.is_finite() && v >= 0.0 => v,
            _ => {
                tracing::warn!(
                    item_name = %item_name,
                    ingredient = %ingredient,
                    value = %value,
                    "配方用量无法解析,按 0 处理"
                );
                0.0
            }
        }
    }

    /// 到货频率清洗 (TRIM + 小写 + 校验)
    pub fn clean_frequency(&self, value: &str, row: usize) -> ImportResult<ShipmentFrequency> {
        ShipmentFrequency::parse(&value.trim().to_lowercase()).ok_or_else(|| {
            ImportError::UnknownFrequency {
                row,
                value: value.to_string(),
            }
        })
    }

    /// 表头标准化: 去空白,小写,非字母数字折叠为单个下划线
    ///
    /// 例: "Chicken Wings (pcs)" → "chicken_wings_pcs"
    pub fn normalize_header(&self, header: &str) -> String {
        let mut normalized = String::with_capacity(header.len());
        let mut pending_underscore = false;
        for ch in header.trim().chars() {
            if ch.is_alphanumeric() {
                if pending_underscore && !normalized.is_empty() {
                    normalized.push('_');
                }
                pending_underscore = false;
                normalized.extend(ch.to_lowercase());
            } else {
                pending_underscore = true;
            }
        }
        normalized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_amount() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.clean_amount("$1,234.56", 1, "Amount").unwrap(), 1234.56);
        assert_eq!(cleaner.clean_amount(" 800 ", 1, "Amount").unwrap(), 800.0);
        assert_eq!(cleaner.clean_amount("", 1, "Amount").unwrap(), 0.0);
        assert!(matches!(
            cleaner.clean_amount("n/a", 7, "Amount"),
            Err(ImportError::TypeConversionError { row: 7, .. })
        ));
    }

    #[test]
    fn test_clean_count() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.clean_count("1,234", 1, "Count").unwrap(), 1234);
        assert_eq!(cleaner.clean_count("12.0", 1, "Count").unwrap(), 12);
        assert_eq!(cleaner.clean_count("", 1, "Count").unwrap(), 0);
        assert!(cleaner.clean_count("-3", 1, "Count").is_err());
        assert!(cleaner.clean_count("abc", 1, "Count").is_err());
    }

    #[test]
    fn test_clean_recipe_amount_coerces_to_zero() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.clean_recipe_amount("150", "A", "beef"), 150.0);
        assert_eq!(cleaner.clean_recipe_amount("", "A", "beef"), 0.0);
        assert_eq!(cleaner.clean_recipe_amount("some", "A", "beef"), 0.0);
    }

    #[test]
    fn test_clean_frequency() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.clean_frequency(" Weekly ", 1).unwrap(), ShipmentFrequency::Weekly);
        assert!(matches!(
            cleaner.clean_frequency("daily", 3),
            Err(ImportError::UnknownFrequency { row: 3, .. })
        ));
    }

    #[test]
    fn test_normalize_header() {
        let cleaner = DataCleaner;
        assert_eq!(cleaner.normalize_header("Chicken Wings (pcs)"), "chicken_wings_pcs");
        assert_eq!(cleaner.normalize_header(" Rice(g) "), "rice_g");
        assert_eq!(cleaner.normalize_header("egg_count"), "egg_count");
    }
}
