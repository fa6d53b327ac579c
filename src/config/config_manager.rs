// ==========================================
// 餐厅库存智能分析 - 配置管理器
// ==========================================
// 职责: 配置加载、查询、默认值回填、校验
// 存储: JSON 配置文件 (扁平 key-value)
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::config::inventory_policy::InventoryPolicy;
use crate::config::shipment_mapping::ShipmentNameMapping;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

// ==========================================
// PipelinePaths - 输入输出路径
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelinePaths {
    pub sales_path: PathBuf,
    pub recipes_path: PathBuf,
    pub shipments_path: Option<PathBuf>, // None = 不加载到货数据
    pub output_dir: PathBuf,
    pub sqlite_path: Option<PathBuf>,    // None = 不落库
}

// ==========================================
// PipelineConfig - 单次运行的完整配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    pub policy: InventoryPolicy,
    pub shipment_mapping: ShipmentNameMapping,
    pub paths: PipelinePaths,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            policy: InventoryPolicy::default(),
            shipment_mapping: ShipmentNameMapping::default(),
            paths: PipelinePaths {
                sales_path: PathBuf::from(defaults::SALES_PATH),
                recipes_path: PathBuf::from(defaults::RECIPES_PATH),
                shipments_path: Some(PathBuf::from(defaults::SHIPMENTS_PATH)),
                output_dir: PathBuf::from(defaults::OUTPUT_DIR),
                sqlite_path: None,
            },
        }
    }
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ConfigManager {
    values: HashMap<String, String>,
}

impl ConfigManager {
    /// 创建空配置 (全部取默认值)
    pub fn new() -> Self {
        Self::default()
    }

    /// 从 JSON 配置文件加载
    ///
    /// # 参数
    /// - path: 配置文件路径,内容为扁平 JSON 对象
    pub fn from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::ConfigFileReadError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;
        let manager = Self::from_json_str(&content)?;
        tracing::info!(path = %path.display(), keys = manager.values.len(), "配置文件已加载");
        Ok(manager)
    }

    /// 从 JSON 字符串加载
    ///
    /// 非字符串值 (数字/布尔/对象) 按 JSON 文本保存,读取时再解析
    pub fn from_json_str(content: &str) -> ConfigResult<Self> {
        let raw: serde_json::Map<String, serde_json::Value> = serde_json::from_str(content)?;

        let values = raw
            .into_iter()
            .map(|(key, value)| {
                let text = match value {
                    serde_json::Value::String(s) => s,
                    serde_json::Value::Null => String::new(),
                    other => other.to_string(),
                };
                (key, text)
            })
            .collect();

        Ok(Self { values })
    }

    /// 覆写单个配置项
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.values.insert(key.to_string(), value.into());
    }

    /// 读取配置值
    pub fn get_config_value(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// 读取配置值,带默认值
    fn get_config_or_default(&self, key: &str, default: &str) -> String {
        self.get_config_value(key)
            .map(str::to_string)
            .unwrap_or_else(|| default.to_string())
    }

    fn parse_f64(&self, key: &str, default: f64) -> ConfigResult<f64> {
        match self.get_config_value(key) {
            None => Ok(default),
            Some(raw) => raw.trim().parse::<f64>().map_err(|e| ConfigError::ConfigValueError {
                key: key.to_string(),
                value: raw.to_string(),
                message: e.to_string(),
            }),
        }
    }

    fn parse_usize(&self, key: &str, default: usize) -> ConfigResult<usize> {
        match self.get_config_value(key) {
            None => Ok(default),
            Some(raw) => raw.trim().parse::<usize>().map_err(|e| ConfigError::ConfigValueError {
                key: key.to_string(),
                value: raw.to_string(),
                message: e.to_string(),
            }),
        }
    }

    /// 可选路径: 缺省取默认值,显式空字符串表示关闭
    fn optional_path(&self, key: &str, default: Option<&str>) -> Option<PathBuf> {
        match self.get_config_value(key) {
            Some(raw) if raw.trim().is_empty() => None,
            Some(raw) => Some(PathBuf::from(raw.trim())),
            None => default.map(PathBuf::from),
        }
    }

    // ==========================================
    // 分组读取
    // ==========================================

    /// 读取库存策略参数 (已校验)
    pub fn get_inventory_policy(&self) -> ConfigResult<InventoryPolicy> {
        let base = InventoryPolicy::default();
        let policy = InventoryPolicy {
            service_level_z: self.parse_f64(config_keys::SERVICE_LEVEL_Z, base.service_level_z)?,
            safety_stock_fallback_ratio: self.parse_f64(
                config_keys::SAFETY_STOCK_FALLBACK_RATIO,
                base.safety_stock_fallback_ratio,
            )?,
            risk_high_ratio: self.parse_f64(config_keys::RISK_HIGH_RATIO, base.risk_high_ratio)?,
            risk_medium_ratio: self
                .parse_f64(config_keys::RISK_MEDIUM_RATIO, base.risk_medium_ratio)?,
            anomaly_z_threshold: self
                .parse_f64(config_keys::ANOMALY_Z_THRESHOLD, base.anomaly_z_threshold)?,
            anomaly_min_months: self
                .parse_usize(config_keys::ANOMALY_MIN_MONTHS, base.anomaly_min_months)?,
            forecast_min_months: self
                .parse_usize(config_keys::FORECAST_MIN_MONTHS, base.forecast_min_months)?,
            growth_significance_pct: self.parse_f64(
                config_keys::GROWTH_SIGNIFICANCE_PCT,
                base.growth_significance_pct,
            )?,
            simulated_inventory_ratio: self.parse_f64(
                config_keys::SIMULATED_INVENTORY_RATIO,
                base.simulated_inventory_ratio,
            )?,
            days_per_month: self.parse_f64(config_keys::DAYS_PER_MONTH, base.days_per_month)?,
            low_stock_ratio: self.parse_f64(config_keys::LOW_STOCK_RATIO, base.low_stock_ratio)?,
            overstock_ratio: self.parse_f64(config_keys::OVERSTOCK_RATIO, base.overstock_ratio)?,
        };
        policy.validate()?;
        Ok(policy)
    }

    /// 读取到货名称映射
    ///
    /// 配置格式为 JSON: {"Beef": "braised_beef_g", ...}
    /// 未配置时使用默认映射表
    pub fn get_shipment_name_mapping(&self) -> ConfigResult<ShipmentNameMapping> {
        match self.get_config_value(config_keys::SHIPMENT_NAME_MAPPING) {
            None => Ok(ShipmentNameMapping::default()),
            Some(raw) => {
                let pairs: BTreeMap<String, String> =
                    serde_json::from_str(raw).map_err(|e| ConfigError::ConfigValueError {
                        key: config_keys::SHIPMENT_NAME_MAPPING.to_string(),
                        value: raw.to_string(),
                        message: e.to_string(),
                    })?;
                Ok(ShipmentNameMapping::from_pairs(pairs))
            }
        }
    }

    /// 读取输入输出路径
    pub fn get_pipeline_paths(&self) -> PipelinePaths {
        PipelinePaths {
            sales_path: PathBuf::from(
                self.get_config_or_default(config_keys::SALES_PATH, defaults::SALES_PATH),
            ),
            recipes_path: PathBuf::from(
                self.get_config_or_default(config_keys::RECIPES_PATH, defaults::RECIPES_PATH),
            ),
            shipments_path: self
                .optional_path(config_keys::SHIPMENTS_PATH, Some(defaults::SHIPMENTS_PATH)),
            output_dir: PathBuf::from(
                self.get_config_or_default(config_keys::OUTPUT_DIR, defaults::OUTPUT_DIR),
            ),
            sqlite_path: self.optional_path(config_keys::SQLITE_PATH, None),
        }
    }

    /// 组装完整运行配置
    pub fn pipeline_config(&self) -> ConfigResult<PipelineConfig> {
        Ok(PipelineConfig {
            policy: self.get_inventory_policy()?,
            shipment_mapping: self.get_shipment_name_mapping()?,
            paths: self.get_pipeline_paths(),
        })
    }

    /// 获取所有显式配置项的快照 (JSON,按 key 排序)
    ///
    /// # 用途
    /// - 随输出表一起落盘,保证结果可追溯
    pub fn get_config_snapshot(&self) -> ConfigResult<String> {
        let sorted: BTreeMap<&String, &String> = self.values.iter().collect();
        Ok(serde_json::to_string(&sorted)?)
    }
}

// ==========================================
// 默认路径
// ==========================================
pub mod defaults {
    pub const SALES_PATH: &str = "cleaned_data/monthly_sales_item.csv";
    pub const RECIPES_PATH: &str = "cleaned_data/ingredient_usage_cleaned.csv";
    pub const SHIPMENTS_PATH: &str = "cleaned_data/shipment_data_cleaned.csv";
    pub const OUTPUT_DIR: &str = "processed_data";
}

// ==========================================
// 配置键常量
// ==========================================
pub mod config_keys {
    // 安全库存
    pub const SERVICE_LEVEL_Z: &str = "service_level_z";
    pub const SAFETY_STOCK_FALLBACK_RATIO: &str = "safety_stock_fallback_ratio";

    // 风险分档
    pub const RISK_HIGH_RATIO: &str = "risk_high_ratio";
    pub const RISK_MEDIUM_RATIO: &str = "risk_medium_ratio";

    // 异常检测
    pub const ANOMALY_Z_THRESHOLD: &str = "anomaly_z_threshold";
    pub const ANOMALY_MIN_MONTHS: &str = "anomaly_min_months";

    // 趋势预测
    pub const FORECAST_MIN_MONTHS: &str = "forecast_min_months";
    pub const GROWTH_SIGNIFICANCE_PCT: &str = "growth_significance_pct";

    // 模拟库存
    pub const SIMULATED_INVENTORY_RATIO: &str = "simulated_inventory_ratio";
    pub const DAYS_PER_MONTH: &str = "days_per_month";
    pub const LOW_STOCK_RATIO: &str = "low_stock_ratio";
    pub const OVERSTOCK_RATIO: &str = "overstock_ratio";

    // 到货名称映射 (JSON)
    pub const SHIPMENT_NAME_MAPPING: &str = "shipment_name_mapping";

    // 路径
    pub const SALES_PATH: &str = "sales_path";
    pub const RECIPES_PATH: &str = "recipes_path";
    pub const SHIPMENTS_PATH: &str = "shipments_path";
    pub const OUTPUT_DIR: &str = "output_dir";
    pub const SQLITE_PATH: &str = "sqlite_path";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_config_uses_defaults() {
        let manager = ConfigManager::new();
        let config = manager.pipeline_config().unwrap();
        assert_eq!(config, PipelineConfig::default());
    }

    #[test]
    fn test_numeric_values_accept_json_numbers() {
        let manager = ConfigManager::from_json_str(
            r#"{"service_level_z": 2.05, "forecast_min_months": "5", "sqlite_path": "out.db"}"#,
        )
        .unwrap();

        let config = manager.pipeline_config().unwrap();
        assert_eq!(config.policy.service_level_z, 2.05);
        assert_eq!(config.policy.forecast_min_months, 5);
        assert_eq!(config.paths.sqlite_path, Some(PathBuf::from("out.db")));
    }

    #[test]
    fn test_invalid_number_reports_key() {
        let manager = ConfigManager::from_json_str(r#"{"risk_high_ratio": "high"}"#).unwrap();
        let err = manager.get_inventory_policy().unwrap_err();
        assert!(matches!(err, ConfigError::ConfigValueError { ref key, .. } if key == "risk_high_ratio"));
    }

    #[test]
    fn test_empty_shipments_path_disables_shipments() {
        let mut manager = ConfigManager::new();
        manager.set(config_keys::SHIPMENTS_PATH, "");
        assert_eq!(manager.get_pipeline_paths().shipments_path, None);
    }

    #[test]
    fn test_shipment_mapping_override() {
        let manager = ConfigManager::from_json_str(
            r#"{"shipment_name_mapping": {"Pork": "braised_pork_g"}}"#,
        )
        .unwrap();
        let mapping = manager.get_shipment_name_mapping().unwrap();
        assert_eq!(mapping.len(), 1);
        assert_eq!(mapping.usage_column_for("Pork"), Some("braised_pork_g"));
    }

    #[test]
    fn test_config_snapshot_sorted() {
        let mut manager = ConfigManager::new();
        manager.set("b_key", "2");
        manager.set("a_key", "1");
        assert_eq!(
            manager.get_config_snapshot().unwrap(),
            r#"{"a_key":"1","b_key":"2"}"#
        );
    }
}
