// ==========================================
// 餐厅库存智能分析 - 库存策略参数
// ==========================================
// 职责: 指标引擎使用的全部策略阈值
// 说明: 阈值是业务策略,不是推导常数; 默认值与看板现有口径一致
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use serde::{Deserialize, Serialize};

// ===== 默认值 =====
pub const DEFAULT_SERVICE_LEVEL_Z: f64 = 1.65; // 单侧 95% 服务水平
pub const DEFAULT_SAFETY_STOCK_FALLBACK_RATIO: f64 = 0.2;
pub const DEFAULT_RISK_HIGH_RATIO: f64 = 0.5;
pub const DEFAULT_RISK_MEDIUM_RATIO: f64 = 0.3;
pub const DEFAULT_ANOMALY_Z_THRESHOLD: f64 = 2.0;
pub const DEFAULT_ANOMALY_MIN_MONTHS: usize = 3;
pub const DEFAULT_FORECAST_MIN_MONTHS: usize = 4;
pub const DEFAULT_GROWTH_SIGNIFICANCE_PCT: f64 = 20.0;
pub const DEFAULT_SIMULATED_INVENTORY_RATIO: f64 = 0.8;
pub const DEFAULT_DAYS_PER_MONTH: f64 = 30.0;
pub const DEFAULT_LOW_STOCK_RATIO: f64 = 0.5;
pub const DEFAULT_OVERSTOCK_RATIO: f64 = 1.5;

/// 库存策略参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryPolicy {
    /// 安全库存 z 值 (std > 0 时: safety = z × std)
    pub service_level_z: f64,

    /// std 为 0 或无定义时: safety = ratio × avg
    pub safety_stock_fallback_ratio: f64,

    /// std > ratio × avg 判定 HIGH
    pub risk_high_ratio: f64,

    /// std > ratio × avg 判定 MEDIUM
    pub risk_medium_ratio: f64,

    /// z > threshold 判定异常
    pub anomaly_z_threshold: f64,

    /// 异常检测最少有效月份数
    pub anomaly_min_months: usize,

    /// 趋势预测最少有效月份数
    pub forecast_min_months: usize,

    /// |增长率| > pct 视为显著
    pub growth_significance_pct: f64,

    /// 模拟当前库存 = ratio × 再订货点
    pub simulated_inventory_ratio: f64,

    /// 月消耗折算日消耗的天数
    pub days_per_month: f64,

    /// 模拟库存 > ratio × 再订货点 判定 Low (否则 Critical)
    pub low_stock_ratio: f64,

    /// 模拟库存 > ratio × 预测消耗 判定积压
    pub overstock_ratio: f64,
}

impl Default for InventoryPolicy {
    fn default() -> Self {
        Self {
            service_level_z: DEFAULT_SERVICE_LEVEL_Z,
            safety_stock_fallback_ratio: DEFAULT_SAFETY_STOCK_FALLBACK_RATIO,
            risk_high_ratio: DEFAULT_RISK_HIGH_RATIO,
            risk_medium_ratio: DEFAULT_RISK_MEDIUM_RATIO,
            anomaly_z_threshold: DEFAULT_ANOMALY_Z_THRESHOLD,
            anomaly_min_months: DEFAULT_ANOMALY_MIN_MONTHS,
            forecast_min_months: DEFAULT_FORECAST_MIN_MONTHS,
            growth_significance_pct: DEFAULT_GROWTH_SIGNIFICANCE_PCT,
            simulated_inventory_ratio: DEFAULT_SIMULATED_INVENTORY_RATIO,
            days_per_month: DEFAULT_DAYS_PER_MONTH,
            low_stock_ratio: DEFAULT_LOW_STOCK_RATIO,
            overstock_ratio: DEFAULT_OVERSTOCK_RATIO,
        }
    }
}

impl InventoryPolicy {
    /// 校验参数组合
    ///
    /// # 规则
    /// - 所有比例/阈值为有限非负数
    /// - risk_high_ratio >= risk_medium_ratio (分档不重叠)
    /// - 最少月份数 >= 1; 预测至少需要 2 个点才能拟合斜率
    /// - days_per_month > 0
    pub fn validate(&self) -> ConfigResult<()> {
        let non_negative = [
            ("service_level_z", self.service_level_z),
            ("safety_stock_fallback_ratio", self.safety_stock_fallback_ratio),
            ("risk_high_ratio", self.risk_high_ratio),
            ("risk_medium_ratio", self.risk_medium_ratio),
            ("anomaly_z_threshold", self.anomaly_z_threshold),
            ("growth_significance_pct", self.growth_significance_pct),
            ("simulated_inventory_ratio", self.simulated_inventory_ratio),
            ("low_stock_ratio", self.low_stock_ratio),
            ("overstock_ratio", self.overstock_ratio),
        ];
        for (key, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::ValidationError {
                    key: key.to_string(),
                    message: format!("必须为有限非负数,实际 {}", value),
                });
            }
        }

        if self.risk_high_ratio < self.risk_medium_ratio {
            return Err(ConfigError::ValidationError {
                key: "risk_high_ratio".to_string(),
                message: format!(
                    "HIGH 阈值 {} 不能小于 MEDIUM 阈值 {}",
                    self.risk_high_ratio, self.risk_medium_ratio
                ),
            });
        }

        if self.anomaly_min_months < 1 {
            return Err(ConfigError::ValidationError {
                key: "anomaly_min_months".to_string(),
                message: "至少为 1".to_string(),
            });
        }

        if self.forecast_min_months < 2 {
            return Err(ConfigError::ValidationError {
                key: "forecast_min_months".to_string(),
                message: "至少为 2 (线性拟合需要两个点)".to_string(),
            });
        }

        if !self.days_per_month.is_finite() || self.days_per_month <= 0.0 {
            return Err(ConfigError::ValidationError {
                key: "days_per_month".to_string(),
                message: format!("必须大于 0,实际 {}", self.days_per_month),
            });
        }

        Ok(())
    }
}
