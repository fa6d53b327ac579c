// ==========================================
// 餐厅库存智能分析 - 领域类型定义
// ==========================================
// 月份口径: 固定 6 个月 (May ~ October)
// 风险等级: 波动率分档 (LOW / MEDIUM / HIGH)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 月份 (Month)
// ==========================================
// 红线: 排序按固定日历顺序,不按字典序
// 序列化格式: 与销售导出一致的英文月份全称
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Month {
    May,
    June,
    July,
    August,
    September,
    October,
}

impl Month {
    /// 日历顺序的全部月份
    pub const ALL: [Month; 6] = [
        Month::May,
        Month::June,
        Month::July,
        Month::August,
        Month::September,
        Month::October,
    ];

    pub fn first() -> Month {
        Month::ALL[0]
    }

    pub fn last() -> Month {
        Month::ALL[Month::ALL.len() - 1]
    }

    /// 从月份标签解析 (忽略大小写与首尾空白)
    ///
    /// 同时接受三字母缩写 (如 "Aug")
    pub fn parse(label: &str) -> Option<Month> {
        match label.trim().to_lowercase().as_str() {
            "may" => Some(Month::May),
            "june" | "jun" => Some(Month::June),
            "july" | "jul" => Some(Month::July),
            "august" | "aug" => Some(Month::August),
            "september" | "sep" | "sept" => Some(Month::September),
            "october" | "oct" => Some(Month::October),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Month::May => "May",
            Month::June => "June",
            Month::July => "July",
            Month::August => "August",
            Month::September => "September",
            Month::October => "October",
        }
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 风险等级 (Risk Level)
// ==========================================
// 判定口径: std 与 avg 的比值 (严格大于)
// 顺序: Low < Medium < High
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RiskLevel {
    Low,    // 平稳
    Medium, // 关注
    High,   // 波动大
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "LOW"),
            RiskLevel::Medium => write!(f, "MEDIUM"),
            RiskLevel::High => write!(f, "HIGH"),
        }
    }
}

// ==========================================
// 到货频率 (Shipment Frequency)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ShipmentFrequency {
    Weekly,   // 每周
    Biweekly, // 每两周
    Monthly,  // 每月
}

impl ShipmentFrequency {
    /// 从字符串解析 (TRIM + 小写后精确匹配)
    pub fn parse(value: &str) -> Option<ShipmentFrequency> {
        match value.trim().to_lowercase().as_str() {
            "weekly" => Some(ShipmentFrequency::Weekly),
            "biweekly" => Some(ShipmentFrequency::Biweekly),
            "monthly" => Some(ShipmentFrequency::Monthly),
            _ => None,
        }
    }
}

impl fmt::Display for ShipmentFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ShipmentFrequency::Weekly => write!(f, "weekly"),
            ShipmentFrequency::Biweekly => write!(f, "biweekly"),
            ShipmentFrequency::Monthly => write!(f, "monthly"),
        }
    }
}

// ==========================================
// 模拟库存状态 (Stock Status)
// ==========================================
// 注意: 基于模拟库存推算,不是实际盘点
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StockStatus {
    Good,
    Low,
    Critical,
}

impl fmt::Display for StockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StockStatus::Good => write!(f, "Good"),
            StockStatus::Low => write!(f, "Low"),
            StockStatus::Critical => write!(f, "Critical"),
        }
    }
}
