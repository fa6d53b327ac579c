// ==========================================
// 餐厅库存智能分析 - 计算流水线错误类型
// ==========================================
// 工具: thiserror 派生宏
// 规则: 输入快照不合法时整次运行拒绝,错误指明具体行/字段
// ==========================================

use crate::config::error::ConfigError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    // ===== 输入快照错误 =====
    #[error("销售数据为空")]
    EmptySales,

    #[error("销售记录非法 (行 {row}, 字段 {field}): {message}")]
    InvalidSalesRecord {
        row: usize,
        field: String,
        message: String,
    },

    #[error("配方非法 (菜品 {item_name}, 食材 {ingredient}): {message}")]
    InvalidRecipe {
        item_name: String,
        ingredient: String,
        message: String,
    },

    #[error("到货档案非法 (食材 {ingredient}): {message}")]
    InvalidShipment { ingredient: String, message: String },

    // ===== 配置错误 =====
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result 类型别名
pub type PipelineResult<T> = Result<T, PipelineError>;
