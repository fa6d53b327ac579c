// ==========================================
// 餐厅库存智能分析 - 配置层
// ==========================================
// 职责: 策略阈值、名称映射、输入输出路径
// 存储: JSON 配置文件,缺省项回填默认值
// ==========================================

pub mod config_manager;
pub mod error;
pub mod inventory_policy;
pub mod shipment_mapping;

// 重导出核心配置类型
pub use config_manager::{config_keys, ConfigManager, PipelineConfig, PipelinePaths};
pub use error::{ConfigError, ConfigResult};
pub use inventory_policy::InventoryPolicy;
pub use shipment_mapping::ShipmentNameMapping;
