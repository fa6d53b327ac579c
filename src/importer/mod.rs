// ==========================================
// 餐厅库存智能分析 - 导入层
// ==========================================
// 职责: 外部文件 → 领域结构
// 支持: Excel, CSV
// ==========================================

pub mod data_cleaner;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod importer_trait;
pub mod loader;

// 重导出核心类型
pub use data_cleaner::DataCleaner;
pub use error::{ImportError, ImportResult};
pub use field_mapper::FieldMapper;
pub use file_parser::{CsvParser, ExcelParser, UniversalFileParser};
pub use importer_trait::{FileParser, RawRow};
pub use loader::InventoryDataLoader;
