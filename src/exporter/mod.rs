// ==========================================
// 餐厅库存智能分析 - 输出层
// ==========================================
// 职责: 流水线输出 → CSV 目录 / SQLite
// 红线: 整体替换,不做增量更新
// ==========================================

pub mod csv_writer;
pub mod error;
pub mod sqlite_store;
pub mod tables;

pub use csv_writer::CsvTableWriter;
pub use error::{ExportError, ExportResult};
pub use sqlite_store::SqliteTableStore;
pub use tables::IngredientProfileRow;
