// ==========================================
// 餐厅库存智能分析 - 输出层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    // ===== 文件输出错误 =====
    #[error("文件写入失败: {0}")]
    FileWriteError(String),

    #[error("CSV 写入失败 (表 {table}): {message}")]
    CsvWriteError { table: String, message: String },

    #[error("JSON 序列化失败: {0}")]
    JsonError(String),

    #[error("输出目录替换失败: {0}")]
    SwapError(String),

    // ===== 数据库错误 =====
    #[error("数据库锁获取失败: {0}")]
    LockError(String),

    #[error("数据库操作失败: {0}")]
    DatabaseError(String),

    #[error("未知输出表: {0}")]
    UnknownTable(String),
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ExportError {
    fn from(err: std::io::Error) -> Self {
        ExportError::FileWriteError(err.to_string())
    }
}

// 实现 From<serde_json::Error>
impl From<serde_json::Error> for ExportError {
    fn from(err: serde_json::Error) -> Self {
        ExportError::JsonError(err.to_string())
    }
}

// 实现 From<rusqlite::Error>
impl From<rusqlite::Error> for ExportError {
    fn from(err: rusqlite::Error) -> Self {
        ExportError::DatabaseError(err.to_string())
    }
}

/// Result 类型别名
pub type ExportResult<T> = Result<T, ExportError>;
