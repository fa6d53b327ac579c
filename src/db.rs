// ==========================================
// 餐厅库存智能分析 - SQLite 连接初始化
// ==========================================
// 输出库由看板进程并发读取:
// - 文件库开启 WAL,写入事务期间读方仍可读到上一次运行的完整数据
// - busy_timeout 避免看板读锁导致写入立即失败
// ==========================================

use rusqlite::Connection;
use std::path::Path;
use std::time::Duration;

/// 默认 busy_timeout (毫秒)
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

fn apply_common_pragmas(conn: &Connection) -> rusqlite::Result<()> {
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    Ok(())
}

/// 打开输出库文件 (不存在则创建) 并应用 WAL / busy_timeout
///
/// 父目录需已存在
pub fn open_sqlite_connection<P: AsRef<Path>>(db_path: P) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path.as_ref())?;
    apply_common_pragmas(&conn)?;
    // journal_mode 会返回结果行,不能用 execute_batch
    let mode: String = conn.query_row("PRAGMA journal_mode = WAL", [], |row| row.get(0))?;
    tracing::debug!(path = %db_path.as_ref().display(), journal_mode = %mode, "SQLite 输出库已打开");
    Ok(conn)
}

/// 打开内存库 (无 WAL)
pub fn open_in_memory_connection() -> rusqlite::Result<Connection> {
    let conn = Connection::open_in_memory()?;
    apply_common_pragmas(&conn)?;
    Ok(conn)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_database_uses_wal() {
        let dir = tempfile::TempDir::new().unwrap();
        let conn = open_sqlite_connection(dir.path().join("out.db")).unwrap();
        let mode: String = conn
            .query_row("PRAGMA journal_mode", [], |row| row.get(0))
            .unwrap();
        assert_eq!(mode.to_lowercase(), "wal");
    }

    #[test]
    fn test_in_memory_connection() {
        let conn = open_in_memory_connection().unwrap();
        let fk: i64 = conn.query_row("PRAGMA foreign_keys", [], |row| row.get(0)).unwrap();
        assert_eq!(fk, 1);
    }
}
