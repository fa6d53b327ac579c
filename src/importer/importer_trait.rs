// ==========================================
// 餐厅库存智能分析 - 导入接口
// ==========================================
// 职责: 定义导入各阶段接口 (不包含实现)
// ==========================================

use crate::importer::error::ImportResult;
use std::collections::HashMap;
use std::path::Path;

/// 原始行记录 (列名 → TRIM 后的单元格值)
pub type RawRow = HashMap<String, String>;

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件解析接口 (阶段 0)
// 实现者: CsvParser, ExcelParser
pub trait FileParser: Send + Sync {
    /// 解析文件为原始行记录
    ///
    /// # 返回
    /// - Ok(Vec<RawRow>): 行记录列表 (已跳过全空白行)
    /// - Err: 文件读取错误、格式错误
    fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<Vec<RawRow>>;
}
