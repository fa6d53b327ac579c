// ==========================================
// 餐厅库存智能分析 - CSV 输出
// ==========================================
// 语义: 重算后整体替换
// 1. 全部表写入与目标目录同级的临时目录
// 2. 旧目录改名让位,临时目录改名为目标目录
// 3. 删除旧目录
// 任一步失败时旧输出保持原样 (或被还原)
// ==========================================

use crate::engine::orchestrator::PipelineOutput;
use crate::exporter::error::{ExportError, ExportResult};
use crate::exporter::tables::*;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

pub struct CsvTableWriter {
    output_dir: PathBuf,
}

impl CsvTableWriter {
    pub fn new<P: Into<PathBuf>>(output_dir: P) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// 写出全部输出表
    ///
    /// # 参数
    /// - output: 流水线输出
    /// - config_snapshot: 可选的配置快照 (JSON 文本),写入 config_snapshot.json
    ///
    /// # 返回
    /// 写出的文件数
    pub fn write_all(&self, output: &PipelineOutput, config_snapshot: Option<&str>) -> ExportResult<usize> {
        let run_id = &output.summary.run_id;
        let staging = self.sibling_dir("staging", run_id)?;
        if staging.exists() {
            fs::remove_dir_all(&staging)?;
        }
        fs::create_dir_all(&staging)?;

        let written = match self.write_tables(&staging, output, config_snapshot) {
            Ok(count) => count,
            Err(e) => {
                let _ = fs::remove_dir_all(&staging);
                return Err(e);
            }
        };

        self.swap_in(&staging, run_id)?;

        info!(
            output_dir = %self.output_dir.display(),
            files = written,
            run_id = %run_id,
            "CSV 输出完成"
        );
        Ok(written)
    }

    fn write_tables(
        &self,
        dir: &Path,
        output: &PipelineOutput,
        config_snapshot: Option<&str>,
    ) -> ExportResult<usize> {
        let profile_rows: Vec<IngredientProfileRow> =
            output.ingredient_profiles.iter().map(IngredientProfileRow::from).collect();

        write_table(dir, TABLE_CONSUMPTION_DETAILED, &output.consumption_detailed)?;
        write_table(dir, TABLE_CONSUMPTION_MONTHLY, &output.monthly_consumption)?;
        write_table(dir, TABLE_CONSUMPTION_WITH_SHIPMENTS, &output.consumption_with_shipments)?;
        write_table(dir, TABLE_INGREDIENT_SUMMARY, &profile_rows)?;
        write_table(dir, TABLE_ITEM_SALES_WITH_INGREDIENTS, &output.item_sales_matches)?;
        write_table(dir, TABLE_INVENTORY_OPTIMIZATION, &output.inventory_metrics)?;
        write_table(dir, TABLE_DETECTED_ANOMALIES, &output.anomalies)?;
        write_table(dir, TABLE_FORECASTING_DATA, &output.forecasts)?;
        write_table(dir, TABLE_COST_EFFICIENCY, &output.cost_efficiency)?;
        write_table(dir, TABLE_INGREDIENT_GROWTH, &output.growth)?;
        write_table(dir, TABLE_INVENTORY_STATUS_SIMULATED, &output.inventory_status)?;
        write_table(dir, TABLE_MONTHLY_SALES_TOTALS, &output.monthly_sales_totals)?;
        let mut count = 12;

        fs::write(dir.join(SUMMARY_FILE), serde_json::to_string_pretty(&output.summary)?)?;
        count += 1;

        if let Some(snapshot) = config_snapshot {
            fs::write(dir.join(CONFIG_SNAPSHOT_FILE), snapshot)?;
            count += 1;
        }

        Ok(count)
    }

    /// 临时目录替换目标目录
    fn swap_in(&self, staging: &Path, run_id: &str) -> ExportResult<()> {
        let backup = self.sibling_dir("previous", run_id)?;
        let had_previous = self.output_dir.exists();

        if had_previous {
            fs::rename(&self.output_dir, &backup).map_err(|e| {
                ExportError::SwapError(format!("旧输出目录改名失败: {}", e))
            })?;
        }

        if let Err(e) = fs::rename(staging, &self.output_dir) {
            if had_previous {
                if let Err(restore_err) = fs::rename(&backup, &self.output_dir) {
                    warn!(error = %restore_err, backup = %backup.display(), "旧输出目录还原失败");
                }
            }
            return Err(ExportError::SwapError(format!("新输出目录替换失败: {}", e)));
        }

        if had_previous {
            if let Err(e) = fs::remove_dir_all(&backup) {
                warn!(error = %e, backup = %backup.display(), "旧输出目录清理失败");
            }
        }
        Ok(())
    }

    /// 与目标目录同级的隐藏目录 (保证 rename 不跨文件系统)
    fn sibling_dir(&self, tag: &str, run_id: &str) -> ExportResult<PathBuf> {
        let name = self
            .output_dir
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                ExportError::SwapError(format!("输出目录名非法: {}", self.output_dir.display()))
            })?;
        let parent = self
            .output_dir
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."));

        if !parent.exists() {
            fs::create_dir_all(parent)?;
        }
        Ok(parent.join(format!(".{}.{}-{}", name, tag, run_id)))
    }
}

/// 写出单张表 (<dir>/<table>.csv)
///
/// 表头取自 TableColumns,不依赖首行序列化,空表同样有表头
fn write_table<T: Serialize + TableColumns>(dir: &Path, table: &str, rows: &[T]) -> ExportResult<()> {
    let csv_error = |message: String| ExportError::CsvWriteError {
        table: table.to_string(),
        message,
    };

    let path = dir.join(format!("{}.csv", table));
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(&path)
        .map_err(|e| csv_error(e.to_string()))?;
    writer
        .write_record(T::COLUMNS)
        .map_err(|e| csv_error(e.to_string()))?;
    for row in rows {
        writer.serialize(row).map_err(|e| csv_error(e.to_string()))?;
    }
    writer.flush()?;

    debug!(table, rows = rows.len(), "CSV 表写出");
    Ok(())
}
