// ==========================================
// 餐厅库存智能分析 - 命令行入口
// ==========================================
// 用法:
//   msy-inventory-intel [config.json]
// 未指定配置文件时全部使用默认值
// ==========================================

use anyhow::Context;
use msy_inventory_intel::config::ConfigManager;
use msy_inventory_intel::engine::{PipelineOrchestrator, PipelineRunContext};
use msy_inventory_intel::exporter::{CsvTableWriter, SqliteTableStore};
use msy_inventory_intel::importer::InventoryDataLoader;
use msy_inventory_intel::{logging, RunSummary};

fn main() -> anyhow::Result<()> {
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{} v{}", msy_inventory_intel::APP_NAME, msy_inventory_intel::VERSION);
    tracing::info!("==================================================");

    let config_manager = match std::env::args().nth(1) {
        Some(path) => ConfigManager::from_file(&path)
            .with_context(|| format!("加载配置文件失败: {}", path))?,
        None => {
            tracing::info!("未指定配置文件,使用默认配置");
            ConfigManager::new()
        }
    };
    let config = config_manager.pipeline_config().context("配置校验失败")?;
    let snapshot = config_manager.get_config_snapshot()?;

    let inputs = InventoryDataLoader::new()
        .load_inputs(&config.paths)
        .context("输入数据加载失败")?;

    let output_dir = config.paths.output_dir.clone();
    let sqlite_path = config.paths.sqlite_path.clone();

    let ctx = PipelineRunContext::new(config, inputs);
    let output = PipelineOrchestrator::new()
        .run(&ctx)
        .context("分析流水线执行失败")?;

    CsvTableWriter::new(&output_dir)
        .write_all(&output, Some(&snapshot))
        .with_context(|| format!("CSV 输出失败: {}", output_dir.display()))?;

    if let Some(db_path) = sqlite_path {
        let db_path = db_path.to_string_lossy().to_string();
        SqliteTableStore::new(&db_path)
            .and_then(|store| store.save(&output, Some(&snapshot)))
            .with_context(|| format!("SQLite 输出失败: {}", db_path))?;
    }

    print_summary(&output.summary);
    Ok(())
}

fn print_summary(summary: &RunSummary) {
    println!("run_id={}", summary.run_id);
    println!("total_revenue={:.2}", summary.total_revenue);
    println!("total_items_sold={}", summary.total_items_sold);
    println!("months_analyzed={}", summary.months_analyzed);
    match summary.revenue_growth_pct {
        Some(g) => println!("revenue_growth_pct={:.1}", g),
        None => println!("revenue_growth_pct="),
    }
    println!(
        "items matched={} without_ingredient_data={} unmatched_rows={}",
        summary.matched_items, summary.items_without_ingredient_data, summary.unmatched_sales_rows
    );
    println!(
        "ingredients={} with_shipment_data={}",
        summary.unique_ingredients, summary.ingredients_with_shipment_data
    );
    println!(
        "risk high={} medium={} low={}",
        summary.high_risk_count, summary.medium_risk_count, summary.low_risk_count
    );
    println!(
        "anomalies={} forecasts={}",
        summary.anomaly_count, summary.forecast_count
    );
}
