// ==========================================
// 餐厅库存智能分析 - SQLite 输出
// ==========================================
// 语义: 单事务内清空并重写全部输出表,同时登记 pipeline_run
// 红线: 只做数据落库,不含业务逻辑
// ==========================================

use crate::db::open_sqlite_connection;
use crate::engine::orchestrator::PipelineOutput;
use crate::exporter::error::{ExportError, ExportResult};
use crate::exporter::tables::*;
use rusqlite::{params, Connection, Transaction};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::info;

const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS ingredient_consumption_detailed (
    month TEXT NOT NULL,
    item_name TEXT NOT NULL,
    sales_count INTEGER NOT NULL,
    ingredient TEXT NOT NULL,
    consumption_per_item REAL NOT NULL,
    total_consumption REAL NOT NULL,
    revenue REAL NOT NULL
);

CREATE TABLE IF NOT EXISTS ingredient_consumption_monthly (
    month TEXT NOT NULL,
    ingredient TEXT NOT NULL,
    total_consumption REAL NOT NULL,
    sales_count INTEGER NOT NULL,
    revenue REAL NOT NULL,
    PRIMARY KEY (month, ingredient)
);

CREATE TABLE IF NOT EXISTS ingredient_consumption_with_shipments (
    month TEXT NOT NULL,
    ingredient TEXT NOT NULL,
    total_consumption REAL NOT NULL,
    sales_count INTEGER NOT NULL,
    revenue REAL NOT NULL,
    shipment_ingredient_name TEXT,
    quantity_per_shipment REAL,
    unit TEXT,
    frequency TEXT,
    num_shipments INTEGER,
    estimated_shipments_needed REAL,
    PRIMARY KEY (month, ingredient)
);

CREATE TABLE IF NOT EXISTS ingredient_summary (
    ingredient TEXT PRIMARY KEY,
    total_consumption_6months REAL NOT NULL,
    avg_monthly_consumption REAL NOT NULL,
    months_active INTEGER NOT NULL,
    has_shipment_data INTEGER NOT NULL,
    shipment_ingredient_name TEXT,
    quantity_per_shipment REAL,
    unit TEXT,
    num_shipments INTEGER,
    frequency TEXT
);

CREATE TABLE IF NOT EXISTS item_sales_with_ingredients (
    month TEXT NOT NULL,
    item_name TEXT NOT NULL,
    sales_count INTEGER NOT NULL,
    revenue REAL NOT NULL,
    has_ingredient_data INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS inventory_optimization (
    ingredient TEXT PRIMARY KEY,
    avg_monthly_consumption REAL NOT NULL,
    std_monthly_consumption REAL NOT NULL,
    max_monthly_consumption REAL NOT NULL,
    min_monthly_consumption REAL NOT NULL,
    safety_stock REAL NOT NULL,
    reorder_point REAL NOT NULL,
    has_shipment_data INTEGER NOT NULL,
    frequency TEXT,
    quantity_per_shipment REAL,
    risk_level TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS detected_anomalies (
    ingredient TEXT NOT NULL,
    month TEXT NOT NULL,
    consumption REAL NOT NULL,
    z_score REAL NOT NULL,
    deviation REAL NOT NULL,
    PRIMARY KEY (ingredient, month)
);

CREATE TABLE IF NOT EXISTS forecasting_data (
    ingredient TEXT PRIMARY KEY,
    trend_slope REAL NOT NULL,
    avg_monthly_change REAL NOT NULL,
    last_value REAL NOT NULL,
    forecast_next_month REAL NOT NULL,
    volatility REAL NOT NULL
);

CREATE TABLE IF NOT EXISTS cost_efficiency (
    ingredient TEXT PRIMARY KEY,
    total_consumption REAL NOT NULL,
    revenue REAL NOT NULL,
    revenue_per_unit REAL NOT NULL
);

CREATE TABLE IF NOT EXISTS ingredient_growth (
    ingredient TEXT PRIMARY KEY,
    first_month_consumption REAL,
    last_month_consumption REAL,
    growth_pct REAL,
    is_significant INTEGER NOT NULL,
    volatility_cv REAL
);

CREATE TABLE IF NOT EXISTS inventory_status_simulated (
    ingredient TEXT PRIMARY KEY,
    is_simulated INTEGER NOT NULL,
    simulated_current_inventory REAL NOT NULL,
    reorder_point REAL NOT NULL,
    status TEXT NOT NULL,
    forecasted_consumption REAL NOT NULL,
    days_of_supply REAL,
    recommended_order_qty REAL NOT NULL,
    days_until_reorder REAL,
    is_overstocked INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS monthly_sales_totals (
    month TEXT PRIMARY KEY,
    revenue REAL NOT NULL,
    items_sold INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS pipeline_run (
    run_id TEXT PRIMARY KEY,
    generated_at TEXT NOT NULL,
    summary_json TEXT NOT NULL,
    config_json TEXT
);
"#;

/// 每次运行整体替换的输出表 (pipeline_run 只追加)
const REPLACED_TABLES: [&str; 12] = [
    TABLE_CONSUMPTION_DETAILED,
    TABLE_CONSUMPTION_MONTHLY,
    TABLE_CONSUMPTION_WITH_SHIPMENTS,
    TABLE_INGREDIENT_SUMMARY,
    TABLE_ITEM_SALES_WITH_INGREDIENTS,
    TABLE_INVENTORY_OPTIMIZATION,
    TABLE_DETECTED_ANOMALIES,
    TABLE_FORECASTING_DATA,
    TABLE_COST_EFFICIENCY,
    TABLE_INGREDIENT_GROWTH,
    TABLE_INVENTORY_STATUS_SIMULATED,
    TABLE_MONTHLY_SALES_TOTALS,
];

fn is_known_table(table: &str) -> bool {
    table == TABLE_PIPELINE_RUN || REPLACED_TABLES.iter().any(|t| *t == table)
}

// ==========================================
// SqliteTableStore - 输出表落库
// ==========================================
pub struct SqliteTableStore {
    conn: Arc<Mutex<Connection>>,
}

impl SqliteTableStore {
    /// 打开数据库并建表 (父目录不存在时创建)
    pub fn new(db_path: &str) -> ExportResult<Self> {
        if let Some(parent) = std::path::Path::new(db_path).parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = open_sqlite_connection(db_path)?;
        Self::from_connection(Arc::new(Mutex::new(conn)))
    }

    /// 从已有连接创建 (建表)
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> ExportResult<Self> {
        let store = Self { conn };
        store.ensure_schema()?;
        Ok(store)
    }

    fn get_conn(&self) -> ExportResult<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| ExportError::LockError(e.to_string()))
    }

    fn ensure_schema(&self) -> ExportResult<()> {
        let conn = self.get_conn()?;
        conn.execute_batch(SCHEMA_SQL)?;
        Ok(())
    }

    /// 单事务替换全部输出表并登记本次运行
    ///
    /// # 返回
    /// 写入的数据行数 (不含 pipeline_run)
    pub fn save(&self, output: &PipelineOutput, config_snapshot: Option<&str>) -> ExportResult<usize> {
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;

        for table in REPLACED_TABLES {
            tx.execute(&format!("DELETE FROM {}", table), [])?;
        }

        let mut count = 0;
        count += insert_consumption(&tx, output)?;
        count += insert_profiles(&tx, output)?;
        count += insert_metrics(&tx, output)?;
        count += insert_analysis(&tx, output)?;

        tx.execute(
            "INSERT OR REPLACE INTO pipeline_run (run_id, generated_at, summary_json, config_json)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                output.summary.run_id,
                output.summary.generated_at.to_rfc3339(),
                serde_json::to_string(&output.summary)?,
                config_snapshot,
            ],
        )?;

        tx.commit()?;

        info!(rows = count, run_id = %output.summary.run_id, "SQLite 输出完成");
        Ok(count)
    }

    /// 表行数 (仅限本模块管理的输出表,表名会拼入 SQL)
    pub fn count_rows(&self, table: &str) -> ExportResult<i64> {
        if !is_known_table(table) {
            return Err(ExportError::UnknownTable(table.to_string()));
        }
        let conn = self.get_conn()?;
        let count = conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| row.get(0))?;
        Ok(count)
    }

    /// 已登记的运行 ID (按生成时间)
    pub fn list_run_ids(&self) -> ExportResult<Vec<String>> {
        let conn = self.get_conn()?;
        let mut stmt = conn.prepare("SELECT run_id FROM pipeline_run ORDER BY generated_at")?;
        let ids = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(ids)
    }
}

// ==========================================
// 分表写入
// ==========================================

fn insert_consumption(tx: &Transaction<'_>, output: &PipelineOutput) -> ExportResult<usize> {
    let mut count = 0;

    let mut stmt = tx.prepare(
        "INSERT INTO ingredient_consumption_detailed (
            month, item_name, sales_count, ingredient, consumption_per_item, total_consumption, revenue
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
    )?;
    for r in &output.consumption_detailed {
        stmt.execute(params![
            r.month.as_str(),
            r.item_name,
            r.units_sold as i64,
            r.ingredient_name,
            r.amount_per_unit,
            r.total_consumption,
            r.attributed_revenue,
        ])?;
        count += 1;
    }

    let mut stmt = tx.prepare(
        "INSERT INTO ingredient_consumption_monthly (
            month, ingredient, total_consumption, sales_count, revenue
        ) VALUES (?1, ?2, ?3, ?4, ?5)",
    )?;
    for r in &output.monthly_consumption {
        stmt.execute(params![
            r.month.as_str(),
            r.ingredient_name,
            r.total_consumption,
            r.sales_count as i64,
            r.total_revenue,
        ])?;
        count += 1;
    }

    let mut stmt = tx.prepare(
        "INSERT INTO ingredient_consumption_with_shipments (
            month, ingredient, total_consumption, sales_count, revenue,
            shipment_ingredient_name, quantity_per_shipment, unit, frequency, num_shipments,
            estimated_shipments_needed
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
    )?;
    for r in &output.consumption_with_shipments {
        stmt.execute(params![
            r.month.as_str(),
            r.ingredient,
            r.total_consumption,
            r.sales_count as i64,
            r.revenue,
            r.shipment_ingredient_name,
            r.quantity_per_shipment,
            r.unit,
            r.frequency.map(|f| f.to_string()),
            r.num_shipments,
            r.estimated_shipments_needed,
        ])?;
        count += 1;
    }

    let mut stmt = tx.prepare(
        "INSERT INTO item_sales_with_ingredients (
            month, item_name, sales_count, revenue, has_ingredient_data
        ) VALUES (?1, ?2, ?3, ?4, ?5)",
    )?;
    for r in &output.item_sales_matches {
        stmt.execute(params![
            r.month.as_str(),
            r.item_name,
            r.sales_count as i64,
            r.revenue,
            r.has_ingredient_data,
        ])?;
        count += 1;
    }

    Ok(count)
}

fn insert_profiles(tx: &Transaction<'_>, output: &PipelineOutput) -> ExportResult<usize> {
    let mut stmt = tx.prepare(
        "INSERT INTO ingredient_summary (
            ingredient, total_consumption_6months, avg_monthly_consumption, months_active,
            has_shipment_data, shipment_ingredient_name, quantity_per_shipment, unit,
            num_shipments, frequency
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
    )?;

    let mut count = 0;
    for profile in &output.ingredient_profiles {
        let r = IngredientProfileRow::from(profile);
        stmt.execute(params![
            r.ingredient,
            r.total_consumption_6months,
            r.avg_monthly_consumption,
            r.months_active as i64,
            r.has_shipment_data,
            r.shipment_ingredient_name,
            r.quantity_per_shipment,
            r.unit,
            r.num_shipments,
            r.frequency.map(|f| f.to_string()),
        ])?;
        count += 1;
    }
    Ok(count)
}

fn insert_metrics(tx: &Transaction<'_>, output: &PipelineOutput) -> ExportResult<usize> {
    let mut stmt = tx.prepare(
        "INSERT INTO inventory_optimization (
            ingredient, avg_monthly_consumption, std_monthly_consumption,
            max_monthly_consumption, min_monthly_consumption, safety_stock, reorder_point,
            has_shipment_data, frequency, quantity_per_shipment, risk_level
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
    )?;

    let mut count = 0;
    for m in &output.inventory_metrics {
        stmt.execute(params![
            m.ingredient_name,
            m.avg_monthly_consumption,
            m.std_monthly_consumption,
            m.max_monthly_consumption,
            m.min_monthly_consumption,
            m.safety_stock,
            m.reorder_point,
            m.has_shipment_data,
            m.frequency.map(|f| f.to_string()),
            m.quantity_per_shipment,
            m.risk_level.to_string(),
        ])?;
        count += 1;
    }

    let mut stmt = tx.prepare(
        "INSERT INTO inventory_status_simulated (
            ingredient, is_simulated, simulated_current_inventory, reorder_point, status,
            forecasted_consumption, days_of_supply, recommended_order_qty, days_until_reorder,
            is_overstocked
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
    )?;
    for s in &output.inventory_status {
        stmt.execute(params![
            s.ingredient,
            s.is_simulated,
            s.simulated_current_inventory,
            s.reorder_point,
            s.status.to_string(),
            s.forecasted_consumption,
            s.days_of_supply,
            s.recommended_order_qty,
            s.days_until_reorder,
            s.is_overstocked,
        ])?;
        count += 1;
    }

    Ok(count)
}

fn insert_analysis(tx: &Transaction<'_>, output: &PipelineOutput) -> ExportResult<usize> {
    let mut count = 0;

    let mut stmt = tx.prepare(
        "INSERT INTO detected_anomalies (ingredient, month, consumption, z_score, deviation)
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )?;
    for a in &output.anomalies {
        stmt.execute(params![a.ingredient, a.month.as_str(), a.consumption, a.z_score, a.deviation])?;
        count += 1;
    }

    let mut stmt = tx.prepare(
        "INSERT INTO forecasting_data (
            ingredient, trend_slope, avg_monthly_change, last_value, forecast_next_month, volatility
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )?;
    for f in &output.forecasts {
        stmt.execute(params![
            f.ingredient,
            f.trend_slope,
            f.avg_monthly_change,
            f.last_value,
            f.forecast_next_month,
            f.volatility,
        ])?;
        count += 1;
    }

    let mut stmt = tx.prepare(
        "INSERT INTO cost_efficiency (ingredient, total_consumption, revenue, revenue_per_unit)
         VALUES (?1, ?2, ?3, ?4)",
    )?;
    for c in &output.cost_efficiency {
        stmt.execute(params![c.ingredient, c.total_consumption, c.total_revenue, c.revenue_per_unit])?;
        count += 1;
    }

    let mut stmt = tx.prepare(
        "INSERT INTO ingredient_growth (
            ingredient, first_month_consumption, last_month_consumption, growth_pct,
            is_significant, volatility_cv
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )?;
    for g in &output.growth {
        stmt.execute(params![
            g.ingredient,
            g.first_month_consumption,
            g.last_month_consumption,
            g.growth_pct,
            g.is_significant,
            g.volatility_cv,
        ])?;
        count += 1;
    }

    let mut stmt = tx.prepare(
        "INSERT INTO monthly_sales_totals (month, revenue, items_sold) VALUES (?1, ?2, ?3)",
    )?;
    for t in &output.monthly_sales_totals {
        stmt.execute(params![t.month.as_str(), t.revenue, t.items_sold as i64])?;
        count += 1;
    }

    Ok(count)
}
