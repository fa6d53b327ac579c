// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 提供测试所需的输入快照、输入文件生成等功能
// 数据集 (6 个月):
// - Beef Noodle: 每月 100 份, $800 (消耗恒定)
// - Chicken Rice: 50/60/55/50/60/300 份 (10 月突增)
// - Pork Bun: 仅 10 月 20 份 (单月食材)
// - Mystery Soup: 5 月 10 份, 无配方
// ==========================================

#![allow(dead_code)]

use msy_inventory_intel::config::{PipelineConfig, PipelinePaths};
use msy_inventory_intel::domain::types::{Month, ShipmentFrequency};
use msy_inventory_intel::domain::{RecipeVector, SalesRecord, ShipmentProfile};
use msy_inventory_intel::engine::{PipelineInputs, PipelineRunContext, RecipeBook};
use std::fs;
use std::path::{Path, PathBuf};

pub const CHICKEN_RICE_UNITS: [u64; 6] = [50, 60, 55, 50, 60, 300];

/// 测试用配方库
pub fn create_test_recipes() -> RecipeBook {
    RecipeBook::from_vectors(vec![
        RecipeVector::new("Beef Noodle")
            .with_ingredient("braised_beef_g", 150.0)
            .with_ingredient("ramen_count", 1.0)
            .with_ingredient("green_onion", 5.0)
            .with_ingredient("egg_count", 0.0),
        RecipeVector::new("Chicken Rice")
            .with_ingredient("braised_chicken_g", 120.0)
            .with_ingredient("rice_g", 250.0)
            .with_ingredient("green_onion", 3.0),
        RecipeVector::new("Pork Bun")
            .with_ingredient("braised_pork_g", 80.0)
            .with_ingredient("flour_g", 100.0),
    ])
}

/// 测试用销售记录
pub fn create_test_sales() -> Vec<SalesRecord> {
    let mut sales = Vec::new();
    for (idx, month) in Month::ALL.iter().enumerate() {
        sales.push(SalesRecord::new(*month, "Beef Noodle", 100, 800.0));
        let units = CHICKEN_RICE_UNITS[idx];
        sales.push(SalesRecord::new(*month, "Chicken Rice", units, units as f64 * 10.0));
    }
    sales.push(SalesRecord::new(Month::October, "Pork Bun", 20, 100.0));
    sales.push(SalesRecord::new(Month::May, "Mystery Soup", 10, 50.0));
    sales
}

/// 测试用到货档案 (Rice 单次到货量为 0)
pub fn create_test_shipments() -> Vec<ShipmentProfile> {
    vec![
        ShipmentProfile {
            ingredient_name: "Beef".to_string(),
            quantity_per_shipment: 40.0,
            unit: "lbs".to_string(),
            frequency: ShipmentFrequency::Weekly,
            num_shipments: 4,
        },
        ShipmentProfile {
            ingredient_name: "Chicken".to_string(),
            quantity_per_shipment: 30.0,
            unit: "lbs".to_string(),
            frequency: ShipmentFrequency::Biweekly,
            num_shipments: 2,
        },
        ShipmentProfile {
            ingredient_name: "Rice".to_string(),
            quantity_per_shipment: 0.0,
            unit: "bags".to_string(),
            frequency: ShipmentFrequency::Monthly,
            num_shipments: 1,
        },
    ]
}

pub fn create_test_inputs() -> PipelineInputs {
    PipelineInputs {
        sales: create_test_sales(),
        recipes: create_test_recipes(),
        shipments: create_test_shipments(),
    }
}

pub fn create_test_context() -> PipelineRunContext {
    PipelineRunContext::new(PipelineConfig::default(), create_test_inputs())
}

// ==========================================
// 输入文件
// ==========================================

/// 写出文本文件 (逐行)
pub fn write_lines(dir: &Path, name: &str, lines: &[&str]) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, lines.join("\n") + "\n").expect("Failed to write test file");
    path
}

/// 写出原始格式的三份输入文件,返回对应路径配置
///
/// - 销售表带 group 级汇总行 (应被跳过) 和带 $ / 千分位的数值
/// - 配方表使用原始表头 (需标准化)
/// - 到货表使用原始表头
pub fn write_test_input_files(dir: &Path) -> PipelinePaths {
    let mut sales_lines = vec!["month,data_level,level_name,Count,Amount".to_string()];
    sales_lines.push("May,group,Noodles,\"1,000\",\"$9,999.00\"".to_string());
    for (idx, month) in Month::ALL.iter().enumerate() {
        sales_lines.push(format!("{},item,Beef Noodle,100,$800.00", month));
        let units = CHICKEN_RICE_UNITS[idx];
        sales_lines.push(format!("{},item,Chicken Rice,{},${}.00", month, units, units * 10));
    }
    sales_lines.push("October,item,Pork Bun,20,$100.00".to_string());
    sales_lines.push("May,item,Mystery Soup,10,$50.00".to_string());
    let sales_refs: Vec<&str> = sales_lines.iter().map(String::as_str).collect();

    let sales_path = write_lines(dir, "monthly_sales_item.csv", &sales_refs);
    let recipes_path = write_lines(
        dir,
        "ingredient_usage.csv",
        &[
            "Item name,braised beef used (g),Ramen (count),Green Onion,Egg(count),Braised Chicken(g),Rice(g),Braised Pork(g),flour (g)",
            "Beef Noodle,150,1,5,,,,,",
            "Chicken Rice,,,3,,120,250,,",
            "Pork Bun,,,,,,,80,100",
        ],
    );
    let shipments_path = write_lines(
        dir,
        "shipment_data.csv",
        &[
            "Ingredient,Quantity per shipment,Unit of shipment,Number of shipments,frequency",
            "Beef,40,lbs,4,Weekly",
            "Chicken,30,lbs,2,biweekly",
            "Rice,0,bags,1,Monthly",
        ],
    );

    PipelinePaths {
        sales_path,
        recipes_path,
        shipments_path: Some(shipments_path),
        output_dir: dir.join("processed_data"),
        sqlite_path: None,
    }
}
