// ==========================================
// ConfigManager 集成测试
// ==========================================
// 测试目标: 验证配置加载、默认值回填、校验与快照
// ==========================================

mod test_helpers;

use msy_inventory_intel::config::{config_keys, ConfigError, ConfigManager, InventoryPolicy};
use msy_inventory_intel::engine::{PipelineError, PipelineOrchestrator, PipelineRunContext};
use std::path::PathBuf;
use tempfile::TempDir;
use test_helpers::{create_test_inputs, write_lines};

#[test]
fn test_defaults_without_config_file() {
    let config = ConfigManager::new().pipeline_config().expect("defaults should validate");

    assert_eq!(config.policy, InventoryPolicy::default());
    assert_eq!(config.policy.service_level_z, 1.65);
    assert_eq!(config.policy.anomaly_z_threshold, 2.0);
    assert_eq!(config.policy.forecast_min_months, 4);
    assert_eq!(
        config.shipment_mapping.usage_column_for("Beef"),
        Some("braised_beef_g")
    );
    assert_eq!(config.paths.output_dir, PathBuf::from("processed_data"));
    assert!(config.paths.sqlite_path.is_none());
}

#[test]
fn test_json_overrides() {
    let manager = ConfigManager::from_json_str(
        r#"{
            "service_level_z": 2.33,
            "anomaly_z_threshold": "2.5",
            "forecast_min_months": 5,
            "output_dir": "out/dashboard",
            "sqlite_path": "out/inventory.db",
            "shipments_path": ""
        }"#,
    )
    .unwrap();

    let config = manager.pipeline_config().unwrap();
    assert_eq!(config.policy.service_level_z, 2.33);
    assert_eq!(config.policy.anomaly_z_threshold, 2.5);
    assert_eq!(config.policy.forecast_min_months, 5);
    assert_eq!(config.policy.risk_high_ratio, 0.5);
    assert_eq!(config.paths.output_dir, PathBuf::from("out/dashboard"));
    assert_eq!(config.paths.sqlite_path, Some(PathBuf::from("out/inventory.db")));

    // 显式空字符串关闭到货文件
    assert!(config.paths.shipments_path.is_none());
}

#[test]
fn test_shipment_mapping_override() {
    let manager = ConfigManager::from_json_str(
        r#"{"shipment_name_mapping": {"Beef Brisket": "braised_beef_g"}}"#,
    )
    .unwrap();

    let mapping = manager.get_shipment_name_mapping().unwrap();
    assert_eq!(mapping.len(), 1);
    assert_eq!(mapping.usage_column_for("Beef Brisket"), Some("braised_beef_g"));
    assert_eq!(mapping.usage_column_for("Beef"), None);
}

#[test]
fn test_invalid_values_are_rejected() {
    let manager = ConfigManager::from_json_str(r#"{"service_level_z": "high"}"#).unwrap();
    assert!(matches!(
        manager.pipeline_config(),
        Err(ConfigError::ConfigValueError { .. })
    ));

    let manager =
        ConfigManager::from_json_str(r#"{"risk_high_ratio": 0.2, "risk_medium_ratio": 0.3}"#)
            .unwrap();
    assert!(matches!(
        manager.get_inventory_policy(),
        Err(ConfigError::ValidationError { .. })
    ));

    let manager = ConfigManager::from_json_str(r#"{"shipment_name_mapping": "Beef"}"#).unwrap();
    assert!(manager.get_shipment_name_mapping().is_err());

    assert!(matches!(
        ConfigManager::from_json_str("[1, 2, 3]"),
        Err(ConfigError::ConfigParseError(_))
    ));
}

#[test]
fn test_orchestrator_rejects_invalid_policy() {
    let mut ctx = PipelineRunContext::new(Default::default(), create_test_inputs());
    ctx.config.policy.days_per_month = 0.0;

    let result = PipelineOrchestrator::new().run(&ctx);
    assert!(matches!(result, Err(PipelineError::Config(_))));
}

#[test]
fn test_config_snapshot_is_sorted() {
    let mut manager = ConfigManager::from_json_str(r#"{"service_level_z": 1.96}"#).unwrap();
    manager.set(config_keys::ANOMALY_Z_THRESHOLD, "3");

    let snapshot = manager.get_config_snapshot().unwrap();
    assert_eq!(
        snapshot,
        r#"{"anomaly_z_threshold":"3","service_level_z":"1.96"}"#
    );
}

#[test]
fn test_from_file() {
    let dir = TempDir::new().unwrap();
    let path = write_lines(
        dir.path(),
        "config.json",
        &[r#"{"overstock_ratio": 2.0, "days_per_month": 31}"#],
    );

    let manager = ConfigManager::from_file(&path).unwrap();
    let policy = manager.get_inventory_policy().unwrap();
    assert_eq!(policy.overstock_ratio, 2.0);
    assert_eq!(policy.days_per_month, 31.0);
    assert_eq!(manager.get_config_value("days_per_month"), Some("31"));
}

#[test]
fn test_missing_config_file() {
    let dir = TempDir::new().unwrap();
    let result = ConfigManager::from_file(dir.path().join("missing.json"));
    assert!(matches!(result, Err(ConfigError::ConfigFileReadError { .. })));
}
