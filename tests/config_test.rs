// ==========================================
// ConfigManager 集成测试
// ==========================================
// 测试目标: 验证配置文件加载、按条目覆写与估价结果联动
// ==========================================

#[path = "test_helpers.rs"]
mod test_helpers;

use property_valuation::config::{
    config_keys, ConfigError, ConfigManager, ConfigSource, ValuationConfig, CONFIG_PATH_ENV,
};
use property_valuation::{ApiError, ValidationMode, ValuationApi, ValuationEngine};
use std::io::Write;
use std::sync::Mutex;
use tempfile::NamedTempFile;
use test_helpers::{valuation_date, yuelu_residence};

// 环境变量为进程级全局状态，相关测试串行化
static ENV_LOCK: Mutex<()> = Mutex::new(());

fn write_config(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write config");
    file
}

#[test]
fn test_from_file_overrides_single_entries() {
    let file = write_config(
        r#"{
            "locationFactors": {"yuelu": 1.0},
            "basePrices": {"住宅": 15000},
            "economicLifeYears": 70
        }"#,
    );

    let manager = ConfigManager::from_file(file.path()).expect("Failed to load config");
    let config = manager.config();
    let defaults = ValuationConfig::default();

    assert_eq!(config.location_factors.get("yuelu"), 1.0);
    assert_eq!(config.location_factors.get("furong"), 1.26);
    assert_eq!(config.base_prices.get("住宅"), 15000.0);
    assert_eq!(config.base_prices.get("商业"), defaults.base_prices.get("商业"));
    assert_eq!(config.economic_life_years, 70.0);
    assert_eq!(config.residual_rate, defaults.residual_rate);
    assert_eq!(
        manager.source(),
        &ConfigSource::File(file.path().to_path_buf())
    );
}

#[test]
fn test_overrides_change_valuation() {
    let file = write_config(r#"{"locationFactors": {"yuelu": 1.0}}"#);
    let manager = ConfigManager::from_file(file.path()).unwrap();

    let default_engine = ValuationEngine::new(ValuationConfig::default(), valuation_date());
    let custom_engine = ValuationEngine::new(manager.into_config(), valuation_date());

    let params = yuelu_residence();
    // 岳麓区修正 0.896 → 1.0
    assert_eq!(default_engine.market_comparison(&params).unit_price, 9352.0);
    assert_eq!(custom_engine.market_comparison(&params).unit_price, 10438.0);
}

#[test]
fn test_from_file_missing() {
    let result = ConfigManager::from_file("/nonexistent/property-valuation.json");
    assert!(matches!(result, Err(ConfigError::FileNotFound(_))));
}

#[test]
fn test_from_file_rejects_unknown_keys_and_bad_json() {
    let file = write_config(r#"{"locationFactor": {"yuelu": 1.0}}"#);
    assert!(matches!(
        ConfigManager::from_file(file.path()),
        Err(ConfigError::Parse(_))
    ));

    let file = write_config("{ not json");
    assert!(matches!(
        ConfigManager::from_file(file.path()),
        Err(ConfigError::Parse(_))
    ));
}

#[test]
fn test_from_file_rejects_invalid_values() {
    let file = write_config(r#"{"capitalizationRates": {"住宅": 0}}"#);
    match ConfigManager::from_file(file.path()) {
        Err(ConfigError::InvalidValue { key, .. }) => {
            assert_eq!(key, config_keys::CAPITALIZATION_RATES)
        }
        other => panic!("expected InvalidValue, got {:?}", other),
    }

    let file = write_config(r#"{"residualRate": 1.0}"#);
    match ConfigManager::from_file(file.path()) {
        Err(ConfigError::InvalidValue { key, .. }) => assert_eq!(key, config_keys::RESIDUAL_RATE),
        other => panic!("expected InvalidValue, got {:?}", other),
    }
}

#[test]
fn test_load_uses_env_path() {
    let _guard = ENV_LOCK.lock().unwrap();
    let file = write_config(r#"{"basePrices": {"住宅": 13000}}"#);

    std::env::set_var(CONFIG_PATH_ENV, file.path());
    let loaded = ConfigManager::load();
    std::env::remove_var(CONFIG_PATH_ENV);

    let manager = loaded.expect("Failed to load config from env path");
    assert_eq!(manager.config().base_prices.get("住宅"), 13000.0);
}

#[test]
fn test_load_env_path_must_exist() {
    let _guard = ENV_LOCK.lock().unwrap();

    std::env::set_var(CONFIG_PATH_ENV, "/nonexistent/valuation-config.json");
    let loaded = ConfigManager::load();
    std::env::remove_var(CONFIG_PATH_ENV);

    assert!(matches!(loaded, Err(ConfigError::FileNotFound(_))));
}

#[test]
fn test_snapshot_round_trips() {
    let manager = ConfigManager::with_defaults();
    let snapshot = manager.get_config_snapshot().unwrap();

    let restored: ValuationConfig = serde_json::from_str(&snapshot).unwrap();
    assert_eq!(&restored, manager.config());

    let json: serde_json::Value = serde_json::from_str(&snapshot).unwrap();
    assert!(json.get(config_keys::LOCATION_FACTORS).is_some());
    assert!(json.get(config_keys::REFERENCE_LOT_RATIO).is_some());
}

#[test]
fn test_api_from_config_uses_loaded_tables() {
    let file = write_config(r#"{"locationFactors": {"yuelu": 1.0}}"#);
    let manager = ConfigManager::from_file(file.path()).unwrap();

    let api = ValuationApi::from_config(&manager, ValidationMode::Strict);
    assert_eq!(api.engine().config().location_factors.get("yuelu"), 1.0);
}

#[test]
fn test_api_load_reports_config_errors() {
    let _guard = ENV_LOCK.lock().unwrap();

    std::env::set_var(CONFIG_PATH_ENV, "/nonexistent/valuation-config.json");
    let missing = ValuationApi::load(ValidationMode::Strict);

    let file = write_config(r#"{"locationFactors": {"yuelu": 1.0}}"#);
    std::env::set_var(CONFIG_PATH_ENV, file.path());
    let loaded = ValuationApi::load(ValidationMode::AutoFix);
    std::env::remove_var(CONFIG_PATH_ENV);

    assert!(matches!(
        missing,
        Err(ApiError::Config(ConfigError::FileNotFound(_)))
    ));

    let api = loaded.expect("Failed to load api from env path");
    assert_eq!(api.mode(), ValidationMode::AutoFix);
    assert_eq!(api.engine().config().location_factors.get("yuelu"), 1.0);
}
