// ==========================================
// 房地产估价引擎 - 配置层
// ==========================================
// 职责: 估价系数表 + 配置文件加载（按条目覆写默认值）
// 存储: JSON 文件 (不落库)
// ==========================================

pub mod config_manager;
pub mod valuation_config;

// 重导出核心配置类型
pub use config_manager::{ConfigError, ConfigManager, ConfigSource, CONFIG_PATH_ENV};
pub use valuation_config::{
    CorrectionTable, TypeTable, ValuationConfig, ValuationConfigOverrides,
    BASELINE_BUILDING_TYPE, NEUTRAL_CORRECTION,
};

/// 配置文件中的键名（camelCase,与 ValuationConfig 序列化一致）
pub mod config_keys {
    pub const LOCATION_FACTORS: &str = "locationFactors";
    pub const BUILDING_TYPE_FACTORS: &str = "buildingTypeFactors";
    pub const DECORATION_FACTORS: &str = "decorationFactors";
    pub const ORIENTATION_FACTORS: &str = "orientationFactors";
    pub const BASE_PRICES: &str = "basePrices";
    pub const ANNUAL_RENTS: &str = "annualRents";
    pub const CAPITALIZATION_RATES: &str = "capitalizationRates";
    pub const LAND_COSTS: &str = "landCosts";
    pub const DEVELOPMENT_COSTS: &str = "developmentCosts";
    pub const REFERENCE_LOT_RATIO: &str = "referenceLotRatio";
    pub const ECONOMIC_LIFE_YEARS: &str = "economicLifeYears";
    pub const RESIDUAL_RATE: &str = "residualRate";
}
