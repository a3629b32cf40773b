// ==========================================
// 房地产估价引擎 - 核心库
// ==========================================
// 技术栈: Rust + serde + tracing
// 系统定位: 估价计算库 (纯计算、无持久化)
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "zh-CN");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 值对象与类型
pub mod domain;

// 引擎层 - 估价计算
pub mod engine;

// 导入层 - 批量估价 CSV
pub mod importer;

// 配置层 - 系数表
pub mod config;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// 性能统计
pub mod perf;

// API 层 - 校验与报告
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    ComparableProperty, FactorAnalysisItem, MethodWeights, PropertyParams, TrendAnalysis,
    ValuationFactors, ValuationMethod, ValuationReport, ValuationResult,
};

// 引擎
pub use engine::{AnalysisGenerator, FactorScorer, MethodComparison, ValuationEngine};

// 配置
pub use config::{ConfigManager, ValuationConfig};

// API
pub use api::{
    ApiError, ApiResult, BatchValuationItem, ParamsValidator, ValidationMode, ValidationReport,
    ValuationApi,
};

// 函数式接口（默认系数 + 当天日期）
pub use api::functions::{
    calculate_valuation, combined_valuation_method, cost_method, generate_comparable_properties,
    generate_factors_analysis, generate_trend_analysis, income_method, market_comparison_method,
    perform_valuation, validate_valuation_params,
};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "房地产估价引擎";
