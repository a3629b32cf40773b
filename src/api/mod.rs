// ==========================================
// 房地产估价引擎 - API 层
// ==========================================
// 职责: 参数校验、完整估价报告、批量估价、函数式接口
// ==========================================

pub mod error;
pub mod functions;
pub mod validator;
pub mod valuation_api;

// 重导出核心类型
pub use error::{ApiError, ApiResult, ValidationViolation};
pub use functions::{
    calculate_valuation, combined_valuation_method, cost_method, generate_comparable_properties,
    generate_factors_analysis, generate_trend_analysis, income_method, market_comparison_method,
    perform_valuation, validate_valuation_params,
};
pub use validator::{ParamsValidator, ValidationMode, ValidationReport};
pub use valuation_api::{BatchValuationItem, ValuationApi, MAX_BATCH_SIZE};
