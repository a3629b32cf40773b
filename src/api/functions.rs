// ==========================================
// 房地产估价引擎 - 函数式接口
// ==========================================
// 职责: 以默认系数表 + 当天日期提供无状态的一次性调用入口
// 说明: 需要自定义系数或固定估价日期时，直接使用 ValuationEngine / ValuationApi
// ==========================================

use crate::api::error::ApiResult;
use crate::api::validator::ValidationReport;
use crate::api::valuation_api::ValuationApi;
use crate::domain::{
    ComparableProperty, FactorAnalysisItem, PropertyParams, TrendAnalysis, ValuationReport,
    ValuationResult,
};
use crate::engine::{AnalysisGenerator, ValuationEngine};

fn default_engine() -> ValuationEngine {
    ValuationEngine::with_defaults()
}

/// 市场比较法
pub fn market_comparison_method(params: &PropertyParams) -> ValuationResult {
    default_engine().market_comparison(params)
}

/// 收益法
pub fn income_method(params: &PropertyParams) -> ValuationResult {
    default_engine().income(params)
}

/// 成本法
pub fn cost_method(params: &PropertyParams) -> ValuationResult {
    default_engine().cost(params)
}

/// 综合估价法
pub fn combined_valuation_method(params: &PropertyParams) -> ValuationResult {
    default_engine().combined(params)
}

/// 按 `params.valuation_method` 分发
pub fn calculate_valuation(params: &PropertyParams) -> ValuationResult {
    default_engine().calculate(params)
}

pub fn generate_comparable_properties(params: &PropertyParams) -> Vec<ComparableProperty> {
    AnalysisGenerator::new(default_engine()).comparable_properties(params)
}

pub fn generate_trend_analysis(params: &PropertyParams) -> TrendAnalysis {
    AnalysisGenerator::new(default_engine()).trend_analysis(params)
}

pub fn generate_factors_analysis(params: &PropertyParams) -> Vec<FactorAnalysisItem> {
    AnalysisGenerator::new(default_engine()).factors_analysis(params)
}

/// 完整估价（严格校验）
pub fn perform_valuation(params: &PropertyParams) -> ApiResult<ValuationReport> {
    ValuationApi::with_defaults().perform_valuation(params)
}

pub fn validate_valuation_params(params: &PropertyParams) -> ValidationReport {
    ValuationApi::with_defaults().validate(params)
}
