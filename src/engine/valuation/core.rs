use crate::config::ValuationConfig;
use crate::domain::{
    CombinedFactors, MethodWeights, PropertyParams, ValuationFactors, ValuationMethod,
    ValuationResult,
};
use crate::engine::factor_scorer::FactorScorer;
use chrono::{Datelike, Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::instrument;

// ==========================================
// ValuationEngine - 估价计算引擎
// ==========================================
#[derive(Debug, Clone)]
pub struct ValuationEngine {
    config: Arc<ValuationConfig>,
    valuation_date: NaiveDate, // 估价基准日期（房龄、成交日期的参照）
}

/// 多方法对比汇总
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MethodComparison {
    pub average_unit_price: f64,
    pub average_total_value: f64,
    pub min_total_value: f64,
    pub max_total_value: f64,
    pub results: Vec<ValuationResult>,
}

impl ValuationEngine {
    /// 构造函数
    ///
    /// # 参数
    /// - config: 估价系数表
    /// - valuation_date: 估价基准日期
    pub fn new(config: ValuationConfig, valuation_date: NaiveDate) -> Self {
        Self {
            config: Arc::new(config),
            valuation_date,
        }
    }

    /// 使用默认系数与当天日期
    pub fn with_defaults() -> Self {
        Self::new(ValuationConfig::default(), Local::now().date_naive())
    }

    pub fn config(&self) -> &ValuationConfig {
        &self.config
    }

    pub fn valuation_date(&self) -> NaiveDate {
        self.valuation_date
    }

    pub fn current_year(&self) -> i32 {
        self.valuation_date.year()
    }

    pub(crate) fn scorer(&self) -> FactorScorer<'_> {
        FactorScorer::new(&self.config, self.current_year())
    }

    // ==========================================
    // 分发
    // ==========================================

    /// 按 `params.valuation_method` 选择估价方法
    ///
    /// 未识别的方法名回落到市场比较法（结果中的方法字段也为市场比较法）。
    #[instrument(skip(self, params), fields(method = %params.valuation_method))]
    pub fn calculate(&self, params: &PropertyParams) -> ValuationResult {
        let method = ValuationMethod::resolve(&params.valuation_method);
        self.calculate_with(method, params)
    }

    /// 使用指定方法估价
    pub fn calculate_with(&self, method: ValuationMethod, params: &PropertyParams) -> ValuationResult {
        match method {
            ValuationMethod::MarketComparison => self.market_comparison(params),
            ValuationMethod::Income => self.income(params),
            ValuationMethod::Cost => self.cost(params),
            ValuationMethod::Combined => self.combined(params),
        }
    }

    // ==========================================
    // 综合估价法
    // ==========================================

    /// 综合估价法: 三种方法按固定权重 0.4 / 0.3 / 0.3 加权
    ///
    /// 总价由加权单价 × 面积重新计算,而不是对三个总价加权。
    #[instrument(skip(self, params), fields(area = params.area))]
    pub fn combined(&self, params: &PropertyParams) -> ValuationResult {
        let market_result = self.market_comparison(params);
        let income_result = self.income(params);
        let cost_result = self.cost(params);

        let weights = MethodWeights::STANDARD;

        let unit_price = (market_result.unit_price * weights.market
            + income_result.unit_price * weights.income
            + cost_result.unit_price * weights.cost)
            .round();
        let total_value = super::methods::total_from_unit(unit_price, params.area);

        let confidence = (market_result.confidence * weights.market
            + income_result.confidence * weights.income
            + cost_result.confidence * weights.cost)
            .round();

        tracing::debug!(
            market = market_result.unit_price,
            income = income_result.unit_price,
            cost = cost_result.unit_price,
            unit_price,
            "综合估价完成"
        );

        ValuationResult {
            unit_price,
            total_value,
            confidence,
            valuation_method: ValuationMethod::Combined,
            factors: ValuationFactors::Combined(CombinedFactors {
                market_result: Box::new(market_result),
                income_result: Box::new(income_result),
                cost_result: Box::new(cost_result),
                weights,
            }),
        }
    }

    // ==========================================
    // 多方法对比
    // ==========================================

    /// 依次运行全部四种方法并汇总
    pub fn compare_methods(&self, params: &PropertyParams) -> MethodComparison {
        let results: Vec<ValuationResult> = ValuationMethod::ALL
            .iter()
            .map(|m| self.calculate_with(*m, params))
            .collect();

        let n = results.len() as f64;
        let average_unit_price = (results.iter().map(|r| r.unit_price).sum::<f64>() / n).round();
        let average_total_value =
            (results.iter().map(|r| r.total_value).sum::<f64>() / n).round();
        let min_total_value = results
            .iter()
            .map(|r| r.total_value)
            .fold(f64::INFINITY, f64::min);
        let max_total_value = results
            .iter()
            .map(|r| r.total_value)
            .fold(f64::NEG_INFINITY, f64::max);

        MethodComparison {
            average_unit_price,
            average_total_value,
            min_total_value,
            max_total_value,
            results,
        }
    }
}
