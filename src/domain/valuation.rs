// ==========================================
// 房地产估价引擎 - 估价结果领域模型
// ==========================================
// 职责: 估价结果、可比案例、趋势分析、影响因素分析、完整估价报告
// 红线: totalValue 必须由取整后的 unitPrice × area 推导
// ==========================================

use crate::domain::property::PropertyParams;
use crate::domain::types::ValuationMethod;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// ValuationResult - 单一估价方法的结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationResult {
    pub unit_price: f64,                 // 单价 (元/㎡)
    pub total_value: f64,                // 总价 (元)
    pub confidence: f64,                 // 置信度 (0, 100]
    pub valuation_method: ValuationMethod,
    pub factors: ValuationFactors,       // 方法相关的解释性数据
}

impl ValuationResult {
    /// 综合估价法的子结果（其他方法返回 None）
    pub fn combined_factors(&self) -> Option<&CombinedFactors> {
        match &self.factors {
            ValuationFactors::Combined(f) => Some(f),
            _ => None,
        }
    }
}

// ==========================================
// ValuationFactors - 方法相关的解释性数据
// ==========================================
// 序列化为裸对象 (untagged),字段集合互不相交
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ValuationFactors {
    Combined(CombinedFactors),
    Market(MarketFactors),
    Income(IncomeFactors),
    Cost(CostFactors),
}

/// 市场比较法修正系数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketFactors {
    pub base_price: f64,
    pub location_correction: f64,
    pub building_type_correction: f64,
    pub decoration_correction: f64,
    pub orientation_correction: f64,
    pub age_correction: f64,
    pub floor_correction: f64,
    pub total_correction: f64,
}

/// 收益法中间量
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeFactors {
    pub gross_annual_income: f64,
    pub annual_operating_cost: f64,
    pub net_annual_income: f64,
    pub capitalization_rate: f64, // 百分数,如 3.5 表示 3.5%
}

/// 成本法中间量（均为总额,单位: 元）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostFactors {
    pub total_land_cost: f64,
    pub total_development_cost: f64,
    pub management_fee: f64,
    pub sales_fee: f64,
    pub interest: f64,
    pub sales_tax: f64,
    pub profit: f64,
    pub replacement_cost: f64,
    pub total_depreciation: f64,
}

/// 综合估价法: 三个子结果 + 权重
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CombinedFactors {
    pub market_result: Box<ValuationResult>,
    pub income_result: Box<ValuationResult>,
    pub cost_result: Box<ValuationResult>,
    pub weights: MethodWeights,
}

// ==========================================
// MethodWeights - 综合估价法权重
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MethodWeights {
    pub market: f64,
    pub income: f64,
    pub cost: f64,
}

impl MethodWeights {
    /// 固定权重: 市场比较法 0.4 / 收益法 0.3 / 成本法 0.3
    pub const STANDARD: MethodWeights = MethodWeights {
        market: 0.4,
        income: 0.3,
        cost: 0.3,
    };

    pub fn sum(&self) -> f64 {
        self.market + self.income + self.cost
    }
}

impl Default for MethodWeights {
    fn default() -> Self {
        Self::STANDARD
    }
}

// ==========================================
// 辅助展示数据
// ==========================================

/// 可比案例（模拟生成,不落库）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparableProperty {
    pub case_id: String,
    pub area: f64,
    pub building_type: String,
    pub location: String,
    pub unit_price: f64,
    pub total_price: f64,
    pub transaction_date: NaiveDate, // 序列化为 YYYY-MM-DD
    pub similarity: f64,             // 相似度 85-100
}

/// 月度价格点
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPrice {
    pub month: String, // "1月" .. "12月"
    pub price: f64,
}

/// 趋势分析
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendAnalysis {
    pub monthly_trend: Vec<MonthlyPrice>,
    pub year_on_year_growth: f64, // 百分数,范围 [-2, 8]
    pub prediction: String,
    pub predicted_unit_price: f64, // 未来 6 个月预测单价
}

/// 影响因素
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactorAnalysisItem {
    pub name: String,
    pub value: f64,  // 0-100
    pub weight: f64, // > 0
}

// ==========================================
// ValuationReport - 完整估价报告
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationReport {
    #[serde(flatten)]
    pub result: ValuationResult,
    pub property_id: String,
    pub valuation_date: NaiveDate,     // 估价基准日期
    pub comparable_properties: Vec<ComparableProperty>,
    pub trend_analysis: TrendAnalysis,
    pub evaluation_details: EvaluationDetails,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationDetails {
    pub factors_analysis: Vec<FactorAnalysisItem>,
    pub valuation_params: PropertyParams,
    pub confidence_level: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_market_result() -> ValuationResult {
        ValuationResult {
            unit_price: 9352.0,
            total_value: 935200.0,
            confidence: 82.4,
            valuation_method: ValuationMethod::MarketComparison,
            factors: ValuationFactors::Market(MarketFactors {
                base_price: 12500.0,
                location_correction: 0.896,
                building_type_correction: 1.0,
                decoration_correction: 1.0,
                orientation_correction: 1.0,
                age_correction: 0.835,
                floor_correction: 1.0,
                total_correction: 0.74816,
            }),
        }
    }

    #[test]
    fn test_standard_weights_sum_to_one() {
        let w = MethodWeights::default();
        assert_eq!(w, MethodWeights::STANDARD);
        assert!((w.sum() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_result_serializes_camel_case() {
        let value = serde_json::to_value(sample_market_result()).unwrap();
        assert_eq!(value["unitPrice"], 9352.0);
        assert_eq!(value["valuationMethod"], "市场比较法");
        assert_eq!(value["factors"]["basePrice"], 12500.0);
        assert!(value["factors"].get("marketResult").is_none());
    }

    #[test]
    fn test_untagged_factors_round_trip_to_same_variant() {
        let original = sample_market_result();
        let json = serde_json::to_string(&original).unwrap();
        let back: ValuationResult = serde_json::from_str(&json).unwrap();
        assert!(matches!(back.factors, ValuationFactors::Market(_)));
        assert!(back.combined_factors().is_none());
    }
}
