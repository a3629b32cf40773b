// ==========================================
// 房地产估价引擎 - 领域模型层
// ==========================================
// 职责: 定义估价输入/输出值对象与估价方法类型
// 红线: 不含计算逻辑,不含 IO
// ==========================================

pub mod property;
pub mod types;
pub mod valuation;

// 重导出核心类型
pub use property::PropertyParams;
pub use types::ValuationMethod;
pub use valuation::{
    CombinedFactors, ComparableProperty, CostFactors, EvaluationDetails, FactorAnalysisItem,
    IncomeFactors, MarketFactors, MethodWeights, MonthlyPrice, TrendAnalysis, ValuationFactors,
    ValuationReport, ValuationResult,
};
