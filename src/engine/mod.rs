// ==========================================
// 房地产估价引擎 - 引擎层
// ==========================================
// 职责: 估价计算与展示数据生成,纯函数式、无 IO
// 红线: 所有结果必须携带解释性因子 (factors)
// ==========================================

pub mod analysis;
pub mod factor_scorer;
pub mod valuation;

// 重导出核心引擎
pub use analysis::AnalysisGenerator;
pub use factor_scorer::FactorScorer;
pub use valuation::{MethodComparison, ValuationEngine};
