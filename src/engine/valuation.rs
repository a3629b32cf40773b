// ==========================================
// 房地产估价引擎 - 估价计算引擎
// ==========================================
// 职责: 市场比较法 / 收益法 / 成本法 / 综合估价法 + 方法分发
// 输入: PropertyParams
// 输出: ValuationResult (每次调用全新构造)
// ==========================================
// 红线: 纯计算,无共享可变状态;相同输入 + 相同估价日期 → 相同结果
// 红线: 未知估价方法回落到市场比较法,不报错
// ==========================================

mod core;
mod methods;


pub use self::core::{MethodComparison, ValuationEngine};
