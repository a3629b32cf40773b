// ==========================================
// 房地产估价引擎 - 领域类型定义
// ==========================================
// 职责: 估价方法枚举（策略表的键）
// 红线: 未知估价方法不报错,回落到市场比较法
// ==========================================

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

// ==========================================
// 估价方法 (Valuation Method)
// ==========================================
// 序列化格式: 中文方法名 (与前端/报告一致)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ValuationMethod {
    #[default]
    MarketComparison, // 市场比较法
    Income,           // 收益法
    Cost,             // 成本法
    Combined,         // 综合估价法
}

impl ValuationMethod {
    /// 全部估价方法（按展示顺序）
    pub const ALL: [ValuationMethod; 4] = [
        ValuationMethod::MarketComparison,
        ValuationMethod::Income,
        ValuationMethod::Cost,
        ValuationMethod::Combined,
    ];

    pub fn title_cn(&self) -> &'static str {
        match self {
            ValuationMethod::MarketComparison => "市场比较法",
            ValuationMethod::Income => "收益法",
            ValuationMethod::Cost => "成本法",
            ValuationMethod::Combined => "综合估价法",
        }
    }

    /// 解析估价方法（永不失败）
    ///
    /// 无法识别的名称回落到 `MarketComparison`,这是约定的默认行为而非错误。
    pub fn resolve(name: &str) -> Self {
        name.parse().unwrap_or_else(|_| {
            tracing::debug!(requested = %name, "未知估价方法,回落到市场比较法");
            ValuationMethod::default()
        })
    }
}

impl fmt::Display for ValuationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title_cn())
    }
}

impl std::str::FromStr for ValuationMethod {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed {
            "市场比较法" => return Ok(ValuationMethod::MarketComparison),
            "收益法" => return Ok(ValuationMethod::Income),
            "成本法" => return Ok(ValuationMethod::Cost),
            "综合估价法" => return Ok(ValuationMethod::Combined),
            _ => {}
        }

        match trimmed.to_lowercase().as_str() {
            "market_comparison" | "market-comparison" | "market" => {
                Ok(ValuationMethod::MarketComparison)
            }
            "income" => Ok(ValuationMethod::Income),
            "cost" => Ok(ValuationMethod::Cost),
            "combined" => Ok(ValuationMethod::Combined),
            other => Err(format!("未知估价方法: {}", other)),
        }
    }
}

impl Serialize for ValuationMethod {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.title_cn())
    }
}

impl<'de> Deserialize<'de> for ValuationMethod {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
