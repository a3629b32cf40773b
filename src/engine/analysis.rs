// ==========================================
// 房地产估价引擎 - 辅助分析生成器
// ==========================================
// 职责: 生成展示用的可比案例、月度价格趋势、影响因素分析
// 输入: PropertyParams
// 输出: ComparableProperty[3] / TrendAnalysis / FactorAnalysisItem[]
// ==========================================
// 红线: 仅用于展示,不参与估价计算
// 红线: 随机扰动由参数 + 估价日期决定的种子产生,相同输入结果相同
// ==========================================

use crate::domain::{
    ComparableProperty, FactorAnalysisItem, MonthlyPrice, PropertyParams, TrendAnalysis,
};
use crate::engine::valuation::ValuationEngine;
use chrono::Duration;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sha2::{Digest, Sha256};
use tracing::instrument;

/// 可比案例数量
pub const COMPARABLE_COUNT: usize = 3;
/// 趋势月份数
pub const TREND_MONTHS: usize = 12;
/// 同比涨幅范围（%）
pub const MIN_YEAR_ON_YEAR_GROWTH: f64 = -2.0;
pub const MAX_YEAR_ON_YEAR_GROWTH: f64 = 8.0;

// 影响因素权重（合计 1.0）
const FACTOR_WEIGHTS: [(&str, f64); 8] = [
    ("地理位置", 0.25),
    ("建筑类型", 0.15),
    ("装修等级", 0.15),
    ("朝向", 0.10),
    ("房龄", 0.15),
    ("楼层", 0.05),
    ("周边配套", 0.10),
    ("绿化环境", 0.05),
];

// ==========================================
// AnalysisGenerator - 辅助分析生成器
// ==========================================
#[derive(Debug, Clone)]
pub struct AnalysisGenerator {
    engine: ValuationEngine,
}

impl AnalysisGenerator {
    pub fn new(engine: ValuationEngine) -> Self {
        Self { engine }
    }

    pub fn engine(&self) -> &ValuationEngine {
        &self.engine
    }

    /// 生成 3 个可比案例
    ///
    /// 面积在估价对象 ±10% 内,单价在市场比较法单价 ±5% 内,
    /// 成交日期在估价日期前一年内,相似度 85-100。
    #[instrument(skip(self, params), fields(area = params.area))]
    pub fn comparable_properties(&self, params: &PropertyParams) -> Vec<ComparableProperty> {
        let seed = self.seed_for(params, "comparables");
        let mut rng = StdRng::seed_from_u64(seed);

        let market_unit_price = self.engine.market_comparison(params).unit_price;
        let valuation_date = self.engine.valuation_date();
        let date_tag = valuation_date.format("%Y%m%d");

        (1..=COMPARABLE_COUNT)
            .map(|i| {
                let case_area = round_to(params.area * (0.9 + rng.gen::<f64>() * 0.2), 1);
                let unit_price = (market_unit_price * (0.95 + rng.gen::<f64>() * 0.1)).round();
                let days_ago = (rng.gen::<f64>() * 365.0).floor() as i64;
                let transaction_date = valuation_date
                    .checked_sub_signed(Duration::days(days_ago))
                    .unwrap_or(valuation_date);
                let similarity = (85.0 + rng.gen::<f64>() * 15.0).round();

                ComparableProperty {
                    case_id: format!("CASE{}{:06X}{}", date_tag, seed & 0xFF_FFFF, i),
                    area: case_area,
                    building_type: params.building_type.clone(),
                    location: params.location.clone(),
                    unit_price,
                    total_price: (unit_price * case_area).round(),
                    transaction_date,
                    similarity,
                }
            })
            .collect()
    }

    /// 生成 12 个月价格趋势 + 同比涨幅 + 6 个月预测
    #[instrument(skip(self, params))]
    pub fn trend_analysis(&self, params: &PropertyParams) -> TrendAnalysis {
        let seed = self.seed_for(params, "trend");
        let mut rng = StdRng::seed_from_u64(seed);

        let base_price = self.engine.config().base_prices.get(&params.building_type);

        let monthly_trend: Vec<MonthlyPrice> = (0..TREND_MONTHS)
            .map(|index| MonthlyPrice {
                month: format!("{}月", index + 1),
                price: (base_price * (0.95 + index as f64 * 0.01 + rng.gen::<f64>() * 0.02))
                    .round(),
            })
            .collect();

        let raw_growth = rng.gen::<f64>() * 10.0 + MIN_YEAR_ON_YEAR_GROWTH;
        let year_on_year_growth =
            round_to(raw_growth, 1).clamp(MIN_YEAR_ON_YEAR_GROWTH, MAX_YEAR_ON_YEAR_GROWTH);

        let direction = if year_on_year_growth > 0.0 {
            "上涨"
        } else if year_on_year_growth < 0.0 {
            "下跌"
        } else {
            "持平"
        };
        let prediction = format!(
            "预计未来6个月{}价格{}{}%",
            params.building_type.trim(),
            direction,
            year_on_year_growth.abs()
        );

        let last_price = monthly_trend.last().map(|m| m.price).unwrap_or(base_price);
        // 半年预测取同比涨幅的一半
        let predicted_unit_price = (last_price * (1.0 + year_on_year_growth / 200.0)).round();

        TrendAnalysis {
            monthly_trend,
            year_on_year_growth,
            prediction,
            predicted_unit_price,
        }
    }

    /// 生成影响因素分析（名称与顺序固定）
    pub fn factors_analysis(&self, params: &PropertyParams) -> Vec<FactorAnalysisItem> {
        let scorer = self.engine.scorer();

        let values = [
            scorer.location_score(&params.location),
            scorer.building_type_score(&params.building_type),
            scorer.decoration_score(&params.decoration_level),
            scorer.orientation_score(&params.orientation),
            scorer.age_score(params.construction_year),
            scorer.floor_score(params.floor, params.total_floors),
            scorer.facilities_score(&params.nearby_facilities),
            scorer.green_score(params.green_ratio),
        ];

        FACTOR_WEIGHTS
            .iter()
            .zip(values)
            .map(|((name, weight), value)| FactorAnalysisItem {
                name: name.to_string(),
                value,
                weight: *weight,
            })
            .collect()
    }

    /// 由参数（不含估价方法）+ 估价日期 + 用途标签派生随机种子
    fn seed_for(&self, params: &PropertyParams, purpose: &str) -> u64 {
        let canonical = serde_json::to_string(&params.with_method("")).unwrap_or_default();
        let date = self.engine.valuation_date().format("%Y-%m-%d").to_string();
        stable_seed(&[canonical.as_bytes(), date.as_bytes(), purpose.as_bytes()])
    }
}

/// SHA-256 摘要前 8 字节（小端）作为种子,片段间以 0 字节分隔
fn stable_seed(parts: &[&[u8]]) -> u64 {
    let mut hasher = Sha256::new();
    for part in parts {
        hasher.update(part);
        hasher.update([0u8]);
    }
    let digest = hasher.finalize();
    let mut head = [0u8; 8];
    head.copy_from_slice(&digest[..8]);
    u64::from_le_bytes(head)
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
