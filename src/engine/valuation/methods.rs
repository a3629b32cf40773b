use super::core::ValuationEngine;
use crate::domain::{
    CostFactors, IncomeFactors, MarketFactors, PropertyParams, ValuationFactors, ValuationMethod,
    ValuationResult,
};
use tracing::instrument;

// ===== 收益法常量 =====
const OPERATING_COST_RATIO_COMMERCIAL: f64 = 0.30;
const OPERATING_COST_RATIO_DEFAULT: f64 = 0.25;

// ===== 成本法常量 =====
const MANAGEMENT_FEE_RATE: f64 = 0.04; // 开发成本的 4%
const ESTIMATED_SALE_MARKUP: f64 = 1.3; // 预估售价 = (土地 + 开发) × 1.3
const SALES_FEE_RATE: f64 = 0.025; // 预估售价的 2.5%
const ANNUAL_INTEREST_RATE: f64 = 0.045;
const DEVELOPMENT_PERIOD_YEARS: f64 = 2.0;
const SALES_TAX_RATE: f64 = 0.056; // 预估售价的 5.6%
const PROFIT_MARGIN_COMMERCIAL: f64 = 0.30;
const PROFIT_MARGIN_DEFAULT: f64 = 0.25;

const COMMERCIAL_BUILDING_TYPE: &str = "商业";

/// 总价 = round(单价 × 面积),保证 |总价 - 单价 × 面积| ≤ 0.5
pub(super) fn total_from_unit(unit_price: f64, area: f64) -> f64 {
    (unit_price * area).round()
}

fn is_commercial(building_type: &str) -> bool {
    building_type.trim() == COMMERCIAL_BUILDING_TYPE
}

impl ValuationEngine {
    // ==========================================
    // 市场比较法
    // ==========================================

    /// 市场比较法
    ///
    /// 单价 = 基准价格 × 区域 × 建筑类型 × 装修 × 朝向 × 年限 × 楼层修正;
    /// 置信度 = clamp(95 - |综合修正 - 1| × 50, 70, 98)。
    #[instrument(skip(self, params), fields(area = params.area))]
    pub fn market_comparison(&self, params: &PropertyParams) -> ValuationResult {
        let scorer = self.scorer();

        let base_price = self.config().base_prices.get(&params.building_type);

        let location_correction = scorer.location_correction(&params.location);
        let building_type_correction = scorer.building_type_correction(&params.building_type);
        let decoration_correction = scorer.decoration_correction(&params.decoration_level);
        let orientation_correction = scorer.orientation_correction(&params.orientation);
        let age_correction = scorer.age_correction(params.construction_year);
        let floor_correction = scorer.floor_correction(params.floor, params.total_floors);

        let total_correction = location_correction
            * building_type_correction
            * decoration_correction
            * orientation_correction
            * age_correction
            * floor_correction;

        let unit_price = (base_price * total_correction).round();
        let total_value = total_from_unit(unit_price, params.area);

        let confidence = (95.0 - (total_correction - 1.0).abs() * 50.0).clamp(70.0, 98.0);

        ValuationResult {
            unit_price,
            total_value,
            confidence,
            valuation_method: ValuationMethod::MarketComparison,
            factors: ValuationFactors::Market(MarketFactors {
                base_price,
                location_correction,
                building_type_correction,
                decoration_correction,
                orientation_correction,
                age_correction,
                floor_correction,
                total_correction,
            }),
        }
    }

    // ==========================================
    // 收益法
    // ==========================================

    /// 收益法（直接资本化）
    ///
    /// 年租金按建筑类型查表并乘区域修正;净收益 / 资本化率 = 物业价值;
    /// 置信度 = clamp(90 - 资本化率 × 2, 65, 95)。
    #[instrument(skip(self, params), fields(area = params.area))]
    pub fn income(&self, params: &PropertyParams) -> ValuationResult {
        let scorer = self.scorer();
        let cfg = self.config();

        let rent_per_square = cfg.annual_rents.get(&params.building_type)
            * scorer.location_correction(&params.location);
        let gross_annual_income = params.area * rent_per_square;

        let operating_cost_ratio = if is_commercial(&params.building_type) {
            OPERATING_COST_RATIO_COMMERCIAL
        } else {
            OPERATING_COST_RATIO_DEFAULT
        };
        let annual_operating_cost = gross_annual_income * operating_cost_ratio;
        let net_annual_income = gross_annual_income - annual_operating_cost;

        let capitalization_rate = cfg.capitalization_rates.get(&params.building_type);
        let capitalized_value = net_annual_income / (capitalization_rate / 100.0);

        let unit_price = (capitalized_value / params.area).round();
        let total_value = total_from_unit(unit_price, params.area);

        let confidence = (90.0 - capitalization_rate * 2.0).clamp(65.0, 95.0);

        ValuationResult {
            unit_price,
            total_value,
            confidence,
            valuation_method: ValuationMethod::Income,
            factors: ValuationFactors::Income(IncomeFactors {
                gross_annual_income,
                annual_operating_cost,
                net_annual_income,
                capitalization_rate,
            }),
        }
    }

    // ==========================================
    // 成本法
    // ==========================================

    /// 成本法（重置成本 - 折旧）
    ///
    /// 土地成本按容积率分摊: 土地单价 × 基准容积率 / 实际容积率;
    /// 折旧为年限法,经济寿命内随房龄严格递增,超出后停在残值。
    #[instrument(skip(self, params), fields(area = params.area))]
    pub fn cost(&self, params: &PropertyParams) -> ValuationResult {
        let scorer = self.scorer();
        let cfg = self.config();
        let area = params.area;

        // 1. 土地取得成本（容积率分摊）
        let lot_ratio = if params.lot_ratio.is_finite() && params.lot_ratio > 0.0 {
            params.lot_ratio
        } else {
            cfg.reference_lot_ratio
        };
        let land_cost = cfg.land_costs.get(&params.building_type) * cfg.reference_lot_ratio
            / lot_ratio;
        let total_land_cost = area * land_cost;

        // 2. 开发成本
        let total_development_cost = area * cfg.development_costs.get(&params.building_type);

        // 3. 管理费用
        let management_fee = total_development_cost * MANAGEMENT_FEE_RATE;

        // 4. 销售费用
        let estimated_sale_price = (total_land_cost + total_development_cost) * ESTIMATED_SALE_MARKUP;
        let sales_fee = estimated_sale_price * SALES_FEE_RATE;

        // 5. 投资利息
        let total_investment = total_land_cost + total_development_cost + management_fee;
        let interest = total_investment * ANNUAL_INTEREST_RATE * DEVELOPMENT_PERIOD_YEARS;

        // 6. 销售税费
        let sales_tax = estimated_sale_price * SALES_TAX_RATE;

        // 7. 开发利润
        let profit_margin = if is_commercial(&params.building_type) {
            PROFIT_MARGIN_COMMERCIAL
        } else {
            PROFIT_MARGIN_DEFAULT
        };
        let profit = total_investment * profit_margin;

        // 8. 重置成本
        let replacement_cost = total_land_cost
            + total_development_cost
            + management_fee
            + sales_fee
            + interest
            + sales_tax
            + profit;

        // 9. 折旧
        let age = scorer.building_age(params.construction_year) as f64;
        let residual_value = replacement_cost * cfg.residual_rate;
        let depreciable = replacement_cost - residual_value;
        let annual_depreciation = depreciable / cfg.economic_life_years;
        let total_depreciation = (annual_depreciation * age).min(depreciable);

        // 10. 估价结果
        let unit_price = ((replacement_cost - total_depreciation) / area).round();
        let total_value = total_from_unit(unit_price, area);

        let confidence = (85.0 - age * 0.5).clamp(60.0, 90.0);

        ValuationResult {
            unit_price,
            total_value,
            confidence,
            valuation_method: ValuationMethod::Cost,
            factors: ValuationFactors::Cost(CostFactors {
                total_land_cost,
                total_development_cost,
                management_fee,
                sales_fee,
                interest,
                sales_tax,
                profit,
                replacement_cost,
                total_depreciation,
            }),
        }
    }
}
