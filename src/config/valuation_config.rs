// ==========================================
// 房地产估价引擎 - 估价系数表
// ==========================================
// 职责: 修正系数、基准价格、租金/资本化率、成本等全部估价常量
// 红线: 未知区域/装修/朝向的修正系数为 1.0（中性）,不报错
// 红线: 按建筑类型查表时未知类型回落到基准类型（住宅）
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 基准建筑类型（未知类型的查表回落键）
pub const BASELINE_BUILDING_TYPE: &str = "住宅";

/// 中性修正系数
pub const NEUTRAL_CORRECTION: f64 = 1.0;

// ==========================================
// CorrectionTable - 修正系数表
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct CorrectionTable(BTreeMap<String, f64>);

impl CorrectionTable {
    pub fn from_pairs(pairs: &[(&str, f64)]) -> Self {
        Self(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect(),
        )
    }

    /// 查询修正系数,未知键返回中性系数 1.0
    pub fn get(&self, key: &str) -> f64 {
        self.lookup(key).unwrap_or(NEUTRAL_CORRECTION)
    }

    /// 查询修正系数,未知键返回 None
    pub fn lookup(&self, key: &str) -> Option<f64> {
        self.0.get(key.trim()).copied()
    }

    /// 表内最大系数（不小于中性系数,保证中性值的评分不超过 100）
    pub fn max(&self) -> f64 {
        self.0
            .values()
            .copied()
            .fold(NEUTRAL_CORRECTION, f64::max)
    }

    pub fn entries(&self) -> impl Iterator<Item = (&String, &f64)> {
        self.0.iter()
    }

    pub(crate) fn merge(&mut self, overrides: &BTreeMap<String, f64>) {
        for (k, v) in overrides {
            self.0.insert(k.trim().to_string(), *v);
        }
    }
}

// ==========================================
// TypeTable - 按建筑类型查表
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(transparent)]
pub struct TypeTable(BTreeMap<String, f64>);

impl TypeTable {
    pub fn from_pairs(pairs: &[(&str, f64)]) -> Self {
        Self(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), *v))
                .collect(),
        )
    }

    /// 按建筑类型查表,未知类型回落到住宅
    ///
    /// 默认表恒含住宅条目,且 ConfigManager 加载后会校验该条目存在。
    pub fn get(&self, building_type: &str) -> f64 {
        self.0
            .get(building_type.trim())
            .or_else(|| self.0.get(BASELINE_BUILDING_TYPE))
            .copied()
            .unwrap_or_default()
    }

    pub fn contains(&self, building_type: &str) -> bool {
        self.0.contains_key(building_type.trim())
    }

    pub fn entries(&self) -> impl Iterator<Item = (&String, &f64)> {
        self.0.iter()
    }

    pub(crate) fn merge(&mut self, overrides: &BTreeMap<String, f64>) {
        for (k, v) in overrides {
            self.0.insert(k.trim().to_string(), *v);
        }
    }
}

// ==========================================
// ValuationConfig - 估价系数全集
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationConfig {
    // ===== 修正系数 =====
    pub location_factors: CorrectionTable,
    pub building_type_factors: CorrectionTable,
    pub decoration_factors: CorrectionTable,
    pub orientation_factors: CorrectionTable,

    // ===== 按建筑类型的价格/成本表 =====
    pub base_prices: TypeTable,          // 基准单价 (元/㎡)
    pub annual_rents: TypeTable,         // 年租金 (元/㎡/年)
    pub capitalization_rates: TypeTable, // 资本化率 (%)
    pub land_costs: TypeTable,           // 土地取得成本 (元/㎡)
    pub development_costs: TypeTable,    // 开发成本 (元/㎡)

    // ===== 标量参数 =====
    pub reference_lot_ratio: f64,  // 土地成本表对应的基准容积率
    pub economic_life_years: f64,  // 建筑经济寿命（年）
    pub residual_rate: f64,        // 残值率
}

impl Default for ValuationConfig {
    fn default() -> Self {
        Self {
            location_factors: CorrectionTable::from_pairs(&[
                ("xjang", 1.0),
                ("furong", 1.26),
                ("yuelu", 0.896),
                ("tianxin", 1.088),
                ("kaifu", 1.136),
                // 扩展区域
                ("yuhua", 1.12),
                ("wangcheng", 0.85),
                ("changsha_county", 0.92),
                ("ningxiang", 0.78),
                ("liuyang", 0.75),
                // 外地城市
                ("chengdu", 0.95),
                ("beijing", 2.1),
                ("shanghai", 2.3),
                ("guangzhou", 1.8),
                ("shenzhen", 2.5),
            ]),
            building_type_factors: CorrectionTable::from_pairs(&[
                ("住宅", 1.0),
                ("商业", 1.8),
                ("办公", 1.5),
                ("工业", 0.8),
                ("别墅", 2.0),
                ("公寓", 0.95),
                ("写字楼", 1.45),
                ("商铺", 2.2),
                ("仓库", 0.7),
                ("厂房", 0.75),
                ("酒店", 1.6),
                ("文旅地产", 1.3),
                ("养老地产", 1.2),
                ("物流地产", 0.85),
                ("教育地产", 1.15),
                ("医疗地产", 1.35),
                ("综合体", 2.1),
            ]),
            decoration_factors: CorrectionTable::from_pairs(&[
                ("毛坯", 0.8),
                ("简装", 0.9),
                ("中等", 1.0),
                ("精装", 1.1),
                ("豪华", 1.2),
            ]),
            orientation_factors: CorrectionTable::from_pairs(&[
                ("南北", 1.0),
                ("南", 0.95),
                ("北", 0.85),
                ("东西", 0.9),
                ("东", 0.92),
                ("西", 0.88),
                ("东南", 0.98),
                ("西南", 0.93),
                ("东北", 0.9),
                ("西北", 0.86),
            ]),
            // 以下按类型的价格/成本表只含五个基础类型,
            // 其余类型（公寓、商铺等）取住宅条目,再由建筑类型修正系数区分
            base_prices: TypeTable::from_pairs(&[
                ("住宅", 12500.0),
                ("商业", 22500.0),
                ("办公", 18750.0),
                ("工业", 10000.0),
                ("别墅", 25000.0),
            ]),
            annual_rents: TypeTable::from_pairs(&[
                ("住宅", 360.0),
                ("商业", 1800.0),
                ("办公", 900.0),
                ("工业", 300.0),
                ("别墅", 720.0),
            ]),
            capitalization_rates: TypeTable::from_pairs(&[
                ("住宅", 3.5),
                ("商业", 5.0),
                ("办公", 4.5),
                ("工业", 4.0),
                ("别墅", 3.8),
            ]),
            land_costs: TypeTable::from_pairs(&[
                ("住宅", 4500.0),
                ("商业", 9000.0),
                ("办公", 6750.0),
                ("工业", 3600.0),
                ("别墅", 9000.0),
            ]),
            development_costs: TypeTable::from_pairs(&[
                ("住宅", 6000.0),
                ("商业", 12000.0),
                ("办公", 9000.0),
                ("工业", 4800.0),
                ("别墅", 12000.0),
            ]),
            reference_lot_ratio: 2.5,
            economic_life_years: 50.0,
            residual_rate: 0.05,
        }
    }
}

// ==========================================
// ValuationConfigOverrides - 配置文件覆写
// ==========================================
// 表级覆写按条目合并,未出现的条目保持默认值
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ValuationConfigOverrides {
    #[serde(default)]
    pub location_factors: Option<BTreeMap<String, f64>>,
    #[serde(default)]
    pub building_type_factors: Option<BTreeMap<String, f64>>,
    #[serde(default)]
    pub decoration_factors: Option<BTreeMap<String, f64>>,
    #[serde(default)]
    pub orientation_factors: Option<BTreeMap<String, f64>>,
    #[serde(default)]
    pub base_prices: Option<BTreeMap<String, f64>>,
    #[serde(default)]
    pub annual_rents: Option<BTreeMap<String, f64>>,
    #[serde(default)]
    pub capitalization_rates: Option<BTreeMap<String, f64>>,
    #[serde(default)]
    pub land_costs: Option<BTreeMap<String, f64>>,
    #[serde(default)]
    pub development_costs: Option<BTreeMap<String, f64>>,
    #[serde(default)]
    pub reference_lot_ratio: Option<f64>,
    #[serde(default)]
    pub economic_life_years: Option<f64>,
    #[serde(default)]
    pub residual_rate: Option<f64>,
}

impl ValuationConfig {
    /// 应用覆写（按条目合并）
    pub fn apply_overrides(&mut self, o: &ValuationConfigOverrides) {
        fn merge_corr(t: &mut CorrectionTable, o: &Option<BTreeMap<String, f64>>) {
            if let Some(m) = o {
                t.merge(m);
            }
        }
        fn merge_type(t: &mut TypeTable, o: &Option<BTreeMap<String, f64>>) {
            if let Some(m) = o {
                t.merge(m);
            }
        }

        merge_corr(&mut self.location_factors, &o.location_factors);
        merge_corr(&mut self.building_type_factors, &o.building_type_factors);
        merge_corr(&mut self.decoration_factors, &o.decoration_factors);
        merge_corr(&mut self.orientation_factors, &o.orientation_factors);

        merge_type(&mut self.base_prices, &o.base_prices);
        merge_type(&mut self.annual_rents, &o.annual_rents);
        merge_type(&mut self.capitalization_rates, &o.capitalization_rates);
        merge_type(&mut self.land_costs, &o.land_costs);
        merge_type(&mut self.development_costs, &o.development_costs);

        if let Some(v) = o.reference_lot_ratio {
            self.reference_lot_ratio = v;
        }
        if let Some(v) = o.economic_life_years {
            self.economic_life_years = v;
        }
        if let Some(v) = o.residual_rate {
            self.residual_rate = v;
        }
    }

    /// 基本合法性校验,返回 (配置键, 说明)
    pub fn check(&self) -> Result<(), (String, String)> {
        use super::config_keys as keys;

        let corr_tables = [
            (keys::LOCATION_FACTORS, &self.location_factors),
            (keys::BUILDING_TYPE_FACTORS, &self.building_type_factors),
            (keys::DECORATION_FACTORS, &self.decoration_factors),
            (keys::ORIENTATION_FACTORS, &self.orientation_factors),
        ];
        for (key, table) in corr_tables {
            for (k, v) in table.entries() {
                if !(v.is_finite() && *v > 0.0) {
                    return Err((key.to_string(), format!("{}={} 必须为正数", k, v)));
                }
            }
        }

        let type_tables = [
            (keys::BASE_PRICES, &self.base_prices),
            (keys::ANNUAL_RENTS, &self.annual_rents),
            (keys::CAPITALIZATION_RATES, &self.capitalization_rates),
            (keys::LAND_COSTS, &self.land_costs),
            (keys::DEVELOPMENT_COSTS, &self.development_costs),
        ];
        for (key, table) in type_tables {
            if !table.contains(BASELINE_BUILDING_TYPE) {
                return Err((
                    key.to_string(),
                    format!("缺少基准类型 {}", BASELINE_BUILDING_TYPE),
                ));
            }
            for (k, v) in table.entries() {
                if !(v.is_finite() && *v > 0.0) {
                    return Err((key.to_string(), format!("{}={} 必须为正数", k, v)));
                }
            }
        }

        if !(self.reference_lot_ratio.is_finite() && self.reference_lot_ratio > 0.0) {
            return Err((
                keys::REFERENCE_LOT_RATIO.to_string(),
                "基准容积率必须为正数".to_string(),
            ));
        }
        if !(self.economic_life_years.is_finite() && self.economic_life_years >= 1.0) {
            return Err((
                keys::ECONOMIC_LIFE_YEARS.to_string(),
                "经济寿命必须不小于 1 年".to_string(),
            ));
        }
        if !(0.0..1.0).contains(&self.residual_rate) {
            return Err((
                keys::RESIDUAL_RATE.to_string(),
                "残值率必须在 [0, 1) 之间".to_string(),
            ));
        }

        Ok(())
    }
}
