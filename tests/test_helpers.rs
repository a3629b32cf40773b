// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 估价参数构建器、固定估价日期的引擎与 API
// ==========================================
#![allow(dead_code)]

use chrono::NaiveDate;
use property_valuation::config::ValuationConfig;
use property_valuation::{PropertyParams, ValidationMode, ValuationApi, ValuationEngine};

/// 固定估价基准日期（房龄与成交日期的参照）
pub fn valuation_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 6, 30).unwrap()
}

pub fn engine() -> ValuationEngine {
    ValuationEngine::new(ValuationConfig::default(), valuation_date())
}

pub fn api() -> ValuationApi {
    ValuationApi::new(engine(), ValidationMode::Strict)
}

pub fn auto_fix_api() -> ValuationApi {
    ValuationApi::new(engine(), ValidationMode::AutoFix)
}

// ==========================================
// PropertyParams 构建器
// ==========================================

/// 默认值: 岳麓区 100㎡ 住宅，2015 年建成，18 层中的第 5 层
pub struct PropertyBuilder {
    params: PropertyParams,
}

impl PropertyBuilder {
    pub fn new() -> Self {
        Self {
            params: PropertyParams {
                area: 100.0,
                location: "yuelu".to_string(),
                building_type: "住宅".to_string(),
                decoration_level: "中等".to_string(),
                orientation: "南北".to_string(),
                construction_year: 2015,
                floor: 5,
                total_floors: 18,
                lot_ratio: 2.5,
                green_ratio: 35.0,
                nearby_facilities: vec![
                    "地铁".to_string(),
                    "学校".to_string(),
                    "医院".to_string(),
                    "商场".to_string(),
                ],
                valuation_method: "市场比较法".to_string(),
            },
        }
    }

    pub fn area(mut self, area: f64) -> Self {
        self.params.area = area;
        self
    }

    pub fn location(mut self, location: &str) -> Self {
        self.params.location = location.to_string();
        self
    }

    pub fn building_type(mut self, building_type: &str) -> Self {
        self.params.building_type = building_type.to_string();
        self
    }

    pub fn decoration(mut self, level: &str) -> Self {
        self.params.decoration_level = level.to_string();
        self
    }

    pub fn orientation(mut self, orientation: &str) -> Self {
        self.params.orientation = orientation.to_string();
        self
    }

    pub fn built_in(mut self, year: i32) -> Self {
        self.params.construction_year = year;
        self
    }

    pub fn floors(mut self, floor: i32, total_floors: i32) -> Self {
        self.params.floor = floor;
        self.params.total_floors = total_floors;
        self
    }

    pub fn lot_ratio(mut self, lot_ratio: f64) -> Self {
        self.params.lot_ratio = lot_ratio;
        self
    }

    pub fn green_ratio(mut self, green_ratio: f64) -> Self {
        self.params.green_ratio = green_ratio;
        self
    }

    pub fn facilities(mut self, facilities: &[&str]) -> Self {
        self.params.nearby_facilities = facilities.iter().map(|f| f.to_string()).collect();
        self
    }

    pub fn method(mut self, method: &str) -> Self {
        self.params.valuation_method = method.to_string();
        self
    }

    pub fn build(self) -> PropertyParams {
        self.params
    }
}

impl Default for PropertyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// 参考场景
pub fn yuelu_residence() -> PropertyParams {
    PropertyBuilder::new().build()
}

/// 覆盖多种区域/类型/装修/朝向/楼层的合法参数集合
pub fn varied_params() -> Vec<PropertyParams> {
    let mut out = Vec::new();
    let locations = ["yuelu", "furong", "tianxin", "kaifu", "yuhua", "wangcheng", "nowhere"];
    let types = ["住宅", "商业", "办公", "工业", "别墅"];
    let decorations = ["毛坯", "简装", "中等", "精装", "豪华"];
    let orientations = ["南北", "南", "东西", "北"];

    for (i, location) in locations.iter().enumerate() {
        for (j, building_type) in types.iter().enumerate() {
            let k = i + j;
            out.push(
                PropertyBuilder::new()
                    .location(location)
                    .building_type(building_type)
                    .decoration(decorations[k % decorations.len()])
                    .orientation(orientations[k % orientations.len()])
                    .area(35.0 + (k as f64) * 47.5)
                    .built_in(1960 + (k as i32) * 4)
                    .floors(1 + (k as i32 % 30), 32)
                    .lot_ratio(0.8 + (k as f64) * 0.3)
                    .green_ratio((k as f64 * 7.0) % 100.0)
                    .build(),
            );
        }
    }
    out
}
