// ==========================================
// 房地产估价引擎 - 估价对象参数
// ==========================================
// 职责: 估价输入值对象 (每次调用只读)
// 红线: 不做校验,校验在 api::validator 边界层完成
// ==========================================

use crate::domain::types::ValuationMethod;
use serde::{Deserialize, Serialize};

// ==========================================
// PropertyParams - 估价参数
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyParams {
    pub area: f64,                     // 建筑面积 (㎡)
    pub location: String,              // 区域代码 (如 yuelu)
    pub building_type: String,         // 建筑类型 (住宅/商业/办公/工业/别墅)
    pub decoration_level: String,      // 装修等级 (毛坯/简装/中等/精装/豪华)
    pub orientation: String,           // 朝向 (南北/南/北/东西/东/西)
    pub construction_year: i32,        // 建成年份
    pub floor: i32,                    // 所在楼层
    pub total_floors: i32,             // 总楼层
    pub lot_ratio: f64,                // 容积率
    pub green_ratio: f64,              // 绿化率 (0-100)

    #[serde(default)]
    pub nearby_facilities: Vec<String>, // 周边配套标签

    #[serde(default = "default_valuation_method")]
    pub valuation_method: String,      // 估价方法 (自由文本,未知时回落到市场比较法)
}

/// 缺省估价方法: 市场比较法
pub fn default_valuation_method() -> String {
    ValuationMethod::default().title_cn().to_string()
}

impl PropertyParams {
    /// 复制参数并替换估价方法
    pub fn with_method(&self, method: impl Into<String>) -> Self {
        Self {
            valuation_method: method.into(),
            ..self.clone()
        }
    }
}
