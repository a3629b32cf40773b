// ==========================================
// 房地产估价引擎 - 因子评分器
// ==========================================
// 职责: 定性/序数属性 → 修正系数 + 0-100 标准化评分
// 输入: 区域/建筑类型/装修/朝向/楼层/建成年份/配套/绿化率
// 红线: 评分必须在 [0, 100] 内,且随质量等级单调
// 红线: 未知枚举值取中性系数,不报错
// ==========================================

use crate::config::ValuationConfig;
use crate::config::CorrectionTable;

/// 每年房龄折旧（市场比较法年限修正）
pub const AGE_DEPRECIATION_PER_YEAR: f64 = 0.015;
/// 年限修正下限
pub const MIN_AGE_CORRECTION: f64 = 0.5;
/// 最优楼层位于总楼层的 30%
pub const OPTIMAL_FLOOR_RATIO: f64 = 0.3;
/// 每偏离最优楼层一层的修正
pub const FLOOR_PENALTY_PER_LEVEL: f64 = 0.01;
/// 楼层修正下限
pub const MIN_FLOOR_CORRECTION: f64 = 0.85;
/// 配套评分满分所需的配套数量
pub const FULL_FACILITY_COUNT: f64 = 8.0;

// ==========================================
// FactorScorer - 因子评分器
// ==========================================
pub struct FactorScorer<'a> {
    config: &'a ValuationConfig,
    current_year: i32,
}

impl<'a> FactorScorer<'a> {
    /// # 参数
    /// - config: 估价系数表
    /// - current_year: 估价基准年份（房龄计算的参照）
    pub fn new(config: &'a ValuationConfig, current_year: i32) -> Self {
        Self {
            config,
            current_year,
        }
    }

    /// 房龄（年）,建成年份晚于基准年份时视为 0
    pub fn building_age(&self, construction_year: i32) -> i32 {
        (self.current_year - construction_year).max(0)
    }

    // ==========================================
    // 修正系数
    // ==========================================

    pub fn location_correction(&self, location: &str) -> f64 {
        self.config.location_factors.get(location)
    }

    pub fn building_type_correction(&self, building_type: &str) -> f64 {
        self.config.building_type_factors.get(building_type)
    }

    pub fn decoration_correction(&self, decoration_level: &str) -> f64 {
        self.config.decoration_factors.get(decoration_level)
    }

    pub fn orientation_correction(&self, orientation: &str) -> f64 {
        self.config.orientation_factors.get(orientation)
    }

    /// 年限修正: max(0.5, 1 - 房龄 × 1.5%)
    pub fn age_correction(&self, construction_year: i32) -> f64 {
        let age = self.building_age(construction_year) as f64;
        (1.0 - age * AGE_DEPRECIATION_PER_YEAR).max(MIN_AGE_CORRECTION)
    }

    /// 楼层修正
    ///
    /// 最优楼层 = floor(总楼层 × 0.3),每偏离一层 -1%,下限 0.85;
    /// 单层建筑不修正。
    pub fn floor_correction(&self, floor: i32, total_floors: i32) -> f64 {
        if total_floors <= 1 {
            return 1.0;
        }
        let optimal_floor = (total_floors as f64 * OPTIMAL_FLOOR_RATIO).floor();
        let floor_diff = (floor as f64 - optimal_floor).abs();
        (1.0 - floor_diff * FLOOR_PENALTY_PER_LEVEL).max(MIN_FLOOR_CORRECTION)
    }

    // ==========================================
    // 0-100 评分
    // ==========================================

    pub fn location_score(&self, location: &str) -> f64 {
        table_score(&self.config.location_factors, location)
    }

    pub fn building_type_score(&self, building_type: &str) -> f64 {
        table_score(&self.config.building_type_factors, building_type)
    }

    pub fn decoration_score(&self, decoration_level: &str) -> f64 {
        table_score(&self.config.decoration_factors, decoration_level)
    }

    pub fn orientation_score(&self, orientation: &str) -> f64 {
        table_score(&self.config.orientation_factors, orientation)
    }

    pub fn floor_score(&self, floor: i32, total_floors: i32) -> f64 {
        clamp_score((self.floor_correction(floor, total_floors) * 100.0).round())
    }

    /// 房龄评分: 100 - 房龄 × 2,下限 50
    pub fn age_score(&self, construction_year: i32) -> f64 {
        let age = self.building_age(construction_year) as f64;
        (100.0 - age * 2.0).clamp(50.0, 100.0)
    }

    /// 配套评分: 不同配套标签数 / 8 × 100,封顶 100
    pub fn facilities_score(&self, facilities: &[String]) -> f64 {
        let mut tags: Vec<&str> = facilities
            .iter()
            .map(|f| f.trim())
            .filter(|f| !f.is_empty())
            .collect();
        tags.sort_unstable();
        tags.dedup();

        clamp_score((tags.len() as f64 / FULL_FACILITY_COUNT * 100.0).round())
    }

    /// 绿化评分（按绿化率分档后折算）
    pub fn green_score(&self, green_ratio: f64) -> f64 {
        let band = if green_ratio >= 40.0 {
            1.2
        } else if green_ratio >= 30.0 {
            1.1
        } else if green_ratio >= 20.0 {
            1.0
        } else if green_ratio >= 10.0 {
            0.9
        } else {
            0.8
        };
        clamp_score((band / 1.2 * 100.0_f64).round())
    }
}

/// 修正系数 → 评分: 系数 / 表内最大系数 × 100
fn table_score(table: &CorrectionTable, key: &str) -> f64 {
    clamp_score((table.get(key) / table.max() * 100.0).round())
}

fn clamp_score(score: f64) -> f64 {
    if score.is_nan() {
        return 0.0;
    }
    score.clamp(0.0, 100.0)
}
