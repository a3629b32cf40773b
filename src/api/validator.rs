// ==========================================
// 房地产估价引擎 - 估价参数校验器
// ==========================================
// 职责: 估价入口的参数边界校验，收集全部违规（非 fail-fast）
// 红线: 引擎层不做校验，非法输入只能在此处被拒绝或修正
// ==========================================

use serde::{Deserialize, Serialize};

use crate::api::error::{ApiError, ApiResult, ValidationViolation};
use crate::config::ValuationConfig;
use crate::domain::PropertyParams;
use crate::i18n::t_with_args;

/// 面积上限（㎡）
pub const MAX_AREA: f64 = 10_000.0;
/// 最早建成年份
pub const MIN_CONSTRUCTION_YEAR: i32 = 1900;
/// 绿化率上限（%）
pub const MAX_GREEN_RATIO: f64 = 100.0;

// ===== 违规代码 =====
pub const CODE_AREA_OUT_OF_RANGE: &str = "AREA_OUT_OF_RANGE";
pub const CODE_CONSTRUCTION_YEAR_OUT_OF_RANGE: &str = "CONSTRUCTION_YEAR_OUT_OF_RANGE";
pub const CODE_FLOOR_OUT_OF_RANGE: &str = "FLOOR_OUT_OF_RANGE";
pub const CODE_TOTAL_FLOORS_OUT_OF_RANGE: &str = "TOTAL_FLOORS_OUT_OF_RANGE";
pub const CODE_FLOOR_EXCEEDS_TOTAL: &str = "FLOOR_EXCEEDS_TOTAL";
pub const CODE_GREEN_RATIO_OUT_OF_RANGE: &str = "GREEN_RATIO_OUT_OF_RANGE";
pub const CODE_LOT_RATIO_INVALID: &str = "LOT_RATIO_INVALID";

// ==========================================
// ValidationMode - 校验模式
// ==========================================

/// 校验模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ValidationMode {
    /// 严格模式：任何违规都返回错误
    #[default]
    Strict,
    /// 自动修复模式：可修正的字段夹到合法范围，面积等不可修正字段仍返回错误
    AutoFix,
}

// ==========================================
// ValidationReport - 校验报告
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationReport {
    pub is_valid: bool,
    pub violations: Vec<ValidationViolation>,
}

impl ValidationReport {
    fn from_violations(violations: Vec<ValidationViolation>) -> Self {
        Self {
            is_valid: violations.is_empty(),
            violations,
        }
    }

    pub fn has_code(&self, code: &str) -> bool {
        self.violations.iter().any(|v| v.code == code)
    }

    /// 转换为 ApiResult（有违规时返回 InvalidParams）
    pub fn into_result(self) -> ApiResult<()> {
        if self.is_valid {
            return Ok(());
        }
        let count = self.violations.len().to_string();
        Err(ApiError::InvalidParams {
            reason: t_with_args("validation.failed", &[("count", &count)]),
            violations: self.violations,
        })
    }
}

// ==========================================
// ParamsValidator - 估价参数校验器
// ==========================================

/// 估价参数校验器
///
/// 当前年份由调用方注入（与估价引擎的估价日期一致），
/// 基准容积率用于自动修复非法容积率。
#[derive(Debug, Clone)]
pub struct ParamsValidator {
    current_year: i32,
    reference_lot_ratio: f64,
}

impl ParamsValidator {
    pub fn new(current_year: i32) -> Self {
        Self {
            current_year,
            reference_lot_ratio: ValuationConfig::default().reference_lot_ratio,
        }
    }

    pub fn with_reference_lot_ratio(mut self, reference_lot_ratio: f64) -> Self {
        self.reference_lot_ratio = reference_lot_ratio;
        self
    }

    pub fn current_year(&self) -> i32 {
        self.current_year
    }

    /// 校验全部规则，返回所有违规
    pub fn validate(&self, params: &PropertyParams) -> ValidationReport {
        let mut violations = Vec::new();

        if !(params.area.is_finite() && params.area > 0.0 && params.area <= MAX_AREA) {
            violations.push(ValidationViolation::new(
                "area",
                CODE_AREA_OUT_OF_RANGE,
                t_with_args(
                    "validation.area_out_of_range",
                    &[("max", &MAX_AREA.to_string()), ("value", &params.area.to_string())],
                ),
            ));
        }

        if params.construction_year < MIN_CONSTRUCTION_YEAR
            || params.construction_year > self.current_year
        {
            violations.push(ValidationViolation::new(
                "constructionYear",
                CODE_CONSTRUCTION_YEAR_OUT_OF_RANGE,
                t_with_args(
                    "validation.construction_year_out_of_range",
                    &[
                        ("min", &MIN_CONSTRUCTION_YEAR.to_string()),
                        ("max", &self.current_year.to_string()),
                        ("value", &params.construction_year.to_string()),
                    ],
                ),
            ));
        }

        if params.floor < 1 {
            violations.push(ValidationViolation::new(
                "floor",
                CODE_FLOOR_OUT_OF_RANGE,
                t_with_args(
                    "validation.floor_out_of_range",
                    &[("value", &params.floor.to_string())],
                ),
            ));
        }

        if params.total_floors < 1 {
            violations.push(ValidationViolation::new(
                "totalFloors",
                CODE_TOTAL_FLOORS_OUT_OF_RANGE,
                t_with_args(
                    "validation.total_floors_out_of_range",
                    &[("value", &params.total_floors.to_string())],
                ),
            ));
        }

        // 两者各自合法时才比较
        if params.floor >= 1 && params.total_floors >= 1 && params.floor > params.total_floors {
            violations.push(
                ValidationViolation::new(
                    "floor",
                    CODE_FLOOR_EXCEEDS_TOTAL,
                    t_with_args(
                        "validation.floor_exceeds_total",
                        &[
                            ("floor", &params.floor.to_string()),
                            ("total", &params.total_floors.to_string()),
                        ],
                    ),
                )
                .with_details(serde_json::json!({
                    "floor": params.floor,
                    "totalFloors": params.total_floors,
                })),
            );
        }

        if !(params.green_ratio.is_finite()
            && params.green_ratio >= 0.0
            && params.green_ratio <= MAX_GREEN_RATIO)
        {
            violations.push(ValidationViolation::new(
                "greenRatio",
                CODE_GREEN_RATIO_OUT_OF_RANGE,
                t_with_args(
                    "validation.green_ratio_out_of_range",
                    &[("value", &params.green_ratio.to_string())],
                ),
            ));
        }

        if !(params.lot_ratio.is_finite() && params.lot_ratio > 0.0) {
            violations.push(ValidationViolation::new(
                "lotRatio",
                CODE_LOT_RATIO_INVALID,
                t_with_args(
                    "validation.lot_ratio_invalid",
                    &[("value", &params.lot_ratio.to_string())],
                ),
            ));
        }

        ValidationReport::from_violations(violations)
    }

    /// 按校验模式处理参数
    ///
    /// - Strict: 有违规直接返回 InvalidParams
    /// - AutoFix: 先修正可修正字段，再对修正结果做严格校验
    pub fn check(&self, params: &PropertyParams, mode: ValidationMode) -> ApiResult<PropertyParams> {
        match mode {
            ValidationMode::Strict => {
                self.validate(params).into_result()?;
                Ok(params.clone())
            }
            ValidationMode::AutoFix => {
                let fixed = self.auto_fix(params);
                if fixed != *params {
                    tracing::warn!(
                        violations = self.validate(params).violations.len(),
                        "AutoFix模式: 估价参数已修正"
                    );
                }
                self.validate(&fixed).into_result()?;
                Ok(fixed)
            }
        }
    }

    /// 将可修正字段夹到合法范围（面积不修正）
    pub fn auto_fix(&self, params: &PropertyParams) -> PropertyParams {
        let mut fixed = params.clone();

        fixed.construction_year = fixed
            .construction_year
            .clamp(MIN_CONSTRUCTION_YEAR, self.current_year.max(MIN_CONSTRUCTION_YEAR));
        fixed.total_floors = fixed.total_floors.max(1);
        fixed.floor = fixed.floor.clamp(1, fixed.total_floors);

        fixed.green_ratio = if fixed.green_ratio.is_finite() {
            fixed.green_ratio.clamp(0.0, MAX_GREEN_RATIO)
        } else {
            0.0
        };

        if !(fixed.lot_ratio.is_finite() && fixed.lot_ratio > 0.0) {
            fixed.lot_ratio = self.reference_lot_ratio;
        }

        fixed
    }
}
