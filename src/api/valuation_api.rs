// ==========================================
// 房地产估价引擎 - 估价 API
// ==========================================
// 职责: 参数校验 + 估价计算 + 辅助分析，组装完整估价报告；批量估价
// 红线: 批量估价单项失败不影响其他项
// ==========================================

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::instrument;
use uuid::Uuid;

use crate::api::error::{ApiError, ApiResult};
use crate::api::validator::{ParamsValidator, ValidationMode, ValidationReport};
use crate::config::ConfigManager;
use crate::domain::{EvaluationDetails, PropertyParams, ValuationReport};
use crate::engine::{AnalysisGenerator, MethodComparison, ValuationEngine};
use crate::importer::{ImportError, PropertyCsvImporter};
use crate::perf::PerfGuard;

/// 单次批量估价的最大条数
pub const MAX_BATCH_SIZE: usize = 100;

// ==========================================
// BatchValuationItem - 批量估价单项结果
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchValuationItem {
    pub index: usize,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<ValuationReport>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ==========================================
// ValuationApi - 估价 API
// ==========================================
#[derive(Debug, Clone)]
pub struct ValuationApi {
    generator: AnalysisGenerator,
    validator: ParamsValidator,
    mode: ValidationMode,
}

impl ValuationApi {
    /// 构造函数
    ///
    /// 校验器的当前年份与估价引擎的估价日期保持一致。
    pub fn new(engine: ValuationEngine, mode: ValidationMode) -> Self {
        let validator = ParamsValidator::new(engine.current_year())
            .with_reference_lot_ratio(engine.config().reference_lot_ratio);
        Self {
            generator: AnalysisGenerator::new(engine),
            validator,
            mode,
        }
    }

    /// 默认系数 + 当天日期 + 严格校验
    pub fn with_defaults() -> Self {
        Self::new(ValuationEngine::with_defaults(), ValidationMode::Strict)
    }

    /// 使用已加载的配置 + 当天日期
    pub fn from_config(manager: &ConfigManager, mode: ValidationMode) -> Self {
        let today = chrono::Local::now().date_naive();
        Self::new(ValuationEngine::new(manager.config().clone(), today), mode)
    }

    /// 按 ConfigManager::load 的优先级加载配置后构造
    ///
    /// # 返回
    /// - Err(ApiError::Config): 配置文件缺失、格式错误或取值非法
    pub fn load(mode: ValidationMode) -> ApiResult<Self> {
        let manager = ConfigManager::load()?;
        tracing::info!(source = ?manager.source(), ?mode, "估价 API 已初始化");
        Ok(Self::from_config(&manager, mode))
    }

    pub fn engine(&self) -> &ValuationEngine {
        self.generator.engine()
    }

    pub fn generator(&self) -> &AnalysisGenerator {
        &self.generator
    }

    pub fn mode(&self) -> ValidationMode {
        self.mode
    }

    /// 仅校验，不估价
    pub fn validate(&self, params: &PropertyParams) -> ValidationReport {
        self.validator.validate(params)
    }

    /// 完整估价
    ///
    /// # 返回
    /// - Ok(ValuationReport): 估价结果 + 可比案例 + 趋势 + 影响因素
    /// - Err(ApiError::InvalidParams): 参数校验未通过
    #[instrument(skip(self, params), fields(method = %params.valuation_method))]
    pub fn perform_valuation(&self, params: &PropertyParams) -> ApiResult<ValuationReport> {
        let params = self.validator.check(params, self.mode)?;
        Ok(self.build_report(params))
    }

    /// 批量估价
    ///
    /// 空列表返回空结果；超过 MAX_BATCH_SIZE 条整体拒绝。
    #[instrument(skip(self, items), fields(count = items.len()))]
    pub fn batch_valuation(&self, items: &[PropertyParams]) -> ApiResult<Vec<BatchValuationItem>> {
        if items.len() > MAX_BATCH_SIZE {
            return Err(ApiError::BatchTooLarge {
                count: items.len(),
                max: MAX_BATCH_SIZE,
            });
        }

        let _perf = PerfGuard::with_items("batch_valuation", items.len());

        let results: Vec<BatchValuationItem> = items
            .iter()
            .enumerate()
            .map(|(index, params)| match self.perform_valuation(params) {
                Ok(report) => BatchValuationItem {
                    index,
                    success: true,
                    result: Some(report),
                    error: None,
                },
                Err(e) => {
                    tracing::warn!(index, error = %e, "批量估价单项失败");
                    BatchValuationItem {
                        index,
                        success: false,
                        result: None,
                        error: Some(e.to_string()),
                    }
                }
            })
            .collect();

        let failed = results.iter().filter(|r| !r.success).count();
        tracing::info!(total = results.len(), failed, "批量估价完成");
        Ok(results)
    }

    /// 从文件批量估价（.csv 按列导入，.json 为参数数组）
    ///
    /// # 返回
    /// - Err(ApiError::Import): 文件缺失、格式不支持或 CSV 行无法映射
    /// - Err(ApiError::InvalidInput): JSON 无法解析
    pub fn batch_from_file(&self, path: impl AsRef<Path>) -> ApiResult<Vec<BatchValuationItem>> {
        let path = path.as_ref();
        let ext = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();

        let items: Vec<PropertyParams> = match ext.as_str() {
            "csv" => PropertyCsvImporter::new().parse_file(path)?,
            "json" => {
                if !path.exists() {
                    return Err(ImportError::FileNotFound(path.display().to_string()).into());
                }
                let raw = std::fs::read_to_string(path).map_err(ImportError::from)?;
                serde_json::from_str(&raw)?
            }
            _ => return Err(ImportError::UnsupportedFormat(path.display().to_string()).into()),
        };

        tracing::info!(path = %path.display(), count = items.len(), "批量估价文件已读取");
        self.batch_valuation(&items)
    }

    /// 四种方法对比
    pub fn compare_methods(&self, params: &PropertyParams) -> ApiResult<MethodComparison> {
        let params = self.validator.check(params, self.mode)?;
        Ok(self.engine().compare_methods(&params))
    }

    fn build_report(&self, params: PropertyParams) -> ValuationReport {
        let engine = self.engine();
        let result = engine.calculate(&params);

        let comparable_properties = self.generator.comparable_properties(&params);
        let trend_analysis = self.generator.trend_analysis(&params);
        let factors_analysis = self.generator.factors_analysis(&params);

        ValuationReport {
            property_id: format!("PROP{}", Uuid::new_v4().simple()),
            valuation_date: engine.valuation_date(),
            comparable_properties,
            trend_analysis,
            evaluation_details: EvaluationDetails {
                factors_analysis,
                confidence_level: result.confidence,
                valuation_params: params,
            },
            result,
        }
    }
}

impl Default for ValuationApi {
    fn default() -> Self {
        Self::with_defaults()
    }
}
