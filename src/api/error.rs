// ==========================================
// 房地产估价引擎 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型，将导入/配置错误转换为用户可读的错误消息
// 红线: 参数校验失败必须携带全部违规明细
// ==========================================

use crate::config::ConfigError;
use crate::importer::ImportError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 参数错误
    // ==========================================
    /// 估价参数校验失败（带详细原因）
    #[error("估价参数校验失败: {reason}")]
    InvalidParams {
        reason: String,
        violations: Vec<ValidationViolation>,
    },

    #[error("批量估价数量超限: count={count}, max={max}")]
    BatchTooLarge { count: usize, max: usize },

    #[error("无效输入: {0}")]
    InvalidInput(String),

    // ==========================================
    // 外部数据错误
    // ==========================================
    #[error("文件导入失败: {0}")]
    Import(#[from] ImportError),

    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ApiError {
    /// 校验违规明细（非参数错误返回空切片）
    pub fn violations(&self) -> &[ValidationViolation] {
        match self {
            ApiError::InvalidParams { violations, .. } => violations,
            _ => &[],
        }
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::InvalidInput(format!("JSON解析失败: {}", err))
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

// ==========================================
// 校验违规详情
// ==========================================

/// 校验违规详情
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ValidationViolation {
    /// 违规字段（camelCase，与 JSON 字段名一致）
    pub field: String,
    /// 违规代码（AREA_OUT_OF_RANGE / FLOOR_EXCEEDS_TOTAL / ...）
    pub code: String,
    /// 违规原因（已本地化）
    pub reason: String,
    /// 额外信息（可选）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ValidationViolation {
    pub fn new(field: &str, code: &str, reason: String) -> Self {
        Self {
            field: field.to_string(),
            code: code.to_string(),
            reason,
            details: None,
        }
    }

    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}
