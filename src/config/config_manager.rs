// ==========================================
// 房地产估价引擎 - 配置管理器
// ==========================================
// 职责: 估价系数加载、覆写合并、快照导出
// 来源优先级: 环境变量指定文件 > 用户配置目录文件 > 内置默认值
// ==========================================

use crate::config::valuation_config::{ValuationConfig, ValuationConfigOverrides};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// 指定配置文件路径的环境变量
pub const CONFIG_PATH_ENV: &str = "PROPERTY_VALUATION_CONFIG";

/// 用户配置目录下的子目录与文件名
const CONFIG_DIR_NAME: &str = "property-valuation";
const CONFIG_FILE_NAME: &str = "config.json";

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件不存在: {0}")]
    FileNotFound(String),

    #[error("配置文件读取失败 ({path}): {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("配置解析失败: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("配置值错误 (key: {key}): {message}")]
    InvalidValue { key: String, message: String },
}

/// 配置来源
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    Defaults,
    File(PathBuf),
}

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
#[derive(Debug, Clone)]
pub struct ConfigManager {
    config: ValuationConfig,
    source: ConfigSource,
}

impl ConfigManager {
    /// 仅使用内置默认值
    pub fn with_defaults() -> Self {
        Self {
            config: ValuationConfig::default(),
            source: ConfigSource::Defaults,
        }
    }

    /// 按优先级加载配置
    ///
    /// 1. `PROPERTY_VALUATION_CONFIG` 指定的文件（必须存在）
    /// 2. `{config_dir}/property-valuation/config.json`（存在时）
    /// 3. 内置默认值
    pub fn load() -> Result<Self, ConfigError> {
        if let Ok(raw) = std::env::var(CONFIG_PATH_ENV) {
            let raw = raw.trim();
            if !raw.is_empty() {
                return Self::from_file(raw);
            }
        }

        if let Some(path) = Self::default_config_path() {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        tracing::debug!("未找到估价配置文件,使用内置默认值");
        Ok(Self::with_defaults())
    }

    /// 从 JSON 文件加载（覆写合并到默认值）
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let config = Self::parse_overrides(&raw)?;
        tracing::info!(path = %path.display(), "估价配置已加载");

        Ok(Self {
            config,
            source: ConfigSource::File(path.to_path_buf()),
        })
    }

    /// 解析覆写 JSON 并合并到默认值
    pub fn parse_overrides(raw: &str) -> Result<ValuationConfig, ConfigError> {
        let overrides: ValuationConfigOverrides = serde_json::from_str(raw)?;

        let mut config = ValuationConfig::default();
        config.apply_overrides(&overrides);
        config
            .check()
            .map_err(|(key, message)| ConfigError::InvalidValue { key, message })?;

        Ok(config)
    }

    /// 用户配置目录下的默认配置文件路径
    pub fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    pub fn config(&self) -> &ValuationConfig {
        &self.config
    }

    pub fn into_config(self) -> ValuationConfig {
        self.config
    }

    pub fn source(&self) -> &ConfigSource {
        &self.source
    }

    /// 获取完整配置快照（JSON）
    ///
    /// 用于在估价报告/批量结果旁记录所用系数,保证结果可复现。
    pub fn get_config_snapshot(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string(&self.config)?)
    }
}

impl Default for ConfigManager {
    fn default() -> Self {
        Self::with_defaults()
    }
}
