//! 配置管理模块
//! 支持从环境变量和配置文件加载配置

use std::{path::Path, str::FromStr, time::Duration};

use anyhow::{Context, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

static CURRENCY_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Z]{3}$").expect("static regex is valid"));

/// 应用配置结构体
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub features: FeaturesConfig,
    #[serde(default)]
    pub form: FormConfig,
    #[serde(default)]
    pub iso: IsoConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// 校验服务的接口约定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApiVariant {
    /// `GET /validate/{address}`，XML 通过下载链接获取
    PathGet,
    /// `POST /validate`，XML 内嵌在响应中
    JsonPost,
}

impl ApiVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiVariant::PathGet => "path_get",
            ApiVariant::JsonPost => "json_post",
        }
    }
}

impl FromStr for ApiVariant {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "path_get" | "get" => Ok(ApiVariant::PathGet),
            "json_post" | "post" => Ok(ApiVariant::JsonPost),
            other => anyhow::bail!("unknown API variant: {}", other),
        }
    }
}

/// 上游 API 配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub variant: ApiVariant,
    /// 默认不设超时：请求挂起时界面停留在 "Validating…"
    pub request_timeout_secs: Option<u64>,
    pub user_agent: String,
}

fn default_user_agent() -> String {
    format!("guardianx/{}", env!("CARGO_PKG_VERSION"))
}

impl ApiConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        self.request_timeout_secs.map(Duration::from_secs)
    }
}

/// 功能开关配置 (Feature Flags)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeaturesConfig {
    pub enable_stats: bool,
    pub default_check_rwa: bool,
}

/// 表单默认值
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FormConfig {
    pub default_chain: String,
}

/// ISO 20022 下载链接参数
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct IsoConfig {
    pub reference_prefix: String,
    pub amount: String,
    pub currency: String,
}

/// 日志配置
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub format: String, // "json" or "text"
    pub enable_file_logging: bool,
    pub log_file_path: Option<String>,
}

fn env_flag(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(default)
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: std::env::var("GUARDIANX_API_URL")
                .unwrap_or_else(|_| "http://127.0.0.1:8080".into()),
            variant: std::env::var("GUARDIANX_API_VARIANT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(ApiVariant::PathGet),
            request_timeout_secs: std::env::var("GUARDIANX_TIMEOUT_SECS")
                .ok()
                .and_then(|s| s.parse().ok()),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for FeaturesConfig {
    fn default() -> Self {
        Self {
            enable_stats: env_flag("ENABLE_STATS", false),
            default_check_rwa: env_flag("DEFAULT_CHECK_RWA", false),
        }
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            default_chain: std::env::var("DEFAULT_CHAIN").unwrap_or_else(|_| "kadena".into()),
        }
    }
}

impl Default for IsoConfig {
    fn default() -> Self {
        Self {
            reference_prefix: std::env::var("ISO_REFERENCE_PREFIX")
                .unwrap_or_else(|_| "GX".into()),
            amount: std::env::var("ISO_AMOUNT").unwrap_or_else(|_| "0.00".into()),
            currency: std::env::var("ISO_CCY").unwrap_or_else(|_| "KDA".into()),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            format: std::env::var("LOG_FORMAT").unwrap_or_else(|_| "text".into()),
            enable_file_logging: env_flag("LOG_FILE_ENABLED", false),
            log_file_path: std::env::var("LOG_FILE_PATH").ok(),
        }
    }
}

impl Config {
    /// 从环境变量加载配置
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            api: ApiConfig::default(),
            features: FeaturesConfig::default(),
            form: FormConfig::default(),
            iso: IsoConfig::default(),
            logging: LoggingConfig::default(),
        })
    }

    /// 从配置文件加载配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        let config: Config =
            toml::from_str(&content).with_context(|| "Failed to parse config file as TOML")?;

        Ok(config)
    }

    /// 从环境变量和配置文件合并加载（配置文件优先级更高）
    pub fn from_env_and_file<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        let mut config = Self::from_env()?;

        if let Some(path) = path {
            if path.as_ref().exists() {
                // 文件中缺失的段落和字段回落到环境变量默认值
                config = Self::from_file(path)?;
            }
        }

        Ok(config)
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<()> {
        let base = self.api.base_url.to_lowercase();
        if !base.starts_with("http://") && !base.starts_with("https://") {
            anyhow::bail!("GUARDIANX_API_URL must start with http:// or https://");
        }
        reqwest::Url::parse(&self.api.base_url)
            .with_context(|| format!("Invalid API base url: {}", self.api.base_url))?;

        if self.api.request_timeout_secs == Some(0) {
            anyhow::bail!("GUARDIANX_TIMEOUT_SECS must be greater than 0 when set");
        }

        if !CURRENCY_CODE.is_match(&self.iso.currency) {
            anyhow::bail!("ISO_CCY must be a 3-letter uppercase currency code");
        }
        rust_decimal::Decimal::from_str(&self.iso.amount)
            .with_context(|| format!("ISO_AMOUNT is not a decimal: {}", self.iso.amount))?;

        let valid_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_levels.contains(&self.logging.level.to_lowercase().as_str()) {
            anyhow::bail!("LOG_LEVEL must be one of: {:?}", valid_levels);
        }

        if self.logging.format != "json" && self.logging.format != "text" {
            anyhow::bail!("LOG_FORMAT must be 'json' or 'text'");
        }

        Ok(())
    }
}
