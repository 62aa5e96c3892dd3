//! 校验服务响应模型
//!
//! 两种接口约定的响应字段不同：`GET /validate/{address}` 返回 `risk_score`，
//! `POST /validate` 返回 `score`，并可能内嵌 `rwa_check` 与 `iso_xml`。
//! 两者都先反序列化为 [`ValidationResponse`]，再收敛为 [`ValidationResult`]。

use serde::{Deserialize, Deserializer, Serialize};

/// 上游原始响应（宽松解析，未知字段忽略）
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ValidationResponse {
    #[serde(default)]
    pub risk_score: Option<f64>,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub flags: Option<Vec<String>>,
    #[serde(default)]
    pub data_sources_used: Option<serde_json::Value>,
    /// 内嵌 RWA 数据先按原始 JSON 保留，转换失败不影响主结果
    #[serde(default)]
    pub rwa_check: Option<serde_json::Value>,
    #[serde(default)]
    pub iso_xml: Option<String>,
    #[serde(default)]
    pub model_version: Option<String>,
}

/// 一次渲染周期内由控制器持有的校验结果
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationResult {
    /// 上游量纲下的原始评分
    pub score: f64,
    pub flags: Vec<String>,
    pub data_sources_used: Option<serde_json::Value>,
    pub rwa_check: Option<RwaHoldings>,
    pub iso_xml: Option<String>,
    pub model_version: Option<String>,
}

impl From<ValidationResponse> for ValidationResult {
    fn from(resp: ValidationResponse) -> Self {
        Self {
            // 缺失评分按 0 处理
            score: resp.risk_score.or(resp.score).unwrap_or(0.0),
            flags: resp.flags.unwrap_or_default(),
            data_sources_used: resp.data_sources_used.filter(|v| !v.is_null()),
            rwa_check: resp.rwa_check.and_then(RwaHoldings::from_inline),
            iso_xml: resp.iso_xml.filter(|x| !x.trim().is_empty()),
            model_version: resp.model_version,
        }
    }
}

/// 单个现实世界资产条目
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RwaAsset {
    #[serde(default)]
    pub symbol: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub amount: Option<serde_json::Value>,
    #[serde(default)]
    pub unit: Option<String>,
}

impl RwaAsset {
    /// 展示用标签：优先 symbol，其次 name
    pub fn label(&self) -> Option<&str> {
        self.symbol
            .as_deref()
            .filter(|s| !s.is_empty())
            .or_else(|| self.name.as_deref().filter(|s| !s.is_empty()))
    }
}

/// `GET /rwa/{address}` 响应，或 POST 响应中的 `rwa_check`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RwaHoldings {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tokens: Vec<String>,
    #[serde(default, deserialize_with = "lenient_assets")]
    pub assets: Vec<RwaAsset>,
}

/// `null` 按空列表处理
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// 资产条目可以是对象，也可以是裸字符串（视为名称）；无法识别的条目跳过
fn lenient_assets<'de, D>(deserializer: D) -> Result<Vec<RwaAsset>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Vec<serde_json::Value> = null_as_empty(deserializer)?;
    Ok(raw
        .into_iter()
        .filter_map(|entry| match entry {
            serde_json::Value::String(name) => Some(RwaAsset {
                name: Some(name),
                ..Default::default()
            }),
            other => serde_json::from_value(other).ok(),
        })
        .collect())
}

impl RwaHoldings {
    /// 解析 POST 响应中内嵌的 `rwa_check`，格式不符时丢弃
    pub fn from_inline(value: serde_json::Value) -> Option<Self> {
        if value.is_null() {
            return None;
        }
        match serde_json::from_value(value) {
            Ok(holdings) => Some(holdings),
            Err(e) => {
                tracing::debug!("Ignoring malformed inline rwa_check: {}", e);
                None
            }
        }
    }

    /// 面板文本：代币与资产分别用 ", " 连接，非空部分之间用 " • " 连接
    pub fn summary(&self) -> Option<String> {
        let tokens = self
            .tokens
            .iter()
            .filter(|t| !t.is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        let assets = self
            .assets
            .iter()
            .filter_map(RwaAsset::label)
            .collect::<Vec<_>>()
            .join(", ");
        let text = [tokens, assets]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" • ");
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}

/// `GET /stats` 响应
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UsageStats {
    pub validations: u64,
}

/// `GET /health` 响应（字段随服务版本变化，保留原样）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HealthStatus(pub serde_json::Value);

impl HealthStatus {
    /// 兼容 `{"ok": true}` 与 `{"status": "ok"}` 两种写法
    pub fn is_healthy(&self) -> bool {
        self.0.get("ok").and_then(|v| v.as_bool()).unwrap_or(false)
            || self.0.get("status").and_then(|v| v.as_str()) == Some("ok")
    }
}
