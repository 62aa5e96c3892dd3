//! 风险评分归一化与分档
//!
//! 上游不同版本返回 0–10 或 0–100 两种量纲：不大于 10 的值按 0–10 处理并乘以 10，
//! 结果限制在 [0, 100]。

use serde::{Deserialize, Serialize};

/// 分档阈值
pub const OK_THRESHOLD: f64 = 70.0;
pub const WARN_THRESHOLD: f64 = 40.0;

/// 归一化评分到 0–100
pub fn normalize_score(raw: f64) -> f64 {
    if !raw.is_finite() {
        // +inf 视为满分，NaN / -inf 视为 0
        return if raw == f64::INFINITY { 100.0 } else { 0.0 };
    }
    let scaled = if raw <= 10.0 { (raw * 10.0).round() } else { raw };
    scaled.clamp(0.0, 100.0)
}

/// 评分档位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBand {
    Ok,
    Warn,
    Bad,
}

impl ScoreBand {
    /// 根据归一化后的评分判断档位
    pub fn for_score(normalized: f64) -> Self {
        if normalized >= OK_THRESHOLD {
            ScoreBand::Ok
        } else if normalized >= WARN_THRESHOLD {
            ScoreBand::Warn
        } else {
            ScoreBand::Bad
        }
    }

    /// 对应的样式类名
    pub fn as_class(&self) -> &'static str {
        match self {
            ScoreBand::Ok => "ok",
            ScoreBand::Warn => "warn",
            ScoreBand::Bad => "bad",
        }
    }
}

impl std::fmt::Display for ScoreBand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_class())
    }
}

/// 一次评分读数：原始值、归一化值与档位
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScoreReading {
    pub raw: f64,
    pub normalized: f64,
    pub band: ScoreBand,
}

impl ScoreReading {
    pub fn from_raw(raw: f64) -> Self {
        let normalized = normalize_score(raw);
        Self {
            raw,
            normalized,
            band: ScoreBand::for_score(normalized),
        }
    }
}
