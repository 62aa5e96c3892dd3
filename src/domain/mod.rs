//! Domain 模块
//!
//! 校验请求、响应模型与评分规则

pub mod request;
pub mod score;
pub mod validation_result;

// 重新导出常用类型
pub use request::{FormSubmission, ValidationRequest};
pub use score::{normalize_score, ScoreBand, ScoreReading};
pub use validation_result::{
    HealthStatus, RwaAsset, RwaHoldings, UsageStats, ValidationResponse, ValidationResult,
};
