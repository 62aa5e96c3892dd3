//! 错误类型
//! 区分两类错误：终止本次校验的致命错误，以及可降级的辅助查询错误

use thiserror::Error;

#[derive(Debug, Error)]
pub enum GuardianError {
    /// 地址为空（去除空白后）
    #[error("wallet address is empty")]
    EmptyAddress,

    /// 上游返回非 2xx 状态码
    #[error("upstream returned HTTP {status} for {url}")]
    HttpStatus { status: u16, url: String },

    /// 网络层错误（连接失败、超时等）
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// 响应体无法解析
    #[error("malformed response from {url}: {message}")]
    Decode { url: String, message: String },

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl GuardianError {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// 错误码（与日志、指标中使用的字符串一致）
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyAddress => "empty_address",
            Self::HttpStatus { status, .. } if *status == 404 => "not_found",
            Self::HttpStatus { status, .. } if *status == 429 => "rate_limit",
            Self::HttpStatus { status, .. } if *status >= 500 => "service_unavailable",
            Self::HttpStatus { .. } => "bad_request",
            Self::Transport { source, .. } if source.is_timeout() => "timeout",
            Self::Transport { .. } => "network",
            Self::Decode { .. } => "decode_error",
            Self::Config(_) => "invalid_config",
            Self::Io(_) => "io_error",
        }
    }

    /// 是否属于上游失败（网络/状态码/解析），可用于降级展示
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::HttpStatus { .. } | Self::Transport { .. } | Self::Decode { .. }
        )
    }

    /// 将技术错误转换为面向用户的提示
    pub fn user_message(&self) -> String {
        match self {
            Self::EmptyAddress => "Please enter a wallet address.".to_string(),
            Self::HttpStatus { .. } | Self::Transport { .. } | Self::Decode { .. } => {
                "❌ Validation failed. Please check the address and try again.".to_string()
            }
            Self::Config(msg) => format!("Configuration error: {}", msg),
            Self::Io(e) => format!("I/O error: {}", e),
        }
    }
}

pub type Result<T> = std::result::Result<T, GuardianError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_status_codes() {
        let e = GuardianError::HttpStatus {
            status: 404,
            url: "http://x/validate/a".into(),
        };
        assert_eq!(e.code(), "not_found");
        assert!(e.is_upstream());

        let e = GuardianError::HttpStatus {
            status: 503,
            url: "http://x".into(),
        };
        assert_eq!(e.code(), "service_unavailable");

        let e = GuardianError::HttpStatus {
            status: 400,
            url: "http://x".into(),
        };
        assert_eq!(e.code(), "bad_request");
    }

    #[test]
    fn test_user_messages() {
        assert_eq!(
            GuardianError::EmptyAddress.user_message(),
            "Please enter a wallet address."
        );
        let e = GuardianError::Decode {
            url: "http://x".into(),
            message: "eof".into(),
        };
        assert!(e.user_message().contains("Validation failed"));
        assert!(!GuardianError::EmptyAddress.is_upstream());
    }
}
