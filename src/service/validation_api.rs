//! 校验服务接口
//!
//! 控制器只依赖 [`ValidationApi`]，具体接口约定（GET 路径参数 / POST JSON）
//! 在构造 [`HttpValidationApi`] 时由配置决定。

use async_trait::async_trait;

use crate::{
    config::{ApiConfig, ApiVariant},
    domain::{
        HealthStatus, RwaHoldings, UsageStats, ValidationRequest, ValidationResponse,
        ValidationResult,
    },
    error::Result,
    infrastructure::ApiClient,
};

#[async_trait]
pub trait ValidationApi: Send + Sync {
    /// 当前使用的接口约定
    fn variant(&self) -> ApiVariant;

    /// 主校验请求
    async fn fetch_validation(&self, request: &ValidationRequest) -> Result<ValidationResult>;

    /// `GET /rwa/{address}`
    async fn fetch_rwa(&self, address: &str) -> Result<RwaHoldings>;

    /// `GET /stats`
    async fn fetch_stats(&self) -> Result<UsageStats>;

    /// `GET /health`
    async fn health(&self) -> Result<HealthStatus>;
}

/// 基于 reqwest 的实现
#[derive(Clone)]
pub struct HttpValidationApi {
    client: ApiClient,
    variant: ApiVariant,
}

impl HttpValidationApi {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        Ok(Self {
            client: ApiClient::new(config)?,
            variant: config.variant,
        })
    }

    pub fn client(&self) -> &ApiClient {
        &self.client
    }
}

#[async_trait]
impl ValidationApi for HttpValidationApi {
    fn variant(&self) -> ApiVariant {
        self.variant
    }

    async fn fetch_validation(&self, request: &ValidationRequest) -> Result<ValidationResult> {
        let response: ValidationResponse = match self.variant {
            ApiVariant::PathGet => {
                let url = self.client.endpoint(&["validate", request.address.as_str()]);
                self.client.get_json(url, "validate").await?
            }
            ApiVariant::JsonPost => {
                let url = self.client.endpoint(&["validate"]);
                self.client.post_json(url, request, "validate").await?
            }
        };
        Ok(response.into())
    }

    async fn fetch_rwa(&self, address: &str) -> Result<RwaHoldings> {
        let url = self.client.endpoint(&["rwa", address]);
        self.client.get_json(url, "rwa").await
    }

    async fn fetch_stats(&self) -> Result<UsageStats> {
        let url = self.client.endpoint(&["stats"]);
        self.client.get_json(url, "stats").await
    }

    async fn health(&self) -> Result<HealthStatus> {
        let url = self.client.endpoint(&["health"]);
        self.client.get_json(url, "health").await
    }
}
