//! 校验服务 HTTP 客户端
//!
//! 只做一次请求：不重试、默认不设超时。任何非 2xx 状态都视为失败。

use std::time::Instant;

use reqwest::{header, RequestBuilder, Url};
use serde::{de::DeserializeOwned, Serialize};

use crate::{
    config::ApiConfig,
    error::{GuardianError, Result},
    metrics,
};

#[derive(Clone)]
pub struct ApiClient {
    base: Url,
    client: reqwest::Client,
}

impl ApiClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let base = Url::parse(&config.base_url).map_err(|e| {
            GuardianError::config(format!("invalid base url {}: {}", config.base_url, e))
        })?;
        if base.cannot_be_a_base() {
            return Err(GuardianError::config(format!(
                "base url cannot carry a path: {}",
                config.base_url
            )));
        }

        let mut builder = reqwest::Client::builder().user_agent(config.user_agent.clone());
        if let Some(timeout) = config.request_timeout() {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| GuardianError::config(format!("failed to build http client: {}", e)))?;

        Ok(Self { base, client })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    pub fn endpoint(&self, segments: &[&str]) -> Url {
        join_segments(&self.base, segments)
    }

    pub async fn get_json<T: DeserializeOwned>(&self, url: Url, endpoint: &'static str) -> Result<T> {
        let req = self
            .client
            .get(url.clone())
            .header(header::ACCEPT, "application/json");
        let bytes = self.send(req, &url, endpoint).await?;
        decode(&bytes, &url)
    }

    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        url: Url,
        body: &B,
        endpoint: &'static str,
    ) -> Result<T> {
        let req = self
            .client
            .post(url.clone())
            .header(header::ACCEPT, "application/json")
            .json(body);
        let bytes = self.send(req, &url, endpoint).await?;
        decode(&bytes, &url)
    }

    /// 获取原始字节（用于下载 XML 文件）
    pub async fn get_bytes(&self, url: Url, endpoint: &'static str) -> Result<Vec<u8>> {
        let req = self.client.get(url.clone());
        self.send(req, &url, endpoint).await
    }

    async fn send(&self, req: RequestBuilder, url: &Url, endpoint: &'static str) -> Result<Vec<u8>> {
        let start = Instant::now();
        tracing::debug!(endpoint, url = %url, "sending request");

        let resp = match req.send().await {
            Ok(resp) => resp,
            Err(source) => {
                metrics::observe_upstream_latency_ms(start.elapsed().as_millis(), false);
                metrics::count_err(endpoint);
                return Err(GuardianError::Transport {
                    url: url.to_string(),
                    source,
                });
            }
        };

        let status = resp.status();
        if !status.is_success() {
            metrics::observe_upstream_latency_ms(start.elapsed().as_millis(), false);
            metrics::count_err(endpoint);
            tracing::debug!(endpoint, status = status.as_u16(), "upstream returned error status");
            return Err(GuardianError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let bytes = resp.bytes().await.map_err(|source| {
            metrics::count_err(endpoint);
            GuardianError::Transport {
                url: url.to_string(),
                source,
            }
        })?;
        metrics::observe_upstream_latency_ms(start.elapsed().as_millis(), true);
        metrics::count_ok(endpoint);
        Ok(bytes.to_vec())
    }
}

/// 在 base url 后追加路径段，每段单独做百分号编码
pub fn join_segments(base: &Url, segments: &[&str]) -> Url {
    let mut url = base.clone();
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}

fn decode<T: DeserializeOwned>(bytes: &[u8], url: &Url) -> Result<T> {
    serde_json::from_slice(bytes).map_err(|e| GuardianError::Decode {
        url: url.to_string(),
        message: e.to_string(),
    })
}
