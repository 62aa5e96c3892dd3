//! 测试辅助模块
//! 在本地随机端口启动一个假的校验服务，并记录收到的请求

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::{
    extract::Request,
    middleware::{self, Next},
    Router,
};
use guardianx::{
    config::{ApiConfig, ApiVariant, IsoConfig},
    controller::ValidationFormController,
    service::{HttpValidationApi, IsoLinkBuilder},
    ui::RecordingSurface,
};

/// 收到的请求，形如 `GET /validate/k:abc`
pub type Hits = Arc<Mutex<Vec<String>>>;

pub struct MockServer {
    pub base_url: String,
    pub hits: Hits,
}

impl MockServer {
    /// 启动服务并返回其地址
    pub async fn start(router: Router) -> Self {
        let hits: Hits = Arc::new(Mutex::new(Vec::new()));
        let recorder = hits.clone();
        let app = router.layer(middleware::from_fn(move |req: Request, next: Next| {
            let recorder = recorder.clone();
            async move {
                recorder
                    .lock()
                    .unwrap()
                    .push(format!("{} {}", req.method(), req.uri()));
                next.run(req).await
            }
        }));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind mock server");
        let addr = listener.local_addr().expect("mock server address");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock server crashed");
        });

        Self {
            base_url: format!("http://{}", addr),
            hits,
        }
    }

    pub fn hits(&self) -> Vec<String> {
        self.hits.lock().unwrap().clone()
    }

    /// 以指定前缀开头的请求数
    pub fn count(&self, prefix: &str) -> usize {
        self.hits()
            .iter()
            .filter(|h| h.starts_with(prefix))
            .count()
    }

    pub fn api_config(&self, variant: ApiVariant) -> ApiConfig {
        ApiConfig {
            base_url: self.base_url.clone(),
            variant,
            request_timeout_secs: Some(5),
            user_agent: "guardianx-tests".to_string(),
        }
    }
}

pub fn iso_config() -> IsoConfig {
    IsoConfig {
        reference_prefix: "GX".to_string(),
        amount: "0.00".to_string(),
        currency: "KDA".to_string(),
    }
}

/// 创建连接到假服务的控制器
pub fn controller(
    server: &MockServer,
    variant: ApiVariant,
    enable_stats: bool,
) -> ValidationFormController<HttpValidationApi, RecordingSurface> {
    let api = HttpValidationApi::new(&server.api_config(variant)).expect("api client");
    let links = IsoLinkBuilder::new(api.client().base_url().clone(), iso_config());
    ValidationFormController::new(api, RecordingSurface::new(), links, enable_stats)
}
