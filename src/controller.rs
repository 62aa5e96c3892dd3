//! 校验表单控制器
//!
//! 一次提交 = 一次完整的校验往返：清空页面 → 请求校验 → 渲染评分/标记/来源 →
//! （可选）RWA 查询 → 下载链接 → 展示结果面板。
//!
//! 主校验失败会弹出提示并中止本轮渲染；RWA 与统计查询失败只降级为占位文本。
//! `on_submit` 需要 `&mut self`，同一控制器同一时刻只处理一次提交。

use tracing::Instrument;
use uuid::Uuid;

use crate::{
    config::ApiVariant,
    domain::{FormSubmission, ScoreReading, ValidationRequest, ValidationResult},
    error::Result,
    metrics,
    service::{IsoLinkBuilder, ValidationApi},
    ui::{
        render::{
            render_download, render_flags, render_rwa, render_score, render_sources,
            render_stats,
        },
        Page, Surface,
    },
};

pub struct ValidationFormController<A: ValidationApi, S: Surface> {
    api: A,
    surface: S,
    page: Page,
    links: IsoLinkBuilder,
    enable_stats: bool,
}

impl<A: ValidationApi, S: Surface> ValidationFormController<A, S> {
    pub fn new(api: A, surface: S, links: IsoLinkBuilder, enable_stats: bool) -> Self {
        Self {
            api,
            surface,
            page: Page::new(),
            links,
            enable_stats,
        }
    }

    pub fn page(&self) -> &Page {
        &self.page
    }

    pub fn surface(&self) -> &S {
        &self.surface
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// 页面加载：启用统计时先拉取一次
    pub async fn init(&mut self) {
        if self.enable_stats {
            self.load_stats().await;
            self.surface.present(&self.page);
        }
    }

    /// 处理一次表单提交
    pub async fn on_submit(&mut self, form: &FormSubmission) -> Result<ValidationResult> {
        let span = tracing::info_span!(
            "submission",
            submission_id = %Uuid::new_v4(),
            variant = self.api.variant().as_str()
        );
        self.run_submission(form).instrument(span).await
    }

    async fn run_submission(&mut self, form: &FormSubmission) -> Result<ValidationResult> {
        metrics::inc_submission();

        let request = match ValidationRequest::from_form(form) {
            Ok(request) => request,
            Err(e) => {
                metrics::inc_submission_rejected();
                self.surface.alert(&e.user_message());
                return Err(e);
            }
        };

        self.page.reset_pending();
        self.surface.present(&self.page);

        let result = match self.fetch_validation(&request).await {
            Ok(result) => result,
            Err(e) => {
                metrics::inc_submission_failed();
                tracing::error!(code = e.code(), "Validation request failed: {}", e);
                self.surface.alert(&e.user_message());
                return Err(e);
            }
        };

        let reading = ScoreReading::from_raw(result.score);
        let shown = self.badge_value(&reading);
        render_score(
            &mut self.page.score_badge,
            &mut self.page.score_fill,
            &reading,
            shown,
        );
        render_flags(&mut self.page.flags, &result.flags);
        render_sources(&mut self.page.sources, result.data_sources_used.as_ref());

        if request.check_rwa {
            self.fill_rwa(&request.address, &result).await;
        }

        match self.api.variant() {
            ApiVariant::PathGet => {
                render_download(&mut self.page.download, self.links.for_address(&request.address));
            }
            ApiVariant::JsonPost => {
                if let Some(xml) = result.iso_xml.as_deref() {
                    render_download(&mut self.page.download, self.links.for_inline_xml(xml));
                }
            }
        }

        self.page.panel_hidden = false;
        tracing::info!(
            score = result.score,
            normalized = reading.normalized,
            band = reading.band.as_class(),
            flags = result.flags.len(),
            model_version = result.model_version.as_deref().unwrap_or("unknown"),
            "Validation rendered"
        );

        if self.enable_stats {
            self.load_stats().await;
        }
        self.surface.present(&self.page);

        Ok(result)
    }

    async fn fetch_validation(&self, request: &ValidationRequest) -> Result<ValidationResult> {
        tracing::debug!(chain = %request.chain, check_rwa = request.check_rwa, "Fetching validation");
        self.api.fetch_validation(request).await
    }

    /// GET 约定下 `/validate` 预期 0–100，徽标显示归一化值；
    /// POST 约定返回 0–10，徽标显示限制在 [0, 10] 内的原始值
    fn badge_value(&self, reading: &ScoreReading) -> f64 {
        match self.api.variant() {
            ApiVariant::PathGet => reading.normalized,
            ApiVariant::JsonPost if reading.raw.is_finite() => reading.raw.clamp(0.0, 10.0),
            ApiVariant::JsonPost => reading.normalized / 10.0,
        }
    }

    /// RWA 面板：GET 约定单独请求 `/rwa/{address}`，POST 约定使用响应内嵌数据。
    /// 任何失败都只记录日志，面板保持为空。
    async fn fill_rwa(&mut self, address: &str, result: &ValidationResult) {
        match self.api.variant() {
            ApiVariant::PathGet => match self.api.fetch_rwa(address).await {
                Ok(holdings) => render_rwa(&mut self.page.rwa, &holdings),
                Err(e) => {
                    metrics::inc_rwa_degraded();
                    tracing::debug!(code = e.code(), "RWA lookup failed, panel left empty: {}", e);
                }
            },
            ApiVariant::JsonPost => {
                if let Some(holdings) = &result.rwa_check {
                    render_rwa(&mut self.page.rwa, holdings);
                }
            }
        }
    }

    /// 拉取使用统计，失败时显示 "Stats unavailable"
    pub async fn load_stats(&mut self) {
        let stats = match self.api.fetch_stats().await {
            Ok(stats) => Some(stats),
            Err(e) => {
                metrics::inc_stats_degraded();
                tracing::warn!(code = e.code(), "Stats lookup failed: {}", e);
                None
            }
        };
        render_stats(&mut self.page.stats, stats);
    }
}
