//! GuardianX - 钱包地址风险校验客户端
//!
//! 提交地址 → 调用校验服务 → 渲染评分、标记、数据来源、RWA 持仓与 ISO 20022 下载链接。

pub mod cli;
pub mod config;
pub mod controller;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod metrics;
pub mod service;
pub mod ui;
pub mod utils;

// 重新导出常用类型
pub use controller::ValidationFormController;
pub use error::{GuardianError, Result};

pub mod prelude {
    pub use crate::{
        config::{ApiVariant, Config},
        controller::ValidationFormController,
        domain::{FormSubmission, ScoreBand, ScoreReading, ValidationResult},
        error::{GuardianError, Result},
        service::{HttpValidationApi, IsoLinkBuilder, ValidationApi},
        ui::{OutputFormat, Page, RecordingSurface, Surface, TerminalSurface},
    };
}
