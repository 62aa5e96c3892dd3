//! 命令行参数与交互会话

use std::path::{Path, PathBuf};

use clap::Parser;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};

use crate::{
    config::{ApiVariant, Config},
    controller::ValidationFormController,
    domain::FormSubmission,
    error::Result,
    service::{iso_download::save_download, HttpValidationApi},
    ui::{OutputFormat, Surface},
};

#[derive(Debug, Parser)]
#[command(name = "guardianx", version)]
#[command(about = "Wallet address risk validation client", long_about = None)]
pub struct Cli {
    /// TOML 配置文件（默认读取 CONFIG_PATH）
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// 覆盖校验服务地址
    #[arg(long, value_name = "URL")]
    pub base_url: Option<String>,

    /// 接口约定：path_get 或 json_post
    #[arg(long, value_name = "VARIANT")]
    pub variant: Option<ApiVariant>,

    /// 链标识符（默认取配置中的 default_chain）
    #[arg(long)]
    pub chain: Option<String>,

    /// 同时查询 RWA 持仓
    #[arg(long)]
    pub rwa: bool,

    /// 输出格式：text 或 html
    #[arg(long, value_name = "FORMAT", default_value = "text")]
    pub format: OutputFormat,

    /// 把 ISO 20022 报文保存到目录
    #[arg(long, value_name = "DIR")]
    pub save_xml: Option<PathBuf>,

    /// 结束时输出 Prometheus 指标
    #[arg(long)]
    pub metrics: bool,

    /// 只探测 /health
    #[arg(long)]
    pub health: bool,

    /// 钱包地址；省略时进入交互模式
    pub address: Option<String>,
}

impl Cli {
    /// 加载配置并应用命令行覆盖项
    pub fn load_config(&self) -> anyhow::Result<Config> {
        let path = self
            .config
            .clone()
            .or_else(|| std::env::var("CONFIG_PATH").ok().map(PathBuf::from));
        let mut config = Config::from_env_and_file(path.as_deref())?;

        if let Some(url) = &self.base_url {
            config.api.base_url = url.clone();
        }
        if let Some(variant) = self.variant {
            config.api.variant = variant;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn session_options(&self, config: &Config) -> SessionOptions {
        SessionOptions {
            chain: self
                .chain
                .clone()
                .unwrap_or_else(|| config.form.default_chain.clone()),
            check_rwa: self.rwa || config.features.default_check_rwa,
            save_dir: self.save_xml.clone(),
        }
    }
}

/// 交互模式下的一行输入
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Submit(String),
    Rwa(bool),
    Quit,
}

impl SessionCommand {
    pub fn parse(line: &str) -> Self {
        match line.trim() {
            ":quit" | ":q" => SessionCommand::Quit,
            ":rwa on" => SessionCommand::Rwa(true),
            ":rwa off" => SessionCommand::Rwa(false),
            other => SessionCommand::Submit(other.to_string()),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SessionOptions {
    pub chain: String,
    pub check_rwa: bool,
    pub save_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionSummary {
    pub submitted: usize,
    pub failed: usize,
    pub saved: Vec<PathBuf>,
}

/// 提交一次；成功且指定了目录时保存报文
pub async fn submit<S: Surface>(
    controller: &mut ValidationFormController<HttpValidationApi, S>,
    submission: &FormSubmission,
    save_dir: Option<&Path>,
    summary: &mut SessionSummary,
) -> Result<()> {
    summary.submitted += 1;
    if let Err(e) = controller.on_submit(submission).await {
        summary.failed += 1;
        return Err(e);
    }

    let (Some(dir), Some(link)) = (save_dir, controller.page().download.link.as_ref()) else {
        return Ok(());
    };
    match save_download(controller.api().client(), link, dir).await {
        Ok(path) => summary.saved.push(path),
        // 下载失败不影响已渲染的结果
        Err(e) => tracing::warn!(code = e.code(), "Failed to save ISO artifact: {}", e),
    }
    Ok(())
}

/// 逐行读取输入直到 `:quit` 或输入结束
pub async fn run_session<R, S>(
    controller: &mut ValidationFormController<HttpValidationApi, S>,
    input: R,
    mut options: SessionOptions,
) -> std::io::Result<SessionSummary>
where
    R: AsyncBufRead + Unpin,
    S: Surface,
{
    let mut summary = SessionSummary::default();
    let mut lines = input.lines();
    while let Some(line) = lines.next_line().await? {
        match SessionCommand::parse(&line) {
            SessionCommand::Quit => break,
            SessionCommand::Rwa(on) => {
                options.check_rwa = on;
                tracing::debug!(check_rwa = on, "RWA lookup toggled");
            }
            SessionCommand::Submit(address) => {
                let submission =
                    FormSubmission::new(options.chain.as_str(), address, options.check_rwa);
                // 失败已经在界面上提示，继续等待下一次输入
                let _ = submit(
                    controller,
                    &submission,
                    options.save_dir.as_deref(),
                    &mut summary,
                )
                .await;
            }
        }
    }
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_parse_full_command_line() {
        let cli = Cli::try_parse_from([
            "guardianx",
            "--base-url",
            "http://127.0.0.1:9000",
            "--variant",
            "json_post",
            "--chain",
            "xrp",
            "--rwa",
            "--format",
            "html",
            "--save-xml",
            "/tmp/out",
            "--metrics",
            "k:abc123",
        ])
        .unwrap();

        assert_eq!(cli.base_url.as_deref(), Some("http://127.0.0.1:9000"));
        assert_eq!(cli.variant, Some(ApiVariant::JsonPost));
        assert_eq!(cli.chain.as_deref(), Some("xrp"));
        assert!(cli.rwa);
        assert_eq!(cli.format, OutputFormat::Html);
        assert_eq!(cli.save_xml, Some(PathBuf::from("/tmp/out")));
        assert!(cli.metrics);
        assert!(!cli.health);
        assert_eq!(cli.address.as_deref(), Some("k:abc123"));
    }

    #[test]
    fn test_parse_defaults() {
        let cli = Cli::try_parse_from(["guardianx"]).unwrap();
        assert_eq!(cli.format, OutputFormat::Text);
        assert_eq!(cli.variant, None);
        assert!(cli.address.is_none());
        assert!(!cli.rwa);
    }

    #[test]
    fn test_parse_rejects_bad_values() {
        assert!(Cli::try_parse_from(["guardianx", "--variant", "soap"]).is_err());
        assert!(Cli::try_parse_from(["guardianx", "--format", "pdf"]).is_err());
        assert!(Cli::try_parse_from(["guardianx", "--bogus"]).is_err());
        assert!(Cli::try_parse_from(["guardianx", "k:a", "k:b"]).is_err());
    }

    #[test]
    fn test_overrides_applied_over_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[api]
base_url = "http://file.example.com"

[form]
default_chain = "xrpl"
"#
        )
        .unwrap();
        let path = file.path().to_string_lossy().into_owned();
        let cli = Cli::try_parse_from([
            "guardianx",
            "--config",
            path.as_str(),
            "--base-url",
            "https://cli.example.com",
            "--variant",
            "post",
            "--rwa",
        ])
        .unwrap();

        let config = cli.load_config().unwrap();
        assert_eq!(config.api.base_url, "https://cli.example.com");
        assert_eq!(config.api.variant, ApiVariant::JsonPost);

        let options = cli.session_options(&config);
        assert_eq!(options.chain, "xrpl");
        assert!(options.check_rwa);
        assert!(options.save_dir.is_none());
    }

    #[test]
    fn test_invalid_override_fails_validation() {
        let cli = Cli::try_parse_from(["guardianx", "--base-url", "ftp://nope"]).unwrap();
        assert!(cli.load_config().is_err());
    }

    #[test]
    fn test_session_command_parsing() {
        assert_eq!(SessionCommand::parse(":quit"), SessionCommand::Quit);
        assert_eq!(SessionCommand::parse("  :q "), SessionCommand::Quit);
        assert_eq!(SessionCommand::parse(":rwa on"), SessionCommand::Rwa(true));
        assert_eq!(SessionCommand::parse(":rwa off\r"), SessionCommand::Rwa(false));
        assert_eq!(
            SessionCommand::parse(" k:abc "),
            SessionCommand::Submit("k:abc".into())
        );
        assert_eq!(SessionCommand::parse(""), SessionCommand::Submit(String::new()));
    }
}
