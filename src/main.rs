//! GuardianX 命令行入口
//!
//! 单地址模式：`guardianx [选项] ADDRESS`；不带地址时进入交互模式，逐行读取地址。

use anyhow::{bail, Context, Result};
use clap::Parser;
use guardianx::{
    cli::{self, Cli, SessionSummary},
    controller::ValidationFormController,
    domain::FormSubmission,
    infrastructure::logging,
    metrics,
    service::{HttpValidationApi, IsoLinkBuilder, ValidationApi},
    ui::TerminalSurface,
};
use tokio::io::BufReader;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = cli.load_config()?;

    // guard 需持有到进程结束
    let _log_guard = logging::init_logging(&config.logging)
        .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {}", e))?;

    tracing::info!(
        base_url = %config.api.base_url,
        variant = config.api.variant.as_str(),
        stats = config.features.enable_stats,
        "Starting GuardianX"
    );

    let api = HttpValidationApi::new(&config.api)?;

    if cli.health {
        let status = api.health().await.context("health check failed")?;
        println!("{}", status.0);
        if !status.is_healthy() {
            bail!("service reported unhealthy status");
        }
        return Ok(());
    }

    let links = IsoLinkBuilder::new(api.client().base_url().clone(), config.iso.clone());
    let surface = TerminalSurface::new(std::io::stdout(), cli.format);
    let mut controller =
        ValidationFormController::new(api, surface, links, config.features.enable_stats);
    controller.init().await;

    let options = cli.session_options(&config);
    let mut summary = SessionSummary::default();
    let outcome = match cli.address.clone() {
        Some(address) => {
            let submission =
                FormSubmission::new(options.chain.as_str(), address, options.check_rwa);
            cli::submit(
                &mut controller,
                &submission,
                options.save_dir.as_deref(),
                &mut summary,
            )
            .await
            .map_err(anyhow::Error::from)
        }
        None => {
            eprintln!("Enter a wallet address per line (:rwa on|off, :quit)");
            let input = BufReader::new(tokio::io::stdin());
            cli::run_session(&mut controller, input, options)
                .await
                .map(|done| summary = done)
                .map_err(anyhow::Error::from)
        }
    };
    report(&cli, &summary);

    outcome
}

fn report(cli: &Cli, summary: &SessionSummary) {
    for path in &summary.saved {
        eprintln!("Saved {}", path.display());
    }
    if cli.metrics {
        print!("{}", metrics::render_prometheus());
    }
}
