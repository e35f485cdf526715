use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod commands;
mod ui;

use cli::{Action, Cli, ConfigAction};
use commands::device::{self, PanelAction};
use epd::ClientConfig;

fn init_logging(debug: bool) {
    let default_filter = if debug { "epd=debug" } else { "epd=info" };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// 설정 파일 -> EPD_ENDPOINT -> CLI 옵션 순으로 적용
fn resolve_config(cli: &Cli) -> anyhow::Result<ClientConfig> {
    let mut config = ClientConfig::load().context("failed to load configuration")?;

    if let Some(endpoint) = &cli.endpoint {
        config.endpoint = endpoint.clone();
    }
    if cli.timeout_ms.is_some() {
        config.timeout_ms = cli.timeout_ms;
    }

    Ok(config)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.debug);

    let config = resolve_config(&cli)?;
    tracing::debug!(?config, "resolved configuration");

    let endpoint = config.endpoint.display().to_string();
    let result = match &cli.command {
        Action::Info => device::show_info(&config).await,
        Action::Display { file, update } => device::display_file(&config, file, *update).await,
        Action::Update => device::run_action(&config, PanelAction::Update).await,
        Action::Partial => device::run_action(&config, PanelAction::Partial).await,
        Action::Clear => device::run_action(&config, PanelAction::Clear).await,
        Action::Blink => device::run_action(&config, PanelAction::Blink).await,
        Action::Temperature => device::show_temperature(&config).await,
        Action::Config { action } => match action {
            ConfigAction::Init => commands::config::init_config(),
            ConfigAction::Show => commands::config::show_config(&config),
        },
    };

    result.with_context(|| format!("epd failed (endpoint {})", endpoint))?;

    Ok(())
}
