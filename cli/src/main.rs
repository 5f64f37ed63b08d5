use std::time::Duration;

use clap::{Parser, Subcommand};
use nft_intel::api::ApiError;
use nft_intel::config::{
    ApiConfig, ConfigError, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_MARKET_REFRESH_SECS, DEFAULT_NOTICE_CAPACITY,
    DEFAULT_REQUEST_TIMEOUT_SECS, Timeouts,
};
use nft_intel::dashboard::Dashboard;
use nft_intel::loader::{LoadError, Loader, Notice, NoticeLevel, Outcome, Panel};
use serde::Serialize;
use serde_json::Value;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("{0} returned no data")]
    NoData(&'static str),
}

#[derive(Parser, Debug)]
#[command(name = "nft-cli", about = "NFT Intelligence backend CLI")]
struct Cli {
    #[arg(long, env = "NFT_INTEL_BASE_URL")]
    base_url: Option<String>,

    /// Use the local development backend (http://localhost:3000).
    #[arg(long, env = "NFT_INTEL_DEV")]
    dev: bool,

    #[arg(long, env = "NFT_INTEL_REQUEST_TIMEOUT_SECS", default_value_t = DEFAULT_REQUEST_TIMEOUT_SECS)]
    request_timeout_secs: u64,

    #[arg(long, env = "NFT_INTEL_CONNECT_TIMEOUT_SECS", default_value_t = DEFAULT_CONNECT_TIMEOUT_SECS)]
    connect_timeout_secs: u64,

    /// Poll period for `market --watch`.
    #[arg(long, env = "NFT_INTEL_MARKET_REFRESH_SECS", default_value_t = DEFAULT_MARKET_REFRESH_SECS)]
    market_refresh_secs: u64,

    #[arg(long, env = "NFT_INTEL_NOTICE_CAPACITY", default_value_t = DEFAULT_NOTICE_CAPACITY)]
    notice_capacity: usize,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// GET /health
    Ping,
    /// GET /demo
    Demo,
    Chat {
        message: String,
    },
    Wallet {
        address: String,
    },
    Collection {
        name: String,
    },
    /// Autocomplete against the popular collection list. No network.
    Suggest {
        #[arg(default_value = "")]
        query: String,
    },
    Market {
        /// Keep polling on the configured refresh interval.
        #[arg(long, default_value_t = false)]
        watch: bool,
    },
    Risk,
}

impl Cli {
    fn config(&self) -> Result<ApiConfig, CliError> {
        let mut config = if self.dev {
            ApiConfig::development()
        } else {
            let base_url = self.base_url.as_deref().ok_or(ConfigError::MissingBaseUrl)?;
            ApiConfig::new(base_url)?
        };
        config.timeouts = Timeouts { request_secs: self.request_timeout_secs, connect_secs: self.connect_timeout_secs };
        // Zero would make the interval and channel constructors panic.
        config.market_refresh_secs = self.market_refresh_secs.max(1);
        config.notice_capacity = self.notice_capacity.max(1);
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut dashboard = Dashboard::new(cli.config()?)?;
    let mut notices = dashboard.take_notices();

    let result = match cli.command {
        Command::Ping => run_ping(&dashboard).await,
        Command::Demo => print_json(&dashboard.demo().await?),
        Command::Chat { message } => run_chat(&mut dashboard, &message).await,
        Command::Wallet { address } => {
            dashboard.analyze_wallet(&address).await?;
            print_record(dashboard.wallet())
        }
        Command::Collection { name } => {
            dashboard.analyze_collection(&name).await?;
            print_record(dashboard.collection())
        }
        Command::Suggest { query } => print_json(&serde_json::to_value(dashboard.suggest(&query))?),
        Command::Market { watch: false } => {
            dashboard.market().trigger(()).await?;
            print_record(dashboard.market())
        }
        Command::Market { watch: true } => run_market_watch(&mut dashboard, notices.as_mut()).await,
        Command::Risk => {
            dashboard.refresh_risk().await?;
            print_record(dashboard.risk())
        }
    };

    if let Some(rx) = notices.as_mut() {
        drain_notices(rx);
    }
    result
}

async fn run_ping(dashboard: &Dashboard) -> Result<(), CliError> {
    let body = dashboard.health().await?;
    println!("{}", if body.trim().is_empty() { "ok" } else { body.trim() });
    Ok(())
}

async fn run_chat(dashboard: &mut Dashboard, message: &str) -> Result<(), CliError> {
    if dashboard.chat(message).await? == Outcome::Discarded {
        return Err(CliError::NoData("chat"));
    }
    let reply = dashboard
        .conversation()
        .messages()
        .last()
        .ok_or(CliError::NoData("chat"))?;
    println!("{}", reply.content);
    Ok(())
}

async fn run_market_watch(
    dashboard: &mut Dashboard,
    mut notices: Option<&mut mpsc::Receiver<Notice>>,
) -> Result<(), CliError> {
    let period = dashboard.config().market_refresh_interval();
    dashboard.start();
    let mut last_printed = None;

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => return Ok(()),
            () = tokio::time::sleep(Duration::from_millis(250)) => {}
        }
        if let Some(rx) = notices.as_deref_mut() {
            drain_notices(rx);
        }
        let snap = dashboard.market().snapshot();
        if snap.last_updated.is_some() && snap.last_updated != last_printed {
            last_printed = snap.last_updated;
            print_record(dashboard.market())?;
            eprintln!("next refresh in {}s", period.as_secs());
        }
    }
}

fn print_record<P>(loader: &Loader<P>) -> Result<(), CliError>
where
    P: Panel,
    P::Output: Serialize,
{
    let snap = loader.snapshot();
    let value = snap.value().ok_or(CliError::NoData(P::NAME))?;
    print_json(&serde_json::to_value(value)?)
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}

fn drain_notices(rx: &mut mpsc::Receiver<Notice>) {
    while let Ok(notice) = rx.try_recv() {
        let tag = match notice.level {
            NoticeLevel::Info => "info",
            NoticeLevel::Demo => "demo",
            NoticeLevel::Error => "error",
        };
        eprintln!("[{tag}] {}: {}", notice.title, notice.description);
    }
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
