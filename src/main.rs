use std::io::Write;

use nft_intel::config::ApiConfig;
use nft_intel::dashboard::Dashboard;
use nft_intel::loader::{LoadError, Outcome};
use nft_intel::render;
use tokio::io::{AsyncBufReadExt, BufReader};

const HELP: &str = "commands: chat <msg> | wallet <address> | collection <name> | suggest <query> | \
market | risk | refresh market|risk | health | demo | help | quit";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let config = ApiConfig::from_env()?;
    let mut dashboard = Dashboard::new(config)?;

    if let Some(mut notices) = dashboard.take_notices() {
        tokio::spawn(async move {
            while let Some(notice) = notices.recv().await {
                eprintln!("[{}] {}", notice.title, notice.description);
            }
        });
    }

    println!("{}\n", render::hero());
    println!("{HELP}");
    dashboard.start();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        std::io::stdout().flush()?;
        let Some(line) = lines.next_line().await? else {
            break;
        };
        let (command, arg) = line.trim().split_once(' ').unwrap_or((line.trim(), ""));
        let arg = arg.trim();

        let output = match command {
            "" => continue,
            "quit" | "exit" => break,
            "help" => HELP.to_owned(),
            "chat" => {
                let result = dashboard.chat(arg).await;
                let loading = dashboard.chat_loader().is_loading();
                show(result, render::conversation(dashboard.conversation(), loading))
            }
            "wallet" => {
                let result = dashboard.analyze_wallet(arg).await;
                show(result, render::wallet(&dashboard.wallet().snapshot()))
            }
            "collection" => {
                let result = dashboard.analyze_collection(arg).await;
                show(result, render::collection(&dashboard.collection().snapshot()))
            }
            "suggest" => dashboard.suggest(arg).join("\n"),
            "market" => render::market(&dashboard.market().snapshot()),
            "risk" => render::risk(&dashboard.risk().snapshot()),
            "refresh" if arg == "market" => {
                let result = dashboard.refresh_market().await;
                show(result, render::market(&dashboard.market().snapshot()))
            }
            "refresh" if arg == "risk" => {
                let result = dashboard.refresh_risk().await;
                show(result, render::risk(&dashboard.risk().snapshot()))
            }
            "health" => match dashboard.health().await {
                Ok(body) => body,
                Err(e) => format!("backend unavailable: {e}"),
            },
            "demo" => match dashboard.demo().await {
                Ok(body) => serde_json::to_string_pretty(&body)?,
                Err(e) => format!("backend unavailable: {e}"),
            },
            _ => format!("unknown command: {command}\n{HELP}"),
        };
        println!("{output}");
    }

    Ok(())
}

/// Panel view, or the inline validation error in its place.
fn show(result: Result<Outcome, LoadError>, view: String) -> String {
    match result {
        Ok(Outcome::Ignored) => format!("still loading...\n{view}"),
        Ok(_) => view,
        Err(e) => e.to_string(),
    }
}
