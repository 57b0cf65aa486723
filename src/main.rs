use anyhow::Context;
use clap::{Parser, Subcommand};
use sendy::{config::Config, gateway::simulated::SimulatedGateway, phone, sms};
use std::{path::PathBuf, sync::Arc};

#[derive(Parser)]
#[command(name = "sendy", about = "Sendy wallet login, phone and SMS code tools")]
struct Cli {
    /// Write debug logs to /tmp/sendy-debug.log (tail -f to inspect).
    #[arg(long, global = true)]
    debug: bool,

    /// Read configuration from this file instead of ~/.config/sendy/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Cmd>,
}

#[derive(Subcommand)]
enum Cmd {
    /// Print the canonical +7XXXXXXXXXX form of a phone number.
    Normalize { raw: String },
    /// Show how the phone field reacts to an edit, as JSON.
    Edit {
        /// Field text after the edit, as the input widget reports it.
        raw: String,
        /// Digits in the field before the edit.
        #[arg(long, default_value = "")]
        previous: String,
        /// Caret position in RAW, in characters. Defaults to the end.
        #[arg(long)]
        cursor: Option<usize>,
    },
    /// Check that an SMS code has exactly six digits.
    Code { raw: String },
    /// Run the login flow against the simulated gateway (default).
    Shell,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if cli.debug {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open("/tmp/sendy-debug.log")?;
        tracing_subscriber::fmt()
            .with_writer(std::sync::Mutex::new(file))
            .with_ansi(false)
            .with_env_filter(
                tracing_subscriber::EnvFilter::try_from_env("RUST_LOG")
                    .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("debug")),
            )
            .init();
        tracing::info!("sendy debug log started, tail -f /tmp/sendy-debug.log");
    }

    match cli.command.unwrap_or(Cmd::Shell) {
        Cmd::Normalize { raw } => {
            let phone = phone::normalize(&raw).map_err(|e| anyhow::anyhow!("{}: {e}", e.code()))?;
            println!("{phone}");
        }
        Cmd::Edit {
            raw,
            previous,
            cursor,
        } => {
            let cursor = cursor.unwrap_or_else(|| raw.chars().count());
            let edit = phone::normalize_edit(&previous, &raw, cursor);
            println!("{}", serde_json::to_string(&edit)?);
        }
        Cmd::Code { raw } => {
            sms::validate_code(&raw).map_err(|e| anyhow::anyhow!("{}: {e}", e.code()))?;
            println!("ok");
        }
        Cmd::Shell => {
            let config = match &cli.config {
                Some(path) => Config::load_from(path)
                    .with_context(|| format!("loading config from {}", path.display()))?,
                None => Config::load().unwrap_or_else(|err| {
                    tracing::warn!(error = %err, "falling back to default config");
                    Config::defaults()
                }),
            };
            shell(config)?;
        }
    }

    Ok(())
}

#[tokio::main]
async fn shell(config: Config) -> anyhow::Result<()> {
    let gateway = Arc::new(SimulatedGateway::new(config.gateway.clone()));
    let input = tokio::io::BufReader::new(tokio::io::stdin());
    let app = sendy::flow::run(&config, gateway, input, tokio::io::stdout()).await?;
    tracing::info!(screen = %app.state().screen, "shell finished");
    Ok(())
}
