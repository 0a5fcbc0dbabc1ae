use anyhow::{Context, Result};
use chatgpt::ui::TerminalUI;
use chatgpt::{Chat, Client, Config, HistoryMode, GPT35_TURBO};
use clap::Parser;
use std::time::Duration;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser, Debug)]
#[command(name = "chatgpt", about = "Chat with an OpenAI chat-completion model")]
struct Cli {
    /// Model to talk to
    #[arg(short, long, default_value = GPT35_TURBO)]
    model: String,

    /// Priming instruction sent ahead of every message (repeatable)
    #[arg(short, long = "constraint")]
    constraints: Vec<String>,

    /// Request timeout in seconds
    #[arg(short, long, default_value_t = 60)]
    timeout: u64,

    /// Base URL of the API
    #[arg(long)]
    host: Option<String>,

    /// Send earlier exchanges along with each new message
    #[arg(long)]
    retain_history: bool,

    /// Ask a single question, print the reply and exit
    message: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();
    let config = Config::from_env()
        .context("OPENAI_API_KEY must be set in environment variables or .env file")?;

    let http = reqwest::Client::builder()
        .timeout(Duration::from_secs(cli.timeout))
        .build()
        .context("failed to build HTTP client")?;

    let history = if cli.retain_history {
        HistoryMode::Retain
    } else {
        HistoryMode::Reset
    };
    let mut client =
        Client::from_config(http, config, cli.model, cli.constraints).with_history(history);
    if let Some(host) = cli.host {
        client = client.with_host(host);
    }

    match cli.message {
        Some(message) => {
            let reply = client.chat(&message).await?;
            println!("{}", reply);
        }
        None => TerminalUI::new(client)?.run().await?,
    }

    Ok(())
}
