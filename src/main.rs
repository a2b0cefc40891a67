mod commands;
mod dispatch;
mod gateway;

use clap::{Parser, Subcommand};
use pigeon_core::{
    config::{self, Config},
    traits::BotApi,
    types::User,
};
use pigeon_telegram::TelegramClient;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::info;

#[derive(Parser)]
#[command(
    name = "pigeon",
    version,
    about = "Pigeon, a long-polling Telegram bot runtime"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to config file.
    #[arg(short, long, global = true, default_value = "config.toml")]
    config: String,

    /// Bot token. Overrides the config file and the TELEGRAM_BOT_TOKEN env var.
    #[arg(long, global = true)]
    token: Option<String>,

    /// Log every Bot API request and response.
    #[arg(long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start polling and answering updates.
    Start,
    /// Check the token and print the bot account.
    Me,
    /// Print the resolved configuration (token masked).
    Status,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let cfg = resolve_config(&cli)?;

    let default_filter = if cfg.bot.debug {
        "info,pigeon=debug,pigeon_core=debug,pigeon_telegram=debug".to_string()
    } else {
        cfg.bot.log_level.clone()
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter)),
        )
        .init();

    match cli.command {
        Commands::Start => {
            let (client, _) = connect(&cfg).await?;

            let cancel = CancellationToken::new();
            let shutdown = cancel.clone();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    info!("Received shutdown signal");
                }
                shutdown.cancel();
            });

            gateway::Gateway::new(Arc::new(client), &cfg)
                .run(cancel)
                .await?;
        }
        Commands::Me => {
            let (_, me) = connect(&cfg).await?;
            println!("{}", serde_json::to_string_pretty(&me)?);
        }
        Commands::Status => {
            println!("Pigeon status\n");
            println!("Config:   {}", cli.config);
            println!(
                "Token:    {}",
                if cfg.bot.token.is_empty() {
                    "missing".to_string()
                } else {
                    cfg.masked_token()
                }
            );
            println!("API:      {}", cfg.bot.api_url);
            println!("Debug:    {}", cfg.bot.debug);
            println!();
            println!(
                "Polling:  offset {} | limit {} | timeout {}s | queue {}",
                cfg.polling.offset,
                cfg.polling.limit,
                cfg.polling.timeout_secs,
                cfg.polling.queue_capacity
            );
            if !cfg.polling.allowed_updates.is_empty() {
                println!("Updates:  {}", cfg.polling.allowed_updates.join(", "));
            }
            println!(
                "Reply:    {} | commands {}",
                cfg.dispatch.reply.display_name(),
                if cfg.dispatch.commands { "on" } else { "off" }
            );
            match cfg.validate() {
                Ok(()) => println!("\nConfiguration OK"),
                Err(e) => println!("\nConfiguration problem: {e}"),
            }
        }
    }

    Ok(())
}

/// Config file, then env, then command-line flags.
fn resolve_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut cfg = config::load(&cli.config)?;
    cfg.apply_env();
    if let Some(ref token) = cli.token {
        cfg.bot.token = token.trim().to_string();
    }
    if cli.debug {
        cfg.bot.debug = true;
    }
    Ok(cfg)
}

/// Validate the config and confirm the token with `getMe`.
async fn connect(cfg: &Config) -> anyhow::Result<(TelegramClient, User)> {
    cfg.validate()?;

    let client = TelegramClient::new(&cfg.bot)
        .with_poll_slack(Duration::from_secs(cfg.polling.request_slack_secs));
    let me = match client.get_me().await {
        Ok(me) => me,
        Err(e) => anyhow::bail!("could not authorize with the Bot API: {e}"),
    };
    info!(
        "Authorized on account {} (id {})",
        me.display_name(),
        me.id
    );
    Ok((client, me))
}
