use clap::Parser;
use rss_slack_relay::{Config, Relay};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Posts new articles for the configured tags to Slack.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Path to the TOML configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    /// Log the messages that would be posted without posting them
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,web_request=warn")),
        )
        .init();

    let args = Args::parse();
    info!("Starting rss-slack-relay with config {}", args.config.display());

    let config = Config::load(&args.config).map_err(|e| {
        error!("Invalid configuration: {}", e);
        e
    })?;

    let relay = Relay::from_config(&config)?.with_dry_run(args.dry_run);
    let report = relay.run_once().await?;

    if report.failed > 0 {
        anyhow::bail!(
            "{} of {} messages could not be posted",
            report.failed,
            report.failed + report.published
        );
    }

    info!("rss-slack-relay finished");
    Ok(())
}
