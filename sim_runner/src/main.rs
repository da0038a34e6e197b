use clap::Parser;
use orderbook_sim::BookConfig;
use tracing_subscriber::EnvFilter;

use sim_runner::{run, Args};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Snapshots go to stdout, logs to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let base = BookConfig::from_env()?;

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    let written = run(args, base, &mut out).await?;

    tracing::info!(written, "Done");
    Ok(())
}
