use std::sync::Arc;

use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use hn_gems::app::AppContext;
use hn_gems::cli::commands::{self, GemsOptions};
use hn_gems::cli::{Cli, Commands};
use hn_gems::config::Config;
use hn_gems::daemon::{self, Daemon};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;
    let ctx = AppContext::new(config)?;

    match cli.command {
        Commands::Gems {
            depth,
            min_score,
            output,
        } => {
            let opts = GemsOptions {
                depth,
                min_score,
                output,
            };
            commands::generate_gems(&ctx, &opts).await?;
        }
        Commands::Poll => {
            let shutdown = CancellationToken::new();
            daemon::spawn_signal_handler(shutdown.clone());
            Daemon::new(Arc::new(ctx), shutdown).run().await?;
        }
    }

    Ok(())
}
