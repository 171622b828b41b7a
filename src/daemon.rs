//! Long-running poll mode.
//!
//! Rebuilds the top-comments feed, sleeps for the configured interval, and
//! repeats until its cancellation token fires. A failed run is logged and
//! the next one starts on schedule.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio_util::sync::CancellationToken;

use crate::app::{AppContext, Result};
use crate::cli::commands;

/// Format interval for display
pub fn format_interval(secs: u64) -> String {
    if secs >= 86400 && secs % 86400 == 0 {
        format!("{}d", secs / 86400)
    } else if secs >= 3600 && secs % 3600 == 0 {
        format!("{}h", secs / 3600)
    } else if secs >= 60 && secs % 60 == 0 {
        format!("{}m", secs / 60)
    } else {
        format!("{}s", secs)
    }
}

/// Daemon runner
pub struct Daemon {
    ctx: Arc<AppContext>,
    output: PathBuf,
    interval: Duration,
    shutdown: CancellationToken,
}

impl Daemon {
    pub fn new(ctx: Arc<AppContext>, shutdown: CancellationToken) -> Self {
        let output = ctx.config.poll_output.clone();
        let interval = ctx.config.poll_interval();
        Self {
            ctx,
            output,
            interval,
            shutdown,
        }
    }

    /// Run until cancelled. Returns the number of completed runs.
    pub async fn run(&self) -> Result<usize> {
        tracing::info!(
            "Poller started (interval: {}, output: {})",
            format_interval(self.interval.as_secs()),
            self.output.display()
        );

        let mut runs = 0;
        while !self.shutdown.is_cancelled() {
            let succeeded = tokio::select! {
                _ = self.shutdown.cancelled() => break,
                ok = self.run_once() => ok,
            };
            runs += 1;

            if succeeded {
                tracing::info!("RSS feed generated, waiting for the next run");
            } else {
                tracing::info!("Waiting for the next run");
            }
            tokio::select! {
                _ = self.shutdown.cancelled() => break,
                _ = tokio::time::sleep(self.interval) => {}
            }
        }

        tracing::info!("Poller shutting down after {} runs", runs);
        Ok(runs)
    }

    /// Run a single update cycle. Returns whether the feed was written.
    async fn run_once(&self) -> bool {
        let start = Utc::now();

        match commands::generate_top_comments(&self.ctx, &self.output).await {
            Ok(summary) => {
                let elapsed = Utc::now().signed_duration_since(start);
                tracing::info!(
                    "Run complete: {} comments with links ({:.1}s)",
                    summary.total_entries,
                    elapsed.num_milliseconds() as f64 / 1000.0
                );
                true
            }
            Err(e) if e.is_fetch_error() => {
                tracing::error!("Run failed, Hacker News API unavailable: {}", e);
                false
            }
            Err(e) => {
                tracing::error!("Run failed: {}", e);
                false
            }
        }
    }
}

/// Cancel `token` on Ctrl-C or, on Unix, SIGTERM.
pub fn spawn_signal_handler(token: CancellationToken) {
    tokio::spawn(async move {
        #[cfg(unix)]
        {
            use tokio::signal::unix::{signal, SignalKind};

            match signal(SignalKind::terminate()) {
                Ok(mut sigterm) => {
                    tokio::select! {
                        _ = sigterm.recv() => {},
                        _ = tokio::signal::ctrl_c() => {},
                    }
                }
                Err(e) => {
                    tracing::warn!("Failed to set up SIGTERM handler: {}", e);
                    let _ = tokio::signal::ctrl_c().await;
                }
            }
        }

        #[cfg(not(unix))]
        {
            let _ = tokio::signal::ctrl_c().await;
        }

        tracing::info!("Shutdown requested");
        token.cancel();
    });
}
