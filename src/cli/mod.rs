pub mod commands;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "hn-gems")]
#[command(about = "Republish Hacker News comments that share links as an RSS feed", long_about = None)]
pub struct Cli {
    /// Optional TOML file overriding built-in settings
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Collect gems once and append new ones to the feed
    Gems {
        /// Depth of comments to read on each post
        #[arg(long, default_value_t = 5)]
        depth: usize,

        /// Minimum score a post should have
        #[arg(long, default_value_t = 50)]
        min_score: i64,

        /// Output file path
        #[arg(long, default_value = "hn_gems.xml")]
        output: PathBuf,
    },
    /// Rebuild the top-comments feed every hour until interrupted
    Poll,
}
