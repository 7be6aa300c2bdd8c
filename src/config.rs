//! Configuration and CLI argument handling

use std::time::Duration;
use clap::Parser;

const MAX_CLEANUP_MINUTES: u64 = 7 * 24 * 60;

/// CLI argument parsing structure
#[derive(Debug, Parser)]
#[command(name = "sequence-timers")]
#[command(about = "Pausable timer sequences served over a small JSON API")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "0.0.0.0")]
    pub host: String,

    /// Minutes between sweeps that delete ended runs, at most one week
    #[arg(short, long, default_value = "60", value_parser = clap::value_parser!(u64).range(1..=MAX_CLEANUP_MINUTES))]
    pub cleanup_interval: u64,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    pub fn cleanup_every(&self) -> Duration {
        Duration::from_secs(self.cleanup_interval * 60)
    }
}
