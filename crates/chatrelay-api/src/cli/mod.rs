//! CLI command definitions and dispatch for the `chatrelay` binary.
//!
//! Uses clap derive macros for argument parsing.

pub mod check;
pub mod config;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use clap_complete::Shell;

/// Relay chat messages to an OpenAI-compatible LLM with per-user history.
#[derive(Parser)]
#[command(name = "chatrelay", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to the TOML config file (default: ./chatrelay.toml if present).
    #[arg(long, global = true, env = "CHATRELAY_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the HTTP server.
    Serve {
        /// Port to listen on (overrides config and CHATRELAY_PORT).
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to (overrides config and CHATRELAY_HOST).
        #[arg(long)]
        host: Option<String>,

        /// Also export tracing spans through OpenTelemetry (stdout).
        #[arg(long)]
        otel: bool,
    },

    /// Send a minimal completion upstream to verify endpoint and key.
    Check,

    /// Print the effective configuration.
    Config,

    /// Generate shell completions.
    Completions {
        /// Shell to generate completions for.
        shell: Shell,
    },
}

impl Cli {
    /// Default tracing directive derived from verbosity flags.
    ///
    /// `serve` logs at info by default; one-shot commands stay at warn so
    /// their output is not interleaved with log lines.
    pub fn log_directive(&self) -> &'static str {
        let serving = matches!(self.command, Commands::Serve { .. });
        match self.verbose {
            0 if self.quiet => "error",
            0 if serving => "info",
            0 => "warn",
            1 => "info,chatrelay=debug,chatrelay_core=debug,chatrelay_infra=debug",
            _ => "trace",
        }
    }

    pub fn otel_enabled(&self) -> bool {
        matches!(self.command, Commands::Serve { otel: true, .. })
    }
}
