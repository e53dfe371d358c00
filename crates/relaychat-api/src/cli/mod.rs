//! CLI command definitions for the `relaychat` binary.
//!
//! Uses clap derive macros. Two subcommands: `serve` runs the relay, `chat`
//! opens the terminal client against a running relay.

pub mod chat;
pub mod serve;

use clap::{Parser, Subcommand};

/// Chat relay for the Gemini generative API, with a terminal client.
#[derive(Parser)]
#[command(name = "relaychat", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Suppress all log output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for verbose, -vv for debug/trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Emit logs as JSON lines.
    #[arg(long, global = true, env = "RELAYCHAT_LOG_JSON")]
    pub log_json: bool,

    /// Export spans through OpenTelemetry (stdout exporter).
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Log filter used when `RUST_LOG` is unset.
    pub fn default_filter(&self) -> &'static str {
        match self.verbose {
            0 if self.quiet => "error",
            0 => "warn",
            1 => "info,relaychat=debug",
            _ => "trace",
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the relay HTTP server.
    Serve {
        /// Interface to bind (overrides HOST and the config file).
        #[arg(long)]
        host: Option<String>,

        /// Port to listen on (overrides PORT and the config file).
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Chat with the model through a running relay.
    Chat {
        /// Relay API base URL (overrides RELAY_BASE_URL and the config file).
        #[arg(long)]
        relay: Option<String>,
    },
}
