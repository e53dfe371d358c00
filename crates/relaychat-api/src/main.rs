//! relaychat CLI and relay server entry point.
//!
//! Binary name: `relaychat`
//!
//! Parses CLI arguments, sets up tracing, loads configuration, then either
//! starts the relay server or opens the terminal chat client.

mod cli;
mod http;
mod state;

use clap::Parser;

use relaychat_infra::config::load_config;
use relaychat_observe::tracing_setup::{LogOptions, init_tracing, shutdown_tracing};

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let options = LogOptions {
        json: cli.log_json,
        otel: cli.otel,
        span_events: cli.verbose > 1,
        ..LogOptions::new(cli.default_filter())
    };
    init_tracing(&options).map_err(|e| anyhow::anyhow!("Failed to initialize tracing: {e}"))?;

    let mut config = load_config().await?;

    let result = match cli.command {
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            cli::serve::serve(&config).await
        }
        Commands::Chat { relay } => {
            if let Some(url) = relay {
                config.client.relay_base_url = url;
            }
            cli::chat::loop_runner::run_chat_loop(&config.client).await
        }
    };

    shutdown_tracing();
    result
}
