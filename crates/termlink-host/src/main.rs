//! termlink: terminal host exposing a remote-command bridge on stdio.
//!
//! Reads JSON-lines requests from stdin, runs them against the local
//! terminal registry, and writes responses plus terminal lifecycle
//! notifications to stdout. Logs go to stderr.

mod cli;
mod dispatch;
mod protocol;
mod transport;

use std::sync::Arc;

use termlink_bridge::{ChannelPeer, TerminalBridge};
use termlink_common::ConfigError;
use termlink_config::{LogLevel, TermlinkConfig};
use termlink_registry::{HostRegistry, PtyLauncher};
use tokio::io::BufReader;
use tracing_subscriber::EnvFilter;

/// Pick the log filter: `RUST_LOG`, then the CLI directive, then the config.
fn init_logging(cli_directive: Option<&str>, config_level: LogLevel) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let directive = cli_directive.unwrap_or(config_level.as_directive());
        EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("info"))
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(args: &cli::Args) -> Result<TermlinkConfig, ConfigError> {
    match args.config {
        Some(ref path) => termlink_config::load_config_from(path),
        None => termlink_config::load_config(),
    }
}

#[tokio::main]
async fn main() {
    let args = cli::parse();

    // Logging needs the configured level, so config errors are reported
    // once the subscriber is up.
    let loaded = load_config(&args);
    let level = loaded
        .as_ref()
        .map(|config| config.logging.level)
        .unwrap_or_default();
    init_logging(args.log_level.as_deref(), level);

    tracing::info!("termlink v{} starting...", env!("CARGO_PKG_VERSION"));

    let mut config = loaded.unwrap_or_else(|e| {
        tracing::warn!("Config load failed, using defaults: {e}");
        TermlinkConfig::default()
    });
    if let Some(shell) = args.shell {
        config.shell.program = shell;
    }
    tracing::info!(
        shell = %config.shell.program,
        max_terminals = config.terminal.max_terminals,
        "Config loaded"
    );

    let registry = HostRegistry::new(config, Arc::new(PtyLauncher::new()));
    let (peer, notifications) = ChannelPeer::new();
    let bridge = TerminalBridge::new(registry.clone(), Arc::new(peer));
    tracing::info!(bridge = %bridge.tag(), "Serving on stdio");

    let reason = transport::run(
        bridge,
        notifications,
        BufReader::new(tokio::io::stdin()),
        tokio::io::stdout(),
    )
    .await;

    registry.shutdown();
    tracing::info!(?reason, "Shutdown complete");
}
