use std::path::PathBuf;

use clap::Parser;

/// termlink: terminal host speaking a JSON-lines bridge protocol on stdio.
#[derive(Parser, Debug)]
#[command(name = "termlink", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Log filter directive (e.g. `debug`, `termlink_bridge=trace`).
    /// `RUST_LOG` takes precedence.
    #[arg(long)]
    pub log_level: Option<String>,

    /// Shell program for terminals created without an explicit shell path.
    #[arg(long)]
    pub shell: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}
