//! Configuration schema types for termlink.
//!
//! All structs use `serde(default)` so partial configs work correctly.

mod shell;
mod system;
mod terminal;

pub use shell::*;
pub use system::*;
pub use terminal::*;

use serde::{Deserialize, Serialize};

/// Current config schema version.
pub const CONFIG_SCHEMA_VERSION: u32 = 1;

/// Root configuration for the terminal host.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TermlinkConfig {
    pub shell: ShellConfig,
    pub terminal: TerminalConfig,
    pub logging: LoggingConfig,
}

// =============================================================================
// Tests
// =============================================================================
