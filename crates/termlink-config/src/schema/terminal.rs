//! Terminal sizing and registry limits.

use serde::{Deserialize, Serialize};

/// Settings applied to every terminal the host creates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalConfig {
    /// Initial PTY width in columns (valid range: 1-500).
    pub cols: u16,
    /// Initial PTY height in rows (valid range: 1-500).
    pub rows: u16,
    /// Maximum number of live terminals (valid range: 1-256).
    pub max_terminals: u32,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            cols: 80,
            rows: 24,
            max_terminals: 32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_config_defaults() {
        let config = TerminalConfig::default();
        assert_eq!(config.cols, 80);
        assert_eq!(config.rows, 24);
        assert_eq!(config.max_terminals, 32);
    }

    #[test]
    fn terminal_config_partial_toml() {
        let config: TerminalConfig = toml::from_str("cols = 132").unwrap();
        assert_eq!(config.cols, 132);
        assert_eq!(config.rows, 24);
    }
}
