//! `[shell]` section: the shell started for terminals created without an
//! explicit shell path.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Program to run. Empty means `$SHELL` (`%COMSPEC%` on Windows).
    pub program: String,
    /// Used only when the create request names no shell path and no args.
    pub args: Vec<String>,
    /// Starting directory; `~` expands to the home directory. Unset keeps
    /// the host's working directory.
    pub working_directory: Option<String>,
    /// Layered on top of the sanitized host environment.
    pub env: HashMap<String, String>,
    /// Start the configured shell with `-l` (Unix only). Never applied to
    /// shells named explicitly by a create request.
    pub login_shell: bool,
}

impl ShellConfig {
    /// The configured program, or `None` when it should be auto-detected.
    pub fn configured_program(&self) -> Option<&str> {
        let program = self.program.trim();
        (!program.is_empty()).then_some(program)
    }
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            program: String::new(),
            args: Vec::new(),
            working_directory: None,
            env: HashMap::new(),
            login_shell: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_auto_detected_login_shell() {
        let config = ShellConfig::default();
        assert_eq!(config.configured_program(), None);
        assert!(config.login_shell);
        assert!(config.env.is_empty());
    }

    #[test]
    fn blank_program_counts_as_unset() {
        let config = ShellConfig {
            program: "   ".into(),
            ..Default::default()
        };
        assert_eq!(config.configured_program(), None);
    }

    #[test]
    fn section_parses_without_touching_missing_keys() {
        let config: ShellConfig = toml::from_str(
            r#"
program = "/usr/bin/fish"
working_directory = "~/src"

[env]
PAGER = "less"
"#,
        )
        .unwrap();
        assert_eq!(config.configured_program(), Some("/usr/bin/fish"));
        assert_eq!(config.working_directory.as_deref(), Some("~/src"));
        assert_eq!(config.env["PAGER"], "less");
        assert!(config.args.is_empty());
        assert!(config.login_shell);
    }
}
