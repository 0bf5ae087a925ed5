//! Default TOML config template with inline documentation comments.

/// Generate the default TOML config content with comments.
pub(crate) fn default_config_toml() -> String {
    r##"# termlink configuration
# Schema version 1
# Only override what you want to change -- missing fields use defaults.

[shell]
# program = ""            # empty: $SHELL (Unix) or %COMSPEC% (Windows)
# args = []
# working_directory = "~/src"
# login_shell = true

[shell.env]
# EDITOR = "nvim"

[terminal]
# cols = 80               # 1-500
# rows = 24               # 1-500
# max_terminals = 32      # 1-256

[logging]
# level = "INFO"          # DEBUG, INFO, WARNING, ERROR
"##
    .to_string()
}
