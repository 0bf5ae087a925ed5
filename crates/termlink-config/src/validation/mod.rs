//! Configuration validation.
//!
//! Checks numeric ranges and collects every failure into a single
//! `ConfigError`.

mod helpers;


use crate::schema::TermlinkConfig;
use helpers::validate_range;
use termlink_common::ConfigError;

/// Largest accepted PTY dimension, in cells.
pub const MAX_TERMINAL_DIMENSION: u32 = 500;

/// Largest accepted `terminal.max_terminals`.
pub const MAX_TERMINAL_LIMIT: u32 = 256;

/// Run all validations on a config, collecting all errors.
pub fn validate(config: &TermlinkConfig) -> Result<(), ConfigError> {
    let mut errors: Vec<String> = Vec::new();

    validate_terminal(&mut errors, config);
    validate_shell(&mut errors, config);

    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::ValidationError(errors.join("; ")))
    }
}

fn validate_terminal(errors: &mut Vec<String>, config: &TermlinkConfig) {
    let terminal = &config.terminal;
    validate_range(
        errors,
        "terminal.cols",
        u32::from(terminal.cols),
        1,
        MAX_TERMINAL_DIMENSION,
    );
    validate_range(
        errors,
        "terminal.rows",
        u32::from(terminal.rows),
        1,
        MAX_TERMINAL_DIMENSION,
    );
    validate_range(
        errors,
        "terminal.max_terminals",
        terminal.max_terminals,
        1,
        MAX_TERMINAL_LIMIT,
    );
}

fn validate_shell(errors: &mut Vec<String>, config: &TermlinkConfig) {
    if config.shell.program.trim() != config.shell.program {
        errors.push("shell.program must not have leading or trailing whitespace".into());
    }
    for key in config.shell.env.keys() {
        if key.is_empty() || key.contains('=') || key.contains('\0') {
            errors.push(format!("shell.env key {key:?} is not a valid variable name"));
        }
    }
}
