//! Shell detection and environment sanitization for spawned shells.

use portable_pty::CommandBuilder;

use super::ShellSpec;

// =============================================================================
// SHELL DETECTION
// =============================================================================

/// Get the user's default shell.
///
/// - Unix: reads `$SHELL`, falls back to `/bin/sh`
/// - Windows: reads `$COMSPEC`, falls back to `cmd.exe`
pub fn default_shell() -> String {
    #[cfg(unix)]
    {
        std::env::var("SHELL").unwrap_or_else(|_| "/bin/sh".to_string())
    }
    #[cfg(windows)]
    {
        std::env::var("COMSPEC").unwrap_or_else(|_| "cmd.exe".to_string())
    }
}

// =============================================================================
// ENVIRONMENT SANITIZATION
// =============================================================================

/// Host environment variables a shell inherits.
///
/// Everything else (API keys, tokens, the host's own settings) stays out of
/// the shell's environment unless configured explicitly in `shell.env`.
pub const ALLOWED_ENV_VARS: &[&str] = &[
    "HOME",
    "USER",
    "LOGNAME",
    "SHELL",
    "PATH",
    "TERM",
    "LANG",
    "LC_ALL",
    "LC_CTYPE",
    "DISPLAY",
    "WAYLAND_DISPLAY",
    "XDG_RUNTIME_DIR",
    "TMPDIR",
    "TMP",
    "TEMP",
    // Windows-specific
    "USERPROFILE",
    "APPDATA",
    "LOCALAPPDATA",
    "SYSTEMROOT",
    "COMSPEC",
    "HOMEDRIVE",
    "HOMEPATH",
];

/// Build a sanitized `CommandBuilder` for a resolved shell spec.
pub(super) fn build_shell_command(spec: &ShellSpec) -> CommandBuilder {
    let mut cmd = CommandBuilder::new(&spec.program);

    cmd.env_clear();
    for key in ALLOWED_ENV_VARS {
        if let Ok(val) = std::env::var(key) {
            cmd.env(key, val);
        }
    }
    cmd.env("TERM", "xterm-256color");

    // Configured variables win over inherited ones
    for (key, val) in &spec.env {
        cmd.env(key, val);
    }

    #[cfg(unix)]
    if spec.login {
        cmd.arg("-l");
    }
    cmd.args(&spec.args);

    if let Some(ref dir) = spec.cwd {
        cmd.cwd(dir);
    }

    cmd
}

// =============================================================================
// TESTS
// =============================================================================
