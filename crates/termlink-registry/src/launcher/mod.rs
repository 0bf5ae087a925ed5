//! Shell launching: turns a [`ShellSpec`] into a running process.
//!
//! The registry never talks to a PTY directly. It hands a resolved spec to a
//! [`ShellLauncher`] on a background thread and keeps the returned
//! [`ShellProcess`] for input and teardown.

mod env;
mod pty;

use std::collections::HashMap;
use std::path::PathBuf;

use termlink_common::RegistryError;
use termlink_config::TermlinkConfig;

pub use env::{default_shell, ALLOWED_ENV_VARS};
pub use pty::PtyLauncher;

/// Called once by the launcher when the shell's output stream ends.
pub type ExitNotifier = Box<dyn FnOnce() + Send>;

/// Fully resolved description of the shell to start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellSpec {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
    pub env: HashMap<String, String>,
    /// Start as a login shell (`-l` on Unix).
    pub login: bool,
    pub cols: u16,
    pub rows: u16,
}

impl ShellSpec {
    /// Resolve the shell for a create request against the host config.
    ///
    /// An explicit `shell_path` takes its own `shell_args` (or none) and is
    /// never turned into a login shell. Without one, the configured program
    /// (or the platform default) is used with the request's args if given,
    /// else the configured args.
    pub fn resolve(
        config: &TermlinkConfig,
        shell_path: Option<&str>,
        shell_args: Option<&[String]>,
    ) -> Self {
        let (program, args, login) = match shell_path.filter(|p| !p.is_empty()) {
            Some(path) => (
                path.to_string(),
                shell_args.map(<[String]>::to_vec).unwrap_or_default(),
                false,
            ),
            None => {
                let program = config
                    .shell
                    .configured_program()
                    .map(str::to_string)
                    .unwrap_or_else(default_shell);
                let args = shell_args
                    .map(<[String]>::to_vec)
                    .unwrap_or_else(|| config.shell.args.clone());
                (program, args, config.shell.login_shell)
            }
        };

        Self {
            program,
            args,
            cwd: config.shell.working_directory.as_deref().map(expand_home),
            env: config.shell.env.clone(),
            login,
            cols: config.terminal.cols,
            rows: config.terminal.rows,
        }
    }

    /// File name of the shell program, used as the default display name.
    pub fn display_name(&self) -> String {
        std::path::Path::new(&self.program)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| self.program.clone())
    }
}

/// Expand a leading `~` to the user's home directory.
fn expand_home(path: &str) -> PathBuf {
    match path.strip_prefix('~') {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => match dirs::home_dir() {
            Some(home) => home.join(rest.trim_start_matches('/')),
            None => PathBuf::from(path),
        },
        _ => PathBuf::from(path),
    }
}

/// Starts shell processes.
pub trait ShellLauncher: Send + Sync {
    /// Start the shell described by `spec`.
    ///
    /// `on_exit` must be invoked at most once, when the shell's output
    /// stream ends. It may be invoked from any thread.
    fn launch(
        &self,
        spec: &ShellSpec,
        on_exit: ExitNotifier,
    ) -> Result<Box<dyn ShellProcess>, RegistryError>;
}

/// A running shell.
pub trait ShellProcess: Send {
    fn process_id(&self) -> Option<u32>;

    fn write_input(&mut self, data: &[u8]) -> Result<(), RegistryError>;

    /// Terminate the shell. Errors are logged, not returned: the process may
    /// already be gone.
    fn kill(&mut self);
}
