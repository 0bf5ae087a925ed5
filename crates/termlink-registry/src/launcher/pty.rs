//! PTY-backed shell launcher built on `portable-pty`.

use std::io::{Read, Write};
use std::thread;

use portable_pty::{native_pty_system, Child, MasterPty, PtySize};
use termlink_common::RegistryError;

use super::env::build_shell_command;
use super::{ExitNotifier, ShellLauncher, ShellProcess, ShellSpec};

/// Maximum bytes to read from a PTY in a single call (8 KB).
pub const PTY_READ_CHUNK: usize = 8_192;

/// Launches shells inside native pseudo-terminals.
///
/// Each shell gets a background reader thread that drains its output and
/// reports end-of-stream through the [`ExitNotifier`].
#[derive(Debug, Clone, Copy, Default)]
pub struct PtyLauncher;

impl PtyLauncher {
    pub fn new() -> Self {
        Self
    }
}

impl ShellLauncher for PtyLauncher {
    fn launch(
        &self,
        spec: &ShellSpec,
        on_exit: ExitNotifier,
    ) -> Result<Box<dyn ShellProcess>, RegistryError> {
        let pty_system = native_pty_system();

        let size = PtySize {
            rows: spec.rows,
            cols: spec.cols,
            pixel_width: 0,
            pixel_height: 0,
        };

        let pair = pty_system
            .openpty(size)
            .map_err(|e| RegistryError::Launch(format!("failed to open PTY: {e}")))?;

        let cmd = build_shell_command(spec);
        let child = pair.slave.spawn_command(cmd).map_err(|e| {
            RegistryError::Launch(format!("failed to spawn shell '{}': {e}", spec.program))
        })?;

        // Only the master side is needed from here on
        drop(pair.slave);

        let writer = pair
            .master
            .take_writer()
            .map_err(|e| RegistryError::Launch(format!("failed to take PTY writer: {e}")))?;

        let mut reader = pair
            .master
            .try_clone_reader()
            .map_err(|e| RegistryError::Launch(format!("failed to clone PTY reader: {e}")))?;

        let pid = child.process_id();
        thread::Builder::new()
            .name("pty-reader".to_string())
            .spawn(move || {
                let mut buf = [0u8; PTY_READ_CHUNK];
                let mut total = 0usize;
                loop {
                    match reader.read(&mut buf) {
                        Ok(0) => break, // EOF: shell exited
                        Ok(n) => {
                            total += n;
                            tracing::trace!(?pid, bytes = n, "PTY output drained");
                        }
                        Err(e) => {
                            tracing::debug!(?pid, "PTY reader error: {e}");
                            break;
                        }
                    }
                }
                tracing::debug!(?pid, total, "PTY output closed");
                on_exit();
            })
            .map_err(|e| {
                RegistryError::Launch(format!("failed to spawn PTY reader thread: {e}"))
            })?;

        Ok(Box::new(PtyProcess {
            writer,
            child,
            _master: pair.master,
        }))
    }
}

/// A shell running inside a PTY.
struct PtyProcess {
    writer: Box<dyn Write + Send>,
    child: Box<dyn Child + Send + Sync>,
    /// Held so the PTY stays open for the lifetime of the shell.
    _master: Box<dyn MasterPty + Send>,
}

impl ShellProcess for PtyProcess {
    fn process_id(&self) -> Option<u32> {
        self.child.process_id()
    }

    fn write_input(&mut self, data: &[u8]) -> Result<(), RegistryError> {
        self.writer
            .write_all(data)
            .map_err(|e| RegistryError::Launch(format!("PTY write failed: {e}")))?;
        self.writer
            .flush()
            .map_err(|e| RegistryError::Launch(format!("PTY flush failed: {e}")))?;
        Ok(())
    }

    fn kill(&mut self) {
        if let Err(e) = self.child.kill() {
            tracing::debug!("PTY kill error (may already be dead): {e}");
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
