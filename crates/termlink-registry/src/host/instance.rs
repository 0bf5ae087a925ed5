//! A single terminal instance owned by the host registry.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError, Weak};

use termlink_common::TerminalId;

use super::registry::HostRegistry;
use crate::launcher::{ShellProcess, ShellSpec};
use crate::service::TerminalInstance;

/// Line terminator appended by `send_text(.., add_new_line: true)`.
#[cfg(windows)]
const EOL: &str = "\r\n";
#[cfg(not(windows))]
const EOL: &str = "\n";

/// Shell I/O state guarded together.
#[derive(Default)]
struct InstanceIo {
    process: Option<Box<dyn ShellProcess>>,
    /// Input sent before the shell was attached.
    pending_input: Vec<u8>,
}

/// A terminal instance: one shell, its process id once known, and its
/// disposal state.
pub struct HostInstance {
    id: TerminalId,
    name: String,
    shell: ShellSpec,
    interactive: bool,
    process_id: OnceLock<u32>,
    disposed: AtomicBool,
    io: Mutex<InstanceIo>,
    /// Serializes the attach and dispose transitions so "process id ready"
    /// can never fire after "disposed" for the same instance.
    transition: Mutex<()>,
    registry: Weak<HostRegistry>,
}

impl HostInstance {
    pub(super) fn new(
        id: TerminalId,
        name: String,
        shell: ShellSpec,
        interactive: bool,
        registry: Weak<HostRegistry>,
    ) -> Self {
        Self {
            id,
            name,
            shell,
            interactive,
            process_id: OnceLock::new(),
            disposed: AtomicBool::new(false),
            io: Mutex::new(InstanceIo::default()),
            transition: Mutex::new(()),
            registry,
        }
    }

    pub fn shell(&self) -> &ShellSpec {
        &self.shell
    }

    pub fn is_interactive(&self) -> bool {
        self.interactive
    }

    /// Whether a shell process is currently attached.
    pub fn has_process(&self) -> bool {
        self.lock_io().process.is_some()
    }

    /// Hand the freshly launched shell to this instance.
    ///
    /// Flushes buffered input, records the process id and fires "process id
    /// ready". Returns `false` (and kills the shell) when the instance was
    /// disposed while the shell was starting.
    pub(super) fn attach(&self, mut process: Box<dyn ShellProcess>) -> bool {
        let _transition = self.lock_transition();
        if self.is_disposed() {
            process.kill();
            tracing::debug!(terminal = %self.id, "shell arrived after dispose, killed");
            return false;
        }

        let pid = process.process_id();
        {
            let mut io = self.lock_io();
            if !io.pending_input.is_empty() {
                let pending = std::mem::take(&mut io.pending_input);
                if let Err(e) = process.write_input(&pending) {
                    tracing::warn!(terminal = %self.id, error = %e, "failed to flush buffered input");
                }
            }
            io.process = Some(process);
        }

        let Some(pid) = pid else {
            tracing::warn!(terminal = %self.id, "shell attached without a process id");
            return true;
        };
        if self.process_id.set(pid).is_err() {
            return true;
        }
        tracing::info!(terminal = %self.id, pid, "shell process ready");

        if let Some(registry) = self.registry.upgrade() {
            registry.announce_process_id(self.id);
        }
        true
    }

    /// Mark disposed without firing events. Used when creation is rolled back
    /// before the id was ever handed out.
    pub(super) fn abandon(&self) {
        self.disposed.store(true, Ordering::SeqCst);
    }

    /// Kill the shell without touching the registry.
    pub(super) fn kill_process(&self) {
        let process = self.lock_io().process.take();
        if let Some(mut process) = process {
            process.kill();
        }
    }

    fn lock_io(&self) -> MutexGuard<'_, InstanceIo> {
        self.io.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_transition(&self) -> MutexGuard<'_, ()> {
        self.transition
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl TerminalInstance for HostInstance {
    fn id(&self) -> TerminalId {
        self.id
    }

    fn name(&self) -> String {
        self.name.clone()
    }

    fn process_id(&self) -> Option<u32> {
        self.process_id.get().copied()
    }

    fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }

    fn dispose(&self) {
        if self.is_disposed() {
            return;
        }
        let _transition = self.lock_transition();
        if self.disposed.swap(true, Ordering::SeqCst) {
            return;
        }

        {
            let mut io = self.lock_io();
            io.pending_input.clear();
            if let Some(mut process) = io.process.take() {
                process.kill();
            }
        }
        tracing::info!(terminal = %self.id, "terminal disposed");

        if let Some(registry) = self.registry.upgrade() {
            registry.retire(self.id);
        }
    }

    fn send_text(&self, text: &str, add_new_line: bool) {
        if self.is_disposed() {
            tracing::debug!(terminal = %self.id, "send_text on disposed terminal ignored");
            return;
        }

        let payload = compose_input(text, add_new_line);
        let mut io = self.lock_io();
        match io.process.as_mut() {
            Some(process) => {
                if let Err(e) = process.write_input(payload.as_bytes()) {
                    tracing::warn!(terminal = %self.id, error = %e, "send_text: write failed");
                }
            }
            None => io.pending_input.extend_from_slice(payload.as_bytes()),
        }
    }
}

impl std::fmt::Debug for HostInstance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HostInstance")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("process_id", &self.process_id.get())
            .field("disposed", &self.is_disposed())
            .finish()
    }
}

/// Append the platform line terminator unless the text already ends with it.
fn compose_input(text: &str, add_new_line: bool) -> String {
    if add_new_line && !text.ends_with(EOL) {
        format!("{text}{EOL}")
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compose_input_without_new_line_is_verbatim() {
        assert_eq!(compose_input("ls\n", false), "ls\n");
        assert_eq!(compose_input("ls", false), "ls");
    }

    #[test]
    fn compose_input_appends_eol() {
        assert_eq!(compose_input("ls", true), format!("ls{EOL}"));
    }

    #[test]
    fn compose_input_does_not_double_eol() {
        let text = format!("ls{EOL}");
        assert_eq!(compose_input(&text, true), text);
    }

    #[test]
    fn compose_input_empty_text_with_new_line() {
        assert_eq!(compose_input("", true), EOL);
    }
}
