//! The host registry: id allocation, lookup, active pointer, panel state,
//! lifecycle events.

use std::collections::BTreeMap;
use std::sync::atomic::{AtomicBool, AtomicU32, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError, Weak};
use std::thread;

use async_trait::async_trait;
use termlink_common::{Emitter, Listener, RegistryError, Subscription, TerminalId};
use termlink_config::TermlinkConfig;

use super::instance::HostInstance;
use crate::launcher::{ExitNotifier, ShellLauncher, ShellSpec};
use crate::service::{CreateInstance, InstanceRef, PanelState, TerminalInstance, TerminalService};

/// Owns every terminal instance of the host, keyed by [`TerminalId`].
///
/// Ids start at 1 and are never reused. Always handled through an `Arc`:
/// instances keep a weak back-reference to report their own disposal.
pub struct HostRegistry {
    config: TermlinkConfig,
    launcher: Arc<dyn ShellLauncher>,
    next_id: AtomicU32,
    instances: Mutex<BTreeMap<TerminalId, Arc<HostInstance>>>,
    active: Mutex<Option<TerminalId>>,
    panel: Mutex<PanelState>,
    shutting_down: AtomicBool,
    disposed: Emitter<InstanceRef>,
    process_id_ready: Emitter<InstanceRef>,
    weak_self: Weak<HostRegistry>,
}

impl HostRegistry {
    pub fn new(config: TermlinkConfig, launcher: Arc<dyn ShellLauncher>) -> Arc<Self> {
        Arc::new_cyclic(|weak_self| Self {
            config,
            launcher,
            next_id: AtomicU32::new(1),
            instances: Mutex::new(BTreeMap::new()),
            active: Mutex::new(None),
            panel: Mutex::new(PanelState::default()),
            shutting_down: AtomicBool::new(false),
            disposed: Emitter::new(),
            process_id_ready: Emitter::new(),
            weak_self: weak_self.clone(),
        })
    }

    /// Concrete lookup, for host code that needs more than the trait surface.
    pub fn get(&self, id: TerminalId) -> Option<Arc<HostInstance>> {
        self.lock_instances().get(&id).cloned()
    }

    /// Ids of all live instances, ascending.
    pub fn instance_ids(&self) -> Vec<TerminalId> {
        self.lock_instances().keys().copied().collect()
    }

    /// Number of live instances.
    pub fn len(&self) -> usize {
        self.lock_instances().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock_instances().is_empty()
    }

    pub fn panel_state(&self) -> PanelState {
        *self.lock_panel()
    }

    pub fn active_id(&self) -> Option<TerminalId> {
        *self.lock_active()
    }

    pub fn is_shutting_down(&self) -> bool {
        self.shutting_down.load(Ordering::SeqCst)
    }

    /// Dispose every live instance and refuse further creation.
    ///
    /// Each disposal fires "instance disposed" as usual.
    pub fn shutdown(&self) {
        self.shutting_down.store(true, Ordering::SeqCst);
        let live: Vec<Arc<HostInstance>> = self.lock_instances().values().cloned().collect();
        let count = live.len();
        for instance in live {
            instance.dispose();
        }
        tracing::info!(count, "registry shut down");
    }

    /// Remove a disposed instance, repoint the active pointer, and fire
    /// "instance disposed". Called by the instance itself.
    pub(super) fn retire(&self, id: TerminalId) {
        let removed = {
            let mut instances = self.lock_instances();
            let removed = instances.remove(&id);

            let mut active = self.lock_active();
            if *active == Some(id) {
                *active = instances.keys().next_back().copied();
                tracing::debug!(terminal = %id, next = ?*active, "active terminal disposed");
            }
            removed
        };

        if let Some(instance) = removed {
            let instance: InstanceRef = instance;
            self.disposed.fire(&instance);
        }
    }

    /// Fire "process id ready" for a live instance. Called by the instance
    /// itself once its shell is attached.
    pub(super) fn announce_process_id(&self, id: TerminalId) {
        if let Some(instance) = self.get(id) {
            let instance: InstanceRef = instance;
            self.process_id_ready.fire(&instance);
        }
    }

    fn lock_instances(&self) -> MutexGuard<'_, BTreeMap<TerminalId, Arc<HostInstance>>> {
        self.instances
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_active(&self) -> MutexGuard<'_, Option<TerminalId>> {
        self.active.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn lock_panel(&self) -> MutexGuard<'_, PanelState> {
        self.panel.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register a new instance, enforcing the live-terminal limit.
    fn register(&self, request: &CreateInstance) -> Result<Arc<HostInstance>, RegistryError> {
        if self.is_shutting_down() {
            return Err(RegistryError::ShuttingDown);
        }

        let shell = ShellSpec::resolve(
            &self.config,
            request.shell_path.as_deref(),
            request.shell_args.as_deref(),
        );
        let limit = self.config.terminal.max_terminals;

        let mut instances = self.lock_instances();
        if instances.len() >= limit as usize {
            return Err(RegistryError::Capacity { limit });
        }

        let id = TerminalId(self.next_id.fetch_add(1, Ordering::SeqCst));
        let name = request
            .name
            .clone()
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| shell.display_name());
        let instance = Arc::new(HostInstance::new(
            id,
            name,
            shell,
            request.interactive,
            self.weak_self.clone(),
        ));
        instances.insert(id, Arc::clone(&instance));
        Ok(instance)
    }

    /// Start the shell for `instance` on a background thread.
    fn start_shell(&self, instance: &Arc<HostInstance>) -> Result<(), RegistryError> {
        let launcher = Arc::clone(&self.launcher);
        let weak = Arc::downgrade(instance);
        let id = instance.id();

        thread::Builder::new()
            .name(format!("shell-launch-{}", id.get()))
            .spawn(move || launch_shell(launcher.as_ref(), weak))
            .map(|_| ())
            .map_err(|e| RegistryError::Launch(format!("failed to spawn launch thread: {e}")))
    }
}

/// Launch thread body: start the shell and attach it, or dispose the
/// instance if the launch fails.
fn launch_shell(launcher: &dyn ShellLauncher, weak: Weak<HostInstance>) {
    let Some(instance) = weak.upgrade() else {
        return;
    };
    if instance.is_disposed() {
        return;
    }

    let exit_weak = weak.clone();
    let on_exit: ExitNotifier = Box::new(move || {
        if let Some(instance) = exit_weak.upgrade() {
            tracing::info!(terminal = %instance.id(), "shell exited");
            instance.dispose();
        }
    });

    match launcher.launch(instance.shell(), on_exit) {
        Ok(process) => {
            instance.attach(process);
        }
        Err(e) => {
            tracing::error!(terminal = %instance.id(), error = %e, "shell launch failed");
            instance.dispose();
        }
    }
}

#[async_trait]
impl TerminalService for HostRegistry {
    async fn create_instance(
        &self,
        request: CreateInstance,
    ) -> Result<InstanceRef, RegistryError> {
        let instance = self.register(&request)?;
        let id = instance.id();

        if let Err(e) = self.start_shell(&instance) {
            // Roll back: the id was never handed out, so no event fires.
            instance.abandon();
            self.lock_instances().remove(&id);
            return Err(e);
        }

        tracing::info!(
            terminal = %id,
            name = %instance.name(),
            shell = %instance.shell().program,
            interactive = request.interactive,
            "terminal created"
        );
        Ok(instance)
    }

    fn instance_from_id(&self, id: TerminalId) -> Option<InstanceRef> {
        self.get(id).map(|instance| instance as InstanceRef)
    }

    fn active_instance(&self) -> Option<InstanceRef> {
        let id = (*self.lock_active())?;
        self.instance_from_id(id)
    }

    fn set_active_instance(&self, instance: &InstanceRef) {
        let id = instance.id();
        let instances = self.lock_instances();
        if !instances.contains_key(&id) {
            tracing::debug!(terminal = %id, "set_active_instance: not a live terminal");
            return;
        }
        *self.lock_active() = Some(id);
        tracing::debug!(terminal = %id, "active terminal set");
    }

    fn show_panel(&self, take_focus: bool) {
        let mut panel = self.lock_panel();
        panel.visible = true;
        if take_focus {
            panel.focused = true;
        }
        tracing::debug!(take_focus, "terminal panel shown");
    }

    fn hide_panel(&self) {
        *self.lock_panel() = PanelState::default();
        tracing::debug!("terminal panel hidden");
    }

    fn on_instance_disposed(&self, listener: Listener<InstanceRef>) -> Subscription {
        self.disposed.subscribe(listener)
    }

    fn on_instance_process_id_ready(&self, listener: Listener<InstanceRef>) -> Subscription {
        self.process_id_ready.subscribe(listener)
    }
}

impl Drop for HostRegistry {
    fn drop(&mut self) {
        let instances = std::mem::take(
            self.instances
                .get_mut()
                .unwrap_or_else(PoisonError::into_inner),
        );
        for instance in instances.values() {
            instance.kill_process();
        }
    }
}
