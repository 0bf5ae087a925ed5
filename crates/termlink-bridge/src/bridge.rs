use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use termlink_common::{new_correlation_id, BridgeError, Subscription, TerminalId};
use termlink_registry::{InstanceRef, TerminalInstance, TerminalService};

use crate::options::CreateTerminalOptions;
use crate::peer::{BridgeNotification, RemotePeer};
use crate::policy::{HandlerOutcome, MissingPolicy, Operation};

// =============================================================================
// OUTBOUND GATE
// =============================================================================

/// The peer handle shared with the registry listeners.
///
/// Forwarding happens under the lock, so once [`Outbound::close`] returns no
/// further notification can reach the peer.
struct Outbound {
    peer: Mutex<Option<Arc<dyn RemotePeer>>>,
    tag: String,
}

impl Outbound {
    fn lock(&self) -> MutexGuard<'_, Option<Arc<dyn RemotePeer>>> {
        self.peer.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn forward(&self, notification: BridgeNotification) {
        let peer = self.lock();
        let Some(peer) = peer.as_ref() else {
            tracing::trace!(bridge = %self.tag, ?notification, "bridge closed, notification dropped");
            return;
        };

        tracing::debug!(bridge = %self.tag, ?notification, "forwarding notification");
        if let Err(e) = peer.notify(notification) {
            tracing::warn!(bridge = %self.tag, error = %e, "failed to notify peer");
        }
    }

    /// Returns `true` if the gate was open.
    fn close(&self) -> bool {
        self.lock().take().is_some()
    }

    fn is_closed(&self) -> bool {
        self.lock().is_none()
    }
}

// =============================================================================
// BRIDGE
// =============================================================================

/// Bridges one remote peer to the terminal registry.
///
/// Lifecycle listeners are installed on construction and released on
/// [`TerminalBridge::teardown`] or drop.
pub struct TerminalBridge {
    service: Arc<dyn TerminalService>,
    outbound: Arc<Outbound>,
    subscriptions: Vec<Subscription>,
}

impl TerminalBridge {
    pub fn new(service: Arc<dyn TerminalService>, peer: Arc<dyn RemotePeer>) -> Self {
        let tag = new_correlation_id();
        let outbound = Arc::new(Outbound {
            peer: Mutex::new(Some(peer)),
            tag: tag.clone(),
        });

        let closed = {
            let outbound = Arc::clone(&outbound);
            service.on_instance_disposed(Box::new(move |instance: &InstanceRef| {
                outbound.forward(BridgeNotification::TerminalClosed { id: instance.id() });
            }))
        };

        let process_id_ready = {
            let outbound = Arc::clone(&outbound);
            service.on_instance_process_id_ready(Box::new(move |instance: &InstanceRef| {
                match instance.process_id() {
                    Some(process_id) => {
                        outbound.forward(BridgeNotification::TerminalProcessIdReady {
                            id: instance.id(),
                            process_id,
                        });
                    }
                    None => {
                        tracing::warn!(
                            bridge = %outbound.tag,
                            terminal = %instance.id(),
                            "process id ready without a process id"
                        );
                    }
                }
            }))
        };

        tracing::info!(bridge = %tag, "terminal bridge attached");
        Self {
            service,
            outbound,
            subscriptions: vec![closed, process_id_ready],
        }
    }

    /// Correlation tag used in this bridge's log lines.
    pub fn tag(&self) -> &str {
        &self.outbound.tag
    }

    /// Create a terminal and return its id once the registry has it.
    pub async fn create_terminal(
        &self,
        options: CreateTerminalOptions,
    ) -> Result<TerminalId, BridgeError> {
        let instance = self.service.create_instance(options.into()).await?;
        let id = instance.id();
        tracing::debug!(bridge = %self.tag(), terminal = %id, "terminal created");
        Ok(id)
    }

    /// Make `id` the active terminal and show the panel.
    pub fn show(&self, id: TerminalId, preserve_focus: bool) -> HandlerOutcome {
        let Some(instance) = self.lookup(Operation::Show, id) else {
            return HandlerOutcome::UnknownTerminal;
        };
        self.service.set_active_instance(&instance);
        self.service.show_panel(!preserve_focus);
        HandlerOutcome::Applied
    }

    /// Hide the panel if `id` is the active terminal.
    pub fn hide(&self, id: TerminalId) -> HandlerOutcome {
        let Some(active) = self.service.active_instance() else {
            match Operation::Hide.on_missing_active() {
                MissingPolicy::Ignore => {
                    tracing::debug!(bridge = %self.tag(), terminal = %id, "hide: no active terminal");
                }
            }
            return HandlerOutcome::NoActiveTerminal;
        };

        if active.id() != id {
            tracing::debug!(
                bridge = %self.tag(),
                terminal = %id,
                active = %active.id(),
                "hide: terminal is not active"
            );
            return HandlerOutcome::NotActive;
        }

        self.service.hide_panel();
        HandlerOutcome::Applied
    }

    pub fn dispose(&self, id: TerminalId) -> HandlerOutcome {
        let Some(instance) = self.lookup(Operation::Dispose, id) else {
            return HandlerOutcome::UnknownTerminal;
        };
        instance.dispose();
        HandlerOutcome::Applied
    }

    pub fn send_text(&self, id: TerminalId, text: &str, add_new_line: bool) -> HandlerOutcome {
        let Some(instance) = self.lookup(Operation::SendText, id) else {
            return HandlerOutcome::UnknownTerminal;
        };
        instance.send_text(text, add_new_line);
        HandlerOutcome::Applied
    }

    /// Stop forwarding and release the registry listeners. Idempotent.
    pub fn teardown(&mut self) {
        let was_open = self.outbound.close();
        let released = self.subscriptions.len();
        for subscription in self.subscriptions.drain(..) {
            subscription.dispose();
        }
        if was_open {
            tracing::info!(bridge = %self.tag(), released, "terminal bridge torn down");
        }
    }

    pub fn is_torn_down(&self) -> bool {
        self.outbound.is_closed()
    }

    fn lookup(&self, operation: Operation, id: TerminalId) -> Option<InstanceRef> {
        let instance = self.service.instance_from_id(id);
        if instance.is_none() {
            match operation.on_missing_target() {
                MissingPolicy::Ignore => {
                    tracing::debug!(
                        bridge = %self.tag(),
                        terminal = %id,
                        op = %operation,
                        "unknown terminal, ignored"
                    );
                }
            }
        }
        instance
    }
}

impl Drop for TerminalBridge {
    fn drop(&mut self) {
        self.teardown();
    }
}

impl std::fmt::Debug for TerminalBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TerminalBridge")
            .field("tag", &self.tag())
            .field("torn_down", &self.is_torn_down())
            .finish()
    }
}
