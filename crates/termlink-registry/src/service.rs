//! Collaborator traits: what a bridge may ask of the terminal registry.

use std::sync::Arc;

use async_trait::async_trait;
use termlink_common::{Listener, RegistryError, Subscription, TerminalId};

/// Shared handle to a live (or just-disposed) terminal instance.
pub type InstanceRef = Arc<dyn TerminalInstance>;

/// A terminal instance owned by the registry.
pub trait TerminalInstance: Send + Sync {
    fn id(&self) -> TerminalId;

    /// Display name.
    fn name(&self) -> String;

    /// OS process id of the shell. `None` until the shell has spawned.
    fn process_id(&self) -> Option<u32>;

    fn is_disposed(&self) -> bool;

    /// Kill the shell and remove the instance from its registry.
    ///
    /// Fires the registry's "instance disposed" event the first time it is
    /// called; later calls do nothing.
    fn dispose(&self);

    /// Write `text` into the shell's input stream, optionally followed by a
    /// line terminator.
    fn send_text(&self, text: &str, add_new_line: bool);
}

/// Parameters for [`TerminalService::create_instance`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateInstance {
    pub name: Option<String>,
    pub shell_path: Option<String>,
    pub shell_args: Option<Vec<String>>,
    /// Created on behalf of a user or extension rather than restored.
    pub interactive: bool,
}

/// Visibility of the terminal panel.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PanelState {
    pub visible: bool,
    pub focused: bool,
}

/// The registry operations and lifecycle events a bridge relies on.
#[async_trait]
pub trait TerminalService: Send + Sync {
    /// Create a new instance. Resolves once the instance is registered and
    /// resolvable through [`TerminalService::instance_from_id`]; the shell
    /// itself may still be starting.
    async fn create_instance(&self, request: CreateInstance)
        -> Result<InstanceRef, RegistryError>;

    /// Look up a live instance. Disposed instances are never returned.
    fn instance_from_id(&self, id: TerminalId) -> Option<InstanceRef>;

    fn active_instance(&self) -> Option<InstanceRef>;

    fn set_active_instance(&self, instance: &InstanceRef);

    /// Make the terminal panel visible, optionally moving input focus to it.
    fn show_panel(&self, take_focus: bool);

    fn hide_panel(&self);

    /// Fires once per instance, after it has left the registry.
    fn on_instance_disposed(&self, listener: Listener<InstanceRef>) -> Subscription;

    /// Fires at most once per instance, after its process id is assigned,
    /// and never after that instance's "disposed" event.
    ///
    /// Listeners must not synchronously dispose the instance they are
    /// handed.
    fn on_instance_process_id_ready(&self, listener: Listener<InstanceRef>) -> Subscription;
}
