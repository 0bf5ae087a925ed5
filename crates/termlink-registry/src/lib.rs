//! Terminal registry: the host-side owner of terminal instances.
//!
//! Defines the collaborator surface the bridge consumes
//! ([`TerminalService`], [`TerminalInstance`]) and the host implementation
//! [`HostRegistry`], an arena of instances keyed by [`TerminalId`] whose
//! shells are started out-of-band through a [`ShellLauncher`].
//!
//! [`TerminalId`]: termlink_common::TerminalId

pub mod host;
pub mod launcher;
pub mod service;

pub use host::{HostInstance, HostRegistry};
pub use launcher::{ExitNotifier, PtyLauncher, ShellLauncher, ShellProcess, ShellSpec};
pub use service::{CreateInstance, InstanceRef, PanelState, TerminalInstance, TerminalService};
