//! The terminal bridge: executes a remote peer's terminal commands against
//! the host registry and forwards terminal lifecycle events back to it.
//!
//! Remote ids are opaque [`TerminalId`]s. Commands naming an id the registry
//! does not know are silent no-ops; the remote side may legitimately refer
//! to a terminal that was disposed a moment ago.
//!
//! [`TerminalId`]: termlink_common::TerminalId

mod bridge;
mod options;
mod peer;
mod policy;


pub use bridge::TerminalBridge;
pub use options::CreateTerminalOptions;
pub use peer::{BridgeNotification, ChannelPeer, RemotePeer};
pub use policy::{HandlerOutcome, MissingPolicy, Operation};
