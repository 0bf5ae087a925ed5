//! Outbound notification surface toward the remote peer.

use serde::{Deserialize, Serialize};
use termlink_common::{LinkError, TerminalId};
use tokio::sync::mpsc;

/// Notifications the bridge sends to its peer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "method", content = "params")]
pub enum BridgeNotification {
    #[serde(rename = "terminalClosed")]
    TerminalClosed { id: TerminalId },

    #[serde(rename = "terminalProcessId")]
    TerminalProcessIdReady {
        id: TerminalId,
        #[serde(rename = "processId")]
        process_id: u32,
    },
}

impl BridgeNotification {
    pub fn terminal_id(&self) -> TerminalId {
        match self {
            BridgeNotification::TerminalClosed { id }
            | BridgeNotification::TerminalProcessIdReady { id, .. } => *id,
        }
    }

    pub fn to_json(&self) -> Result<String, LinkError> {
        serde_json::to_string(self).map_err(|e| LinkError::Encode(e.to_string()))
    }
}

/// The remote side of a bridge.
///
/// `notify` may be called from any thread and must not block on the peer.
pub trait RemotePeer: Send + Sync {
    fn notify(&self, notification: BridgeNotification) -> Result<(), LinkError>;
}

/// A peer backed by an unbounded channel drained by the transport.
#[derive(Debug, Clone)]
pub struct ChannelPeer {
    tx: mpsc::UnboundedSender<BridgeNotification>,
}

impl ChannelPeer {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<BridgeNotification>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl RemotePeer for ChannelPeer {
    fn notify(&self, notification: BridgeNotification) -> Result<(), LinkError> {
        self.tx
            .send(notification)
            .map_err(|_| LinkError::PeerDisconnected)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_closed_wire_format() {
        let json = BridgeNotification::TerminalClosed { id: TerminalId(1) }
            .to_json()
            .unwrap();
        assert_eq!(json, r#"{"method":"terminalClosed","params":{"id":1}}"#);
    }

    #[test]
    fn process_id_wire_format() {
        let json = BridgeNotification::TerminalProcessIdReady {
            id: TerminalId(1),
            process_id: 4242,
        }
        .to_json()
        .unwrap();
        assert_eq!(
            json,
            r#"{"method":"terminalProcessId","params":{"id":1,"processId":4242}}"#
        );
    }

    #[test]
    fn parses_wire_format() {
        let parsed: BridgeNotification =
            serde_json::from_str(r#"{"method":"terminalProcessId","params":{"id":7,"processId":9}}"#)
                .unwrap();
        assert_eq!(parsed.terminal_id(), TerminalId(7));
    }

    #[test]
    fn channel_peer_delivers_in_order() {
        let (peer, mut rx) = ChannelPeer::new();
        peer.notify(BridgeNotification::TerminalClosed { id: TerminalId(1) })
            .unwrap();
        peer.notify(BridgeNotification::TerminalClosed { id: TerminalId(2) })
            .unwrap();
        assert_eq!(rx.try_recv().unwrap().terminal_id(), TerminalId(1));
        assert_eq!(rx.try_recv().unwrap().terminal_id(), TerminalId(2));
    }

    #[test]
    fn channel_peer_reports_disconnect() {
        let (peer, rx) = ChannelPeer::new();
        drop(rx);
        let result = peer.notify(BridgeNotification::TerminalClosed { id: TerminalId(1) });
        assert!(matches!(result, Err(LinkError::PeerDisconnected)));
    }
}
