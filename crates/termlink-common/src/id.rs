use serde::{Deserialize, Serialize};
use std::fmt;

/// Short hex tag used to correlate log lines belonging to one bridge.
pub fn new_correlation_id() -> String {
    let uuid = uuid::Uuid::new_v4();
    let bytes = uuid.as_bytes();
    format!(
        "{:02x}{:02x}{:02x}{:02x}",
        bytes[0], bytes[1], bytes[2], bytes[3]
    )
}

/// Identifier of a terminal instance, unique for the lifetime of the
/// registry that assigned it.
///
/// Crosses the process boundary as a bare integer. Nothing outside the
/// registry interprets the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TerminalId(pub u32);

impl TerminalId {
    pub fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for TerminalId {
    fn from(raw: u32) -> Self {
        Self(raw)
    }
}

impl fmt::Display for TerminalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "terminal-{}", self.0)
    }
}
