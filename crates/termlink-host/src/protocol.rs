//! Wire frames of the stdio transport.
//!
//! One JSON object per line. Requests carry an `id` that the response
//! echoes; notifications from the bridge carry none.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use termlink_common::TerminalId;

/// A command from the peer.
#[derive(Debug, Deserialize)]
pub struct RequestFrame {
    #[serde(default)]
    pub id: Value,
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

/// Reply to a [`RequestFrame`].
#[derive(Debug, Serialize, PartialEq)]
#[serde(untagged)]
pub enum ResponseFrame {
    Success { id: Value, result: Value },
    Failure { id: Value, error: String },
}

impl ResponseFrame {
    pub fn ok(id: Value, result: Value) -> Self {
        ResponseFrame::Success { id, result }
    }

    pub fn error(id: Value, error: impl Into<String>) -> Self {
        ResponseFrame::Failure {
            id,
            error: error.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowParams {
    pub id: TerminalId,
    #[serde(default)]
    pub preserve_focus: bool,
}

/// Params of `hide` and `dispose`.
#[derive(Debug, Deserialize)]
pub struct TerminalParams {
    pub id: TerminalId,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendTextParams {
    pub id: TerminalId,
    pub text: String,
    #[serde(default)]
    pub add_new_line: bool,
}
