//! Request validation and dispatch from the peer to the bridge.

use serde::de::DeserializeOwned;
use serde_json::Value;
use termlink_bridge::{CreateTerminalOptions, HandlerOutcome, TerminalBridge};
use termlink_common::BridgeError;

use crate::protocol::{RequestFrame, ResponseFrame, SendTextParams, ShowParams, TerminalParams};

// =============================================================================
// METHOD ALLOWLIST
// =============================================================================

/// Methods the peer may call. Anything else is rejected and logged.
const ALLOWED_METHODS: &[&str] = &[
    "createTerminal",
    "show",
    "hide",
    "dispose",
    "sendText",
    "ping",
];

pub fn is_method_allowed(method: &str) -> bool {
    ALLOWED_METHODS.contains(&method)
}

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("unknown method: {0}")]
    UnknownMethod(String),

    #[error("invalid params for {method}: {message}")]
    InvalidParams { method: String, message: String },

    #[error(transparent)]
    Bridge(#[from] BridgeError),
}

// =============================================================================
// DISPATCH
// =============================================================================

/// Parse one request line and produce its response.
pub async fn handle_line(bridge: &TerminalBridge, line: &str) -> ResponseFrame {
    let request: RequestFrame = match serde_json::from_str(line) {
        Ok(r) => r,
        Err(e) => {
            tracing::warn!(len = line.len(), "request rejected: failed to parse");
            return ResponseFrame::error(Value::Null, format!("malformed request: {e}"));
        }
    };

    let id = request.id.clone();
    match dispatch(bridge, request).await {
        Ok(result) => ResponseFrame::ok(id, result),
        Err(e) => ResponseFrame::error(id, e.to_string()),
    }
}

pub async fn dispatch(bridge: &TerminalBridge, request: RequestFrame) -> Result<Value, DispatchError> {
    if !is_method_allowed(&request.method) {
        tracing::warn!(method = %request.method, "request rejected: unknown method");
        return Err(DispatchError::UnknownMethod(request.method));
    }

    tracing::debug!(method = %request.method, "request dispatched");

    let method = request.method.as_str();
    let outcome = match method {
        "ping" => return Ok(Value::from("pong")),
        "createTerminal" => {
            let options: CreateTerminalOptions = if request.params.is_null() {
                CreateTerminalOptions::default()
            } else {
                params(method, request.params)?
            };
            let id = bridge.create_terminal(options).await?;
            return Ok(Value::from(id.get()));
        }
        "show" => {
            let p: ShowParams = params(method, request.params)?;
            bridge.show(p.id, p.preserve_focus)
        }
        "hide" => {
            let p: TerminalParams = params(method, request.params)?;
            bridge.hide(p.id)
        }
        "dispose" => {
            let p: TerminalParams = params(method, request.params)?;
            bridge.dispose(p.id)
        }
        "sendText" => {
            let p: SendTextParams = params(method, request.params)?;
            bridge.send_text(p.id, &p.text, p.add_new_line)
        }
        _ => return Err(DispatchError::UnknownMethod(method.to_string())),
    };

    if outcome != HandlerOutcome::Applied {
        tracing::debug!(method, ?outcome, "request had no effect");
    }
    Ok(Value::Null)
}

fn params<T: DeserializeOwned>(method: &str, value: Value) -> Result<T, DispatchError> {
    serde_json::from_value(value).map_err(|e| DispatchError::InvalidParams {
        method: method.to_string(),
        message: e.to_string(),
    })
}

// =============================================================================
// TESTS
// =============================================================================
