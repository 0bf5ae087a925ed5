//! JSON-lines transport: one sequential loop serving requests and pushing
//! bridge notifications to the peer.

use serde::Serialize;
use termlink_bridge::{BridgeNotification, TerminalBridge};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;

use crate::dispatch::handle_line;

/// Why the transport loop stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownReason {
    /// The peer closed its end of the input stream.
    InputClosed,
    /// Writing to the peer failed.
    OutputFailed,
    /// The notification channel closed.
    ChannelClosed,
}

/// Serve `bridge` over `input`/`output` until the peer goes away.
///
/// Pending notifications are written before the next request is read. The
/// bridge is torn down before this returns.
pub async fn run<R, W>(
    mut bridge: TerminalBridge,
    mut notifications: mpsc::UnboundedReceiver<BridgeNotification>,
    input: R,
    mut output: W,
) -> ShutdownReason
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();

    let reason = loop {
        tokio::select! {
            biased;

            notification = notifications.recv() => {
                let Some(notification) = notification else {
                    break ShutdownReason::ChannelClosed;
                };
                if let Err(e) = write_frame(&mut output, &notification).await {
                    tracing::warn!(error = %e, "failed to write notification");
                    break ShutdownReason::OutputFailed;
                }
            }

            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => break ShutdownReason::InputClosed,
                    Err(e) => {
                        tracing::warn!(error = %e, "failed to read request");
                        break ShutdownReason::InputClosed;
                    }
                };
                if line.trim().is_empty() {
                    continue;
                }

                let response = handle_line(&bridge, &line).await;
                if let Err(e) = write_frame(&mut output, &response).await {
                    tracing::warn!(error = %e, "failed to write response");
                    break ShutdownReason::OutputFailed;
                }
            }
        }
    };

    tracing::info!(?reason, "transport stopped");
    bridge.teardown();
    reason
}

async fn write_frame<W, T>(output: &mut W, frame: &T) -> std::io::Result<()>
where
    W: AsyncWrite + Unpin,
    T: Serialize,
{
    let mut line = serde_json::to_vec(frame)?;
    line.push(b'\n');
    output.write_all(&line).await?;
    output.flush().await
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::{json, Value};
    use termlink_bridge::ChannelPeer;
    use termlink_common::RegistryError;
    use termlink_config::TermlinkConfig;
    use termlink_registry::{
        ExitNotifier, HostRegistry, ShellLauncher, ShellProcess, ShellSpec,
    };

    use super::*;

    /// A shell that never reports a process id, so the only notifications
    /// are the ones requests cause synchronously.
    struct SilentProcess;

    impl ShellProcess for SilentProcess {
        fn process_id(&self) -> Option<u32> {
            None
        }

        fn write_input(&mut self, _data: &[u8]) -> Result<(), RegistryError> {
            Ok(())
        }

        fn kill(&mut self) {}
    }

    struct SilentLauncher;

    impl ShellLauncher for SilentLauncher {
        fn launch(
            &self,
            _spec: &ShellSpec,
            _on_exit: ExitNotifier,
        ) -> Result<Box<dyn ShellProcess>, RegistryError> {
            Ok(Box::new(SilentProcess))
        }
    }

    /// Run the transport over `input` and return every frame it wrote.
    async fn serve(input: &str) -> (ShutdownReason, Vec<Value>) {
        let registry = HostRegistry::new(TermlinkConfig::default(), Arc::new(SilentLauncher));
        let (peer, notifications) = ChannelPeer::new();
        let bridge = TerminalBridge::new(registry.clone(), Arc::new(peer));

        let mut output = Vec::new();
        let reason = run(bridge, notifications, input.as_bytes(), &mut output).await;
        registry.shutdown();

        let frames = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();
        (reason, frames)
    }

    #[tokio::test]
    async fn ping_pong() {
        let (reason, frames) = serve("{\"id\":1,\"method\":\"ping\"}\n").await;
        assert_eq!(reason, ShutdownReason::InputClosed);
        assert_eq!(frames, vec![json!({"id": 1, "result": "pong"})]);
    }

    #[tokio::test]
    async fn unknown_method_is_answered_with_error() {
        let (_, frames) = serve("{\"id\":1,\"method\":\"eval\",\"params\":{}}\n").await;
        assert_eq!(frames, vec![json!({"id": 1, "error": "unknown method: eval"})]);
    }

    #[tokio::test]
    async fn malformed_line_is_answered_with_null_id() {
        let (_, frames) = serve("not json\n").await;
        assert_eq!(frames.len(), 1);
        assert_eq!(frames[0]["id"], Value::Null);
        assert!(frames[0]["error"].as_str().unwrap().starts_with("malformed request"));
    }

    #[tokio::test]
    async fn blank_lines_are_skipped() {
        let (_, frames) = serve("\n   \n{\"id\":2,\"method\":\"ping\"}\n").await;
        assert_eq!(frames, vec![json!({"id": 2, "result": "pong"})]);
    }

    #[tokio::test]
    async fn create_then_dispose_notifies_close() {
        let input = concat!(
            "{\"id\":1,\"method\":\"createTerminal\",\"params\":{\"name\":\"bash\",\"shellPath\":\"/bin/bash\"}}\n",
            "{\"id\":2,\"method\":\"show\",\"params\":{\"id\":1}}\n",
            "{\"id\":3,\"method\":\"sendText\",\"params\":{\"id\":1,\"text\":\"ls\\n\"}}\n",
            "{\"id\":4,\"method\":\"dispose\",\"params\":{\"id\":1}}\n",
        );
        let (_, frames) = serve(input).await;
        assert_eq!(
            frames,
            vec![
                json!({"id": 1, "result": 1}),
                json!({"id": 2, "result": null}),
                json!({"id": 3, "result": null}),
                json!({"id": 4, "result": null}),
                json!({"method": "terminalClosed", "params": {"id": 1}}),
            ]
        );
    }

    #[tokio::test]
    async fn unknown_terminal_commands_succeed_silently() {
        let input = concat!(
            "{\"id\":1,\"method\":\"show\",\"params\":{\"id\":42}}\n",
            "{\"id\":2,\"method\":\"hide\",\"params\":{\"id\":42}}\n",
            "{\"id\":3,\"method\":\"dispose\",\"params\":{\"id\":42}}\n",
        );
        let (_, frames) = serve(input).await;
        assert_eq!(
            frames,
            vec![
                json!({"id": 1, "result": null}),
                json!({"id": 2, "result": null}),
                json!({"id": 3, "result": null}),
            ]
        );
    }

    #[tokio::test]
    async fn invalid_params_are_reported() {
        let (_, frames) = serve("{\"id\":9,\"method\":\"sendText\",\"params\":{\"id\":1}}\n").await;
        let error = frames[0]["error"].as_str().unwrap();
        assert!(error.starts_with("invalid params for sendText"), "{error}");
    }

    #[tokio::test]
    async fn capacity_error_reaches_peer() {
        let mut config = TermlinkConfig::default();
        config.terminal.max_terminals = 1;
        let registry = HostRegistry::new(config, Arc::new(SilentLauncher));
        let (peer, notifications) = ChannelPeer::new();
        let bridge = TerminalBridge::new(registry.clone(), Arc::new(peer));

        let input = concat!(
            "{\"id\":1,\"method\":\"createTerminal\"}\n",
            "{\"id\":2,\"method\":\"createTerminal\"}\n",
        );
        let mut output = Vec::new();
        run(bridge, notifications, input.as_bytes(), &mut output).await;
        registry.shutdown();

        let text = String::from_utf8(output).unwrap();
        let frames: Vec<Value> = text.lines().map(|l| serde_json::from_str(l).unwrap()).collect();
        assert_eq!(frames[0], json!({"id": 1, "result": 1}));
        assert_eq!(
            frames[1],
            json!({"id": 2, "error": "terminal limit reached (1 live terminals)"})
        );
    }
}
