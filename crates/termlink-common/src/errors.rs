use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("config parse error: {0}")]
    ParseError(String),

    #[error("config validation error: {0}")]
    ValidationError(String),
}

/// Failures reported by the terminal registry.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("terminal limit reached ({limit} live terminals)")]
    Capacity { limit: u32 },

    #[error("registry is shutting down")]
    ShuttingDown,

    #[error("shell launch failed: {0}")]
    Launch(String),
}

/// Failures delivering a notification to the remote peer.
#[derive(Debug, thiserror::Error)]
pub enum LinkError {
    #[error("remote peer disconnected")]
    PeerDisconnected,

    #[error("failed to encode message: {0}")]
    Encode(String),
}

/// Failures a bridge command can surface to its caller.
///
/// Unknown terminal ids are deliberately absent: those are silent no-ops.
#[derive(Debug, thiserror::Error)]
pub enum BridgeError {
    #[error(transparent)]
    Registry(#[from] RegistryError),
}

#[derive(Debug, thiserror::Error)]
pub enum TermlinkError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Link(#[from] LinkError),

    #[error(transparent)]
    Bridge(#[from] BridgeError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Other(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_display() {
        let err = ConfigError::FileNotFound(PathBuf::from("/tmp/missing.toml"));
        assert_eq!(err.to_string(), "config file not found: /tmp/missing.toml");

        let err = ConfigError::ParseError("unexpected token".into());
        assert_eq!(err.to_string(), "config parse error: unexpected token");

        let err = ConfigError::ValidationError("terminal.cols = 0".into());
        assert_eq!(
            err.to_string(),
            "config validation error: terminal.cols = 0"
        );
    }

    #[test]
    fn registry_error_display() {
        let err = RegistryError::Capacity { limit: 4 };
        assert_eq!(err.to_string(), "terminal limit reached (4 live terminals)");

        assert_eq!(
            RegistryError::ShuttingDown.to_string(),
            "registry is shutting down"
        );

        let err = RegistryError::Launch("no such file".into());
        assert_eq!(err.to_string(), "shell launch failed: no such file");
    }

    #[test]
    fn link_error_display() {
        assert_eq!(
            LinkError::PeerDisconnected.to_string(),
            "remote peer disconnected"
        );
        assert_eq!(
            LinkError::Encode("bad utf-8".into()).to_string(),
            "failed to encode message: bad utf-8"
        );
    }

    #[test]
    fn bridge_error_is_transparent_over_registry() {
        let err: BridgeError = RegistryError::ShuttingDown.into();
        assert!(matches!(err, BridgeError::Registry(_)));
        assert_eq!(err.to_string(), "registry is shutting down");
    }

    #[test]
    fn termlink_error_from_conversions() {
        let err: TermlinkError = ConfigError::ParseError("bad toml".into()).into();
        assert!(matches!(err, TermlinkError::Config(_)));
        assert!(err.to_string().contains("bad toml"));

        let err: TermlinkError = LinkError::PeerDisconnected.into();
        assert!(matches!(err, TermlinkError::Link(_)));

        let err: TermlinkError = BridgeError::from(RegistryError::Capacity { limit: 1 }).into();
        assert!(matches!(err, TermlinkError::Bridge(_)));

        let io_err = std::io::Error::new(std::io::ErrorKind::BrokenPipe, "stdout closed");
        let err: TermlinkError = io_err.into();
        assert!(matches!(err, TermlinkError::Io(_)));
        assert!(err.to_string().contains("stdout closed"));
    }
}
