//! What each bridge operation does when its target cannot be resolved.

use std::fmt;

/// Commands the bridge accepts from its remote peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    CreateTerminal,
    Show,
    Hide,
    Dispose,
    SendText,
}

/// Reaction to a missing terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingPolicy {
    /// Do nothing and report nothing to the caller.
    Ignore,
}

/// What a handler did. Used for logging and tests, never sent to the peer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerOutcome {
    /// The command reached the registry.
    Applied,
    /// No live terminal with the given id.
    UnknownTerminal,
    /// `hide` with no active terminal.
    NoActiveTerminal,
    /// `hide` for a terminal that is not the active one.
    NotActive,
}

impl Operation {
    pub const ALL: [Operation; 5] = [
        Operation::CreateTerminal,
        Operation::Show,
        Operation::Hide,
        Operation::Dispose,
        Operation::SendText,
    ];

    /// Method name on the wire.
    pub fn method(self) -> &'static str {
        match self {
            Operation::CreateTerminal => "createTerminal",
            Operation::Show => "show",
            Operation::Hide => "hide",
            Operation::Dispose => "dispose",
            Operation::SendText => "sendText",
        }
    }

    /// Policy when the terminal id names no live instance.
    pub fn on_missing_target(self) -> MissingPolicy {
        match self {
            Operation::CreateTerminal
            | Operation::Show
            | Operation::Hide
            | Operation::Dispose
            | Operation::SendText => MissingPolicy::Ignore,
        }
    }

    /// Policy when the operation needs an active instance and there is none.
    pub fn on_missing_active(self) -> MissingPolicy {
        match self {
            Operation::CreateTerminal
            | Operation::Show
            | Operation::Hide
            | Operation::Dispose
            | Operation::SendText => MissingPolicy::Ignore,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.method())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_operation_ignores_missing_targets() {
        for op in Operation::ALL {
            assert_eq!(op.on_missing_target(), MissingPolicy::Ignore, "{op}");
            assert_eq!(op.on_missing_active(), MissingPolicy::Ignore, "{op}");
        }
    }

    #[test]
    fn method_names_match_wire() {
        let methods: Vec<&str> = Operation::ALL.iter().map(|op| op.method()).collect();
        assert_eq!(
            methods,
            ["createTerminal", "show", "hide", "dispose", "sendText"]
        );
    }
}
