pub mod errors;
pub mod events;
pub mod id;

pub use errors::{BridgeError, ConfigError, LinkError, RegistryError, TermlinkError};
pub use events::{Emitter, Listener, Subscription};
pub use id::{new_correlation_id, TerminalId};

pub type Result<T> = std::result::Result<T, TermlinkError>;
