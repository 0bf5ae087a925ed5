//! Host-side registry: owns terminal instances in an id-keyed arena.
//!
//! Instances are created synchronously and become resolvable immediately;
//! their shells start on a background thread. Lifecycle events fire from
//! whichever thread performs the transition (launch thread, PTY reader
//! thread, or the caller of `dispose`).

mod instance;
mod registry;


pub use instance::HostInstance;
pub use registry::HostRegistry;
