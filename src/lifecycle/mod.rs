//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Build agent client → Bind listener
//!     → Register with agent → Start heartbeat → Serve
//!
//! Shutdown (shutdown.rs):
//!     Signal received → Stop heartbeat → Stop accepting
//!     → Drain connections (bounded) → Deregister → Exit
//!
//! Signals (signals.rs):
//!     SIGTERM/SIGINT → Trigger graceful shutdown
//! ```
//!
//! # Design Decisions
//! - Fatal: config errors, agent client construction, bind failure
//! - Best effort: registration, heartbeat, deregistration
//! - Shutdown has timeout: in-flight requests abandoned after deadline

pub mod shutdown;
pub mod signals;
pub mod startup;

pub use shutdown::Shutdown;
pub use signals::{spawn_signal_listener, wait_for_signal, ShutdownSignal};
pub use startup::{Application, StartupError};
