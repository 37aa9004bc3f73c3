//! External agent integration.
//!
//! # Data Flow
//! ```text
//! Startup:
//!     auto_register → AgentClient::register
//!     (success only) → start_heartbeat → AgentClient::heartbeat every interval
//!
//! Shutdown:
//!     Shutdown trigger → heartbeat loop exits
//!     → AgentClient::deregister (best effort)
//! ```
//!
//! # Design Decisions
//! - The service depends on the [`AgentClient`] trait, never on a concrete agent
//! - Every agent interaction is best effort; failures are logged, not fatal
//! - Only constructing the client (bad URL, TLS backend) fails startup

pub mod client;
pub mod heartbeat;

use async_trait::async_trait;
use thiserror::Error;

pub use client::{HttpAgentClient, Registration};
pub use heartbeat::{auto_register, start_heartbeat};

/// Errors from agent interactions.
#[derive(Debug, Error)]
pub enum AgentError {
    /// Client could not be built from configuration.
    #[error("invalid agent configuration: {0}")]
    Config(String),

    /// Transport-level failure talking to the agent.
    #[error("agent request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Agent answered with a non-success status.
    #[error("agent rejected request with status {status}: {body}")]
    Rejected { status: u16, body: String },

    /// Heartbeat interval of zero.
    #[error("heartbeat interval must be greater than zero")]
    InvalidInterval,
}

/// Result type for agent operations.
pub type AgentResult<T> = Result<T, AgentError>;

/// Capabilities the service needs from the external agent.
#[async_trait]
pub trait AgentClient: Send + Sync {
    /// Announce this instance to the agent.
    async fn register(&self) -> AgentResult<()>;

    /// Signal that this instance is still alive.
    async fn heartbeat(&self) -> AgentResult<()>;

    /// Withdraw this instance from the agent.
    async fn deregister(&self) -> AgentResult<()>;
}
