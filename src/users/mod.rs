//! In-memory user records.
//!
//! # Data Flow
//! ```text
//! HTTP handler
//!     → store.rs (read snapshot, or create under the write lock)
//!     → types.rs (User / NewUser serialized as JSON)
//! ```
//!
//! # Design Decisions
//! - No persistence: records live until the process exits
//! - Append-only: there is no update or delete
//! - Id assignment and append share one write guard so ids never collide

pub mod store;
pub mod types;

pub use store::{StoreError, UserStore};
pub use types::{NewUser, User, UserId, UserList};
