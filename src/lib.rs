//! Test Backend Library
//!
//! A small HTTP service exposing CRUD-style endpoints over an in-memory
//! list of users, a liveness endpoint, and best-effort registration with an
//! external agent.

pub mod agent;
pub mod config;
pub mod health;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod users;

pub use config::schema::ServiceConfig;
pub use http::HttpServer;
pub use lifecycle::{Application, Shutdown};
pub use users::UserStore;
