//! Rust client for the test backend user API.

pub mod client;

pub use client::{BackendClient, ClientError, Health, Info, NewUser, User, UserList};
