//! Shared user store.

use std::sync::{Arc, RwLock};

use thiserror::Error;

use crate::observability::metrics;
use crate::users::types::{NewUser, User, UserId};

/// Errors from store mutations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("User id space exhausted")]
    IdsExhausted,
}

/// A thread-safe, ordered collection of users.
///
/// Cloning the store yields another handle to the same records.
#[derive(Clone, Default)]
pub struct UserStore {
    inner: Arc<RwLock<Vec<User>>>,
}

impl UserStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding the boot data set.
    pub fn seeded() -> Self {
        Self::with_users(vec![
            User {
                id: 1,
                name: "Alice".to_string(),
                role: "Admin".to_string(),
            },
            User {
                id: 2,
                name: "Bob".to_string(),
                role: "User".to_string(),
            },
            User {
                id: 3,
                name: "Charlie".to_string(),
                role: "Manager".to_string(),
            },
        ])
    }

    /// Create a store from existing records, kept in the given order.
    pub fn with_users(users: Vec<User>) -> Self {
        metrics::record_user_count(users.len());
        Self {
            inner: Arc::new(RwLock::new(users)),
        }
    }

    /// All users in insertion order.
    pub fn list(&self) -> Vec<User> {
        self.inner
            .read()
            .expect("user store lock poisoned")
            .clone()
    }

    /// First user whose id equals `id`.
    pub fn get(&self, id: UserId) -> Option<User> {
        self.inner
            .read()
            .expect("user store lock poisoned")
            .iter()
            .find(|user| user.id == id)
            .cloned()
    }

    /// Append a user with the next free id and return the stored record.
    ///
    /// The next id is one past the current maximum (1 for an empty store).
    /// Reading the maximum and appending happen under the same write guard.
    /// Fails without modifying the store when the maximum is `UserId::MAX`.
    pub fn create(&self, new_user: NewUser) -> Result<User, StoreError> {
        let mut users = self.inner.write().expect("user store lock poisoned");

        let next_id = users
            .iter()
            .map(|user| user.id)
            .max()
            .unwrap_or(0)
            .checked_add(1)
            .ok_or(StoreError::IdsExhausted)?;
        let user = User {
            id: next_id,
            name: new_user.name,
            role: new_user.role,
        };
        users.push(user.clone());

        metrics::record_user_count(users.len());
        tracing::debug!(id = user.id, name = %user.name, "User created");

        Ok(user)
    }

    /// Number of stored users.
    pub fn len(&self) -> usize {
        self.inner.read().expect("user store lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
