//! User record types.

use serde::{Deserialize, Serialize};

/// Identifier assigned by the store.
pub type UserId = u64;

/// A user record held by the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Store-assigned identifier, unique for the process lifetime.
    pub id: UserId,
    /// Display name.
    pub name: String,
    /// Free-form role label (e.g., "Admin").
    pub role: String,
}

/// Payload for creating a user.
///
/// Both fields are required. Any `id` sent by the client is ignored since
/// the store assigns identifiers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub role: String,
}

impl NewUser {
    pub fn new(name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            role: role.into(),
        }
    }
}

/// Response body for the list endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserList {
    pub users: Vec<User>,
    pub count: usize,
}

impl From<Vec<User>> for UserList {
    fn from(users: Vec<User>) -> Self {
        let count = users.len();
        Self { users, count }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_json_shape() {
        let user = User {
            id: 7,
            name: "Alice".into(),
            role: "Admin".into(),
        };
        let value = serde_json::to_value(&user).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"id": 7, "name": "Alice", "role": "Admin"})
        );
    }

    #[test]
    fn test_new_user_ignores_client_id() {
        let payload: NewUser =
            serde_json::from_str(r#"{"id": 42, "name": "Dana", "role": "Tester"}"#).unwrap();
        assert_eq!(payload, NewUser::new("Dana", "Tester"));
    }

    #[test]
    fn test_new_user_requires_role() {
        let err = serde_json::from_str::<NewUser>(r#"{"name": "Dana"}"#).unwrap_err();
        assert!(err.to_string().contains("missing field `role`"));
    }

    #[test]
    fn test_user_list_counts() {
        let list = UserList::from(vec![User {
            id: 1,
            name: "Bob".into(),
            role: "User".into(),
        }]);
        assert_eq!(list.count, 1);
    }
}
