//! User entity - represents a shop account

use chrono::{DateTime, Utc};

use crate::value_objects::UserId;

/// User entity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub is_admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Check if user may access admin-only endpoints
    #[inline]
    pub fn is_admin(&self) -> bool {
        self.is_admin
    }
}

/// Fields required to register a user; the id is assigned on insert
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub is_admin: bool,
}

impl NewUser {
    /// Create a regular (non-admin) account, normalizing the email
    pub fn new(username: impl Into<String>, email: &str) -> Self {
        Self {
            username: username.into(),
            email: email.trim().to_lowercase(),
            is_admin: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_user_normalizes_email() {
        let user = NewUser::new("alice", "  Alice@Example.COM ");
        assert_eq!(user.email, "alice@example.com");
        assert_eq!(user.username, "alice");
        assert!(!user.is_admin);
    }
}
