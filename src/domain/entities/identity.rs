//! Request identity.

use serde::{Deserialize, Serialize};

/// A registered user as returned by the user lookup collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub activated: bool,
}

/// Who a request is acting as.
///
/// Resolved exactly once per request by the authentication stage and attached to the
/// request extensions. Later stages only read it.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Identity {
    #[default]
    Anonymous,
    Authenticated(User),
}

impl Identity {
    pub fn is_anonymous(&self) -> bool {
        matches!(self, Identity::Anonymous)
    }

    /// Returns the user behind an authenticated identity.
    pub fn user(&self) -> Option<&User> {
        match self {
            Identity::Anonymous => None,
            Identity::Authenticated(user) => Some(user),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_anonymous() {
        let identity = Identity::default();
        assert!(identity.is_anonymous());
        assert!(identity.user().is_none());
    }

    #[test]
    fn test_authenticated_exposes_user() {
        let identity = Identity::Authenticated(User {
            id: 7,
            name: "Ada".into(),
            email: "ada@example.com".into(),
            activated: true,
        });
        assert!(!identity.is_anonymous());
        assert_eq!(identity.user().map(|u| u.id), Some(7));
    }
}
