//! JSON fixture format for [`super::InMemoryStore`].

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use crate::domain::entities::{Resource, User};

/// A user together with the permission codes granted to it.
#[derive(Debug, Clone, Deserialize)]
pub struct SeedUser {
    #[serde(flatten)]
    pub user: User,
    #[serde(default)]
    pub permissions: Vec<String>,
}

/// Fixture file contents.
///
/// ```json
/// {
///   "users": [
///     { "id": 1, "name": "Ada", "email": "ada@example.com", "activated": true,
///       "permissions": ["resources:read"] }
///   ],
///   "resources": [ { "id": 1, "title": "Casablanca", "year": 1942 } ]
/// }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Seed {
    #[serde(default)]
    pub users: Vec<SeedUser>,
    #[serde(default)]
    pub resources: Vec<Resource>,
}

impl Seed {
    /// Reads a fixture from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not valid fixture JSON.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read seed file {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("Invalid seed file {}", path.display()))
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        Ok(serde_json::from_str(raw)?)
    }
}
