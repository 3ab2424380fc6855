//! Catalog record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single catalog entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub id: i64,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub year: Option<i32>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub genres: Vec<String>,
    #[serde(default = "default_version")]
    pub version: i32,
    #[serde(skip_serializing, default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

fn default_version() -> i32 {
    1
}
