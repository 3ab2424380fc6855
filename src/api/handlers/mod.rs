//! HTTP request handlers for API endpoints.
//!
//! Handlers are thin: identity, rate limiting and authorization have already been
//! decided by the pipeline before any of them runs.

pub mod debug_vars;
pub mod health;
pub mod me;
pub mod resources;

pub use debug_vars::debug_vars_handler;
pub use health::health_handler;
pub use me::me_handler;
pub use resources::{share_resource_handler, show_resource_handler};

use serde_json::json;

use crate::error::AppError;

/// Parses an `{id}` path segment. Only positive integers are valid ids; anything
/// else is reported as not found.
pub(crate) fn read_id_param(raw: &str) -> Result<i64, AppError> {
    match raw.parse::<i64>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(AppError::not_found(
            "The requested resource could not be found",
            json!({ "id": raw }),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_id_param_accepts_positive() {
        assert_eq!(read_id_param("123").unwrap(), 123);
        assert_eq!(read_id_param("9223372036854775807").unwrap(), i64::MAX);
    }

    #[test]
    fn test_read_id_param_rejects_invalid() {
        for raw in ["0", "-1", "abc", "", "123.45", " 123 ", "0x123", "99999999999999999999"] {
            assert!(
                matches!(read_id_param(raw), Err(AppError::NotFound { .. })),
                "{raw:?} should be rejected"
            );
        }
    }
}
