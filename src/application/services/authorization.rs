//! Layered authorization checks.
//!
//! The layers are strictly ordered, each one a precondition of the next:
//!
//! 1. [`Requirement::Authenticated`] - identity is not anonymous
//! 2. [`Requirement::Activated`] - plus the user's account is activated
//! 3. [`Requirement::Permission`] - plus the user holds the permission code
//!
//! Checking a later layer always runs the earlier ones first, so an inactive user is
//! rejected as inactive even when they hold the permission.

use std::sync::Arc;

use crate::domain::entities::Identity;
use crate::domain::repositories::PermissionRepository;
use crate::error::AppError;

/// One authorization layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Requirement {
    Authenticated,
    Activated,
    Permission(&'static str),
}

/// Evaluates [`Requirement`]s against a request's identity.
pub struct AuthorizationService<P: PermissionRepository + ?Sized = dyn PermissionRepository> {
    permissions: Arc<P>,
}

impl<P: PermissionRepository + ?Sized> AuthorizationService<P> {
    pub fn new(permissions: Arc<P>) -> Self {
        Self { permissions }
    }

    /// Checks `requirement` and every layer below it.
    ///
    /// # Errors
    ///
    /// - [`AppError::AuthenticationRequired`] for an anonymous identity
    /// - [`AppError::InactiveAccount`] for a user that is not activated
    /// - [`AppError::Forbidden`] when the permission code is missing
    /// - [`AppError::Internal`] when the permission lookup fails
    pub async fn authorize(
        &self,
        identity: &Identity,
        requirement: &Requirement,
    ) -> Result<(), AppError> {
        let user = identity.user().ok_or(AppError::AuthenticationRequired)?;

        if matches!(requirement, Requirement::Authenticated) {
            return Ok(());
        }

        if !user.activated {
            return Err(AppError::InactiveAccount);
        }

        let Requirement::Permission(code) = requirement else {
            return Ok(());
        };

        let permissions = self.permissions.get_all_for_user(user.id).await?;
        if !permissions.includes(code) {
            tracing::debug!(user_id = user.id, code, "permission denied");
            return Err(AppError::Forbidden);
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::{Permissions, User};
    use crate::domain::repositories::MockPermissionRepository;
    use serde_json::json;

    fn identity(activated: bool) -> Identity {
        Identity::Authenticated(User {
            id: 3,
            name: "Grace".to_string(),
            email: "grace@example.com".to_string(),
            activated,
        })
    }

    fn granting(codes: &'static [&'static str]) -> MockPermissionRepository {
        let mut repo = MockPermissionRepository::new();
        repo.expect_get_all_for_user()
            .returning(move |_| Ok(Permissions::new(codes.iter().copied())));
        repo
    }

    #[tokio::test]
    async fn test_anonymous_rejected_at_every_layer() {
        let mut repo = MockPermissionRepository::new();
        repo.expect_get_all_for_user().times(0);
        let svc = AuthorizationService::new(Arc::new(repo));

        for requirement in [
            Requirement::Authenticated,
            Requirement::Activated,
            Requirement::Permission("resources:read"),
        ] {
            let result = svc.authorize(&Identity::Anonymous, &requirement).await;
            assert!(matches!(result, Err(AppError::AuthenticationRequired)));
        }
    }

    #[tokio::test]
    async fn test_inactive_user_passes_authenticated_only() {
        let svc = AuthorizationService::new(Arc::new(granting(&["resources:read"])));
        let inactive = identity(false);

        assert!(
            svc.authorize(&inactive, &Requirement::Authenticated)
                .await
                .is_ok()
        );
        assert!(matches!(
            svc.authorize(&inactive, &Requirement::Activated).await,
            Err(AppError::InactiveAccount)
        ));
    }

    #[tokio::test]
    async fn test_inactive_user_with_permission_is_inactive_not_allowed() {
        let mut repo = MockPermissionRepository::new();
        repo.expect_get_all_for_user().times(0);
        let svc = AuthorizationService::new(Arc::new(repo));

        let result = svc
            .authorize(&identity(false), &Requirement::Permission("resources:read"))
            .await;

        assert!(matches!(result, Err(AppError::InactiveAccount)));
    }

    #[tokio::test]
    async fn test_permission_granted_and_denied() {
        let svc = AuthorizationService::new(Arc::new(granting(&["resources:read"])));
        let active = identity(true);

        assert!(
            svc.authorize(&active, &Requirement::Permission("resources:read"))
                .await
                .is_ok()
        );
        assert!(matches!(
            svc.authorize(&active, &Requirement::Permission("resources:write"))
                .await,
            Err(AppError::Forbidden)
        ));
    }

    #[tokio::test]
    async fn test_permissions_fetched_per_check() {
        let mut repo = MockPermissionRepository::new();
        repo.expect_get_all_for_user()
            .withf(|id| *id == 3)
            .times(2)
            .returning(|_| Ok(Permissions::new(["resources:read"])));
        let svc = AuthorizationService::new(Arc::new(repo));
        let requirement = Requirement::Permission("resources:read");

        svc.authorize(&identity(true), &requirement).await.unwrap();
        svc.authorize(&identity(true), &requirement).await.unwrap();
    }

    #[tokio::test]
    async fn test_lookup_failure_is_internal_not_forbidden() {
        let mut repo = MockPermissionRepository::new();
        repo.expect_get_all_for_user()
            .returning(|_| Err(AppError::internal("db down", json!({}))));
        let svc = AuthorizationService::new(Arc::new(repo));

        let result = svc
            .authorize(&identity(true), &Requirement::Permission("resources:read"))
            .await;

        assert!(matches!(result, Err(AppError::Internal { .. })));
    }
}
