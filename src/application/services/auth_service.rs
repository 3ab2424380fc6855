//! Bearer-token authentication.
//!
//! Tokens are HS256 JWTs signed with the server secret. A token is accepted only if
//! the signature verifies, `now <= exp`, `nbf <= now` when `nbf` is present, the issuer
//! matches and the configured audience is among the token's audiences. The subject is
//! then resolved through the [`UserRepository`]. An empty `Authorization` header counts
//! as no credential.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::json;

use crate::domain::entities::Identity;
use crate::domain::repositories::UserRepository;
use crate::error::AppError;

/// Settings shared by token verification and issuance.
#[derive(Clone)]
pub struct TokenSettings {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
}

impl std::fmt::Debug for TokenSettings {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenSettings")
            .field("secret", &"***")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .finish()
    }
}

/// Registered claims carried by an access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub iss: String,
    #[serde(deserialize_with = "one_or_many")]
    pub aud: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nbf: Option<i64>,
    pub exp: i64,
    #[serde(default)]
    pub iat: i64,
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum OneOrMany {
        One(String),
        Many(Vec<String>),
    }

    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(aud) => vec![aud],
        OneOrMany::Many(auds) => auds,
    })
}

/// Service resolving `Authorization` header values to an [`Identity`].
///
/// Holds no mutable state; every call is independent apart from the user lookup.
pub struct AuthService<U: UserRepository + ?Sized = dyn UserRepository> {
    users: Arc<U>,
    settings: TokenSettings,
    decoding_key: DecodingKey,
    encoding_key: EncodingKey,
    validation: Validation,
}

impl<U: UserRepository + ?Sized> AuthService<U> {
    /// Creates a new authentication service.
    ///
    /// # Arguments
    ///
    /// - `users` - user lookup collaborator
    /// - `settings` - signing secret, trusted issuer and audience
    pub fn new(users: Arc<U>, settings: TokenSettings) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.set_issuer(&[settings.issuer.as_str()]);
        validation.set_audience(&[settings.audience.as_str()]);
        validation.set_required_spec_claims(&["sub", "iss", "aud", "exp"]);

        Self {
            users,
            decoding_key: DecodingKey::from_secret(settings.secret.as_bytes()),
            encoding_key: EncodingKey::from_secret(settings.secret.as_bytes()),
            settings,
            validation,
        }
    }

    pub fn settings(&self) -> &TokenSettings {
        &self.settings
    }

    /// Resolves the raw `Authorization` header value to an identity.
    ///
    /// `None` (no header) yields [`Identity::Anonymous`].
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidCredential`] if the header is not exactly
    /// `Bearer <token>`, the token fails verification, or the subject is unknown.
    ///
    /// Returns [`AppError::Internal`] if the subject is not a user id or the user lookup
    /// fails.
    pub async fn authenticate(&self, authorization: Option<&str>) -> Result<Identity, AppError> {
        let Some(header) = authorization.filter(|h| !h.is_empty()) else {
            return Ok(Identity::Anonymous);
        };

        let token = parse_bearer(header).ok_or(AppError::InvalidCredential)?;
        let claims = self.verify(token)?;

        let user_id: i64 = claims.sub.parse().map_err(|_| {
            AppError::internal(
                "Token subject is not a user id",
                json!({ "subject": claims.sub }),
            )
        })?;

        match self.users.get_by_id(user_id).await? {
            Some(user) => Ok(Identity::Authenticated(user)),
            None => {
                tracing::debug!(user_id, "token subject not found");
                Err(AppError::InvalidCredential)
            }
        }
    }

    /// Verifies signature and registered claims of a raw token.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidCredential`] for every verification failure.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        jsonwebtoken::decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(error = %e, "token rejected");
                AppError::InvalidCredential
            })
    }

    /// Signs a token for `user_id` valid from now for `ttl`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if encoding fails.
    pub fn issue_token(&self, user_id: i64, ttl: Duration) -> Result<String, AppError> {
        let now = Utc::now().timestamp();
        let ttl = i64::try_from(ttl.as_secs()).unwrap_or(i64::MAX / 2);
        let claims = Claims {
            sub: user_id.to_string(),
            iss: self.settings.issuer.clone(),
            aud: vec![self.settings.audience.clone()],
            nbf: Some(now),
            exp: now.saturating_add(ttl),
            iat: now,
        };
        self.sign(&claims)
    }

    /// Signs arbitrary claims with the server secret.
    pub fn sign(&self, claims: &Claims) -> Result<String, AppError> {
        jsonwebtoken::encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| AppError::internal("Failed to sign token", json!({ "reason": e.to_string() })))
    }
}

/// Splits `Bearer <token>` into the token, rejecting anything else.
fn parse_bearer(header: &str) -> Option<&str> {
    let mut parts = header.split(' ');
    match (parts.next(), parts.next(), parts.next()) {
        (Some("Bearer"), Some(token), None) if !token.is_empty() => Some(token),
        _ => None,
    }
}
