//! Authentication service: credential checks and signed tokens.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;

use crate::domain::repositories::UserRepository;
use crate::error::AppError;
use crate::utils::password::verify_password;

/// Claims carried by an access token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    pub authorized: bool,
    pub user_id: i64,
    pub iat: i64,
    pub exp: i64,
}

/// Service issuing and verifying HS256-signed tokens.
///
/// Tokens carry the user id as a claim and expire after `token_ttl_seconds`.
/// The signing key comes from `API_SECRET`; rotating it invalidates every
/// outstanding token.
pub struct AuthService<R: UserRepository + ?Sized> {
    repository: Arc<R>,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_ttl_seconds: i64,
}

impl<R: UserRepository + ?Sized> AuthService<R> {
    /// Creates a new authentication service.
    ///
    /// # Arguments
    ///
    /// - `repository` - user repository used for credential lookups
    /// - `secret` - HMAC key shared by issuance and verification
    /// - `token_ttl_seconds` - lifetime of issued tokens
    pub fn new(repository: Arc<R>, secret: &str, token_ttl_seconds: i64) -> Self {
        Self {
            repository,
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            token_ttl_seconds,
        }
    }

    /// Verifies credentials and returns a fresh token.
    ///
    /// Unknown email and wrong password produce the same error so callers
    /// cannot probe which accounts exist.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] on bad credentials.
    /// Returns [`AppError::Internal`] on database or signing errors.
    pub async fn login(&self, email: &str, password: &str) -> Result<String, AppError> {
        let user = self.repository.find_by_email(email).await?;

        let Some(user) = user else {
            tracing::warn!(email, "Login attempt for unknown email");
            return Err(incorrect_credentials());
        };

        if !verify_password(password.to_string(), user.password_hash.clone()).await? {
            tracing::warn!(user_id = user.id, "Login attempt with wrong password");
            return Err(incorrect_credentials());
        }

        tracing::info!(user_id = user.id, "User logged in");
        self.issue_token(user.id)
    }

    /// Signs a token for `user_id`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if encoding fails.
    pub fn issue_token(&self, user_id: i64) -> Result<String, AppError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            authorized: true,
            user_id,
            iat: now,
            exp: now + self.token_ttl_seconds,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            AppError::internal("Token generation failed", json!({"reason": e.to_string()}))
        })
    }

    /// Checks signature and expiry and returns the claims.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] for any malformed, tampered or
    /// expired token, or one without the `authorized` flag.
    pub fn verify_token(&self, token: &str) -> Result<Claims, AppError> {
        let validation = Validation::new(Algorithm::HS256);

        let data = decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| {
            tracing::debug!(error = %e, "Token rejected");
            AppError::unauthorized("Unauthorized", json!({"reason": "Invalid or expired token"}))
        })?;

        if !data.claims.authorized {
            return Err(AppError::unauthorized(
                "Unauthorized",
                json!({"reason": "Token is not authorized"}),
            ));
        }

        Ok(data.claims)
    }
}

fn incorrect_credentials() -> AppError {
    AppError::unauthorized("Incorrect email or password", json!({}))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::User;
    use crate::domain::repositories::MockUserRepository;

    const SECRET: &str = "test-api-secret";

    fn service(repo: MockUserRepository) -> AuthService<MockUserRepository> {
        AuthService::new(Arc::new(repo), SECRET, 3600)
    }

    fn user_with_password(password: &str) -> User {
        let now = Utc::now();
        User {
            id: 7,
            name: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: bcrypt::hash(password, 4).unwrap(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_issue_and_verify_roundtrip() {
        let svc = service(MockUserRepository::new());

        let token = svc.issue_token(42).unwrap();
        let claims = svc.verify_token(&token).unwrap();

        assert_eq!(claims.user_id, 42);
        assert!(claims.authorized);
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_verify_rejects_other_secret() {
        let issuer = AuthService::new(Arc::new(MockUserRepository::new()), "secret-a", 3600);
        let verifier = AuthService::new(Arc::new(MockUserRepository::new()), "secret-b", 3600);

        let token = issuer.issue_token(1).unwrap();

        assert!(matches!(
            verifier.verify_token(&token),
            Err(AppError::Unauthorized { .. })
        ));
    }

    #[test]
    fn test_verify_rejects_expired_token() {
        // Beyond the default 60s validation leeway.
        let svc = AuthService::new(Arc::new(MockUserRepository::new()), SECRET, -3600);

        let token = svc.issue_token(1).unwrap();

        assert!(matches!(
            svc.verify_token(&token),
            Err(AppError::Unauthorized { .. })
        ));
    }

    #[test]
    fn test_verify_rejects_garbage() {
        let svc = service(MockUserRepository::new());

        assert!(svc.verify_token("not.a.token").is_err());
        assert!(svc.verify_token("").is_err());
    }

    #[test]
    fn test_verify_rejects_unauthorized_flag() {
        let svc = service(MockUserRepository::new());
        let now = Utc::now().timestamp();
        let claims = Claims {
            authorized: false,
            user_id: 1,
            iat: now,
            exp: now + 3600,
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();

        assert!(matches!(
            svc.verify_token(&token),
            Err(AppError::Unauthorized { .. })
        ));
    }

    #[tokio::test]
    async fn test_login_success() {
        let mut repo = MockUserRepository::new();
        let user = user_with_password("hunter2");
        repo.expect_find_by_email()
            .withf(|email| email == "alice@example.com")
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let svc = service(repo);
        let token = svc.login("alice@example.com", "hunter2").await.unwrap();

        assert_eq!(svc.verify_token(&token).unwrap().user_id, 7);
    }

    #[tokio::test]
    async fn test_login_wrong_password() {
        let mut repo = MockUserRepository::new();
        let user = user_with_password("hunter2");
        repo.expect_find_by_email()
            .times(1)
            .returning(move |_| Ok(Some(user.clone())));

        let result = service(repo).login("alice@example.com", "nope").await;

        assert!(matches!(result, Err(AppError::Unauthorized { .. })));
    }

    #[tokio::test]
    async fn test_login_unknown_email_same_error() {
        let mut repo = MockUserRepository::new();
        repo.expect_find_by_email().times(1).returning(|_| Ok(None));

        let err = service(repo)
            .login("ghost@example.com", "whatever")
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Incorrect email or password");
    }
}
