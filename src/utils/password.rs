//! Password hashing with bcrypt.
//!
//! Both operations run on Tokio's blocking pool.

use serde_json::json;

use crate::error::AppError;

/// Longest input bcrypt takes into account.
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Hashes a plaintext password with the given bcrypt cost.
///
/// # Errors
///
/// Returns [`AppError::Internal`] if hashing fails or the blocking task panics.
pub async fn hash_password(plain: String, cost: u32) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || bcrypt::hash(plain, cost))
        .await
        .map_err(|e| {
            AppError::internal(
                "Password hashing task failed",
                json!({"reason": e.to_string()}),
            )
        })?
        .map_err(|e| AppError::internal("Password hashing failed", json!({"reason": e.to_string()})))
}

/// Checks a plaintext password against a stored bcrypt hash.
///
/// A malformed stored hash is treated as a mismatch.
pub async fn verify_password(plain: String, hash: String) -> Result<bool, AppError> {
    let verified = tokio::task::spawn_blocking(move || bcrypt::verify(plain, &hash))
        .await
        .map_err(|e| {
            AppError::internal("Password verification task failed", json!({"reason": e.to_string()}))
        })?;

    match verified {
        Ok(matches) => Ok(matches),
        Err(e) => {
            tracing::warn!(error = %e, "Stored password hash could not be parsed");
            Ok(false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_and_verify() {
        let hash = hash_password("s3cret".to_string(), 4)
            .await
            .unwrap();

        assert_ne!(hash, "s3cret");
        assert!(verify_password("s3cret".to_string(), hash.clone()).await.unwrap());
        assert!(!verify_password("wrong".to_string(), hash).await.unwrap());
    }

    #[tokio::test]
    async fn test_hashes_are_salted() {
        let a = hash_password("same".to_string(), 4).await.unwrap();
        let b = hash_password("same".to_string(), 4).await.unwrap();

        assert_ne!(a, b);
    }

    #[tokio::test]
    async fn test_malformed_hash_is_mismatch() {
        let result = verify_password("anything".to_string(), "not-a-bcrypt-hash".to_string()).await;

        assert!(!result.unwrap());
    }

    #[tokio::test]
    async fn test_invalid_cost_is_internal_error() {
        let result = hash_password("pw".to_string(), 2).await;

        assert!(matches!(result, Err(AppError::Internal { .. })));
    }
}
