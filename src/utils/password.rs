use crate::error::{AppError, AppResult};

/// Cost factor applied when nothing else is configured.
pub const DEFAULT_COST: u32 = 10;

/// Accepted bcrypt cost range.
pub const MIN_COST: u32 = 4;
pub const MAX_COST: u32 = 31;

/// Hash a password using bcrypt
///
/// # Arguments
/// * `password` - The plain text password to hash
/// * `cost` - bcrypt work factor (4..=31)
///
/// # Example
/// ```ignore
/// let hashed = hash_password("my_secure_password", 10)?;
/// ```
pub fn hash_password(password: &str, cost: u32) -> AppResult<String> {
    bcrypt::hash(password, cost).map_err(|e| AppError::Internal {
        source: anyhow::anyhow!("Failed to hash password: {}", e),
    })
}

/// Verify a password against a bcrypt hash
///
/// A malformed stored hash is reported as an internal error, not as a mismatch.
pub fn verify_password(password: &str, password_hash: &str) -> AppResult<bool> {
    bcrypt::verify(password, password_hash).map_err(|e| AppError::Internal {
        source: anyhow::anyhow!("Failed to verify password: {}", e),
    })
}

/// Runs [`hash_password`] on the blocking pool.
pub async fn hash_password_blocking(password: String, cost: u32) -> AppResult<String> {
    tokio::task::spawn_blocking(move || hash_password(&password, cost))
        .await
        .map_err(|e| AppError::Internal {
            source: anyhow::Error::from(e),
        })?
}

/// Runs [`verify_password`] on the blocking pool.
pub async fn verify_password_blocking(password: String, password_hash: String) -> AppResult<bool> {
    tokio::task::spawn_blocking(move || verify_password(&password, &password_hash))
        .await
        .map_err(|e| AppError::Internal {
            source: anyhow::Error::from(e),
        })?
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_COST: u32 = MIN_COST;

    #[test]
    fn test_hash_password() {
        let hash = hash_password("test_password_123", TEST_COST).expect("Failed to hash password");

        assert!(!hash.is_empty());
        assert!(hash.starts_with("$2"));
        assert_ne!(hash, "test_password_123");
    }

    #[test]
    fn test_hash_records_cost_factor() {
        let hash = hash_password("pw", DEFAULT_COST).expect("Failed to hash password");
        assert!(hash.starts_with("$2b$10$"));
    }

    #[test]
    fn test_verify_password_success() {
        let password = "test_password_123";
        let hash = hash_password(password, TEST_COST).expect("Failed to hash password");

        assert!(verify_password(password, &hash).expect("Failed to verify password"));
    }

    #[test]
    fn test_verify_password_failure() {
        let hash = hash_password("test_password_123", TEST_COST).expect("Failed to hash password");

        assert!(!verify_password("wrong_password", &hash).expect("Failed to verify password"));
    }

    #[test]
    fn test_different_hashes_for_same_password() {
        let password = "test_password_123";
        let hash1 = hash_password(password, TEST_COST).unwrap();
        let hash2 = hash_password(password, TEST_COST).unwrap();

        // Different salts should produce different hashes
        assert_ne!(hash1, hash2);
        assert!(verify_password(password, &hash1).unwrap());
        assert!(verify_password(password, &hash2).unwrap());
    }

    #[test]
    fn test_verify_against_malformed_hash() {
        assert!(matches!(
            verify_password("pw", "not-a-bcrypt-hash"),
            Err(AppError::Internal { .. })
        ));
    }

    #[tokio::test]
    async fn test_blocking_wrappers() {
        let hash = hash_password_blocking("secret".to_string(), TEST_COST)
            .await
            .unwrap();
        assert!(verify_password_blocking("secret".to_string(), hash.clone()).await.unwrap());
        assert!(!verify_password_blocking("other".to_string(), hash).await.unwrap());
    }
}
