use crate::config::AuthConfig;
use anyhow::{Context, Result};
use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation};
use medimatch_common::Claims;
use sha2::{Digest, Sha256};

/// Hash a password using argon2id
pub fn hash_password(password: &str) -> Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))?;
    Ok(hash.to_string())
}

/// Verify a password against a hash
pub fn verify_password(password: &str, hash: &str) -> Result<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| anyhow::anyhow!("Invalid password hash: {}", e))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

/// Create an access token (JWT) with the configured lifetime
pub fn create_access_token(user_id: &str, email: &str, auth: &AuthConfig) -> Result<String> {
    let now = chrono::Utc::now().timestamp();
    let claims = Claims {
        sub: user_id.to_string(),
        email: email.to_string(),
        iat: now,
        exp: now + auth.token_ttl_days * 86_400,
    };
    jsonwebtoken::encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(auth.jwt_secret.as_bytes()),
    )
    .context("Failed to create access token")
}

/// Validate an access token and return claims
pub fn validate_access_token(token: &str, jwt_secret: &str) -> Result<Claims> {
    let token_data = jsonwebtoken::decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_secret.as_bytes()),
        &Validation::default(),
    )
    .context("Invalid access token")?;
    Ok(token_data.claims)
}

/// Generate a password-reset token: returns (raw_token, token_hash).
///
/// The raw token (32 random bytes as 64 hex chars) is emailed to the user;
/// only the SHA256 hash is persisted.
pub fn generate_reset_token() -> (String, String) {
    use argon2::password_hash::rand_core::RngCore;
    let mut bytes = [0u8; 32];
    OsRng.fill_bytes(&mut bytes);
    let raw: String = bytes.iter().map(|b| format!("{:02x}", b)).collect();
    let hash = hash_reset_token(&raw);
    (raw, hash)
}

/// Hash a reset token using SHA256
pub fn hash_reset_token(raw_token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(raw_token.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_auth_config() -> AuthConfig {
        AuthConfig {
            jwt_secret: "test-jwt-secret".to_string(),
            token_ttl_days: 7,
            reset_token_ttl_minutes: 10,
        }
    }

    #[test]
    fn test_password_hash_and_verify_correct() {
        let password = "my-secure-password";
        let hash = hash_password(password).unwrap();
        assert!(verify_password(password, &hash).unwrap());
    }

    #[test]
    fn test_password_verify_wrong() {
        let hash = hash_password("correct-password").unwrap();
        assert!(!verify_password("wrong-password", &hash).unwrap());
    }

    #[test]
    fn test_password_different_salts() {
        let password = "same-password";
        let hash1 = hash_password(password).unwrap();
        let hash2 = hash_password(password).unwrap();
        assert_ne!(hash1, hash2);
        // Both still verify
        assert!(verify_password(password, &hash1).unwrap());
        assert!(verify_password(password, &hash2).unwrap());
    }

    #[test]
    fn test_jwt_create_and_validate() {
        let config = test_auth_config();
        let token = create_access_token("user-123", "test@example.com", &config).unwrap();
        let claims = validate_access_token(&token, &config.jwt_secret).unwrap();
        assert_eq!(claims.sub, "user-123");
        assert_eq!(claims.email, "test@example.com");
        assert_eq!(claims.exp - claims.iat, 7 * 86_400);
    }

    #[test]
    fn test_jwt_wrong_secret_fails() {
        let config = test_auth_config();
        let token = create_access_token("user-123", "test@example.com", &config).unwrap();
        let result = validate_access_token(&token, "other-secret");
        assert!(result.is_err());
    }

    #[test]
    fn test_jwt_ttl_from_config() {
        let mut config = test_auth_config();
        config.token_ttl_days = 1;
        let token = create_access_token("user-123", "test@example.com", &config).unwrap();
        let claims = validate_access_token(&token, &config.jwt_secret).unwrap();
        assert_eq!(claims.exp - claims.iat, 86_400);
    }

    #[test]
    fn test_reset_token_format() {
        let (raw, hash) = generate_reset_token();
        assert_eq!(raw.len(), 64, "32 random bytes as hex");
        assert!(raw.chars().all(|c| c.is_ascii_hexdigit()));
        assert_eq!(hash, hash_reset_token(&raw));
    }

    #[test]
    fn test_reset_token_uniqueness() {
        let (raw1, hash1) = generate_reset_token();
        let (raw2, hash2) = generate_reset_token();
        assert_ne!(raw1, raw2);
        assert_ne!(hash1, hash2);
    }

    #[test]
    fn test_reset_token_hash_determinism() {
        let raw = "fixed-token-value";
        let hash1 = hash_reset_token(raw);
        let hash2 = hash_reset_token(raw);
        assert_eq!(hash1, hash2);
    }
}
