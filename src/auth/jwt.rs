use chrono::{Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, thiserror::Error)]
pub enum JwtError {
    #[error("Token generation failed: {0}")]
    GenerationFailed(jsonwebtoken::errors::Error),
    #[error("Token expired")]
    Expired,
    #[error("Token verification failed: {0}")]
    VerificationFailed(jsonwebtoken::errors::Error),
}

/// Claims carried by an access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: Uuid,
    pub username: String,
    pub exp: i64,
    pub iat: i64,
}

/// Signs and checks HS256 access tokens.
#[derive(Clone)]
pub struct JwtManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiration_hours: i64,
}

impl JwtManager {
    pub fn new(secret: &str, expiration_hours: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_ref()),
            decoding_key: DecodingKey::from_secret(secret.as_ref()),
            expiration_hours,
        }
    }

    /// Génère un access token avec la durée configurée
    pub fn generate_access_token(&self, user_id: Uuid, username: &str) -> Result<String, JwtError> {
        self.generate_token(user_id, username, self.expiration_hours)
    }

    /// Lifetime of access tokens, in seconds.
    pub fn expires_in(&self) -> i64 {
        self.expiration_hours * 3600
    }

    pub fn generate_token(
        &self,
        user_id: Uuid,
        username: &str,
        expires_in_hours: i64,
    ) -> Result<String, JwtError> {
        let now = Utc::now();
        let exp = (now + Duration::hours(expires_in_hours)).timestamp();

        let claims = Claims {
            sub: user_id,
            username: username.to_string(),
            exp,
            iat: now.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(JwtError::GenerationFailed)
    }

    pub fn verify_token(&self, token: &str) -> Result<Claims, JwtError> {
        decode::<Claims>(token, &self.decoding_key, &Validation::default())
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::Expired,
                _ => JwtError::VerificationFailed(e),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::{JwtError, JwtManager, Uuid};

    fn make_jwt_manager() -> JwtManager {
        JwtManager::new("my_secret_key_for_tests_0123456789", 1)
    }

    #[test]
    fn verify_token_returns_correct_claims() {
        let jwt = make_jwt_manager();
        let user_id = Uuid::new_v4();
        let token = jwt
            .generate_access_token(user_id, "alice")
            .expect("Failed to generate token");

        let claims = jwt.verify_token(&token).expect("Token verification should succeed");

        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.username, "alice");
        assert!(claims.exp > claims.iat, "Expiry should be after issued time");
        assert_eq!(jwt.expires_in(), 3600);
    }

    #[test]
    fn expired_token_is_reported_as_expired() {
        let jwt = make_jwt_manager();
        // well past the default 60s leeway
        let token = jwt
            .generate_token(Uuid::new_v4(), "bob", -2)
            .expect("Failed to generate token");

        assert!(matches!(jwt.verify_token(&token), Err(JwtError::Expired)));
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let other = JwtManager::new("another_secret_key_for_tests_9876543210", 1);
        let token = other
            .generate_access_token(Uuid::new_v4(), "carol")
            .expect("Failed to generate token");

        let result = make_jwt_manager().verify_token(&token);
        assert!(matches!(result, Err(JwtError::VerificationFailed(_))));
    }

    #[test]
    fn verify_token_fails_with_invalid_input() {
        let result = make_jwt_manager().verify_token("invalid.token.here");
        assert!(matches!(result, Err(JwtError::VerificationFailed(_))));
    }
}
