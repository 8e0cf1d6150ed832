use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::utils::error::AppError;

/// Sessions last 24 hours; there is no refresh and no revocation list.
pub const SESSION_TTL_SECS: i64 = 24 * 60 * 60;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(rename = "userId")]
    pub user_id: i32,
    pub iat: i64,
    pub exp: i64,
}

/// HS256 keys derived from the configured secret.
#[derive(Clone)]
pub struct SessionKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
}

impl SessionKeys {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "iat"]);

        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            validation,
        }
    }

    pub fn issue(&self, user_id: i32) -> Result<String, AppError> {
        self.issue_at(user_id, Utc::now().timestamp())
    }

    /// Issues a token as if it had been signed at `issued_at` (unix seconds).
    pub fn issue_at(&self, user_id: i32, issued_at: i64) -> Result<String, AppError> {
        let claims = Claims {
            user_id,
            iat: issued_at,
            exp: issued_at + SESSION_TTL_SECS,
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AppError::InternalServerError(format!("Failed to sign session token: {}", e)))
    }

    /// Checks signature and expiry.
    pub fn verify(&self, token: &str) -> Option<Claims> {
        match decode::<Claims>(token, &self.decoding, &self.validation) {
            Ok(data) => Some(data.claims),
            Err(e) => {
                tracing::debug!(error = %e, "Session token rejected");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys() -> SessionKeys {
        SessionKeys::new(b"test-secret")
    }

    #[test]
    fn test_issue_and_verify() {
        let keys = keys();
        let token = keys.issue(42).unwrap();
        let claims = keys.verify(&token).unwrap();

        assert_eq!(claims.user_id, 42);
        assert_eq!(claims.exp - claims.iat, SESSION_TTL_SECS);
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let keys = keys();
        let issued = Utc::now().timestamp() - SESSION_TTL_SECS - 60;
        let token = keys.issue_at(7, issued).unwrap();
        assert!(keys.verify(&token).is_none());
    }

    #[test]
    fn test_token_near_expiry_is_still_valid() {
        let keys = keys();
        let issued = Utc::now().timestamp() - SESSION_TTL_SECS + 120;
        let token = keys.issue_at(7, issued).unwrap();
        assert_eq!(keys.verify(&token).map(|c| c.user_id), Some(7));
    }

    #[test]
    fn test_foreign_signature_is_rejected() {
        let token = SessionKeys::new(b"someone-else").issue(1).unwrap();
        assert!(keys().verify(&token).is_none());
    }

    #[test]
    fn test_garbage_is_rejected() {
        assert!(keys().verify("").is_none());
        assert!(keys().verify("not.a.jwt").is_none());
    }

    #[test]
    fn test_claims_use_user_id_key() {
        let claims = Claims {
            user_id: 3,
            iat: 0,
            exp: 1,
        };
        let json = serde_json::to_value(&claims).unwrap();
        assert_eq!(json["userId"], 3);
    }
}
