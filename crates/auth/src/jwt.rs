//! Bearer token decoding (HS256).
//!
//! Signature verification happens here; deterministic claim-window checks
//! stay in [`crate::claims`] so they remain testable without key material.

use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, Validation};
use thiserror::Error;

use crate::claims::{validate_claims, JwtClaims, TokenValidationError};

#[derive(Debug, Error)]
pub enum JwtError {
    #[error("token decode failed: {0}")]
    Decode(#[from] jsonwebtoken::errors::Error),

    #[error(transparent)]
    Claims(#[from] TokenValidationError),
}

/// Validates a raw bearer token into claims.
///
/// Trait object seam so transports can be handed a validator without caring
/// about the algorithm or key source.
pub trait JwtValidator: Send + Sync {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<JwtClaims, JwtError>;
}

/// HS256 shared-secret validator.
pub struct Hs256JwtValidator {
    key: DecodingKey,
}

impl Hs256JwtValidator {
    pub fn new(secret: Vec<u8>) -> Self {
        Self {
            key: DecodingKey::from_secret(&secret),
        }
    }
}

impl JwtValidator for Hs256JwtValidator {
    fn validate(&self, token: &str, now: DateTime<Utc>) -> Result<JwtClaims, JwtError> {
        // Claims carry RFC3339 timestamps rather than numeric `exp`/`iat`;
        // expiry is enforced by `validate_claims` below.
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.required_spec_claims = Default::default();

        let data = jsonwebtoken::decode::<JwtClaims>(token, &self.key, &validation)?;
        validate_claims(&data.claims, now)?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{PrincipalId, Role};
    use chrono::Duration;
    use jsonwebtoken::{EncodingKey, Header};

    fn mint(secret: &str, issued_offset_mins: i64, expires_offset_mins: i64) -> String {
        let now = Utc::now();
        let claims = JwtClaims {
            sub: PrincipalId::new(),
            roles: vec![Role::new("admin")],
            issued_at: now + Duration::minutes(issued_offset_mins),
            expires_at: now + Duration::minutes(expires_offset_mins),
        };
        jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn round_trips_a_live_token() {
        let validator = Hs256JwtValidator::new(b"secret".to_vec());
        let claims = validator
            .validate(&mint("secret", -1, 10), Utc::now())
            .unwrap();
        assert!(claims.roles.iter().any(|r| r.as_str() == "admin"));
    }

    #[test]
    fn rejects_wrong_secret() {
        let validator = Hs256JwtValidator::new(b"secret".to_vec());
        let err = validator
            .validate(&mint("other-secret", -1, 10), Utc::now())
            .unwrap_err();
        assert!(matches!(err, JwtError::Decode(_)));
    }

    #[test]
    fn rejects_expired_token() {
        let validator = Hs256JwtValidator::new(b"secret".to_vec());
        let err = validator
            .validate(&mint("secret", -10, -1), Utc::now())
            .unwrap_err();
        assert!(matches!(
            err,
            JwtError::Claims(TokenValidationError::Expired)
        ));
    }

    #[test]
    fn rejects_garbage() {
        let validator = Hs256JwtValidator::new(b"secret".to_vec());
        assert!(validator.validate("not-a-jwt", Utc::now()).is_err());
    }
}
