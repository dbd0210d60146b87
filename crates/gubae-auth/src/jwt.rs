//! Token codec.
//!
//! [`TokenCodec`] signs claims into an HS256 JWT and verifies tokens back into
//! claims. Both operations are pure computation over the configured secret;
//! the `*_at` variants take the clock reading explicitly so expiry can be
//! exercised without waiting.
//!
//! Expiration is enforced by the codec itself rather than by `jsonwebtoken`'s
//! built-in check, because the library applies a default leeway. A token is
//! valid strictly before `exp` and invalid at or after it.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use gubae_config::JwtConfig;
use gubae_core::AppError;

use crate::claims::Claims;

/// Tokens expire five hours after issuance.
pub const TOKEN_TTL_SECS: i64 = 5 * 60 * 60;

pub const EXPIRED_TOKEN: &str = "Token has expired";
pub const INVALID_SIGNATURE: &str = "Invalid token signature";
pub const MALFORMED_TOKEN: &str = "Malformed token";

/// Outcome of verifying a bearer token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenVerification {
    Valid(Claims),
    Invalid { reason: String },
}

impl TokenVerification {
    fn invalid(reason: &str) -> Self {
        Self::Invalid {
            reason: reason.to_string(),
        }
    }

    pub fn is_valid(&self) -> bool {
        matches!(self, Self::Valid(_))
    }

    pub fn claims(self) -> Option<Claims> {
        match self {
            Self::Valid(claims) => Some(claims),
            Self::Invalid { .. } => None,
        }
    }
}

#[derive(Clone)]
pub struct TokenCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    ttl: Duration,
}

impl TokenCodec {
    pub fn new(config: &JwtConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            ttl: Duration::seconds(TOKEN_TTL_SECS),
        }
    }

    /// Issues a token for `identifier` that expires five hours from now.
    pub fn issue(&self, identifier: &str) -> Result<String, AppError> {
        self.issue_at(identifier, Utc::now())
    }

    /// Issues a token as if the current instant were `issued_at`.
    ///
    /// Identical identifier, secret and instant always produce the same token.
    pub fn issue_at(&self, identifier: &str, issued_at: DateTime<Utc>) -> Result<String, AppError> {
        let expires_at = issued_at
            .checked_add_signed(self.ttl)
            .ok_or_else(|| AppError::internal(anyhow::anyhow!("Token expiry is out of range")))?;

        let claims = Claims {
            sub: identifier.to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to create token: {}", e)))
    }

    pub fn verify(&self, token: &str) -> TokenVerification {
        self.verify_at(token, Utc::now())
    }

    /// Verifies `token` against the secret, treating `now` as the current instant.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> TokenVerification {
        match decode::<Claims>(token, &self.decoding_key, &self.validation) {
            Ok(data) if now.timestamp() >= data.claims.exp => {
                TokenVerification::invalid(EXPIRED_TOKEN)
            }
            Ok(data) => TokenVerification::Valid(data.claims),
            Err(e) => match e.kind() {
                ErrorKind::InvalidSignature | ErrorKind::InvalidAlgorithm => {
                    TokenVerification::invalid(INVALID_SIGNATURE)
                }
                ErrorKind::ExpiredSignature => TokenVerification::invalid(EXPIRED_TOKEN),
                _ => TokenVerification::invalid(MALFORMED_TOKEN),
            },
        }
    }
}

impl std::fmt::Debug for TokenCodec {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCodec")
            .field("algorithm", &"HS256")
            .field("ttl_secs", &self.ttl.num_seconds())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn test_codec() -> TokenCodec {
        TokenCodec::new(&JwtConfig::new("test-secret-key-at-least-32-characters-long"))
    }

    fn fixed_instant() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
    }

    #[test]
    fn test_issue_then_verify_is_valid() {
        let codec = test_codec();
        let token = codec.issue("admin@example.com").unwrap();

        let claims = codec.verify(&token).claims().unwrap();
        assert_eq!(claims.sub, "admin@example.com");
        assert_eq!(claims.exp - claims.iat, 5 * 60 * 60);
    }

    #[test]
    fn test_issue_at_end_of_time_is_an_error() {
        let codec = test_codec();
        let err = codec
            .issue_at("admin@example.com", DateTime::<Utc>::MAX_UTC)
            .unwrap_err();
        assert_eq!(err.status.as_u16(), 500);
    }

    #[test]
    fn test_token_valid_until_just_before_expiry() {
        let codec = test_codec();
        let issued = fixed_instant();
        let token = codec.issue_at("admin@example.com", issued).unwrap();

        let almost = issued + Duration::hours(5) - Duration::seconds(1);
        assert!(codec.verify_at(&token, almost).is_valid());
    }

    #[test]
    fn test_token_invalid_at_and_after_expiry() {
        let codec = test_codec();
        let issued = fixed_instant();
        let token = codec.issue_at("admin@example.com", issued).unwrap();

        let at_expiry = issued + Duration::hours(5);
        assert_eq!(
            codec.verify_at(&token, at_expiry),
            TokenVerification::Invalid {
                reason: EXPIRED_TOKEN.to_string()
            }
        );
        let day_later = at_expiry + Duration::days(1);
        assert!(!codec.verify_at(&token, day_later).is_valid());
    }

    #[test]
    fn test_issue_is_deterministic_for_same_instant() {
        let codec = test_codec();
        let issued = fixed_instant();

        let first = codec.issue_at("admin@example.com", issued).unwrap();
        let second = codec.issue_at("admin@example.com", issued).unwrap();
        assert_eq!(first, second);

        let later = codec
            .issue_at("admin@example.com", issued + Duration::seconds(1))
            .unwrap();
        assert_ne!(first, later);
    }

    #[test]
    fn test_wrong_secret_is_invalid_signature() {
        let codec = test_codec();
        let token = codec.issue("admin@example.com").unwrap();

        let other = TokenCodec::new(&JwtConfig::new(
            "different-secret-key-at-least-32-characters",
        ));
        assert_eq!(
            other.verify(&token),
            TokenVerification::Invalid {
                reason: INVALID_SIGNATURE.to_string()
            }
        );
    }

    #[test]
    fn test_tampered_signature_is_invalid() {
        let codec = test_codec();
        let token = codec.issue("admin@example.com").unwrap();

        let (head, signature) = token.rsplit_once('.').unwrap();
        let flipped: String = signature.chars().rev().collect();
        let tampered = format!("{}.{}", head, flipped);

        assert!(!codec.verify(&tampered).is_valid());
    }

    #[test]
    fn test_malformed_tokens_are_invalid() {
        let codec = test_codec();

        for garbage in ["", "not-a-token", "a.b.c", "....", "Bearer", "eyJhbGciOi.x.y"] {
            match codec.verify(garbage) {
                TokenVerification::Valid(_) => panic!("{:?} verified", garbage),
                TokenVerification::Invalid { reason } => {
                    assert!(!reason.is_empty());
                    assert!(!reason.contains("test-secret"));
                }
            }
        }
    }

    #[test]
    fn test_debug_does_not_leak_secret() {
        let rendered = format!("{:?}", test_codec());
        assert!(!rendered.contains("test-secret"));
    }
}
