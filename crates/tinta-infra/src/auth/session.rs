//! Signed session cookie codec.
//!
//! The session is an HS256-signed token carried in an http-only cookie.
//! It holds the identity the login handler established: user id, username,
//! first and last name. Nothing server-side is stored; logout just drops
//! the cookie.

use chrono::{TimeDelta, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tinta_core::ports::{AuthError, SessionClaims, SessionCodec};

/// Session signing configuration.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub secret: String,
    pub ttl_hours: i64,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            secret: "change-me-in-production".to_string(),
            ttl_hours: 24,
        }
    }
}

/// Internal claims structure for serialization.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String, // user_id
    username: String,
    first_name: String,
    last_name: String,
    exp: i64, // expiration timestamp
    iat: i64, // issued at
}

/// JWT-backed session codec.
pub struct JwtSessionCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    config: SessionConfig,
}

impl JwtSessionCodec {
    pub fn new(config: SessionConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            encoding_key,
            decoding_key,
            config,
        }
    }

    pub fn from_env() -> Self {
        let secret = std::env::var("SESSION_SECRET")
            .unwrap_or_else(|_| "change-me-in-production".to_string());

        if secret == "change-me-in-production" {
            let is_production = std::env::var("RUST_ENV")
                .map(|v| v == "production" || v == "prod")
                .unwrap_or(false);

            if is_production {
                tracing::error!(
                    "SECURITY: Using default session secret in production! Set SESSION_SECRET."
                );
            } else {
                tracing::warn!("Using default session secret. Set SESSION_SECRET for production.");
            }
        }

        let config = SessionConfig {
            secret,
            ttl_hours: std::env::var("SESSION_TTL_HOURS")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(24),
        };
        Self::new(config)
    }
}

impl SessionCodec for JwtSessionCodec {
    fn issue(&self, claims: &SessionClaims) -> Result<String, AuthError> {
        let now = Utc::now();
        let exp = now + TimeDelta::hours(self.config.ttl_hours);

        let claims = Claims {
            sub: claims.user_id.to_string(),
            username: claims.username.clone(),
            first_name: claims.first_name.clone(),
            last_name: claims.last_name.clone(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::InvalidSession(e.to_string()))
    }

    fn decode(&self, token: &str) -> Result<SessionClaims, AuthError> {
        let validation = Validation::default();

        let token_data =
            decode::<Claims>(token, &self.decoding_key, &validation).map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::SessionExpired,
                _ => AuthError::InvalidSession(e.to_string()),
            })?;

        let user_id = Uuid::parse_str(&token_data.claims.sub)
            .map_err(|e| AuthError::InvalidSession(e.to_string()))?;

        Ok(SessionClaims {
            user_id,
            username: token_data.claims.username,
            first_name: token_data.claims.first_name,
            last_name: token_data.claims.last_name,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> SessionConfig {
        SessionConfig {
            secret: "test-secret-key".to_string(),
            ttl_hours: 1,
        }
    }

    fn claims_for(user_id: Uuid) -> SessionClaims {
        SessionClaims {
            user_id,
            username: "jane".to_string(),
            first_name: "Jane".to_string(),
            last_name: "Doe".to_string(),
        }
    }

    #[test]
    fn issue_and_decode_round_trip() {
        let codec = JwtSessionCodec::new(test_config());
        let user_id = Uuid::new_v4();

        let token = codec.issue(&claims_for(user_id)).unwrap();
        let decoded = codec.decode(&token).unwrap();

        assert_eq!(decoded.user_id, user_id);
        assert_eq!(decoded.username, "jane");
        assert_eq!(decoded.first_name, "Jane");
        assert_eq!(decoded.last_name, "Doe");
    }

    #[test]
    fn decode_rejects_garbage() {
        let codec = JwtSessionCodec::new(test_config());

        let result = codec.decode("not-a-session-token");

        assert!(matches!(result, Err(AuthError::InvalidSession(_))));
    }

    #[test]
    fn decode_rejects_token_signed_with_other_secret() {
        let codec1 = JwtSessionCodec::new(SessionConfig {
            secret: "secret-one".to_string(),
            ttl_hours: 1,
        });
        let codec2 = JwtSessionCodec::new(SessionConfig {
            secret: "secret-two".to_string(),
            ttl_hours: 1,
        });

        let token = codec1.issue(&claims_for(Uuid::new_v4())).unwrap();

        assert!(codec2.decode(&token).is_err());
    }
}
