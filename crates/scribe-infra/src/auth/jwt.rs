//! JWT session token implementation.

use chrono::{DateTime, TimeDelta, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use scribe_core::ports::{AuthError, SessionClaims, SessionTokens};

/// Session token configuration, built once at startup.
#[derive(Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration_hours: i64,
    pub issuer: String,
}

impl std::fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("expiration_hours", &self.expiration_hours)
            .field("issuer", &self.issuer)
            .finish()
    }
}

/// Internal JWT claims structure for serialization.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String, // user_id
    jti: String, // token id, revocation key
    exp: i64,    // expiration timestamp
    iat: i64,    // issued at
    iss: String, // issuer
}

/// HMAC-signed session tokens.
pub struct JwtSessionTokens {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    config: JwtConfig,
}

impl JwtSessionTokens {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            encoding_key,
            decoding_key,
            config,
        }
    }

    fn decode_claims(&self, token: &str) -> Result<SessionClaims, String> {
        let mut validation = Validation::default();
        validation.set_issuer(&[&self.config.issuer]);
        validation.set_required_spec_claims(&["exp", "iss", "sub"]);

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| e.to_string())?
            .claims;

        Ok(SessionClaims {
            user_id: Uuid::parse_str(&claims.sub).map_err(|e| e.to_string())?,
            token_id: Uuid::parse_str(&claims.jti).map_err(|e| e.to_string())?,
            issued_at: timestamp(claims.iat)?,
            expires_at: timestamp(claims.exp)?,
        })
    }
}

fn timestamp(secs: i64) -> Result<DateTime<Utc>, String> {
    DateTime::from_timestamp(secs, 0).ok_or_else(|| format!("timestamp out of range: {secs}"))
}

impl SessionTokens for JwtSessionTokens {
    fn issue(&self, user_id: Uuid) -> Result<String, AuthError> {
        let now = Utc::now();
        let exp = now + self.lifetime();

        let claims = Claims {
            sub: user_id.to_string(),
            jti: Uuid::new_v4().to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Signing(e.to_string()))
    }

    fn verify(&self, token: &str) -> Result<SessionClaims, AuthError> {
        self.decode_claims(token).map_err(|reason| {
            tracing::debug!(%reason, "Session token rejected");
            AuthError::InvalidOrMissing
        })
    }

    fn lifetime(&self) -> TimeDelta {
        TimeDelta::hours(self.config.expiration_hours)
    }
}
