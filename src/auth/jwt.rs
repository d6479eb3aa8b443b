use std::time::Duration;

use axum::extract::FromRef;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use thiserror::Error;
use time::{Duration as TimeDuration, OffsetDateTime};
use tracing::{debug, warn};

use crate::auth::claims::Claims;
use crate::config::JwtConfig;
use crate::error::ApiError;
use crate::state::AppState;

/// Why a credential was rejected. Both variants map to 401; they are
/// distinguished here (and in the logs) but not in the response status.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Authorization token required")]
    MissingCredential,
    #[error("Invalid or expired token")]
    InvalidOrExpiredCredential,
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        match e {
            AuthError::MissingCredential => ApiError::AuthRequired,
            AuthError::InvalidOrExpiredCredential => ApiError::InvalidCredential,
        }
    }
}

/// Signing and verification keys plus the token parameters, built once per
/// request from the injected config. No mutable state; safe to use
/// concurrently.
#[derive(Clone)]
pub struct JwtKeys {
    pub encoding: EncodingKey,
    pub decoding: DecodingKey,
    pub issuer: String,
    pub audience: String,
    pub ttl: Duration,
}

impl FromRef<AppState> for JwtKeys {
    fn from_ref(state: &AppState) -> Self {
        let JwtConfig {
            secret,
            issuer,
            audience,
            ttl_minutes,
        } = state.config.jwt.clone();
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            issuer,
            audience,
            ttl: Duration::from_secs((ttl_minutes as u64) * 60),
        }
    }
}

impl JwtKeys {
    /// Mint a session token for `username`.
    pub fn sign(&self, username: &str) -> anyhow::Result<String> {
        let now = OffsetDateTime::now_utc();
        let exp = now + TimeDuration::seconds(self.ttl.as_secs() as i64);
        let claims = Claims {
            sub: username.to_owned(),
            iat: now.unix_timestamp() as usize,
            exp: exp.unix_timestamp() as usize,
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
        };
        let token = encode(&Header::default(), &claims, &self.encoding)?;
        debug!(username = %username, "jwt signed");
        Ok(token)
    }

    /// Authenticate an `Authorization` header value: extract the bearer
    /// token and verify it. The full flow a protected route runs.
    pub fn authenticate(&self, header: Option<&str>) -> Result<Claims, AuthError> {
        let token = header
            .and_then(|v| v.strip_prefix("Bearer "))
            .ok_or(AuthError::MissingCredential)?;
        self.verify(token)
    }

    /// Verify a raw token's signature, expiry, issuer and audience.
    pub fn verify(&self, token: &str) -> Result<Claims, AuthError> {
        let mut validation = Validation::default();
        validation.set_audience(std::slice::from_ref(&self.audience));
        validation.set_issuer(std::slice::from_ref(&self.issuer));
        match decode::<Claims>(token, &self.decoding, &validation) {
            Ok(data) => {
                debug!(username = %data.claims.sub, "jwt verified");
                Ok(data.claims)
            }
            Err(e) => {
                if matches!(e.kind(), ErrorKind::ExpiredSignature) {
                    warn!("token expired");
                } else {
                    warn!(error = %e, "token rejected");
                }
                Err(AuthError::InvalidOrExpiredCredential)
            }
        }
    }
}
