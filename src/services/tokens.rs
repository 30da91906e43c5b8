//! Signed account-link tokens.
//!
//! Setup links (new account, 24h) and reset links (forgotten password,
//! 1h) are JWTs carrying a `kind` discriminator. A token of one kind is
//! never accepted where the other is expected.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::{Config, RESET_TOKEN_TTL_HOURS, SETUP_TOKEN_TTL_HOURS};
use crate::domain::User;
use crate::errors::{AppError, AppResult};

/// Discriminates setup links from reset links.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenKind {
    Setup,
    Reset,
}

impl TokenKind {
    fn ttl_hours(self) -> i64 {
        match self {
            Self::Setup => SETUP_TOKEN_TTL_HOURS,
            Self::Reset => RESET_TOKEN_TTL_HOURS,
        }
    }

    fn path(self) -> &'static str {
        match self {
            Self::Setup => "/auth/setup",
            Self::Reset => "/auth/reset",
        }
    }
}

/// Claims carried by a setup or reset link token.
#[derive(Debug, Serialize, Deserialize)]
pub struct LinkClaims {
    pub sub: i32,
    pub email: String,
    pub kind: TokenKind,
    pub exp: i64,
    pub iat: i64,
}

/// Issues and verifies signed setup/reset links.
pub struct TokenService {
    config: Config,
}

impl TokenService {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Build the full setup URL for a freshly created account. Valid 24h.
    pub fn generate_setup_link(&self, user: &User) -> AppResult<String> {
        self.generate_link(user, TokenKind::Setup)
    }

    /// Build the full password-reset URL. Valid 1h.
    pub fn generate_reset_link(&self, user: &User) -> AppResult<String> {
        self.generate_link(user, TokenKind::Reset)
    }

    fn generate_link(&self, user: &User, kind: TokenKind) -> AppResult<String> {
        let token = self.generate_token(user, kind)?;
        Ok(format!(
            "{}{}?token={}",
            self.config.base_url.trim_end_matches('/'),
            kind.path(),
            token
        ))
    }

    fn generate_token(&self, user: &User, kind: TokenKind) -> AppResult<String> {
        let now = Utc::now();
        let claims = LinkClaims {
            sub: user.id,
            email: user.email.clone(),
            kind,
            exp: (now + Duration::hours(kind.ttl_hours())).timestamp(),
            iat: now.timestamp(),
        };

        Ok(encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.config.jwt_secret_bytes()),
        )?)
    }

    /// Decode a link token, requiring it to be of `expected` kind.
    ///
    /// A setup token presented to the reset endpoint (or vice versa)
    /// is rejected as unauthorized, not merely invalid.
    pub fn verify(&self, token: &str, expected: TokenKind) -> AppResult<LinkClaims> {
        let data = decode::<LinkClaims>(
            token,
            &DecodingKey::from_secret(self.config.jwt_secret_bytes()),
            &Validation::default(),
        )
        .map_err(|_| AppError::Unauthorized)?;

        if data.claims.kind != expected {
            return Err(AppError::Unauthorized);
        }

        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Role;
    use chrono::Utc;

    fn sample_user() -> User {
        User {
            id: 42,
            name: "Jean".to_string(),
            email: "jean@armurerie.local".to_string(),
            username: None,
            password_hash: String::new(),
            role: Role::Employee,
            color: None,
            commission: 20,
            contract_url: None,
            last_login: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
            deleted: false,
            deleted_at: None,
        }
    }

    fn service() -> TokenService {
        TokenService::new(Config::for_tests())
    }

    fn extract_token(link: &str) -> &str {
        link.split("token=").nth(1).unwrap()
    }

    #[test]
    fn setup_link_round_trips() {
        let svc = service();
        let user = sample_user();
        let link = svc.generate_setup_link(&user).unwrap();
        assert!(link.contains("/auth/setup?token="));

        let claims = svc.verify(extract_token(&link), TokenKind::Setup).unwrap();
        assert_eq!(claims.sub, 42);
        assert_eq!(claims.email, "jean@armurerie.local");
        assert_eq!(claims.kind, TokenKind::Setup);
    }

    #[test]
    fn reset_link_round_trips() {
        let svc = service();
        let user = sample_user();
        let link = svc.generate_reset_link(&user).unwrap();
        assert!(link.contains("/auth/reset?token="));

        let claims = svc.verify(extract_token(&link), TokenKind::Reset).unwrap();
        assert_eq!(claims.kind, TokenKind::Reset);
    }

    #[test]
    fn setup_token_rejected_as_reset() {
        let svc = service();
        let link = svc.generate_setup_link(&sample_user()).unwrap();
        let err = svc.verify(extract_token(&link), TokenKind::Reset).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized));
    }

    #[test]
    fn reset_token_rejected_as_setup() {
        let svc = service();
        let link = svc.generate_reset_link(&sample_user()).unwrap();
        let err = svc.verify(extract_token(&link), TokenKind::Setup).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized));
    }

    #[test]
    fn garbage_token_rejected() {
        let svc = service();
        let err = svc.verify("not-a-jwt", TokenKind::Setup).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized));
    }

    #[test]
    fn expired_token_rejected() {
        let svc = service();
        let user = sample_user();
        let now = Utc::now();
        let claims = LinkClaims {
            sub: user.id,
            email: user.email.clone(),
            kind: TokenKind::Reset,
            exp: (now - Duration::hours(2)).timestamp(),
            iat: (now - Duration::hours(3)).timestamp(),
        };
        let config = Config::for_tests();
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.jwt_secret_bytes()),
        )
        .unwrap();

        let err = svc.verify(&token, TokenKind::Reset).unwrap_err();
        assert!(matches!(err, AppError::Unauthorized));
    }
}
