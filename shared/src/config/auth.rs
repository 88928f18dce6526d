//! Token signing, password hashing and account policy

use serde::{Deserialize, Serialize};

/// Placeholder secret. `main` refuses to start with it in production.
const INSECURE_SECRET: &str = "stayhub-dev-secret-change-me";

/// HS256 signing settings. Lifetimes are in seconds.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct JwtConfig {
    pub secret: String,
    pub issuer: String,
    pub audience: String,
    pub access_ttl_seconds: i64,
    pub refresh_ttl_seconds: i64,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: INSECURE_SECRET.to_string(),
            issuer: "stayhub".to_string(),
            audience: "stayhub-api".to_string(),
            access_ttl_seconds: 15 * 60,
            refresh_ttl_seconds: 7 * 24 * 60 * 60,
        }
    }
}

impl JwtConfig {
    pub fn is_using_default_secret(&self) -> bool {
        self.secret == INSECURE_SECRET
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct AuthConfig {
    pub jwt: JwtConfig,

    /// bcrypt work factor
    pub bcrypt_cost: u32,

    /// Seconds between purges of expired tokens; 0 disables the task
    pub token_cleanup_interval: u64,

    /// Whether `POST /auth/register` accepts new accounts
    pub allow_registration: bool,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt: JwtConfig::default(),
            bcrypt_cost: 12,
            token_cleanup_interval: 3600,
            allow_registration: true,
        }
    }
}

fn parsed<T: std::str::FromStr>(name: &str) -> Option<T> {
    std::env::var(name).ok().and_then(|v| v.parse().ok())
}

impl AuthConfig {
    /// `JWT_SECRET`, `JWT_ACCESS_TTL`, `JWT_REFRESH_TTL`, `BCRYPT_COST`,
    /// `TOKEN_CLEANUP_INTERVAL`, `ALLOW_REGISTRATION`
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(secret) = std::env::var("JWT_SECRET") {
            config.jwt.secret = secret;
        }
        if let Some(ttl) = parsed("JWT_ACCESS_TTL") {
            config.jwt.access_ttl_seconds = ttl;
        }
        if let Some(ttl) = parsed("JWT_REFRESH_TTL") {
            config.jwt.refresh_ttl_seconds = ttl;
        }
        if let Some(cost) = parsed("BCRYPT_COST") {
            config.bcrypt_cost = cost;
        }
        if let Some(interval) = parsed("TOKEN_CLEANUP_INTERVAL") {
            config.token_cleanup_interval = interval;
        }
        if let Some(allow) = parsed("ALLOW_REGISTRATION") {
            config.allow_registration = allow;
        }
        config
    }
}
