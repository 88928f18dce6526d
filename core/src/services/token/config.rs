use hb_shared::config::JwtConfig;
use jsonwebtoken::Algorithm;

#[derive(Debug, Clone)]
pub struct TokenServiceConfig {
    pub jwt_secret: String,
    pub algorithm: Algorithm,
    pub issuer: String,
    pub audience: String,
    /// Seconds
    pub access_token_ttl: i64,
    /// Seconds
    pub refresh_token_ttl: i64,
}

impl Default for TokenServiceConfig {
    fn default() -> Self {
        Self::from(&JwtConfig::default())
    }
}

impl From<&JwtConfig> for TokenServiceConfig {
    fn from(jwt: &JwtConfig) -> Self {
        Self {
            jwt_secret: jwt.secret.clone(),
            algorithm: Algorithm::HS256,
            issuer: jwt.issuer.clone(),
            audience: jwt.audience.clone(),
            access_token_ttl: jwt.access_ttl_seconds,
            refresh_token_ttl: jwt.refresh_ttl_seconds,
        }
    }
}
