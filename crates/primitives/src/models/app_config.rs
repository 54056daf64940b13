use eyre::Report;
use secrecy::SecretString;
use std::env;

#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub jwt_secret: SecretString,
    pub jwt_expiration_hours: i64,
    pub jwt_issuer: String,
    pub jwt_audience: String,
}

impl JwtConfig {
    pub fn from_env() -> Result<Self, Report> {
        Ok(Self {
            jwt_secret: SecretString::from(
                env::var("JWT_SECRET").map_err(|_| eyre::eyre!("JWT_SECRET must be set"))?,
            ),
            jwt_expiration_hours: env::var("JWT_EXPIRATION_HOURS")
                .unwrap_or_else(|_| "2".into())
                .parse()?,
            jwt_issuer: env::var("JWT_ISSUER").unwrap_or_else(|_| "counseldesk".into()),
            jwt_audience: env::var("JWT_AUDIENCE").unwrap_or_else(|_| "counseldesk_api".into()),
        })
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub jwt: JwtConfig,
    pub app_url: String,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, Report> {
        Ok(Self {
            jwt: JwtConfig::from_env()?,
            app_url: env::var("APP_URL").unwrap_or_else(|_| "http://localhost:8080".into()),
        })
    }
}
