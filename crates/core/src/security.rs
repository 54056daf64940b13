use crate::app_state::AppState;
use axum::http::Request;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::extract::State;
use chrono::{Duration, Utc};
use counseldesk_primitives::error::ApiError;
use counseldesk_primitives::models::app_config::AppConfig;
use counseldesk_primitives::models::Role;
use http::HeaderMap;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::error;
use uuid::Uuid;

/// Claims issued by the external identity provider. This subsystem only
/// decodes and checks them; login and token issuance live elsewhere.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String, // user id
    pub role: Role,
    pub exp: i64,
    pub iat: i64,
    pub iss: String,
    pub aud: String,
    pub jti: String,
}

impl Claims {
    pub fn user_id(&self) -> Result<Uuid, ApiError> {
        Uuid::parse_str(&self.sub).map_err(|e| {
            error!("Invalid user ID in claims: {}", e);
            ApiError::Auth("Invalid user ID".to_string())
        })
    }

    pub fn require_super_admin(&self) -> Result<(), ApiError> {
        if self.role == Role::SuperAdmin {
            Ok(())
        } else {
            Err(ApiError::Forbidden("Unauthorized access".to_string()))
        }
    }

    pub fn require_admin(&self) -> Result<(), ApiError> {
        match self.role {
            Role::OfficeAdmin | Role::SuperAdmin => Ok(()),
            Role::Student => Err(ApiError::Forbidden("Unauthorized access".to_string())),
        }
    }
}

pub struct SecurityConfig;

impl SecurityConfig {
    pub fn create_token(config: &AppConfig, user_id: Uuid, role: Role) -> Result<String, ApiError> {
        let now = Utc::now();

        let claims = Claims {
            sub: user_id.to_string(),
            role,
            iat: now.timestamp(),
            exp: (now + Duration::hours(config.jwt.jwt_expiration_hours)).timestamp(),
            iss: config.jwt.jwt_issuer.clone(),
            aud: config.jwt.jwt_audience.clone(),
            jti: Uuid::new_v4().to_string(),
        };

        let mut header = Header::new(Algorithm::HS256);
        header.typ = Some("JWT".to_string());

        encode(
            &header,
            &claims,
            &EncodingKey::from_secret(config.jwt.jwt_secret.expose_secret().as_bytes()),
        )
        .map_err(|e| {
            error!("JWT encoding error: {}", e);
            ApiError::Auth("Token creation failed".into())
        })
    }

    fn extract_bearer_token(headers: &HeaderMap) -> Result<String, ApiError> {
        let auth_header = headers
            .get("Authorization")
            .ok_or_else(|| ApiError::Auth("Missing Authorization header".into()))?
            .to_str()
            .map_err(|_| ApiError::Auth("Invalid Authorization header".into()))?;

        let token = auth_header
            .strip_prefix("Bearer ")
            .ok_or_else(|| ApiError::Auth("Invalid Authorization header".into()))?
            .trim();

        if token.is_empty() {
            return Err(ApiError::Auth("Invalid Authorization header".into()));
        }

        Ok(token.to_string())
    }

    pub fn verify_token(config: &AppConfig, token: &str) -> Result<Claims, ApiError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[config.jwt.jwt_issuer.as_str()]);
        validation.set_audience(&[config.jwt.jwt_audience.as_str()]);
        validation.validate_exp = true;

        decode::<Claims>(
            token,
            &DecodingKey::from_secret(config.jwt.jwt_secret.expose_secret().as_bytes()),
            &validation,
        )
        .map(|data| data.claims)
        .map_err(|_| ApiError::Auth("Invalid or expired token".into()))
    }
}

pub async fn auth_middleware(
    State(state): State<Arc<AppState>>,
    mut req: Request<axum::body::Body>,
    next: Next,
) -> Result<Response, Response> {
    let token = SecurityConfig::extract_bearer_token(req.headers())
        .map_err(|e| e.into_response())?;

    let claims = SecurityConfig::verify_token(&state.config, &token)
        .map_err(|e| e.into_response())?;

    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use counseldesk_primitives::models::app_config::JwtConfig;
    use secrecy::SecretString;

    fn test_config() -> AppConfig {
        AppConfig {
            jwt: JwtConfig {
                jwt_secret: SecretString::from(
                    "test_secret_key_minimum_32_characters_long_for_testing",
                ),
                jwt_expiration_hours: 2,
                jwt_issuer: "counseldesk".to_string(),
                jwt_audience: "counseldesk_api".to_string(),
            },
            app_url: "http://localhost:8080".to_string(),
        }
    }

    #[test]
    fn token_round_trip_preserves_identity_and_role() {
        let config = test_config();
        let user_id = Uuid::new_v4();

        let token = SecurityConfig::create_token(&config, user_id, Role::SuperAdmin).unwrap();
        let claims = SecurityConfig::verify_token(&config, &token).unwrap();

        assert_eq!(claims.user_id().unwrap(), user_id);
        assert_eq!(claims.role, Role::SuperAdmin);
        assert!(claims.require_super_admin().is_ok());
    }

    #[test]
    fn role_checks_reject_insufficient_roles() {
        let config = test_config();
        let token =
            SecurityConfig::create_token(&config, Uuid::new_v4(), Role::OfficeAdmin).unwrap();
        let claims = SecurityConfig::verify_token(&config, &token).unwrap();

        assert!(claims.require_admin().is_ok());
        assert!(claims.require_super_admin().is_err());
    }
}
