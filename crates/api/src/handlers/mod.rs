pub mod activity_logs;
pub mod add_admin;
pub mod all_offices;
pub mod dashboard_stats;
pub mod delete_admin;
pub mod export_logs;
pub mod get_admin;
pub mod health;
pub mod office_admins;
pub mod remove_office_admin;
pub mod reset_password;
pub mod update_admin;
pub mod websocket;

use axum::http::header::USER_AGENT;
use axum::http::HeaderMap;
use counseldesk_core::repositories::UserRepository;
use counseldesk_core::services::Actor;
use counseldesk_core::{AppState, Claims};
use counseldesk_primitives::error::ApiError;
use counseldesk_core::services::RequestMeta;

/// Request provenance for the activity trail. The service runs behind a
/// reverse proxy, so the client address comes from `x-forwarded-for`.
pub(crate) fn request_meta(headers: &HeaderMap) -> RequestMeta {
    let ip_address = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());
    let user_agent = headers
        .get(USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    RequestMeta {
        ip_address,
        user_agent,
    }
}

/// Resolves the token subject to a live account. A token whose user no
/// longer exists is rejected rather than attributed to nobody.
pub(crate) fn load_actor(state: &AppState, claims: &Claims) -> Result<Actor, ApiError> {
    let mut conn = state.conn()?;
    let user = UserRepository::find(&mut conn, claims.user_id()?)?
        .ok_or_else(|| ApiError::Auth("Account no longer exists".to_string()))?;
    Ok(Actor::from_user(&user))
}
