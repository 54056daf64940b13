use axum::{
    extract::{Extension, Path, State},
    http::HeaderMap,
    Json,
};
use counseldesk_core::services::AdminService;
use counseldesk_core::{AppState, Claims};
use counseldesk_primitives::error::ApiError;
use counseldesk_primitives::models::dtos::admin_dto::ResetPasswordResponse;
use std::sync::Arc;
use uuid::Uuid;

#[utoipa::path(
    post,
    path = "/api/admins/{admin_id}/reset_password",
    params(("admin_id" = Uuid, Path, description = "Office admin user id")),
    responses(
        (status = 200, description = "Password reset, new password in body", body = ResetPasswordResponse),
        (status = 404, description = "Admin not found"),
    ),
    security(("bearerAuth" = [])),
    tag = "Admins"
)]
pub async fn reset_admin_password(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(admin_id): Path<Uuid>,
    headers: HeaderMap,
) -> Result<Json<ResetPasswordResponse>, ApiError> {
    claims.require_super_admin()?;
    let actor = super::load_actor(&state, &claims)?;
    let meta = super::request_meta(&headers);

    let response = AdminService::reset_admin_password(&state, &actor, &meta, admin_id).await?;
    Ok(Json(response))
}
