use axum::{
    extract::{Extension, State},
    http::{HeaderMap, StatusCode},
    Json,
};
use counseldesk_core::services::AdminService;
use counseldesk_core::{AppState, Claims};
use counseldesk_primitives::error::ApiError;
use counseldesk_primitives::models::dtos::admin_dto::{AddAdminRequest, MessageResponse};
use std::sync::Arc;

#[utoipa::path(
    post,
    path = "/api/admins",
    request_body = AddAdminRequest,
    responses(
        (status = 201, description = "Office admin created", body = MessageResponse),
        (status = 400, description = "Validation failure or duplicate email"),
        (status = 403, description = "Caller is not a super admin"),
    ),
    security(("bearerAuth" = [])),
    tag = "Admins"
)]
pub async fn add_admin(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    headers: HeaderMap,
    Json(request): Json<AddAdminRequest>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    claims.require_super_admin()?;
    let actor = super::load_actor(&state, &claims)?;
    let meta = super::request_meta(&headers);

    let response = AdminService::add_admin(&state, &actor, &meta, request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}
