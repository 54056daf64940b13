use axum::{
    extract::{Extension, Path, State},
    http::HeaderMap,
    Json,
};
use counseldesk_core::services::AdminService;
use counseldesk_core::{AppState, Claims};
use counseldesk_primitives::error::ApiError;
use counseldesk_primitives::models::dtos::admin_dto::{MessageResponse, UpdateAdminRequest};
use std::sync::Arc;
use uuid::Uuid;

#[utoipa::path(
    put,
    path = "/api/admins/{admin_id}",
    params(("admin_id" = Uuid, Path, description = "Office admin user id")),
    request_body = UpdateAdminRequest,
    responses(
        (status = 200, description = "Admin updated", body = MessageResponse),
        (status = 400, description = "Validation failure or duplicate email"),
        (status = 404, description = "Admin or office not found"),
    ),
    security(("bearerAuth" = [])),
    tag = "Admins"
)]
pub async fn update_admin(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(admin_id): Path<Uuid>,
    headers: HeaderMap,
    Json(request): Json<UpdateAdminRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    claims.require_super_admin()?;
    let actor = super::load_actor(&state, &claims)?;
    let meta = super::request_meta(&headers);

    let response = AdminService::update_admin(&state, &actor, &meta, admin_id, request).await?;
    Ok(Json(response))
}
