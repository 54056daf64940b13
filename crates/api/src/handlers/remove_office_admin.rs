use axum::{
    extract::{Extension, Path, State},
    http::HeaderMap,
    Json,
};
use counseldesk_core::services::AdminService;
use counseldesk_core::{AppState, Claims};
use counseldesk_primitives::error::ApiError;
use counseldesk_primitives::models::dtos::admin_dto::MessageResponse;
use std::sync::Arc;
use uuid::Uuid;

#[utoipa::path(
    delete,
    path = "/api/offices/{office_id}/admins/{admin_id}",
    params(
        ("office_id" = Uuid, Path, description = "Office id"),
        ("admin_id" = Uuid, Path, description = "Office admin user id"),
    ),
    responses(
        (status = 200, description = "Admin detached from the office", body = MessageResponse),
        (status = 404, description = "Office, admin, or association not found"),
    ),
    security(("bearerAuth" = [])),
    tag = "Offices"
)]
pub async fn remove_office_admin(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path((office_id, admin_id)): Path<(Uuid, Uuid)>,
    headers: HeaderMap,
) -> Result<Json<MessageResponse>, ApiError> {
    claims.require_super_admin()?;
    let actor = super::load_actor(&state, &claims)?;
    let meta = super::request_meta(&headers);

    let response =
        AdminService::remove_office_admin(&state, &actor, &meta, office_id, admin_id).await?;
    Ok(Json(response))
}
