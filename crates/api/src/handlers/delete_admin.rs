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
    path = "/api/admins/{admin_id}",
    params(("admin_id" = Uuid, Path, description = "Office admin user id")),
    responses(
        (status = 200, description = "Admin deleted", body = MessageResponse),
        (status = 404, description = "Admin not found"),
    ),
    security(("bearerAuth" = [])),
    tag = "Admins"
)]
pub async fn delete_admin(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(admin_id): Path<Uuid>,
    headers: HeaderMap,
) -> Result<Json<MessageResponse>, ApiError> {
    claims.require_super_admin()?;
    let actor = super::load_actor(&state, &claims)?;
    let meta = super::request_meta(&headers);

    let response = AdminService::delete_admin(&state, &actor, &meta, admin_id).await?;
    Ok(Json(response))
}
