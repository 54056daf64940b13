use axum::{
    extract::{Extension, Path, State},
    Json,
};
use counseldesk_core::services::AdminService;
use counseldesk_core::{AppState, Claims};
use counseldesk_primitives::error::ApiError;
use counseldesk_primitives::models::dtos::admin_dto::AdminSummary;
use std::sync::Arc;
use uuid::Uuid;

#[utoipa::path(
    get,
    path = "/api/admins/{admin_id}",
    params(("admin_id" = Uuid, Path, description = "Office admin user id")),
    responses(
        (status = 200, description = "Admin details", body = AdminSummary),
        (status = 404, description = "Admin not found"),
    ),
    security(("bearerAuth" = [])),
    tag = "Admins"
)]
pub async fn get_admin(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(admin_id): Path<Uuid>,
) -> Result<Json<AdminSummary>, ApiError> {
    claims.require_super_admin()?;
    let summary = AdminService::admin_detail(&state, admin_id)?;
    Ok(Json(summary))
}
