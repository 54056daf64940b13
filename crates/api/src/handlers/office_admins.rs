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
    path = "/api/offices/{office_id}/admins",
    params(("office_id" = Uuid, Path, description = "Office id")),
    responses(
        (status = 200, description = "Admins assigned to the office", body = [AdminSummary]),
        (status = 404, description = "Office not found"),
    ),
    security(("bearerAuth" = [])),
    tag = "Offices"
)]
pub async fn office_admins(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Path(office_id): Path<Uuid>,
) -> Result<Json<Vec<AdminSummary>>, ApiError> {
    claims.require_super_admin()?;
    let roster = AdminService::office_roster(&state, office_id)?;
    Ok(Json(roster))
}
