use axum::{
    extract::{Extension, State},
    Json,
};
use counseldesk_core::services::AdminService;
use counseldesk_core::{AppState, Claims};
use counseldesk_primitives::error::ApiError;
use counseldesk_primitives::models::dtos::stats_dto::DashboardStatsResponse;
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/api/dashboard/stats",
    responses(
        (status = 200, description = "Fresh aggregates plus recent activity", body = DashboardStatsResponse),
        (status = 403, description = "Caller is not a super admin"),
    ),
    security(("bearerAuth" = [])),
    tag = "Dashboard"
)]
pub async fn dashboard_stats(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<DashboardStatsResponse>, ApiError> {
    claims.require_super_admin()?;
    let response = AdminService::dashboard_stats(&state)?;
    Ok(Json(response))
}
