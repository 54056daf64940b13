use axum::{
    extract::{Extension, Query, State},
    Json,
};
use counseldesk_core::services::LogQueryService;
use counseldesk_core::{AppState, Claims};
use counseldesk_primitives::error::ApiError;
use counseldesk_primitives::models::dtos::log_dto::LogQueryParams;
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/api/logs",
    params(
        ("filter_type" = Option<String>, Query, description = "all, student, office, or superadmin"),
        ("search" = Option<String>, Query, description = "Case-insensitive name, email, or action match"),
        ("date_from" = Option<String>, Query, description = "Inclusive start date, YYYY-MM-DD"),
        ("date_to" = Option<String>, Query, description = "Inclusive end date, YYYY-MM-DD"),
        ("page" = Option<i64>, Query, description = "1-indexed page of 10 rows"),
    ),
    responses(
        (status = 200, description = "One page of log rows, newest first"),
        (status = 403, description = "Caller is not a super admin"),
    ),
    security(("bearerAuth" = [])),
    tag = "Logs"
)]
pub async fn activity_logs(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Query(params): Query<LogQueryParams>,
) -> Result<Json<serde_json::Value>, ApiError> {
    claims.require_super_admin()?;
    let body = LogQueryService::query(&state, params.filter_type, &params.filter(), params.page())?;
    Ok(Json(body))
}
