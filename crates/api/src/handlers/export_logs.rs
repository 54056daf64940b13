use axum::{
    extract::{Extension, Query, State},
    http::{header, HeaderMap, HeaderValue},
    response::IntoResponse,
};
use counseldesk_core::services::ExportService;
use counseldesk_core::{AppState, Claims};
use counseldesk_primitives::error::ApiError;
use counseldesk_primitives::models::dtos::log_dto::{ExportParams, LogFilter};
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/api/logs/export",
    params(
        ("format" = String, Query, description = "csv, xlsx, or pdf"),
        ("type" = Option<String>, Query, description = "all, student, office, or superadmin"),
        ("search" = Option<String>, Query, description = "Case-insensitive name, email, or action match"),
        ("date_from" = Option<String>, Query, description = "Inclusive start date, YYYY-MM-DD"),
        ("date_to" = Option<String>, Query, description = "Inclusive end date, YYYY-MM-DD"),
    ),
    responses(
        (status = 200, description = "Download of the full filtered set"),
        (status = 400, description = "Unknown export format"),
        (status = 403, description = "Caller is not a super admin"),
    ),
    security(("bearerAuth" = [])),
    tag = "Logs"
)]
pub async fn export_logs(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
    Query(params): Query<ExportParams>,
) -> Result<impl IntoResponse, ApiError> {
    claims.require_super_admin()?;

    let filter = LogFilter {
        search: params.search.clone(),
        date_from: params.date_from,
        date_to: params.date_to,
    };
    let (bytes, filename, content_type) =
        ExportService::export(&state, params.log_type, params.format, &filter)?;

    let mut headers = HeaderMap::new();
    headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static(content_type),
    );
    headers.insert(
        header::CONTENT_DISPOSITION,
        HeaderValue::from_str(&format!("attachment; filename=\"{filename}\""))
            .map_err(|e| ApiError::Internal(format!("Invalid export filename: {e}")))?,
    );

    Ok((headers, bytes))
}
