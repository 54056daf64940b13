use axum::{
    extract::{Extension, State},
    Json,
};
use counseldesk_core::repositories::OfficeRepository;
use counseldesk_core::{AppState, Claims};
use counseldesk_primitives::error::ApiError;
use counseldesk_primitives::models::dtos::admin_dto::OfficeSummary;
use std::sync::Arc;

#[utoipa::path(
    get,
    path = "/api/offices",
    responses(
        (status = 200, description = "All offices, alphabetical", body = [OfficeSummary]),
        (status = 403, description = "Caller is a student"),
    ),
    security(("bearerAuth" = [])),
    tag = "Offices"
)]
pub async fn all_offices(
    State(state): State<Arc<AppState>>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Vec<OfficeSummary>>, ApiError> {
    claims.require_admin()?;
    let mut conn = state.conn()?;
    let offices = OfficeRepository::list(&mut conn)?
        .into_iter()
        .map(|office| OfficeSummary {
            id: office.id,
            name: office.name,
        })
        .collect();
    Ok(Json(offices))
}
