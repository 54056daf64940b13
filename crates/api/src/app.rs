use crate::config::swagger_config::ApiDoc;
use crate::handlers::{
    activity_logs::activity_logs, add_admin::add_admin, all_offices::all_offices,
    dashboard_stats::dashboard_stats, delete_admin::delete_admin, export_logs::export_logs,
    get_admin::get_admin, health::health_check, office_admins::office_admins,
    remove_office_admin::remove_office_admin, reset_password::reset_admin_password,
    update_admin::update_admin, websocket::websocket,
};
use axum::{middleware, routing::get, Router};
use axum_prometheus::{metrics_exporter_prometheus::PrometheusHandle, PrometheusMetricLayer};
use counseldesk_core::{auth_middleware, AppState};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{MakeRequestUuid, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub fn create_router(
    state: Arc<AppState>,
    metric_layer: PrometheusMetricLayer<'static>,
    metric_handle: PrometheusHandle,
) -> Router {
    let public_router = create_public_routers();
    let protected_router = create_secured_routers(&state);

    Router::new()
        .merge(public_router)
        .merge(protected_router)
        .route(
            "/metrics",
            get(move || async move { metric_handle.render() }),
        )
        .layer(axum::extract::DefaultBodyLimit::max(2 * 1024 * 1024))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http()),
        )
        .layer(metric_layer)
        .with_state(state)
}

fn create_secured_routers(state: &Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/api/admins", axum::routing::post(add_admin))
        .route(
            "/api/admins/{admin_id}",
            axum::routing::get(get_admin)
                .put(update_admin)
                .delete(delete_admin),
        )
        .route(
            "/api/admins/{admin_id}/reset_password",
            axum::routing::post(reset_admin_password),
        )
        .route("/api/offices", axum::routing::get(all_offices))
        .route(
            "/api/offices/{office_id}/admins",
            axum::routing::get(office_admins),
        )
        .route(
            "/api/offices/{office_id}/admins/{admin_id}",
            axum::routing::delete(remove_office_admin),
        )
        .route("/api/logs", axum::routing::get(activity_logs))
        .route("/api/logs/export", axum::routing::get(export_logs))
        .route("/api/dashboard/stats", axum::routing::get(dashboard_stats))
        .route("/api/ws", axum::routing::get(websocket))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ))
}

fn create_public_routers() -> Router<Arc<AppState>> {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/api/health", get(health_check))
}
