use crate::handlers::{
    activity_logs::__path_activity_logs, add_admin::__path_add_admin,
    all_offices::__path_all_offices, dashboard_stats::__path_dashboard_stats,
    delete_admin::__path_delete_admin, export_logs::__path_export_logs,
    get_admin::__path_get_admin, health::__path_health_check,
    office_admins::__path_office_admins, remove_office_admin::__path_remove_office_admin,
    reset_password::__path_reset_admin_password, update_admin::__path_update_admin,
};
use counseldesk_primitives::models::dtos::admin_dto::{
    AddAdminRequest, AdminSummary, HealthStatus, MessageResponse, OfficeSummary,
    ResetPasswordResponse, UpdateAdminRequest,
};
use counseldesk_primitives::models::dtos::stats_dto::{
    AggregateStats, DashboardStatsResponse, OfficeActivity, RecentActivity,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

#[derive(OpenApi)]
#[openapi(
    paths(
        health_check, add_admin, get_admin, update_admin, delete_admin,
        reset_admin_password, all_offices, office_admins, remove_office_admin,
        activity_logs, export_logs, dashboard_stats
    ),
    components(schemas(
        AddAdminRequest, UpdateAdminRequest, MessageResponse, ResetPasswordResponse,
        AdminSummary, OfficeSummary, HealthStatus, DashboardStatsResponse,
        AggregateStats, OfficeActivity, RecentActivity
    )),
    modifiers(&SecurityAddon),
    tags(
        (name = "Admins", description = "Office admin account management"),
        (name = "Offices", description = "Office rosters and assignments"),
        (name = "Logs", description = "Activity log queries and exports"),
        (name = "Dashboard", description = "Realtime dashboard aggregates"),
        (name = "Health", description = "Service health")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.security_schemes.insert(
                "bearerAuth".to_string(),
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
