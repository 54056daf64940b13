use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

/// Dashboard counters, recomputed from the entity tables every time they are
/// pushed or fetched. Nothing here is ever cached.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct AggregateStats {
    pub active_users: i64,
    pub pending_inquiries: i64,
    pub upcoming_sessions: i64,
    pub unassigned_admins: i64,
    pub office_activity: Vec<OfficeActivity>,
    pub timestamp: String,
}

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct OfficeActivity {
    pub office_id: Uuid,
    pub office_name: String,
    pub inquiries_count: i64,
    pub sessions_count: i64,
}

/// Recent super-admin activity shown on the dashboard, denormalized so the
/// client needs no follow-up fetch.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct RecentActivity {
    pub admin_name: String,
    pub action: String,
    pub target_type: Option<String>,
    pub details: Option<String>,
    pub timestamp: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct DashboardStatsResponse {
    pub success: bool,
    pub stats: AggregateStats,
    pub recent_activities: Vec<RecentActivity>,
}
