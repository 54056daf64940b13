use crate::schema::office_login_logs;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Office-admin session record. `login_time` is assigned at creation and
/// immutable; `logout_time` and `session_duration` transition from null to
/// set exactly once, when the logout is recorded. The row cascade-deletes
/// with its office-admin assignment.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Serialize, Deserialize)]
#[diesel(table_name = office_login_logs)]
pub struct OfficeLoginLog {
    pub id: i64,
    pub office_admin_id: Uuid,
    pub login_time: DateTime<Utc>,
    pub logout_time: Option<DateTime<Utc>>,
    pub session_duration: Option<i32>,
    pub is_success: bool,
    pub failure_reason: Option<String>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub retention_days: i32,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = office_login_logs)]
pub struct NewOfficeLoginLog {
    pub office_admin_id: Uuid,
    pub is_success: bool,
    pub failure_reason: Option<String>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub retention_days: i32,
}
