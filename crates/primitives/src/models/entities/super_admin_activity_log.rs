use crate::schema::super_admin_activity_logs;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Super-admin activity trail. All account references are weak: deleting the
/// acting admin or the target nulls the column, the record stays.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Serialize, Deserialize)]
#[diesel(table_name = super_admin_activity_logs)]
pub struct SuperAdminActivityLog {
    pub id: i64,
    pub super_admin_id: Option<Uuid>,
    pub action: String,
    pub target_type: Option<String>,
    pub target_user_id: Option<Uuid>,
    pub target_office_id: Option<Uuid>,
    pub details: Option<String>,
    pub is_success: bool,
    pub failure_reason: Option<String>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub retention_days: i32,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = super_admin_activity_logs)]
pub struct NewSuperAdminActivityLog {
    pub super_admin_id: Option<Uuid>,
    pub action: String,
    pub target_type: Option<String>,
    pub target_user_id: Option<Uuid>,
    pub target_office_id: Option<Uuid>,
    pub details: Option<String>,
    pub is_success: bool,
    pub failure_reason: Option<String>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub retention_days: i32,
}
