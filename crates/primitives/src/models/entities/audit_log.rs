use crate::schema::audit_logs;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default retention policy for log records, in days. Retention is policy
/// only; no sweep job runs in this deployment.
pub const DEFAULT_RETENTION_DAYS: i32 = 365;
/// Super-admin activity records are kept twice as long.
pub const SUPER_ADMIN_RETENTION_DAYS: i32 = 730;

/// Generic audit trail entry. `actor_id` is a weak reference: deleting the
/// account nulls it, the row itself survives. `actor_role` is a snapshot
/// taken at the time of the action, not a join against the user's current
/// role. `id` and `timestamp` are assigned by the store and never change.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Serialize, Deserialize)]
#[diesel(table_name = audit_logs)]
pub struct AuditLog {
    pub id: i64,
    pub actor_id: Option<Uuid>,
    pub actor_role: Option<String>,
    pub action: String,
    pub target_type: Option<String>,
    pub inquiry_id: Option<Uuid>,
    pub office_id: Option<Uuid>,
    pub status_snapshot: Option<String>,
    pub is_success: bool,
    pub failure_reason: Option<String>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub retention_days: i32,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = audit_logs)]
pub struct NewAuditLog {
    pub actor_id: Option<Uuid>,
    pub actor_role: Option<String>,
    pub action: String,
    pub target_type: Option<String>,
    pub inquiry_id: Option<Uuid>,
    pub office_id: Option<Uuid>,
    pub status_snapshot: Option<String>,
    pub is_success: bool,
    pub failure_reason: Option<String>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub retention_days: i32,
}
