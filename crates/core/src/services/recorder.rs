use chrono::{DateTime, Utc};
use diesel::PgConnection;
use uuid::Uuid;

use crate::repositories::audit_repository::AuditStore;
use counseldesk_primitives::error::ApiError;
use counseldesk_primitives::models::entities::{
    NewAuditLog, NewOfficeLoginLog, NewStudentActivityLog, NewSuperAdminActivityLog,
    RelatedRecord, Role, User, DEFAULT_RETENTION_DAYS, SUPER_ADMIN_RETENTION_DAYS,
};

/// The authenticated identity performing a mutation, passed explicitly into
/// every recorder call instead of being read from ambient request state.
#[derive(Debug, Clone)]
pub struct Actor {
    pub id: Uuid,
    pub role: Role,
    pub display_name: String,
}

impl Actor {
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id,
            role: Role::parse(&user.role).unwrap_or(Role::Student),
            display_name: user.full_name(),
        }
    }
}

/// Request provenance. Both fields are optional; a missing IP or user agent
/// is stored as NULL, never an error.
#[derive(Debug, Clone, Default)]
pub struct RequestMeta {
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

/// Write-path facade over the audit store. Every method stages a record in
/// the caller's connection; committing is the caller's job so the log entry
/// and the business mutation it documents are atomic.
pub struct ActivityRecorder;

impl ActivityRecorder {
    pub fn audit(
        conn: &mut PgConnection,
        actor: Option<&Actor>,
        action: &str,
        target_type: &str,
        inquiry_id: Option<Uuid>,
        office_id: Option<Uuid>,
        status_snapshot: Option<&str>,
        meta: &RequestMeta,
    ) -> Result<i64, ApiError> {
        AuditStore::append_audit(
            conn,
            NewAuditLog {
                actor_id: actor.map(|a| a.id),
                actor_role: actor.map(|a| a.role.as_str().to_string()),
                action: action.to_string(),
                target_type: Some(target_type.to_string()),
                inquiry_id,
                office_id,
                status_snapshot: status_snapshot.map(str::to_string),
                is_success: true,
                failure_reason: None,
                ip_address: meta.ip_address.clone(),
                user_agent: meta.user_agent.clone(),
                retention_days: DEFAULT_RETENTION_DAYS,
            },
        )
    }

    pub fn super_admin_action(
        conn: &mut PgConnection,
        actor: &Actor,
        action: &str,
        target_type: &str,
        target_user_id: Option<Uuid>,
        target_office_id: Option<Uuid>,
        details: Option<String>,
        meta: &RequestMeta,
    ) -> Result<i64, ApiError> {
        AuditStore::append_super_admin_activity(
            conn,
            NewSuperAdminActivityLog {
                super_admin_id: Some(actor.id),
                action: action.to_string(),
                target_type: Some(target_type.to_string()),
                target_user_id,
                target_office_id,
                details,
                is_success: true,
                failure_reason: None,
                ip_address: meta.ip_address.clone(),
                user_agent: meta.user_agent.clone(),
                retention_days: SUPER_ADMIN_RETENTION_DAYS,
            },
        )
    }

    pub fn student_activity(
        conn: &mut PgConnection,
        student_id: Uuid,
        action: &str,
        related: Option<RelatedRecord>,
        meta: &RequestMeta,
    ) -> Result<i64, ApiError> {
        AuditStore::append_student_activity(
            conn,
            NewStudentActivityLog {
                student_id,
                action: action.to_string(),
                related_id: related.map(|r| r.id()),
                related_type: related.map(|r| r.kind().to_string()),
                is_success: true,
                failure_reason: None,
                ip_address: meta.ip_address.clone(),
                user_agent: meta.user_agent.clone(),
                retention_days: DEFAULT_RETENTION_DAYS,
            },
        )
    }

    /// Opens an office session record; `login_time` is assigned by the store.
    /// Invoked by the session layer when an office admin signs in.
    pub fn office_login(
        conn: &mut PgConnection,
        office_admin_id: Uuid,
        meta: &RequestMeta,
    ) -> Result<i64, ApiError> {
        AuditStore::append_office_login(
            conn,
            NewOfficeLoginLog {
                office_admin_id,
                is_success: true,
                failure_reason: None,
                ip_address: meta.ip_address.clone(),
                user_agent: meta.user_agent.clone(),
                retention_days: DEFAULT_RETENTION_DAYS,
            },
        )
    }

    /// Closes an office session record; one-shot per record.
    pub fn office_logout(
        conn: &mut PgConnection,
        log_id: i64,
        logout_time: DateTime<Utc>,
    ) -> Result<bool, ApiError> {
        AuditStore::record_logout(conn, log_id, logout_time)
    }
}
