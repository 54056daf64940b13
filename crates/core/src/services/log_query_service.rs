use serde_json::Value;

use crate::app_state::AppState;
use crate::repositories::AuditStore;
use counseldesk_primitives::error::ApiError;
use counseldesk_primitives::models::dtos::log_dto::{
    AuditLogRow, LogFilter, LogKind, LogPage, OfficeLogRow, StudentLogRow, SuperAdminLogRow,
};
use counseldesk_primitives::models::entities::{
    AuditLog, Office, OfficeAdmin, OfficeLoginLog, Student, StudentActivityLog,
    SuperAdminActivityLog, User,
};
use counseldesk_primitives::utility::format_timestamp;

/// Read-only views over the four log tables. Rows come back newest-first and
/// display-ready: names denormalized, timestamps formatted.
pub struct LogQueryService;

impl LogQueryService {
    /// One page of whichever log kind the caller asked for, serialized into
    /// a uniform response shape.
    pub fn query(
        state: &AppState,
        kind: LogKind,
        filter: &LogFilter,
        page: i64,
    ) -> Result<Value, ApiError> {
        let mut conn = state.conn()?;
        let body = match kind {
            LogKind::All => {
                let rows = AuditStore::audit_page(&mut conn, filter, page)?;
                page_json(kind, LogPage::new(Self::audit_rows(rows), page))
            }
            LogKind::Student => {
                let rows = AuditStore::student_page(&mut conn, filter, page)?;
                page_json(kind, LogPage::new(Self::student_rows(rows), page))
            }
            LogKind::Office => {
                let rows = AuditStore::office_page(&mut conn, filter, page)?;
                page_json(kind, LogPage::new(Self::office_rows(rows), page))
            }
            LogKind::Superadmin => {
                let rows = AuditStore::super_admin_page(&mut conn, filter, page)?;
                page_json(kind, LogPage::new(Self::super_admin_rows(rows), page))
            }
        }?;
        Ok(body)
    }

    pub fn audit_rows(rows: Vec<(AuditLog, Option<User>)>) -> Vec<AuditLogRow> {
        rows.into_iter()
            .map(|(log, user)| AuditLogRow {
                id: log.id,
                user_name: user
                    .as_ref()
                    .map(|u| u.full_name())
                    .unwrap_or_else(|| "System".to_string()),
                user_email: user.as_ref().map(|u| u.email.clone()),
                user_role: log.actor_role,
                action: log.action,
                target_type: log.target_type,
                is_success: log.is_success,
                timestamp: format_timestamp(&log.timestamp),
                ip_address: log.ip_address,
            })
            .collect()
    }

    pub fn student_rows(rows: Vec<(StudentActivityLog, Student, User)>) -> Vec<StudentLogRow> {
        rows.into_iter()
            .map(|(log, _student, user)| StudentLogRow {
                id: log.id,
                student_name: user.full_name(),
                student_email: user.email,
                action: log.action,
                related_type: log.related_type,
                is_success: log.is_success,
                timestamp: format_timestamp(&log.timestamp),
                ip_address: log.ip_address,
            })
            .collect()
    }

    pub fn office_rows(
        rows: Vec<(OfficeLoginLog, OfficeAdmin, User, Office)>,
    ) -> Vec<OfficeLogRow> {
        rows.into_iter()
            .map(|(log, _assignment, user, office)| OfficeLogRow {
                id: log.id,
                admin_name: user.full_name(),
                admin_email: user.email,
                office_name: office.name,
                login_time: format_timestamp(&log.login_time),
                logout_time: log.logout_time.as_ref().map(format_timestamp),
                session_duration: log.session_duration,
                is_success: log.is_success,
                ip_address: log.ip_address,
            })
            .collect()
    }

    pub fn super_admin_rows(
        rows: Vec<(SuperAdminActivityLog, Option<User>)>,
    ) -> Vec<SuperAdminLogRow> {
        rows.into_iter()
            .map(|(log, admin)| SuperAdminLogRow {
                id: log.id,
                admin_name: admin
                    .as_ref()
                    .map(|a| a.full_name())
                    .unwrap_or_else(|| "Unknown Admin".to_string()),
                admin_email: admin.map(|a| a.email),
                action: log.action,
                target_type: log.target_type,
                details: log.details,
                is_success: log.is_success,
                timestamp: format_timestamp(&log.timestamp),
                ip_address: log.ip_address,
            })
            .collect()
    }
}

fn page_json<T: serde::Serialize>(kind: LogKind, page: LogPage<T>) -> Result<Value, ApiError> {
    let mut body = serde_json::to_value(&page)
        .map_err(|e| ApiError::Internal(format!("Failed to serialize log page: {e}")))?;
    if let Value::Object(map) = &mut body {
        map.insert("success".to_string(), Value::Bool(true));
        map.insert(
            "filter_type".to_string(),
            Value::String(kind.as_str().to_string()),
        );
    }
    Ok(body)
}
