use crate::models::dtos::stats_dto::AggregateStats;
use serde::Serialize;
use uuid::Uuid;

/// What happened to an office assignment, distinguished by whether a prior
/// assignment existed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AssignmentAction {
    Assign,
    Reassign,
    Remove,
}

/// Events pushed to dashboard rooms after a transaction commits. The wire
/// shape is `{"event": <name>, "data": {...}}`; payloads are flat, with
/// string timestamps (`YYYY-MM-DD HH:MM:SS`) and pre-resolved display names
/// so subscribers never need a follow-up fetch.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum RealtimeEvent {
    AdminAdded {
        user_id: Uuid,
        name: String,
        email: String,
        role: String,
        created_by: String,
        timestamp: String,
    },
    AdminUpdated {
        user_id: Uuid,
        name: String,
        field_updated: String,
        new_value: String,
        updated_by: String,
        timestamp: String,
    },
    AdminDeleted {
        user_id: Uuid,
        name: String,
        deleted_by: String,
        timestamp: String,
    },
    OfficeAdminRemoved {
        admin_id: Uuid,
        admin_name: String,
        office_id: Uuid,
        office_name: String,
        removed_by: String,
        timestamp: String,
    },
    AdminOfficeAssignment {
        admin_id: Uuid,
        admin_name: String,
        office_id: Option<Uuid>,
        office_name: Option<String>,
        old_office_name: Option<String>,
        assigned_by: String,
        action: AssignmentAction,
        timestamp: String,
    },
    AdminPasswordReset {
        admin_id: Uuid,
        admin_name: String,
        reset_by: String,
        timestamp: String,
    },
    DashboardStatsUpdate(AggregateStats),
    ConnectionSuccess {
        status: String,
        user: String,
        role: String,
    },
}

impl RealtimeEvent {
    /// Wire name of the event, matching the serde tag.
    pub fn name(&self) -> &'static str {
        match self {
            RealtimeEvent::AdminAdded { .. } => "admin_added",
            RealtimeEvent::AdminUpdated { .. } => "admin_updated",
            RealtimeEvent::AdminDeleted { .. } => "admin_deleted",
            RealtimeEvent::OfficeAdminRemoved { .. } => "office_admin_removed",
            RealtimeEvent::AdminOfficeAssignment { .. } => "admin_office_assignment",
            RealtimeEvent::AdminPasswordReset { .. } => "admin_password_reset",
            RealtimeEvent::DashboardStatsUpdate(_) => "dashboard_stats_update",
            RealtimeEvent::ConnectionSuccess { .. } => "connection_success",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn events_serialize_with_tagged_wire_names() {
        let event = RealtimeEvent::AdminDeleted {
            user_id: Uuid::new_v4(),
            name: "Jane Doe".into(),
            deleted_by: "Root Admin".into(),
            timestamp: "2025-01-01 00:00:00".into(),
        };
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["event"], "admin_deleted");
        assert_eq!(value["data"]["name"], "Jane Doe");
        assert_eq!(event.name(), "admin_deleted");
    }

    #[test]
    fn assignment_action_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&AssignmentAction::Reassign).unwrap(),
            "\"reassign\""
        );
    }

    #[test]
    fn stats_update_flattens_the_stats_payload() {
        let event = RealtimeEvent::DashboardStatsUpdate(AggregateStats {
            active_users: 3,
            pending_inquiries: 1,
            upcoming_sessions: 0,
            unassigned_admins: 2,
            office_activity: vec![],
            timestamp: "2025-01-01 00:00:00".into(),
        });
        let value = serde_json::to_value(&event).unwrap();
        assert_eq!(value["event"], "dashboard_stats_update");
        assert_eq!(value["data"]["active_users"], 3);
    }
}
