use crate::schema::student_activity_logs;
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Tagged reference to the record a student action touched. Replaces the
/// loose `related_type`/`related_id` column pair at the API boundary so an
/// unknown type tag cannot be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum RelatedRecord {
    Inquiry(Uuid),
    CounselingSession(Uuid),
}

impl RelatedRecord {
    pub fn kind(&self) -> &'static str {
        match self {
            RelatedRecord::Inquiry(_) => "inquiry",
            RelatedRecord::CounselingSession(_) => "counseling_session",
        }
    }

    pub fn id(&self) -> Uuid {
        match self {
            RelatedRecord::Inquiry(id) | RelatedRecord::CounselingSession(id) => *id,
        }
    }

    /// Rebuild the tagged reference from the raw columns. Rows written
    /// before the type tags were fixed may carry an unknown tag; those
    /// resolve to `None` rather than an error.
    pub fn from_columns(related_type: Option<&str>, related_id: Option<Uuid>) -> Option<Self> {
        match (related_type, related_id) {
            (Some("inquiry"), Some(id)) => Some(RelatedRecord::Inquiry(id)),
            (Some("counseling_session"), Some(id)) => Some(RelatedRecord::CounselingSession(id)),
            _ => None,
        }
    }
}

/// Student activity trail. Unlike the other log kinds this one is owned by
/// the student row and cascade-deletes with it.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Serialize, Deserialize)]
#[diesel(table_name = student_activity_logs)]
pub struct StudentActivityLog {
    pub id: i64,
    pub student_id: Uuid,
    pub action: String,
    pub related_id: Option<Uuid>,
    pub related_type: Option<String>,
    pub is_success: bool,
    pub failure_reason: Option<String>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub timestamp: DateTime<Utc>,
    pub retention_days: i32,
}

impl StudentActivityLog {
    pub fn related(&self) -> Option<RelatedRecord> {
        RelatedRecord::from_columns(self.related_type.as_deref(), self.related_id)
    }
}

#[derive(Debug, Insertable)]
#[diesel(table_name = student_activity_logs)]
pub struct NewStudentActivityLog {
    pub student_id: Uuid,
    pub action: String,
    pub related_id: Option<Uuid>,
    pub related_type: Option<String>,
    pub is_success: bool,
    pub failure_reason: Option<String>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub retention_days: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn related_record_round_trips() {
        let id = Uuid::new_v4();
        let related = RelatedRecord::Inquiry(id);
        assert_eq!(related.kind(), "inquiry");
        assert_eq!(related.id(), id);
        assert_eq!(
            RelatedRecord::from_columns(Some("inquiry"), Some(id)),
            Some(related)
        );
    }

    #[test]
    fn unknown_type_tag_resolves_to_none() {
        let id = Uuid::new_v4();
        assert_eq!(RelatedRecord::from_columns(Some("announcement"), Some(id)), None);
        assert_eq!(RelatedRecord::from_columns(Some("inquiry"), None), None);
        assert_eq!(RelatedRecord::from_columns(None, Some(id)), None);
    }
}
