use crate::schema::{counseling_sessions, inquiries};
use chrono::{DateTime, Utc};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Serialize, Deserialize)]
#[diesel(table_name = inquiries)]
pub struct Inquiry {
    pub id: Uuid,
    pub student_id: Uuid,
    pub office_id: Uuid,
    pub subject: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Serialize, Deserialize)]
#[diesel(table_name = counseling_sessions)]
pub struct CounselingSession {
    pub id: Uuid,
    pub student_id: Uuid,
    pub office_id: Uuid,
    pub counselor_id: Uuid,
    pub scheduled_at: DateTime<Utc>,
    pub status: String,
    pub notes: Option<String>,
}
