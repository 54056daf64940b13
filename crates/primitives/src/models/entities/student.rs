use crate::schema::students;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Serialize, Deserialize)]
#[diesel(table_name = students)]
pub struct Student {
    pub id: Uuid,
    pub user_id: Uuid,
    pub student_number: Option<String>,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = students)]
pub struct NewStudent {
    pub id: Uuid,
    pub user_id: Uuid,
    pub student_number: Option<String>,
}
