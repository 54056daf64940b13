use crate::schema::{office_admins, offices};
use diesel::prelude::*;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Serialize, Deserialize)]
#[diesel(table_name = offices)]
pub struct Office {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub supports_video: bool,
}

/// Assignment of an office-admin user to an office. `user_id` carries a
/// unique constraint so concurrent assignment requests resolve to an upsert
/// instead of a check-then-insert race.
#[derive(Debug, Clone, Queryable, Selectable, Identifiable, Serialize, Deserialize)]
#[diesel(table_name = office_admins)]
pub struct OfficeAdmin {
    pub id: Uuid,
    pub user_id: Uuid,
    pub office_id: Uuid,
}

#[derive(Debug, Insertable)]
#[diesel(table_name = office_admins)]
pub struct NewOfficeAdmin {
    pub id: Uuid,
    pub user_id: Uuid,
    pub office_id: Uuid,
}
