use diesel::prelude::*;
use uuid::Uuid;

use counseldesk_primitives::error::ApiError;
use counseldesk_primitives::models::entities::{NewOfficeAdmin, Office, OfficeAdmin, User};
use counseldesk_primitives::schema::{office_admins, offices, users};

pub struct OfficeRepository;

impl OfficeRepository {
    pub fn find(conn: &mut PgConnection, id: Uuid) -> Result<Option<Office>, ApiError> {
        offices::table
            .find(id)
            .first(conn)
            .optional()
            .map_err(ApiError::from)
    }

    pub fn list(conn: &mut PgConnection) -> Result<Vec<Office>, ApiError> {
        offices::table
            .order(offices::name.asc())
            .load(conn)
            .map_err(ApiError::from)
    }

    pub fn assignment_for_user(
        conn: &mut PgConnection,
        user_id: Uuid,
    ) -> Result<Option<OfficeAdmin>, ApiError> {
        office_admins::table
            .filter(office_admins::user_id.eq(user_id))
            .first(conn)
            .optional()
            .map_err(ApiError::from)
    }

    /// Assigns or reassigns an admin in one statement. The unique constraint
    /// on `office_admins.user_id` turns concurrent assignment requests into
    /// an upsert instead of a check-then-insert race.
    pub fn upsert_assignment(
        conn: &mut PgConnection,
        user_id: Uuid,
        office_id: Uuid,
    ) -> Result<OfficeAdmin, ApiError> {
        diesel::insert_into(office_admins::table)
            .values(&NewOfficeAdmin {
                id: Uuid::new_v4(),
                user_id,
                office_id,
            })
            .on_conflict(office_admins::user_id)
            .do_update()
            .set(office_admins::office_id.eq(office_id))
            .get_result(conn)
            .map_err(ApiError::from)
    }

    pub fn remove_assignment(
        conn: &mut PgConnection,
        office_id: Uuid,
        user_id: Uuid,
    ) -> Result<usize, ApiError> {
        diesel::delete(
            office_admins::table
                .filter(office_admins::office_id.eq(office_id))
                .filter(office_admins::user_id.eq(user_id)),
        )
        .execute(conn)
        .map_err(ApiError::from)
    }

    /// Admin accounts assigned to an office, for the roster view.
    pub fn roster(conn: &mut PgConnection, office_id: Uuid) -> Result<Vec<User>, ApiError> {
        office_admins::table
            .inner_join(users::table)
            .filter(office_admins::office_id.eq(office_id))
            .select(User::as_select())
            .order(users::last_name.asc())
            .load(conn)
            .map_err(ApiError::from)
    }
}
