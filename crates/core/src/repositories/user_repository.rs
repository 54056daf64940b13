use diesel::prelude::*;
use uuid::Uuid;

use counseldesk_primitives::error::ApiError;
use counseldesk_primitives::models::entities::{NewUser, Role, User};
use counseldesk_primitives::schema::users;

pub struct UserRepository;

impl UserRepository {
    pub fn find(conn: &mut PgConnection, id: Uuid) -> Result<Option<User>, ApiError> {
        users::table
            .find(id)
            .first(conn)
            .optional()
            .map_err(ApiError::from)
    }

    /// Looks up a user constrained to the office-admin role, the only kind
    /// of account the admin-management operations may touch.
    pub fn find_office_admin(conn: &mut PgConnection, id: Uuid) -> Result<Option<User>, ApiError> {
        users::table
            .find(id)
            .filter(users::role.eq(Role::OfficeAdmin.as_str()))
            .first(conn)
            .optional()
            .map_err(ApiError::from)
    }

    pub fn email_taken(
        conn: &mut PgConnection,
        email: &str,
        exclude: Option<Uuid>,
    ) -> Result<bool, ApiError> {
        let mut query = users::table.filter(users::email.eq(email)).into_boxed();
        if let Some(id) = exclude {
            query = query.filter(users::id.ne(id));
        }
        let count: i64 = query.count().get_result(conn)?;
        Ok(count > 0)
    }

    pub fn insert(conn: &mut PgConnection, new_user: NewUser) -> Result<User, ApiError> {
        diesel::insert_into(users::table)
            .values(&new_user)
            .get_result(conn)
            .map_err(ApiError::from)
    }

    pub fn update_profile(
        conn: &mut PgConnection,
        id: Uuid,
        first_name: &str,
        middle_name: Option<&str>,
        last_name: &str,
        email: &str,
        is_active: bool,
    ) -> Result<User, ApiError> {
        diesel::update(users::table.find(id))
            .set((
                users::first_name.eq(first_name),
                users::middle_name.eq(middle_name),
                users::last_name.eq(last_name),
                users::email.eq(email),
                users::is_active.eq(is_active),
            ))
            .get_result(conn)
            .map_err(ApiError::from)
    }

    pub fn set_password_hash(
        conn: &mut PgConnection,
        id: Uuid,
        password_hash: &str,
    ) -> Result<usize, ApiError> {
        diesel::update(users::table.find(id))
            .set(users::password_hash.eq(password_hash))
            .execute(conn)
            .map_err(ApiError::from)
    }

    pub fn delete(conn: &mut PgConnection, id: Uuid) -> Result<usize, ApiError> {
        diesel::delete(users::table.find(id))
            .execute(conn)
            .map_err(ApiError::from)
    }
}
