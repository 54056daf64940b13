use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use diesel::prelude::*;

use counseldesk_primitives::error::ApiError;
use counseldesk_primitives::models::dtos::log_dto::{LogFilter, LOG_PAGE_SIZE};
use counseldesk_primitives::models::entities::{
    AuditLog, NewAuditLog, NewOfficeLoginLog, NewStudentActivityLog, NewSuperAdminActivityLog,
    Office, OfficeAdmin, OfficeLoginLog, Student, StudentActivityLog, SuperAdminActivityLog, User,
};
use counseldesk_primitives::schema::{
    audit_logs, office_admins, office_login_logs, offices, student_activity_logs, students,
    super_admin_activity_logs, users,
};

/// Append-only store over the four log kinds. Every `append_*` stages a row
/// inside the caller's connection and never commits: a log entry shares the
/// fate of the business mutation it accompanies. Record ids and timestamps
/// are assigned by the database and immutable afterwards.
pub struct AuditStore;

pub fn page_offset(page: i64) -> i64 {
    (page.max(1) - 1) * LOG_PAGE_SIZE
}

fn like_pattern(search: &str) -> String {
    format!("%{}%", search.trim())
}

fn day_start(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

fn day_end(date: NaiveDate) -> DateTime<Utc> {
    let end = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);
    date.and_time(end).and_utc()
}

fn active_search(filter: &LogFilter) -> Option<String> {
    filter
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(like_pattern)
}

impl AuditStore {
    // --- write path -------------------------------------------------------

    pub fn append_audit(conn: &mut PgConnection, record: NewAuditLog) -> Result<i64, ApiError> {
        diesel::insert_into(audit_logs::table)
            .values(&record)
            .returning(audit_logs::id)
            .get_result(conn)
            .map_err(ApiError::from)
    }

    pub fn append_student_activity(
        conn: &mut PgConnection,
        record: NewStudentActivityLog,
    ) -> Result<i64, ApiError> {
        diesel::insert_into(student_activity_logs::table)
            .values(&record)
            .returning(student_activity_logs::id)
            .get_result(conn)
            .map_err(ApiError::from)
    }

    pub fn append_office_login(
        conn: &mut PgConnection,
        record: NewOfficeLoginLog,
    ) -> Result<i64, ApiError> {
        diesel::insert_into(office_login_logs::table)
            .values(&record)
            .returning(office_login_logs::id)
            .get_result(conn)
            .map_err(ApiError::from)
    }

    pub fn append_super_admin_activity(
        conn: &mut PgConnection,
        record: NewSuperAdminActivityLog,
    ) -> Result<i64, ApiError> {
        diesel::insert_into(super_admin_activity_logs::table)
            .values(&record)
            .returning(super_admin_activity_logs::id)
            .get_result(conn)
            .map_err(ApiError::from)
    }

    /// Closes an office session record. The guarded update makes the
    /// transition one-shot: once `logout_time` is set it never changes, and
    /// `session_duration` is derived exactly once from the immutable
    /// `login_time`. Returns whether a row actually transitioned.
    pub fn record_logout(
        conn: &mut PgConnection,
        log_id: i64,
        logout_time: DateTime<Utc>,
    ) -> Result<bool, ApiError> {
        let log: Option<OfficeLoginLog> = office_login_logs::table
            .find(log_id)
            .first(conn)
            .optional()?;

        let Some(log) = log else {
            return Ok(false);
        };
        if log.logout_time.is_some() {
            return Ok(false);
        }

        let duration = (logout_time - log.login_time).num_seconds() as i32;

        let updated = diesel::update(
            office_login_logs::table
                .find(log_id)
                .filter(office_login_logs::logout_time.is_null()),
        )
        .set((
            office_login_logs::logout_time.eq(logout_time),
            office_login_logs::session_duration.eq(duration),
        ))
        .execute(conn)?;

        Ok(updated == 1)
    }

    // --- query path -------------------------------------------------------

    fn load_audit(
        conn: &mut PgConnection,
        filter: &LogFilter,
        page: Option<i64>,
    ) -> Result<Vec<(AuditLog, Option<User>)>, ApiError> {
        let mut query = audit_logs::table
            .left_join(users::table)
            .select((AuditLog::as_select(), Option::<User>::as_select()))
            .order((audit_logs::timestamp.desc(), audit_logs::id.desc()))
            .into_boxed();

        if let Some(pattern) = active_search(filter) {
            query = query.filter(
                users::first_name
                    .ilike(pattern.clone())
                    .nullable()
                    .or(users::last_name.ilike(pattern.clone()).nullable())
                    .or(users::email.ilike(pattern.clone()).nullable())
                    .or(audit_logs::action.ilike(pattern.clone()).nullable())
                    .or(audit_logs::target_type.ilike(pattern).nullable()),
            );
        }
        if let Some(from) = filter.date_from {
            query = query.filter(audit_logs::timestamp.ge(day_start(from)));
        }
        if let Some(to) = filter.date_to {
            query = query.filter(audit_logs::timestamp.le(day_end(to)));
        }
        if let Some(page) = page {
            query = query.limit(LOG_PAGE_SIZE).offset(page_offset(page));
        }

        query.load(conn).map_err(ApiError::from)
    }

    pub fn audit_page(
        conn: &mut PgConnection,
        filter: &LogFilter,
        page: i64,
    ) -> Result<Vec<(AuditLog, Option<User>)>, ApiError> {
        Self::load_audit(conn, filter, Some(page))
    }

    pub fn audit_all(
        conn: &mut PgConnection,
        filter: &LogFilter,
    ) -> Result<Vec<(AuditLog, Option<User>)>, ApiError> {
        Self::load_audit(conn, filter, None)
    }

    fn load_student(
        conn: &mut PgConnection,
        filter: &LogFilter,
        page: Option<i64>,
    ) -> Result<Vec<(StudentActivityLog, Student, User)>, ApiError> {
        let mut query = student_activity_logs::table
            .inner_join(students::table.inner_join(users::table))
            .select((
                StudentActivityLog::as_select(),
                Student::as_select(),
                User::as_select(),
            ))
            .order((
                student_activity_logs::timestamp.desc(),
                student_activity_logs::id.desc(),
            ))
            .into_boxed();

        if let Some(pattern) = active_search(filter) {
            query = query.filter(
                users::first_name
                    .ilike(pattern.clone())
                    .nullable()
                    .or(users::last_name.ilike(pattern.clone()).nullable())
                    .or(users::email.ilike(pattern.clone()).nullable())
                    .or(student_activity_logs::action.ilike(pattern).nullable()),
            );
        }
        if let Some(from) = filter.date_from {
            query = query.filter(student_activity_logs::timestamp.ge(day_start(from)));
        }
        if let Some(to) = filter.date_to {
            query = query.filter(student_activity_logs::timestamp.le(day_end(to)));
        }
        if let Some(page) = page {
            query = query.limit(LOG_PAGE_SIZE).offset(page_offset(page));
        }

        query.load(conn).map_err(ApiError::from)
    }

    pub fn student_page(
        conn: &mut PgConnection,
        filter: &LogFilter,
        page: i64,
    ) -> Result<Vec<(StudentActivityLog, Student, User)>, ApiError> {
        Self::load_student(conn, filter, Some(page))
    }

    pub fn student_all(
        conn: &mut PgConnection,
        filter: &LogFilter,
    ) -> Result<Vec<(StudentActivityLog, Student, User)>, ApiError> {
        Self::load_student(conn, filter, None)
    }

    fn load_office(
        conn: &mut PgConnection,
        filter: &LogFilter,
        page: Option<i64>,
    ) -> Result<Vec<(OfficeLoginLog, OfficeAdmin, User, Office)>, ApiError> {
        let mut query = office_login_logs::table
            .inner_join(
                office_admins::table
                    .inner_join(users::table)
                    .inner_join(offices::table),
            )
            .select((
                OfficeLoginLog::as_select(),
                OfficeAdmin::as_select(),
                User::as_select(),
                Office::as_select(),
            ))
            .order((
                office_login_logs::login_time.desc(),
                office_login_logs::id.desc(),
            ))
            .into_boxed();

        if let Some(pattern) = active_search(filter) {
            query = query.filter(
                users::first_name
                    .ilike(pattern.clone())
                    .nullable()
                    .or(users::last_name.ilike(pattern.clone()).nullable())
                    .or(users::email.ilike(pattern.clone()).nullable())
                    .or(offices::name.ilike(pattern).nullable()),
            );
        }
        if let Some(from) = filter.date_from {
            query = query.filter(office_login_logs::login_time.ge(day_start(from)));
        }
        if let Some(to) = filter.date_to {
            query = query.filter(office_login_logs::login_time.le(day_end(to)));
        }
        if let Some(page) = page {
            query = query.limit(LOG_PAGE_SIZE).offset(page_offset(page));
        }

        query.load(conn).map_err(ApiError::from)
    }

    pub fn office_page(
        conn: &mut PgConnection,
        filter: &LogFilter,
        page: i64,
    ) -> Result<Vec<(OfficeLoginLog, OfficeAdmin, User, Office)>, ApiError> {
        Self::load_office(conn, filter, Some(page))
    }

    pub fn office_all(
        conn: &mut PgConnection,
        filter: &LogFilter,
    ) -> Result<Vec<(OfficeLoginLog, OfficeAdmin, User, Office)>, ApiError> {
        Self::load_office(conn, filter, None)
    }

    fn load_super_admin(
        conn: &mut PgConnection,
        filter: &LogFilter,
        page: Option<i64>,
    ) -> Result<Vec<(SuperAdminActivityLog, Option<User>)>, ApiError> {
        // two user FKs on this table, so the join condition is explicit
        let mut query = super_admin_activity_logs::table
            .left_join(
                users::table
                    .on(users::id
                        .nullable()
                        .eq(super_admin_activity_logs::super_admin_id)),
            )
            .select((
                SuperAdminActivityLog::as_select(),
                Option::<User>::as_select(),
            ))
            .order((
                super_admin_activity_logs::timestamp.desc(),
                super_admin_activity_logs::id.desc(),
            ))
            .into_boxed();

        if let Some(pattern) = active_search(filter) {
            query = query.filter(
                users::first_name
                    .ilike(pattern.clone())
                    .nullable()
                    .or(users::last_name.ilike(pattern.clone()).nullable())
                    .or(users::email.ilike(pattern.clone()).nullable())
                    .or(super_admin_activity_logs::action
                        .ilike(pattern.clone())
                        .nullable())
                    .or(super_admin_activity_logs::target_type
                        .ilike(pattern)
                        .nullable()),
            );
        }
        if let Some(from) = filter.date_from {
            query = query.filter(super_admin_activity_logs::timestamp.ge(day_start(from)));
        }
        if let Some(to) = filter.date_to {
            query = query.filter(super_admin_activity_logs::timestamp.le(day_end(to)));
        }
        if let Some(page) = page {
            query = query.limit(LOG_PAGE_SIZE).offset(page_offset(page));
        }

        query.load(conn).map_err(ApiError::from)
    }

    pub fn super_admin_page(
        conn: &mut PgConnection,
        filter: &LogFilter,
        page: i64,
    ) -> Result<Vec<(SuperAdminActivityLog, Option<User>)>, ApiError> {
        Self::load_super_admin(conn, filter, Some(page))
    }

    pub fn super_admin_all(
        conn: &mut PgConnection,
        filter: &LogFilter,
    ) -> Result<Vec<(SuperAdminActivityLog, Option<User>)>, ApiError> {
        Self::load_super_admin(conn, filter, None)
    }

    /// Most recent super-admin activity for the dashboard sidebar.
    pub fn recent_super_admin(
        conn: &mut PgConnection,
        limit: i64,
    ) -> Result<Vec<(SuperAdminActivityLog, Option<User>)>, ApiError> {
        super_admin_activity_logs::table
            .left_join(
                users::table
                    .on(users::id
                        .nullable()
                        .eq(super_admin_activity_logs::super_admin_id)),
            )
            .select((
                SuperAdminActivityLog::as_select(),
                Option::<User>::as_select(),
            ))
            .order((
                super_admin_activity_logs::timestamp.desc(),
                super_admin_activity_logs::id.desc(),
            ))
            .limit(limit)
            .load(conn)
            .map_err(ApiError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Timelike;

    #[test]
    fn page_offset_is_one_indexed() {
        assert_eq!(page_offset(1), 0);
        assert_eq!(page_offset(2), 10);
        assert_eq!(page_offset(5), 40);
    }

    #[test]
    fn page_offset_clamps_invalid_pages() {
        assert_eq!(page_offset(0), 0);
        assert_eq!(page_offset(-3), 0);
    }

    #[test]
    fn date_range_is_inclusive_of_the_whole_end_day() {
        let date = NaiveDate::from_ymd_opt(2025, 6, 15).unwrap();
        let start = day_start(date);
        let end = day_end(date);

        assert_eq!((start.hour(), start.minute(), start.second()), (0, 0, 0));
        assert_eq!((end.hour(), end.minute(), end.second()), (23, 59, 59));
    }

    #[test]
    fn blank_search_is_ignored() {
        let filter = LogFilter {
            search: Some("   ".into()),
            ..Default::default()
        };
        assert_eq!(active_search(&filter), None);

        let filter = LogFilter {
            search: Some(" jane ".into()),
            ..Default::default()
        };
        assert_eq!(active_search(&filter).as_deref(), Some("%jane%"));
    }
}
