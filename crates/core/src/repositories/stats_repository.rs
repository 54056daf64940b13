use chrono::Utc;
use diesel::dsl::{exists, not};
use diesel::prelude::*;

use counseldesk_primitives::error::ApiError;
use counseldesk_primitives::models::dtos::stats_dto::{AggregateStats, OfficeActivity};
use counseldesk_primitives::models::entities::{Office, Role};
use counseldesk_primitives::schema::{
    counseling_sessions, inquiries, office_admins, offices, users,
};
use counseldesk_primitives::utility::format_timestamp;

pub struct StatsRepository;

impl StatsRepository {
    /// Recomputes every dashboard counter from the entity tables. Called at
    /// push time and never cached, so the numbers always describe the
    /// committed state at the moment of computation.
    pub fn aggregate(conn: &mut PgConnection) -> Result<AggregateStats, ApiError> {
        let now = Utc::now();

        let active_users: i64 = users::table
            .filter(users::is_active.eq(true))
            .count()
            .get_result(conn)?;

        let pending_inquiries: i64 = inquiries::table
            .filter(inquiries::status.eq("pending"))
            .count()
            .get_result(conn)?;

        let upcoming_sessions: i64 = counseling_sessions::table
            .filter(counseling_sessions::scheduled_at.gt(now))
            .filter(counseling_sessions::status.eq("scheduled"))
            .count()
            .get_result(conn)?;

        let unassigned_admins: i64 = users::table
            .filter(users::role.eq(Role::OfficeAdmin.as_str()))
            .filter(not(exists(
                office_admins::table.filter(office_admins::user_id.eq(users::id)),
            )))
            .count()
            .get_result(conn)?;

        let all_offices: Vec<Office> = offices::table.load(conn)?;
        let mut office_activity = Vec::with_capacity(all_offices.len());
        for office in all_offices {
            let inquiries_count: i64 = inquiries::table
                .filter(inquiries::office_id.eq(office.id))
                .count()
                .get_result(conn)?;
            let sessions_count: i64 = counseling_sessions::table
                .filter(counseling_sessions::office_id.eq(office.id))
                .count()
                .get_result(conn)?;
            office_activity.push(OfficeActivity {
                office_id: office.id,
                office_name: office.name,
                inquiries_count,
                sessions_count,
            });
        }

        Ok(AggregateStats {
            active_users,
            pending_inquiries,
            upcoming_sessions,
            unassigned_admins,
            office_activity,
            timestamp: format_timestamp(&now),
        })
    }
}
