use chrono::Utc;
use diesel::prelude::*;
use rand::Rng;
use tracing::{info, warn};
use uuid::Uuid;
use validator::Validate;

use crate::app_state::AppState;
use crate::realtime::Room;
use crate::repositories::{AuditStore, OfficeRepository, StatsRepository, UserRepository};
use crate::services::recorder::{ActivityRecorder, Actor, RequestMeta};
use counseldesk_primitives::error::ApiError;
use counseldesk_primitives::models::dtos::admin_dto::{
    AddAdminRequest, AdminSummary, MessageResponse, ResetPasswordResponse, UpdateAdminRequest,
};
use counseldesk_primitives::models::dtos::stats_dto::{DashboardStatsResponse, RecentActivity};
use counseldesk_primitives::models::entities::{NewUser, Office, Role, User};
use counseldesk_primitives::models::events::{AssignmentAction, RealtimeEvent};
use counseldesk_primitives::utility::format_timestamp;

/// Super-admin management of office-admin accounts. Every mutation follows
/// the same discipline: mutate and stage the activity log in one
/// transaction, and only after that transaction commits publish events to
/// the dashboard rooms. A failed commit publishes nothing.
pub struct AdminService;

impl AdminService {
    pub async fn add_admin(
        state: &AppState,
        actor: &Actor,
        meta: &RequestMeta,
        req: AddAdminRequest,
    ) -> Result<MessageResponse, ApiError> {
        req.validate()?;
        if req.password != req.confirm_password {
            return Err(ApiError::BadRequest("Passwords do not match".to_string()));
        }

        let mut conn = state.conn()?;

        let (user, office) = conn.transaction::<(User, Option<Office>), ApiError, _>(|conn| {
            if UserRepository::email_taken(conn, &req.email, None)? {
                return Err(ApiError::BadRequest("Email already exists".to_string()));
            }

            let password_hash = bcrypt::hash(&req.password, bcrypt::DEFAULT_COST)?;
            let user = UserRepository::insert(
                conn,
                NewUser {
                    id: Uuid::new_v4(),
                    first_name: req.first_name.trim().to_string(),
                    middle_name: req.middle_name.clone().filter(|m| !m.is_empty()),
                    last_name: req.last_name.trim().to_string(),
                    email: req.email.trim().to_string(),
                    password_hash,
                    role: Role::OfficeAdmin.as_str().to_string(),
                    is_active: false,
                },
            )?;

            let office = match req.office_id {
                Some(office_id) => {
                    let office = OfficeRepository::find(conn, office_id)?
                        .ok_or_else(|| ApiError::NotFound("Office not found".to_string()))?;
                    OfficeRepository::upsert_assignment(conn, user.id, office.id)?;
                    Some(office)
                }
                None => None,
            };

            ActivityRecorder::super_admin_action(
                conn,
                actor,
                "Create Office Admin",
                "user",
                Some(user.id),
                office.as_ref().map(|o| o.id),
                Some(format!("Created new office admin {}", user.email)),
                meta,
            )?;

            Ok((user, office))
        })?;

        info!("Office admin {} created by {}", user.email, actor.display_name);

        // the transaction is committed; now the dashboards may hear about it
        let timestamp = format_timestamp(&Utc::now());
        state.broadcaster.publish(
            Room::SuperAdmin,
            &RealtimeEvent::AdminAdded {
                user_id: user.id,
                name: user.full_name(),
                email: user.email.clone(),
                role: Role::OfficeAdmin.as_str().to_string(),
                created_by: actor.display_name.clone(),
                timestamp: timestamp.clone(),
            },
        );
        if let Some(office) = &office {
            state.broadcaster.publish(
                Room::SuperAdmin,
                &RealtimeEvent::AdminOfficeAssignment {
                    admin_id: user.id,
                    admin_name: user.full_name(),
                    office_id: Some(office.id),
                    office_name: Some(office.name.clone()),
                    old_office_name: None,
                    assigned_by: actor.display_name.clone(),
                    action: AssignmentAction::Assign,
                    timestamp,
                },
            );
        }
        Self::push_stats(state, &mut conn);

        Ok(MessageResponse::ok("Office admin added successfully"))
    }

    pub async fn update_admin(
        state: &AppState,
        actor: &Actor,
        meta: &RequestMeta,
        admin_id: Uuid,
        req: UpdateAdminRequest,
    ) -> Result<MessageResponse, ApiError> {
        req.validate()?;

        let mut conn = state.conn()?;

        struct UpdateOutcome {
            user: User,
            field_events: Vec<(String, String)>,
            office_change: Option<(Office, Option<Office>)>,
        }

        let outcome = conn.transaction::<UpdateOutcome, ApiError, _>(|conn| {
            let admin = UserRepository::find_office_admin(conn, admin_id)?
                .ok_or_else(|| ApiError::NotFound("Admin not found".to_string()))?;

            if UserRepository::email_taken(conn, &req.email, Some(admin_id))? {
                return Err(ApiError::BadRequest(
                    "Email already exists for another user".to_string(),
                ));
            }

            let middle_name = req.middle_name.clone().filter(|m| !m.is_empty());

            let mut changed_fields = Vec::new();
            let mut field_events = Vec::new();
            if admin.first_name != req.first_name {
                changed_fields.push(format!(
                    "first_name: {} -> {}",
                    admin.first_name, req.first_name
                ));
                field_events.push(("first_name".to_string(), req.first_name.clone()));
            }
            if admin.middle_name != middle_name {
                changed_fields.push(format!(
                    "middle_name: {} -> {}",
                    admin.middle_name.as_deref().unwrap_or("None"),
                    middle_name.as_deref().unwrap_or("None")
                ));
            }
            if admin.last_name != req.last_name {
                changed_fields.push(format!(
                    "last_name: {} -> {}",
                    admin.last_name, req.last_name
                ));
                field_events.push(("last_name".to_string(), req.last_name.clone()));
            }
            if admin.email != req.email {
                changed_fields.push(format!("email: {} -> {}", admin.email, req.email));
                field_events.push(("email".to_string(), req.email.clone()));
            }
            if admin.is_active != req.is_active {
                changed_fields.push(format!(
                    "is_active: {} -> {}",
                    admin.is_active, req.is_active
                ));
                field_events.push((
                    "is_active".to_string(),
                    if req.is_active { "active" } else { "inactive" }.to_string(),
                ));
            }

            let user = UserRepository::update_profile(
                conn,
                admin_id,
                req.first_name.trim(),
                middle_name.as_deref(),
                req.last_name.trim(),
                req.email.trim(),
                req.is_active,
            )?;

            let mut office_change = None;
            if let Some(office_id) = req.office_id {
                let new_office = OfficeRepository::find(conn, office_id)?
                    .ok_or_else(|| ApiError::NotFound("Office not found".to_string()))?;

                let previous = OfficeRepository::assignment_for_user(conn, admin_id)?;
                let old_office = match &previous {
                    Some(assignment) if assignment.office_id != office_id => {
                        OfficeRepository::find(conn, assignment.office_id)?
                    }
                    _ => None,
                };

                let changed = previous
                    .as_ref()
                    .map(|a| a.office_id != office_id)
                    .unwrap_or(true);
                if changed {
                    OfficeRepository::upsert_assignment(conn, admin_id, office_id)?;
                    changed_fields.push(format!(
                        "office_id: {} -> {}",
                        previous
                            .as_ref()
                            .map(|a| a.office_id.to_string())
                            .unwrap_or_else(|| "None".to_string()),
                        office_id
                    ));
                    office_change = Some((new_office, old_office));
                }
            }

            if !changed_fields.is_empty() {
                ActivityRecorder::super_admin_action(
                    conn,
                    actor,
                    "Update Office Admin",
                    "user",
                    Some(admin_id),
                    office_change.as_ref().map(|(office, _)| office.id),
                    Some(format!(
                        "Updated office admin {}: {}",
                        admin_id,
                        changed_fields.join(", ")
                    )),
                    meta,
                )?;
            }

            Ok(UpdateOutcome {
                user,
                field_events,
                office_change,
            })
        })?;

        let timestamp = format_timestamp(&Utc::now());
        for (field_updated, new_value) in &outcome.field_events {
            state.broadcaster.publish(
                Room::SuperAdmin,
                &RealtimeEvent::AdminUpdated {
                    user_id: outcome.user.id,
                    name: outcome.user.full_name(),
                    field_updated: field_updated.clone(),
                    new_value: new_value.clone(),
                    updated_by: actor.display_name.clone(),
                    timestamp: timestamp.clone(),
                },
            );
        }
        if let Some((new_office, old_office)) = &outcome.office_change {
            state.broadcaster.publish(
                Room::SuperAdmin,
                &RealtimeEvent::AdminOfficeAssignment {
                    admin_id: outcome.user.id,
                    admin_name: outcome.user.full_name(),
                    office_id: Some(new_office.id),
                    office_name: Some(new_office.name.clone()),
                    old_office_name: old_office.as_ref().map(|o| o.name.clone()),
                    assigned_by: actor.display_name.clone(),
                    action: if old_office.is_some() {
                        AssignmentAction::Reassign
                    } else {
                        AssignmentAction::Assign
                    },
                    timestamp: timestamp.clone(),
                },
            );
        }
        Self::push_stats(state, &mut conn);

        Ok(MessageResponse::ok("Admin updated successfully"))
    }

    pub async fn delete_admin(
        state: &AppState,
        actor: &Actor,
        meta: &RequestMeta,
        admin_id: Uuid,
    ) -> Result<MessageResponse, ApiError> {
        let mut conn = state.conn()?;

        let admin = conn.transaction::<User, ApiError, _>(|conn| {
            let admin = UserRepository::find_office_admin(conn, admin_id)?
                .ok_or_else(|| ApiError::NotFound("Admin not found".to_string()))?;

            // staged before the delete; the FK nulls target_user_id but the
            // trail row itself survives
            ActivityRecorder::super_admin_action(
                conn,
                actor,
                "Delete Office Admin",
                "user",
                Some(admin.id),
                None,
                Some(format!(
                    "Deleted office admin {} (ID: {})",
                    admin.email, admin.id
                )),
                meta,
            )?;

            UserRepository::delete(conn, admin_id)?;
            Ok(admin)
        })?;

        info!("Office admin {} deleted by {}", admin.email, actor.display_name);

        state.broadcaster.publish(
            Room::SuperAdmin,
            &RealtimeEvent::AdminDeleted {
                user_id: admin.id,
                name: admin.full_name(),
                deleted_by: actor.display_name.clone(),
                timestamp: format_timestamp(&Utc::now()),
            },
        );
        Self::push_stats(state, &mut conn);

        Ok(MessageResponse::ok("Admin deleted successfully"))
    }

    pub async fn remove_office_admin(
        state: &AppState,
        actor: &Actor,
        meta: &RequestMeta,
        office_id: Uuid,
        admin_id: Uuid,
    ) -> Result<MessageResponse, ApiError> {
        let mut conn = state.conn()?;

        let (admin, office) = conn.transaction::<(User, Office), ApiError, _>(|conn| {
            let office = OfficeRepository::find(conn, office_id)?
                .ok_or_else(|| ApiError::NotFound("Office not found".to_string()))?;
            let admin = UserRepository::find_office_admin(conn, admin_id)?
                .ok_or_else(|| ApiError::NotFound("Admin not found".to_string()))?;

            let removed = OfficeRepository::remove_assignment(conn, office_id, admin_id)?;
            if removed == 0 {
                return Err(ApiError::NotFound(
                    "Admin not associated with this office".to_string(),
                ));
            }

            ActivityRecorder::super_admin_action(
                conn,
                actor,
                "Remove Office Admin",
                "user",
                Some(admin.id),
                Some(office.id),
                Some(format!(
                    "Removed admin {} from office {}",
                    admin.id, office.id
                )),
                meta,
            )?;

            Ok((admin, office))
        })?;

        let timestamp = format_timestamp(&Utc::now());
        state.broadcaster.publish(
            Room::SuperAdmin,
            &RealtimeEvent::OfficeAdminRemoved {
                admin_id: admin.id,
                admin_name: admin.full_name(),
                office_id: office.id,
                office_name: office.name.clone(),
                removed_by: actor.display_name.clone(),
                timestamp: timestamp.clone(),
            },
        );
        state.broadcaster.publish(
            Room::SuperAdmin,
            &RealtimeEvent::AdminOfficeAssignment {
                admin_id: admin.id,
                admin_name: admin.full_name(),
                office_id: None,
                office_name: None,
                old_office_name: Some(office.name.clone()),
                assigned_by: actor.display_name.clone(),
                action: AssignmentAction::Remove,
                timestamp,
            },
        );
        Self::push_stats(state, &mut conn);

        Ok(MessageResponse::ok(format!(
            "Admin {} has been removed from {}",
            admin.full_name(),
            office.name
        )))
    }

    pub async fn reset_admin_password(
        state: &AppState,
        actor: &Actor,
        meta: &RequestMeta,
        admin_id: Uuid,
    ) -> Result<ResetPasswordResponse, ApiError> {
        let mut conn = state.conn()?;

        let new_password: String = format!("{:04}", rand::thread_rng().gen_range(0..10_000));
        let password_hash = bcrypt::hash(&new_password, bcrypt::DEFAULT_COST)?;

        let admin = conn.transaction::<User, ApiError, _>(|conn| {
            let admin = UserRepository::find_office_admin(conn, admin_id)?
                .ok_or_else(|| ApiError::NotFound("Admin not found".to_string()))?;

            UserRepository::set_password_hash(conn, admin.id, &password_hash)?;

            ActivityRecorder::super_admin_action(
                conn,
                actor,
                "Reset Admin Password",
                "user",
                Some(admin.id),
                None,
                Some(format!("Reset password for admin {}", admin.id)),
                meta,
            )?;

            Ok(admin)
        })?;

        state.broadcaster.publish(
            Room::SuperAdmin,
            &RealtimeEvent::AdminPasswordReset {
                admin_id: admin.id,
                admin_name: admin.full_name(),
                reset_by: actor.display_name.clone(),
                timestamp: format_timestamp(&Utc::now()),
            },
        );

        Ok(ResetPasswordResponse {
            success: true,
            message: "Password reset successfully".to_string(),
            password: new_password,
        })
    }

    pub fn admin_detail(state: &AppState, admin_id: Uuid) -> Result<AdminSummary, ApiError> {
        let mut conn = state.conn()?;
        let admin = UserRepository::find_office_admin(&mut conn, admin_id)?
            .ok_or_else(|| ApiError::NotFound("Admin not found".to_string()))?;
        let assignment = OfficeRepository::assignment_for_user(&mut conn, admin_id)?;
        Ok(Self::summarize(&admin, assignment.map(|a| a.office_id)))
    }

    pub fn office_roster(state: &AppState, office_id: Uuid) -> Result<Vec<AdminSummary>, ApiError> {
        let mut conn = state.conn()?;
        OfficeRepository::find(&mut conn, office_id)?
            .ok_or_else(|| ApiError::NotFound("Office not found".to_string()))?;
        let roster = OfficeRepository::roster(&mut conn, office_id)?;
        Ok(roster
            .iter()
            .map(|user| Self::summarize(user, Some(office_id)))
            .collect())
    }

    /// Dashboard payload: aggregates recomputed from the entity tables plus
    /// the ten most recent super-admin activities.
    pub fn dashboard_stats(state: &AppState) -> Result<DashboardStatsResponse, ApiError> {
        let mut conn = state.conn()?;
        let stats = StatsRepository::aggregate(&mut conn)?;
        let recent = AuditStore::recent_super_admin(&mut conn, 10)?;
        let recent_activities = recent
            .into_iter()
            .map(|(log, admin)| RecentActivity {
                admin_name: admin
                    .map(|a| a.full_name())
                    .unwrap_or_else(|| "Unknown Admin".to_string()),
                action: log.action,
                target_type: log.target_type,
                details: log.details,
                timestamp: format_timestamp(&log.timestamp),
            })
            .collect();

        Ok(DashboardStatsResponse {
            success: true,
            stats,
            recent_activities,
        })
    }

    fn summarize(user: &User, office_id: Option<Uuid>) -> AdminSummary {
        AdminSummary {
            id: user.id,
            first_name: user.first_name.clone(),
            middle_name: user.middle_name.clone(),
            last_name: user.last_name.clone(),
            full_name: user.full_name(),
            email: user.email.clone(),
            is_active: user.is_active,
            office_id,
            created_at: format_timestamp(&user.created_at),
        }
    }

    /// Recomputes the aggregates from the just-committed state and pushes
    /// them. The mutation already succeeded, so a failure here is only
    /// logged; subscribers fall back to the stats endpoint.
    fn push_stats(state: &AppState, conn: &mut diesel::PgConnection) {
        match StatsRepository::aggregate(conn) {
            Ok(stats) => state
                .broadcaster
                .publish(Room::SuperAdmin, &RealtimeEvent::DashboardStatsUpdate(stats)),
            Err(e) => warn!("Failed to recompute dashboard stats: {}", e),
        }
    }
}
