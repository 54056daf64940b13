use counseldesk_core::repositories::{OfficeRepository, UserRepository};
use counseldesk_core::SecurityConfig;
use counseldesk_primitives::models::app_config::AppConfig;
use counseldesk_primitives::models::entities::{NewUser, Role, User};
use counseldesk_primitives::schema::{inquiries, offices, students};
use diesel::prelude::*;
use uuid::Uuid;

pub fn insert_user(conn: &mut PgConnection, role: Role, email: &str) -> User {
    UserRepository::insert(
        conn,
        NewUser {
            id: Uuid::new_v4(),
            first_name: "Test".to_string(),
            middle_name: None,
            last_name: "User".to_string(),
            email: email.to_string(),
            password_hash: bcrypt::hash("password123", 4).unwrap(),
            role: role.as_str().to_string(),
            is_active: true,
        },
    )
    .expect("insert user")
}

pub fn insert_office(conn: &mut PgConnection, name: &str) -> Uuid {
    diesel::insert_into(offices::table)
        .values((
            offices::id.eq(Uuid::new_v4()),
            offices::name.eq(name),
            offices::supports_video.eq(false),
        ))
        .returning(offices::id)
        .get_result(conn)
        .expect("insert office")
}

pub fn insert_student(conn: &mut PgConnection, email: &str) -> (User, Uuid) {
    let user = insert_user(conn, Role::Student, email);
    let student_id: Uuid = diesel::insert_into(students::table)
        .values((students::id.eq(Uuid::new_v4()), students::user_id.eq(user.id)))
        .returning(students::id)
        .get_result(conn)
        .expect("insert student");
    (user, student_id)
}

pub fn insert_inquiry(conn: &mut PgConnection, student_id: Uuid, office_id: Uuid) -> Uuid {
    diesel::insert_into(inquiries::table)
        .values((
            inquiries::id.eq(Uuid::new_v4()),
            inquiries::student_id.eq(student_id),
            inquiries::office_id.eq(office_id),
            inquiries::subject.eq("Course registration question"),
            inquiries::status.eq("pending"),
        ))
        .returning(inquiries::id)
        .get_result(conn)
        .expect("insert inquiry")
}

pub fn assign_admin(
    conn: &mut PgConnection,
    user_id: Uuid,
    office_id: Uuid,
) -> counseldesk_primitives::models::entities::OfficeAdmin {
    OfficeRepository::upsert_assignment(conn, user_id, office_id).expect("assign admin")
}

pub fn bearer_token(config: &AppConfig, user: &User) -> String {
    let role = Role::parse(&user.role).unwrap();
    SecurityConfig::create_token(config, user.id, role).expect("create token")
}
