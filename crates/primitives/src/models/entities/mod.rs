pub mod audit_log;
pub mod inquiry;
pub mod office;
pub mod office_login_log;
pub mod student;
pub mod student_activity_log;
pub mod super_admin_activity_log;
pub mod user;

pub use audit_log::{AuditLog, NewAuditLog, DEFAULT_RETENTION_DAYS, SUPER_ADMIN_RETENTION_DAYS};
pub use inquiry::{CounselingSession, Inquiry};
pub use office::{NewOfficeAdmin, Office, OfficeAdmin};
pub use office_login_log::{NewOfficeLoginLog, OfficeLoginLog};
pub use student::{NewStudent, Student};
pub use student_activity_log::{NewStudentActivityLog, RelatedRecord, StudentActivityLog};
pub use super_admin_activity_log::{NewSuperAdminActivityLog, SuperAdminActivityLog};
pub use user::{NewUser, Role, User};
