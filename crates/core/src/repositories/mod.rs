pub mod audit_repository;
pub mod office_repository;
pub mod stats_repository;
pub mod user_repository;

pub use audit_repository::AuditStore;
pub use office_repository::OfficeRepository;
pub use stats_repository::StatsRepository;
pub use user_repository::UserRepository;
