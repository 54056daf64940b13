pub mod admin_dto;
pub mod log_dto;
pub mod stats_dto;

pub use admin_dto::{
    AddAdminRequest, AdminSummary, HealthStatus, MessageResponse, OfficeSummary,
    ResetPasswordResponse, UpdateAdminRequest,
};
pub use log_dto::{
    AuditLogRow, ExportFormat, ExportParams, LogFilter, LogKind, LogPage, LogQueryParams,
    OfficeLogRow, StudentLogRow, SuperAdminLogRow, LOG_PAGE_SIZE,
};
pub use stats_dto::{AggregateStats, DashboardStatsResponse, OfficeActivity, RecentActivity};
