use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Fixed page size for every log listing.
pub const LOG_PAGE_SIZE: i64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum LogKind {
    #[default]
    All,
    Student,
    Office,
    Superadmin,
}

impl LogKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogKind::All => "all",
            LogKind::Student => "student",
            LogKind::Office => "office",
            LogKind::Superadmin => "superadmin",
        }
    }
}

/// Common filter for queries and exports. The date range is inclusive:
/// `date_from` starts at midnight, `date_to` extends through 23:59:59.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LogFilter {
    pub search: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct LogQueryParams {
    #[serde(default)]
    pub filter_type: LogKind,
    pub search: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub page: Option<i64>,
}

impl LogQueryParams {
    pub fn filter(&self) -> LogFilter {
        LogFilter {
            search: self.search.clone(),
            date_from: self.date_from,
            date_to: self.date_to,
        }
    }

    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }
}

/// One page of display-ready rows, 1-indexed. Pages past the end are empty,
/// never an error.
#[derive(Debug, Serialize, ToSchema)]
pub struct LogPage<T> {
    pub rows: Vec<T>,
    pub page: i64,
    pub per_page: i64,
}

impl<T> LogPage<T> {
    pub fn new(rows: Vec<T>, page: i64) -> Self {
        Self {
            rows,
            page,
            per_page: LOG_PAGE_SIZE,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct AuditLogRow {
    pub id: i64,
    pub user_name: String,
    pub user_email: Option<String>,
    pub user_role: Option<String>,
    pub action: String,
    pub target_type: Option<String>,
    pub is_success: bool,
    pub timestamp: String,
    pub ip_address: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StudentLogRow {
    pub id: i64,
    pub student_name: String,
    pub student_email: String,
    pub action: String,
    pub related_type: Option<String>,
    pub is_success: bool,
    pub timestamp: String,
    pub ip_address: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OfficeLogRow {
    pub id: i64,
    pub admin_name: String,
    pub admin_email: String,
    pub office_name: String,
    pub login_time: String,
    pub logout_time: Option<String>,
    pub session_duration: Option<i32>,
    pub is_success: bool,
    pub ip_address: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SuperAdminLogRow {
    pub id: i64,
    pub admin_name: String,
    pub admin_email: Option<String>,
    pub action: String,
    pub target_type: Option<String>,
    pub details: Option<String>,
    pub is_success: bool,
    pub timestamp: String,
    pub ip_address: Option<String>,
}

/// Export output formats. All three share the per-kind column sets; the
/// paginated document drops the superadmin Details column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Csv,
    Xlsx,
    Pdf,
}

#[derive(Debug, Deserialize)]
pub struct ExportParams {
    pub format: ExportFormat,
    #[serde(rename = "type", default)]
    pub log_type: LogKind,
    pub search: Option<String>,
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
}
