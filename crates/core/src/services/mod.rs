pub mod admin_service;
pub mod export_service;
pub mod log_query_service;
pub mod recorder;

pub use admin_service::AdminService;
pub use export_service::{ExportService, ExportTable};
pub use log_query_service::LogQueryService;
pub use recorder::{ActivityRecorder, Actor, RequestMeta};
