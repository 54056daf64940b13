pub mod app_config;
pub mod dtos;
pub mod entities;
pub mod events;

// Re-export commonly used types
pub use app_config::{AppConfig, JwtConfig};
pub use dtos::*;
pub use entities::*;
pub use events::{AssignmentAction, RealtimeEvent};
