pub mod app_state;
pub mod realtime;
pub mod repositories;
pub mod security;
pub mod services;

pub use app_state::{AppState, DbConnection, DbPool};
pub use security::{auth_middleware, Claims, SecurityConfig};
