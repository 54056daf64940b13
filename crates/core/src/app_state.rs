use diesel::r2d2::{self, ConnectionManager, PooledConnection};
use diesel::PgConnection;
use std::sync::Arc;

use crate::realtime::Broadcaster;
use counseldesk_primitives::error::ApiError;
pub use counseldesk_primitives::models::app_config::AppConfig;

pub type DbPool = r2d2::Pool<ConnectionManager<PgConnection>>;
pub type DbConnection = PooledConnection<ConnectionManager<PgConnection>>;

#[derive(Clone)]
pub struct AppState {
    pub db: DbPool,
    pub config: AppConfig,
    pub broadcaster: Broadcaster,
}

impl AppState {
    pub fn new(db: DbPool, config: AppConfig) -> Arc<Self> {
        Arc::new(Self {
            db,
            config,
            broadcaster: Broadcaster::new(),
        })
    }

    pub fn conn(&self) -> Result<DbConnection, ApiError> {
        self.db
            .get()
            .map_err(|e| ApiError::DatabaseConnection(e.to_string()))
    }
}
