use crate::config::ServerConfig;
use crate::mailer::Mailer;
use sqlx::PgPool;
use std::sync::Arc;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Arc<ServerConfig>,
    pub mailer: Arc<Mailer>,
}

impl AppState {
    /// Create a new app state
    pub fn new(pool: PgPool, config: ServerConfig) -> Self {
        let mailer = Mailer::new(config.frontend_url.clone());
        Self {
            pool,
            config: Arc::new(config),
            mailer: Arc::new(mailer),
        }
    }
}
