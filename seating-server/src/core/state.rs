use std::sync::Arc;

use sqlx::SqlitePool;

use crate::auth::JwtService;
use crate::core::{Config, Result, ServerError};
use crate::db::DbService;
use crate::seating::{SeatingService, SqliteSeatingStore};

/// Server state, cloned into every handler
///
/// | Field | Type | Meaning |
/// |-------|------|---------|
/// | config | Config | immutable configuration |
/// | db | SqlitePool | connection pool |
/// | jwt_service | Arc<JwtService> | token issue and validation |
/// | seating | Arc<SeatingService> | generation runs, per-exam locks |
#[derive(Clone, Debug)]
pub struct ServerState {
    pub config: Config,
    pub db: SqlitePool,
    pub jwt_service: Arc<JwtService>,
    pub seating: Arc<SeatingService>,
}

impl ServerState {
    /// Build state around an existing pool
    pub fn new(config: Config, db: SqlitePool) -> Self {
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));
        let seating = Arc::new(SeatingService::new(Arc::new(SqliteSeatingStore::new(
            db.clone(),
        ))));
        Self {
            config,
            db,
            jwt_service,
            seating,
        }
    }

    /// Initialize server state
    ///
    /// 1. work directory (file databases only)
    /// 2. database pool and migrations
    /// 3. services
    pub async fn initialize(config: &Config) -> Result<Self> {
        if !config.database_url.contains(":memory:") {
            std::fs::create_dir_all(&config.work_dir).map_err(|e| {
                ServerError::Config(format!("cannot create work dir {}: {e}", config.work_dir))
            })?;
        }

        let db = DbService::new(&config.database_url, config.db_max_connections).await?;
        tracing::info!(database_url = %config.database_url, "Database ready");

        Ok(Self::new(config.clone(), db.pool))
    }

    pub fn get_db(&self) -> &SqlitePool {
        &self.db
    }

    pub fn get_jwt_service(&self) -> &JwtService {
        &self.jwt_service
    }
}
