use crate::auth::JwtConfig;
use crate::core::{Result, ServerError};

/// Server configuration
///
/// # Environment variables
///
/// Every field can be overridden from the environment (a `.env` file is
/// loaded first when present):
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | WORK_DIR | ./data | working directory (database, logs) |
/// | DATABASE_URL | sqlite:<WORK_DIR>/seating.db | sqlx connection url |
/// | HTTP_PORT | 8001 | HTTP listen port |
/// | ENVIRONMENT | development | development / production |
/// | CORS_ORIGINS | * | comma-separated allowed origins |
/// | LOG_LEVEL | info | default filter when RUST_LOG is unset |
/// | LOG_DIR | (unset) | enables daily rolling file logs |
/// | DB_MAX_CONNECTIONS | 5 | sqlite pool size |
/// | JWT_SECRET | generated in debug builds | at least 32 chars |
/// | JWT_EXPIRATION_MINUTES | 1440 | token lifetime |
/// | JWT_ISSUER | seating-server | token issuer |
/// | JWT_AUDIENCE | seating-clients | token audience |
///
/// # Example
///
/// ```ignore
/// WORK_DIR=/srv/seating HTTP_PORT=8080 cargo run -p seating-server
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Working directory for the database file and logs
    pub work_dir: String,
    pub database_url: String,
    pub http_port: u16,
    /// development | staging | production
    pub environment: String,
    /// Empty means any origin
    pub cors_origins: Vec<String>,
    pub log_level: String,
    pub log_dir: Option<String>,
    pub db_max_connections: u32,
    pub jwt: JwtConfig,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let work_dir = std::env::var("WORK_DIR").unwrap_or_else(|_| "./data".into());
        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| format!("sqlite:{}/seating.db", work_dir.trim_end_matches('/')));

        Ok(Self {
            database_url,
            http_port: std::env::var("HTTP_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8001),
            environment: std::env::var("ENVIRONMENT").unwrap_or_else(|_| "development".into()),
            cors_origins: parse_origins(&std::env::var("CORS_ORIGINS").unwrap_or_default()),
            log_level: std::env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into()),
            log_dir: std::env::var("LOG_DIR").ok().filter(|s| !s.is_empty()),
            db_max_connections: std::env::var("DB_MAX_CONNECTIONS")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5),
            jwt: JwtConfig::from_env().map_err(|e| ServerError::Config(e.to_string()))?,
            work_dir,
        })
    }

    /// Configuration for tests: in-memory database, fixed JWT secret
    pub fn for_tests() -> Self {
        Self {
            work_dir: std::env::temp_dir().to_string_lossy().into_owned(),
            database_url: "sqlite::memory:".into(),
            http_port: 0,
            environment: "test".into(),
            cors_origins: Vec::new(),
            log_level: "debug".into(),
            log_dir: None,
            db_max_connections: 1,
            jwt: JwtConfig {
                secret: "test-secret-key-that-is-long-enough-for-hs256".into(),
                expiration_minutes: 60,
                issuer: "seating-server".into(),
                audience: "seating-clients".into(),
            },
        }
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }

    pub fn is_development(&self) -> bool {
        self.environment == "development"
    }
}

/// `*` or an empty value means any origin
fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty() && *o != "*")
        .map(String::from)
        .collect()
}
