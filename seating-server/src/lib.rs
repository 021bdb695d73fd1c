//! Exam Seating Server
//!
//! Assigns exam candidates to desks across rooms and serves the plans
//! over HTTP.
//!
//! # Module structure
//!
//! ```text
//! seating-server/src/
//! ├── core/      # config, state, server, startup errors
//! ├── auth/      # JWT, argon2, middleware
//! ├── db/        # SQLite pool, migrations, repositories
//! ├── seating/   # eligibility, allocator, service, export
//! ├── api/       # HTTP routes and handlers
//! └── utils/     # logging, validation
//! ```

pub mod api;
pub mod auth;
pub mod core;
pub mod db;
pub mod seating;
pub mod utils;

pub use auth::{CurrentUser, JwtService};
pub use core::{Config, Server, ServerState};
pub use seating::{SeatingError, SeatingService};
pub use utils::{ApiResponse, AppError, AppResult, ErrorCategory, ErrorCode};

pub use utils::logger::{init_logger, init_logger_with_file};

// Security logging macro
#[macro_export]
macro_rules! security_log {
    ($level:expr, $event:expr, $($key:ident = $value:expr),*) => {
        tracing::info!(
            target: "security",
            level = $level,
            event = $event,
            $($key = $value),*
        );
    };
}
