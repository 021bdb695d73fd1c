//! Seating API
//!
//! | Path | Method | Auth |
//! |------|--------|------|
//! | /api/seating/generate | POST | admin |
//! | /api/seating/exam/{exam_id} | GET | any user |
//! | /api/seating/export/{exam_id} | GET | any user |

mod handler;

use axum::{
    Router, middleware,
    routing::{get, post},
};

use crate::auth::require_admin;
use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/seating", routes())
}

fn routes() -> Router<ServerState> {
    let read_routes = Router::new()
        .route("/exam/{exam_id}", get(handler::list_for_exam))
        .route("/export/{exam_id}", get(handler::export));

    let manage_routes = Router::new()
        .route("/generate", post(handler::generate))
        .layer(middleware::from_fn(require_admin));

    read_routes.merge(manage_routes)
}
