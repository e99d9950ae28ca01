use axum::{routing::post, Router};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/assignments/auto",
            post(handlers::assignment::auto_assign),
        )
        .route(
            "/api/hikes/:id/assign",
            post(handlers::assignment::assign_self),
        )
        .route(
            "/api/hikes/:id/unassign",
            post(handlers::assignment::unassign_self),
        )
}
