use axum::{
    routing::{delete, get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route(
            "/api/guides/:id/availability",
            post(handlers::availability::create_availability),
        )
        .route(
            "/api/guides/:id/availability",
            get(handlers::availability::list_availability),
        )
        .route(
            "/api/guides/:id/availability/:window_id",
            delete(handlers::availability::delete_availability),
        )
}
