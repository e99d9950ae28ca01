use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::{handlers, ApiState};

pub fn routes() -> Router<Arc<ApiState>> {
    Router::new()
        .route("/api/hikes", post(handlers::hike::create_hike))
        .route("/api/hikes", get(handlers::hike::list_hikes))
        .route("/api/hikes/:id", get(handlers::hike::get_hike))
        .route("/api/hikes/:id/slots", get(handlers::hike::get_slots))
}
