use std::sync::Arc;

use axum::{routing::get, Router};

use shared_store::Store;

use crate::handlers::day_schedule;

pub fn schedule_routes(store: Arc<Store>) -> Router {
    Router::new()
        .route("/day", get(day_schedule))
        .with_state(store)
}
