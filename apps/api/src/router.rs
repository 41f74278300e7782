use std::sync::Arc;

use axum::{routing::get, Router};

use appointment_cell::router::appointment_routes;
use patient_cell::router::patient_routes;
use schedule_cell::router::schedule_routes;
use shared_store::Store;

pub fn create_router(store: Arc<Store>) -> Router {
    Router::new()
        .route("/", get(|| async { "DentCare clinic API is running!" }))
        .nest("/patients", patient_routes(store.clone()))
        .nest("/appointments", appointment_routes(store.clone()))
        .nest("/schedule", schedule_routes(store))
}
