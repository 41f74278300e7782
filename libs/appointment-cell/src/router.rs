use std::sync::Arc;

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use shared_store::Store;

use crate::handlers::*;

pub fn appointment_routes(store: Arc<Store>) -> Router {
    Router::new()
        .route("/", get(list_appointments))
        .route("/", post(create_appointment))
        .route("/book", post(book_appointment))
        .route("/services", get(list_services))
        .route("/{id}", put(update_appointment))
        .route("/{id}", delete(delete_appointment))
        .with_state(store)
}
