use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use serde_json::{json, Value};
use shared_store::{MemoryBackend, Store};
use tower::ServiceExt;

use appointment_cell::router::appointment_routes;
use patient_cell::router::patient_routes;
use schedule_cell::router::schedule_routes;

fn test_app() -> Router {
    let store = Arc::new(Store::new(Box::new(MemoryBackend::default())));
    Router::new()
        .nest("/patients", patient_routes(store.clone()))
        .nest("/appointments", appointment_routes(store.clone()))
        .nest("/schedule", schedule_routes(store))
}

fn json_request(method: Method, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn booking_the_same_slot_twice_returns_409_slot_taken() {
    let app = test_app();

    let booking = json!({
        "name": "Sara",
        "email": "sara@x.com",
        "service": "Plombage",
        "dateTime": "2030-05-20T08:30:00Z"
    });
    let first = app
        .clone()
        .oneshot(json_request(Method::POST, "/appointments/book", booking))
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::OK);

    let conflicting = json!({
        "name": "Omar",
        "email": "omar@x.com",
        "service": "Blanchiment",
        "dateTime": "2030-05-20T08:30:00Z"
    });
    let second = app
        .oneshot(json_request(Method::POST, "/appointments/book", conflicting))
        .await
        .unwrap();
    assert_eq!(second.status(), StatusCode::CONFLICT);

    let body = json_body(second).await;
    assert_eq!(body["error"], "SLOT_TAKEN");
}

#[tokio::test]
async fn booking_twice_with_the_same_email_reuses_the_patient() {
    let app = test_app();

    for (time, service) in [("08:30", "Plombage"), ("09:00", "Plombage")] {
        let booking = json!({
            "name": "Sara",
            "email": "sara@x.com",
            "service": service,
            "dateTime": format!("2030-05-20T{time}:00Z")
        });
        let response = app
            .clone()
            .oneshot(json_request(Method::POST, "/appointments/book", booking))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let response = app
        .oneshot(
            Request::builder()
                .uri("/patients")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = json_body(response).await;
    assert_eq!(body["total"], 1);
}

#[tokio::test]
async fn public_bookings_are_forced_to_pending() {
    let app = test_app();

    let booking = json!({
        "name": "Sara",
        "email": "sara@x.com",
        "service": "Plombage",
        "dateTime": "2030-05-20T08:30:00Z"
    });
    let response = app
        .oneshot(json_request(Method::POST, "/appointments/book", booking))
        .await
        .unwrap();

    let body = json_body(response).await;
    assert_eq!(body["appointment"]["status"], "Pending");
}

#[tokio::test]
async fn patient_crud_round_trip() {
    let app = test_app();

    let created = app
        .clone()
        .oneshot(json_request(
            Method::POST,
            "/patients",
            json!({ "name": "Nadia", "email": "nadia@x.com" }),
        ))
        .await
        .unwrap();
    assert_eq!(created.status(), StatusCode::OK);
    let patient = json_body(created).await;
    let id = patient["id"].as_str().unwrap().to_string();

    let updated = app
        .clone()
        .oneshot(json_request(
            Method::PUT,
            &format!("/patients/{id}"),
            json!({ "phone": "+212 600-111111" }),
        ))
        .await
        .unwrap();
    assert_eq!(updated.status(), StatusCode::NO_CONTENT);

    let deleted = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::DELETE)
                .uri(format!("/patients/{id}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let listed = app
        .oneshot(
            Request::builder()
                .uri("/patients")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let body = json_body(listed).await;
    assert_eq!(body["total"], 0);
}

#[tokio::test]
async fn schedule_day_grid_shows_booked_slot() {
    let app = test_app();

    let booking = json!({
        "name": "Sara",
        "email": "sara@x.com",
        "service": "Plombage",
        "dateTime": "2030-05-20T08:30:00Z"
    });
    app.clone()
        .oneshot(json_request(Method::POST, "/appointments/book", booking))
        .await
        .unwrap();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/schedule/day?date=2030-05-20")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    let rows = body["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 21);
    assert_eq!(rows[0]["slot"]["label"], "08:30");
    assert_eq!(rows[0]["appointment"]["service"], "Plombage");
    assert_eq!(rows[0]["patient"]["name"], "Sara");
    assert!(rows[1]["appointment"].is_null());
}

#[tokio::test]
async fn service_catalog_is_exposed() {
    let app = test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/appointments/services")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    let services = body["services"].as_array().unwrap();
    assert_eq!(services.len(), 6);
    assert!(services.contains(&json!("Plombage")));
}
