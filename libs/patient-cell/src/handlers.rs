use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use shared_store::Store;

use crate::models::{CreatePatientRequest, UpdatePatientRequest};
use crate::services::PatientService;

#[axum::debug_handler]
pub async fn list_patients(State(store): State<Arc<Store>>) -> Json<Value> {
    let service = PatientService::new(store);
    let patients = service.get_patients();
    let total = patients.len();

    Json(json!({
        "patients": patients,
        "total": total
    }))
}

#[axum::debug_handler]
pub async fn create_patient(
    State(store): State<Arc<Store>>,
    Json(request): Json<CreatePatientRequest>,
) -> Json<Value> {
    let service = PatientService::new(store);
    let patient = service.create_patient(request);

    Json(json!(patient))
}

#[axum::debug_handler]
pub async fn update_patient(
    State(store): State<Arc<Store>>,
    Path(patient_id): Path<Uuid>,
    Json(patch): Json<UpdatePatientRequest>,
) -> StatusCode {
    let service = PatientService::new(store);
    service.update_patient(patient_id, patch);

    StatusCode::NO_CONTENT
}

#[axum::debug_handler]
pub async fn delete_patient(
    State(store): State<Arc<Store>>,
    Path(patient_id): Path<Uuid>,
) -> StatusCode {
    let service = PatientService::new(store);
    service.delete_patient(patient_id);

    StatusCode::NO_CONTENT
}
