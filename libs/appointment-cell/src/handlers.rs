use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde_json::{json, Value};
use uuid::Uuid;

use patient_cell::services::PatientService;
use shared_models::error::AppError;
use shared_store::Store;

use crate::models::{
    AppointmentError, AppointmentStatus, BookAppointmentRequest, CreateAppointmentRequest,
    UpdateAppointmentRequest, SERVICE_CATALOG,
};
use crate::services::AppointmentService;

impl From<AppointmentError> for AppError {
    fn from(e: AppointmentError) -> Self {
        match e {
            AppointmentError::SlotTaken => AppError::Conflict(e.to_string()),
        }
    }
}

#[axum::debug_handler]
pub async fn list_appointments(State(store): State<Arc<Store>>) -> Json<Value> {
    let service = AppointmentService::new(store);
    let appointments = service.get_appointments();
    let total = appointments.len();

    Json(json!({
        "appointments": appointments,
        "total": total
    }))
}

#[axum::debug_handler]
pub async fn list_services() -> Json<Value> {
    Json(json!({ "services": SERVICE_CATALOG }))
}

#[axum::debug_handler]
pub async fn create_appointment(
    State(store): State<Arc<Store>>,
    Json(request): Json<CreateAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    let service = AppointmentService::new(store);
    let appointment = service.create_appointment(request)?;

    Ok(Json(json!(appointment)))
}

/// Public booking flow: find or create the patient by email, then book
/// the requested slot. Public bookings always start Pending.
#[axum::debug_handler]
pub async fn book_appointment(
    State(store): State<Arc<Store>>,
    Json(request): Json<BookAppointmentRequest>,
) -> Result<Json<Value>, AppError> {
    let patients = PatientService::new(store.clone());
    let patient = patients.find_or_create_patient_by_email(
        &request.email,
        Some(request.name),
        request.phone,
    );

    let service = AppointmentService::new(store);
    let appointment = service.create_appointment(CreateAppointmentRequest {
        patient_id: patient.id,
        service: request.service,
        date_time: request.date_time,
        status: Some(AppointmentStatus::Pending),
        notes: request.notes,
    })?;

    Ok(Json(json!({
        "patient": patient,
        "appointment": appointment
    })))
}

#[axum::debug_handler]
pub async fn update_appointment(
    State(store): State<Arc<Store>>,
    Path(appointment_id): Path<Uuid>,
    Json(patch): Json<UpdateAppointmentRequest>,
) -> Result<StatusCode, AppError> {
    let service = AppointmentService::new(store);
    service.update_appointment(appointment_id, patch)?;

    Ok(StatusCode::NO_CONTENT)
}

#[axum::debug_handler]
pub async fn delete_appointment(
    State(store): State<Arc<Store>>,
    Path(appointment_id): Path<Uuid>,
) -> StatusCode {
    let service = AppointmentService::new(store);
    service.delete_appointment(appointment_id);

    StatusCode::NO_CONTENT
}
