use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use appointment_cell::services::AppointmentService;
use patient_cell::services::PatientService;
use shared_store::Store;

use crate::models::{default_segments, DEFAULT_INTERVAL_MIN};
use crate::services::slots::day_rows;

#[derive(Debug, Deserialize)]
pub struct DayQuery {
    pub date: NaiveDate,
}

/// The bookable-slot grid for one calendar day, with existing
/// appointments matched into their slots.
pub async fn day_schedule(
    State(store): State<Arc<Store>>,
    Query(query): Query<DayQuery>,
) -> Json<Value> {
    debug!("building schedule grid for {}", query.date);

    let appointments = AppointmentService::new(store.clone()).get_appointments();
    let patients = PatientService::new(store).get_patients();

    let rows = day_rows(
        query.date,
        &default_segments(),
        DEFAULT_INTERVAL_MIN,
        &appointments,
        &patients,
    );

    Json(json!({
        "date": query.date,
        "intervalMin": DEFAULT_INTERVAL_MIN,
        "rows": rows
    }))
}
