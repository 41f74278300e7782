use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub use shared_models::records::{Appointment, AppointmentStatus};

/// Fixed service catalog offered by the clinic.
pub const SERVICE_CATALOG: &[&str] = &[
    "Détartrage et contrôle",
    "Plombage",
    "Consultation orthodontie",
    "Traitement canalaire",
    "Blanchiment",
    "Esthétique dentaire",
];

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAppointmentRequest {
    pub patient_id: Uuid,
    pub service: String,
    pub date_time: DateTime<Utc>,
    pub status: Option<AppointmentStatus>,
    pub notes: Option<String>,
}

/// Per-field patch; an omitted field leaves the stored value unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateAppointmentRequest {
    pub patient_id: Option<Uuid>,
    pub service: Option<String>,
    pub date_time: Option<DateTime<Utc>>,
    pub status: Option<AppointmentStatus>,
    pub notes: Option<String>,
}

/// Public booking submission: patient contact details plus the requested
/// slot. The patient record is found or created by email.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookAppointmentRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub service: String,
    pub date_time: DateTime<Utc>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AppointmentError {
    /// Another appointment already occupies the exact requested instant.
    /// The caller must pick a different time; no automatic retry.
    #[error("SLOT_TAKEN")]
    SlotTaken,
}
