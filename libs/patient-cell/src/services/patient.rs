use std::sync::Arc;

use chrono::Utc;
use tracing::debug;
use uuid::Uuid;

use shared_models::records::{Appointment, Patient};
use shared_store::{Store, APPOINTMENTS_KEY, PATIENTS_KEY};

use crate::models::{CreatePatientRequest, UpdatePatientRequest};

/// CRUD over patient records. Every operation is total: unknown ids are
/// ignored and duplicate emails short-circuit to the existing record.
pub struct PatientService {
    store: Arc<Store>,
}

impl PatientService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// All patients in storage order, most recently created first.
    pub fn get_patients(&self) -> Vec<Patient> {
        self.store.read(PATIENTS_KEY, Vec::new())
    }

    /// Creates a patient unless one with the same email (case-insensitive)
    /// already exists, in which case the existing record is returned
    /// unchanged.
    pub fn create_patient(&self, request: CreatePatientRequest) -> Patient {
        let _guard = self.store.write_guard();

        let patients = self.get_patients();
        let email_key = request.email.to_lowercase();
        if let Some(existing) = patients.iter().find(|p| p.email.to_lowercase() == email_key) {
            debug!("patient with email {} already exists", existing.email);
            return existing.clone();
        }

        let patient = Patient {
            id: Store::new_id(),
            name: request.name,
            email: request.email,
            phone: request.phone,
            notes: request.notes,
            created_at: Utc::now(),
        };
        debug!("created patient {}", patient.id);

        let mut next = Vec::with_capacity(patients.len() + 1);
        next.push(patient.clone());
        next.extend(patients);
        self.store.write(PATIENTS_KEY, &next);

        patient
    }

    /// Merges the present patch fields into the matching record; unknown
    /// ids are a silent no-op.
    pub fn update_patient(&self, id: Uuid, patch: UpdatePatientRequest) {
        let _guard = self.store.write_guard();

        let mut patients = self.get_patients();
        let Some(patient) = patients.iter_mut().find(|p| p.id == id) else {
            debug!("update for unknown patient {}, ignoring", id);
            return;
        };

        if let Some(name) = patch.name {
            patient.name = name;
        }
        if let Some(email) = patch.email {
            patient.email = email;
        }
        if let Some(phone) = patch.phone {
            patient.phone = Some(phone);
        }
        if let Some(notes) = patch.notes {
            patient.notes = Some(notes);
        }

        self.store.write(PATIENTS_KEY, &patients);
    }

    /// Removes the patient and cascades to every appointment referencing
    /// them; both collections are persisted under one guard.
    pub fn delete_patient(&self, id: Uuid) {
        let _guard = self.store.write_guard();

        let patients: Vec<Patient> = self
            .get_patients()
            .into_iter()
            .filter(|p| p.id != id)
            .collect();
        self.store.write(PATIENTS_KEY, &patients);

        let appointments: Vec<Appointment> = self.store.read(APPOINTMENTS_KEY, Vec::new());
        let remaining: Vec<Appointment> = appointments
            .into_iter()
            .filter(|a| a.patient_id != id)
            .collect();
        self.store.write(APPOINTMENTS_KEY, &remaining);

        debug!("deleted patient {} and their appointments", id);
    }

    /// Looks a patient up by email (case-insensitive); creates one when
    /// missing, falling back to the local part of the email for the name.
    /// When the patient exists the extra data is ignored.
    pub fn find_or_create_patient_by_email(
        &self,
        email: &str,
        name: Option<String>,
        phone: Option<String>,
    ) -> Patient {
        let email_key = email.to_lowercase();
        if let Some(found) = self
            .get_patients()
            .into_iter()
            .find(|p| p.email.to_lowercase() == email_key)
        {
            return found;
        }

        let name = name
            .filter(|n| !n.is_empty())
            .unwrap_or_else(|| email.split('@').next().unwrap_or(email).to_string());

        self.create_patient(CreatePatientRequest {
            name,
            email: email.to_string(),
            phone,
            notes: Some(String::new()),
        })
    }
}
