use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};
use uuid::Uuid;

use shared_models::records::Appointment;
use shared_store::{Store, APPOINTMENTS_KEY};

use crate::models::{AppointmentError, CreateAppointmentRequest, UpdateAppointmentRequest};

/// CRUD over appointment records with the slot-conflict rule.
///
/// Occupancy is exact-instant equality on the stored timestamp, not
/// interval overlap: bookings are only ever created on the interval grid,
/// so two appointments at the same instant would occupy the same slot.
pub struct AppointmentService {
    store: Arc<Store>,
}

impl AppointmentService {
    pub fn new(store: Arc<Store>) -> Self {
        Self { store }
    }

    /// All appointments in storage order, most recently created first.
    pub fn get_appointments(&self) -> Vec<Appointment> {
        self.store.read(APPOINTMENTS_KEY, Vec::new())
    }

    /// True when any appointment other than `exclude_id` sits at exactly
    /// `date_time`.
    pub fn is_slot_taken(&self, date_time: DateTime<Utc>, exclude_id: Option<Uuid>) -> bool {
        self.get_appointments()
            .iter()
            .any(|a| a.date_time == date_time && Some(a.id) != exclude_id)
    }

    /// Creates an appointment, rejecting the write before any mutation
    /// when the slot is already occupied. Status defaults to Pending and
    /// notes to empty.
    pub fn create_appointment(
        &self,
        request: CreateAppointmentRequest,
    ) -> Result<Appointment, AppointmentError> {
        let _guard = self.store.write_guard();

        if self.is_slot_taken(request.date_time, None) {
            warn!("slot {} already taken", request.date_time);
            return Err(AppointmentError::SlotTaken);
        }

        let appointment = Appointment {
            id: Store::new_id(),
            patient_id: request.patient_id,
            service: request.service,
            date_time: request.date_time,
            status: request.status.unwrap_or_default(),
            notes: request.notes.unwrap_or_default(),
            created_at: Utc::now(),
        };
        debug!(
            "created appointment {} at {}",
            appointment.id, appointment.date_time
        );

        let mut next = vec![appointment.clone()];
        next.extend(self.get_appointments());
        self.store.write(APPOINTMENTS_KEY, &next);

        Ok(appointment)
    }

    /// Merges the present patch fields into the matching record. A patched
    /// `date_time` is checked against every other appointment before any
    /// mutation; unknown ids are a silent no-op.
    pub fn update_appointment(
        &self,
        id: Uuid,
        patch: UpdateAppointmentRequest,
    ) -> Result<(), AppointmentError> {
        let _guard = self.store.write_guard();

        if let Some(date_time) = patch.date_time {
            if self.is_slot_taken(date_time, Some(id)) {
                warn!("slot {} already taken, rejecting update of {}", date_time, id);
                return Err(AppointmentError::SlotTaken);
            }
        }

        let mut appointments = self.get_appointments();
        let Some(appointment) = appointments.iter_mut().find(|a| a.id == id) else {
            debug!("update for unknown appointment {}, ignoring", id);
            return Ok(());
        };

        if let Some(patient_id) = patch.patient_id {
            appointment.patient_id = patient_id;
        }
        if let Some(service) = patch.service {
            appointment.service = service;
        }
        if let Some(date_time) = patch.date_time {
            appointment.date_time = date_time;
        }
        if let Some(status) = patch.status {
            appointment.status = status;
        }
        if let Some(notes) = patch.notes {
            appointment.notes = notes;
        }

        self.store.write(APPOINTMENTS_KEY, &appointments);
        Ok(())
    }

    /// Removes the matching record; deleting an unknown id is a no-op.
    pub fn delete_appointment(&self, id: Uuid) {
        let _guard = self.store.write_guard();

        let remaining: Vec<Appointment> = self
            .get_appointments()
            .into_iter()
            .filter(|a| a.id != id)
            .collect();
        self.store.write(APPOINTMENTS_KEY, &remaining);
    }
}
