use chrono::{Duration, Utc};
use tracing::debug;

use shared_models::records::{Appointment, AppointmentStatus, Patient};

use crate::{Store, APPOINTMENTS_KEY, PATIENTS_KEY};

impl Store {
    /// Populates both collections with demo data on first use. Only fires
    /// when the patient collection is empty, so calling it again is a
    /// no-op.
    pub fn seed_if_empty(&self) {
        let _guard = self.write_guard();

        let patients: Vec<Patient> = self.read(PATIENTS_KEY, Vec::new());
        if !patients.is_empty() {
            return;
        }

        debug!("empty store, seeding demo patients and appointments");
        let now = Utc::now();

        let p1 = Patient {
            id: Store::new_id(),
            name: "Sophia Anderson".to_string(),
            email: "sophia@example.com".to_string(),
            phone: Some("+1 (555) 010-5678".to_string()),
            notes: Some("Allergic to penicillin.".to_string()),
            created_at: now,
        };
        let p2 = Patient {
            id: Store::new_id(),
            name: "Marcus Lee".to_string(),
            email: "marcus@example.com".to_string(),
            phone: Some("+1 (555) 010-8910".to_string()),
            notes: Some(String::new()),
            created_at: now,
        };

        let a1 = Appointment {
            id: Store::new_id(),
            patient_id: p1.id,
            service: "Routine Cleaning".to_string(),
            date_time: now + Duration::days(1),
            status: AppointmentStatus::Confirmed,
            notes: "Prefers morning appointments.".to_string(),
            created_at: now,
        };
        let a2 = Appointment {
            id: Store::new_id(),
            patient_id: p2.id,
            service: "Orthodontics Consultation".to_string(),
            date_time: now + Duration::days(2),
            status: AppointmentStatus::Pending,
            notes: String::new(),
            created_at: now,
        };

        self.write(PATIENTS_KEY, &vec![p1, p2]);
        self.write(APPOINTMENTS_KEY, &vec![a1, a2]);
    }
}
