use std::sync::Arc;

use assert_matches::assert_matches;
use chrono::{TimeZone, Utc};
use uuid::Uuid;

use appointment_cell::models::{
    AppointmentError, AppointmentStatus, CreateAppointmentRequest, UpdateAppointmentRequest,
};
use appointment_cell::services::AppointmentService;
use shared_store::{MemoryBackend, Store};

fn setup() -> AppointmentService {
    let store = Arc::new(Store::new(Box::new(MemoryBackend::default())));
    AppointmentService::new(store)
}

fn request_at(hour: u32, minute: u32) -> CreateAppointmentRequest {
    CreateAppointmentRequest {
        patient_id: Uuid::new_v4(),
        service: "Détartrage et contrôle".to_string(),
        date_time: Utc.with_ymd_and_hms(2030, 5, 20, hour, minute, 0).unwrap(),
        status: None,
        notes: None,
    }
}

#[test]
fn created_slot_is_reported_taken() {
    let service = setup();
    let request = request_at(8, 30);
    let date_time = request.date_time;

    service.create_appointment(request).unwrap();

    assert!(service.is_slot_taken(date_time, None));
}

#[test]
fn create_defaults_status_pending_and_notes_empty() {
    let service = setup();

    let appointment = service.create_appointment(request_at(9, 0)).unwrap();

    assert_eq!(appointment.status, AppointmentStatus::Pending);
    assert_eq!(appointment.notes, "");
}

#[test]
fn duplicate_instant_is_rejected_without_partial_write() {
    let service = setup();
    let first = service.create_appointment(request_at(8, 30)).unwrap();

    let result = service.create_appointment(request_at(8, 30));

    assert_matches!(result, Err(AppointmentError::SlotTaken));
    let appointments = service.get_appointments();
    assert_eq!(appointments.len(), 1);
    assert_eq!(appointments[0].id, first.id);
}

#[test]
fn conflict_is_exact_instant_not_interval_overlap() {
    let service = setup();
    service.create_appointment(request_at(9, 0)).unwrap();

    // A quarter hour into the occupied slot is still a different instant
    let nearby = Utc.with_ymd_and_hms(2030, 5, 20, 9, 15, 0).unwrap();
    assert!(!service.is_slot_taken(nearby, None));
}

#[test]
fn update_date_time_round_trips_when_slot_free() {
    let service = setup();
    let appointment = service.create_appointment(request_at(8, 30)).unwrap();
    let target = Utc.with_ymd_and_hms(2030, 5, 20, 10, 0, 0).unwrap();

    service
        .update_appointment(
            appointment.id,
            UpdateAppointmentRequest {
                date_time: Some(target),
                ..Default::default()
            },
        )
        .unwrap();

    let stored = &service.get_appointments()[0];
    assert_eq!(stored.date_time, target);
}

#[test]
fn update_to_occupied_instant_leaves_record_unmodified() {
    let service = setup();
    let blocker = service.create_appointment(request_at(8, 30)).unwrap();
    let victim = service.create_appointment(request_at(9, 0)).unwrap();

    let result = service.update_appointment(
        victim.id,
        UpdateAppointmentRequest {
            date_time: Some(blocker.date_time),
            ..Default::default()
        },
    );

    assert_matches!(result, Err(AppointmentError::SlotTaken));
    let stored = service
        .get_appointments()
        .into_iter()
        .find(|a| a.id == victim.id)
        .unwrap();
    assert_eq!(stored.date_time, victim.date_time);
}

#[test]
fn update_excludes_the_appointment_itself_from_the_conflict_check() {
    let service = setup();
    let appointment = service.create_appointment(request_at(8, 30)).unwrap();

    // Re-submitting the same time with a status change must not conflict
    // with the record being updated
    service
        .update_appointment(
            appointment.id,
            UpdateAppointmentRequest {
                date_time: Some(appointment.date_time),
                status: Some(AppointmentStatus::Confirmed),
                ..Default::default()
            },
        )
        .unwrap();

    let stored = &service.get_appointments()[0];
    assert_eq!(stored.status, AppointmentStatus::Confirmed);
    assert_eq!(stored.date_time, appointment.date_time);
}

#[test]
fn update_unknown_id_is_a_noop() {
    let service = setup();
    let appointment = service.create_appointment(request_at(8, 30)).unwrap();

    service
        .update_appointment(
            Uuid::new_v4(),
            UpdateAppointmentRequest {
                service: Some("Blanchiment".to_string()),
                ..Default::default()
            },
        )
        .unwrap();

    let stored = &service.get_appointments()[0];
    assert_eq!(stored.id, appointment.id);
    assert_eq!(stored.service, "Détartrage et contrôle");
}

#[test]
fn delete_is_idempotent() {
    let service = setup();
    let appointment = service.create_appointment(request_at(8, 30)).unwrap();

    service.delete_appointment(appointment.id);
    service.delete_appointment(appointment.id);

    assert!(service.get_appointments().is_empty());
}

#[test]
fn appointments_are_listed_newest_first() {
    let service = setup();
    service.create_appointment(request_at(8, 30)).unwrap();
    let second = service.create_appointment(request_at(9, 0)).unwrap();

    let appointments = service.get_appointments();
    assert_eq!(appointments.len(), 2);
    assert_eq!(appointments[0].id, second.id);
}
