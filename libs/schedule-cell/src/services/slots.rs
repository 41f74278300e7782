use chrono::{DateTime, Duration, NaiveDate, Utc};

use shared_models::records::{Appointment, Patient};

use crate::models::{ScheduleRow, Segment, Slot};

/// Lazy, finite walk over a day's bookable slots: each segment advances
/// from its start by the interval until reaching (but never including)
/// its end, and segments are concatenated in order. A segment whose
/// length is not an exact multiple of the interval omits the final
/// partial slot. Restartable via `Clone` or a fresh [`iterate_slots`].
#[derive(Debug, Clone)]
pub struct SlotIter {
    date: NaiveDate,
    segments: Vec<Segment>,
    interval: Duration,
    seg_idx: usize,
    cursor: Option<chrono::NaiveTime>,
}

impl Iterator for SlotIter {
    type Item = Slot;

    fn next(&mut self) -> Option<Slot> {
        loop {
            let seg = self.segments.get(self.seg_idx)?;
            let cur = self.cursor.unwrap_or(seg.start);

            if cur < seg.end {
                let slot = Slot {
                    label: cur.format("%H:%M").to_string(),
                    starts_at: self.date.and_time(cur).and_utc(),
                };
                // NaiveTime wraps at midnight; a wrapped cursor means the
                // segment is exhausted.
                let (next_time, wrap) = cur.overflowing_add_signed(self.interval);
                self.cursor = Some(if wrap != 0 { seg.end } else { next_time });
                return Some(slot);
            }

            self.seg_idx += 1;
            self.cursor = None;
        }
    }
}

/// Slots for `date` across `segments`, `interval_min` minutes apart.
pub fn iterate_slots(date: NaiveDate, segments: &[Segment], interval_min: u32) -> SlotIter {
    SlotIter {
        date,
        segments: segments.to_vec(),
        interval: Duration::minutes(i64::from(interval_min)),
        seg_idx: 0,
        cursor: None,
    }
}

/// Half-open slot membership: `slot_start <= instant < slot_start +
/// interval`, so an instant on a boundary belongs to the slot starting
/// there, never the previous one.
pub fn is_in_slot(instant: DateTime<Utc>, slot_start: DateTime<Utc>, interval_min: u32) -> bool {
    let end = slot_start + Duration::minutes(i64::from(interval_min));
    instant >= slot_start && instant < end
}

/// Builds the daily grid: appointments are filtered to the calendar day,
/// then each slot takes the first matching appointment in list order (at
/// most one per row) with its patient resolved.
pub fn day_rows(
    date: NaiveDate,
    segments: &[Segment],
    interval_min: u32,
    appointments: &[Appointment],
    patients: &[Patient],
) -> Vec<ScheduleRow> {
    let day_appointments: Vec<&Appointment> = appointments
        .iter()
        .filter(|a| a.date_time.date_naive() == date)
        .collect();

    iterate_slots(date, segments, interval_min)
        .map(|slot| {
            let appointment = day_appointments
                .iter()
                .find(|a| is_in_slot(a.date_time, slot.starts_at, interval_min))
                .map(|a| (*a).clone());
            let patient = appointment
                .as_ref()
                .and_then(|a| patients.iter().find(|p| p.id == a.patient_id).cloned());

            ScheduleRow {
                slot,
                appointment,
                patient,
            }
        })
        .collect()
}
