//! Tests for booked-interval collection and the merged busy view.

use chrono::{DateTime, Utc};
use slot_engine::model::{Appointment, AppointmentStatus, SlotHold, TutorId};
use slot_engine::occupancy::{collect_booked, merge_busy};

fn tid() -> TutorId {
    TutorId::from("t-ada")
}

fn instant(s: &str) -> DateTime<Utc> {
    s.parse().unwrap()
}

fn appt(start: &str, end: &str, status: AppointmentStatus) -> Appointment {
    Appointment {
        tutor_id: tid(),
        start: instant(start),
        end: instant(end),
        status,
    }
}

fn hold(start: &str, duration_minutes: u32, expires_at: &str) -> SlotHold {
    SlotHold {
        tutor_id: tid(),
        start: instant(start),
        duration_minutes,
        expires_at: instant(expires_at),
    }
}

const FROM: &str = "2026-03-16T00:00:00Z";
const TO: &str = "2026-03-17T00:00:00Z";
const NOW: &str = "2026-03-10T12:00:00Z";

#[test]
fn scheduled_and_completed_appointments_occupy_time() {
    let appointments = vec![
        appt(
            "2026-03-16T14:00:00Z",
            "2026-03-16T15:00:00Z",
            AppointmentStatus::Scheduled,
        ),
        appt(
            "2026-03-16T16:00:00Z",
            "2026-03-16T17:00:00Z",
            AppointmentStatus::Completed,
        ),
    ];

    let booked = collect_booked(&appointments, &[], instant(FROM), instant(TO), instant(NOW));

    assert_eq!(booked.len(), 2);
    assert_eq!(booked[0].start, instant("2026-03-16T14:00:00Z"));
    assert_eq!(booked[1].start, instant("2026-03-16T16:00:00Z"));
}

#[test]
fn cancelled_and_no_show_appointments_free_their_time() {
    let appointments = vec![
        appt(
            "2026-03-16T14:00:00Z",
            "2026-03-16T15:00:00Z",
            AppointmentStatus::Cancelled,
        ),
        appt(
            "2026-03-16T16:00:00Z",
            "2026-03-16T17:00:00Z",
            AppointmentStatus::NoShow,
        ),
    ];

    let booked = collect_booked(&appointments, &[], instant(FROM), instant(TO), instant(NOW));

    assert!(booked.is_empty());
}

#[test]
fn appointment_spilling_into_the_range_counts() {
    // Starts before the range, ends inside it.
    let appointments = vec![appt(
        "2026-03-15T23:00:00Z",
        "2026-03-16T01:00:00Z",
        AppointmentStatus::Scheduled,
    )];

    let booked = collect_booked(&appointments, &[], instant(FROM), instant(TO), instant(NOW));

    assert_eq!(booked.len(), 1);
    // The interval is reported as stored, not clipped.
    assert_eq!(booked[0].start, instant("2026-03-15T23:00:00Z"));
    assert_eq!(booked[0].end, instant("2026-03-16T01:00:00Z"));
}

#[test]
fn appointment_outside_the_range_is_ignored() {
    let appointments = vec![appt(
        "2026-03-18T14:00:00Z",
        "2026-03-18T15:00:00Z",
        AppointmentStatus::Scheduled,
    )];

    let booked = collect_booked(&appointments, &[], instant(FROM), instant(TO), instant(NOW));

    assert!(booked.is_empty());
}

#[test]
fn live_hold_occupies_its_derived_interval() {
    // 90-minute hold expiring well after "now".
    let holds = vec![hold("2026-03-16T14:00:00Z", 90, "2026-03-10T12:10:00Z")];

    let booked = collect_booked(&[], &holds, instant(FROM), instant(TO), instant(NOW));

    assert_eq!(booked.len(), 1);
    assert_eq!(booked[0].start, instant("2026-03-16T14:00:00Z"));
    assert_eq!(booked[0].end, instant("2026-03-16T15:30:00Z"));
}

#[test]
fn expired_hold_is_ignored() {
    let holds = vec![hold("2026-03-16T14:00:00Z", 90, "2026-03-10T11:59:00Z")];

    let booked = collect_booked(&[], &holds, instant(FROM), instant(TO), instant(NOW));

    assert!(booked.is_empty());
}

#[test]
fn hold_expiring_exactly_now_is_ignored() {
    // Liveness is expires_at > now, strictly.
    let holds = vec![hold("2026-03-16T14:00:00Z", 60, NOW)];

    let booked = collect_booked(&[], &holds, instant(FROM), instant(TO), instant(NOW));

    assert!(booked.is_empty());
}

#[test]
fn merge_busy_coalesces_overlapping_and_adjacent_intervals() {
    let appointments = vec![
        appt(
            "2026-03-16T14:00:00Z",
            "2026-03-16T15:00:00Z",
            AppointmentStatus::Scheduled,
        ),
        // Back-to-back with the first: one busy block in the calendar view.
        appt(
            "2026-03-16T15:00:00Z",
            "2026-03-16T16:00:00Z",
            AppointmentStatus::Scheduled,
        ),
        // Overlaps the second.
        appt(
            "2026-03-16T15:30:00Z",
            "2026-03-16T17:00:00Z",
            AppointmentStatus::Scheduled,
        ),
        // Separate block later in the day.
        appt(
            "2026-03-16T20:00:00Z",
            "2026-03-16T21:00:00Z",
            AppointmentStatus::Scheduled,
        ),
    ];
    let booked = collect_booked(&appointments, &[], instant(FROM), instant(TO), instant(NOW));

    let busy = merge_busy(&booked, instant(FROM), instant(TO));

    assert_eq!(busy.len(), 2);
    assert_eq!(busy[0].0, instant("2026-03-16T14:00:00Z"));
    assert_eq!(busy[0].1, instant("2026-03-16T17:00:00Z"));
    assert_eq!(busy[1].0, instant("2026-03-16T20:00:00Z"));
    assert_eq!(busy[1].1, instant("2026-03-16T21:00:00Z"));
}

#[test]
fn merge_busy_clips_to_the_window() {
    let appointments = vec![appt(
        "2026-03-15T23:00:00Z",
        "2026-03-16T01:00:00Z",
        AppointmentStatus::Scheduled,
    )];
    let booked = collect_booked(&appointments, &[], instant(FROM), instant(TO), instant(NOW));

    let busy = merge_busy(&booked, instant(FROM), instant(TO));

    assert_eq!(busy.len(), 1);
    assert_eq!(busy[0].0, instant(FROM));
    assert_eq!(busy[0].1, instant("2026-03-16T01:00:00Z"));
}

#[test]
fn merge_busy_of_nothing_is_empty() {
    let busy = merge_busy(&[], instant(FROM), instant(TO));
    assert!(busy.is_empty());
}
