//! Booked-interval collection.
//!
//! Normalizes the two occupancy sources, confirmed appointments and live
//! checkout holds, into one list of tutor-tagged intervals. Both sources
//! are range-filtered with the shared overlap predicate, so a booking that
//! starts before the queried range but spills into it still counts.

use chrono::{DateTime, Utc};

use crate::interval;
use crate::model::{Appointment, BookedSlot, SlotHold};

/// Collect the occupied intervals overlapping `[from, to]`.
///
/// Appointments count only while their status occupies time; cancelled and
/// no-show records free their interval. Holds count only while unexpired at
/// `now`, regardless of what the store pre-filtered, with their end derived
/// from the held duration.
pub fn collect_booked(
    appointments: &[Appointment],
    holds: &[SlotHold],
    from: DateTime<Utc>,
    to: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Vec<BookedSlot> {
    let mut booked = Vec::new();

    for appt in appointments {
        if appt.status.occupies_time() && interval::overlaps(appt.start, appt.end, from, to) {
            booked.push(BookedSlot {
                tutor_id: appt.tutor_id.clone(),
                start: appt.start,
                end: appt.end,
            });
        }
    }

    for hold in holds {
        if hold.expires_at > now && interval::overlaps(hold.start, hold.end(), from, to) {
            booked.push(BookedSlot {
                tutor_id: hold.tutor_id.clone(),
                start: hold.start,
                end: hold.end(),
            });
        }
    }

    booked
}

/// Merge occupied intervals into a sorted, disjoint busy view clipped to
/// `[window_start, window_end)`.
///
/// Calendar views consume this; slot generation tests collisions against
/// the raw list instead. Adjacent intervals coalesce: a calendar shows one
/// busy block for back-to-back sessions.
pub fn merge_busy(
    booked: &[BookedSlot],
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
) -> Vec<(DateTime<Utc>, DateTime<Utc>)> {
    let mut intervals: Vec<(DateTime<Utc>, DateTime<Utc>)> = booked
        .iter()
        .filter(|b| interval::overlaps(b.start, b.end, window_start, window_end))
        .map(|b| (b.start.max(window_start), b.end.min(window_end)))
        .collect();

    if intervals.is_empty() {
        return Vec::new();
    }

    intervals.sort();

    let mut merged: Vec<(DateTime<Utc>, DateTime<Utc>)> = Vec::with_capacity(intervals.len());
    for (start, end) in intervals {
        match merged.last_mut() {
            Some(last) if start <= last.1 => last.1 = last.1.max(end),
            _ => merged.push((start, end)),
        }
    }

    merged
}
