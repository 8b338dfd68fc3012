//! Availability window builder.
//!
//! Expands a tutor's recurring weekly rules into concrete absolute-time
//! windows over the local calendar days intersecting a query range, then
//! subtracts one-off exceptions (whole days) and time-off blocks (whole
//! windows). Day boundaries are midnight in the platform timezone, not UTC
//! midnight, so rule expansion tracks the wall clock across DST
//! transitions.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use tracing::warn;

use crate::civil::{parse_hhmm, CivilConverter};
use crate::interval;
use crate::model::{AvailabilityException, AvailabilityRule, AvailabilityWindow, TimeOff, TutorId};

/// Expand one tutor's schedule into availability windows covering the local
/// calendar days that intersect `[from, to]`.
///
/// Output is unordered and may contain overlapping windows when the source
/// rules overlapped; slot generation deduplicates downstream.
///
/// Policy notes:
/// - any exception covering a day suppresses it, `is_unavailable` or not
///   (see [`AvailabilityException`]);
/// - a window overlapping time off is dropped whole, never split: partial
///   windows are not offered;
/// - a rule whose times do not parse, or whose start is not before its end,
///   produces no windows (logged, not fatal).
pub fn build_windows(
    tutor_id: &TutorId,
    rules: &[AvailabilityRule],
    exceptions: &[AvailabilityException],
    time_off: &[TimeOff],
    converter: &CivilConverter,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
) -> Vec<AvailabilityWindow> {
    if from > to {
        return Vec::new();
    }
    let (first_day, last_day) = converter.day_span(from, to);

    let mut windows = Vec::new();
    for day in first_day.iter_days().take_while(|d| *d <= last_day) {
        if day_is_suppressed(day, exceptions) {
            continue;
        }
        let weekday = day.weekday().num_days_from_sunday() as u8;
        for rule in rules.iter().filter(|r| r.weekday == weekday) {
            if let Some(window) = expand_rule(tutor_id, rule, day, converter) {
                windows.push(window);
            }
        }
    }

    // Whole-window time-off subtraction: any overlap disqualifies.
    windows.retain(|w| {
        !time_off
            .iter()
            .any(|t| interval::overlaps(w.start, w.end, t.start, t.end))
    });

    windows
}

/// Whether any exception's inclusive date range covers `day`.
///
/// Compared as calendar dates on purpose: converting exception dates to
/// instants first would reintroduce the boundary drift this representation
/// exists to avoid.
fn day_is_suppressed(day: NaiveDate, exceptions: &[AvailabilityException]) -> bool {
    exceptions
        .iter()
        .any(|ex| ex.start_date <= day && day <= ex.end_date)
}

/// Convert one rule on one day into a window, tolerating bad data.
fn expand_rule(
    tutor_id: &TutorId,
    rule: &AvailabilityRule,
    day: NaiveDate,
    converter: &CivilConverter,
) -> Option<AvailabilityWindow> {
    let (Some(start_local), Some(end_local)) =
        (parse_hhmm(&rule.start_time), parse_hhmm(&rule.end_time))
    else {
        warn!(
            tutor = %tutor_id,
            start = %rule.start_time,
            end = %rule.end_time,
            "unparseable rule times, skipping rule"
        );
        return None;
    };
    let start = converter.to_absolute(day, start_local);
    let end = converter.to_absolute(day, end_local);
    if start >= end {
        warn!(tutor = %tutor_id, %day, "rule start is not before its end, skipping");
        return None;
    }
    Some(AvailabilityWindow {
        tutor_id: tutor_id.clone(),
        start,
        end,
    })
}
