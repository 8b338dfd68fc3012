//! Tests for expanding recurring rules into absolute availability windows.

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::America::Toronto;
use slot_engine::civil::CivilConverter;
use slot_engine::model::{AvailabilityException, AvailabilityRule, TimeOff, TutorId};
use slot_engine::windows::build_windows;

// ── Helpers ──────────────────────────────────────────────────────────────────

fn tid() -> TutorId {
    TutorId::from("t-ada")
}

fn rule(weekday: u8, start: &str, end: &str) -> AvailabilityRule {
    AvailabilityRule {
        tutor_id: tid(),
        weekday,
        start_time: start.to_string(),
        end_time: end.to_string(),
    }
}

fn exception(start: &str, end: &str, unavailable: bool) -> AvailabilityException {
    AvailabilityException {
        tutor_id: tid(),
        start_date: start.parse::<NaiveDate>().unwrap(),
        end_date: end.parse::<NaiveDate>().unwrap(),
        is_unavailable: unavailable,
    }
}

fn time_off(start: &str, end: &str) -> TimeOff {
    TimeOff {
        tutor_id: tid(),
        start: start.parse().unwrap(),
        end: end.parse().unwrap(),
    }
}

fn instant(s: &str) -> DateTime<Utc> {
    s.parse().unwrap()
}

fn build(
    rules: &[AvailabilityRule],
    exceptions: &[AvailabilityException],
    off: &[TimeOff],
    from: &str,
    to: &str,
) -> Vec<slot_engine::model::AvailabilityWindow> {
    let converter = CivilConverter::new(Toronto);
    let mut windows = build_windows(
        &tid(),
        rules,
        exceptions,
        off,
        &converter,
        instant(from),
        instant(to),
    );
    windows.sort_by_key(|w| w.start);
    windows
}

// ── Rule expansion ───────────────────────────────────────────────────────────

#[test]
fn weekly_rule_expands_once_per_matching_day() {
    // Monday 09:00-12:00 local over two weeks; 2026-03-16 and 2026-03-23 are
    // the Mondays in range. Toronto is EDT (UTC-4), so 09:00 = 13:00 UTC.
    let rules = vec![rule(1, "09:00", "12:00")];
    let windows = build(
        &rules,
        &[],
        &[],
        "2026-03-16T00:00:00Z",
        "2026-03-29T23:59:59Z",
    );

    assert_eq!(windows.len(), 2);
    assert_eq!(windows[0].start, instant("2026-03-16T13:00:00Z"));
    assert_eq!(windows[0].end, instant("2026-03-16T16:00:00Z"));
    assert_eq!(windows[1].start, instant("2026-03-23T13:00:00Z"));
    assert_eq!(windows[1].end, instant("2026-03-23T16:00:00Z"));
}

#[test]
fn weekday_zero_is_sunday() {
    // 2026-03-15 is a Sunday.
    let rules = vec![rule(0, "10:00", "11:00")];
    let windows = build(
        &rules,
        &[],
        &[],
        "2026-03-15T00:00:00Z",
        "2026-03-16T00:00:00Z",
    );

    assert_eq!(windows.len(), 1);
    assert_eq!(windows[0].start, instant("2026-03-15T14:00:00Z"));
}

#[test]
fn expansion_covers_whole_local_days_intersecting_the_range() {
    // The range starts mid-Monday; the Monday window is still produced in
    // full. Clipping candidate starts to the range is the generator's job.
    let rules = vec![rule(1, "09:00", "12:00")];
    let windows = build(
        &rules,
        &[],
        &[],
        "2026-03-16T15:00:00Z",
        "2026-03-17T00:00:00Z",
    );

    assert_eq!(windows.len(), 1);
    assert_eq!(windows[0].start, instant("2026-03-16T13:00:00Z"));
    assert_eq!(windows[0].end, instant("2026-03-16T16:00:00Z"));
}

#[test]
fn rules_for_other_weekdays_do_not_fire() {
    // Saturday rule, queried over a Monday-Friday span.
    let rules = vec![rule(6, "09:00", "12:00")];
    let windows = build(
        &rules,
        &[],
        &[],
        "2026-03-16T00:00:00Z",
        "2026-03-20T23:59:59Z",
    );

    assert!(windows.is_empty());
}

#[test]
fn overlapping_rules_each_emit_their_own_window() {
    // Same weekday, overlapping hours. Both windows come out; slot-level
    // dedup happens downstream.
    let rules = vec![rule(1, "09:00", "12:00"), rule(1, "10:00", "14:00")];
    let windows = build(
        &rules,
        &[],
        &[],
        "2026-03-16T00:00:00Z",
        "2026-03-17T00:00:00Z",
    );

    assert_eq!(windows.len(), 2);
    assert_eq!(windows[0].start, instant("2026-03-16T13:00:00Z"));
    assert_eq!(windows[1].start, instant("2026-03-16T14:00:00Z"));
    assert_eq!(windows[1].end, instant("2026-03-16T18:00:00Z"));
}

// ── Exceptions ───────────────────────────────────────────────────────────────

#[test]
fn unavailable_exception_suppresses_covered_days() {
    let rules = vec![rule(1, "09:00", "12:00")];
    let exceptions = vec![exception("2026-03-16", "2026-03-16", true)];
    let windows = build(
        &rules,
        &exceptions,
        &[],
        "2026-03-16T00:00:00Z",
        "2026-03-29T23:59:59Z",
    );

    // Only the second Monday survives.
    assert_eq!(windows.len(), 1);
    assert_eq!(windows[0].start, instant("2026-03-23T13:00:00Z"));
}

#[test]
fn available_exception_also_suppresses_the_day() {
    // No per-exception hours are modeled, so an "available" override
    // suppresses recurring windows exactly like an unavailable one.
    let rules = vec![rule(1, "09:00", "12:00")];
    let exceptions = vec![exception("2026-03-16", "2026-03-16", false)];
    let windows = build(
        &rules,
        &exceptions,
        &[],
        "2026-03-16T00:00:00Z",
        "2026-03-29T23:59:59Z",
    );

    assert_eq!(windows.len(), 1);
    assert_eq!(windows[0].start, instant("2026-03-23T13:00:00Z"));
}

#[test]
fn multi_day_exception_covers_every_day_in_its_range() {
    let rules = vec![rule(1, "09:00", "12:00")];
    let exceptions = vec![exception("2026-03-14", "2026-03-24", true)];
    let windows = build(
        &rules,
        &exceptions,
        &[],
        "2026-03-16T00:00:00Z",
        "2026-03-29T23:59:59Z",
    );

    // Both Mondays fall inside the exception range.
    assert!(windows.is_empty());
}

#[test]
fn exception_boundary_days_are_inclusive() {
    let rules = vec![rule(1, "09:00", "12:00")];
    // Exception ends exactly on the first Monday.
    let exceptions = vec![exception("2026-03-10", "2026-03-16", true)];
    let windows = build(
        &rules,
        &exceptions,
        &[],
        "2026-03-16T00:00:00Z",
        "2026-03-29T23:59:59Z",
    );

    assert_eq!(windows.len(), 1);
    assert_eq!(windows[0].start, instant("2026-03-23T13:00:00Z"));
}

// ── Time off ─────────────────────────────────────────────────────────────────

#[test]
fn time_off_drops_overlapping_windows_whole() {
    let rules = vec![rule(1, "09:00", "12:00")];
    // Thirty minutes of time off in the middle of the first Monday window.
    let off = vec![time_off("2026-03-16T14:00:00Z", "2026-03-16T14:30:00Z")];
    let windows = build(
        &rules,
        &[],
        &off,
        "2026-03-16T00:00:00Z",
        "2026-03-29T23:59:59Z",
    );

    // The overlapped window disappears entirely; no partial window remains.
    assert_eq!(windows.len(), 1);
    assert_eq!(windows[0].start, instant("2026-03-23T13:00:00Z"));
}

#[test]
fn time_off_touching_a_window_edge_keeps_the_window() {
    let rules = vec![rule(1, "09:00", "12:00")];
    // Ends exactly when the window begins (13:00 UTC).
    let off = vec![time_off("2026-03-16T08:00:00Z", "2026-03-16T13:00:00Z")];
    let windows = build(
        &rules,
        &[],
        &off,
        "2026-03-16T00:00:00Z",
        "2026-03-17T00:00:00Z",
    );

    assert_eq!(windows.len(), 1);
    assert_eq!(windows[0].start, instant("2026-03-16T13:00:00Z"));
}

// ── Bad rule data ────────────────────────────────────────────────────────────

#[test]
fn rule_with_start_after_end_yields_nothing() {
    let rules = vec![rule(1, "12:00", "09:00")];
    let windows = build(
        &rules,
        &[],
        &[],
        "2026-03-16T00:00:00Z",
        "2026-03-17T00:00:00Z",
    );

    assert!(windows.is_empty());
}

#[test]
fn rule_with_equal_start_and_end_yields_nothing() {
    let rules = vec![rule(1, "09:00", "09:00")];
    let windows = build(
        &rules,
        &[],
        &[],
        "2026-03-16T00:00:00Z",
        "2026-03-17T00:00:00Z",
    );

    assert!(windows.is_empty());
}

#[test]
fn rule_with_unparseable_times_yields_nothing() {
    let rules = vec![rule(1, "9am", "noon"), rule(1, "09:00", "25:99")];
    let windows = build(
        &rules,
        &[],
        &[],
        "2026-03-16T00:00:00Z",
        "2026-03-17T00:00:00Z",
    );

    assert!(windows.is_empty());
}

#[test]
fn inverted_query_range_yields_nothing() {
    let rules = vec![rule(1, "09:00", "12:00")];
    let windows = build(
        &rules,
        &[],
        &[],
        "2026-03-17T00:00:00Z",
        "2026-03-16T00:00:00Z",
    );

    assert!(windows.is_empty());
}
