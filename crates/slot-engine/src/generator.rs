//! Slot generation.
//!
//! Walks each availability window on a fixed local-clock grid and decides,
//! per grid point, which session durations are bookable. A duration is
//! offered at grid point `t` only when the whole candidate interval
//! `[t, t + d)` fits inside the window (`t + d <= window.end`) and collides
//! with no occupied interval. Both checks run per duration: a long session
//! that collides is excluded even when a shorter one at the same start is
//! free.
//!
//! Overlapping windows (from overlapping source rules) are a tolerated
//! upstream data defect. Slots are deduplicated by start instant with the
//! union of the durations each window admits, accumulated in ordered maps
//! so window order never shows in the output.

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Timelike, Utc};
use tracing::trace;

use crate::civil::CivilConverter;
use crate::config::SlotConfig;
use crate::interval;
use crate::model::{
    AvailabilityWindow, BookedSlot, CourseId, DurationPrice, TimeSlot, TutorSummary,
};
use crate::pricing::Pricer;

/// Per-computation temporal bounds: the caller's query range plus the
/// anchor instant for lead-time and advance-horizon filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryBounds {
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
    pub now: DateTime<Utc>,
}

/// Generate every bookable slot for one tutor across their windows.
///
/// Grid points are aligned to the local clock (minute-of-hour a multiple of
/// the grid) and must lie inside the query range and inside the
/// `[now + lead, now + advance]` horizon, both ends inclusive. Returns
/// slots sorted by start, each with an ascending duration list; grid points
/// where nothing is bookable produce no slot at all.
#[allow(clippy::too_many_arguments)]
pub fn generate_slots(
    windows: &[AvailabilityWindow],
    booked: &[BookedSlot],
    tutor: &TutorSummary,
    course_id: &CourseId,
    base_rate_cents: i64,
    bounds: &QueryBounds,
    config: &SlotConfig,
    converter: &CivilConverter,
    pricer: &dyn Pricer,
) -> Vec<TimeSlot> {
    let lead_edge = config.lead_edge(bounds.now);
    let horizon_edge = config.horizon_edge(bounds.now);
    let step = Duration::minutes(i64::from(config.slot_grid_minutes));

    trace!(
        tutor = %tutor.id,
        windows = windows.len(),
        occupied = booked.len(),
        "walking windows"
    );

    // start instant -> duration -> price
    let mut by_start: BTreeMap<DateTime<Utc>, BTreeMap<u32, i64>> = BTreeMap::new();

    for window in windows {
        let mut t = snap_to_grid(window.start, config.slot_grid_minutes, converter);
        while t < window.end {
            if t < lead_edge || t > horizon_edge || t < bounds.from || t > bounds.to {
                t += step;
                continue;
            }
            let durations = by_start.entry(t).or_default();
            for &d in &config.valid_durations {
                let slot_end = t + Duration::minutes(i64::from(d));
                if slot_end > window.end {
                    continue;
                }
                if booked
                    .iter()
                    .any(|b| interval::overlaps(t, slot_end, b.start, b.end))
                {
                    continue;
                }
                durations
                    .entry(d)
                    .or_insert_with(|| pricer.quote_cents(base_rate_cents, d));
            }
            t += step;
        }
    }

    by_start
        .into_iter()
        .filter(|(_, durations)| !durations.is_empty())
        .map(|(start, durations)| TimeSlot {
            tutor_id: tutor.id.clone(),
            tutor_name: tutor.display_name.clone(),
            tutor_priority: tutor.priority,
            course_id: course_id.clone(),
            start,
            durations: durations
                .into_iter()
                .map(|(duration_minutes, price_cents)| DurationPrice {
                    duration_minutes,
                    price_cents,
                })
                .collect(),
        })
        .collect()
}

/// Snap an instant forward to the nearest local-clock grid mark at or after
/// it.
///
/// Window starts come from `HH:MM` rules so they sit on whole minutes; a
/// start already on a grid mark is returned unchanged. Stepping from an
/// aligned mark by whole grid intervals stays aligned through DST
/// transitions because real offset changes are themselves multiples of the
/// grid.
fn snap_to_grid(
    start: DateTime<Utc>,
    grid_minutes: u32,
    converter: &CivilConverter,
) -> DateTime<Utc> {
    let (_, local) = converter.to_civil(start);
    let secs_past_mark = i64::from(local.minute() % grid_minutes) * 60 + i64::from(local.second());
    if secs_past_mark == 0 {
        return start;
    }
    start + Duration::seconds(i64::from(grid_minutes) * 60 - secs_past_mark)
}
