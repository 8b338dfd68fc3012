//! Half-open interval predicates shared across the engine.
//!
//! Every range comparison in the crate (occupancy collision tests, store
//! range queries, window clipping) goes through these functions so the
//! overlap semantics live in exactly one place. All intervals are half-open
//! `[start, end)`.

use chrono::{DateTime, Utc};

/// True when `[a_start, a_end)` and `[b_start, b_end)` share any instant.
///
/// Touching intervals do not overlap: a session ending at 10:00 does not
/// conflict with one starting at 10:00. Empty intervals (`start >= end`)
/// overlap nothing.
pub fn overlaps(
    a_start: DateTime<Utc>,
    a_end: DateTime<Utc>,
    b_start: DateTime<Utc>,
    b_end: DateTime<Utc>,
) -> bool {
    a_start < b_end && a_end > b_start
}

/// True when `[inner_start, inner_end)` lies entirely within
/// `[outer_start, outer_end)`.
pub fn contains(
    outer_start: DateTime<Utc>,
    outer_end: DateTime<Utc>,
    inner_start: DateTime<Utc>,
    inner_end: DateTime<Utc>,
) -> bool {
    inner_start >= outer_start && inner_end <= outer_end
}
