//! Data contracts between the engine and its collaborators.
//!
//! Rules, exceptions, time off, appointments, and holds are owned and
//! mutated elsewhere (tutor self-service, admin tooling, checkout); the
//! engine reads one consistent snapshot of them per computation and emits
//! ephemeral [`TimeSlot`] values that are never persisted.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a tutor. Opaque to the engine.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TutorId(pub String);

impl fmt::Display for TutorId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TutorId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// Identifier of a course. Opaque to the engine.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseId(pub String);

impl fmt::Display for CourseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CourseId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// One recurring weekly availability rule.
///
/// `weekday` runs 0 = Sunday through 6 = Saturday. Times are local `HH:MM`
/// strings in the platform timezone. The rule-writing side keeps
/// `start_time < end_time` and same-weekday rules disjoint; the engine
/// tolerates violations (a degenerate rule yields no windows, overlapping
/// rules yield the union of their slots).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityRule {
    pub tutor_id: TutorId,
    pub weekday: u8,
    pub start_time: String,
    pub end_time: String,
}

/// A one-off calendar-date override of a tutor's recurring rules.
///
/// The range is inclusive on both ends and compared as calendar dates,
/// never converted to instants. Any exception covering a day suppresses
/// that day's recurring windows, including exceptions with
/// `is_unavailable = false`: no custom per-exception hours are modeled, so
/// an "available" override has nothing to add and behaves exactly like an
/// unavailable one. Preserved as-is; see DESIGN.md.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityException {
    pub tutor_id: TutorId,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub is_unavailable: bool,
}

/// An absolute block of time a tutor is away, regardless of their rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeOff {
    pub tutor_id: TutorId,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Lifecycle state of an appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AppointmentStatus {
    Scheduled,
    Completed,
    Cancelled,
    NoShow,
}

impl AppointmentStatus {
    /// Whether an appointment in this state still occupies its interval.
    /// Cancelled and no-show records free their time.
    pub fn occupies_time(self) -> bool {
        matches!(self, AppointmentStatus::Scheduled | AppointmentStatus::Completed)
    }
}

/// A confirmed booking occupying `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Appointment {
    pub tutor_id: TutorId,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub status: AppointmentStatus,
}

/// A soft reservation taken during an in-progress checkout.
///
/// Occupies `[start, start + duration_minutes)` until `expires_at`;
/// expired holds are ignored everywhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotHold {
    pub tutor_id: TutorId,
    pub start: DateTime<Utc>,
    pub duration_minutes: u32,
    pub expires_at: DateTime<Utc>,
}

impl SlotHold {
    /// Derived end of the held interval.
    pub fn end(&self) -> DateTime<Utc> {
        self.start + Duration::minutes(i64::from(self.duration_minutes))
    }
}

/// Derived: an absolute interval during which a tutor is nominally free,
/// before occupancy subtraction. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvailabilityWindow {
    pub tutor_id: TutorId,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Derived: one occupied interval (appointment or live hold) normalized to
/// the shape collision tests need. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookedSlot {
    pub tutor_id: TutorId,
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// A course as the engine sees it: just enough to validate and price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    /// Hourly rate a student pays for this course, in CAD cents.
    pub student_rate_cents: i64,
}

/// Summary of one tutor eligible to teach a queried course.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TutorSummary {
    pub id: TutorId,
    pub display_name: String,
    /// Ranking weight; lower sorts first among slots with equal starts.
    pub priority: i32,
    /// The tutor's own hourly rate in CAD cents. Payout-side data carried
    /// for display; slot prices are quoted from the course's student rate.
    pub hourly_base_rate_cents: i64,
}

/// One bookable duration at a slot's start, with its quoted price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DurationPrice {
    pub duration_minutes: u32,
    pub price_cents: i64,
}

/// A bookable start instant for one tutor, carrying every duration that
/// both fits the availability window and collides with nothing.
///
/// Slots are a point-in-time answer, not a reservation: holds expire on
/// their own clock and other students book concurrently, so a slot may be
/// gone by the time checkout reaches it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeSlot {
    pub tutor_id: TutorId,
    pub tutor_name: String,
    pub tutor_priority: i32,
    pub course_id: CourseId,
    pub start: DateTime<Utc>,
    /// Ascending by duration; never empty.
    pub durations: Vec<DurationPrice>,
}
