//! Schedule data access.
//!
//! [`ScheduleStore`] is the seam between the engine and the marketplace's
//! persistence layer. Implementations hand back one tutor-and-occupancy
//! snapshot per computation; retries and backoff live outside, so a store
//! error here is final. [`MemoryStore`] implements the trait over a
//! deserialized [`Snapshot`] document and backs the CLI, the docs, and most
//! tests.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::config::SlotConfig;
use crate::error::StoreError;
use crate::interval;
use crate::model::{
    Appointment, AvailabilityException, AvailabilityRule, Course, CourseId, SlotHold, TimeOff,
    TutorId, TutorSummary,
};

/// Read-only access to marketplace schedule data.
///
/// Range queries are inclusive of records that merely spill into the range;
/// implementations should use the same half-open overlap predicate the
/// engine does (see [`crate::interval::overlaps`]).
pub trait ScheduleStore {
    /// Look up a course. `None` (not an error) when it does not exist.
    fn course(&self, id: &CourseId) -> Result<Option<Course>, StoreError>;

    /// Tutors eligible for a course: active tutors holding an approved
    /// assignment, in stored order.
    fn eligible_tutors(&self, course_id: &CourseId) -> Result<Vec<TutorSummary>, StoreError>;

    /// All recurring weekly rules for one tutor.
    fn rules_for(&self, tutor_id: &TutorId) -> Result<Vec<AvailabilityRule>, StoreError>;

    /// Exceptions whose inclusive date range intersects
    /// `[first_day, last_day]` (local calendar days).
    fn exceptions_overlapping(
        &self,
        tutor_id: &TutorId,
        first_day: NaiveDate,
        last_day: NaiveDate,
    ) -> Result<Vec<AvailabilityException>, StoreError>;

    /// Time-off blocks overlapping `[from, to]`.
    fn time_off_overlapping(
        &self,
        tutor_id: &TutorId,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<TimeOff>, StoreError>;

    /// Appointments of any status for the tutor set, overlapping
    /// `[from, to]`. Which statuses occupy time is the collector's rule,
    /// not the store's.
    fn appointments_overlapping(
        &self,
        tutor_ids: &[TutorId],
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Appointment>, StoreError>;

    /// Holds for the tutor set overlapping `[from, to]`, expired or not;
    /// expiry is likewise the collector's rule.
    fn holds_overlapping(
        &self,
        tutor_ids: &[TutorId],
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<SlotHold>, StoreError>;
}

/// A tutor record as stored by the marketplace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tutor {
    pub id: TutorId,
    pub display_name: String,
    pub priority: i32,
    pub hourly_base_rate_cents: i64,
    pub active: bool,
}

/// Review state of a tutor-course assignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssignmentStatus {
    Pending,
    Approved,
    Revoked,
}

/// Links a tutor to a course they may teach once approved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseAssignment {
    pub tutor_id: TutorId,
    pub course_id: CourseId,
    pub status: AssignmentStatus,
}

/// One self-contained marketplace data set: the CLI input format and the
/// fixture format for tests. All sections default to empty so fixtures only
/// spell out what they use.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    /// Engine configuration override; absent means [`SlotConfig::default`].
    pub config: Option<SlotConfig>,
    pub courses: Vec<Course>,
    pub tutors: Vec<Tutor>,
    pub assignments: Vec<CourseAssignment>,
    pub rules: Vec<AvailabilityRule>,
    pub exceptions: Vec<AvailabilityException>,
    pub time_off: Vec<TimeOff>,
    pub appointments: Vec<Appointment>,
    pub holds: Vec<SlotHold>,
}

/// In-memory [`ScheduleStore`] over a snapshot.
///
/// Infallible by construction, but answers through `Result` like any other
/// store so callers exercise the real contract.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    courses: Vec<Course>,
    tutors: Vec<Tutor>,
    assignments: Vec<CourseAssignment>,
    rules: Vec<AvailabilityRule>,
    exceptions: Vec<AvailabilityException>,
    time_off: Vec<TimeOff>,
    appointments: Vec<Appointment>,
    holds: Vec<SlotHold>,
}

impl MemoryStore {
    /// Build a store from a snapshot. The snapshot's `config` section is
    /// the caller's to apply to the engine; the store ignores it.
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        Self {
            courses: snapshot.courses,
            tutors: snapshot.tutors,
            assignments: snapshot.assignments,
            rules: snapshot.rules,
            exceptions: snapshot.exceptions,
            time_off: snapshot.time_off,
            appointments: snapshot.appointments,
            holds: snapshot.holds,
        }
    }
}

impl ScheduleStore for MemoryStore {
    fn course(&self, id: &CourseId) -> Result<Option<Course>, StoreError> {
        Ok(self.courses.iter().find(|c| &c.id == id).cloned())
    }

    fn eligible_tutors(&self, course_id: &CourseId) -> Result<Vec<TutorSummary>, StoreError> {
        let tutors = self
            .tutors
            .iter()
            .filter(|t| t.active)
            .filter(|t| {
                self.assignments.iter().any(|a| {
                    a.tutor_id == t.id
                        && &a.course_id == course_id
                        && a.status == AssignmentStatus::Approved
                })
            })
            .map(|t| TutorSummary {
                id: t.id.clone(),
                display_name: t.display_name.clone(),
                priority: t.priority,
                hourly_base_rate_cents: t.hourly_base_rate_cents,
            })
            .collect();
        Ok(tutors)
    }

    fn rules_for(&self, tutor_id: &TutorId) -> Result<Vec<AvailabilityRule>, StoreError> {
        Ok(self
            .rules
            .iter()
            .filter(|r| &r.tutor_id == tutor_id)
            .cloned()
            .collect())
    }

    fn exceptions_overlapping(
        &self,
        tutor_id: &TutorId,
        first_day: NaiveDate,
        last_day: NaiveDate,
    ) -> Result<Vec<AvailabilityException>, StoreError> {
        Ok(self
            .exceptions
            .iter()
            .filter(|ex| &ex.tutor_id == tutor_id)
            .filter(|ex| ex.start_date <= last_day && ex.end_date >= first_day)
            .cloned()
            .collect())
    }

    fn time_off_overlapping(
        &self,
        tutor_id: &TutorId,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<TimeOff>, StoreError> {
        Ok(self
            .time_off
            .iter()
            .filter(|t| &t.tutor_id == tutor_id)
            .filter(|t| interval::overlaps(t.start, t.end, from, to))
            .cloned()
            .collect())
    }

    fn appointments_overlapping(
        &self,
        tutor_ids: &[TutorId],
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Appointment>, StoreError> {
        Ok(self
            .appointments
            .iter()
            .filter(|a| tutor_ids.contains(&a.tutor_id))
            .filter(|a| interval::overlaps(a.start, a.end, from, to))
            .cloned()
            .collect())
    }

    fn holds_overlapping(
        &self,
        tutor_ids: &[TutorId],
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<SlotHold>, StoreError> {
        Ok(self
            .holds
            .iter()
            .filter(|h| tutor_ids.contains(&h.tutor_id))
            .filter(|h| interval::overlaps(h.start, h.end(), from, to))
            .cloned()
            .collect())
    }
}
