//! The availability engine: course query in, ordered slot list out.
//!
//! [`SlotEngine`] wires a schedule store, a pricer, and a validated
//! configuration together. The computation is pure and read-only: it takes
//! no locks, mutates nothing, and two calls over unchanged data return
//! identical output. Results are a point-in-time answer, never a
//! reservation; reserving is the checkout flow's job.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::civil::CivilConverter;
use crate::config::SlotConfig;
use crate::error::Result;
use crate::generator::{self, QueryBounds};
use crate::model::{AvailabilityWindow, BookedSlot, CourseId, TimeSlot, TutorId};
use crate::occupancy;
use crate::pricing::Pricer;
use crate::store::ScheduleStore;
use crate::windows;

/// Availability computation engine for one marketplace deployment.
pub struct SlotEngine<S, P> {
    store: S,
    pricer: P,
    config: SlotConfig,
    converter: CivilConverter,
}

impl<S: ScheduleStore, P: Pricer> SlotEngine<S, P> {
    /// Construct an engine, validating the configuration up front.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Config`](crate::error::EngineError::Config)
    /// when the configuration fails [`SlotConfig::validate`].
    pub fn new(store: S, pricer: P, config: SlotConfig) -> Result<Self> {
        config.validate()?;
        let converter = CivilConverter::new(config.timezone);
        Ok(Self {
            store,
            pricer,
            config,
            converter,
        })
    }

    /// The validated configuration this engine runs with.
    pub fn config(&self) -> &SlotConfig {
        &self.config
    }

    /// Every bookable slot for `course_id` in `[from, to]`, anchored at the
    /// current wall clock.
    ///
    /// An unknown course yields an empty list, not an error: from the
    /// student's side "nothing bookable" and "no such course" read the
    /// same. Store failures do propagate.
    pub fn available_slots(
        &self,
        course_id: &CourseId,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<TimeSlot>> {
        self.available_slots_at(course_id, from, to, Utc::now())
    }

    /// Like [`available_slots`](Self::available_slots) with an explicit
    /// anchor for the lead-time and advance-horizon bounds. Fixing `now`
    /// makes the computation fully deterministic.
    pub fn available_slots_at(
        &self,
        course_id: &CourseId,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<Vec<TimeSlot>> {
        let Some(course) = self.store.course(course_id)? else {
            debug!(%course_id, "course not found, no slots");
            return Ok(Vec::new());
        };
        let tutors = self.store.eligible_tutors(course_id)?;
        if tutors.is_empty() {
            debug!(%course_id, "no eligible tutors, no slots");
            return Ok(Vec::new());
        }

        let tutor_ids: Vec<TutorId> = tutors.iter().map(|t| t.id.clone()).collect();
        let appointments = self.store.appointments_overlapping(&tutor_ids, from, to)?;
        let holds = self.store.holds_overlapping(&tutor_ids, from, to)?;
        let booked = occupancy::collect_booked(&appointments, &holds, from, to, now);

        let bounds = QueryBounds { from, to, now };
        let (first_day, last_day) = self.converter.day_span(from, to);

        let mut slots: Vec<TimeSlot> = Vec::new();
        for tutor in &tutors {
            let rules = self.store.rules_for(&tutor.id)?;
            let exceptions = self
                .store
                .exceptions_overlapping(&tutor.id, first_day, last_day)?;
            let time_off = self.store.time_off_overlapping(&tutor.id, from, to)?;
            let windows = windows::build_windows(
                &tutor.id,
                &rules,
                &exceptions,
                &time_off,
                &self.converter,
                from,
                to,
            );

            let tutor_booked: Vec<BookedSlot> = booked
                .iter()
                .filter(|b| b.tutor_id == tutor.id)
                .cloned()
                .collect();

            let mut tutor_slots = generator::generate_slots(
                &windows,
                &tutor_booked,
                tutor,
                course_id,
                course.student_rate_cents,
                &bounds,
                &self.config,
                &self.converter,
                &self.pricer,
            );
            debug!(
                tutor = %tutor.id,
                windows = windows.len(),
                occupied = tutor_booked.len(),
                slots = tutor_slots.len(),
                "tutor availability computed"
            );
            slots.append(&mut tutor_slots);
        }

        // Earliest start first, then tutor priority (lower shows first),
        // then tutor id so equal-priority ties stay stable across runs.
        slots.sort_by(|a, b| {
            a.start
                .cmp(&b.start)
                .then(a.tutor_priority.cmp(&b.tutor_priority))
                .then_with(|| a.tutor_id.cmp(&b.tutor_id))
        });

        debug!(%course_id, total = slots.len(), "slot computation finished");
        Ok(slots)
    }

    /// One tutor's availability windows in `[from, to]`, before occupancy
    /// subtraction, sorted by start. Support and debugging view.
    pub fn tutor_windows(
        &self,
        tutor_id: &TutorId,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<AvailabilityWindow>> {
        let rules = self.store.rules_for(tutor_id)?;
        let (first_day, last_day) = self.converter.day_span(from, to);
        let exceptions = self
            .store
            .exceptions_overlapping(tutor_id, first_day, last_day)?;
        let time_off = self.store.time_off_overlapping(tutor_id, from, to)?;
        let mut windows = windows::build_windows(
            tutor_id,
            &rules,
            &exceptions,
            &time_off,
            &self.converter,
            from,
            to,
        );
        windows.sort_by_key(|w| (w.start, w.end));
        Ok(windows)
    }

    /// One tutor's merged busy intervals (appointments plus live holds)
    /// clipped to `[from, to]`, anchored at the current wall clock.
    pub fn merged_busy(
        &self,
        tutor_id: &TutorId,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<(DateTime<Utc>, DateTime<Utc>)>> {
        self.merged_busy_at(tutor_id, from, to, Utc::now())
    }

    /// Like [`merged_busy`](Self::merged_busy) with an explicit hold-expiry
    /// anchor.
    pub fn merged_busy_at(
        &self,
        tutor_id: &TutorId,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Result<Vec<(DateTime<Utc>, DateTime<Utc>)>> {
        let ids = [tutor_id.clone()];
        let appointments = self.store.appointments_overlapping(&ids, from, to)?;
        let holds = self.store.holds_overlapping(&ids, from, to)?;
        let booked = occupancy::collect_booked(&appointments, &holds, from, to, now);
        Ok(occupancy::merge_busy(&booked, from, to))
    }
}
