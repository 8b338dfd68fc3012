//! Engine configuration. Explicit, immutable, injected.
//!
//! There are no module-level constants to reach for: tests exercise
//! alternate grids and horizons by constructing a different [`SlotConfig`].

use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Booking constants, fixed per deployment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SlotConfig {
    /// The single IANA zone all civil-time arithmetic uses.
    pub timezone: Tz,
    /// Spacing of candidate start times, in minutes. Must divide 60 so grid
    /// marks land on the same minutes-of-hour every hour.
    pub slot_grid_minutes: u32,
    /// Minimum notice between "now" and the earliest offerable start.
    pub lead_time_hours: i64,
    /// How far into the future slots are offered.
    pub max_advance_days: i64,
    /// Candidate session lengths, in minutes.
    pub valid_durations: Vec<u32>,
    /// Cutoff consulted by booking-modification flows (cancel, reschedule).
    /// Slot generation never reads it; it lives here so every deployment
    /// constant has one home.
    pub cancellation_cutoff_hours: i64,
}

impl Default for SlotConfig {
    fn default() -> Self {
        Self {
            timezone: chrono_tz::America::Toronto,
            slot_grid_minutes: 30,
            lead_time_hours: 12,
            max_advance_days: 60,
            valid_durations: vec![60, 90, 120],
            cancellation_cutoff_hours: 24,
        }
    }
}

impl SlotConfig {
    /// Check the configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Config`] when the grid is zero or does not
    /// divide 60, when any horizon is negative, or when the duration list
    /// is empty or contains a zero.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.slot_grid_minutes == 0 || 60 % self.slot_grid_minutes != 0 {
            return Err(EngineError::Config(format!(
                "slot_grid_minutes must be a positive divisor of 60, got {}",
                self.slot_grid_minutes
            )));
        }
        if self.valid_durations.is_empty() {
            return Err(EngineError::Config(
                "valid_durations must not be empty".into(),
            ));
        }
        if self.valid_durations.iter().any(|&d| d == 0) {
            return Err(EngineError::Config(
                "valid_durations must all be positive".into(),
            ));
        }
        if self.lead_time_hours < 0 {
            return Err(EngineError::Config(format!(
                "lead_time_hours must be non-negative, got {}",
                self.lead_time_hours
            )));
        }
        if self.max_advance_days <= 0 {
            return Err(EngineError::Config(format!(
                "max_advance_days must be positive, got {}",
                self.max_advance_days
            )));
        }
        Ok(())
    }

    /// Earliest offerable start for a computation anchored at `now`.
    pub fn lead_edge(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now + Duration::hours(self.lead_time_hours)
    }

    /// Latest offerable start for a computation anchored at `now`.
    pub fn horizon_edge(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now + Duration::days(self.max_advance_days)
    }
}
