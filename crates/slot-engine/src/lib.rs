//! # slot-engine
//!
//! Availability slot computation for the TutorGrid tutoring marketplace.
//!
//! Given a course and a date range, the engine determines every bookable
//! start-time/duration combination across the tutors qualified to teach
//! that course. Recurring weekly rules are expanded over the local calendar
//! (DST-correct), one-off exceptions and time-off blocks are subtracted,
//! confirmed appointments and live checkout holds are excluded, candidate
//! starts are aligned to a fixed grid inside lead-time and advance-horizon
//! bounds, and the per-tutor results are merged into one deterministic
//! ordering.
//!
//! The engine is pure and read-only. Persistence, retries, payments, and
//! notifications live behind the [`store::ScheduleStore`] and
//! [`pricing::Pricer`] seams; computed slots are a point-in-time answer,
//! never a reservation.
//!
//! ## Quick start
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use slot_engine::{CourseId, MemoryStore, ProRataPricer, SlotConfig, SlotEngine, Snapshot};
//!
//! let snapshot: Snapshot = serde_json::from_str(
//!     r#"{
//!         "courses": [{ "id": "algebra-1", "student_rate_cents": 6000 }],
//!         "tutors": [{ "id": "t-ada", "display_name": "Ada Posner", "priority": 1,
//!                      "hourly_base_rate_cents": 4500, "active": true }],
//!         "assignments": [{ "tutor_id": "t-ada", "course_id": "algebra-1",
//!                           "status": "approved" }],
//!         "rules": [{ "tutor_id": "t-ada", "weekday": 1,
//!                     "start_time": "09:00", "end_time": "12:00" }]
//!     }"#,
//! )?;
//!
//! let engine = SlotEngine::new(
//!     MemoryStore::from_snapshot(snapshot),
//!     ProRataPricer,
//!     SlotConfig::default(),
//! )?;
//!
//! // Monday 2026-03-16, anchored a week out so lead time is satisfied.
//! let from = Utc.with_ymd_and_hms(2026, 3, 16, 0, 0, 0).unwrap();
//! let to = Utc.with_ymd_and_hms(2026, 3, 17, 0, 0, 0).unwrap();
//! let now = Utc.with_ymd_and_hms(2026, 3, 10, 12, 0, 0).unwrap();
//!
//! let slots = engine.available_slots_at(&CourseId::from("algebra-1"), from, to, now)?;
//! assert_eq!(slots.len(), 5); // 09:00 through 11:00 local, on the half hour
//! assert_eq!(slots[0].durations.len(), 3); // 60, 90, and 120 all fit at 09:00
//! assert_eq!(slots[0].durations[2].price_cents, 12_000);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! ## Modules
//!
//! - [`engine`] — [`SlotEngine`]: course query in, ordered slot list out
//! - [`windows`] — recurring rules + exceptions + time off → availability windows
//! - [`occupancy`] — appointments + live holds → occupied intervals
//! - [`generator`] — grid walking and per-duration fit/collision tests
//! - [`civil`] — fixed-zone civil-time conversion, the single DST boundary
//! - [`interval`] — shared half-open interval predicates
//! - [`store`] — data-access seam and the in-memory snapshot store
//! - [`pricing`] — pricing seam
//! - [`config`] — injected deployment constants
//! - [`model`] — data contracts
//! - [`error`] — error types

pub mod civil;
pub mod config;
pub mod engine;
pub mod error;
pub mod generator;
pub mod interval;
pub mod model;
pub mod occupancy;
pub mod pricing;
pub mod store;
pub mod windows;

pub use config::SlotConfig;
pub use engine::SlotEngine;
pub use error::{EngineError, Result, StoreError};
pub use model::{CourseId, DurationPrice, TimeSlot, TutorId};
pub use pricing::{Pricer, ProRataPricer};
pub use store::{MemoryStore, ScheduleStore, Snapshot};
