//! Error types for availability computations.

use thiserror::Error;

/// Errors surfaced by the availability engine.
#[derive(Error, Debug)]
pub enum EngineError {
    /// The injected [`SlotConfig`](crate::config::SlotConfig) is unusable.
    #[error("invalid engine configuration: {0}")]
    Config(String),

    /// A schedule-store read failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Failure reported by a [`ScheduleStore`](crate::store::ScheduleStore).
///
/// Stores sit behind the platform's retry/backoff wrapper, so by the time
/// this error reaches the engine the retries are exhausted. The engine
/// propagates it as-is: absent data must fail the whole computation rather
/// than read as an empty schedule.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("schedule data unavailable: {0}")]
    Unavailable(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, EngineError>;
