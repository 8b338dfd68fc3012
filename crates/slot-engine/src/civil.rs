//! Civil-time conversion for a single fixed timezone.
//!
//! The marketplace operates in one IANA zone; this module is the only place
//! where wall-clock arithmetic happens. [`CivilConverter`] turns a
//! (calendar date, local time-of-day) pair into an absolute instant and
//! back using the zone's real transition rules via `chrono-tz`, so the rest
//! of the engine works purely on `DateTime<Utc>` values.
//!
//! DST policy, fixed so results are deterministic:
//! - a local time inside a spring-forward gap resolves *forward* to the
//!   first valid wall-clock minute after the gap;
//! - an ambiguous local time during a fall-back overlap resolves to the
//!   *earlier* of the two instants.

use chrono::{DateTime, Duration, LocalResult, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Upper bound on the gap probe, in minutes. Real transitions skip at most
/// a couple of hours; the cap guards against pathological zone data.
const MAX_GAP_PROBE_MINUTES: i64 = 26 * 60;

/// Converts between civil (date, local time) pairs and absolute instants in
/// one fixed timezone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CivilConverter {
    tz: Tz,
}

impl CivilConverter {
    pub fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// The zone this converter is fixed to.
    pub fn timezone(&self) -> Tz {
        self.tz
    }

    /// Convert a civil (date, local time) pair to an absolute instant,
    /// applying the crate's DST policy for gapped and ambiguous times.
    pub fn to_absolute(&self, date: NaiveDate, time: NaiveTime) -> DateTime<Utc> {
        let naive = date.and_time(time);
        match self.tz.from_local_datetime(&naive) {
            LocalResult::Single(dt) => dt.with_timezone(&Utc),
            LocalResult::Ambiguous(earlier, _later) => earlier.with_timezone(&Utc),
            LocalResult::None => self.roll_forward(naive),
        }
    }

    /// Convert an absolute instant to its civil (date, local time) pair.
    pub fn to_civil(&self, instant: DateTime<Utc>) -> (NaiveDate, NaiveTime) {
        let local = instant.with_timezone(&self.tz);
        (local.date_naive(), local.time())
    }

    /// The inclusive local calendar-day span covering `[from, to]`.
    ///
    /// Day boundaries are midnight in the fixed zone, not UTC midnight; an
    /// instant late in the UTC evening can belong to the previous local day.
    pub fn day_span(&self, from: DateTime<Utc>, to: DateTime<Utc>) -> (NaiveDate, NaiveDate) {
        (self.to_civil(from).0, self.to_civil(to).0)
    }

    /// First valid instant at or after a gapped local datetime.
    ///
    /// Walks forward one minute at a time; every real spring-forward gap
    /// ends on a whole minute, so the first hit is the end of the gap.
    fn roll_forward(&self, naive: NaiveDateTime) -> DateTime<Utc> {
        let mut probe = naive;
        for _ in 0..MAX_GAP_PROBE_MINUTES {
            probe += Duration::minutes(1);
            match self.tz.from_local_datetime(&probe) {
                LocalResult::Single(dt) => return dt.with_timezone(&Utc),
                LocalResult::Ambiguous(earlier, _later) => return earlier.with_timezone(&Utc),
                LocalResult::None => continue,
            }
        }
        // Unreachable with real zone data; reading the wall clock as UTC
        // keeps the conversion total instead of panicking.
        Utc.from_utc_datetime(&naive)
    }
}

/// Parse an `HH:MM` local time-of-day string as stored on availability
/// rules.
///
/// Returns `None` for anything malformed. Callers treat that as a
/// data-quality problem in the rule and produce no windows from it rather
/// than failing the whole computation.
pub fn parse_hhmm(s: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(s, "%H:%M").ok()
}
