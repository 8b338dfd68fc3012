//! Pricing seam.
//!
//! Price formulas (promotions, bundles, regional adjustments) live outside
//! the engine; generation only needs "what does this duration cost at this
//! base rate". [`ProRataPricer`] is the stock hourly proration used by the
//! CLI, fixtures, and tests.

/// Quotes a price for one session duration at an hourly base rate.
pub trait Pricer {
    /// Price in cents of a `duration_minutes` session at `base_rate_cents`
    /// per hour.
    fn quote_cents(&self, base_rate_cents: i64, duration_minutes: u32) -> i64;
}

/// Straight hourly proration, rounded half-up to the cent.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProRataPricer;

impl Pricer for ProRataPricer {
    fn quote_cents(&self, base_rate_cents: i64, duration_minutes: u32) -> i64 {
        (base_rate_cents * i64::from(duration_minutes) + 30) / 60
    }
}
