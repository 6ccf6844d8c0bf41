//! Synthetic telemetry draws.
//!
//! Every draw is independent of the previous one: no smoothing, no random
//! walk. Values are produced inside their ranges by construction.

use std::ops::RangeInclusive;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const AMBIENT_RANGE_C: RangeInclusive<f64> = 28.0..=36.0;
pub const HUMIDITY_RANGE_PERCENT: RangeInclusive<u8> = 40..=80;
pub const BODY_RANGE_C: RangeInclusive<f64> = 36.0..=38.5;

/// One raw reading, before derived fields are computed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawReading {
    pub ambient_temperature_c: f64,
    pub humidity_percent: u8,
    pub body_temperature_c: f64,
}

pub struct TelemetryGenerator {
    rng: StdRng,
}

impl Default for TelemetryGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl TelemetryGenerator {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    /// Reproducible sequence, for tests.
    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn draw(&mut self) -> RawReading {
        RawReading {
            ambient_temperature_c: round_tenth(self.rng.random_range(AMBIENT_RANGE_C)),
            humidity_percent: self.rng.random_range(HUMIDITY_RANGE_PERCENT),
            body_temperature_c: round_tenth(self.rng.random_range(BODY_RANGE_C)),
        }
    }
}

/// Readings are reported with one decimal place. The range bounds are
/// themselves one-decimal values, so rounding cannot leave the range.
fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
