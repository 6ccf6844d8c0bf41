//! Environment and biometric readings plus their derived fields.
//!
//! The feels-like formula and the advisory thresholds are deliberately
//! simple linear approximations and are kept as literal constants.

use std::fmt;

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Derivation constants
// ---------------------------------------------------------------------------

/// Humidity percent is divided by this and added to ambient temperature.
pub const FEELS_LIKE_HUMIDITY_DIVISOR: f64 = 20.0;

/// Ambient temperature at or above which a heat WARNING is in effect.
pub const WARNING_AMBIENT_C: f64 = 35.0;

/// Ambient temperature at or above which a heat WATCH is in effect.
pub const WATCH_AMBIENT_C: f64 = 31.0;

/// Body temperature at or above which presenters emphasise the reading.
pub const FEVER_HIGHLIGHT_C: f64 = 37.5;

/// Largest valid humidity reading.
pub const MAX_HUMIDITY_PERCENT: u8 = 100;

// ---------------------------------------------------------------------------
// HeatAdvisoryLevel
// ---------------------------------------------------------------------------

/// Official heat advisory in effect, derived from ambient temperature.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeatAdvisoryLevel {
    None,
    Watch,
    Warning,
}

impl HeatAdvisoryLevel {
    /// Classify an ambient temperature. Thresholds are inclusive.
    pub fn for_ambient(ambient_c: f64) -> Self {
        if ambient_c >= WARNING_AMBIENT_C {
            Self::Warning
        } else if ambient_c >= WATCH_AMBIENT_C {
            Self::Watch
        } else {
            Self::None
        }
    }
}

impl fmt::Display for HeatAdvisoryLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::None => "none",
            Self::Watch => "heat watch",
            Self::Warning => "heat warning",
        };
        f.write_str(label)
    }
}

/// `ambient + humidity / 20`.
pub fn feels_like_c(ambient_c: f64, humidity_percent: u8) -> f64 {
    ambient_c + f64::from(humidity_percent) / FEELS_LIKE_HUMIDITY_DIVISOR
}

// ---------------------------------------------------------------------------
// TelemetrySnapshot
// ---------------------------------------------------------------------------

/// One environment + biometric reading.
///
/// Fields are private so that `feels_like_temperature_c` and
/// `heat_advisory_level` can never go stale: every write to ambient
/// temperature or humidity goes through [`set_environment`](Self::set_environment).
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetrySnapshot {
    ambient_temperature_c: f64,
    body_temperature_c: f64,
    humidity_percent: u8,
    feels_like_temperature_c: f64,
    heat_advisory_level: HeatAdvisoryLevel,
}

impl TelemetrySnapshot {
    /// Build a snapshot from raw readings and derive the rest.
    pub fn new(
        ambient_temperature_c: f64,
        body_temperature_c: f64,
        humidity_percent: u8,
    ) -> Result<Self, CoreError> {
        validate_temperature(ambient_temperature_c, "ambient_temperature_c")?;
        validate_temperature(body_temperature_c, "body_temperature_c")?;
        validate_humidity(humidity_percent)?;

        Ok(Self {
            ambient_temperature_c,
            body_temperature_c,
            humidity_percent,
            feels_like_temperature_c: feels_like_c(ambient_temperature_c, humidity_percent),
            heat_advisory_level: HeatAdvisoryLevel::for_ambient(ambient_temperature_c),
        })
    }

    /// Install a fixed literal reading, derived fields included.
    ///
    /// Used only by scenario presets, whose values are authored as a
    /// complete snapshot.
    pub(crate) const fn preset(
        ambient_temperature_c: f64,
        body_temperature_c: f64,
        humidity_percent: u8,
        feels_like_temperature_c: f64,
        heat_advisory_level: HeatAdvisoryLevel,
    ) -> Self {
        Self {
            ambient_temperature_c,
            body_temperature_c,
            humidity_percent,
            feels_like_temperature_c,
            heat_advisory_level,
        }
    }

    pub fn ambient_temperature_c(&self) -> f64 {
        self.ambient_temperature_c
    }

    pub fn body_temperature_c(&self) -> f64 {
        self.body_temperature_c
    }

    pub fn humidity_percent(&self) -> u8 {
        self.humidity_percent
    }

    pub fn feels_like_temperature_c(&self) -> f64 {
        self.feels_like_temperature_c
    }

    pub fn heat_advisory_level(&self) -> HeatAdvisoryLevel {
        self.heat_advisory_level
    }

    pub fn is_feverish(&self) -> bool {
        self.body_temperature_c >= FEVER_HIGHLIGHT_C
    }

    /// Replace ambient temperature and humidity, recomputing both derived
    /// fields before returning.
    pub fn set_environment(
        &mut self,
        ambient_temperature_c: f64,
        humidity_percent: u8,
    ) -> Result<(), CoreError> {
        validate_temperature(ambient_temperature_c, "ambient_temperature_c")?;
        validate_humidity(humidity_percent)?;

        self.ambient_temperature_c = ambient_temperature_c;
        self.humidity_percent = humidity_percent;
        self.recompute_derived();
        Ok(())
    }

    /// Body temperature does not feed any derived field.
    pub fn set_body_temperature(&mut self, body_temperature_c: f64) -> Result<(), CoreError> {
        validate_temperature(body_temperature_c, "body_temperature_c")?;
        self.body_temperature_c = body_temperature_c;
        Ok(())
    }

    fn recompute_derived(&mut self) {
        self.feels_like_temperature_c =
            feels_like_c(self.ambient_temperature_c, self.humidity_percent);
        self.heat_advisory_level = HeatAdvisoryLevel::for_ambient(self.ambient_temperature_c);
    }
}

// ---------------------------------------------------------------------------
// Validation functions
// ---------------------------------------------------------------------------

/// Validate that a humidity reading is within `[0, 100]`.
pub fn validate_humidity(humidity_percent: u8) -> Result<(), CoreError> {
    if humidity_percent > MAX_HUMIDITY_PERCENT {
        return Err(CoreError::Validation(format!(
            "humidity_percent must be between 0 and {MAX_HUMIDITY_PERCENT}, got {humidity_percent}"
        )));
    }
    Ok(())
}

/// Validate that a temperature is a finite number.
pub fn validate_temperature(value: f64, name: &str) -> Result<(), CoreError> {
    if !value.is_finite() {
        return Err(CoreError::Validation(format!(
            "{name} must be a finite number, got {value}"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
