//! Fixed demonstration scenarios.
//!
//! Each preset is a complete literal reading plus the person's location,
//! authored so that evaluation deterministically lands on the matching tier
//! for the built-in profile (elderly, with conditions).

use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;
use crate::profile::PersonProfile;
use crate::telemetry::{HeatAdvisoryLevel, TelemetrySnapshot};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioKind {
    Safe,
    Caution,
    Danger,
}

impl ScenarioKind {
    pub const ALL: [ScenarioKind; 3] = [Self::Safe, Self::Caution, Self::Danger];

    pub fn preset(self) -> ScenarioPreset {
        match self {
            Self::Safe => ScenarioPreset {
                telemetry: TelemetrySnapshot::preset(
                    25.0,
                    36.5,
                    40,
                    26.0,
                    HeatAdvisoryLevel::None,
                ),
                location_outdoors: false,
            },
            Self::Caution => ScenarioPreset {
                telemetry: TelemetrySnapshot::preset(
                    31.0,
                    37.2,
                    60,
                    32.0,
                    HeatAdvisoryLevel::Watch,
                ),
                location_outdoors: true,
            },
            Self::Danger => ScenarioPreset {
                telemetry: TelemetrySnapshot::preset(
                    35.5,
                    38.2,
                    70,
                    39.0,
                    HeatAdvisoryLevel::Warning,
                ),
                location_outdoors: true,
            },
        }
    }
}

impl fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Safe => f.write_str("safe"),
            Self::Caution => f.write_str("caution"),
            Self::Danger => f.write_str("danger"),
        }
    }
}

impl FromStr for ScenarioKind {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "safe" => Ok(Self::Safe),
            "caution" => Ok(Self::Caution),
            "danger" => Ok(Self::Danger),
            other => Err(CoreError::UnknownVariant {
                kind: "scenario",
                value: other.to_string(),
            }),
        }
    }
}

/// Literal state installed by a scenario.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioPreset {
    pub telemetry: TelemetrySnapshot,
    pub location_outdoors: bool,
}

impl ScenarioPreset {
    /// Overwrite the live snapshot and the person's location in one step.
    pub fn apply_to(&self, telemetry: &mut TelemetrySnapshot, person: &mut PersonProfile) {
        *telemetry = self.telemetry.clone();
        person.set_location_outdoors(self.location_outdoors);
    }
}
