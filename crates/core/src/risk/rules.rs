//! Risk tiers and the ordered heat-risk rule table.

use std::fmt;

use crate::profile::{DwellingType, PersonProfile};
use crate::telemetry::{HeatAdvisoryLevel, TelemetrySnapshot};

// ---------------------------------------------------------------------------
// Rule thresholds
// ---------------------------------------------------------------------------

/// Core temperature indicating imminent heat stroke when combined with exposure.
pub const CRISIS_BODY_TEMP_C: f64 = 38.0;

/// Ambient temperature that counts as heat exposure for the crisis rule.
pub const CRISIS_AMBIENT_C: f64 = 33.0;

/// Feels-like temperature that is risky for people with conditions.
pub const COMORBIDITY_FEELS_LIKE_C: f64 = 30.0;

/// Ambient temperature risky for elderly people outdoors.
pub const OUTDOOR_ELDERLY_AMBIENT_C: f64 = 30.0;

// ---------------------------------------------------------------------------
// Outcome types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum RiskTier {
    Safe,
    Caution,
    Danger,
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Safe => f.write_str("SAFE"),
            Self::Caution => f.write_str("CAUTION"),
            Self::Danger => f.write_str("DANGER"),
        }
    }
}

/// Styling hint for presenters; mirrors the tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresentationTag {
    Safe,
    Caution,
    Danger,
}

impl PresentationTag {
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Safe => "safe",
            Self::Caution => "caution",
            Self::Danger => "danger",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RiskIcon {
    Smile,
    Sos,
    Fire,
    Warning,
    House,
    SunBehindCloud,
}

impl RiskIcon {
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Smile => "😊",
            Self::Sos => "🆘",
            Self::Fire => "🔥",
            Self::Warning => "⚠️",
            Self::House => "🏠",
            Self::SunBehindCloud => "🌤️",
        }
    }
}

/// Result of a single evaluation. Never stored.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiskAssessment {
    pub tier: RiskTier,
    pub advisory: &'static str,
    pub presentation_tag: PresentationTag,
    pub icon: RiskIcon,
    /// Identifier of the rule that fired; `None` for the safe fallback.
    pub rule_id: Option<&'static str>,
}

pub const SAFE_ADVISORY: &str = "Current weather and health status are stable.";

impl RiskAssessment {
    /// Outcome when no rule matches.
    pub const fn safe() -> Self {
        Self {
            tier: RiskTier::Safe,
            advisory: SAFE_ADVISORY,
            presentation_tag: PresentationTag::Safe,
            icon: RiskIcon::Smile,
            rule_id: None,
        }
    }
}

// ---------------------------------------------------------------------------
// RiskRule
// ---------------------------------------------------------------------------

type Predicate = fn(&PersonProfile, &TelemetrySnapshot) -> bool;

/// One entry in the rule table: a predicate and the constant outcome it
/// produces on match.
#[derive(Debug, Clone, Copy)]
pub struct RiskRule {
    pub id: &'static str,
    pub tier: RiskTier,
    pub advisory: &'static str,
    pub presentation_tag: PresentationTag,
    pub icon: RiskIcon,
    predicate: Predicate,
}

impl RiskRule {
    pub fn matches(&self, person: &PersonProfile, telemetry: &TelemetrySnapshot) -> bool {
        (self.predicate)(person, telemetry)
    }

    pub fn assessment(&self) -> RiskAssessment {
        RiskAssessment {
            tier: self.tier,
            advisory: self.advisory,
            presentation_tag: self.presentation_tag,
            icon: self.icon,
            rule_id: Some(self.id),
        }
    }
}

pub const ACUTE_THERMAL_CRISIS: &str = "acute_thermal_crisis";
pub const HEAT_WARNING_VULNERABLE: &str = "heat_warning_vulnerable";
pub const FEELS_LIKE_COMORBIDITY: &str = "feels_like_comorbidity";
pub const HEAT_WATCH_VULNERABLE_HOUSING: &str = "heat_watch_vulnerable_housing";
pub const OUTDOOR_HEAT_ELDERLY: &str = "outdoor_heat_elderly";

/// Rules in priority order. The first match wins.
pub static RULES: [RiskRule; 5] = [
    RiskRule {
        id: ACUTE_THERMAL_CRISIS,
        tier: RiskTier::Danger,
        advisory: "Body temperature is 38°C or higher! Heat stroke risk! \
                   Move into the shade now and press the SOS button.",
        presentation_tag: PresentationTag::Danger,
        icon: RiskIcon::Sos,
        predicate: acute_thermal_crisis,
    },
    RiskRule {
        id: HEAT_WARNING_VULNERABLE,
        tier: RiskTier::Danger,
        advisory: "[Life-threatening] Heat wave warning in effect! Do not go out. \
                   Drink water and rest.",
        presentation_tag: PresentationTag::Danger,
        icon: RiskIcon::Fire,
        predicate: heat_warning_vulnerable,
    },
    RiskRule {
        id: FEELS_LIKE_COMORBIDITY,
        tier: RiskTier::Caution,
        advisory: "It is hot. Existing conditions may worsen, so drink more fluids.",
        presentation_tag: PresentationTag::Caution,
        icon: RiskIcon::Warning,
        predicate: feels_like_comorbidity,
    },
    RiskRule {
        id: HEAT_WATCH_VULNERABLE_HOUSING,
        tier: RiskTier::Caution,
        advisory: "Rooftop unit or living alone is a vulnerable setting. Keep the room \
                   ventilated and contact the welfare center.",
        presentation_tag: PresentationTag::Caution,
        icon: RiskIcon::House,
        predicate: heat_watch_vulnerable_housing,
    },
    RiskRule {
        id: OUTDOOR_HEAT_ELDERLY,
        tier: RiskTier::Caution,
        advisory: "It is hot outside. Stop long outdoor activity and take a rest.",
        presentation_tag: PresentationTag::Caution,
        icon: RiskIcon::SunBehindCloud,
        predicate: outdoor_heat_elderly,
    },
];

fn acute_thermal_crisis(person: &PersonProfile, t: &TelemetrySnapshot) -> bool {
    t.body_temperature_c() >= CRISIS_BODY_TEMP_C
        && (t.ambient_temperature_c() >= CRISIS_AMBIENT_C || person.location_outdoors())
}

fn heat_warning_vulnerable(person: &PersonProfile, t: &TelemetrySnapshot) -> bool {
    t.heat_advisory_level() == HeatAdvisoryLevel::Warning
        && (person.is_elderly() || person.has_conditions())
}

fn feels_like_comorbidity(person: &PersonProfile, t: &TelemetrySnapshot) -> bool {
    t.feels_like_temperature_c() >= COMORBIDITY_FEELS_LIKE_C && person.has_conditions()
}

fn heat_watch_vulnerable_housing(person: &PersonProfile, t: &TelemetrySnapshot) -> bool {
    t.heat_advisory_level() == HeatAdvisoryLevel::Watch
        && (person.dwelling_type() == DwellingType::RooftopUnit || person.lives_alone())
}

fn outdoor_heat_elderly(person: &PersonProfile, t: &TelemetrySnapshot) -> bool {
    t.ambient_temperature_c() >= OUTDOOR_ELDERLY_AMBIENT_C
        && person.is_elderly()
        && person.location_outdoors()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
