//! First-match-wins rule evaluation.

use crate::profile::PersonProfile;
use crate::telemetry::TelemetrySnapshot;

use super::rules::{RiskAssessment, RiskRule, RULES};

/// Return the highest-priority rule that matches, if any.
pub fn matching_rule(
    person: &PersonProfile,
    telemetry: &TelemetrySnapshot,
) -> Option<&'static RiskRule> {
    RULES.iter().find(|rule| rule.matches(person, telemetry))
}

/// Classify a (person, telemetry) pair.
///
/// Rules are tried in table order and evaluation stops at the first match;
/// later rules are never consulted. With no match the result is SAFE.
pub fn evaluate(person: &PersonProfile, telemetry: &TelemetrySnapshot) -> RiskAssessment {
    matching_rule(person, telemetry)
        .map(RiskRule::assessment)
        .unwrap_or_else(RiskAssessment::safe)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::DwellingType;
    use crate::risk::rules::{
        RiskTier, ACUTE_THERMAL_CRISIS, FEELS_LIKE_COMORBIDITY, HEAT_WARNING_VULNERABLE,
        HEAT_WATCH_VULNERABLE_HOUSING, OUTDOOR_HEAT_ELDERLY,
    };
    use crate::telemetry::HeatAdvisoryLevel;

    fn person(
        age: i32,
        conditions: &[&str],
        alone: bool,
        rooftop: bool,
        outdoors: bool,
    ) -> PersonProfile {
        PersonProfile::new(
            "Evaluated",
            age,
            conditions.iter().copied(),
            alone,
            if rooftop {
                DwellingType::RooftopUnit
            } else {
                DwellingType::Other
            },
            outdoors,
            "010-9999-0000",
        )
        .unwrap()
    }

    fn reading(ambient: f64, body: f64, humidity: u8) -> TelemetrySnapshot {
        TelemetrySnapshot::new(ambient, body, humidity).unwrap()
    }

    #[test]
    fn first_match_wins_over_later_danger_rule() {
        let p = person(80, &[], false, false, true);
        let t = reading(34.0, 38.5, 40);
        // Force a WARNING reading too, so rule 2 would also match.
        let mut t_warning = t.clone();
        t_warning.set_environment(35.0, 40).unwrap();
        assert_eq!(t_warning.heat_advisory_level(), HeatAdvisoryLevel::Warning);

        let a = evaluate(&p, &t_warning);
        assert_eq!(a.tier, RiskTier::Danger);
        assert_eq!(a.rule_id, Some(ACUTE_THERMAL_CRISIS));

        let a = evaluate(&p, &t);
        assert_eq!(a.rule_id, Some(ACUTE_THERMAL_CRISIS));
    }

    #[test]
    fn crisis_boundary_is_inclusive() {
        let p = person(30, &[], false, false, false);
        let a = evaluate(&p, &reading(33.0, 38.0, 40));
        assert_eq!(a.tier, RiskTier::Danger);
        assert_eq!(a.rule_id, Some(ACUTE_THERMAL_CRISIS));
    }

    #[test]
    fn warning_with_elderly_is_danger_without_fever() {
        let p = person(75, &[], false, false, false);
        let a = evaluate(&p, &reading(35.2, 36.6, 40));
        assert_eq!(a.tier, RiskTier::Danger);
        assert_eq!(a.rule_id, Some(HEAT_WARNING_VULNERABLE));
    }

    #[test]
    fn comorbidity_beats_housing_rule() {
        // WATCH + rooftop would match rule 4, but rule 3 comes first.
        let p = person(50, &["hypertension"], true, true, false);
        let a = evaluate(&p, &reading(31.0, 36.5, 60));
        assert_eq!(a.tier, RiskTier::Caution);
        assert_eq!(a.rule_id, Some(FEELS_LIKE_COMORBIDITY));
    }

    #[test]
    fn housing_rule_without_conditions() {
        let p = person(50, &[], true, false, false);
        let a = evaluate(&p, &reading(32.0, 36.5, 40));
        assert_eq!(a.rule_id, Some(HEAT_WATCH_VULNERABLE_HOUSING));
    }

    #[test]
    fn outdoor_elderly_rule_is_last_resort() {
        let p = person(72, &[], false, false, true);
        let a = evaluate(&p, &reading(30.5, 36.5, 40));
        assert_eq!(a.tier, RiskTier::Caution);
        assert_eq!(a.rule_id, Some(OUTDOOR_HEAT_ELDERLY));
    }

    #[test]
    fn falls_back_to_safe() {
        let p = person(30, &[], false, false, false);
        let a = evaluate(&p, &reading(24.0, 36.5, 40));
        assert_eq!(a, RiskAssessment::safe());
        assert!(matching_rule(&p, &reading(24.0, 36.5, 40)).is_none());
    }

    #[test]
    fn always_one_tier_over_a_grid() {
        let people = [
            person(30, &[], false, false, false),
            person(75, &["diabetes"], true, true, true),
            person(70, &[], false, true, false),
        ];
        for p in &people {
            for ambient in [20.0, 28.0, 30.0, 31.0, 33.0, 35.0, 36.0] {
                for body in [36.0, 37.5, 38.0, 38.5] {
                    for humidity in [0u8, 40, 80, 100] {
                        let t = reading(ambient, body, humidity);
                        let a = evaluate(p, &t);
                        let expected_tier = matching_rule(p, &t)
                            .map(|r| r.tier)
                            .unwrap_or(RiskTier::Safe);
                        assert_eq!(a.tier, expected_tier);
                    }
                }
            }
        }
    }

    #[test]
    fn evaluation_is_deterministic() {
        let p = person(75, &["diabetes"], true, true, true);
        let t = reading(32.3, 37.7, 55);
        assert_eq!(evaluate(&p, &t), evaluate(&p, &t));
    }
}
