//! The monitored individual.
//!
//! A [`PersonProfile`] is fixed for the whole session except for
//! `location_outdoors`, which only scenario application may change.

use std::collections::BTreeSet;

use crate::error::CoreError;

/// Age at which a person is treated as elderly by the risk rules.
pub const ELDERLY_AGE: u32 = 70;

/// Upper bound accepted for `age` at construction.
pub const MAX_AGE: i32 = 150;

/// Kind of dwelling the person lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DwellingType {
    /// Rooftop or attic-style unit; heat-vulnerable.
    RooftopUnit,
    Other,
}

impl DwellingType {
    pub fn label(self) -> &'static str {
        match self {
            Self::RooftopUnit => "rooftop unit",
            Self::Other => "other",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PersonProfile {
    name: String,
    age: u32,
    conditions: BTreeSet<String>,
    lives_alone: bool,
    dwelling_type: DwellingType,
    location_outdoors: bool,
    caregiver_contact: String,
}

impl PersonProfile {
    /// Build a profile, rejecting negative or implausible ages and empty
    /// name / contact strings. Condition tags are trimmed; blank tags are
    /// rejected rather than dropped.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        name: impl Into<String>,
        age: i32,
        conditions: impl IntoIterator<Item = impl Into<String>>,
        lives_alone: bool,
        dwelling_type: DwellingType,
        location_outdoors: bool,
        caregiver_contact: impl Into<String>,
    ) -> Result<Self, CoreError> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(CoreError::Validation("name must not be empty".to_string()));
        }

        validate_age(age)?;

        let mut tags = BTreeSet::new();
        for condition in conditions {
            let condition: String = condition.into();
            let trimmed = condition.trim();
            if trimmed.is_empty() {
                return Err(CoreError::Validation(
                    "condition tags must not be blank".to_string(),
                ));
            }
            tags.insert(trimmed.to_string());
        }

        let caregiver_contact = caregiver_contact.into();
        if caregiver_contact.trim().is_empty() {
            return Err(CoreError::Validation(
                "caregiver_contact must not be empty".to_string(),
            ));
        }

        Ok(Self {
            name,
            age: age as u32,
            conditions: tags,
            lives_alone,
            dwelling_type,
            location_outdoors,
            caregiver_contact,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn age(&self) -> u32 {
        self.age
    }

    pub fn conditions(&self) -> &BTreeSet<String> {
        &self.conditions
    }

    /// Any recorded condition raises the baseline risk.
    pub fn has_conditions(&self) -> bool {
        !self.conditions.is_empty()
    }

    pub fn is_elderly(&self) -> bool {
        self.age >= ELDERLY_AGE
    }

    pub fn lives_alone(&self) -> bool {
        self.lives_alone
    }

    pub fn dwelling_type(&self) -> DwellingType {
        self.dwelling_type
    }

    pub fn location_outdoors(&self) -> bool {
        self.location_outdoors
    }

    pub fn caregiver_contact(&self) -> &str {
        &self.caregiver_contact
    }

    /// Human-readable location line for presenters.
    pub fn location_label(&self) -> &'static str {
        if self.location_outdoors {
            "outdoors"
        } else {
            "resting indoors"
        }
    }

    /// Only scenario application moves the person in or out.
    pub(crate) fn set_location_outdoors(&mut self, outdoors: bool) {
        self.location_outdoors = outdoors;
    }
}

/// Validate that an age is non-negative and within [`MAX_AGE`].
pub fn validate_age(age: i32) -> Result<(), CoreError> {
    if !(0..=MAX_AGE).contains(&age) {
        return Err(CoreError::Validation(format!(
            "age must be between 0 and {MAX_AGE}, got {age}"
        )));
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
