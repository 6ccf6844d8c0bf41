//! Heat-risk classification engine.
//!
//! Pure logic: the caller supplies a profile and a snapshot and gets back
//! a [`RiskAssessment`]. Rules live in a static, ordered table so each one
//! can be tested on its own and reordered without touching the others.

pub mod evaluator;
pub mod rules;

pub use evaluator::{evaluate, matching_rule};
pub use rules::{PresentationTag, RiskAssessment, RiskIcon, RiskRule, RiskTier, RULES};
