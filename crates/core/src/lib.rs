//! Heat-risk domain logic for HeatGuard.
//!
//! Everything in this crate is pure: no I/O, no runtime, no clocks except
//! when stamping alert payloads. The agent crate owns the live state and
//! wires these types to concrete collaborators.

pub mod alert;
pub mod error;
pub mod mode;
pub mod profile;
pub mod risk;
pub mod scenario;
pub mod telemetry;
pub mod types;
