//! `heatguard-agent` library crate.
//!
//! Owns the live telemetry state and wires the pure risk logic from
//! `heatguard-core` to a presenter, an alert transport and a ticker.
//! The binary entrypoint lives in `main.rs`.

pub mod command;
pub mod config;
pub mod dispatcher;
pub mod generator;
pub mod monitor;
pub mod presenter;
pub mod simulator;
pub mod transport;
