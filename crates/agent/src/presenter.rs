//! Presentation sink.
//!
//! The simulator calls [`Presenter::render`] after every state mutation and
//! once at startup; the dispatcher reports alert progress through
//! [`Presenter::alert_status`]. [`LogPresenter`] renders to `tracing`.

use heatguard_core::alert::{AlertPayload, DeliveryStatus};
use heatguard_core::mode::SimulationMode;
use heatguard_core::profile::PersonProfile;
use heatguard_core::risk::{RiskAssessment, RiskTier};
use heatguard_core::telemetry::TelemetrySnapshot;

pub trait Presenter: Send + Sync {
    fn render(
        &self,
        person: &PersonProfile,
        telemetry: &TelemetrySnapshot,
        assessment: &RiskAssessment,
    );

    fn mode_changed(&self, _mode: SimulationMode) {}

    fn alert_status(&self, payload: &AlertPayload, status: &DeliveryStatus);
}

/// Renders state as structured log events.
#[derive(Debug, Default)]
pub struct LogPresenter;

impl Presenter for LogPresenter {
    fn render(
        &self,
        person: &PersonProfile,
        telemetry: &TelemetrySnapshot,
        assessment: &RiskAssessment,
    ) {
        let conditions = person
            .conditions()
            .iter()
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(", ");

        tracing::debug!(
            name = person.name(),
            age = person.age(),
            conditions = %conditions,
            dwelling = person.dwelling_type().label(),
            location = person.location_label(),
            "Profile",
        );

        tracing::info!(
            ambient_c = telemetry.ambient_temperature_c(),
            feels_like_c = telemetry.feels_like_temperature_c(),
            humidity = telemetry.humidity_percent(),
            advisory = %telemetry.heat_advisory_level(),
            body_c = telemetry.body_temperature_c(),
            fever = telemetry.is_feverish(),
            location = person.location_label(),
            "Telemetry",
        );

        let icon = assessment.icon.glyph();
        match assessment.tier {
            RiskTier::Danger => tracing::warn!(
                tier = %assessment.tier,
                icon,
                rule = assessment.rule_id.unwrap_or("-"),
                "{}",
                assessment.advisory,
            ),
            RiskTier::Caution | RiskTier::Safe => tracing::info!(
                tier = %assessment.tier,
                icon,
                rule = assessment.rule_id.unwrap_or("-"),
                "{}",
                assessment.advisory,
            ),
        }
    }

    fn mode_changed(&self, mode: SimulationMode) {
        let label = if mode.is_auto() { "ON" } else { "OFF" };
        tracing::info!(%mode, "Automatic simulation mode: {label}");
    }

    fn alert_status(&self, payload: &AlertPayload, status: &DeliveryStatus) {
        match status {
            DeliveryStatus::Sending => tracing::info!(
                alert_id = %payload.alert_id,
                recipient = %payload.recipient,
                "Sending location and health data...",
            ),
            DeliveryStatus::Delivered => tracing::info!(
                alert_id = %payload.alert_id,
                recipient = %payload.recipient,
                message = %payload.message,
                "Caregiver has been notified",
            ),
            DeliveryStatus::Failed { reason } => tracing::error!(
                alert_id = %payload.alert_id,
                recipient = %payload.recipient,
                reason = %reason,
                "Emergency alert could not be delivered",
            ),
        }
    }
}
