//! Emergency alert payload and delivery status types.

use serde::Serialize;
use uuid::Uuid;

use crate::profile::PersonProfile;
use crate::telemetry::TelemetrySnapshot;
use crate::types::Timestamp;

/// Notification handed to the alert transport.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertPayload {
    pub alert_id: Uuid,
    /// Caregiver contact the alert is addressed to.
    pub recipient: String,
    pub message: String,
    pub body_temperature_c: f64,
    pub issued_at: Timestamp,
}

impl AlertPayload {
    /// Build the caregiver notification for the current reading.
    pub fn new(person: &PersonProfile, telemetry: &TelemetrySnapshot) -> Self {
        Self {
            alert_id: Uuid::new_v4(),
            recipient: person.caregiver_contact().to_string(),
            message: alert_message(person.name(), telemetry.body_temperature_c()),
            body_temperature_c: telemetry.body_temperature_c(),
            issued_at: chrono::Utc::now(),
        }
    }
}

pub fn alert_message(name: &str, body_temperature_c: f64) -> String {
    format!("{name}: body temperature {body_temperature_c:.1}°C, emergency situation reported!")
}

/// Progress of a single dispatch as seen by the presenter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum DeliveryStatus {
    /// Handed to the transport, not yet acknowledged.
    Sending,
    Delivered,
    Failed { reason: String },
}

impl DeliveryStatus {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, Self::Sending)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::DwellingType;

    fn person() -> PersonProfile {
        PersonProfile::new(
            "Kim Bok-ja",
            75,
            ["hypertension"],
            true,
            DwellingType::RooftopUnit,
            true,
            "010-1234-5678",
        )
        .unwrap()
    }

    #[test]
    fn payload_addresses_caregiver() {
        let t = TelemetrySnapshot::new(35.5, 38.2, 70).unwrap();
        let payload = AlertPayload::new(&person(), &t);
        assert_eq!(payload.recipient, "010-1234-5678");
        assert_eq!(payload.body_temperature_c, 38.2);
        assert!(payload.message.contains("Kim Bok-ja"));
        assert!(payload.message.contains("38.2°C"));
    }

    #[test]
    fn each_payload_gets_a_fresh_id() {
        let t = TelemetrySnapshot::new(25.0, 36.5, 40).unwrap();
        let a = AlertPayload::new(&person(), &t);
        let b = AlertPayload::new(&person(), &t);
        assert_ne!(a.alert_id, b.alert_id);
    }

    #[test]
    fn message_rounds_to_one_decimal() {
        assert_eq!(
            alert_message("A", 38.24),
            "A: body temperature 38.2°C, emergency situation reported!"
        );
    }

    #[test]
    fn status_serializes_with_tag() {
        let json = serde_json::to_value(DeliveryStatus::Failed {
            reason: "offline".to_string(),
        })
        .unwrap();
        assert_eq!(json["status"], "failed");
        assert_eq!(json["reason"], "offline");
        assert_eq!(
            serde_json::to_value(DeliveryStatus::Delivered).unwrap()["status"],
            "delivered"
        );
    }

    #[test]
    fn only_sending_is_non_terminal() {
        assert!(!DeliveryStatus::Sending.is_terminal());
        assert!(DeliveryStatus::Delivered.is_terminal());
    }
}
