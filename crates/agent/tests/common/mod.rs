#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::Notify;

use heatguard_agent::config;
use heatguard_agent::generator::TelemetryGenerator;
use heatguard_agent::presenter::Presenter;
use heatguard_agent::simulator::TelemetrySimulator;
use heatguard_agent::transport::{Transport, TransportError};
use heatguard_core::alert::{AlertPayload, DeliveryStatus};
use heatguard_core::mode::SimulationMode;
use heatguard_core::profile::PersonProfile;
use heatguard_core::risk::RiskAssessment;
use heatguard_core::telemetry::TelemetrySnapshot;

/// One `render` call as seen by the presenter.
#[derive(Debug, Clone)]
pub struct Rendered {
    pub person: PersonProfile,
    pub telemetry: TelemetrySnapshot,
    pub assessment: RiskAssessment,
}

/// Presenter that records everything it is asked to show.
#[derive(Default)]
pub struct RecordingPresenter {
    pub renders: Mutex<Vec<Rendered>>,
    pub modes: Mutex<Vec<SimulationMode>>,
    pub statuses: Mutex<Vec<DeliveryStatus>>,
}

impl RecordingPresenter {
    pub fn render_count(&self) -> usize {
        self.renders.lock().unwrap().len()
    }

    pub fn last_render(&self) -> Option<Rendered> {
        self.renders.lock().unwrap().last().cloned()
    }

    pub fn statuses(&self) -> Vec<DeliveryStatus> {
        self.statuses.lock().unwrap().clone()
    }

    pub fn modes(&self) -> Vec<SimulationMode> {
        self.modes.lock().unwrap().clone()
    }
}

impl Presenter for RecordingPresenter {
    fn render(
        &self,
        person: &PersonProfile,
        telemetry: &TelemetrySnapshot,
        assessment: &RiskAssessment,
    ) {
        self.renders.lock().unwrap().push(Rendered {
            person: person.clone(),
            telemetry: telemetry.clone(),
            assessment: assessment.clone(),
        });
    }

    fn mode_changed(&self, mode: SimulationMode) {
        self.modes.lock().unwrap().push(mode);
    }

    fn alert_status(&self, _payload: &AlertPayload, status: &DeliveryStatus) {
        self.statuses.lock().unwrap().push(status.clone());
    }
}

/// Transport that records payloads and acknowledges immediately.
#[derive(Default)]
pub struct RecordingTransport {
    pub delivered: Mutex<Vec<AlertPayload>>,
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn deliver(&self, payload: &AlertPayload) -> Result<(), TransportError> {
        self.delivered.lock().unwrap().push(payload.clone());
        Ok(())
    }
}

/// Transport that always fails.
pub struct FailingTransport;

#[async_trait]
impl Transport for FailingTransport {
    async fn deliver(&self, _payload: &AlertPayload) -> Result<(), TransportError> {
        Err(TransportError::Unavailable("pager offline".to_string()))
    }
}

/// Transport whose delivery panics.
pub struct PanickingTransport;

#[async_trait]
impl Transport for PanickingTransport {
    async fn deliver(&self, _payload: &AlertPayload) -> Result<(), TransportError> {
        panic!("transport blew up");
    }
}

/// Transport that blocks until released.
#[derive(Default)]
pub struct GatedTransport {
    pub release: Notify,
}

#[async_trait]
impl Transport for GatedTransport {
    async fn deliver(&self, _payload: &AlertPayload) -> Result<(), TransportError> {
        self.release.notified().await;
        Ok(())
    }
}

pub fn test_profile() -> PersonProfile {
    config::default_profile().unwrap()
}

pub fn initial_telemetry() -> TelemetrySnapshot {
    TelemetrySnapshot::new(25.0, 36.5, 50).unwrap()
}

/// Seeded simulator over the built-in profile.
pub fn simulator(presenter: Arc<RecordingPresenter>) -> TelemetrySimulator {
    TelemetrySimulator::with_generator(
        test_profile(),
        initial_telemetry(),
        presenter,
        TelemetryGenerator::with_seed(2024),
    )
}
