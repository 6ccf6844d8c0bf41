//! Operator-facing façade.
//!
//! [`HeatMonitor`] exposes the only externally invocable operations:
//! mode changes, scenario application and the manual SOS alert. It never
//! pages anyone on its own; a DANGER tier is only made observable.

use std::sync::Arc;
use std::time::Duration;

use heatguard_core::mode::SimulationMode;
use heatguard_core::profile::PersonProfile;
use heatguard_core::risk::RiskAssessment;
use heatguard_core::scenario::ScenarioKind;
use heatguard_core::telemetry::TelemetrySnapshot;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::dispatcher::{AlertDispatcher, AlertHandle};
use crate::presenter::Presenter;
use crate::simulator::{StateView, TelemetrySimulator, TickerError};
use crate::transport::Transport;

pub struct HeatMonitor {
    simulator: Arc<TelemetrySimulator>,
    dispatcher: AlertDispatcher,
}

impl HeatMonitor {
    pub fn new(
        person: PersonProfile,
        telemetry: TelemetrySnapshot,
        presenter: Arc<dyn Presenter>,
        transport: Arc<dyn Transport>,
    ) -> Self {
        let simulator = Arc::new(TelemetrySimulator::new(
            person,
            telemetry,
            Arc::clone(&presenter),
        ));
        Self::from_parts(simulator, AlertDispatcher::new(transport, presenter))
    }

    pub fn from_parts(simulator: Arc<TelemetrySimulator>, dispatcher: AlertDispatcher) -> Self {
        Self {
            simulator,
            dispatcher,
        }
    }

    pub fn simulator(&self) -> &Arc<TelemetrySimulator> {
        &self.simulator
    }

    pub async fn set_mode(&self, mode: SimulationMode) {
        self.simulator.set_mode(mode).await;
    }

    pub async fn toggle_mode(&self) -> SimulationMode {
        self.simulator.toggle_mode().await
    }

    pub async fn apply_scenario(&self, kind: ScenarioKind) -> RiskAssessment {
        self.simulator.apply_scenario(kind).await
    }

    pub async fn status(&self) -> StateView {
        self.simulator.view().await
    }

    pub async fn render_current(&self) -> RiskAssessment {
        self.simulator.render_current().await
    }

    /// Send an SOS for the reading current at the time of the call.
    ///
    /// Returns as soon as the alert is handed off; await the handle for
    /// the delivery outcome.
    pub async fn trigger_alert(&self) -> AlertHandle {
        let view = self.simulator.view().await;
        self.dispatcher.send_alert(&view.person, &view.telemetry)
    }

    /// Wait for in-flight alerts to be acknowledged or fail.
    pub async fn drain_alerts(&self) {
        let pending = self.dispatcher.in_flight();
        if pending > 0 {
            tracing::info!(pending, "Waiting for in-flight alerts");
        }
        self.dispatcher.drain().await;
    }

    /// Run the periodic ticker on its own task.
    pub fn spawn_ticker(
        &self,
        period: Duration,
        cancel: CancellationToken,
    ) -> JoinHandle<Result<(), TickerError>> {
        let simulator = Arc::clone(&self.simulator);
        tokio::spawn(async move { simulator.run_ticker(period, cancel).await })
    }
}
