//! Live telemetry state and its transitions.
//!
//! [`TelemetrySimulator`] is the single owner of the monitored person, the
//! current [`TelemetrySnapshot`] and the [`SimulationMode`]. All of them sit
//! behind one mutex: ticks, scenario application, mode changes and reads
//! are serialized, and the presenter is called before the lock is released
//! so renders arrive in mutation order.

use std::sync::Arc;
use std::time::Duration;

use heatguard_core::mode::SimulationMode;
use heatguard_core::profile::PersonProfile;
use heatguard_core::risk::{self, RiskAssessment};
use heatguard_core::scenario::ScenarioKind;
use heatguard_core::telemetry::TelemetrySnapshot;
use tokio::sync::Mutex;
use tokio::time::{Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::generator::TelemetryGenerator;
use crate::presenter::Presenter;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TickerError {
    #[error("tick period must be greater than zero")]
    ZeroPeriod,

    #[error("tick period {0:?} is too large to schedule")]
    PeriodOverflow(Duration),
}

struct SimulatorState {
    person: PersonProfile,
    telemetry: TelemetrySnapshot,
    mode: SimulationMode,
    generator: TelemetryGenerator,
}

/// Consistent copy of the live state plus its evaluation.
#[derive(Debug, Clone, PartialEq)]
pub struct StateView {
    pub person: PersonProfile,
    pub telemetry: TelemetrySnapshot,
    pub mode: SimulationMode,
    pub assessment: RiskAssessment,
}

pub struct TelemetrySimulator {
    state: Mutex<SimulatorState>,
    presenter: Arc<dyn Presenter>,
}

impl TelemetrySimulator {
    /// Start in [`SimulationMode::Auto`] with an OS-seeded generator.
    pub fn new(
        person: PersonProfile,
        telemetry: TelemetrySnapshot,
        presenter: Arc<dyn Presenter>,
    ) -> Self {
        Self::with_generator(person, telemetry, presenter, TelemetryGenerator::new())
    }

    pub fn with_generator(
        person: PersonProfile,
        telemetry: TelemetrySnapshot,
        presenter: Arc<dyn Presenter>,
        generator: TelemetryGenerator,
    ) -> Self {
        Self {
            state: Mutex::new(SimulatorState {
                person,
                telemetry,
                mode: SimulationMode::default(),
                generator,
            }),
            presenter,
        }
    }

    /// Draw a fresh independent reading and render it.
    ///
    /// Returns `None` without touching anything while in manual mode.
    pub async fn tick(&self) -> Option<TelemetrySnapshot> {
        let mut state = self.state.lock().await;
        if !state.mode.is_auto() {
            return None;
        }

        let reading = state.generator.draw();
        let telemetry = match TelemetrySnapshot::new(
            reading.ambient_temperature_c,
            reading.body_temperature_c,
            reading.humidity_percent,
        ) {
            Ok(t) => t,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    ?reading,
                    "Generator produced an invalid reading, tick skipped",
                );
                return None;
            }
        };
        state.telemetry = telemetry;

        tracing::debug!(
            ambient_c = state.telemetry.ambient_temperature_c(),
            humidity = state.telemetry.humidity_percent(),
            body_c = state.telemetry.body_temperature_c(),
            "Telemetry tick",
        );

        self.render_locked(&state);
        Some(state.telemetry.clone())
    }

    /// Switch to manual mode and install a literal scenario.
    pub async fn apply_scenario(&self, kind: ScenarioKind) -> RiskAssessment {
        let mut guard = self.state.lock().await;
        let state = &mut *guard;

        if state.mode != SimulationMode::Manual {
            state.mode = SimulationMode::Manual;
            self.presenter.mode_changed(SimulationMode::Manual);
        }

        kind.preset().apply_to(&mut state.telemetry, &mut state.person);
        tracing::info!(scenario = %kind, "Scenario applied");

        self.render_locked(state)
    }

    /// Set the mode flag. Telemetry is left as is.
    pub async fn set_mode(&self, mode: SimulationMode) {
        let mut state = self.state.lock().await;
        state.mode = mode;
        self.presenter.mode_changed(mode);
    }

    /// Flip between auto and manual, returning the new mode.
    pub async fn toggle_mode(&self) -> SimulationMode {
        let mut state = self.state.lock().await;
        state.mode = state.mode.toggled();
        self.presenter.mode_changed(state.mode);
        state.mode
    }

    pub async fn mode(&self) -> SimulationMode {
        self.state.lock().await.mode
    }

    pub async fn snapshot(&self) -> TelemetrySnapshot {
        self.state.lock().await.telemetry.clone()
    }

    pub async fn profile(&self) -> PersonProfile {
        self.state.lock().await.person.clone()
    }

    /// Evaluate the current state without changing it.
    pub async fn view(&self) -> StateView {
        let state = self.state.lock().await;
        StateView {
            person: state.person.clone(),
            telemetry: state.telemetry.clone(),
            mode: state.mode,
            assessment: risk::evaluate(&state.person, &state.telemetry),
        }
    }

    /// Render the current state, e.g. at startup.
    pub async fn render_current(&self) -> RiskAssessment {
        let state = self.state.lock().await;
        self.render_locked(&state)
    }

    /// Tick every `period` until `cancel` fires.
    ///
    /// The first tick happens one full period after the call. Missed ticks
    /// are skipped, never replayed.
    pub async fn run_ticker(
        &self,
        period: Duration,
        cancel: CancellationToken,
    ) -> Result<(), TickerError> {
        if period.is_zero() {
            return Err(TickerError::ZeroPeriod);
        }
        let start = Instant::now()
            .checked_add(period)
            .ok_or(TickerError::PeriodOverflow(period))?;

        let mut interval = tokio::time::interval_at(start, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        tracing::info!(period_secs = period.as_secs_f64(), "Telemetry ticker started");

        loop {
            tokio::select! {
                _ = cancel.cancelled() => {
                    tracing::info!("Telemetry ticker cancelled");
                    return Ok(());
                }
                _ = interval.tick() => {
                    self.tick().await;
                }
            }
        }
    }

    fn render_locked(&self, state: &SimulatorState) -> RiskAssessment {
        let assessment = risk::evaluate(&state.person, &state.telemetry);
        self.presenter.render(&state.person, &state.telemetry, &assessment);
        assessment
    }
}
