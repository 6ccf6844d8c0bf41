//! `heatguard-agent` -- heat-risk monitoring daemon.
//!
//! Simulates environment and biometric telemetry for one monitored person,
//! classifies heat risk after every change, and sends an SOS to the
//! caregiver on operator request. Operator commands are read from stdin;
//! see [`heatguard_agent::command`]. Configuration is documented in
//! [`heatguard_agent::config`].

use std::sync::Arc;

use heatguard_agent::command::{self, ConsoleExit};
use heatguard_agent::config::{self, AgentConfig};
use heatguard_agent::monitor::HeatMonitor;
use heatguard_agent::presenter::{LogPresenter, Presenter};
use heatguard_agent::transport;
use heatguard_core::telemetry::TelemetrySnapshot;
use tokio::io::BufReader;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Readings shown before the first tick.
const INITIAL_AMBIENT_C: f64 = 25.0;
const INITIAL_BODY_C: f64 = 36.5;
const INITIAL_HUMIDITY_PERCENT: u8 = 50;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "heatguard_agent=info,heatguard_core=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AgentConfig::from_env().unwrap_or_else(|e| {
        tracing::error!(error = %e, "Invalid configuration");
        std::process::exit(1);
    });

    let person = config::default_profile().unwrap_or_else(|e| {
        tracing::error!(error = %e, "Invalid monitored profile");
        std::process::exit(1);
    });

    let telemetry =
        TelemetrySnapshot::new(INITIAL_AMBIENT_C, INITIAL_BODY_C, INITIAL_HUMIDITY_PERCENT)
            .unwrap_or_else(|e| {
                tracing::error!(error = %e, "Invalid initial telemetry");
                std::process::exit(1);
            });

    let transport = transport::from_config(&config.transport).unwrap_or_else(|e| {
        tracing::error!(error = %e, "Failed to build alert transport");
        std::process::exit(1);
    });

    tracing::info!(
        person = person.name(),
        tick_interval_secs = config.tick_interval.as_secs(),
        transport = ?config.transport,
        "Starting heatguard-agent",
    );

    let presenter: Arc<dyn Presenter> = Arc::new(LogPresenter);
    let monitor = HeatMonitor::new(person, telemetry, presenter, transport);
    monitor.render_current().await;

    let cancel = CancellationToken::new();
    let ticker = monitor.spawn_ticker(config.tick_interval, cancel.clone());

    let shutdown = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("Interrupt received, shutting down");
            shutdown.cancel();
        }
    });

    let stdin = BufReader::new(tokio::io::stdin());
    let exit = command::run_console(&monitor, stdin, cancel.clone()).await;
    if exit == ConsoleExit::InputClosed {
        // Keep monitoring without an operator until interrupted.
        cancel.cancelled().await;
    }

    cancel.cancel();
    match ticker.await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => tracing::error!(error = %e, "Telemetry ticker did not run"),
        Err(e) => tracing::error!(error = %e, "Ticker task failed"),
    }

    // Let pending SOS deliveries report their outcome before exiting.
    monitor.drain_alerts().await;
    tracing::info!("heatguard-agent stopped");
}
