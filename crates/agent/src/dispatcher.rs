//! Emergency alert dispatch.
//!
//! [`AlertDispatcher::send_alert`] builds the caregiver payload, reports
//! `Sending` to the presenter and hands delivery to a spawned task, so a
//! slow transport never holds up ticks or evaluations. The returned
//! [`AlertHandle`] resolves to the final [`DeliveryStatus`], which is also
//! pushed to the presenter. Deliveries are tracked so shutdown can wait for
//! every in-flight alert to reach a terminal status.

use std::sync::Arc;

use heatguard_core::alert::{AlertPayload, DeliveryStatus};
use heatguard_core::profile::PersonProfile;
use heatguard_core::telemetry::TelemetrySnapshot;
use tokio::task::JoinHandle;
use tokio_util::task::TaskTracker;
use uuid::Uuid;

use crate::presenter::Presenter;
use crate::transport::Transport;

#[derive(Clone)]
pub struct AlertDispatcher {
    transport: Arc<dyn Transport>,
    presenter: Arc<dyn Presenter>,
    tracker: TaskTracker,
}

impl AlertDispatcher {
    pub fn new(transport: Arc<dyn Transport>, presenter: Arc<dyn Presenter>) -> Self {
        Self {
            transport,
            presenter,
            tracker: TaskTracker::new(),
        }
    }

    /// Fire an alert for the given reading. Must be called from within a
    /// Tokio runtime.
    pub fn send_alert(&self, person: &PersonProfile, telemetry: &TelemetrySnapshot) -> AlertHandle {
        let payload = AlertPayload::new(person, telemetry);
        let alert_id = payload.alert_id;

        tracing::info!(
            %alert_id,
            recipient = %payload.recipient,
            body_c = payload.body_temperature_c,
            "Dispatching emergency alert",
        );
        self.presenter.alert_status(&payload, &DeliveryStatus::Sending);

        let transport = Arc::clone(&self.transport);
        let presenter = Arc::clone(&self.presenter);
        let task = self.tracker.spawn(async move {
            // The transport runs on its own task so a panic inside it still
            // ends in a reported status.
            let delivery = {
                let payload = payload.clone();
                tokio::spawn(async move { transport.deliver(&payload).await })
            };

            let status = match delivery.await {
                Ok(Ok(())) => DeliveryStatus::Delivered,
                Ok(Err(e)) => {
                    tracing::error!(%alert_id, error = %e, "Alert delivery failed");
                    DeliveryStatus::Failed {
                        reason: e.to_string(),
                    }
                }
                Err(e) => {
                    tracing::error!(%alert_id, error = %e, "Alert delivery aborted");
                    DeliveryStatus::Failed {
                        reason: format!("delivery did not complete: {e}"),
                    }
                }
            };
            presenter.alert_status(&payload, &status);
            status
        });

        AlertHandle { alert_id, task }
    }

    /// Number of alerts still being delivered.
    pub fn in_flight(&self) -> usize {
        self.tracker.len()
    }

    /// Wait until every dispatched alert has reported its final status.
    /// Called once at shutdown.
    pub async fn drain(&self) {
        self.tracker.close();
        self.tracker.wait().await;
    }
}

/// Handle to an in-flight alert. Dropping it does not cancel delivery.
pub struct AlertHandle {
    alert_id: Uuid,
    task: JoinHandle<DeliveryStatus>,
}

impl AlertHandle {
    pub fn alert_id(&self) -> Uuid {
        self.alert_id
    }

    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }

    /// Wait for the transport to acknowledge or fail.
    pub async fn status(self) -> DeliveryStatus {
        match self.task.await {
            Ok(status) => status,
            Err(e) => {
                tracing::error!(
                    alert_id = %self.alert_id,
                    error = %e,
                    "Alert task did not complete",
                );
                DeliveryStatus::Failed {
                    reason: format!("dispatch task did not complete: {e}"),
                }
            }
        }
    }
}
