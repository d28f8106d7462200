use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertKind {
    LowCapacity,
    ReservationConfirmed,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    pub kind: AlertKind,
    pub message: String,
    pub user_id: Option<Uuid>,
    pub match_id: Option<Uuid>,
}

#[derive(Debug, Error)]
#[error("Alert delivery failed: {0}")]
pub struct AlertDeliveryError(pub String);

/// Outbound alert channel. Delivery is fire-and-forget from the
/// caller's point of view; see [`deliver`].
pub trait AlertSink: Send + Sync {
    fn notify(&self, alert: Alert) -> std::result::Result<(), AlertDeliveryError>;
}

/// Sends an alert, logging and discarding any delivery failure so
/// alerting never blocks or fails the primary operation.
pub fn deliver(sink: &dyn AlertSink, alert: Alert) {
    let kind = alert.kind;
    if let Err(e) = sink.notify(alert) {
        tracing::warn!(?kind, error = %e, "alert delivery failed");
    }
}

/// Default sink: writes alerts to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogAlertSink;

impl AlertSink for LogAlertSink {
    fn notify(&self, alert: Alert) -> std::result::Result<(), AlertDeliveryError> {
        tracing::info!(
            kind = ?alert.kind,
            user_id = ?alert.user_id,
            match_id = ?alert.match_id,
            "{}",
            alert.message
        );
        Ok(())
    }
}

/// Sink that records every alert it receives. Used by tests to assert
/// on alert traffic.
#[derive(Debug, Default)]
pub struct RecordingAlertSink {
    received: Mutex<Vec<Alert>>,
}

impl RecordingAlertSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alerts(&self) -> Vec<Alert> {
        self.received.lock().map(|a| a.clone()).unwrap_or_default()
    }

    pub fn count_of(&self, kind: AlertKind) -> usize {
        self.alerts().iter().filter(|a| a.kind == kind).count()
    }
}

impl AlertSink for RecordingAlertSink {
    fn notify(&self, alert: Alert) -> std::result::Result<(), AlertDeliveryError> {
        self.received
            .lock()
            .map_err(|_| AlertDeliveryError("recording sink poisoned".to_string()))?
            .push(alert);
        Ok(())
    }
}
