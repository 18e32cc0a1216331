//! Background delivery of usage events.

use crate::RecordingConfig;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio_retry2::strategy::{ExponentialBackoff, jitter};
use tokio_retry2::{Retry, RetryError};
use tracing::{debug, error, info, warn};
use tubescribe_core::UsageEvent;
use tubescribe_error::{RetryableError, TubescribeError, TubescribeErrorKind};
use tubescribe_interface::EntitlementService;

enum Command {
    Track(UsageEvent),
    Flush(oneshot::Sender<()>),
}

/// Non-blocking, best-effort reporter of consumed units.
///
/// Events are queued to a single worker task and delivered in order. Each
/// delivery is retried with jittered exponential backoff; after the last
/// retry the event is logged and dropped. The queue is bounded: while it is
/// full, new events are logged and dropped instead of piling up behind an
/// unavailable service. Clones share the worker, which stops once every
/// clone is dropped.
#[derive(Debug, Clone)]
pub struct ConsumptionRecorder {
    tx: mpsc::Sender<Command>,
}

impl ConsumptionRecorder {
    /// Spawns the delivery worker on the current Tokio runtime.
    pub fn spawn(service: Arc<dyn EntitlementService>, config: RecordingConfig) -> Self {
        let (tx, rx) = mpsc::channel((*config.queue_capacity()).max(1));
        tokio::spawn(run_worker(service, config, rx));
        Self { tx }
    }

    /// Queues `event` for delivery, dropping it when the queue is full.
    pub fn record(&self, event: UsageEvent) {
        if let Err(e) = self.tx.try_send(Command::Track(event)) {
            let reason = match &e {
                mpsc::error::TrySendError::Full(_) => "queue full",
                mpsc::error::TrySendError::Closed(_) => "recorder stopped",
            };
            if let Command::Track(event) = e.into_inner() {
                error!(
                    event = %event.event,
                    identity = %event.identity,
                    reason,
                    "Dropping usage event"
                );
            }
        }
    }

    /// Resolves once all previously queued events are delivered or dropped.
    pub async fn flush(&self) {
        let (ack, done) = oneshot::channel();
        if self.tx.send(Command::Flush(ack)).await.is_err() {
            return;
        }
        let _ = done.await;
    }
}

async fn run_worker(
    service: Arc<dyn EntitlementService>,
    config: RecordingConfig,
    mut rx: mpsc::Receiver<Command>,
) {
    while let Some(command) = rx.recv().await {
        match command {
            Command::Track(event) => deliver(service.as_ref(), &config, &event).await,
            Command::Flush(ack) => {
                let _ = ack.send(());
            }
        }
    }
    debug!("Consumption recorder worker exiting");
}

fn is_transient(err: &TubescribeError) -> bool {
    match err.kind() {
        TubescribeErrorKind::Entitlement(e) => e.is_retryable(),
        TubescribeErrorKind::Provider(e) => e.is_retryable(),
        TubescribeErrorKind::Storage(_) => true,
        _ => false,
    }
}

async fn deliver(service: &dyn EntitlementService, config: &RecordingConfig, event: &UsageEvent) {
    let strategy = ExponentialBackoff::from_millis(*config.initial_backoff_ms())
        .factor(2)
        .max_delay(Duration::from_millis(*config.max_backoff_ms()))
        .map(jitter)
        .take(*config.max_retries());

    let result = Retry::spawn(strategy, move || async move {
        service.track(event).await.map_err(|e| {
            if is_transient(&e) {
                warn!(error = %e, event = %event.event, "Usage tracking failed, will retry");
                RetryError::Transient {
                    err: e,
                    retry_after: None,
                }
            } else {
                RetryError::Permanent(e)
            }
        })
    })
    .await;

    match result {
        Ok(()) => info!(event = %event.event, identity = %event.identity, "Usage event tracked"),
        Err(e) => error!(
            error = %e,
            event = %event.event,
            identity = %event.identity,
            "Dropping usage event after failed delivery"
        ),
    }
}
