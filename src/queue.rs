//! Queued emission: non-blocking hand-off from the logging pipeline.
//!
//! The queue decouples the logging call site from the throttle wait and the
//! network round-trip. A single worker drains events into the sink, so
//! delivery order and spacing match the direct path.

use crate::error::QueueError;
use crate::event::LogEvent;
use crate::sink::TelegramSink;
use std::sync::Arc;
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

/// Default event queue capacity.
pub const DEFAULT_QUEUE_CAPACITY: usize = 100;

/// Bounded event queue with drop-oldest overflow behavior.
///
/// Sends never block. When the buffer is full, the oldest events are
/// overwritten and surface to the worker as a lag; delivery stays
/// best-effort, matching the sink's contract.
#[derive(Debug, Clone)]
pub struct EventQueue {
    tx: broadcast::Sender<LogEvent>,
}

impl EventQueue {
    /// Create a queue holding at most `capacity` pending events.
    pub fn new(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Queue one event (non-blocking).
    ///
    /// # Returns
    ///
    /// * `Ok(())` - Event queued.
    /// * `Err(QueueError::Closed)` - No active worker.
    pub fn send(&self, event: LogEvent) -> Result<(), QueueError> {
        self.tx.send(event).map_err(|_| QueueError::Closed)?;
        metrics::gauge!("telesink_queue_size").set(self.tx.len() as f64);
        Ok(())
    }

    /// Create a new receiver for this queue.
    pub fn subscribe(&self) -> broadcast::Receiver<LogEvent> {
        self.tx.subscribe()
    }

    /// Current number of pending events.
    pub fn len(&self) -> usize {
        self.tx.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tx.len() == 0
    }
}

/// Worker draining the queue into a sink until cancelled or closed.
///
/// One worker per sink: a single consumer preserves emission order, and the
/// sink's gate spaces the deliveries.
pub struct SinkWorker {
    rx: broadcast::Receiver<LogEvent>,
    sink: Arc<TelegramSink>,
}

impl SinkWorker {
    pub fn new(queue: &EventQueue, sink: Arc<TelegramSink>) -> Self {
        Self {
            rx: queue.subscribe(),
            sink,
        }
    }

    /// Run until the cancellation token fires or the queue closes.
    ///
    /// Lagged receives (events overwritten while the worker was busy) are
    /// logged and counted, then consumption resumes with the oldest event
    /// still buffered.
    pub async fn run(&mut self, cancel: CancellationToken) {
        tracing::info!("sink worker started");

        loop {
            tokio::select! {
                result = self.rx.recv() => {
                    match result {
                        Ok(event) => self.sink.emit(&event).await,
                        Err(broadcast::error::RecvError::Lagged(n)) => {
                            tracing::warn!(
                                dropped_count = n,
                                "queue full, dropped {} oldest events",
                                n
                            );
                            metrics::counter!("telesink_events_dropped_total").increment(n);
                        }
                        Err(broadcast::error::RecvError::Closed) => {
                            tracing::info!("event queue closed");
                            return;
                        }
                    }
                }
                _ = cancel.cancelled() => {
                    tracing::info!("sink worker shutting down");
                    return;
                }
            }
        }
    }
}

impl std::fmt::Debug for SinkWorker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SinkWorker")
            .field("sink", &self.sink)
            .finish()
    }
}
