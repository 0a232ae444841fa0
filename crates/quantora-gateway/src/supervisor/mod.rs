//! Producer supervision
//!
//! Owns the background producer tasks. All of them observe a single
//! cancellation token, so one `shutdown` stops every producer.

use crate::broadcast::BroadcastHub;
use crate::producers::{
    run_producer, AiPerformanceProducer, EventProducer, PatternDiscoveryProducer,
    SystemHealthProducer,
};
use parking_lot::Mutex;
use quantora_common::{ConfigError, ProducerConfig};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Starts and stops the event producers
pub struct Supervisor {
    hub: Arc<BroadcastHub>,
    shutdown: CancellationToken,
    tasks: Mutex<Vec<JoinHandle<()>>>,
    started: AtomicBool,
}

impl Supervisor {
    #[must_use]
    pub fn new(hub: Arc<BroadcastHub>, shutdown: CancellationToken) -> Self {
        Self {
            hub,
            shutdown,
            tasks: Mutex::new(Vec::new()),
            started: AtomicBool::new(false),
        }
    }

    /// Spawn the pattern, AI performance and health producers
    ///
    /// Calling this more than once is a no-op.
    pub fn start(&self, config: &ProducerConfig) -> Result<(), ConfigError> {
        if self.started.load(Ordering::SeqCst) {
            tracing::warn!("Supervisor is already running");
            return Ok(());
        }

        let pattern = PatternDiscoveryProducer::from_config(config)?;
        let performance = AiPerformanceProducer::from_config(config)?;
        let health = SystemHealthProducer::from_config(config)?;

        if self.started.swap(true, Ordering::SeqCst) {
            return Ok(());
        }

        self.spawn(pattern);
        self.spawn(performance);
        self.spawn(health);

        tracing::info!(producers = self.running(), "Supervisor started");

        Ok(())
    }

    /// Spawn one producer under supervision
    ///
    /// A producer that panics is logged and not restarted.
    pub fn spawn<P: EventProducer>(&self, producer: P) {
        let name = producer.name();
        let worker = tokio::spawn(run_producer(producer, self.hub.clone(), self.shutdown.clone()));

        let monitor = tokio::spawn(async move {
            match worker.await {
                Ok(()) => tracing::debug!(producer = name, "Producer task finished"),
                Err(e) if e.is_panic() => {
                    tracing::error!(producer = name, error = %e, "Producer panicked");
                }
                Err(e) => tracing::warn!(producer = name, error = %e, "Producer task aborted"),
            }
        });

        self.tasks.lock().push(monitor);
    }

    /// Number of producer tasks still alive
    pub fn running(&self) -> usize {
        self.tasks.lock().iter().filter(|task| !task.is_finished()).count()
    }

    /// Cancel every producer and wait for them to finish
    pub async fn shutdown(&self) {
        self.shutdown.cancel();

        let tasks = std::mem::take(&mut *self.tasks.lock());
        let count = tasks.len();
        for task in tasks {
            if let Err(e) = task.await {
                tracing::warn!(error = %e, "Producer monitor failed");
            }
        }

        tracing::info!(producers = count, "Supervisor stopped");
    }
}

impl std::fmt::Debug for Supervisor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Supervisor")
            .field("running", &self.running())
            .field("cancelled", &self.shutdown.is_cancelled())
            .finish()
    }
}
