//! Producer loop

use super::EventProducer;
use crate::broadcast::BroadcastHub;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Drive `producer` until `shutdown` is cancelled
///
/// Each tick waits the producer's next delay, skips generation entirely when
/// nobody is connected, then broadcasts the event. A failed tick waits the
/// fallback delay instead.
pub async fn run_producer<P: EventProducer>(
    mut producer: P,
    hub: Arc<BroadcastHub>,
    shutdown: CancellationToken,
) {
    let name = producer.name();
    tracing::info!(producer = name, "Producer started");

    let mut delay = producer.next_delay();

    loop {
        tokio::select! {
            () = shutdown.cancelled() => break,
            () = tokio::time::sleep(delay) => {}
        }

        if hub.registry().count() == 0 {
            tracing::trace!(producer = name, "No connections, skipping tick");
            delay = producer.next_delay();
            continue;
        }

        delay = match producer.produce() {
            Ok(message) => {
                let report = hub.broadcast(&message).await;
                tracing::info!(
                    producer = name,
                    kind = message.kind(),
                    recipients = report.recipients,
                    evicted = report.evicted,
                    "Event broadcast"
                );
                producer.next_delay()
            }
            Err(e) => {
                let fallback = producer.fallback_delay();
                tracing::warn!(
                    producer = name,
                    error = %e,
                    retry_in = ?fallback,
                    "Producer tick failed"
                );
                fallback
            }
        };
    }

    tracing::info!(producer = name, "Producer stopped");
}
