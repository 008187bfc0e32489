use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::Instant;

/// Per-host request spacing.
///
/// Each call to [`HostPacer::wait_turn`] reserves the next free slot for the
/// host and sleeps until it arrives, so two requests to one host never start
/// closer together than `min_interval`.
#[derive(Debug)]
pub struct HostPacer {
    next_slot: Mutex<HashMap<String, Instant>>,
    min_interval: Duration,
}

impl HostPacer {
    pub fn new(min_interval: Duration) -> Self {
        Self {
            next_slot: Mutex::new(HashMap::new()),
            min_interval,
        }
    }

    pub async fn wait_turn(&self, host: &str) {
        let wait = {
            let mut slots = self.next_slot.lock().await;
            let now = Instant::now();
            let start = slots.get(host).map_or(now, |slot| (*slot).max(now));
            slots.insert(host.to_string(), start + self.min_interval);
            start - now
        };

        if !wait.is_zero() {
            tracing::debug!(host, wait_ms = wait.as_millis(), "pacing request");
            tokio::time::sleep(wait).await;
        }
    }
}
