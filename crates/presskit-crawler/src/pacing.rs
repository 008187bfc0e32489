use rand::Rng;
use std::time::Duration;

/// `base_ms` plus a uniform draw from `[0, jitter_ms]`.
pub(crate) fn jittered(base_ms: u64, jitter_ms: u64) -> Duration {
    let extra = if jitter_ms == 0 {
        0
    } else {
        rand::thread_rng().gen_range(0..=jitter_ms)
    };
    Duration::from_millis(base_ms.saturating_add(extra))
}

pub(crate) async fn pause(base_ms: u64, jitter_ms: u64) {
    let delay = jittered(base_ms, jitter_ms);
    if !delay.is_zero() {
        tracing::trace!(delay_ms = delay.as_millis(), "pacing");
        tokio::time::sleep(delay).await;
    }
}
