#![forbid(unsafe_code)]
#![deny(warnings)]
#![warn(clippy::pedantic)]

use std::io::Write;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::info;

use crate::metrics::Metrics;

/// One CPU load, run as a spawned task. The process-wide slot admits a single
/// CPU load at a time; a second request queues on the lock until the first
/// releases it. The spin runs on a blocking thread so it cannot starve the
/// HTTP executor.
pub async fn cpu_load(slot: Arc<Mutex<()>>, mtr: Metrics, duration_seconds: u64) {
    let _guard = slot.lock().await;
    mtr.cpu_load_active.set(1);
    info!(duration_seconds, "cpu load active");
    let duration = Duration::from_secs(duration_seconds);
    let spin = tokio::task::spawn_blocking(move || {
        let mut sink = std::io::sink();
        let deadline = Instant::now() + duration;
        while Instant::now() < deadline {
            let _ = sink.write_all(b".");
        }
    });
    let _ = spin.await;
    mtr.cpu_load_active.set(0);
    info!(duration_seconds, "cpu load finished");
}
