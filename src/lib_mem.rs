#![forbid(unsafe_code)]
#![deny(warnings)]
#![warn(clippy::pedantic)]

use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;
use tokio::time::sleep;
use tracing::info;

use crate::domain::{LifecycleEvent, LoadRegistry, MB};
use crate::metrics::Metrics;

/// One memory load, run as a spawned task: allocate a contiguous zero-filled
/// block of `memory_mb` MB, register it, sleep the full requested duration,
/// then report completion on the lifecycle channel.
///
/// Allocation exhaustion aborts the process. A stress tool is meant to find
/// the limit, so out-of-memory is left fatal rather than recovered.
pub async fn memory_load(
    registry: LoadRegistry,
    finished: UnboundedSender<LifecycleEvent>,
    mtr: Metrics,
    memory_mb: u64,
    duration_seconds: u64,
) {
    let size_bytes = usize::try_from(memory_mb)
        .unwrap_or(usize::MAX)
        .saturating_mul(MB);
    let payload = vec![0u8; size_bytes];
    let duration = Duration::from_secs(duration_seconds);
    let id = registry.append(payload, duration);
    mtr.mem_loads_active.inc();
    info!(id = %id, memory_mb, duration_seconds, "memory load active");
    sleep(duration).await;
    // Receiver only disappears at shutdown; nothing left to do then.
    let _ = finished.send(LifecycleEvent {
        id,
        size_bytes,
        duration,
    });
}
