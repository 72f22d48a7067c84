#![forbid(unsafe_code)]
#![deny(warnings)]
#![warn(clippy::pedantic)]

use anyhow::Result as AnyResult;
use std::sync::Arc;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};
use tracing::{debug, info};

use crate::domain::{AppState, LifecycleEvent, LoadRegistry, MB};
use crate::metrics::Metrics;

/// Builds the per-process state once: registry, lifecycle channel, CPU slot,
/// metrics. The returned worker is the sole consumer of the channel; the
/// caller spawns it.
pub fn bootstrap(hostname: String) -> AnyResult<(AppState, RetirementWorker)> {
    let metrics = Metrics::new()?;
    let registry = LoadRegistry::new();
    let (finished_tx, finished_rx) = unbounded_channel();
    let worker = RetirementWorker::new(registry.clone(), metrics.clone(), finished_rx);
    let state = AppState {
        registry,
        finished_tx,
        cpu_slot: Arc::new(tokio::sync::Mutex::new(())),
        metrics,
        hostname,
    };
    Ok((state, worker))
}

/// Sole consumer of the lifecycle channel. Each event retires one allocation
/// unit: lock the registry, remove by id, drop the unit so its payload is
/// freed. Runs for the process lifetime; `run` returns only once every
/// sender handle has been dropped.
pub struct RetirementWorker {
    registry: LoadRegistry,
    metrics: Metrics,
    finished_rx: UnboundedReceiver<LifecycleEvent>,
}

impl RetirementWorker {
    #[must_use]
    pub fn new(
        registry: LoadRegistry,
        metrics: Metrics,
        finished_rx: UnboundedReceiver<LifecycleEvent>,
    ) -> Self {
        Self {
            registry,
            metrics,
            finished_rx,
        }
    }

    pub async fn run(mut self) {
        while let Some(event) = self.finished_rx.recv().await {
            self.retire(event);
        }
    }

    fn retire(&self, event: LifecycleEvent) {
        info!(
            id = %event.id,
            memory_mb = event.size_bytes / MB,
            duration_seconds = event.duration.as_secs(),
            "memory load finished"
        );
        match self.registry.remove(event.id) {
            Some(unit) => {
                let held_seconds = chrono::Utc::now().timestamp() - unit.started_ts_seconds;
                debug!(id = %event.id, held_seconds, "retiring allocation unit");
                // Freed here, not on some later collector pass.
                drop(unit);
                self.metrics.mem_loads_active.dec();
                self.metrics.mem_loads_retired_total.inc();
            }
            None => {
                debug!(id = %event.id, "no registry entry for finished load");
            }
        }
    }
}
