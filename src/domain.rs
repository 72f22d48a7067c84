#![forbid(unsafe_code)]
#![deny(warnings)]
#![warn(clippy::pedantic)]

use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;

pub const MB: usize = 1024 * 1024;

/// Identifier assigned to an allocation unit at creation. Monotonic per
/// registry, so two concurrent loads of identical size stay distinguishable
/// for retirement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LoadId(pub u64);

impl std::fmt::Display for LoadId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One active memory load: the payload is held alive until the retirement
/// worker removes the unit from the registry and drops it.
#[derive(Debug)]
pub struct AllocationUnit {
    pub id: LoadId,
    payload: Vec<u8>,
    pub duration: Duration,
    pub started_ts_seconds: i64,
}

impl AllocationUnit {
    pub fn size_bytes(&self) -> usize {
        self.payload.len()
    }

    pub fn size_mb(&self) -> usize {
        self.payload.len() / MB
    }
}

/// Sent by an expired load task over the lifecycle channel. Consumed exactly
/// once by the retirement worker; `size_bytes` and `duration` are carried for
/// logging.
#[derive(Clone, Copy, Debug)]
pub struct LifecycleEvent {
    pub id: LoadId,
    pub size_bytes: usize,
    pub duration: Duration,
}

/// The ordered collection of active allocation units. Every operation takes
/// the one exclusive lock, including snapshots, so no reader observes a
/// partially appended or partially removed sequence.
#[derive(Clone, Default)]
pub struct LoadRegistry {
    units: Arc<Mutex<Vec<AllocationUnit>>>,
    next_id: Arc<AtomicU64>,
}

impl LoadRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps an already-allocated payload in an allocation unit and appends
    /// it. Insertion order is preserved; there is no capacity bound. Returns
    /// the id the finish event must carry.
    pub fn append(&self, payload: Vec<u8>, duration: Duration) -> LoadId {
        let id = LoadId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let unit = AllocationUnit {
            id,
            payload,
            duration,
            started_ts_seconds: chrono::Utc::now().timestamp(),
        };
        self.units.lock().push(unit);
        id
    }

    /// Removes the unit with the given id, at most one per call. Returns the
    /// removed unit so the caller controls when its payload is freed; `None`
    /// when no entry matches, which is not an error.
    pub fn remove(&self, id: LoadId) -> Option<AllocationUnit> {
        let mut units = self.units.lock();
        let pos = units.iter().position(|u| u.id == id)?;
        Some(units.remove(pos))
    }

    /// Per-unit size in MB, in insertion order. Non-mutating; taken under the
    /// same exclusive lock as append/remove.
    #[must_use]
    pub fn snapshot(&self) -> Vec<usize> {
        self.units.lock().iter().map(AllocationUnit::size_mb).collect()
    }

    #[must_use]
    pub fn active_count(&self) -> usize {
        self.units.lock().len()
    }
}

/// Shared per-process state handed to every handler and the retirement
/// worker. Constructed once by `service::bootstrap`; no globals.
#[derive(Clone)]
pub struct AppState {
    pub registry: LoadRegistry,
    pub finished_tx: UnboundedSender<LifecycleEvent>,
    pub cpu_slot: Arc<tokio::sync::Mutex<()>>,
    pub metrics: crate::metrics::Metrics,
    pub hostname: String,
}
