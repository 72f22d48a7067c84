#![forbid(unsafe_code)]
#![deny(warnings)]
#![warn(clippy::pedantic)]

pub mod domain;
pub mod http;
pub mod lib_cpu;
pub mod lib_mem;
pub mod metrics;
pub mod service;
pub mod validation;

pub use domain::{AllocationUnit, AppState, LifecycleEvent, LoadId, LoadRegistry, MB};
pub use http::serve;
pub use http::{cpu_load, cur_load, health, mem_load, readiness, scrape_metrics};
pub use metrics::Metrics;
pub use service::{bootstrap, RetirementWorker};
pub use validation::{parse_duration_seconds, parse_memory_mb};
