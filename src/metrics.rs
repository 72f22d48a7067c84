#![forbid(unsafe_code)]
#![deny(warnings)]
#![warn(clippy::pedantic)]

use anyhow::{Context, Result as AnyResult};
use prometheus::{Encoder, IntCounter, IntGauge, Opts, Registry, TextEncoder};

#[derive(Clone)]
pub struct Metrics {
    pub registry: Registry,
    pub mem_loads_active: IntGauge,
    pub mem_load_requests_total: IntCounter,
    pub mem_loads_retired_total: IntCounter,
    pub cpu_load_active: IntGauge,
    pub cpu_load_requests_total: IntCounter,
}

impl Metrics {
    pub fn new() -> AnyResult<Self> {
        let registry = Registry::new();
        let mem_loads_active = IntGauge::with_opts(Opts::new(
            "agent_mem_loads_active",
            "currently registered memory loads",
        ))
        .context("create mem_loads_active")?;
        let mem_load_requests_total = IntCounter::with_opts(Opts::new(
            "agent_mem_load_requests_total",
            "accepted memory load requests",
        ))
        .context("create mem_load_requests_total")?;
        let mem_loads_retired_total = IntCounter::with_opts(Opts::new(
            "agent_mem_loads_retired_total",
            "memory loads retired after expiry",
        ))
        .context("create mem_loads_retired_total")?;
        let cpu_load_active = IntGauge::with_opts(Opts::new(
            "agent_cpu_load_active",
            "1 while a cpu load holds the slot",
        ))
        .context("create cpu_load_active")?;
        let cpu_load_requests_total = IntCounter::with_opts(Opts::new(
            "agent_cpu_load_requests_total",
            "accepted cpu load requests",
        ))
        .context("create cpu_load_requests_total")?;
        registry
            .register(Box::new(mem_loads_active.clone()))
            .context("register mem_loads_active")?;
        registry
            .register(Box::new(mem_load_requests_total.clone()))
            .context("register mem_load_requests_total")?;
        registry
            .register(Box::new(mem_loads_retired_total.clone()))
            .context("register mem_loads_retired_total")?;
        registry
            .register(Box::new(cpu_load_active.clone()))
            .context("register cpu_load_active")?;
        registry
            .register(Box::new(cpu_load_requests_total.clone()))
            .context("register cpu_load_requests_total")?;
        Ok(Self {
            registry,
            mem_loads_active,
            mem_load_requests_total,
            mem_loads_retired_total,
            cpu_load_active,
            cpu_load_requests_total,
        })
    }

    pub fn encode_text(&self) -> AnyResult<Vec<u8>> {
        let mut buf = Vec::new();
        let encoder = TextEncoder::new();
        let mf = self.registry.gather();
        encoder.encode(&mf, &mut buf).context("encode metrics")?;
        Ok(buf)
    }
}
