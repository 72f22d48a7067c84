#![forbid(unsafe_code)]
#![deny(warnings)]
#![warn(clippy::pedantic)]

use loadgen_agent::Metrics;

#[test]
fn metrics_register_and_encode() {
    let m = Metrics::new().expect("metrics");
    m.mem_loads_active.inc();
    m.mem_load_requests_total.inc();
    m.cpu_load_active.set(1);
    let text = String::from_utf8(m.encode_text().expect("encode")).expect("utf8");
    assert!(text.contains("agent_mem_loads_active 1"));
    assert!(text.contains("agent_mem_load_requests_total 1"));
    assert!(text.contains("agent_cpu_load_active 1"));
}

#[test]
fn gauge_returns_to_zero() {
    let m = Metrics::new().expect("metrics");
    m.mem_loads_active.inc();
    m.mem_loads_active.dec();
    assert_eq!(m.mem_loads_active.get(), 0);
}
