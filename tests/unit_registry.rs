#![forbid(unsafe_code)]
#![deny(warnings)]
#![warn(clippy::pedantic)]

use loadgen_agent::{LoadId, LoadRegistry, MB};
use std::time::Duration;

#[test]
fn append_then_snapshot() {
    let reg = LoadRegistry::new();
    let id = reg.append(vec![0u8; 5 * MB], Duration::from_secs(2));
    assert_eq!(reg.active_count(), 1);
    assert_eq!(reg.snapshot(), vec![5]);
    assert!(reg.remove(id).is_some());
    assert_eq!(reg.active_count(), 0);
}

#[test]
fn snapshot_preserves_insertion_order() {
    let reg = LoadRegistry::new();
    reg.append(vec![0u8; MB], Duration::from_secs(1));
    reg.append(vec![0u8; 3 * MB], Duration::from_secs(1));
    reg.append(vec![0u8; 2 * MB], Duration::from_secs(1));
    assert_eq!(reg.snapshot(), vec![1, 3, 2]);
}

#[test]
fn remove_takes_at_most_one_even_with_duplicate_sizes() {
    let reg = LoadRegistry::new();
    let first = reg.append(vec![0u8; 5 * MB], Duration::from_secs(2));
    let second = reg.append(vec![0u8; 5 * MB], Duration::from_secs(2));
    assert_ne!(first, second);

    let removed = reg.remove(first).expect("first present");
    assert_eq!(removed.id, first);
    assert_eq!(reg.active_count(), 1);

    // Same id again is a silent no-op.
    assert!(reg.remove(first).is_none());
    assert_eq!(reg.active_count(), 1);

    assert!(reg.remove(second).is_some());
    assert_eq!(reg.active_count(), 0);
}

#[test]
fn remove_unknown_id_is_noop() {
    let reg = LoadRegistry::new();
    reg.append(vec![0u8; MB], Duration::from_secs(1));
    assert!(reg.remove(LoadId(9999)).is_none());
    assert_eq!(reg.active_count(), 1);
}

#[test]
fn removed_unit_reports_requested_size() {
    let reg = LoadRegistry::new();
    let id = reg.append(vec![0u8; 7 * MB], Duration::from_secs(4));
    let unit = reg.remove(id).expect("present");
    assert_eq!(unit.size_bytes(), 7 * MB);
    assert_eq!(unit.size_mb(), 7);
    assert_eq!(unit.duration, Duration::from_secs(4));
}

#[test]
fn zero_sized_unit_is_tracked() {
    let reg = LoadRegistry::new();
    reg.append(Vec::new(), Duration::from_secs(1));
    assert_eq!(reg.snapshot(), vec![0]);
}
