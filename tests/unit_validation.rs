#![forbid(unsafe_code)]
#![deny(warnings)]
#![warn(clippy::pedantic)]

use loadgen_agent::{parse_duration_seconds, parse_memory_mb};

#[test]
fn absent_params_use_defaults() {
    assert_eq!(parse_memory_mb(None).expect("ok"), 1);
    assert_eq!(parse_duration_seconds(None).expect("ok"), 10);
}

#[test]
fn empty_params_use_defaults() {
    assert_eq!(parse_memory_mb(Some("")).expect("ok"), 1);
    assert_eq!(parse_duration_seconds(Some("")).expect("ok"), 10);
}

#[test]
fn valid_integers_parse() {
    assert_eq!(parse_memory_mb(Some("5")).expect("ok"), 5);
    assert_eq!(parse_duration_seconds(Some("2")).expect("ok"), 2);
    assert_eq!(parse_memory_mb(Some("0")).expect("ok"), 0);
}

#[test]
fn negative_values_clamp_to_zero() {
    assert_eq!(parse_memory_mb(Some("-3")).expect("ok"), 0);
    assert_eq!(parse_duration_seconds(Some("-1")).expect("ok"), 0);
}

#[test]
fn garbage_is_rejected_naming_the_param() {
    let err = parse_memory_mb(Some("abc")).expect_err("rejected");
    assert!(err.to_string().contains("`mem`"));
    let err = parse_duration_seconds(Some("1.5")).expect_err("rejected");
    assert!(err.to_string().contains("`time`"));
}
