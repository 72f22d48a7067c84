#![forbid(unsafe_code)]
#![deny(warnings)]
#![warn(clippy::pedantic)]

use anyhow::{bail, Result as AnyResult};

pub const DEFAULT_MEMORY_MB: u64 = 1;
pub const DEFAULT_DURATION_SECONDS: u64 = 10;

/// `mem` query param: megabytes to allocate. Absent or empty means the
/// default; a negative value clamps to zero.
pub fn parse_memory_mb(raw: Option<&str>) -> AnyResult<u64> {
    parse_param("mem", raw, DEFAULT_MEMORY_MB)
}

/// `time` query param: seconds to hold the load.
pub fn parse_duration_seconds(raw: Option<&str>) -> AnyResult<u64> {
    parse_param("time", raw, DEFAULT_DURATION_SECONDS)
}

fn parse_param(name: &str, raw: Option<&str>, default: u64) -> AnyResult<u64> {
    match raw {
        None => Ok(default),
        Some(s) if s.is_empty() => Ok(default),
        Some(s) => match s.parse::<i64>() {
            Ok(v) => Ok(u64::try_from(v).unwrap_or(0)),
            Err(_) => bail!("invalid `{name}` query param format"),
        },
    }
}
