//! Human-readable size and age parsing for rule criteria.

use crate::Result;
use regex::Regex;

const KIB: u64 = 1024;

/// Seconds per duration unit (a month is 30 days, a year 365).
const DAY: u64 = 86_400;
const WEEK: u64 = 7 * DAY;
const MONTH: u64 = 30 * DAY;
const YEAR: u64 = 365 * DAY;

const SIZE_PATTERN: &str = r"(?i)^(\d+(?:\.\d+)?)\s*(B|KB|MB|GB|TB)$";
const DURATION_PATTERN: &str = r"(?i)^(\d+)\s*(d|w|m|y)$";

/// Parse a size such as `100MB` or `1.5GB` into bytes.
///
/// Units are binary multiples and case-insensitive.
pub fn parse_size(s: &str) -> Result<u64> {
    let invalid = || crate::Error::InvalidSize(s.to_string());
    let re = Regex::new(SIZE_PATTERN).map_err(|e| crate::Error::other(e.to_string()))?;
    let caps = re.captures(s.trim()).ok_or_else(invalid)?;

    let value: f64 = caps[1].parse().map_err(|_| invalid())?;
    let multiplier = match caps[2].to_ascii_lowercase().as_str() {
        "b" => 1,
        "kb" => KIB,
        "mb" => KIB.pow(2),
        "gb" => KIB.pow(3),
        "tb" => KIB.pow(4),
        _ => return Err(invalid()),
    };

    Ok((value * multiplier as f64) as u64)
}

/// Parse an age such as `30d`, `2w`, `6m` or `1y` into seconds.
pub fn parse_duration(s: &str) -> Result<u64> {
    let invalid = || crate::Error::InvalidDuration(s.to_string());
    let re = Regex::new(DURATION_PATTERN).map_err(|e| crate::Error::other(e.to_string()))?;
    let caps = re.captures(s.trim()).ok_or_else(invalid)?;

    let value: u64 = caps[1].parse().map_err(|_| invalid())?;
    let multiplier = match caps[2].to_ascii_lowercase().as_str() {
        "d" => DAY,
        "w" => WEEK,
        "m" => MONTH,
        "y" => YEAR,
        _ => return Err(invalid()),
    };

    value.checked_mul(multiplier).ok_or_else(invalid)
}
