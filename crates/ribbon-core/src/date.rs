//! Lightweight calendar date utilities (no chrono dependency).
//!
//! Uses Howard Hinnant's civil-date algorithms for day/date conversion.
//! Entry dates are ISO `YYYY-MM-DD` strings; anything unparseable sorts
//! as the earliest possible date rather than failing.

use std::time::{SystemTime, UNIX_EPOCH};

const MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Sort key for an entry date: days since the Unix epoch, or `i64::MIN`
/// when the date is missing or unparseable (data-quality issue, not fatal).
pub fn sort_key(date: &str) -> i64 {
    parse_iso_date(date).unwrap_or(i64::MIN)
}

/// Parse `YYYY-MM-DD` (a trailing `T...` time suffix is ignored) into
/// days since the Unix epoch. Returns `None` on malformed input.
pub fn parse_iso_date(s: &str) -> Option<i64> {
    let s = s.trim();
    let date_part = s.split('T').next()?;
    let mut fields = date_part.split('-');

    let year: i64 = fields.next()?.parse().ok()?;
    let month: u64 = fields.next()?.parse().ok()?;
    let day: u64 = fields.next()?.parse().ok()?;
    if fields.next().is_some() {
        return None;
    }
    if !(1..=12).contains(&month) || day < 1 || day > days_in_month(year, month) {
        return None;
    }
    Some(days_from_civil(year, month, day))
}

fn days_in_month(year: i64, month: u64) -> u64 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        _ => {
            if year % 4 == 0 && (year % 100 != 0 || year % 400 == 0) {
                29
            } else {
                28
            }
        }
    }
}

/// Display form used by card details: "Jan 5, 2020".
/// Falls back to the raw string when the date cannot be parsed.
pub fn format_short(date: &str) -> String {
    if date.is_empty() {
        return String::new();
    }
    match parse_iso_date(date) {
        Some(days) => {
            let (y, m, d) = civil_from_days(days);
            format!("{} {}, {}", MONTH_NAMES[(m - 1) as usize], d, y)
        }
        None => date.to_string(),
    }
}

/// Today's UTC date as `YYYY-MM-DD` (default for new entries).
pub fn today_iso() -> String {
    let days = (now_unix_secs() / 86400) as i64;
    let (y, m, d) = civil_from_days(days);
    format!("{y:04}-{m:02}-{d:02}")
}

/// Current UTC time as Unix seconds.
pub fn now_unix_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

/// Howard Hinnant's days_from_civil: (year, month, day) → epoch days.
fn days_from_civil(y: i64, m: u64, d: u64) -> i64 {
    let y = if m <= 2 { y - 1 } else { y };
    let era = if y >= 0 { y } else { y - 399 } / 400;
    let yoe = (y - era * 400) as u64;
    let mp = if m > 2 { m - 3 } else { m + 9 };
    let doy = (153 * mp + 2) / 5 + d - 1;
    let doe = yoe * 365 + yoe / 4 - yoe / 100 + doy;
    era * 146097 + doe as i64 - 719468
}

/// Howard Hinnant's civil_from_days: epoch days → (year, month, day).
fn civil_from_days(days: i64) -> (i64, u64, u64) {
    let z = days + 719468;
    let era = if z >= 0 { z } else { z - 146096 } / 146097;
    let doe = (z - era * 146097) as u64;
    let yoe = (doe - doe / 1460 + doe / 36524 - doe / 146096) / 365;
    let y = yoe as i64 + era * 400;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let d = doy - (153 * mp + 2) / 5 + 1;
    let m = if mp < 10 { mp + 3 } else { mp - 9 };
    let y = if m <= 2 { y + 1 } else { y };
    (y, m, d)
}
