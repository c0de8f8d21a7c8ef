//! Internal utilities.

/// Formats the current local time as `YYYY-MM-DD HH:MM:SS`.
///
/// If the local time cannot be determined, returns the UTC form of
/// [`utc_timestamp`].
#[cfg(unix)]
#[must_use]
pub fn local_timestamp() -> String {
    // SAFETY: `time(NULL)` only reads the clock. `localtime_r` writes into the
    // zeroed `tm` we own and never retains the pointers.
    unsafe {
        let now = libc::time(std::ptr::null_mut());
        let mut tm: libc::tm = std::mem::zeroed();
        if libc::localtime_r(&raw const now, &raw mut tm).is_null() {
            return utc_timestamp();
        }
        format!(
            "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
            tm.tm_year + 1900,
            tm.tm_mon + 1,
            tm.tm_mday,
            tm.tm_hour,
            tm.tm_min,
            tm.tm_sec,
        )
    }
}

/// Formats the current time as `YYYY-MM-DD HH:MM:SS UTC`.
///
/// Without `localtime_r` no local offset is known, so the value is UTC and
/// labelled as such.
#[cfg(not(unix))]
#[must_use]
pub fn local_timestamp() -> String {
    utc_timestamp()
}

/// Formats the current UTC time as `YYYY-MM-DD HH:MM:SS UTC`.
fn utc_timestamp() -> String {
    let secs = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map_or(0, |d| d.as_secs());
    let (days, rem) = (secs / 86_400, secs % 86_400);
    let (year, month, day) = civil_from_days(days);
    format!(
        "{year:04}-{month:02}-{day:02} {:02}:{:02}:{:02} UTC",
        rem / 3600,
        (rem % 3600) / 60,
        rem % 60,
    )
}

/// Converts days since 1970-01-01 into a proleptic Gregorian date.
///
/// Howard Hinnant's `civil_from_days`, restricted to non-negative input.
const fn civil_from_days(days: u64) -> (u64, u64, u64) {
    let z = days + 719_468;
    let era = z / 146_097;
    let doe = z - era * 146_097;
    let yoe = (doe - doe / 1460 + doe / 36_524 - doe / 146_096) / 365;
    let doy = doe - (365 * yoe + yoe / 4 - yoe / 100);
    let mp = (5 * doy + 2) / 153;
    let day = doy - (153 * mp + 2) / 5 + 1;
    let month = if mp < 10 { mp + 3 } else { mp - 9 };
    let year = yoe + era * 400 + if month <= 2 { 1 } else { 0 };
    (year, month, day)
}
