//! Display formatting for sizes and expiry times.

#[cfg(test)]
#[path = "format_test.rs"]
mod format_test;

const UNITS: [&str; 4] = ["KB", "MB", "GB", "TB"];

/// Human-readable byte count: `512 B`, `1.5 KB`, `2.0 MB`.
#[must_use]
pub fn format_bytes(bytes: i64) -> String {
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    #[allow(clippy::cast_precision_loss)]
    let mut value = bytes as f64 / 1024.0;
    let mut unit = UNITS[0];
    for next in &UNITS[1..] {
        if value < 1024.0 {
            break;
        }
        value /= 1024.0;
        unit = next;
    }
    format!("{value:.1} {unit}")
}

/// Remaining lifetime of an item expiring at `expire_at` (Unix seconds),
/// relative to `now`. `None` or a non-positive timestamp never expires.
#[must_use]
pub fn format_expiry(expire_at: Option<i64>, now: i64) -> String {
    let Some(expire_at) = expire_at.filter(|at| *at > 0) else {
        return "never expires".to_owned();
    };
    let remaining = expire_at - now;
    if remaining <= 0 {
        return "expired".to_owned();
    }
    let minutes = (remaining + 59) / 60;
    match minutes {
        m if m < 60 => format!("expires in {m} min"),
        m if m < 24 * 60 => format!("expires in {} h", (m + 59) / 60),
        m => format!("expires in {} d", (m + 24 * 60 - 1) / (24 * 60)),
    }
}

/// Current Unix time in seconds (browser clock; `0` natively).
#[must_use]
pub fn now_secs() -> i64 {
    #[cfg(feature = "csr")]
    {
        #[allow(clippy::cast_possible_truncation)]
        let secs = (js_sys::Date::now() / 1000.0) as i64;
        secs
    }
    #[cfg(not(feature = "csr"))]
    {
        0
    }
}
