//! Unix-second timestamps and expiry rules shared by keys, channels, and files.
//!
//! A stored expiry of `NULL` or `<= 0` never expires; anything else expires
//! once it is strictly in the past.

#[cfg(test)]
#[path = "expiry_test.rs"]
mod expiry_test;

/// Current Unix time in seconds.
#[must_use]
pub fn now_ts() -> i64 {
    let Ok(duration) = std::time::SystemTime::now().duration_since(std::time::UNIX_EPOCH) else {
        return 0;
    };
    i64::try_from(duration.as_secs()).unwrap_or(i64::MAX)
}

/// Expiry timestamp for a lifetime of `minutes`; non-positive means never.
#[must_use]
pub fn expiry_from_minutes(minutes: i64, now: i64) -> Option<i64> {
    (minutes > 0).then(|| now.saturating_add(minutes.saturating_mul(60)))
}

#[must_use]
pub fn is_expired(expires_at: Option<i64>, now: i64) -> bool {
    matches!(expires_at, Some(at) if at > 0 && at < now)
}
