use rollcall_types::{Session, Timestamp};

const MS_PER_MINUTE: i64 = 60_000;
const MS_PER_HOUR: i64 = 3_600_000;

/// Sum of `end - start` over all sessions, in milliseconds.
///
/// Ordering of sessions does not matter. Malformed sessions (end before
/// start) count negatively; they are reported on load, not rejected here.
pub fn total_duration(sessions: &[Session]) -> i64 {
    sessions.iter().map(Session::duration_ms).sum()
}

/// Render milliseconds as `{hours}h {minutes}m`, flooring both parts.
///
/// Seconds are truncated, never rounded. The minute remainder keeps the sign
/// of `ms`, so negative totals show negative minutes.
pub fn format_duration(ms: i64) -> String {
    let hours = ms.div_euclid(MS_PER_HOUR);
    let minutes = (ms % MS_PER_HOUR).div_euclid(MS_PER_MINUTE);
    format!("{}h {}m", hours, minutes)
}

/// Milliseconds a running timer has been open; never negative
pub fn elapsed_ms(start: Timestamp, now: Timestamp) -> i64 {
    now.millis_since(start).max(0)
}

/// Session length in fractional minutes, unrounded
pub fn session_minutes(session: &Session) -> f64 {
    session.duration_ms() as f64 / MS_PER_MINUTE as f64
}
