use chrono::{DateTime, NaiveDate, NaiveDateTime};
use tracing::debug;

// ── Timestamp parsing ─────────────────────────────────────────────────────────

/// Naive layouts tried in order after RFC 3339.
const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Parse an ISO-8601-like timestamp string into a [`NaiveDateTime`].
///
/// Accepts RFC 3339 strings (with `Z` or a fixed offset, converted to naive
/// UTC), the common space- or `T`-separated naive layouts with optional
/// fractional seconds, and bare dates (interpreted as midnight).
///
/// Returns `None` for blank strings or unrecognised formats.
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.naive_utc());
    }

    for fmt in DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(naive);
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }

    debug!("could not parse timestamp \"{}\"", s);
    None
}

// ── Day arithmetic ────────────────────────────────────────────────────────────

const SECONDS_PER_DAY: i64 = 86_400;

/// Whole days in `later - earlier`, rounded toward negative infinity.
///
/// A gap of 36 hours is 1 day; a gap of -12 hours is -1 day.
pub fn whole_days_between(later: NaiveDateTime, earlier: NaiveDateTime) -> i64 {
    let delta = later - earlier;
    // num_seconds truncates toward zero; step down once more when a negative
    // delta carries a fractional second so the division below floors.
    let mut seconds = delta.num_seconds();
    if delta.subsec_nanos() < 0 {
        seconds -= 1;
    }
    seconds.div_euclid(SECONDS_PER_DAY)
}

// ── Tests ──────────────────────────────────────────────────────────────────────
