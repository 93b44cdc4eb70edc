//! Time helpers. Timestamps are rendered in JST (UTC+9).

use chrono::{DateTime, FixedOffset, Offset, Utc};

const JST_OFFSET_SECS: i32 = 9 * 3600;

fn jst() -> FixedOffset {
    // 9h is always within the +-24h range accepted by FixedOffset.
    FixedOffset::east_opt(JST_OFFSET_SECS).unwrap_or_else(|| Utc.fix())
}

/// Get current Unix timestamp in JST (milliseconds)
pub fn get_jst_timestamp() -> i64 {
    let now_jst: DateTime<FixedOffset> = Utc::now().with_timezone(&jst());
    now_jst.timestamp_millis()
}

/// Current time as an RFC 3339 string in JST, e.g. `2025-01-01T09:00:00.000+09:00`.
pub fn now_jst_rfc3339() -> String {
    timestamp_to_jst_rfc3339(get_jst_timestamp())
}

/// Convert a Unix timestamp in milliseconds to an RFC 3339 string in JST.
pub fn timestamp_to_jst_rfc3339(timestamp_millis: i64) -> String {
    let utc = DateTime::<Utc>::from_timestamp_millis(timestamp_millis).unwrap_or_default();
    utc.with_timezone(&jst())
        .to_rfc3339_opts(chrono::SecondsFormat::Millis, false)
}
