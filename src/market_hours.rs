// =============================================================================
// Market Hours — simplified NSE session check
// =============================================================================
//
// Weekdays 09:00–15:30 IST, no holiday calendar. Good enough for a dashboard
// status pill, not for order routing.

use chrono::{DateTime, Datelike, FixedOffset, Timelike, Utc};

const IST_OFFSET_SECS: i32 = 5 * 3600 + 30 * 60;
const OPEN_MINUTE: u32 = 9 * 60;
const CLOSE_MINUTE: u32 = 15 * 60 + 30;

fn ist(now: DateTime<Utc>) -> DateTime<FixedOffset> {
    // The offset literal is always in range.
    let offset = FixedOffset::east_opt(IST_OFFSET_SECS).expect("IST offset");
    now.with_timezone(&offset)
}

/// Whether the session is open at `now`.
pub fn is_open(now: DateTime<Utc>) -> bool {
    let local = ist(now);
    if local.weekday().number_from_monday() > 5 {
        return false;
    }
    let minute = local.hour() * 60 + local.minute();
    (OPEN_MINUTE..CLOSE_MINUTE).contains(&minute)
}

/// Label of the next session boundary: the close when open, the next open
/// otherwise.
pub fn next_session(now: DateTime<Utc>) -> &'static str {
    if is_open(now) {
        "3:30 PM"
    } else {
        "9:15 AM"
    }
}
