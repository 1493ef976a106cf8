//! The browser's wall clock.

use chrono::{DateTime, FixedOffset, Offset, Utc};

/// `Date.getTimezoneOffset()` counts minutes behind UTC (300 in Bogotá).
pub fn zone_from_js_offset(minutes: f64) -> FixedOffset {
    FixedOffset::west_opt((minutes * 60.0).round() as i32).unwrap_or_else(|| Utc.fix())
}

/// Current instant in the browser's UTC offset. Forms, tables and charts all read it.
pub fn local_now() -> DateTime<FixedOffset> {
    let offset = js_sys::Date::new_0().get_timezone_offset();
    Utc::now().with_timezone(&zone_from_js_offset(offset))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zone_from_js_offset() {
        assert_eq!(zone_from_js_offset(300.0).local_minus_utc(), -5 * 3600);
        assert_eq!(zone_from_js_offset(-60.0).local_minus_utc(), 3600);
        assert_eq!(zone_from_js_offset(0.0), Utc.fix());
        // out of range falls back to UTC
        assert_eq!(zone_from_js_offset(100_000.0), Utc.fix());
    }
}
