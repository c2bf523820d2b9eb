use crate::process::autotype::Value;
use chrono::{FixedOffset, NaiveDate, NaiveTime, TimeZone};
use once_cell::sync::Lazy;
use regex::Regex;

/// `YYYY[-MM[-DD]][THH:MM[:SS[.mmm]][Z|±HH:MM]]`, with an optional
/// expanded `±YYYYYY` year.
static ISO_LIKE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(?P<year>[-+]\d{6}|\d{4})(?:-(?P<month>\d{2})(?:-(?P<day>\d{2}))?)?(?:T(?P<hour>\d{2}):(?P<min>\d{2})(?::(?P<sec>\d{2})(?:\.(?P<ms>\d{3}))?)?(?P<tz>Z|[-+]\d{2}:\d{2})?)?$",
    )
    .expect("ISO date pattern should compile")
});

/// Parse an ISO-like date string.
///
/// - date only (`2023-03-05`, `2023-03`) → `Value::Date`
/// - date and time without zone → `Value::DateTime` (local wall time)
/// - date and time with `Z` or an offset → `Value::Timestamp`
///
/// Shapes that match but name an impossible date (`2023-02-30`) give `None`.
pub fn parse_iso_like(s: &str) -> Option<Value> {
    let caps = ISO_LIKE.captures(s)?;
    let num = |name: &str, default: u32| -> Option<u32> {
        match caps.name(name) {
            Some(m) => m.as_str().parse().ok(),
            None => Some(default),
        }
    };

    let year: i32 = caps.name("year")?.as_str().parse().ok()?;
    let date = NaiveDate::from_ymd_opt(year, num("month", 1)?, num("day", 1)?)?;

    if caps.name("hour").is_none() {
        return Some(Value::Date(date));
    }

    let time = NaiveTime::from_hms_milli_opt(
        num("hour", 0)?,
        num("min", 0)?,
        num("sec", 0)?,
        num("ms", 0)?,
    )?;
    let naive = date.and_time(time);

    match caps.name("tz").map(|m| m.as_str()) {
        None => Some(Value::DateTime(naive)),
        Some(tz) => {
            let offset = parse_offset(tz)?;
            offset
                .from_local_datetime(&naive)
                .single()
                .map(Value::Timestamp)
        }
    }
}

/// `Z` or `±HH:MM` → fixed offset.
fn parse_offset(tz: &str) -> Option<FixedOffset> {
    if tz == "Z" {
        return FixedOffset::east_opt(0);
    }
    let sign = if tz.starts_with('-') { -1 } else { 1 };
    let hours: i32 = tz.get(1..3)?.parse().ok()?;
    let mins: i32 = tz.get(4..6)?.parse().ok()?;
    FixedOffset::east_opt(sign * (hours * 3600 + mins * 60))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    #[test]
    fn date_only_forms() {
        assert_eq!(
            parse_iso_like("1985-01-07"),
            Some(Value::Date(NaiveDate::from_ymd_opt(1985, 1, 7).unwrap()))
        );
        assert_eq!(
            parse_iso_like("2023-03"),
            Some(Value::Date(NaiveDate::from_ymd_opt(2023, 3, 1).unwrap()))
        );
    }

    #[test]
    fn local_and_zoned_times() {
        match parse_iso_like("2023-03-05T15:00:00") {
            Some(Value::DateTime(dt)) => {
                assert_eq!(dt.hour(), 15);
                assert_eq!(dt.day(), 5);
            }
            other => panic!("expected local datetime, got {:?}", other),
        }

        match parse_iso_like("2023-03-05T15:00:00.250+03:00") {
            Some(Value::Timestamp(ts)) => {
                assert_eq!(ts.offset().local_minus_utc(), 3 * 3600);
                assert_eq!(ts.timestamp_subsec_millis(), 250);
            }
            other => panic!("expected timestamp, got {:?}", other),
        }

        match parse_iso_like("2023-03-05T12:30Z") {
            Some(Value::Timestamp(ts)) => assert_eq!(ts.offset().local_minus_utc(), 0),
            other => panic!("expected timestamp, got {:?}", other),
        }
    }

    #[test]
    fn rejects_other_shapes() {
        assert_eq!(parse_iso_like("2023/03/05"), None);
        assert_eq!(parse_iso_like("05-03-2023"), None);
        assert_eq!(parse_iso_like("2023-02-30"), None);
        assert_eq!(parse_iso_like("2023-03-05 15:00"), None);
        assert_eq!(parse_iso_like("Monza"), None);
    }
}
