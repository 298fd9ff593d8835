//! `Date` values: epoch-millisecond timestamps, UTC only.
//!
//! Real player-script signature functions never depend on local time
//! zones, so only the UTC calendar is implemented (no `getTimezoneOffset`
//! beyond a constant `0`). Calendar math goes through the `time` crate
//! rather than hand-rolled civil-calendar arithmetic — the same crate a
//! real JS engine (`boa`) uses for its `Date` implementation.

use time::{Duration, OffsetDateTime};

const MS_PER_DAY: i64 = 86_400_000;

#[must_use]
pub fn is_valid(ms: f64) -> bool {
    ms.is_finite()
}

fn to_offset_date_time(ms: f64) -> Option<OffsetDateTime> {
    if !is_valid(ms) {
        return None;
    }
    OffsetDateTime::UNIX_EPOCH.checked_add(Duration::milliseconds(ms as i64))
}

#[must_use]
pub fn date_to_string(ms: f64) -> String {
    match to_offset_date_time(ms) {
        None => "Invalid Date".to_owned(),
        Some(dt) => format!(
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}.{:03}Z",
            dt.year(),
            u8::from(dt.month()),
            dt.day(),
            dt.hour(),
            dt.minute(),
            dt.second(),
            dt.millisecond(),
        ),
    }
}

#[must_use]
pub fn from_components(
    year: i32,
    month: i32,
    day: i32,
    hour: i32,
    minute: i32,
    second: i32,
    millisecond: i32,
) -> f64 {
    let Ok(month_enum) = time::Month::try_from(u8::try_from(month.rem_euclid(12) + 1).unwrap_or(1))
    else {
        return f64::NAN;
    };
    let year = year + month.div_euclid(12);
    let Ok(date) = time::Date::from_calendar_date(year, month_enum, 1) else {
        return f64::NAN;
    };
    let Some(date) = date.checked_add(Duration::days(i64::from(day) - 1)) else {
        return f64::NAN;
    };
    let midnight = date.midnight().assume_utc();
    let offset = Duration::hours(i64::from(hour))
        + Duration::minutes(i64::from(minute))
        + Duration::seconds(i64::from(second))
        + Duration::milliseconds(i64::from(millisecond));
    match midnight.checked_add(offset) {
        Some(dt) => {
            let unix_ms = (dt - OffsetDateTime::UNIX_EPOCH).whole_milliseconds();
            unix_ms as f64
        }
        None => f64::NAN,
    }
}

#[must_use]
pub fn get_full_year(ms: f64) -> f64 {
    to_offset_date_time(ms).map_or(f64::NAN, |dt| f64::from(dt.year()))
}

#[must_use]
pub fn get_month(ms: f64) -> f64 {
    to_offset_date_time(ms).map_or(f64::NAN, |dt| f64::from(u8::from(dt.month()) - 1))
}

#[must_use]
pub fn get_date(ms: f64) -> f64 {
    to_offset_date_time(ms).map_or(f64::NAN, |dt| f64::from(dt.day()))
}

#[must_use]
pub fn get_day(ms: f64) -> f64 {
    to_offset_date_time(ms).map_or(f64::NAN, |dt| {
        f64::from(dt.weekday().number_days_from_sunday())
    })
}

#[must_use]
pub fn get_hours(ms: f64) -> f64 {
    to_offset_date_time(ms).map_or(f64::NAN, |dt| f64::from(dt.hour()))
}

#[must_use]
pub fn get_minutes(ms: f64) -> f64 {
    to_offset_date_time(ms).map_or(f64::NAN, |dt| f64::from(dt.minute()))
}

#[must_use]
pub fn get_seconds(ms: f64) -> f64 {
    to_offset_date_time(ms).map_or(f64::NAN, |dt| f64::from(dt.second()))
}

#[must_use]
pub fn get_milliseconds(ms: f64) -> f64 {
    to_offset_date_time(ms).map_or(f64::NAN, |dt| f64::from(dt.millisecond()))
}

/// Minutes west of UTC; always `0` since only UTC is modeled.
#[must_use]
pub fn get_timezone_offset(ms: f64) -> f64 {
    if is_valid(ms) {
        0.0
    } else {
        f64::NAN
    }
}

#[must_use]
pub fn now_unavailable() -> f64 {
    // `Date.now()`/`new Date()` with no arguments depend on wall-clock
    // time, which the core interpreter has no access to (spec 5: no
    // ambient I/O). Hosts that need "now" inject it as an argument to the
    // script instead; this returns `NaN` so a script that calls it
    // without a host-provided clock fails loudly rather than silently.
    f64::NAN
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_zero_formats_as_unix_epoch() {
        assert_eq!(date_to_string(0.0), "1970-01-01T00:00:00.000Z");
    }

    #[test]
    fn invalid_ms_formats_as_invalid_date() {
        assert_eq!(date_to_string(f64::NAN), "Invalid Date");
    }

    #[test]
    fn from_components_round_trips_basic_date() {
        let ms = from_components(2020, 0, 1, 0, 0, 0, 0);
        assert_eq!(get_full_year(ms), 2020.0);
        assert_eq!(get_month(ms), 0.0);
        assert_eq!(get_date(ms), 1.0);
    }

    #[test]
    fn month_overflow_rolls_into_next_year() {
        let ms = from_components(2020, 12, 1, 0, 0, 0, 0);
        assert_eq!(get_full_year(ms), 2021.0);
        assert_eq!(get_month(ms), 0.0);
    }
}
