use chrono::{DateTime, TimeDelta, TimeZone, Timelike, Utc};
#[allow(unused_imports)]
use core_maths::CoreFloat;

/// Milliseconds in one mean solar day.
pub(crate) const DAY_MS: f64 = 86_400_000.0;

/// Julian date of the Unix epoch noon (1970-01-01 12:00 UTC).
pub(crate) const J1970: f64 = 2_440_588.0;

/// Julian date of the J2000.0 epoch (2000-01-01 12:00 TT).
pub(crate) const J2000: f64 = 2_451_545.0;

/// Milliseconds since the Unix epoch, keeping sub-millisecond precision as a fraction.
pub(crate) fn unix_millis<T: TimeZone>(instant: &DateTime<T>) -> f64 {
    let sub_millis = f64::from(instant.timestamp_subsec_nanos() % 1_000_000) / 1_000_000.0;
    instant.timestamp_millis() as f64 + sub_millis
}

/// Compute the Julian date of an instant.
///
/// Only the absolute instant is used; the time zone of `instant` is irrelevant.
/// The result is a fractional day count where one unit is one mean solar day.
///
/// # Example
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use suncalc::time::to_julian_date;
///
/// let j2000 = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
/// assert_eq!(to_julian_date(&j2000), 2_451_545.0);
/// ```
pub fn to_julian_date<T: TimeZone>(instant: &DateTime<T>) -> f64 {
    julian_date_from_unix_millis(unix_millis(instant))
}

pub(crate) fn julian_date_from_unix_millis(millis: f64) -> f64 {
    millis / DAY_MS - 0.5 + J1970
}

/// Days elapsed since the J2000.0 epoch, the time argument of every
/// solar and lunar series in this crate.
pub fn days_since_j2000<T: TimeZone>(instant: &DateTime<T>) -> f64 {
    to_julian_date(instant) - J2000
}

/// Convert a Julian date back to a UTC instant.
///
/// Inverse of [`to_julian_date`] to within double precision (well under a
/// millisecond for any date in the common era).
///
/// # Returns
///
/// `None` if `julian_date` is not finite or lies outside the range chrono can
/// represent.
pub fn from_julian_date(julian_date: f64) -> Option<DateTime<Utc>> {
    let millis = (julian_date + 0.5 - J1970) * DAY_MS;
    if !millis.is_finite() {
        return None;
    }
    let seconds = (millis / 1000.0).floor();
    // Also rejects values that would saturate the integer cast.
    if seconds.abs() >= 1.0e15 {
        return None;
    }
    let nanos = ((millis - seconds * 1000.0) * 1_000_000.0).round() as i64;
    DateTime::from_timestamp(seconds as i64, 0)?.checked_add_signed(TimeDelta::nanoseconds(nanos))
}

/// Shift an instant by a fractional number of hours.
pub(crate) fn hours_later(instant: DateTime<Utc>, hours: f64) -> Option<DateTime<Utc>> {
    let nanos = hours * 3_600_000_000_000.0;
    if !nanos.is_finite() {
        return None;
    }
    instant.checked_add_signed(TimeDelta::nanoseconds(nanos.round() as i64))
}

/// Local midnight that starts the calendar day of `instant`, in its own time zone.
///
/// When midnight does not exist locally (a daylight-saving gap), falls back to
/// subtracting the elapsed local time of day, which lands on the instant the
/// clock would have read 00:00 under the current offset.
pub(crate) fn start_of_day<T: TimeZone>(instant: &DateTime<T>) -> Option<DateTime<Utc>> {
    let midnight = instant.date_naive().and_hms_opt(0, 0, 0)?;
    if let Some(local) = instant.timezone().from_local_datetime(&midnight).earliest() {
        return Some(local.with_timezone(&Utc));
    }

    let elapsed = TimeDelta::seconds(i64::from(instant.num_seconds_from_midnight()))
        + TimeDelta::nanoseconds(i64::from(instant.nanosecond() % 1_000_000_000));
    instant.with_timezone(&Utc).checked_sub_signed(elapsed)
}
