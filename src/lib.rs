//! # suncalc
//!
//! Sun and Moon positions, twilight schedules, moon phases and moonrise/moonset
//! times for any place on Earth.
//!
//! The models are low-precision analytic series (accurate to roughly a minute
//! for event times), cheap enough to evaluate for every pixel of a map. Every
//! function is pure: no global state, no allocation, `no_std`.
//!
//! ## Basic Usage
//!
//! ```
//! use chrono::{TimeZone, Utc};
//! use suncalc::{sun_schedule, GeoCoordinate, SolarEventResult};
//!
//! let kyiv = GeoCoordinate::new(50.5, 30.5);
//! let date = Utc.with_ymd_and_hms(2013, 3, 5, 0, 0, 0).unwrap();
//!
//! let schedule = sun_schedule(&date, kyiv).unwrap();
//! println!("Solar noon: {}", schedule.solar_noon);
//!
//! match schedule.sunrise {
//!     SolarEventResult::Occurs(time) => println!("Sunrise at {time}"),
//!     SolarEventResult::AllDay => println!("Sun never sets (midnight sun)"),
//!     SolarEventResult::AllNight => println!("Sun never rises (polar night)"),
//! }
//! ```
//!
//! ## Angles and directions
//!
//! Coordinates are given in degrees, results are in radians. Azimuth is
//! measured from south, increasing westward.
#![no_std]

mod geo;
mod math;
mod moon;
mod schedule;
mod sun;
pub mod time;
mod types;

#[cfg(test)]
mod tests;

use chrono::{DateTime, TimeZone, Utc};
use thiserror::Error;

use crate::geo::observer_dip;
use crate::schedule::{moon_rise_set, solar_instant, SolarDay};
use crate::time::{days_since_j2000, start_of_day};

pub use crate::types::{
    AngleThresholdCrossing, EquatorialCoordinate, GeoCoordinate, HorizonPosition, MoonIllumination, MoonPhase,
    MoonPosition, MoonSchedule, SunEvent, SunSchedule, ThresholdAngle, SUN_TIME_ANGLES,
};

/// Result of a solar event calculation (sunrise, sunset, twilight, etc.)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SolarEventResult {
    /// Event occurs at the given instant
    Occurs(DateTime<Utc>),
    /// Sun is always above the threshold (e.g., midnight sun)
    AllDay,
    /// Sun is always below the threshold (e.g., polar night)
    AllNight,
}

impl SolarEventResult {
    /// Extracts the instant from a solar event result.
    ///
    /// # Returns
    ///
    /// - `Some(instant)` if the event occurs at a specific time
    /// - `None` if the sun is always above or always below the threshold
    ///
    /// # Example
    ///
    /// ```rust
    /// use chrono::{TimeZone, Utc};
    /// use suncalc::{sun_schedule, GeoCoordinate};
    ///
    /// let date = Utc.with_ymd_and_hms(2024, 12, 21, 12, 0, 0).unwrap();
    /// let longyearbyen = GeoCoordinate::new(78.22, 15.65);
    /// let schedule = sun_schedule(&date, longyearbyen).unwrap();
    ///
    /// assert_eq!(schedule.sunrise.instant(), None);
    /// ```
    pub fn instant(&self) -> Option<DateTime<Utc>> {
        match self {
            SolarEventResult::Occurs(instant) => Some(*instant),
            _ => None,
        }
    }
}

/// Errors that can occur during calculations.
///
/// - `TimeConversionError`: a computed time cannot be represented as a UTC instant
/// - `HeightOutOfRange`: observer height must be finite and >= 0 meters
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalculationError {
    /// Error converting between time representations
    #[error("Time conversion error")]
    TimeConversionError,

    /// Observer height negative or not finite
    #[error("Observer height out of range")]
    HeightOutOfRange,
}

/// Horizon dip in degrees for an observer `height` meters above the surface.
fn validated_dip(height: f64) -> Result<f64, CalculationError> {
    if height.is_finite() && height >= 0.0 {
        Ok(observer_dip(height))
    } else {
        Err(CalculationError::HeightOutOfRange)
    }
}

/// Calculate the Sun's position in the sky.
///
/// # Arguments
/// * `instant` - Time of observation, in any time zone
/// * `coordinate` - Observer location
///
/// The altitude is geometric: no refraction is applied.
pub fn sun_position<T: TimeZone>(instant: &DateTime<T>, coordinate: GeoCoordinate) -> HorizonPosition {
    sun::sun_position(days_since_j2000(instant), coordinate)
}

/// Geocentric equatorial coordinates of the Sun.
pub fn sun_equatorial<T: TimeZone>(instant: &DateTime<T>) -> EquatorialCoordinate {
    sun::sun_coords(days_since_j2000(instant))
}

/// Calculate the sun events of the solar day nearest to `instant`.
///
/// Equivalent to [`sun_schedule_at_height`] for an observer at ground level.
///
/// # Errors
/// [`CalculationError::TimeConversionError`] when an event time falls outside
/// the representable range (NaN coordinates included).
pub fn sun_schedule<T: TimeZone>(instant: &DateTime<T>, coordinate: GeoCoordinate) -> Result<SunSchedule, CalculationError> {
    sun_schedule_at_height(instant, coordinate, 0.0)
}

/// Calculate the sun events for an observer `height` meters above the surface.
///
/// A raised observer sees past the geometric horizon, so every threshold of
/// [`SUN_TIME_ANGLES`] is lowered by the horizon dip.
///
/// # Errors
/// [`CalculationError::HeightOutOfRange`] for a negative or non-finite height,
/// [`CalculationError::TimeConversionError`] as for [`sun_schedule`].
pub fn sun_schedule_at_height<T: TimeZone>(
    instant: &DateTime<T>,
    coordinate: GeoCoordinate,
    height: f64,
) -> Result<SunSchedule, CalculationError> {
    let dip = validated_dip(height)?;
    let day = SolarDay::new(days_since_j2000(instant), coordinate);

    // every field below is overwritten by one row of the table
    let mut schedule = SunSchedule {
        solar_noon: solar_instant(day.solar_noon())?,
        nadir: solar_instant(day.nadir())?,
        sunrise: SolarEventResult::AllNight,
        sunset: SolarEventResult::AllNight,
        sunrise_end: SolarEventResult::AllNight,
        sunset_start: SolarEventResult::AllNight,
        dawn: SolarEventResult::AllNight,
        dusk: SolarEventResult::AllNight,
        nautical_dawn: SolarEventResult::AllNight,
        nautical_dusk: SolarEventResult::AllNight,
        night_end: SolarEventResult::AllNight,
        night: SolarEventResult::AllNight,
        golden_hour_end: SolarEventResult::AllNight,
        golden_hour: SolarEventResult::AllNight,
    };

    for angle in &SUN_TIME_ANGLES {
        let crossing = day.crossing(angle.degrees, dip)?;
        schedule.set(angle.rising, crossing.rising);
        schedule.set(angle.setting, crossing.setting);
    }

    Ok(schedule)
}

/// Calculate when the Sun's centre crosses an arbitrary altitude.
///
/// # Arguments
/// * `degrees` - Sun altitude in degrees (negative = below the horizon)
/// * `instant` - Any time during the solar day of interest
/// * `coordinate` - Observer location
///
/// # Example
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use suncalc::{sun_angle_times, GeoCoordinate};
///
/// let date = Utc.with_ymd_and_hms(2013, 3, 5, 0, 0, 0).unwrap();
/// let crossing = sun_angle_times(23.0, &date, GeoCoordinate::new(50.5, 30.5)).unwrap();
/// assert!(crossing.rising.instant() < crossing.setting.instant());
/// ```
pub fn sun_angle_times<T: TimeZone>(
    degrees: f64,
    instant: &DateTime<T>,
    coordinate: GeoCoordinate,
) -> Result<AngleThresholdCrossing, CalculationError> {
    SolarDay::new(days_since_j2000(instant), coordinate).crossing(degrees, 0.0)
}

/// Calculate the crossings of every threshold of a caller-supplied table.
///
/// Rows are solved lazily in table order; each item pairs the row's rising and
/// setting labels with its crossing. Pass [`SUN_TIME_ANGLES`] for the standard
/// twilight thresholds.
///
/// # Arguments
/// * `instant` - Any time during the solar day of interest
/// * `coordinate` - Observer location
/// * `height` - Observer height above the surface in meters
/// * `angles` - Altitude thresholds with their labels
///
/// # Errors
/// [`CalculationError::HeightOutOfRange`] up front for a bad height; each item
/// can carry a [`CalculationError::TimeConversionError`].
///
/// # Example
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use suncalc::{sun_threshold_crossings, GeoCoordinate, ThresholdAngle};
///
/// let blue_hour = [ThresholdAngle { degrees: -4.0, rising: "blue_hour_end", setting: "blue_hour" }];
/// let date = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
///
/// for row in sun_threshold_crossings(&date, GeoCoordinate::new(48.85, 2.35), 0.0, &blue_hour).unwrap() {
///     let (rising, setting, crossing) = row.unwrap();
///     println!("{rising}: {:?}, {setting}: {:?}", crossing.rising, crossing.setting);
/// }
/// ```
pub fn sun_threshold_crossings<'a, T: TimeZone + 'a, L: Copy>(
    instant: &DateTime<T>,
    coordinate: GeoCoordinate,
    height: f64,
    angles: &'a [ThresholdAngle<L>],
) -> Result<impl Iterator<Item = Result<(L, L, AngleThresholdCrossing), CalculationError>> + 'a, CalculationError> {
    let dip = validated_dip(height)?;
    let day = SolarDay::new(days_since_j2000(instant), coordinate);

    Ok(angles.iter().map(move |angle| {
        day.crossing(angle.degrees, dip)
            .map(|crossing| (angle.rising, angle.setting, crossing))
    }))
}

/// Calculate the Moon's position in the sky.
///
/// The altitude includes atmospheric refraction.
pub fn moon_position<T: TimeZone>(instant: &DateTime<T>, coordinate: GeoCoordinate) -> MoonPosition {
    moon::moon_position(days_since_j2000(instant), coordinate)
}

/// Geocentric equatorial coordinates of the Moon.
pub fn moon_equatorial<T: TimeZone>(instant: &DateTime<T>) -> EquatorialCoordinate {
    moon::moon_coords(days_since_j2000(instant)).equatorial
}

/// Calculate the illuminated fraction and phase of the Moon.
///
/// Location independent; use [`MoonIllumination::phase_name`] for a label.
pub fn moon_illumination<T: TimeZone>(instant: &DateTime<T>) -> MoonIllumination {
    moon::moon_illumination(days_since_j2000(instant))
}

/// Calculate moonrise and moonset on the calendar day of `instant`.
///
/// The day is taken in the time zone of `instant`: the 24-hour search window
/// starts at its local midnight. A window with neither event reports whether
/// the Moon stayed up or down throughout.
///
/// # Errors
/// [`CalculationError::TimeConversionError`] when local midnight or an event
/// time cannot be represented.
///
/// # Example
///
/// ```
/// use chrono::{FixedOffset, TimeZone};
/// use suncalc::{moon_schedule, GeoCoordinate};
///
/// let cet = FixedOffset::east_opt(3600).unwrap();
/// let date = cet.with_ymd_and_hms(2013, 3, 5, 1, 0, 0).unwrap();
/// let moon = moon_schedule(&date, GeoCoordinate::new(50.5, 30.5)).unwrap();
/// assert!(moon.rise.is_some() && moon.set.is_some());
/// ```
pub fn moon_schedule<T: TimeZone>(instant: &DateTime<T>, coordinate: GeoCoordinate) -> Result<MoonSchedule, CalculationError> {
    let start = start_of_day(instant).ok_or(CalculationError::TimeConversionError)?;
    moon_rise_set(start, coordinate)
}
