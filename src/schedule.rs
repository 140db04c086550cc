//! Crossing-time solvers: when the Sun passes an altitude threshold on a
//! given day, and when the Moon rises and sets within a 24-hour window.

use core::f64::consts::PI;

use chrono::{DateTime, Utc};
#[allow(unused_imports)]
use core_maths::CoreFloat;
use log::{debug, trace};

use crate::geo::ecliptic_to_equatorial;
use crate::math::{round_half_up, IntervalRoots, Parabola, RAD};
use crate::moon::moon_position;
use crate::sun::{ecliptic_longitude, solar_mean_anomaly, solar_transit_j};
use crate::time::{from_julian_date, hours_later, julian_date_from_unix_millis, unix_millis, J2000};
use crate::types::{AngleThresholdCrossing, GeoCoordinate, MoonSchedule};
use crate::{CalculationError, SolarEventResult};

/// Mean offset of the solar transit from the Julian cycle start, in days
const J0: f64 = 0.0009;

/// Moon altitude at rise and set in radians, for its apparent radius
const MOON_HORIZON: f64 = 0.133 * RAD;

const HOUR_MS: f64 = 3_600_000.0;

/// Solar quantities shared by every threshold of one day.
///
/// Everything is evaluated once at the approximate transit, so all crossings
/// of a day mirror around the same solar noon.
#[derive(Copy, Clone, Debug)]
pub(crate) struct SolarDay {
    west_longitude: f64,
    latitude: f64,
    /// Julian cycle: whole days since J2000.0 of the transit
    cycle: f64,
    mean_anomaly: f64,
    ecliptic_longitude: f64,
    declination: f64,
    /// Julian date of solar noon
    noon: f64,
}

fn approx_transit(hour_angle: f64, west_longitude: f64, cycle: f64) -> f64 {
    J0 + (hour_angle + west_longitude) / (2.0 * PI) + cycle
}

fn occurs(julian_date: f64) -> Result<SolarEventResult, CalculationError> {
    from_julian_date(julian_date)
        .map(SolarEventResult::Occurs)
        .ok_or(CalculationError::TimeConversionError)
}

impl SolarDay {
    /// Sets up the day whose solar noon is nearest to `days` after J2000.0.
    pub(crate) fn new(days: f64, coordinate: GeoCoordinate) -> Self {
        let west_longitude = RAD * -coordinate.longitude;
        let latitude = RAD * coordinate.latitude;

        let cycle = round_half_up(days - J0 - west_longitude / (2.0 * PI));
        let transit = approx_transit(0.0, west_longitude, cycle);
        let mean_anomaly = solar_mean_anomaly(transit);
        let ecliptic_longitude = ecliptic_longitude(mean_anomaly);
        let declination = ecliptic_to_equatorial(ecliptic_longitude, 0.0).declination;

        Self {
            west_longitude,
            latitude,
            cycle,
            mean_anomaly,
            ecliptic_longitude,
            declination,
            noon: solar_transit_j(transit, mean_anomaly, ecliptic_longitude),
        }
    }

    pub(crate) fn solar_noon(&self) -> f64 {
        self.noon
    }

    pub(crate) fn nadir(&self) -> f64 {
        self.noon - 0.5
    }

    /// Solves for the morning and evening crossings of an altitude threshold.
    ///
    /// # Arguments
    /// * `degrees` - Altitude of the Sun's centre in degrees
    /// * `dip` - Horizon dip of the observer in degrees, added to the threshold
    ///
    /// # Errors
    /// [`CalculationError::TimeConversionError`] when a crossing cannot be
    /// represented as a UTC instant (NaN coordinates, dates beyond chrono's range).
    pub(crate) fn crossing(&self, degrees: f64, dip: f64) -> Result<AngleThresholdCrossing, CalculationError> {
        let threshold = (degrees + dip) * RAD;
        let cos_hour_angle = (threshold.sin() - self.latitude.sin() * self.declination.sin())
            / (self.latitude.cos() * self.declination.cos());

        if cos_hour_angle > 1.0 {
            trace!("sun stays below {degrees}° (cos H = {cos_hour_angle})");
            return Ok(AngleThresholdCrossing {
                rising: SolarEventResult::AllNight,
                setting: SolarEventResult::AllNight,
            });
        }
        if cos_hour_angle < -1.0 {
            trace!("sun stays above {degrees}° (cos H = {cos_hour_angle})");
            return Ok(AngleThresholdCrossing {
                rising: SolarEventResult::AllDay,
                setting: SolarEventResult::AllDay,
            });
        }

        let hour_angle = cos_hour_angle.acos();
        let set = solar_transit_j(
            approx_transit(hour_angle, self.west_longitude, self.cycle),
            self.mean_anomaly,
            self.ecliptic_longitude,
        );
        let rise = self.noon - (set - self.noon);

        Ok(AngleThresholdCrossing {
            rising: occurs(rise)?,
            setting: occurs(set)?,
        })
    }
}

/// Converts a solar-day Julian date into an instant.
pub(crate) fn solar_instant(julian_date: f64) -> Result<DateTime<Utc>, CalculationError> {
    from_julian_date(julian_date).ok_or(CalculationError::TimeConversionError)
}

/// Finds moonrise and moonset in the 24 hours after `start`.
///
/// Moon altitude is sampled every hour; each pair of hours is bracketed by a
/// parabola through three consecutive samples, whose roots give the crossing.
/// The first rise and the first set found are kept.
pub(crate) fn moon_rise_set(start: DateTime<Utc>, coordinate: GeoCoordinate) -> Result<MoonSchedule, CalculationError> {
    let start_ms = unix_millis(&start);
    let altitude_at = |hours: f64| {
        let days = julian_date_from_unix_millis(start_ms + hours * HOUR_MS) - J2000;
        moon_position(days, coordinate).altitude - MOON_HORIZON
    };

    let mut rise: Option<f64> = None;
    let mut set: Option<f64> = None;
    let mut vertex_altitude = 0.0;
    let mut h0 = altitude_at(0.0);

    for hour in (1..24).step_by(2) {
        let hour = f64::from(hour);
        let h1 = altitude_at(hour);
        let h2 = altitude_at(hour + 1.0);
        let parabola = Parabola::through(h0, h1, h2);
        vertex_altitude = parabola.ye;

        match parabola.roots_in_unit_interval() {
            IntervalRoots::One(x) if h0 < 0.0 => {
                rise.get_or_insert(hour + x);
            }
            IntervalRoots::One(x) => {
                set.get_or_insert(hour + x);
            }
            IntervalRoots::Two(x1, x2) => {
                let (up, down) = if parabola.ye < 0.0 { (x2, x1) } else { (x1, x2) };
                rise.get_or_insert(hour + up);
                set.get_or_insert(hour + down);
            }
            IntervalRoots::None => {}
        }

        if rise.is_some() && set.is_some() {
            break;
        }
        h0 = h2;
    }

    let circumpolar = rise.is_none() && set.is_none();
    if circumpolar {
        debug!(
            "moon neither rises nor sets in the 24h after {start:?} at {}°, {}°",
            coordinate.latitude, coordinate.longitude
        );
    }

    let always_up = circumpolar && vertex_altitude > 0.0;
    let to_instant = |hours: f64| hours_later(start, hours).ok_or(CalculationError::TimeConversionError);
    Ok(MoonSchedule {
        rise: rise.map(to_instant).transpose()?,
        set: set.map(to_instant).transpose()?,
        always_up,
        always_down: circumpolar && !always_up,
    })
}
