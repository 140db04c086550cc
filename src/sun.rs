//! Solar model: mean anomaly, equation of centre and the resulting
//! geocentric equatorial coordinates of the Sun.

use core::f64::consts::PI;

#[allow(unused_imports)]
use core_maths::CoreFloat;

use crate::geo::{altitude, azimuth, ecliptic_to_equatorial, sidereal_time};
use crate::math::RAD;
use crate::time::J2000;
use crate::types::{EquatorialCoordinate, GeoCoordinate, HorizonPosition};

/// Ecliptic longitude of the perihelion in degrees
const PERIHELION: f64 = 102.9372;

/// Mean anomaly of the Sun in radians (not normalized).
pub(crate) fn solar_mean_anomaly(days: f64) -> f64 {
    RAD * (357.5291 + 0.985_600_28 * days)
}

/// Equation of centre in radians: true minus mean anomaly.
pub(crate) fn equation_of_center(mean_anomaly: f64) -> f64 {
    RAD * (1.9148 * mean_anomaly.sin() + 0.02 * (2.0 * mean_anomaly).sin() + 0.0003 * (3.0 * mean_anomaly).sin())
}

/// Geocentric ecliptic longitude of the Sun in radians.
///
/// Heliocentric longitude of the Earth plus 180°; left unnormalized since only
/// its sine and cosine are ever taken.
pub(crate) fn ecliptic_longitude(mean_anomaly: f64) -> f64 {
    mean_anomaly + equation_of_center(mean_anomaly) + RAD * PERIHELION + PI
}

/// Equatorial coordinates of the Sun `days` after J2000.0.
pub(crate) fn sun_coords(days: f64) -> EquatorialCoordinate {
    let longitude = ecliptic_longitude(solar_mean_anomaly(days));
    ecliptic_to_equatorial(longitude, 0.0)
}

/// Julian date of the solar transit nearest to the approximate transit `days`,
/// corrected by the equation of time.
///
/// # Arguments
/// * `days` - Approximate transit in days since J2000.0
/// * `mean_anomaly` - Solar mean anomaly at `days`
/// * `ecliptic_longitude` - Solar ecliptic longitude at `days`
pub(crate) fn solar_transit_j(days: f64, mean_anomaly: f64, ecliptic_longitude: f64) -> f64 {
    J2000 + days + 0.0053 * mean_anomaly.sin() - 0.0069 * (2.0 * ecliptic_longitude).sin()
}

/// Azimuth and geometric altitude of the Sun `days` after J2000.0.
pub(crate) fn sun_position(days: f64, coordinate: GeoCoordinate) -> HorizonPosition {
    let west_longitude = RAD * -coordinate.longitude;
    let latitude = RAD * coordinate.latitude;
    let c = sun_coords(days);
    let hour_angle = sidereal_time(days, west_longitude) - c.right_ascension;

    HorizonPosition {
        azimuth: azimuth(hour_angle, latitude, c.declination),
        altitude: altitude(hour_angle, latitude, c.declination),
    }
}
