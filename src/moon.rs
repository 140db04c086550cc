//! Lunar model: a truncated series for the Moon's ecliptic position and
//! distance, and the Sun–Moon geometry behind its illuminated fraction.

use core::f64::consts::PI;

#[allow(unused_imports)]
use core_maths::CoreFloat;

use crate::geo::{altitude, astro_refraction, azimuth, ecliptic_to_equatorial, parallactic_angle, sidereal_time};
use crate::math::RAD;
use crate::sun::sun_coords;
use crate::types::{EquatorialCoordinate, GeoCoordinate, MoonIllumination, MoonPosition};

/// Mean Earth–Sun distance in km
const SUN_DISTANCE: f64 = 149_598_000.0;

/// Mean Earth–Moon distance in km
const MEAN_MOON_DISTANCE: f64 = 385_001.0;

/// Geocentric position of the Moon.
#[derive(Copy, Clone, Debug)]
pub(crate) struct MoonCoords {
    pub(crate) equatorial: EquatorialCoordinate,
    /// Distance from the Earth's centre in km
    pub(crate) distance: f64,
}

/// Ecliptic longitude, latitude and distance of the Moon `days` after J2000.0.
pub(crate) fn moon_coords(days: f64) -> MoonCoords {
    // mean longitude, mean anomaly and mean argument of latitude
    let mean_longitude = RAD * (218.316 + 13.176_396 * days);
    let mean_anomaly = RAD * (134.963 + 13.064_993 * days);
    let argument_of_latitude = RAD * (93.272 + 13.229_350 * days);

    let longitude = mean_longitude + RAD * 6.289 * mean_anomaly.sin();
    let latitude = RAD * 5.128 * argument_of_latitude.sin();
    let distance = MEAN_MOON_DISTANCE - 20_905.0 * mean_anomaly.cos();

    MoonCoords {
        equatorial: ecliptic_to_equatorial(longitude, latitude),
        distance,
    }
}

/// Apparent position of the Moon `days` after J2000.0.
pub(crate) fn moon_position(days: f64, coordinate: GeoCoordinate) -> MoonPosition {
    let west_longitude = RAD * -coordinate.longitude;
    let latitude = RAD * coordinate.latitude;
    let c = moon_coords(days);
    let declination = c.equatorial.declination;
    let hour_angle = sidereal_time(days, west_longitude) - c.equatorial.right_ascension;
    let geometric_altitude = altitude(hour_angle, latitude, declination);

    MoonPosition {
        azimuth: azimuth(hour_angle, latitude, declination),
        altitude: geometric_altitude + astro_refraction(geometric_altitude),
        distance: c.distance,
        parallactic_angle: parallactic_angle(hour_angle, latitude, declination),
    }
}

/// Illuminated fraction, phase and bright-limb angle `days` after J2000.0.
pub(crate) fn moon_illumination(days: f64) -> MoonIllumination {
    let sun = sun_coords(days);
    let moon = moon_coords(days);
    let m = moon.equatorial;
    let delta_ra = sun.right_ascension - m.right_ascension;

    // geocentric elongation of the Moon from the Sun
    let elongation = (sun.declination.sin() * m.declination.sin()
        + sun.declination.cos() * m.declination.cos() * delta_ra.cos())
    .acos();
    let phase_angle =
        (SUN_DISTANCE * elongation.sin()).atan2(moon.distance - SUN_DISTANCE * elongation.cos());
    let angle = (sun.declination.cos() * delta_ra.sin()).atan2(
        sun.declination.sin() * m.declination.cos() - sun.declination.cos() * m.declination.sin() * delta_ra.cos(),
    );
    let waxing_sign = if angle < 0.0 { -1.0 } else { 1.0 };

    MoonIllumination {
        fraction: (1.0 + phase_angle.cos()) / 2.0,
        phase: 0.5 + 0.5 * phase_angle * waxing_sign / PI,
        angle,
    }
}
