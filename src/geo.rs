#[allow(unused_imports)]
use core_maths::CoreFloat;

use crate::math::RAD;
use crate::types::EquatorialCoordinate;

// ============================================================================
// Constants
// ============================================================================

/// Obliquity of the ecliptic at J2000.0 in radians (23.4397°)
pub(crate) const OBLIQUITY: f64 = RAD * 23.4397;

/// Greenwich sidereal angle at J2000.0 in degrees
const SIDEREAL_TIME_AT_J2000: f64 = 280.16;

/// Rotation of the Earth relative to the stars, in degrees per day
const SIDEREAL_TIME_RATE: f64 = 360.985_623_5;

// ============================================================================
// Coordinate Transformations
// ============================================================================

/// Rotates ecliptic coordinates into equatorial coordinates.
///
/// # Arguments
/// * `longitude` - Ecliptic longitude in radians
/// * `latitude` - Ecliptic latitude in radians
///
/// # Returns
/// Declination and right ascension in radians
pub(crate) fn ecliptic_to_equatorial(longitude: f64, latitude: f64) -> EquatorialCoordinate {
    EquatorialCoordinate {
        declination: declination(longitude, latitude),
        right_ascension: right_ascension(longitude, latitude),
    }
}

fn right_ascension(longitude: f64, latitude: f64) -> f64 {
    (longitude.sin() * OBLIQUITY.cos() - latitude.tan() * OBLIQUITY.sin()).atan2(longitude.cos())
}

fn declination(longitude: f64, latitude: f64) -> f64 {
    (latitude.sin() * OBLIQUITY.cos() + latitude.cos() * OBLIQUITY.sin() * longitude.sin()).asin()
}

/// Calculates the local sidereal time.
///
/// # Arguments
/// * `days` - Days since J2000.0
/// * `west_longitude` - Observer longitude in radians, positive west
///
/// # Returns
/// Sidereal angle in radians (not normalized)
pub(crate) fn sidereal_time(days: f64, west_longitude: f64) -> f64 {
    RAD * (SIDEREAL_TIME_AT_J2000 + SIDEREAL_TIME_RATE * days) - west_longitude
}

/// Calculates the azimuth angle, measured from south and positive westward.
///
/// # Arguments
/// * `hour_angle` - Local hour angle in radians
/// * `latitude` - Observer latitude in radians
/// * `declination` - Declination of the body in radians
pub(crate) fn azimuth(hour_angle: f64, latitude: f64, declination: f64) -> f64 {
    hour_angle
        .sin()
        .atan2(hour_angle.cos() * latitude.sin() - declination.tan() * latitude.cos())
}

/// Calculates the geometric altitude above the horizon in radians.
///
/// # Arguments
/// * `hour_angle` - Local hour angle in radians
/// * `latitude` - Observer latitude in radians
/// * `declination` - Declination of the body in radians
pub(crate) fn altitude(hour_angle: f64, latitude: f64, declination: f64) -> f64 {
    (latitude.sin() * declination.sin() + latitude.cos() * declination.cos() * hour_angle.cos()).asin()
}

/// Angle between the direction to the zenith and the direction to the
/// celestial pole, as seen at the body.
pub(crate) fn parallactic_angle(hour_angle: f64, latitude: f64, declination: f64) -> f64 {
    hour_angle
        .sin()
        .atan2(latitude.tan() * declination.cos() - declination.sin() * hour_angle.cos())
}

// ============================================================================
// Horizon Corrections
// ============================================================================

/// Approximate atmospheric refraction for a geometric altitude.
///
/// Altitudes below the horizon are treated as zero, so the correction stays
/// at its horizon value instead of diverging.
///
/// # Arguments
/// * `altitude` - Geometric altitude in radians
///
/// # Returns
/// Refraction correction in radians, to be added to `altitude`
pub(crate) fn astro_refraction(altitude: f64) -> f64 {
    let h = if altitude < 0.0 { 0.0 } else { altitude };
    0.000_296_7 / (h + 0.003_125_36 / (h + 0.089_011_79)).tan()
}

/// Dip of the visible horizon for an observer raised above the ground.
///
/// # Arguments
/// * `height` - Observer height in meters
///
/// # Returns
/// Horizon dip in degrees (negative)
pub(crate) fn observer_dip(height: f64) -> f64 {
    -2.076 * height.sqrt() / 60.0
}
