use chrono::{DateTime, Utc};

use crate::SolarEventResult;

/// Observer location in decimal degrees.
///
/// Values are not validated: a latitude outside ±90° produces meaningless
/// results rather than an error.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoCoordinate {
    /// Latitude in degrees (positive = North)
    pub latitude: f64,
    /// Longitude in degrees (positive = East)
    pub longitude: f64,
}

impl GeoCoordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }
}

/// Position of a body relative to the Earth's equatorial plane, valid only
/// for the instant it was computed for.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EquatorialCoordinate {
    /// Declination in radians
    pub declination: f64,
    /// Right ascension in radians, in (-π, π]
    pub right_ascension: f64,
}

/// Position of a body in the observer's sky.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HorizonPosition {
    /// Azimuth in radians, measured from south and positive westward
    /// (south = 0, west = π/2)
    pub azimuth: f64,
    /// Altitude above the horizon in radians
    pub altitude: f64,
}

/// Position of the Moon in the observer's sky.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoonPosition {
    /// Azimuth in radians, measured from south and positive westward
    pub azimuth: f64,
    /// Apparent altitude in radians, including atmospheric refraction
    pub altitude: f64,
    /// Geocentric distance in kilometers
    pub distance: f64,
    /// Parallactic angle in radians
    pub parallactic_angle: f64,
}

/// Illuminated part of the Moon's disk.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoonIllumination {
    /// Illuminated fraction of the disk, from 0.0 (new) to 1.0 (full)
    pub fraction: f64,
    /// Position in the lunar cycle: 0 = new, 0.25 = first quarter,
    /// 0.5 = full, 0.75 = last quarter
    pub phase: f64,
    /// Position angle of the bright limb's midpoint in radians, measured
    /// eastward from the north point of the disk. Negative while waning.
    pub angle: f64,
}

impl MoonIllumination {
    /// Names the phase of the cycle, each name covering one eighth of it.
    pub fn phase_name(&self) -> MoonPhase {
        match self.phase {
            p if p <= 1.0 / 16.0 => MoonPhase::New,
            p if p <= 3.0 / 16.0 => MoonPhase::WaxingCrescent,
            p if p <= 5.0 / 16.0 => MoonPhase::FirstQuarter,
            p if p <= 7.0 / 16.0 => MoonPhase::WaxingGibbous,
            p if p <= 9.0 / 16.0 => MoonPhase::Full,
            p if p <= 11.0 / 16.0 => MoonPhase::WaningGibbous,
            p if p <= 13.0 / 16.0 => MoonPhase::LastQuarter,
            p if p <= 15.0 / 16.0 => MoonPhase::WaningCrescent,
            _ => MoonPhase::New,
        }
    }
}

/// Named phases of the Moon.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MoonPhase {
    New,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    Full,
    WaningGibbous,
    LastQuarter,
    WaningCrescent,
}

/// The named events of a [`SunSchedule`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SunEvent {
    SolarNoon,
    Nadir,
    Sunrise,
    Sunset,
    SunriseEnd,
    SunsetStart,
    Dawn,
    Dusk,
    NauticalDawn,
    NauticalDusk,
    NightEnd,
    Night,
    GoldenHourEnd,
    GoldenHour,
}

/// One row of a sun-altitude table: the altitude threshold and the labels of
/// its morning (rising) and evening (setting) crossings.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ThresholdAngle<L> {
    /// Altitude of the Sun's centre in degrees (negative = below the horizon)
    pub degrees: f64,
    pub rising: L,
    pub setting: L,
}

/// Thresholds behind the twelve twilight events of a [`SunSchedule`].
///
/// The sunrise angle of -0.833° accounts for refraction at the horizon and
/// the Sun's apparent radius.
pub const SUN_TIME_ANGLES: [ThresholdAngle<SunEvent>; 6] = [
    ThresholdAngle { degrees: -0.833, rising: SunEvent::Sunrise, setting: SunEvent::Sunset },
    ThresholdAngle { degrees: -0.3, rising: SunEvent::SunriseEnd, setting: SunEvent::SunsetStart },
    ThresholdAngle { degrees: -6.0, rising: SunEvent::Dawn, setting: SunEvent::Dusk },
    ThresholdAngle { degrees: -12.0, rising: SunEvent::NauticalDawn, setting: SunEvent::NauticalDusk },
    ThresholdAngle { degrees: -18.0, rising: SunEvent::NightEnd, setting: SunEvent::Night },
    ThresholdAngle { degrees: 6.0, rising: SunEvent::GoldenHourEnd, setting: SunEvent::GoldenHour },
];

/// Times at which the Sun crosses one altitude threshold during a day.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AngleThresholdCrossing {
    /// Morning crossing, with the Sun climbing
    pub rising: SolarEventResult,
    /// Evening crossing, with the Sun sinking
    pub setting: SolarEventResult,
}

/// Sun events for one day at one location.
///
/// Solar noon and nadir always exist; every other event may be absent when
/// the Sun never reaches its altitude that day (polar day and night).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SunSchedule {
    /// Sun at its highest, crossing the meridian
    pub solar_noon: DateTime<Utc>,
    /// Sun at its lowest, twelve hours before solar noon
    pub nadir: DateTime<Utc>,
    /// Top edge of the Sun appears on the horizon
    pub sunrise: SolarEventResult,
    /// Sun disappears below the horizon
    pub sunset: SolarEventResult,
    /// Bottom edge of the Sun touches the horizon
    pub sunrise_end: SolarEventResult,
    /// Bottom edge of the Sun touches the horizon, evening
    pub sunset_start: SolarEventResult,
    /// Civil dawn, Sun at -6°
    pub dawn: SolarEventResult,
    /// Civil dusk, Sun at -6°
    pub dusk: SolarEventResult,
    /// Nautical dawn, Sun at -12°
    pub nautical_dawn: SolarEventResult,
    /// Nautical dusk, Sun at -12°
    pub nautical_dusk: SolarEventResult,
    /// Astronomical dawn, Sun at -18°
    pub night_end: SolarEventResult,
    /// Astronomical dusk, Sun at -18°
    pub night: SolarEventResult,
    /// Morning golden hour ends, Sun at 6°
    pub golden_hour_end: SolarEventResult,
    /// Evening golden hour starts, Sun at 6°
    pub golden_hour: SolarEventResult,
}

impl SunSchedule {
    /// Looks up one event by name.
    pub fn get(&self, event: SunEvent) -> SolarEventResult {
        match event {
            SunEvent::SolarNoon => SolarEventResult::Occurs(self.solar_noon),
            SunEvent::Nadir => SolarEventResult::Occurs(self.nadir),
            SunEvent::Sunrise => self.sunrise,
            SunEvent::Sunset => self.sunset,
            SunEvent::SunriseEnd => self.sunrise_end,
            SunEvent::SunsetStart => self.sunset_start,
            SunEvent::Dawn => self.dawn,
            SunEvent::Dusk => self.dusk,
            SunEvent::NauticalDawn => self.nautical_dawn,
            SunEvent::NauticalDusk => self.nautical_dusk,
            SunEvent::NightEnd => self.night_end,
            SunEvent::Night => self.night,
            SunEvent::GoldenHourEnd => self.golden_hour_end,
            SunEvent::GoldenHour => self.golden_hour,
        }
    }

    pub(crate) fn set(&mut self, event: SunEvent, result: SolarEventResult) {
        match event {
            SunEvent::SolarNoon | SunEvent::Nadir => {}
            SunEvent::Sunrise => self.sunrise = result,
            SunEvent::Sunset => self.sunset = result,
            SunEvent::SunriseEnd => self.sunrise_end = result,
            SunEvent::SunsetStart => self.sunset_start = result,
            SunEvent::Dawn => self.dawn = result,
            SunEvent::Dusk => self.dusk = result,
            SunEvent::NauticalDawn => self.nautical_dawn = result,
            SunEvent::NauticalDusk => self.nautical_dusk = result,
            SunEvent::NightEnd => self.night_end = result,
            SunEvent::Night => self.night = result,
            SunEvent::GoldenHourEnd => self.golden_hour_end = result,
            SunEvent::GoldenHour => self.golden_hour = result,
        }
    }
}

/// Moonrise and moonset within the 24 hours following local midnight.
///
/// Only the first rise and the first set of the window are reported.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MoonSchedule {
    pub rise: Option<DateTime<Utc>>,
    pub set: Option<DateTime<Utc>>,
    /// The Moon stays above the horizon for the whole window
    pub always_up: bool,
    /// The Moon stays below the horizon for the whole window
    pub always_down: bool,
}
