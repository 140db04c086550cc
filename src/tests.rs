#![allow(clippy::unwrap_used, clippy::panic)]
extern crate std;


use chrono::{DateTime, FixedOffset, TimeDelta, TimeZone, Utc};
use proptest::prelude::*;
use proptest_arbitrary_interop::arb;

use crate::time::{days_since_j2000, from_julian_date, to_julian_date};
use crate::*;

const TOLERANCE: f64 = 1e-12;

const KYIV: GeoCoordinate = GeoCoordinate::new(50.5, 30.5);

fn utc(year: i32, month: u32, day: u32, hour: u32, min: u32, sec: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(year, month, day, hour, min, sec).unwrap()
}

fn reference_instant() -> DateTime<Utc> {
    utc(2013, 3, 5, 0, 0, 0)
}

fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < TOLERANCE,
        "expected {expected}, got {actual} (diff {})",
        (actual - expected).abs()
    );
}

/// Compares to the whole second, truncating the sub-second part.
fn assert_same_second(actual: DateTime<Utc>, expected: DateTime<Utc>) {
    assert_eq!(actual.timestamp(), expected.timestamp(), "expected {expected}, got {actual}");
}

fn assert_occurs_at(actual: SolarEventResult, expected: DateTime<Utc>) {
    match actual {
        SolarEventResult::Occurs(instant) => assert_same_second(instant, expected),
        other => panic!("expected an event at {expected}, got {other:?}"),
    }
}

fn any_fixed_offset_datetime() -> impl Strategy<Value = DateTime<FixedOffset>> {
    arb::<DateTime<FixedOffset>>()
}

/// Instants between 1900 and 2100 in a random fixed offset.
fn any_modern_datetime() -> impl Strategy<Value = DateTime<FixedOffset>> {
    (-2_208_988_800i64..=4_102_444_800i64, 0u32..1_000_000_000u32, -86_399i32..=86_399i32).prop_filter_map(
        "Create valid datetime",
        |(seconds, nanos, offset)| {
            let offset = FixedOffset::east_opt(offset)?;
            DateTime::from_timestamp(seconds, nanos).map(|dt| dt.with_timezone(&offset))
        },
    )
}

#[test]
fn julian_date_of_reference_epochs() {
    assert_close(to_julian_date(&utc(2000, 1, 1, 12, 0, 0)), 2_451_545.0);
    assert_close(to_julian_date(&utc(1970, 1, 1, 0, 0, 0)), 2_440_587.5);
    assert_close(days_since_j2000(&utc(2000, 1, 2, 12, 0, 0)), 1.0);
}

#[test]
fn from_julian_date_rejects_unrepresentable_values() {
    assert_eq!(from_julian_date(f64::NAN), None);
    assert_eq!(from_julian_date(f64::INFINITY), None);
    assert_eq!(from_julian_date(1.0e300), None);
    assert_eq!(from_julian_date(2_451_545.0), Some(utc(2000, 1, 1, 12, 0, 0)));
}

#[test]
fn sun_position_reference() {
    let position = sun_position(&reference_instant(), KYIV);
    assert_close(position.azimuth, -2.5003175907168385);
    assert_close(position.altitude, -0.7000406838781611);
}

#[test]
fn sun_schedule_reference() {
    let schedule = sun_schedule(&reference_instant(), KYIV).unwrap();

    assert_same_second(schedule.solar_noon, utc(2013, 3, 5, 10, 10, 57));
    assert_same_second(schedule.nadir, utc(2013, 3, 4, 22, 10, 57));
    assert_occurs_at(schedule.sunrise, utc(2013, 3, 5, 4, 34, 56));
    assert_occurs_at(schedule.sunset, utc(2013, 3, 5, 15, 46, 57));
    assert_occurs_at(schedule.sunrise_end, utc(2013, 3, 5, 4, 38, 19));
    assert_occurs_at(schedule.sunset_start, utc(2013, 3, 5, 15, 43, 34));
    assert_occurs_at(schedule.dawn, utc(2013, 3, 5, 4, 2, 17));
    assert_occurs_at(schedule.dusk, utc(2013, 3, 5, 16, 19, 36));
    assert_occurs_at(schedule.nautical_dawn, utc(2013, 3, 5, 3, 24, 31));
    assert_occurs_at(schedule.nautical_dusk, utc(2013, 3, 5, 16, 57, 22));
    assert_occurs_at(schedule.night_end, utc(2013, 3, 5, 2, 46, 17));
    assert_occurs_at(schedule.night, utc(2013, 3, 5, 17, 35, 36));
    assert_occurs_at(schedule.golden_hour_end, utc(2013, 3, 5, 5, 19, 1));
    assert_occurs_at(schedule.golden_hour, utc(2013, 3, 5, 15, 2, 52));
}

#[test]
fn schedule_lookup_by_event_matches_fields() {
    let schedule = sun_schedule(&reference_instant(), KYIV).unwrap();
    assert_eq!(schedule.get(SunEvent::SolarNoon), SolarEventResult::Occurs(schedule.solar_noon));
    assert_eq!(schedule.get(SunEvent::Nadir), SolarEventResult::Occurs(schedule.nadir));
    assert_eq!(schedule.get(SunEvent::Dusk), schedule.dusk);
    assert_eq!(schedule.get(SunEvent::GoldenHourEnd), schedule.golden_hour_end);
}

#[test]
fn sun_angle_times_reference() {
    let crossing = sun_angle_times(23.0, &reference_instant(), KYIV).unwrap();
    assert_occurs_at(crossing.rising, utc(2013, 3, 5, 7, 23, 37));
    assert_occurs_at(crossing.setting, utc(2013, 3, 5, 12, 58, 16));
}

#[test]
fn sun_angle_times_agrees_with_the_schedule_table() {
    let schedule = sun_schedule(&reference_instant(), KYIV).unwrap();
    for angle in &SUN_TIME_ANGLES {
        let crossing = sun_angle_times(angle.degrees, &reference_instant(), KYIV).unwrap();
        assert_eq!(crossing.rising, schedule.get(angle.rising));
        assert_eq!(crossing.setting, schedule.get(angle.setting));
    }
}

#[test]
fn custom_threshold_table() {
    let table = [
        ThresholdAngle { degrees: -0.833, rising: "rise", setting: "set" },
        ThresholdAngle { degrees: -4.0, rising: "blue_hour_end", setting: "blue_hour" },
    ];
    let rows: std::vec::Vec<_> = sun_threshold_crossings(&reference_instant(), KYIV, 0.0, &table)
        .unwrap()
        .map(Result::unwrap)
        .collect();

    let schedule = sun_schedule(&reference_instant(), KYIV).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!((rows[0].0, rows[0].1), ("rise", "set"));
    assert_eq!(rows[0].2.rising, schedule.sunrise);
    assert_eq!(rows[0].2.setting, schedule.sunset);

    // -4° lies between civil dawn and sunrise
    let (_, _, blue) = rows[1];
    assert!(blue.rising.instant() > schedule.dawn.instant());
    assert!(blue.rising.instant() < schedule.sunrise.instant());
    assert!(blue.setting.instant() > schedule.sunset.instant());
    assert!(blue.setting.instant() < schedule.dusk.instant());
}

#[test]
fn observer_height_widens_the_day() {
    let ground = sun_schedule(&reference_instant(), KYIV).unwrap();
    let tower = sun_schedule_at_height(&reference_instant(), KYIV, 300.0).unwrap();

    assert_eq!(tower.solar_noon, ground.solar_noon);
    assert!(tower.sunrise.instant() < ground.sunrise.instant());
    assert!(tower.sunset.instant() > ground.sunset.instant());

    let level = sun_schedule_at_height(&reference_instant(), KYIV, 0.0).unwrap();
    assert_eq!(level, ground);
}

#[test]
fn invalid_observer_height_is_rejected() {
    for height in [-1.0, f64::NAN, f64::INFINITY] {
        assert_eq!(
            sun_schedule_at_height(&reference_instant(), KYIV, height),
            Err(CalculationError::HeightOutOfRange)
        );
        assert!(matches!(
            sun_threshold_crossings(&reference_instant(), KYIV, height, &SUN_TIME_ANGLES),
            Err(CalculationError::HeightOutOfRange)
        ));
    }
}

#[test]
fn nan_coordinates_produce_errors_not_panics() {
    let nan_latitude = GeoCoordinate::new(f64::NAN, 30.5);
    let nan_longitude = GeoCoordinate::new(50.5, f64::NAN);

    assert_eq!(sun_schedule(&reference_instant(), nan_latitude), Err(CalculationError::TimeConversionError));
    assert_eq!(sun_schedule(&reference_instant(), nan_longitude), Err(CalculationError::TimeConversionError));
    assert!(sun_position(&reference_instant(), nan_latitude).altitude.is_nan());
    assert!(moon_position(&reference_instant(), nan_longitude).azimuth.is_nan());
}

#[test]
fn polar_night_at_80_north() {
    let solstice = utc(2024, 12, 21, 12, 0, 0);
    let schedule = sun_schedule(&solstice, GeoCoordinate::new(80.0, 0.0)).unwrap();

    for event in [
        SunEvent::Sunrise,
        SunEvent::Sunset,
        SunEvent::SunriseEnd,
        SunEvent::SunsetStart,
        SunEvent::Dawn,
        SunEvent::Dusk,
        SunEvent::NauticalDawn,
        SunEvent::NauticalDusk,
        SunEvent::GoldenHourEnd,
        SunEvent::GoldenHour,
    ] {
        assert_eq!(schedule.get(event), SolarEventResult::AllNight, "{event:?}");
    }
    // the Sun still climbs above -18° at noon
    assert!(schedule.night_end.instant().is_some());
    assert!(schedule.night.instant().is_some());
}

#[test]
fn polar_night_at_89_north_has_no_events() {
    let solstice = utc(2024, 12, 21, 12, 0, 0);
    let schedule = sun_schedule(&solstice, GeoCoordinate::new(89.0, 0.0)).unwrap();

    for angle in &SUN_TIME_ANGLES {
        assert_eq!(schedule.get(angle.rising), SolarEventResult::AllNight, "{:?}", angle.rising);
        assert_eq!(schedule.get(angle.setting), SolarEventResult::AllNight, "{:?}", angle.setting);
    }
}

#[test]
fn midnight_sun_at_80_north() {
    let solstice = utc(2024, 6, 21, 12, 0, 0);
    let schedule = sun_schedule(&solstice, GeoCoordinate::new(80.0, 0.0)).unwrap();

    for angle in &SUN_TIME_ANGLES {
        assert_eq!(schedule.get(angle.rising), SolarEventResult::AllDay, "{:?}", angle.rising);
        assert_eq!(schedule.get(angle.setting), SolarEventResult::AllDay, "{:?}", angle.setting);
    }
}

#[test]
fn moon_position_reference() {
    let position = moon_position(&reference_instant(), KYIV);
    assert_close(position.azimuth, -0.9783999522438226);
    assert_close(position.altitude, 0.014551482243892251);
    assert!((position.distance - 364121.37256256194).abs() < 1e-6);
    assert_close(position.parallactic_angle, -0.5983211760423401);
}

#[test]
fn moon_illumination_reference() {
    let illumination = moon_illumination(&reference_instant());
    assert_close(illumination.fraction, 0.4848068202456373);
    assert_close(illumination.phase, 0.7548368838538762);
    assert_close(illumination.angle, 1.6732942678578346);
    assert_eq!(illumination.phase_name(), MoonPhase::LastQuarter);
}

#[test]
fn moon_phase_names() {
    let named = |phase: f64| MoonIllumination { fraction: 0.5, phase, angle: 0.0 }.phase_name();
    assert_eq!(named(0.0), MoonPhase::New);
    assert_eq!(named(0.1), MoonPhase::WaxingCrescent);
    assert_eq!(named(0.25), MoonPhase::FirstQuarter);
    assert_eq!(named(0.4), MoonPhase::WaxingGibbous);
    assert_eq!(named(0.5), MoonPhase::Full);
    assert_eq!(named(0.6), MoonPhase::WaningGibbous);
    assert_eq!(named(0.75), MoonPhase::LastQuarter);
    assert_eq!(named(0.9), MoonPhase::WaningCrescent);
    assert_eq!(named(0.99), MoonPhase::New);
}

#[test]
fn moon_schedule_reference_in_local_time() {
    let cet = FixedOffset::east_opt(3600).unwrap();
    let instant = cet.with_ymd_and_hms(2013, 3, 5, 1, 0, 0).unwrap();
    let schedule = moon_schedule(&instant, KYIV).unwrap();

    assert_same_second(schedule.rise.unwrap(), utc(2013, 3, 4, 23, 54, 18));
    assert_same_second(schedule.set.unwrap(), utc(2013, 3, 5, 8, 44, 29));
    assert!(!schedule.always_up);
    assert!(!schedule.always_down);
}

#[test]
fn moon_schedule_window_follows_the_time_zone() {
    // same instant, but the UTC calendar day starts an hour later
    let schedule = moon_schedule(&reference_instant(), KYIV).unwrap();
    assert_eq!(schedule.rise, None);
    assert_same_second(schedule.set.unwrap(), utc(2013, 3, 5, 8, 44, 40));
    assert!(!schedule.always_up);
    assert!(!schedule.always_down);
}

#[test]
fn moon_stays_up_or_down_at_high_latitude() {
    let arctic = GeoCoordinate::new(80.0, 0.0);

    let up = moon_schedule(&utc(2025, 1, 12, 0, 0, 0), arctic).unwrap();
    assert_eq!((up.rise, up.set), (None, None));
    assert!(up.always_up);
    assert!(!up.always_down);

    let down = moon_schedule(&utc(2025, 1, 26, 0, 0, 0), arctic).unwrap();
    assert_eq!((down.rise, down.set), (None, None));
    assert!(!down.always_up);
    assert!(down.always_down);
}

#[test]
fn equatorial_coordinates_match_positions() {
    let sun = sun_equatorial(&reference_instant());
    // early March: the Sun is still south of the equator
    assert!(sun.declination < 0.0 && sun.declination > -0.2);

    let moon = moon_equatorial(&reference_instant());
    assert!(moon.declination.abs() < 0.5);
    assert!(moon.right_ascension.abs() <= core::f64::consts::PI);
}

#[test]
fn positions_ignore_the_time_zone_of_the_instant() {
    let kyiv_time = reference_instant().with_timezone(&chrono_tz::Europe::Kyiv);
    let new_york_time = reference_instant().with_timezone(&chrono_tz::America::New_York);

    assert_eq!(sun_position(&kyiv_time, KYIV), sun_position(&reference_instant(), KYIV));
    assert_eq!(moon_position(&new_york_time, KYIV), moon_position(&reference_instant(), KYIV));
    assert_eq!(
        sun_schedule(&kyiv_time, KYIV).unwrap(),
        sun_schedule(&new_york_time, KYIV).unwrap()
    );
}

#[test]
fn moon_window_starts_at_local_midnight_across_dst() {
    // 2013-03-31 is the spring-forward day in Kyiv; midnight still exists
    let tz = chrono_tz::Europe::Kyiv;
    let instant = tz.with_ymd_and_hms(2013, 3, 31, 12, 0, 0).unwrap();
    let midnight = crate::time::start_of_day(&instant).unwrap();
    assert_eq!(midnight, utc(2013, 3, 30, 22, 0, 0));

    // Sao Paulo skipped midnight on 2018-11-04
    let tz = chrono_tz::America::Sao_Paulo;
    let instant = tz.with_ymd_and_hms(2018, 11, 4, 12, 0, 0).unwrap();
    let start = crate::time::start_of_day(&instant).unwrap();
    assert_eq!(start, utc(2018, 11, 4, 2, 0, 0));
    assert!(moon_schedule(&instant, GeoCoordinate::new(-23.55, -46.63)).is_ok());
}

proptest! {
    #[test]
    fn julian_date_round_trip(dt in any_modern_datetime()) {
        let dt = dt.with_timezone(&Utc);
        let back = from_julian_date(to_julian_date(&dt)).unwrap();
        let error = (back - dt).abs();
        prop_assert!(error < TimeDelta::milliseconds(1), "{dt} came back as {back}");
    }

    #[test]
    fn calculations_are_deterministic(
        dt in any_fixed_offset_datetime(),
        latitude in -90.0..=90.0,
        longitude in -180.0..=180.0,
    ) {
        let coordinate = GeoCoordinate::new(latitude, longitude);

        let a = sun_position(&dt, coordinate);
        let b = sun_position(&dt, coordinate);
        prop_assert_eq!(a.azimuth.to_bits(), b.azimuth.to_bits());
        prop_assert_eq!(a.altitude.to_bits(), b.altitude.to_bits());

        let a = moon_position(&dt, coordinate);
        let b = moon_position(&dt, coordinate);
        prop_assert_eq!(a.altitude.to_bits(), b.altitude.to_bits());
        prop_assert_eq!(a.parallactic_angle.to_bits(), b.parallactic_angle.to_bits());

        let a = moon_illumination(&dt);
        let b = moon_illumination(&dt);
        prop_assert_eq!(a.phase.to_bits(), b.phase.to_bits());

        prop_assert_eq!(sun_schedule(&dt, coordinate), sun_schedule(&dt, coordinate));
        prop_assert_eq!(moon_schedule(&dt, coordinate), moon_schedule(&dt, coordinate));
    }

    #[test]
    fn offset_of_the_instant_does_not_change_sun_results(
        dt in any_modern_datetime(),
        latitude in -89.0..=89.0,
        longitude in -180.0..=180.0,
    ) {
        let coordinate = GeoCoordinate::new(latitude, longitude);
        let as_utc = dt.with_timezone(&Utc);

        prop_assert_eq!(sun_position(&dt, coordinate), sun_position(&as_utc, coordinate));
        prop_assert_eq!(moon_illumination(&dt), moon_illumination(&as_utc));
        prop_assert_eq!(sun_schedule(&dt, coordinate), sun_schedule(&as_utc, coordinate));
    }

    #[test]
    fn noon_and_nadir_are_twelve_hours_apart(
        dt in any_modern_datetime(),
        latitude in -89.0..=89.0,
        longitude in -180.0..=180.0,
    ) {
        let schedule = sun_schedule(&dt, GeoCoordinate::new(latitude, longitude)).unwrap();
        let gap = schedule.solar_noon - schedule.nadir;
        prop_assert!((gap - TimeDelta::hours(12)).abs() < TimeDelta::milliseconds(1), "gap was {gap}");
    }

    #[test]
    fn rising_precedes_noon_precedes_setting(
        dt in any_modern_datetime(),
        latitude in -60.0..=60.0,
        longitude in -180.0..=180.0,
    ) {
        let schedule = sun_schedule(&dt, GeoCoordinate::new(latitude, longitude)).unwrap();
        for angle in &SUN_TIME_ANGLES {
            if let (Some(rising), Some(setting)) =
                (schedule.get(angle.rising).instant(), schedule.get(angle.setting).instant())
            {
                prop_assert!(rising <= schedule.solar_noon);
                prop_assert!(schedule.solar_noon <= setting);
            }
        }
    }

    #[test]
    fn moon_illumination_stays_in_range(dt in any_modern_datetime()) {
        let illumination = moon_illumination(&dt);
        prop_assert!((0.0..=1.0).contains(&illumination.fraction));
        prop_assert!((0.0..=1.0).contains(&illumination.phase));
        prop_assert!(illumination.angle.abs() <= core::f64::consts::PI);
    }

    #[test]
    fn moon_schedule_events_fall_inside_the_window(
        dt in any_modern_datetime(),
        latitude in -89.0..=89.0,
        longitude in -180.0..=180.0,
    ) {
        let schedule = moon_schedule(&dt, GeoCoordinate::new(latitude, longitude)).unwrap();
        let start = crate::time::start_of_day(&dt).unwrap();
        for event in [schedule.rise, schedule.set].into_iter().flatten() {
            prop_assert!(event >= start - TimeDelta::seconds(1));
            prop_assert!(event <= start + TimeDelta::hours(24) + TimeDelta::seconds(1));
        }
        let circumpolar = schedule.rise.is_none() && schedule.set.is_none();
        prop_assert_eq!(circumpolar, schedule.always_up || schedule.always_down);
        prop_assert!(!(schedule.always_up && schedule.always_down));
    }
}
