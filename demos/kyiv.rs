#![allow(missing_docs, clippy::unwrap_used)]
use chrono::{DateTime, TimeZone, Utc};
use chrono_tz::Tz;
use suncalc::{
    moon_illumination, moon_position, moon_schedule, sun_position, sun_schedule_at_height, GeoCoordinate,
    SolarEventResult, SunEvent,
};

fn local(instant: DateTime<Utc>, tz: Tz) -> String {
    instant.with_timezone(&tz).format("%H:%M:%S").to_string()
}

fn describe(result: SolarEventResult, tz: Tz) -> String {
    match result {
        SolarEventResult::Occurs(instant) => local(instant, tz),
        SolarEventResult::AllDay => "sun stays above".to_string(),
        SolarEventResult::AllNight => "sun stays below".to_string(),
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let kyiv = GeoCoordinate::new(50.4501, 30.5234);
    let height = 179.0; // meters above the surrounding terrain
    let tz = chrono_tz::Europe::Kyiv;

    let now = Utc::now().with_timezone(&tz);
    let noon = tz
        .from_local_datetime(&now.date_naive().and_hms_opt(12, 0, 0).ok_or("Invalid time")?)
        .earliest()
        .ok_or("Local noon does not exist")?;

    println!("Sun and Moon over Kyiv");
    println!("Location: {:.4}°N, {:.4}°E", kyiv.latitude, kyiv.longitude);
    println!("Date: {}", noon.format("%B %d, %Y"));
    println!("Observer height: {:.0} meters", height);
    println!("{:=<60}", "");

    let position = sun_position(&now, kyiv);
    println!("Sun right now ({}):", now.format("%H:%M:%S %Z"));
    println!("  Azimuth (from south): {:.2}°", position.azimuth.to_degrees());
    println!("  Altitude: {:.2}°", position.altitude.to_degrees());
    println!();

    let schedule = sun_schedule_at_height(&noon, kyiv, height)?;
    println!("Sun schedule:");
    for (label, event) in [
        ("Astronomical dawn", SunEvent::NightEnd),
        ("Nautical dawn", SunEvent::NauticalDawn),
        ("Civil dawn", SunEvent::Dawn),
        ("Sunrise", SunEvent::Sunrise),
        ("Golden hour ends", SunEvent::GoldenHourEnd),
        ("Solar noon", SunEvent::SolarNoon),
        ("Golden hour", SunEvent::GoldenHour),
        ("Sunset", SunEvent::Sunset),
        ("Civil dusk", SunEvent::Dusk),
        ("Nautical dusk", SunEvent::NauticalDusk),
        ("Astronomical dusk", SunEvent::Night),
    ] {
        println!("  {:<20} {}", label, describe(schedule.get(event), tz));
    }
    println!();

    let moon = moon_position(&now, kyiv);
    let illumination = moon_illumination(&now);
    let times = moon_schedule(&noon, kyiv)?;
    println!("Moon:");
    println!("  Altitude: {:.2}°", moon.altitude.to_degrees());
    println!("  Distance: {:.0} km", moon.distance);
    println!(
        "  Phase: {:?} ({:.0}% illuminated)",
        illumination.phase_name(),
        illumination.fraction * 100.0
    );
    match (times.rise, times.set) {
        (None, None) if times.always_up => println!("  Above the horizon all day"),
        (None, None) => println!("  Below the horizon all day"),
        (rise, set) => {
            let show = |t: Option<DateTime<Utc>>| t.map_or_else(|| "none".to_string(), |t| local(t, tz));
            println!("  Moonrise: {}", show(rise));
            println!("  Moonset:  {}", show(set));
        }
    }

    Ok(())
}
