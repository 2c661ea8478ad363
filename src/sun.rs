//! Solar ephemeris source
//!
//! The controller only needs "now" and today's sunrise/sunset for a given
//! elevation threshold. [`SolarClock`] supplies those from the system clock
//! and the `sunrise` ephemeris crate; tests and `--simulate` use the fixed
//! provider from [`crate::sim`] instead.

use anyhow::Context;
use chrono::{DateTime, NaiveDate, Utc};
use sunrise::{Coordinates, DawnType, SolarDay, SolarEvent};

/// Source of the current time and of solar events for a day.
pub trait SunProvider {
    fn now(&self) -> DateTime<Utc>;
    /// Time the sun rises through `elevation` degrees on `day`, if it does.
    fn sunrise(&self, day: NaiveDate, elevation: f64) -> Option<DateTime<Utc>>;
    /// Time the sun sets through `elevation` degrees on `day`, if it does.
    fn sunset(&self, day: NaiveDate, elevation: f64) -> Option<DateTime<Utc>>;
    /// Current solar elevation in degrees. Diagnostics only.
    fn elevation(&self) -> f64;
}

/// Real ephemeris provider for a fixed location.
#[derive(Debug, Clone, Copy)]
pub struct SolarClock {
    latitude: f64,
    longitude: f64,
}

impl SolarClock {
    pub fn new(latitude: f64, longitude: f64) -> anyhow::Result<Self> {
        Coordinates::new(latitude, longitude)
            .with_context(|| format!("Invalid coordinates: {latitude}, {longitude}"))?;
        Ok(Self {
            latitude,
            longitude,
        })
    }

    /// Both events for `day`, or `None` when the window is degenerate
    /// (polar day/night, where the ephemeris collapses both events).
    fn window(&self, day: NaiveDate, elevation: f64) -> Option<(DateTime<Utc>, DateTime<Utc>)> {
        let coordinates = Coordinates::new(self.latitude, self.longitude)?;
        let solar_day = SolarDay::new(coordinates, day);
        let sunrise = solar_day.event_time(dawn_event(elevation));
        let sunset = solar_day.event_time(dusk_event(elevation));
        if sunrise < sunset {
            Some((sunrise, sunset))
        } else {
            None
        }
    }
}

impl SunProvider for SolarClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }

    fn sunrise(&self, day: NaiveDate, elevation: f64) -> Option<DateTime<Utc>> {
        self.window(day, elevation).map(|(sunrise, _)| sunrise)
    }

    fn sunset(&self, day: NaiveDate, elevation: f64) -> Option<DateTime<Utc>> {
        self.window(day, elevation).map(|(_, sunset)| sunset)
    }

    fn elevation(&self) -> f64 {
        solar_elevation(self.now(), self.latitude, self.longitude)
    }
}

/// Map an elevation threshold to the nearest event the ephemeris crate
/// supports: 0° (horizon), -6° (civil), -12° (nautical), -18° (astronomical).
fn dawn_event(elevation: f64) -> SolarEvent {
    if elevation >= -3.0 {
        SolarEvent::Sunrise
    } else if elevation >= -9.0 {
        SolarEvent::Dawn(DawnType::Civil)
    } else if elevation >= -15.0 {
        SolarEvent::Dawn(DawnType::Nautical)
    } else {
        SolarEvent::Dawn(DawnType::Astronomical)
    }
}

fn dusk_event(elevation: f64) -> SolarEvent {
    if elevation >= -3.0 {
        SolarEvent::Sunset
    } else if elevation >= -9.0 {
        SolarEvent::Dusk(DawnType::Civil)
    } else if elevation >= -15.0 {
        SolarEvent::Dusk(DawnType::Nautical)
    } else {
        SolarEvent::Dusk(DawnType::Astronomical)
    }
}

/// Low-accuracy solar elevation (Astronomical Almanac approximation, good to
/// a fraction of a degree). Only used for the diagnostic dump.
fn solar_elevation(now: DateTime<Utc>, latitude: f64, longitude: f64) -> f64 {
    // Days since J2000.0 (2000-01-01 12:00 UTC).
    let d = (now.timestamp() as f64 - 946_728_000.0) / 86_400.0;
    let g = (357.529 + 0.985_600_28 * d).to_radians(); // mean anomaly
    let q = 280.459 + 0.985_647_36 * d; // mean longitude, degrees
    let l = (q + 1.915 * g.sin() + 0.020 * (2.0 * g).sin()).to_radians(); // ecliptic longitude
    let e = (23.439 - 0.000_000_36 * d).to_radians(); // obliquity
    let right_ascension = (e.cos() * l.sin()).atan2(l.cos());
    let declination = (e.sin() * l.sin()).asin();
    let gmst_hours = 18.697_374_558 + 24.065_709_824_419_08 * d;
    let hour_angle = (gmst_hours * 15.0 + longitude).to_radians() - right_ascension;
    let lat = latitude.to_radians();
    (lat.sin() * declination.sin() + lat.cos() * declination.cos() * hour_angle.cos())
        .asin()
        .to_degrees()
}
