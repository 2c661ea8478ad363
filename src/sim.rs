//! In-memory collaborators for tests and `--simulate` runs.
//!
//! [`SimLight`] applies commands to its own observed state, which makes the
//! command/notification echo path from the real world reproducible: perform a
//! call, then deliver [`Event::ValuesChanged`] and the controller sees exactly
//! what it just wrote.
//!
//! [`Event::ValuesChanged`]: crate::controller::Event::ValuesChanged

use chrono::{DateTime, NaiveDate, Utc};

use crate::light::{Light, LightCall};
use crate::sun::SunProvider;
use crate::switch::{EnableSwitch, RestoreMode};

/// A light whose observed state lives in memory.
#[derive(Debug)]
pub struct SimLight {
    on: bool,
    mireds: f32,
    brightness: f32,
    range: (f32, f32),
    transitions: bool,
    /// Every call performed, in order.
    pub calls: Vec<LightCall>,
}

impl SimLight {
    pub fn new(range: (f32, f32)) -> Self {
        Self {
            on: false,
            mireds: range.1,
            brightness: 1.0,
            range,
            transitions: true,
            calls: Vec::new(),
        }
    }

    pub fn without_transitions(mut self) -> Self {
        self.transitions = false;
        self
    }

    pub fn turn_on(&mut self) {
        self.on = true;
    }

    pub fn turn_off(&mut self) {
        self.on = false;
    }

    /// Externally-initiated color change, as if a user or another automation
    /// wrote to the light behind the controller's back.
    pub fn set_color_temperature(&mut self, mireds: f32) {
        self.mireds = mireds;
    }

    pub fn last_call(&self) -> Option<&LightCall> {
        self.calls.last()
    }
}

impl Light for SimLight {
    fn is_on(&self) -> bool {
        self.on
    }

    fn color_temperature(&self) -> f32 {
        self.mireds
    }

    fn brightness(&self) -> f32 {
        self.brightness
    }

    fn mireds_range(&self) -> (f32, f32) {
        self.range
    }

    fn supports_transition(&self) -> bool {
        self.transitions
    }

    fn perform(&mut self, call: LightCall) {
        if let Some(mireds) = call.color_temperature {
            self.mireds = mireds;
        }
        if let Some(brightness) = call.brightness {
            self.brightness = brightness;
        }
        self.calls.push(call);
    }
}

/// Sun provider with a settable clock and fixed events for the day.
#[derive(Debug)]
pub struct SimSun {
    now: DateTime<Utc>,
    sunrise: Option<DateTime<Utc>>,
    sunset: Option<DateTime<Utc>>,
    elevation: f64,
}

impl SimSun {
    pub fn new(
        now: DateTime<Utc>,
        sunrise: Option<DateTime<Utc>>,
        sunset: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            now,
            sunrise,
            sunset,
            elevation: 0.0,
        }
    }

    pub fn set_now(&mut self, now: DateTime<Utc>) {
        self.now = now;
    }
}

impl SunProvider for SimSun {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }

    fn sunrise(&self, _day: NaiveDate, _elevation: f64) -> Option<DateTime<Utc>> {
        self.sunrise
    }

    fn sunset(&self, _day: NaiveDate, _elevation: f64) -> Option<DateTime<Utc>> {
        self.sunset
    }

    fn elevation(&self) -> f64 {
        self.elevation
    }
}

/// Switch that records what was published.
#[derive(Debug)]
pub struct SimSwitch {
    mode: RestoreMode,
    pub published: Vec<bool>,
}

impl SimSwitch {
    pub fn new(mode: RestoreMode) -> Self {
        Self {
            mode,
            published: Vec::new(),
        }
    }
}

impl EnableSwitch for SimSwitch {
    fn restore_mode(&self) -> RestoreMode {
        self.mode
    }

    fn publish(&mut self, enabled: bool) {
        self.published.push(enabled);
    }
}
