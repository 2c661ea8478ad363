//! The adaptive lighting control loop.
//!
//! All entry points funnel through [`Controller::handle`] and run to
//! completion on one logical control thread; there is no locking and no
//! blocking. A command issued to the light may synchronously come back as a
//! [`Event::ValuesChanged`] echo before `handle` returns to the host. The
//! 0.1 mired dead-band against `last_requested_mireds` is the sole guard
//! that keeps that echo from being mistaken for an external change.

use std::time::Duration;

use log::{debug, info, warn};

use crate::curve::CurveEngine;
use crate::light::{Light, LightCall};
use crate::state::State;
use crate::sun::SunProvider;
use crate::switch::{EnableSwitch, RestoreMode};

/// Fallback bounds when neither the config nor a light supplies a range.
/// 153 mireds is ~6500 K, 500 mireds is ~2000 K.
const DEFAULT_MIREDS_RANGE: (f32, f32) = (153.0, 500.0);

/// An observed change the controller reacts to. The host environment is
/// responsible for delivering these; no event loop lives here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// The light's observed on/off/color/brightness state changed, possibly
    /// as a result of this controller's own command.
    ValuesChanged,
    /// A commanded light transition (e.g. an on-fade) finished.
    TargetReached,
    /// Periodic re-evaluation.
    Tick,
    /// The enable switch was flipped.
    EnableChanged(bool),
}

/// Immutable controller configuration.
#[derive(Debug, Clone)]
pub struct ControllerConfig {
    /// Coolest color temperature, used at solar noon. `None` means take the
    /// light's supported minimum at setup.
    pub min_mireds: Option<f32>,
    /// Warmest color temperature, used at night. `None` means take the
    /// light's supported maximum at setup.
    pub max_mireds: Option<f32>,
    /// Solar elevation in degrees treated as sunrise.
    pub sunrise_elevation: f64,
    /// Solar elevation in degrees treated as sunset.
    pub sunset_elevation: f64,
    /// Transition length for issued commands. Zero means instant.
    pub transition_length: Duration,
    /// Curve steepness, must be positive.
    pub speed: f32,
}

impl Default for ControllerConfig {
    fn default() -> Self {
        Self {
            min_mireds: None,
            max_mireds: None,
            sunrise_elevation: 0.0,
            sunset_elevation: 0.0,
            transition_length: Duration::ZERO,
            speed: 1.0,
        }
    }
}

/// Drives the light's color temperature along the solar curve and backs off
/// when someone else takes over.
#[derive(Debug)]
pub struct Controller<L, S, W> {
    config: ControllerConfig,
    curve: CurveEngine,
    state: State,
    /// Resolved bounds, `min <= max`.
    min_mireds: f32,
    max_mireds: f32,
    light: Option<L>,
    sun: Option<S>,
    switch: W,
}

impl<L: Light, S: SunProvider, W: EnableSwitch> Controller<L, S, W> {
    /// Wire up the controller. A missing light or sun provider is not an
    /// error; the controller degrades to a logged no-op.
    pub fn new(config: ControllerConfig, light: Option<L>, sun: Option<S>, switch: W) -> Self {
        let (mut min_mireds, mut max_mireds) = (config.min_mireds, config.max_mireds);
        if let Some(light) = &light {
            let (lo, hi) = light.mireds_range();
            min_mireds = min_mireds.or(Some(lo));
            max_mireds = max_mireds.or(Some(hi));
        }
        let min_mireds = min_mireds.unwrap_or(DEFAULT_MIREDS_RANGE.0);
        let max_mireds = max_mireds.unwrap_or(DEFAULT_MIREDS_RANGE.1);
        debug_assert!(min_mireds <= max_mireds);
        debug!("Color temperature range: {min_mireds:.3} - {max_mireds:.3}");

        let mut controller = Self {
            config,
            curve: CurveEngine::new(),
            state: State::new(),
            min_mireds,
            max_mireds,
            light,
            sun,
            switch,
        };
        if controller.switch.restore_mode() == RestoreMode::AlwaysOn {
            controller.state.enabled = true;
            controller.switch.publish(true);
        }
        controller
    }

    /// Single synchronous entry point for everything the host observes.
    pub fn handle(&mut self, event: Event) {
        match event {
            Event::ValuesChanged => self.light_values_changed(),
            Event::TargetReached => self.target_reached(),
            Event::Tick => self.update(),
            Event::EnableChanged(enabled) => self.set_enabled(enabled),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.state.enabled
    }

    pub fn light(&self) -> Option<&L> {
        self.light.as_ref()
    }

    pub fn light_mut(&mut self) -> Option<&mut L> {
        self.light.as_mut()
    }

    pub fn switch(&self) -> &W {
        &self.switch
    }

    pub fn sun_mut(&mut self) -> Option<&mut S> {
        self.sun.as_mut()
    }

    /// Periodic re-evaluation. Absorbs every failure path locally: absent
    /// collaborators and an indeterminate window only skip this cycle.
    fn update(&mut self) {
        let (Some(light), Some(sun)) = (self.light.as_mut(), self.sun.as_ref()) else {
            warn!("Light or sun provider not set!");
            return;
        };
        if !self.state.enabled {
            debug!("Update skipped - automatic updates disabled");
            return;
        }
        if !light.is_on() {
            debug!("Update skipped - light is off");
            return;
        }

        let now = sun.now();
        // Start of today, so we get today's events rather than the next ones.
        let today = now.date_naive();
        let sunrise = sun.sunrise(today, self.config.sunrise_elevation);
        let sunset = sun.sunset(today, self.config.sunset_elevation);
        let (Some(sunrise), Some(sunset)) = (sunrise, sunset) else {
            warn!("Could not determine sunrise or sunset");
            return;
        };

        let mireds = self.curve.target_temperature(
            now.timestamp(),
            sunrise.timestamp(),
            sunset.timestamp(),
            self.min_mireds,
            self.max_mireds,
            self.config.speed,
        );

        // Mandatory dead-band: without it our own command comes back as a
        // ValuesChanged echo and loops forever.
        if self
            .state
            .last_requested_mireds
            .is_some_and(|last| (mireds - last).abs() < 0.1)
        {
            debug!("Skipping update, color temperature is the same as last requested");
            return;
        }
        self.state.last_requested_mireds = Some(mireds);

        debug!("Setting color temperature {mireds:.3}");
        let mut call = LightCall::new();
        call.set_color_temperature(mireds);
        // Explicit brightness, some drivers recompute it when only the color
        // temperature changes.
        call.set_brightness(light.brightness());
        if !self.config.transition_length.is_zero() && light.supports_transition() {
            call.set_transition_length(self.config.transition_length);
        }
        light.perform(call);
    }

    /// Flip the enabled state, publish it, and force a re-evaluation both now
    /// and after any in-flight transition completes.
    fn set_enabled(&mut self, enabled: bool) {
        if self.state.enabled == enabled {
            return;
        }
        if enabled {
            debug!("Adaptive lighting enabled");
        } else {
            debug!("Adaptive lighting disabled");
        }
        self.state.enabled = enabled;
        self.force_next_update();
        self.switch.publish(enabled);
        self.update();
        // Again, so the re-evaluation after a turn-on transition completes is
        // not dead-banded away.
        self.force_next_update();
    }

    /// Clear the dead-band reference so the next evaluation always commands.
    fn force_next_update(&mut self) {
        self.state.last_requested_mireds = None;
    }

    fn light_values_changed(&mut self) {
        let Some(light) = self.light.as_ref() else {
            return;
        };
        let current_on = light.is_on();

        if current_on {
            let current_temp = light.color_temperature();
            match self.state.last_requested_mireds {
                Some(last) if self.state.enabled && (current_temp - last).abs() > 0.1 => {
                    info!(
                        "Color temperature changed externally (current: {current_temp:.3}, \
                         last requested: {last:.3}), disabling adaptive lighting"
                    );
                    self.set_enabled(false);
                }
                _ => {
                    // Light was just turned on while we were disabled; follow
                    // the switch's current restore policy.
                    if !self.state.previous_light_on
                        && !self.state.enabled
                        && self.switch.restore_mode() == RestoreMode::AlwaysOn
                    {
                        self.set_enabled(true);
                    }
                }
            }
        }

        // Must run after the edge check above has consumed the old value.
        self.state.previous_light_on = current_on;
    }

    fn target_reached(&mut self) {
        if self.light.is_none() {
            return;
        }
        // previous_light_on is maintained by light_values_changed. Applying
        // color during the transition would be overwritten by the fade's own
        // interpolation, so we re-apply once it has finished.
        if self.state.previous_light_on && self.state.enabled {
            self.update();
        }
    }

    /// Human-readable diagnostic dump at info level.
    pub fn dump(&self) {
        let (Some(light), Some(sun)) = (self.light.as_ref(), self.sun.as_ref()) else {
            warn!("Light or sun provider not set!");
            return;
        };

        let now = sun.now();
        let today = now.date_naive();
        let sunrise = sun.sunrise(today, self.config.sunrise_elevation);
        let sunset = sun.sunset(today, self.config.sunset_elevation);
        let (Some(sunrise), Some(sunset)) = (sunrise, sunset) else {
            warn!("Could not determine sunrise or sunset");
            return;
        };

        info!("Today: {today}");
        info!("Sunrise: {}", sunrise.format("%H:%M:%S"));
        info!("Sunset: {}", sunset.format("%H:%M:%S"));
        info!("Sun elevation: {:.3}", sun.elevation());
        info!(
            "Sunrise elevation: {:.3}, sunset elevation: {:.3}",
            self.config.sunrise_elevation, self.config.sunset_elevation
        );
        info!(
            "Color temperature range: {:.3} - {:.3}",
            self.min_mireds, self.max_mireds
        );
        info!("Transition length: {:?}", self.config.transition_length);

        for hour in 0..24 {
            let Some(at) = today.and_hms_opt(hour, 0, 0) else {
                continue;
            };
            let mireds = self.curve.target_temperature(
                at.and_utc().timestamp(),
                sunrise.timestamp(),
                sunset.timestamp(),
                self.min_mireds,
                self.max_mireds,
                self.config.speed,
            );
            info!("Time: {hour:02}:00, Color temperature: {mireds:.3}");
        }

        match self.state.last_requested_mireds {
            Some(last) => info!("Last requested color temperature: {last:.3}"),
            None => info!("Last requested color temperature: none"),
        }
        info!(
            "State: {}",
            if self.state.enabled { "enabled" } else { "disabled" }
        );
        info!(
            "Previous light state: {}",
            if self.state.previous_light_on { "on" } else { "off" }
        );
        info!(
            "Current light state: {}",
            if light.is_on() { "on" } else { "off" }
        );
    }
}
