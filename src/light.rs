//! Abstraction for the controlled light

use std::time::Duration;

/// A pending command to the light, built up field by field and applied in one
/// [`Light::perform`] call. Fields left `None` are not touched by the driver.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LightCall {
    pub color_temperature: Option<f32>,
    pub brightness: Option<f32>,
    pub transition_length: Option<Duration>,
}

impl LightCall {
    pub fn new() -> Self {
        Self::default()
    }

    /// Target color temperature in mireds.
    pub fn set_color_temperature(&mut self, mireds: f32) -> &mut Self {
        self.color_temperature = Some(mireds);
        self
    }

    /// Brightness in `[0, 1]`.
    pub fn set_brightness(&mut self, brightness: f32) -> &mut Self {
        self.brightness = Some(brightness);
        self
    }

    pub fn set_transition_length(&mut self, length: Duration) -> &mut Self {
        self.transition_length = Some(length);
        self
    }
}

/// The light device collaborator: observed state queries plus a command
/// interface. State-change and transition-complete notifications are not part
/// of this trait; the host delivers those as [`Event`](crate::controller::Event)s.
pub trait Light {
    /// Observed on/off state.
    fn is_on(&self) -> bool;
    /// Observed color temperature in mireds.
    fn color_temperature(&self) -> f32;
    /// Observed brightness in `[0, 1]`.
    fn brightness(&self) -> f32;
    /// Supported color temperature range `(min, max)` in mireds.
    fn mireds_range(&self) -> (f32, f32);
    /// Whether the driver honors a transition length on commands.
    fn supports_transition(&self) -> bool;
    /// Apply a command. Drivers are expected to update their observed state
    /// and may notify about it synchronously.
    fn perform(&mut self, call: LightCall);
}
