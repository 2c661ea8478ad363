//! Implements current controller state

/// Mutable controller state. Exclusively owned by the controller and only
/// mutated from its event entry points, so no locking is needed.
#[derive(Debug)]
pub struct State {
    /// Whether automatic color temperature updates are permitted.
    pub enabled: bool,
    /// Color temperature this controller most recently commanded, in mireds.
    /// `None` until the first command, and cleared to force the next update
    /// past the dead-band.
    pub last_requested_mireds: Option<f32>,
    /// The light's on/off state as observed at the last notification. Read
    /// before it is overwritten to detect off-to-on edges.
    pub previous_light_on: bool,
}

impl State {
    pub fn new() -> Self {
        Self {
            enabled: false,
            last_requested_mireds: None,
            previous_light_on: false,
        }
    }
}

impl Default for State {
    fn default() -> Self {
        Self::new()
    }
}
