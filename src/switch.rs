//! Enable/disable switch front end

use log::info;

/// Restore-on-boot policy for the enable switch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum RestoreMode {
    /// Start enabled, and re-enable whenever the light is turned on fresh.
    AlwaysOn,
    /// Start disabled; only explicit [`Event::EnableChanged`] enables.
    ///
    /// [`Event::EnableChanged`]: crate::controller::Event::EnableChanged
    AlwaysOff,
}

/// The switch substrate the controller publishes its enabled state to.
///
/// `restore_mode` is queried at decision time, not captured at setup, so a
/// switch whose policy changes at runtime is honored.
pub trait EnableSwitch {
    fn restore_mode(&self) -> RestoreMode;
    fn publish(&mut self, enabled: bool);
}

/// Switch that only announces state changes in the log. Used by the binary,
/// which has no home-automation bus to publish to.
#[derive(Debug)]
pub struct LoggingSwitch {
    mode: RestoreMode,
}

impl LoggingSwitch {
    pub fn new(mode: RestoreMode) -> Self {
        Self { mode }
    }
}

impl EnableSwitch for LoggingSwitch {
    fn restore_mode(&self) -> RestoreMode {
        self.mode
    }

    fn publish(&mut self, enabled: bool) {
        info!(
            "Adaptive lighting switch: {}",
            if enabled { "on" } else { "off" }
        );
    }
}
