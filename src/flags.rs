//! clap argument parsing

use crate::switch::RestoreMode;

#[derive(Debug, clap::Parser)]
#[command(version, about, long_about = None)]
/// Solar-tracking color temperature controller for smart lights
pub struct Cli {
    /// Latitude of the light's location, in degrees.
    #[clap(long, allow_negative_numbers = true)]
    pub latitude: f64,
    /// Longitude of the light's location, in degrees.
    #[clap(long, allow_negative_numbers = true)]
    pub longitude: f64,
    /// Coolest color temperature in mireds, used at solar noon.
    /// Defaults to the light's supported minimum.
    #[clap(long)]
    pub min_mireds: Option<f32>,
    /// Warmest color temperature in mireds, used at night.
    /// Defaults to the light's supported maximum.
    #[clap(long)]
    pub max_mireds: Option<f32>,
    /// Solar elevation angle in degrees treated as sunrise.
    #[clap(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub sunrise_elevation: f64,
    /// Solar elevation angle in degrees treated as sunset.
    #[clap(long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub sunset_elevation: f64,
    /// Transition length in milliseconds for issued commands. 0 is instant.
    #[clap(short, long, default_value_t = 0)]
    pub transition: u64,
    /// Curve steepness. Higher values hold the cool value longer around noon.
    #[clap(short, long, default_value_t = 1.0)]
    pub speed: f32,
    /// Restore-on-boot policy for the enable switch.
    #[clap(long, value_enum, default_value = "always-on")]
    pub restore_mode: RestoreMode,
    /// Step a simulated light through a full day instead of dumping today's
    /// diagnostics once.
    #[clap(long)]
    pub simulate: bool,
    /// Seconds of simulated time per step.
    #[clap(short, long, default_value_t = 600)]
    pub interval: u64,
}
