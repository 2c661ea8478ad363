//! Adaptive lighting daemon core. Tracks solar position with a light's color
//! temperature, warm at night and cool around solar noon.
//!
//! The binary has no real light driver attached; it prints the diagnostic
//! dump for today at the given coordinates, or with `--simulate` steps an
//! in-memory light through a full day to show the commands the controller
//! would issue.

use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use log::info;

use adaptive_lightd::controller::{Controller, ControllerConfig, Event};
use adaptive_lightd::flags;
use adaptive_lightd::sim::{SimLight, SimSun};
use adaptive_lightd::sun::{SolarClock, SunProvider};
use adaptive_lightd::switch::LoggingSwitch;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = flags::Cli::parse();
    anyhow::ensure!(cli.speed > 0.0, "--speed must be positive");
    if let (Some(min), Some(max)) = (cli.min_mireds, cli.max_mireds) {
        anyhow::ensure!(
            min <= max,
            "--min-mireds ({min}) must not exceed --max-mireds ({max})"
        );
    }
    if cli.simulate {
        simulate(&cli)
    } else {
        dump_today(&cli)
    }
}

fn controller_config(cli: &flags::Cli) -> ControllerConfig {
    ControllerConfig {
        min_mireds: cli.min_mireds,
        max_mireds: cli.max_mireds,
        sunrise_elevation: cli.sunrise_elevation,
        sunset_elevation: cli.sunset_elevation,
        transition_length: Duration::from_millis(cli.transition),
        speed: cli.speed,
    }
}

/// Print the diagnostic dump for today at the configured location.
fn dump_today(cli: &flags::Cli) -> anyhow::Result<()> {
    let sun = SolarClock::new(cli.latitude, cli.longitude)?;
    let light = SimLight::new((153.0, 500.0));
    let controller = Controller::new(
        controller_config(cli),
        Some(light),
        Some(sun),
        LoggingSwitch::new(cli.restore_mode),
    );
    controller.dump();
    Ok(())
}

/// Step a simulated light through one full day, delivering a tick plus the
/// state-change echo a real light would report after every command.
fn simulate(cli: &flags::Cli) -> anyhow::Result<()> {
    let clock = SolarClock::new(cli.latitude, cli.longitude)?;
    let today = clock.now().date_naive();
    let sunrise = clock.sunrise(today, cli.sunrise_elevation);
    let sunset = clock.sunset(today, cli.sunset_elevation);

    let start = today
        .and_hms_opt(0, 0, 0)
        .context("invalid start of day")?
        .and_utc();
    let sun = SimSun::new(start, sunrise, sunset);
    let light = SimLight::new((153.0, 500.0));
    let mut controller = Controller::new(
        controller_config(cli),
        Some(light),
        Some(sun),
        LoggingSwitch::new(cli.restore_mode),
    );

    if let Some(light) = controller.light_mut() {
        light.turn_on();
    }
    controller.handle(Event::ValuesChanged);

    let step = chrono::Duration::seconds(cli.interval.max(1) as i64);
    let end = start + chrono::Duration::days(1);
    let mut now = start;
    let mut issued = 0;
    while now < end {
        if let Some(sun) = controller.sun_mut() {
            sun.set_now(now);
        }
        controller.handle(Event::Tick);
        controller.handle(Event::ValuesChanged);

        let calls = controller.light().map_or(0, |light| light.calls.len());
        if calls > issued {
            issued = calls;
            if let Some(mireds) = controller
                .light()
                .and_then(|light| light.last_call())
                .and_then(|call| call.color_temperature)
            {
                info!("{}: commanded {mireds:.1} mireds", now.format("%H:%M"));
            }
        }
        now += step;
    }

    info!("Simulated day complete: {issued} commands issued");
    Ok(())
}
