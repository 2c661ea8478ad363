use std::time::Duration;

use chrono::{TimeZone, Utc};

use adaptive_lightd::controller::{Controller, ControllerConfig, Event};
use adaptive_lightd::sim::{SimLight, SimSun, SimSwitch};
use adaptive_lightd::switch::RestoreMode;

type SimController = Controller<SimLight, SimSun, SimSwitch>;

fn noon_controller(mode: RestoreMode) -> SimController {
    let sunrise = Utc.with_ymd_and_hms(2024, 6, 1, 6, 0, 0).unwrap();
    let sunset = Utc.with_ymd_and_hms(2024, 6, 1, 18, 0, 0).unwrap();
    let noon = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    Controller::new(
        ControllerConfig::default(),
        Some(SimLight::new((153.0, 500.0))),
        Some(SimSun::new(noon, Some(sunrise), Some(sunset))),
        SimSwitch::new(mode),
    )
}

fn call_count(controller: &SimController) -> usize {
    controller.light().unwrap().calls.len()
}

#[test]
fn restore_always_on_starts_enabled_and_publishes() {
    let controller = noon_controller(RestoreMode::AlwaysOn);
    assert!(controller.is_enabled());
    assert_eq!(controller.switch().published, vec![true]);
}

#[test]
fn restore_always_off_starts_disabled() {
    let controller = noon_controller(RestoreMode::AlwaysOff);
    assert!(!controller.is_enabled());
    assert!(controller.switch().published.is_empty());
}

#[test]
fn tick_commands_noon_target_with_explicit_brightness() {
    let mut controller = noon_controller(RestoreMode::AlwaysOn);
    controller.light_mut().unwrap().turn_on();
    controller.handle(Event::ValuesChanged);
    controller.handle(Event::Tick);

    let light = controller.light().unwrap();
    let call = light.last_call().expect("a command should be issued");
    assert_eq!(call.color_temperature, Some(153.0));
    // Brightness must be set explicitly; some drivers recompute it when only
    // the color temperature changes.
    assert_eq!(call.brightness, Some(1.0));
}

#[test]
fn tick_with_light_off_issues_no_command() {
    let mut controller = noon_controller(RestoreMode::AlwaysOn);
    controller.handle(Event::Tick);
    assert_eq!(call_count(&controller), 0);
}

#[test]
fn tick_while_disabled_issues_no_command() {
    let mut controller = noon_controller(RestoreMode::AlwaysOff);
    controller.light_mut().unwrap().turn_on();
    controller.handle(Event::Tick);
    assert_eq!(call_count(&controller), 0);
}

#[test]
fn command_echo_does_not_self_disable() {
    let mut controller = noon_controller(RestoreMode::AlwaysOn);
    controller.light_mut().unwrap().turn_on();
    controller.handle(Event::ValuesChanged);
    controller.handle(Event::Tick);
    assert_eq!(call_count(&controller), 1);

    // The light reports the state our own command produced. The dead-band
    // must absorb this echo instead of treating it as an external override.
    controller.handle(Event::ValuesChanged);
    assert!(controller.is_enabled());
    assert_eq!(call_count(&controller), 1);
}

#[test]
fn dead_band_suppresses_unchanged_target() {
    let mut controller = noon_controller(RestoreMode::AlwaysOn);
    controller.light_mut().unwrap().turn_on();
    controller.handle(Event::ValuesChanged);
    controller.handle(Event::Tick);
    assert_eq!(call_count(&controller), 1);

    // One minute later the rounded target is identical.
    let later = Utc.with_ymd_and_hms(2024, 6, 1, 12, 1, 0).unwrap();
    controller.sun_mut().unwrap().set_now(later);
    controller.handle(Event::Tick);
    assert_eq!(call_count(&controller), 1);
}

#[test]
fn external_color_change_disables_the_controller() {
    let mut controller = noon_controller(RestoreMode::AlwaysOn);
    controller.light_mut().unwrap().turn_on();
    controller.handle(Event::ValuesChanged);
    controller.handle(Event::Tick);
    assert!(controller.is_enabled());

    // Someone else writes 400.0 to the light while we last requested 153.0.
    controller.light_mut().unwrap().set_color_temperature(400.0);
    controller.handle(Event::ValuesChanged);
    assert!(!controller.is_enabled());
    assert_eq!(controller.switch().published.last(), Some(&false));

    // And with the controller disabled, ticks stop commanding.
    controller.handle(Event::Tick);
    assert_eq!(call_count(&controller), 1);
}

#[test]
fn always_on_reenables_on_fresh_turn_on_and_commands_once_after_fade() {
    let mut controller = noon_controller(RestoreMode::AlwaysOn);
    controller.handle(Event::EnableChanged(false));
    assert!(!controller.is_enabled());
    controller.handle(Event::ValuesChanged); // light still off
    assert_eq!(call_count(&controller), 0);

    // Fresh turn-on while disabled, with an always-on restore policy.
    controller.light_mut().unwrap().turn_on();
    controller.handle(Event::ValuesChanged);
    assert!(controller.is_enabled());
    let after_turn_on = call_count(&controller);

    // The turn-on fade completes; exactly one color command follows.
    controller.handle(Event::TargetReached);
    assert_eq!(call_count(&controller), after_turn_on + 1);

    // A repeated completion notification is dead-banded away.
    controller.handle(Event::TargetReached);
    assert_eq!(call_count(&controller), after_turn_on + 1);
}

#[test]
fn always_off_does_not_reenable_on_turn_on() {
    let mut controller = noon_controller(RestoreMode::AlwaysOff);
    controller.light_mut().unwrap().turn_on();
    controller.handle(Event::ValuesChanged);
    assert!(!controller.is_enabled());
    assert_eq!(call_count(&controller), 0);
}

#[test]
fn target_reached_before_any_observation_is_ignored() {
    let mut controller = noon_controller(RestoreMode::AlwaysOn);
    controller.light_mut().unwrap().turn_on();
    // No ValuesChanged yet, so previous_light_on is still false.
    controller.handle(Event::TargetReached);
    assert_eq!(call_count(&controller), 0);
}

#[test]
fn enable_toggle_forces_reapplication_of_the_same_target() {
    let mut controller = noon_controller(RestoreMode::AlwaysOn);
    controller.light_mut().unwrap().turn_on();
    controller.handle(Event::ValuesChanged);
    controller.handle(Event::Tick);
    assert_eq!(call_count(&controller), 1);

    controller.handle(Event::EnableChanged(false));
    controller.handle(Event::EnableChanged(true));
    // Unchanged target, but the toggle bypasses the dead-band.
    assert_eq!(call_count(&controller), 2);
    assert_eq!(
        controller.switch().published,
        vec![true, false, true]
    );

    // And once more after the turn-on transition completes.
    controller.handle(Event::TargetReached);
    assert_eq!(call_count(&controller), 3);
}

#[test]
fn missing_collaborators_degrade_without_panic() {
    let mut controller: SimController = Controller::new(
        ControllerConfig::default(),
        None,
        None,
        SimSwitch::new(RestoreMode::AlwaysOn),
    );
    controller.handle(Event::Tick);
    controller.handle(Event::ValuesChanged);
    controller.handle(Event::TargetReached);
    controller.handle(Event::EnableChanged(false));
    controller.dump();
    assert!(!controller.is_enabled());
}

#[test]
fn indeterminate_window_skips_the_cycle() {
    let noon = Utc.with_ymd_and_hms(2024, 12, 21, 12, 0, 0).unwrap();
    let mut controller: SimController = Controller::new(
        ControllerConfig::default(),
        Some(SimLight::new((153.0, 500.0))),
        // Polar night: no sunrise or sunset today.
        Some(SimSun::new(noon, None, None)),
        SimSwitch::new(RestoreMode::AlwaysOn),
    );
    controller.light_mut().unwrap().turn_on();
    controller.handle(Event::ValuesChanged);
    controller.handle(Event::Tick);
    assert_eq!(call_count(&controller), 0);
    // Not fatal: the controller stays enabled and retries next cycle.
    assert!(controller.is_enabled());
}

#[test]
fn bounds_unset_in_config_come_from_the_light() {
    let sunrise = Utc.with_ymd_and_hms(2024, 6, 1, 6, 0, 0).unwrap();
    let sunset = Utc.with_ymd_and_hms(2024, 6, 1, 18, 0, 0).unwrap();
    let late_evening = Utc.with_ymd_and_hms(2024, 6, 1, 23, 0, 0).unwrap();
    let mut controller: SimController = Controller::new(
        ControllerConfig::default(),
        Some(SimLight::new((200.0, 454.0))),
        Some(SimSun::new(late_evening, Some(sunrise), Some(sunset))),
        SimSwitch::new(RestoreMode::AlwaysOn),
    );
    controller.light_mut().unwrap().turn_on();
    controller.handle(Event::ValuesChanged);
    controller.handle(Event::Tick);
    // Outside the window the target is the light's own warm bound.
    let call = controller.light().unwrap().last_call().unwrap();
    assert_eq!(call.color_temperature, Some(454.0));
}

#[test]
fn transition_length_is_passed_through_when_supported() {
    let sunrise = Utc.with_ymd_and_hms(2024, 6, 1, 6, 0, 0).unwrap();
    let sunset = Utc.with_ymd_and_hms(2024, 6, 1, 18, 0, 0).unwrap();
    let noon = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
    let config = ControllerConfig {
        transition_length: Duration::from_millis(1500),
        ..ControllerConfig::default()
    };

    let mut controller: SimController = Controller::new(
        config.clone(),
        Some(SimLight::new((153.0, 500.0))),
        Some(SimSun::new(noon, Some(sunrise), Some(sunset))),
        SimSwitch::new(RestoreMode::AlwaysOn),
    );
    controller.light_mut().unwrap().turn_on();
    controller.handle(Event::ValuesChanged);
    controller.handle(Event::Tick);
    let call = controller.light().unwrap().last_call().unwrap();
    assert_eq!(call.transition_length, Some(Duration::from_millis(1500)));

    // A driver without transition support gets a plain command.
    let mut controller: SimController = Controller::new(
        config,
        Some(SimLight::new((153.0, 500.0)).without_transitions()),
        Some(SimSun::new(noon, Some(sunrise), Some(sunset))),
        SimSwitch::new(RestoreMode::AlwaysOn),
    );
    controller.light_mut().unwrap().turn_on();
    controller.handle(Event::ValuesChanged);
    controller.handle(Event::Tick);
    let call = controller.light().unwrap().last_call().unwrap();
    assert_eq!(call.transition_length, None);
}
