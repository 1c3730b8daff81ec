mod common;

use approx::assert_relative_eq;
use common::*;
use flyer_augment::components::{
    BrakingProfile, ControlMode, FlightAugmentation, PassKind, PilotAxisInput,
};
use flyer_augment::resources::AugmentationConfig;
use flyer_augment::utils::{Axis, PerAxis};
use nalgebra::Vector3;

/// One full physics tick: pre tick, physics, post tick.
fn tick(augmentation: &mut FlightAugmentation, vessel: &mut SimulatedVessel) {
    augmentation.pre_tick(DT, vessel);
    vessel.step(DT);
    augmentation.post_tick(&vessel.commands);
}

fn started(config: AugmentationConfig) -> FlightAugmentation {
    let mut augmentation = FlightAugmentation::new(config);
    augmentation.start();
    augmentation
}

#[test]
fn test_pitch_rate_damps_without_growing_oscillation() {
    let mut augmentation = started(AugmentationConfig::default());
    let mut vessel = SimulatedVessel::new(
        single_body_vessel(Vector3::zeros()),
        RatePlant::new(0.5, rates_on(Axis::Pitch, 0.1)),
    )
    .with_reported_authority(0.5);

    let mut pitch = Vec::with_capacity(6000);
    for _ in 0..6000 {
        tick(&mut augmentation, &mut vessel);
        assert_outputs_valid(&vessel.commands);
        pitch.push(vessel.commands[Axis::Pitch]);
    }

    // First command opposes the rate.
    assert!(pitch[0] < 0.0);
    assert!(vessel.rate(Axis::Pitch).abs() < 1e-9);
    assert_envelope_decays(&pitch, 1000);

    // Inside the steady-state band the magnitude no longer grows.
    for pair in pitch[5000..].windows(2) {
        assert!(pair[1].abs() <= pair[0].abs() + 1e-9);
    }

    // Gains settled on the authority.
    let pid = augmentation.controller(Axis::Pitch).pid();
    assert_relative_eq!(pid.kp(), 0.75 / 0.5, epsilon = 1e-6);
    assert_relative_eq!(pid.kd(), 0.33 * 1.5, epsilon = 1e-6);
}

#[test]
fn test_untouched_axes_stay_quiet() {
    let mut augmentation = started(AugmentationConfig::default());
    let mut vessel = SimulatedVessel::new(
        single_body_vessel(Vector3::zeros()),
        RatePlant::new(0.5, rates_on(Axis::Yaw, 0.05)),
    )
    .with_reported_authority(0.5);

    for _ in 0..500 {
        tick(&mut augmentation, &mut vessel);
    }
    assert_eq!(vessel.commands[Axis::Pitch], 0.0);
    assert_eq!(vessel.commands[Axis::Roll], 0.0);
    assert!(vessel.rate(Axis::Yaw).abs() < 0.05);
}

#[test]
fn test_online_authority_estimate_drives_gains() {
    let mut augmentation = started(AugmentationConfig::default());
    let mut vessel = SimulatedVessel::new(
        single_body_vessel(Vector3::zeros()),
        RatePlant::new(0.5, rates_on(Axis::Roll, 0.2)),
    );

    for _ in 0..400 {
        tick(&mut augmentation, &mut vessel);
        assert_outputs_valid(&vessel.commands);
    }

    let estimate = augmentation.estimated_authority(Axis::Roll).unwrap();
    assert_relative_eq!(estimate, 0.5, epsilon = 1e-6);
    assert!(augmentation.controller(Axis::Roll).pid().kp() > 0.75);
    assert!(vessel.rate(Axis::Roll).abs() < 0.2);
}

#[test]
fn test_multi_body_vessel_survives_detaching_parts() {
    let config = AugmentationConfig {
        dominant_mass_cap: 4,
        full_recompute_interval: 10,
        ..AugmentationConfig::default()
    };
    let mut augmentation = started(config);
    let mut vessel = SimulatedVessel::new(
        multi_body_vessel(Vector3::zeros(), 9),
        RatePlant::new(0.5, rates_on(Axis::Pitch, 0.1)),
    )
    .with_reported_authority(0.5);

    tick(&mut augmentation, &mut vessel);
    assert_eq!(augmentation.aggregator().last_pass(), PassKind::Full);
    assert_relative_eq!(augmentation.sample(Axis::Pitch).velocity, 0.1, epsilon = 1e-9);
    tick(&mut augmentation, &mut vessel);
    assert_eq!(augmentation.aggregator().last_pass(), PassKind::Partial);

    // Drop the heaviest wing part, which sits in the dominant set.
    let heaviest = augmentation
        .aggregator()
        .dominant_ids()
        .find(|id| id.0 != 0)
        .unwrap();
    vessel
        .assembly
        .bodies
        .retain(|body| body.id != heaviest);
    tick(&mut augmentation, &mut vessel);
    assert_eq!(augmentation.aggregator().last_pass(), PassKind::Full);

    for _ in 0..600 {
        tick(&mut augmentation, &mut vessel);
        assert_outputs_valid(&vessel.commands);
    }
    assert!(vessel.rate(Axis::Pitch).abs() < 0.1);
}

#[test]
fn test_pilot_excursion_hands_back_with_accumulator() {
    let mut augmentation = started(AugmentationConfig::default());
    let mut vessel = SimulatedVessel::new(
        single_body_vessel(Vector3::zeros()),
        RatePlant::new(0.5, rates_on(Axis::Pitch, 0.1)),
    )
    .with_reported_authority(0.5);

    for _ in 0..20 {
        tick(&mut augmentation, &mut vessel);
    }
    let accumulated = augmentation.controller(Axis::Pitch).pid().accumulator();
    assert!(accumulated < 0.0);

    // Airspeed and angle of attack do not change during the excursion.
    vessel.pilot[Axis::Pitch] = PilotAxisInput::new(0.05, 0.0);
    tick(&mut augmentation, &mut vessel);
    assert_eq!(augmentation.controller(Axis::Pitch).mode(), ControlMode::Manual);
    for _ in 0..9 {
        tick(&mut augmentation, &mut vessel);
    }
    assert_eq!(augmentation.controller(Axis::Pitch).pid().accumulator(), accumulated);

    vessel.pilot[Axis::Pitch] = PilotAxisInput::neutral(0.0);
    tick(&mut augmentation, &mut vessel);
    let controller = augmentation.controller(Axis::Pitch);
    assert_eq!(controller.mode(), ControlMode::Automatic);
    assert_eq!(controller.last_persistence(), Some(1.0));
    assert_eq!(controller.pid().accumulator(), accumulated);
}

#[test]
fn test_speed_change_during_excursion_discards_accumulator() {
    let mut augmentation = started(AugmentationConfig::default());
    let mut vessel = SimulatedVessel::new(
        single_body_vessel(Vector3::zeros()),
        RatePlant::new(0.5, rates_on(Axis::Yaw, -0.1)),
    )
    .with_reported_authority(0.5);

    for _ in 0..20 {
        tick(&mut augmentation, &mut vessel);
    }
    assert!(augmentation.controller(Axis::Yaw).pid().accumulator() > 0.0);

    vessel.pilot[Axis::Yaw] = PilotAxisInput::new(0.3, 0.1);
    tick(&mut augmentation, &mut vessel);
    vessel.assembly.surface_velocity = Vector3::new(0.0, 40.0, 0.0);
    tick(&mut augmentation, &mut vessel);

    vessel.pilot[Axis::Yaw] = PilotAxisInput::neutral(0.1);
    tick(&mut augmentation, &mut vessel);
    let controller = augmentation.controller(Axis::Yaw);
    assert_eq!(controller.last_persistence(), Some(0.0));
    assert_eq!(controller.pid().accumulator(), 0.0);
}

#[test]
fn test_braking_profile_reaches_target_rate() {
    let mut augmentation = started(AugmentationConfig::default());
    augmentation.set_profile(Axis::Roll, Box::new(BrakingProfile));
    augmentation.set_target_velocity(Axis::Roll, 0.2);
    let mut vessel = SimulatedVessel::new(
        single_body_vessel(Vector3::zeros()),
        RatePlant::new(0.5, PerAxis::default()),
    )
    .with_reported_authority(0.5);

    for _ in 0..3000 {
        tick(&mut augmentation, &mut vessel);
        assert_outputs_valid(&vessel.commands);
    }
    assert_relative_eq!(vessel.rate(Axis::Roll), 0.2, epsilon = 1e-3);
}
