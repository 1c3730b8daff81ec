use bevy::log::debug;
use serde::{Deserialize, Serialize};

use super::pid::AdaptivePid;
use super::profile::{AccelerationProfile, DampingProfile};
use crate::components::controls::PilotAxisInput;
use crate::components::estimation::AxisSample;
use crate::resources::AugmentationConfig;
use crate::utils::{ramp_down, Axis};

/// Who currently flies the axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ControlMode {
    #[default]
    Automatic,
    Manual,
}

/// Handoff bookkeeping: the mode plus the flight condition captured when
/// manual control began.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct HandoffState {
    pub mode: ControlMode,
    pub entry_angle_of_attack: f64,
    pub entry_airspeed: f64,
}

impl HandoffState {
    pub fn user_controlling(&self) -> bool {
        self.mode == ControlMode::Manual
    }
}

/// Arbitrates pilot and automatic control of one axis around an
/// [`AdaptivePid`].
///
/// While the stick is off trim the pilot's input is passed through with rate
/// damping added. When it returns to trim the integral accumulator is kept
/// only as far as the angle of attack and airspeed are still close to where
/// the excursion started.
#[derive(Debug)]
pub struct HandoffController {
    axis: Axis,
    pid: AdaptivePid,
    handoff: HandoffState,
    profile: Box<dyn AccelerationProfile>,
    target_velocity: f64,
    last_persistence: Option<f64>,
}

impl HandoffController {
    pub fn new(axis: Axis, config: &AugmentationConfig) -> Self {
        Self {
            axis,
            pid: AdaptivePid::new(config),
            handoff: HandoffState::default(),
            profile: Box::new(DampingProfile),
            target_velocity: 0.0,
            last_persistence: None,
        }
    }

    pub fn with_profile(mut self, profile: Box<dyn AccelerationProfile>) -> Self {
        self.profile = profile;
        self
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn pid(&self) -> &AdaptivePid {
        &self.pid
    }

    pub fn handoff(&self) -> &HandoffState {
        &self.handoff
    }

    pub fn mode(&self) -> ControlMode {
        self.handoff.mode
    }

    pub fn profile(&self) -> &dyn AccelerationProfile {
        self.profile.as_ref()
    }

    pub fn set_profile(&mut self, profile: Box<dyn AccelerationProfile>) {
        self.profile = profile;
    }

    pub fn target_velocity(&self) -> f64 {
        self.target_velocity
    }

    pub fn set_target_velocity(&mut self, target: f64) {
        if target.is_finite() {
            self.target_velocity = target;
        }
    }

    /// Accumulator persistence factor applied at the last manual exit.
    pub fn last_persistence(&self) -> Option<f64> {
        self.last_persistence
    }

    /// Runs one tick and returns the command for the axis, always within
    /// [-1, 1].
    pub fn update(
        &mut self,
        sample: &AxisSample,
        pilot: PilotAxisInput,
        authority: Option<f64>,
        config: &AugmentationConfig,
        dt: f64,
    ) -> f64 {
        let error = self.target_velocity - sample.velocity;
        let target_acceleration = self.profile.desired_acceleration(error, config);
        let derivative_error = sample.acceleration - target_acceleration;

        self.pid.adapt_gains(authority, config);
        self.pid.adapt_integral(error, sample.acceleration, config);

        let candidate = if pilot.is_overriding() {
            if !self.handoff.user_controlling() {
                self.enter_manual(sample);
            }
            pilot.value - config.user_dampening * self.pid.kp() * sample.velocity
        } else if self.handoff.user_controlling() {
            self.exit_manual(sample, config);
            self.pid.compute(error, derivative_error, dt, false)
        } else {
            self.pid.compute(error, derivative_error, dt, true)
        };

        self.pid.limit(candidate, dt, config.max_output_deriv)
    }

    /// Feeds back the command the host actually applied.
    pub fn record_applied(&mut self, applied: f64) {
        self.pid.record_applied(applied);
    }

    /// Back to automatic with fresh gains and an empty accumulator.
    pub fn reset(&mut self, config: &AugmentationConfig) {
        self.pid.reset(config);
        self.handoff = HandoffState::default();
        self.last_persistence = None;
    }

    fn enter_manual(&mut self, sample: &AxisSample) {
        self.handoff = HandoffState {
            mode: ControlMode::Manual,
            entry_angle_of_attack: sample.angle_of_attack,
            entry_airspeed: sample.airspeed,
        };
        debug!(
            "{} axis: manual override (aoa {:.4} rad, airspeed {:.1} m/s)",
            self.axis, sample.angle_of_attack, sample.airspeed
        );
    }

    fn exit_manual(&mut self, sample: &AxisSample, config: &AugmentationConfig) {
        let aoa_drift = sample.angle_of_attack - self.handoff.entry_angle_of_attack;
        let speed_drift = sample.airspeed - self.handoff.entry_airspeed;
        let persistence = ramp_down(aoa_drift, config.handoff_aoa_window)
            .min(ramp_down(speed_drift, config.handoff_speed_window));

        self.pid.scale_accumulator(persistence);
        self.handoff.mode = ControlMode::Automatic;
        self.last_persistence = Some(persistence);
        debug!(
            "{} axis: automatic control resumed, accumulator kept at {:.0}%",
            self.axis,
            persistence * 100.0
        );
    }
}
