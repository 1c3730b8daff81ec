use bevy::log::{info, warn};
use bevy::prelude::*;

use crate::components::assembly::RigidBodyAssembly;
use crate::components::control::{AccelerationProfile, HandoffController};
use crate::components::controls::{ControlSurfaceCommand, PilotAxisInput, PilotControls};
use crate::components::estimation::{
    AuthorityEstimator, AxisSample, DerivativeEstimator, MomentAggregator, PassKind,
};
use crate::resources::AugmentationConfig;
use crate::utils::{Axis, PerAxis, SampleHistory};

/// What the augmentation needs from the simulation hosting a vessel.
pub trait VesselHost {
    /// Rigid-body snapshot for the current tick.
    fn assembly(&self) -> &RigidBodyAssembly;
    fn pilot_input(&self, axis: Axis) -> PilotAxisInput;
    fn set_control_output(&mut self, axis: Axis, value: f64);
    /// Known control authority (rad/s² per unit input). `None` lets the
    /// augmentation estimate it online.
    fn control_authority(&self, _axis: Axis) -> Option<f64> {
        None
    }
}

/// Flight-control augmentation for one vessel: rate estimation, authority
/// estimation and one adaptive controller per axis.
///
/// Driven by two calls per physics tick. [`pre_tick`](Self::pre_tick) runs
/// before physics and writes commands; [`post_tick`](Self::post_tick) runs
/// after physics and captures what was actually applied.
#[derive(Component, Debug)]
#[require(RigidBodyAssembly, PilotControls, ControlSurfaceCommand)]
pub struct FlightAugmentation {
    config: AugmentationConfig,
    running: bool,
    aggregator: MomentAggregator,
    estimator: DerivativeEstimator,
    authority: PerAxis<AuthorityEstimator>,
    applied: PerAxis<SampleHistory>,
    controllers: PerAxis<HandoffController>,
    outputs: PerAxis<f64>,
    ticks: u64,
}

impl Default for FlightAugmentation {
    fn default() -> Self {
        Self::new(AugmentationConfig::default())
    }
}

impl FlightAugmentation {
    /// Creates a stopped augmentation.
    pub fn new(config: AugmentationConfig) -> Self {
        Self {
            aggregator: MomentAggregator::new(config.dominant_mass_cap, config.full_recompute_interval),
            estimator: DerivativeEstimator::new(config.history_capacity),
            authority: PerAxis::default(),
            applied: PerAxis::splat(SampleHistory::new(config.history_capacity, 0.0)),
            controllers: PerAxis::from_fn(|axis| HandoffController::new(axis, &config)),
            outputs: PerAxis::default(),
            running: false,
            ticks: 0,
            config,
        }
    }

    /// Arms the augmentation, rebuilding all transient state from the
    /// current config. Installed profiles and target rates are kept.
    pub fn start(&mut self) {
        let config = &self.config;
        self.aggregator = MomentAggregator::new(config.dominant_mass_cap, config.full_recompute_interval);
        self.estimator = DerivativeEstimator::new(config.history_capacity);
        self.applied = PerAxis::splat(SampleHistory::new(config.history_capacity, 0.0));
        for axis in Axis::ALL {
            self.authority[axis].reset();
            self.controllers[axis].reset(config);
        }
        self.outputs = PerAxis::default();
        self.ticks = 0;
        self.running = true;
        info!(
            "Flight augmentation started (history {}, dominant cap {}, full pass every {} ticks)",
            config.history_capacity, config.dominant_mass_cap, config.full_recompute_interval
        );
    }

    pub fn stop(&mut self) {
        if self.running {
            info!("Flight augmentation stopped after {} ticks", self.ticks);
        }
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn config(&self) -> &AugmentationConfig {
        &self.config
    }

    /// Replaces the config. Tuning values apply from the next tick;
    /// structural ones on the next [`start`](Self::start).
    pub fn set_config(&mut self, config: AugmentationConfig) {
        self.config = config;
    }

    pub fn set_target_velocity(&mut self, axis: Axis, target: f64) {
        self.controllers[axis].set_target_velocity(target);
    }

    pub fn set_profile(&mut self, axis: Axis, profile: Box<dyn AccelerationProfile>) {
        self.controllers[axis].set_profile(profile);
    }

    pub fn controller(&self, axis: Axis) -> &HandoffController {
        &self.controllers[axis]
    }

    pub fn aggregator(&self) -> &MomentAggregator {
        &self.aggregator
    }

    pub fn estimator(&self) -> &DerivativeEstimator {
        &self.estimator
    }

    pub fn sample(&self, axis: Axis) -> AxisSample {
        self.estimator.sample(axis)
    }

    /// Authority estimated from applied input, if any yet.
    pub fn estimated_authority(&self, axis: Axis) -> Option<f64> {
        self.authority[axis].estimate()
    }

    /// Commands written on the last tick.
    pub fn outputs(&self) -> &PerAxis<f64> {
        &self.outputs
    }

    /// Commands the host reported as applied.
    pub fn applied(&self, axis: Axis) -> &SampleHistory {
        &self.applied[axis]
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Estimates, decides and writes commands for every axis. Returns false
    /// without touching the host when stopped or when `dt` is unusable.
    pub fn pre_tick(&mut self, dt: f64, host: &mut impl VesselHost) -> bool {
        if !self.running {
            return false;
        }
        if !dt.is_finite() || dt <= 0.0 {
            warn!("Flight augmentation skipping tick with timestep {}", dt);
            return false;
        }

        let assembly = host.assembly();
        let pass = self.aggregator.update(assembly);
        let basis = match pass {
            PassKind::Held => None,
            _ => self.aggregator.frame().map(|frame| frame.basis),
        };
        self.estimator.update(
            self.aggregator.state(),
            basis.as_ref(),
            &assembly.surface_velocity,
            dt,
        );

        let inertia = self.config.authority_inertia;
        for axis in Axis::ALL {
            self.authority[axis].observe(
                &self.applied[axis],
                self.estimator.acceleration(axis),
                inertia,
            );
        }

        for axis in Axis::ALL {
            let sample = self.estimator.sample(axis);
            let authority = host
                .control_authority(axis)
                .or_else(|| self.authority[axis].estimate());
            let pilot = host.pilot_input(axis);
            let output = self.controllers[axis].update(&sample, pilot, authority, &self.config, dt);
            self.outputs[axis] = output;
            host.set_control_output(axis, output);
        }

        self.ticks += 1;
        true
    }

    /// Captures the commands that were applied during physics, which may
    /// differ from what [`pre_tick`](Self::pre_tick) wrote.
    pub fn post_tick(&mut self, applied: &PerAxis<f64>) {
        if !self.running {
            return;
        }
        for axis in Axis::ALL {
            let value = applied[axis];
            let value = if value.is_finite() { value } else { self.outputs[axis] };
            self.applied[axis].put(value);
            self.controllers[axis].record_applied(value);
        }
    }
}
