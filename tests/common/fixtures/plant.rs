use bevy::prelude::*;
use flyer_augment::components::{
    ControlSurfaceCommand, PilotAxisInput, RigidBodyAssembly, VesselHost,
};
use flyer_augment::utils::{Axis, PerAxis};
use nalgebra::Vector3;

use super::vessels::spin_rigidly;

fn rates_vector(rates: &PerAxis<f64>) -> Vector3<f64> {
    Vector3::new(rates[Axis::Pitch], rates[Axis::Roll], rates[Axis::Yaw])
}

/// Pure rate plant: angular acceleration = authority · applied command.
#[derive(Component, Debug, Clone, Copy)]
pub struct RatePlant {
    pub authority: PerAxis<f64>,
    pub rates: PerAxis<f64>,
}

impl RatePlant {
    pub fn new(authority: f64, rates: PerAxis<f64>) -> Self {
        Self {
            authority: PerAxis::splat(authority),
            rates,
        }
    }

    pub fn step(&mut self, command: &PerAxis<f64>, dt: f64) {
        for axis in Axis::ALL {
            self.rates[axis] += self.authority[axis] * command[axis] * dt;
        }
    }
}

/// Command the host forces onto an axis during physics, ignoring the
/// augmentation.
#[derive(Component, Debug, Clone, Copy, Default)]
pub struct CommandOverride {
    pub values: PerAxis<Option<f64>>,
}

/// Host-side actuator override, run in `FixedUpdate` before the plant.
pub fn command_override_system(mut query: Query<(&CommandOverride, &mut ControlSurfaceCommand)>) {
    for (overrides, mut command) in query.iter_mut() {
        for axis in Axis::ALL {
            if let Some(value) = overrides.values[axis] {
                command.applied[axis] = value;
            }
        }
    }
}

/// Integrates the rate plant and writes the result back into the assembly.
pub fn rate_plant_system(
    mut query: Query<(&mut RatePlant, &ControlSurfaceCommand, &mut RigidBodyAssembly)>,
    time: Res<Time<Fixed>>,
) {
    let dt = time.timestep().as_secs_f64();
    for (mut plant, command, mut assembly) in query.iter_mut() {
        plant.step(&command.applied, dt);
        spin_rigidly(&mut assembly, rates_vector(&plant.rates));
    }
}

/// A vessel driven directly through [`VesselHost`], without an ECS.
#[derive(Debug, Clone)]
pub struct SimulatedVessel {
    pub assembly: RigidBodyAssembly,
    pub plant: RatePlant,
    pub pilot: PerAxis<PilotAxisInput>,
    pub commands: PerAxis<f64>,
    pub reported_authority: Option<f64>,
}

impl SimulatedVessel {
    pub fn new(assembly: RigidBodyAssembly, plant: RatePlant) -> Self {
        let mut vessel = Self {
            assembly,
            plant,
            pilot: PerAxis::default(),
            commands: PerAxis::default(),
            reported_authority: None,
        };
        spin_rigidly(&mut vessel.assembly, rates_vector(&vessel.plant.rates));
        vessel
    }

    pub fn with_reported_authority(mut self, authority: f64) -> Self {
        self.reported_authority = Some(authority);
        self
    }

    /// Physics step: applies the current commands.
    pub fn step(&mut self, dt: f64) {
        self.plant.step(&self.commands, dt);
        spin_rigidly(&mut self.assembly, rates_vector(&self.plant.rates));
    }

    pub fn rate(&self, axis: Axis) -> f64 {
        self.plant.rates[axis]
    }
}

impl VesselHost for SimulatedVessel {
    fn assembly(&self) -> &RigidBodyAssembly {
        &self.assembly
    }

    fn pilot_input(&self, axis: Axis) -> PilotAxisInput {
        self.pilot[axis]
    }

    fn set_control_output(&mut self, axis: Axis, value: f64) {
        self.commands[axis] = value;
    }

    fn control_authority(&self, _axis: Axis) -> Option<f64> {
        self.reported_authority
    }
}
