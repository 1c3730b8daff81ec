use bevy::prelude::*;

use crate::components::{
    ControlAuthority, ControlSurfaceCommand, FlightAugmentation, PilotAxisInput, PilotControls,
    RigidBodyAssembly, VesselHost,
};
use crate::resources::AugmentationConfig;
use crate::utils::Axis;

/// Lifecycle requests for vessels carrying a [`FlightAugmentation`].
#[derive(Event, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AugmentationRequest {
    Start(Entity),
    Stop(Entity),
    StartAll,
    StopAll,
}

/// Presents one vessel's components as a [`VesselHost`].
pub struct EcsVesselHost<'a> {
    pub assembly: &'a RigidBodyAssembly,
    pub pilot: &'a PilotControls,
    pub authority: Option<&'a ControlAuthority>,
    pub command: &'a mut ControlSurfaceCommand,
}

impl VesselHost for EcsVesselHost<'_> {
    fn assembly(&self) -> &RigidBodyAssembly {
        self.assembly
    }

    fn pilot_input(&self, axis: Axis) -> PilotAxisInput {
        self.pilot.inputs[axis]
    }

    fn set_control_output(&mut self, axis: Axis, value: f64) {
        self.command.applied[axis] = value;
    }

    fn control_authority(&self, axis: Axis) -> Option<f64> {
        self.authority.and_then(|authority| authority.authority[axis])
    }
}

/// Runs estimation and control for every vessel before physics and writes
/// the control-surface commands.
pub fn augmentation_pre_tick_system(
    mut query: Query<(
        &mut FlightAugmentation,
        &RigidBodyAssembly,
        &PilotControls,
        Option<&ControlAuthority>,
        &mut ControlSurfaceCommand,
    )>,
    time: Res<Time<Fixed>>,
) {
    let dt = time.timestep().as_secs_f64();

    query
        .par_iter_mut()
        .for_each(|(mut augmentation, assembly, pilot, authority, mut command)| {
            let mut host = EcsVesselHost {
                assembly,
                pilot,
                authority,
                command: &mut *command,
            };
            augmentation.pre_tick(dt, &mut host);
        });
}

/// Captures the commands left on each vessel after physics.
pub fn augmentation_post_tick_system(
    mut query: Query<(&mut FlightAugmentation, &ControlSurfaceCommand)>,
) {
    for (mut augmentation, command) in query.iter_mut() {
        augmentation.post_tick(&command.applied);
    }
}

/// Pushes the shared config into every vessel. Scheduled to run only when
/// the resource changed.
pub fn sync_config_system(
    config: Res<AugmentationConfig>,
    mut query: Query<&mut FlightAugmentation>,
) {
    if let Err(err) = config.validate() {
        warn!("Rejected augmentation config: {}", err);
        return;
    }

    for mut augmentation in query.iter_mut() {
        if augmentation.is_running() && augmentation.config().structural_differs(&config) {
            debug!("Structural augmentation settings apply on the next start");
        }
        augmentation.set_config(config.clone());
    }
}

/// Starts augmentations as soon as they are spawned, with the shared config.
pub fn start_spawned_augmentations(
    config: Res<AugmentationConfig>,
    mut query: Query<&mut FlightAugmentation, Added<FlightAugmentation>>,
) {
    let valid = config.validate().is_ok();
    for mut augmentation in query.iter_mut() {
        if valid {
            augmentation.set_config(config.clone());
        }
        if !augmentation.is_running() {
            augmentation.start();
        }
    }
}

/// Applies queued [`AugmentationRequest`]s.
pub fn handle_augmentation_requests(
    mut requests: EventReader<AugmentationRequest>,
    mut query: Query<(Entity, &mut FlightAugmentation)>,
) {
    for request in requests.read() {
        match *request {
            AugmentationRequest::Start(entity) | AugmentationRequest::Stop(entity) => {
                let Ok((_, mut augmentation)) = query.get_mut(entity) else {
                    warn!("Augmentation request for unknown entity {:?}", entity);
                    continue;
                };
                apply_request(request, &mut augmentation);
            }
            AugmentationRequest::StartAll | AugmentationRequest::StopAll => {
                for (_, mut augmentation) in query.iter_mut() {
                    apply_request(request, &mut augmentation);
                }
            }
        }
    }
}

fn apply_request(request: &AugmentationRequest, augmentation: &mut FlightAugmentation) {
    match request {
        AugmentationRequest::Start(_) | AugmentationRequest::StartAll => augmentation.start(),
        AugmentationRequest::Stop(_) | AugmentationRequest::StopAll => augmentation.stop(),
    }
}
