pub mod assembly;
pub mod augmentation;
pub mod control;
pub mod controls;
pub mod estimation;

pub use assembly::{BodyId, MassCentre, ReferenceBasis, RigidBody, RigidBodyAssembly};
pub use augmentation::{FlightAugmentation, VesselHost};
pub use control::{
    AccelerationProfile, AdaptivePid, BrakingProfile, ControlMode, DampingProfile,
    HandoffController, HandoffState, PidDebug, PidState,
};
pub use controls::{ControlAuthority, ControlSurfaceCommand, PilotAxisInput, PilotControls};
pub use estimation::{
    angle_of_attack, AuthorityEstimator, AxisSample, DerivativeEstimator, MomentAggregator,
    MomentState, PassKind, TickFrame,
};
