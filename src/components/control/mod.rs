pub mod handoff;
pub mod pid;
pub mod profile;

pub use handoff::{ControlMode, HandoffController, HandoffState};
pub use pid::{AdaptivePid, PidDebug, PidState};
pub use profile::{AccelerationProfile, BrakingProfile, DampingProfile};
