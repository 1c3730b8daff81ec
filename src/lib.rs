pub mod components;
pub mod plugins;
pub mod resources;
pub mod systems;
pub mod utils;

pub use components::{FlightAugmentation, VesselHost};
pub use plugins::{AugmentationPlugin, AugmentationSet};
pub use resources::AugmentationConfig;
pub use utils::{AugmentError, Axis, PerAxis};
