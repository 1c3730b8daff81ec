pub mod augmentation;
pub mod store;

pub use augmentation::{parameter, AugmentationConfig, ParameterKind, ParameterSpec, PARAMETERS};
pub use store::ParameterStore;
