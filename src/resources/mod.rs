pub mod config;

pub use config::{
    parameter, AugmentationConfig, ParameterKind, ParameterSpec, ParameterStore, PARAMETERS,
};
