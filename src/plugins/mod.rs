mod augmentation;

pub use augmentation::{AugmentationPlugin, AugmentationSet};
