mod augmentation;

pub use augmentation::{
    augmentation_post_tick_system, augmentation_pre_tick_system, handle_augmentation_requests,
    start_spawned_augmentations, sync_config_system, AugmentationRequest, EcsVesselHost,
};
