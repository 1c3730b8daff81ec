use bevy::prelude::*;

use crate::resources::AugmentationConfig;
use crate::systems::{
    augmentation_post_tick_system, augmentation_pre_tick_system, handle_augmentation_requests,
    start_spawned_augmentations, sync_config_system, AugmentationRequest,
};

/// Augmentation stages within a physics tick
#[derive(SystemSet, Debug, Hash, PartialEq, Eq, Clone)]
pub enum AugmentationSet {
    /// Shared config pushed into vessels (FixedPreUpdate)
    Config,
    /// Start/stop requests and newly spawned vessels (FixedPreUpdate)
    Lifecycle,
    /// Estimation and control, before physics (FixedPreUpdate)
    Tick,
    /// Applied-command capture, after physics (FixedPostUpdate)
    Capture,
}

pub struct AugmentationPlugin {
    pub timestep: f64,
    pub config: AugmentationConfig,
    /// Start every `FlightAugmentation` as soon as it is spawned.
    pub auto_start: bool,
}

impl Default for AugmentationPlugin {
    fn default() -> Self {
        Self {
            timestep: 1.0 / 50.0, // 50 Hz default control rate
            config: AugmentationConfig::default(),
            auto_start: true,
        }
    }
}

impl AugmentationPlugin {
    pub fn with_config(config: AugmentationConfig) -> Self {
        Self {
            config,
            ..default()
        }
    }

    pub fn with_timestep(mut self, timestep: f64) -> Self {
        self.timestep = timestep;
        self
    }

    pub fn manual_start(mut self) -> Self {
        self.auto_start = false;
        self
    }
}

impl Plugin for AugmentationPlugin {
    fn build(&self, app: &mut App) {
        if let Err(err) = self.config.validate() {
            warn!("Augmentation plugin built with invalid config: {}", err);
        }

        app.insert_resource(self.config.clone())
            .insert_resource(Time::<Fixed>::from_seconds(self.timestep))
            .add_event::<AugmentationRequest>();

        app.configure_sets(
            FixedPreUpdate,
            (
                AugmentationSet::Config,
                AugmentationSet::Lifecycle,
                AugmentationSet::Tick,
            )
                .chain(),
        );

        app.add_systems(
            FixedPreUpdate,
            (
                sync_config_system
                    .run_if(resource_changed::<AugmentationConfig>)
                    .in_set(AugmentationSet::Config),
                handle_augmentation_requests.in_set(AugmentationSet::Lifecycle),
                augmentation_pre_tick_system.in_set(AugmentationSet::Tick),
            ),
        );

        if self.auto_start {
            app.add_systems(
                FixedPreUpdate,
                start_spawned_augmentations
                    .after(handle_augmentation_requests)
                    .in_set(AugmentationSet::Lifecycle),
            );
        }

        app.add_systems(
            FixedPostUpdate,
            augmentation_post_tick_system.in_set(AugmentationSet::Capture),
        );

        info!(
            "Augmentation plugin registered at {:.1} Hz",
            1.0 / self.timestep
        );
    }
}
