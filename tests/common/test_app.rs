use bevy::prelude::*;
use flyer_augment::{
    components::{
        ControlAuthority, ControlSurfaceCommand, FlightAugmentation, PilotControls,
        RigidBodyAssembly,
    },
    plugins::AugmentationPlugin,
    resources::AugmentationConfig,
};

use super::fixtures::{command_override_system, rate_plant_system};
use super::helpers::DT;

// Builder for creating a test application with customizable configuration
pub struct TestAppBuilder {
    config: AugmentationConfig,
    time_step: f64,
    auto_start: bool,
}

impl Default for TestAppBuilder {
    fn default() -> Self {
        Self {
            config: AugmentationConfig::default(),
            time_step: DT,
            auto_start: true,
        }
    }
}

impl TestAppBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(mut self, config: AugmentationConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_time_step(mut self, time_step: f64) -> Self {
        self.time_step = time_step;
        self
    }

    pub fn manual_start(mut self) -> Self {
        self.auto_start = false;
        self
    }

    pub fn build(self) -> TestApp {
        let mut app = App::new();

        let mut plugin = AugmentationPlugin::with_config(self.config).with_timestep(self.time_step);
        if !self.auto_start {
            plugin = plugin.manual_start();
        }

        app.add_plugins(MinimalPlugins).add_plugins(plugin);

        // Host physics between the augmentation's pre and post ticks
        app.add_systems(
            FixedUpdate,
            (command_override_system, rate_plant_system).chain(),
        );

        app.finish();
        app.cleanup();

        TestApp { app }
    }
}

/// Main test application wrapper. Ticks run the fixed schedules directly so
/// every call is exactly one physics step.
pub struct TestApp {
    pub app: App,
}

impl TestApp {
    /// Spawns a vessel with the given assembly and extra components.
    pub fn spawn_vessel(&mut self, assembly: RigidBodyAssembly, extra: impl Bundle) -> Entity {
        let config = self.app.world().resource::<AugmentationConfig>().clone();
        self.app
            .world_mut()
            .spawn((FlightAugmentation::new(config), assembly, extra))
            .id()
    }

    pub fn run_tick(&mut self) {
        let world = self.app.world_mut();
        world.run_schedule(FixedPreUpdate);
        world.run_schedule(FixedUpdate);
        world.run_schedule(FixedPostUpdate);
    }

    pub fn run_ticks(&mut self, ticks: usize) {
        for _ in 0..ticks {
            self.run_tick();
        }
    }

    pub fn send<E: Event>(&mut self, event: E) {
        self.app.world_mut().send_event(event);
    }

    pub fn config_mut(&mut self) -> Mut<AugmentationConfig> {
        self.app.world_mut().resource_mut::<AugmentationConfig>()
    }

    pub fn augmentation(&self, entity: Entity) -> &FlightAugmentation {
        self.component(entity)
    }

    pub fn command(&self, entity: Entity) -> &ControlSurfaceCommand {
        self.component(entity)
    }

    pub fn component<T: Component>(&self, entity: Entity) -> &T {
        self.app
            .world()
            .get::<T>(entity)
            .expect("vessel is missing component")
    }

    pub fn component_mut<T: Component>(&mut self, entity: Entity) -> Mut<T> {
        self.app
            .world_mut()
            .get_mut::<T>(entity)
            .expect("vessel is missing component")
    }

    pub fn set_pilot(&mut self, entity: Entity, controls: PilotControls) {
        *self.component_mut::<PilotControls>(entity) = controls;
    }

    pub fn set_authority(&mut self, entity: Entity, authority: ControlAuthority) {
        self.app.world_mut().entity_mut(entity).insert(authority);
    }
}
