use bevy::{prelude::*, time::TimeUpdateStrategy};
use std::time::Duration;
use touchdown::{
    components::{AircraftConfig, InitialConditions},
    plugins::{LandingSet, LandingSimPlugin, PhaseChanged},
    resources::{EnvironmentConfig, SimulationSettings},
};

/// Phase changes recorded by the test app, oldest first.
#[derive(Resource, Debug, Default)]
pub struct PhaseHistory(pub Vec<PhaseChanged>);

fn record_phase_changes(mut events: EventReader<PhaseChanged>, mut history: ResMut<PhaseHistory>) {
    history.0.extend(events.read().copied());
}

// Builder for creating a test application with customizable configuration
pub struct TestAppBuilder {
    aircraft: AircraftConfig,
    environment: EnvironmentConfig,
    initial: InitialConditions,
    time_step: f64,
    seed: Option<u64>,
}

impl Default for TestAppBuilder {
    fn default() -> Self {
        Self {
            aircraft: AircraftConfig::default(),
            environment: EnvironmentConfig::default(),
            initial: InitialConditions::default(),
            time_step: 1.0 / 60.0,
            seed: Some(7),
        }
    }
}

impl TestAppBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_aircraft(mut self, config: AircraftConfig) -> Self {
        self.aircraft = config;
        self
    }

    pub fn with_environment(mut self, config: EnvironmentConfig) -> Self {
        self.environment = config;
        self
    }

    pub fn with_initial(mut self, initial: InitialConditions) -> Self {
        self.initial = initial;
        self
    }

    pub fn with_time_step(mut self, time_step: f64) -> Self {
        self.time_step = time_step;
        self
    }

    pub fn build(self) -> TestApp {
        let mut app = App::new();

        let plugin = LandingSimPlugin {
            aircraft: self.aircraft,
            environment: self.environment,
            initial: self.initial,
            settings: SimulationSettings {
                timestep: self.time_step,
                seed: self.seed,
            },
        };

        app.add_plugins(MinimalPlugins).add_plugins(plugin);

        // Each update advances the clock by exactly one fixed tick.
        app.insert_resource(TimeUpdateStrategy::ManualDuration(
            Duration::from_secs_f64(self.time_step),
        ));

        app.init_resource::<PhaseHistory>().add_systems(
            FixedUpdate,
            record_phase_changes.after(LandingSet::Simulate),
        );

        app.finish();
        app.cleanup();

        // Run an initial update to spawn the aircraft and start the clock
        app.update();

        TestApp { app }
    }
}

/// Main test application wrapper
pub struct TestApp {
    pub app: App,
}

impl TestApp {
    pub fn run_steps(&mut self, steps: usize) {
        for _ in 0..steps {
            self.app.update();
        }
    }

    pub fn run_frame(&mut self) {
        self.app.update();
    }

    pub fn send<E: Event>(&mut self, event: E) {
        self.app.world_mut().send_event(event);
    }

    pub fn get_state<T: Resource>(&self) -> Option<&T> {
        self.app.world().get_resource::<T>()
    }

    pub fn get_state_mut<T: Resource>(&mut self) -> Option<Mut<T>> {
        self.app.world_mut().get_resource_mut::<T>()
    }

    pub fn query_single<T: Component>(&mut self) -> Option<&T> {
        let world = self.app.world_mut();
        let mut query = world.query::<&T>();
        query.get_single(world).ok()
    }

    pub fn query_all<T: Component>(&mut self) -> Vec<&T> {
        let world = self.app.world_mut();
        let mut query = world.query::<&T>();
        query.iter(world).collect()
    }
}
