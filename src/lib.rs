pub mod components;
pub mod constants;
pub mod plugins;
pub mod resources;
pub mod systems;

pub use components::{AircraftConfig, AircraftState, InitialConditions, LandingPhase};
pub use resources::{EnvironmentConfig, EventLog, ScenarioConfig};
pub use systems::{tick, Simulation, TelemetrySnapshot};
