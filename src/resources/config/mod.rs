pub mod environment;
pub mod simulation;

pub use environment::{EnvironmentConfig, EnvironmentSnapshot, PendingRequests};
pub use simulation::{ScenarioConfig, ScriptedAction, ScriptedEvent, SimulationSettings};
