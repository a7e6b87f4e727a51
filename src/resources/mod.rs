pub mod config;
mod event_log;
mod rng;

pub use config::{
    EnvironmentConfig, EnvironmentSnapshot, PendingRequests, ScenarioConfig, ScriptedAction,
    ScriptedEvent, SimulationSettings,
};
pub use event_log::{EventKind, EventLog, LogEntry, EVENT_LOG_CAPACITY};
pub use rng::SimRng;
