pub mod config;
pub mod state;

pub use config::{AircraftConfig, AircraftSource, AircraftType, ConfigError, RawAircraftConfig};
pub use state::{
    AircraftState, Attitude, ControlSurfaceCommand, InitialConditions, LandingPhase,
    TouchdownReport,
};
