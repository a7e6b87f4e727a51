pub mod aircraft;
pub mod controller;

pub use aircraft::{
    AircraftConfig, AircraftSource, AircraftState, AircraftType, Attitude, ConfigError,
    ControlSurfaceCommand, InitialConditions, LandingPhase, RawAircraftConfig, TouchdownReport,
};
pub use controller::{PidGains, PidState};
