mod aircraft;
mod loader;

pub use aircraft::{AircraftConfig, AircraftSource, AircraftType};
pub use loader::{ConfigError, RawAircraftConfig};
