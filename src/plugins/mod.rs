mod landing;

pub use landing::{
    handle_requests, refresh_telemetry, simulation_tick_system, BirdStrikeRequest, LandingSet,
    LandingSimPlugin, ManualDeployRequest, PhaseChanged, ResetRequest,
};
