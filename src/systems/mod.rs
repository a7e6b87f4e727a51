pub mod aerodynamics;
pub mod controller;
pub mod phase;
pub mod physics;
pub mod risk;
pub mod simulation;
pub mod telemetry;

pub use phase::{advance_phase, PhaseTransition};
pub use risk::{effective_speed_kt, evaluate_risk, RiskAssessment, RiskReason};
pub use simulation::{
    get_telemetry, request_bird_strike, request_manual_deploy, reset, reset_run, tick,
    tick_with_transition, Simulation, TickOutput,
};
pub use telemetry::{telemetry, LatestTelemetry, TelemetrySnapshot};
