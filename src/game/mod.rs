// Game layer: configuration and the per-frame simulation step

pub mod config;
pub mod simulation;

pub use config::AppConfig;
pub use simulation::Simulation;
