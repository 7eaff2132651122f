pub mod config;
pub mod error;
pub mod gifts;
pub mod telemetry;
