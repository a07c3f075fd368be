pub mod config;
pub mod error;
pub mod graduation;
pub mod programs;
pub mod telemetry;
pub mod transcript;
