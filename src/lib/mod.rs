//! Shared library modules providing error types, player process helpers, and telemetry initialization.

pub mod errors;
pub mod paths;
pub mod player;
pub mod telemetry;
