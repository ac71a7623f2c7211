//! Infrastructure adapters: HTTP surface, embedded assets, telemetry.

pub mod assets;
pub mod error;
pub mod http;
pub mod telemetry;
