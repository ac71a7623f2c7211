//! Domain layer types and invariants.

pub mod dates;
pub mod error;
pub mod posts;
pub mod projects;
