//! Repository layer: entity-scoped database operations.

mod diagnosis;

pub use diagnosis::*;
