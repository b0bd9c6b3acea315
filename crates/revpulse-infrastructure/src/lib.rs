// Infrastructure layer - Technical implementations
// Depends on domain layer, implements its interfaces

pub mod analytics;
pub mod logging;
pub mod persistence;
pub mod render;
pub mod submission;
