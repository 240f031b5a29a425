// Re-export glam for convenience
pub use glam::*;

// Darkmoon math types
mod interval;
mod ray;
pub mod vector;

pub use interval::Interval;
pub use ray::Ray;
pub use vector::{clamp01, hadamard, normalize, reflect, scale};
