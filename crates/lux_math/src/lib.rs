// Re-export glam for convenience
pub use glam::{dvec3, DVec3};

mod interval;
mod ray;
mod vector;

pub use interval::Interval;
pub use ray::Ray;
pub use vector::Vec3Ext;

/// Position, direction and normal type. All tracing math is done in f64.
pub type Vec3 = DVec3;

/// Linear RGB color, one channel per component.
pub type Color = DVec3;
