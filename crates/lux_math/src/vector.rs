//! Vector helpers glam doesn't provide directly.

use crate::{Interval, Vec3};

/// Squared lengths below this are treated as zero.
const NEAR_ZERO_SQUARED: f64 = 1e-16;

/// Extra operations on [`Vec3`] used by the tracer.
pub trait Vec3Ext {
    /// Saturate every component to `range`.
    fn clamp_components(self, range: Interval) -> Self;

    /// Normalize in place. A zero-length (or non-finite) vector is left
    /// untouched and `false` is returned instead of filling it with NaN.
    fn normalize_in_place(&mut self) -> bool;

    /// True when every component is close enough to zero that normalizing
    /// would amplify noise.
    fn is_near_zero(&self) -> bool;
}

impl Vec3Ext for Vec3 {
    fn clamp_components(self, range: Interval) -> Self {
        Vec3::new(range.clamp(self.x), range.clamp(self.y), range.clamp(self.z))
    }

    fn normalize_in_place(&mut self) -> bool {
        match self.try_normalize() {
            Some(unit) => {
                *self = unit;
                true
            }
            None => false,
        }
    }

    fn is_near_zero(&self) -> bool {
        self.length_squared() < NEAR_ZERO_SQUARED
    }
}
