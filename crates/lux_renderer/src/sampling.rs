//! Random sampling helpers.
//!
//! Every function takes its random source explicitly. Render workers hold
//! their own generator, so nothing here touches global or thread-local state.

use crate::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// Squared-length window accepted by [`random_unit_vector`]. Candidates
/// shorter than the lower bound would blow up floating-point noise when
/// normalized.
const UNIT_REJECT_MIN: f64 = 1e-160;

/// Uniform f64 in [0, 1).
#[inline]
pub fn gen_f64(rng: &mut dyn RngCore) -> f64 {
    rng.gen::<f64>()
}

/// Uniform f64 in [min, max).
#[inline]
pub fn gen_range(rng: &mut dyn RngCore, min: f64, max: f64) -> f64 {
    min + (max - min) * gen_f64(rng)
}

/// Random unit vector, by rejection sampling the [-1, 1) cube against the
/// unit ball.
pub fn random_unit_vector(rng: &mut dyn RngCore) -> Vec3 {
    loop {
        let p = Vec3::new(
            gen_range(rng, -1.0, 1.0),
            gen_range(rng, -1.0, 1.0),
            gen_range(rng, -1.0, 1.0),
        );
        let lensq = p.length_squared();
        if UNIT_REJECT_MIN < lensq && lensq <= 1.0 {
            return p / lensq.sqrt();
        }
    }
}

/// Sample a random point in the square [-0.5, 0.5) x [-0.5, 0.5) (z = 0).
pub fn sample_square(rng: &mut dyn RngCore) -> Vec3 {
    Vec3::new(gen_f64(rng) - 0.5, gen_f64(rng) - 0.5, 0.0)
}

/// Generator for one scanline, derived from the render seed and the row
/// index so output doesn't depend on which worker picked the row up.
pub fn scanline_rng(seed: u64, row: u32) -> StdRng {
    StdRng::seed_from_u64(splitmix64(seed ^ splitmix64(u64::from(row))))
}

/// SplitMix64 finalizer.
fn splitmix64(x: u64) -> u64 {
    let mut z = x.wrapping_add(0x9e37_79b9_7f4a_7c15);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}
