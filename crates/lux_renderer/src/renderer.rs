//! Core path tracing evaluator.
//!
//! Implements Monte Carlo path tracing with:
//! - Depth-bounded recursive diffuse bounces (albedo 0.5)
//! - Vertical sky gradient for rays that escape the scene
//! - Anti-aliasing via jittered multi-sampling

use crate::sampling::{random_unit_vector, scanline_rng};
use crate::{Camera, Color, Hittable, Interval, Ray, Vec3Ext};
use rand::RngCore;

/// Fraction of light kept on every bounce.
const BOUNCE_ATTENUATION: f64 = 0.5;

/// Compute the color seen by a ray.
///
/// Each hit scatters along `normal + random_unit_vector()` and recurses with
/// one fewer bounce. At `depth == 0` the path contributes nothing.
pub fn ray_color(ray: &Ray, world: &dyn Hittable, depth: u32, rng: &mut dyn RngCore) -> Color {
    if depth == 0 {
        return Color::ZERO;
    }

    let Some(rec) = world.hit(ray, Interval::RAY_HIT) else {
        return sky_gradient(ray);
    };

    let mut direction = rec.normal + random_unit_vector(rng);

    // The unit vector landed almost exactly opposite the normal
    if direction.is_near_zero() {
        direction = rec.normal;
    }

    let scattered = Ray::new(rec.p, direction);
    BOUNCE_ATTENUATION * ray_color(&scattered, world, depth - 1, rng)
}

/// Blend white to sky blue by the height of the unit ray direction.
pub fn sky_gradient(ray: &Ray) -> Color {
    let mut unit_direction = ray.direction();
    if !unit_direction.normalize_in_place() {
        log::trace!("sky lookup with zero-length direction");
    }

    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    white * (1.0 - a) + blue * a
}

/// Render a single pixel with multi-sampling.
pub fn render_pixel(
    camera: &Camera,
    world: &dyn Hittable,
    x: u32,
    y: u32,
    rng: &mut dyn RngCore,
) -> Color {
    let mut pixel_color = Color::ZERO;

    for _ in 0..camera.samples_per_pixel() {
        // Camera.get_ray already adds random offset for anti-aliasing
        let ray = camera.get_ray(x, y, rng);
        pixel_color += ray_color(&ray, world, camera.max_depth(), rng);
    }

    pixel_color * camera.samples_scale()
}

/// One finished row of linear colors, tagged with its row index.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedScanline {
    pub index: u32,
    pub pixels: Vec<Color>,
}

/// Render row `y`, left to right, using the row's own random stream.
pub fn render_scanline(camera: &Camera, world: &dyn Hittable, y: u32, seed: u64) -> RenderedScanline {
    let mut rng = scanline_rng(seed, y);

    let pixels: Vec<Color> = (0..camera.image_width())
        .map(|x| render_pixel(camera, world, x, y, &mut rng))
        .collect();

    let non_finite = pixels.iter().filter(|c| !c.is_finite()).count();
    if non_finite > 0 {
        log::warn!("scanline {y}: {non_finite} pixels are not finite");
    }

    RenderedScanline { index: y, pixels }
}
