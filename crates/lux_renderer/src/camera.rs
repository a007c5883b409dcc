//! Camera for ray generation.

use crate::sampling::sample_square;
use crate::{Ray, Vec3};
use rand::RngCore;

/// Pinhole camera looking down -Z.
///
/// Configure with the `with_*` builders, then call [`Camera::initialize`].
/// After that the camera is only read, and [`Camera::get_ray`] can be called
/// from any number of workers at once.
#[derive(Debug, Clone)]
pub struct Camera {
    // Image settings
    aspect_ratio: f64,
    image_height: u32,
    samples_per_pixel: u32,
    max_depth: u32,

    // Viewport geometry
    viewport_height: f64,
    focal_length: f64,
    center: Vec3,

    // Cached computed values (set by initialize())
    image_width: u32,
    pixel00_loc: Vec3,
    pixel_delta_u: Vec3,
    pixel_delta_v: Vec3,
    samples_scale: f64,
}

impl Camera {
    /// Create a 16:9, 1080-line camera with 10 samples and 10 bounces.
    pub fn new() -> Self {
        let mut camera = Self {
            aspect_ratio: 16.0 / 9.0,
            image_height: 1080,
            samples_per_pixel: 10,
            max_depth: 10,
            viewport_height: 2.0,
            focal_length: 1.0,
            center: Vec3::ZERO,
            image_width: 0,
            pixel00_loc: Vec3::ZERO,
            pixel_delta_u: Vec3::ZERO,
            pixel_delta_v: Vec3::ZERO,
            samples_scale: 0.1,
        };
        camera.initialize();
        camera
    }

    /// Set the width/height ratio of the output image.
    pub fn with_aspect_ratio(mut self, aspect_ratio: f64) -> Self {
        self.aspect_ratio = aspect_ratio;
        self
    }

    /// Set the output height in pixels; width follows from the aspect ratio.
    pub fn with_image_height(mut self, image_height: u32) -> Self {
        self.image_height = image_height;
        self
    }

    /// Set quality settings.
    pub fn with_quality(mut self, samples: u32, max_depth: u32) -> Self {
        self.samples_per_pixel = samples;
        self.max_depth = max_depth;
        self
    }

    /// Set viewport height and focal length.
    pub fn with_viewport(mut self, viewport_height: f64, focal_length: f64) -> Self {
        self.viewport_height = viewport_height;
        self.focal_length = focal_length;
        self
    }

    /// Set the eye position.
    pub fn with_center(mut self, center: Vec3) -> Self {
        self.center = center;
        self
    }

    /// Recompute derived state. Must be called after any builder.
    pub fn initialize(&mut self) {
        self.image_height = self.image_height.max(1);
        self.image_width = ((self.image_height as f64 * self.aspect_ratio).floor() as u32).max(1);
        self.samples_scale = 1.0 / self.samples_per_pixel as f64;

        // Viewport width follows the real pixel ratio, not the requested one
        let viewport_width =
            self.viewport_height * (self.image_width as f64 / self.image_height as f64);

        // u runs right along rows, v runs down columns
        let viewport_u = Vec3::new(viewport_width, 0.0, 0.0);
        let viewport_v = Vec3::new(0.0, -self.viewport_height, 0.0);

        self.pixel_delta_u = viewport_u / self.image_width as f64;
        self.pixel_delta_v = viewport_v / self.image_height as f64;

        let viewport_upper_left = self.center
            - Vec3::new(0.0, 0.0, self.focal_length)
            - viewport_u / 2.0
            - viewport_v / 2.0;

        self.pixel00_loc = viewport_upper_left + 0.5 * (self.pixel_delta_u + self.pixel_delta_v);
    }

    /// Generate a ray for pixel (i, j) jittered within the pixel for
    /// anti-aliasing.
    pub fn get_ray(&self, i: u32, j: u32, rng: &mut dyn RngCore) -> Ray {
        let offset = sample_square(rng);
        self.ray_through(i as f64 + offset.x, j as f64 + offset.y)
    }

    /// Ray from the camera center through fractional pixel coordinates.
    pub fn ray_through(&self, x: f64, y: f64) -> Ray {
        let pixel_sample = self.pixel00_loc + x * self.pixel_delta_u + y * self.pixel_delta_v;
        Ray::new(self.center, pixel_sample - self.center)
    }

    pub fn image_width(&self) -> u32 {
        self.image_width
    }

    pub fn image_height(&self) -> u32 {
        self.image_height
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.aspect_ratio
    }

    pub fn samples_per_pixel(&self) -> u32 {
        self.samples_per_pixel
    }

    /// Bounce limit handed to `ray_color` for each sample.
    pub fn max_depth(&self) -> u32 {
        self.max_depth
    }

    /// Get the samples scale factor (1 / samples_per_pixel).
    pub fn samples_scale(&self) -> f64 {
        self.samples_scale
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}
