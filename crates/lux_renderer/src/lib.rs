//! Lux - parallel scanline path tracer
//!
//! A Monte Carlo path tracer for spheres under a sky gradient. Scanlines are
//! rendered concurrently and streamed to the output in top-to-bottom order.

mod camera;
mod error;
mod hittable;
mod output;
mod renderer;
pub mod sampling;
mod scene;
mod scheduler;
mod sphere;

pub use camera::Camera;
pub use error::{RenderError, SceneError};
pub use hittable::{HitRecord, Hittable, HittableList};
pub use output::{color_to_rgb, linear_to_gamma, PpmSink, ScanlineSink};
pub use renderer::{ray_color, render_pixel, render_scanline, sky_gradient, RenderedScanline};
pub use scene::{default_scene, SceneDescription, SceneResult, SphereDescription};
pub use scheduler::{render, OrderedWriter, RenderConfig, RenderSummary, DEFAULT_QUEUE_CAPACITY};
pub use sphere::Sphere;

/// Re-export Vec3 and common math types from lux_math
pub use lux_math::{Color, Interval, Ray, Vec3, Vec3Ext};
