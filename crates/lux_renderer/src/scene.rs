//! Scene descriptions and loading.
//!
//! A scene file is JSON listing spheres in the order they are scanned:
//!
//! ```json
//! { "spheres": [ { "center": [0.0, 0.0, -1.0], "radius": 0.5 } ] }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{HittableList, SceneError, Sphere, Vec3};

/// Result type for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;

/// One sphere as written in a scene file.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SphereDescription {
    pub center: Vec3,
    pub radius: f64,
}

/// Everything needed to build the world for a render.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    #[serde(default)]
    pub spheres: Vec<SphereDescription>,
}

impl SceneDescription {
    /// Parse a scene from JSON text.
    pub fn from_json(text: &str) -> SceneResult<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Read and parse a scene file.
    pub fn load(path: impl AsRef<Path>) -> SceneResult<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let scene = Self::from_json(&text)?;
        log::info!("Loaded {} spheres from {}", scene.spheres.len(), path.display());
        Ok(scene)
    }

    /// Validate and turn the description into a hittable list.
    pub fn build(&self) -> SceneResult<HittableList> {
        let mut world = HittableList::new();

        for (index, sphere) in self.spheres.iter().enumerate() {
            if !sphere.center.is_finite() {
                return Err(SceneError::InvalidSphere {
                    index,
                    reason: "center is not finite",
                });
            }
            if !sphere.radius.is_finite() || sphere.radius <= 0.0 {
                return Err(SceneError::InvalidSphere {
                    index,
                    reason: "radius must be finite and positive",
                });
            }
            world.add(Box::new(Sphere::new(sphere.center, sphere.radius)));
        }

        Ok(world)
    }
}

/// The built-in scene: a small sphere resting on a large ground sphere.
pub fn default_scene() -> SceneDescription {
    SceneDescription {
        spheres: vec![
            SphereDescription {
                center: Vec3::new(0.0, 0.0, -1.0),
                radius: 0.5,
            },
            SphereDescription {
                center: Vec3::new(0.0, -100.5, -1.0),
                radius: 100.0,
            },
        ],
    }
}
