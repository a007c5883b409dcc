//! Hittable trait and HitRecord for ray-object intersection.

use crate::{Interval, Ray, Vec3};

/// Record of a ray-object intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRecord {
    /// Point of intersection
    pub p: Vec3,
    /// Unit surface normal, always pointing against the incoming ray
    pub normal: Vec3,
    /// Parameter t where the intersection occurs
    pub t: f64,
    /// Whether the ray hit the front face (outside) of the surface
    pub front_face: bool,
}

impl HitRecord {
    /// Build a record from an outward-facing unit normal, flipping it so it
    /// opposes the ray.
    ///
    /// A ray grazing the surface (`dot == 0`) counts as a back-face hit.
    pub fn with_face_normal(ray: &Ray, t: f64, p: Vec3, outward_normal: Vec3) -> Self {
        let front_face = ray.direction().dot(outward_normal) < 0.0;
        let normal = if front_face {
            outward_normal
        } else {
            -outward_normal
        };

        Self {
            p,
            normal,
            t,
            front_face,
        }
    }
}

/// Trait for objects that can be hit by rays.
///
/// Implementations are read concurrently by every render worker, so they must
/// be immutable during a render.
pub trait Hittable: Send + Sync {
    /// Nearest intersection with `ray` whose parameter lies strictly inside
    /// `ray_t`, if any.
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord>;
}

/// A list of hittable objects, scanned linearly.
pub struct HittableList {
    objects: Vec<Box<dyn Hittable>>,
}

impl HittableList {
    /// Create a new empty hittable list.
    pub fn new() -> Self {
        Self {
            objects: Vec::new(),
        }
    }

    /// Add an object to the list.
    pub fn add(&mut self, object: Box<dyn Hittable>) {
        self.objects.push(object);
    }

    /// Clear all objects from the list.
    pub fn clear(&mut self) {
        self.objects.clear();
    }

    /// Get the number of objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Default for HittableList {
    fn default() -> Self {
        Self::new()
    }
}

impl Hittable for HittableList {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        let mut closest: Option<HitRecord> = None;

        // Each query only accepts hits nearer than the best so far
        for object in &self.objects {
            let max = closest.map_or(ray_t.max, |rec| rec.t);
            if let Some(rec) = object.hit(ray, ray_t.with_max(max)) {
                closest = Some(rec);
            }
        }

        closest
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Sphere;

    #[test]
    fn test_face_normal_front() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let rec = HitRecord::with_face_normal(&ray, 0.5, ray.at(0.5), Vec3::Z);

        assert!(rec.front_face);
        assert_eq!(rec.normal, Vec3::Z);
    }

    #[test]
    fn test_face_normal_back() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let rec = HitRecord::with_face_normal(&ray, 0.5, ray.at(0.5), -Vec3::Z);

        assert!(!rec.front_face);
        assert_eq!(rec.normal, Vec3::Z);
    }

    #[test]
    fn test_empty_list_misses() {
        let world = HittableList::new();
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        assert!(world.is_empty());
        assert!(world.hit(&ray, Interval::RAY_HIT).is_none());
    }

    #[test]
    fn test_list_returns_nearest_hit() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let near = Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5);
        let far = Sphere::new(Vec3::new(0.0, 0.0, -1.5), 0.75);

        let near_t = near.hit(&ray, Interval::RAY_HIT).map(|r| r.t);
        let far_t = far.hit(&ray, Interval::RAY_HIT).map(|r| r.t);
        assert_eq!(near_t, Some(0.5));
        assert_eq!(far_t, Some(0.75));

        // Farther sphere added first so the scan has to improve on it
        let mut world = HittableList::new();
        world.add(Box::new(far));
        world.add(Box::new(near));
        assert_eq!(world.len(), 2);

        let rec = world.hit(&ray, Interval::RAY_HIT).expect("ray should hit");
        assert_eq!(rec.t, 0.5);
        assert_eq!(rec.normal, Vec3::Z);
    }

    #[test]
    fn test_list_respects_interval() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let mut world = HittableList::new();
        world.add(Box::new(Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5)));

        assert!(world.hit(&ray, Interval::new(0.001, 0.4)).is_none());

        world.clear();
        assert!(world.is_empty());
    }
}
