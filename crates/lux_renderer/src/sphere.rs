//! Sphere primitive for ray tracing.

use crate::{
    hittable::{HitRecord, Hittable},
    Interval, Ray, Vec3,
};

/// A sphere primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    center: Vec3,
    radius: f64,
}

impl Sphere {
    /// Create a new sphere. Negative radii are clamped to zero, and a
    /// zero-radius sphere is never hit.
    pub fn new(center: Vec3, radius: f64) -> Self {
        Self {
            center,
            radius: radius.max(0.0),
        }
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }
}

impl Hittable for Sphere {
    fn hit(&self, ray: &Ray, ray_t: Interval) -> Option<HitRecord> {
        // No surface, and the normal would divide by zero
        if self.radius <= 0.0 {
            return None;
        }

        // a t^2 - 2h t + c = 0 with h = d . (center - origin)
        let oc = self.center - ray.origin();
        let a = ray.direction().length_squared();
        let h = ray.direction().dot(oc);
        let c = oc.length_squared() - self.radius * self.radius;

        let discriminant = h * h - a * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrtd = discriminant.sqrt();

        // Find the nearest root in the acceptable range
        let mut root = (h - sqrtd) / a;
        if !ray_t.surrounds(root) {
            root = (h + sqrtd) / a;
            if !ray_t.surrounds(root) {
                return None;
            }
        }

        let p = ray.at(root);
        let outward_normal = (p - self.center) / self.radius;
        Some(HitRecord::with_face_normal(ray, root, p, outward_normal))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_test_sphere() -> Sphere {
        Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.5)
    }

    #[test]
    fn test_sphere_hit() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let rec = unit_test_sphere()
            .hit(&ray, Interval::RAY_HIT)
            .expect("ray should hit sphere");

        assert!((rec.t - 0.5).abs() < 1e-12);
        assert!((rec.p - Vec3::new(0.0, 0.0, -0.5)).length() < 1e-12);
        assert!((rec.normal - Vec3::new(0.0, 0.0, 1.0)).length() < 1e-12);
        assert!(rec.front_face);
    }

    #[test]
    fn test_sphere_miss() {
        // Ray pointing away from sphere
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 1.0, 0.0));

        assert!(unit_test_sphere().hit(&ray, Interval::RAY_HIT).is_none());
    }

    #[test]
    fn test_sphere_falls_back_to_far_root() {
        // Near root at t=0.5 is excluded, far root at t=1.5 is accepted
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        let rec = unit_test_sphere()
            .hit(&ray, Interval::new(0.6, f64::INFINITY))
            .expect("far side should be hit");

        assert!((rec.t - 1.5).abs() < 1e-12);
        assert!(!rec.front_face);
        // Outward normal is -Z at the far side; flipped to face the ray
        assert!((rec.normal - Vec3::Z).length() < 1e-12);
    }

    #[test]
    fn test_sphere_hit_from_inside() {
        let sphere = Sphere::new(Vec3::ZERO, 2.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::X);

        let rec = sphere.hit(&ray, Interval::RAY_HIT).expect("inside ray hits");

        assert!((rec.t - 2.0).abs() < 1e-12);
        assert!(!rec.front_face);
        assert!((rec.normal + Vec3::X).length() < 1e-12);
    }

    #[test]
    fn test_sphere_both_roots_outside_interval() {
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        assert!(unit_test_sphere()
            .hit(&ray, Interval::new(0.001, 0.25))
            .is_none());
    }

    #[test]
    fn test_negative_radius_clamped() {
        let sphere = Sphere::new(Vec3::ZERO, -3.0);
        assert_eq!(sphere.radius(), 0.0);
        assert_eq!(sphere.center(), Vec3::ZERO);
    }

    #[test]
    fn test_zero_radius_never_hit() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -1.0), 0.0);
        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));

        assert!(sphere.hit(&ray, Interval::RAY_HIT).is_none());
        assert!(Sphere::new(Vec3::ZERO, -3.0)
            .hit(&Ray::new(Vec3::new(0.0, 0.0, 1.0), -Vec3::Z), Interval::RAY_HIT)
            .is_none());
    }
}
