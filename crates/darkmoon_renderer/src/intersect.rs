//! Analytic ray-sphere and ray-plane tests.
//!
//! Misses are reported as `f32::INFINITY` rather than `Option` so the ordering
//! rule can compare distances directly.

use darkmoon_core::{Plane, Sphere};
use darkmoon_math::{Interval, Ray};

/// Below this |D . N| a ray counts as parallel to the plane.
const PARALLEL_EPSILON: f32 = 1e-6;

/// Near root of the ray-sphere quadratic, or `None` when the discriminant is
/// negative or NaN.
///
/// The root may be zero or negative (sphere behind the origin); callers
/// decide whether that counts. `a` is computed from the direction rather than
/// assumed to be 1.
pub fn solve_sphere(ray: &Ray, sphere: &Sphere) -> Option<f32> {
    let oc = ray.origin - sphere.center();
    let a = ray.direction.dot(ray.direction);
    let b = 2.0 * oc.dot(ray.direction);
    let c = oc.dot(oc) - sphere.radius() * sphere.radius();

    let discriminant = b * b - 4.0 * a * c;
    if discriminant.is_nan() || discriminant < 0.0 {
        return None;
    }

    Some((-b - discriminant.sqrt()) / (2.0 * a))
}

/// Distance along `ray` to the sphere's near surface, or infinity.
///
/// Only the near root is considered: the camera never starts inside the
/// sphere.
pub fn hit_sphere(ray: &Ray, sphere: &Sphere) -> f32 {
    match solve_sphere(ray, sphere) {
        Some(t) if Interval::POSITIVE.surrounds(t) => t,
        _ => f32::INFINITY,
    }
}

/// Signed distance along `ray` to the ground plane.
///
/// Infinity when the ray runs parallel to the plane. A plane behind the
/// origin gives zero or a negative distance; [`closest_hit`] rejects those.
pub fn hit_plane(ray: &Ray, plane: &Plane) -> f32 {
    let d = -plane.y;
    let denom = ray.direction.dot(Plane::NORMAL);
    if denom.abs() <= PARALLEL_EPSILON {
        return f32::INFINITY;
    }

    -(ray.origin.dot(Plane::NORMAL) + d) / denom
}

/// Which surface a primary ray sees first.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SurfaceHit {
    Plane(f32),
    Sphere(f32),
    Miss,
}

/// Pick the visible surface from the two hit distances.
///
/// The plane is checked first and wins only when strictly closer (or when the
/// sphere was missed), so equal distances go to the sphere. Silhouette pixels
/// depend on this exact order.
///
/// A parallel ray reports the plane at infinity, and that still beats a missed
/// sphere: the horizon row of even-height frames shows floor, not sky.
pub fn closest_hit(t_plane: f32, t_sphere: f32) -> SurfaceHit {
    if t_plane > 0.0 && (t_plane < t_sphere || t_sphere == f32::INFINITY) {
        SurfaceHit::Plane(t_plane)
    } else if t_sphere < f32::INFINITY {
        SurfaceHit::Sphere(t_sphere)
    } else {
        SurfaceHit::Miss
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use darkmoon_math::{normalize, Vec3};

    fn reference_sphere() -> Sphere {
        Sphere::new(Vec3::new(0.0, 1.0, 0.0), 1.0).unwrap()
    }

    const CAMERA: Vec3 = Vec3::new(0.0, 3.0, 7.0);

    #[test]
    fn test_sphere_hit_towards_center() {
        let sphere = reference_sphere();
        let ray = Ray::towards(CAMERA, sphere.center());

        let t = hit_sphere(&ray, &sphere);
        let expected = (53.0_f32).sqrt() - 1.0;
        assert!((t - expected).abs() < 1e-4, "t = {}", t);
        assert!(((ray.at(t) - sphere.center()).length() - 1.0).abs() < 1e-4);
    }

    #[test]
    fn test_horizontal_center_ray_passes_above_sphere() {
        // Looking straight down -Z from y = 3 clears the sphere top at y = 2
        let ray = Ray::new(CAMERA, Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(hit_sphere(&ray, &reference_sphere()), f32::INFINITY);
    }

    #[test]
    fn test_top_left_corner_misses_everything() {
        let ray = Ray::new(CAMERA, normalize(Vec3::new(-1.0, 1.0, -1.0)));
        let t_sphere = hit_sphere(&ray, &reference_sphere());
        let t_plane = hit_plane(&ray, &Plane::new(0.0));

        assert_eq!(t_sphere, f32::INFINITY);
        assert!(t_plane < 0.0);
        assert_eq!(closest_hit(t_plane, t_sphere), SurfaceHit::Miss);
    }

    #[test]
    fn test_sphere_behind_ray_is_a_miss() {
        let ray = Ray::new(CAMERA, Vec3::new(0.0, 0.0, 1.0));
        let sphere = Sphere::new(Vec3::new(0.0, 3.0, 0.0), 1.0).unwrap();

        // The line intersects, but only behind the origin
        assert!(solve_sphere(&ray, &sphere).is_some_and(|t| t < 0.0));
        assert_eq!(hit_sphere(&ray, &sphere), f32::INFINITY);
    }

    #[test]
    fn test_plane_hit_straight_down() {
        let ray = Ray::new(CAMERA, -Vec3::Y);
        assert!((hit_plane(&ray, &Plane::new(0.0)) - 3.0).abs() < 1e-6);
        assert!((hit_plane(&ray, &Plane::new(-2.0)) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn test_plane_parallel_and_behind() {
        let plane = Plane::new(0.0);

        let parallel = Ray::new(CAMERA, Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(hit_plane(&parallel, &plane), f32::INFINITY);

        let nearly_parallel = Ray::new(CAMERA, normalize(Vec3::new(0.0, -1e-7, -1.0)));
        assert_eq!(hit_plane(&nearly_parallel, &plane), f32::INFINITY);

        // Behind the origin: negative distance, never picked
        let upwards = Ray::new(CAMERA, Vec3::Y);
        let t_plane = hit_plane(&upwards, &plane);
        assert!((t_plane + 3.0).abs() < 1e-6);
        assert_eq!(closest_hit(t_plane, f32::INFINITY), SurfaceHit::Miss);
        assert_eq!(closest_hit(t_plane, 2.0), SurfaceHit::Sphere(2.0));
    }

    #[test]
    fn test_ordering_prefers_strictly_closer_plane() {
        assert_eq!(closest_hit(2.0, 5.0), SurfaceHit::Plane(2.0));
        assert_eq!(closest_hit(5.0, 2.0), SurfaceHit::Sphere(2.0));
    }

    #[test]
    fn test_ordering_with_single_hit() {
        assert_eq!(closest_hit(4.0, f32::INFINITY), SurfaceHit::Plane(4.0));
        assert_eq!(closest_hit(f32::INFINITY, 3.0), SurfaceHit::Sphere(3.0));
        assert_eq!(closest_hit(-1.0, f32::INFINITY), SurfaceHit::Miss);
    }

    #[test]
    fn test_parallel_plane_beats_missed_sphere() {
        assert_eq!(
            closest_hit(f32::INFINITY, f32::INFINITY),
            SurfaceHit::Plane(f32::INFINITY)
        );
    }

    #[test]
    fn test_nan_discriminant_is_no_root() {
        let ray = Ray::new(Vec3::splat(f32::NAN), Vec3::ZERO);
        assert_eq!(solve_sphere(&ray, &reference_sphere()), None);
    }

    #[test]
    fn test_ordering_tie_goes_to_sphere() {
        assert_eq!(closest_hit(3.0, 3.0), SurfaceHit::Sphere(3.0));
    }
}
