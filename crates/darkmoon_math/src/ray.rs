use crate::Vec3;

/// A ray in 3D space with an origin and a direction.
///
/// Primary and shadow rays are built with a unit-length `direction`; the
/// intersection tests rely on that.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub direction: Vec3,
}

impl Ray {
    /// Create a new ray.
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self { origin, direction }
    }

    /// Create a ray from `origin` heading towards `target`.
    ///
    /// The direction is normalized; if `target == origin` it is the zero vector.
    pub fn towards(origin: Vec3, target: Vec3) -> Self {
        Self::new(origin, crate::normalize(target - origin))
    }

    /// Get the point along the ray at parameter t.
    ///
    /// Returns: origin + t * direction
    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}
