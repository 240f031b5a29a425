//! Free-standing vector helpers.
//!
//! Scalar and component-wise products are two separately named operations so
//! call sites always say which one they mean.

use crate::{Interval, Vec3};

/// Multiply every component of `v` by `s`.
#[inline]
pub fn scale(v: Vec3, s: f32) -> Vec3 {
    v * s
}

/// Component-wise (Hadamard) product.
#[inline]
pub fn hadamard(a: Vec3, b: Vec3) -> Vec3 {
    a * b
}

/// Unit vector in the direction of `v`, or the zero vector when `|v| == 0`.
///
/// Callers must not assume a unit-length result for degenerate input.
#[inline]
pub fn normalize(v: Vec3) -> Vec3 {
    v.normalize_or_zero()
}

/// Mirror `v` about the unit normal `n`: `v - 2 (v . n) n`.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - scale(n, 2.0 * v.dot(n))
}

/// Clamp every component to [0, 1].
#[inline]
pub fn clamp01(v: Vec3) -> Vec3 {
    Vec3::new(
        Interval::UNIT.clamp(v.x),
        Interval::UNIT.clamp(v.y),
        Interval::UNIT.clamp(v.z),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scale_and_hadamard_differ() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(scale(v, 2.0), Vec3::new(2.0, 4.0, 6.0));
        assert_eq!(hadamard(v, Vec3::new(0.0, 1.0, 2.0)), Vec3::new(0.0, 2.0, 6.0));
    }

    #[test]
    fn test_normalize() {
        let n = normalize(Vec3::new(3.0, 0.0, 4.0));
        assert!((n.length() - 1.0).abs() < 1e-6);
        assert!((n.x - 0.6).abs() < 1e-6);

        assert_eq!(normalize(Vec3::ZERO), Vec3::ZERO);
    }

    #[test]
    fn test_reflect() {
        // Straight down onto a floor bounces straight up
        assert_eq!(reflect(-Vec3::Y, Vec3::Y), Vec3::Y);

        // Grazing component is preserved
        let r = reflect(Vec3::new(1.0, -1.0, 0.0), Vec3::Y);
        assert_eq!(r, Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_clamp01() {
        let c = clamp01(Vec3::new(-0.5, 0.5, 2.0));
        assert_eq!(c, Vec3::new(0.0, 0.5, 1.0));
    }
}
