//! Equirectangular environment lookups.

use std::f32::consts::{PI, TAU};

use darkmoon_core::EnvironmentMap;
use darkmoon_math::Vec3;

/// Texel coordinates hit by a unit `direction`.
///
/// theta is the polar angle from +Y, phi the azimuth from +X towards +Z,
/// remapped to [0, 2pi). Indices wrap, so the result is always in bounds,
/// including the u = 1 / v = 1 edge cases.
pub fn texel_coords(map: &EnvironmentMap, direction: Vec3) -> (u32, u32) {
    // acos is NaN just outside [-1, 1]
    let theta = direction.y.clamp(-1.0, 1.0).acos();
    let mut phi = direction.z.atan2(direction.x);
    if phi < 0.0 {
        phi += TAU;
    }

    let u = phi / TAU;
    let v = theta / PI;

    let x = (u * map.width() as f32).floor() as u32 % map.width();
    let y = (v * map.height() as f32).floor() as u32 % map.height();
    (x, y)
}

/// Nearest texel in `direction`, unfiltered and without exposure.
#[inline]
pub fn sample_environment(map: &EnvironmentMap, direction: Vec3) -> Vec3 {
    let (x, y) = texel_coords(map, direction);
    map.texel(x, y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use darkmoon_math::normalize;

    /// Roughly uniform unit directions (Fibonacci sphere) plus the axes.
    fn directions() -> Vec<Vec3> {
        let n = 500;
        let golden = PI * (3.0 - 5.0_f32.sqrt());
        let mut dirs: Vec<Vec3> = (0..n)
            .map(|i| {
                let y = 1.0 - 2.0 * (i as f32 + 0.5) / n as f32;
                let r = (1.0 - y * y).sqrt();
                let a = golden * i as f32;
                normalize(Vec3::new(r * a.cos(), y, r * a.sin()))
            })
            .collect();
        dirs.extend([Vec3::X, -Vec3::X, Vec3::Y, -Vec3::Y, Vec3::Z, -Vec3::Z]);
        dirs
    }

    #[test]
    fn test_coords_always_in_range() {
        for (w, h) in [(1, 1), (3, 7), (512, 256), (1, 1000)] {
            let map = EnvironmentMap::from_fn(w, h, "test", |_, _| Vec3::ZERO).unwrap();
            for d in directions() {
                let (x, y) = texel_coords(&map, d);
                assert!(x < w && y < h, "{:?} -> ({}, {}) on {}x{}", d, x, y, w, h);
            }
        }
    }

    #[test]
    fn test_plus_x_hits_left_edge_middle_row() {
        let map = EnvironmentMap::gradient();
        assert_eq!(texel_coords(&map, Vec3::X), (0, 128));
        assert_eq!(sample_environment(&map, Vec3::X), Vec3::new(0.0, 0.5, 0.5));
    }

    #[test]
    fn test_azimuth_quarters() {
        let map = EnvironmentMap::gradient();
        assert_eq!(texel_coords(&map, Vec3::Z).0, 128);
        assert_eq!(texel_coords(&map, -Vec3::X).0, 256);
    }

    #[test]
    fn test_poles() {
        let map = EnvironmentMap::gradient();
        assert_eq!(texel_coords(&map, Vec3::Y).1, 0);
        // v == 1 wraps instead of reading past the last row
        assert!(texel_coords(&map, -Vec3::Y).1 < map.height());
        // Slightly over-long vectors must not turn into NaN indices
        assert_eq!(texel_coords(&map, Vec3::new(0.0, 1.000_001, 0.0)).1, 0);
    }
}
