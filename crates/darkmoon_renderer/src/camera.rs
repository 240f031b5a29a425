//! Primary ray generation.

use darkmoon_core::Camera;
use darkmoon_math::{normalize, Ray, Vec3};

/// Ray from the camera through pixel (x, y) of a `width` x `height` image.
///
/// Pixels map to normalized device coordinates with row 0 at the top:
/// `px = 2x/width - 1`, `py = 1 - 2y/height`. The ray passes through
/// `(px * aspect, py, -1)` relative to the camera, which fixes the vertical
/// field of view at 90 degrees.
pub fn primary_ray(camera: &Camera, x: u32, y: u32, width: u32, height: u32) -> Ray {
    let aspect = width as f32 / height as f32;
    let px = (x as f32 / width as f32) * 2.0 - 1.0;
    let py = 1.0 - (y as f32 / height as f32) * 2.0;

    Ray::new(camera.position, normalize(Vec3::new(px * aspect, py, -1.0)))
}
