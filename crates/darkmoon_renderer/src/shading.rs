//! Lighting, shadows and the per-surface colour for ray-traced frames.
//!
//! All functions return unclamped colours except the `shade_*` helpers,
//! which produce the final [0, 1] pixel colour.

use darkmoon_core::SceneSnapshot;
use darkmoon_math::{clamp01, hadamard, normalize, reflect, scale, Ray, Vec3};

use crate::environment::sample_environment;
use crate::intersect::solve_sphere;

/// How a shadow ray decides it is blocked by the sphere.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShadowTest {
    /// Any real root of the quadratic blocks the light, even one behind the
    /// surface point. Coarse, and what the reference images were made with.
    #[default]
    Discriminant,
    /// The near root must lie in front of the surface point.
    ForwardHit,
}

/// Constants of the shading model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadingSettings {
    /// Light that reaches every lit surface regardless of orientation
    pub ambient: f32,
    /// Multiplier applied to sphere and background colours
    pub exposure: f32,
    /// Shadow factor for occluded points (1.0 when unoccluded)
    pub shadow_attenuation: f32,
    pub shadow_test: ShadowTest,
    /// Phong exponent; `None` disables the specular term
    pub shininess: Option<i32>,
}

impl Default for ShadingSettings {
    fn default() -> Self {
        Self {
            ambient: 0.1,
            exposure: 1.2,
            shadow_attenuation: 0.3,
            shadow_test: ShadowTest::Discriminant,
            shininess: Some(32),
        }
    }
}

/// Shadow factor at `point`: `shadow_attenuation` if the sphere blocks the
/// light, 1.0 otherwise. Only the sphere casts shadows.
///
/// Floor seen along a parallel ray sits at infinity and is always lit.
pub fn shadow_factor(point: Vec3, scene: &SceneSnapshot, settings: &ShadingSettings) -> f32 {
    if !point.is_finite() {
        return 1.0;
    }

    let shadow_ray = Ray::towards(point, scene.light.position());

    let blocked = match (solve_sphere(&shadow_ray, &scene.sphere), settings.shadow_test) {
        (None, _) => false,
        (Some(_), ShadowTest::Discriminant) => true,
        (Some(t), ShadowTest::ForwardHit) => t > 0.0,
    };

    if blocked {
        settings.shadow_attenuation
    } else {
        1.0
    }
}

/// Ambient + diffuse (+ Phong specular) light arriving at `point`.
///
/// `view_dir` points from the surface towards the viewer. The result is gray
/// and may exceed 1.
pub fn lighting(
    point: Vec3,
    normal: Vec3,
    view_dir: Vec3,
    scene: &SceneSnapshot,
    settings: &ShadingSettings,
) -> Vec3 {
    let intensity = scene.light.intensity();
    let light_dir = normalize(scene.light.position() - point);

    let diffuse = intensity * normal.dot(light_dir).max(0.0);

    let specular = match settings.shininess {
        Some(shininess) => {
            let highlight = reflect(-light_dir, normal).dot(view_dir).max(0.0);
            intensity * highlight.powi(shininess)
        }
        None => 0.0,
    };

    Vec3::splat(settings.ambient + diffuse + specular)
}

/// Colour of the floor at `point`.
///
/// The shadow factor is added to the gray albedo, so lit floor saturates to
/// white and shadowed floor stays a light gray.
pub fn shade_plane(point: Vec3, scene: &SceneSnapshot, settings: &ShadingSettings) -> Vec3 {
    let shadow = shadow_factor(point, scene, settings);
    clamp01(scene.plane.albedo() + Vec3::splat(shadow))
}

/// Colour of the sphere where `ray` hits it at distance `t`.
pub fn shade_sphere(ray: &Ray, t: f32, scene: &SceneSnapshot, settings: &ShadingSettings) -> Vec3 {
    let sphere = &scene.sphere;
    let hit_point = ray.at(t);
    let normal = normalize(hit_point - sphere.center());

    let reflection_dir = normalize(reflect(ray.direction, normal));
    let reflection = sample_environment(&scene.environment, reflection_dir);

    let weight = sphere.reflectivity();
    let surface = scale(sphere.albedo(), 1.0 - weight) + scale(reflection, weight);

    let light = lighting(hit_point, normal, -ray.direction, scene, settings);
    clamp01(scale(hadamard(surface, light), settings.exposure))
}

/// Colour of the environment seen along an escaping `ray`.
pub fn shade_miss(ray: &Ray, scene: &SceneSnapshot, settings: &ShadingSettings) -> Vec3 {
    let background = sample_environment(&scene.environment, ray.direction);
    clamp01(scale(background, settings.exposure))
}
