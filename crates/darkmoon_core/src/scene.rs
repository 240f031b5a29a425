//! Scene snapshot types for Darkmoon.
//!
//! A scene is always one sphere, one ground plane, one point light and an
//! environment map, seen from a camera looking down -Z. A `SceneSnapshot`
//! bundles all of it for a single frame and is never mutated while a frame is
//! being rendered.

use std::sync::Arc;

use darkmoon_math::{Interval, Vec3};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::environment::EnvironmentMap;

/// Errors raised when scene parameters violate their construction contract.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("Sphere radius must be positive, got {0}")]
    InvalidRadius(f32),

    #[error("Light intensity must be finite and non-negative, got {0}")]
    InvalidIntensity(f32),

    #[error("Sphere reflectivity must be within [0, 1], got {0}")]
    InvalidReflectivity(f32),

    #[error("Non-finite value in {0}")]
    NonFinite(&'static str),
}

pub type SceneResult<T> = Result<T, SceneError>;

fn ensure_finite(v: Vec3, what: &'static str) -> SceneResult<Vec3> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(SceneError::NonFinite(what))
    }
}

/// Pinhole camera.
///
/// Orientation is implicit: the camera always looks down -Z with +Y up, and
/// the field of view comes from the NDC mapping used for primary rays. There
/// is no look-at target or rotation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub position: Vec3,
}

impl Camera {
    pub fn new(position: Vec3) -> Self {
        Self { position }
    }
}

/// The single sphere in the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
    albedo: Vec3,
    reflectivity: f32,
}

impl Sphere {
    /// Metallic red, the only sphere finish.
    pub const ALBEDO: Vec3 = Vec3::new(1.0, 0.0, 0.0);

    /// Default weight of the environment reflection in the surface colour.
    pub const DEFAULT_REFLECTIVITY: f32 = 0.5;

    /// Create a sphere. The radius must be strictly positive.
    pub fn new(center: Vec3, radius: f32) -> SceneResult<Self> {
        let center = ensure_finite(center, "sphere center")?;
        // Also rejects NaN
        if !(radius > 0.0 && radius.is_finite()) {
            return Err(SceneError::InvalidRadius(radius));
        }

        Ok(Self {
            center,
            radius,
            albedo: Self::ALBEDO,
            reflectivity: Self::DEFAULT_REFLECTIVITY,
        })
    }

    /// Set how much of the environment reflection is mixed into the albedo.
    pub fn with_reflectivity(mut self, reflectivity: f32) -> SceneResult<Self> {
        if !Interval::UNIT.contains(reflectivity) {
            return Err(SceneError::InvalidReflectivity(reflectivity));
        }
        self.reflectivity = reflectivity;
        Ok(self)
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn albedo(&self) -> Vec3 {
        self.albedo
    }

    pub fn reflectivity(&self) -> f32 {
        self.reflectivity
    }
}

/// Infinite horizontal ground plane at height `y`, facing +Y.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Plane {
    pub y: f32,
}

impl Plane {
    pub const NORMAL: Vec3 = Vec3::Y;

    /// Flat gray floor.
    pub const ALBEDO: Vec3 = Vec3::new(0.5, 0.5, 0.5);

    pub fn new(y: f32) -> Self {
        Self { y }
    }

    pub fn albedo(&self) -> Vec3 {
        Self::ALBEDO
    }
}

/// Single point light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    position: Vec3,
    intensity: f32,
}

impl Light {
    pub fn new(position: Vec3, intensity: f32) -> SceneResult<Self> {
        let position = ensure_finite(position, "light position")?;
        if !(intensity >= 0.0 && intensity.is_finite()) {
            return Err(SceneError::InvalidIntensity(intensity));
        }
        Ok(Self {
            position,
            intensity,
        })
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn intensity(&self) -> f32 {
        self.intensity
    }
}

/// How primary rays are turned into colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// Solid per-primitive colours, no lighting or shadows.
    Flat,
    /// Full single-bounce shading.
    #[default]
    RayTraced,
}

impl RenderMode {
    /// The other mode, for an on/off preview toggle.
    pub fn toggled(self) -> Self {
        match self {
            RenderMode::Flat => RenderMode::RayTraced,
            RenderMode::RayTraced => RenderMode::Flat,
        }
    }
}

/// Everything needed to render one frame.
///
/// Deliberately not `PartialEq`: scalar fields compare by value but the
/// environment map compares by identity, see [`SceneSnapshot::same_scene`].
#[derive(Debug, Clone)]
pub struct SceneSnapshot {
    pub camera: Camera,
    pub sphere: Sphere,
    pub plane: Plane,
    pub light: Light,
    pub environment: Arc<EnvironmentMap>,
    pub mode: RenderMode,
}

impl SceneSnapshot {
    pub fn new(
        camera: Camera,
        sphere: Sphere,
        plane: Plane,
        light: Light,
        environment: Arc<EnvironmentMap>,
        mode: RenderMode,
    ) -> Self {
        Self {
            camera,
            sphere,
            plane,
            light,
            environment,
            mode,
        }
    }

    /// Same snapshot rendered in a different mode.
    pub fn with_mode(mut self, mode: RenderMode) -> Self {
        self.mode = mode;
        self
    }

    /// Whether two snapshots would render the same frame.
    ///
    /// Scalar fields compare by value (NaN never equals itself, so a NaN
    /// field always counts as changed). The environment map compares by
    /// `Arc` identity: a different map with identical texels is still a
    /// different scene.
    pub fn same_scene(&self, other: &SceneSnapshot) -> bool {
        self.camera == other.camera
            && self.sphere == other.sphere
            && self.plane == other.plane
            && self.light == other.light
            && self.mode == other.mode
            && Arc::ptr_eq(&self.environment, &other.environment)
    }
}
