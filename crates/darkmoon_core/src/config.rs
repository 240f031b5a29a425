//! JSON scene configuration.
//!
//! Every field has a default, so `{}` describes the reference scene: camera at
//! (0, 3, 7), unit sphere resting on the floor at the origin, light up and to
//! the left behind the camera.

use std::path::Path;
use std::sync::Arc;

use darkmoon_math::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::environment::EnvironmentMap;
use crate::scene::{Camera, Light, Plane, RenderMode, SceneError, SceneSnapshot, Sphere};

/// Errors that can occur while reading a scene configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid scene: {0}")]
    Scene(#[from] SceneError),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Scene parameters as written in a config file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SceneConfig {
    pub camera_position: [f32; 3],
    pub sphere_center: [f32; 3],
    pub sphere_radius: f32,
    pub sphere_reflectivity: f32,
    pub light_position: [f32; 3],
    pub light_intensity: f32,
    pub plane_y: f32,
    pub mode: RenderMode,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            camera_position: [0.0, 3.0, 7.0],
            sphere_center: [0.0, 1.0, 0.0],
            sphere_radius: 1.0,
            sphere_reflectivity: Sphere::DEFAULT_REFLECTIVITY,
            light_position: [-3.0, 5.0, 9.0],
            light_intensity: 1.0,
            plane_y: 0.0,
            mode: RenderMode::RayTraced,
        }
    }
}

impl SceneConfig {
    /// Parse and validate a JSON scene description.
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let config: SceneConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON scene file.
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::debug!("Loaded scene config from {}", path.display());
        Ok(config)
    }

    /// Check every construction contract without building a snapshot.
    pub fn validate(&self) -> Result<(), SceneError> {
        if !Vec3::from(self.camera_position).is_finite() {
            return Err(SceneError::NonFinite("camera position"));
        }
        if !self.plane_y.is_finite() {
            return Err(SceneError::NonFinite("plane height"));
        }
        self.sphere()?;
        self.light()?;
        Ok(())
    }

    fn sphere(&self) -> Result<Sphere, SceneError> {
        Sphere::new(Vec3::from(self.sphere_center), self.sphere_radius)?
            .with_reflectivity(self.sphere_reflectivity)
    }

    fn light(&self) -> Result<Light, SceneError> {
        Light::new(Vec3::from(self.light_position), self.light_intensity)
    }

    /// Build the snapshot for a frame, sharing `environment`.
    pub fn to_snapshot(
        &self,
        environment: Arc<EnvironmentMap>,
    ) -> Result<SceneSnapshot, SceneError> {
        self.validate()?;
        Ok(SceneSnapshot::new(
            Camera::new(Vec3::from(self.camera_position)),
            self.sphere()?,
            Plane::new(self.plane_y),
            self.light()?,
            environment,
            self.mode,
        ))
    }
}
