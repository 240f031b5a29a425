//! Darkmoon Core - scene description for the Darkmoon ray caster.
//!
//! This crate provides:
//!
//! - **Scene snapshot types**: `Camera`, `Sphere`, `Plane`, `Light`, `SceneSnapshot`
//! - **Environment maps**: equirectangular texel storage, image loading and
//!   the procedural gradient fallback
//! - **Configuration**: JSON scene descriptions that validate into snapshots
//!
//! # Example
//!
//! ```ignore
//! use darkmoon_core::{EnvironmentMap, SceneConfig};
//! use std::sync::Arc;
//!
//! let config = SceneConfig::load("scene.json")?;
//! let environment = Arc::new(EnvironmentMap::load_or_fallback("meadow.jpg"));
//! let snapshot = config.to_snapshot(environment)?;
//! ```

pub mod config;
pub mod environment;
pub mod scene;

// Re-export commonly used types
pub use config::{ConfigError, ConfigResult, SceneConfig};
pub use environment::{EnvironmentError, EnvironmentMap, EnvironmentResult};
pub use scene::{Camera, Light, Plane, RenderMode, SceneError, SceneResult, SceneSnapshot, Sphere};
