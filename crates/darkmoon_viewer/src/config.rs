//! Driver settings: what to render, how big, and how many ticks.

use std::path::{Path, PathBuf};

use anyhow::{ensure, Context, Result};
use darkmoon_core::SceneConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ViewerConfig {
    pub scene: SceneConfig,
    pub width: u32,
    pub height: u32,
    /// Environment image; the gradient fallback is used when absent or unreadable
    pub environment: Option<PathBuf>,
    /// Number of redraw ticks to run
    pub frames: u32,
    /// Flip between flat and ray-traced mode every N ticks
    pub toggle_mode_every: Option<u32>,
    pub parallel: bool,
    /// Where the last frame is written as PNG
    pub output: PathBuf,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            scene: SceneConfig::default(),
            width: 320,
            height: 180,
            environment: None,
            frames: 3,
            toggle_mode_every: None,
            parallel: true,
            output: PathBuf::from("frame.png"),
        }
    }
}

impl ViewerConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: ViewerConfig = serde_json::from_str(json).context("Invalid viewer config")?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_json_str(&json).with_context(|| format!("Failed to load {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.width > 0 && self.height > 0,
            "Resolution must be non-zero, got {}x{}",
            self.width,
            self.height
        );
        ensure!(self.toggle_mode_every != Some(0), "toggle_mode_every must be at least 1");
        self.scene.validate()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use darkmoon_core::RenderMode;

    #[test]
    fn test_defaults() {
        let config = ViewerConfig::from_json_str("{}").unwrap();
        assert_eq!(config, ViewerConfig::default());
        assert_eq!((config.width, config.height), (320, 180));
    }

    #[test]
    fn test_nested_scene() {
        let config = ViewerConfig::from_json_str(
            r#"{ "width": 64, "scene": { "mode": "flat" }, "toggle_mode_every": 2 }"#,
        )
        .unwrap();
        assert_eq!(config.width, 64);
        assert_eq!(config.scene.mode, RenderMode::Flat);
        assert_eq!(config.toggle_mode_every, Some(2));
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(ViewerConfig::from_json_str(r#"{ "height": 0 }"#).is_err());
        assert!(ViewerConfig::from_json_str(r#"{ "toggle_mode_every": 0 }"#).is_err());
        assert!(ViewerConfig::from_json_str(r#"{ "scene": { "sphere_radius": -2 } }"#).is_err());
    }
}
