//! Equirectangular environment maps.
//!
//! The renderer only reads texels; everything about getting them off disk
//! lives here. When decoding fails the caller can fall back to a procedural
//! gradient so a frame can always be produced.

use std::fmt;
use std::path::Path;

use darkmoon_math::Vec3;
use thiserror::Error;

/// Errors that can occur while building or loading an environment map.
#[derive(Error, Debug)]
pub enum EnvironmentError {
    #[error("Environment map must be at least 1x1, got {width}x{height}")]
    Empty { width: u32, height: u32 },

    #[error("Expected {expected} texels, got {actual}")]
    TexelCount { expected: usize, actual: usize },

    #[error("Image decoding error: {0}")]
    Image(#[from] image::ImageError),
}

pub type EnvironmentResult<T> = Result<T, EnvironmentError>;

/// Width of the procedural fallback map.
pub const GRADIENT_WIDTH: u32 = 512;
/// Height of the procedural fallback map.
pub const GRADIENT_HEIGHT: u32 = 256;

/// An RGB float image indexed by (x, y), row-major, row 0 at the top.
///
/// Channels are expected in [0, 1]. The map is immutable once built and is
/// shared between snapshots through `Arc`.
#[derive(Clone)]
pub struct EnvironmentMap {
    width: u32,
    height: u32,
    texels: Vec<Vec3>,
    source: String,
}

impl EnvironmentMap {
    /// Create a map from row-major texels.
    pub fn new(
        width: u32,
        height: u32,
        texels: Vec<Vec3>,
        source: impl Into<String>,
    ) -> EnvironmentResult<Self> {
        if width == 0 || height == 0 {
            return Err(EnvironmentError::Empty { width, height });
        }

        let expected = width as usize * height as usize;
        if texels.len() != expected {
            return Err(EnvironmentError::TexelCount {
                expected,
                actual: texels.len(),
            });
        }

        Ok(Self {
            width,
            height,
            texels,
            source: source.into(),
        })
    }

    /// Create a map by evaluating `f(x, y)` for every texel.
    pub fn from_fn(
        width: u32,
        height: u32,
        source: impl Into<String>,
        mut f: impl FnMut(u32, u32) -> Vec3,
    ) -> EnvironmentResult<Self> {
        let mut texels = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                texels.push(f(x, y));
            }
        }
        Self::new(width, height, texels, source)
    }

    /// The 512x256 fallback gradient: texel (x, y) = (x/width, y/height, 0.5).
    pub fn gradient() -> Self {
        let (w, h) = (GRADIENT_WIDTH, GRADIENT_HEIGHT);
        let texels = (0..h)
            .flat_map(|y| {
                (0..w).map(move |x| Vec3::new(x as f32 / w as f32, y as f32 / h as f32, 0.5))
            })
            .collect();

        Self {
            width: w,
            height: h,
            texels,
            source: "<gradient>".to_string(),
        }
    }

    /// Decode an image file into an environment map.
    ///
    /// Channels are the 8-bit values divided by 255, with no colour-space
    /// conversion.
    pub fn load(path: impl AsRef<Path>) -> EnvironmentResult<Self> {
        let path = path.as_ref();
        let rgb = image::open(path)?.to_rgb8();
        let (width, height) = rgb.dimensions();

        let texels = rgb
            .pixels()
            .map(|p| {
                Vec3::new(
                    p[0] as f32 / 255.0,
                    p[1] as f32 / 255.0,
                    p[2] as f32 / 255.0,
                )
            })
            .collect();

        let map = Self::new(width, height, texels, path.to_string_lossy())?;

        log::debug!(
            "Loaded environment: {} ({}x{}, {:.1} KB)",
            map.source,
            map.width,
            map.height,
            map.size_bytes() as f32 / 1024.0
        );

        Ok(map)
    }

    /// Like [`EnvironmentMap::load`], but any failure yields [`EnvironmentMap::gradient`].
    pub fn load_or_fallback(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load(path) {
            Ok(map) => map,
            Err(e) => {
                log::warn!(
                    "Error loading environment {}: {}, using gradient fallback",
                    path.display(),
                    e
                );
                Self::gradient()
            }
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Where the texels came from (file path or `<gradient>`).
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Texel at (x, y). Coordinates wrap, so any input is in bounds.
    #[inline]
    pub fn texel(&self, x: u32, y: u32) -> Vec3 {
        let x = x % self.width;
        let y = y % self.height;
        self.texels[y as usize * self.width as usize + x as usize]
    }

    /// Approximate memory used by the texels.
    pub fn size_bytes(&self) -> usize {
        self.texels.len() * std::mem::size_of::<Vec3>()
    }
}

impl fmt::Debug for EnvironmentMap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvironmentMap")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("source", &self.source)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gradient_texels() {
        let map = EnvironmentMap::gradient();
        assert_eq!(map.width(), 512);
        assert_eq!(map.height(), 256);

        assert_eq!(map.texel(0, 0), Vec3::new(0.0, 0.0, 0.5));
        assert_eq!(map.texel(256, 128), Vec3::new(0.5, 0.5, 0.5));
        assert_eq!(map.texel(511, 255), Vec3::new(511.0 / 512.0, 255.0 / 256.0, 0.5));
    }

    #[test]
    fn test_texel_wraps() {
        let map = EnvironmentMap::from_fn(2, 3, "test", |x, y| Vec3::new(x as f32, y as f32, 0.0))
            .unwrap();

        assert_eq!(map.texel(2, 0), map.texel(0, 0));
        assert_eq!(map.texel(3, 4), map.texel(1, 1));
        assert_eq!(map.texel(u32::MAX, u32::MAX), map.texel(u32::MAX % 2, u32::MAX % 3));
    }

    #[test]
    fn test_rejects_empty_map() {
        let err = EnvironmentMap::new(0, 4, Vec::new(), "empty").unwrap_err();
        assert!(matches!(err, EnvironmentError::Empty { width: 0, height: 4 }));
    }

    #[test]
    fn test_rejects_wrong_texel_count() {
        let err = EnvironmentMap::new(2, 2, vec![Vec3::ZERO; 3], "short").unwrap_err();
        assert!(matches!(
            err,
            EnvironmentError::TexelCount {
                expected: 4,
                actual: 3
            }
        ));
    }

    #[test]
    fn test_missing_file_falls_back_to_gradient() {
        let _ = env_logger::builder().is_test(true).try_init();

        assert!(EnvironmentMap::load("does/not/exist.jpg").is_err());

        let map = EnvironmentMap::load_or_fallback("does/not/exist.jpg");
        assert_eq!(map.source(), "<gradient>");
        assert_eq!((map.width(), map.height()), (GRADIENT_WIDTH, GRADIENT_HEIGHT));
    }

    #[test]
    fn test_load_png_normalizes_channels() {
        let path = std::env::temp_dir().join("darkmoon_environment_load_test.png");
        image::RgbImage::from_fn(3, 2, |x, _| {
            if x == 0 {
                image::Rgb([255, 0, 51])
            } else {
                image::Rgb([0, 255, 0])
            }
        })
        .save(&path)
        .unwrap();

        let map = EnvironmentMap::load(&path).unwrap();
        assert_eq!((map.width(), map.height()), (3, 2));
        assert_eq!(map.texel(0, 1), Vec3::new(1.0, 0.0, 0.2));
        assert_eq!(map.texel(2, 0), Vec3::new(0.0, 1.0, 0.0));

        let _ = std::fs::remove_file(&path);
    }

    #[test]
    fn test_debug_omits_texels() {
        let map = EnvironmentMap::gradient();
        let debug = format!("{:?}", map);
        assert!(debug.contains("512"));
        assert!(debug.len() < 200);
    }
}
