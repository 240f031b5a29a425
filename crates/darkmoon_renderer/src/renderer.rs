//! Frame rendering and the scene-change cache.
//!
//! [`render_frame`] always does the full per-pixel work. [`FrameRenderer`]
//! wraps it with a one-frame cache so an idle scene costs nothing per tick.

use darkmoon_core::{RenderMode, SceneSnapshot};
use darkmoon_math::Vec3;
use rayon::prelude::*;

use crate::bucket::{generate_buckets, render_bucket, DEFAULT_BUCKET_SIZE};
use crate::camera::primary_ray;
use crate::environment::sample_environment;
use crate::frame::{quantize, Frame, FrameBuffer, Rgb8};
use crate::intersect::{closest_hit, hit_plane, hit_sphere, SurfaceHit};
use crate::shading::{shade_miss, shade_plane, shade_sphere, ShadingSettings};

/// What flat mode shows where a ray escapes the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FlatBackground {
    #[default]
    Black,
    /// The environment texel in the ray direction, without exposure.
    Environment,
}

/// Render configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSettings {
    /// Render buckets on the rayon pool instead of the calling thread
    pub parallel: bool,
    /// Bucket edge length in pixels when rendering in parallel
    pub bucket_size: u32,
    pub flat_background: FlatBackground,
    pub shading: ShadingSettings,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            parallel: true,
            bucket_size: DEFAULT_BUCKET_SIZE,
            flat_background: FlatBackground::Black,
            shading: ShadingSettings::default(),
        }
    }
}

/// One rendered pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelSample {
    pub rgb: Rgb8,
    /// Whether a primary ray was traced for this pixel
    pub traced: bool,
}

/// Render pixel (x, y) of a `width` x `height` frame.
pub fn render_pixel(
    scene: &SceneSnapshot,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
    settings: &RenderSettings,
) -> PixelSample {
    let ray = primary_ray(&scene.camera, x, y, width, height);
    let hit = closest_hit(hit_plane(&ray, &scene.plane), hit_sphere(&ray, &scene.sphere));

    match scene.mode {
        RenderMode::Flat => {
            let color = match hit {
                SurfaceHit::Plane(_) => scene.plane.albedo(),
                SurfaceHit::Sphere(_) => scene.sphere.albedo(),
                SurfaceHit::Miss => match settings.flat_background {
                    FlatBackground::Black => Vec3::ZERO,
                    FlatBackground::Environment => {
                        sample_environment(&scene.environment, ray.direction)
                    }
                },
            };
            PixelSample {
                rgb: quantize(color),
                traced: false,
            }
        }
        RenderMode::RayTraced => {
            let shading = &settings.shading;
            let color = match hit {
                SurfaceHit::Plane(t) => shade_plane(ray.at(t), scene, shading),
                SurfaceHit::Sphere(t) => shade_sphere(&ray, t, scene, shading),
                SurfaceHit::Miss => shade_miss(&ray, scene, shading),
            };
            PixelSample {
                rgb: quantize(color),
                traced: true,
            }
        }
    }
}

/// Render every pixel of a `width` x `height` frame.
///
/// Serial and parallel rendering produce identical frames.
pub fn render_frame(
    scene: &SceneSnapshot,
    width: u32,
    height: u32,
    settings: &RenderSettings,
) -> Frame {
    let mut buffer = FrameBuffer::new(width, height);

    if !settings.parallel {
        let mut ray_count = 0;
        for y in 0..height {
            for x in 0..width {
                let sample = render_pixel(scene, x, y, width, height, settings);
                if sample.traced {
                    ray_count += 1;
                }
                buffer.set(x, y, sample.rgb);
            }
        }
        return Frame { buffer, ray_count };
    }

    let results: Vec<_> = generate_buckets(width, height, settings.bucket_size)
        .into_par_iter()
        .map(|bucket| render_bucket(bucket, scene, width, height, settings))
        .collect();

    let mut ray_count = 0;
    for result in results {
        let bucket = result.bucket;
        for (i, rgb) in result.pixels.into_iter().enumerate() {
            let i = i as u32;
            buffer.set(bucket.x + i % bucket.width, bucket.y + i / bucket.width, rgb);
        }
        ray_count += result.ray_count;
    }

    Frame { buffer, ray_count }
}

/// Counters describing how often the cache helped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Frames that went through the per-pixel pipeline
    pub frames_rendered: u64,
    /// Calls answered from the cache
    pub cache_hits: u64,
}

/// Last rendered frame together with what it was rendered from.
#[derive(Debug)]
struct Cache {
    snapshot: SceneSnapshot,
    frame: Frame,
}

impl Cache {
    fn is_valid_for(&self, snapshot: &SceneSnapshot, width: u32, height: u32) -> bool {
        self.frame.width() == width
            && self.frame.height() == height
            && self.snapshot.same_scene(snapshot)
    }
}

/// Renders frames on demand, skipping all pixel work when nothing changed.
#[derive(Debug, Default)]
pub struct FrameRenderer {
    settings: RenderSettings,
    cache: Option<Cache>,
    stats: RenderStats,
}

impl FrameRenderer {
    pub fn new(settings: RenderSettings) -> Self {
        Self {
            settings,
            cache: None,
            stats: RenderStats::default(),
        }
    }

    pub fn settings(&self) -> &RenderSettings {
        &self.settings
    }

    /// Replace the settings, dropping the cached frame if they differ.
    pub fn set_settings(&mut self, settings: RenderSettings) {
        if settings != self.settings {
            self.settings = settings;
            self.invalidate();
        }
    }

    pub fn stats(&self) -> RenderStats {
        self.stats
    }

    /// Forget the cached frame; the next call re-renders.
    pub fn invalidate(&mut self) {
        self.cache = None;
    }

    /// Whether rendering `snapshot` at this size would redo the pixel work.
    pub fn has_changed(&self, snapshot: &SceneSnapshot, width: u32, height: u32) -> bool {
        !self
            .cache
            .as_ref()
            .is_some_and(|cache| cache.is_valid_for(snapshot, width, height))
    }

    /// Frame for `snapshot` at `width` x `height`.
    ///
    /// An unchanged snapshot and size return the previous frame untouched,
    /// ray count included. Otherwise the frame is rendered and replaces the
    /// cache.
    pub fn render(&mut self, snapshot: &SceneSnapshot, width: u32, height: u32) -> &Frame {
        let cache = match self.cache.take() {
            Some(cache) if cache.is_valid_for(snapshot, width, height) => {
                self.stats.cache_hits += 1;
                log::trace!("Scene unchanged, reusing {}x{} frame", width, height);
                cache
            }
            _ => {
                let frame = render_frame(snapshot, width, height, &self.settings);
                self.stats.frames_rendered += 1;
                log::debug!(
                    "Rendered {}x{} {:?} frame, {} rays",
                    width,
                    height,
                    snapshot.mode,
                    frame.ray_count
                );
                Cache {
                    snapshot: snapshot.clone(),
                    frame,
                }
            }
        };

        &self.cache.insert(cache).frame
    }
}
