//! Darkmoon Renderer - CPU ray casting
//!
//! A single-bounce Whitted-style shader for a fixed scene: one sphere, one
//! ground plane, one point light and an equirectangular environment.
//!
//! Frames are cached: rendering an unchanged snapshot again costs nothing.

mod bucket;
mod camera;
mod environment;
mod frame;
mod intersect;
mod renderer;
mod shading;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use camera::primary_ray;
pub use environment::{sample_environment, texel_coords};
pub use frame::{quantize, Frame, FrameBuffer, Rgb8};
pub use intersect::{closest_hit, hit_plane, hit_sphere, solve_sphere, SurfaceHit};
pub use renderer::{
    render_frame, render_pixel, FlatBackground, FrameRenderer, PixelSample, RenderSettings,
    RenderStats,
};
pub use shading::{
    lighting, shade_miss, shade_plane, shade_sphere, shadow_factor, ShadingSettings, ShadowTest,
};

/// Re-export Vec3 and common math types from darkmoon_math
pub use darkmoon_math::{Interval, Ray, Vec3};
