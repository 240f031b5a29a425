//! Bucket-based tile rendering.
//!
//! Divides the frame into tiles (buckets) that can be rendered independently
//! and in parallel using rayon. Every pixel only reads the immutable
//! snapshot, so buckets need no synchronisation; ray counts are summed once
//! all buckets are done.

use darkmoon_core::SceneSnapshot;

use crate::frame::Rgb8;
use crate::renderer::{render_pixel, RenderSettings};

/// A rectangular region of the frame to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// X coordinate of bucket's top-left corner
    pub x: u32,
    /// Y coordinate of bucket's top-left corner
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Bucket {
    pub fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Get the total number of pixels in this bucket.
    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }
}

/// Default bucket size in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 64;

/// Cover a `width` x `height` frame with buckets, in row-major order.
///
/// Edge buckets are cropped to the frame. A `bucket_size` of 0 is treated
/// as 1.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let bucket_size = bucket_size.max(1);
    let mut buckets = Vec::new();

    let mut y = 0;
    while y < height {
        let mut x = 0;
        while x < width {
            let bw = bucket_size.min(width - x);
            let bh = bucket_size.min(height - y);
            buckets.push(Bucket::new(x, y, bw, bh));
            x += bucket_size;
        }
        y += bucket_size;
    }

    buckets
}

/// Result of rendering a bucket.
#[derive(Debug, Clone)]
pub struct BucketResult {
    /// The bucket that was rendered
    pub bucket: Bucket,
    /// Pixel colours in row-major order within the bucket
    pub pixels: Vec<Rgb8>,
    /// Primary rays traced inside this bucket
    pub ray_count: u64,
}

/// Render a single bucket of a `width` x `height` frame.
pub fn render_bucket(
    bucket: Bucket,
    scene: &SceneSnapshot,
    width: u32,
    height: u32,
    settings: &RenderSettings,
) -> BucketResult {
    let mut pixels = Vec::with_capacity(bucket.pixel_count() as usize);
    let mut ray_count = 0;

    for local_y in 0..bucket.height {
        for local_x in 0..bucket.width {
            let sample = render_pixel(
                scene,
                bucket.x + local_x,
                bucket.y + local_y,
                width,
                height,
                settings,
            );
            if sample.traced {
                ray_count += 1;
            }
            pixels.push(sample.rgb);
        }
    }

    BucketResult {
        bucket,
        pixels,
        ray_count,
    }
}
