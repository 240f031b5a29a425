//! Frame output: 8-bit RGB pixels plus the ray count.

use darkmoon_math::{clamp01, Vec3};

/// One output pixel.
pub type Rgb8 = [u8; 3];

/// Convert a colour to 8-bit channels.
///
/// Channels are clamped to [0, 1] and then truncated, so 0.5 becomes 127.
#[inline]
pub fn quantize(color: Vec3) -> Rgb8 {
    let c = clamp01(color);
    [
        (c.x * 255.0) as u8,
        (c.y * 255.0) as u8,
        (c.z * 255.0) as u8,
    ]
}

/// Row-major RGB pixel buffer, row 0 at the top.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FrameBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Rgb8>,
}

impl FrameBuffer {
    /// Create a new buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0; 3]; width as usize * height as usize],
        }
    }

    #[inline]
    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Rgb8 {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, rgb: Rgb8) {
        let index = self.index(x, y);
        self.pixels[index] = rgb;
    }

    /// Tightly packed RGB bytes, for display layers that want a raw slice.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    /// Copy into an `image` buffer for encoding.
    pub fn to_image(&self) -> image::RgbImage {
        image::RgbImage::from_fn(self.width, self.height, |x, y| image::Rgb(self.get(x, y)))
    }
}

/// A rendered frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    pub buffer: FrameBuffer,
    /// Primary rays traced to produce this frame (0 in flat mode).
    pub ray_count: u64,
}

impl Frame {
    pub fn width(&self) -> u32 {
        self.buffer.width
    }

    pub fn height(&self) -> u32 {
        self.buffer.height
    }
}
