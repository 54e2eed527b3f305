//! 8-bit RGB output image.

use bytemuck::{Pod, Zeroable};
use tracer_core::Color;
use tracer_math::Interval;

/// Display gamma applied when quantizing linear radiance.
pub const GAMMA: f32 = 2.2;

/// Gamma-encode one linear channel into 8 bits.
///
/// The value is clamped to [0, 1] before encoding, so over-bright
/// radiance saturates at 255. NaN encodes as 0.
#[inline]
pub fn gamma_encode(linear: f32) -> u8 {
    let clamped = Interval::UNIT.clamp(linear);
    (clamped.powf(1.0 / GAMMA) * 255.0).round() as u8
}

/// One RGB8 pixel.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Pod, Zeroable)]
pub struct Pixel {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Pixel {
    pub const BLACK: Pixel = Pixel::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Quantize a linear color.
    pub fn from_linear(color: Color) -> Self {
        Self::new(
            gamma_encode(color.x),
            gamma_encode(color.y),
            gamma_encode(color.z),
        )
    }
}

/// Row-major RGB8 image. Row 0 is the top of the picture.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    pixels: Vec<Pixel>,
}

impl Image {
    /// Create a new image filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Pixel::BLACK; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Get the pixel at column `x` of row `row`.
    pub fn get(&self, x: u32, row: u32) -> Pixel {
        self.pixels[self.index(x, row)]
    }

    /// Set the pixel at column `x` of row `row`.
    pub fn set(&mut self, x: u32, row: u32, pixel: Pixel) {
        let index = self.index(x, row);
        self.pixels[index] = pixel;
    }

    pub fn pixels(&self) -> &[Pixel] {
        &self.pixels
    }

    pub fn pixels_mut(&mut self) -> &mut [Pixel] {
        &mut self.pixels
    }

    /// Packed RGB8 bytes, three per pixel, ready for an encoder.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.pixels)
    }

    #[inline]
    fn index(&self, x: u32, row: u32) -> usize {
        row as usize * self.width as usize + x as usize
    }
}
