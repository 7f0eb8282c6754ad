//! RGBA8 pixel buffer.
//!
//! Pixels are stored row-major, top-to-bottom and left-to-right, four bytes
//! per pixel in R, G, B, A order. Dimensions are always non-zero.

use crate::error::{ColorizeError, ColorizeResult};

/// Bytes per RGBA pixel.
pub const CHANNELS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaBuffer {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl RgbaBuffer {
    /// Wrap raw RGBA bytes.
    ///
    /// Fails if either dimension is zero or `data` is not exactly
    /// `width * height * 4` bytes long.
    pub fn from_raw(width: usize, height: usize, data: Vec<u8>) -> ColorizeResult<Self> {
        let expected = width * height * CHANNELS;
        if width == 0 || height == 0 || data.len() != expected {
            return Err(ColorizeError::InvalidBuffer {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self { width, height, data })
    }

    /// Create a buffer where every pixel has the same value.
    pub fn filled(width: usize, height: usize, pixel: [u8; 4]) -> ColorizeResult<Self> {
        let data = pixel
            .iter()
            .copied()
            .cycle()
            .take(width * height * CHANNELS)
            .collect();
        Self::from_raw(width, height, data)
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }

    /// Bytes per row.
    pub fn stride(&self) -> usize {
        self.width * CHANNELS
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Byte offset of pixel `(x, y)`.
    #[inline]
    pub fn offset(&self, x: usize, y: usize) -> usize {
        (y * self.width + x) * CHANNELS
    }

    /// Read one pixel. Panics if out of bounds.
    pub fn pixel(&self, x: usize, y: usize) -> [u8; 4] {
        let i = self.offset(x, y);
        [self.data[i], self.data[i + 1], self.data[i + 2], self.data[i + 3]]
    }

    pub fn set_pixel(&mut self, x: usize, y: usize, pixel: [u8; 4]) {
        let i = self.offset(x, y);
        self.data[i..i + CHANNELS].copy_from_slice(&pixel);
    }

    /// Iterator over the alpha channel in pixel order.
    pub fn alpha(&self) -> impl Iterator<Item = u8> + '_ {
        self.data.chunks_exact(CHANNELS).map(|px| px[3])
    }

    pub fn is_opaque(&self) -> bool {
        self.alpha().all(|a| a == u8::MAX)
    }
}
