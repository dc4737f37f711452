//! Packed-pixel image buffer.

use alloc::vec::Vec;

use rgb::RGB8;

use crate::limits::{alloc_zeroed, Limits, MAX_SIDE};
use crate::PlanarError;

/// Row-major packed-RGB image: one `u32` word per pixel with red, green and
/// blue in the three most-significant bytes.
///
/// The least-significant byte is not an alpha channel. It is ignored on input
/// and always written as zero; this is the word layout the conversion
/// routines exchange with the codec side.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PackedImage {
    width: u32,
    height: u32,
    words: Vec<u32>,
}

impl PackedImage {
    /// Allocate a zero-filled image.
    ///
    /// Rejects zero dimensions and sides over [`MAX_SIDE`]; the allocation is
    /// checked against `limits` before the allocator is asked.
    pub fn new(width: u32, height: u32, limits: Option<&Limits>) -> Result<Self, PlanarError> {
        if width == 0 || height == 0 {
            return Err(PlanarError::InvalidDimensions { width, height });
        }
        if width > MAX_SIDE || height > MAX_SIDE {
            return Err(PlanarError::DimensionsTooLarge { width, height });
        }
        if let Some(limits) = limits {
            limits.check(width, height)?;
        }
        let words = alloc_zeroed(width as usize * height as usize, limits)?;
        Ok(Self { width, height, words })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Pixel words in row-major order, `width * height` of them.
    pub fn words(&self) -> &[u32] {
        &self.words
    }

    pub fn words_mut(&mut self) -> &mut [u32] {
        &mut self.words
    }

    /// RGB components of the word at `(x, y)`. Coordinates must be in bounds.
    pub fn rgb_at(&self, x: u32, y: u32) -> RGB8 {
        let word = self.words[self.index(x, y)];
        RGB8 {
            r: (word >> 24) as u8,
            g: (word >> 16) as u8,
            b: (word >> 8) as u8,
        }
    }

    /// Store `px` at `(x, y)` with the low byte zeroed. Coordinates must be
    /// in bounds.
    pub fn put_rgb(&mut self, x: u32, y: u32, px: RGB8) {
        let i = self.index(x, y);
        self.words[i] = u32::from(px.r) << 24 | u32::from(px.g) << 16 | u32::from(px.b) << 8;
    }

    fn index(&self, x: u32, y: u32) -> usize {
        debug_assert!(x < self.width && y < self.height);
        y as usize * self.width as usize + x as usize
    }
}
