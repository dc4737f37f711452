//! Planar 4:2:0 frame buffers.

use alloc::vec::Vec;

use crate::limits::{alloc_zeroed, Limits};
use crate::PlanarError;

/// Planar image: full-resolution luma plus two half-resolution chroma planes
/// (4:2:0 subsampling).
///
/// All three planes live in one contiguous allocation, Y first, then U, then
/// V; the accessors slice it. Each plane has a row stride that may exceed its
/// logical width to leave padding at the end of every row. U and V share
/// dimensions and stride.
#[derive(Clone, Debug)]
pub struct PlanarImage {
    width: u32,
    height: u32,
    y_stride: u32,
    uv_stride: u32,
    buf: Vec<u8>,
}

impl PlanarImage {
    /// Zero-filled frame with strides equal to the plane widths.
    pub fn new(width: u32, height: u32, limits: Option<&Limits>) -> Result<Self, PlanarError> {
        Self::with_strides(width, height, width, width.div_ceil(2), limits)
    }

    /// Zero-filled frame with explicit strides. `y_stride` must cover `width`
    /// and `uv_stride` the chroma width.
    pub fn with_strides(
        width: u32,
        height: u32,
        y_stride: u32,
        uv_stride: u32,
        limits: Option<&Limits>,
    ) -> Result<Self, PlanarError> {
        if width == 0 || height == 0 {
            return Err(PlanarError::InvalidDimensions { width, height });
        }
        if y_stride < width {
            return Err(PlanarError::StrideTooSmall {
                stride: y_stride,
                min: width,
            });
        }
        let chroma_width = width.div_ceil(2);
        if uv_stride < chroma_width {
            return Err(PlanarError::StrideTooSmall {
                stride: uv_stride,
                min: chroma_width,
            });
        }
        let len = buf_len(height, y_stride, uv_stride)
            .ok_or(PlanarError::DimensionsTooLarge { width, height })?;
        let buf = alloc_zeroed(len, limits)?;
        Ok(Self {
            width,
            height,
            y_stride,
            uv_stride,
            buf,
        })
    }

    /// Assemble a frame from externally produced planes, copying them into
    /// one contiguous buffer.
    ///
    /// Each slice must cover at least `stride * rows` bytes for its plane;
    /// shorter slices are rejected with `BufferTooSmall`, longer ones are
    /// truncated.
    pub fn from_planes(
        y: &[u8],
        u: &[u8],
        v: &[u8],
        width: u32,
        height: u32,
        y_stride: u32,
        uv_stride: u32,
    ) -> Result<Self, PlanarError> {
        let mut frame = Self::with_strides(width, height, y_stride, uv_stride, None)?;
        let y_len = frame.y_len();
        let uv_len = frame.uv_len();
        for (plane, len) in [(y, y_len), (u, uv_len), (v, uv_len)] {
            if plane.len() < len {
                return Err(PlanarError::BufferTooSmall {
                    needed: len,
                    actual: plane.len(),
                });
            }
        }
        frame.buf[..y_len].copy_from_slice(&y[..y_len]);
        frame.buf[y_len..y_len + uv_len].copy_from_slice(&u[..uv_len]);
        frame.buf[y_len + uv_len..].copy_from_slice(&v[..uv_len]);
        Ok(frame)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Chroma plane width: half the luma width, rounded up.
    pub fn chroma_width(&self) -> u32 {
        self.width.div_ceil(2)
    }

    /// Chroma plane height: half the luma height, rounded up.
    pub fn chroma_height(&self) -> u32 {
        self.height.div_ceil(2)
    }

    pub fn y_stride(&self) -> u32 {
        self.y_stride
    }

    pub fn uv_stride(&self) -> u32 {
        self.uv_stride
    }

    /// Luma plane: `height` rows of `y_stride` bytes.
    pub fn y(&self) -> &[u8] {
        &self.buf[..self.y_len()]
    }

    /// U chroma plane: `chroma_height` rows of `uv_stride` bytes.
    pub fn u(&self) -> &[u8] {
        let y_len = self.y_len();
        &self.buf[y_len..y_len + self.uv_len()]
    }

    /// V chroma plane: `chroma_height` rows of `uv_stride` bytes.
    pub fn v(&self) -> &[u8] {
        let start = self.y_len() + self.uv_len();
        &self.buf[start..]
    }

    pub fn y_mut(&mut self) -> &mut [u8] {
        let y_len = self.y_len();
        &mut self.buf[..y_len]
    }

    /// Both chroma planes, mutably and disjointly.
    pub fn uv_mut(&mut self) -> (&mut [u8], &mut [u8]) {
        let y_len = self.y_len();
        let uv_len = self.uv_len();
        let (_, tail) = self.buf.split_at_mut(y_len);
        tail.split_at_mut(uv_len)
    }

    fn y_len(&self) -> usize {
        self.y_stride as usize * self.height as usize
    }

    fn uv_len(&self) -> usize {
        self.uv_stride as usize * self.chroma_height() as usize
    }
}

fn buf_len(height: u32, y_stride: u32, uv_stride: u32) -> Option<usize> {
    let y = (y_stride as usize).checked_mul(height as usize)?;
    let uv = (uv_stride as usize).checked_mul(height.div_ceil(2) as usize)?;
    y.checked_add(uv.checked_mul(2)?)
}
