//! Host raster surfaces and the packed-buffer adapter.
//!
//! A [`Surface`] models the host image library's raster object: truecolor
//! (one `0x00RRGGBB` word per pixel) or palette-indexed (one index per pixel
//! into a shared color table). The adapter methods dispatch on the storage
//! variant once per call, then run a tight per-variant loop.
//!
//! The host keeps RGB in the three least-significant bytes of its words; the
//! codec-facing [`PackedImage`] keeps them in the three most-significant.
//! Moving between the two is a one-byte shift in each direction.

use alloc::format;
use alloc::vec::Vec;

use enough::Stop;
use rgb::RGB8;

use crate::limits::alloc_zeroed;
use crate::packed::PackedImage;
use crate::PlanarError;

/// Maximum number of entries in an indexed surface's color table.
pub const PALETTE_MAX: usize = 256;

#[derive(Clone, Debug)]
enum Storage {
    TrueColor(Vec<u32>),
    Indexed { pixels: Vec<u8>, palette: Vec<RGB8> },
}

/// Host raster image, truecolor or palette-indexed.
#[derive(Clone, Debug)]
pub struct Surface {
    width: u32,
    height: u32,
    storage: Storage,
}

impl Surface {
    /// New truecolor surface, zero-filled (black).
    ///
    /// The host imposes no side-length cap of its own; oversized surfaces are
    /// rejected by the encode path, not here.
    pub fn new_truecolor(width: u32, height: u32) -> Result<Self, PlanarError> {
        let len = checked_len(width, height)?;
        let pixels = alloc_zeroed(len, None)?;
        Ok(Self {
            width,
            height,
            storage: Storage::TrueColor(pixels),
        })
    }

    /// New palette-indexed surface with every pixel on entry 0.
    ///
    /// `palette` must hold between 1 and [`PALETTE_MAX`] colors.
    pub fn new_indexed(width: u32, height: u32, palette: Vec<RGB8>) -> Result<Self, PlanarError> {
        if palette.is_empty() || palette.len() > PALETTE_MAX {
            return Err(PlanarError::InvalidSurface(format!(
                "palette must hold 1..={PALETTE_MAX} colors, got {}",
                palette.len()
            )));
        }
        let len = checked_len(width, height)?;
        let pixels = alloc_zeroed(len, None)?;
        Ok(Self {
            width,
            height,
            storage: Storage::Indexed { pixels, palette },
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Whether every pixel stores its own full color.
    pub fn is_truecolor(&self) -> bool {
        matches!(self.storage, Storage::TrueColor(_))
    }

    /// The shared color table; empty for truecolor surfaces.
    pub fn palette(&self) -> &[RGB8] {
        match &self.storage {
            Storage::TrueColor(_) => &[],
            Storage::Indexed { palette, .. } => palette,
        }
    }

    /// Packed `0x00RRGGBB` value at `(x, y)` of a truecolor surface.
    pub fn truecolor_at(&self, x: u32, y: u32) -> Result<u32, PlanarError> {
        let i = self.index(x, y)?;
        match &self.storage {
            Storage::TrueColor(pixels) => Ok(pixels[i]),
            Storage::Indexed { .. } => Err(not_truecolor()),
        }
    }

    /// Store a packed `0x00RRGGBB` value at `(x, y)` of a truecolor surface.
    pub fn set_truecolor(&mut self, x: u32, y: u32, value: u32) -> Result<(), PlanarError> {
        let i = self.index(x, y)?;
        match &mut self.storage {
            Storage::TrueColor(pixels) => {
                pixels[i] = value;
                Ok(())
            }
            Storage::Indexed { .. } => Err(not_truecolor()),
        }
    }

    /// Palette index at `(x, y)` of an indexed surface.
    pub fn palette_index_at(&self, x: u32, y: u32) -> Result<u8, PlanarError> {
        let i = self.index(x, y)?;
        match &self.storage {
            Storage::TrueColor(_) => Err(not_indexed()),
            Storage::Indexed { pixels, .. } => Ok(pixels[i]),
        }
    }

    /// Point `(x, y)` of an indexed surface at palette entry `index`.
    ///
    /// The index is validated here, at mutation time, so the read loops can
    /// trust every stored index.
    pub fn set_palette_index(&mut self, x: u32, y: u32, index: u8) -> Result<(), PlanarError> {
        let i = self.index(x, y)?;
        match &mut self.storage {
            Storage::TrueColor(_) => Err(not_indexed()),
            Storage::Indexed { pixels, palette } => {
                if usize::from(index) >= palette.len() {
                    return Err(PlanarError::InvalidSurface(format!(
                        "palette index {index} out of range for {} colors",
                        palette.len()
                    )));
                }
                pixels[i] = index;
                Ok(())
            }
        }
    }

    /// Read the surface into `dst` as `0xRRGGBB00` words.
    ///
    /// Truecolor words shift left one byte; indexed pixels compose the word
    /// from their palette entry. Checks `stop` every 16 rows.
    pub fn read_packed_into(
        &self,
        dst: &mut PackedImage,
        stop: &dyn Stop,
    ) -> Result<(), PlanarError> {
        if (self.width, self.height) != (dst.width(), dst.height()) {
            return Err(PlanarError::DimensionMismatch {
                expected: (dst.width(), dst.height()),
                actual: (self.width, self.height),
            });
        }
        let w = self.width as usize;
        match &self.storage {
            Storage::TrueColor(pixels) => {
                for (row, (dst_row, src_row)) in dst
                    .words_mut()
                    .chunks_exact_mut(w)
                    .zip(pixels.chunks_exact(w))
                    .enumerate()
                {
                    if row % 16 == 0 {
                        stop.check()?;
                    }
                    for (out, &px) in dst_row.iter_mut().zip(src_row) {
                        *out = px << 8;
                    }
                }
            }
            Storage::Indexed { pixels, palette } => {
                for (row, (dst_row, src_row)) in dst
                    .words_mut()
                    .chunks_exact_mut(w)
                    .zip(pixels.chunks_exact(w))
                    .enumerate()
                {
                    if row % 16 == 0 {
                        stop.check()?;
                    }
                    for (out, &idx) in dst_row.iter_mut().zip(src_row) {
                        let c = palette[usize::from(idx)];
                        *out = u32::from(c.r) << 24 | u32::from(c.g) << 16 | u32::from(c.b) << 8;
                    }
                }
            }
        }
        Ok(())
    }

    /// Write `src`'s words into a truecolor surface, discarding each word's
    /// low byte. Indexed surfaces are not a valid target.
    pub fn write_packed(&mut self, src: &PackedImage, stop: &dyn Stop) -> Result<(), PlanarError> {
        if (self.width, self.height) != (src.width(), src.height()) {
            return Err(PlanarError::DimensionMismatch {
                expected: (self.width, self.height),
                actual: (src.width(), src.height()),
            });
        }
        let w = self.width as usize;
        let Storage::TrueColor(pixels) = &mut self.storage else {
            return Err(not_truecolor());
        };
        for (row, (dst_row, src_row)) in pixels
            .chunks_exact_mut(w)
            .zip(src.words().chunks_exact(w))
            .enumerate()
        {
            if row % 16 == 0 {
                stop.check()?;
            }
            for (out, &word) in dst_row.iter_mut().zip(src_row) {
                *out = word >> 8;
            }
        }
        Ok(())
    }

    fn index(&self, x: u32, y: u32) -> Result<usize, PlanarError> {
        if x >= self.width || y >= self.height {
            return Err(PlanarError::InvalidSurface(format!(
                "coordinates ({x}, {y}) outside {}x{} surface",
                self.width, self.height
            )));
        }
        Ok(y as usize * self.width as usize + x as usize)
    }
}

fn checked_len(width: u32, height: u32) -> Result<usize, PlanarError> {
    if width == 0 || height == 0 {
        return Err(PlanarError::InvalidSurface(format!(
            "surface dimensions must be positive, got {width}x{height}"
        )));
    }
    (width as usize)
        .checked_mul(height as usize)
        .ok_or(PlanarError::DimensionsTooLarge { width, height })
}

fn not_truecolor() -> PlanarError {
    PlanarError::InvalidSurface("not a truecolor surface".into())
}

fn not_indexed() -> PlanarError {
    PlanarError::InvalidSurface("not a palette-indexed surface".into())
}
