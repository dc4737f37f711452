use alloc::vec::Vec;

use crate::PlanarError;

/// Hard upper bound on image side length, enforced on every path that sizes
/// pixel buffers from untrusted dimensions. Independent of any configured
/// [`Limits`].
pub const MAX_SIDE: u32 = 16384;

/// Resource limits for decode/encode operations.
///
/// All fields default to `None` (no limit).
#[derive(Clone, Debug, Default)]
pub struct Limits {
    pub max_width: Option<u64>,
    pub max_height: Option<u64>,
    /// Maximum pixel count (width * height).
    pub max_pixels: Option<u64>,
    /// Maximum memory bytes for any single pixel-buffer allocation.
    pub max_memory_bytes: Option<u64>,
}

impl Limits {
    /// Check dimensions against limits. Returns Ok(()) or LimitExceeded error.
    pub(crate) fn check(&self, width: u32, height: u32) -> Result<(), PlanarError> {
        if let Some(max_w) = self.max_width {
            if u64::from(width) > max_w {
                return Err(PlanarError::LimitExceeded(alloc::format!(
                    "width {width} exceeds limit {max_w}"
                )));
            }
        }
        if let Some(max_h) = self.max_height {
            if u64::from(height) > max_h {
                return Err(PlanarError::LimitExceeded(alloc::format!(
                    "height {height} exceeds limit {max_h}"
                )));
            }
        }
        if let Some(max_px) = self.max_pixels {
            let pixels = u64::from(width) * u64::from(height);
            if pixels > max_px {
                return Err(PlanarError::LimitExceeded(alloc::format!(
                    "pixel count {pixels} exceeds limit {max_px}"
                )));
            }
        }
        Ok(())
    }

    /// Check that an allocation size is within the memory limit.
    ///
    /// A limit refusal and an allocator refusal are the same outcome at an
    /// allocation site, so this reports [`PlanarError::AllocationFailed`],
    /// not `LimitExceeded`.
    pub(crate) fn check_memory(&self, bytes: usize) -> Result<(), PlanarError> {
        if let Some(max_mem) = self.max_memory_bytes {
            if bytes as u64 > max_mem {
                return Err(PlanarError::AllocationFailed { bytes });
            }
        }
        Ok(())
    }
}

/// Allocate a zero-filled buffer of `len` elements, checking the memory limit
/// before asking the allocator. Either refusal is `AllocationFailed`.
pub(crate) fn alloc_zeroed<T: Clone + Default>(
    len: usize,
    limits: Option<&Limits>,
) -> Result<Vec<T>, PlanarError> {
    let bytes = len.saturating_mul(core::mem::size_of::<T>());
    if let Some(limits) = limits {
        limits.check_memory(bytes)?;
    }
    let mut buf = Vec::new();
    buf.try_reserve_exact(len)
        .map_err(|_| PlanarError::AllocationFailed { bytes })?;
    buf.resize(len, T::default());
    Ok(buf)
}
