//! Decode orchestration: encoded bytes to a truecolor surface.

use enough::Stop;

use crate::codec::PlanarCodec;
use crate::convert::planar_to_packed;
use crate::factory::SurfaceFactory;
use crate::limits::{Limits, MAX_SIDE};
use crate::packed::PackedImage;
use crate::surface::Surface;
use crate::PlanarError;

/// Builder for a single decode call: codec bitstream in, truecolor surface
/// out.
///
/// Every buffer the call allocates is local to it and dropped on every exit
/// path; nothing outlives a failure except the error.
#[derive(Clone, Copy, Debug)]
pub struct DecodeRequest<'a> {
    data: &'a [u8],
    limits: Option<&'a Limits>,
}

impl<'a> DecodeRequest<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, limits: None }
    }

    /// Apply resource limits to this call.
    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Run the decode: codec decode, chroma upsampling into a packed buffer,
    /// surface creation through `factory`, pixel writeback.
    ///
    /// The returned surface is owned by the caller alone; registering it with
    /// a host is the caller's decision, not this call's side effect.
    pub fn decode(
        &self,
        codec: &dyn PlanarCodec,
        factory: &dyn SurfaceFactory,
        stop: impl Stop,
    ) -> Result<Surface, PlanarError> {
        let stop: &dyn Stop = &stop;
        if self.data.is_empty() {
            return Err(PlanarError::EmptyInput);
        }
        stop.check()?;

        let frame = codec.decode(self.data, stop)?;

        // Codec-reported dimensions size every buffer below, so they are
        // validated here even though well-formed frames cannot violate them.
        let (width, height) = (frame.width(), frame.height());
        if width == 0 || height == 0 {
            return Err(PlanarError::InvalidDimensions { width, height });
        }
        if width > MAX_SIDE || height > MAX_SIDE {
            return Err(PlanarError::DimensionsTooLarge { width, height });
        }
        if let Some(limits) = self.limits {
            limits.check(width, height)?;
        }

        let mut packed = PackedImage::new(width, height, self.limits)?;
        planar_to_packed(&frame, &mut packed, stop)?;
        // The planar frame is dead weight from here on; release it before the
        // surface allocation.
        drop(frame);

        let mut surface = factory.create(width, height)?;
        surface.write_packed(&packed, stop)?;
        Ok(surface)
    }
}
