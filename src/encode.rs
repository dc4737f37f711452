//! Encode orchestration: surface to bitstream plus similarity score, and
//! delivery of the bitstream to a sink.

use alloc::vec::Vec;

use enough::Stop;

use crate::codec::{EncodedFrame, PlanarCodec};
use crate::convert::packed_to_planar;
use crate::limits::{Limits, MAX_SIDE};
use crate::packed::PackedImage;
use crate::planar::PlanarImage;
use crate::quality::{Qp, Quality};
use crate::surface::Surface;
use crate::PlanarError;

/// Builder for a single encode call.
#[derive(Clone, Copy, Debug)]
pub struct EncodeRequest<'a> {
    qp: Qp,
    limits: Option<&'a Limits>,
}

impl<'a> EncodeRequest<'a> {
    /// Request with the default quantization parameter ([`Qp::DEFAULT`]).
    pub fn new() -> Self {
        Self {
            qp: Qp::DEFAULT,
            limits: None,
        }
    }

    /// Set the quality on the user scale (0-100, higher is better).
    pub fn with_quality(mut self, quality: Quality) -> Self {
        self.qp = quality.to_qp();
        self
    }

    /// Set the codec-native quantization parameter directly (0-63, higher is
    /// coarser).
    pub fn with_qp(mut self, qp: Qp) -> Self {
        self.qp = qp;
        self
    }

    /// Apply resource limits to this call.
    pub fn with_limits(mut self, limits: &'a Limits) -> Self {
        self.limits = Some(limits);
        self
    }

    /// Run the encode: surface pixels into a packed buffer, chroma
    /// subsampling into a planar frame, codec encode.
    ///
    /// The size bound is checked before any buffer is allocated, and both
    /// conversion buffers are allocated up front so either refusal leaves
    /// nothing behind. Delivering the bitstream is a separate step; see
    /// [`EncodeOutput::write_to`].
    pub fn encode(
        &self,
        surface: &Surface,
        codec: &dyn PlanarCodec,
        stop: impl Stop,
    ) -> Result<EncodeOutput, PlanarError> {
        let stop: &dyn Stop = &stop;
        let (width, height) = (surface.width(), surface.height());
        if width > MAX_SIDE || height > MAX_SIDE {
            return Err(PlanarError::DimensionsTooLarge { width, height });
        }
        if let Some(limits) = self.limits {
            limits.check(width, height)?;
        }
        stop.check()?;

        let mut packed = PackedImage::new(width, height, self.limits)?;
        let mut frame = PlanarImage::new(width, height, self.limits)?;

        surface.read_packed_into(&mut packed, stop)?;
        packed_to_planar(&packed, &mut frame, stop)?;
        // Only the planar frame crosses the codec boundary.
        drop(packed);

        let encoded = codec.encode(&frame, self.qp, stop)?;
        Ok(EncodeOutput::from_frame(encoded))
    }
}

impl Default for EncodeRequest<'_> {
    fn default() -> Self {
        Self::new()
    }
}

/// A successful encode: the bitstream and the codec's similarity score.
///
/// Producing the bitstream and delivering it are independent outcomes. A
/// failed [`write_to`](EncodeOutput::write_to) reports what went wrong but
/// leaves this output intact, bytes and score still readable.
#[derive(Clone, Debug)]
pub struct EncodeOutput {
    bytes: Vec<u8>,
    snr: f64,
}

impl EncodeOutput {
    pub(crate) fn from_frame(frame: EncodedFrame) -> Self {
        let snr = frame.snr();
        Self {
            bytes: frame.into_vec(),
            snr,
        }
    }

    /// Borrow the encoded bitstream.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Encoded size in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// The codec's similarity score for this encode, comparable only against
    /// other encodes of the same image.
    pub fn snr(&self) -> f64 {
        self.snr
    }

    /// Consume and return the bitstream.
    pub fn into_vec(self) -> Vec<u8> {
        self.bytes
    }

    /// Deliver the bitstream to `dst` in one pass.
    ///
    /// A sink that stops accepting bytes yields
    /// [`PlanarError::ShortWrite`] carrying the delivered count; any sink
    /// error other than an interrupt yields [`PlanarError::WriteFailed`].
    #[cfg(feature = "std")]
    pub fn write_to<W: std::io::Write>(&self, mut dst: W) -> Result<(), PlanarError> {
        use std::io::ErrorKind;

        let expected = self.bytes.len();
        let mut written = 0;
        while written < expected {
            match dst.write(&self.bytes[written..]) {
                Ok(0) => {
                    return Err(PlanarError::ShortWrite { written, expected });
                }
                Ok(n) => written += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => {}
                Err(e) => return Err(PlanarError::WriteFailed(e.to_string())),
            }
        }
        dst.flush()
            .map_err(|e| PlanarError::WriteFailed(e.to_string()))
    }
}
