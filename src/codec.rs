//! The opaque codec boundary.

use alloc::vec::Vec;

use enough::Stop;

use crate::planar::PlanarImage;
use crate::quality::Qp;
use crate::PlanarError;

/// Bitstream produced by a codec encode, plus the encoder's own similarity
/// score for it.
#[derive(Clone, Debug)]
pub struct EncodedFrame {
    bytes: Vec<u8>,
    snr: f64,
}

impl EncodedFrame {
    pub fn new(bytes: Vec<u8>, snr: f64) -> Self {
        Self { bytes, snr }
    }

    /// Borrow the encoded bitstream.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consume and return the bitstream.
    pub fn into_vec(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Signal-to-noise-style similarity score: finite, non-negative, and
    /// meaningful only relative to the frame this encode consumed.
    pub fn snr(&self) -> f64 {
        self.snr
    }
}

/// The external encode/decode pair this crate bridges to.
///
/// The bitstream format, transform and entropy coding behind these calls are
/// the codec's own business; the bridge prepares buffers in the layout the
/// codec expects and carries its results. Implementations report their
/// failures as [`PlanarError::DecodeFailed`] / [`PlanarError::EncodeFailed`].
pub trait PlanarCodec {
    /// Decode a bitstream into a planar 4:2:0 frame.
    fn decode(&self, data: &[u8], stop: &dyn Stop) -> Result<PlanarImage, PlanarError>;

    /// Encode a planar 4:2:0 frame at quantization parameter `qp`.
    fn encode(
        &self,
        frame: &PlanarImage,
        qp: Qp,
        stop: &dyn Stop,
    ) -> Result<EncodedFrame, PlanarError>;
}
