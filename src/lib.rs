//! # zenplanar
//!
//! Bridge between packed-RGB raster surfaces and the planar, 4:2:0-subsampled
//! YUV frames consumed by block-based lossy codecs.
//!
//! The codec itself stays opaque behind the [`PlanarCodec`] trait. This crate
//! owns everything around it: the fixed-point BT.601 conversion between the
//! two pixel worlds, the quality-to-quantization mapping, adapters for
//! truecolor and palette-indexed host surfaces, and the buffer lifecycle of
//! each encode or decode call.
//!
//! ## Pixel worlds
//!
//! Host surfaces keep RGB in the low three bytes of a word (`0x00RRGGBB`);
//! the codec-facing [`PackedImage`] keeps them in the high three
//! (`0xRRGGBB00`, low byte always zero); [`PlanarImage`] is the codec's
//! native layout, one contiguous Y+U+V allocation with per-plane strides and
//! chroma at half resolution, rounded up.
//!
//! ## Non-Goals
//!
//! - Any actual transform, entropy coding or bitstream format — that is the
//!   codec's side of the [`PlanarCodec`] boundary
//! - Color management
//! - File handling; callers bring bytes and sinks
//!
//! ## Usage
//!
//! ```
//! use zenplanar::{packed_to_planar, PackedImage, PlanarImage, Qp, Quality, Unstoppable};
//!
//! // Lay an 8x8 packed image out as a 4:2:0 frame.
//! let mut packed = PackedImage::new(8, 8, None)?;
//! packed.words_mut().fill(0x6699_cc00);
//! let mut frame = PlanarImage::new(8, 8, None)?;
//! packed_to_planar(&packed, &mut frame, &Unstoppable)?;
//! assert_eq!((frame.chroma_width(), frame.chroma_height()), (4, 4));
//!
//! // The user quality scale maps onto the codec's quantization parameter.
//! assert_eq!(Quality::new(100).to_qp(), Qp::MIN);
//! assert_eq!(Quality::new(-3), Quality::WORST);
//! # Ok::<(), zenplanar::PlanarError>(())
//! ```
//!
//! Encode and decode run through request builders against any codec
//! implementation:
//!
//! ```
//! use zenplanar::{
//!     DecodeRequest, DirectFactory, EncodeRequest, Quality, Surface, Unstoppable,
//! };
//! # use zenplanar::{EncodedFrame, PlanarCodec, PlanarError, PlanarImage, Qp, Stop};
//! # struct StoreCodec;
//! # impl PlanarCodec for StoreCodec {
//! #     fn decode(&self, data: &[u8], _stop: &dyn Stop) -> Result<PlanarImage, PlanarError> {
//! #         let width = u32::from_le_bytes([data[0], data[1], data[2], data[3]]);
//! #         let height = u32::from_le_bytes([data[4], data[5], data[6], data[7]]);
//! #         let y_len = (width * height) as usize;
//! #         let uv_len = (width.div_ceil(2) * height.div_ceil(2)) as usize;
//! #         let y = &data[8..8 + y_len];
//! #         let u = &data[8 + y_len..8 + y_len + uv_len];
//! #         let v = &data[8 + y_len + uv_len..];
//! #         PlanarImage::from_planes(y, u, v, width, height, width, width.div_ceil(2))
//! #     }
//! #     fn encode(
//! #         &self,
//! #         frame: &PlanarImage,
//! #         _qp: Qp,
//! #         _stop: &dyn Stop,
//! #     ) -> Result<EncodedFrame, PlanarError> {
//! #         let mut out = Vec::new();
//! #         out.extend_from_slice(&frame.width().to_le_bytes());
//! #         out.extend_from_slice(&frame.height().to_le_bytes());
//! #         out.extend_from_slice(frame.y());
//! #         out.extend_from_slice(frame.u());
//! #         out.extend_from_slice(frame.v());
//! #         Ok(EncodedFrame::new(out, 99.0))
//! #     }
//! # }
//! let codec = StoreCodec;
//! let mut surface = Surface::new_truecolor(16, 16)?;
//! surface.set_truecolor(3, 3, 0x00cc_2211)?;
//!
//! let output = EncodeRequest::new()
//!     .with_quality(Quality::new(85))
//!     .encode(&surface, &codec, Unstoppable)?;
//! assert!(output.snr() >= 0.0);
//!
//! let decoded = DecodeRequest::new(output.bytes())
//!     .decode(&codec, &DirectFactory, Unstoppable)?;
//! assert_eq!((decoded.width(), decoded.height()), (16, 16));
//! assert!(decoded.is_truecolor());
//! # Ok::<(), PlanarError>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

mod codec;
mod convert;
mod decode;
mod encode;
mod error;
mod factory;
#[cfg(feature = "std")]
mod host;
mod limits;
mod packed;
mod planar;
mod quality;
mod surface;

// Re-exports
pub use codec::{EncodedFrame, PlanarCodec};
pub use convert::{packed_to_planar, planar_to_packed};
pub use decode::DecodeRequest;
pub use encode::{EncodeOutput, EncodeRequest};
pub use enough::{Stop, StopReason, Unstoppable};
pub use error::PlanarError;
#[cfg(feature = "std")]
pub use factory::CallbackFactory;
pub use factory::{DirectFactory, SurfaceFactory};
#[cfg(feature = "std")]
pub use host::{Constructor, HostRegistry, SurfaceId, CREATE_TRUECOLOR};
pub use limits::{Limits, MAX_SIDE};
pub use packed::PackedImage;
pub use planar::PlanarImage;
pub use quality::{Qp, Quality};
pub use rgb::RGB8;
pub use surface::{Surface, PALETTE_MAX};
