//! Shared codec and factory doubles for the integration tests.
//!
//! `StoreCodec` is a lossless stand-in for a real block codec: it stores the
//! planar frame verbatim in a tiny container, so roundtrip error comes from
//! chroma subsampling alone and tests can bound it exactly.

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use enough::Stop;
use zenplanar::{
    EncodedFrame, PlanarCodec, PlanarError, PlanarImage, Qp, Surface, SurfaceFactory, RGB8,
};

/// Container magic for [`StoreCodec`] bitstreams.
pub const MAGIC: &[u8; 4] = b"P420";

/// Stores frames verbatim: a 12-byte header (magic, width, height) followed
/// by the tightly packed Y, U and V planes.
#[derive(Clone, Copy, Debug, Default)]
pub struct StoreCodec;

impl PlanarCodec for StoreCodec {
    fn decode(&self, data: &[u8], _stop: &dyn Stop) -> Result<PlanarImage, PlanarError> {
        if data.len() < 12 || &data[..4] != MAGIC {
            return Err(PlanarError::DecodeFailed("bad container header".into()));
        }
        let width = u32::from_le_bytes(data[4..8].try_into().unwrap());
        let height = u32::from_le_bytes(data[8..12].try_into().unwrap());
        let cw = width.div_ceil(2) as u64;
        let ch = height.div_ceil(2) as u64;
        let y_len = width as u64 * height as u64;
        let uv_len = cw * ch;
        // Validate the payload length before slicing anything.
        let expected = y_len + 2 * uv_len;
        if (data.len() - 12) as u64 != expected {
            return Err(PlanarError::DecodeFailed(format!(
                "payload is {} bytes, header implies {expected}",
                data.len() - 12
            )));
        }
        let y_len = y_len as usize;
        let uv_len = uv_len as usize;
        let payload = &data[12..];
        PlanarImage::from_planes(
            &payload[..y_len],
            &payload[y_len..y_len + uv_len],
            &payload[y_len + uv_len..],
            width,
            height,
            width,
            cw as u32,
        )
        .map_err(|e| PlanarError::DecodeFailed(e.to_string()))
    }

    fn encode(
        &self,
        frame: &PlanarImage,
        _qp: Qp,
        _stop: &dyn Stop,
    ) -> Result<EncodedFrame, PlanarError> {
        let width = frame.width();
        let height = frame.height();
        let cw = frame.chroma_width() as usize;
        let mut out = Vec::with_capacity(12 + frame.y().len() + 2 * frame.u().len());
        out.extend_from_slice(MAGIC);
        out.extend_from_slice(&width.to_le_bytes());
        out.extend_from_slice(&height.to_le_bytes());
        // Strip stride padding so the container is stride-independent.
        for row in frame.y().chunks_exact(frame.y_stride() as usize) {
            out.extend_from_slice(&row[..width as usize]);
        }
        for plane in [frame.u(), frame.v()] {
            for row in plane.chunks_exact(frame.uv_stride() as usize) {
                out.extend_from_slice(&row[..cw]);
            }
        }
        // Lossless storage; report the score a perfect reconstruction gets.
        Ok(EncodedFrame::new(out, 99.0))
    }
}

/// Fails every call, as a damaged bitstream or a broken encoder would.
#[derive(Clone, Copy, Debug, Default)]
pub struct FailingCodec;

impl PlanarCodec for FailingCodec {
    fn decode(&self, _data: &[u8], _stop: &dyn Stop) -> Result<PlanarImage, PlanarError> {
        Err(PlanarError::DecodeFailed(
            "simulated bitstream damage".into(),
        ))
    }

    fn encode(
        &self,
        _frame: &PlanarImage,
        _qp: Qp,
        _stop: &dyn Stop,
    ) -> Result<EncodedFrame, PlanarError> {
        Err(PlanarError::EncodeFailed("simulated encoder failure".into()))
    }
}

/// Wraps [`StoreCodec`] and counts how often each side is reached.
#[derive(Debug, Default)]
pub struct CountingCodec {
    inner: StoreCodec,
    decodes: AtomicUsize,
    encodes: AtomicUsize,
}

impl CountingCodec {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn decode_calls(&self) -> usize {
        self.decodes.load(Ordering::Relaxed)
    }

    pub fn encode_calls(&self) -> usize {
        self.encodes.load(Ordering::Relaxed)
    }
}

impl PlanarCodec for CountingCodec {
    fn decode(&self, data: &[u8], stop: &dyn Stop) -> Result<PlanarImage, PlanarError> {
        self.decodes.fetch_add(1, Ordering::Relaxed);
        self.inner.decode(data, stop)
    }

    fn encode(
        &self,
        frame: &PlanarImage,
        qp: Qp,
        stop: &dyn Stop,
    ) -> Result<EncodedFrame, PlanarError> {
        self.encodes.fetch_add(1, Ordering::Relaxed);
        self.inner.encode(frame, qp, stop)
    }
}

/// Builds truecolor surfaces and counts how many it built.
#[derive(Debug, Default)]
pub struct CountingFactory {
    created: AtomicUsize,
}

impl CountingFactory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn created(&self) -> usize {
        self.created.load(Ordering::Relaxed)
    }
}

impl SurfaceFactory for CountingFactory {
    fn create(&self, width: u32, height: u32) -> Result<Surface, PlanarError> {
        let surface = Surface::new_truecolor(width, height)?;
        self.created.fetch_add(1, Ordering::Relaxed);
        Ok(surface)
    }
}

/// Refuses every surface, as a host out of memory would.
#[derive(Clone, Copy, Debug, Default)]
pub struct FailingFactory;

impl SurfaceFactory for FailingFactory {
    fn create(&self, width: u32, height: u32) -> Result<Surface, PlanarError> {
        Err(PlanarError::AllocationFailed {
            bytes: width as usize * height as usize * 4,
        })
    }
}

/// Smooth truecolor gradient, the friendliest content for 4:2:0.
pub fn gradient_surface(width: u32, height: u32) -> Surface {
    let mut surface = Surface::new_truecolor(width, height).unwrap();
    for y in 0..height {
        for x in 0..width {
            let r = (x * 4) as u8;
            let g = (y * 4) as u8;
            let b = ((x + y) * 2) as u8;
            let px = u32::from(r) << 16 | u32::from(g) << 8 | u32::from(b);
            surface.set_truecolor(x, y, px).unwrap();
        }
    }
    surface
}

/// Palette surface whose color regions align with the 2x2 chroma grid, so
/// every chroma average is over one color.
pub fn palette_surface(width: u32, height: u32) -> Surface {
    let palette = vec![
        RGB8::new(200, 30, 30),
        RGB8::new(30, 200, 30),
        RGB8::new(30, 30, 200),
        RGB8::new(220, 220, 220),
    ];
    let mut surface = Surface::new_indexed(width, height, palette).unwrap();
    for y in 0..height {
        for x in 0..width {
            let index = ((x / 2 + y / 2) % 4) as u8;
            surface.set_palette_index(x, y, index).unwrap();
        }
    }
    surface
}

/// Deterministic pseudo-random truecolor noise.
pub fn noise_surface(width: u32, height: u32) -> Surface {
    let mut surface = Surface::new_truecolor(width, height).unwrap();
    let mut state = 0xDEAD_BEEF_u32;
    for y in 0..height {
        for x in 0..width {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            surface.set_truecolor(x, y, state & 0x00FF_FFFF).unwrap();
        }
    }
    surface
}
