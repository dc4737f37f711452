//! Encode/decode roundtrips through a lossless stand-in codec.
//!
//! With `StoreCodec` the only source of error is 4:2:0 chroma subsampling,
//! so each test can bound the per-channel drift for its content.

mod common;

use common::{gradient_surface, noise_surface, palette_surface, StoreCodec};
use enough::Unstoppable;
use pretty_assertions::assert_eq;
use zenplanar::{
    packed_to_planar, planar_to_packed, DecodeRequest, DirectFactory, EncodeRequest, PackedImage,
    PlanarImage, Qp, Surface,
};

fn roundtrip(surface: &Surface, qp: Qp) -> (Surface, f64) {
    let output = EncodeRequest::new()
        .with_qp(qp)
        .encode(surface, &StoreCodec, Unstoppable)
        .unwrap();
    let decoded = DecodeRequest::new(output.bytes())
        .decode(&StoreCodec, &DirectFactory, Unstoppable)
        .unwrap();
    (decoded, output.snr())
}

fn rgb_of(surface: &Surface, x: u32, y: u32) -> (u8, u8, u8) {
    if surface.is_truecolor() {
        let px = surface.truecolor_at(x, y).unwrap();
        ((px >> 16) as u8, (px >> 8) as u8, px as u8)
    } else {
        let c = surface.palette()[surface.palette_index_at(x, y).unwrap() as usize];
        (c.r, c.g, c.b)
    }
}

fn max_channel_delta(a: &Surface, b: &Surface) -> u32 {
    assert_eq!((a.width(), a.height()), (b.width(), b.height()));
    let mut worst = 0;
    for y in 0..a.height() {
        for x in 0..a.width() {
            let (ar, ag, ab) = rgb_of(a, x, y);
            let (br, bg, bb) = rgb_of(b, x, y);
            for (p, q) in [(ar, br), (ag, bg), (ab, bb)] {
                worst = worst.max(u32::from(p.abs_diff(q)));
            }
        }
    }
    worst
}

#[test]
fn gradient_survives_a_roundtrip_within_subsampling_error() {
    let surface = gradient_surface(32, 32);
    let (decoded, snr) = roundtrip(&surface, Qp::MIN);

    assert!(decoded.is_truecolor());
    assert_eq!((decoded.width(), decoded.height()), (32, 32));
    assert!(snr.is_finite() && snr >= 0.0);
    let delta = max_channel_delta(&surface, &decoded);
    assert!(delta <= 8, "gradient drifted by {delta}");
}

#[test]
fn odd_dimensions_roundtrip() {
    for (w, h) in [(5, 3), (1, 1), (7, 5), (2, 3)] {
        let surface = gradient_surface(w, h);
        let (decoded, _) = roundtrip(&surface, Qp::DEFAULT);
        assert_eq!((decoded.width(), decoded.height()), (w, h));
        let delta = max_channel_delta(&surface, &decoded);
        assert!(delta <= 8, "{w}x{h} drifted by {delta}");
    }
}

#[test]
fn chroma_aligned_palette_comes_back_truecolor_and_close() {
    let surface = palette_surface(16, 16);
    let (decoded, _) = roundtrip(&surface, Qp::DEFAULT);

    // Decode always lands in a truecolor surface, whatever went in.
    assert!(decoded.is_truecolor());
    // Color regions align with the 2x2 chroma grid, so every chroma average
    // is over a single color and only fixed-point rounding remains.
    let delta = max_channel_delta(&surface, &decoded);
    assert!(delta <= 4, "palette pattern drifted by {delta}");
}

#[test]
fn noise_roundtrip_reports_a_finite_score() {
    let surface = noise_surface(24, 24);
    let (decoded, snr) = roundtrip(&surface, Qp::MAX);
    assert_eq!((decoded.width(), decoded.height()), (24, 24));
    assert!(snr.is_finite());
}

#[test]
fn padded_strides_convert_like_tight_ones() {
    let mut packed = PackedImage::new(10, 6, None).unwrap();
    for (i, word) in packed.words_mut().iter_mut().enumerate() {
        let v = (i * 37 % 251) as u32;
        *word = v << 24 | (255 - v) << 16 | v << 8;
    }

    let mut tight = PlanarImage::new(10, 6, None).unwrap();
    let mut padded = PlanarImage::with_strides(10, 6, 13, 9, None).unwrap();
    packed_to_planar(&packed, &mut tight, &Unstoppable).unwrap();
    packed_to_planar(&packed, &mut padded, &Unstoppable).unwrap();

    let mut from_tight = PackedImage::new(10, 6, None).unwrap();
    let mut from_padded = PackedImage::new(10, 6, None).unwrap();
    planar_to_packed(&tight, &mut from_tight, &Unstoppable).unwrap();
    planar_to_packed(&padded, &mut from_padded, &Unstoppable).unwrap();

    assert_eq!(from_tight, from_padded);
}

#[test]
fn quality_and_qp_dials_reach_the_same_encode() {
    let surface = gradient_surface(8, 8);
    let via_quality = EncodeRequest::new()
        .with_quality(zenplanar::Quality::new(100))
        .encode(&surface, &StoreCodec, Unstoppable)
        .unwrap();
    let via_qp = EncodeRequest::new()
        .with_qp(Qp::MIN)
        .encode(&surface, &StoreCodec, Unstoppable)
        .unwrap();
    assert_eq!(via_quality.bytes(), via_qp.bytes());
}
