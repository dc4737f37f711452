//! Packed-RGB to planar YUV 4:2:0 conversion, and back.
//!
//! Fixed-point BT.601 "studio swing" arithmetic at 16-bit precision, the same
//! coefficients block codecs use internally. The forward transform lands luma
//! in [16, 235] and chroma in [16, 240]; the inverse clamps to [0, 255] after
//! reconstruction.
//!
//! Chroma is subsampled by averaging each 2x2 block of source pixels. At an
//! odd right or bottom edge the partial block averages only its in-bounds
//! samples, never reading past the image. Reconstruction is nearest-neighbor:
//! every pixel reads the single chroma sample co-sited with its 2x2 block.

use enough::Stop;

use crate::packed::PackedImage;
use crate::planar::PlanarImage;
use crate::PlanarError;

const YUV_FIX: i32 = 16;
const YUV_HALF: i32 = 1 << (YUV_FIX - 1);

// Forward coefficients, scaled by 2^16.
const R_TO_Y: i32 = 16839; // 0.2568
const G_TO_Y: i32 = 33059; // 0.5044
const B_TO_Y: i32 = 6420; // 0.0979
const R_TO_U: i32 = -9719;
const G_TO_U: i32 = -19081;
const B_TO_U: i32 = 28800;
const R_TO_V: i32 = 28800;
const G_TO_V: i32 = -24116;
const B_TO_V: i32 = -4684;

// Inverse coefficients, scaled by 2^16.
const Y_SCALE: i32 = 76309; // 255 / 219
const V_TO_R: i32 = 104597; // 1.596
const U_TO_G: i32 = 25674; // 0.391
const V_TO_G: i32 = 53279; // 0.813
const U_TO_B: i32 = 132201; // 2.018

/// Lay a packed image out as a planar 4:2:0 frame, honoring `dst`'s strides.
///
/// Luma is computed per pixel. Each chroma sample averages the RGB of its 2x2
/// source block (or the 1-2 in-bounds pixels of a partial edge block) before
/// conversion. Fails with `DimensionMismatch` if the buffers disagree on
/// size; checks `stop` every 16 rows.
pub fn packed_to_planar(
    src: &PackedImage,
    dst: &mut PlanarImage,
    stop: &dyn Stop,
) -> Result<(), PlanarError> {
    check_dims((src.width(), src.height()), (dst.width(), dst.height()))?;

    let w = src.width() as usize;
    let h = src.height() as usize;
    let words = src.words();
    let y_stride = dst.y_stride() as usize;
    let uv_stride = dst.uv_stride() as usize;
    let cw = dst.chroma_width() as usize;
    let ch = dst.chroma_height() as usize;

    let y_plane = dst.y_mut();
    for (row, src_row) in words.chunks_exact(w).enumerate() {
        if row % 16 == 0 {
            stop.check()?;
        }
        let dst_row = &mut y_plane[row * y_stride..row * y_stride + w];
        for (out, &word) in dst_row.iter_mut().zip(src_row) {
            let (r, g, b) = split_word(word);
            *out = rgb_to_y(r, g, b);
        }
    }

    let (u_plane, v_plane) = dst.uv_mut();
    for by in 0..ch {
        if by % 16 == 0 {
            stop.check()?;
        }
        for bx in 0..cw {
            let (r, g, b) = average_block(words, w, h, bx * 2, by * 2);
            u_plane[by * uv_stride + bx] = rgb_to_u(r, g, b);
            v_plane[by * uv_stride + bx] = rgb_to_v(r, g, b);
        }
    }

    Ok(())
}

/// Reconstruct a packed image from a planar 4:2:0 frame, honoring `src`'s
/// strides.
///
/// Writes `0xRRGGBB00` words; the low byte is always zero. Fails with
/// `DimensionMismatch` if the buffers disagree on size; checks `stop` every
/// 16 rows.
pub fn planar_to_packed(
    src: &PlanarImage,
    dst: &mut PackedImage,
    stop: &dyn Stop,
) -> Result<(), PlanarError> {
    check_dims((src.width(), src.height()), (dst.width(), dst.height()))?;

    let w = dst.width() as usize;
    let y_stride = src.y_stride() as usize;
    let uv_stride = src.uv_stride() as usize;
    let y_plane = src.y();
    let u_plane = src.u();
    let v_plane = src.v();

    for (row, dst_row) in dst.words_mut().chunks_exact_mut(w).enumerate() {
        if row % 16 == 0 {
            stop.check()?;
        }
        let y_row = &y_plane[row * y_stride..row * y_stride + w];
        let uv_off = (row / 2) * uv_stride;
        for (x, (out, &luma)) in dst_row.iter_mut().zip(y_row).enumerate() {
            let u = u_plane[uv_off + x / 2];
            let v = v_plane[uv_off + x / 2];
            let (r, g, b) = yuv_to_rgb(i32::from(luma), i32::from(u), i32::from(v));
            *out = u32::from(r) << 24 | u32::from(g) << 16 | u32::from(b) << 8;
        }
    }

    Ok(())
}

fn check_dims(src: (u32, u32), dst: (u32, u32)) -> Result<(), PlanarError> {
    if src != dst {
        return Err(PlanarError::DimensionMismatch {
            expected: dst,
            actual: src,
        });
    }
    Ok(())
}

#[inline]
fn split_word(word: u32) -> (i32, i32, i32) {
    (
        ((word >> 24) & 0xff) as i32,
        ((word >> 16) & 0xff) as i32,
        ((word >> 8) & 0xff) as i32,
    )
}

/// Rounded average of the up-to-2x2 pixel block with top-left `(x0, y0)`.
fn average_block(words: &[u32], w: usize, h: usize, x0: usize, y0: usize) -> (i32, i32, i32) {
    let mut r_sum = 0;
    let mut g_sum = 0;
    let mut b_sum = 0;
    let mut n = 0;
    for y in y0..(y0 + 2).min(h) {
        for x in x0..(x0 + 2).min(w) {
            let (r, g, b) = split_word(words[y * w + x]);
            r_sum += r;
            g_sum += g;
            b_sum += b;
            n += 1;
        }
    }
    // The block origin is always in bounds, so n >= 1.
    let half = n / 2;
    (
        (r_sum + half) / n,
        (g_sum + half) / n,
        (b_sum + half) / n,
    )
}

#[inline]
fn rgb_to_y(r: i32, g: i32, b: i32) -> u8 {
    let luma = R_TO_Y * r + G_TO_Y * g + B_TO_Y * b;
    // Stays in [16, 235], no clip needed.
    ((luma + YUV_HALF + (16 << YUV_FIX)) >> YUV_FIX) as u8
}

#[inline]
fn rgb_to_u(r: i32, g: i32, b: i32) -> u8 {
    let u = R_TO_U * r + G_TO_U * g + B_TO_U * b;
    clip((u + YUV_HALF + (128 << YUV_FIX)) >> YUV_FIX)
}

#[inline]
fn rgb_to_v(r: i32, g: i32, b: i32) -> u8 {
    let v = R_TO_V * r + G_TO_V * g + B_TO_V * b;
    clip((v + YUV_HALF + (128 << YUV_FIX)) >> YUV_FIX)
}

#[inline]
fn yuv_to_rgb(y: i32, u: i32, v: i32) -> (u8, u8, u8) {
    let luma = Y_SCALE * (y - 16) + YUV_HALF;
    let r = (luma + V_TO_R * (v - 128)) >> YUV_FIX;
    let g = (luma - U_TO_G * (u - 128) - V_TO_G * (v - 128)) >> YUV_FIX;
    let b = (luma + U_TO_B * (u - 128)) >> YUV_FIX;
    (clip(r), clip(g), clip(b))
}

#[inline]
fn clip(v: i32) -> u8 {
    v.clamp(0, 255) as u8
}
