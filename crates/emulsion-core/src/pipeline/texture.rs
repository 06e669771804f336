//! The texture pass: luma-gated smart sharpen, then overlay-blended film
//! grain.
//!
//! Runs on the output of the main loop. Sharpening reads neighbours from
//! a snapshot taken before the pass so the convolution never sees its own
//! writes; grain noise is indexed by block position, which makes the pass
//! both deterministic and safely row-parallel. Sharpen runs first so the
//! grain it would otherwise amplify is laid down afterwards.

use rayon::prelude::*;

use crate::color::{clamp255, luma_601, luma_709, overlay};
use crate::models::TextureAdjustments;

use super::rng::noise_at;
use super::{ImageBuffer, PARALLEL_THRESHOLD};

/// Sharpen details quieter than this are treated as noise and skipped.
const DETAIL_THRESHOLD: f32 = 6.0;

/// Luma below which sharpening is progressively suppressed, keeping
/// deep-shadow noise from being amplified.
const SHADOW_PROTECT: f32 = 40.0;

/// Apply sharpening and grain in place.
///
/// `seed` is the render's base noise seed; grain draws are derived from
/// it and the grain block position only.
pub fn apply_texture(image: &mut ImageBuffer, texture: &TextureAdjustments, seed: u32) {
    let sharpen = texture.sharpening > 0.0;
    let grain = texture.grain_amount > 0.0;
    if !sharpen && !grain {
        return;
    }

    let width = image.width;
    let height = image.height;

    // The convolution must read unperturbed neighbours
    let snapshot = if sharpen {
        Some(image.data.clone())
    } else {
        None
    };

    let sharpen_gain = (texture.sharpening / 100.0) * 1.5;
    let grain_amount = texture.grain_amount / 100.0;
    let grain_size = texture.grain_size.max(1) as usize;
    let blocks_per_row = width.div_ceil(grain_size) as u32;

    let row_len = width * 4;
    let process_row = |y: usize, row: &mut [u8]| {
        if sharpen && y > 0 && y < height - 1 {
            let src = snapshot.as_deref().unwrap();
            sharpen_row(row, src, y, width, sharpen_gain);
        }
        if grain {
            grain_row(
                row,
                y,
                grain_amount,
                grain_size,
                blocks_per_row,
                seed,
            );
        }
    };

    if width * height >= PARALLEL_THRESHOLD {
        image
            .data
            .par_chunks_mut(row_len)
            .enumerate()
            .for_each(|(y, row)| process_row(y, row));
    } else {
        for (y, row) in image.data.chunks_mut(row_len).enumerate() {
            process_row(y, row);
        }
    }
}

/// Unsharp mask with a luma gate, over one row. Border columns are left
/// alone along with the border rows skipped by the caller.
fn sharpen_row(row: &mut [u8], src: &[u8], y: usize, width: usize, gain: f32) {
    for x in 1..width.saturating_sub(1) {
        let center = (y * width + x) * 4;

        let yc = luma_at(src, center);
        let y_avg = (luma_at(src, center - 4)
            + luma_at(src, center + 4)
            + luma_at(src, center - width * 4)
            + luma_at(src, center + width * 4))
            / 4.0;

        let detail = yc - y_avg;
        if detail.abs() <= DETAIL_THRESHOLD {
            continue;
        }

        let protect = (yc / SHADOW_PROTECT).min(1.0);
        let boost = detail * gain * protect;

        let offset = x * 4;
        for ch in 0..3 {
            let v = row[offset + ch] as f32;
            row[offset + ch] = clamp255(v + boost).round() as u8;
        }
    }
}

/// Overlay-blended grain over one row.
///
/// The grain mask damps noise in highlights without zeroing it in
/// shadows; `grain_size` above 1 replicates one draw across an s*s block
/// by floor-dividing the pixel coordinates before indexing the noise.
fn grain_row(
    row: &mut [u8],
    y: usize,
    amount: f32,
    size: usize,
    blocks_per_row: u32,
    seed: u32,
) {
    let block_y = (y / size) as u32;

    for (x, px) in row.chunks_exact_mut(4).enumerate() {
        let r = px[0] as f32;
        let g = px[1] as f32;
        let b = px[2] as f32;

        let luma = luma_709(r, g, b) / 255.0;
        let mask = (1.0 - luma * luma).max(0.2);

        let block_x = (x / size) as u32;
        let n = noise_at(seed, block_y * blocks_per_row + block_x);

        let v = 0.5 + (n - 0.5) * amount * mask * 0.8;

        px[0] = (overlay(r / 255.0, v) * 255.0).clamp(0.0, 255.0).round() as u8;
        px[1] = (overlay(g / 255.0, v) * 255.0).clamp(0.0, 255.0).round() as u8;
        px[2] = (overlay(b / 255.0, v) * 255.0).clamp(0.0, 255.0).round() as u8;
    }
}

#[inline]
fn luma_at(data: &[u8], offset: usize) -> f32 {
    luma_601(
        data[offset] as f32,
        data[offset + 1] as f32,
        data[offset + 2] as f32,
    )
}
