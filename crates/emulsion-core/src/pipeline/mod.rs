//! The render pipeline.
//!
//! One synchronous pass over the source pixels applies, in order:
//! selective HSL, global tone, the trilinear LUT sample, the intensity
//! mix, local masks, vignette, and dither, accumulating the histogram as
//! it goes. A second pass (`texture`) sharpens and grains the result.
//!
//! Large frames shard into fixed-height horizontal bands processed in
//! parallel with rayon. Band geometry never depends on the thread count
//! and each band's noise is seeded from `base_seed ^ band_index`, so
//! sequential and parallel renders are bit-identical.

mod histogram;
mod rng;
mod stages;
mod texture;


pub use histogram::Histogram;
pub use rng::{noise_at, Mulberry32};
pub use texture::apply_texture;

use rayon::prelude::*;

use crate::color::lerp;
use crate::lut::Lut3D;
use crate::models::{Adjustments, MaskLayer};
use crate::verbose_println;

use stages::{apply_hsl_mixer, apply_local, apply_tone, LocalParams, ToneParams};

/// Pixel count at or above which a render shards into parallel bands.
pub(crate) const PARALLEL_THRESHOLD: usize = 262_144;

/// Rows per band. Fixed so band boundaries (and therefore dither
/// streams) are independent of the worker pool.
const BAND_ROWS: usize = 64;

/// Base seed for the per-render noise. Every render starts from the same
/// seed, which is what makes repeated renders of identical inputs
/// bit-identical.
const RENDER_SEED: u32 = 0x454D_554C;

/// Errors surfaced synchronously before any pixel is touched.
#[derive(Debug, Clone)]
pub enum RenderError {
    /// Zero dimension or RGBA buffer length not equal to 4*w*h
    InvalidDimensions {
        width: usize,
        height: usize,
        len: usize,
    },
    /// Mask alpha buffer length not equal to w*h
    MaskShapeMismatch { expected: usize, actual: usize },
}

impl std::fmt::Display for RenderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RenderError::InvalidDimensions { width, height, len } => write!(
                f,
                "Invalid image dimensions: {}x{} with {} bytes (expected {})",
                width,
                height,
                len,
                4 * width * height
            ),
            RenderError::MaskShapeMismatch { expected, actual } => write!(
                f,
                "Mask alpha buffer has {} bytes, expected {}",
                actual, expected
            ),
        }
    }
}

impl std::error::Error for RenderError {}

/// A tightly packed row-major RGBA frame, top-left origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBuffer {
    pub width: usize,
    pub height: usize,
    pub data: Vec<u8>,
}

impl ImageBuffer {
    /// Wrap an RGBA byte buffer, validating its shape.
    pub fn new(width: usize, height: usize, data: Vec<u8>) -> Result<Self, RenderError> {
        if width == 0 || height == 0 || data.len() != 4 * width * height {
            return Err(RenderError::InvalidDimensions {
                width,
                height,
                len: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// An opaque black frame.
    pub fn blank(width: usize, height: usize) -> Result<Self, RenderError> {
        if width == 0 || height == 0 {
            return Err(RenderError::InvalidDimensions {
                width,
                height,
                len: 0,
            });
        }
        let mut data = vec![0u8; 4 * width * height];
        for px in data.chunks_exact_mut(4) {
            px[3] = 255;
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }
}

/// Result of one render: the graded frame and its histogram.
pub struct RenderOutput {
    pub image: ImageBuffer,
    pub histogram: Histogram,
}

/// Everything the band loop needs, borrowed for the duration of one
/// render. Built once so the per-pixel code allocates nothing.
struct RenderContext<'a> {
    width: usize,
    lut: &'a Lut3D,
    intensity: f32,
    mixer_active: bool,
    mixer: &'a crate::models::HslMixer,
    tone: ToneParams,
    masks: Vec<ActiveMask<'a>>,
    vignette: f32,
    center_x: f32,
    center_y: f32,
    inv_max_dist: f32,
}

struct ActiveMask<'a> {
    alpha: &'a [u8],
    opacity: f32,
    params: LocalParams,
}

/// Grade one frame.
///
/// Takes an immutable snapshot of the adjustments (clamping out-of-range
/// sliders onto the debug channel), validates buffer shapes, and runs the
/// per-pixel stages followed by the texture pass. The source is never
/// modified; alpha is copied through verbatim.
pub fn render(
    src: &ImageBuffer,
    lut: &Lut3D,
    adjustments: &Adjustments,
    masks: &[MaskLayer],
) -> Result<RenderOutput, RenderError> {
    let (width, height) = (src.width, src.height);
    if width == 0 || height == 0 || src.data.len() != 4 * width * height {
        return Err(RenderError::InvalidDimensions {
            width,
            height,
            len: src.data.len(),
        });
    }

    let pixels = width * height;
    for mask in masks {
        if mask.alpha.len() != pixels {
            return Err(RenderError::MaskShapeMismatch {
                expected: pixels,
                actual: mask.alpha.len(),
            });
        }
    }

    let adj = adjustments.clamped();

    // Masks compose in list order; inert ones are dropped here so the
    // pixel loop never tests visibility. Local sliders get the same
    // clamp-and-report normalization as the global snapshot.
    let active_masks: Vec<ActiveMask> = masks
        .iter()
        .filter(|m| !m.is_inert())
        .map(|m| ActiveMask {
            alpha: &m.alpha,
            opacity: m.opacity.clamp(0.0, 1.0),
            params: LocalParams::new(&m.adjustments.clamped()),
        })
        .collect();

    let center_x = (width as f32 - 1.0) / 2.0;
    let center_y = (height as f32 - 1.0) / 2.0;
    let max_dist = (center_x * center_x + center_y * center_y).sqrt().max(1.0);

    let ctx = RenderContext {
        width,
        lut,
        intensity: adj.intensity,
        mixer_active: !adj.hsl.is_neutral(),
        mixer: &adj.hsl,
        tone: ToneParams::new(&adj.tone),
        masks: active_masks,
        vignette: (adj.texture.vignette / 100.0) * 255.0,
        center_x,
        center_y,
        inv_max_dist: 1.0 / max_dist,
    };

    let mut out = vec![0u8; src.data.len()];
    let band_len = BAND_ROWS * width * 4;

    let histogram = if pixels >= PARALLEL_THRESHOLD {
        verbose_println!(
            "[render] {}x{}: {} bands in parallel",
            width,
            height,
            pixels.div_ceil(BAND_ROWS * width)
        );
        out.par_chunks_mut(band_len)
            .enumerate()
            .map(|(band, dst)| process_band(&ctx, band, dst, &src.data))
            .reduce(Histogram::new, Histogram::merge)
    } else {
        out.chunks_mut(band_len)
            .enumerate()
            .map(|(band, dst)| process_band(&ctx, band, dst, &src.data))
            .fold(Histogram::new(), Histogram::merge)
    };

    let mut image = ImageBuffer {
        width,
        height,
        data: out,
    };

    apply_texture(&mut image, &adj.texture, RENDER_SEED);

    Ok(RenderOutput { image, histogram })
}

/// Process one horizontal band of rows, returning its partial histogram.
fn process_band(ctx: &RenderContext, band: usize, dst: &mut [u8], src: &[u8]) -> Histogram {
    let width = ctx.width;
    let rows = dst.len() / (width * 4);
    let first_row = band * BAND_ROWS;

    let mut rng = Mulberry32::new(RENDER_SEED ^ band as u32);
    let mut hist = Histogram::new();

    for row in 0..rows {
        let y = first_row + row;
        let dy = y as f32 - ctx.center_y;

        for x in 0..width {
            let offset = (row * width + x) * 4;
            let src_offset = (y * width + x) * 4;

            let mut r = src[src_offset] as f32;
            let mut g = src[src_offset + 1] as f32;
            let mut b = src[src_offset + 2] as f32;

            // Stage A: selective HSL
            if ctx.mixer_active {
                (r, g, b) = apply_hsl_mixer(ctx.mixer, r, g, b);
            }

            // Stage B: global tone
            if ctx.tone.is_active() {
                (r, g, b) = apply_tone(&ctx.tone, r, g, b);
            }

            // Stages C + D: trilinear LUT sample, intensity mix
            if ctx.intensity > 0.0 {
                let (lr, lg, lb) = ctx.lut.sample_trilinear(r, g, b);
                r = lerp(r, lr, ctx.intensity);
                g = lerp(g, lg, ctx.intensity);
                b = lerp(b, lb, ctx.intensity);
            }

            // Stage E: local masks, in list order
            for mask in &ctx.masks {
                let alpha = mask.alpha[y * width + x];
                if alpha == 0 {
                    continue;
                }
                let weight = (alpha as f32 / 255.0) * mask.opacity;
                let (mr, mg, mb) = apply_local(&mask.params, r, g, b);
                r = lerp(r, mr, weight);
                g = lerp(g, mg, weight);
                b = lerp(b, mb, weight);
            }

            // Stage F: vignette
            if ctx.vignette > 0.0 {
                let dx = x as f32 - ctx.center_x;
                let ratio = (dx * dx + dy * dy).sqrt() * ctx.inv_max_dist;
                let fall = ratio * ratio * ratio * ctx.vignette;
                r -= fall;
                g -= fall;
                b -= fall;
            }

            // Stage G: triangular dither against banding
            let noise = rng.triangular();
            let r8 = (r + noise).round().clamp(0.0, 255.0) as u8;
            let g8 = (g + noise).round().clamp(0.0, 255.0) as u8;
            let b8 = (b + noise).round().clamp(0.0, 255.0) as u8;

            // Stage H: histogram of the final bytes
            hist.accumulate(r8, g8, b8);

            dst[offset] = r8;
            dst[offset + 1] = g8;
            dst[offset + 2] = b8;
            dst[offset + 3] = src[src_offset + 3];
        }
    }

    hist
}
