//! LUT synthesis: evaluate white balance, film emulation, and split-tone
//! grading at every grid corner.

use crate::color::{clamp01, clamp255, hsl_to_rgb, lerp, luma_601, mat3_mul, soft_light, Hsl};
use crate::models::{ColorGrading, FilmStock, WhiteBalance};
use crate::verbose_println;

use super::{Lut3D, LUT_SIZE};

/// Build the 32^3 table for a (film, white balance, grading) triple.
///
/// Corner evaluation order is fixed: WB channel gains, then the film
/// recipe, then grading, then clamp and round. With the pass-through
/// stock, neutral WB, and zero grading the result is an identity table
/// to within rounding of the grid step.
pub fn synthesize(film: FilmStock, wb: &WhiteBalance, grading: &ColorGrading) -> Lut3D {
    let n = LUT_SIZE;
    let step = 255.0 / (n - 1) as f32;
    let (r_gain, g_gain, b_gain) = wb.gains();
    let grade = !grading.is_neutral();

    verbose_println!(
        "[lut] synthesizing {}^3 table: film={:?}, wb=({}, {}), grading={}",
        n,
        film,
        wb.temp,
        wb.tint,
        if grade { "on" } else { "off" }
    );

    let mut samples = Vec::with_capacity(3 * n * n * n);
    for bi in 0..n {
        for gi in 0..n {
            for ri in 0..n {
                let mut r = ri as f32 * step * r_gain;
                let mut g = gi as f32 * step * g_gain;
                let mut b = bi as f32 * step * b_gain;

                (r, g, b) = apply_film(film, r, g, b);

                if grade {
                    (r, g, b) = apply_grading(grading, r, g, b);
                }

                samples.push(clamp255(r).round() as u8);
                samples.push(clamp255(g).round() as u8);
                samples.push(clamp255(b).round() as u8);
            }
        }
    }

    // Length is 3*n^3 by construction
    Lut3D { size: n, samples }
}

/// One film recipe evaluation: crosstalk matrix, stock-specific post
/// steps, B&W mix, then the per-channel S-curve.
fn apply_film(film: FilmStock, r: f32, g: f32, b: f32) -> (f32, f32, f32) {
    let (mut r, mut g, mut b) = match film.matrix() {
        Some(m) => mat3_mul(m, r, g, b),
        None => (r, g, b),
    };

    // Classic Neg splits red and blue around mid-grey: cool shadows,
    // warm highlights.
    if film == FilmStock::ClassicNeg {
        let y = luma_601(r, g, b) / 255.0;
        if y > 0.5 {
            r *= 1.04;
            b *= 0.96;
        } else {
            r *= 0.97;
            b *= 1.03;
        }
    }

    if let Some(mix) = film.monochrome_mix() {
        let grey = mix[0] * r + mix[1] * g + mix[2] * b;
        r = grey;
        g = grey;
        b = grey;
    }

    if let Some(curve) = film.curve() {
        r = curve.apply(clamp01(r / 255.0)) * 255.0;
        g = curve.apply(clamp01(g / 255.0)) * 255.0;
        b = curve.apply(clamp01(b / 255.0)) * 255.0;
    }

    // Eterna's flat profile lifts blacks after the curve.
    if film == FilmStock::Eterna {
        r = 0.9 * r + 10.0;
        g = 0.9 * g + 10.0;
        b = 0.9 * b + 10.0;
    }

    (r, g, b)
}

/// Split-tone grading at one corner: luma-masked soft-light tints,
/// shadows first, then midtones, then highlights.
fn apply_grading(grading: &ColorGrading, r: f32, g: f32, b: f32) -> (f32, f32, f32) {
    let y = clamp01(luma_601(r, g, b) / 255.0);

    let shadow_mask = (1.0 - 2.0 * y).max(0.0);
    let highlight_mask = (2.0 * (y - 0.5)).max(0.0);
    let midtone_mask = (1.0 - 2.0 * (y - 0.5).abs()).max(0.0);

    let bands = [
        (&grading.shadows, shadow_mask),
        (&grading.midtones, midtone_mask),
        (&grading.highlights, highlight_mask),
    ];

    let mut r = r;
    let mut g = g;
    let mut b = b;
    for (band, mask) in bands {
        if band.saturation <= 0.0 || mask <= 0.0 {
            continue;
        }

        let (tr, tg, tb) = hsl_to_rgb(Hsl {
            h: band.hue,
            s: 0.8,
            l: 0.5,
        });
        let amount = (band.saturation / 100.0) * mask;

        r = lerp(r, soft_light(clamp01(r / 255.0), tr / 255.0) * 255.0, amount);
        g = lerp(g, soft_light(clamp01(g / 255.0), tg / 255.0) * 255.0, amount);
        b = lerp(b, soft_light(clamp01(b / 255.0), tb / 255.0) * 255.0, amount);
    }

    (r, g, b)
}
