//! Per-pixel stage evaluation: the six-band HSL mixer, global tone, and
//! local mask adjustments.
//!
//! Slider values are folded into precomputed parameter structs once per
//! render so the hot loop touches only multiplies, adds, and the one HSL
//! round-trip it cannot avoid.

use crate::color::{
    clamp01, clamp255, contrast_factor, hsl_to_rgb, hue_weight, luma_601, rgb_to_hsl,
};
use crate::models::{HslMixer, LocalAdjustments, ToneAdjustments, BAND_CENTERS, BAND_RANGE};

/// Accumulated band deltas below this are treated as no-op, skipping the
/// HSL->RGB conversion and its round-trip error.
const ACCUM_EPSILON: f32 = 1e-4;

// ============================================================
// Stage A: selective HSL
// ============================================================

/// Apply the six-band mixer to one pixel.
///
/// Band weights are accumulated against the pixel's hue, then hue shift,
/// saturation scale, and luminance push are applied in one conversion.
/// Pixels outside every band return unchanged.
#[inline]
pub(super) fn apply_hsl_mixer(mixer: &HslMixer, r: f32, g: f32, b: f32) -> (f32, f32, f32) {
    let hsl = rgb_to_hsl(r, g, b);

    let mut dh = 0.0f32;
    let mut ds = 0.0f32;
    let mut dl = 0.0f32;

    for (band, center) in mixer.bands().iter().zip(BAND_CENTERS) {
        let w = hue_weight(hsl.h, center, BAND_RANGE);
        if w > 0.0 {
            dh += band.hue * w;
            ds += (band.saturation / 100.0) * w;
            dl += (band.luminance / 100.0) * w;
        }
    }

    if dh.abs() <= ACCUM_EPSILON && ds.abs() <= ACCUM_EPSILON && dl.abs() <= ACCUM_EPSILON {
        return (r, g, b);
    }

    let h = (hsl.h + dh).rem_euclid(360.0);
    let s = clamp01(hsl.s * (1.0 + ds));

    // Luminance pushes toward white or black proportionally to the
    // remaining headroom, halved to keep the slider usable.
    let l = if dl > 0.0 {
        hsl.l + (1.0 - hsl.l) * dl * 0.5
    } else {
        hsl.l + hsl.l * dl * 0.5
    };
    let l = clamp01(l);

    hsl_to_rgb(crate::color::Hsl { h, s, l })
}

// ============================================================
// Stage B: global tone
// ============================================================

/// Tone sliders folded into per-render constants.
pub(super) struct ToneParams {
    brightness: f32,
    contrast: f32,
    saturation: f32,
    shadows: f32,
    highlights: f32,
    active: bool,
}

impl ToneParams {
    pub(super) fn new(tone: &ToneAdjustments) -> Self {
        Self {
            brightness: tone.brightness,
            contrast: contrast_factor(tone.contrast),
            saturation: 1.0 + tone.saturation / 100.0,
            shadows: tone.shadows * 0.5,
            highlights: tone.highlights * 0.5,
            active: !tone.is_neutral(),
        }
    }

    #[inline]
    pub(super) fn is_active(&self) -> bool {
        self.active
    }
}

/// Brightness offset, contrast around the 128 pivot, saturation around
/// luma, then luma-weighted shadow lift and highlight drop.
#[inline]
pub(super) fn apply_tone(p: &ToneParams, r: f32, g: f32, b: f32) -> (f32, f32, f32) {
    let mut r = r + p.brightness;
    let mut g = g + p.brightness;
    let mut b = b + p.brightness;

    r = p.contrast * (r - 128.0) + 128.0;
    g = p.contrast * (g - 128.0) + 128.0;
    b = p.contrast * (b - 128.0) + 128.0;

    r = clamp255(r);
    g = clamp255(g);
    b = clamp255(b);

    let y = luma_601(r, g, b);

    // Neutral saturation skips the round trip through luma so untouched
    // channels stay bit-exact
    if p.saturation != 1.0 {
        r = y + (r - y) * p.saturation;
        g = y + (g - y) * p.saturation;
        b = y + (b - y) * p.saturation;
    }

    let lift = (1.0 - y / 255.0).max(0.0) * p.shadows;
    let drop = ((y - 128.0) / 128.0).max(0.0) * p.highlights;
    let offset = lift + drop;

    (
        clamp255(r + offset),
        clamp255(g + offset),
        clamp255(b + offset),
    )
}

// ============================================================
// Stage E: local mask adjustments
// ============================================================

/// One mask's `LocalAdjustments` folded into per-render constants.
pub(super) struct LocalParams {
    gain: f32,
    contrast: f32,
    saturation: f32,
    r_gain: f32,
    g_gain: f32,
    b_gain: f32,
}

impl LocalParams {
    pub(super) fn new(adj: &LocalAdjustments) -> Self {
        let t = adj.temperature / 100.0;
        let tn = adj.tint / 100.0;
        Self {
            // Exposure maps -100..=100 onto roughly +/-3 stops
            gain: (adj.exposure / 33.0).exp2(),
            contrast: contrast_factor(adj.contrast),
            saturation: 1.0 + adj.saturation / 100.0,
            r_gain: 1.0 + t,
            g_gain: 1.0 - tn,
            b_gain: 1.0 - t,
        }
    }
}

/// Evaluate one mask's adjustments for one pixel. The caller blends the
/// result against the incoming color by the alpha-derived weight.
#[inline]
pub(super) fn apply_local(p: &LocalParams, r: f32, g: f32, b: f32) -> (f32, f32, f32) {
    let mut r = r * p.gain;
    let mut g = g * p.gain;
    let mut b = b * p.gain;

    r = p.contrast * (r - 128.0) + 128.0;
    g = p.contrast * (g - 128.0) + 128.0;
    b = p.contrast * (b - 128.0) + 128.0;

    if p.saturation != 1.0 {
        let y = luma_601(r, g, b);
        r = y + (r - y) * p.saturation;
        g = y + (g - y) * p.saturation;
        b = y + (b - y) * p.saturation;
    }

    (
        clamp255(r * p.r_gain),
        clamp255(g * p.g_gain),
        clamp255(b * p.b_gain),
    )
}
