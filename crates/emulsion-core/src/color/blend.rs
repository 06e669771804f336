//! Blend modes used by split-tone grading and the grain overlay.

/// Soft-light blend (Photoshop formulation).
///
/// `base` and `blend` are unit-range values. Blend values below 0.5 darken
/// the base, values above lighten it, with the piecewise dodge curve `D`
/// keeping deep shadows from blowing out.
#[inline]
pub fn soft_light(base: f32, blend: f32) -> f32 {
    if blend <= 0.5 {
        base - (1.0 - 2.0 * blend) * base * (1.0 - base)
    } else {
        let d = if base <= 0.25 {
            ((16.0 * base - 12.0) * base + 4.0) * base
        } else {
            base.sqrt()
        };
        base + (2.0 * blend - 1.0) * (d - base)
    }
}

/// Overlay blend on unit-range values.
///
/// Harsher than soft light; the grain pass uses it so noise reads as
/// density variation rather than additive fog.
#[inline]
pub fn overlay(base: f32, blend: f32) -> f32 {
    if base < 0.5 {
        2.0 * base * blend
    } else {
        1.0 - 2.0 * (1.0 - base) * (1.0 - blend)
    }
}
