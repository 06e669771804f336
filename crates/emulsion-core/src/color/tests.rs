//! Tests for color primitives

use super::*;

// ========================================================================
// RGB <-> HSL
// ========================================================================

#[test]
fn test_rgb_to_hsl_grey_is_achromatic() {
    let hsl = rgb_to_hsl(128.0, 128.0, 128.0);
    assert_eq!(hsl.h, 0.0, "grey must report hue 0");
    assert_eq!(hsl.s, 0.0, "grey must report saturation 0");
    assert!((hsl.l - 128.0 / 255.0).abs() < 1e-5);
}

#[test]
fn test_rgb_to_hsl_primaries() {
    let red = rgb_to_hsl(255.0, 0.0, 0.0);
    assert!((red.h - 0.0).abs() < 1e-3);
    assert!((red.s - 1.0).abs() < 1e-5);

    let green = rgb_to_hsl(0.0, 255.0, 0.0);
    assert!((green.h - 120.0).abs() < 1e-3);

    let blue = rgb_to_hsl(0.0, 0.0, 255.0);
    assert!((blue.h - 240.0).abs() < 1e-3);
}

#[test]
fn test_hsl_round_trip() {
    // Round trip through HSL should reproduce the input channel values
    let cases = [
        (12.0, 64.0, 200.0),
        (255.0, 128.0, 0.0),
        (90.0, 90.0, 91.0),
        (0.0, 0.0, 0.0),
        (255.0, 255.0, 255.0),
    ];
    for (r, g, b) in cases {
        let (r2, g2, b2) = hsl_to_rgb(rgb_to_hsl(r, g, b));
        assert!(
            (r - r2).abs() < 0.01 && (g - g2).abs() < 0.01 && (b - b2).abs() < 0.01,
            "round trip drifted: ({}, {}, {}) -> ({}, {}, {})",
            r,
            g,
            b,
            r2,
            g2,
            b2
        );
    }
}

// ========================================================================
// Hue weight
// ========================================================================

#[test]
fn test_hue_weight_center_and_edge() {
    assert_eq!(hue_weight(60.0, 60.0, 45.0), 1.0, "center must weigh 1");
    assert_eq!(hue_weight(105.0, 60.0, 45.0), 0.0, "edge must weigh 0");
    assert_eq!(hue_weight(180.0, 60.0, 45.0), 0.0, "far hue must weigh 0");
}

#[test]
fn test_hue_weight_wraps_at_seam() {
    // 350 degrees is 10 degrees away from the red center at 0
    let near = hue_weight(350.0, 0.0, 45.0);
    let same = hue_weight(10.0, 0.0, 45.0);
    assert!(
        (near - same).abs() < 1e-6,
        "weight must be symmetric across the 0/360 seam: {} vs {}",
        near,
        same
    );
    assert!(near > 0.9, "10 degrees off-center should weigh heavily");
}

#[test]
fn test_hue_weight_is_monotonic_in_distance() {
    let mut prev = hue_weight(120.0, 120.0, 45.0);
    for step in 1..=45 {
        let w = hue_weight(120.0 + step as f32, 120.0, 45.0);
        assert!(w <= prev, "weight must fall as distance grows");
        prev = w;
    }
}

// ========================================================================
// Blends
// ========================================================================

#[test]
fn test_soft_light_neutral_blend() {
    // Blending with 0.5 is an identity for soft light
    for base in [0.0, 0.1, 0.25, 0.5, 0.9, 1.0] {
        let out = soft_light(base, 0.5);
        assert!(
            (out - base).abs() < 1e-6,
            "soft light with 0.5 must be neutral: {} -> {}",
            base,
            out
        );
    }
}

#[test]
fn test_soft_light_darkens_and_lightens() {
    assert!(soft_light(0.5, 0.25) < 0.5, "low blend must darken");
    assert!(soft_light(0.5, 0.75) > 0.5, "high blend must lighten");
}

#[test]
fn test_overlay_neutral_blend() {
    for base in [0.1, 0.4, 0.5, 0.6, 0.9] {
        let out = overlay(base, 0.5);
        assert!(
            (out - base).abs() < 1e-6,
            "overlay with 0.5 must be neutral: {} -> {}",
            base,
            out
        );
    }
}

// ========================================================================
// Curves
// ========================================================================

#[test]
fn test_s_curve_endpoints_normalized() {
    for k in [3.5, 4.5, 5.5, 6.5] {
        let curve = SCurve::new(k);
        assert!(curve.apply(0.0).abs() < 1e-6, "k={} must map 0 to 0", k);
        assert!(
            (curve.apply(1.0) - 1.0).abs() < 1e-6,
            "k={} must map 1 to 1",
            k
        );
    }
}

#[test]
fn test_s_curve_helper_matches_struct() {
    for x in [0.0, 0.2, 0.5, 0.8, 1.0] {
        assert_eq!(s_curve(x, 4.5), SCurve::new(4.5).apply(x));
    }
}

#[test]
fn test_s_curve_steepens_midtones() {
    let curve = SCurve::new(6.5);
    let low = curve.apply(0.3);
    let high = curve.apply(0.7);
    assert!(low < 0.3, "S-curve must push shadows down: {}", low);
    assert!(high > 0.7, "S-curve must push highlights up: {}", high);
}

#[test]
fn test_s_curve_midpoint_shift() {
    // Classic Chrome's 0.55 midpoint darkens the center of the range
    let shifted = SCurve::with_midpoint(5.5, 0.55);
    let centered = SCurve::with_midpoint(5.5, 0.5);
    assert!(shifted.apply(0.5) < centered.apply(0.5));
}

#[test]
fn test_contrast_factor_reference_points() {
    assert!((contrast_factor(0.0) - 1.0).abs() < 1e-6, "c=0 is unity");
    assert!(contrast_factor(100.0) > 2.2, "c=100 must exceed 2x");
    assert!(contrast_factor(-100.0) < 0.5, "c=-100 must compress");
}

#[test]
fn test_contrast_factor_preserves_pivot() {
    for c in [-100.0, -50.0, 0.0, 50.0, 100.0] {
        let k = contrast_factor(c);
        let y = k * (128.0 - 128.0) + 128.0;
        assert_eq!(y, 128.0, "pivot must be fixed for c={}", c);
    }
}

#[test]
fn test_mat3_mul_identity() {
    let id = [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]];
    let (r, g, b) = mat3_mul(&id, 10.0, 20.0, 30.0);
    assert_eq!((r, g, b), (10.0, 20.0, 30.0));
}

#[test]
fn test_luma_weights_sum_to_one() {
    assert!((luma_601(255.0, 255.0, 255.0) - 255.0).abs() < 1e-3);
    assert!((luma_709(255.0, 255.0, 255.0) - 255.0).abs() < 1e-3);
}
