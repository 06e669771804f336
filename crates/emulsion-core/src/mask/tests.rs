//! Tests for brush-stroke rasterization

use super::*;
use crate::pipeline::RenderError;

fn blank(width: usize, height: usize) -> Vec<u8> {
    vec![0; width * height]
}

fn paint_brush(size: f32, flow: f32) -> Brush {
    Brush {
        size,
        hardness: 1.0,
        flow,
        mode: BrushMode::Paint,
    }
}

#[test]
fn test_single_dab_covers_disk_only() {
    let mut alpha = blank(32, 32);
    let brush = paint_brush(10.0, 1.0);
    rasterize_stroke(&mut alpha, 32, 32, &brush, (16.0, 16.0), (16.0, 16.0)).unwrap();

    assert_eq!(alpha[16 * 32 + 16], 255, "hard full-flow dab is opaque");
    assert_eq!(alpha[16 * 32 + 14], 255, "inside the 5px radius");
    assert_eq!(alpha[0], 0, "far corner must stay untouched");
    assert_eq!(alpha[16 * 32 + 24], 0, "outside the radius must stay 0");
}

#[test]
fn test_stroke_connects_endpoints() {
    let mut alpha = blank(64, 16);
    let brush = paint_brush(6.0, 1.0);
    rasterize_stroke(&mut alpha, 64, 16, &brush, (8.0, 8.0), (56.0, 8.0)).unwrap();

    // Every column along the stroke line must have received coverage
    for x in 8..=56 {
        assert!(
            alpha[8 * 64 + x] > 0,
            "column {} along the stroke must be painted",
            x
        );
    }
}

#[test]
fn test_flow_accumulates_toward_opaque() {
    let mut alpha = blank(16, 16);
    let brush = paint_brush(8.0, 0.5);

    rasterize_stroke(&mut alpha, 16, 16, &brush, (8.0, 8.0), (8.0, 8.0)).unwrap();
    let first = alpha[8 * 16 + 8];
    rasterize_stroke(&mut alpha, 16, 16, &brush, (8.0, 8.0), (8.0, 8.0)).unwrap();
    let second = alpha[8 * 16 + 8];

    assert!(first > 0 && first < 255, "half flow is partial: {}", first);
    assert!(second > first, "repeated dabs must accumulate");
    assert!(second <= 255);
}

#[test]
fn test_erase_reduces_alpha() {
    let mut alpha = vec![200u8; 16 * 16];
    let brush = Brush {
        size: 8.0,
        hardness: 1.0,
        flow: 0.5,
        mode: BrushMode::Erase,
    };
    rasterize_stroke(&mut alpha, 16, 16, &brush, (8.0, 8.0), (8.0, 8.0)).unwrap();

    assert_eq!(alpha[8 * 16 + 8], 100, "erase must subtract flow * alpha");
    assert_eq!(alpha[0], 200, "erase must not reach outside the disk");
}

#[test]
fn test_erase_clamps_at_zero() {
    let mut alpha = vec![10u8; 16 * 16];
    let brush = Brush {
        size: 8.0,
        hardness: 1.0,
        flow: 1.0,
        mode: BrushMode::Erase,
    };
    for _ in 0..3 {
        rasterize_stroke(&mut alpha, 16, 16, &brush, (8.0, 8.0), (8.0, 8.0)).unwrap();
    }
    assert_eq!(alpha[8 * 16 + 8], 0, "full-flow erase must floor at zero");
}

#[test]
fn test_soft_brush_fades_toward_rim() {
    let mut alpha = blank(64, 64);
    let brush = Brush {
        size: 40.0,
        hardness: 0.2,
        flow: 1.0,
        mode: BrushMode::Paint,
    };
    rasterize_stroke(&mut alpha, 64, 64, &brush, (32.0, 32.0), (32.0, 32.0)).unwrap();

    let center = alpha[32 * 64 + 32];
    let mid = alpha[32 * 64 + 42];
    let rim = alpha[32 * 64 + 51];
    assert!(
        center > mid && mid > rim,
        "soft brush must fade outward: {} > {} > {}",
        center,
        mid,
        rim
    );
}

#[test]
fn test_shape_mismatch_is_rejected() {
    let mut alpha = blank(8, 8);
    let brush = Brush::default();
    let result = rasterize_stroke(&mut alpha, 16, 16, &brush, (0.0, 0.0), (1.0, 1.0));
    assert!(matches!(
        result,
        Err(RenderError::MaskShapeMismatch { expected: 256, actual: 64 })
    ));
}

#[test]
fn test_zero_dimensions_are_rejected() {
    let mut alpha = Vec::new();
    let brush = Brush::default();
    let result = rasterize_stroke(&mut alpha, 0, 4, &brush, (0.0, 0.0), (1.0, 1.0));
    assert!(matches!(result, Err(RenderError::InvalidDimensions { .. })));
}

#[test]
fn test_stroke_near_border_stays_in_bounds() {
    // Splats overlapping the image edge must clip, not panic
    let mut alpha = blank(16, 16);
    let brush = paint_brush(12.0, 1.0);
    rasterize_stroke(&mut alpha, 16, 16, &brush, (-2.0, -2.0), (18.0, 18.0)).unwrap();
    assert!(alpha[0] > 0, "corner inside the stroke must be painted");
}
