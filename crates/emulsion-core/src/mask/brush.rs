//! Brush-stroke rasterization onto mask alpha buffers.

use serde::{Deserialize, Serialize};

use crate::pipeline::RenderError;

/// Whether a stroke adds or removes coverage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum BrushMode {
    /// Accumulate alpha toward opaque
    #[default]
    Paint,

    /// Destination-out: subtract weighted alpha toward transparent
    Erase,
}

/// Brush parameters for one stroke.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Brush {
    /// Brush diameter in pixels
    pub size: f32,

    /// Edge hardness, 0..=1. Below 1.0 the rim falls off smoothly.
    pub hardness: f32,

    /// Per-splat accumulation rate, 0..=1
    pub flow: f32,

    pub mode: BrushMode,
}

impl Default for Brush {
    fn default() -> Self {
        Self {
            size: 48.0,
            hardness: 0.7,
            flow: 0.4,
            mode: BrushMode::Paint,
        }
    }
}

/// Rasterize one stroke segment into a mask alpha buffer, in place.
///
/// Splats disks of radius `size / 2` along the segment from `from` to
/// `to`, linearly interpolating between the two pointer samples. Paint
/// accumulates `a += flow * (255 - a)` per splat so repeated passes
/// approach opaque without overshooting; erase runs the mirrored rule
/// `a -= flow * a` toward zero.
pub fn rasterize_stroke(
    alpha: &mut [u8],
    width: usize,
    height: usize,
    brush: &Brush,
    from: (f32, f32),
    to: (f32, f32),
) -> Result<(), RenderError> {
    if width == 0 || height == 0 {
        return Err(RenderError::InvalidDimensions {
            width,
            height,
            len: alpha.len(),
        });
    }
    if alpha.len() != width * height {
        return Err(RenderError::MaskShapeMismatch {
            expected: width * height,
            actual: alpha.len(),
        });
    }

    let radius = (brush.size / 2.0).max(0.5);
    let hardness = brush.hardness.clamp(0.0, 1.0);
    let flow = brush.flow.clamp(0.0, 1.0);

    let dx = to.0 - from.0;
    let dy = to.1 - from.1;
    let length = (dx * dx + dy * dy).sqrt();

    // Splat spacing of half the radius keeps the deposited ribbon even;
    // a zero-length segment still gets its single dab.
    let spacing = (radius * 0.5).max(1.0);
    let steps = (length / spacing).ceil() as usize;

    for step in 0..=steps {
        let t = if steps == 0 {
            0.0
        } else {
            step as f32 / steps as f32
        };
        let cx = from.0 + dx * t;
        let cy = from.1 + dy * t;
        splat(alpha, width, height, cx, cy, radius, hardness, flow, brush.mode);
    }

    Ok(())
}

/// Deposit one disk of coverage centered at (cx, cy).
#[allow(clippy::too_many_arguments)]
fn splat(
    alpha: &mut [u8],
    width: usize,
    height: usize,
    cx: f32,
    cy: f32,
    radius: f32,
    hardness: f32,
    flow: f32,
    mode: BrushMode,
) {
    let x_min = ((cx - radius).floor().max(0.0)) as usize;
    let y_min = ((cy - radius).floor().max(0.0)) as usize;
    let x_max = ((cx + radius).ceil() as usize).min(width.saturating_sub(1));
    let y_max = ((cy + radius).ceil() as usize).min(height.saturating_sub(1));

    for y in y_min..=y_max {
        let row = y * width;
        for x in x_min..=x_max {
            let dx = x as f32 - cx;
            let dy = y as f32 - cy;
            let t = (dx * dx + dy * dy).sqrt() / radius;
            if t > 1.0 {
                continue;
            }

            // Full strength inside the hard core, Gaussian-like rolloff
            // across the soft rim.
            let strength = if t <= hardness || hardness >= 1.0 {
                1.0
            } else {
                let edge = (t - hardness) / (1.0 - hardness);
                (-4.0 * edge * edge).exp()
            };

            let a = alpha[row + x] as f32;
            let deposit = flow * strength;
            let next = match mode {
                BrushMode::Paint => a + deposit * (255.0 - a),
                BrushMode::Erase => a - deposit * a,
            };
            alpha[row + x] = next.clamp(0.0, 255.0).round() as u8;
        }
    }
}
