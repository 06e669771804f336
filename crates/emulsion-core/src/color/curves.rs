//! Tone curves: the normalized logistic S-curve used by film emulation and
//! the 259-formula contrast factor used by the global tone stage.

/// A logistic S-curve renormalized so that 0 maps to 0 and 1 maps to 1.
///
/// `k` controls steepness (film stocks use 3.5-6.5), `x0` the midpoint
/// (0.5 for every stock except Classic Chrome's crushed-shadow 0.55).
///
/// The normalization constants depend only on (k, x0), so the curve is
/// built once per LUT synthesis and evaluated 32^3 times.
#[derive(Debug, Clone, Copy)]
pub struct SCurve {
    k: f32,
    x0: f32,
    sig_0: f32,
    inv_range: f32,
}

impl SCurve {
    /// Build a curve with the given steepness and a 0.5 midpoint.
    pub fn new(k: f32) -> Self {
        Self::with_midpoint(k, 0.5)
    }

    /// Build a curve with an explicit midpoint.
    pub fn with_midpoint(k: f32, x0: f32) -> Self {
        let sig_0 = logistic(0.0, k, x0);
        let sig_1 = logistic(1.0, k, x0);
        Self {
            k,
            x0,
            sig_0,
            inv_range: 1.0 / (sig_1 - sig_0),
        }
    }

    /// Evaluate the curve at `x` in [0, 1].
    #[inline]
    pub fn apply(&self, x: f32) -> f32 {
        (logistic(x, self.k, self.x0) - self.sig_0) * self.inv_range
    }
}

#[inline]
fn logistic(x: f32, k: f32, x0: f32) -> f32 {
    1.0 / (1.0 + (-k * (x - x0)).exp())
}

/// One-off normalized S-curve evaluation, midpoint 0.5.
#[inline]
pub fn s_curve(x: f32, k: f32) -> f32 {
    SCurve::new(k).apply(x)
}

/// Contrast factor for the slider range -100..=100, applied around the
/// 128 pivot as `y = k * (x - 128) + 128`.
///
/// This is the classic 259-formula: c = -100 collapses everything onto the
/// pivot, c = +100 maps (0, 128, 255) to (clipped, 128, clipped).
#[inline]
pub fn contrast_factor(c: f32) -> f32 {
    259.0 * (c + 255.0) / (255.0 * (259.0 - c))
}
