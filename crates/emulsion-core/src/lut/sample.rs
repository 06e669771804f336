//! Trilinear LUT sampling.
//!
//! Nearest-neighbor indexing posterizes smooth gradients, so sampling is
//! always the full 8-corner fetch with seven lerps per channel: along R,
//! then G, then B.

use crate::color::lerp;

use super::Lut3D;

impl Lut3D {
    /// Sample the table at an RGB point in the 0..=255 domain.
    ///
    /// Exactly at a grid corner this returns the corner's stored value;
    /// between corners it interpolates linearly along each axis.
    #[inline]
    pub fn sample_trilinear(&self, r: f32, g: f32, b: f32) -> (f32, f32, f32) {
        let max_index = (self.size() - 1) as f32;
        let scale = max_index / 255.0;

        let rp = (r * scale).clamp(0.0, max_index);
        let gp = (g * scale).clamp(0.0, max_index);
        let bp = (b * scale).clamp(0.0, max_index);

        let r0 = rp.floor() as usize;
        let g0 = gp.floor() as usize;
        let b0 = bp.floor() as usize;
        let r1 = (r0 + 1).min(self.size() - 1);
        let g1 = (g0 + 1).min(self.size() - 1);
        let b1 = (b0 + 1).min(self.size() - 1);

        let fr = rp - r0 as f32;
        let fg = gp - g0 as f32;
        let fb = bp - b0 as f32;

        let c000 = self.corner(r0, g0, b0);
        let c100 = self.corner(r1, g0, b0);
        let c010 = self.corner(r0, g1, b0);
        let c110 = self.corner(r1, g1, b0);
        let c001 = self.corner(r0, g0, b1);
        let c101 = self.corner(r1, g0, b1);
        let c011 = self.corner(r0, g1, b1);
        let c111 = self.corner(r1, g1, b1);

        // Collapse along R, then G, then B
        let c00 = lerp3(c000, c100, fr);
        let c10 = lerp3(c010, c110, fr);
        let c01 = lerp3(c001, c101, fr);
        let c11 = lerp3(c011, c111, fr);

        let c0 = lerp3(c00, c10, fg);
        let c1 = lerp3(c01, c11, fg);

        lerp3(c0, c1, fb)
    }
}

#[inline]
fn lerp3(a: (f32, f32, f32), b: (f32, f32, f32), t: f32) -> (f32, f32, f32) {
    (lerp(a.0, b.0, t), lerp(a.1, b.1, t), lerp(a.2, b.2, t))
}
