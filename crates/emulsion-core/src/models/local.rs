//! Mask layers and the local adjustments they carry.

use serde::{Deserialize, Serialize};

use super::adjustments::clamp_report;

/// Adjustments applied inside a mask, all -100..=100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct LocalAdjustments {
    /// Exposure in third-stop-ish units: gain = 2^(exposure/33)
    #[serde(default)]
    pub exposure: f32,

    /// Contrast around the 128 pivot (same 259-formula as global tone)
    #[serde(default)]
    pub contrast: f32,

    /// Saturation scale around per-pixel luma
    #[serde(default)]
    pub saturation: f32,

    /// Temperature as red/blue gain split
    #[serde(default)]
    pub temperature: f32,

    /// Tint as green gain
    #[serde(default)]
    pub tint: f32,

    /// Carried for the host contract; the per-pixel compositor has no
    /// neighbourhood access, so sharpness is not evaluated here.
    #[serde(default)]
    pub sharpness: f32,
}

impl LocalAdjustments {
    /// True when the mask would not change any pixel it covers.
    pub fn is_neutral(&self) -> bool {
        self.exposure == 0.0
            && self.contrast == 0.0
            && self.saturation == 0.0
            && self.temperature == 0.0
            && self.tint == 0.0
    }

    /// Clamp every slider into -100..=100, reporting on the debug
    /// channel. Same policy as the global records: out-of-range local
    /// values never fail a render and never reach the pixel math.
    pub fn clamped(&self) -> Self {
        let mut adj = *self;
        clamp_report(&mut adj.exposure, -100.0, 100.0, "local.exposure");
        clamp_report(&mut adj.contrast, -100.0, 100.0, "local.contrast");
        clamp_report(&mut adj.saturation, -100.0, 100.0, "local.saturation");
        clamp_report(&mut adj.temperature, -100.0, 100.0, "local.temperature");
        clamp_report(&mut adj.tint, -100.0, 100.0, "local.tint");
        clamp_report(&mut adj.sharpness, -100.0, 100.0, "local.sharpness");
        adj
    }
}

/// An alpha-only mask layer owned by the host.
///
/// The engine treats the alpha buffer as read-only during a render; the
/// brush rasterizer mutates it between renders. Alpha is authoritative: a
/// zero-alpha pixel is untouched no matter the opacity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaskLayer {
    /// Host-assigned identifier
    pub id: u32,

    /// Hidden masks are skipped without touching their alpha
    #[serde(default = "default_visible")]
    pub visible: bool,

    /// Layer opacity, 0..=1, multiplied into the alpha-derived weight
    #[serde(default = "default_opacity")]
    pub opacity: f32,

    /// One byte of coverage per pixel, length w*h
    #[serde(default)]
    pub alpha: Vec<u8>,

    /// The adjustments this mask paints in
    #[serde(default)]
    pub adjustments: LocalAdjustments,
}

fn default_visible() -> bool {
    true
}

fn default_opacity() -> f32 {
    1.0
}

impl MaskLayer {
    /// A fresh, fully transparent mask sized for a w*h image.
    pub fn new(id: u32, width: usize, height: usize) -> Self {
        Self {
            id,
            visible: true,
            opacity: 1.0,
            alpha: vec![0; width * height],
            adjustments: LocalAdjustments::default(),
        }
    }

    /// True when the render loop can skip this mask wholesale.
    pub fn is_inert(&self) -> bool {
        !self.visible || self.opacity <= 0.0 || self.adjustments.is_neutral()
    }
}
