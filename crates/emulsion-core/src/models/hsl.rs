//! Six-band selective HSL mixer.
//!
//! Adjusts hue, saturation, and luminance for six color ranges centered on
//! the primaries and secondaries:
//! - red (0), yellow (60), green (120), cyan (180), blue (240), magenta (300)
//!
//! Each band's influence falls off smoothly over 45 degrees of hue
//! distance; the red band relies on wrap-aware distance to cover both
//! sides of the 0/360 seam.

use serde::{Deserialize, Serialize};

use super::adjustments::clamp_report;

/// Hue centers for the six bands, in band order.
pub const BAND_CENTERS: [f32; 6] = [0.0, 60.0, 120.0, 180.0, 240.0, 300.0];

/// Falloff range around each band center, in degrees.
pub const BAND_RANGE: f32 = 45.0;

/// One mixer band.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct HslBand {
    /// Hue shift in degrees, -30..=30
    #[serde(default)]
    pub hue: f32,

    /// Saturation adjustment, -100..=100
    #[serde(default)]
    pub saturation: f32,

    /// Luminance adjustment, -100..=100
    #[serde(default)]
    pub luminance: f32,
}

impl HslBand {
    pub fn is_neutral(&self) -> bool {
        self.hue == 0.0 && self.saturation == 0.0 && self.luminance == 0.0
    }
}

/// The six mixer bands, indexed in `BAND_CENTERS` order.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct HslMixer {
    #[serde(default)]
    pub red: HslBand,

    #[serde(default)]
    pub yellow: HslBand,

    #[serde(default)]
    pub green: HslBand,

    #[serde(default)]
    pub cyan: HslBand,

    #[serde(default)]
    pub blue: HslBand,

    #[serde(default)]
    pub magenta: HslBand,
}

impl HslMixer {
    /// Bands in `BAND_CENTERS` order, for the per-pixel accumulation loop.
    #[inline]
    pub fn bands(&self) -> [&HslBand; 6] {
        [
            &self.red,
            &self.yellow,
            &self.green,
            &self.cyan,
            &self.blue,
            &self.magenta,
        ]
    }

    /// True when every band is at rest, letting the pixel loop skip the
    /// HSL round-trip entirely.
    pub fn is_neutral(&self) -> bool {
        self.bands().iter().all(|b| b.is_neutral())
    }

    pub(crate) fn clamped(&self) -> Self {
        let mut m = *self;
        for band in [
            &mut m.red,
            &mut m.yellow,
            &mut m.green,
            &mut m.cyan,
            &mut m.blue,
            &mut m.magenta,
        ] {
            clamp_report(&mut band.hue, -30.0, 30.0, "hsl.hue");
            clamp_report(&mut band.saturation, -100.0, 100.0, "hsl.saturation");
            clamp_report(&mut band.luminance, -100.0, 100.0, "hsl.luminance");
        }
        m
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mixer_is_neutral() {
        assert!(HslMixer::default().is_neutral());
    }

    #[test]
    fn test_bands_order_matches_centers() {
        let mut m = HslMixer::default();
        m.cyan.saturation = 50.0;
        // cyan sits at index 3, center 180
        assert_eq!(BAND_CENTERS[3], 180.0);
        assert_eq!(m.bands()[3].saturation, 50.0);
    }
}
