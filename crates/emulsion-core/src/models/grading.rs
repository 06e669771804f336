//! Split-tone color grading: independent tints for shadows, midtones,
//! and highlights.

use serde::{Deserialize, Serialize};

use super::adjustments::clamp_report;

/// One grading band: a hue angle and a strength.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct GradingBand {
    /// Tint hue in degrees, 0..360
    #[serde(default)]
    pub hue: f32,

    /// Tint strength, 0..=100. Zero disables the band.
    #[serde(default)]
    pub saturation: f32,
}

impl GradingBand {
    pub fn is_neutral(&self) -> bool {
        self.saturation <= 0.0
    }
}

/// The three grading bands, applied shadows first, then midtones, then
/// highlights. Band masks overlap deliberately so adjacent tints blend
/// instead of posterizing at the luma boundaries.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct ColorGrading {
    #[serde(default)]
    pub shadows: GradingBand,

    #[serde(default)]
    pub midtones: GradingBand,

    #[serde(default)]
    pub highlights: GradingBand,
}

impl ColorGrading {
    /// True when no band carries any tint.
    pub fn is_neutral(&self) -> bool {
        self.shadows.is_neutral() && self.midtones.is_neutral() && self.highlights.is_neutral()
    }

    pub(crate) fn clamped(&self) -> Self {
        let mut g = *self;
        for (band, name) in [
            (&mut g.shadows, "grading.shadows"),
            (&mut g.midtones, "grading.midtones"),
            (&mut g.highlights, "grading.highlights"),
        ] {
            band.hue = band.hue.rem_euclid(360.0);
            clamp_report(&mut band.saturation, 0.0, 100.0, name);
        }
        g
    }
}
