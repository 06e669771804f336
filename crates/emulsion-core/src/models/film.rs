//! The film stock catalogue.
//!
//! Each stock is a 3x3 channel matrix (spectral crosstalk) followed by a
//! per-channel S-curve, with a few stocks adding a post step of their own.
//! The numbers are contracts: the LUT synthesizer must reproduce them
//! within one LSB at the grid corners, so they live here as data rather
//! than inline in the synthesis loop.

use serde::{Deserialize, Serialize};

use crate::color::SCurve;

/// Film stock selection.
///
/// Dispatch is a plain `match`; every variant's recipe is static data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FilmStock {
    /// Pass-through: no matrix, no curve. The identity stock.
    #[default]
    None,

    /// Standard reference: neutral color, moderate S-curve
    Provia,

    /// Vivid: strong saturation matrix, steep curve
    Velvia,

    /// Soft color with protected skin tones
    Astia,

    /// Muted color, crushed shadows (curve midpoint shifted to 0.55)
    ClassicChrome,

    /// Retro negative look with a luma-conditional red/blue split
    ClassicNeg,

    /// Faded warmth, amber highlights
    NostalgicNeg,

    /// Punchy but neutral color
    RealaAce,

    /// Flat cinematic profile with lifted blacks
    Eterna,

    /// Black and white, neutral filter
    AcrosNeutral,

    /// Black and white, yellow filter (darkened skies)
    AcrosYellow,

    /// Black and white, red filter (dramatic skies)
    AcrosRed,

    /// Black and white, green filter (lightened foliage)
    AcrosGreen,

    /// Antique sepia tone, matrix only
    Sepia,
}

impl FilmStock {
    /// The channel-crosstalk matrix for this stock, row-major, or `None`
    /// for stocks that leave channels independent.
    pub fn matrix(&self) -> Option<&'static [[f32; 3]; 3]> {
        match self {
            Self::Velvia => Some(&[
                [1.15, -0.05, -0.10],
                [-0.05, 1.15, -0.10],
                [-0.10, -0.10, 1.20],
            ]),
            Self::Astia => Some(&[
                [1.05, 0.05, -0.10],
                [0.0, 1.0, 0.0],
                [-0.05, 0.0, 1.05],
            ]),
            Self::ClassicChrome => Some(&[
                [0.75, 0.20, 0.05],
                [0.10, 0.85, 0.05],
                [0.0, 0.10, 0.90],
            ]),
            Self::ClassicNeg => Some(&[
                [0.95, 0.05, 0.0],
                [0.0, 1.05, 0.0],
                [0.0, 0.10, 0.90],
            ]),
            Self::NostalgicNeg => Some(&[
                [1.10, 0.10, -0.20],
                [0.05, 0.95, 0.0],
                [-0.10, 0.10, 1.00],
            ]),
            Self::RealaAce => Some(&[
                [1.05, 0.0, -0.05],
                [-0.02, 1.04, -0.02],
                [-0.05, 0.0, 1.05],
            ]),
            Self::Eterna => Some(&[
                [0.90, 0.10, 0.0],
                [0.05, 0.90, 0.05],
                [0.0, 0.10, 0.90],
            ]),
            Self::Sepia => Some(&[
                [0.393, 0.769, 0.189],
                [0.349, 0.686, 0.168],
                [0.272, 0.534, 0.131],
            ]),
            // Provia is the identity matrix; None and the Acros mixes
            // have no crosstalk matrix at all.
            _ => None,
        }
    }

    /// The tone curve for this stock, or `None` for pass-through and Sepia.
    pub fn curve(&self) -> Option<SCurve> {
        match self {
            Self::None | Self::Sepia => None,
            Self::Provia | Self::Astia | Self::NostalgicNeg | Self::RealaAce => {
                Some(SCurve::new(4.5))
            }
            Self::Velvia => Some(SCurve::new(6.5)),
            Self::ClassicChrome => Some(SCurve::with_midpoint(5.5, 0.55)),
            Self::ClassicNeg => Some(SCurve::new(6.0)),
            Self::Eterna => Some(SCurve::new(3.5)),
            Self::AcrosNeutral | Self::AcrosYellow | Self::AcrosRed | Self::AcrosGreen => {
                Some(SCurve::new(5.0))
            }
        }
    }

    /// The B&W channel mix for the Acros family, `None` for color stocks.
    pub fn monochrome_mix(&self) -> Option<[f32; 3]> {
        match self {
            Self::AcrosNeutral => Some([0.30, 0.60, 0.10]),
            Self::AcrosYellow => Some([0.40, 0.55, 0.05]),
            Self::AcrosRed => Some([0.50, 0.45, 0.05]),
            Self::AcrosGreen => Some([0.20, 0.70, 0.10]),
            _ => None,
        }
    }

    /// True for the pass-through stock used by identity renders.
    pub fn is_pass_through(&self) -> bool {
        matches!(self, Self::None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pass_through_has_no_recipe() {
        assert!(FilmStock::None.matrix().is_none());
        assert!(FilmStock::None.curve().is_none());
        assert!(FilmStock::None.monochrome_mix().is_none());
    }

    #[test]
    fn test_sepia_has_matrix_but_no_curve() {
        assert!(FilmStock::Sepia.matrix().is_some());
        assert!(FilmStock::Sepia.curve().is_none());
    }

    #[test]
    fn test_acros_mixes_sum_to_one() {
        for stock in [
            FilmStock::AcrosNeutral,
            FilmStock::AcrosYellow,
            FilmStock::AcrosRed,
            FilmStock::AcrosGreen,
        ] {
            let mix = stock.monochrome_mix().expect("acros has a mix");
            let sum: f32 = mix.iter().sum();
            assert!(
                (sum - 1.0).abs() < 1e-6,
                "{:?} mix must sum to 1, got {}",
                stock,
                sum
            );
        }
    }

    #[test]
    fn test_serde_names_are_stable() {
        let yaml = serde_yaml::to_string(&FilmStock::ClassicChrome).unwrap();
        assert_eq!(yaml.trim(), "ClassicChrome");
    }
}
