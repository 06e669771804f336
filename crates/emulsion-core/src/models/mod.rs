//! Data model for the grading engine.
//!
//! Everything a render consumes is an immutable snapshot built from these
//! types: the slider state (`Adjustments`), the film catalogue
//! (`FilmStock`), split-tone grading, the six-band HSL mixer, and local
//! mask layers. All of it serializes, so a snapshot doubles as a preset.

mod adjustments;
mod film;
mod grading;
mod hsl;
mod local;

pub use adjustments::{Adjustments, TextureAdjustments, ToneAdjustments, WhiteBalance};
pub use film::FilmStock;
pub use grading::{ColorGrading, GradingBand};
pub use hsl::{HslBand, HslMixer, BAND_CENTERS, BAND_RANGE};
pub use local::{LocalAdjustments, MaskLayer};
