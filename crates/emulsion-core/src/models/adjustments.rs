//! Global adjustment sliders: tone, texture, white balance, and the full
//! per-render snapshot.

use serde::{Deserialize, Serialize};

use super::{ColorGrading, FilmStock, HslMixer};
use crate::verbose_println;

/// Global tone sliders, all -100..=100.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct ToneAdjustments {
    /// Brightness offset added to every channel
    #[serde(default)]
    pub brightness: f32,

    /// Contrast around the 128 pivot (259-formula)
    #[serde(default)]
    pub contrast: f32,

    /// Saturation scale around per-pixel luma
    #[serde(default)]
    pub saturation: f32,

    /// Highlight recovery/boost, weighted above mid-grey
    #[serde(default)]
    pub highlights: f32,

    /// Shadow lift/crush, weighted below white
    #[serde(default)]
    pub shadows: f32,
}

impl ToneAdjustments {
    /// True when every slider is at rest and the tone stage can be skipped.
    pub fn is_neutral(&self) -> bool {
        self.brightness == 0.0
            && self.contrast == 0.0
            && self.saturation == 0.0
            && self.highlights == 0.0
            && self.shadows == 0.0
    }
}

/// Texture sliders: grain, sharpening, vignette, and the halation strength
/// that the engine carries for the host's bloom composite.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextureAdjustments {
    /// Grain strength, 0..=100
    #[serde(default)]
    pub grain_amount: f32,

    /// Grain block size in pixels, 1..=5
    #[serde(default = "default_grain_size")]
    pub grain_size: u32,

    /// Smart-sharpen strength, 0..=100
    #[serde(default)]
    pub sharpening: f32,

    /// Vignette strength, 0..=100
    #[serde(default)]
    pub vignette: f32,

    /// Halation strength, 0..=100. Not evaluated here; the host performs
    /// the blur/screen composite after the render returns.
    #[serde(default)]
    pub halation: f32,
}

fn default_grain_size() -> u32 {
    1
}

impl Default for TextureAdjustments {
    fn default() -> Self {
        Self {
            grain_amount: 0.0,
            grain_size: 1,
            sharpening: 0.0,
            vignette: 0.0,
            halation: 0.0,
        }
    }
}

/// White balance as independent channel gains.
///
/// Temperature drives red against blue, tint drives green. There is no
/// luminance renormalization; warming a frame brightens it slightly, as
/// the reference pipeline does.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct WhiteBalance {
    /// Temperature, -50..=50. Positive is warmer.
    #[serde(default)]
    pub temp: f32,

    /// Tint, -50..=50. Positive shifts toward magenta.
    #[serde(default)]
    pub tint: f32,
}

impl WhiteBalance {
    /// Per-channel gains (r, g, b) for this temperature/tint pair.
    #[inline]
    pub fn gains(&self) -> (f32, f32, f32) {
        let t = self.temp / 100.0;
        let tn = self.tint / 100.0;
        (1.0 + t, 1.0 - tn, 1.0 - t)
    }

    pub fn is_neutral(&self) -> bool {
        self.temp == 0.0 && self.tint == 0.0
    }
}

/// The full slider snapshot passed by value into every render.
///
/// The host owns the mutable state; the engine only ever sees an immutable
/// clone, so a render is atomic with respect to slider drags. The same
/// struct serializes as a grade preset (see `presets`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Adjustments {
    /// Film stock emulation baked into the LUT
    #[serde(default)]
    pub film: FilmStock,

    /// White balance baked into the LUT
    #[serde(default)]
    pub white_balance: WhiteBalance,

    /// Split-tone grading baked into the LUT
    #[serde(default)]
    pub grading: ColorGrading,

    /// Global tone sliders, applied per pixel before the LUT sample
    #[serde(default)]
    pub tone: ToneAdjustments,

    /// Six-band selective HSL, applied per pixel before tone
    #[serde(default)]
    pub hsl: HslMixer,

    /// Grain / sharpen / vignette / halation
    #[serde(default)]
    pub texture: TextureAdjustments,

    /// Final mix between pre-LUT and post-LUT color, 0..=1
    #[serde(default)]
    pub intensity: f32,
}

impl Adjustments {
    /// Clamp every slider into its documented range.
    ///
    /// Out-of-range input is not an error: the engine normalizes and keeps
    /// going, reporting what it touched on the debug channel.
    pub fn clamped(&self) -> Self {
        let mut adj = self.clone();

        clamp_report(&mut adj.tone.brightness, -100.0, 100.0, "brightness");
        clamp_report(&mut adj.tone.contrast, -100.0, 100.0, "contrast");
        clamp_report(&mut adj.tone.saturation, -100.0, 100.0, "saturation");
        clamp_report(&mut adj.tone.highlights, -100.0, 100.0, "highlights");
        clamp_report(&mut adj.tone.shadows, -100.0, 100.0, "shadows");

        clamp_report(&mut adj.texture.grain_amount, 0.0, 100.0, "grain_amount");
        clamp_report(&mut adj.texture.sharpening, 0.0, 100.0, "sharpening");
        clamp_report(&mut adj.texture.vignette, 0.0, 100.0, "vignette");
        clamp_report(&mut adj.texture.halation, 0.0, 100.0, "halation");
        if !(1..=5).contains(&adj.texture.grain_size) {
            verbose_println!(
                "[adjust] grain_size {} clamped into 1..=5",
                adj.texture.grain_size
            );
            adj.texture.grain_size = adj.texture.grain_size.clamp(1, 5);
        }

        clamp_report(&mut adj.white_balance.temp, -50.0, 50.0, "wb.temp");
        clamp_report(&mut adj.white_balance.tint, -50.0, 50.0, "wb.tint");

        adj.grading = adj.grading.clamped();
        adj.hsl = adj.hsl.clamped();

        clamp_report(&mut adj.intensity, 0.0, 1.0, "intensity");

        adj
    }
}

pub(crate) fn clamp_report(value: &mut f32, lo: f32, hi: f32, name: &str) {
    if !value.is_finite() {
        verbose_println!("[adjust] {} was not finite, reset to {}", name, lo);
        *value = lo;
        return;
    }
    let clamped = value.clamp(lo, hi);
    if clamped != *value {
        verbose_println!("[adjust] {} {} clamped into {}..={}", name, value, lo, hi);
        *value = clamped;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_snapshot_is_neutral() {
        let adj = Adjustments::default();
        assert!(adj.tone.is_neutral());
        assert!(adj.white_balance.is_neutral());
        assert_eq!(adj.intensity, 0.0);
        assert_eq!(adj.texture.grain_size, 1);
    }

    #[test]
    fn test_clamped_pulls_sliders_into_range() {
        let mut adj = Adjustments::default();
        adj.tone.brightness = 250.0;
        adj.texture.grain_size = 9;
        adj.white_balance.temp = -80.0;
        adj.intensity = 1.5;

        let adj = adj.clamped();
        assert_eq!(adj.tone.brightness, 100.0);
        assert_eq!(adj.texture.grain_size, 5);
        assert_eq!(adj.white_balance.temp, -50.0);
        assert_eq!(adj.intensity, 1.0);
    }

    #[test]
    fn test_wb_gains_direction() {
        let wb = WhiteBalance {
            temp: 50.0,
            tint: -20.0,
        };
        let (r, g, b) = wb.gains();
        assert!(r > 1.0, "warm temp must raise red");
        assert!(b < 1.0, "warm temp must lower blue");
        assert!(g > 1.0, "negative tint must raise green");
    }

    #[test]
    fn test_preset_round_trip_yaml() {
        let mut adj = Adjustments::default();
        adj.film = FilmStock::Velvia;
        adj.tone.contrast = 25.0;
        adj.intensity = 0.8;

        let yaml = serde_yaml::to_string(&adj).expect("serialize");
        let back: Adjustments = serde_yaml::from_str(&yaml).expect("deserialize");
        assert_eq!(adj, back);
    }

    #[test]
    fn test_partial_preset_uses_defaults() {
        let adj: Adjustments = serde_yaml::from_str("film: Provia\nintensity: 1.0\n").unwrap();
        assert_eq!(adj.film, FilmStock::Provia);
        assert_eq!(adj.intensity, 1.0);
        assert!(adj.tone.is_neutral(), "omitted sections default to neutral");
    }
}
