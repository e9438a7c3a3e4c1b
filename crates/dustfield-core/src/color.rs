//! Colors and dust palettes.

use serde::{Deserialize, Serialize};

/// An opaque 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    /// Attach an opacity, clamped to [0, 1].
    pub fn with_alpha(self, alpha: f32) -> Rgba {
        Rgba {
            rgb: self,
            alpha: alpha.clamp(0.0, 1.0),
        }
    }
}

/// A color with straight (non-premultiplied) alpha.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgba {
    pub rgb: Rgb,
    pub alpha: f32,
}

impl Rgba {
    /// Composite this color over an opaque background.
    pub fn over(self, background: Rgb) -> Rgb {
        let mix = |fg: u8, bg: u8| -> u8 {
            let value = fg as f32 * self.alpha + bg as f32 * (1.0 - self.alpha);
            value.round().clamp(0.0, 255.0) as u8
        };
        Rgb(
            mix(self.rgb.0, background.0),
            mix(self.rgb.1, background.1),
            mix(self.rgb.2, background.2),
        )
    }
}

/// Fixed sets of dust colors a particle picks from on every reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DustPalette {
    /// Cyan, gold and blue.
    #[default]
    Tethys,
    Gold,
    Ember,
    Frost,
}

const TETHYS: &[Rgb] = &[Rgb(51, 235, 212), Rgb(212, 177, 6), Rgb(52, 152, 219)];
const GOLD: &[Rgb] = &[Rgb(212, 175, 55), Rgb(255, 215, 0), Rgb(255, 248, 220)];
const EMBER: &[Rgb] = &[Rgb(255, 140, 0), Rgb(255, 69, 0), Rgb(255, 200, 120)];
const FROST: &[Rgb] = &[Rgb(173, 216, 230), Rgb(135, 206, 250), Rgb(240, 248, 255)];

impl DustPalette {
    /// The colors in this palette. Never empty.
    pub fn colors(self) -> &'static [Rgb] {
        match self {
            DustPalette::Tethys => TETHYS,
            DustPalette::Gold => GOLD,
            DustPalette::Ember => EMBER,
            DustPalette::Frost => FROST,
        }
    }

    /// Get the next palette in the cycle.
    pub fn next(self) -> Self {
        match self {
            DustPalette::Tethys => DustPalette::Gold,
            DustPalette::Gold => DustPalette::Ember,
            DustPalette::Ember => DustPalette::Frost,
            DustPalette::Frost => DustPalette::Tethys,
        }
    }

    /// Short display name.
    pub fn name(self) -> &'static str {
        match self {
            DustPalette::Tethys => "tethys",
            DustPalette::Gold => "gold",
            DustPalette::Ember => "ember",
            DustPalette::Frost => "frost",
        }
    }
}
