//! Conversion between dustfield colors and terminal colors.

use dustfield_core::Rgb;
use ratatui::style::Color;

/// Convert an RGB triple to a true-color terminal color.
pub fn to_color(rgb: Rgb) -> Color {
    Color::Rgb(rgb.0, rgb.1, rgb.2)
}
