//! Drawing surface abstraction.

use crate::Rgba;

/// Something the particle field can paint on.
///
/// Coordinates are virtual pixels with the origin at the top-left corner.
/// Implementations clip rectangles that fall partly or fully outside.
pub trait Surface {
    /// Erase everything drawn since the last clear.
    fn clear(&mut self);

    /// Fill an axis-aligned rectangle.
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Rgba);
}
