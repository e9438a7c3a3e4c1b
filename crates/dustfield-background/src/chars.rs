//! Character constants for dust rendering.

/// Glyphs for small, medium and large motes.
pub const DUST_CHARS: [char; 3] = ['·', '•', '■'];
