//! Core types shared by the dustfield crates.
//!
//! Nothing in here knows about terminals or documents: the particle field,
//! the page model and the host binary all meet on these plain types.

mod color;
mod speed;
mod surface;
mod viewport;

pub use color::{DustPalette, Rgb, Rgba};
pub use speed::AnimationSpeed;
pub use surface::Surface;
pub use viewport::Viewport;
