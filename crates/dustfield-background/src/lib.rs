//! Animated dust particle background.
//!
//! [`ParticleField`] owns a fixed-size population of drifting particles and
//! advances it one frame per [`ParticleField::tick`]. It paints through the
//! [`dustfield_core::Surface`] trait, so the same field can be driven by a
//! terminal ([`CellCanvas`]), any other drawing target, or a test calling
//! `tick` by hand.

mod canvas;
mod chars;
mod color;
mod field;
mod particle;

pub use canvas::{CELL_HEIGHT_PX, CELL_WIDTH_PX, CellCanvas};
pub use color::to_color;
pub use field::{FieldOptions, ParticleField, TickStats, particle_count_for};
pub use particle::{
    FADE_OUT_LIFE, FADE_SPEED_RANGE, LIFE_RANGE, OPACITY_CAP, Particle, SIZE_RANGE,
    SPEED_X_RANGE, SPEED_Y_RANGE,
};
