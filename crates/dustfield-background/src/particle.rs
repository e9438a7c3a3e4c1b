//! A single dust mote.

use std::ops::{Range, RangeInclusive};

use dustfield_core::{DustPalette, Rgb, Surface, Viewport};
use rand::Rng;
use rand::seq::IndexedRandom;

/// Side length of a mote, in virtual pixels.
pub const SIZE_RANGE: RangeInclusive<f32> = 1.0..=3.0;
/// Horizontal drift per tick.
pub const SPEED_X_RANGE: RangeInclusive<f32> = -0.2..=0.2;
/// Vertical drift per tick. Positive values move the mote up the screen.
pub const SPEED_Y_RANGE: RangeInclusive<f32> = -0.2..=0.3;
/// Ticks a mote lives before it respawns.
pub const LIFE_RANGE: RangeInclusive<i32> = 100..=200;
/// Opacity change per tick while fading in or out.
pub const FADE_SPEED_RANGE: Range<f32> = 0.002..0.007;
/// Highest opacity a mote ever reaches.
pub const OPACITY_CAP: f32 = 0.5;
/// Remaining life below which a mote starts fading out.
pub const FADE_OUT_LIFE: i32 = 50;

/// State of one dust mote.
#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Identity assigned at construction; kept across resets.
    pub id: u64,
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub speed_x: f32,
    pub speed_y: f32,
    /// Ticks left before the mote expires.
    pub life: i32,
    pub opacity: f32,
    pub fade_speed: f32,
    pub color: Rgb,
}

impl Particle {
    /// Create a mote with freshly randomized attributes.
    pub fn spawn<R: Rng>(id: u64, viewport: Viewport, palette: DustPalette, rng: &mut R) -> Self {
        let mut particle = Self {
            id,
            x: 0.0,
            y: 0.0,
            size: 0.0,
            speed_x: 0.0,
            speed_y: 0.0,
            life: 0,
            opacity: 0.0,
            fade_speed: 0.0,
            color: Rgb::default(),
        };
        particle.reset(viewport, palette, rng);
        particle
    }

    /// Re-randomize every attribute except the id.
    pub fn reset<R: Rng>(&mut self, viewport: Viewport, palette: DustPalette, rng: &mut R) {
        self.x = rng.random_range(0.0..=viewport.width.max(0.0));
        self.y = rng.random_range(0.0..=viewport.height.max(0.0));
        self.size = rng.random_range(SIZE_RANGE);
        self.speed_x = rng.random_range(SPEED_X_RANGE);
        self.speed_y = rng.random_range(SPEED_Y_RANGE);
        self.life = rng.random_range(LIFE_RANGE);
        self.opacity = rng.random_range(0.0..=OPACITY_CAP);
        self.fade_speed = rng.random_range(FADE_SPEED_RANGE);
        self.color = palette
            .colors()
            .choose(rng)
            .copied()
            .unwrap_or_default();
    }

    /// Reset an expired mote. Half of all respawns put it on the bottom
    /// edge so the field visibly replenishes from below.
    pub fn respawn<R: Rng>(&mut self, viewport: Viewport, palette: DustPalette, rng: &mut R) {
        self.reset(viewport, palette, rng);
        if rng.random_bool(0.5) {
            self.y = viewport.height.max(0.0);
        }
    }

    /// Advance one tick. Returns `true` if the mote expired and was reset.
    pub fn update<R: Rng>(
        &mut self,
        viewport: Viewport,
        palette: DustPalette,
        rng: &mut R,
    ) -> bool {
        self.x += self.speed_x;
        self.y -= self.speed_y;
        self.life -= 1;

        if self.life < FADE_OUT_LIFE {
            self.opacity -= self.fade_speed;
        } else if self.opacity < OPACITY_CAP {
            self.opacity = (self.opacity + self.fade_speed).min(OPACITY_CAP);
        }

        if self.is_expired(viewport) {
            self.respawn(viewport, palette, rng);
            return true;
        }
        false
    }

    /// Out of life, faded out, or outside the viewport.
    pub fn is_expired(&self, viewport: Viewport) -> bool {
        self.life <= 0 || self.opacity <= 0.0 || !viewport.contains(self.x, self.y)
    }

    /// Paint the mote as a filled square.
    pub fn draw<S: Surface + ?Sized>(&self, surface: &mut S) {
        surface.fill_rect(
            self.x,
            self.y,
            self.size,
            self.size,
            self.color.with_alpha(self.opacity),
        );
    }
}
