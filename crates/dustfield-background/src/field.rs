//! Particle field state management.

use dustfield_core::{DustPalette, Surface, Viewport};
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::particle::Particle;

/// Settings that shape a field's population.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldOptions {
    /// Palette new and respawned particles pick colors from.
    pub palette: DustPalette,
    /// Square pixels of viewport per particle.
    pub density_divisor: f32,
}

impl Default for FieldOptions {
    fn default() -> Self {
        Self {
            palette: DustPalette::default(),
            density_divisor: 15_000.0,
        }
    }
}

/// Summary of one [`ParticleField::tick`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TickStats {
    /// Particles painted this frame.
    pub drawn: usize,
    /// Particles that expired and respawned this frame.
    pub respawned: usize,
}

/// Number of particles a viewport holds: `floor(area / divisor)`.
pub fn particle_count_for(viewport: Viewport, density_divisor: f32) -> usize {
    if density_divisor <= 0.0 {
        return 0;
    }
    (viewport.area() / density_divisor).floor() as usize
}

/// A fixed-size population of drifting dust particles.
#[derive(Debug)]
pub struct ParticleField {
    /// Current drawing area.
    viewport: Viewport,
    options: FieldOptions,
    particles: Vec<Particle>,
    rng: StdRng,
    /// Next id handed to a newly constructed particle.
    next_id: u64,
}

impl ParticleField {
    /// Create a field seeded from the operating system.
    pub fn new(viewport: Viewport, options: FieldOptions) -> Self {
        Self::with_rng(viewport, options, StdRng::from_os_rng())
    }

    /// Create a field with a fixed seed, for reproducible runs.
    pub fn with_seed(viewport: Viewport, options: FieldOptions, seed: u64) -> Self {
        Self::with_rng(viewport, options, StdRng::seed_from_u64(seed))
    }

    fn with_rng(viewport: Viewport, options: FieldOptions, rng: StdRng) -> Self {
        let mut field = Self {
            viewport,
            options,
            particles: Vec::new(),
            rng,
            next_id: 0,
        };
        field.populate();
        field
    }

    /// Rebuild the population from scratch for the current viewport.
    fn populate(&mut self) {
        let count = particle_count_for(self.viewport, self.options.density_divisor);
        let first_id = self.next_id;
        let viewport = self.viewport;
        let palette = self.options.palette;
        let rng = &mut self.rng;
        self.particles = (0..count as u64)
            .map(|offset| Particle::spawn(first_id + offset, viewport, palette, rng))
            .collect();
        self.next_id = first_id + count as u64;
        log::debug!(
            "populated {count} particles for {}x{}",
            self.viewport.width,
            self.viewport.height
        );
    }

    /// Current viewport.
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// The live population, in draw order.
    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Number of particles.
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// Whether the viewport is too small to hold any particle.
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Palette used by future respawns.
    pub fn palette(&self) -> DustPalette {
        self.options.palette
    }

    /// Switch palettes. Existing particles keep their color until they respawn.
    pub fn set_palette(&mut self, palette: DustPalette) {
        self.options.palette = palette;
    }

    /// Adopt new viewport dimensions.
    ///
    /// The whole population is discarded and rebuilt with a count derived
    /// from the new area; nothing carries over.
    pub fn resize(&mut self, viewport: Viewport) {
        if viewport == self.viewport {
            return;
        }
        self.viewport = viewport;
        self.populate();
    }

    /// Advance and paint one frame.
    ///
    /// Clears `surface`, then updates and draws each particle in turn. Hosts
    /// call this once per frame from whatever scheduler they have.
    pub fn tick<S: Surface + ?Sized>(&mut self, surface: &mut S) -> TickStats {
        surface.clear();

        let mut stats = TickStats::default();
        for particle in &mut self.particles {
            if particle.update(self.viewport, self.options.palette, &mut self.rng) {
                stats.respawned += 1;
            }
            particle.draw(surface);
            stats.drawn += 1;
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dustfield_core::Rgba;
    use pretty_assertions::assert_eq;

    use crate::particle::{LIFE_RANGE, OPACITY_CAP};

    /// Surface that remembers what it was asked to draw.
    #[derive(Debug, Default)]
    struct Recorder {
        clears: usize,
        rects: Vec<(f32, f32, f32, Rgba)>,
    }

    impl Surface for Recorder {
        fn clear(&mut self) {
            self.clears += 1;
            self.rects.clear();
        }

        fn fill_rect(&mut self, x: f32, y: f32, width: f32, _height: f32, color: Rgba) {
            self.rects.push((x, y, width, color));
        }
    }

    fn field(width: f32, height: f32, seed: u64) -> ParticleField {
        ParticleField::with_seed(Viewport::new(width, height), FieldOptions::default(), seed)
    }

    #[test]
    fn test_particle_count_for() {
        assert_eq!(particle_count_for(Viewport::new(1000.0, 1000.0), 15_000.0), 66);
        assert_eq!(particle_count_for(Viewport::new(1920.0, 1080.0), 15_000.0), 138);
        assert_eq!(particle_count_for(Viewport::new(100.0, 100.0), 15_000.0), 0);
        assert_eq!(particle_count_for(Viewport::new(1000.0, 1000.0), 0.0), 0);
    }

    #[test]
    fn test_new_field_population() {
        let field = field(1000.0, 1000.0, 1);
        assert_eq!(field.len(), 66);
        let ids: Vec<u64> = field.particles().iter().map(|p| p.id).collect();
        assert_eq!(ids, (0..66).collect::<Vec<_>>());
    }

    #[test]
    fn test_fresh_population_is_spread_over_the_viewport() {
        let mut field = field(1000.0, 1000.0, 1);
        let pinned = |field: &ParticleField| {
            field.particles().iter().filter(|p| p.y == 1000.0).count()
        };
        assert_eq!(pinned(&field), 0);

        field.resize(Viewport::new(1200.0, 1000.0));
        assert_eq!(field.len(), 80);
        assert_eq!(pinned(&field), 0);
    }

    #[test]
    fn test_tick_clears_then_draws_every_particle() {
        let mut field = field(1000.0, 1000.0, 2);
        let mut surface = Recorder::default();

        let stats = field.tick(&mut surface);
        assert_eq!(surface.clears, 1);
        assert_eq!(stats.drawn, 66);
        assert_eq!(surface.rects.len(), 66);

        field.tick(&mut surface);
        assert_eq!(surface.clears, 2);
        assert_eq!(surface.rects.len(), 66);
    }

    #[test]
    fn test_draws_use_post_update_state() {
        let mut field = field(1000.0, 1000.0, 3);
        let mut surface = Recorder::default();
        field.tick(&mut surface);

        for (particle, (x, y, size, color)) in field.particles().iter().zip(&surface.rects) {
            assert_eq!((particle.x, particle.y, particle.size), (*x, *y, *size));
            assert_eq!(color.alpha, particle.opacity);
            assert_eq!(color.rgb, particle.color);
        }
    }

    #[test]
    fn test_invariants_hold_over_many_ticks() {
        let mut field = field(640.0, 480.0, 4);
        let mut surface = Recorder::default();
        let viewport = field.viewport();

        for _ in 0..2_000 {
            field.tick(&mut surface);
            for particle in field.particles() {
                assert!(viewport.contains(particle.x, particle.y));
                assert!((0.0..=OPACITY_CAP).contains(&particle.opacity));
                assert!(particle.life > 0 && particle.life <= *LIFE_RANGE.end());
            }
            // Everything drawn this frame was inside the viewport.
            assert!(surface.rects.iter().all(|(x, y, _, _)| viewport.contains(*x, *y)));
        }
    }

    #[test]
    fn test_population_is_constant_across_ticks() {
        let mut field = field(800.0, 600.0, 5);
        let before: Vec<u64> = field.particles().iter().map(|p| p.id).collect();
        let mut surface = Recorder::default();

        let mut respawned = 0;
        for _ in 0..500 {
            respawned += field.tick(&mut surface).respawned;
        }

        let after: Vec<u64> = field.particles().iter().map(|p| p.id).collect();
        assert_eq!(after, before);
        assert!(respawned > 0, "500 ticks outlive every particle");
    }

    #[test]
    fn test_resize_rebuilds_population() {
        let mut field = field(800.0, 600.0, 6);
        let old_max = field.particles().iter().map(|p| p.id).max().unwrap();

        field.resize(Viewport::new(1000.0, 1000.0));
        assert_eq!(field.len(), 66);
        assert!(field.particles().iter().all(|p| p.id > old_max));
        assert!(
            field
                .particles()
                .iter()
                .all(|p| field.viewport().contains(p.x, p.y))
        );
    }

    #[test]
    fn test_resize_to_smaller_viewport() {
        let mut field = field(1920.0, 1080.0, 7);
        field.resize(Viewport::new(300.0, 100.0));
        assert_eq!(field.len(), 2);
        field.resize(Viewport::new(10.0, 10.0));
        assert!(field.is_empty());

        let mut surface = Recorder::default();
        assert_eq!(field.tick(&mut surface), TickStats::default());
        assert_eq!(surface.clears, 1);
    }

    #[test]
    fn test_resize_to_same_size_keeps_particles() {
        let mut field = field(800.0, 600.0, 8);
        let before = field.particles().to_vec();
        field.resize(Viewport::new(800.0, 600.0));
        assert_eq!(field.particles(), before.as_slice());
    }

    #[test]
    fn test_same_seed_same_animation() {
        let mut a = field(800.0, 600.0, 9);
        let mut b = field(800.0, 600.0, 9);
        let mut surface = Recorder::default();
        for _ in 0..50 {
            a.tick(&mut surface);
            b.tick(&mut surface);
        }
        assert_eq!(a.particles(), b.particles());
    }

    #[test]
    fn test_set_palette_applies_to_respawns() {
        let mut field = field(800.0, 600.0, 10);
        field.set_palette(DustPalette::Frost);
        assert_eq!(field.palette(), DustPalette::Frost);

        let mut surface = Recorder::default();
        for _ in 0..400 {
            field.tick(&mut surface);
        }
        // Lifetimes cap at 200 ticks, so every particle has respawned by now.
        let frost = DustPalette::Frost.colors();
        assert!(field.particles().iter().all(|p| frost.contains(&p.color)));
    }
}
