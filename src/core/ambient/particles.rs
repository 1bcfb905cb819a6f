//! Shooting-star particles behind the page.
//!
//! The field is a fixed arena sized at mount from the viewport class. Every
//! particle's parameters are drawn once from the seeded generator; `step`
//! only advances the clock and rewrites position and opacity in place.

use std::ops::Range;

use rand::Rng;

use crate::core::header::Breakpoint;
use crate::core::input::Point;

/// Parameter ranges for one viewport class.
#[derive(Debug, Clone, PartialEq)]
pub struct ParticleTable {
    pub count: usize,
    pub size: Range<f32>,
    pub duration: Range<f32>,
    pub opacity: Range<f32>,
}

pub const MOBILE_TABLE: ParticleTable = ParticleTable {
    count: 30,
    size: 1.0..3.0,
    duration: 0.6..1.8,
    opacity: 0.4..1.0,
};

pub const DESKTOP_TABLE: ParticleTable = ParticleTable {
    count: 80,
    size: 2.0..5.0,
    duration: 0.8..2.3,
    opacity: 0.4..1.2,
};

const DELAY: Range<f32> = 0.0..10.0;
const REPEAT_DELAY: Range<f32> = 3.0..8.0;
const START_SPREAD: f32 = 800.0;
const END_SPREAD: f32 = 200.0;

impl ParticleTable {
    pub fn for_breakpoint(breakpoint: Breakpoint) -> &'static ParticleTable {
        match breakpoint {
            Breakpoint::Mobile => &MOBILE_TABLE,
            Breakpoint::Desktop => &DESKTOP_TABLE,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    /// Resting position as fractions of the viewport.
    pub anchor: Point,
    pub size: f32,
    pub duration: f32,
    pub repeat_delay: f32,
    pub peak_opacity: f32,
    pub start: Point,
    pub end: Point,
    /// Seconds into the current cycle; negative while the initial delay runs.
    clock: f32,
    pub offset: Point,
    pub opacity: f32,
}

impl Particle {
    fn seeded(table: &ParticleTable, rng: &mut impl Rng) -> Self {
        let start = Point::new(
            rng.gen_range(-START_SPREAD..START_SPREAD),
            rng.gen_range(-START_SPREAD..START_SPREAD),
        );
        Self {
            anchor: Point::new(rng.gen_range(0.0..1.0), rng.gen_range(0.0..1.0)),
            size: rng.gen_range(table.size.clone()),
            duration: rng.gen_range(table.duration.clone()),
            repeat_delay: rng.gen_range(REPEAT_DELAY),
            peak_opacity: rng.gen_range(table.opacity.clone()),
            start,
            end: Point::new(
                rng.gen_range(-END_SPREAD..END_SPREAD),
                rng.gen_range(-END_SPREAD..END_SPREAD),
            ),
            clock: -rng.gen_range(DELAY),
            offset: start,
            opacity: 0.0,
        }
    }

    /// Heading of the tail in radians, pointing back toward the start.
    pub fn tail_angle(&self) -> f32 {
        (self.start.y - self.end.y).atan2(self.start.x - self.end.x)
    }

    pub fn tail_length(&self) -> f32 {
        self.size * 30.0
    }

    fn step(&mut self, dt: f32) {
        self.clock += dt;
        if self.clock < 0.0 {
            return;
        }
        let cycle = self.duration + self.repeat_delay;
        if self.clock >= cycle {
            self.clock %= cycle;
        }
        if self.clock > self.duration {
            self.opacity = 0.0;
            self.offset = self.start;
            return;
        }
        let progress = self.clock / self.duration;
        let eased = 1.0 - (1.0 - progress) * (1.0 - progress);
        self.offset = Point::new(
            self.start.x + (self.end.x - self.start.x) * eased,
            self.start.y + (self.end.y - self.start.y) * eased,
        );
        self.opacity = self.peak_opacity * fade_envelope(progress);
    }
}

/// Opacity keyframes 0, 1, 1, 0 at evenly spaced stops.
fn fade_envelope(progress: f32) -> f32 {
    if progress < 1.0 / 3.0 {
        progress * 3.0
    } else if progress < 2.0 / 3.0 {
        1.0
    } else {
        ((1.0 - progress) * 3.0).max(0.0)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ParticleField {
    slots: Vec<Particle>,
}

impl ParticleField {
    pub fn seeded(table: &ParticleTable, rng: &mut impl Rng) -> Self {
        let mut slots = Vec::with_capacity(table.count);
        slots.extend((0..table.count).map(|_| Particle::seeded(table, rng)));
        Self { slots }
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.slots
    }

    pub fn step(&mut self, dt: f32) {
        for particle in &mut self.slots {
            particle.step(dt);
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn particles_stay_in_table_ranges() {
        let mut rng = StdRng::seed_from_u64(7);
        let field = ParticleField::seeded(&MOBILE_TABLE, &mut rng);
        assert_eq!(field.len(), 30);
        for p in field.particles() {
            assert!(MOBILE_TABLE.size.contains(&p.size));
            assert!(MOBILE_TABLE.duration.contains(&p.duration));
            assert!(MOBILE_TABLE.opacity.contains(&p.peak_opacity));
        }
    }

    #[test]
    fn step_rewrites_in_place() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut field = ParticleField::seeded(&DESKTOP_TABLE, &mut rng);
        let before = field.particles().as_ptr();
        for _ in 0..1000 {
            field.step(1.0 / 60.0);
        }
        assert_eq!(field.particles().as_ptr(), before);
        assert_eq!(field.len(), DESKTOP_TABLE.count);
        assert!(field.particles().iter().any(|p| p.opacity > 0.0));
    }

    #[test]
    fn envelope_peaks_in_the_middle() {
        assert_eq!(fade_envelope(0.0), 0.0);
        assert_eq!(fade_envelope(0.5), 1.0);
        assert!(fade_envelope(0.99) < 0.05);
    }
}
