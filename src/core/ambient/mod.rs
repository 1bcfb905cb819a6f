//! Decorative animation layer: shooting-star particles, drifting orbs and
//! the bouncing protocol dice.
//!
//! Nothing here feeds back into the page. The layer is mounted with a seed so
//! a given seed and viewport always produce the same scene, and it renders
//! nothing at all when reduced motion is requested.

pub mod chip;
pub mod dice;
pub mod orbs;
pub mod particles;
pub mod ripple;
pub mod trail;

use std::time::Instant;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use self::dice::DiceScene;
use self::orbs::{ORBS, Orb, OrbFrame};
use self::particles::{ParticleField, ParticleTable};
use crate::core::boundary::{Contained, GraphicsSupport};
use crate::core::header::Breakpoint;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MotionPreference {
    #[default]
    Full,
    Reduced,
}

impl MotionPreference {
    pub fn from_reduced(reduced: bool) -> Self {
        if reduced {
            MotionPreference::Reduced
        } else {
            MotionPreference::Full
        }
    }
}

#[derive(Debug, Clone)]
pub struct AmbientLayer {
    motion: MotionPreference,
    breakpoint: Breakpoint,
    rng: StdRng,
    elapsed: f32,
    particles: ParticleField,
    orbs: &'static [Orb],
    dice: Option<Contained<DiceScene>>,
}

impl AmbientLayer {
    pub fn mount(
        breakpoint: Breakpoint,
        motion: MotionPreference,
        graphics: GraphicsSupport,
        seed: u64,
    ) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let orbs: &'static [Orb] = match motion {
            MotionPreference::Reduced => &[],
            MotionPreference::Full => &ORBS,
        };
        let (particles, dice) = match motion {
            MotionPreference::Reduced => (ParticleField::empty(), None),
            MotionPreference::Full => {
                let particles =
                    ParticleField::seeded(ParticleTable::for_breakpoint(breakpoint), &mut rng);
                let dice_rng = StdRng::seed_from_u64(rng.r#gen());
                let dice = Contained::mount_3d("protocol dice", graphics, || {
                    Ok(DiceScene::new(dice_rng))
                });
                (particles, Some(dice))
            }
        };
        tracing::debug!(
            ?breakpoint,
            ?motion,
            particles = particles.len(),
            "ambient layer mounted"
        );
        Self {
            motion,
            breakpoint,
            rng,
            elapsed: 0.0,
            particles,
            orbs,
            dice,
        }
    }

    pub fn motion(&self) -> MotionPreference {
        self.motion
    }

    pub fn breakpoint(&self) -> Breakpoint {
        self.breakpoint
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty() && self.orbs.is_empty() && self.dice.is_none()
    }

    pub fn particles(&self) -> &ParticleField {
        &self.particles
    }

    pub fn dice(&self) -> Option<&Contained<DiceScene>> {
        self.dice.as_ref()
    }

    pub fn dice_mut(&mut self) -> Option<&mut DiceScene> {
        self.dice.as_mut().and_then(Contained::mounted_mut)
    }

    /// Every visible element: particles, orbs, and the dice or their fallback.
    pub fn element_count(&self) -> usize {
        let dice = match &self.dice {
            Some(Contained::Mounted(scene)) => scene.dice().len(),
            Some(Contained::Fallback(_)) => 1,
            None => 0,
        };
        self.particles.len() + self.orbs.len() + dice
    }

    pub fn orb_frames(&self, width: f32, height: f32) -> impl Iterator<Item = OrbFrame> + '_ {
        self.orbs
            .iter()
            .map(move |orb| orb.sample(self.elapsed, width, height))
    }

    /// The viewport class changed: reseed the particle field for the new table.
    pub fn resize(&mut self, breakpoint: Breakpoint) {
        if breakpoint == self.breakpoint {
            return;
        }
        self.breakpoint = breakpoint;
        if self.motion == MotionPreference::Full {
            self.particles =
                ParticleField::seeded(ParticleTable::for_breakpoint(breakpoint), &mut self.rng);
        }
    }

    pub fn step(&mut self, dt: f32, now: Instant) {
        if self.motion == MotionPreference::Reduced {
            return;
        }
        self.elapsed += dt;
        self.particles.step(dt);
        if let Some(scene) = self.dice_mut() {
            scene.step(dt, now);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reduced_motion_mounts_nothing() {
        let mut layer = AmbientLayer::mount(
            Breakpoint::Desktop,
            MotionPreference::Reduced,
            GraphicsSupport::Available,
            1,
        );
        layer.step(0.5, Instant::now());
        assert!(layer.is_empty());
        assert_eq!(layer.element_count(), 0);
    }

    #[test]
    fn same_seed_same_scene() {
        let mount = || {
            AmbientLayer::mount(
                Breakpoint::Mobile,
                MotionPreference::Full,
                GraphicsSupport::Available,
                9,
            )
        };
        let (a, b) = (mount(), mount());
        assert_eq!(a.particles().particles(), b.particles().particles());
    }

    #[test]
    fn resize_swaps_the_particle_table() {
        let mut layer = AmbientLayer::mount(
            Breakpoint::Mobile,
            MotionPreference::Full,
            GraphicsSupport::Available,
            2,
        );
        assert_eq!(layer.particles().len(), 30);
        layer.resize(Breakpoint::Desktop);
        assert_eq!(layer.particles().len(), 80);
    }

    #[test]
    fn missing_graphics_keeps_particles() {
        let layer = AmbientLayer::mount(
            Breakpoint::Desktop,
            MotionPreference::Full,
            GraphicsSupport::Unavailable,
            2,
        );
        assert!(layer.dice().is_some_and(Contained::is_fallback));
        assert_eq!(layer.particles().len(), 80);
        assert_eq!(layer.element_count(), 80 + 3 + 1);
    }
}
