//! Small spinning chip icons on project and skill cards.

pub const IDLE_SPIN: f32 = 0.25;
pub const HOVER_SPIN: f32 = 0.8;
pub const HOVER_GLOW: f32 = 0.3;
pub const LANE_PARTICLES: usize = 4;
const GLOW_RATE: f32 = 5.0;
const LANE_PERIOD: f32 = 2.0;
const LANE_STAGGER: f32 = 0.8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChipKind {
    Processor,
    Memory,
    /// Bus chip with particles running along its lanes.
    Protocol,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LaneParticle {
    pub x: f32,
    pub z: f32,
    pub opacity: f32,
}

#[derive(Debug, Clone)]
pub struct MiniChip {
    kind: ChipKind,
    hovered: bool,
    pub rotation: f32,
    pub glow: f32,
    elapsed: f32,
    lanes: [LaneParticle; LANE_PARTICLES],
}

impl MiniChip {
    pub fn new(kind: ChipKind) -> Self {
        let mut chip = Self {
            kind,
            hovered: false,
            rotation: 0.0,
            glow: 0.0,
            elapsed: 0.0,
            lanes: [LaneParticle {
                x: 0.0,
                z: 0.0,
                opacity: 0.0,
            }; LANE_PARTICLES],
        };
        chip.place_lanes();
        chip
    }

    pub fn kind(&self) -> ChipKind {
        self.kind
    }

    pub fn set_hovered(&mut self, hovered: bool) {
        self.hovered = hovered;
    }

    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    pub fn lanes(&self) -> &[LaneParticle] {
        match self.kind {
            ChipKind::Protocol => &self.lanes,
            _ => &[],
        }
    }

    pub fn step(&mut self, dt: f32) {
        self.elapsed += dt;
        let spin = if self.hovered { HOVER_SPIN } else { IDLE_SPIN };
        self.rotation = (self.rotation + dt * spin) % std::f32::consts::TAU;

        let target = if self.hovered { HOVER_GLOW } else { 0.0 };
        let t = (dt * GLOW_RATE).min(1.0);
        self.glow += (target - self.glow) * t;

        if self.kind == ChipKind::Protocol {
            self.place_lanes();
        }
    }

    fn place_lanes(&mut self) {
        let opacity = if self.hovered { 0.8 } else { 0.4 };
        for (index, lane) in self.lanes.iter_mut().enumerate() {
            let offset = (self.elapsed + index as f32 * LANE_STAGGER) % LANE_PERIOD;
            *lane = LaneParticle {
                x: offset - 1.0,
                z: (index as f32 - 1.5) * 0.3,
                opacity,
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hover_speeds_spin_and_raises_glow() {
        let mut idle = MiniChip::new(ChipKind::Processor);
        let mut hovered = MiniChip::new(ChipKind::Processor);
        hovered.set_hovered(true);
        for _ in 0..120 {
            idle.step(1.0 / 60.0);
            hovered.step(1.0 / 60.0);
        }
        assert!(hovered.rotation > idle.rotation);
        assert!((hovered.glow - HOVER_GLOW).abs() < 0.01);
        assert_eq!(idle.glow, 0.0);
    }

    #[test]
    fn only_protocol_chips_carry_lanes() {
        assert_eq!(MiniChip::new(ChipKind::Protocol).lanes().len(), LANE_PARTICLES);
        assert!(MiniChip::new(ChipKind::Memory).lanes().is_empty());
    }

    #[test]
    fn lane_particles_stay_on_the_chip() {
        let mut chip = MiniChip::new(ChipKind::Protocol);
        for _ in 0..500 {
            chip.step(0.013);
            assert!(chip.lanes().iter().all(|l| (-1.0..1.0).contains(&l.x)));
        }
    }
}
