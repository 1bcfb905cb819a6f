//! Large blurred orbs drifting behind the hero.

use crate::core::input::Point;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Orb {
    /// Resting center as fractions of the viewport.
    pub center: Point,
    pub diameter: f32,
    pub cycle: f32,
    pub delay: f32,
    /// Drift at the middle of the cycle.
    pub drift: Point,
    pub peak_scale: f32,
    pub opacity: (f32, f32),
}

/// Where an orb is drawn at a moment in time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrbFrame {
    pub center: Point,
    pub diameter: f32,
    pub opacity: f32,
}

pub const ORBS: [Orb; 3] = [
    Orb {
        center: Point::new(0.15, 0.10),
        diameter: 600.0,
        cycle: 10.0,
        delay: 0.0,
        drift: Point::new(100.0, -50.0),
        peak_scale: 1.2,
        opacity: (0.6, 0.9),
    },
    Orb {
        center: Point::new(0.85, 0.50),
        diameter: 650.0,
        cycle: 13.0,
        delay: 2.0,
        drift: Point::new(-80.0, 60.0),
        peak_scale: 1.15,
        opacity: (0.55, 0.85),
    },
    Orb {
        center: Point::new(0.45, 0.90),
        diameter: 620.0,
        cycle: 15.0,
        delay: 4.0,
        drift: Point::new(120.0, -70.0),
        peak_scale: 1.25,
        opacity: (0.58, 0.88),
    },
];

impl Orb {
    /// Sample the orb `elapsed` seconds after mount in a `width` x `height`
    /// viewport. Each property eases out to its peak and back within one cycle.
    pub fn sample(&self, elapsed: f32, width: f32, height: f32) -> OrbFrame {
        let t = elapsed - self.delay;
        let swing = if t <= 0.0 {
            0.0
        } else {
            let phase = (t % self.cycle) / self.cycle;
            // 0 -> 1 -> 0 over the cycle with ease-in-out.
            (1.0 - (phase * std::f32::consts::TAU).cos()) / 2.0
        };
        OrbFrame {
            center: Point::new(
                self.center.x * width + self.drift.x * swing,
                self.center.y * height + self.drift.y * swing,
            ),
            diameter: self.diameter * (1.0 + (self.peak_scale - 1.0) * swing),
            opacity: self.opacity.0 + (self.opacity.1 - self.opacity.0) * swing,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn orb_rests_before_its_delay() {
        let frame = ORBS[2].sample(3.0, 1000.0, 1000.0);
        assert!((frame.center.x - 450.0).abs() < 1e-3);
        assert!((frame.center.y - 900.0).abs() < 1e-3);
        assert_eq!(frame.opacity, 0.58);
    }

    #[test]
    fn orb_peaks_mid_cycle() {
        let frame = ORBS[0].sample(5.0, 1000.0, 1000.0);
        assert!((frame.center.x - 250.0).abs() < 1e-3);
        assert!((frame.diameter - 720.0).abs() < 1e-2);
    }
}
