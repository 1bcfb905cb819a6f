//! Bouncing protocol dice in the hero scene.
//!
//! Each die is a tiny rigid body inside an invisible box. Pointer input runs
//! through [`DieControl`]: hovering an idle die hands it to the pointer, a
//! quick press launches it and ignores the pointer until the cooldown
//! deadline passes.

use std::fmt;
use std::time::{Duration, Instant};

use rand::Rng;
use rand::rngs::StdRng;

use super::trail::Trail;
use crate::core::input::Point;

pub const GRAVITY: f32 = -2.5;
pub const BOUNCE_DAMPING: f32 = 0.7;
pub const AIR_RESISTANCE: f32 = 0.98;
pub const MIN_VELOCITY: f32 = 0.005;
pub const CUBE_SIZE: f32 = 0.8;
pub const BOUNDS_MIN: [f32; 3] = [-3.5, -1.8, -2.0];
pub const BOUNDS_MAX: [f32; 3] = [3.5, 2.5, 2.0];

pub const QUICK_PRESS: Duration = Duration::from_millis(200);
pub const LAUNCH_COOLDOWN: Duration = Duration::from_millis(1500);
const FOLLOW_LERP: f32 = 0.2;
const FOLLOW_REACH: f32 = 3.3;
const HANDOFF_GAIN: f32 = 0.4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Protocol {
    Apb,
    Ahb,
    Axi,
}

impl Protocol {
    pub const ALL: [Protocol; 3] = [Protocol::Apb, Protocol::Ahb, Protocol::Axi];

    pub fn name(self) -> &'static str {
        match self {
            Protocol::Apb => "APB",
            Protocol::Ahb => "AHB",
            Protocol::Axi => "AXI",
        }
    }

    fn index(self) -> usize {
        self as usize
    }

    pub fn color(self) -> [u8; 3] {
        match self {
            Protocol::Apb => [0x00, 0xFF, 0xD1],
            Protocol::Ahb => [0x86, 0x86, 0xAC],
            Protocol::Axi => [0x50, 0x50, 0x81],
        }
    }
}

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DieControl {
    Idle,
    /// Following the pointer.
    Controlled,
    /// Launched; pointer input is ignored until `until`.
    Cooldown { until: Instant },
}

#[derive(Debug, Clone)]
pub struct Die {
    protocol: Protocol,
    pub position: [f32; 3],
    pub velocity: [f32; 3],
    pub rotation: [f32; 3],
    control: DieControl,
    press_started: Option<Instant>,
    /// Pointer in normalized device coordinates while hovering.
    pointer: Option<Point>,
    trail: Trail,
}

impl Die {
    pub fn new(protocol: Protocol, position: [f32; 3]) -> Self {
        Self {
            protocol,
            position,
            velocity: [0.0; 3],
            rotation: [0.0; 3],
            control: DieControl::Idle,
            press_started: None,
            pointer: None,
            trail: Trail::default(),
        }
    }

    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    pub fn control(&self) -> DieControl {
        self.control
    }

    pub fn trail(&self) -> &Trail {
        &self.trail
    }

    pub fn is_controlled(&self) -> bool {
        self.control == DieControl::Controlled
    }

    /// Fire the cooldown deadline if it has passed.
    pub fn tick(&mut self, now: Instant) {
        if let DieControl::Cooldown { until } = self.control {
            if now >= until {
                tracing::debug!(protocol = %self.protocol, "pointer control re-enabled");
                self.control = DieControl::Idle;
            }
        }
    }

    pub fn pointer_enter(&mut self, now: Instant) {
        self.tick(now);
        match self.control {
            DieControl::Idle => self.control = DieControl::Controlled,
            DieControl::Controlled => {}
            DieControl::Cooldown { .. } => {
                tracing::trace!(protocol = %self.protocol, "hover ignored during cooldown");
            }
        }
    }

    pub fn pointer_leave(&mut self, now: Instant) {
        self.tick(now);
        if self.control == DieControl::Controlled {
            self.control = DieControl::Idle;
        }
        self.pointer = None;
    }

    pub fn pointer_move(&mut self, ndc: Point, now: Instant) {
        self.tick(now);
        if !matches!(self.control, DieControl::Cooldown { .. }) {
            self.pointer = Some(ndc);
        }
    }

    pub fn pointer_down(&mut self, now: Instant) {
        self.press_started = Some(now);
    }

    /// Release a press. Returns whether the die was launched.
    pub fn pointer_up(&mut self, now: Instant, rng: &mut impl Rng) -> bool {
        let Some(started) = self.press_started.take() else {
            return false;
        };
        if now.duration_since(started) >= QUICK_PRESS {
            return false;
        }
        self.launch(now, rng);
        true
    }

    fn launch(&mut self, now: Instant, rng: &mut impl Rng) {
        self.velocity[0] += rng.gen_range(-3.0..3.0);
        self.velocity[1] += rng.gen_range(3.0..7.0);
        self.velocity[2] += rng.gen_range(-3.0..3.0);
        self.control = DieControl::Cooldown {
            until: now + LAUNCH_COOLDOWN,
        };
        self.pointer = None;
        tracing::debug!(protocol = %self.protocol, velocity = ?self.velocity, "launched");
    }

    /// Advance the simulation by `dt` seconds.
    pub fn step(&mut self, dt: f32, rng: &mut impl Rng) {
        let following = match (self.control, self.pointer) {
            (DieControl::Controlled, Some(ndc)) => Some(ndc),
            _ => None,
        };

        if let Some(ndc) = following {
            let dx = ndc.x * FOLLOW_REACH - self.position[0];
            let dy = ndc.y * FOLLOW_REACH - self.position[1];
            self.position[0] += dx * FOLLOW_LERP;
            self.position[1] += dy * FOLLOW_LERP;
            self.velocity[0] = dx * HANDOFF_GAIN;
            self.velocity[1] = dy * HANDOFF_GAIN;
        } else {
            if !self.is_controlled() {
                self.velocity[1] += GRAVITY * dt;
            }
            for axis in 0..3 {
                self.position[axis] += self.velocity[axis] * dt;
            }
            self.collide(rng);
            self.velocity[0] *= AIR_RESISTANCE;
            self.velocity[2] *= AIR_RESISTANCE;
            self.settle();
        }

        self.spin(dt);
        self.trail.step(self.position, self.is_controlled(), dt);
    }

    fn collide(&mut self, rng: &mut impl Rng) {
        let half = CUBE_SIZE / 2.0;
        for axis in 0..3 {
            let low = BOUNDS_MIN[axis] + half;
            let high = BOUNDS_MAX[axis] - half;
            if self.position[axis] <= low {
                self.position[axis] = low;
                self.velocity[axis] = self.velocity[axis].abs() * BOUNCE_DAMPING;
                match axis {
                    0 => self.velocity[1] += rng.gen_range(0.0..0.5),
                    1 => {
                        self.velocity[0] += rng.gen_range(-0.4..0.4);
                        self.velocity[2] += rng.gen_range(-0.4..0.4);
                    }
                    _ => {}
                }
                tracing::trace!(protocol = %self.protocol, axis, "bounced off low wall");
            } else if self.position[axis] >= high {
                self.position[axis] = high;
                self.velocity[axis] = -self.velocity[axis].abs() * BOUNCE_DAMPING;
                if axis == 0 {
                    self.velocity[1] += rng.gen_range(0.0..0.5);
                }
                tracing::trace!(protocol = %self.protocol, axis, "bounced off high wall");
            }
        }
    }

    fn settle(&mut self) {
        let floor = BOUNDS_MIN[1] + CUBE_SIZE / 2.0;
        if self.velocity[0].abs() < MIN_VELOCITY {
            self.velocity[0] = 0.0;
        }
        if self.velocity[1].abs() < MIN_VELOCITY && self.position[1] <= floor + 0.1 {
            self.velocity[1] = 0.0;
        }
        if self.velocity[2].abs() < MIN_VELOCITY {
            self.velocity[2] = 0.0;
        }
    }

    fn spin(&mut self, dt: f32) {
        let speed = self.velocity.iter().map(|v| v * v).sum::<f32>().sqrt();
        if speed > 0.1 {
            self.rotation[0] += self.velocity[1] * dt * 1.5;
            self.rotation[1] += self.velocity[0] * dt * 1.5;
            self.rotation[2] += self.velocity[2] * dt * 1.5;
        }
        if self.is_controlled() {
            self.rotation[0] += 0.01;
            self.rotation[1] += 0.01;
        } else if speed < 0.5 {
            for r in &mut self.rotation {
                *r *= 0.95;
            }
        }
    }
}

/// The three dice and the generator that drives their randomness.
#[derive(Debug, Clone)]
pub struct DiceScene {
    dice: [Die; 3],
    rng: StdRng,
}

impl DiceScene {
    pub fn new(mut rng: StdRng) -> Self {
        let dice = Protocol::ALL.map(|protocol| {
            Die::new(
                protocol,
                [
                    (protocol.index() as f32 - 1.0) * 1.5,
                    rng.gen_range(-1.0..1.0),
                    rng.gen_range(-0.5..0.5),
                ],
            )
        });
        Self { dice, rng }
    }

    pub fn dice(&self) -> &[Die] {
        &self.dice
    }

    pub fn die_mut(&mut self, protocol: Protocol) -> &mut Die {
        &mut self.dice[protocol.index()]
    }

    /// Release a press on one die.
    pub fn pointer_up(&mut self, protocol: Protocol, now: Instant) -> bool {
        self.dice[protocol.index()].pointer_up(now, &mut self.rng)
    }

    pub fn step(&mut self, dt: f32, now: Instant) {
        for die in &mut self.dice {
            die.tick(now);
            die.step(dt, &mut self.rng);
        }
    }
}
