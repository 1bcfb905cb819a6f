//! Click ripples on skill buttons. A small arena; a new ripple reuses the
//! oldest slot when all are busy.

use std::time::{Duration, Instant};

use crate::core::input::{Point, Rect};

pub const RIPPLE_SLOTS: usize = 8;
pub const RIPPLE_LIFE: Duration = Duration::from_millis(600);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ripple {
    /// Top-left of the ripple square, relative to the button.
    pub origin: Point,
    pub size: f32,
    pub born: Instant,
}

impl Ripple {
    pub fn progress(&self, now: Instant) -> f32 {
        (now.duration_since(self.born).as_secs_f32() / RIPPLE_LIFE.as_secs_f32()).min(1.0)
    }
}

#[derive(Debug, Clone, Default)]
pub struct RippleBuffer {
    slots: [Option<Ripple>; RIPPLE_SLOTS],
}

impl RippleBuffer {
    /// Spawn a ripple centered on `click` inside `button`.
    pub fn spawn(&mut self, button: Rect, click: Point, now: Instant) {
        let size = button.width.max(button.height);
        let ripple = Ripple {
            origin: Point::new(
                click.x - button.left - size / 2.0,
                click.y - button.top - size / 2.0,
            ),
            size,
            born: now,
        };
        let slot = self
            .slots
            .iter()
            .position(Option::is_none)
            .unwrap_or_else(|| self.oldest());
        self.slots[slot] = Some(ripple);
    }

    /// Drop ripples older than their life.
    pub fn expire(&mut self, now: Instant) {
        for slot in &mut self.slots {
            if slot.is_some_and(|r| now.duration_since(r.born) >= RIPPLE_LIFE) {
                *slot = None;
            }
        }
    }

    pub fn active(&self) -> impl Iterator<Item = &Ripple> {
        self.slots.iter().flatten()
    }

    fn oldest(&self) -> usize {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, s)| s.map(|r| (i, r.born)))
            .min_by_key(|&(_, born)| born)
            .map_or(0, |(i, _)| i)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ripple_is_centered_on_click() {
        let mut buffer = RippleBuffer::default();
        let now = Instant::now();
        buffer.spawn(Rect::new(100.0, 50.0, 80.0, 30.0), Point::new(90.0, 115.0), now);
        let ripple = buffer.active().next().unwrap();
        assert_eq!(ripple.size, 80.0);
        assert_eq!(ripple.origin, Point::new(0.0, -25.0));
    }

    #[test]
    fn ripples_expire_and_slots_are_reused() {
        let mut buffer = RippleBuffer::default();
        let t0 = Instant::now();
        let button = Rect::new(0.0, 0.0, 10.0, 10.0);
        for i in 0..(RIPPLE_SLOTS + 3) {
            buffer.spawn(button, Point::new(5.0, 5.0), t0 + Duration::from_millis(i as u64));
        }
        assert_eq!(buffer.active().count(), RIPPLE_SLOTS);
        buffer.expire(t0 + Duration::from_secs(1));
        assert_eq!(buffer.active().count(), 0);
    }
}
