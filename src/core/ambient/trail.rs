//! Motion trail behind a bouncing die: a fixed ring of slots overwritten in
//! place, newest at `head`.

pub const TRAIL_SLOTS: usize = 50;
pub const TRAIL_LIFE: f32 = 4.0;
const FADE_RATE: f32 = 0.7;
const SPAWN_SPEED: f32 = 0.005;

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TrailSlot {
    pub position: [f32; 3],
    /// Remaining life in seconds; the slot is dead at zero.
    pub age: f32,
    pub intensity: f32,
}

#[derive(Debug, Clone)]
pub struct Trail {
    slots: [TrailSlot; TRAIL_SLOTS],
    head: usize,
    last: Option<[f32; 3]>,
}

impl Default for Trail {
    fn default() -> Self {
        Self {
            slots: [TrailSlot::default(); TRAIL_SLOTS],
            head: 0,
            last: None,
        }
    }
}

impl Trail {
    /// Record the current position and fade every slot by `dt`.
    pub fn step(&mut self, position: [f32; 3], hovered: bool, dt: f32) {
        let speed = self.last.map_or(0.0, |last| distance(last, position));
        self.last = Some(position);

        if speed > SPAWN_SPEED || hovered {
            self.head = (self.head + 1) % TRAIL_SLOTS;
            self.slots[self.head] = TrailSlot {
                position,
                age: TRAIL_LIFE,
                intensity: (speed * 80.0 + if hovered { 0.8 } else { 0.0 }).min(1.0),
            };
        }

        for slot in &mut self.slots {
            if slot.age > 0.0 {
                slot.age = (slot.age - dt * FADE_RATE).max(0.0);
            }
        }
    }

    pub fn live_count(&self) -> usize {
        self.slots.iter().filter(|s| s.age > 0.0).count()
    }

    /// Live slots from newest to oldest with their draw opacity.
    pub fn points(&self) -> impl Iterator<Item = (&TrailSlot, f32)> + '_ {
        (0..TRAIL_SLOTS).filter_map(move |k| {
            let slot = &self.slots[(self.head + TRAIL_SLOTS - k) % TRAIL_SLOTS];
            (slot.age > 0.0).then(|| {
                let age_factor = slot.age / TRAIL_LIFE;
                let distance_factor = 1.0 - k as f32 / TRAIL_SLOTS as f32;
                (slot, age_factor * distance_factor * slot.intensity * 1.2)
            })
        })
    }
}

fn distance(a: [f32; 3], b: [f32; 3]) -> f32 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y) * (x - y))
        .sum::<f32>()
        .sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn still_die_leaves_no_trail() {
        let mut trail = Trail::default();
        for _ in 0..10 {
            trail.step([0.0, 0.0, 0.0], false, 0.016);
        }
        assert_eq!(trail.live_count(), 0);
    }

    #[test]
    fn ring_never_grows_past_capacity() {
        let mut trail = Trail::default();
        for i in 0..200 {
            trail.step([i as f32 * 0.1, 0.0, 0.0], false, 0.001);
        }
        assert_eq!(trail.live_count(), TRAIL_SLOTS);
        let newest = trail.points().next().unwrap().0;
        assert_eq!(newest.position[0], 199.0 * 0.1);
    }

    #[test]
    fn slots_expire() {
        let mut trail = Trail::default();
        trail.step([0.0, 0.0, 0.0], true, 0.0);
        assert_eq!(trail.live_count(), 1);
        trail.step([0.0, 0.0, 0.0], false, TRAIL_LIFE / FADE_RATE + 0.1);
        assert_eq!(trail.live_count(), 0);
    }
}
