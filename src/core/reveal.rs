//! One-shot reveal-on-scroll.

use std::collections::BTreeMap;

use crate::models::SectionId;

pub const DEFAULT_THRESHOLD: f32 = 0.1;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealState {
    Hidden,
    Visible,
}

#[derive(Debug, Clone, Copy)]
pub struct Reveal {
    threshold: f32,
    state: RevealState,
}

impl Reveal {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            state: RevealState::Hidden,
        }
    }

    pub fn state(&self) -> RevealState {
        self.state
    }

    pub fn is_visible(&self) -> bool {
        self.state == RevealState::Visible
    }

    /// Feed the visible fraction of the container. Returns `true` only on the
    /// first call that crosses the threshold.
    pub fn observe(&mut self, visible_fraction: f32) -> bool {
        if self.state == RevealState::Hidden && visible_fraction >= self.threshold {
            self.state = RevealState::Visible;
            true
        } else {
            false
        }
    }
}

/// Vertical extent of a section in page coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub top: f32,
    pub height: f32,
}

impl Extent {
    /// Fraction of this extent inside the window `[top, top + height)`.
    pub fn visible_fraction(&self, viewport_top: f32, viewport_height: f32) -> f32 {
        if self.height <= 0.0 {
            return 0.0;
        }
        let start = self.top.max(viewport_top);
        let end = (self.top + self.height).min(viewport_top + viewport_height);
        ((end - start).max(0.0) / self.height).min(1.0)
    }
}

/// Reveal state of every section on the page.
#[derive(Debug, Clone)]
pub struct RevealTracker {
    sections: BTreeMap<SectionId, Reveal>,
}

impl RevealTracker {
    pub fn new(threshold: f32) -> Self {
        Self {
            sections: SectionId::ALL
                .into_iter()
                .map(|id| (id, Reveal::new(threshold)))
                .collect(),
        }
    }

    pub fn is_visible(&self, section: SectionId) -> bool {
        self.sections.get(&section).is_some_and(Reveal::is_visible)
    }

    /// Observe the viewport against each section's extent. Returns the
    /// sections revealed by this call.
    pub fn observe_viewport<'a>(
        &mut self,
        viewport_top: f32,
        viewport_height: f32,
        extents: impl IntoIterator<Item = (SectionId, &'a Extent)>,
    ) -> Vec<SectionId> {
        let mut revealed = Vec::new();
        for (id, extent) in extents {
            let fraction = extent.visible_fraction(viewport_top, viewport_height);
            if let Some(reveal) = self.sections.get_mut(&id) {
                if reveal.observe(fraction) {
                    tracing::debug!(section = id.name(), fraction, "section revealed");
                    revealed.push(id);
                }
            }
        }
        revealed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once() {
        let mut reveal = Reveal::new(DEFAULT_THRESHOLD);
        assert!(!reveal.observe(0.05));
        assert!(reveal.observe(0.1));
        assert!(!reveal.observe(0.0));
        assert!(!reveal.observe(0.9));
        assert!(reveal.is_visible());
    }

    #[test]
    fn partial_overlap_fraction() {
        let extent = Extent {
            top: 1000.0,
            height: 500.0,
        };
        assert_eq!(extent.visible_fraction(0.0, 800.0), 0.0);
        assert_eq!(extent.visible_fraction(600.0, 800.0), 0.8);
        assert_eq!(extent.visible_fraction(1000.0, 800.0), 1.0);
    }
}
