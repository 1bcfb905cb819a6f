//! Modal dialog: phase machine, focus trap and scroll lock.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::core::focus::{FocusId, FocusRing, TabDirection};
use crate::core::input::Key;
use crate::core::scroll_lock::{self, ScrollLock, ScrollLockGuard};

pub const ENTER_DURATION: Duration = Duration::from_millis(220);
pub const EXIT_DURATION: Duration = Duration::from_millis(180);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModalOptions {
    pub close_on_backdrop: bool,
    pub close_on_escape: bool,
}

impl Default for ModalOptions {
    fn default() -> Self {
        Self {
            close_on_backdrop: true,
            close_on_escape: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalPhase {
    Closed,
    Opening { since: Instant },
    Open,
    Closing { since: Instant },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalOutcome {
    Ignored,
    /// Move keyboard focus to the element.
    Focus(FocusId),
    /// The dialog started closing; focus goes back to `restore`.
    Closed { restore: Option<FocusId> },
}

#[derive(Debug)]
pub struct Modal {
    options: ModalOptions,
    phase: ModalPhase,
    ring: Option<FocusRing>,
    focused: Option<FocusId>,
    previous_focus: Option<FocusId>,
    lock: ScrollLock,
    guard: Option<ScrollLockGuard>,
}

impl Modal {
    pub fn new(lock: ScrollLock, options: ModalOptions) -> Self {
        Self {
            options,
            phase: ModalPhase::Closed,
            ring: None,
            focused: None,
            previous_focus: None,
            lock,
            guard: None,
        }
    }

    pub fn phase(&self) -> ModalPhase {
        self.phase
    }

    pub fn options(&self) -> ModalOptions {
        self.options
    }

    /// Open or opening: the dialog accepts input.
    pub fn is_open(&self) -> bool {
        matches!(self.phase, ModalPhase::Opening { .. } | ModalPhase::Open)
    }

    /// Anything but fully closed: the dialog is on screen.
    pub fn is_visible(&self) -> bool {
        self.phase != ModalPhase::Closed
    }

    pub fn focused(&self) -> Option<&FocusId> {
        self.focused.as_ref()
    }

    /// Open the dialog with the given focusable content.
    ///
    /// `previously_focused` is remembered only when the dialog was not
    /// already open; reopening with new content keeps the original one.
    pub fn open(
        &mut self,
        ring: FocusRing,
        previously_focused: Option<FocusId>,
        now: Instant,
    ) -> FocusId {
        if !self.is_open() {
            self.previous_focus = previously_focused;
            self.phase = ModalPhase::Opening { since: now };
            tracing::debug!(dialog = %ring.container(), "modal opening");
        }
        scroll_lock::hold(&self.lock, &mut self.guard);
        let initial = ring.initial().clone();
        self.ring = Some(ring);
        self.focused = Some(initial.clone());
        initial
    }

    /// Start closing. Releases the scroll lock immediately.
    pub fn close(&mut self, now: Instant) -> ModalOutcome {
        if !self.is_open() {
            return ModalOutcome::Ignored;
        }
        self.phase = ModalPhase::Closing { since: now };
        self.guard = None;
        self.ring = None;
        self.focused = None;
        tracing::debug!("modal closing");
        ModalOutcome::Closed {
            restore: self.previous_focus.take(),
        }
    }

    pub fn handle_key(&mut self, key: Key, now: Instant) -> ModalOutcome {
        if !self.is_open() {
            return ModalOutcome::Ignored;
        }
        match key {
            Key::Escape if self.options.close_on_escape => self.close(now),
            Key::Tab { shift } => {
                let Some(ring) = &self.ring else {
                    return ModalOutcome::Ignored;
                };
                let next = ring
                    .next(self.focused.as_ref(), TabDirection::from_shift(shift))
                    .clone();
                self.focused = Some(next.clone());
                ModalOutcome::Focus(next)
            }
            _ => ModalOutcome::Ignored,
        }
    }

    /// A click on the backdrop, outside the dialog panel.
    pub fn backdrop_click(&mut self, now: Instant) -> ModalOutcome {
        if self.options.close_on_backdrop {
            self.close(now)
        } else {
            ModalOutcome::Ignored
        }
    }

    /// Pointer focus on an element inside the dialog.
    pub fn focus(&mut self, id: FocusId) {
        if self.ring.as_ref().is_some_and(|ring| ring.contains(&id)) {
            self.focused = Some(id);
        }
    }

    /// Advance enter/exit transitions.
    pub fn tick(&mut self, now: Instant) {
        match self.phase {
            ModalPhase::Opening { since } if now.duration_since(since) >= ENTER_DURATION => {
                self.phase = ModalPhase::Open;
            }
            ModalPhase::Closing { since } if now.duration_since(since) >= EXIT_DURATION => {
                self.phase = ModalPhase::Closed;
            }
            _ => {}
        }
    }

    /// Progress of the current transition in `[0, 1]`; 1 when settled open.
    pub fn presence(&self, now: Instant) -> f32 {
        match self.phase {
            ModalPhase::Closed => 0.0,
            ModalPhase::Open => 1.0,
            ModalPhase::Opening { since } => ratio(now.duration_since(since), ENTER_DURATION),
            ModalPhase::Closing { since } => 1.0 - ratio(now.duration_since(since), EXIT_DURATION),
        }
    }
}

fn ratio(elapsed: Duration, total: Duration) -> f32 {
    (elapsed.as_secs_f32() / total.as_secs_f32()).clamp(0.0, 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring() -> FocusRing {
        FocusRing::new(
            FocusId::fixed("dialog"),
            vec![FocusId::fixed("close"), FocusId::fixed("link")],
        )
    }

    #[test]
    fn full_lifecycle() {
        let lock = ScrollLock::new();
        let mut modal = Modal::new(lock.clone(), ModalOptions::default());
        let t0 = Instant::now();
        let focus = modal.open(ring(), Some(FocusId::fixed("card")), t0);
        assert_eq!(focus.as_str(), "close");
        assert!(lock.is_locked());
        assert!(matches!(modal.phase(), ModalPhase::Opening { .. }));

        modal.tick(t0 + ENTER_DURATION);
        assert_eq!(modal.phase(), ModalPhase::Open);

        let t1 = t0 + Duration::from_secs(1);
        assert_eq!(
            modal.close(t1),
            ModalOutcome::Closed {
                restore: Some(FocusId::fixed("card"))
            }
        );
        assert!(!lock.is_locked());
        assert!(modal.is_visible());
        modal.tick(t1 + EXIT_DURATION);
        assert_eq!(modal.phase(), ModalPhase::Closed);
    }

    #[test]
    fn escape_respects_option() {
        let lock = ScrollLock::new();
        let options = ModalOptions {
            close_on_escape: false,
            ..ModalOptions::default()
        };
        let mut modal = Modal::new(lock, options);
        let now = Instant::now();
        modal.open(ring(), None, now);
        assert_eq!(modal.handle_key(Key::Escape, now), ModalOutcome::Ignored);
        assert!(modal.is_open());
    }

    #[test]
    fn backdrop_respects_option() {
        let options = ModalOptions {
            close_on_backdrop: false,
            ..ModalOptions::default()
        };
        let mut modal = Modal::new(ScrollLock::new(), options);
        let now = Instant::now();
        modal.open(ring(), None, now);
        assert_eq!(modal.backdrop_click(now), ModalOutcome::Ignored);
    }

    #[test]
    fn dropping_open_modal_unlocks_page() {
        let lock = ScrollLock::new();
        let mut modal = Modal::new(lock.clone(), ModalOptions::default());
        modal.open(ring(), None, Instant::now());
        drop(modal);
        assert!(!lock.is_locked());
    }

    #[test]
    fn presence_ramps_during_transitions() {
        let mut modal = Modal::new(ScrollLock::new(), ModalOptions::default());
        let t0 = Instant::now();
        assert_eq!(modal.presence(t0), 0.0);
        modal.open(ring(), None, t0);
        assert!(modal.presence(t0 + ENTER_DURATION / 2) > 0.4);
        modal.tick(t0 + ENTER_DURATION);
        assert_eq!(modal.presence(t0 + ENTER_DURATION), 1.0);
    }
}
