//! Hover/focus-activated metrics dropdown.
//!
//! Shown on pointer enter, focus or touch; hidden after a short debounce
//! once both pointer and focus have left, immediately on Escape or on a
//! pointer press outside trigger and panel. One pending-hide deadline at a
//! time; every re-trigger replaces it.

use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

use crate::core::input::{Key, Point, Rect};

pub const MIN_PANEL_WIDTH: f32 = 280.0;
/// Panel height assumed until the renderer reports the real one.
pub const DEFAULT_PANEL_HEIGHT: f32 = 240.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DropdownOptions {
    pub hide_delay_ms: u64,
    /// Vertical gap between trigger and panel.
    pub gap: f32,
}

impl Default for DropdownOptions {
    fn default() -> Self {
        Self {
            hide_delay_ms: 100,
            gap: 12.0,
        }
    }
}

impl DropdownOptions {
    pub fn hide_delay(&self) -> Duration {
        Duration::from_millis(self.hide_delay_ms)
    }
}

/// Where the panel is drawn, in viewport coordinates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelPlacement {
    pub top: f32,
    pub left: f32,
    pub width: f32,
}

impl PanelPlacement {
    pub fn below(trigger: Rect, gap: f32) -> Self {
        Self {
            top: trigger.bottom() + gap,
            left: trigger.left,
            width: trigger.width,
        }
    }

    /// Width actually rendered, never narrower than the panel minimum.
    pub fn rendered_width(&self) -> f32 {
        self.width.max(MIN_PANEL_WIDTH)
    }
}

#[derive(Debug, Clone)]
pub struct Dropdown {
    options: DropdownOptions,
    visible: bool,
    hovered: bool,
    focused: bool,
    hide_at: Option<Instant>,
    placement: Option<PanelPlacement>,
    panel_height: f32,
}

impl Dropdown {
    pub fn new(options: DropdownOptions) -> Self {
        Self {
            options,
            visible: false,
            hovered: false,
            focused: false,
            hide_at: None,
            placement: None,
            panel_height: DEFAULT_PANEL_HEIGHT,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn pending_hide(&self) -> Option<Instant> {
        self.hide_at
    }

    /// Placement computed the last time the panel became visible.
    pub fn placement(&self) -> Option<PanelPlacement> {
        self.placement.filter(|_| self.visible)
    }

    pub fn pointer_enter(&mut self, trigger: Rect) {
        self.hovered = true;
        self.show(trigger);
    }

    pub fn pointer_leave(&mut self, now: Instant) {
        self.hovered = false;
        if !self.focused {
            self.schedule_hide(now);
        }
    }

    pub fn focus(&mut self, trigger: Rect) {
        self.focused = true;
        self.show(trigger);
    }

    pub fn blur(&mut self, now: Instant) {
        self.focused = false;
        if !self.hovered {
            self.schedule_hide(now);
        }
    }

    pub fn touch_start(&mut self, trigger: Rect) {
        if !self.visible {
            self.show(trigger);
        }
    }

    /// Keys pressed while the trigger holds focus.
    pub fn key(&mut self, key: Key, trigger: Rect) {
        match key {
            Key::Escape => {
                self.focused = false;
                self.hide();
            }
            Key::Enter | Key::Space => {
                if self.visible {
                    self.hide();
                } else {
                    self.show(trigger);
                }
            }
            _ => {}
        }
    }

    /// Pointer or touch press anywhere on the page.
    pub fn pointer_down(&mut self, at: Point, trigger: Rect) {
        if !self.visible {
            return;
        }
        if !trigger.contains(at) && !self.panel_rect().is_some_and(|r| r.contains(at)) {
            tracing::trace!("dropdown dismissed by outside press");
            self.hide();
        }
    }

    pub fn set_panel_height(&mut self, height: f32) {
        self.panel_height = height;
    }

    pub fn panel_rect(&self) -> Option<Rect> {
        self.placement()
            .map(|p| Rect::new(p.top, p.left, p.rendered_width(), self.panel_height))
    }

    /// Fire the pending hide if its deadline passed.
    pub fn tick(&mut self, now: Instant) {
        if self.hide_at.is_some_and(|at| now >= at) {
            self.hide();
        }
    }

    /// Recompute placement from the trigger's current box, e.g. after a resize.
    pub fn reposition(&mut self, trigger: Rect) {
        if self.visible {
            self.placement = Some(PanelPlacement::below(trigger, self.options.gap));
        }
    }

    fn show(&mut self, trigger: Rect) {
        self.hide_at = None;
        self.visible = true;
        self.placement = Some(PanelPlacement::below(trigger, self.options.gap));
    }

    fn hide(&mut self) {
        self.hide_at = None;
        self.visible = false;
    }

    fn schedule_hide(&mut self, now: Instant) {
        if self.visible {
            self.hide_at = Some(now + self.options.hide_delay());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TRIGGER: Rect = Rect::new(100.0, 40.0, 300.0, 48.0);

    #[test]
    fn placement_sits_below_trigger() {
        let mut dropdown = Dropdown::new(DropdownOptions::default());
        dropdown.pointer_enter(TRIGGER);
        assert_eq!(
            dropdown.placement(),
            Some(PanelPlacement {
                top: 160.0,
                left: 40.0,
                width: 300.0
            })
        );
    }

    #[test]
    fn narrow_trigger_gets_minimum_width() {
        let placement = PanelPlacement::below(Rect::new(0.0, 0.0, 120.0, 20.0), 12.0);
        assert_eq!(placement.width, 120.0);
        assert_eq!(placement.rendered_width(), MIN_PANEL_WIDTH);
    }

    #[test]
    fn leave_hides_after_debounce() {
        let mut dropdown = Dropdown::new(DropdownOptions::default());
        let t0 = Instant::now();
        dropdown.pointer_enter(TRIGGER);
        dropdown.pointer_leave(t0);
        dropdown.tick(t0 + Duration::from_millis(99));
        assert!(dropdown.is_visible());
        dropdown.tick(t0 + Duration::from_millis(100));
        assert!(!dropdown.is_visible());
    }

    #[test]
    fn reenter_cancels_pending_hide() {
        let mut dropdown = Dropdown::new(DropdownOptions::default());
        let t0 = Instant::now();
        dropdown.pointer_enter(TRIGGER);
        dropdown.pointer_leave(t0);
        dropdown.pointer_enter(TRIGGER);
        assert!(dropdown.pending_hide().is_none());
        dropdown.tick(t0 + Duration::from_secs(1));
        assert!(dropdown.is_visible());
    }

    #[test]
    fn focus_holds_panel_open_after_leave() {
        let mut dropdown = Dropdown::new(DropdownOptions::default());
        let t0 = Instant::now();
        dropdown.pointer_enter(TRIGGER);
        dropdown.focus(TRIGGER);
        dropdown.pointer_leave(t0);
        dropdown.tick(t0 + Duration::from_secs(1));
        assert!(dropdown.is_visible());
    }

    #[test]
    fn escape_hides_even_with_focus() {
        let mut dropdown = Dropdown::new(DropdownOptions::default());
        dropdown.focus(TRIGGER);
        dropdown.key(Key::Escape, TRIGGER);
        assert!(!dropdown.is_visible());
        assert!(!dropdown.is_focused());
    }

    #[test]
    fn enter_toggles() {
        let mut dropdown = Dropdown::new(DropdownOptions::default());
        dropdown.key(Key::Enter, TRIGGER);
        assert!(dropdown.is_visible());
        dropdown.key(Key::Space, TRIGGER);
        assert!(!dropdown.is_visible());
    }

    #[test]
    fn outside_press_hides_but_panel_press_does_not() {
        let mut dropdown = Dropdown::new(DropdownOptions::default());
        dropdown.touch_start(TRIGGER);
        dropdown.pointer_down(Point::new(60.0, 200.0), TRIGGER);
        assert!(dropdown.is_visible());
        dropdown.pointer_down(Point::new(600.0, 10.0), TRIGGER);
        assert!(!dropdown.is_visible());
    }
}
