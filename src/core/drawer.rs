//! Mobile navigation drawer.

use crate::core::scroll_lock::{self, ScrollLock, ScrollLockGuard};
use crate::models::{Anchor, NavigationEntry, SectionId};

#[derive(Debug)]
pub struct NavDrawer {
    lock: ScrollLock,
    guard: Option<ScrollLockGuard>,
}

impl NavDrawer {
    pub fn new(lock: ScrollLock) -> Self {
        Self { lock, guard: None }
    }

    pub fn is_open(&self) -> bool {
        self.guard.is_some()
    }

    pub fn toggle(&mut self) {
        if self.is_open() {
            self.close();
        } else {
            self.open();
        }
    }

    pub fn open(&mut self) {
        scroll_lock::hold(&self.lock, &mut self.guard);
    }

    pub fn close(&mut self) {
        if self.guard.take().is_some() {
            tracing::debug!("navigation drawer closed");
        }
    }

    /// Pick a navigation entry: scroll to its anchor, then close.
    pub fn select(&mut self, entry: &NavigationEntry) -> Anchor {
        self.close();
        entry.href.clone()
    }

    /// The "Hire Me" call to action.
    pub fn hire_me(&mut self) -> Anchor {
        self.close();
        SectionId::Contact.anchor()
    }

    /// The layout left the mobile breakpoint.
    pub fn on_desktop(&mut self) {
        self.close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_locks_and_unlocks() {
        let lock = ScrollLock::new();
        let mut drawer = NavDrawer::new(lock.clone());
        drawer.toggle();
        assert!(drawer.is_open());
        assert!(lock.is_locked());
        drawer.toggle();
        assert!(!lock.is_locked());
    }

    #[test]
    fn selecting_entry_scrolls_and_closes() {
        let lock = ScrollLock::new();
        let mut drawer = NavDrawer::new(lock.clone());
        drawer.open();
        let entry = NavigationEntry {
            name: "Research".to_string(),
            href: Anchor::new("#research"),
        };
        assert_eq!(drawer.select(&entry), Anchor::new("#research"));
        assert!(!drawer.is_open());
        assert!(!lock.is_locked());
    }

    #[test]
    fn hire_me_targets_contact() {
        let mut drawer = NavDrawer::new(ScrollLock::new());
        drawer.open();
        assert_eq!(drawer.hire_me(), Anchor::new("#contact"));
    }
}
