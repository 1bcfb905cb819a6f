//! Page-level scroll lock.
//!
//! The page is locked while any [`ScrollLockGuard`] is alive. Overlays keep
//! their guard in an `Option` so a repeated open never takes a second guard,
//! and dropping the overlay releases it on every path.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

#[derive(Debug, Clone, Default)]
pub struct ScrollLock {
    holders: Arc<AtomicUsize>,
}

impl ScrollLock {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use = "the page unlocks as soon as the guard is dropped"]
    pub fn acquire(&self) -> ScrollLockGuard {
        let before = self.holders.fetch_add(1, Ordering::AcqRel);
        if before == 0 {
            tracing::debug!("page scroll locked");
        }
        ScrollLockGuard {
            holders: Arc::clone(&self.holders),
        }
    }

    pub fn is_locked(&self) -> bool {
        self.holders.load(Ordering::Acquire) > 0
    }

    pub fn holders(&self) -> usize {
        self.holders.load(Ordering::Acquire)
    }
}

#[derive(Debug)]
pub struct ScrollLockGuard {
    holders: Arc<AtomicUsize>,
}

impl Drop for ScrollLockGuard {
    fn drop(&mut self) {
        let before = self.holders.fetch_sub(1, Ordering::AcqRel);
        if before == 1 {
            tracing::debug!("page scroll unlocked");
        }
    }
}

/// Take a guard into `slot` unless one is already held.
pub fn hold(lock: &ScrollLock, slot: &mut Option<ScrollLockGuard>) {
    if slot.is_none() {
        *slot = Some(lock.acquire());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guard_releases_on_drop() {
        let lock = ScrollLock::new();
        {
            let _guard = lock.acquire();
            assert!(lock.is_locked());
        }
        assert!(!lock.is_locked());
    }

    #[test]
    fn overlapping_holders() {
        let lock = ScrollLock::new();
        let a = lock.acquire();
        let b = lock.acquire();
        drop(a);
        assert!(lock.is_locked());
        drop(b);
        assert!(!lock.is_locked());
    }

    #[test]
    fn hold_is_idempotent() {
        let lock = ScrollLock::new();
        let mut slot = None;
        hold(&lock, &mut slot);
        hold(&lock, &mut slot);
        assert_eq!(lock.holders(), 1);
        slot = None;
        assert!(slot.is_none());
        assert!(!lock.is_locked());
    }
}
