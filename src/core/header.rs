//! Viewport classes and the fixed header.

use serde::{Deserialize, Serialize};

pub const DEFAULT_MOBILE_BREAKPOINT: f32 = 768.0;
pub const DEFAULT_SCROLLED_THRESHOLD: f32 = 50.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Breakpoint {
    Mobile,
    Desktop,
}

impl Breakpoint {
    pub fn from_width(width: f32) -> Self {
        Self::with_limit(width, DEFAULT_MOBILE_BREAKPOINT)
    }

    /// Widths up to and including `limit` are mobile.
    pub fn with_limit(width: f32, limit: f32) -> Self {
        if width <= limit {
            Breakpoint::Mobile
        } else {
            Breakpoint::Desktop
        }
    }

    pub fn is_mobile(self) -> bool {
        self == Breakpoint::Mobile
    }
}

/// Header appearance: transparent at the top, glass panel once scrolled.
#[derive(Debug, Clone, Copy)]
pub struct Header {
    threshold: f32,
    scrolled: bool,
}

impl Header {
    pub fn new(threshold: f32) -> Self {
        Self {
            threshold,
            scrolled: false,
        }
    }

    pub fn is_scrolled(&self) -> bool {
        self.scrolled
    }

    /// Returns whether the appearance changed.
    pub fn on_scroll(&mut self, scroll_y: f32) -> bool {
        let scrolled = scroll_y > self.threshold;
        let changed = scrolled != self.scrolled;
        self.scrolled = scrolled;
        changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_turns_solid_past_threshold() {
        let mut header = Header::new(DEFAULT_SCROLLED_THRESHOLD);
        assert!(!header.on_scroll(50.0));
        assert!(!header.is_scrolled());
        assert!(header.on_scroll(51.0));
        assert!(header.is_scrolled());
        assert!(header.on_scroll(0.0));
    }
}
