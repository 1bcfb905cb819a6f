use std::borrow::Cow;
use std::fmt;

/// Identifier of a focusable element.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FocusId(Cow<'static, str>);

impl FocusId {
    pub const fn fixed(id: &'static str) -> Self {
        Self(Cow::Borrowed(id))
    }

    pub fn new(id: impl Into<String>) -> Self {
        Self(Cow::Owned(id.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for FocusId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Direction of a Tab press.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabDirection {
    Forward,
    Backward,
}

impl TabDirection {
    pub fn from_shift(shift: bool) -> Self {
        if shift {
            TabDirection::Backward
        } else {
            TabDirection::Forward
        }
    }
}

/// Focusable descendants of a container, in tab order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FocusRing {
    container: FocusId,
    items: Vec<FocusId>,
}

impl FocusRing {
    pub fn new(container: FocusId, items: Vec<FocusId>) -> Self {
        Self { container, items }
    }

    pub fn container(&self) -> &FocusId {
        &self.container
    }

    pub fn items(&self) -> &[FocusId] {
        &self.items
    }

    /// Where focus lands when the container opens.
    pub fn initial(&self) -> &FocusId {
        self.items.first().unwrap_or(&self.container)
    }

    pub fn contains(&self, id: &FocusId) -> bool {
        id == &self.container || self.items.contains(id)
    }

    /// Next focus target for a Tab press from `current`, wrapping at both
    /// ends. Focus outside the ring is pulled back in.
    pub fn next(&self, current: Option<&FocusId>, direction: TabDirection) -> &FocusId {
        let (Some(first), Some(last)) = (self.items.first(), self.items.last()) else {
            return &self.container;
        };
        let position = current.and_then(|id| self.items.iter().position(|item| item == id));
        match (position, direction) {
            (None, TabDirection::Forward) => first,
            (None, TabDirection::Backward) => last,
            (Some(i), TabDirection::Forward) => self.items.get(i + 1).unwrap_or(first),
            (Some(0), TabDirection::Backward) => last,
            (Some(i), TabDirection::Backward) => &self.items[i - 1],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring() -> FocusRing {
        FocusRing::new(
            FocusId::fixed("dialog"),
            vec![FocusId::fixed("a"), FocusId::fixed("b"), FocusId::fixed("c")],
        )
    }

    #[test]
    fn tab_wraps_forward_and_backward() {
        let ring = ring();
        assert_eq!(ring.next(Some(&FocusId::fixed("c")), TabDirection::Forward).as_str(), "a");
        assert_eq!(ring.next(Some(&FocusId::fixed("a")), TabDirection::Backward).as_str(), "c");
        assert_eq!(ring.next(Some(&FocusId::fixed("a")), TabDirection::Forward).as_str(), "b");
    }

    #[test]
    fn empty_ring_keeps_container() {
        let ring = FocusRing::new(FocusId::fixed("dialog"), vec![]);
        assert_eq!(ring.initial().as_str(), "dialog");
        assert_eq!(ring.next(None, TabDirection::Forward).as_str(), "dialog");
    }

    #[test]
    fn container_focus_moves_into_ring() {
        let ring = ring();
        let dialog = FocusId::fixed("dialog");
        assert_eq!(ring.next(Some(&dialog), TabDirection::Forward).as_str(), "a");
        assert_eq!(ring.next(Some(&dialog), TabDirection::Backward).as_str(), "c");
    }
}
