//! Viewport-entry observation (the headless `IntersectionObserver`).

use crate::layout::{Rect, Viewport};

/// Result of observing an element for one frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InViewChange {
    /// The element just became visible.
    Entered,
    /// The element just stopped being visible.
    Left,
    /// Nothing changed since the last observation.
    Unchanged,
}

/// Tracks whether an element intersects the (inset) viewport.
#[derive(Debug, Clone, PartialEq)]
pub struct InViewObserver {
    /// Latch after the first entry and never report leaving.
    pub once: bool,
    /// Vertical inset applied to the viewport (`margin: "-100px"` is 100.0).
    pub margin: f32,
    in_view: bool,
    latched: bool,
}

impl InViewObserver {
    /// Creates an observer.
    #[must_use]
    pub fn new(once: bool, margin: f32) -> Self {
        Self {
            once,
            margin,
            in_view: false,
            latched: false,
        }
    }

    /// One-shot observer without inset.
    #[must_use]
    pub fn once() -> Self {
        Self::new(true, 0.0)
    }

    /// Returns true while the element counts as visible.
    #[must_use]
    pub fn in_view(&self) -> bool {
        self.in_view
    }

    /// Returns true once a one-shot observer has fired.
    #[must_use]
    pub fn has_fired(&self) -> bool {
        self.latched
    }

    /// Observes `element` (document space) at `scroll_y`.
    pub fn observe(&mut self, element: Rect, scroll_y: f32, viewport: Viewport) -> InViewChange {
        if self.latched {
            return InViewChange::Unchanged;
        }

        let top = scroll_y + self.margin;
        let bottom = scroll_y + viewport.height - self.margin;
        let visible = bottom > top && element.bottom() > top && element.y < bottom;

        match (self.in_view, visible) {
            (false, true) => {
                self.in_view = true;
                if self.once {
                    self.latched = true;
                }
                InViewChange::Entered
            }
            (true, false) => {
                self.in_view = false;
                InViewChange::Left
            }
            _ => InViewChange::Unchanged,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEW: Viewport = Viewport::new(1440.0, 900.0);

    #[test]
    fn test_margin_delays_entry() {
        let mut observer = InViewObserver::new(true, 100.0);
        let card = Rect::new(0.0, 1700.0, 300.0, 375.0);

        // Card top is 50px inside the viewport bottom: inside the margin band.
        assert_eq!(observer.observe(card, 850.0, VIEW), InViewChange::Unchanged);
        assert_eq!(observer.observe(card, 1000.0, VIEW), InViewChange::Entered);
    }

    #[test]
    fn test_once_never_leaves() {
        let mut observer = InViewObserver::once();
        let card = Rect::new(0.0, 1000.0, 300.0, 300.0);

        assert_eq!(observer.observe(card, 500.0, VIEW), InViewChange::Entered);
        assert_eq!(observer.observe(card, 5000.0, VIEW), InViewChange::Unchanged);
        assert!(observer.in_view());
        assert!(observer.has_fired());
    }

    #[test]
    fn test_repeating_observer_reports_leave() {
        let mut observer = InViewObserver::new(false, 0.0);
        let heading = Rect::new(0.0, 1000.0, 300.0, 100.0);

        assert_eq!(observer.observe(heading, 500.0, VIEW), InViewChange::Entered);
        assert_eq!(observer.observe(heading, 2000.0, VIEW), InViewChange::Left);
        assert_eq!(observer.observe(heading, 500.0, VIEW), InViewChange::Entered);
    }
}
