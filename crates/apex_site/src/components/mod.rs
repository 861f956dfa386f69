//! The page's components, in composition order.
//!
//! ```text
//! ┌─ fixed ───────────────────────────────┐
//! │ CustomCursor (z 9999)                 │
//! │ ProgressBar  (z 100)                  │
//! │ Navbar       (z 50)                   │
//! ├─ flow ────────────────────────────────┤
//! │ Hero → Marquee → Projects → Stats     │
//! │      → Contact → Footer               │
//! └───────────────────────────────────────┘
//! ```
//!
//! Every component registers its elements in the shared
//! [`WidgetTree`] when it is built and owns its motion state. The page
//! lays components out top to bottom, hit-tests the pointer against the
//! tree, and lets each component pick up the hover flags it cares about.

mod contact;
mod cursor;
mod footer;
mod hero;
mod marquee;
mod navbar;
mod progress;
mod projects;
mod stats;

pub use contact::Contact;
pub use cursor::CustomCursor;
pub use footer::Footer;
pub use hero::Hero;
pub use marquee::Marquee;
pub use navbar::Navbar;
pub use progress::ProgressBar;
pub use projects::{ImageStatus, ProjectCard, Projects};
pub use stats::{StatBadge, Stats};

use apex_ui::{
    Color, Easing, FontFace, Motion, Rect, RenderCommand, Transition, Viewport, Widget,
    WidgetTree,
};

/// A piece of the page that takes part in layout and hover tracking.
pub trait Component: Widget {
    /// Places the component's elements with its top edge at document
    /// offset `top`. Returns the height it adds to the document flow
    /// (zero for fixed chrome).
    fn layout(&mut self, tree: &mut WidgetTree, viewport: Viewport, top: f32) -> f32;

    /// Picks up hover flags after the page has hit-tested the pointer.
    fn sync_hover(&mut self, _tree: &WidgetTree) {}
}

/// Opacity and an offset that animate in together (`initial` → `animate`).
#[derive(Debug, Clone)]
pub struct Entrance {
    opacity: Motion,
    offset: Motion,
    hidden_offset: f32,
    shown: bool,
}

impl Entrance {
    /// Hidden entrance that slides in from `hidden_offset`.
    #[must_use]
    pub fn new(hidden_offset: f32, transition: Transition) -> Self {
        Self {
            opacity: Motion::new(0.0, transition),
            offset: Motion::new(hidden_offset, transition),
            hidden_offset,
            shown: false,
        }
    }

    /// Same, but the offset follows its own transition.
    #[must_use]
    pub fn with_offset_transition(mut self, transition: Transition) -> Self {
        self.offset = Motion::new(self.offset.value(), transition);
        self
    }

    /// Animates to fully visible at rest.
    pub fn show(&mut self) {
        self.shown = true;
        self.opacity.set_target(1.0);
        self.offset.set_target(0.0);
    }

    /// Animates back to the hidden state.
    pub fn hide(&mut self) {
        self.shown = false;
        self.opacity.set_target(0.0);
        self.offset.set_target(self.hidden_offset);
    }

    /// Advances both motions.
    pub fn update(&mut self, dt: f32) {
        self.opacity.update(dt);
        self.offset.update(dt);
    }

    /// Current opacity.
    #[must_use]
    pub fn opacity(&self) -> f32 {
        self.opacity.value().clamp(0.0, 1.0)
    }

    /// Current offset.
    #[must_use]
    pub fn offset(&self) -> f32 {
        self.offset.value()
    }

    /// Returns true once `show` has been called (and not undone).
    #[must_use]
    pub fn is_shown(&self) -> bool {
        self.shown
    }

    /// Returns true when neither motion is moving.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.opacity.is_settled() && self.offset.is_settled()
    }
}

/// Default CSS-style hover transition (`transition-colors`, 150ms).
pub(crate) const HOVER: Transition = Transition::tween(0.15, Easing::EaseOut);

/// Text run in viewport space with `opacity` folded into the color.
pub(crate) fn text(
    content: &str,
    x: f32,
    y: f32,
    color: Color,
    opacity: f32,
    font_size: f32,
    font: FontFace,
) -> RenderCommand {
    RenderCommand::Text {
        text: content.to_owned(),
        x,
        y,
        color: color.with_alpha(color.a * opacity),
        font_size,
        font,
    }
}

/// Width of a `px-N` padded label.
pub(crate) fn padded_width(label: &str, font_size: f32, font: FontFace, tracking: f32, px: f32) -> f32 {
    font.measure(label, font_size, tracking) + px * 2.0
}

/// Greedy word wrap of `paragraph` into lines no wider than `max_width`.
///
/// A single word wider than `max_width` gets a line of its own.
pub(crate) fn wrap(paragraph: &str, font: FontFace, font_size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in paragraph.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_owned()
        } else {
            format!("{current} {word}")
        };
        if !current.is_empty() && font.measure(&candidate, font_size, 0.0) > max_width {
            lines.push(std::mem::replace(&mut current, word.to_owned()));
        } else {
            current = candidate;
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Rect with `height` centered vertically inside `row`, `width` wide at `x`.
pub(crate) fn centered_in_row(row: Rect, x: f32, width: f32, height: f32) -> Rect {
    Rect::new(x, row.y + (row.height - height) * 0.5, width, height)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entrance_show_and_hide() {
        let mut entrance = Entrance::new(20.0, Transition::tween(0.3, Easing::EaseOut));
        assert_eq!(entrance.opacity(), 0.0);
        assert_eq!(entrance.offset(), 20.0);

        entrance.show();
        for _ in 0..30 {
            entrance.update(0.016);
        }
        assert!(entrance.is_settled());
        assert_eq!(entrance.opacity(), 1.0);
        assert_eq!(entrance.offset(), 0.0);

        entrance.hide();
        assert!(!entrance.is_shown());
        for _ in 0..30 {
            entrance.update(0.016);
        }
        assert_eq!(entrance.offset(), 20.0);
    }

    #[test]
    fn test_wrap_breaks_on_width() {
        // Body glyphs are 8px wide at 16px.
        let lines = wrap("one two three four", FontFace::Body, 16.0, 80.0);
        assert_eq!(lines, vec!["one two", "three four"]);
        assert!(wrap("   ", FontFace::Body, 16.0, 80.0).is_empty());
        assert_eq!(wrap("unbreakable", FontFace::Body, 16.0, 10.0), vec!["unbreakable"]);
    }

    #[test]
    fn test_text_folds_opacity() {
        let command = text("A", 0.0, 0.0, Color::WHITE, 0.5, 16.0, FontFace::Body);
        let RenderCommand::Text { color, .. } = command else {
            panic!("expected text");
        };
        assert_eq!(color.a, 0.5);
    }
}
