//! Core widget types and traits.

use crate::class::ClassList;
use crate::input::InputState;
use crate::layout::{Rect, Viewport};
use crate::render::RenderCommand;

/// Unique identifier for a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct WidgetId(pub u64);

impl WidgetId {
    /// Creates a new widget ID.
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Widget state flags (bitfield for efficiency).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WidgetFlags(u32);

impl WidgetFlags {
    /// Widget is visible.
    pub const VISIBLE: u32 = 1 << 0;
    /// Widget is enabled (can receive input).
    pub const ENABLED: u32 = 1 << 1;
    /// Widget is hovered.
    pub const HOVERED: u32 = 1 << 3;
    /// Widget is pressed.
    pub const PRESSED: u32 = 1 << 4;
    /// Widget needs layout recalculation.
    pub const DIRTY_LAYOUT: u32 = 1 << 5;
    /// Widget needs redraw.
    pub const DIRTY_RENDER: u32 = 1 << 6;

    /// Default flags for a new widget.
    pub const DEFAULT: Self =
        Self(Self::VISIBLE | Self::ENABLED | Self::DIRTY_LAYOUT | Self::DIRTY_RENDER);

    /// Creates new flags with default values.
    #[must_use]
    pub const fn new() -> Self {
        Self::DEFAULT
    }

    /// Returns true if the flag is set.
    #[inline]
    #[must_use]
    pub const fn has(self, flag: u32) -> bool {
        (self.0 & flag) != 0
    }

    /// Sets a flag.
    #[inline]
    pub fn set(&mut self, flag: u32) {
        self.0 |= flag;
    }

    /// Clears a flag.
    #[inline]
    pub fn clear(&mut self, flag: u32) {
        self.0 &= !flag;
    }

    /// Sets or clears a flag.
    #[inline]
    pub fn assign(&mut self, flag: u32, on: bool) {
        if on {
            self.set(flag);
        } else {
            self.clear(flag);
        }
    }
}

impl Default for WidgetFlags {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// Element kind, as far as interaction is concerned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tag {
    /// Generic container.
    Div,
    /// Link (`<a>`).
    Anchor,
    /// Button.
    Button,
    /// Image.
    Image,
    /// Heading text.
    Heading,
    /// Page section.
    Section,
    /// Navigation bar.
    Nav,
    /// Page footer.
    Footer,
    /// Inline text.
    Span,
}

impl Tag {
    /// Links and buttons are interactive on their own.
    #[must_use]
    pub const fn is_interactive(self) -> bool {
        matches!(self, Self::Anchor | Self::Button)
    }
}

/// Which coordinate space an element's rect lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Positioning {
    /// Document space; moves with scroll.
    #[default]
    Flow,
    /// Viewport space; ignores scroll.
    Fixed,
}

/// Per-element state stored in the [`WidgetTree`](super::WidgetTree).
#[derive(Debug, Clone)]
pub struct WidgetState {
    /// Widget identifier.
    pub id: WidgetId,
    /// Element kind.
    pub tag: Tag,
    /// Utility classes.
    pub classes: ClassList,
    /// Link target for anchors.
    pub href: Option<String>,
    /// Bounding rectangle (set after layout).
    pub rect: Rect,
    /// Coordinate space of `rect`.
    pub positioning: Positioning,
    /// State flags.
    pub flags: WidgetFlags,
    /// Z-index for layering.
    pub z_index: i32,
    /// Parent widget ID (None for root).
    pub parent: Option<WidgetId>,
}

impl WidgetState {
    /// Creates a new widget state.
    #[must_use]
    pub fn new(id: WidgetId, tag: Tag) -> Self {
        Self {
            id,
            tag,
            classes: ClassList::new(),
            href: None,
            rect: Rect::ZERO,
            positioning: Positioning::Flow,
            flags: WidgetFlags::DEFAULT,
            z_index: 0,
            parent: None,
        }
    }

    /// Sets the class list.
    #[must_use]
    pub fn with_classes(mut self, classes: &str) -> Self {
        self.classes = ClassList::new().with(classes);
        self
    }

    /// Sets the link target.
    #[must_use]
    pub fn with_href(mut self, href: impl Into<String>) -> Self {
        self.href = Some(href.into());
        self
    }

    /// Marks the element as fixed to the viewport.
    #[must_use]
    pub fn fixed(mut self) -> Self {
        self.positioning = Positioning::Fixed;
        self
    }

    /// Sets the z-index.
    #[must_use]
    pub fn with_z(mut self, z_index: i32) -> Self {
        self.z_index = z_index;
        self
    }

    /// Excludes the element from hit testing (`pointer-events-none`).
    #[must_use]
    pub fn pointer_events_none(mut self) -> Self {
        self.flags.clear(WidgetFlags::ENABLED);
        self
    }

    /// Returns true if the widget is visible.
    #[inline]
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.flags.has(WidgetFlags::VISIBLE)
    }

    /// Returns true if the widget accepts input.
    #[inline]
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.flags.has(WidgetFlags::ENABLED)
    }

    /// Returns true if the widget is hovered.
    #[inline]
    #[must_use]
    pub fn is_hovered(&self) -> bool {
        self.flags.has(WidgetFlags::HOVERED)
    }

    /// Shows or hides the widget.
    #[inline]
    pub fn set_visible(&mut self, visible: bool) {
        if self.is_visible() != visible {
            self.flags.assign(WidgetFlags::VISIBLE, visible);
            self.mark_dirty();
        }
    }

    /// Marks the widget as needing redraw.
    #[inline]
    pub fn mark_dirty(&mut self) {
        self.flags.set(WidgetFlags::DIRTY_RENDER);
    }
}

/// Response from widget update.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WidgetResponse {
    /// Widget was clicked.
    pub clicked: bool,
    /// Pointer just entered the widget.
    pub hovered: bool,
    /// Pointer just left the widget.
    pub unhovered: bool,
    /// Widget value changed.
    pub changed: bool,
    /// A reveal animation started this frame.
    pub revealed: bool,
}

impl WidgetResponse {
    /// Combines two responses.
    #[must_use]
    pub fn merge(self, other: Self) -> Self {
        Self {
            clicked: self.clicked || other.clicked,
            hovered: self.hovered || other.hovered,
            unhovered: self.unhovered || other.unhovered,
            changed: self.changed || other.changed,
            revealed: self.revealed || other.revealed,
        }
    }
}

/// Everything a component sees during one frame.
#[derive(Debug, Clone, Copy)]
pub struct FrameContext<'a> {
    /// Seconds since the previous frame.
    pub dt: f32,
    /// Seconds since mount.
    pub time: f32,
    /// Document scroll offset.
    pub scroll_y: f32,
    /// Current viewport.
    pub viewport: Viewport,
    /// Pointer state.
    pub input: &'a InputState,
}

impl FrameContext<'_> {
    /// Converts a document-space rect to viewport space.
    #[must_use]
    pub fn to_screen(&self, rect: Rect) -> Rect {
        rect.translate(0.0, -self.scroll_y)
    }

    /// Returns true if a document-space rect overlaps the viewport.
    #[must_use]
    pub fn is_on_screen(&self, rect: Rect) -> bool {
        self.viewport.document_rect(self.scroll_y).intersects(&rect)
    }
}

/// Base trait for page components.
pub trait Widget {
    /// Root element of the component.
    fn root(&self) -> WidgetId;

    /// Advances animations and reacts to the frame's input.
    ///
    /// Called every frame, even without input events.
    fn update(&mut self, ctx: &FrameContext<'_>) -> WidgetResponse;

    /// Generates render commands for this component, in viewport space.
    fn render(&self, ctx: &FrameContext<'_>, commands: &mut Vec<RenderCommand>);

    /// Layer the component renders on.
    fn z_index(&self) -> i32 {
        0
    }

    /// Returns true when no animation of this component is in flight.
    fn is_settled(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_assign() {
        let mut flags = WidgetFlags::new();
        assert!(flags.has(WidgetFlags::VISIBLE));
        flags.assign(WidgetFlags::VISIBLE, false);
        assert!(!flags.has(WidgetFlags::VISIBLE));
        flags.assign(WidgetFlags::HOVERED, true);
        assert!(flags.has(WidgetFlags::HOVERED));
    }

    #[test]
    fn test_tags() {
        assert!(Tag::Anchor.is_interactive());
        assert!(Tag::Button.is_interactive());
        assert!(!Tag::Div.is_interactive());
    }

    #[test]
    fn test_context_to_screen() {
        let input = InputState::new();
        let ctx = FrameContext {
            dt: 0.016,
            time: 0.0,
            scroll_y: 400.0,
            viewport: Viewport::DESKTOP,
            input: &input,
        };
        let rect = Rect::new(0.0, 1000.0, 10.0, 10.0);
        assert_eq!(ctx.to_screen(rect).y, 600.0);
        assert!(ctx.is_on_screen(rect));
        assert!(!ctx.is_on_screen(Rect::new(0.0, 1400.0, 10.0, 10.0)));
    }
}
