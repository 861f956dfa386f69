//! Spring-following cursor ring.
//!
//! The ring is a fixed `pointer-events-none` element, so it never wins a
//! hit test. It listens for `PointerMove` (where to go) and `PointerOver`
//! (whether the element under the pointer is interactive) and applies
//! what arrived at the start of each frame.

use apex_ui::{
    AnimatedColor, EventHub, EventKind, FrameContext, Rect, RenderCommand, Spring, SpringConfig,
    Subscription, Tag, Theme, Transition, UiEvent, Viewport, Widget, WidgetId, WidgetResponse,
    WidgetState, WidgetTree,
};

use super::Component;

/// Ring tint alpha over interactive elements.
const HOVER_TINT: f32 = 0.2;

/// The custom cursor.
#[derive(Debug)]
pub struct CustomCursor {
    root: WidgetId,
    size: f32,
    hover_scale: f32,
    x: Spring,
    y: Spring,
    scale: Spring,
    tint: AnimatedColor,
    hovering: bool,
    visible: bool,
    theme: Theme,
    pointer_move: Subscription,
    pointer_over: Subscription,
}

impl CustomCursor {
    /// Layer (`z-[9999]`).
    pub const Z_INDEX: i32 = 9999;

    /// Registers the ring in `tree` and subscribes to pointer events on `events`.
    pub fn new(
        tree: &mut WidgetTree,
        events: &EventHub,
        size: f32,
        hover_scale: f32,
        theme: &Theme,
    ) -> Self {
        let id = tree.next_id();
        let root = tree.add_root(
            WidgetState::new(id, Tag::Div)
                .with_classes(
                    "fixed top-0 left-0 w-8 h-8 border border-apex-yellow rounded-full pointer-events-none z-[9999] hidden md:block",
                )
                .fixed()
                .with_z(Self::Z_INDEX)
                .pointer_events_none(),
        );
        Self {
            root,
            size,
            hover_scale,
            x: Spring::new(-size * 0.5, SpringConfig::CURSOR),
            y: Spring::new(-size * 0.5, SpringConfig::CURSOR),
            scale: Spring::new(1.0, SpringConfig::CURSOR),
            tint: AnimatedColor::new(
                theme.primary.with_alpha(0.0),
                Transition::spring(SpringConfig::CURSOR),
            ),
            hovering: false,
            visible: true,
            theme: *theme,
            pointer_move: events.subscribe(EventKind::PointerMove),
            pointer_over: events.subscribe(EventKind::PointerOver),
        }
    }

    /// Retargets the ring so it centres on the pointer.
    pub fn on_pointer_move(&mut self, x: f32, y: f32) {
        let half = self.size * 0.5;
        self.x.set_target(x - half);
        self.y.set_target(y - half);
    }

    /// Grows and tints the ring over interactive elements.
    pub fn set_hovering(&mut self, hovering: bool) {
        if hovering == self.hovering {
            return;
        }
        self.hovering = hovering;
        let (scale, alpha) = if hovering {
            (self.hover_scale, HOVER_TINT)
        } else {
            (1.0, 0.0)
        };
        self.scale.set_target(scale);
        self.tint.set_target(self.theme.primary.with_alpha(alpha));
    }

    /// Top-left corner of the (unscaled) ring.
    #[must_use]
    pub fn position(&self) -> (f32, f32) {
        (self.x.value(), self.y.value())
    }

    /// Where the ring is heading.
    #[must_use]
    pub fn target(&self) -> (f32, f32) {
        (self.x.target(), self.y.target())
    }

    /// Current scale.
    #[must_use]
    pub fn scale(&self) -> f32 {
        self.scale.value()
    }

    /// Current fill alpha.
    #[must_use]
    pub fn tint(&self) -> f32 {
        self.tint.value().a
    }

    /// Returns true while over an interactive element.
    #[must_use]
    pub fn is_hovering(&self) -> bool {
        self.hovering
    }

    /// Hidden below `md`.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    fn apply_events(&mut self) {
        for event in self.pointer_move.drain() {
            if let UiEvent::PointerMove { x, y } = event {
                self.on_pointer_move(x, y);
            }
        }
        for event in self.pointer_over.drain() {
            if let UiEvent::PointerOver { interactive } = event {
                self.set_hovering(interactive);
            }
        }
    }
}

impl Widget for CustomCursor {
    fn root(&self) -> WidgetId {
        self.root
    }

    fn update(&mut self, ctx: &FrameContext<'_>) -> WidgetResponse {
        self.apply_events();
        self.x.update(ctx.dt);
        self.y.update(ctx.dt);
        self.scale.update(ctx.dt);
        self.tint.update(ctx.dt);
        WidgetResponse {
            changed: !self.is_settled(),
            ..WidgetResponse::default()
        }
    }

    fn render(&self, _ctx: &FrameContext<'_>, commands: &mut Vec<RenderCommand>) {
        if !self.visible {
            return;
        }
        let (x, y) = self.position();
        let bounds = Rect::new(x, y, self.size, self.size).scale_about_center(self.scale());
        let radius = bounds.width * 0.5;
        let fill = self.tint.value();
        if !fill.is_transparent() {
            commands.push(RenderCommand::Rect {
                bounds,
                color: fill,
                corner_radius: radius,
            });
        }
        commands.push(RenderCommand::RectOutline {
            bounds,
            color: self.theme.primary,
            width: 1.0,
            corner_radius: radius,
        });
    }

    fn z_index(&self) -> i32 {
        Self::Z_INDEX
    }

    fn is_settled(&self) -> bool {
        self.x.is_at_rest()
            && self.y.is_at_rest()
            && self.scale.is_at_rest()
            && self.tint.is_settled()
    }
}

impl Component for CustomCursor {
    fn layout(&mut self, tree: &mut WidgetTree, viewport: Viewport, _top: f32) -> f32 {
        self.visible = viewport.breakpoint().is_desktop();
        let (x, y) = self.position();
        tree.set_rect(self.root, Rect::new(x, y, self.size, self.size));
        tree.set_visible(self.root, self.visible);
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use apex_ui::InputState;

    fn cursor(events: &EventHub) -> (CustomCursor, WidgetTree) {
        let mut tree = WidgetTree::new();
        let cursor = CustomCursor::new(&mut tree, events, 32.0, 2.5, &Theme::APEX);
        (cursor, tree)
    }

    fn settle(cursor: &mut CustomCursor, seconds: f32) {
        let input = InputState::new();
        let frames = (seconds / 0.016).ceil() as usize;
        for _ in 0..frames {
            let ctx = FrameContext {
                dt: 0.016,
                time: 0.0,
                scroll_y: 0.0,
                viewport: Viewport::DESKTOP,
                input: &input,
            };
            cursor.update(&ctx);
        }
    }

    #[test]
    fn test_follows_pointer_centre() {
        let events = EventHub::new();
        let (mut cursor, _tree) = cursor(&events);
        cursor.on_pointer_move(200.0, 100.0);
        assert_eq!(cursor.target(), (184.0, 84.0));

        settle(&mut cursor, 0.05);
        let (x, _) = cursor.position();
        assert!(x > -16.0 && x < 184.0);

        settle(&mut cursor, 2.0);
        let (x, y) = cursor.position();
        assert!((x - 184.0).abs() < 0.1);
        assert!((y - 84.0).abs() < 0.1);
    }

    #[test]
    fn test_hover_grows_and_tints() {
        let events = EventHub::new();
        let (mut cursor, _tree) = cursor(&events);

        cursor.set_hovering(true);
        settle(&mut cursor, 2.0);
        assert!((cursor.scale() - 2.5).abs() < 0.01);
        assert!((cursor.tint() - 0.2).abs() < 0.01);

        cursor.set_hovering(false);
        settle(&mut cursor, 2.0);
        assert!((cursor.scale() - 1.0).abs() < 0.01);
        assert!(cursor.tint() < 0.01);
    }

    #[test]
    fn test_hidden_on_phone() {
        let events = EventHub::new();
        let (mut cursor, mut tree) = cursor(&events);
        cursor.layout(&mut tree, Viewport::PHONE, 0.0);
        assert!(!cursor.is_visible());
        assert!(!tree.is_effectively_visible(cursor.root()));

        let input = InputState::new();
        let ctx = FrameContext {
            dt: 0.016,
            time: 0.0,
            scroll_y: 0.0,
            viewport: Viewport::PHONE,
            input: &input,
        };
        let mut commands = Vec::new();
        cursor.render(&ctx, &mut commands);
        assert!(commands.is_empty());
    }

    #[test]
    fn test_unsubscribes_on_drop() {
        let events = EventHub::new();
        let (cursor, _tree) = cursor(&events);
        assert_eq!(events.listener_count(EventKind::PointerMove), 1);
        assert_eq!(events.listener_count(EventKind::PointerOver), 1);
        drop(cursor);
        assert_eq!(events.total_listeners(), 0);
    }

    #[test]
    fn test_reacts_to_delivered_pointer_events() {
        let events = EventHub::new();
        let (mut cursor, _tree) = cursor(&events);

        assert_eq!(events.emit(UiEvent::PointerMove { x: 400.0, y: 300.0 }), 1);
        assert_eq!(events.emit(UiEvent::PointerOver { interactive: true }), 1);
        assert_eq!(cursor.target(), (-16.0, -16.0));

        settle(&mut cursor, 2.0);
        assert_eq!(cursor.target(), (384.0, 284.0));
        assert!(cursor.is_hovering());
        assert!((cursor.scale() - 2.5).abs() < 0.01);

        events.emit(UiEvent::PointerOver { interactive: false });
        settle(&mut cursor, 2.0);
        assert!(!cursor.is_hovering());

        drop(cursor);
        assert_eq!(events.emit(UiEvent::PointerMove { x: 0.0, y: 0.0 }), 0);
    }

    #[test]
    fn test_ring_is_never_hit() {
        let events = EventHub::new();
        let (mut cursor, mut tree) = cursor(&events);
        cursor.on_pointer_move(200.0, 100.0);
        settle(&mut cursor, 2.0);
        cursor.layout(&mut tree, Viewport::DESKTOP, 0.0);

        assert!(tree.is_effectively_visible(cursor.root()));
        let ring = tree.screen_rect(cursor.root(), 500.0).unwrap();
        assert!((ring.x - 184.0).abs() < 0.1 && (ring.y - 84.0).abs() < 0.1);
        assert_eq!(ring.width, 32.0);
        assert_eq!(tree.hit_test(200.0, 100.0, 500.0), None);
    }
}
