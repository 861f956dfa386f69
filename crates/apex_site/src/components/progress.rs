//! Scroll progress indicator.

use apex_ui::scroll::page_progress;
use apex_ui::{
    Color, FrameContext, Rect, RenderCommand, Spring, SpringConfig, Tag, Theme, Viewport, Widget,
    WidgetId, WidgetResponse, WidgetState, WidgetTree,
};

use super::Component;

/// Thin bar along the top edge whose horizontal scale tracks page progress.
#[derive(Debug)]
pub struct ProgressBar {
    root: WidgetId,
    scale_x: Spring,
    target: f32,
    document_height: f32,
    width: f32,
    color: Color,
}

impl ProgressBar {
    /// Bar thickness (`h-1`).
    pub const HEIGHT: f32 = 4.0;
    /// Layer (`z-[100]`).
    pub const Z_INDEX: i32 = 100;

    /// Registers the bar in `tree`.
    pub fn new(tree: &mut WidgetTree, theme: &Theme) -> Self {
        let id = tree.next_id();
        let root = tree.add_root(
            WidgetState::new(id, Tag::Div)
                .with_classes("fixed top-0 left-0 right-0 h-1 bg-apex-yellow z-[100] origin-left")
                .fixed()
                .with_z(Self::Z_INDEX),
        );
        Self {
            root,
            scale_x: Spring::new(0.0, SpringConfig::PROGRESS),
            target: 0.0,
            document_height: 0.0,
            width: 0.0,
            color: theme.primary,
        }
    }

    /// Total document height, set by the page after layout.
    pub fn set_document_height(&mut self, height: f32) {
        self.document_height = height;
    }

    /// Current (sprung) horizontal scale, 0 to 1.
    #[must_use]
    pub fn scale_x(&self) -> f32 {
        self.scale_x.value().clamp(0.0, 1.0)
    }

    /// Raw scroll progress the spring is chasing.
    #[must_use]
    pub fn target(&self) -> f32 {
        self.target
    }
}

impl Widget for ProgressBar {
    fn root(&self) -> WidgetId {
        self.root
    }

    fn update(&mut self, ctx: &FrameContext<'_>) -> WidgetResponse {
        self.target = page_progress(ctx.scroll_y, self.document_height, ctx.viewport.height);
        let before = self.scale_x.value();
        self.scale_x.set_target(self.target);
        self.scale_x.update(ctx.dt);

        WidgetResponse {
            changed: (self.scale_x.value() - before).abs() > f32::EPSILON,
            ..WidgetResponse::default()
        }
    }

    fn render(&self, _ctx: &FrameContext<'_>, commands: &mut Vec<RenderCommand>) {
        let width = self.width * self.scale_x();
        if width <= 0.0 {
            return;
        }
        commands.push(RenderCommand::Rect {
            bounds: Rect::new(0.0, 0.0, width, Self::HEIGHT),
            color: self.color,
            corner_radius: 0.0,
        });
    }

    fn z_index(&self) -> i32 {
        Self::Z_INDEX
    }

    fn is_settled(&self) -> bool {
        self.scale_x.is_at_rest()
    }
}

impl Component for ProgressBar {
    fn layout(&mut self, tree: &mut WidgetTree, viewport: Viewport, _top: f32) -> f32 {
        self.width = viewport.width;
        tree.set_rect(self.root, Rect::new(0.0, 0.0, viewport.width, Self::HEIGHT));
        0.0
    }
}
