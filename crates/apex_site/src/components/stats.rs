//! Figures band (`#about`).

use apex_ui::layout::container;
use apex_ui::{
    Easing, FontFace, FrameContext, Glyph, Grid, InViewChange, InViewObserver, Motion, Rect,
    RenderCommand, SpringConfig, Tag, Theme, Transition, Viewport, Widget, WidgetId,
    WidgetResponse, WidgetState, WidgetTree,
};

use super::{text, Component};
use crate::config::StatRecord;

const SECTION_PADDING: f32 = 96.0;
const GRID_GAP: f32 = 48.0;
const ICON_SIZE: f32 = 24.0;
const ICON_MARGIN: f32 = 16.0;
const VALUE_MARGIN: f32 = 8.0;
const LABEL_FONT: f32 = 10.0;
const LABEL_LINE: f32 = 15.0;
/// `tracking-[0.3em]` at 10px.
const LABEL_TRACKING: f32 = 3.0;

/// One figure with its icon and caption.
#[derive(Debug)]
pub struct StatBadge {
    id: WidgetId,
    record: StatRecord,
    rect: Rect,
    observer: InViewObserver,
    opacity: Motion,
    scale: Motion,
}

impl StatBadge {
    fn new(tree: &mut WidgetTree, parent: WidgetId, record: &StatRecord, index: usize) -> Self {
        let id = tree.next_id();
        let id = tree.add_child(
            parent,
            WidgetState::new(id, Tag::Div)
                .with_classes("flex flex-col items-center text-center"),
        );
        let delay = index as f32 * 0.1;
        Self {
            id,
            record: record.clone(),
            rect: Rect::ZERO,
            observer: InViewObserver::once(),
            opacity: Motion::new(0.0, Transition::tween(0.3, Easing::EaseOut).with_delay(delay)),
            scale: Motion::new(
                0.9,
                Transition::spring(SpringConfig::TRANSFORM).with_delay(delay),
            ),
        }
    }

    /// Figure text.
    #[must_use]
    pub fn value(&self) -> &str {
        &self.record.value
    }

    /// Caption text.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.record.label
    }

    /// Icon above the figure.
    #[must_use]
    pub fn icon(&self) -> Glyph {
        self.record.icon
    }

    /// Badge bounds in document space.
    #[must_use]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Returns true once the badge has scrolled into view.
    #[must_use]
    pub fn is_revealed(&self) -> bool {
        self.observer.has_fired()
    }

    /// Current opacity.
    #[must_use]
    pub fn opacity(&self) -> f32 {
        self.opacity.value().clamp(0.0, 1.0)
    }

    /// Current scale.
    #[must_use]
    pub fn scale(&self) -> f32 {
        self.scale.value()
    }

    fn update(&mut self, ctx: &FrameContext<'_>) -> bool {
        let entered =
            self.observer.observe(self.rect, ctx.scroll_y, ctx.viewport) == InViewChange::Entered;
        if entered {
            self.opacity.set_target(1.0);
            self.scale.set_target(1.0);
        }
        self.opacity.update(ctx.dt);
        self.scale.update(ctx.dt);
        entered
    }

    fn is_settled(&self) -> bool {
        self.opacity.is_settled() && self.scale.is_settled()
    }
}

/// The stats section.
#[derive(Debug)]
pub struct Stats {
    root: WidgetId,
    badges: Vec<StatBadge>,
    theme: Theme,
    rect: Rect,
    value_font: f32,
}

impl Stats {
    /// Registers the section and one badge per record in `tree`.
    pub fn new(tree: &mut WidgetTree, stats: &[StatRecord], theme: &Theme) -> Self {
        let id = tree.next_id();
        let root = tree.add_root(
            WidgetState::new(id, Tag::Section)
                .with_classes("py-24 bg-apex-gray border-y border-white/5"),
        );
        let badges = stats
            .iter()
            .enumerate()
            .map(|(i, record)| StatBadge::new(tree, root, record, i))
            .collect();
        Self {
            root,
            badges,
            theme: *theme,
            rect: Rect::ZERO,
            value_font: 48.0,
        }
    }

    /// The badges, in grid order.
    #[must_use]
    pub fn badges(&self) -> &[StatBadge] {
        &self.badges
    }

    /// Returns true when every badge has revealed and stopped moving.
    #[must_use]
    pub fn all_settled(&self) -> bool {
        self.badges
            .iter()
            .all(|badge| badge.is_revealed() && badge.is_settled())
    }

    /// Section bounds in document space.
    #[must_use]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    fn badge_height(&self) -> f32 {
        ICON_SIZE + ICON_MARGIN + self.value_font + VALUE_MARGIN + LABEL_LINE
    }
}

impl Widget for Stats {
    fn root(&self) -> WidgetId {
        self.root
    }

    fn update(&mut self, ctx: &FrameContext<'_>) -> WidgetResponse {
        let mut response = WidgetResponse::default();
        for badge in &mut self.badges {
            response.revealed |= badge.update(ctx);
        }
        response.changed = !self.is_settled();
        response
    }

    fn render(&self, ctx: &FrameContext<'_>, commands: &mut Vec<RenderCommand>) {
        if !ctx.is_on_screen(self.rect) {
            return;
        }
        let band = ctx.to_screen(self.rect);
        commands.push(RenderCommand::Rect {
            bounds: band,
            color: self.theme.surface,
            corner_radius: 0.0,
        });
        let hairline = self.theme.text.with_alpha(0.05);
        for y in [band.y, band.bottom() - 1.0] {
            commands.push(RenderCommand::Rect {
                bounds: Rect::new(band.x, y, band.width, 1.0),
                color: hairline,
                corner_radius: 0.0,
            });
        }

        for badge in &self.badges {
            let opacity = badge.opacity();
            if opacity <= 0.0 {
                continue;
            }
            let scale = badge.scale();
            let bounds = ctx.to_screen(badge.rect).scale_about_center(scale);
            let (center_x, _) = bounds.center();

            let icon = ICON_SIZE * scale;
            commands.push(RenderCommand::Icon {
                bounds: Rect::new(center_x - icon * 0.5, bounds.y, icon, icon),
                glyph: badge.icon(),
                color: self.theme.primary.with_alpha(opacity),
            });

            let value_size = self.value_font * scale;
            let value_width = FontFace::Display.measure(badge.value(), value_size, 0.0);
            let value_y = bounds.y + (ICON_SIZE + ICON_MARGIN) * scale;
            commands.push(text(
                badge.value(),
                center_x - value_width * 0.5,
                value_y,
                self.theme.text,
                opacity,
                value_size,
                FontFace::Display,
            ));

            let label = badge.label().to_uppercase();
            let label_size = LABEL_FONT * scale;
            let label_width = FontFace::Mono.measure(&label, label_size, LABEL_TRACKING * scale);
            commands.push(text(
                &label,
                center_x - label_width * 0.5,
                value_y + (self.value_font + VALUE_MARGIN) * scale,
                self.theme.text_faint,
                opacity,
                label_size,
                FontFace::Mono,
            ));
        }
    }

    fn is_settled(&self) -> bool {
        self.badges.iter().all(StatBadge::is_settled)
    }
}

impl Component for Stats {
    fn layout(&mut self, tree: &mut WidgetTree, viewport: Viewport, top: f32) -> f32 {
        let breakpoint = viewport.breakpoint();
        self.value_font = breakpoint.pick(48.0, 72.0, 72.0);
        let column = container(viewport.width, 1280.0, 24.0);

        let grid = Grid::new(breakpoint.pick(2, 4, 4), GRID_GAP);
        let cell_height = self.badge_height();
        let cells = grid.arrange(
            Rect::new(column.x, top + SECTION_PADDING, column.width, 0.0),
            cell_height,
            self.badges.len(),
        );
        for (badge, cell) in self.badges.iter_mut().zip(cells) {
            badge.rect = cell;
            tree.set_rect(badge.id, cell);
        }

        let height = SECTION_PADDING * 2.0 + grid.height(self.badges.len(), cell_height);
        self.rect = Rect::new(0.0, top, viewport.width, height);
        tree.set_rect(self.root, self.rect);
        height
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use apex_ui::InputState;

    fn stats(viewport: Viewport) -> (Stats, WidgetTree) {
        let config = SiteConfig::embedded().unwrap();
        let mut tree = WidgetTree::new();
        let mut stats = Stats::new(&mut tree, &config.content.stats, &Theme::APEX);
        stats.layout(&mut tree, viewport, 3000.0);
        (stats, tree)
    }

    fn run(stats: &mut Stats, scroll_y: f32, seconds: f32) {
        let input = InputState::new();
        let frames = (seconds / 0.016).ceil() as usize;
        for _ in 0..frames {
            let ctx = FrameContext {
                dt: 0.016,
                time: 0.0,
                scroll_y,
                viewport: Viewport::DESKTOP,
                input: &input,
            };
            stats.update(&ctx);
        }
    }

    #[test]
    fn test_phone_uses_two_columns() {
        let (stats, _tree) = stats(Viewport::PHONE);
        let badges = stats.badges();
        assert_eq!(badges[0].rect().y, badges[1].rect().y);
        assert!(badges[2].rect().y > badges[1].rect().y);
    }

    #[test]
    fn test_badges_pop_in_once() {
        let (mut stats, _tree) = stats(Viewport::DESKTOP);
        run(&mut stats, 0.0, 0.5);
        assert!(stats.badges().iter().all(|b| b.opacity() == 0.0));
        assert!(!stats.all_settled());

        run(&mut stats, 2600.0, 0.05);
        let badges = stats.badges();
        assert!(badges.iter().all(StatBadge::is_revealed));
        assert!(badges[0].opacity() > badges[3].opacity());

        run(&mut stats, 0.0, 2.0);
        assert!(stats.all_settled());
        assert!(stats
            .badges()
            .iter()
            .all(|b| b.opacity() == 1.0 && (b.scale() - 1.0).abs() < 0.01));
    }

    #[test]
    fn test_values_keep_their_text() {
        let (stats, _tree) = stats(Viewport::DESKTOP);
        let values: Vec<&str> = stats.badges().iter().map(StatBadge::value).collect();
        assert_eq!(values, vec!["08", "42", "12K", "99.9"]);
        assert_eq!(stats.badges()[1].icon(), Glyph::Code2);
    }
}
