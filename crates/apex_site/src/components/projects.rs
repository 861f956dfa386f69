//! Selected works: header plus a responsive grid of project cards.
//!
//! ```text
//! ┌──────────────────────────────┬──────────┐
//! │ Selected / Works  (x -50 → 0) │ ‹  ›     │ (x +50 → 0)
//! ├───────┬───────┬───────┬───────┴──────────┤
//! │ card  │ card  │ card  │ card             │ grid 1 / 2 / 4 cols
//! └───────┴───────┴───────┴──────────────────┘
//! ```
//!
//! Cards reveal once, staggered by 0.1s per index, when they cross a
//! viewport inset. While visible their image drifts with scroll
//! progress, from -50px entering to +50px leaving.

use apex_ui::layout::container;
use apex_ui::scroll::{element_progress, transform};
use apex_ui::{
    AnimatedColor, Color, Easing, FontFace, FrameContext, Glyph, Grid, InViewChange,
    InViewObserver, Motion, Rect, RenderCommand, SpringConfig, Tag, Theme, Transition, Viewport,
    Widget, WidgetId, WidgetResponse, WidgetState, WidgetTree,
};

use super::{text, wrap, Component, Entrance, HOVER};
use crate::config::{ProjectRecord, ProjectsContent};

const SECTION_PADDING: f32 = 96.0;
const HEADER_GAP: f32 = 32.0;
const HEADER_MARGIN: f32 = 64.0;
const GRID_GAP: f32 = 16.0;
const CHEVRON_SIZE: f32 = 48.0;
const BLURB_FONT: f32 = 18.0;
const BLURB_LINE: f32 = 28.0;
const CARD_PADDING: f32 = 32.0;
/// Image overscan (`h-[120%]`).
const IMAGE_OVERSCAN: f32 = 1.2;
/// Card aspect (`aspect-[4/5]`).
const CARD_ASPECT: f32 = 1.25;

/// Load state of a card image as reported by the host.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ImageStatus {
    /// Requested, no answer yet.
    #[default]
    Pending,
    /// Decoded and ready.
    Loaded,
    /// The host gave up on it.
    Failed(String),
}

/// One project in the grid.
#[derive(Debug)]
pub struct ProjectCard {
    id: WidgetId,
    image_id: WidgetId,
    record: ProjectRecord,
    rect: Rect,
    observer: InViewObserver,
    opacity: Motion,
    reveal_y: Motion,
    reveal_scale: Motion,
    hover_scale: Motion,
    hover_y: Motion,
    image_opacity: Motion,
    image_zoom: Motion,
    caption_lift: Motion,
    badge_opacity: Motion,
    caption_color: AnimatedColor,
    hovered: bool,
    image_offset: f32,
    image_status: ImageStatus,
    theme: Theme,
}

impl ProjectCard {
    fn new(
        tree: &mut WidgetTree,
        parent: WidgetId,
        record: &ProjectRecord,
        index: usize,
        reveal_margin: f32,
        theme: &Theme,
    ) -> Self {
        let card_id = tree.next_id();
        let id = tree.add_child(
            parent,
            WidgetState::new(card_id, Tag::Div).with_classes(
                "group relative aspect-[4/5] overflow-hidden bg-apex-gray cursor-pointer z-0 hover:z-10",
            ),
        );
        let image_id = tree.next_id();
        let image_id = tree.add_child(
            id,
            WidgetState::new(image_id, Tag::Image)
                .with_classes("absolute inset-0 w-full h-[120%] object-cover opacity-60"),
        );
        let title_id = tree.next_id();
        tree.add_child(
            id,
            WidgetState::new(title_id, Tag::Heading)
                .with_classes("text-3xl font-black leading-none mb-4"),
        );

        let delay = index as f32 * 0.1;
        let reveal = Transition::tween(0.8, Easing::EASE_OUT_CUBIC);
        Self {
            id,
            image_id,
            record: record.clone(),
            rect: Rect::ZERO,
            observer: InViewObserver::new(true, reveal_margin),
            opacity: Motion::new(0.0, reveal.with_delay(delay)),
            reveal_y: Motion::new(30.0, reveal.with_delay(delay)),
            reveal_scale: Motion::new(
                0.95,
                Transition::spring(SpringConfig::CARD_SCALE).with_delay(delay),
            ),
            hover_scale: Motion::new(1.0, Transition::spring(SpringConfig::CARD_SCALE)),
            hover_y: Motion::new(0.0, reveal),
            image_opacity: Motion::new(0.6, HOVER),
            image_zoom: Motion::new(1.0, Transition::tween(0.7, Easing::EaseInOut)),
            caption_lift: Motion::new(0.0, Transition::tween(0.5, Easing::EaseInOut)),
            badge_opacity: Motion::new(0.0, Transition::tween(0.3, Easing::EaseInOut)),
            caption_color: AnimatedColor::new(Color::WHITE.with_alpha(0.5), HOVER),
            hovered: false,
            image_offset: -50.0,
            image_status: ImageStatus::Pending,
            theme: *theme,
        }
    }

    /// Project title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.record.title
    }

    /// Image source URL.
    #[must_use]
    pub fn image(&self) -> &str {
        &self.record.image
    }

    /// Root element of the card.
    #[must_use]
    pub fn id(&self) -> WidgetId {
        self.id
    }

    /// Card bounds in document space, before motion.
    #[must_use]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Returns true once the card has entered the inset viewport.
    #[must_use]
    pub fn is_revealed(&self) -> bool {
        self.observer.has_fired()
    }

    /// Returns true while the pointer is over the card.
    #[must_use]
    pub fn is_hovered(&self) -> bool {
        self.hovered
    }

    /// Current opacity.
    #[must_use]
    pub fn opacity(&self) -> f32 {
        self.opacity.value().clamp(0.0, 1.0)
    }

    /// Current scale (reveal and hover combined).
    #[must_use]
    pub fn scale(&self) -> f32 {
        self.reveal_scale.value() * self.hover_scale.value()
    }

    /// Current vertical offset (reveal and hover combined).
    #[must_use]
    pub fn offset_y(&self) -> f32 {
        self.reveal_y.value() + self.hover_y.value()
    }

    /// Scroll-linked image offset, -50 to 50.
    #[must_use]
    pub fn image_offset(&self) -> f32 {
        self.image_offset
    }

    /// Host-reported image state.
    #[must_use]
    pub fn image_status(&self) -> &ImageStatus {
        &self.image_status
    }

    /// Records a successful load.
    pub fn mark_loaded(&mut self) {
        self.image_status = ImageStatus::Loaded;
    }

    /// Records a failed load; the card falls back to its title.
    pub fn mark_failed(&mut self, reason: impl Into<String>) {
        let reason = reason.into();
        tracing::warn!(
            project = %self.record.title,
            source = %self.record.image,
            %reason,
            "project image failed to load"
        );
        self.image_status = ImageStatus::Failed(reason);
    }

    fn layout(&mut self, tree: &mut WidgetTree, rect: Rect) {
        self.rect = rect;
        tree.set_rect(self.id, rect);
        tree.set_rect(
            self.image_id,
            Rect::new(rect.x, rect.y, rect.width, rect.height * IMAGE_OVERSCAN),
        );
    }

    fn set_hovered(&mut self, hovered: bool) {
        if hovered == self.hovered {
            return;
        }
        self.hovered = hovered;
        let (scale, y, image, zoom, lift, badge, caption) = if hovered {
            (1.02, -10.0, 1.0, 1.05, -8.0, 1.0, Color::WHITE)
        } else {
            (1.0, 0.0, 0.6, 1.0, 0.0, 0.0, Color::WHITE.with_alpha(0.5))
        };
        self.hover_scale.set_target(scale);
        self.hover_y.set_target(y);
        self.image_opacity.set_target(image);
        self.image_zoom.set_target(zoom);
        self.caption_lift.set_target(lift);
        self.badge_opacity.set_target(badge);
        self.caption_color.set_target(caption);
    }

    /// Screen bounds after reveal and hover motion.
    fn animated_bounds(&self, ctx: &FrameContext<'_>) -> Rect {
        ctx.to_screen(self.rect)
            .translate(0.0, self.offset_y())
            .scale_about_center(self.scale())
    }

    fn render_image(&self, bounds: Rect, commands: &mut Vec<RenderCommand>) {
        match self.image_status {
            ImageStatus::Failed(_) => commands.push(RenderCommand::BrokenImage {
                bounds,
                alt: self.record.title.clone(),
            }),
            ImageStatus::Pending | ImageStatus::Loaded => {
                let scale = bounds.width / self.rect.width.max(1.0);
                let image = Rect::new(
                    bounds.x,
                    bounds.y + self.image_offset * scale,
                    bounds.width,
                    bounds.height * IMAGE_OVERSCAN,
                )
                .scale_about_center(self.image_zoom.value());
                commands.push(RenderCommand::Image {
                    bounds: image,
                    source: self.record.image.clone(),
                    opacity: self.image_opacity.value() * self.opacity(),
                });
            }
        }
    }
}

impl Widget for ProjectCard {
    fn root(&self) -> WidgetId {
        self.id
    }

    fn update(&mut self, ctx: &FrameContext<'_>) -> WidgetResponse {
        let mut response = WidgetResponse::default();
        if self.observer.observe(self.rect, ctx.scroll_y, ctx.viewport) == InViewChange::Entered {
            tracing::debug!(project = %self.record.title, "project card revealed");
            self.opacity.set_target(1.0);
            self.reveal_y.set_target(0.0);
            self.reveal_scale.set_target(1.0);
            response.revealed = true;
        }

        let progress = element_progress(self.rect, ctx.scroll_y, ctx.viewport.height);
        self.image_offset = transform(progress, [0.0, 1.0], [-50.0, 50.0]);

        for motion in [
            &mut self.opacity,
            &mut self.reveal_y,
            &mut self.reveal_scale,
            &mut self.hover_scale,
            &mut self.hover_y,
            &mut self.image_opacity,
            &mut self.image_zoom,
            &mut self.caption_lift,
            &mut self.badge_opacity,
        ] {
            motion.update(ctx.dt);
        }
        self.caption_color.update(ctx.dt);

        response.changed = !self.is_settled();
        response
    }

    fn render(&self, ctx: &FrameContext<'_>, commands: &mut Vec<RenderCommand>) {
        let bounds = self.animated_bounds(ctx);
        let opacity = self.opacity();
        if opacity <= 0.0 || !ctx.viewport.document_rect(0.0).intersects(&bounds) {
            return;
        }

        commands.push(RenderCommand::Rect {
            bounds,
            color: self.theme.surface.with_alpha(opacity),
            corner_radius: 0.0,
        });
        commands.push(RenderCommand::PushClip { bounds });
        self.render_image(bounds, commands);

        // bg-gradient-to-t from-black, approximated as a bottom scrim.
        commands.push(RenderCommand::Rect {
            bounds: Rect::new(bounds.x, bounds.y + bounds.height * 0.5, bounds.width, bounds.height * 0.5),
            color: Color::BLACK.with_alpha(0.8 * opacity),
            corner_radius: 0.0,
        });

        let lift = self.caption_lift.value();
        let left = bounds.x + CARD_PADDING;
        let bottom = bounds.bottom() - CARD_PADDING + lift;
        commands.push(text(
            &self.record.category.to_uppercase(),
            left,
            bottom - 16.0 - 16.0 - 30.0 - 8.0 - 12.0,
            self.theme.primary,
            opacity,
            12.0,
            FontFace::Mono,
        ));
        commands.push(text(
            &self.record.title,
            left,
            bottom - 16.0 - 16.0 - 30.0,
            self.theme.text,
            opacity,
            30.0,
            FontFace::Display,
        ));
        let caption = self.caption_color.value();
        commands.push(text(
            "EXPLORE PROJECT",
            left,
            bottom - 16.0,
            caption,
            opacity,
            14.0,
            FontFace::Display,
        ));
        commands.push(RenderCommand::Icon {
            bounds: Rect::new(
                left + FontFace::Display.measure("EXPLORE PROJECT", 14.0, 1.4) + 8.0,
                bottom - 16.0,
                16.0,
                16.0,
            ),
            glyph: Glyph::ChevronRight,
            color: caption.with_alpha(caption.a * opacity),
        });

        let badge = self.badge_opacity.value() * opacity;
        if badge > 0.0 {
            let circle = Rect::new(bounds.right() - 24.0 - 48.0, bounds.y + 24.0, 48.0, 48.0);
            commands.push(RenderCommand::Rect {
                bounds: circle,
                color: Color::WHITE.with_alpha(0.05 * badge),
                corner_radius: 24.0,
            });
            commands.push(RenderCommand::Icon {
                bounds: circle.shrink(14.0),
                glyph: Glyph::ExternalLink,
                color: Color::WHITE.with_alpha(badge),
            });
        }

        commands.push(RenderCommand::PopClip);
    }

    fn z_index(&self) -> i32 {
        if self.hovered {
            10
        } else {
            0
        }
    }

    fn is_settled(&self) -> bool {
        self.opacity.is_settled()
            && self.reveal_y.is_settled()
            && self.reveal_scale.is_settled()
            && self.hover_scale.is_settled()
            && self.hover_y.is_settled()
            && self.image_opacity.is_settled()
            && self.image_zoom.is_settled()
            && self.caption_lift.is_settled()
            && self.badge_opacity.is_settled()
            && self.caption_color.is_settled()
    }
}

/// A chevron button beside the section header.
#[derive(Debug)]
struct Chevron {
    id: WidgetId,
    rect: Rect,
    flipped: bool,
    fill: AnimatedColor,
    hovered: bool,
}

/// The projects section.
#[derive(Debug)]
pub struct Projects {
    root: WidgetId,
    heading_id: WidgetId,
    content: ProjectsContent,
    theme: Theme,
    rect: Rect,
    header_rect: Rect,
    title_font: f32,
    blurb_lines: Vec<String>,
    header_observer: InViewObserver,
    header_left: Entrance,
    header_right: Entrance,
    chevrons: [Chevron; 2],
    cards: Vec<ProjectCard>,
}

impl Projects {
    /// Registers the section and one card per record in `tree`.
    pub fn new(
        tree: &mut WidgetTree,
        content: &ProjectsContent,
        reveal_margin: f32,
        theme: &Theme,
    ) -> Self {
        let root_id = tree.next_id();
        let root = tree.add_root(
            WidgetState::new(root_id, Tag::Section)
                .with_classes("py-24 px-6 max-w-7xl mx-auto"),
        );
        let heading_id = tree.next_id();
        let heading_id = tree.add_child(
            root,
            WidgetState::new(heading_id, Tag::Heading)
                .with_classes("text-6xl md:text-8xl font-black mb-6"),
        );
        let mut chevron = |flipped: bool| {
            let id = tree.next_id();
            let id = tree.add_child(
                root,
                WidgetState::new(id, Tag::Div).with_classes(
                    "w-12 h-12 border border-white/10 flex items-center justify-center hover:bg-white hover:text-black transition-colors cursor-pointer",
                ),
            );
            Chevron {
                id,
                rect: Rect::ZERO,
                flipped,
                fill: AnimatedColor::new(Color::TRANSPARENT, HOVER),
                hovered: false,
            }
        };
        let chevrons = [chevron(true), chevron(false)];

        let cards = content
            .items
            .iter()
            .enumerate()
            .map(|(i, record)| ProjectCard::new(tree, root, record, i, reveal_margin, theme))
            .collect();

        let header = Transition::tween(0.8, Easing::EaseOut);
        Self {
            root,
            heading_id,
            content: content.clone(),
            theme: *theme,
            rect: Rect::ZERO,
            header_rect: Rect::ZERO,
            title_font: 60.0,
            blurb_lines: Vec::new(),
            header_observer: InViewObserver::once(),
            header_left: Entrance::new(-50.0, header),
            header_right: Entrance::new(50.0, header),
            chevrons,
            cards,
        }
    }

    /// The cards, in grid order.
    #[must_use]
    pub fn cards(&self) -> &[ProjectCard] {
        &self.cards
    }

    /// Returns true once the header has slid in.
    #[must_use]
    pub fn is_header_revealed(&self) -> bool {
        self.header_left.is_shown()
    }

    /// Section bounds in document space.
    #[must_use]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Records a finished image load. Returns false if no card uses `source`.
    pub fn mark_image_loaded(&mut self, source: &str) -> bool {
        let mut matched = false;
        for card in self.cards.iter_mut().filter(|card| card.image() == source) {
            card.mark_loaded();
            matched = true;
        }
        matched
    }

    /// Records a failed image load. Returns false if no card uses `source`.
    pub fn mark_image_failed(&mut self, source: &str, reason: &str) -> bool {
        let mut matched = false;
        for card in self.cards.iter_mut().filter(|card| card.image() == source) {
            card.mark_failed(reason);
            matched = true;
        }
        matched
    }

    fn render_header(&self, ctx: &FrameContext<'_>, commands: &mut Vec<RenderCommand>) {
        let header = ctx.to_screen(self.header_rect);
        let left = self.header_left.opacity();
        let x = header.x + self.header_left.offset();
        commands.push(text(
            &self.content.title,
            x,
            header.y,
            self.theme.text,
            left,
            self.title_font,
            FontFace::Display,
        ));
        commands.push(text(
            &self.content.accent,
            x,
            header.y + self.title_font,
            self.theme.primary,
            left,
            self.title_font,
            FontFace::Display,
        ));
        let blurb_top = header.y + self.title_font * 2.0 + 24.0;
        for (i, line) in self.blurb_lines.iter().enumerate() {
            commands.push(text(
                line,
                x,
                blurb_top + i as f32 * BLURB_LINE,
                self.theme.text_muted,
                left,
                BLURB_FONT,
                FontFace::Body,
            ));
        }

        let right = self.header_right.opacity();
        let dx = self.header_right.offset();
        for chevron in &self.chevrons {
            let bounds = ctx.to_screen(chevron.rect).translate(dx, 0.0);
            let fill = chevron.fill.value();
            if !fill.is_transparent() {
                commands.push(RenderCommand::Rect {
                    bounds,
                    color: fill.with_alpha(fill.a * right),
                    corner_radius: 0.0,
                });
            }
            commands.push(RenderCommand::RectOutline {
                bounds,
                color: self.theme.border.with_alpha(self.theme.border.a * right),
                width: 1.0,
                corner_radius: 0.0,
            });
            let ink = if chevron.hovered {
                Color::BLACK
            } else {
                self.theme.text
            };
            // rotate-180 is drawn as a mirrored glyph box.
            let icon = bounds.shrink(12.0);
            let icon = if chevron.flipped {
                Rect::new(icon.right(), icon.y, -icon.width, icon.height)
            } else {
                icon
            };
            commands.push(RenderCommand::Icon {
                bounds: icon,
                glyph: Glyph::ChevronRight,
                color: ink.with_alpha(right),
            });
        }
    }
}

impl Widget for Projects {
    fn root(&self) -> WidgetId {
        self.root
    }

    fn update(&mut self, ctx: &FrameContext<'_>) -> WidgetResponse {
        let mut response = WidgetResponse::default();
        if self
            .header_observer
            .observe(self.header_rect, ctx.scroll_y, ctx.viewport)
            == InViewChange::Entered
        {
            self.header_left.show();
            self.header_right.show();
            response.revealed = true;
        }
        self.header_left.update(ctx.dt);
        self.header_right.update(ctx.dt);
        for chevron in &mut self.chevrons {
            chevron.fill.update(ctx.dt);
        }
        for card in &mut self.cards {
            response = response.merge(card.update(ctx));
        }
        response
    }

    fn render(&self, ctx: &FrameContext<'_>, commands: &mut Vec<RenderCommand>) {
        if !ctx.is_on_screen(self.rect) {
            return;
        }
        self.render_header(ctx, commands);
        // Hovered cards paint last (hover:z-10).
        for card in self.cards.iter().filter(|card| card.z_index() == 0) {
            card.render(ctx, commands);
        }
        for card in self.cards.iter().filter(|card| card.z_index() != 0) {
            card.render(ctx, commands);
        }
    }

    fn is_settled(&self) -> bool {
        self.header_left.is_settled()
            && self.header_right.is_settled()
            && self.chevrons.iter().all(|c| c.fill.is_settled())
            && self.cards.iter().all(Widget::is_settled)
    }
}

impl Component for Projects {
    fn layout(&mut self, tree: &mut WidgetTree, viewport: Viewport, top: f32) -> f32 {
        let breakpoint = viewport.breakpoint();
        let column = container(viewport.width, 1280.0, 24.0);
        self.title_font = breakpoint.pick(60.0, 96.0, 96.0);

        let blurb_width = column.width.min(672.0);
        self.blurb_lines = wrap(&self.content.blurb, FontFace::Body, BLURB_FONT, blurb_width);
        let left_height =
            self.title_font * 2.0 + 24.0 + self.blurb_lines.len() as f32 * BLURB_LINE;
        let header_top = top + SECTION_PADDING;

        // md:flex-row md:items-end, otherwise stacked with gap-8.
        let (header_height, chevron_top, chevron_left) = if breakpoint.is_desktop() {
            (
                left_height,
                header_top + left_height - CHEVRON_SIZE,
                column.right() - CHEVRON_SIZE * 2.0 - 16.0,
            )
        } else {
            (
                left_height + HEADER_GAP + CHEVRON_SIZE,
                header_top + left_height + HEADER_GAP,
                column.x,
            )
        };
        self.header_rect = Rect::new(column.x, header_top, column.width, header_height);
        tree.set_rect(
            self.heading_id,
            Rect::new(column.x, header_top, blurb_width, self.title_font * 2.0),
        );
        for (i, chevron) in self.chevrons.iter_mut().enumerate() {
            chevron.rect = Rect::new(
                chevron_left + i as f32 * (CHEVRON_SIZE + 16.0),
                chevron_top,
                CHEVRON_SIZE,
                CHEVRON_SIZE,
            );
            tree.set_rect(chevron.id, chevron.rect);
        }

        let grid = Grid::new(breakpoint.pick(1, 2, 4), GRID_GAP);
        let cell_height = grid.cell_width(column.width) * CARD_ASPECT;
        let grid_top = header_top + header_height + HEADER_MARGIN;
        let cells = grid.arrange(
            Rect::new(column.x, grid_top, column.width, 0.0),
            cell_height,
            self.cards.len(),
        );
        for (card, cell) in self.cards.iter_mut().zip(cells) {
            card.layout(tree, cell);
        }
        let grid_height = grid.height(self.cards.len(), cell_height);

        let height = SECTION_PADDING * 2.0 + header_height + HEADER_MARGIN + grid_height;
        self.rect = Rect::new(column.x, top, column.width, height);
        tree.set_rect(self.root, self.rect);
        height
    }

    fn sync_hover(&mut self, tree: &WidgetTree) {
        let hovered = |id: WidgetId| tree.get(id).is_some_and(WidgetState::is_hovered);
        for card in &mut self.cards {
            card.set_hovered(hovered(card.id));
        }
        for chevron in &mut self.chevrons {
            chevron.hovered = hovered(chevron.id);
            chevron.fill.set_target(if chevron.hovered {
                Color::WHITE
            } else {
                Color::TRANSPARENT
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use apex_ui::InputState;

    fn projects(viewport: Viewport) -> (Projects, WidgetTree) {
        let config = SiteConfig::embedded().unwrap();
        let mut tree = WidgetTree::new();
        let mut projects = Projects::new(
            &mut tree,
            &config.content.projects,
            config.motion.reveal_margin,
            &Theme::APEX,
        );
        projects.layout(&mut tree, viewport, 1000.0);
        (projects, tree)
    }

    fn run(projects: &mut Projects, scroll_y: f32, seconds: f32) {
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
            projects.update(&ctx);
        }
    }

    #[test]
    fn test_grid_columns_follow_breakpoint() {
        let (desktop, _) = projects(Viewport::DESKTOP);
        let rows: Vec<f32> = desktop.cards().iter().map(|c| c.rect().y).collect();
        assert!(rows.windows(2).all(|w| w[0] == w[1]));

        let (phone, _) = projects(Viewport::PHONE);
        let cards = phone.cards();
        assert!(cards.windows(2).all(|w| w[1].rect().y > w[0].rect().y));
        assert!((cards[0].rect().height - cards[0].rect().width * 1.25).abs() < 0.01);
    }

    #[test]
    fn test_reveal_is_staggered_and_sticks() {
        let (mut projects, _tree) = projects(Viewport::DESKTOP);
        assert!(projects.cards().iter().all(|c| !c.is_revealed()));

        let grid_top = projects.cards()[0].rect().y;
        run(&mut projects, grid_top - 400.0, 0.15);
        let cards = projects.cards();
        assert!(cards.iter().all(ProjectCard::is_revealed));
        assert!(cards[0].opacity() > cards[3].opacity());

        run(&mut projects, 0.0, 2.0);
        let cards = projects.cards();
        assert!(cards.iter().all(ProjectCard::is_revealed));
        assert!(cards.iter().all(|c| c.opacity() == 1.0));
        assert!(cards.iter().all(|c| (c.scale() - 1.0).abs() < 0.01));
    }

    #[test]
    fn test_margin_delays_reveal() {
        let (mut projects, _tree) = projects(Viewport::DESKTOP);
        let grid_top = projects.cards()[0].rect().y;

        // Top edge 50px into the viewport, inside the 100px inset.
        run(&mut projects, grid_top - Viewport::DESKTOP.height + 50.0, 0.016);
        assert!(!projects.cards()[0].is_revealed());

        run(&mut projects, grid_top - Viewport::DESKTOP.height + 150.0, 0.016);
        assert!(projects.cards()[0].is_revealed());
    }

    #[test]
    fn test_image_parallax_range() {
        let (mut projects, _tree) = projects(Viewport::DESKTOP);
        let rect = projects.cards()[0].rect();

        run(&mut projects, 0.0, 0.016);
        assert_eq!(projects.cards()[0].image_offset(), -50.0);

        run(&mut projects, rect.bottom() + 10.0, 0.016);
        assert_eq!(projects.cards()[0].image_offset(), 50.0);
    }

    #[test]
    fn test_hover_lifts_card() {
        let (mut projects, mut tree) = projects(Viewport::DESKTOP);
        let grid_top = projects.cards()[0].rect().y;
        run(&mut projects, grid_top - 400.0, 2.0);

        let id = projects.cards()[1].id();
        tree.set_hovered(Some(id));
        projects.sync_hover(&tree);
        run(&mut projects, grid_top - 400.0, 1.0);

        let card = &projects.cards()[1];
        assert!(card.is_hovered());
        assert!((card.scale() - 1.02).abs() < 0.01);
        assert!((card.offset_y() + 10.0).abs() < 0.01);
        assert_eq!(card.z_index(), 10);
        assert!(!projects.cards()[0].is_hovered());
    }

    #[test]
    fn test_failed_image_renders_fallback() {
        let (mut projects, _tree) = projects(Viewport::DESKTOP);
        let source = projects.cards()[2].image().to_owned();
        assert!(projects.mark_image_failed(&source, "404"));
        assert!(!projects.mark_image_loaded("https://example.com/missing.jpg"));

        let grid_top = projects.cards()[0].rect().y;
        run(&mut projects, grid_top - 400.0, 2.0);

        let input = InputState::new();
        let ctx = FrameContext {
            dt: 0.0,
            time: 0.0,
            scroll_y: grid_top - 400.0,
            viewport: Viewport::DESKTOP,
            input: &input,
        };
        let mut commands = Vec::new();
        projects.render(&ctx, &mut commands);

        let broken: Vec<&str> = commands
            .iter()
            .filter_map(|c| match c {
                RenderCommand::BrokenImage { alt, .. } => Some(alt.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(broken, vec![projects.cards()[2].title()]);
        let images = commands
            .iter()
            .filter(|c| matches!(c, RenderCommand::Image { .. }))
            .count();
        assert_eq!(images, 3);
        assert_eq!(
            projects.cards()[2].image_status(),
            &ImageStatus::Failed("404".to_owned())
        );
    }
}
