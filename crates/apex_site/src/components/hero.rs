//! Full-viewport intro with entrance tweens and scroll parallax.

use apex_ui::layout::{container, Alignment};
use apex_ui::scroll::transform;
use apex_ui::{
    Color, Easing, FontFace, FrameContext, Glyph, Keyframes, Layout, Rect, RenderCommand, Tag,
    Theme, Transition, Viewport, Widget, WidgetId, WidgetResponse, WidgetState, WidgetTree,
};

use super::{padded_width, text, wrap, Component, Entrance};
use crate::config::HeroContent;

/// Scroll range driving both parallax layers.
const PARALLAX_INPUT: [f32; 2] = [0.0, 500.0];
/// Headline drifts down slower than the page scrolls up.
const HEADLINE_PARALLAX: [f32; 2] = [0.0, 200.0];
/// Tagline drifts up, against the headline.
const TAGLINE_PARALLAX: [f32; 2] = [0.0, -150.0];

const LABEL_FONT: f32 = 14.0;
const TAGLINE_FONT: f32 = 18.0;
const BUTTON_FONT: f32 = 16.0;
const BUTTON_HEIGHT: f32 = 56.0;

/// Where a headline line slides in from.
#[derive(Debug, Clone, Copy, PartialEq)]
enum Slide {
    X(f32),
    Y(f32),
}

struct HeadlineLine {
    text: String,
    slide: Slide,
    entrance: Entrance,
    outlined: bool,
}

/// The hero section.
pub struct Hero {
    root: WidgetId,
    content: HeroContent,
    theme: Theme,
    rect: Rect,
    column: Rect,
    headline_font: f32,

    label_rect: Rect,
    label: Entrance,
    headline_id: WidgetId,
    headline_rect: Rect,
    lines: Vec<HeadlineLine>,
    tagline_rect: Rect,
    tagline_lines: Vec<String>,
    tagline: Entrance,
    buttons: Entrance,
    primary: WidgetId,
    primary_rect: Rect,
    secondary: WidgetId,
    secondary_rect: Rect,
    primary_hovered: bool,
    secondary_hovered: bool,

    indicator: Keyframes,
    glow: Keyframes,
    scroll_y: f32,
}

impl Hero {
    /// Registers the section in `tree`.
    pub fn new(tree: &mut WidgetTree, content: &HeroContent, theme: &Theme) -> Self {
        let root_id = tree.next_id();
        let root = tree.add_root(WidgetState::new(root_id, Tag::Section).with_classes(
            "relative h-screen flex flex-col justify-center items-center overflow-hidden px-6",
        ));
        let headline_id = tree.next_id();
        tree.add_child(
            root,
            WidgetState::new(headline_id, Tag::Heading)
                .with_classes("text-[12vw] md:text-[10vw] leading-[0.85] font-black mb-6"),
        );
        let primary_id = tree.next_id();
        let primary = tree.add_child(
            root,
            WidgetState::new(primary_id, Tag::Button).with_classes(
                "px-8 py-4 bg-white text-black font-display font-bold uppercase tracking-widest hover:bg-apex-yellow transition-all flex items-center gap-2 group",
            ),
        );
        let secondary_id = tree.next_id();
        let secondary = tree.add_child(
            root,
            WidgetState::new(secondary_id, Tag::Button).with_classes(
                "px-8 py-4 border border-white/20 font-display font-bold uppercase tracking-widest hover:bg-white/10 transition-all",
            ),
        );

        let entrance = |delay: f32| Transition::tween(0.8, Easing::EaseOut).with_delay(delay);
        let mut label = Entrance::new(20.0, entrance(0.0));
        label.show();

        let slides = [Slide::X(-100.0), Slide::X(100.0), Slide::Y(50.0)];
        let lines = content
            .headline
            .iter()
            .enumerate()
            .map(|(i, line)| {
                let slide = slides[i % slides.len()];
                let from = match slide {
                    Slide::X(v) | Slide::Y(v) => v,
                };
                let mut entrance = Entrance::new(from, entrance(0.2 * (i + 1) as f32));
                entrance.show();
                HeadlineLine {
                    text: line.clone(),
                    slide,
                    entrance,
                    outlined: i % 3 == 1,
                }
            })
            .collect();

        let mut tagline = Entrance::new(0.0, Transition::tween(1.0, Easing::EaseOut).with_delay(1.0));
        tagline.show();
        let mut buttons = Entrance::new(20.0, Transition::default().with_delay(1.2));
        buttons.show();

        Self {
            root,
            content: content.clone(),
            theme: *theme,
            rect: Rect::ZERO,
            column: Rect::ZERO,
            headline_font: 0.0,
            label_rect: Rect::ZERO,
            label,
            headline_id,
            headline_rect: Rect::ZERO,
            lines,
            tagline_rect: Rect::ZERO,
            tagline_lines: Vec::new(),
            tagline,
            buttons,
            primary,
            primary_rect: Rect::ZERO,
            secondary,
            secondary_rect: Rect::ZERO,
            primary_hovered: false,
            secondary_hovered: false,
            indicator: Keyframes::new([0.0, 10.0, 0.0], 2.0).repeating(),
            glow: Keyframes::new([1.0, 0.5, 1.0], 2.0)
                .repeating()
                .with_easing(Easing::PULSE),
            scroll_y: 0.0,
        }
    }

    /// Headline parallax offset at the last update.
    #[must_use]
    pub fn headline_offset(&self) -> f32 {
        transform(self.scroll_y, PARALLAX_INPUT, HEADLINE_PARALLAX)
    }

    /// Tagline parallax offset at the last update.
    #[must_use]
    pub fn tagline_offset(&self) -> f32 {
        transform(self.scroll_y, PARALLAX_INPUT, TAGLINE_PARALLAX)
    }

    /// Opacity of headline line `index` (0 when out of range).
    #[must_use]
    pub fn line_opacity(&self, index: usize) -> f32 {
        self.lines
            .get(index)
            .map_or(0.0, |line| line.entrance.opacity())
    }

    /// Returns true once every entrance tween has finished.
    #[must_use]
    pub fn is_entrance_complete(&self) -> bool {
        self.label.is_settled()
            && self.tagline.is_settled()
            && self.buttons.is_settled()
            && self.lines.iter().all(|line| line.entrance.is_settled())
    }

    /// Entrance finished and nothing displaced by scroll.
    #[must_use]
    pub fn is_fully_visible(&self) -> bool {
        self.is_entrance_complete()
            && self.headline_offset().abs() <= f32::EPSILON
            && self.tagline_offset().abs() <= f32::EPSILON
            && self.label.opacity() >= 1.0
            && self.tagline.opacity() >= 1.0
            && self.lines.iter().all(|line| line.entrance.opacity() >= 1.0)
    }

    /// Vertical bob of the scroll indicator at `time` seconds.
    #[must_use]
    pub fn indicator_offset(&self, time: f32) -> f32 {
        self.indicator.sample(time)
    }

    /// The `View Projects` button.
    #[must_use]
    pub fn primary_id(&self) -> WidgetId {
        self.primary
    }

    /// Section bounds in document space.
    #[must_use]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    fn render_glows(&self, ctx: &FrameContext<'_>, commands: &mut Vec<RenderCommand>) {
        let screen = ctx.to_screen(self.rect);
        let size = 384.0;
        let glows = [
            (
                Rect::new(screen.x - 80.0, screen.y + screen.height * 0.25, size, size),
                self.theme.primary.with_alpha(0.1),
                0.0,
            ),
            (
                Rect::new(
                    screen.right() + 80.0 - size,
                    screen.bottom() - screen.height * 0.25 - size,
                    size,
                    size,
                ),
                Color::BLUE_500.with_alpha(0.1),
                0.7,
            ),
        ];
        for (bounds, color, delay) in glows {
            let pulse = self.glow.sample(ctx.time - delay);
            commands.push(RenderCommand::Rect {
                bounds,
                color: color.with_alpha(color.a * pulse),
                corner_radius: size * 0.5,
            });
        }
    }
}

impl Widget for Hero {
    fn root(&self) -> WidgetId {
        self.root
    }

    fn update(&mut self, ctx: &FrameContext<'_>) -> WidgetResponse {
        let changed = (self.scroll_y - ctx.scroll_y).abs() > f32::EPSILON;
        self.scroll_y = ctx.scroll_y;

        self.label.update(ctx.dt);
        for line in &mut self.lines {
            line.entrance.update(ctx.dt);
        }
        self.tagline.update(ctx.dt);
        self.buttons.update(ctx.dt);

        WidgetResponse {
            changed,
            ..WidgetResponse::default()
        }
    }

    fn render(&self, ctx: &FrameContext<'_>, commands: &mut Vec<RenderCommand>) {
        if !ctx.is_on_screen(self.rect) {
            return;
        }
        let clip = ctx.to_screen(self.rect);
        commands.push(RenderCommand::PushClip { bounds: clip });
        self.render_glows(ctx, commands);

        let label = ctx.to_screen(self.label_rect);
        commands.push(text(
            &self.content.label,
            label.x,
            label.y + self.label.offset(),
            self.theme.primary,
            self.label.opacity(),
            LABEL_FONT,
            FontFace::Mono,
        ));

        let headline = ctx.to_screen(self.headline_rect);
        let parallax = self.headline_offset();
        let line_height = self.headline_font * 0.85;
        for (i, line) in self.lines.iter().enumerate() {
            let width = FontFace::Display.measure(&line.text, self.headline_font, 0.0);
            let (dx, dy) = match line.slide {
                Slide::X(_) => (line.entrance.offset(), 0.0),
                Slide::Y(_) => (0.0, line.entrance.offset()),
            };
            let x = self.column.x + (self.column.width - width) * 0.5 + dx;
            let y = headline.y + i as f32 * line_height + parallax + dy;
            let color = if line.outlined {
                self.theme.primary
            } else {
                self.theme.text
            };
            commands.push(text(
                &line.text,
                x,
                y,
                color,
                line.entrance.opacity(),
                self.headline_font,
                FontFace::Display,
            ));
        }

        let tagline = ctx.to_screen(self.tagline_rect);
        let line_height = TAGLINE_FONT * 1.625;
        for (i, line) in self.tagline_lines.iter().enumerate() {
            let width = FontFace::Body.measure(line, TAGLINE_FONT, 0.0);
            commands.push(text(
                line,
                tagline.x + (tagline.width - width) * 0.5,
                tagline.y + i as f32 * line_height + self.tagline_offset(),
                self.theme.text_muted,
                self.tagline.opacity(),
                TAGLINE_FONT,
                FontFace::Body,
            ));
        }

        let opacity = self.buttons.opacity();
        let dy = self.buttons.offset();
        let primary = ctx.to_screen(self.primary_rect).translate(0.0, dy);
        commands.push(RenderCommand::Rect {
            bounds: primary,
            color: if self.primary_hovered {
                self.theme.primary
            } else {
                Color::WHITE
            }
            .with_alpha(opacity),
            corner_radius: 0.0,
        });
        commands.push(text(
            &self.content.primary_cta,
            primary.x + 32.0,
            primary.y + 16.0,
            Color::BLACK,
            opacity,
            BUTTON_FONT,
            FontFace::Display,
        ));
        let nudge = if self.primary_hovered { 4.0 } else { 0.0 };
        commands.push(RenderCommand::Icon {
            bounds: Rect::new(
                primary.right() - 56.0 + nudge,
                primary.y + 16.0 - nudge,
                24.0,
                24.0,
            ),
            glyph: Glyph::ArrowUpRight,
            color: Color::BLACK.with_alpha(opacity),
        });

        let secondary = ctx.to_screen(self.secondary_rect).translate(0.0, dy);
        if self.secondary_hovered {
            commands.push(RenderCommand::Rect {
                bounds: secondary,
                color: Color::WHITE.with_alpha(0.1 * opacity),
                corner_radius: 0.0,
            });
        }
        commands.push(RenderCommand::RectOutline {
            bounds: secondary,
            color: Color::WHITE.with_alpha(0.2 * opacity),
            width: 1.0,
            corner_radius: 0.0,
        });
        commands.push(text(
            &self.content.secondary_cta,
            secondary.x + 32.0,
            secondary.y + 16.0,
            self.theme.text,
            opacity,
            BUTTON_FONT,
            FontFace::Display,
        ));

        let bob = self.indicator_offset(ctx.time);
        let indicator_x = clip.x + clip.width * 0.5;
        let indicator_y = clip.bottom() - 40.0 - 68.0 + bob;
        commands.push(text(
            "Scroll",
            indicator_x - 18.0,
            indicator_y,
            self.theme.text,
            0.3,
            10.0,
            FontFace::Mono,
        ));
        commands.push(RenderCommand::Rect {
            bounds: Rect::new(indicator_x, indicator_y + 20.0, 1.0, 48.0),
            color: Color::WHITE.with_alpha(0.3),
            corner_radius: 0.0,
        });

        commands.push(RenderCommand::PopClip);
    }

    fn is_settled(&self) -> bool {
        self.is_entrance_complete()
    }
}

impl Component for Hero {
    fn layout(&mut self, tree: &mut WidgetTree, viewport: Viewport, top: f32) -> f32 {
        self.rect = Rect::new(0.0, top, viewport.width, viewport.height);
        tree.set_rect(self.root, self.rect);

        let breakpoint = viewport.breakpoint();
        self.headline_font = viewport.width * breakpoint.pick(0.12, 0.10, 0.10);
        self.column = container(viewport.width, 1024.0, 24.0);

        let tagline_width = self.column.width.min(576.0);
        self.tagline_lines = wrap(&self.content.tagline, FontFace::Body, TAGLINE_FONT, tagline_width);

        let label_height = LABEL_FONT * 1.5;
        let headline_height = self.lines.len() as f32 * self.headline_font * 0.85;
        let tagline_height = self.tagline_lines.len() as f32 * TAGLINE_FONT * 1.625;
        let blocks = [
            (self.column.width, label_height + 16.0),
            (self.column.width, headline_height + 24.0),
            (tagline_width, tagline_height + 40.0),
            (self.column.width, BUTTON_HEIGHT),
        ];
        let placed = Layout::vertical()
            .align_main(Alignment::Center)
            .align_cross(Alignment::Center)
            .arrange(
                Rect::new(self.column.x, top, self.column.width, viewport.height),
                &blocks,
            );

        let label_width = FontFace::Mono.measure(&self.content.label, LABEL_FONT, LABEL_FONT * 0.3);
        self.label_rect = Rect::new(
            self.column.x + (self.column.width - label_width) * 0.5,
            placed[0].y,
            label_width,
            label_height,
        );
        self.headline_rect = Rect::new(self.column.x, placed[1].y, self.column.width, headline_height);
        tree.set_rect(self.headline_id, self.headline_rect);
        self.tagline_rect = Rect::new(placed[2].x, placed[2].y, tagline_width, tagline_height);

        let sizes = [
            (
                padded_width(&self.content.primary_cta, BUTTON_FONT, FontFace::Display, 1.6, 32.0)
                    + 32.0,
                BUTTON_HEIGHT,
            ),
            (
                padded_width(&self.content.secondary_cta, BUTTON_FONT, FontFace::Display, 1.6, 32.0),
                BUTTON_HEIGHT,
            ),
        ];
        let row = Layout::horizontal()
            .with_gap(16.0)
            .align_main(Alignment::Center)
            .arrange(placed[3], &sizes);
        self.primary_rect = row[0];
        self.secondary_rect = row[1];
        tree.set_rect(self.primary, self.primary_rect);
        tree.set_rect(self.secondary, self.secondary_rect);

        self.rect.height
    }

    fn sync_hover(&mut self, tree: &WidgetTree) {
        self.primary_hovered = tree.get(self.primary).is_some_and(WidgetState::is_hovered);
        self.secondary_hovered = tree
            .get(self.secondary)
            .is_some_and(WidgetState::is_hovered);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use apex_ui::InputState;

    fn hero() -> (Hero, WidgetTree) {
        let config = SiteConfig::embedded().unwrap();
        let mut tree = WidgetTree::new();
        let mut hero = Hero::new(&mut tree, &config.content.hero, &Theme::APEX);
        hero.layout(&mut tree, Viewport::DESKTOP, 0.0);
        (hero, tree)
    }

    fn run(hero: &mut Hero, scroll_y: f32, seconds: f32) {
        let input = InputState::new();
        let frames = (seconds / 0.016).ceil() as usize;
        for i in 0..frames {
            let ctx = FrameContext {
                dt: 0.016,
                time: i as f32 * 0.016,
                scroll_y,
                viewport: Viewport::DESKTOP,
                input: &input,
            };
            hero.update(&ctx);
        }
    }

    #[test]
    fn test_entrance_is_staggered() {
        let (mut hero, _tree) = hero();

        run(&mut hero, 0.0, 0.3);
        assert!(hero.line_opacity(0) > 0.0);
        assert!(hero.line_opacity(2) == 0.0);

        run(&mut hero, 0.0, 2.0);
        assert!(hero.is_entrance_complete());
        assert!(hero.is_fully_visible());
    }

    #[test]
    fn test_parallax_rates() {
        let (mut hero, _tree) = hero();

        run(&mut hero, 250.0, 0.016);
        assert_eq!(hero.headline_offset(), 100.0);
        assert_eq!(hero.tagline_offset(), -75.0);

        run(&mut hero, 5000.0, 0.016);
        assert_eq!(hero.headline_offset(), 200.0);
        assert_eq!(hero.tagline_offset(), -150.0);
        assert!(!hero.is_fully_visible());
    }

    #[test]
    fn test_section_fills_viewport() {
        let (hero, tree) = hero();
        assert_eq!(hero.rect().height, Viewport::DESKTOP.height);
        assert!(tree.is_interactive(hero.primary_id()));
    }

    #[test]
    fn test_indicator_bobs() {
        let (hero, _tree) = hero();
        assert_eq!(hero.indicator_offset(0.0), 0.0);
        assert!((hero.indicator_offset(1.0) - 10.0).abs() < 1e-4);
        assert!(hero.indicator_offset(2.0).abs() < 1e-4);
    }
}
