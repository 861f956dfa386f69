//! Page footer.

use apex_ui::layout::{container, Alignment};
use apex_ui::{
    AnimatedColor, Color, Easing, FontFace, FrameContext, Keyframes, Layout, Rect, RenderCommand,
    Tag, Theme, Viewport, Widget, WidgetId, WidgetResponse, WidgetState, WidgetTree,
};

use super::{text, Component, HOVER};
use crate::config::{Brand, FooterContent};

const PADDING_Y: f32 = 48.0;
const ROW_HEIGHT: f32 = 28.0;
const STACK_GAP: f32 = 32.0;
const SMALL_FONT: f32 = 10.0;
const SMALL_TRACKING: f32 = 1.0;
const BRAND_FONT: f32 = 20.0;
const TILE: f32 = 24.0;
const DOT: f32 = 8.0;

#[derive(Debug)]
struct FooterLink {
    id: WidgetId,
    label: String,
    rect: Rect,
    color: AnimatedColor,
}

/// The footer.
#[derive(Debug)]
pub struct Footer {
    root: WidgetId,
    brand: Brand,
    content: FooterContent,
    theme: Theme,
    rect: Rect,
    brand_rect: Rect,
    links: Vec<FooterLink>,
    copyright_rect: Rect,
    status_rect: Rect,
    pulse: Keyframes,
}

impl Footer {
    /// Registers the footer in `tree`.
    pub fn new(tree: &mut WidgetTree, brand: &Brand, content: &FooterContent, theme: &Theme) -> Self {
        let id = tree.next_id();
        let root = tree.add_root(
            WidgetState::new(id, Tag::Footer)
                .with_classes("py-12 px-6 border-t border-white/5 bg-apex-black"),
        );
        let links = content
            .links
            .iter()
            .map(|link| {
                let id = tree.next_id();
                let id = tree.add_child(
                    root,
                    WidgetState::new(id, Tag::Anchor)
                        .with_classes("hover:text-white transition-colors")
                        .with_href(link.href.clone()),
                );
                FooterLink {
                    id,
                    label: link.name.to_uppercase(),
                    rect: Rect::ZERO,
                    color: AnimatedColor::new(theme.text_faint, HOVER),
                }
            })
            .collect();

        Self {
            root,
            brand: brand.clone(),
            content: content.clone(),
            theme: *theme,
            rect: Rect::ZERO,
            brand_rect: Rect::ZERO,
            links,
            copyright_rect: Rect::ZERO,
            status_rect: Rect::ZERO,
            pulse: Keyframes::new([1.0, 0.5, 1.0], 2.0)
                .repeating()
                .with_easing(Easing::PULSE),
        }
    }

    /// The text links, in order.
    #[must_use]
    pub fn link_ids(&self) -> Vec<WidgetId> {
        self.links.iter().map(|link| link.id).collect()
    }

    /// Status dot opacity at `time` seconds.
    #[must_use]
    pub fn status_pulse(&self, time: f32) -> f32 {
        self.pulse.sample(time)
    }

    /// Footer bounds in document space.
    #[must_use]
    pub fn rect(&self) -> Rect {
        self.rect
    }

    fn small_width(label: &str) -> f32 {
        FontFace::Mono.measure(label, SMALL_FONT, SMALL_TRACKING)
    }

    fn brand_width(&self) -> f32 {
        TILE + 8.0 + FontFace::Display.measure(&self.brand.wordmark(), BRAND_FONT, 0.0)
    }

    fn middle_width(&self) -> f32 {
        let labels: f32 = self.links.iter().map(|l| Self::small_width(&l.label)).sum();
        labels + Self::small_width(&self.content.copyright) + 32.0 * self.links.len() as f32
    }

    fn status_width(&self) -> f32 {
        DOT + 8.0 + Self::small_width(&self.content.status.to_uppercase())
    }

    fn render_brand(&self, bounds: Rect, commands: &mut Vec<RenderCommand>) {
        let tile = Rect::new(bounds.x, bounds.y + (ROW_HEIGHT - TILE) * 0.5, TILE, TILE);
        commands.push(RenderCommand::Rect {
            bounds: tile,
            color: self.theme.primary,
            corner_radius: 0.0,
        });
        commands.push(text(
            &self.brand.mark,
            tile.x + 8.0,
            tile.y + 5.0,
            Color::BLACK,
            1.0,
            12.0,
            FontFace::Display,
        ));
        let mut x = tile.right() + 8.0;
        for (part, color) in [
            (self.brand.name.as_str(), self.theme.text),
            (".", self.theme.primary),
            (self.brand.tld.as_str(), self.theme.text),
        ] {
            commands.push(text(part, x, bounds.y + 4.0, color, 1.0, BRAND_FONT, FontFace::Display));
            x += FontFace::Display.measure(part, BRAND_FONT, 0.0);
        }
    }
}

impl Widget for Footer {
    fn root(&self) -> WidgetId {
        self.root
    }

    fn update(&mut self, ctx: &FrameContext<'_>) -> WidgetResponse {
        for link in &mut self.links {
            link.color.update(ctx.dt);
        }
        WidgetResponse {
            changed: ctx.is_on_screen(self.rect),
            ..WidgetResponse::default()
        }
    }

    fn render(&self, ctx: &FrameContext<'_>, commands: &mut Vec<RenderCommand>) {
        if !ctx.is_on_screen(self.rect) {
            return;
        }
        let bounds = ctx.to_screen(self.rect);
        commands.push(RenderCommand::Rect {
            bounds,
            color: self.theme.background,
            corner_radius: 0.0,
        });
        commands.push(RenderCommand::Rect {
            bounds: Rect::new(bounds.x, bounds.y, bounds.width, 1.0),
            color: self.theme.text.with_alpha(0.05),
            corner_radius: 0.0,
        });

        self.render_brand(ctx.to_screen(self.brand_rect), commands);

        for link in &self.links {
            let rect = ctx.to_screen(link.rect);
            commands.push(text(
                &link.label,
                rect.x,
                rect.y + 9.0,
                link.color.value(),
                1.0,
                SMALL_FONT,
                FontFace::Mono,
            ));
        }
        let copyright = ctx.to_screen(self.copyright_rect);
        commands.push(text(
            &self.content.copyright,
            copyright.x,
            copyright.y + 9.0,
            self.theme.text_faint,
            1.0,
            SMALL_FONT,
            FontFace::Mono,
        ));

        let status = ctx.to_screen(self.status_rect);
        commands.push(RenderCommand::Rect {
            bounds: Rect::new(status.x, status.y + (ROW_HEIGHT - DOT) * 0.5, DOT, DOT),
            color: self.theme.status.with_alpha(self.status_pulse(ctx.time)),
            corner_radius: DOT * 0.5,
        });
        commands.push(text(
            &self.content.status.to_uppercase(),
            status.x + DOT + 8.0,
            status.y + 9.0,
            self.theme.text_faint,
            1.0,
            SMALL_FONT,
            FontFace::Mono,
        ));
    }

    fn is_settled(&self) -> bool {
        self.links.iter().all(|link| link.color.is_settled())
    }
}

impl Component for Footer {
    fn layout(&mut self, tree: &mut WidgetTree, viewport: Viewport, top: f32) -> f32 {
        let column = container(viewport.width, 1280.0, 24.0);
        let sizes = [
            (self.brand_width(), ROW_HEIGHT),
            (self.middle_width(), ROW_HEIGHT),
            (self.status_width(), ROW_HEIGHT),
        ];

        // md:flex-row justify-between, otherwise a centered stack.
        let (blocks, inner_height) = if viewport.breakpoint().is_desktop() {
            let mut blocks = Vec::with_capacity(3);
            let middle_x = column.x + (column.width - sizes[1].0) * 0.5;
            blocks.push(Rect::new(column.x, top + PADDING_Y, sizes[0].0, ROW_HEIGHT));
            blocks.push(Rect::new(middle_x, top + PADDING_Y, sizes[1].0, ROW_HEIGHT));
            blocks.push(Rect::new(
                column.right() - sizes[2].0,
                top + PADDING_Y,
                sizes[2].0,
                ROW_HEIGHT,
            ));
            (blocks, ROW_HEIGHT)
        } else {
            let height = ROW_HEIGHT * 3.0 + STACK_GAP * 2.0;
            let blocks = Layout::vertical()
                .with_gap(STACK_GAP)
                .align_cross(Alignment::Center)
                .arrange(
                    Rect::new(column.x, top + PADDING_Y, column.width, height),
                    &sizes,
                );
            (blocks, height)
        };

        self.brand_rect = blocks[0];
        let mut x = blocks[1].x;
        for link in &mut self.links {
            link.rect = Rect::new(x, blocks[1].y, Self::small_width(&link.label), ROW_HEIGHT);
            tree.set_rect(link.id, link.rect);
            x += link.rect.width + 32.0;
        }
        self.copyright_rect = Rect::new(
            x,
            blocks[1].y,
            Self::small_width(&self.content.copyright),
            ROW_HEIGHT,
        );
        self.status_rect = blocks[2];

        let height = PADDING_Y * 2.0 + inner_height;
        self.rect = Rect::new(0.0, top, viewport.width, height);
        tree.set_rect(self.root, self.rect);
        height
    }

    fn sync_hover(&mut self, tree: &WidgetTree) {
        for link in &mut self.links {
            let hovered = tree.get(link.id).is_some_and(WidgetState::is_hovered);
            link.color.set_target(if hovered {
                self.theme.text
            } else {
                self.theme.text_faint
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;

    fn footer(viewport: Viewport) -> (Footer, WidgetTree) {
        let config = SiteConfig::embedded().unwrap();
        let mut tree = WidgetTree::new();
        let mut footer = Footer::new(&mut tree, &config.brand, &config.content.footer, &Theme::APEX);
        footer.layout(&mut tree, viewport, 5000.0);
        (footer, tree)
    }

    #[test]
    fn test_stacks_on_phone() {
        let (desktop, _) = footer(Viewport::DESKTOP);
        let (phone, _) = footer(Viewport::PHONE);
        assert_eq!(desktop.rect().height, 48.0 * 2.0 + 28.0);
        assert!(phone.rect().height > desktop.rect().height);
    }

    #[test]
    fn test_links_are_anchors() {
        let (footer, tree) = footer(Viewport::DESKTOP);
        let ids = footer.link_ids();
        assert_eq!(ids.len(), 2);
        for id in ids {
            assert!(tree.is_interactive(id));
            assert_eq!(tree.closest_link(id).unwrap().1, "#");
        }
    }

    #[test]
    fn test_status_dot_pulses() {
        let (footer, _) = footer(Viewport::DESKTOP);
        assert!((footer.status_pulse(0.0) - 1.0).abs() < 1e-4);
        assert!((footer.status_pulse(1.0) - 0.5).abs() < 1e-4);
        assert!((footer.status_pulse(2.0) - 1.0).abs() < 1e-4);
    }
}
