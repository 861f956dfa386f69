//! Closing call to action (`#contact`).

use apex_ui::layout::{container, Alignment};
use apex_ui::{
    AnimatedColor, Color, FontFace, FrameContext, Glyph, InViewChange, InViewObserver, Layout,
    Rect, RenderCommand, Tag, Theme, Transition, Viewport, Widget, WidgetId, WidgetResponse,
    WidgetState, WidgetTree,
};

use super::{padded_width, text, wrap, Component, Entrance, HOVER};
use crate::config::{ContactContent, SocialLink};

const SECTION_PADDING: f32 = 128.0;
const BLOCK_MARGIN: f32 = 48.0;
const BLURB_FONT: f32 = 20.0;
const BLURB_LINE: f32 = 28.0;
const CTA_FONT: f32 = 20.0;
const CTA_HEIGHT: f32 = 76.0;
const SOCIAL_SIZE: f32 = 64.0;
const ROW_GAP: f32 = 24.0;

#[derive(Debug)]
struct SocialButton {
    id: WidgetId,
    icon: Glyph,
    rect: Rect,
    fill: AnimatedColor,
    ink: AnimatedColor,
}

/// The contact section.
#[derive(Debug)]
pub struct Contact {
    root: WidgetId,
    heading_id: WidgetId,
    cta_id: WidgetId,
    content: ContactContent,
    theme: Theme,
    rect: Rect,
    heading_rect: Rect,
    heading_font: f32,
    blurb_lines: Vec<String>,
    blurb_top: f32,
    cta_rect: Rect,
    cta_fill: AnimatedColor,
    socials: Vec<SocialButton>,
    observer: InViewObserver,
    heading: Entrance,
    entries: u32,
}

impl Contact {
    /// Registers the section in `tree`.
    pub fn new(tree: &mut WidgetTree, content: &ContactContent, theme: &Theme) -> Self {
        let id = tree.next_id();
        let root = tree.add_root(
            WidgetState::new(id, Tag::Section)
                .with_classes("py-32 px-6 relative overflow-hidden"),
        );
        let heading_id = tree.next_id();
        let heading_id = tree.add_child(
            root,
            WidgetState::new(heading_id, Tag::Heading)
                .with_classes("text-7xl md:text-9xl font-black mb-12 leading-none"),
        );
        let cta_id = tree.next_id();
        let cta_id = tree.add_child(
            root,
            WidgetState::new(cta_id, Tag::Anchor)
                .with_classes(
                    "w-full md:w-auto px-12 py-6 bg-apex-yellow text-black font-display font-black text-xl uppercase tracking-widest hover:bg-white transition-all",
                )
                .with_href(content.mailto()),
        );
        let socials = content
            .socials
            .iter()
            .map(|social: &SocialLink| {
                let id = tree.next_id();
                let id = tree.add_child(
                    root,
                    WidgetState::new(id, Tag::Anchor)
                        .with_classes(
                            "w-16 h-16 glass flex items-center justify-center hover:bg-apex-yellow hover:text-black transition-all",
                        )
                        .with_href(social.href.clone()),
                );
                SocialButton {
                    id,
                    icon: social.icon,
                    rect: Rect::ZERO,
                    fill: AnimatedColor::new(Color::WHITE.with_alpha(0.05), HOVER),
                    ink: AnimatedColor::new(theme.text, HOVER),
                }
            })
            .collect();

        Self {
            root,
            heading_id,
            cta_id,
            content: content.clone(),
            theme: *theme,
            rect: Rect::ZERO,
            heading_rect: Rect::ZERO,
            heading_font: 72.0,
            blurb_lines: Vec::new(),
            blurb_top: 0.0,
            cta_rect: Rect::ZERO,
            cta_fill: AnimatedColor::new(theme.primary, HOVER),
            socials,
            // No `once`: the heading fades out again when it leaves.
            observer: InViewObserver::new(false, 0.0),
            heading: Entrance::new(20.0, Transition::default()),
            entries: 0,
        }
    }

    /// Returns true while the heading is (animating) visible.
    #[must_use]
    pub fn is_heading_shown(&self) -> bool {
        self.heading.is_shown()
    }

    /// Heading opacity.
    #[must_use]
    pub fn heading_opacity(&self) -> f32 {
        self.heading.opacity()
    }

    /// How many times the heading has entered the viewport.
    #[must_use]
    pub fn entries(&self) -> u32 {
        self.entries
    }

    /// The mail button.
    #[must_use]
    pub fn cta_id(&self) -> WidgetId {
        self.cta_id
    }

    /// The social icon links, in order.
    #[must_use]
    pub fn social_ids(&self) -> Vec<WidgetId> {
        self.socials.iter().map(|s| s.id).collect()
    }

    /// Section bounds in document space.
    #[must_use]
    pub fn rect(&self) -> Rect {
        self.rect
    }
}

impl Widget for Contact {
    fn root(&self) -> WidgetId {
        self.root
    }

    fn update(&mut self, ctx: &FrameContext<'_>) -> WidgetResponse {
        let mut response = WidgetResponse::default();
        match self
            .observer
            .observe(self.heading_rect, ctx.scroll_y, ctx.viewport)
        {
            InViewChange::Entered => {
                self.entries += 1;
                tracing::debug!(entries = self.entries, "contact heading entered");
                self.heading.show();
                response.revealed = true;
            }
            InViewChange::Left => self.heading.hide(),
            InViewChange::Unchanged => {}
        }
        self.heading.update(ctx.dt);
        self.cta_fill.update(ctx.dt);
        for social in &mut self.socials {
            social.fill.update(ctx.dt);
            social.ink.update(ctx.dt);
        }
        response.changed = !self.is_settled();
        response
    }

    fn render(&self, ctx: &FrameContext<'_>, commands: &mut Vec<RenderCommand>) {
        if !ctx.is_on_screen(self.rect) {
            return;
        }
        let section = ctx.to_screen(self.rect);

        // via-apex-yellow gradient at 20%, as three fading strips.
        let third = section.width / 3.0;
        for (i, alpha) in [0.05, 0.2, 0.05].into_iter().enumerate() {
            commands.push(RenderCommand::Rect {
                bounds: Rect::new(section.x + third * i as f32, section.y, third, 4.0),
                color: self.theme.primary.with_alpha(alpha),
                corner_radius: 0.0,
            });
        }

        let heading = ctx.to_screen(self.heading_rect);
        let opacity = self.heading.opacity();
        let dy = self.heading.offset();
        for (i, (line, color)) in [
            (&self.content.heading, self.theme.text),
            (&self.content.accent, self.theme.primary),
        ]
        .into_iter()
        .enumerate()
        {
            let width = FontFace::Display.measure(line, self.heading_font, 0.0);
            commands.push(text(
                line,
                heading.x + (heading.width - width) * 0.5,
                heading.y + dy + i as f32 * self.heading_font,
                color,
                opacity,
                self.heading_font,
                FontFace::Display,
            ));
        }

        let blurb_y = self.blurb_top - ctx.scroll_y;
        for (i, line) in self.blurb_lines.iter().enumerate() {
            let width = FontFace::Body.measure(line, BLURB_FONT, 0.0);
            commands.push(text(
                line,
                section.x + (section.width - width) * 0.5,
                blurb_y + i as f32 * BLURB_LINE,
                self.theme.text_muted,
                1.0,
                BLURB_FONT,
                FontFace::Body,
            ));
        }

        let cta = ctx.to_screen(self.cta_rect);
        commands.push(RenderCommand::Rect {
            bounds: cta,
            color: self.cta_fill.value(),
            corner_radius: 0.0,
        });
        let label = self.content.cta.to_uppercase();
        let label_width = FontFace::Display.measure(&label, CTA_FONT, 2.0);
        commands.push(text(
            &label,
            cta.x + (cta.width - label_width) * 0.5,
            cta.y + 24.0,
            Color::BLACK,
            1.0,
            CTA_FONT,
            FontFace::Display,
        ));

        for social in &self.socials {
            let bounds = ctx.to_screen(social.rect);
            commands.push(RenderCommand::Rect {
                bounds,
                color: social.fill.value(),
                corner_radius: 0.0,
            });
            commands.push(RenderCommand::Icon {
                bounds: bounds.shrink(20.0),
                glyph: social.icon,
                color: social.ink.value(),
            });
        }
    }

    fn is_settled(&self) -> bool {
        self.heading.is_settled()
            && self.cta_fill.is_settled()
            && self
                .socials
                .iter()
                .all(|s| s.fill.is_settled() && s.ink.is_settled())
    }
}

impl Component for Contact {
    fn layout(&mut self, tree: &mut WidgetTree, viewport: Viewport, top: f32) -> f32 {
        let breakpoint = viewport.breakpoint();
        let column = container(viewport.width, 896.0, 24.0);
        self.heading_font = breakpoint.pick(72.0, 128.0, 128.0);

        let mut y = top + SECTION_PADDING;
        self.heading_rect = Rect::new(column.x, y, column.width, self.heading_font * 2.0);
        tree.set_rect(self.heading_id, self.heading_rect);
        y += self.heading_rect.height + BLOCK_MARGIN;

        self.blurb_lines = wrap(
            &self.content.blurb,
            FontFace::Body,
            BLURB_FONT,
            column.width.min(672.0),
        );
        self.blurb_top = y;
        y += self.blurb_lines.len() as f32 * BLURB_LINE + BLOCK_MARGIN;

        let cta_width = if breakpoint.is_desktop() {
            padded_width(&self.content.cta.to_uppercase(), CTA_FONT, FontFace::Display, 2.0, 48.0)
        } else {
            column.width
        };
        let icons_width = self.socials.len() as f32 * (SOCIAL_SIZE + 16.0) - 16.0;

        let (cta_rect, icons_rect, row_height) = if breakpoint.is_desktop() {
            let row = Layout::horizontal()
                .with_gap(ROW_GAP)
                .align_main(Alignment::Center)
                .align_cross(Alignment::Center)
                .arrange(
                    Rect::new(column.x, y, column.width, CTA_HEIGHT),
                    &[(cta_width, CTA_HEIGHT), (icons_width, SOCIAL_SIZE)],
                );
            (row[0], row[1], CTA_HEIGHT)
        } else {
            let icons_top = y + CTA_HEIGHT + ROW_GAP;
            (
                Rect::new(column.x, y, cta_width, CTA_HEIGHT),
                Rect::new(
                    column.x + (column.width - icons_width) * 0.5,
                    icons_top,
                    icons_width,
                    SOCIAL_SIZE,
                ),
                CTA_HEIGHT + ROW_GAP + SOCIAL_SIZE,
            )
        };
        self.cta_rect = cta_rect;
        tree.set_rect(self.cta_id, cta_rect);
        for (i, social) in self.socials.iter_mut().enumerate() {
            social.rect = Rect::new(
                icons_rect.x + i as f32 * (SOCIAL_SIZE + 16.0),
                icons_rect.y,
                SOCIAL_SIZE,
                SOCIAL_SIZE,
            );
            tree.set_rect(social.id, social.rect);
        }
        y += row_height + SECTION_PADDING;

        let height = y - top;
        self.rect = Rect::new(0.0, top, viewport.width, height);
        tree.set_rect(self.root, self.rect);
        height
    }

    fn sync_hover(&mut self, tree: &WidgetTree) {
        let hovered = |id: WidgetId| tree.get(id).is_some_and(WidgetState::is_hovered);
        self.cta_fill.set_target(if hovered(self.cta_id) {
            Color::WHITE
        } else {
            self.theme.primary
        });
        for social in &mut self.socials {
            let on = hovered(social.id);
            social.fill.set_target(if on {
                self.theme.primary
            } else {
                Color::WHITE.with_alpha(0.05)
            });
            social.ink.set_target(if on { Color::BLACK } else { self.theme.text });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use apex_ui::InputState;

    fn contact(viewport: Viewport) -> (Contact, WidgetTree) {
        let config = SiteConfig::embedded().unwrap();
        let mut tree = WidgetTree::new();
        let mut contact = Contact::new(&mut tree, &config.content.contact, &Theme::APEX);
        contact.layout(&mut tree, viewport, 4000.0);
        (contact, tree)
    }

    fn run(contact: &mut Contact, scroll_y: f32, seconds: f32) {
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
            contact.update(&ctx);
        }
    }

    #[test]
    fn test_heading_retriggers() {
        let (mut contact, _tree) = contact(Viewport::DESKTOP);

        run(&mut contact, 3600.0, 0.5);
        assert!(contact.is_heading_shown());
        assert_eq!(contact.heading_opacity(), 1.0);

        run(&mut contact, 0.0, 0.5);
        assert!(!contact.is_heading_shown());
        assert_eq!(contact.heading_opacity(), 0.0);

        run(&mut contact, 3600.0, 0.5);
        assert_eq!(contact.entries(), 2);
    }

    #[test]
    fn test_links_carry_targets() {
        let (contact, tree) = contact(Viewport::DESKTOP);
        let (_, href) = tree.closest_link(contact.cta_id()).unwrap();
        assert_eq!(href, "mailto:hello@apex.dev");

        let socials = contact.social_ids();
        assert_eq!(socials.len(), 3);
        for id in socials {
            assert_eq!(tree.closest_link(id).unwrap().1, "#");
        }
    }

    #[test]
    fn test_cta_goes_full_width_on_phone() {
        let (contact, tree) = contact(Viewport::PHONE);
        let cta = tree.get(contact.cta_id()).unwrap().rect;
        assert!((cta.width - (Viewport::PHONE.width - 48.0)).abs() < 0.01);
        let first = tree.get(contact.social_ids()[0]).unwrap().rect;
        assert!(first.y > cta.bottom());
    }

    #[test]
    fn test_hover_inverts_social() {
        let (mut contact, mut tree) = contact(Viewport::DESKTOP);
        let id = contact.social_ids()[1];
        tree.set_hovered(Some(id));
        contact.sync_hover(&tree);
        run(&mut contact, 3600.0, 0.5);
        let social = &contact.socials[1];
        assert!(social.fill.is_settled());
        assert_eq!(social.fill.target(), Theme::APEX.primary);
        assert_eq!(social.ink.target(), Color::BLACK);
        assert_eq!(contact.socials[0].ink.target(), Theme::APEX.text);
    }
}
