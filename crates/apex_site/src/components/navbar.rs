//! Fixed header with a scroll-threshold backdrop and a mobile menu.

use apex_ui::layout::{container, Alignment};
use apex_ui::{
    cn, AnimatedColor, ClassList, Color, EventHub, EventKind, FontFace, FrameContext, Glyph,
    Layout, Motion, Rect, RenderCommand, SpringConfig, Subscription, Tag, Theme, Transition,
    UiEvent, Viewport, Widget, WidgetId, WidgetResponse, WidgetState, WidgetTree,
};

use super::{centered_in_row, padded_width, text, Component, Entrance, HOVER};
use crate::config::{Brand, NavContent, NavLink};

const BASE_CLASSES: &str = "fixed top-0 left-0 w-full z-50 transition-all duration-300 px-6 py-4";
const SCROLLED_CLASSES: &str = "bg-apex-black/80 backdrop-blur-md border-b border-white/10";

const ROW_TOP: f32 = 16.0;
const ROW_HEIGHT: f32 = 32.0;
const LINK_FONT: f32 = 14.0;
const CTA_FONT: f32 = 12.0;
const PANEL_FONT: f32 = 20.0;
const PANEL_PADDING: f32 = 24.0;
const PANEL_GAP: f32 = 16.0;
const TOGGLE_SIZE: f32 = 24.0;

struct DesktopLink {
    id: WidgetId,
    link: NavLink,
    rect: Rect,
    entrance: Entrance,
    color: AnimatedColor,
}

struct PanelLink {
    id: WidgetId,
    link: NavLink,
    rect: Rect,
    hovered: bool,
}

/// The navigation bar.
pub struct Navbar {
    root: WidgetId,
    brand: Brand,
    cta: String,
    theme: Theme,
    threshold: f32,
    scrolled: bool,
    menu_open: bool,
    desktop: bool,
    width: f32,
    classes: ClassList,
    backdrop: AnimatedColor,
    border: Motion,

    logo: WidgetId,
    logo_rect: Rect,
    logo_entrance: Entrance,

    links: Vec<DesktopLink>,
    hire: WidgetId,
    hire_rect: Rect,
    hire_entrance: Entrance,
    hire_fill: AnimatedColor,

    toggle: WidgetId,
    toggle_rect: Rect,
    panel: WidgetId,
    panel_links: Vec<PanelLink>,
    panel_height: Motion,
    panel_opacity: Motion,

    scroll_listener: Subscription,
}

impl Navbar {
    /// Height of the bar (`py-4` around the `h-8` logo).
    pub const HEIGHT: f32 = ROW_TOP * 2.0 + ROW_HEIGHT;
    /// Layer (`z-50`).
    pub const Z_INDEX: i32 = 50;

    /// Registers the bar and its links in `tree`.
    pub fn new(
        tree: &mut WidgetTree,
        brand: &Brand,
        nav: &NavContent,
        theme: &Theme,
        threshold: f32,
        events: &EventHub,
    ) -> Self {
        let root_id = tree.next_id();
        let classes = Self::compose_classes(false);
        let mut root_state = WidgetState::new(root_id, Tag::Nav)
            .fixed()
            .with_z(Self::Z_INDEX);
        root_state.classes = classes.clone();
        let root = tree.add_root(root_state);

        let logo_id = tree.next_id();
        let logo = tree.add_child(
            root,
            WidgetState::new(logo_id, Tag::Div).with_classes(
                "font-display font-bold text-2xl tracking-tighter flex items-center gap-2",
            ),
        );
        let mut logo_entrance = Entrance::new(-20.0, Transition::default())
            .with_offset_transition(Transition::spring(SpringConfig::TRANSFORM));
        logo_entrance.show();

        let links = nav
            .links
            .iter()
            .enumerate()
            .map(|(i, link)| {
                let id = tree.next_id();
                tree.add_child(
                    root,
                    WidgetState::new(id, Tag::Anchor)
                        .with_classes(
                            "font-display text-sm uppercase tracking-widest hover:text-apex-yellow transition-colors",
                        )
                        .with_href(link.href.clone()),
                );
                let delay = i as f32 * 0.1;
                let mut entrance = Entrance::new(-10.0, Transition::default().with_delay(delay))
                    .with_offset_transition(
                        Transition::spring(SpringConfig::TRANSFORM).with_delay(delay),
                    );
                entrance.show();
                DesktopLink {
                    id,
                    link: link.clone(),
                    rect: Rect::ZERO,
                    entrance,
                    color: AnimatedColor::new(theme.text, HOVER),
                }
            })
            .collect();

        let hire_id = tree.next_id();
        let hire = tree.add_child(
            root,
            WidgetState::new(hire_id, Tag::Button).with_classes(
                "px-6 py-2 bg-apex-yellow text-black font-display font-bold uppercase text-xs tracking-widest hover:bg-white transition-colors",
            ),
        );
        // Offset doubles as the missing scale: 0.9 → 1.0.
        let mut hire_entrance = Entrance::new(0.1, Transition::default())
            .with_offset_transition(Transition::spring(SpringConfig::TRANSFORM));
        hire_entrance.show();

        let toggle_id = tree.next_id();
        let toggle = tree.add_child(
            root,
            WidgetState::new(toggle_id, Tag::Button).with_classes("md:hidden text-white"),
        );

        let panel_id = tree.next_id();
        let panel = tree.add_child(
            root,
            WidgetState::new(panel_id, Tag::Div)
                .with_classes("md:hidden bg-apex-black border-b border-white/10 overflow-hidden"),
        );
        let panel_links = nav
            .links
            .iter()
            .map(|link| {
                let id = tree.next_id();
                tree.add_child(
                    panel,
                    WidgetState::new(id, Tag::Anchor)
                        .with_classes(
                            "font-display text-xl uppercase tracking-tighter hover:text-apex-yellow",
                        )
                        .with_href(link.href.clone()),
                );
                PanelLink {
                    id,
                    link: link.clone(),
                    rect: Rect::ZERO,
                    hovered: false,
                }
            })
            .collect();

        let panel_tween = Transition::tween(0.3, apex_ui::Easing::EaseOut);

        Self {
            root,
            brand: brand.clone(),
            cta: nav.cta.clone(),
            theme: *theme,
            threshold,
            scrolled: false,
            menu_open: false,
            desktop: true,
            width: 0.0,
            classes,
            backdrop: AnimatedColor::new(Color::TRANSPARENT, Transition::default()),
            border: Motion::new(0.0, Transition::default()),
            logo,
            logo_rect: Rect::ZERO,
            logo_entrance,
            links,
            hire,
            hire_rect: Rect::ZERO,
            hire_entrance,
            hire_fill: AnimatedColor::new(theme.primary, HOVER),
            toggle,
            toggle_rect: Rect::ZERO,
            panel,
            panel_links,
            panel_height: Motion::new(0.0, panel_tween),
            panel_opacity: Motion::new(0.0, panel_tween),
            scroll_listener: events.subscribe(EventKind::Scroll),
        }
    }

    fn compose_classes(scrolled: bool) -> ClassList {
        cn!(BASE_CLASSES, "bg-transparent", scrolled.then_some(SCROLLED_CLASSES))
    }

    /// Returns true once the page has scrolled past the threshold.
    #[must_use]
    pub fn is_scrolled(&self) -> bool {
        self.scrolled
    }

    /// Returns true when the backdrop is (or is turning) opaque.
    #[must_use]
    pub fn is_opaque(&self) -> bool {
        !self.backdrop.target().is_transparent()
    }

    /// Backdrop color the bar is settling on.
    #[must_use]
    pub fn background_target(&self) -> Color {
        self.backdrop.target()
    }

    /// Backdrop color this frame.
    #[must_use]
    pub fn background(&self) -> Color {
        self.backdrop.value()
    }

    /// Current utility classes of the bar.
    #[must_use]
    pub fn classes(&self) -> &ClassList {
        &self.classes
    }

    /// Scroll offset at which the backdrop turns on.
    #[must_use]
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Returns true while the mobile panel is open.
    #[must_use]
    pub fn is_menu_open(&self) -> bool {
        self.menu_open
    }

    /// The hamburger / close button.
    #[must_use]
    pub fn toggle_id(&self) -> WidgetId {
        self.toggle
    }

    /// The `Hire Me` button.
    #[must_use]
    pub fn hire_id(&self) -> WidgetId {
        self.hire
    }

    /// Desktop link elements, in order.
    #[must_use]
    pub fn link_ids(&self) -> Vec<WidgetId> {
        self.links.iter().map(|link| link.id).collect()
    }

    /// Mobile panel link elements, in order.
    #[must_use]
    pub fn panel_link_ids(&self) -> Vec<WidgetId> {
        self.panel_links.iter().map(|link| link.id).collect()
    }

    /// Labels of the panel links a visitor can currently see.
    #[must_use]
    pub fn visible_panel_links(&self, tree: &WidgetTree) -> Vec<&str> {
        self.panel_links
            .iter()
            .filter(|link| tree.is_effectively_visible(link.id))
            .map(|link| link.link.name.as_str())
            .collect()
    }

    /// Current animated panel height.
    #[must_use]
    pub fn panel_height(&self) -> f32 {
        self.panel_height.value().max(0.0)
    }

    /// Flips the mobile panel.
    pub fn toggle_menu(&mut self, tree: &mut WidgetTree) {
        self.set_menu_open(tree, !self.menu_open);
    }

    /// Closes the mobile panel if it is open.
    pub fn close_menu(&mut self, tree: &mut WidgetTree) {
        self.set_menu_open(tree, false);
    }

    fn set_menu_open(&mut self, tree: &mut WidgetTree, open: bool) {
        if self.menu_open == open {
            return;
        }
        self.menu_open = open;
        tracing::debug!(open, "mobile menu toggled");
        self.panel_height
            .set_target(if open { self.full_panel_height() } else { 0.0 });
        self.panel_opacity.set_target(if open { 1.0 } else { 0.0 });
        self.apply_visibility(tree);
    }

    /// Reacts to a click on `target`. Returns true when the click only
    /// toggled the menu and there is nothing to navigate to.
    pub fn handle_click(&mut self, target: WidgetId, tree: &mut WidgetTree) -> bool {
        if tree.is_within(target, self.toggle) {
            self.toggle_menu(tree);
            return true;
        }
        if self
            .panel_links
            .iter()
            .any(|link| tree.is_within(target, link.id))
        {
            self.close_menu(tree);
        }
        false
    }

    fn full_panel_height(&self) -> f32 {
        if self.panel_links.is_empty() {
            return 0.0;
        }
        let count = self.panel_links.len() as f32;
        PANEL_PADDING * 2.0 + count * (PANEL_FONT * 1.4) + (count - 1.0) * PANEL_GAP
    }

    fn apply_visibility(&self, tree: &mut WidgetTree) {
        for link in &self.links {
            tree.set_visible(link.id, self.desktop);
        }
        tree.set_visible(self.hire, self.desktop);
        tree.set_visible(self.toggle, !self.desktop);
        tree.set_visible(self.panel, !self.desktop && self.menu_open);
    }

    fn observe_scroll(&mut self, scroll_y: f32) -> bool {
        let scrolled = scroll_y >= self.threshold;
        if scrolled == self.scrolled {
            return false;
        }
        self.scrolled = scrolled;
        self.classes = Self::compose_classes(scrolled);
        if scrolled {
            self.backdrop
                .set_target(self.theme.background.with_alpha(0.8));
            self.border.set_target(0.1);
        } else {
            self.backdrop.set_target(Color::TRANSPARENT);
            self.border.set_target(0.0);
        }
        tracing::debug!(scroll_y, scrolled, "navbar backdrop");
        true
    }

    fn render_wordmark(&self, commands: &mut Vec<RenderCommand>, x: f32, opacity: f32) {
        let tile = Rect::new(x, self.logo_rect.y, ROW_HEIGHT, ROW_HEIGHT);
        commands.push(RenderCommand::Rect {
            bounds: tile,
            color: self.theme.primary.with_alpha(opacity),
            corner_radius: 0.0,
        });
        commands.push(text(
            &self.brand.mark,
            tile.x + 10.0,
            tile.y + 4.0,
            Color::BLACK,
            opacity,
            18.0,
            FontFace::Display,
        ));

        let font_size = 24.0;
        let tracking = -0.05 * font_size;
        let mut cursor = tile.right() + 8.0;
        for (part, color) in [
            (self.brand.name.as_str(), self.theme.text),
            (".", self.theme.primary),
            (self.brand.tld.as_str(), self.theme.text),
        ] {
            commands.push(text(
                part,
                cursor,
                tile.y + 2.0,
                color,
                opacity,
                font_size,
                FontFace::Display,
            ));
            cursor += FontFace::Display.measure(part, font_size, tracking);
        }
    }
}

impl Widget for Navbar {
    fn root(&self) -> WidgetId {
        self.root
    }

    fn update(&mut self, ctx: &FrameContext<'_>) -> WidgetResponse {
        let mut changed = false;
        for event in self.scroll_listener.drain() {
            if let UiEvent::Scroll { y } = event {
                changed |= self.observe_scroll(y);
            }
        }

        self.backdrop.update(ctx.dt);
        self.border.update(ctx.dt);
        self.logo_entrance.update(ctx.dt);
        for link in &mut self.links {
            link.entrance.update(ctx.dt);
            link.color.update(ctx.dt);
        }
        self.hire_entrance.update(ctx.dt);
        self.hire_fill.update(ctx.dt);
        self.panel_height.update(ctx.dt);
        self.panel_opacity.update(ctx.dt);

        WidgetResponse {
            changed,
            ..WidgetResponse::default()
        }
    }

    fn render(&self, _ctx: &FrameContext<'_>, commands: &mut Vec<RenderCommand>) {
        let bar = Rect::new(0.0, 0.0, self.width, Self::HEIGHT);
        let backdrop = self.backdrop.value();
        if !backdrop.is_transparent() {
            commands.push(RenderCommand::Rect {
                bounds: bar,
                color: backdrop,
                corner_radius: 0.0,
            });
        }
        let border = self.border.value();
        if border > 0.0 {
            commands.push(RenderCommand::Rect {
                bounds: Rect::new(0.0, bar.bottom() - 1.0, self.width, 1.0),
                color: Color::WHITE.with_alpha(border),
                corner_radius: 0.0,
            });
        }

        let logo_x = self.logo_rect.x + self.logo_entrance.offset();
        self.render_wordmark(commands, logo_x, self.logo_entrance.opacity());

        if self.desktop {
            for link in &self.links {
                commands.push(text(
                    &link.link.name,
                    link.rect.x,
                    link.rect.y + link.entrance.offset(),
                    link.color.value(),
                    link.entrance.opacity(),
                    LINK_FONT,
                    FontFace::Display,
                ));
            }
            let scale = 1.0 - self.hire_entrance.offset();
            let opacity = self.hire_entrance.opacity();
            let fill = self.hire_fill.value();
            let button = self.hire_rect.scale_about_center(scale);
            commands.push(RenderCommand::Rect {
                bounds: button,
                color: fill.with_alpha(fill.a * opacity),
                corner_radius: 0.0,
            });
            commands.push(text(
                &self.cta,
                button.x + 24.0,
                button.y + 8.0,
                Color::BLACK,
                opacity,
                CTA_FONT * scale,
                FontFace::Display,
            ));
        } else {
            commands.push(RenderCommand::Icon {
                bounds: self.toggle_rect,
                glyph: if self.menu_open { Glyph::X } else { Glyph::Menu },
                color: self.theme.text,
            });

            let height = self.panel_height();
            if height > 0.5 {
                let panel = Rect::new(0.0, Self::HEIGHT, self.width, height);
                let opacity = self.panel_opacity.value().clamp(0.0, 1.0);
                commands.push(RenderCommand::PushClip { bounds: panel });
                commands.push(RenderCommand::Rect {
                    bounds: panel,
                    color: self.theme.background.with_alpha(opacity),
                    corner_radius: 0.0,
                });
                for link in &self.panel_links {
                    let color = if link.hovered {
                        self.theme.primary
                    } else {
                        self.theme.text
                    };
                    commands.push(text(
                        &link.link.name,
                        link.rect.x,
                        link.rect.y,
                        color,
                        opacity,
                        PANEL_FONT,
                        FontFace::Display,
                    ));
                }
                commands.push(RenderCommand::PopClip);
            }
        }
    }

    fn z_index(&self) -> i32 {
        Self::Z_INDEX
    }

    fn is_settled(&self) -> bool {
        self.backdrop.is_settled()
            && self.logo_entrance.is_settled()
            && self.hire_entrance.is_settled()
            && self.links.iter().all(|link| link.entrance.is_settled())
            && self.panel_height.is_settled()
    }
}

impl Component for Navbar {
    fn layout(&mut self, tree: &mut WidgetTree, viewport: Viewport, _top: f32) -> f32 {
        self.width = viewport.width;
        self.desktop = viewport.breakpoint().is_desktop();
        tree.set_rect(self.root, Rect::new(0.0, 0.0, viewport.width, Self::HEIGHT));

        let column = container(viewport.width, 1280.0, 24.0);
        let row = Rect::new(column.x, ROW_TOP, column.width, ROW_HEIGHT);

        let wordmark = FontFace::Display.measure(&self.brand.wordmark(), 24.0, -1.2);
        self.logo_rect = Rect::new(row.x, row.y, ROW_HEIGHT + 8.0 + wordmark, ROW_HEIGHT);
        tree.set_rect(self.logo, self.logo_rect);

        let mut sizes: Vec<(f32, f32)> = self
            .links
            .iter()
            .map(|link| {
                let width = FontFace::Display.measure(&link.link.name, LINK_FONT, 1.4);
                (width, LINK_FONT * 1.4)
            })
            .collect();
        sizes.push((
            padded_width(&self.cta, CTA_FONT, FontFace::Display, 1.2, 24.0),
            ROW_HEIGHT,
        ));
        let placed = Layout::horizontal()
            .with_gap(32.0)
            .align_main(Alignment::End)
            .align_cross(Alignment::Center)
            .arrange(row, &sizes);
        for (link, rect) in self.links.iter_mut().zip(&placed) {
            link.rect = *rect;
            tree.set_rect(link.id, *rect);
        }
        if let Some(rect) = placed.last() {
            self.hire_rect = *rect;
            tree.set_rect(self.hire, *rect);
        }

        self.toggle_rect = centered_in_row(row, row.right() - TOGGLE_SIZE, TOGGLE_SIZE, TOGGLE_SIZE);
        tree.set_rect(self.toggle, self.toggle_rect);

        let full = self.full_panel_height();
        tree.set_rect(self.panel, Rect::new(0.0, Self::HEIGHT, viewport.width, full));
        let mut y = Self::HEIGHT + PANEL_PADDING;
        for link in &mut self.panel_links {
            let width = FontFace::Display.measure(&link.link.name, PANEL_FONT, -1.0);
            link.rect = Rect::new(PANEL_PADDING, y, width, PANEL_FONT * 1.4);
            tree.set_rect(link.id, link.rect);
            y += PANEL_FONT * 1.4 + PANEL_GAP;
        }

        if self.desktop && self.menu_open {
            self.menu_open = false;
            self.panel_height.set_immediate(0.0);
            self.panel_opacity.set_immediate(0.0);
        } else if self.menu_open {
            self.panel_height.set_target(full);
        }
        self.apply_visibility(tree);
        0.0
    }

    fn sync_hover(&mut self, tree: &WidgetTree) {
        let hovered = |id: WidgetId| tree.get(id).is_some_and(WidgetState::is_hovered);
        for link in &mut self.links {
            link.color.set_target(if hovered(link.id) {
                self.theme.primary
            } else {
                self.theme.text
            });
        }
        self.hire_fill.set_target(if hovered(self.hire) {
            Color::WHITE
        } else {
            self.theme.primary
        });
        for link in &mut self.panel_links {
            link.hovered = hovered(link.id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use apex_ui::InputState;

    fn navbar(viewport: Viewport) -> (Navbar, WidgetTree, EventHub) {
        let config = SiteConfig::embedded().unwrap();
        let events = EventHub::new();
        let mut tree = WidgetTree::new();
        let mut navbar = Navbar::new(
            &mut tree,
            &config.brand,
            &config.content.nav,
            &Theme::APEX,
            config.motion.navbar_threshold,
            &events,
        );
        navbar.layout(&mut tree, viewport, 0.0);
        (navbar, tree, events)
    }

    fn frame(navbar: &mut Navbar, events: &EventHub, scroll_y: f32) {
        events.emit(UiEvent::Scroll { y: scroll_y });
        let input = InputState::new();
        let ctx = FrameContext {
            dt: 0.016,
            time: 0.0,
            scroll_y,
            viewport: Viewport::DESKTOP,
            input: &input,
        };
        navbar.update(&ctx);
    }

    #[test]
    fn test_threshold_switches_backdrop() {
        let (mut navbar, _tree, events) = navbar(Viewport::DESKTOP);

        for scroll_y in [0.0, 10.0, 49.9] {
            frame(&mut navbar, &events, scroll_y);
            assert!(!navbar.is_opaque(), "opaque at {scroll_y}");
            assert!(navbar.classes().contains("bg-transparent"));
        }
        for scroll_y in [50.0, 51.0, 4000.0] {
            frame(&mut navbar, &events, scroll_y);
            assert!(navbar.is_opaque(), "transparent at {scroll_y}");
            assert!(navbar.classes().contains("bg-apex-black/80"));
            assert!(!navbar.classes().contains("bg-transparent"));
        }
    }

    #[test]
    fn test_backdrop_waits_for_scroll_events() {
        let (mut navbar, _tree, events) = navbar(Viewport::DESKTOP);
        events.emit(UiEvent::Scroll { y: 80.0 });
        events.emit(UiEvent::Scroll { y: 20.0 });
        assert!(!navbar.is_scrolled());

        let input = InputState::new();
        let ctx = FrameContext {
            dt: 0.016,
            time: 0.0,
            scroll_y: 20.0,
            viewport: Viewport::DESKTOP,
            input: &input,
        };
        navbar.update(&ctx);
        // Latest delivered offset wins.
        assert!(!navbar.is_scrolled());

        events.emit(UiEvent::Scroll { y: 50.0 });
        navbar.update(&ctx);
        assert!(navbar.is_scrolled());
    }

    #[test]
    fn test_toggle_twice_restores_state() {
        let (mut navbar, mut tree, _events) = navbar(Viewport::PHONE);
        assert!(!navbar.is_menu_open());

        navbar.toggle_menu(&mut tree);
        assert!(navbar.is_menu_open());
        assert_eq!(navbar.visible_panel_links(&tree).len(), 4);

        navbar.toggle_menu(&mut tree);
        assert!(!navbar.is_menu_open());
        assert!(navbar.visible_panel_links(&tree).is_empty());
    }

    #[test]
    fn test_panel_link_click_closes_menu() {
        let (mut navbar, mut tree, _events) = navbar(Viewport::PHONE);
        let toggle = navbar.toggle_id();
        assert!(navbar.handle_click(toggle, &mut tree));
        assert!(navbar.is_menu_open());

        let link = navbar.panel_link_ids()[2];
        assert!(!navbar.handle_click(link, &mut tree));
        assert!(!navbar.is_menu_open());
    }

    #[test]
    fn test_desktop_hides_toggle() {
        let (navbar, tree, _events) = navbar(Viewport::DESKTOP);
        assert!(!tree.is_effectively_visible(navbar.toggle_id()));
        assert!(navbar
            .link_ids()
            .iter()
            .all(|id| tree.is_effectively_visible(*id)));
    }

    #[test]
    fn test_listener_dropped_with_navbar() {
        let (navbar, _tree, events) = navbar(Viewport::DESKTOP);
        assert_eq!(events.listener_count(EventKind::Scroll), 1);
        drop(navbar);
        assert_eq!(events.listener_count(EventKind::Scroll), 0);
    }
}
