//! Integration test for a full visit to the page.
//!
//! Drives the page the way a browser host would: timestamps at 60 fps,
//! wheel and pointer events in between, render batches read back out.

use apex_site::{Navigation, Page, PageEvent, SiteConfig};
use apex_ui::{FrameLoop, RenderCommand, Viewport, WidgetId};

const FRAME_MS: f64 = 1000.0 / 60.0;

struct Host {
    page: Page,
    frames: FrameLoop,
    now: f64,
}

impl Host {
    fn mount(viewport: Viewport) -> Self {
        let frames = FrameLoop::new();
        let page = Page::mount(SiteConfig::embedded().unwrap(), viewport, &frames).unwrap();
        Self {
            page,
            frames,
            now: 0.0,
        }
    }

    fn run(&mut self, seconds: f64) {
        let frames = (seconds * 1000.0 / FRAME_MS).ceil() as usize;
        for _ in 0..frames {
            self.page.frame(self.now);
            self.now += FRAME_MS;
        }
    }

    fn send(&mut self, event: PageEvent) -> Option<Navigation> {
        self.page.handle_event(event)
    }

    fn jump(&mut self, y: f32) {
        self.send(PageEvent::ScrollTo { y, immediate: true });
        self.run(0.05);
    }

    fn glide(&mut self, y: f32) {
        self.send(PageEvent::ScrollTo {
            y,
            immediate: false,
        });
        self.run(2.0);
    }

    fn centre(&self, id: WidgetId) -> (f32, f32) {
        self.page.screen_rect(id).unwrap().center()
    }

    fn click(&mut self, id: WidgetId) -> Option<Navigation> {
        let (x, y) = self.centre(id);
        self.send(PageEvent::Click { x, y })
    }

    fn hover(&mut self, id: WidgetId) {
        let (x, y) = self.centre(id);
        self.send(PageEvent::PointerMove { x, y });
    }

    fn commands(&mut self) -> Vec<RenderCommand> {
        self.page
            .render()
            .iter()
            .flat_map(|batch| batch.commands.iter().cloned())
            .collect()
    }
}

#[test]
fn test_navbar_opaque_exactly_past_threshold() {
    let mut host = Host::mount(Viewport::DESKTOP);
    for y in [0.0, 10.0, 49.0, 50.0, 51.0, 400.0, 49.9, 0.0] {
        host.jump(y);
        assert_eq!(host.page.navbar().is_opaque(), y >= 50.0, "scroll_y = {y}");
        assert_eq!(host.page.navbar().is_scrolled(), y >= 50.0);
    }
}

#[test]
fn test_progress_never_runs_backwards_on_the_way_down() {
    let mut host = Host::mount(Viewport::DESKTOP);
    host.send(PageEvent::ScrollTo {
        y: host.page.scroll_limit(),
        immediate: false,
    });

    let mut previous = 0.0;
    let mut previous_scale = host.page.progress().scale_x();
    for _ in 0..120 {
        host.run(0.02);
        let target = host.page.progress().target();
        assert!(target >= previous);
        assert!((0.0..=1.0).contains(&target));
        previous = target;

        // The drawn bar follows without overshooting back.
        let scale = host.page.progress().scale_x();
        assert!(
            scale >= previous_scale - 1e-4,
            "bar shrank from {previous_scale} to {scale}"
        );
        previous_scale = scale;
    }
    assert!((previous - 1.0).abs() < 1e-4);
}

#[test]
fn test_cursor_grows_over_links_only() {
    let mut host = Host::mount(Viewport::DESKTOP);
    host.run(0.5);

    let hire = host.page.navbar().hire_id();
    host.hover(hire);
    host.run(1.0);
    assert!(host.page.cursor().is_hovering());
    assert!((host.page.cursor().scale() - 2.5).abs() < 0.05);

    host.send(PageEvent::PointerMove { x: 24.0, y: 600.0 });
    host.run(1.0);
    assert!(!host.page.cursor().is_hovering());
    assert!((host.page.cursor().scale() - 1.0).abs() < 0.05);
}

#[test]
fn test_full_desktop_visit() {
    let mut host = Host::mount(Viewport::DESKTOP);

    // Landing.
    host.run(3.0);
    assert!(!host.page.navbar().is_opaque());
    assert!(host.page.hero().is_fully_visible());
    assert_eq!(host.page.progress().target(), 0.0);
    assert!(host.page.projects().cards().iter().all(|c| !c.is_revealed()));

    // Wheel all the way down.
    let limit = host.page.scroll_limit();
    while host.page.scroll_y() < limit - 0.5 {
        host.send(PageEvent::Wheel { delta_y: 300.0 });
        host.run(0.25);
    }
    host.run(3.0);

    assert!(host.page.navbar().is_opaque());
    assert!((host.page.progress().scale_x() - 1.0).abs() < 0.01);
    assert!(host.page.projects().is_header_revealed());
    assert!(host.page.projects().cards().iter().all(|c| c.is_revealed()));
    assert!(host.page.stats().all_settled());
    assert!(host.page.contact().is_heading_shown());
    let entries = host.page.contact().entries();
    assert!(entries >= 1);

    // Back to the top: one-shot reveals stay, the contact heading resets.
    host.jump(0.0);
    host.run(1.0);
    assert!(!host.page.navbar().is_opaque());
    assert!(host.page.projects().cards().iter().all(|c| c.is_revealed()));
    assert!(host.page.stats().all_settled());
    assert!(!host.page.contact().is_heading_shown());

    // And down again through the nav link.
    let contact = *host.page.navbar().link_ids().last().unwrap();
    let navigation = host.click(contact);
    let expected = host
        .page
        .anchor_offset("#contact")
        .unwrap()
        .min(host.page.scroll_limit());
    assert_eq!(
        navigation,
        Some(Navigation::Anchor {
            href: "#contact".to_owned(),
            offset: expected,
        })
    );
    host.run(2.0);
    assert!((host.page.scroll_y() - expected).abs() < 0.5);
    assert!(host.page.contact().is_heading_shown());
    assert!(host.page.contact().entries() > entries);
}

#[test]
fn test_mailto_is_left_to_the_host() {
    let mut host = Host::mount(Viewport::DESKTOP);
    let limit = host.page.scroll_limit();
    host.glide(limit);

    let cta = host.page.contact().cta_id();
    assert_eq!(
        host.click(cta),
        Some(Navigation::External("mailto:hello@apex.dev".to_owned()))
    );
    assert!((host.page.scroll_y() - limit).abs() < 0.5);
}

#[test]
fn test_mobile_menu() {
    let mut host = Host::mount(Viewport::PHONE);
    host.run(0.5);
    let toggle = host.page.navbar().toggle_id();
    assert!(host.page.navbar().visible_panel_links(host.page.tree()).is_empty());

    // Toggling twice restores the closed state.
    host.click(toggle);
    host.run(0.5);
    assert!(host.page.navbar().is_menu_open());
    assert_eq!(
        host.page.navbar().visible_panel_links(host.page.tree()),
        vec!["Home", "Projects", "About", "Contact"]
    );
    host.click(toggle);
    host.run(0.5);
    assert!(!host.page.navbar().is_menu_open());
    assert!(host.page.navbar().visible_panel_links(host.page.tree()).is_empty());

    // Following a panel link closes the menu.
    host.click(toggle);
    host.run(0.5);
    let projects = host.page.navbar().panel_link_ids()[1];
    let navigation = host.click(projects);
    assert!(!host.page.navbar().is_menu_open());
    let offset = host.page.anchor_offset("#projects").unwrap();
    assert_eq!(
        navigation,
        Some(Navigation::Anchor {
            href: "#projects".to_owned(),
            offset,
        })
    );
    host.run(2.0);
    assert!((host.page.scroll_y() - offset).abs() < 0.5);
}

#[test]
fn test_failed_image_renders_placeholder() {
    let mut host = Host::mount(Viewport::DESKTOP);
    let offset = host.page.anchor_offset("#projects").unwrap();
    host.glide(offset);

    let card = &host.page.projects().cards()[0];
    let (title, source) = (card.title().to_owned(), card.image().to_owned());
    host.send(PageEvent::ImageFailed {
        source,
        reason: "404".to_owned(),
    });
    host.run(0.1);

    let commands = host.commands();
    let broken: Vec<&str> = commands
        .iter()
        .filter_map(|command| match command {
            RenderCommand::BrokenImage { alt, .. } => Some(alt.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(broken, vec![title.as_str()]);
    assert!(commands
        .iter()
        .any(|command| matches!(command, RenderCommand::Image { .. })));
}

#[test]
fn test_unmount_releases_everything() {
    let mut host = Host::mount(Viewport::DESKTOP);
    host.send(PageEvent::PointerMove { x: 100.0, y: 100.0 });
    host.run(0.5);
    let events = host.page.events().clone();
    assert!(events.total_listeners() > 0);
    assert_eq!(host.frames.pending(), 1);

    let Host { page, frames, .. } = host;
    page.unmount();
    assert_eq!(frames.pending(), 0);
    assert_eq!(events.total_listeners(), 0);

    // Ticking after unmount is harmless.
    frames.tick(10_000.0);
    assert_eq!(frames.pending(), 0);
}
