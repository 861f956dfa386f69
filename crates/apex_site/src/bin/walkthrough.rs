//! # Walkthrough
//!
//! A scripted visit to the page, driven headlessly at 60 frames per second:
//!
//! Load → Hover the hero → Scroll to the bottom → Jump to #contact →
//! Rotate to a phone → Open the menu → Follow a link → Leave
//!
//! Logs what a visitor would see at each step. Set `APEX_LOG` (or
//! `RUST_LOG`) to `apex_site=debug` to follow the page's own events and
//! `APEX_SITE_CONFIG` to visit a different content file.

use std::process::ExitCode;

use apex_site::{Navigation, Page, PageEvent, SiteConfig, SiteResult};
use apex_ui::{FrameLoop, Viewport, WidgetId};
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Host frame interval in milliseconds.
const FRAME_MS: f64 = 1000.0 / 60.0;

/// Wheel notches before the visit gives up on reaching the footer.
const MAX_WHEEL_STEPS: usize = 200;

fn init_logger() {
    let filter = EnvFilter::try_from_env("APEX_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("apex_site=info,walkthrough=info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_thread_ids(false)
                .with_file(false)
                .with_line_number(false)
                .compact(),
        )
        .init();
}

fn load_config() -> SiteResult<SiteConfig> {
    match std::env::var("APEX_SITE_CONFIG") {
        Ok(path) => SiteConfig::from_file(path),
        Err(_) => SiteConfig::embedded(),
    }
}

/// Host clock: hands out frame timestamps.
struct Clock {
    now: f64,
}

impl Clock {
    /// Runs `seconds` worth of frames.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn run(&mut self, page: &mut Page, seconds: f64) {
        let frames = (seconds * 1000.0 / FRAME_MS).ceil() as usize;
        for _ in 0..frames {
            page.frame(self.now);
            page.render();
            self.now += FRAME_MS;
        }
    }
}

/// Viewport centre of an element, if it is on the page.
fn centre_of(page: &Page, id: WidgetId) -> Option<(f32, f32)> {
    page.screen_rect(id).map(|rect| rect.center())
}

fn log_state(page: &Page, step: &str) {
    let revealed = page
        .projects()
        .cards()
        .iter()
        .filter(|card| card.is_revealed())
        .count();
    info!(
        step,
        scroll_y = page.scroll_y(),
        navbar_opaque = page.navbar().is_opaque(),
        progress = page.progress().scale_x(),
        hero_visible = page.hero().is_fully_visible(),
        cards_revealed = revealed,
        stats_settled = page.stats().all_settled(),
        contact_entries = page.contact().entries(),
        "page state"
    );
}

fn visit(config: SiteConfig) -> SiteResult<()> {
    let frames = FrameLoop::new();
    let mut page = Page::mount(config, Viewport::DESKTOP, &frames)?;
    let mut clock = Clock { now: 0.0 };

    // =========================================================================
    // STEP 1: Load and let the hero play in
    // =========================================================================
    clock.run(&mut page, 2.5);
    log_state(&page, "loaded");

    // =========================================================================
    // STEP 2: Hover the primary call to action
    // =========================================================================
    if let Some((x, y)) = centre_of(&page, page.hero().primary_id()) {
        page.handle_event(PageEvent::PointerMove { x, y });
        clock.run(&mut page, 0.5);
        info!(
            hovering = page.cursor().is_hovering(),
            scale = page.cursor().scale(),
            "cursor over hero button"
        );
    }
    page.handle_event(PageEvent::PointerMove { x: 24.0, y: 600.0 });

    // =========================================================================
    // STEP 3: Wheel down to the footer
    // =========================================================================
    for _ in 0..MAX_WHEEL_STEPS {
        if page.scroll_y() >= page.scroll_limit() - 1.0 {
            break;
        }
        page.handle_event(PageEvent::Wheel { delta_y: 240.0 });
        clock.run(&mut page, 0.25);
    }
    clock.run(&mut page, 1.5);
    log_state(&page, "bottom");

    for image in page
        .config()
        .content
        .projects
        .items
        .iter()
        .map(|item| item.image.clone())
        .collect::<Vec<_>>()
    {
        page.handle_event(PageEvent::ImageLoaded { source: image });
    }

    // =========================================================================
    // STEP 4: Back to the top, then follow the contact link
    // =========================================================================
    page.handle_event(PageEvent::ScrollTo {
        y: 0.0,
        immediate: true,
    });
    clock.run(&mut page, 0.1);
    let contact_link = page.navbar().link_ids().last().copied();
    if let Some((x, y)) = contact_link.and_then(|id| centre_of(&page, id)) {
        match page.handle_event(PageEvent::Click { x, y }) {
            Some(Navigation::Anchor { href, offset }) => info!(%href, offset, "following link"),
            other => warn!(?other, "contact link did not navigate"),
        }
    }
    clock.run(&mut page, 1.5);
    log_state(&page, "contact");

    // =========================================================================
    // STEP 5: Phone layout and the mobile menu
    // =========================================================================
    page.handle_event(PageEvent::Resize {
        width: Viewport::PHONE.width,
        height: Viewport::PHONE.height,
    });
    clock.run(&mut page, 0.1);
    if let Some((x, y)) = centre_of(&page, page.navbar().toggle_id()) {
        page.handle_event(PageEvent::Click { x, y });
        clock.run(&mut page, 0.4);
        info!(
            open = page.navbar().is_menu_open(),
            links = ?page.navbar().visible_panel_links(page.tree()),
            "mobile menu"
        );
    }
    let projects_link = page.navbar().panel_link_ids().get(1).copied();
    if let Some((x, y)) = projects_link.and_then(|id| centre_of(&page, id)) {
        let navigation = page.handle_event(PageEvent::Click { x, y });
        info!(
            ?navigation,
            open = page.navbar().is_menu_open(),
            "followed panel link"
        );
    }
    clock.run(&mut page, 1.5);
    log_state(&page, "phone");

    // =========================================================================
    // STEP 6: Leave
    // =========================================================================
    page.unmount();
    info!(
        pending_callbacks = frames.pending(),
        frames = frames.frame_count(),
        "visit complete"
    );
    Ok(())
}

fn main() -> ExitCode {
    init_logger();

    let result = load_config().and_then(visit);
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(%err, "walkthrough failed");
            ExitCode::FAILURE
        }
    }
}
