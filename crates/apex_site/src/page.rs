//! The page shell: mounts components, routes host events, drives frames.
//!
//! ```text
//!  host ──► handle_event(PageEvent) ──► scroller / hit test / components
//!   │                                         │
//!   └────► frame(time_ms) ──► FrameLoop::tick ─┘──► update every component
//!   │
//!   └────► render() ──► UIRenderer ──► &[UIBatch] (sorted by z-index)
//! ```
//!
//! The smooth scroller is the only recurring frame callback. It is
//! registered in [`Page::mount`] and cancelled when the page is
//! unmounted or dropped, together with every event subscription.

use apex_ui::{
    EventHub, FrameContext, FrameLoop, InputState, Rect, RenderCommand, SmoothScroll,
    SmoothScroller, Theme, UIBatch, UIRenderer, UiEvent, Viewport, Widget, WidgetId,
    WidgetResponse, WidgetTree,
};
use tracing::{debug, info, trace, warn};

use crate::components::{
    Component, Contact, CustomCursor, Footer, Hero, Marquee, Navbar, ProgressBar, Projects, Stats,
};
use crate::config::{SiteConfig, SECTION_ANCHORS};
use crate::error::{SiteError, SiteResult};

/// Input from the host.
#[derive(Debug, Clone, PartialEq)]
pub enum PageEvent {
    /// Mouse wheel or trackpad; positive scrolls down.
    Wheel {
        /// Vertical delta in pixels.
        delta_y: f32,
    },
    /// Programmatic scroll.
    ScrollTo {
        /// Document offset.
        y: f32,
        /// Jump instead of easing.
        immediate: bool,
    },
    /// Pointer moved to a viewport position.
    PointerMove {
        /// Viewport x.
        x: f32,
        /// Viewport y.
        y: f32,
    },
    /// Primary click at a viewport position.
    Click {
        /// Viewport x.
        x: f32,
        /// Viewport y.
        y: f32,
    },
    /// The viewport changed size.
    Resize {
        /// New width.
        width: f32,
        /// New height.
        height: f32,
    },
    /// The host finished loading an image.
    ImageLoaded {
        /// Image URL.
        source: String,
    },
    /// The host gave up loading an image.
    ImageFailed {
        /// Image URL.
        source: String,
        /// Host-provided reason.
        reason: String,
    },
}

/// Where a click took the visitor.
#[derive(Debug, Clone, PartialEq)]
pub enum Navigation {
    /// In-page link; the page is scrolling to `offset`.
    Anchor {
        /// The `#anchor` that was followed.
        href: String,
        /// Document offset of the section.
        offset: f32,
    },
    /// Anything the host has to open itself (`mailto:`, other sites).
    External(String),
}

/// The mounted portfolio page.
pub struct Page {
    config: SiteConfig,
    viewport: Viewport,
    theme: Theme,
    tree: WidgetTree,
    frames: FrameLoop,
    events: EventHub,
    scroller: Option<SmoothScroller>,
    input: InputState,
    renderer: UIRenderer,

    progress: ProgressBar,
    navbar: Navbar,
    hero: Hero,
    marquee: Marquee,
    projects: Projects,
    stats: Stats,
    contact: Contact,
    footer: Footer,
    cursor: CustomCursor,

    anchors: Vec<(String, f32)>,
    document_height: f32,
    scroll_y: f32,
    hovered: Option<WidgetId>,
    last_time: Option<f64>,
    elapsed: f32,
}

impl Page {
    /// Validates `config`, builds every component, lays the page out for
    /// `viewport` and attaches smooth scrolling to `frames`.
    ///
    /// # Errors
    ///
    /// Returns an error if the content fails validation.
    pub fn mount(config: SiteConfig, viewport: Viewport, frames: &FrameLoop) -> SiteResult<Self> {
        config.validate()?;

        let theme = Theme::APEX;
        let motion = config.motion;
        let events = EventHub::new();
        let mut tree = WidgetTree::new();

        let progress = ProgressBar::new(&mut tree, &theme);
        let navbar = Navbar::new(
            &mut tree,
            &config.brand,
            &config.content.nav,
            &theme,
            motion.navbar_threshold,
            &events,
        );
        let hero = Hero::new(&mut tree, &config.content.hero, &theme);
        let marquee = Marquee::new(
            &mut tree,
            &config.content.skills,
            motion.marquee_copies,
            motion.marquee_duration,
            &theme,
        );
        let projects = Projects::new(
            &mut tree,
            &config.content.projects,
            motion.reveal_margin,
            &theme,
        );
        let stats = Stats::new(&mut tree, &config.content.stats, &theme);
        let contact = Contact::new(&mut tree, &config.content.contact, &theme);
        let footer = Footer::new(&mut tree, &config.brand, &config.content.footer, &theme);
        let cursor = CustomCursor::new(
            &mut tree,
            &events,
            motion.cursor_size,
            motion.cursor_hover_scale,
            &theme,
        );

        let mut page = Self {
            config,
            viewport,
            theme,
            tree,
            frames: frames.clone(),
            events,
            scroller: None,
            input: InputState::new(),
            renderer: UIRenderer::new(),
            progress,
            navbar,
            hero,
            marquee,
            projects,
            stats,
            contact,
            footer,
            cursor,
            anchors: Vec::new(),
            document_height: 0.0,
            scroll_y: 0.0,
            hovered: None,
            last_time: None,
            elapsed: 0.0,
        };
        page.layout();
        let engine = SmoothScroll::new(page.config.motion.smooth_scroll, page.scroll_limit());
        page.scroller = Some(engine.attach(frames));

        info!(
            width = viewport.width,
            height = viewport.height,
            document_height = page.document_height,
            elements = page.tree.len(),
            listeners = page.events.total_listeners(),
            "page mounted"
        );
        Ok(page)
    }

    /// Reacts to one host event. Returns where a click navigated, if anywhere.
    pub fn handle_event(&mut self, event: PageEvent) -> Option<Navigation> {
        match event {
            PageEvent::Wheel { delta_y } => {
                if let Some(scroller) = &self.scroller {
                    scroller.on_wheel(delta_y);
                }
                None
            }
            PageEvent::ScrollTo { y, immediate } => {
                self.scroll_to(y, immediate);
                None
            }
            PageEvent::PointerMove { x, y } => {
                self.input.set_pointer(x, y);
                self.events.emit(UiEvent::PointerMove { x, y });
                self.refresh_hover();
                None
            }
            PageEvent::Click { x, y } => self.click(x, y),
            PageEvent::Resize { width, height } => {
                self.resize(Viewport::new(width, height));
                None
            }
            PageEvent::ImageLoaded { source } => {
                if !self.projects.mark_image_loaded(&source) {
                    debug!(%source, "loaded image is not on the page");
                }
                None
            }
            PageEvent::ImageFailed { source, reason } => {
                if !self.projects.mark_image_failed(&source, &reason) {
                    debug!(%source, "failed image is not on the page");
                }
                None
            }
        }
    }

    /// Advances one animation frame at host timestamp `time_ms`.
    pub fn frame(&mut self, time_ms: f64) -> WidgetResponse {
        #[allow(clippy::cast_possible_truncation)]
        let dt = self
            .last_time
            .map_or(0.0, |last| ((time_ms - last) / 1000.0).max(0.0) as f32);
        self.last_time = Some(time_ms);
        self.elapsed += dt;

        self.frames.tick(time_ms);
        let scroll_y = self
            .scroller
            .as_ref()
            .map_or(self.scroll_y, SmoothScroller::scroll_y);
        self.set_scroll(scroll_y);

        let ctx = FrameContext {
            dt,
            time: self.elapsed,
            scroll_y: self.scroll_y,
            viewport: self.viewport,
            input: &self.input,
        };
        let widgets: [&mut dyn Widget; 9] = [
            &mut self.progress,
            &mut self.navbar,
            &mut self.hero,
            &mut self.marquee,
            &mut self.projects,
            &mut self.stats,
            &mut self.contact,
            &mut self.footer,
            &mut self.cursor,
        ];
        let mut response = WidgetResponse::default();
        for widget in widgets {
            response = response.merge(widget.update(&ctx));
        }
        response
    }

    /// Builds this frame's render batches.
    pub fn render(&mut self) -> &[UIBatch] {
        let ctx = FrameContext {
            dt: 0.0,
            time: self.elapsed,
            scroll_y: self.scroll_y,
            viewport: self.viewport,
            input: &self.input,
        };
        self.renderer.begin_frame();
        self.renderer.set_layer(0);
        self.renderer.push(RenderCommand::Rect {
            bounds: Rect::new(0.0, 0.0, self.viewport.width, self.viewport.height),
            color: self.theme.background,
            corner_radius: 0.0,
        });

        let widgets: [&dyn Widget; 9] = [
            &self.hero,
            &self.marquee,
            &self.projects,
            &self.stats,
            &self.contact,
            &self.footer,
            &self.navbar,
            &self.progress,
            &self.cursor,
        ];
        let mut commands = Vec::with_capacity(128);
        for widget in widgets {
            widget.render(&ctx, &mut commands);
            self.renderer.set_layer(widget.z_index());
            self.renderer.extend(commands.drain(..));
        }
        self.renderer.end_frame()
    }

    /// Tears the page down: cancels the scroll frame callback and drops
    /// every listener.
    pub fn unmount(self) {
        drop(self);
    }

    /// The loaded configuration.
    #[must_use]
    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// The navigation bar.
    #[must_use]
    pub fn navbar(&self) -> &Navbar {
        &self.navbar
    }

    /// The cursor ring.
    #[must_use]
    pub fn cursor(&self) -> &CustomCursor {
        &self.cursor
    }

    /// The scroll progress bar.
    #[must_use]
    pub fn progress(&self) -> &ProgressBar {
        &self.progress
    }

    /// The hero section.
    #[must_use]
    pub fn hero(&self) -> &Hero {
        &self.hero
    }

    /// The projects section.
    #[must_use]
    pub fn projects(&self) -> &Projects {
        &self.projects
    }

    /// The stats section.
    #[must_use]
    pub fn stats(&self) -> &Stats {
        &self.stats
    }

    /// The contact section.
    #[must_use]
    pub fn contact(&self) -> &Contact {
        &self.contact
    }

    /// The footer.
    #[must_use]
    pub fn footer(&self) -> &Footer {
        &self.footer
    }

    /// The element tree.
    #[must_use]
    pub fn tree(&self) -> &WidgetTree {
        &self.tree
    }

    /// The page's event hub.
    #[must_use]
    pub fn events(&self) -> &EventHub {
        &self.events
    }

    /// The viewport the page is laid out for.
    #[must_use]
    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    /// Scroll offset as of the last frame.
    #[must_use]
    pub fn scroll_y(&self) -> f32 {
        self.scroll_y
    }

    /// Largest reachable scroll offset.
    #[must_use]
    pub fn scroll_limit(&self) -> f32 {
        (self.document_height - self.viewport.height).max(0.0)
    }

    /// Height of the laid-out document.
    #[must_use]
    pub fn document_height(&self) -> f32 {
        self.document_height
    }

    /// Returns true while the smooth scroller is still easing.
    #[must_use]
    pub fn is_scrolling(&self) -> bool {
        self.scroller
            .as_ref()
            .is_some_and(|scroller| scroller.with(|engine| engine.is_scrolling()))
    }

    /// Document offset of the section behind an in-page link.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::UnknownAnchor`] if no section has that anchor.
    pub fn anchor_offset(&self, href: &str) -> SiteResult<f32> {
        self.anchors
            .iter()
            .find(|(anchor, _)| anchor == href)
            .map(|(_, offset)| *offset)
            .ok_or_else(|| SiteError::UnknownAnchor(href.to_owned()))
    }

    /// Where an element currently sits in the viewport.
    #[must_use]
    pub fn screen_rect(&self, id: WidgetId) -> Option<Rect> {
        self.tree.screen_rect(id, self.scroll_y)
    }

    fn layout(&mut self) {
        let viewport = self.viewport;
        let tree = &mut self.tree;
        self.progress.layout(tree, viewport, 0.0);
        self.navbar.layout(tree, viewport, 0.0);
        self.cursor.layout(tree, viewport, 0.0);

        let mut top = 0.0;
        let sections: [&mut dyn Component; 6] = [
            &mut self.hero,
            &mut self.marquee,
            &mut self.projects,
            &mut self.stats,
            &mut self.contact,
            &mut self.footer,
        ];
        for section in sections {
            top += section.layout(tree, viewport, top);
        }

        self.document_height = top.max(viewport.height);
        self.progress.set_document_height(self.document_height);
        let offsets = [
            0.0,
            self.projects.rect().y,
            self.stats.rect().y,
            self.contact.rect().y,
        ];
        self.anchors = SECTION_ANCHORS
            .iter()
            .zip(offsets)
            .map(|(anchor, offset)| ((*anchor).to_owned(), offset))
            .collect();
        debug!(document_height = self.document_height, "page laid out");
    }

    fn resize(&mut self, viewport: Viewport) {
        if viewport == self.viewport {
            return;
        }
        self.viewport = viewport;
        self.layout();
        let limit = self.scroll_limit();
        if let Some(scroller) = &self.scroller {
            scroller.set_limit(limit);
        }
        debug!(
            width = viewport.width,
            height = viewport.height,
            breakpoint = ?viewport.breakpoint(),
            "viewport resized"
        );
        self.events.emit(UiEvent::Resize {
            width: viewport.width,
            height: viewport.height,
        });
        let scroll_y = self
            .scroller
            .as_ref()
            .map_or(self.scroll_y, SmoothScroller::scroll_y);
        if !self.set_scroll(scroll_y) && self.input.pointer_seen {
            self.refresh_hover();
        }
    }

    fn scroll_to(&mut self, y: f32, immediate: bool) {
        let Some(scroller) = &self.scroller else {
            return;
        };
        scroller.scroll_to(y, immediate);
        if immediate {
            let scroll_y = scroller.scroll_y();
            self.set_scroll(scroll_y);
        }
    }

    /// Records a new scroll offset and tells the listeners about it.
    /// Returns false if the offset did not move.
    fn set_scroll(&mut self, scroll_y: f32) -> bool {
        if (scroll_y - self.scroll_y).abs() <= f32::EPSILON {
            return false;
        }
        trace!(scroll_y, "scroll");
        self.scroll_y = scroll_y;
        self.events.emit(UiEvent::Scroll { y: scroll_y });
        if self.input.pointer_seen {
            self.refresh_hover();
        }
        true
    }

    /// Re-hit-tests the pointer and hands hover flags to the components.
    fn refresh_hover(&mut self) {
        let hit = self
            .tree
            .hit_test(self.input.pointer_x, self.input.pointer_y, self.scroll_y);
        if hit != self.hovered {
            trace!(?hit, "hover target");
            self.hovered = hit;
            self.tree.set_hovered(hit);
            self.events.emit(UiEvent::PointerOver {
                interactive: hit.is_some_and(|id| self.tree.is_interactive(id)),
            });
        }

        let tree = &self.tree;
        let components: [&mut dyn Component; 5] = [
            &mut self.navbar,
            &mut self.hero,
            &mut self.projects,
            &mut self.contact,
            &mut self.footer,
        ];
        for component in components {
            component.sync_hover(tree);
        }
    }

    fn click(&mut self, x: f32, y: f32) -> Option<Navigation> {
        self.input.set_pointer(x, y);
        self.events.emit(UiEvent::Click { x, y });
        let target = self.tree.hit_test(x, y, self.scroll_y)?;
        if self.navbar.handle_click(target, &mut self.tree) {
            return None;
        }
        let (_, href) = self.tree.closest_link(target)?;
        let href = href.to_owned();
        self.navigate(href)
    }

    fn navigate(&mut self, href: String) -> Option<Navigation> {
        if !href.starts_with('#') {
            debug!(%href, "external navigation");
            return Some(Navigation::External(href));
        }
        match self.anchor_offset(&href) {
            Ok(offset) => {
                let offset = offset.min(self.scroll_limit());
                debug!(%href, offset, "anchor navigation");
                self.scroll_to(offset, false);
                Some(Navigation::Anchor { href, offset })
            }
            Err(err) => {
                warn!(%err, "ignoring in-page link");
                None
            }
        }
    }
}

impl Drop for Page {
    fn drop(&mut self) {
        if let Some(scroller) = self.scroller.take() {
            scroller.destroy();
        }
        info!(frames = self.frames.frame_count(), "page unmounted");
    }
}
