//! Endless skill ticker.
//!
//! The track holds `copies` repetitions of the skill list laid end to
//! end and travels left by half its own width every `duration` seconds.
//! The offset wraps after one copy, so any `copies >= 2` loops without a
//! visible seam.

use apex_ui::{
    Color, FontFace, FrameContext, Glyph, Rect, RenderCommand, Tag, Theme, Viewport, Widget,
    WidgetId, WidgetResponse, WidgetState, WidgetTree,
};

use super::{text, Component};

const PADDING_Y: f32 = 40.0;
const BORDER: f32 = 4.0;
const ICON_SIZE: f32 = 32.0;
const ICON_GAP: f32 = 16.0;
const ITEM_MARGIN: f32 = 32.0;

/// The yellow skills band between the hero and the projects.
#[derive(Debug)]
pub struct Marquee {
    root: WidgetId,
    skills: Vec<String>,
    copies: usize,
    duration: f32,
    font_size: f32,
    rect: Rect,
    background: Color,
    time: f32,
}

impl Marquee {
    /// Registers the band in `tree`.
    pub fn new(
        tree: &mut WidgetTree,
        skills: &[String],
        copies: usize,
        duration: f32,
        theme: &Theme,
    ) -> Self {
        let id = tree.next_id();
        let root = tree.add_root(WidgetState::new(id, Tag::Div).with_classes(
            "py-10 bg-apex-yellow overflow-hidden whitespace-nowrap border-y-4 border-black",
        ));
        Self {
            root,
            skills: skills.to_vec(),
            copies,
            duration,
            font_size: 36.0,
            rect: Rect::ZERO,
            background: theme.primary,
            time: 0.0,
        }
    }

    /// Width of one skill label including its bolt and margins.
    fn item_width(&self, skill: &str) -> f32 {
        FontFace::Display.measure(&skill.to_uppercase(), self.font_size, 0.0)
            + ICON_GAP
            + ICON_SIZE
            + ITEM_MARGIN * 2.0
    }

    /// Width of one copy of the skill list.
    #[must_use]
    pub fn copy_width(&self) -> f32 {
        self.skills.iter().map(|skill| self.item_width(skill)).sum()
    }

    /// Width of the whole track.
    #[must_use]
    pub fn track_width(&self) -> f32 {
        self.copy_width() * self.copies as f32
    }

    /// Number of labels on the track.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.skills.len() * self.copies
    }

    /// Track speed in px/s.
    #[must_use]
    pub fn speed(&self) -> f32 {
        if self.duration <= 0.0 {
            return 0.0;
        }
        self.track_width() * 0.5 / self.duration
    }

    /// Seconds until the track has moved by exactly one copy.
    #[must_use]
    pub fn period(&self) -> f32 {
        let speed = self.speed();
        if speed <= 0.0 {
            return 0.0;
        }
        self.copy_width() / speed
    }

    /// Horizontal track offset at `time` seconds, in `(-copy_width, 0]`.
    #[must_use]
    pub fn offset_at(&self, time: f32) -> f32 {
        let period = self.period();
        if period <= 0.0 {
            return 0.0;
        }
        let phase = time.max(0.0).rem_euclid(period) / period;
        -phase * self.copy_width()
    }

    /// Band bounds in document space.
    #[must_use]
    pub fn rect(&self) -> Rect {
        self.rect
    }
}

impl Widget for Marquee {
    fn root(&self) -> WidgetId {
        self.root
    }

    fn update(&mut self, ctx: &FrameContext<'_>) -> WidgetResponse {
        self.time = ctx.time;
        WidgetResponse {
            changed: ctx.is_on_screen(self.rect),
            ..WidgetResponse::default()
        }
    }

    fn render(&self, ctx: &FrameContext<'_>, commands: &mut Vec<RenderCommand>) {
        if !ctx.is_on_screen(self.rect) {
            return;
        }
        let band = ctx.to_screen(self.rect);
        commands.push(RenderCommand::Rect {
            bounds: band,
            color: Color::BLACK,
            corner_radius: 0.0,
        });
        let inner = Rect::new(
            band.x,
            band.y + BORDER,
            band.width,
            band.height - BORDER * 2.0,
        );
        commands.push(RenderCommand::Rect {
            bounds: inner,
            color: self.background,
            corner_radius: 0.0,
        });
        commands.push(RenderCommand::PushClip { bounds: inner });

        let baseline = inner.y + PADDING_Y;
        let mut x = inner.x + self.offset_at(self.time);
        for skill in self.skills.iter().cycle().take(self.item_count()) {
            let width = self.item_width(skill);
            if x + width > inner.x && x < inner.right() {
                let label = skill.to_uppercase();
                let label_width = FontFace::Display.measure(&label, self.font_size, 0.0);
                commands.push(text(
                    &label,
                    x + ITEM_MARGIN,
                    baseline,
                    Color::BLACK,
                    1.0,
                    self.font_size,
                    FontFace::Display,
                ));
                commands.push(RenderCommand::Icon {
                    bounds: Rect::new(
                        x + ITEM_MARGIN + label_width + ICON_GAP,
                        baseline + (self.font_size - ICON_SIZE) * 0.5,
                        ICON_SIZE,
                        ICON_SIZE,
                    ),
                    glyph: Glyph::Zap,
                    color: Color::BLACK,
                });
            }
            x += width;
            if x >= inner.right() {
                break;
            }
        }

        commands.push(RenderCommand::PopClip);
    }
}

impl Component for Marquee {
    fn layout(&mut self, tree: &mut WidgetTree, viewport: Viewport, top: f32) -> f32 {
        self.font_size = viewport.breakpoint().pick(36.0, 60.0, 60.0);
        let height = PADDING_Y * 2.0 + self.font_size + BORDER * 2.0;
        self.rect = Rect::new(0.0, top, viewport.width, height);
        tree.set_rect(self.root, self.rect);
        height
    }
}
