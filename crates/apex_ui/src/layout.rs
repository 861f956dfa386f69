//! Layout primitives: rectangles, the viewport, breakpoints, stacks and grids.
//!
//! Coordinates are CSS pixels. Flowing content lives in document space
//! (y grows down from the top of the page); fixed content lives in
//! viewport space.

use serde::{Deserialize, Serialize};

/// A rectangle in document or viewport coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    /// X position (left edge).
    pub x: f32,
    /// Y position (top edge).
    pub y: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl Rect {
    /// A zero-sized rect at the origin.
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    /// Creates a new rectangle.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Returns the right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Returns the bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Returns the center point.
    #[must_use]
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Returns true if the point is inside the rectangle.
    #[must_use]
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    /// Returns true if two rectangles intersect.
    #[must_use]
    pub fn intersects(&self, other: &Self) -> bool {
        self.x < other.right()
            && self.right() > other.x
            && self.y < other.bottom()
            && self.bottom() > other.y
    }

    /// Returns the intersection of two rectangles, or None if they don't intersect.
    #[must_use]
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        if !self.intersects(other) {
            return None;
        }

        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());

        Some(Self::new(x, y, right - x, bottom - y))
    }

    /// Expands the rectangle by the given amount on all sides.
    #[must_use]
    pub fn expand(&self, amount: f32) -> Self {
        Self::new(
            self.x - amount,
            self.y - amount,
            self.width + amount * 2.0,
            self.height + amount * 2.0,
        )
    }

    /// Shrinks the rectangle by the given amount on all sides.
    #[must_use]
    pub fn shrink(&self, amount: f32) -> Self {
        self.expand(-amount)
    }

    /// Moves the rectangle by `(dx, dy)`.
    #[must_use]
    pub fn translate(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }

    /// Scales the rectangle around its center (CSS `transform: scale`).
    #[must_use]
    pub fn scale_about_center(&self, scale: f32) -> Self {
        let (cx, cy) = self.center();
        let width = self.width * scale;
        let height = self.height * scale;
        Self::new(cx - width * 0.5, cy - height * 0.5, width, height)
    }
}

/// The visible area of the page.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    /// Width in CSS pixels.
    pub width: f32,
    /// Height in CSS pixels.
    pub height: f32,
}

impl Viewport {
    /// A 1440x900 desktop viewport.
    pub const DESKTOP: Self = Self::new(1440.0, 900.0);
    /// A 390x844 phone viewport.
    pub const PHONE: Self = Self::new(390.0, 844.0);

    /// Creates a viewport.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Returns the responsive breakpoint for this width.
    #[must_use]
    pub fn breakpoint(&self) -> Breakpoint {
        Breakpoint::for_width(self.width)
    }

    /// Returns the viewport rect in document space for a scroll offset.
    #[must_use]
    pub fn document_rect(&self, scroll_y: f32) -> Rect {
        Rect::new(0.0, scroll_y, self.width, self.height)
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::DESKTOP
    }
}

/// Responsive breakpoint (mobile first).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Breakpoint {
    /// Below 768px.
    Base,
    /// 768px and up.
    Md,
    /// 1024px and up.
    Lg,
}

impl Breakpoint {
    /// Minimum width of the `md` breakpoint.
    pub const MD_MIN: f32 = 768.0;
    /// Minimum width of the `lg` breakpoint.
    pub const LG_MIN: f32 = 1024.0;

    /// Returns the breakpoint for a viewport width.
    #[must_use]
    pub fn for_width(width: f32) -> Self {
        if width >= Self::LG_MIN {
            Self::Lg
        } else if width >= Self::MD_MIN {
            Self::Md
        } else {
            Self::Base
        }
    }

    /// Returns true at `md` and wider.
    #[must_use]
    pub fn is_desktop(self) -> bool {
        self >= Self::Md
    }

    /// Picks a value per breakpoint.
    #[must_use]
    pub fn pick<T>(self, base: T, md: T, lg: T) -> T {
        match self {
            Self::Base => base,
            Self::Md => md,
            Self::Lg => lg,
        }
    }
}

/// Centered content column of at most `max_width`, inset by `padding`.
#[must_use]
pub fn container(viewport_width: f32, max_width: f32, padding: f32) -> Rect {
    let width = (viewport_width - padding * 2.0).min(max_width).max(0.0);
    let x = ((viewport_width - width) * 0.5).max(0.0);
    Rect::new(x, 0.0, width, 0.0)
}

/// Layout direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    /// Horizontal (left to right).
    #[default]
    Horizontal,
    /// Vertical (top to bottom).
    Vertical,
}

/// Layout alignment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Alignment {
    /// Align to start (left/top).
    #[default]
    Start,
    /// Align to center.
    Center,
    /// Align to end (right/bottom).
    End,
    /// Stretch to fill available space.
    Stretch,
}

/// Flex-style stack for arranging sections and inline rows.
#[derive(Debug, Clone, Copy)]
pub struct Layout {
    /// Current layout direction.
    pub direction: Direction,
    /// Main axis alignment.
    pub main_alignment: Alignment,
    /// Cross axis alignment.
    pub cross_alignment: Alignment,
    /// Gap between elements.
    pub gap: f32,
    /// Padding around content.
    pub padding: f32,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            direction: Direction::Horizontal,
            main_alignment: Alignment::Start,
            cross_alignment: Alignment::Start,
            gap: 0.0,
            padding: 0.0,
        }
    }
}

impl Layout {
    /// Creates a horizontal layout.
    #[must_use]
    pub fn horizontal() -> Self {
        Self {
            direction: Direction::Horizontal,
            ..Default::default()
        }
    }

    /// Creates a vertical layout.
    #[must_use]
    pub fn vertical() -> Self {
        Self {
            direction: Direction::Vertical,
            ..Default::default()
        }
    }

    /// Sets the gap between elements.
    #[must_use]
    pub const fn with_gap(mut self, gap: f32) -> Self {
        self.gap = gap;
        self
    }

    /// Sets padding around content.
    #[must_use]
    pub const fn with_padding(mut self, padding: f32) -> Self {
        self.padding = padding;
        self
    }

    /// Sets main axis alignment.
    #[must_use]
    pub const fn align_main(mut self, alignment: Alignment) -> Self {
        self.main_alignment = alignment;
        self
    }

    /// Sets cross axis alignment.
    #[must_use]
    pub const fn align_cross(mut self, alignment: Alignment) -> Self {
        self.cross_alignment = alignment;
        self
    }

    /// Lays out a list of sizes within the given bounds.
    ///
    /// Returns the positions for each element.
    #[must_use]
    pub fn arrange(&self, bounds: Rect, sizes: &[(f32, f32)]) -> Vec<Rect> {
        if sizes.is_empty() {
            return Vec::new();
        }

        let content_bounds = bounds.shrink(self.padding);
        let total_gap = self.gap * (sizes.len() - 1) as f32;
        let mut results = Vec::with_capacity(sizes.len());

        match self.direction {
            Direction::Horizontal => {
                let total_width: f32 = sizes.iter().map(|(w, _)| *w).sum();
                let mut x = match self.main_alignment {
                    Alignment::Start | Alignment::Stretch => content_bounds.x,
                    Alignment::Center => {
                        content_bounds.x + (content_bounds.width - total_width - total_gap) * 0.5
                    }
                    Alignment::End => content_bounds.right() - total_width - total_gap,
                };

                for (w, h) in sizes {
                    let (y, height) = match self.cross_alignment {
                        Alignment::Start => (content_bounds.y, *h),
                        Alignment::Center => {
                            (content_bounds.y + (content_bounds.height - h) * 0.5, *h)
                        }
                        Alignment::End => (content_bounds.bottom() - h, *h),
                        Alignment::Stretch => (content_bounds.y, content_bounds.height),
                    };
                    results.push(Rect::new(x, y, *w, height));
                    x += w + self.gap;
                }
            }
            Direction::Vertical => {
                let total_height: f32 = sizes.iter().map(|(_, h)| *h).sum();
                let mut y = match self.main_alignment {
                    Alignment::Start | Alignment::Stretch => content_bounds.y,
                    Alignment::Center => {
                        content_bounds.y + (content_bounds.height - total_height - total_gap) * 0.5
                    }
                    Alignment::End => content_bounds.bottom() - total_height - total_gap,
                };

                for (w, h) in sizes {
                    let (x, width) = match self.cross_alignment {
                        Alignment::Start => (content_bounds.x, *w),
                        Alignment::Center => {
                            (content_bounds.x + (content_bounds.width - w) * 0.5, *w)
                        }
                        Alignment::End => (content_bounds.right() - w, *w),
                        Alignment::Stretch => (content_bounds.x, content_bounds.width),
                    };
                    results.push(Rect::new(x, y, width, *h));
                    y += h + self.gap;
                }
            }
        }

        results
    }
}

/// Equal-column grid (`grid grid-cols-N gap-G`).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Grid {
    /// Number of columns (at least one).
    pub columns: usize,
    /// Gap between cells, both axes.
    pub gap: f32,
}

impl Grid {
    /// Creates a grid.
    #[must_use]
    pub const fn new(columns: usize, gap: f32) -> Self {
        Self { columns, gap }
    }

    /// Width of one cell inside `width`.
    #[must_use]
    pub fn cell_width(&self, width: f32) -> f32 {
        let columns = self.columns.max(1) as f32;
        ((width - self.gap * (columns - 1.0)) / columns).max(0.0)
    }

    /// Number of rows needed for `count` cells.
    #[must_use]
    pub fn rows(&self, count: usize) -> usize {
        count.div_ceil(self.columns.max(1))
    }

    /// Total height for `count` cells of `cell_height`.
    #[must_use]
    pub fn height(&self, count: usize, cell_height: f32) -> f32 {
        let rows = self.rows(count) as f32;
        if rows == 0.0 {
            0.0
        } else {
            rows * cell_height + (rows - 1.0) * self.gap
        }
    }

    /// Places `count` cells of `cell_height`, row-major, starting at `bounds`' origin.
    #[must_use]
    pub fn arrange(&self, bounds: Rect, cell_height: f32, count: usize) -> Vec<Rect> {
        let columns = self.columns.max(1);
        let cell_width = self.cell_width(bounds.width);
        (0..count)
            .map(|i| {
                let column = (i % columns) as f32;
                let row = (i / columns) as f32;
                Rect::new(
                    bounds.x + column * (cell_width + self.gap),
                    bounds.y + row * (cell_height + self.gap),
                    cell_width,
                    cell_height,
                )
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_contains() {
        let rect = Rect::new(10.0, 20.0, 100.0, 50.0);

        assert!(rect.contains(50.0, 30.0));
        assert!(!rect.contains(5.0, 30.0));
        assert!(!rect.contains(50.0, 80.0));
    }

    #[test]
    fn test_scale_about_center_keeps_center() {
        let rect = Rect::new(0.0, 0.0, 100.0, 100.0);
        let scaled = rect.scale_about_center(2.0);

        assert_eq!(scaled.center(), rect.center());
        assert_eq!(scaled.width, 200.0);
    }

    #[test]
    fn test_breakpoints() {
        assert_eq!(Breakpoint::for_width(390.0), Breakpoint::Base);
        assert_eq!(Breakpoint::for_width(768.0), Breakpoint::Md);
        assert_eq!(Breakpoint::for_width(1440.0), Breakpoint::Lg);
        assert!(!Breakpoint::Base.is_desktop());
        assert_eq!(Breakpoint::Md.pick(1, 2, 4), 2);
    }

    #[test]
    fn test_container_caps_width() {
        let column = container(1440.0, 1280.0, 24.0);
        assert_eq!(column.width, 1280.0);
        assert_eq!(column.x, 80.0);

        let narrow = container(390.0, 1280.0, 24.0);
        assert_eq!(narrow.width, 342.0);
        assert_eq!(narrow.x, 24.0);
    }

    #[test]
    fn test_layout_vertical_stacks_sections() {
        let layout = Layout::vertical();
        let bounds = Rect::new(0.0, 0.0, 1440.0, 0.0);
        let result = layout.arrange(bounds, &[(1440.0, 900.0), (1440.0, 144.0)]);

        assert_eq!(result[0].y, 0.0);
        assert_eq!(result[1].y, 900.0);
    }

    #[test]
    fn test_layout_horizontal() {
        let layout = Layout::horizontal().with_gap(10.0);
        let bounds = Rect::new(0.0, 0.0, 200.0, 50.0);
        let sizes = vec![(30.0, 20.0), (40.0, 20.0), (30.0, 20.0)];

        let result = layout.arrange(bounds, &sizes);

        assert_eq!(result.len(), 3);
        assert_eq!(result[0].x, 0.0);
        assert_eq!(result[1].x, 40.0);
        assert_eq!(result[2].x, 90.0);
    }

    #[test]
    fn test_grid_wraps_rows() {
        let grid = Grid::new(2, 16.0);
        let cells = grid.arrange(Rect::new(0.0, 100.0, 416.0, 0.0), 250.0, 4);

        assert_eq!(cells.len(), 4);
        assert_eq!(cells[1].x, 216.0);
        assert_eq!(cells[2].y, 366.0);
        assert_eq!(grid.height(4, 250.0), 516.0);
    }
}
