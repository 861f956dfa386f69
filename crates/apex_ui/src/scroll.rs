//! Scroll-linked transforms and the inertial smooth-scroll engine.
//!
//! Wheel input never moves the page directly. It moves a *target*; the
//! visible offset eases toward that target on every animation frame:
//!
//! ```text
//! wheel(Δ) ──► target = clamp(target + Δ·multiplier, 0, limit)
//!                 │
//! raf(t) ─────────┴──► scroll = from + (target - from) · ease(elapsed / duration)
//! ```

use std::sync::Arc;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::animation::Easing;
use crate::frame::{FrameHandle, FrameLoop};
use crate::layout::Rect;

/// Maps `input` from `input_range` onto `output_range`, clamped at both ends.
///
/// A degenerate input range maps everything to `output_range[0]`.
#[must_use]
pub fn transform(input: f32, input_range: [f32; 2], output_range: [f32; 2]) -> f32 {
    let [in0, in1] = input_range;
    let [out0, out1] = output_range;
    let span = in1 - in0;
    if span.abs() <= f32::EPSILON {
        return out0;
    }
    let t = ((input - in0) / span).clamp(0.0, 1.0);
    out0 + (out1 - out0) * t
}

/// Page scroll progress: 0 at the top, 1 at the bottom.
///
/// A document no taller than the viewport reports 0.
#[must_use]
pub fn page_progress(scroll_y: f32, document_height: f32, viewport_height: f32) -> f32 {
    let max_scroll = document_height - viewport_height;
    if max_scroll <= 0.0 {
        return 0.0;
    }
    (scroll_y / max_scroll).clamp(0.0, 1.0)
}

/// Progress of `element` through the viewport, offsets `["start end", "end start"]`.
///
/// 0 when the element's top meets the viewport's bottom edge, 1 when its
/// bottom meets the viewport's top edge.
#[must_use]
pub fn element_progress(element: Rect, scroll_y: f32, viewport_height: f32) -> f32 {
    let start = element.y - viewport_height;
    let end = element.bottom();
    transform(scroll_y, [start, end], [0.0, 1.0])
}

fn default_easing() -> Easing {
    Easing::ExpoClamped
}

/// Smooth-scroll tuning.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothScrollOptions {
    /// Seconds to settle on a new target.
    pub duration: f32,
    /// Curve used while settling.
    #[serde(skip, default = "default_easing")]
    pub easing: Easing,
    /// Animate wheel input (false jumps straight to the target).
    pub smooth_wheel: bool,
    /// Scale applied to wheel deltas.
    pub wheel_multiplier: f32,
    /// Wrap around instead of clamping at the ends.
    pub infinite: bool,
}

impl Default for SmoothScrollOptions {
    fn default() -> Self {
        Self {
            duration: 1.2,
            easing: default_easing(),
            smooth_wheel: true,
            wheel_multiplier: 1.0,
            infinite: false,
        }
    }
}

/// The inertial scroll simulation.
#[derive(Debug, Clone)]
pub struct SmoothScroll {
    options: SmoothScrollOptions,
    limit: f32,
    animated: f32,
    from: f32,
    target: f32,
    elapsed: f32,
    running: bool,
    last_time: Option<f64>,
    velocity: f32,
}

impl SmoothScroll {
    /// Creates an engine at the top of a page that can scroll `limit` pixels.
    #[must_use]
    pub fn new(options: SmoothScrollOptions, limit: f32) -> Self {
        Self {
            options,
            limit: limit.max(0.0),
            animated: 0.0,
            from: 0.0,
            target: 0.0,
            elapsed: 0.0,
            running: false,
            last_time: None,
            velocity: 0.0,
        }
    }

    /// The options in use.
    #[must_use]
    pub fn options(&self) -> &SmoothScrollOptions {
        &self.options
    }

    /// Current (visible) scroll offset.
    #[must_use]
    pub fn scroll_y(&self) -> f32 {
        if self.options.infinite && self.limit > 0.0 {
            self.animated.rem_euclid(self.limit)
        } else {
            self.animated
        }
    }

    /// Offset being eased toward.
    #[must_use]
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Maximum scroll offset.
    #[must_use]
    pub fn limit(&self) -> f32 {
        self.limit
    }

    /// Pixels moved during the last frame.
    #[must_use]
    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    /// Returns true while easing toward the target.
    #[must_use]
    pub fn is_scrolling(&self) -> bool {
        self.running
    }

    /// Updates the scrollable range (after a resize or relayout).
    pub fn set_limit(&mut self, limit: f32) {
        self.limit = limit.max(0.0);
        if !self.options.infinite {
            self.target = self.clamp(self.target);
            self.animated = self.clamp(self.animated);
            self.from = self.clamp(self.from);
        }
    }

    /// Feeds a wheel delta (positive scrolls down).
    pub fn on_wheel(&mut self, delta: f32) {
        let next = self.target + delta * self.options.wheel_multiplier;
        self.scroll_to(next, !self.options.smooth_wheel);
    }

    /// Scrolls to `y`, either eased or immediately.
    pub fn scroll_to(&mut self, y: f32, immediate: bool) {
        let y = self.clamp(y);
        if immediate {
            self.velocity = y - self.animated;
            self.animated = y;
            self.from = y;
            self.target = y;
            self.running = false;
            return;
        }
        if (y - self.target).abs() <= f32::EPSILON && self.running {
            return;
        }
        self.from = self.animated;
        self.target = y;
        self.elapsed = 0.0;
        self.running = (self.target - self.animated).abs() > f32::EPSILON;
    }

    /// Per-frame hook; `time_ms` is the animation-frame timestamp.
    pub fn raf(&mut self, time_ms: f64) {
        #[allow(clippy::cast_possible_truncation)]
        let dt = self
            .last_time
            .map_or(0.0, |last| ((time_ms - last) / 1000.0).max(0.0) as f32);
        self.last_time = Some(time_ms);
        self.advance(dt);
    }

    /// Advances the simulation by `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        if !self.running {
            self.velocity = 0.0;
            return;
        }

        self.elapsed += dt;
        let linear = if self.options.duration > 0.0 {
            (self.elapsed / self.options.duration).clamp(0.0, 1.0)
        } else {
            1.0
        };
        let eased = self.options.easing.apply(linear);
        let mut next = self.from + (self.target - self.from) * eased;
        if linear >= 1.0 {
            next = self.target;
            self.running = false;
        }

        self.velocity = next - self.animated;
        self.animated = next;
    }

    /// Attaches the engine to a frame loop.
    #[must_use]
    pub fn attach(self, frames: &FrameLoop) -> SmoothScroller {
        SmoothScroller::attach(self, frames)
    }

    fn clamp(&self, y: f32) -> f32 {
        if self.options.infinite {
            y
        } else {
            y.clamp(0.0, self.limit)
        }
    }
}

/// A [`SmoothScroll`] driven by a [`FrameLoop`].
///
/// Dropping the scroller (or calling [`SmoothScroller::destroy`]) cancels
/// its frame callback.
#[derive(Debug)]
pub struct SmoothScroller {
    engine: Arc<Mutex<SmoothScroll>>,
    frame: FrameHandle,
}

impl SmoothScroller {
    /// Registers the engine's per-frame hook on `frames`.
    #[must_use]
    pub fn attach(engine: SmoothScroll, frames: &FrameLoop) -> Self {
        let engine = Arc::new(Mutex::new(engine));
        let driven = Arc::clone(&engine);
        let frame = frames.request(move |time_ms| driven.lock().raf(time_ms));
        tracing::debug!("smooth scroll attached");
        Self { engine, frame }
    }

    /// Runs `f` with exclusive access to the engine.
    pub fn with<R>(&self, f: impl FnOnce(&mut SmoothScroll) -> R) -> R {
        f(&mut self.engine.lock())
    }

    /// Current scroll offset.
    #[must_use]
    pub fn scroll_y(&self) -> f32 {
        self.engine.lock().scroll_y()
    }

    /// Returns true while the frame callback is registered.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        self.frame.is_active()
    }

    /// Feeds a wheel delta.
    pub fn on_wheel(&self, delta: f32) {
        self.engine.lock().on_wheel(delta);
    }

    /// Scrolls to `y`.
    pub fn scroll_to(&self, y: f32, immediate: bool) {
        self.engine.lock().scroll_to(y, immediate);
    }

    /// Updates the scrollable range.
    pub fn set_limit(&self, limit: f32) {
        self.engine.lock().set_limit(limit);
    }

    /// Cancels the frame callback and releases the engine.
    pub fn destroy(mut self) {
        self.frame.cancel();
        tracing::debug!("smooth scroll destroyed");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_clamps() {
        assert_eq!(transform(0.0, [0.0, 500.0], [0.0, 200.0]), 0.0);
        assert_eq!(transform(250.0, [0.0, 500.0], [0.0, 200.0]), 100.0);
        assert_eq!(transform(9000.0, [0.0, 500.0], [0.0, -150.0]), -150.0);
        assert_eq!(transform(-10.0, [0.0, 500.0], [0.0, 200.0]), 0.0);
        assert_eq!(transform(3.0, [1.0, 1.0], [7.0, 9.0]), 7.0);
    }

    #[test]
    fn test_page_progress_is_monotonic() {
        let mut previous = -1.0;
        for step in 0..=100 {
            let y = step as f32 * 50.0;
            let p = page_progress(y, 5900.0, 900.0);
            assert!(p >= previous);
            previous = p;
        }
        assert_eq!(page_progress(0.0, 5900.0, 900.0), 0.0);
        assert_eq!(page_progress(5000.0, 5900.0, 900.0), 1.0);
        assert_eq!(page_progress(100.0, 500.0, 900.0), 0.0);
    }

    #[test]
    fn test_element_progress_offsets() {
        let card = Rect::new(0.0, 2000.0, 300.0, 400.0);
        assert_eq!(element_progress(card, 1100.0, 900.0), 0.0);
        assert_eq!(element_progress(card, 2400.0, 900.0), 1.0);
        assert!((element_progress(card, 1750.0, 900.0) - 0.5).abs() < 1e-4);
    }

    #[test]
    fn test_wheel_eases_to_target() {
        let mut scroll = SmoothScroll::new(SmoothScrollOptions::default(), 5000.0);
        scroll.on_wheel(300.0);
        assert_eq!(scroll.target(), 300.0);
        assert_eq!(scroll.scroll_y(), 0.0);

        scroll.raf(0.0);
        scroll.raf(100.0);
        let partial = scroll.scroll_y();
        assert!(partial > 0.0 && partial < 300.0);

        scroll.raf(1400.0);
        assert_eq!(scroll.scroll_y(), 300.0);
        assert!(!scroll.is_scrolling());
    }

    #[test]
    fn test_wheel_clamps_to_limit() {
        let mut scroll = SmoothScroll::new(SmoothScrollOptions::default(), 1000.0);
        scroll.on_wheel(-50.0);
        assert_eq!(scroll.target(), 0.0);
        scroll.on_wheel(800.0);
        scroll.on_wheel(800.0);
        assert_eq!(scroll.target(), 1000.0);
    }

    #[test]
    fn test_instant_wheel_without_smoothing() {
        let options = SmoothScrollOptions {
            smooth_wheel: false,
            ..SmoothScrollOptions::default()
        };
        let mut scroll = SmoothScroll::new(options, 1000.0);
        scroll.on_wheel(120.0);
        assert_eq!(scroll.scroll_y(), 120.0);
    }

    #[test]
    fn test_scroller_detaches_on_destroy() {
        let frames = FrameLoop::new();
        let scroller = SmoothScroll::new(SmoothScrollOptions::default(), 2000.0).attach(&frames);
        assert_eq!(frames.pending(), 1);

        scroller.on_wheel(500.0);
        frames.tick(0.0);
        frames.tick(2000.0);
        assert_eq!(scroller.scroll_y(), 500.0);
        assert!(scroller.is_attached());

        scroller.destroy();
        assert_eq!(frames.pending(), 0);
    }
}
