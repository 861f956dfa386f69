//! # APEX UI Runtime
//!
//! Headless retained-mode runtime behind the APEX portfolio page:
//! - Springs, tweens and looping keyframes
//! - Scroll-linked transforms and viewport-entry observers
//! - An inertial smooth-scroll engine driven by the animation frame
//! - Hit testing against an element tree (no DOM required)
//!
//! ## Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │                       FRAME PIPELINE                        │
//! ├────────────────────────────────────────────────────────────┤
//! │  Host Events → Event Hub → Widget Tree → Motion → Commands  │
//! │       ↓             ↓            ↓           ↓        ↓     │
//! │  Frame Loop   Subscriptions  Hit Testing  Springs  Batches  │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! The host owns the clock. Every moving value in this crate advances
//! only when the host ticks a [`FrameLoop`] or passes a frame delta.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod animation;
pub mod class;
pub mod frame;
pub mod icon;
pub mod input;
pub mod layout;
pub mod render;
pub mod scroll;
pub mod style;
pub mod viewport;
pub mod widget;

pub use animation::{
    AnimatedColor, Animation, Easing, Keyframes, Motion, Spring, SpringConfig, Transition,
};
pub use class::ClassList;
pub use frame::{FrameHandle, FrameLoop};
pub use icon::Glyph;
pub use input::{EventHub, EventKind, InputState, Subscription, UiEvent};
pub use layout::{Breakpoint, Grid, Layout, Rect, Viewport};
pub use render::{RenderCommand, UIBatch, UIRenderer, UIVertex};
pub use scroll::{SmoothScroll, SmoothScrollOptions, SmoothScroller};
pub use style::{Color, FontFace, Theme};
pub use viewport::{InViewChange, InViewObserver};
pub use widget::{
    FrameContext, Positioning, Tag, Widget, WidgetFlags, WidgetId, WidgetResponse, WidgetState,
    WidgetTree,
};
