//! Element tree and the component trait.
//!
//! Components own their motion state; the tree owns geometry, flags and
//! classes for every element so hit testing works without a DOM.

mod core;
mod tree;

pub use core::{
    FrameContext, Positioning, Tag, Widget, WidgetFlags, WidgetId, WidgetResponse, WidgetState,
};
pub use tree::WidgetTree;
