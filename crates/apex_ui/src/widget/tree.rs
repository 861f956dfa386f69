//! Widget tree for hierarchical UI management and hit testing.

use std::collections::HashMap;

use super::{Positioning, WidgetFlags, WidgetId, WidgetState};
use crate::layout::Rect;

/// Manages the element hierarchy.
pub struct WidgetTree {
    /// Widget states indexed by ID.
    widgets: HashMap<WidgetId, WidgetState>,
    /// Root widget IDs.
    roots: Vec<WidgetId>,
    /// Parent-child relationships.
    children: HashMap<WidgetId, Vec<WidgetId>>,
    /// ID counter for generating unique IDs.
    next_id: u64,
}

impl WidgetTree {
    /// Creates a new empty widget tree.
    #[must_use]
    pub fn new() -> Self {
        Self {
            widgets: HashMap::with_capacity(256),
            roots: Vec::with_capacity(16),
            children: HashMap::with_capacity(256),
            next_id: 1,
        }
    }

    /// Generates a new unique widget ID.
    pub fn next_id(&mut self) -> WidgetId {
        let id = WidgetId::new(self.next_id);
        self.next_id += 1;
        id
    }

    /// Registers a root widget.
    pub fn add_root(&mut self, state: WidgetState) -> WidgetId {
        let id = state.id;
        self.widgets.insert(id, state);
        self.roots.push(id);
        self.children.insert(id, Vec::new());
        id
    }

    /// Adds a child widget to a parent.
    pub fn add_child(&mut self, parent: WidgetId, state: WidgetState) -> WidgetId {
        let id = state.id;
        let mut state = state;
        state.parent = Some(parent);

        self.widgets.insert(id, state);
        self.children.entry(parent).or_default().push(id);
        self.children.insert(id, Vec::new());
        id
    }

    /// Removes a widget and all its children.
    pub fn remove(&mut self, id: WidgetId) {
        if let Some(children) = self.children.remove(&id) {
            for child in children {
                self.remove(child);
            }
        }

        if let Some(parent) = self.widgets.get(&id).and_then(|state| state.parent) {
            if let Some(siblings) = self.children.get_mut(&parent) {
                siblings.retain(|&c| c != id);
            }
        }

        self.roots.retain(|&r| r != id);
        self.widgets.remove(&id);
    }

    /// Number of widgets in the tree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    /// Returns true when the tree is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Gets a widget state by ID.
    #[must_use]
    pub fn get(&self, id: WidgetId) -> Option<&WidgetState> {
        self.widgets.get(&id)
    }

    /// Gets mutable access to a widget state.
    #[must_use]
    pub fn get_mut(&mut self, id: WidgetId) -> Option<&mut WidgetState> {
        self.widgets.get_mut(&id)
    }

    /// Sets a widget's rect. Unknown ids are ignored.
    pub fn set_rect(&mut self, id: WidgetId, rect: Rect) {
        if let Some(state) = self.widgets.get_mut(&id) {
            if state.rect != rect {
                state.rect = rect;
                state.mark_dirty();
            }
        }
    }

    /// Shows or hides a widget. Unknown ids are ignored.
    pub fn set_visible(&mut self, id: WidgetId, visible: bool) {
        if let Some(state) = self.widgets.get_mut(&id) {
            state.set_visible(visible);
        }
    }

    /// Returns the children of a widget.
    #[must_use]
    pub fn children(&self, id: WidgetId) -> &[WidgetId] {
        self.children.get(&id).map_or(&[], Vec::as_slice)
    }

    /// Returns all root widgets.
    #[must_use]
    pub fn roots(&self) -> &[WidgetId] {
        &self.roots
    }

    /// Returns all widget IDs in depth-first order.
    pub fn iter_dfs(&self) -> impl Iterator<Item = WidgetId> + '_ {
        WidgetDfsIterator {
            tree: self,
            stack: self.roots.iter().rev().copied().collect(),
        }
    }

    /// Iterates from `id` up to its root, starting with `id` itself.
    pub fn ancestors(&self, id: WidgetId) -> impl Iterator<Item = &WidgetState> + '_ {
        let mut next = self.widgets.get(&id);
        std::iter::from_fn(move || {
            let current = next?;
            next = current.parent.and_then(|parent| self.widgets.get(&parent));
            Some(current)
        })
    }

    /// Nearest ancestor-or-self carrying `class`.
    #[must_use]
    pub fn closest_with_class(&self, id: WidgetId, class: &str) -> Option<WidgetId> {
        self.ancestors(id)
            .find(|state| state.classes.contains(class))
            .map(|state| state.id)
    }

    /// Nearest ancestor-or-self that is a link, with its target.
    #[must_use]
    pub fn closest_link(&self, id: WidgetId) -> Option<(WidgetId, &str)> {
        self.ancestors(id)
            .find_map(|state| state.href.as_deref().map(|href| (state.id, href)))
    }

    /// Links, buttons, and anything inside a `cursor-pointer` element.
    #[must_use]
    pub fn is_interactive(&self, id: WidgetId) -> bool {
        self.get(id).is_some_and(|state| state.tag.is_interactive())
            || self.closest_with_class(id, "cursor-pointer").is_some()
    }

    /// Returns true if `ancestor` is `id` or one of its ancestors.
    #[must_use]
    pub fn is_within(&self, id: WidgetId, ancestor: WidgetId) -> bool {
        self.ancestors(id).any(|state| state.id == ancestor)
    }

    /// Visible only if the widget and all its ancestors are visible.
    #[must_use]
    pub fn is_effectively_visible(&self, id: WidgetId) -> bool {
        let mut any = false;
        for state in self.ancestors(id) {
            if !state.is_visible() {
                return false;
            }
            any = true;
        }
        any
    }

    /// The widget's rect in viewport space at `scroll_y`.
    #[must_use]
    pub fn screen_rect(&self, id: WidgetId, scroll_y: f32) -> Option<Rect> {
        let state = self.get(id)?;
        let fixed = self
            .ancestors(id)
            .any(|s| s.positioning == Positioning::Fixed);
        Some(if fixed {
            state.rect
        } else {
            state.rect.translate(0.0, -scroll_y)
        })
    }

    /// Topmost enabled, visible widget under the viewport point `(x, y)`.
    ///
    /// Fixed elements stack above flowing ones; then higher z-index; then
    /// later paint order (descendants paint after their ancestors).
    #[must_use]
    pub fn hit_test(&self, x: f32, y: f32, scroll_y: f32) -> Option<WidgetId> {
        let mut best: Option<((bool, i32, usize), WidgetId)> = None;
        for (order, id) in self.iter_dfs().enumerate() {
            let Some(state) = self.get(id) else {
                continue;
            };
            if !state.flags.has(WidgetFlags::ENABLED) || !self.is_effectively_visible(id) {
                continue;
            }
            let Some(rect) = self.screen_rect(id, scroll_y) else {
                continue;
            };
            if !rect.contains(x, y) {
                continue;
            }

            let fixed = self
                .ancestors(id)
                .any(|s| s.positioning == Positioning::Fixed);
            let z = self
                .ancestors(id)
                .map(|s| s.z_index)
                .find(|z| *z != 0)
                .unwrap_or(0);
            let key = (fixed, z, order);
            if best.as_ref().map_or(true, |(best_key, _)| key > *best_key) {
                best = Some((key, id));
            }
        }
        best.map(|(_, id)| id)
    }

    /// Sets the HOVERED flag on `hovered` and its ancestors only.
    pub fn set_hovered(&mut self, hovered: Option<WidgetId>) {
        let chain: Vec<WidgetId> = hovered
            .map(|id| self.ancestors(id).map(|state| state.id).collect())
            .unwrap_or_default();
        for (id, state) in &mut self.widgets {
            state
                .flags
                .assign(WidgetFlags::HOVERED, chain.contains(id));
        }
    }
}

impl Default for WidgetTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Depth-first iterator over widget tree.
struct WidgetDfsIterator<'a> {
    tree: &'a WidgetTree,
    stack: Vec<WidgetId>,
}

impl Iterator for WidgetDfsIterator<'_> {
    type Item = WidgetId;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;

        // Push children in reverse order so they're processed left-to-right
        if let Some(children) = self.tree.children.get(&id) {
            for &child in children.iter().rev() {
                self.stack.push(child);
            }
        }

        Some(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::Tag;

    fn page() -> (WidgetTree, WidgetId, WidgetId, WidgetId, WidgetId) {
        let mut tree = WidgetTree::new();

        let main_id = tree.next_id();
        let mut main = WidgetState::new(main_id, Tag::Section);
        main.rect = Rect::new(0.0, 0.0, 1000.0, 3000.0);
        tree.add_root(main);

        let card_id = tree.next_id();
        let mut card = WidgetState::new(card_id, Tag::Div).with_classes("group cursor-pointer");
        card.rect = Rect::new(100.0, 1000.0, 300.0, 375.0);
        tree.add_child(main_id, card);

        let title_id = tree.next_id();
        let mut title = WidgetState::new(title_id, Tag::Heading);
        title.rect = Rect::new(120.0, 1300.0, 200.0, 40.0);
        tree.add_child(card_id, title);

        let nav_id = tree.next_id();
        let mut nav = WidgetState::new(nav_id, Tag::Nav).fixed().with_z(50);
        nav.rect = Rect::new(0.0, 0.0, 1000.0, 72.0);
        tree.add_root(nav);

        (tree, main_id, card_id, title_id, nav_id)
    }

    #[test]
    fn test_tree_hierarchy() {
        let (tree, main_id, card_id, title_id, _) = page();

        assert_eq!(tree.children(main_id), &[card_id]);
        assert_eq!(tree.roots().len(), 2);
        let chain: Vec<WidgetId> = tree.ancestors(title_id).map(|s| s.id).collect();
        assert_eq!(chain, vec![title_id, card_id, main_id]);
    }

    #[test]
    fn test_hit_test_prefers_deepest_and_fixed() {
        let (tree, main_id, _, title_id, nav_id) = page();

        // Scrolled so the title sits at y = 1300 - 1000 = 300 on screen.
        assert_eq!(tree.hit_test(150.0, 310.0, 1000.0), Some(title_id));
        assert_eq!(tree.hit_test(900.0, 500.0, 1000.0), Some(main_id));
        // Fixed nav covers whatever scrolled under it.
        assert_eq!(tree.hit_test(150.0, 10.0, 1000.0), Some(nav_id));
    }

    #[test]
    fn test_interactive_via_closest_class() {
        let (tree, main_id, card_id, title_id, _) = page();

        assert!(tree.is_interactive(title_id));
        assert!(tree.is_interactive(card_id));
        assert!(!tree.is_interactive(main_id));
    }

    #[test]
    fn test_hidden_ancestor_hides_subtree() {
        let (mut tree, _, card_id, title_id, _) = page();
        tree.set_visible(card_id, false);

        assert!(!tree.is_effectively_visible(title_id));
        assert_ne!(tree.hit_test(150.0, 310.0, 1000.0), Some(title_id));
    }

    #[test]
    fn test_pointer_events_none_is_never_hit() {
        let (mut tree, main_id, _, _, _) = page();
        let ring_id = tree.next_id();
        let mut ring = WidgetState::new(ring_id, Tag::Div)
            .fixed()
            .with_z(9999)
            .pointer_events_none();
        ring.rect = Rect::new(880.0, 480.0, 32.0, 32.0);
        tree.add_root(ring);

        assert!(tree.is_effectively_visible(ring_id));
        assert_eq!(tree.hit_test(896.0, 496.0, 0.0), Some(main_id));
    }

    #[test]
    fn test_remove_subtree() {
        let (mut tree, main_id, card_id, _, _) = page();
        tree.remove(card_id);

        assert_eq!(tree.len(), 2);
        assert!(tree.children(main_id).is_empty());
    }

    #[test]
    fn test_hover_chain() {
        let (mut tree, main_id, card_id, title_id, nav_id) = page();
        tree.set_hovered(Some(title_id));

        assert!(tree.get(card_id).is_some_and(WidgetState::is_hovered));
        assert!(tree.get(main_id).is_some_and(WidgetState::is_hovered));
        assert!(!tree.get(nav_id).is_some_and(WidgetState::is_hovered));
    }
}
