use tracing::debug;

use crate::{
    core::{id::NodeId, tree::Tree},
    widget::Lifecycle,
};

/// Keyboard focus within one tree. At most one node is focused at a time.
pub trait FocusManager {
    /// The focused node, if any.
    fn focused(&self) -> Option<NodeId>;

    /// Does the node hold focus?
    fn is_focused(&self, node: NodeId) -> bool;

    /// Grant or release focus.
    ///
    /// A disabled node refuses and returns `None`. A grant on a node that
    /// disallows focus is delegated depth-first to its children; the first
    /// accepting descendant is returned. Granting takes focus away from the
    /// previous holder.
    fn set_focus(&mut self, node: NodeId, focus: bool) -> Option<NodeId>;

    /// Allow or forbid focus on a node. Every descendant is forbidden.
    fn allowing_focus(&mut self, node: NodeId, allow: bool);

    /// Move focus to the next visible, focusable node after `node` in
    /// pre-order, wrapping at the root. If `node` is not focused it is tried
    /// first.
    fn set_next_focus(&mut self, node: NodeId) -> Option<NodeId>;
}

/// Grant focus to `node` or, if it disallows focus, to its first accepting
/// descendant, skipping hidden and disabled subtrees.
fn focus_visible(tree: &mut Tree, node: NodeId) -> Option<NodeId> {
    let allow = match tree.nodes.get(node) {
        Some(n) if n.enabled => n.allow_focus,
        _ => return None,
    };
    if !tree.is_visible(node) {
        return None;
    }
    if allow {
        return tree.set_focus(node, true);
    }
    for child in tree.children(node).to_vec() {
        if let Some(found) = focus_visible(tree, child) {
            return Some(found);
        }
    }
    None
}

impl FocusManager for Tree {
    fn focused(&self) -> Option<NodeId> {
        self.focus
    }

    fn is_focused(&self, node: NodeId) -> bool {
        self.focus == Some(node)
    }

    fn set_focus(&mut self, node: NodeId, focus: bool) -> Option<NodeId> {
        let (enabled, allow, focused) = match self.nodes.get(node) {
            Some(n) => (n.enabled, n.allow_focus, n.focused),
            None => return None,
        };
        if !enabled {
            return None;
        }
        if focus && !allow {
            for child in self.children(node).to_vec() {
                if let Some(found) = self.set_focus(child, true) {
                    return Some(found);
                }
            }
            return None;
        }
        if focused == focus {
            return Some(node);
        }
        if focus {
            if let Some(prev) = self.focus
                && prev != node
            {
                self.set_focus(prev, false);
            }
            if let Some(n) = self.nodes.get_mut(node) {
                n.focused = true;
            }
            self.focus = Some(node);
            debug!(?node, "focus granted");
            self.lifecycle(node, Lifecycle::GotFocus);
            self.refresh(node);
        } else {
            if let Some(n) = self.nodes.get_mut(node) {
                n.focused = false;
            }
            if self.focus == Some(node) {
                self.focus = None;
            }
            debug!(?node, "focus released");
            self.lifecycle(node, Lifecycle::LostFocus);
            self.refresh(node);
        }
        Some(node)
    }

    fn allowing_focus(&mut self, node: NodeId, allow: bool) {
        let mut ids = self.preorder(node).into_iter();
        if let Some(first) = ids.next()
            && let Some(n) = self.nodes.get_mut(first)
        {
            n.allow_focus = allow;
        }
        for id in ids {
            if let Some(n) = self.nodes.get_mut(id) {
                n.allow_focus = false;
            }
        }
    }

    fn set_next_focus(&mut self, node: NodeId) -> Option<NodeId> {
        if !self.contains(node) {
            return None;
        }
        if self.is_focused(node) {
            self.set_focus(node, false);
        } else if let Some(found) = focus_visible(self, node) {
            return Some(found);
        }

        let order = self.preorder(self.root);
        let own = self.preorder(node).len();
        let start = match order.iter().position(|id| *id == node) {
            Some(pos) => pos + own,
            None => 0,
        };
        let len = order.len();
        for k in 0..len {
            let id = order[(start + k) % len];
            let candidate = self
                .nodes
                .get(id)
                .is_some_and(|n| n.allow_focus && n.enabled)
                && self.is_visible(id);
            if candidate && let Some(found) = self.set_focus(id, true) {
                return Some(found);
            }
        }
        None
    }
}
