use crate::{
    core::{
        bus::UiEvent,
        focus::FocusManager,
        id::{NodeId, WindowId},
        node::Node,
        tree::Tree,
    },
    geom::Rect,
};

/// The view of the tree handed to widget callbacks.
///
/// The calling widget is out of its slot for the duration of the callback, so
/// the tree can be mutated freely; callbacks that would re-enter the same
/// widget are skipped.
pub struct Context<'a> {
    /// The tree.
    tree: &'a mut Tree,
    /// The node whose widget is being called.
    id: NodeId,
}

impl<'a> Context<'a> {
    /// Context for a callback on `id`.
    pub(crate) fn new(tree: &'a mut Tree, id: NodeId) -> Self {
        Self { tree, id }
    }

    /// The node being called.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// The owning window, once the tree is attached to a manager.
    pub fn window(&self) -> Option<WindowId> {
        self.tree.window_id()
    }

    /// The node's data.
    pub fn node(&self) -> Option<&Node> {
        self.tree.node(self.id)
    }

    /// The node's current rect, or a zero rect if it has been removed.
    pub fn rect(&self) -> Rect {
        self.node().map(Node::rect).unwrap_or_default()
    }

    /// Is the node pushed?
    pub fn is_pushed(&self) -> bool {
        self.node().is_some_and(Node::is_pushed)
    }

    /// Does the node hold focus?
    pub fn is_focused(&self) -> bool {
        self.node().is_some_and(Node::is_focused)
    }

    /// Is the node effectively visible?
    pub fn is_visible(&self) -> bool {
        self.tree.is_visible(self.id)
    }

    /// Set or clear the node's pushed flag, re-running layout if it changed.
    pub fn set_pushed(&mut self, pushed: bool) {
        let changed = match self.tree.nodes.get_mut(self.id) {
            Some(node) if node.pushed != pushed => {
                node.pushed = pushed;
                true
            }
            _ => false,
        };
        if changed {
            self.tree.resize_children(self.id);
            self.tree.refresh(self.id);
        }
    }

    /// Publish a notification from this node.
    pub fn emit(&self, event: UiEvent) {
        self.tree.emit(self.id, event);
    }

    /// Request a redraw of this node.
    pub fn refresh(&mut self) {
        self.tree.refresh(self.id);
    }

    /// Re-run layout for this node's children.
    pub fn resize_children(&mut self) {
        self.tree.resize_children(self.id);
    }

    /// Request focus for this node.
    pub fn take_focus(&mut self) -> Option<NodeId> {
        self.tree.set_focus(self.id, true)
    }

    /// Full access to the tree.
    pub fn tree(&mut self) -> &mut Tree {
        self.tree
    }
}
