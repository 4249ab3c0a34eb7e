use std::sync::Arc;

use bitflags::bitflags;
use tracing::debug;

use crate::{
    core::{
        bus::{EventSink, UiEvent},
        event::{
            key::{Key, KeyCode},
            mouse::{Button, Buttons},
        },
        focus::FocusManager,
        id::{NodeId, WindowId},
        style::{Frame, PlainStyle, Renderer, Style},
        tree::Tree,
    },
    geom::{Axis, Point, Rect},
    widget::{Lifecycle, Widget},
    widgets::Panel,
};

bitflags! {
    /// Window edges that can be dragged to resize.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Borders: u8 {
        /// The x-minimum edge.
        const LEFT   = 0b0001;
        /// The x-maximum edge.
        const RIGHT  = 0b0010;
        /// The y-maximum edge.
        const TOP    = 0b0100;
        /// The y-minimum edge.
        const BOTTOM = 0b1000;
    }
}

/// A resizeable edge under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    /// Axis along which the edge moves.
    pub axis: Axis,
    /// The edge is at the origin side, so dragging it moves the origin.
    pub origin: bool,
}

/// A top-level window: a rect in manager coordinates and the widget tree
/// drawn inside it. Tree coordinates are window-local with the root at the
/// origin.
pub struct Window {
    /// Id assigned by the manager.
    id: Option<WindowId>,
    /// Rect in manager coordinates.
    rect: Rect,
    /// Draggable edges.
    resizeable: Borders,
    /// Visibility change queued for the next frame.
    pub(crate) pending: Option<bool>,
    /// Owned by a manager.
    attached: bool,
    /// The widget tree.
    tree: Tree,
}

impl Window {
    /// A hidden window with a plain panel root.
    pub fn new(rect: Rect) -> Self {
        Self::with_root(rect, Panel::new(), Arc::new(PlainStyle::new()))
    }

    /// A hidden window with a custom root widget and style.
    pub fn with_root<W: Widget>(rect: Rect, root: W, style: Arc<dyn Style>) -> Self {
        let mut tree = Tree::new(root, style);
        let root = tree.root();
        if let Some(node) = tree.nodes.get_mut(root) {
            node.visible = false;
        }
        let mut w = Self {
            id: None,
            rect: Rect::zero(),
            resizeable: Borders::empty(),
            pending: None,
            attached: false,
            tree,
        };
        w.set_rect(rect);
        w
    }

    /// Make edges draggable.
    pub fn with_borders(mut self, borders: Borders) -> Self {
        self.resizeable = borders;
        self
    }

    /// The manager-assigned id.
    pub fn id(&self) -> Option<WindowId> {
        self.id
    }

    /// Rect in manager coordinates.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// Draggable edges.
    pub fn borders(&self) -> Borders {
        self.resizeable
    }

    /// Change the draggable edges.
    pub fn set_borders(&mut self, borders: Borders) {
        self.resizeable = borders;
    }

    /// The root node.
    pub fn root(&self) -> NodeId {
        self.tree.root()
    }

    /// The widget tree.
    pub fn tree(&self) -> &Tree {
        &self.tree
    }

    /// The widget tree, mutably.
    pub fn tree_mut(&mut self) -> &mut Tree {
        &mut self.tree
    }

    /// Is the window shown?
    pub fn is_visible(&self) -> bool {
        self.tree.is_visible(self.tree.root())
    }

    /// Is the window owned by a manager?
    pub fn is_attached(&self) -> bool {
        self.attached
    }

    /// Show or hide. Once the window is owned by a manager the change is
    /// queued and applied at the next frame, where focus is handed over.
    pub fn show(&mut self, visible: bool) {
        if self.attached {
            self.pending = Some(visible);
        } else {
            self.set_visible(visible);
        }
    }

    /// Apply a visibility change now.
    pub(crate) fn set_visible(&mut self, visible: bool) {
        let root = self.tree.root();
        if self.tree.show(root, visible).is_err() {
            debug!("window root missing");
        }
    }

    /// Move and resize. Negative sizes clamp to zero. The root is resized to
    /// match, which lays the tree out again.
    pub fn set_rect(&mut self, rect: Rect) {
        self.rect = rect.clamped();
        let root = self.tree.root();
        if self
            .tree
            .set_size(root, self.rect.w, self.rect.h)
            .is_err()
        {
            debug!("window root missing");
        }
        self.tree.refresh(root);
    }

    /// Does the visible window contain a manager-space point?
    pub fn contains(&self, p: Point) -> bool {
        self.is_visible() && self.rect.contains_point(p)
    }

    /// Does the root widget paint a background? Only such windows expose
    /// draggable edges.
    pub fn draws_background(&self) -> bool {
        self.tree
            .node(self.tree.root())
            .is_some_and(|n| n.draws_background())
    }

    /// The draggable edge at a window-local position, if any. `dx` is the
    /// grab distance for the left and right edges, `dy` for the top and
    /// bottom. Edges are tested right, left, top, bottom.
    pub fn edge_at(&self, local: Point, dx: f32, dy: f32) -> Option<Edge> {
        let r = self.rect;
        let b = self.resizeable;
        if b.contains(Borders::RIGHT) && local.x >= r.w - dx {
            Some(Edge {
                axis: Axis::Horizontal,
                origin: false,
            })
        } else if b.contains(Borders::LEFT) && local.x < dx {
            Some(Edge {
                axis: Axis::Horizontal,
                origin: true,
            })
        } else if b.contains(Borders::TOP) && local.y >= r.h - dy {
            Some(Edge {
                axis: Axis::Vertical,
                origin: false,
            })
        } else if b.contains(Borders::BOTTOM) && local.y < dy {
            Some(Edge {
                axis: Axis::Vertical,
                origin: true,
            })
        } else {
            None
        }
    }

    /// Convert a manager-space point to window-local coordinates, rounding
    /// up.
    pub fn to_local(&self, p: Point) -> Point {
        (p - self.rect.origin()).ceil()
    }

    /// Bind to a manager.
    pub(crate) fn attach(&mut self, id: WindowId, sink: EventSink) {
        self.id = Some(id);
        self.attached = true;
        self.tree.bind(id, sink);
        let root = self.tree.root();
        self.tree.lifecycle(root, Lifecycle::Create);
        if self.is_visible() {
            self.tree.cascade(root, Lifecycle::Show);
        }
    }

    /// Tear down a window leaving its manager: hide if visible, destroy.
    pub(crate) fn detach(&mut self) {
        self.attached = false;
        self.pending = None;
        let root = self.tree.root();
        if self.is_visible() {
            self.tree.cascade(root, Lifecycle::Hide);
        }
        if self.tree.destroy(root).is_err() {
            debug!("window root missing");
        }
    }

    /// The manager focused this window.
    pub(crate) fn got_focus(&self) {
        self.tree.emit(self.tree.root(), UiEvent::WindowGotFocus);
    }

    /// The manager moved focus away from this window.
    pub(crate) fn lost_focus(&self) {
        self.tree.emit(self.tree.root(), UiEvent::WindowLostFocus);
    }

    /// Clear and return the tree's redraw request.
    pub(crate) fn take_refresh(&mut self) -> bool {
        self.tree.take_refresh()
    }

    /// Draw the tree, offset by the window origin.
    pub fn draw(&self, renderer: &mut dyn Renderer) {
        if !self.is_visible() {
            return;
        }
        let mut frame = Frame::new(renderer, self.rect.origin());
        self.tree.draw(&mut frame);
    }

    /// Deliver a key-down. An unconsumed Tab moves focus to the next
    /// focusable node.
    pub fn key_down(&mut self, key: Key) -> bool {
        if self.tree.key_down(key) {
            return true;
        }
        if key.is(KeyCode::Tab) {
            let from = self.tree.focused().unwrap_or(self.tree.root());
            return self.tree.set_next_focus(from).is_some();
        }
        false
    }

    /// Deliver a key-up.
    pub fn key_up(&mut self, key: Key) -> bool {
        self.tree.key_up(key)
    }

    /// Deliver a button press at a window-local position.
    pub fn mouse_down(&mut self, button: Button, local: Point) -> bool {
        self.is_visible() && self.tree.mouse_down(button, local)
    }

    /// Deliver a button release at a window-local position.
    pub fn mouse_up(&mut self, button: Button, local: Point) -> bool {
        self.is_visible() && self.tree.mouse_up(button, local)
    }

    /// Deliver motion at a window-local position.
    pub fn mouse_move(&mut self, buttons: Buttons, local: Point) -> bool {
        self.is_visible() && self.tree.mouse_move(buttons, local)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        Alignment,
        testing::{Probe, Recorder},
    };

    #[test]
    fn detached_show_is_immediate() {
        let mut w = Window::new(Rect::new(0.0, 0.0, 100.0, 50.0));
        assert!(!w.is_visible());
        w.show(true);
        assert!(w.is_visible());
        assert!(w.pending.is_none());
    }

    #[test]
    fn rect_drives_root() {
        let mut w = Window::new(Rect::new(10.0, 10.0, 100.0, 50.0));
        let root = w.root();
        let child = w
            .tree_mut()
            .add_child(root, Panel::new(), Alignment::Fill)
            .unwrap();
        assert_eq!(w.tree().rect(child), Some(Rect::new(0.0, 0.0, 100.0, 50.0)));
        w.set_rect(Rect::new(10.0, 10.0, -5.0, 30.0));
        assert_eq!(w.rect(), Rect::new(10.0, 10.0, 0.0, 30.0));
        assert_eq!(w.tree().rect(root), Some(Rect::new(0.0, 0.0, 0.0, 30.0)));
    }

    #[test]
    fn edges() {
        let w = Window::new(Rect::new(0.0, 0.0, 100.0, 50.0)).with_borders(Borders::all());
        let h = |origin| Some(Edge { axis: Axis::Horizontal, origin });
        let v = |origin| Some(Edge { axis: Axis::Vertical, origin });
        assert_eq!(w.edge_at(Point::new(98.0, 20.0), 5.0, 5.0), h(false));
        assert_eq!(w.edge_at(Point::new(2.0, 20.0), 5.0, 5.0), h(true));
        assert_eq!(w.edge_at(Point::new(50.0, 47.0), 5.0, 5.0), v(false));
        assert_eq!(w.edge_at(Point::new(50.0, 1.0), 5.0, 5.0), v(true));
        assert_eq!(w.edge_at(Point::new(50.0, 20.0), 5.0, 5.0), None);
        assert_eq!(w.edge_at(Point::new(50.0, 8.0), 5.0, 10.0), v(true));
        assert_eq!(w.edge_at(Point::new(93.0, 20.0), 5.0, 10.0), None);
        let w = w.with_borders(Borders::LEFT);
        assert_eq!(w.edge_at(Point::new(98.0, 20.0), 5.0, 5.0), None);
    }

    #[test]
    fn tab_traverses() {
        let rec = Recorder::new();
        let mut w = Window::with_root(
            Rect::new(0.0, 0.0, 100.0, 50.0),
            Probe::new("root", &rec),
            Arc::new(PlainStyle::new()),
        );
        w.show(true);
        let root = w.root();
        let a = w
            .tree_mut()
            .add_child(root, Probe::new("a", &rec).focusable(), Alignment::Left)
            .unwrap();
        let b = w
            .tree_mut()
            .add_child(root, Probe::new("b", &rec).focusable(), Alignment::Left)
            .unwrap();
        assert!(w.key_down(KeyCode::Tab.into()));
        assert_eq!(w.tree().focused(), Some(a));
        assert!(w.key_down(KeyCode::Tab.into()));
        assert_eq!(w.tree().focused(), Some(b));
    }
}
