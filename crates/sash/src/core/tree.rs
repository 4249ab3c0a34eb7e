use std::{any::Any, mem, sync::Arc};

use slotmap::SlotMap;
use tracing::{debug, trace};

use crate::{
    core::{
        bus::{EventSink, Notification, UiEvent},
        context::Context,
        dispatch,
        error::{Error, Result},
        event::{
            key::Key,
            mouse::{Button, Buttons},
        },
        focus::FocusManager,
        id::{NodeId, WindowId},
        layout::{self, Alignment},
        node::Node,
        style::{Frame, PlainStyle, Style},
    },
    geom::{Point, Rect},
    widget::{self, Lifecycle, Widget},
    widgets::Panel,
};

/// How a child is attached to its parent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Attach {
    /// Placement tag.
    pub alignment: Alignment,
    /// Leave the parent's client rect untouched.
    pub overlap: bool,
    /// Style resource name.
    pub resource: String,
    /// Initial rect, also recorded as the default rect.
    pub rect: Option<Rect>,
}

impl Attach {
    /// Attach with an alignment.
    pub fn new(alignment: Alignment) -> Self {
        Self {
            alignment,
            ..Default::default()
        }
    }

    /// Do not consume the parent's client rect.
    pub fn overlap(mut self) -> Self {
        self.overlap = true;
        self
    }

    /// Request a style resource.
    pub fn resource(mut self, name: impl Into<String>) -> Self {
        self.resource = name.into();
        self
    }

    /// Start from a rect.
    pub fn rect(mut self, rect: Rect) -> Self {
        self.rect = Some(rect);
        self
    }

    /// Start from a size at the origin.
    pub fn size(self, w: f32, h: f32) -> Self {
        self.rect(Rect::new(0.0, 0.0, w, h))
    }
}

impl From<Alignment> for Attach {
    fn from(alignment: Alignment) -> Self {
        Self::new(alignment)
    }
}

/// Manager binding installed when the owning window is added.
struct Binding {
    /// Owning window.
    window: WindowId,
    /// Bus sender.
    sink: EventSink,
}

/// The node arena of one window.
///
/// Nodes refer to each other by [`NodeId`]. The root node is created with the
/// tree and is never removed; its visibility flag is the window's visibility.
pub struct Tree {
    /// Node storage.
    pub(crate) nodes: SlotMap<NodeId, Node>,
    /// Root node.
    pub(crate) root: NodeId,
    /// Focused node, if any.
    pub(crate) focus: Option<NodeId>,
    /// Style shared by all nodes.
    pub(crate) style: Arc<dyn Style>,
    /// Manager binding, once attached.
    binding: Option<Binding>,
    /// A redraw was requested.
    dirty: bool,
}

impl Default for Tree {
    fn default() -> Self {
        Self::new(Panel::new(), Arc::new(PlainStyle::new()))
    }
}

impl Tree {
    /// Create a tree whose root holds `root`.
    pub fn new<W: Widget>(root: W, style: Arc<dyn Style>) -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert_with_key(|id| Node::new(id, Box::new(root)));
        if let Some(node) = nodes.get_mut(root) {
            node.resource = style.add_resource(node, "window");
        }
        Self {
            nodes,
            root,
            focus: None,
            style,
            binding: None,
            dirty: true,
        }
    }

    /// The root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Node data.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id)
    }

    /// Does the id refer to a live node?
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(id)
    }

    /// Number of live nodes, attached or not.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Is the tree empty apart from the root?
    pub fn is_empty(&self) -> bool {
        self.nodes.len() <= 1
    }

    /// Children of a node in layout order.
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.nodes.get(id).map(Node::children).unwrap_or_default()
    }

    /// Parent of a node.
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes.get(id)?.parent
    }

    /// Current rect of a node.
    pub fn rect(&self, id: NodeId) -> Option<Rect> {
        self.nodes.get(id).map(Node::rect)
    }

    /// The owning window, once bound.
    pub fn window_id(&self) -> Option<WindowId> {
        self.binding.as_ref().map(|b| b.window)
    }

    /// Bind the tree to a manager's bus.
    pub(crate) fn bind(&mut self, window: WindowId, sink: EventSink) {
        self.binding = Some(Binding { window, sink });
    }

    /// Error unless `id` is live.
    fn check(&self, id: NodeId) -> Result<()> {
        if self.nodes.contains_key(id) {
            Ok(())
        } else {
            Err(Error::NodeNotFound(id))
        }
    }

    /// Is `ancestor` a strict ancestor of `id`?
    pub fn is_ancestor(&self, ancestor: NodeId, id: NodeId) -> bool {
        let mut cur = self.parent(id);
        while let Some(p) = cur {
            if p == ancestor {
                return true;
            }
            cur = self.parent(p);
        }
        false
    }

    /// Does the node's parent chain reach the root?
    pub fn is_attached(&self, id: NodeId) -> bool {
        id == self.root || self.is_ancestor(self.root, id)
    }

    /// Pre-order list of `id` and its descendants.
    pub fn preorder(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(n) = stack.pop() {
            let Some(node) = self.nodes.get(n) else {
                continue;
            };
            out.push(n);
            stack.extend(node.children.iter().rev().copied());
        }
        out
    }

    /// Publish a notification from a node.
    pub(crate) fn emit(&self, id: NodeId, event: UiEvent) {
        if let Some(b) = &self.binding {
            b.sink.send(Notification {
                window: b.window,
                node: id,
                event,
            });
        }
    }

    /// Run a callback with the node's widget taken out of its slot. Returns
    /// `None` if the node is gone or its widget is already in use further up
    /// the stack.
    pub(crate) fn with_hook<R>(
        &mut self,
        id: NodeId,
        f: impl FnOnce(&mut dyn Widget, &mut Context<'_>) -> R,
    ) -> Option<R> {
        let node = self.nodes.get_mut(id)?;
        let Some(mut w) = node.widget.take() else {
            trace!(?id, name = node.name, "widget busy, callback skipped");
            return None;
        };
        let out = f(w.as_mut(), &mut Context::new(self, id));
        self.restore(id, w);
        Some(out)
    }

    /// Put a widget back into its slot if the node still exists.
    fn restore(&mut self, id: NodeId, w: Box<dyn Widget>) {
        if let Some(node) = self.nodes.get_mut(id)
            && node.widget.is_none()
        {
            node.widget = Some(w);
        }
    }

    /// Deliver a lifecycle callback and publish it.
    pub(crate) fn lifecycle(&mut self, id: NodeId, event: Lifecycle) {
        self.with_hook(id, |w, ctx| widget::deliver(w, ctx, event));
        self.emit(id, event.into());
    }

    /// Typed mutable access to a node's widget.
    pub fn with_widget<W: Widget, R>(
        &mut self,
        id: NodeId,
        f: impl FnOnce(&mut W, &mut Context<'_>) -> R,
    ) -> Result<R> {
        let node = self.nodes.get_mut(id).ok_or(Error::NodeNotFound(id))?;
        let mut w = node
            .widget
            .take()
            .ok_or(Error::ReentrantWidgetBorrow(id))?;
        let out = match widget::downcast_mut::<W>(w.as_mut()) {
            Some(typed) => Ok(f(typed, &mut Context::new(self, id))),
            None => Err(Error::WidgetType(id)),
        };
        self.restore(id, w);
        out
    }

    /// Typed shared access to a node's widget.
    pub fn widget<W: Widget>(&self, id: NodeId) -> Result<&W> {
        let node = self.nodes.get(id).ok_or(Error::NodeNotFound(id))?;
        let w = node
            .widget
            .as_deref()
            .ok_or(Error::ReentrantWidgetBorrow(id))?;
        widget::downcast_ref::<W>(w).ok_or(Error::WidgetType(id))
    }

    /// Create a node that is not yet part of the tree.
    pub fn create_detached<W: Widget>(&mut self, widget: W) -> NodeId {
        self.create_detached_boxed(Box::new(widget))
    }

    /// Create a node from a boxed widget.
    pub fn create_detached_boxed(&mut self, widget: Box<dyn Widget>) -> NodeId {
        self.nodes.insert_with_key(|id| Node::new(id, widget))
    }

    /// Create a widget and attach it under `parent`.
    pub fn add_child<W: Widget>(
        &mut self,
        parent: NodeId,
        widget: W,
        attach: impl Into<Attach>,
    ) -> Result<NodeId> {
        self.check(parent)?;
        let id = self.create_detached(widget);
        self.attach(parent, id, attach)?;
        Ok(id)
    }

    /// Attach a detached node as the last child of `parent`.
    ///
    /// The style resolves the requested resource, the node's create callback
    /// fires, and the parent is laid out again if it is part of the tree.
    pub fn attach(&mut self, parent: NodeId, child: NodeId, attach: impl Into<Attach>) -> Result<()> {
        self.check(parent)?;
        self.check(child)?;
        if self.parent(child).is_some() || child == self.root {
            return Err(Error::AlreadyAttached(child));
        }
        if parent == child || self.is_ancestor(child, parent) {
            return Err(Error::WouldCreateCycle { parent, child });
        }
        let attach = attach.into();
        let style = self.style.clone();
        if let Some(node) = self.nodes.get_mut(child) {
            node.alignment = attach.alignment;
            node.overlap = attach.overlap;
            if let Some(r) = attach.rect {
                node.rect = r.clamped();
                node.default_rect = r.clamped();
            }
            node.resource = style.add_resource(node, &attach.resource);
            node.parent = Some(parent);
        }
        if let Some(node) = self.nodes.get_mut(parent) {
            node.children.push(child);
        }
        debug!(?parent, ?child, alignment = ?attach.alignment, "attached");
        self.lifecycle(child, Lifecycle::Create);
        if self.is_attached(parent) {
            self.resize_children(parent);
        }
        self.refresh(parent);
        Ok(())
    }

    /// Detach `child` from `parent`. The node stays in the arena and can be
    /// attached again. Does nothing if `child` is not a child of `parent`.
    pub fn remove(&mut self, parent: NodeId, child: NodeId) -> Result<()> {
        self.check(parent)?;
        self.check(child)?;
        if child == self.root {
            return Err(Error::InvalidOperation("cannot remove the root".into()));
        }
        if self.parent(child) != Some(parent) {
            trace!(?parent, ?child, "remove: not a child");
            return Ok(());
        }
        self.release_focus_within(child);
        if let Some(node) = self.nodes.get_mut(parent) {
            node.children.retain(|c| *c != child);
        }
        if let Some(node) = self.nodes.get_mut(child) {
            node.parent = None;
        }
        debug!(?parent, ?child, "removed");
        self.resize_children(parent);
        self.refresh(parent);
        Ok(())
    }

    /// Delete every descendant of `id` from the arena, deepest first. The
    /// node itself remains with an empty child list.
    pub fn remove_all(&mut self, id: NodeId) -> Result<()> {
        self.check(id)?;
        if let Some(f) = self.focus
            && self.is_ancestor(id, f)
        {
            self.release_focus_within(f);
        }
        self.delete_descendants(id);
        self.resize_children(id);
        self.refresh(id);
        Ok(())
    }

    /// Tear down a node: destroy callbacks fire children first, then the
    /// subtree is deleted. The root is kept, with an empty child list.
    pub fn destroy(&mut self, id: NodeId) -> Result<()> {
        self.check(id)?;
        self.notify_destroy(id);
        self.release_focus_within(id);
        self.delete_descendants(id);
        if id != self.root {
            if let Some(p) = self.parent(id) {
                if let Some(node) = self.nodes.get_mut(p) {
                    node.children.retain(|c| *c != id);
                }
                self.resize_children(p);
                self.refresh(p);
            }
            self.nodes.remove(id);
        }
        Ok(())
    }

    /// Post-order destroy callbacks.
    fn notify_destroy(&mut self, id: NodeId) {
        for child in self.children(id).to_vec() {
            self.notify_destroy(child);
        }
        self.lifecycle(id, Lifecycle::Destroy);
    }

    /// Remove all descendants of `id` from the arena, emptying each child
    /// list before its owner's.
    fn delete_descendants(&mut self, id: NodeId) {
        let children = match self.nodes.get_mut(id) {
            Some(node) => mem::take(&mut node.children),
            None => return,
        };
        for child in children {
            self.delete_descendants(child);
            self.nodes.remove(child);
        }
    }

    /// Drop tree focus if it lies in the subtree at `id`.
    fn release_focus_within(&mut self, id: NodeId) {
        if let Some(f) = self.focus
            && (f == id || self.is_ancestor(id, f))
        {
            self.set_focus(f, false);
            self.focus = None;
        }
    }

    /// Show or hide a node. Firing cascades to the descendants whose own
    /// flag is set, since their effective visibility changes with it.
    pub fn show(&mut self, id: NodeId, visible: bool) -> Result<()> {
        self.check(id)?;
        match self.nodes.get_mut(id) {
            Some(node) if node.visible != visible => node.visible = visible,
            _ => return Ok(()),
        }
        if visible {
            self.cascade(id, Lifecycle::Show);
            self.resize_children(id);
            self.refresh(id);
        } else {
            self.cascade(id, Lifecycle::Hide);
            let target = self.parent(id).unwrap_or(id);
            self.refresh(target);
        }
        Ok(())
    }

    /// Fire a show or hide callback on `id` and its locally visible
    /// descendants, parents first.
    pub(crate) fn cascade(&mut self, id: NodeId, event: Lifecycle) {
        self.lifecycle(id, event);
        for child in self.children(id).to_vec() {
            if self.nodes.get(child).is_some_and(|n| n.visible) {
                self.cascade(child, event);
            }
        }
    }

    /// Is the node visible on screen? True iff every node from `id` up to
    /// the root has its flag set and the chain reaches the root.
    pub fn is_visible(&self, id: NodeId) -> bool {
        let mut cur = id;
        loop {
            let Some(node) = self.nodes.get(cur) else {
                return false;
            };
            if !node.visible {
                return false;
            }
            match node.parent {
                Some(p) => cur = p,
                None => return cur == self.root,
            }
        }
    }

    /// Enable or disable a node and its subtree.
    pub fn enable(&mut self, id: NodeId, enabled: bool) -> Result<()> {
        self.check(id)?;
        self.set_enabled(id, enabled);
        Ok(())
    }

    /// Flip enablement, recursing into every child.
    fn set_enabled(&mut self, id: NodeId, enabled: bool) {
        match self.nodes.get_mut(id) {
            Some(node) if node.enabled != enabled => node.enabled = enabled,
            _ => return,
        }
        let children = self.children(id).to_vec();
        if enabled {
            self.lifecycle(id, Lifecycle::Enable);
            for c in children {
                self.set_enabled(c, true);
            }
        } else {
            for c in children {
                self.set_enabled(c, false);
            }
            self.lifecycle(id, Lifecycle::Disable);
        }
        self.refresh(id);
    }

    /// Is the node locally enabled?
    pub fn is_enabled(&self, id: NodeId) -> bool {
        self.nodes.get(id).is_some_and(|n| n.enabled)
    }

    /// Move a node, shifting its descendants by the same offset.
    pub fn set_pos(&mut self, id: NodeId, x: f32, y: f32) -> Result<()> {
        self.check(id)?;
        self.move_to(id, x, y);
        Ok(())
    }

    /// Move implementation.
    fn move_to(&mut self, id: NodeId, x: f32, y: f32) {
        let (dx, dy, children, parent) = match self.nodes.get_mut(id) {
            Some(node) if node.rect.x != x || node.rect.y != y => {
                let d = (x - node.rect.x, y - node.rect.y);
                node.rect.x = x;
                node.rect.y = y;
                (d.0, d.1, node.children.clone(), node.parent)
            }
            _ => return,
        };
        for c in children {
            if let Some(r) = self.rect(c) {
                self.move_to(c, r.x + dx, r.y + dy);
            }
        }
        if let Some(p) = parent {
            self.refresh(p);
        }
        self.refresh(id);
        self.lifecycle(id, Lifecycle::Move);
    }

    /// Resize a node explicitly. The size is recorded as its default size,
    /// the parent is laid out again, then the node itself.
    pub fn set_size(&mut self, id: NodeId, w: f32, h: f32) -> Result<()> {
        self.check(id)?;
        let (w, h) = (w.max(0.0), h.max(0.0));
        let Some(node) = self.nodes.get_mut(id) else {
            return Ok(());
        };
        node.default_rect.w = w;
        node.default_rect.h = h;
        let changed = node.rect.w != w || node.rect.h != h;
        node.rect.w = w;
        node.rect.h = h;
        if let Some(p) = node.parent {
            self.refresh(p);
        }
        self.resized(id, changed);
        Ok(())
    }

    /// Move then resize a node.
    pub fn set_rect(&mut self, id: NodeId, rect: Rect) -> Result<()> {
        self.check(id)?;
        self.place_child(id, rect.clamped());
        Ok(())
    }

    /// Commit a rect computed by layout.
    pub(crate) fn place_child(&mut self, id: NodeId, rect: Rect) {
        self.move_to(id, rect.x, rect.y);
        self.apply_size(id, rect.w, rect.h);
    }

    /// Internal resize. The first non-zero size given to a zero-sized node
    /// becomes its default rect.
    fn apply_size(&mut self, id: NodeId, w: f32, h: f32) {
        let Some(node) = self.nodes.get_mut(id) else {
            return;
        };
        if w != 0.0 && h != 0.0 && node.rect.w == 0.0 && node.rect.h == 0.0 {
            node.default_rect = Rect::new(node.rect.x, node.rect.y, w, h);
        }
        let changed = node.rect.w != w || node.rect.h != h;
        node.rect.w = w;
        node.rect.h = h;
        if let Some(p) = node.parent {
            self.refresh(p);
        }
        self.resized(id, changed);
    }

    /// Propagate a size change: parent layout, own layout, resize callback.
    /// Suppressed while the node's own layout pass is running.
    fn resized(&mut self, id: NodeId, changed: bool) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        if node.frozen {
            return;
        }
        if let Some(p) = node.parent {
            self.resize_children(p);
        }
        self.resize_children(id);
        self.with_hook(id, |w, ctx| w.on_resize(ctx));
        if changed {
            self.emit(id, UiEvent::Resize);
        }
    }

    /// Lay out the children of a node.
    pub fn resize_children(&mut self, id: NodeId) {
        layout::resize_children(self, id);
    }

    /// Set a node's padding and lay it out again.
    pub fn set_padding(&mut self, id: NodeId, padding: f32) -> Result<()> {
        self.check(id)?;
        if let Some(node) = self.nodes.get_mut(id) {
            node.set_padding(padding);
        }
        self.resize_children(id);
        self.refresh(id);
        Ok(())
    }

    /// Set the horizontal border width and lay the node out again.
    pub fn set_h_border(&mut self, id: NodeId, border: f32) -> Result<()> {
        self.check(id)?;
        if let Some(node) = self.nodes.get_mut(id) {
            node.h_border = border.max(0.0);
        }
        self.resize_children(id);
        self.refresh(id);
        Ok(())
    }

    /// Set the vertical border width and lay the node out again.
    pub fn set_v_border(&mut self, id: NodeId, border: f32) -> Result<()> {
        self.check(id)?;
        if let Some(node) = self.nodes.get_mut(id) {
            node.v_border = border.max(0.0);
        }
        self.resize_children(id);
        self.refresh(id);
        Ok(())
    }

    /// Replace a node's alignment and lay out its parent again.
    pub fn set_alignment(&mut self, id: NodeId, alignment: Alignment) -> Result<()> {
        self.check(id)?;
        let parent = match self.nodes.get_mut(id) {
            Some(node) => {
                node.alignment = alignment;
                node.parent
            }
            None => None,
        };
        if let Some(p) = parent {
            self.resize_children(p);
            self.refresh(p);
        }
        Ok(())
    }

    /// Should the style paint a background for the node?
    pub fn set_draw_background(&mut self, id: NodeId, draw: bool) -> Result<()> {
        self.check(id)?;
        if let Some(node) = self.nodes.get_mut(id) {
            node.draw_background = draw;
        }
        self.refresh(id);
        Ok(())
    }

    /// Set the application grouping index.
    pub fn set_group_index(&mut self, id: NodeId, index: u32) -> Result<()> {
        let node = self.nodes.get_mut(id).ok_or(Error::NodeNotFound(id))?;
        node.group_index = index;
        Ok(())
    }

    /// Store an application payload on the node.
    pub fn set_user_data<T: Any + Send>(&mut self, id: NodeId, data: T) -> Result<()> {
        let node = self.nodes.get_mut(id).ok_or(Error::NodeNotFound(id))?;
        node.user_data = Some(Box::new(data));
        Ok(())
    }

    /// Request a redraw. Ignored while the node's layout pass runs, and for
    /// nodes outside the tree.
    pub fn refresh(&mut self, id: NodeId) {
        match self.nodes.get(id) {
            Some(node) if !node.frozen => {}
            _ => return,
        }
        if self.is_attached(id) {
            self.dirty = true;
        }
    }

    /// Has a redraw been requested since the last draw?
    pub fn needs_redraw(&self) -> bool {
        self.dirty
    }

    /// Clear and return the redraw request.
    pub(crate) fn take_refresh(&mut self) -> bool {
        mem::take(&mut self.dirty)
    }

    /// Draw the visible nodes: background pass, children, foreground pass.
    pub fn draw(&self, frame: &mut Frame<'_>) {
        if self.is_visible(self.root) {
            self.draw_node(self.root, frame);
        }
    }

    /// Draw one node and its subtree.
    fn draw_node(&self, id: NodeId, frame: &mut Frame<'_>) {
        let Some(node) = self.nodes.get(id) else {
            return;
        };
        if !node.visible {
            return;
        }
        self.style.draw(node, &node.resource, frame, true);
        for c in &node.children {
            self.draw_node(*c, frame);
        }
        self.style.draw(node, &node.resource, frame, false);
    }

    /// Deliver a button press at a window-local position.
    pub fn mouse_down(&mut self, button: Button, pos: Point) -> bool {
        dispatch::mouse_down(self, self.root, button, pos)
    }

    /// Deliver a button release at a window-local position.
    pub fn mouse_up(&mut self, button: Button, pos: Point) -> bool {
        dispatch::mouse_up(self, self.root, button, pos)
    }

    /// Deliver pointer motion at a window-local position.
    pub fn mouse_move(&mut self, buttons: Buttons, pos: Point) -> bool {
        dispatch::mouse_move(self, self.root, buttons, pos)
    }

    /// Deliver a key-down to the focused node.
    pub fn key_down(&mut self, key: Key) -> bool {
        dispatch::key(self, key, true)
    }

    /// Deliver a key-up to the focused node.
    pub fn key_up(&mut self, key: Key) -> bool {
        dispatch::key(self, key, false)
    }
}
