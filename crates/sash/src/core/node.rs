use std::any::Any;

use crate::{
    core::{id::NodeId, layout::Alignment, style::Resource},
    geom::Rect,
    widget::{Behavior, Widget},
};

/// Node data stored in a tree's arena.
pub struct Node {
    /// Own id.
    pub(crate) id: NodeId,
    /// Widget behavior and state. Taken out of the slot while one of its
    /// callbacks runs.
    pub(crate) widget: Option<Box<dyn Widget>>,
    /// Widget type name, kept for diagnostics while the slot is empty.
    pub(crate) name: &'static str,

    /// Parent in the tree.
    pub(crate) parent: Option<NodeId>,
    /// Children in layout and dispatch order.
    pub(crate) children: Vec<NodeId>,

    /// Current rect in window coordinates.
    pub(crate) rect: Rect,
    /// Last explicitly requested rect; layout starts from it.
    pub(crate) default_rect: Rect,
    /// Placement within the parent's client rect.
    pub(crate) alignment: Alignment,
    /// When set, placement does not consume the parent's client rect.
    pub(crate) overlap: bool,
    /// Inset applied on every side before children are placed.
    pub(crate) padding: f32,
    /// Horizontal border width.
    pub(crate) h_border: f32,
    /// Vertical border width.
    pub(crate) v_border: f32,
    /// Style resource assigned at attach time.
    pub(crate) resource: Resource,

    /// Local visibility flag.
    pub(crate) visible: bool,
    /// Local enablement flag.
    pub(crate) enabled: bool,
    /// Holds the tree's keyboard focus.
    pub(crate) focused: bool,
    /// A button press landed on the node and has not been released.
    pub(crate) pushed: bool,
    /// The pointer is over the node.
    pub(crate) pointed: bool,
    /// May take keyboard focus.
    pub(crate) allow_focus: bool,
    /// A layout pass over this node is in progress.
    pub(crate) frozen: bool,
    /// Offset children while pushed.
    pub(crate) move_children_on_push: bool,
    /// Re-run layout and refresh on button events.
    pub(crate) redraw_on_mouse_event: bool,
    /// Refresh when the pointer enters or leaves.
    pub(crate) redraw_on_mouse_move: bool,
    /// The style should paint a background for this node.
    pub(crate) draw_background: bool,

    /// Opaque application grouping.
    pub(crate) group_index: u32,
    /// Opaque application payload.
    pub(crate) user_data: Option<Box<dyn Any + Send>>,
}

impl Node {
    /// Build a detached node around a widget.
    pub(crate) fn new(id: NodeId, widget: Box<dyn Widget>) -> Self {
        let Behavior {
            allow_focus,
            move_children_on_push,
            redraw_on_mouse_event,
            redraw_on_mouse_move,
            draw_background,
        } = widget.behavior();
        Self {
            id,
            name: widget.name(),
            widget: Some(widget),
            parent: None,
            children: Vec::new(),
            rect: Rect::zero(),
            default_rect: Rect::zero(),
            alignment: Alignment::None,
            overlap: false,
            padding: 0.0,
            h_border: 0.0,
            v_border: 0.0,
            resource: Resource::default(),
            visible: true,
            enabled: true,
            focused: false,
            pushed: false,
            pointed: false,
            allow_focus,
            frozen: false,
            move_children_on_push,
            redraw_on_mouse_event,
            redraw_on_mouse_move,
            draw_background,
            group_index: 0,
            user_data: None,
        }
    }

    /// Own id.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Widget type name.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Parent node, if attached.
    pub fn parent(&self) -> Option<NodeId> {
        self.parent
    }

    /// Children in layout order.
    pub fn children(&self) -> &[NodeId] {
        &self.children
    }

    /// Current rect in window coordinates.
    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// The rect layout starts from.
    pub fn default_rect(&self) -> Rect {
        self.default_rect
    }

    /// Placement tag.
    pub fn alignment(&self) -> Alignment {
        self.alignment
    }

    /// Does placement leave the parent's client rect untouched?
    pub fn overlaps(&self) -> bool {
        self.overlap
    }

    /// Padding on every side.
    pub fn padding(&self) -> f32 {
        self.padding
    }

    /// Horizontal border width.
    pub fn h_border(&self) -> f32 {
        self.h_border
    }

    /// Vertical border width.
    pub fn v_border(&self) -> f32 {
        self.v_border
    }

    /// Style resource.
    pub fn resource(&self) -> &Resource {
        &self.resource
    }

    /// Local visibility flag. See `Tree::is_visible` for effective visibility.
    pub fn is_shown(&self) -> bool {
        self.visible
    }

    /// Local enablement flag.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Does the node hold keyboard focus?
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Is a button press pending on the node?
    pub fn is_pushed(&self) -> bool {
        self.pushed
    }

    /// Is the pointer over the node?
    pub fn is_pointed(&self) -> bool {
        self.pointed
    }

    /// May the node take focus?
    pub fn allows_focus(&self) -> bool {
        self.allow_focus
    }

    /// Is a layout pass over the node in progress?
    pub fn is_frozen(&self) -> bool {
        self.frozen
    }

    /// Should the style paint a background?
    pub fn draws_background(&self) -> bool {
        self.draw_background
    }

    /// Application grouping index.
    pub fn group_index(&self) -> u32 {
        self.group_index
    }

    /// Application payload, if one of type `T` is stored.
    pub fn user_data<T: Any>(&self) -> Option<&T> {
        self.user_data.as_ref()?.downcast_ref()
    }

    /// Set both border widths. Intended for styles during `add_resource`
    /// and `resize`; the change takes effect at the next layout pass.
    pub fn set_borders(&mut self, h: f32, v: f32) {
        self.h_border = h.max(0.0);
        self.v_border = v.max(0.0);
    }

    /// Set padding. Same contract as [`Node::set_borders`].
    pub fn set_padding(&mut self, padding: f32) {
        self.padding = padding.max(0.0);
    }

    /// The rect children are placed into: own rect inset by borders and
    /// padding, shifted while pushed if the node moves its children on push.
    /// A collapsed axis becomes zero.
    pub fn client_rect(&self) -> Rect {
        let hb = self.h_border + self.padding;
        let vb = self.v_border + self.padding;
        let mut r = Rect::new(
            self.rect.x + hb,
            self.rect.y + vb,
            (self.rect.w - 2.0 * hb).max(0.0),
            (self.rect.h - 2.0 * vb).max(0.0),
        );
        if self.pushed && self.move_children_on_push {
            r = r.translate(1.0, -1.0);
        }
        r
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widgets::Panel;

    #[test]
    fn client_rect_insets() {
        let mut n = Node::new(NodeId::default(), Box::new(Panel::new()));
        n.rect = Rect::new(10.0, 10.0, 100.0, 50.0);
        n.set_borders(2.0, 3.0);
        n.set_padding(1.0);
        assert_eq!(n.client_rect(), Rect::new(13.0, 14.0, 94.0, 42.0));

        n.move_children_on_push = true;
        n.pushed = true;
        assert_eq!(n.client_rect(), Rect::new(14.0, 13.0, 94.0, 42.0));
    }

    #[test]
    fn client_rect_collapses() {
        let mut n = Node::new(NodeId::default(), Box::new(Panel::new()));
        n.rect = Rect::new(0.0, 0.0, 4.0, 50.0);
        n.set_borders(2.0, 0.0);
        let c = n.client_rect();
        assert_eq!(c.w, 0.0);
        assert_eq!(c.h, 50.0);
    }

    #[test]
    fn user_data() {
        let mut n = Node::new(NodeId::default(), Box::new(Panel::new()));
        assert!(n.user_data::<u32>().is_none());
        n.user_data = Some(Box::new(7u32));
        assert_eq!(n.user_data::<u32>(), Some(&7));
        assert!(n.user_data::<String>().is_none());
    }
}
