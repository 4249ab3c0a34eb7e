//! The widget trait and the event records passed to its callbacks.

use std::any::{Any, type_name};

use crate::{
    Context,
    bus::UiEvent,
    event::{
        key::Key,
        mouse::{Button, Buttons},
    },
    geom::Point,
};

/// Static behavior flags read from a widget when its node is created.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Behavior {
    /// The node may take keyboard focus.
    pub allow_focus: bool,
    /// Children shift by (+1, -1) while the node is pushed.
    pub move_children_on_push: bool,
    /// Button events re-run layout and refresh the node.
    pub redraw_on_mouse_event: bool,
    /// Pointer enter/leave refreshes the node.
    pub redraw_on_mouse_move: bool,
    /// The style paints a background behind the node.
    pub draw_background: bool,
}

impl Default for Behavior {
    fn default() -> Self {
        Self {
            allow_focus: false,
            move_children_on_push: false,
            redraw_on_mouse_event: false,
            redraw_on_mouse_move: false,
            draw_background: true,
        }
    }
}

impl Behavior {
    /// Behavior for clickable controls: focusable, pressed look, children
    /// shift while pushed.
    pub fn button() -> Self {
        Self {
            allow_focus: true,
            move_children_on_push: true,
            redraw_on_mouse_event: true,
            redraw_on_mouse_move: true,
            draw_background: true,
        }
    }
}

/// A button event as seen by one node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pointer {
    /// The button.
    pub button: Button,
    /// Window-local position.
    pub pos: Point,
    /// The node was pushed before this event. Always false for presses.
    pub was_pushed: bool,
    /// The position lies inside the node's rect.
    pub inside: bool,
    /// A child already consumed the event.
    pub children_consumed: bool,
}

/// A pointer motion as seen by one node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Motion {
    /// Buttons held.
    pub buttons: Buttons,
    /// Window-local position.
    pub pos: Point,
}

/// Lifecycle transitions delivered to widgets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lifecycle {
    /// Attached to a parent, or the window was added.
    Create,
    /// Being torn down.
    Destroy,
    /// Became visible.
    Show,
    /// Became hidden.
    Hide,
    /// Enabled.
    Enable,
    /// Disabled.
    Disable,
    /// Size committed.
    Resize,
    /// Position committed.
    Move,
    /// Gained focus.
    GotFocus,
    /// Lost focus.
    LostFocus,
}

/// Widgets are the behavior attached to nodes in a tree.
///
/// Every callback has a no-op default. Input callbacks return `true` when
/// they consume the event.
#[allow(unused_variables)]
pub trait Widget: Any + Send {
    /// Behavior flags, read once when the node is created.
    fn behavior(&self) -> Behavior {
        Behavior::default()
    }

    /// Widget type name for diagnostics.
    fn name(&self) -> &'static str {
        let name = type_name::<Self>();
        name.rsplit("::").next().unwrap_or(name)
    }

    /// The node was attached.
    fn on_create(&mut self, ctx: &mut Context<'_>) {}

    /// The node is being destroyed. Children are notified first.
    fn on_destroy(&mut self, ctx: &mut Context<'_>) {}

    /// The node became visible.
    fn on_show(&mut self, ctx: &mut Context<'_>) {}

    /// The node became hidden.
    fn on_hide(&mut self, ctx: &mut Context<'_>) {}

    /// The node was enabled.
    fn on_enable(&mut self, ctx: &mut Context<'_>) {}

    /// The node was disabled.
    fn on_disable(&mut self, ctx: &mut Context<'_>) {}

    /// The node's size was committed, after its children were laid out.
    fn on_resize(&mut self, ctx: &mut Context<'_>) {}

    /// The node moved.
    fn on_move(&mut self, ctx: &mut Context<'_>) {}

    /// The node gained keyboard focus.
    fn on_got_focus(&mut self, ctx: &mut Context<'_>) {}

    /// The node lost keyboard focus.
    fn on_lost_focus(&mut self, ctx: &mut Context<'_>) {}

    /// A key went down while the node was focused.
    fn on_key_down(&mut self, ctx: &mut Context<'_>, key: Key) -> bool {
        false
    }

    /// A key went up while the node was focused.
    fn on_key_up(&mut self, ctx: &mut Context<'_>, key: Key) -> bool {
        false
    }

    /// A button press reached the node, after its children.
    fn on_mouse_down(&mut self, ctx: &mut Context<'_>, ev: &Pointer) -> bool {
        false
    }

    /// A button release reached the node, after its children.
    fn on_mouse_up(&mut self, ctx: &mut Context<'_>, ev: &Pointer) -> bool {
        false
    }

    /// The pointer moved over the node, after its children.
    fn on_mouse_move(&mut self, ctx: &mut Context<'_>, ev: &Motion) -> bool {
        false
    }
}

/// Route a lifecycle transition to the matching callback.
pub(crate) fn deliver(widget: &mut dyn Widget, ctx: &mut Context<'_>, event: Lifecycle) {
    match event {
        Lifecycle::Create => widget.on_create(ctx),
        Lifecycle::Destroy => widget.on_destroy(ctx),
        Lifecycle::Show => widget.on_show(ctx),
        Lifecycle::Hide => widget.on_hide(ctx),
        Lifecycle::Enable => widget.on_enable(ctx),
        Lifecycle::Disable => widget.on_disable(ctx),
        Lifecycle::Resize => widget.on_resize(ctx),
        Lifecycle::Move => widget.on_move(ctx),
        Lifecycle::GotFocus => widget.on_got_focus(ctx),
        Lifecycle::LostFocus => widget.on_lost_focus(ctx),
    }
}

/// Downcast a widget to a concrete type.
pub(crate) fn downcast_mut<W: Widget>(widget: &mut dyn Widget) -> Option<&mut W> {
    let any: &mut dyn Any = widget;
    any.downcast_mut::<W>()
}

/// Downcast a widget to a concrete type.
pub(crate) fn downcast_ref<W: Widget>(widget: &dyn Widget) -> Option<&W> {
    let any: &dyn Any = widget;
    any.downcast_ref::<W>()
}

impl From<Lifecycle> for UiEvent {
    fn from(l: Lifecycle) -> Self {
        match l {
            Lifecycle::Create => Self::Create,
            Lifecycle::Destroy => Self::Destroy,
            Lifecycle::Show => Self::Show,
            Lifecycle::Hide => Self::Hide,
            Lifecycle::Enable => Self::Enable,
            Lifecycle::Disable => Self::Disable,
            Lifecycle::Resize => Self::Resize,
            Lifecycle::Move => Self::Move,
            Lifecycle::GotFocus => Self::GotFocus,
            Lifecycle::LostFocus => Self::LostFocus,
        }
    }
}
