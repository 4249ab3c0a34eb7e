use crate::{
    Context,
    bus::UiEvent,
    widget::{Behavior, Pointer, Widget},
};

/// A button with a checked state that flips on every release inside it.
#[derive(Debug, Clone, Default)]
pub struct ToggleButton {
    /// Current state.
    checked: bool,
}

impl ToggleButton {
    /// A toggle in the given state.
    pub fn new(checked: bool) -> Self {
        Self { checked }
    }

    /// Current state.
    pub fn is_checked(&self) -> bool {
        self.checked
    }

    /// Set the state without emitting a click.
    pub fn set_checked(&mut self, ctx: &mut Context<'_>, checked: bool) {
        if self.checked != checked {
            self.checked = checked;
            ctx.refresh();
        }
    }
}

impl Widget for ToggleButton {
    fn behavior(&self) -> Behavior {
        Behavior::button()
    }

    fn on_mouse_up(&mut self, ctx: &mut Context<'_>, ev: &Pointer) -> bool {
        if ev.children_consumed || !ev.inside {
            return false;
        }
        self.checked = !self.checked;
        ctx.refresh();
        ctx.emit(UiEvent::Click);
        true
    }
}
