//! Push button.

use crate::{
    Context,
    bus::UiEvent,
    widget::{Behavior, Pointer, Widget},
};

/// A push button. Children (typically a label) shift while it is pushed.
///
/// A release emits [`UiEvent::Click`] when the button was pushed, the release
/// lands inside it, and no child consumed the release.
#[derive(Debug, Clone, Default)]
pub struct Button {
    /// Clicks so far.
    clicks: u32,
}

impl Button {
    /// A new button.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of clicks delivered.
    pub fn clicks(&self) -> u32 {
        self.clicks
    }
}

impl Widget for Button {
    fn behavior(&self) -> Behavior {
        Behavior::button()
    }

    fn on_mouse_up(&mut self, ctx: &mut Context<'_>, ev: &Pointer) -> bool {
        if !ev.was_pushed || !ev.inside || ev.children_consumed {
            return false;
        }
        self.clicks += 1;
        ctx.emit(UiEvent::Click);
        true
    }
}
