use crate::widget::{Behavior, Widget};

/// A passive container. It lays out its children and consumes nothing.
#[derive(Debug, Clone, Default)]
pub struct Panel {
    /// Paint a background.
    background: bool,
}

impl Panel {
    /// A panel that paints a background.
    pub fn new() -> Self {
        Self { background: true }
    }

    /// A panel without a background. As a window root, this also disables
    /// edge dragging.
    pub fn transparent() -> Self {
        Self { background: false }
    }
}

impl Widget for Panel {
    fn behavior(&self) -> Behavior {
        Behavior {
            draw_background: self.background,
            ..Behavior::default()
        }
    }
}
