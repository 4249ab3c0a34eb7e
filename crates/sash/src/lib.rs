//! Sash: a retained-mode widget layout and window input-routing engine.
//!
//! Widgets live in a per-window [`Tree`] arena. Each parent lays out its
//! children by consuming a client rectangle according to each child's
//! [`Alignment`]. A [`WindowManager`] owns an ordered set of [`Window`]s,
//! routes keyboard and mouse input to them, hands focus between them, and
//! lets the user resize windows by dragging their edges.
//!
//! # Module Organization
//!
//! - [`geom`] - Geometry primitives (Rect, Point, Expanse)
//! - [`widget`] - The [`Widget`] trait and callback event records
//! - [`widgets`] - Built-in leaf widgets

#![warn(missing_docs)]

mod core;

pub use sash_geom as geom;
pub mod widget;
pub mod widgets;

#[cfg(any(test, feature = "testing"))]
pub use core::testing;
pub use core::{
    Alignment, Attach, Borders, Context, Cursor, DragState, Edge, EventBus, EventKind, EventSink,
    FocusManager, ManagerConfig, ManagerHandle, Node, NodeId, Notification, ResizeTarget, Tree,
    UiEvent, Window, WindowId, WindowManager,
};
pub use core::{bus, config, error, event, layout, style};
pub use widget::Widget;

/// Common imports.
pub mod prelude {
    pub use crate::{
        Alignment, Attach, Context, FocusManager, ManagerConfig, NodeId, Tree, UiEvent, Widget,
        Window, WindowId, WindowManager,
        error::{Error, Result},
        event::{
            InputEvent,
            key::{Key, KeyCode, Mods},
            mouse::{Button, Buttons},
        },
        geom::{Expanse, Point, Rect},
    };
}
