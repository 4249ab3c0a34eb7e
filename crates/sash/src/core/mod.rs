//! Core types: the node arena, layout, focus, dispatch, windows and the
//! window manager.

/// Notification bus.
pub mod bus;
/// Manager settings.
pub mod config;
/// Core error types.
pub mod error;
/// Input event types.
pub mod event;
/// Layout engine.
pub mod layout;
/// Style and renderer seams.
pub mod style;
/// Testing utilities.
#[cfg(any(test, feature = "testing"))]
pub mod testing;

/// Widget callback context.
pub mod context;
/// Input propagation.
mod dispatch;
/// Keyboard focus.
pub mod focus;
/// Node and window ids.
pub mod id;
/// Window manager.
pub mod manager;
/// Node data.
pub mod node;
/// Node arena.
pub mod tree;
/// Top-level windows.
pub mod window;

pub use bus::{EventBus, EventKind, EventSink, Notification, UiEvent};
pub use config::ManagerConfig;
pub use context::Context;
pub use focus::FocusManager;
pub use id::{NodeId, WindowId};
pub use layout::Alignment;
pub use manager::{Cursor, DragState, ManagerHandle, ResizeTarget, WindowManager};
pub use node::Node;
pub use tree::{Attach, Tree};
pub use window::{Borders, Edge, Window};
