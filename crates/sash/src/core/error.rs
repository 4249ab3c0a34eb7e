use std::result::Result as StdResult;

use thiserror::Error;

use crate::{
    core::id::{NodeId, WindowId},
    geom,
};

/// Result type for sash operations.
pub type Result<T> = StdResult<T, Error>;

/// Core error type.
///
/// Semantic refusals (a node declining focus, a range setter rejecting its
/// argument, a collapsed client area) are not errors; they leave state
/// unchanged and report through return values. This type covers misuse of the
/// structural API.
#[derive(PartialEq, Eq, Error, Debug, Clone)]
pub enum Error {
    /// Node id does not refer to a live node in this tree.
    #[error("node not found: {0:?}")]
    NodeNotFound(NodeId),
    /// Window id does not refer to a window owned by the manager.
    #[error("window not found: {0}")]
    WindowNotFound(WindowId),
    /// Node already has a parent.
    #[error("node already attached: {0:?}")]
    AlreadyAttached(NodeId),
    /// Attaching would make a node its own ancestor.
    #[error("attaching {child:?} under {parent:?} would create a cycle")]
    WouldCreateCycle {
        /// Requested parent.
        parent: NodeId,
        /// Requested child.
        child: NodeId,
    },
    /// Typed widget access with the wrong widget type.
    #[error("widget type mismatch at {0:?}")]
    WidgetType(NodeId),
    /// The widget is already borrowed by a callback further up the stack.
    #[error("reentrant widget borrow at {0:?}")]
    ReentrantWidgetBorrow(NodeId),
    /// Operation not valid in the current state.
    #[error("invalid operation: {0}")]
    InvalidOperation(String),
    /// Geometry failure.
    #[error("geometry: {0}")]
    Geometry(String),
}

impl From<geom::Error> for Error {
    fn from(e: geom::Error) -> Self {
        Self::Geometry(e.to_string())
    }
}
