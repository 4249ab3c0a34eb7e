use std::fmt;

use serde::{Deserialize, Serialize};
use slotmap::new_key_type;

new_key_type! {
    /// Opaque identifier for a node stored in a window's tree arena.
    pub struct NodeId;
}

/// Identifier assigned to a window when it is added to a manager.
///
/// Ids are allocated from a monotonically increasing counter and are never
/// reused within one manager.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WindowId(u64);

impl WindowId {
    /// Wrap a raw window number.
    pub fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw window number.
    pub fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window#{}", self.0)
    }
}
