use std::{collections::HashMap, sync::Arc};

use parking_lot::Mutex;

use crate::{
    Node, NodeId,
    geom::Rect,
    style::{Color, Frame, Renderer, Resource, Style},
};

/// A renderer that records fills.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    /// Number of frames started.
    pub restarts: usize,
    /// Fills since the last restart, in manager coordinates.
    pub fills: Vec<(Rect, Color)>,
}

impl Renderer for RecordingRenderer {
    fn restart(&mut self) {
        self.restarts += 1;
        self.fills.clear();
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.fills.push((rect, color));
    }
}

/// A style that counts `resize` calls per node and fills every node rect
/// with white in the background pass. Clones share their counters.
#[derive(Debug, Clone, Default)]
pub struct CountingStyle {
    /// Resize calls per node.
    resizes: Arc<Mutex<HashMap<NodeId, usize>>>,
}

impl CountingStyle {
    /// A fresh counter.
    pub fn new() -> Self {
        Self::default()
    }

    /// Resize calls recorded for a node.
    pub fn resizes(&self, id: NodeId) -> usize {
        self.resizes.lock().get(&id).copied().unwrap_or(0)
    }

    /// Snapshot of all counters.
    pub fn all(&self) -> HashMap<NodeId, usize> {
        self.resizes.lock().clone()
    }

    /// Clear all counters.
    pub fn reset(&self) {
        self.resizes.lock().clear();
    }
}

impl Style for CountingStyle {
    fn resize(&self, node: &mut Node, _rect: Rect, _resource: &Resource) {
        *self.resizes.lock().entry(node.id()).or_default() += 1;
    }

    fn draw(&self, node: &Node, _resource: &Resource, frame: &mut Frame<'_>, background: bool) {
        if background {
            frame.fill_rect(node.rect(), Color::WHITE);
        }
    }
}
