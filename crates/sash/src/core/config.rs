use serde::{Deserialize, Serialize};

/// Window manager settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ManagerConfig {
    /// Extent of the internal coordinate space on both axes. Device
    /// coordinates are scaled by `virtual_size / device extent`.
    pub virtual_size: f32,
    /// Distance from a resizeable edge, in internal units, within which the
    /// pointer grabs that edge.
    pub resize_delta: f32,
    /// Allow windows to be resized by dragging their edges.
    pub window_resizing: bool,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            virtual_size: 1000.0,
            resize_delta: 5.0,
            window_resizing: true,
        }
    }
}

impl ManagerConfig {
    /// Set the internal coordinate extent.
    pub fn with_virtual_size(mut self, size: f32) -> Self {
        self.virtual_size = size;
        self
    }

    /// Set the edge grab threshold.
    pub fn with_resize_delta(mut self, delta: f32) -> Self {
        self.resize_delta = delta;
        self
    }

    /// Enable or disable edge dragging.
    pub fn with_window_resizing(mut self, enabled: bool) -> Self {
        self.window_resizing = enabled;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_uses_defaults() {
        let cfg: ManagerConfig = serde_json::from_str(r#"{"resize_delta": 8.0}"#).unwrap();
        assert_eq!(cfg.resize_delta, 8.0);
        assert_eq!(cfg.virtual_size, 1000.0);
        assert!(cfg.window_resizing);
    }

    #[test]
    fn builder() {
        let cfg = ManagerConfig::default()
            .with_virtual_size(500.0)
            .with_window_resizing(false);
        assert_eq!(cfg.virtual_size, 500.0);
        assert!(!cfg.window_resizing);
        let json = serde_json::to_string(&cfg).unwrap();
        let back: ManagerConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, cfg);
    }
}
