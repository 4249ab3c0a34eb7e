/// Measures the horizontal advance of a grapheme cluster.
pub trait GlyphMetrics: Send {
    /// Width of one grapheme cluster in layout units.
    fn advance(&self, grapheme: &str) -> f32;
}

/// Every grapheme has the same advance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Monospace(pub f32);

impl Default for Monospace {
    fn default() -> Self {
        Self(1.0)
    }
}

impl GlyphMetrics for Monospace {
    fn advance(&self, _grapheme: &str) -> f32 {
        self.0
    }
}
