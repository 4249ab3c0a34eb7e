//! Built-in leaf widgets.

/// Push button.
pub mod button;
/// Glyph measurement for text widgets.
pub mod metrics;
/// Passive container.
pub mod panel;
/// Single-line text editor.
pub mod text_edit;
/// Two-state button.
pub mod toggle;
/// Bounded numeric value.
pub mod value_select;

pub use button::Button;
pub use metrics::{GlyphMetrics, Monospace};
pub use panel::Panel;
pub use text_edit::TextEdit;
pub use toggle::ToggleButton;
pub use value_select::ValueSelect;
