//! Single-line text editor.

use unicode_segmentation::UnicodeSegmentation;

use crate::{
    Context,
    bus::UiEvent,
    event::key::{Key, KeyCode},
    widget::{Behavior, Widget},
    widgets::metrics::{GlyphMetrics, Monospace},
};

/// Line contents with a caret and a visible window that slides to follow it.
/// Positions count grapheme clusters.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct LineBuf {
    /// The text.
    value: String,
    /// Caret position.
    caret: usize,
    /// First visible grapheme.
    start: usize,
    /// Number of visible graphemes.
    shown: usize,
}

impl LineBuf {
    /// Grapheme clusters of the value.
    fn graphemes(&self) -> Vec<&str> {
        self.value.graphemes(true).collect()
    }

    /// Length in graphemes.
    fn len(&self) -> usize {
        self.value.graphemes(true).count()
    }

    /// Byte offset of a grapheme index.
    fn byte_offset(&self, idx: usize) -> usize {
        self.value
            .grapheme_indices(true)
            .nth(idx)
            .map_or(self.value.len(), |(off, _)| off)
    }

    /// Insert text at the caret and advance past it. A combining mark merges
    /// into the grapheme before the caret and leaves the caret in place.
    fn insert(&mut self, s: &str) {
        let before = self.len();
        let off = self.byte_offset(self.caret);
        self.value.insert_str(off, s);
        self.caret = (self.caret + self.len() - before).min(self.len());
    }

    /// Remove the grapheme at `idx`.
    fn remove(&mut self, idx: usize) -> bool {
        if idx >= self.len() {
            return false;
        }
        let from = self.byte_offset(idx);
        let to = self.byte_offset(idx + 1);
        self.value.replace_range(from..to, "");
        true
    }

    /// Recount the graphemes that fit in `width`, starting at the window
    /// origin.
    fn measure(&mut self, width: f32, metrics: &dyn GlyphMetrics) {
        let mut room = width;
        let mut n = 0;
        for g in self.graphemes().into_iter().skip(self.start) {
            let adv = metrics.advance(g);
            if room <= 0.0 || room < adv {
                break;
            }
            room -= adv;
            n += 1;
        }
        self.shown = n;
    }

    /// Slide the window so the caret stays in view.
    fn follow(&mut self, width: f32, metrics: &dyn GlyphMetrics) {
        self.measure(width, metrics);
        if self.caret < self.start {
            self.start = self.caret;
        } else if self.caret > self.start + self.shown && self.shown != self.len() {
            self.start = self.caret - self.shown;
        }
        self.measure(width, metrics);
    }

    /// The visible slice.
    fn visible(&self) -> &str {
        let from = self.byte_offset(self.start);
        let to = self.byte_offset(self.start + self.shown);
        &self.value[from..to]
    }
}

/// A focusable single-line editor.
///
/// Left, Right, Home and End move the caret; Backspace and Delete remove a
/// grapheme; printable keys insert. Every edit emits one
/// [`UiEvent::TextChange`]. A read-only editor ignores keys.
pub struct TextEdit {
    /// Contents and caret.
    buf: LineBuf,
    /// Ignore edits.
    read_only: bool,
    /// Glyph measurement.
    metrics: Box<dyn GlyphMetrics>,
    /// Width available for text, from the last resize.
    width: f32,
}

impl TextEdit {
    /// An editor with initial text, measured with unit-width glyphs.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            buf: LineBuf {
                value: text.into(),
                ..Default::default()
            },
            read_only: false,
            metrics: Box::new(Monospace::default()),
            width: 0.0,
        }
    }

    /// Use custom glyph metrics.
    pub fn with_metrics(mut self, metrics: impl GlyphMetrics + 'static) -> Self {
        self.metrics = Box::new(metrics);
        self
    }

    /// Build a read-only editor.
    pub fn read_only(mut self) -> Self {
        self.read_only = true;
        self
    }

    /// Toggle read-only mode.
    pub fn set_read_only(&mut self, read_only: bool) {
        self.read_only = read_only;
    }

    /// Is the editor read-only?
    pub fn is_read_only(&self) -> bool {
        self.read_only
    }

    /// The full text.
    pub fn text(&self) -> &str {
        &self.buf.value
    }

    /// Caret position in graphemes.
    pub fn caret(&self) -> usize {
        self.buf.caret
    }

    /// The part of the text that fits the editor's width.
    pub fn visible_text(&self) -> &str {
        self.buf.visible()
    }

    /// Move the caret. Positions past the end clamp to the end.
    pub fn set_caret(&mut self, ctx: &mut Context<'_>, caret: usize) {
        self.buf.caret = caret.min(self.buf.len());
        self.buf.follow(self.width, self.metrics.as_ref());
        ctx.refresh();
    }

    /// Replace the text.
    pub fn set_text(&mut self, ctx: &mut Context<'_>, text: impl Into<String>) {
        let text = text.into();
        if self.buf.value == text {
            return;
        }
        if self.buf.value.is_empty() {
            self.buf.caret = 0;
            self.buf.start = 0;
        }
        self.buf.value = text;
        self.buf.caret = self.buf.caret.min(self.buf.len());
        self.buf.start = self.buf.start.min(self.buf.caret);
        self.changed(ctx);
    }

    /// Refit the window, redraw and publish the new text.
    fn changed(&mut self, ctx: &mut Context<'_>) {
        self.buf.follow(self.width, self.metrics.as_ref());
        ctx.refresh();
        ctx.emit(UiEvent::TextChange(self.buf.value.clone()));
    }

    /// Width available for glyphs inside the node's borders.
    fn text_width(ctx: &Context<'_>) -> f32 {
        ctx.node()
            .map_or(0.0, |n| (n.rect().w - 2.0 * n.h_border()).max(0.0))
    }
}

impl Widget for TextEdit {
    fn behavior(&self) -> Behavior {
        Behavior {
            allow_focus: true,
            ..Behavior::default()
        }
    }

    fn on_resize(&mut self, ctx: &mut Context<'_>) {
        self.width = Self::text_width(ctx);
        self.buf.follow(self.width, self.metrics.as_ref());
    }

    fn on_key_down(&mut self, ctx: &mut Context<'_>, key: Key) -> bool {
        if self.read_only {
            return false;
        }
        let len = self.buf.len();
        match key.code {
            KeyCode::Left => {
                self.buf.caret = self.buf.caret.saturating_sub(1);
            }
            KeyCode::Right => {
                self.buf.caret = (self.buf.caret + 1).min(len);
            }
            KeyCode::Home => self.buf.caret = 0,
            KeyCode::End => self.buf.caret = len,
            KeyCode::Backspace => {
                if self.buf.caret > 0 {
                    self.buf.caret -= 1;
                    let at = self.buf.caret;
                    self.buf.remove(at);
                    self.changed(ctx);
                }
                return true;
            }
            KeyCode::Delete => {
                let at = self.buf.caret;
                if self.buf.remove(at) {
                    self.changed(ctx);
                }
                return true;
            }
            _ => {
                let Some(c) = key.text() else {
                    return false;
                };
                let mut tmp = [0u8; 4];
                self.buf.insert(c.encode_utf8(&mut tmp));
                self.changed(ctx);
                return true;
            }
        }
        self.buf.follow(self.width, self.metrics.as_ref());
        ctx.refresh();
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grapheme_editing() {
        let mut b = LineBuf {
            value: "ae\u{301}b".into(),
            ..Default::default()
        };
        assert_eq!(b.len(), 3);
        b.caret = 2;
        b.insert("x");
        assert_eq!(b.value, "ae\u{301}xb");
        assert!(b.remove(1));
        assert_eq!(b.value, "axb");
        assert!(!b.remove(3));
    }

    #[test]
    fn window_follows_caret() {
        let m = Monospace(1.0);
        let mut b = LineBuf {
            value: "abcdefghij".into(),
            ..Default::default()
        };
        b.follow(4.0, &m);
        assert_eq!(b.visible(), "abcd");
        b.caret = 10;
        b.follow(4.0, &m);
        assert_eq!(b.start, 6);
        assert_eq!(b.visible(), "ghij");
        b.caret = 2;
        b.follow(4.0, &m);
        assert_eq!(b.visible(), "cdef");
    }
}
