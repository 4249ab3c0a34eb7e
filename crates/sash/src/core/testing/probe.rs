use std::{mem, sync::Arc};

use parking_lot::Mutex;

use crate::{
    Context,
    event::key::Key,
    widget::{Behavior, Motion, Pointer, Widget},
};

/// A shared, ordered log of `label:event` entries.
#[derive(Debug, Clone, Default)]
pub struct Recorder {
    /// Entries in call order.
    entries: Arc<Mutex<Vec<String>>>,
}

impl Recorder {
    /// An empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an entry.
    pub fn push(&self, entry: impl Into<String>) {
        self.entries.lock().push(entry.into());
    }

    /// Copy of all entries.
    pub fn entries(&self) -> Vec<String> {
        self.entries.lock().clone()
    }

    /// Take all entries, leaving the log empty.
    pub fn take(&self) -> Vec<String> {
        mem::take(&mut *self.entries.lock())
    }

    /// Was an entry recorded?
    pub fn contains(&self, entry: &str) -> bool {
        self.entries.lock().iter().any(|e| e == entry)
    }

    /// How many times was an entry recorded?
    pub fn count(&self, entry: &str) -> usize {
        self.entries.lock().iter().filter(|e| *e == entry).count()
    }
}

/// A widget that logs every callback to a [`Recorder`].
///
/// Resize and move callbacks are counted but not logged, since layout fires
/// them often; see [`Probe::resizes`].
pub struct Probe {
    /// Log prefix.
    label: String,
    /// Shared log.
    rec: Recorder,
    /// Behavior flags.
    behavior: Behavior,
    /// Consume pointer events.
    consume_mouse: bool,
    /// Consume key events.
    consume_keys: bool,
    /// Resize callbacks seen.
    resizes: usize,
}

impl Probe {
    /// A passive probe.
    pub fn new(label: &str, rec: &Recorder) -> Self {
        Self {
            label: label.to_string(),
            rec: rec.clone(),
            behavior: Behavior::default(),
            consume_mouse: false,
            consume_keys: false,
            resizes: 0,
        }
    }

    /// Allow focus.
    pub fn focusable(mut self) -> Self {
        self.behavior.allow_focus = true;
        self
    }

    /// Use specific behavior flags.
    pub fn with_behavior(mut self, behavior: Behavior) -> Self {
        self.behavior = behavior;
        self
    }

    /// Consume pointer events.
    pub fn consuming(mut self) -> Self {
        self.consume_mouse = true;
        self
    }

    /// Consume key events.
    pub fn consuming_keys(mut self) -> Self {
        self.consume_keys = true;
        self
    }

    /// The log prefix.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Resize callbacks seen.
    pub fn resizes(&self) -> usize {
        self.resizes
    }

    /// Log one event.
    fn log(&self, event: &str) {
        self.rec.push(format!("{}:{event}", self.label));
    }
}

impl Widget for Probe {
    fn behavior(&self) -> Behavior {
        self.behavior
    }

    fn on_create(&mut self, _ctx: &mut Context<'_>) {
        self.log("create");
    }

    fn on_destroy(&mut self, _ctx: &mut Context<'_>) {
        self.log("destroy");
    }

    fn on_show(&mut self, _ctx: &mut Context<'_>) {
        self.log("show");
    }

    fn on_hide(&mut self, _ctx: &mut Context<'_>) {
        self.log("hide");
    }

    fn on_enable(&mut self, _ctx: &mut Context<'_>) {
        self.log("enable");
    }

    fn on_disable(&mut self, _ctx: &mut Context<'_>) {
        self.log("disable");
    }

    fn on_resize(&mut self, _ctx: &mut Context<'_>) {
        self.resizes += 1;
    }

    fn on_got_focus(&mut self, _ctx: &mut Context<'_>) {
        self.log("got_focus");
    }

    fn on_lost_focus(&mut self, _ctx: &mut Context<'_>) {
        self.log("lost_focus");
    }

    fn on_key_down(&mut self, _ctx: &mut Context<'_>, key: Key) -> bool {
        self.log(&format!("key_down:{key}"));
        self.consume_keys
    }

    fn on_key_up(&mut self, _ctx: &mut Context<'_>, key: Key) -> bool {
        self.log(&format!("key_up:{key}"));
        self.consume_keys
    }

    fn on_mouse_down(&mut self, _ctx: &mut Context<'_>, _ev: &Pointer) -> bool {
        self.log("mouse_down");
        self.consume_mouse
    }

    fn on_mouse_up(&mut self, _ctx: &mut Context<'_>, _ev: &Pointer) -> bool {
        self.log("mouse_up");
        self.consume_mouse
    }

    fn on_mouse_move(&mut self, _ctx: &mut Context<'_>, _ev: &Motion) -> bool {
        self.consume_mouse
    }
}
