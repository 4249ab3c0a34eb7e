//! The window manager: an ordered set of windows, window focus, and the
//! input routing state machine for edge-drag resizing.
//!
//! The window list lives behind a mutex shared with [`ManagerHandle`]s, so
//! windows can be added and queued for removal from other threads or from
//! widget callbacks. Each window has its own lock; the list lock is only held
//! to copy or change the list. Removals and visibility changes are applied at
//! the start of the next [`WindowManager::draw_frame`].

use std::{
    mem,
    sync::{
        Arc,
        atomic::{AtomicBool, AtomicU64, Ordering},
    },
};

use parking_lot::Mutex;
use tracing::{debug, trace};

use crate::{
    core::{
        bus::{EventBus, EventSink},
        config::ManagerConfig,
        error::{Error, Result},
        event::{
            InputEvent,
            key::Key,
            mouse::{Button, Buttons},
        },
        id::WindowId,
        style::Renderer,
        window::Window,
    },
    geom::{Axis, Expanse, Point},
};

/// The cursor glyph the host should display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cursor {
    /// Normal pointer.
    #[default]
    Arrow,
    /// Horizontal resize.
    ResizeH,
    /// Vertical resize.
    ResizeV,
}

impl From<Axis> for Cursor {
    fn from(axis: Axis) -> Self {
        match axis {
            Axis::Horizontal => Self::ResizeH,
            Axis::Vertical => Self::ResizeV,
        }
    }
}

/// The window edge involved in a resize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeTarget {
    /// Window being resized.
    pub window: WindowId,
    /// Locked axis.
    pub axis: Axis,
    /// The edge is on the origin side; dragging moves the origin.
    pub origin: bool,
}

/// Edge-drag state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    /// No edge under the pointer.
    #[default]
    Idle,
    /// The pointer is over a resizeable edge.
    Hover(ResizeTarget),
    /// The edge is being dragged.
    Dragging(ResizeTarget),
}

/// A live window and its id. The window has its own lock so widget
/// callbacks can run while the list is unlocked.
#[derive(Clone)]
struct Entry {
    /// Manager-assigned id.
    id: WindowId,
    /// The window.
    window: Arc<Mutex<Window>>,
}

/// Windows in z-order plus the queued removals and visibility changes.
#[derive(Default)]
struct WindowSet {
    /// Live windows. The last one is topmost and the focus fallback.
    windows: Vec<Entry>,
    /// Windows queued for removal at the next frame.
    removed: Vec<WindowId>,
    /// Visibility changes queued for the next frame, in request order.
    shown: Vec<(WindowId, bool)>,
}

impl WindowSet {
    /// Index of a window by id.
    fn position(&self, id: WindowId) -> Option<usize> {
        self.windows.iter().position(|e| e.id == id)
    }

    /// Window by id.
    fn get(&self, id: WindowId) -> Option<Arc<Mutex<Window>>> {
        self.windows
            .iter()
            .find(|e| e.id == id)
            .map(|e| e.window.clone())
    }
}

/// State shared between the manager and its handles.
#[derive(Default)]
struct Shared {
    /// The window set. Held only to read or change the list and queues,
    /// never while a window runs callbacks or draws.
    set: Mutex<WindowSet>,
    /// A structural change requires a redraw.
    dirty: AtomicBool,
    /// Next window id.
    next_id: AtomicU64,
}

impl Shared {
    /// Take ownership of a window and append it.
    fn add(&self, sink: &EventSink, mut window: Window) -> WindowId {
        let id = WindowId::new(self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        window.attach(id, sink.clone());
        debug!(%id, visible = window.is_visible(), "window added");
        let entry = Entry {
            id,
            window: Arc::new(Mutex::new(window)),
        };
        self.set.lock().windows.push(entry);
        self.dirty.store(true, Ordering::Release);
        id
    }

    /// Queue a window for removal.
    fn remove(&self, id: WindowId) -> Result<()> {
        let mut set = self.set.lock();
        if set.position(id).is_none() {
            return Err(Error::WindowNotFound(id));
        }
        if !set.removed.contains(&id) {
            set.removed.push(id);
        }
        debug!(%id, "window removal queued");
        Ok(())
    }

    /// Queue a visibility change.
    fn show(&self, id: WindowId, visible: bool) -> Result<()> {
        let mut set = self.set.lock();
        if set.position(id).is_none() {
            return Err(Error::WindowNotFound(id));
        }
        set.shown.push((id, visible));
        Ok(())
    }

    /// A copy of the window list, taken under the lock.
    fn snapshot(&self) -> Vec<Entry> {
        self.set.lock().windows.clone()
    }

    /// A window by id, without holding the set lock afterwards.
    fn get(&self, id: WindowId) -> Option<Arc<Mutex<Window>>> {
        self.set.lock().get(id)
    }
}

/// A cloneable handle for adding and removing windows from any thread,
/// including from inside widget callbacks.
#[derive(Clone)]
pub struct ManagerHandle {
    /// Shared state.
    shared: Arc<Shared>,
    /// Bus sender bound into added windows.
    sink: EventSink,
}

impl ManagerHandle {
    /// Add a window. See [`WindowManager::add`].
    pub fn add(&self, window: Window) -> WindowId {
        self.shared.add(&self.sink, window)
    }

    /// Queue a window for removal. See [`WindowManager::remove`].
    pub fn remove(&self, id: WindowId) -> Result<()> {
        self.shared.remove(id)
    }

    /// Queue a visibility change. Applied at the next frame.
    pub fn show(&self, id: WindowId, visible: bool) -> Result<()> {
        self.shared.show(id, visible)
    }
}

/// Owns windows, routes input to them and drives frames.
pub struct WindowManager {
    /// State shared with handles.
    shared: Arc<Shared>,
    /// Notifications from every window.
    bus: EventBus,
    /// Settings.
    config: ManagerConfig,
    /// Device extent, for rescaling input.
    extent: Expanse,
    /// Focused window.
    focused: Option<WindowId>,
    /// Edge-drag state.
    drag: DragState,
    /// Cursor glyph.
    cursor: Cursor,
}

impl Default for WindowManager {
    fn default() -> Self {
        Self::new(ManagerConfig::default())
    }
}

impl WindowManager {
    /// A manager with no windows. The device extent starts equal to the
    /// virtual size, so input is not rescaled until `set_extent` is called.
    pub fn new(config: ManagerConfig) -> Self {
        Self {
            shared: Arc::new(Shared::default()),
            bus: EventBus::new(),
            extent: Expanse::new(config.virtual_size, config.virtual_size),
            config,
            focused: None,
            drag: DragState::Idle,
            cursor: Cursor::Arrow,
        }
    }

    /// A handle for use from other threads.
    pub fn handle(&self) -> ManagerHandle {
        ManagerHandle {
            shared: self.shared.clone(),
            sink: self.bus.sink(),
        }
    }

    /// Settings.
    pub fn config(&self) -> &ManagerConfig {
        &self.config
    }

    /// The notification bus.
    pub fn bus(&self) -> &EventBus {
        &self.bus
    }

    /// Set the device extent used to rescale input coordinates.
    pub fn set_extent(&mut self, extent: Expanse) {
        self.extent = extent;
    }

    /// The focused window.
    pub fn focused(&self) -> Option<WindowId> {
        self.focused
    }

    /// Edge-drag state.
    pub fn drag_state(&self) -> DragState {
        self.drag
    }

    /// The cursor glyph the host should display.
    pub fn cursor(&self) -> Cursor {
        self.cursor
    }

    /// Window ids in z-order, bottom first.
    pub fn window_ids(&self) -> Vec<WindowId> {
        self.shared.set.lock().windows.iter().map(|e| e.id).collect()
    }

    /// Add a window on top. Its create callback fires, and its show callback
    /// if it is already visible. A visible window added this way does not take
    /// focus until it is shown through the manager.
    pub fn add(&self, window: Window) -> WindowId {
        self.shared.add(&self.bus.sink(), window)
    }

    /// Queue a window for removal at the next frame.
    pub fn remove(&self, id: WindowId) -> Result<()> {
        self.shared.remove(id)
    }

    /// Queue a visibility change for the next frame.
    pub fn show(&self, id: WindowId, visible: bool) -> Result<()> {
        self.shared.show(id, visible)
    }

    /// Run a closure against a window while holding that window's lock. The
    /// window list itself is not locked during the call.
    pub fn with_window<R>(&self, id: WindowId, f: impl FnOnce(&mut Window) -> R) -> Result<R> {
        let window = self.shared.get(id).ok_or(Error::WindowNotFound(id))?;
        let mut w = window.lock();
        Ok(f(&mut w))
    }

    /// Apply queued removals and visibility changes, then redraw if anything
    /// changed. Returns true if a frame was drawn.
    ///
    /// The window list is locked only while the queues are taken and the list
    /// is copied; callbacks and drawing run against the copy.
    pub fn draw_frame(&mut self, renderer: &mut dyn Renderer) -> bool {
        let (removed, shown, windows) = {
            let mut set = self.shared.set.lock();
            let mut removed = Vec::new();
            for id in mem::take(&mut set.removed) {
                if let Some(pos) = set.position(id) {
                    removed.push(set.windows.remove(pos));
                }
            }
            let shown = mem::take(&mut set.shown);
            (removed, shown, set.windows.clone())
        };
        let mut changed = self.shared.dirty.swap(false, Ordering::AcqRel);

        for Entry { id, window } in removed {
            let mut w = window.lock();
            w.detach();
            if self.focused == Some(id) {
                w.lost_focus();
                drop(w);
                self.focused = windows.last().map(|e| e.id);
                if let Some(e) = windows.last() {
                    e.window.lock().got_focus();
                }
            }
            if matches!(self.drag, DragState::Hover(t) | DragState::Dragging(t) if t.window == id) {
                self.reset_drag();
            }
            debug!(%id, focused = ?self.focused, "window removed");
            changed = true;
        }

        for (id, visible) in shown {
            if let Some(e) = windows.iter().find(|e| e.id == id) {
                e.window.lock().pending = Some(visible);
            }
        }

        for (i, e) in windows.iter().enumerate() {
            let id = e.id;
            let Some(visible) = e.window.lock().pending.take() else {
                continue;
            };
            changed = true;
            if visible {
                if self.focused != Some(id) {
                    if let Some(prev) = self.focused.and_then(|f| windows.iter().find(|p| p.id == f))
                    {
                        prev.window.lock().lost_focus();
                    }
                    self.focused = Some(id);
                    e.window.lock().got_focus();
                }
                e.window.lock().set_visible(true);
            } else {
                if self.focused == Some(id) {
                    e.window.lock().lost_focus();
                    let next = windows
                        .iter()
                        .enumerate()
                        .rev()
                        .find(|(n, _)| *n != i)
                        .map(|(_, p)| p);
                    self.focused = next.map(|p| p.id);
                    if let Some(p) = next {
                        p.window.lock().got_focus();
                    }
                }
                e.window.lock().set_visible(false);
            }
            debug!(%id, visible, focused = ?self.focused, "window visibility applied");
        }

        for e in &windows {
            changed |= e.window.lock().take_refresh();
        }
        if !changed {
            return false;
        }
        renderer.restart();
        for e in &windows {
            e.window.lock().draw(renderer);
        }
        true
    }

    /// Route one input event. Returns true if it was consumed.
    pub fn on_input(&mut self, event: &InputEvent) -> bool {
        match *event {
            InputEvent::Key { key, pressed } => self.route_key(key, pressed),
            InputEvent::MouseButton {
                button,
                pressed,
                x,
                y,
            } => {
                let p = self.to_internal(x, y);
                self.route_button(button, pressed, p)
            }
            InputEvent::MouseMotion { buttons, x, y } => {
                let p = self.to_internal(x, y);
                self.route_motion(buttons, p)
            }
        }
    }

    /// Device-to-internal scale factors per axis.
    fn scale(&self) -> (f32, f32) {
        let per = |extent: f32| {
            if extent > 0.0 {
                self.config.virtual_size / extent
            } else {
                1.0
            }
        };
        (per(self.extent.w), per(self.extent.h))
    }

    /// Rescale device coordinates into the internal space.
    fn to_internal(&self, x: f32, y: f32) -> Point {
        let (sx, sy) = self.scale();
        Point::new(x * sx, y * sy)
    }

    /// Keys go to the focused window, if it is visible.
    fn route_key(&mut self, key: Key, pressed: bool) -> bool {
        let Some(id) = self.focused else {
            return false;
        };
        let Some(window) = self.shared.get(id) else {
            return false;
        };
        let mut w = window.lock();
        if !w.is_visible() {
            return false;
        }
        if pressed {
            w.key_down(key)
        } else {
            w.key_up(key)
        }
    }

    /// Return to idle with the normal cursor.
    fn reset_drag(&mut self) {
        if self.drag != DragState::Idle {
            trace!(from = ?self.drag, "drag reset");
        }
        self.drag = DragState::Idle;
        self.cursor = Cursor::Arrow;
    }

    /// The draggable edge of `w` under a window-local point, if resizing is
    /// enabled and the window paints a background. The grab distance for the
    /// top and bottom edges follows the vertical input scale.
    fn edge_target(&self, w: &Window, local: Point) -> Option<ResizeTarget> {
        if !self.config.window_resizing || !w.draws_background() {
            return None;
        }
        let delta = self.config.resize_delta;
        let (_, sy) = self.scale();
        let edge = w.edge_at(local, delta, delta * sy)?;
        Some(ResizeTarget {
            window: w.id()?,
            axis: edge.axis,
            origin: edge.origin,
        })
    }

    /// Motion: resize while dragging, otherwise hit-test for edges and
    /// forward to windows in order until one consumes.
    fn route_motion(&mut self, buttons: Buttons, p: Point) -> bool {
        match self.drag {
            DragState::Dragging(t) => {
                self.drag_to(t, p);
                return true;
            }
            DragState::Hover(_) => self.reset_drag(),
            DragState::Idle => {}
        }

        for e in self.shared.snapshot() {
            let mut w = e.window.lock();
            if !w.contains(p) {
                continue;
            }
            let local = w.to_local(p);
            if let Some(t) = self.edge_target(&w, local) {
                trace!(window = %t.window, axis = ?t.axis, "edge hover");
                self.drag = DragState::Hover(t);
                self.cursor = t.axis.into();
                return true;
            }
            if w.mouse_move(buttons, local) {
                return true;
            }
        }
        false
    }

    /// Resize the dragged window so the dragged edge follows the pointer.
    fn drag_to(&self, t: ResizeTarget, p: Point) {
        let Some(window) = self.shared.get(t.window) else {
            return;
        };
        let mut w = window.lock();
        let mut r = w.rect();
        match (t.axis, t.origin) {
            (Axis::Horizontal, false) => r.w = p.x - r.x,
            (Axis::Horizontal, true) => {
                r.w -= p.x - r.x;
                r.x = p.x;
            }
            (Axis::Vertical, false) => r.h = p.y - r.y,
            (Axis::Vertical, true) => {
                r.h -= p.y - r.y;
                r.y = p.y;
            }
        }
        w.set_rect(r);
    }

    /// Button events: drive the drag state machine, otherwise deliver presses
    /// to the first containing window and releases to every window in order
    /// until one consumes.
    fn route_button(&mut self, button: Button, pressed: bool, p: Point) -> bool {
        match self.drag {
            DragState::Hover(t) => {
                if button == Button::Left && pressed {
                    debug!(window = %t.window, axis = ?t.axis, "drag start");
                    self.drag = DragState::Dragging(t);
                } else if button == Button::Left {
                    self.reset_drag();
                }
                return true;
            }
            DragState::Dragging(t) => {
                if button == Button::Left && !pressed {
                    debug!(window = %t.window, "drag end");
                    self.reset_drag();
                }
                return true;
            }
            DragState::Idle => {}
        }

        let windows = self.shared.snapshot();
        if pressed {
            let Some(hit) = windows.iter().find(|e| e.window.lock().contains(p)) else {
                return false;
            };
            let mut w = hit.window.lock();
            let local = w.to_local(p);
            if button == Button::Left
                && let Some(t) = self.edge_target(&w, local)
            {
                debug!(window = %t.window, axis = ?t.axis, "drag start");
                self.drag = DragState::Dragging(t);
                self.cursor = t.axis.into();
                return true;
            }
            return w.mouse_down(button, local);
        }
        for e in windows {
            let mut w = e.window.lock();
            let local = w.to_local(p);
            if w.mouse_up(button, local) {
                return true;
            }
        }
        false
    }
}
