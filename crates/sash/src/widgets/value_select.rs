//! A bounded numeric value with a step.

use tracing::warn;

use crate::{
    Context,
    bus::UiEvent,
    event::key::{Key, KeyCode},
    widget::{Behavior, Widget},
};

/// A value constrained to `[min, max]`, adjusted in `step` increments.
///
/// Setters that would produce an inverted range, or a zero step, are
/// rejected and leave the widget unchanged. Changes emit
/// [`UiEvent::RangeChange`] and [`UiEvent::ValueChange`].
#[derive(Debug, Clone, PartialEq)]
pub struct ValueSelect {
    /// Lower bound.
    min: f32,
    /// Upper bound.
    max: f32,
    /// Current value.
    value: f32,
    /// Increment.
    step: f32,
}

impl Default for ValueSelect {
    fn default() -> Self {
        Self::new(0.0, 100.0, 0.0, 1.0)
    }
}

impl ValueSelect {
    /// A selector over `[min, max]`. The value is clamped into range. An
    /// inverted range is swapped and a zero step becomes 1.
    pub fn new(min: f32, max: f32, value: f32, step: f32) -> Self {
        let (min, max) = if min <= max { (min, max) } else { (max, min) };
        Self {
            min,
            max,
            value: value.clamp(min, max),
            step: if step == 0.0 { 1.0 } else { step },
        }
    }

    /// Lower bound.
    pub fn min(&self) -> f32 {
        self.min
    }

    /// Upper bound.
    pub fn max(&self) -> f32 {
        self.max
    }

    /// Current value.
    pub fn value(&self) -> f32 {
        self.value
    }

    /// Increment.
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Publish the current range.
    fn range_changed(&self, ctx: &mut Context<'_>) {
        ctx.emit(UiEvent::RangeChange {
            min: self.min,
            max: self.max,
            value: self.value,
        });
        ctx.refresh();
    }

    /// Set the lower bound. Rejected if above `max`. The value is pulled
    /// up if it falls below the new bound.
    pub fn set_min(&mut self, ctx: &mut Context<'_>, min: f32) -> bool {
        if self.min == min {
            return false;
        }
        if min > self.max {
            warn!(min, max = self.max, "range rejected");
            return false;
        }
        self.min = min;
        if self.value < min {
            self.set_value(ctx, min);
        }
        ctx.resize_children();
        self.range_changed(ctx);
        true
    }

    /// Set the upper bound. Rejected if below `min`. The value is pulled
    /// down if it exceeds the new bound.
    pub fn set_max(&mut self, ctx: &mut Context<'_>, max: f32) -> bool {
        if self.max == max {
            return false;
        }
        if max < self.min {
            warn!(min = self.min, max, "range rejected");
            return false;
        }
        self.max = max;
        if self.value > max {
            self.set_value(ctx, max);
        }
        ctx.resize_children();
        self.range_changed(ctx);
        true
    }

    /// Set the value, clamped into range. Returns true if it changed.
    pub fn set_value(&mut self, ctx: &mut Context<'_>, value: f32) -> bool {
        let previous = self.value;
        let value = value.clamp(self.min, self.max);
        if value == previous {
            return false;
        }
        self.value = value;
        ctx.emit(UiEvent::ValueChange { value, previous });
        ctx.refresh();
        if let Some(p) = ctx.node().and_then(|n| n.parent()) {
            ctx.tree().refresh(p);
        }
        true
    }

    /// Set the increment. A zero step is rejected.
    pub fn set_step(&mut self, ctx: &mut Context<'_>, step: f32) -> bool {
        if self.step == step {
            return false;
        }
        if step == 0.0 {
            warn!("zero step rejected");
            return false;
        }
        self.step = step;
        self.range_changed(ctx);
        true
    }

    /// Move the value up one step.
    pub fn increment(&mut self, ctx: &mut Context<'_>) -> bool {
        self.set_value(ctx, self.value + self.step)
    }

    /// Move the value down one step.
    pub fn decrement(&mut self, ctx: &mut Context<'_>) -> bool {
        self.set_value(ctx, self.value - self.step)
    }
}

impl Widget for ValueSelect {
    fn behavior(&self) -> Behavior {
        Behavior {
            allow_focus: true,
            ..Behavior::default()
        }
    }

    fn on_key_down(&mut self, ctx: &mut Context<'_>, key: Key) -> bool {
        if !key.mods.is_empty() {
            return false;
        }
        match key.code {
            KeyCode::Right | KeyCode::Up => {
                self.increment(ctx);
                true
            }
            KeyCode::Left | KeyCode::Down => {
                self.decrement(ctx);
                true
            }
            KeyCode::Home => {
                self.set_value(ctx, self.min);
                true
            }
            KeyCode::End => {
                self.set_value(ctx, self.max);
                true
            }
            _ => false,
        }
    }
}
