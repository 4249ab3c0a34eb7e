use serde::{Deserialize, Serialize};

use super::{Point, Rect};

/// An `Expanse` is a rectangle that has a width and height but no location.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Expanse {
    /// Width.
    pub w: f32,
    /// Height.
    pub h: f32,
}

impl Expanse {
    /// Construct an expanse, clamping negative dimensions to zero.
    pub fn new(w: f32, h: f32) -> Self {
        Self {
            w: w.max(0.0),
            h: h.max(0.0),
        }
    }

    /// The area of this expanse.
    pub fn area(&self) -> f32 {
        self.w * self.h
    }

    /// Return a `Rect` with the same dimensions located at the origin.
    pub fn rect(&self) -> Rect {
        Rect::from_origin(Point::zero(), *self)
    }

    /// True if this expanse can completely enclose the target in both dimensions.
    pub fn contains(&self, other: &Self) -> bool {
        self.w >= other.w && self.h >= other.h
    }
}

impl From<Rect> for Expanse {
    fn from(r: Rect) -> Self {
        Self { w: r.w, h: r.h }
    }
}

impl From<(f32, f32)> for Expanse {
    fn from(v: (f32, f32)) -> Self {
        Self::new(v.0, v.1)
    }
}
