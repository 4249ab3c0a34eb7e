use serde::{Deserialize, Serialize};

use super::{Error, Expanse, Point, Result};

/// An axis-aligned rectangle. The origin is the corner with the smallest
/// coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Origin x.
    pub x: f32,
    /// Origin y.
    pub y: f32,
    /// Width.
    pub w: f32,
    /// Height.
    pub h: f32,
}

impl Rect {
    /// Construct a rectangle from coordinates and size. No clamping is applied.
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Construct a rectangle, rejecting non-finite values and negative sizes.
    pub fn try_new(x: f32, y: f32, w: f32, h: f32) -> Result<Self> {
        if !(x.is_finite() && y.is_finite() && w.is_finite() && h.is_finite()) {
            return Err(Error::Geometry(format!(
                "non-finite rect ({x}, {y}, {w}, {h})"
            )));
        }
        if w < 0.0 || h < 0.0 {
            return Err(Error::Geometry(format!("negative size {w}x{h}")));
        }
        Ok(Self { x, y, w, h })
    }

    /// Construct a rectangle from an origin and a size.
    pub fn from_origin(origin: Point, size: Expanse) -> Self {
        Self {
            x: origin.x,
            y: origin.y,
            w: size.w,
            h: size.h,
        }
    }

    /// A zero-sized rectangle at the origin.
    pub fn zero() -> Self {
        Self::default()
    }

    /// The origin corner.
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// The size of the rectangle.
    pub fn size(&self) -> Expanse {
        Expanse {
            w: self.w,
            h: self.h,
        }
    }

    /// The far x edge.
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    /// The far y edge.
    pub fn top(&self) -> f32 {
        self.y + self.h
    }

    /// The center point.
    pub fn center(&self) -> Point {
        Point::new(self.x + self.w / 2.0, self.y + self.h / 2.0)
    }

    /// Does this rect have a zero or negative extent on either axis?
    pub fn is_empty(&self) -> bool {
        self.w <= 0.0 || self.h <= 0.0
    }

    /// Is the point inside the rectangle? The far edges are exclusive.
    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && y >= self.y && x < self.right() && y < self.top()
    }

    /// Is the point inside the rectangle?
    pub fn contains_point(&self, p: Point) -> bool {
        self.contains(p.x, p.y)
    }

    /// Do the two rectangles overlap?
    pub fn intersects(&self, other: &Self) -> bool {
        self.x < other.right()
            && self.y < other.top()
            && other.x < self.right()
            && other.y < self.top()
    }

    /// The overlapping region of two rectangles, if any.
    pub fn intersect(&self, other: &Self) -> Option<Self> {
        if !self.intersects(other) {
            return None;
        }
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        Some(Self::new(
            x,
            y,
            self.right().min(other.right()) - x,
            self.top().min(other.top()) - y,
        ))
    }

    /// Shift the rectangle by an offset.
    pub fn translate(&self, dx: f32, dy: f32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..*self
        }
    }

    /// Return a copy with negative dimensions clamped to zero.
    pub fn clamped(&self) -> Self {
        Self {
            w: self.w.max(0.0),
            h: self.h.max(0.0),
            ..*self
        }
    }

    /// Return a copy with the size reduced to fit within `max`.
    pub fn clamp_size(&self, max: Expanse) -> Self {
        Self {
            w: self.w.min(max.w),
            h: self.h.min(max.h),
            ..*self
        }
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn contains_is_half_open() {
        let r = Rect::new(0.0, 0.0, 100.0, 50.0);
        assert!(r.contains(0.0, 0.0));
        assert!(r.contains(99.5, 49.0));
        assert!(!r.contains(100.0, 10.0));
        assert!(!r.contains(10.0, 50.0));
        assert!(!r.contains(-0.1, 10.0));
    }

    #[test]
    fn intersect() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 10.0, 10.0);
        assert_eq!(a.intersect(&b), Some(Rect::new(5.0, 5.0, 5.0, 5.0)));
        assert_eq!(a.intersect(&Rect::new(10.0, 0.0, 5.0, 5.0)), None);
    }

    #[test]
    fn try_new_rejects_bad_values() {
        assert!(Rect::try_new(0.0, 0.0, -1.0, 1.0).is_err());
        assert!(Rect::try_new(f32::NAN, 0.0, 1.0, 1.0).is_err());
        assert_eq!(
            Rect::try_new(1.0, 2.0, 3.0, 4.0),
            Ok(Rect::new(1.0, 2.0, 3.0, 4.0))
        );
    }

    #[test]
    fn clamping() {
        let r = Rect::new(1.0, 1.0, -5.0, 3.0).clamped();
        assert_eq!(r, Rect::new(1.0, 1.0, 0.0, 3.0));
        assert!(r.is_empty());
        let r = Rect::new(0.0, 0.0, 20.0, 5.0).clamp_size(Expanse::new(10.0, 10.0));
        assert_eq!(r.size(), Expanse::new(10.0, 5.0));
    }

    proptest! {
        #[test]
        fn translate_preserves_containment(
            x in -100.0f32..100.0,
            y in -100.0f32..100.0,
            w in 1.0f32..100.0,
            h in 1.0f32..100.0,
            dx in -50.0f32..50.0,
            dy in -50.0f32..50.0,
        ) {
            let r = Rect::new(x, y, w, h);
            let c = r.center();
            prop_assert!(r.contains_point(c));
            let moved = r.translate(dx, dy);
            prop_assert_eq!(moved.size(), r.size());
        }
    }
}
