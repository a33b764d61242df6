//! Plain geometry used by the overlay (UIKit coordinates, origin top-left).

use crate::clamp;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn offset(self, by: Point) -> Point {
        Point::new(self.x + by.x, self.y + by.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

impl Size {
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub const fn square(side: f64) -> Self {
        Self::new(side, side)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub origin: Point,
    pub size: Size,
}

impl Rect {
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            origin: Point::new(x, y),
            size: Size::new(width, height),
        }
    }

    pub const fn from_parts(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    pub fn min_x(&self) -> f64 {
        self.origin.x
    }

    pub fn min_y(&self) -> f64 {
        self.origin.y
    }

    pub fn max_x(&self) -> f64 {
        self.origin.x + self.size.width
    }

    pub fn max_y(&self) -> f64 {
        self.origin.y + self.size.height
    }

    pub fn mid_x(&self) -> f64 {
        self.origin.x + self.size.width / 2.0
    }

    /// A rect with no area (or a non-finite one) cannot host the overlay.
    pub fn is_empty(&self) -> bool {
        !(self.size.width.is_finite() && self.size.height.is_finite())
            || self.size.width <= 0.0
            || self.size.height <= 0.0
    }

    /// True if `other` lies completely inside `self`.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.min_x() >= self.min_x()
            && other.min_y() >= self.min_y()
            && other.max_x() <= self.max_x()
            && other.max_y() <= self.max_y()
    }

    /// Shrink by `margin` on every side, or `None` if nothing would be left.
    pub fn inset(&self, margin: f64) -> Option<Rect> {
        let r = Rect::new(
            self.origin.x + margin,
            self.origin.y + margin,
            self.size.width - 2.0 * margin,
            self.size.height - 2.0 * margin,
        );
        if r.is_empty() {
            None
        } else {
            Some(r)
        }
    }

    pub fn with_origin(&self, origin: Point) -> Rect {
        Rect::from_parts(origin, self.size)
    }
}

/// Clamp one axis so that `[pos, pos + len]` stays inside `[lo, hi]`.
///
/// A span longer than the range is pinned to `lo`.
fn clamp_axis(pos: f64, len: f64, lo: f64, hi: f64) -> f64 {
    let upper = hi - len;
    if upper < lo {
        lo
    } else {
        clamp(pos, lo, upper)
    }
}

/// Move `frame` so it lies inside `bounds`, keeping `margin` from the edges
/// when the bounds are large enough for that.
pub fn clamp_into(frame: Rect, bounds: Rect, margin: f64) -> Rect {
    let area = bounds
        .inset(margin)
        .filter(|r| r.size.width >= frame.size.width && r.size.height >= frame.size.height)
        .unwrap_or(bounds);
    let x = if frame.origin.x.is_finite() {
        frame.origin.x
    } else {
        area.min_x()
    };
    let y = if frame.origin.y.is_finite() {
        frame.origin.y
    } else {
        area.min_y()
    };
    frame.with_origin(Point::new(
        clamp_axis(x, frame.size.width, area.min_x(), area.max_x()),
        clamp_axis(y, frame.size.height, area.min_y(), area.max_y()),
    ))
}

/// Push an already clamped frame to whichever vertical edge of `bounds` its
/// centre is closest to.
pub fn snap_to_side(frame: Rect, bounds: Rect, margin: f64) -> Rect {
    let left = Rect::new(bounds.min_x(), frame.origin.y, frame.size.width, frame.size.height);
    let right = Rect::new(
        bounds.max_x() - frame.size.width,
        frame.origin.y,
        frame.size.width,
        frame.size.height,
    );
    let target = if frame.mid_x() < bounds.mid_x() { left } else { right };
    clamp_into(target, bounds, margin)
}

/// Where a freshly attached button goes: right edge, a third of the way down.
pub fn initial_frame(bounds: Rect, size: Size, margin: f64, vertical_fraction: f64) -> Rect {
    let frame = Rect::from_parts(
        Point::new(
            bounds.max_x() - size.width - margin,
            bounds.min_y() + bounds.size.height * vertical_fraction,
        ),
        size,
    );
    clamp_into(frame, bounds, margin)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCREEN: Rect = Rect::new(0.0, 0.0, 390.0, 844.0);

    #[test]
    fn test_empty_rects() {
        assert!(Rect::new(0.0, 0.0, 0.0, 10.0).is_empty());
        assert!(Rect::new(0.0, 0.0, 10.0, -1.0).is_empty());
        assert!(Rect::new(0.0, 0.0, f64::NAN, 10.0).is_empty());
        assert!(!SCREEN.is_empty());
    }

    #[test]
    fn test_clamp_into_pulls_back_from_every_side() {
        let size = Size::square(56.0);
        for origin in [
            Point::new(-500.0, 10.0),
            Point::new(10.0, -500.0),
            Point::new(5000.0, 100.0),
            Point::new(100.0, 5000.0),
            Point::new(-1.0e9, 1.0e9),
        ] {
            let clamped = clamp_into(Rect::from_parts(origin, size), SCREEN, 8.0);
            assert!(SCREEN.contains_rect(&clamped), "{origin:?} -> {clamped:?}");
        }
    }

    #[test]
    fn test_clamp_into_keeps_inner_frame() {
        let frame = Rect::new(100.0, 200.0, 56.0, 56.0);
        assert_eq!(clamp_into(frame, SCREEN, 8.0), frame);
    }

    #[test]
    fn test_clamp_into_ignores_margin_when_too_tight() {
        let tiny = Rect::new(0.0, 0.0, 60.0, 60.0);
        let clamped = clamp_into(Rect::new(30.0, 30.0, 56.0, 56.0), tiny, 8.0);
        assert!(tiny.contains_rect(&clamped));
    }

    #[test]
    fn test_clamp_into_oversized_frame_pins_to_origin() {
        let tiny = Rect::new(10.0, 20.0, 30.0, 30.0);
        let clamped = clamp_into(Rect::new(50.0, 50.0, 56.0, 56.0), tiny, 0.0);
        assert_eq!(clamped.origin, Point::new(10.0, 20.0));
    }

    #[test]
    fn test_clamp_into_non_finite_origin() {
        let clamped = clamp_into(Rect::new(f64::NAN, f64::INFINITY, 56.0, 56.0), SCREEN, 8.0);
        assert!(SCREEN.contains_rect(&clamped));
    }

    #[test]
    fn test_snap_to_side() {
        let left = snap_to_side(Rect::new(60.0, 300.0, 56.0, 56.0), SCREEN, 8.0);
        assert_eq!(left.origin, Point::new(8.0, 300.0));

        let right = snap_to_side(Rect::new(300.0, 300.0, 56.0, 56.0), SCREEN, 8.0);
        assert_eq!(right.origin, Point::new(390.0 - 56.0 - 8.0, 300.0));
    }

    #[test]
    fn test_initial_frame_is_inside() {
        let frame = initial_frame(SCREEN, Size::square(56.0), 8.0, 0.33);
        assert!(SCREEN.contains_rect(&frame));
        assert_eq!(frame.max_x(), 390.0 - 8.0);
    }
}
