//! Geometry primitives shared by the layout engine, the compositor and the view adapter
//!
//! View coordinates are integer pixels with the origin at the top-left corner of a block
//! view. Workspace coordinates are the model's absolute coordinate space.
//!
//! All layout code computes bounds in left-to-right coordinates. Right-to-left output is
//! produced by mirroring about the block's view width, exactly once, when a bound or point
//! is finalized.

use std::ops::{Add, Sub};

/// A point in view (pixel) coordinates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ViewPoint {
    pub x: i32,
    pub y: i32,
}

impl ViewPoint {
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Mirror the horizontal coordinate about a view of the given width
    pub fn mirrored(self, view_width: i32) -> Self {
        Self::new(view_width - self.x, self.y)
    }

    /// Mirror only when `rtl` is set
    pub fn flip_if(self, rtl: bool, view_width: i32) -> Self {
        if rtl {
            self.mirrored(view_width)
        } else {
            self
        }
    }
}

impl Add for ViewPoint {
    type Output = ViewPoint;

    fn add(self, rhs: ViewPoint) -> ViewPoint {
        ViewPoint::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for ViewPoint {
    type Output = ViewPoint;

    fn sub(self, rhs: ViewPoint) -> ViewPoint {
        ViewPoint::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// A width/height pair in view pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ViewSize {
    pub width: i32,
    pub height: i32,
}

impl ViewSize {
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub fn zero() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

/// An edge-based rectangle in view coordinates (`right` and `bottom` are exclusive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ViewRect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl ViewRect {
    pub fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Create a rectangle from its origin and size
    pub fn from_size(left: i32, top: i32, width: i32, height: i32) -> Self {
        Self::new(left, top, left + width, top + height)
    }

    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    pub fn origin(&self) -> ViewPoint {
        ViewPoint::new(self.left, self.top)
    }

    /// True if the rectangle covers no area
    pub fn is_empty(&self) -> bool {
        self.right <= self.left || self.bottom <= self.top
    }

    /// Check whether a point lies inside the rectangle, edges included
    pub fn contains(&self, point: ViewPoint) -> bool {
        point.x >= self.left && point.x <= self.right && point.y >= self.top && point.y <= self.bottom
    }

    /// Mirror the horizontal extent about a view of the given width
    ///
    /// Mirroring twice with the same width yields the original rectangle.
    pub fn mirrored(self, view_width: i32) -> Self {
        Self::new(
            view_width - self.right,
            self.top,
            view_width - self.left,
            self.bottom,
        )
    }

    /// Mirror only when `rtl` is set
    pub fn flip_if(self, rtl: bool, view_width: i32) -> Self {
        if rtl {
            self.mirrored(view_width)
        } else {
            self
        }
    }

    /// Translate the rectangle by a view offset
    pub fn offset(self, by: ViewPoint) -> Self {
        Self::new(
            self.left + by.x,
            self.top + by.y,
            self.right + by.x,
            self.bottom + by.y,
        )
    }

    /// Smallest rectangle containing both
    pub fn union(&self, other: &ViewRect) -> ViewRect {
        ViewRect::new(
            self.left.min(other.left),
            self.top.min(other.top),
            self.right.max(other.right),
            self.bottom.max(other.bottom),
        )
    }
}

/// A point in workspace (model) coordinates
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WorkspacePoint {
    pub x: f64,
    pub y: f64,
}

impl WorkspacePoint {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point
    pub fn distance_to(&self, other: WorkspacePoint) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl Add for WorkspacePoint {
    type Output = WorkspacePoint;

    fn add(self, rhs: WorkspacePoint) -> WorkspacePoint {
        WorkspacePoint::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for WorkspacePoint {
    type Output = WorkspacePoint;

    fn sub(self, rhs: WorkspacePoint) -> WorkspacePoint {
        WorkspacePoint::new(self.x - rhs.x, self.y - rhs.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_edges() {
        let r = ViewRect::from_size(10, 20, 100, 50);
        assert_eq!(r.right, 110);
        assert_eq!(r.bottom, 70);
        assert_eq!(r.width(), 100);
        assert_eq!(r.height(), 50);
    }

    #[test]
    fn test_rect_mirror() {
        let r = ViewRect::new(10, 0, 50, 20);
        assert_eq!(r.mirrored(200), ViewRect::new(150, 0, 190, 20));
    }

    #[test]
    fn test_rect_mirror_twice_is_identity() {
        let r = ViewRect::new(-4, 3, 77, 19);
        for width in [0, 1, 64, 200, 513] {
            assert_eq!(r.mirrored(width).mirrored(width), r);
        }
    }

    #[test]
    fn test_point_mirror_twice_is_identity() {
        let p = ViewPoint::new(37, 12);
        assert_eq!(p.mirrored(120), ViewPoint::new(83, 12));
        assert_eq!(p.mirrored(120).mirrored(120), p);
        assert_eq!(p.flip_if(false, 120), p);
    }

    #[test]
    fn test_rect_contains() {
        let r = ViewRect::new(0, 0, 100, 100);
        assert!(r.contains(ViewPoint::new(50, 50)));
        assert!(r.contains(ViewPoint::new(100, 100)));
        assert!(!r.contains(ViewPoint::new(-1, 50)));
        assert!(!r.contains(ViewPoint::new(101, 50)));
    }

    #[test]
    fn test_rect_empty() {
        assert!(ViewRect::new(5, 5, 5, 10).is_empty());
        assert!(ViewRect::new(5, 10, 8, 4).is_empty());
        assert!(!ViewRect::new(0, 0, 1, 1).is_empty());
    }

    #[test]
    fn test_rect_union() {
        let a = ViewRect::new(0, 0, 50, 50);
        let b = ViewRect::new(100, 100, 150, 150);
        assert_eq!(a.union(&b), ViewRect::new(0, 0, 150, 150));
    }

    #[test]
    fn test_workspace_point_arithmetic() {
        let a = WorkspacePoint::new(3.0, 4.0);
        let b = WorkspacePoint::new(1.0, 1.0);
        assert_eq!(a + b, WorkspacePoint::new(4.0, 5.0));
        assert_eq!(a - b, WorkspacePoint::new(2.0, 3.0));
        assert_eq!(WorkspacePoint::default().distance_to(a), 5.0);
    }
}
