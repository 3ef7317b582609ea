//! Geometry kernel: integer points, rotated rectangles and inset polygons.
//!
//! Everything here is pure. Coordinates follow screen conventions: the
//! origin is the top-left corner and `y` grows downwards, so a positive
//! rotation angle turns clockwise on screen.

use serde::{Deserialize, Serialize};

/// A point in integer screen (or window-local) coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Offset this point by `(dx, dy)`.
    #[inline]
    pub fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

/// Four vertices of a (possibly rotated) rectangle, in drawing order.
pub type Quad = [Point; 4];

/// Axis-aligned bounds given by their four edges.
///
/// `right` and `bottom` are exclusive when the bounds describe a pixel area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Bounds {
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Bounds of the box spanned by two arbitrary corner points.
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            left: a.x.min(b.x),
            top: a.y.min(b.y),
            right: a.x.max(b.x),
            bottom: a.y.max(b.y),
        }
    }

    #[inline]
    pub fn width(&self) -> i32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// True when either dimension is zero (or negative).
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }

    /// Inclusive containment test: points on the edges count as inside.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= self.left && p.x <= self.right && p.y >= self.top && p.y <= self.bottom
    }
}

/// Rotate `(x, y)` about the origin and round the result to whole pixels.
///
/// The angle is passed as its precomputed sine and cosine so callers
/// rotating several corners only evaluate the trig functions once.
#[inline]
pub fn rotate_point(x: f64, y: f64, sin: f64, cos: f64) -> Point {
    Point::new(
        (x * cos - y * sin).round() as i32,
        (x * sin + y * cos).round() as i32,
    )
}

/// Compute the axis-aligned bounding box of four points.
pub fn bounding_box(points: &Quad) -> Bounds {
    let mut bounds = Bounds::new(points[0].x, points[0].y, points[0].x, points[0].y);
    for p in &points[1..] {
        bounds.left = bounds.left.min(p.x);
        bounds.top = bounds.top.min(p.y);
        bounds.right = bounds.right.max(p.x);
        bounds.bottom = bounds.bottom.max(p.y);
    }
    bounds
}

/// Translate every vertex of a quad by `(dx, dy)`.
pub fn translate_quad(points: &Quad, dx: i32, dy: i32) -> Quad {
    points.map(|p| p.offset(dx, dy))
}

/// Shrink a polygon by one unit toward `center`.
///
/// Each coordinate lying strictly past the center on its axis moves one unit
/// back toward it; coordinates at or before the center stay put. Outlines
/// stroked along the result therefore stay inside a clip shape built from
/// the original vertices.
pub fn inset_polygon(points: &Quad, center: (f64, f64)) -> Quad {
    points.map(|p| Point::new(shrink_toward(p.x, center.0), shrink_toward(p.y, center.1)))
}

#[inline]
fn shrink_toward(value: i32, boundary: f64) -> i32 {
    if f64::from(value) > boundary {
        value - 1
    } else {
        value
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn quad_strategy() -> impl Strategy<Value = Quad> {
        prop::array::uniform4((-2000i32..2000, -2000i32..2000).prop_map(|(x, y)| Point::new(x, y)))
    }

    proptest! {
        /// Property: every vertex lies inside its bounding box.
        #[test]
        fn prop_bounding_box_contains_vertices(quad in quad_strategy()) {
            let bounds = bounding_box(&quad);
            for p in quad {
                prop_assert!(bounds.contains(p));
            }
        }

        /// Property: inset moves each coordinate by at most one unit, never away from center.
        #[test]
        fn prop_inset_never_grows(
            quad in quad_strategy(),
            cx in -2000.0f64..2000.0,
            cy in -2000.0f64..2000.0,
        ) {
            let inset = inset_polygon(&quad, (cx, cy));
            for (before, after) in quad.iter().zip(inset.iter()) {
                prop_assert!(before.x - after.x == 0 || before.x - after.x == 1);
                prop_assert!(before.y - after.y == 0 || before.y - after.y == 1);
            }
        }

        /// Property: rotation preserves distance from origin within rounding.
        #[test]
        fn prop_rotation_preserves_radius(
            x in -1000.0f64..1000.0,
            y in -1000.0f64..1000.0,
            deg in 0i32..360,
        ) {
            let rad = f64::from(deg).to_radians();
            let p = rotate_point(x, y, rad.sin(), rad.cos());
            let before = (x * x + y * y).sqrt();
            let after = (f64::from(p.x).powi(2) + f64::from(p.y).powi(2)).sqrt();
            prop_assert!((before - after).abs() <= 1.0);
        }
    }
}
