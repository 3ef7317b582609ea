//! Resize handles and pointer cursors for the region selector.

use crate::geometry::{Bounds, Point};
use serde::{Deserialize, Serialize};

/// Default side length of a handle hotspot in pixels.
pub const DEFAULT_HANDLE_SIZE: i32 = 5;

/// One of the eight resize hotspots of a region: four corners and four
/// edge midpoints, named by compass direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Handle {
    NorthWest,
    North,
    NorthEast,
    West,
    East,
    SouthWest,
    South,
    SouthEast,
}

impl Handle {
    /// All handles in hit-test priority order.
    pub const ALL: [Handle; 8] = [
        Handle::NorthWest,
        Handle::North,
        Handle::NorthEast,
        Handle::West,
        Handle::East,
        Handle::SouthWest,
        Handle::South,
        Handle::SouthEast,
    ];

    /// Center of this handle on `region`.
    ///
    /// Midpoints use integer division, matching where the handle is drawn.
    pub fn position(self, region: &Bounds) -> Point {
        let mid_x = region.left + region.width() / 2;
        let mid_y = region.top + region.height() / 2;
        match self {
            Handle::NorthWest => Point::new(region.left, region.top),
            Handle::North => Point::new(mid_x, region.top),
            Handle::NorthEast => Point::new(region.right, region.top),
            Handle::West => Point::new(region.left, mid_y),
            Handle::East => Point::new(region.right, mid_y),
            Handle::SouthWest => Point::new(region.left, region.bottom),
            Handle::South => Point::new(mid_x, region.bottom),
            Handle::SouthEast => Point::new(region.right, region.bottom),
        }
    }

    /// Square hotspot of side `size` centered on the handle.
    pub fn hit_box(self, region: &Bounds, size: i32) -> Bounds {
        let c = self.position(region);
        let half = size / 2;
        Bounds::new(c.x - half, c.y - half, c.x + half, c.y + half)
    }

    /// Mirror across the horizontal axis (top and bottom swap).
    pub fn mirror_vertical(self) -> Self {
        match self {
            Handle::NorthWest => Handle::SouthWest,
            Handle::North => Handle::South,
            Handle::NorthEast => Handle::SouthEast,
            Handle::SouthWest => Handle::NorthWest,
            Handle::South => Handle::North,
            Handle::SouthEast => Handle::NorthEast,
            Handle::West | Handle::East => self,
        }
    }

    /// Mirror across the vertical axis (left and right swap).
    pub fn mirror_horizontal(self) -> Self {
        match self {
            Handle::NorthWest => Handle::NorthEast,
            Handle::West => Handle::East,
            Handle::SouthWest => Handle::SouthEast,
            Handle::NorthEast => Handle::NorthWest,
            Handle::East => Handle::West,
            Handle::SouthEast => Handle::SouthWest,
            Handle::North | Handle::South => self,
        }
    }

    pub fn moves_left(self) -> bool {
        matches!(self, Handle::NorthWest | Handle::West | Handle::SouthWest)
    }

    pub fn moves_right(self) -> bool {
        matches!(self, Handle::NorthEast | Handle::East | Handle::SouthEast)
    }

    pub fn moves_top(self) -> bool {
        matches!(self, Handle::NorthWest | Handle::North | Handle::NorthEast)
    }

    pub fn moves_bottom(self) -> bool {
        matches!(self, Handle::SouthWest | Handle::South | Handle::SouthEast)
    }
}

/// Pointer shape a host should display over the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cursor {
    Crosshair,
    Default,
    Move,
    Resize(Handle),
}

impl Cursor {
    /// CSS cursor keyword, for web hosts.
    pub fn css_name(self) -> &'static str {
        match self {
            Cursor::Crosshair => "crosshair",
            Cursor::Default => "default",
            Cursor::Move => "move",
            Cursor::Resize(Handle::NorthWest) => "nw-resize",
            Cursor::Resize(Handle::North) => "n-resize",
            Cursor::Resize(Handle::NorthEast) => "ne-resize",
            Cursor::Resize(Handle::West) => "w-resize",
            Cursor::Resize(Handle::East) => "e-resize",
            Cursor::Resize(Handle::SouthWest) => "sw-resize",
            Cursor::Resize(Handle::South) => "s-resize",
            Cursor::Resize(Handle::SouthEast) => "se-resize",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_positions() {
        let r = Bounds::new(10, 20, 111, 221);
        assert_eq!(Handle::NorthWest.position(&r), Point::new(10, 20));
        assert_eq!(Handle::North.position(&r), Point::new(60, 20));
        assert_eq!(Handle::East.position(&r), Point::new(111, 120));
        assert_eq!(Handle::SouthEast.position(&r), Point::new(111, 221));
    }

    #[test]
    fn test_hit_box() {
        let r = Bounds::new(10, 20, 110, 220);
        assert_eq!(
            Handle::NorthWest.hit_box(&r, 5),
            Bounds::new(8, 18, 12, 22)
        );
    }

    #[test]
    fn test_mirrors_are_involutions() {
        for h in Handle::ALL {
            assert_eq!(h.mirror_vertical().mirror_vertical(), h);
            assert_eq!(h.mirror_horizontal().mirror_horizontal(), h);
        }
    }

    #[test]
    fn test_mirror_table() {
        assert_eq!(Handle::NorthWest.mirror_vertical(), Handle::SouthWest);
        assert_eq!(Handle::NorthWest.mirror_horizontal(), Handle::NorthEast);
        assert_eq!(
            Handle::NorthWest.mirror_vertical().mirror_horizontal(),
            Handle::SouthEast
        );
        assert_eq!(Handle::North.mirror_horizontal(), Handle::North);
        assert_eq!(Handle::West.mirror_vertical(), Handle::West);
    }

    #[test]
    fn test_edge_flags() {
        assert!(Handle::NorthWest.moves_left() && Handle::NorthWest.moves_top());
        assert!(!Handle::North.moves_left() && !Handle::North.moves_right());
        assert!(Handle::SouthEast.moves_right() && Handle::SouthEast.moves_bottom());
    }

    #[test]
    fn test_css_names() {
        assert_eq!(Cursor::Resize(Handle::SouthWest).css_name(), "sw-resize");
        assert_eq!(Cursor::Move.css_name(), "move");
    }
}
