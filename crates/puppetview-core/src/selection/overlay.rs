//! What a host paints on top of the frozen snapshot each repaint tick.

use super::handle::{Cursor, Handle};
use super::region::{CropRegion, RegionSelector};
use crate::geometry::Bounds;
use serde::Serialize;

/// Alpha of the dimming layer drawn outside the region (0.4 * 255).
pub const SHADE_ALPHA: u8 = 102;

/// Region border and handle color.
pub const ACCENT_COLOR: [u8; 3] = [0, 174, 255];

/// Render description for one overlay frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverlayFrame {
    pub region: Option<CropRegion>,
    /// Four dimmed bands around the region: above, left, right, below.
    pub shades: Vec<Bounds>,
    /// Handle squares, in [`Handle::ALL`] order.
    pub handles: Vec<Bounds>,
    pub cursor: Cursor,
    /// Outline and handle color.
    pub accent: [u8; 3],
    /// Alpha of the dimmed bands.
    pub shade_alpha: u8,
}

impl OverlayFrame {
    pub fn from_selector(selector: &RegionSelector) -> Self {
        let (w, h) = selector.screen_size();
        let Some(r) = selector.current_region() else {
            return Self {
                region: None,
                shades: Vec::new(),
                handles: Vec::new(),
                cursor: selector.cursor(),
                accent: ACCENT_COLOR,
                shade_alpha: SHADE_ALPHA,
            };
        };

        let shades = vec![
            Bounds::new(0, 0, w, r.top),
            Bounds::new(0, r.top, r.left, r.bottom),
            Bounds::new(r.right, r.top, w, r.bottom),
            Bounds::new(0, r.bottom, w, h),
        ];
        let size = selector.handle_size();
        let handles = Handle::ALL
            .iter()
            .map(|handle| {
                let c = handle.position(&r);
                let (x, y) = (c.x - size / 2, c.y - size / 2);
                Bounds::new(x, y, x + size, y + size)
            })
            .collect();

        Self {
            region: Some(r),
            shades,
            handles,
            cursor: selector.cursor(),
            accent: ACCENT_COLOR,
            shade_alpha: SHADE_ALPHA,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;
    use crate::input::Button;

    #[test]
    fn test_empty_frame() {
        let sel = RegionSelector::new(200, 100, 5);
        let frame = OverlayFrame::from_selector(&sel);
        assert!(frame.region.is_none());
        assert!(frame.shades.is_empty());
        assert_eq!(frame.cursor, Cursor::Crosshair);
    }

    #[test]
    fn test_shades_surround_region() {
        let mut sel = RegionSelector::new(200, 100, 5);
        sel.begin(Point::new(20, 10));
        sel.drag(Point::new(120, 60));
        sel.release(Button::Primary, Point::new(120, 60));

        let frame = OverlayFrame::from_selector(&sel);
        assert_eq!(
            frame.shades,
            vec![
                Bounds::new(0, 0, 200, 10),
                Bounds::new(0, 10, 20, 60),
                Bounds::new(120, 10, 200, 60),
                Bounds::new(0, 60, 200, 100),
            ]
        );
        assert_eq!(frame.handles.len(), 8);
        assert_eq!(frame.handles[0], Bounds::new(18, 8, 23, 13));
        assert_eq!(frame.accent, [0, 174, 255]);
        assert_eq!(frame.shade_alpha, 102);
    }
}
