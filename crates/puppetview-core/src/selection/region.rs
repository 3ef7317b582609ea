//! The crop region drag/resize state machine.

use super::handle::{Cursor, Handle};
use crate::geometry::{Bounds, Point};
use crate::input::Button;
use crate::snapshot::CropRect;

/// A selected screen region. Edges are kept ordered
/// (`left <= right`, `top <= bottom`) and inside the screen.
pub type CropRegion = Bounds;

/// What the pointer is currently doing to the region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPhase {
    /// No button held.
    Idle,
    /// Primary button held after pressing where no region existed.
    CreatingRegion { anchor: Point },
    /// Dragging the whole region.
    MovingRegion { last: Point },
    /// Dragging the edges owned by `handle`.
    Resizing { handle: Handle, last: Point },
}

/// Behavior the next primary press will start, derived from hovering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PendingAction {
    Move,
    Resize(Handle),
}

/// How a selection ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectionOutcome {
    /// The user accepted. `None` when there was nothing worth committing.
    Accepted(Option<CropRect>),
    /// The user backed out.
    Cancelled,
}

/// Interactive region selection over a `screen_width` x `screen_height`
/// snapshot.
#[derive(Debug, Clone)]
pub struct RegionSelector {
    screen_width: i32,
    screen_height: i32,
    handle_size: i32,
    region: Option<CropRegion>,
    phase: DragPhase,
    pending: Option<PendingAction>,
}

impl RegionSelector {
    pub fn new(screen_width: u32, screen_height: u32, handle_size: i32) -> Self {
        Self {
            screen_width: i32::try_from(screen_width).unwrap_or(i32::MAX),
            screen_height: i32::try_from(screen_height).unwrap_or(i32::MAX),
            handle_size: handle_size.max(1),
            region: None,
            phase: DragPhase::Idle,
            pending: None,
        }
    }

    pub fn current_region(&self) -> Option<CropRegion> {
        self.region
    }

    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    pub fn pending(&self) -> Option<PendingAction> {
        self.pending
    }

    pub fn handle_size(&self) -> i32 {
        self.handle_size
    }

    pub fn screen_size(&self) -> (i32, i32) {
        (self.screen_width, self.screen_height)
    }

    /// The handle under `point`, if a region exists and no drag is active.
    pub fn hover_handle(&self, point: Point) -> Option<Handle> {
        let region = self.region?;
        Handle::ALL
            .into_iter()
            .find(|h| h.hit_box(&region, self.handle_size).contains(point))
    }

    /// Poll the pointer: refresh the pending action and report the cursor.
    pub fn hover(&mut self, point: Point) -> Cursor {
        if self.phase == DragPhase::Idle {
            self.pending = match self.region {
                None => None,
                Some(region) => match self.hover_handle(point) {
                    Some(handle) => Some(PendingAction::Resize(handle)),
                    None if region.contains(point) => Some(PendingAction::Move),
                    None => None,
                },
            };
        }
        self.cursor()
    }

    /// Cursor for the current state, without polling the pointer.
    pub fn cursor(&self) -> Cursor {
        match self.phase {
            DragPhase::CreatingRegion { .. } => Cursor::Crosshair,
            DragPhase::MovingRegion { .. } => Cursor::Move,
            DragPhase::Resizing { handle, .. } => Cursor::Resize(handle),
            DragPhase::Idle => match (self.region, self.pending) {
                (None, _) => Cursor::Crosshair,
                (Some(_), None) => Cursor::Default,
                (Some(_), Some(PendingAction::Move)) => Cursor::Move,
                (Some(_), Some(PendingAction::Resize(handle))) => Cursor::Resize(handle),
            },
        }
    }

    /// Primary button pressed at `point`.
    pub fn begin(&mut self, point: Point) {
        if self.phase != DragPhase::Idle {
            return;
        }

        if self.region.is_none() {
            let anchor = self.clamp_to_screen(point);
            self.region = Some(Bounds::from_corners(anchor, anchor));
            self.pending = None;
            self.phase = DragPhase::CreatingRegion { anchor };
            log::debug!("selection: creating region at ({}, {})", anchor.x, anchor.y);
            return;
        }

        self.hover(point);
        self.phase = match self.pending {
            Some(PendingAction::Move) => DragPhase::MovingRegion { last: point },
            Some(PendingAction::Resize(handle)) => DragPhase::Resizing {
                handle,
                last: point,
            },
            None => DragPhase::Idle,
        };
    }

    /// Pointer moved to `point` with the primary button held.
    pub fn drag(&mut self, point: Point) {
        match self.phase {
            DragPhase::Idle => {}
            DragPhase::CreatingRegion { anchor } => {
                self.region = Some(Bounds::from_corners(anchor, self.clamp_to_screen(point)));
            }
            DragPhase::MovingRegion { last } => {
                if let Some(region) = self.region {
                    self.region = Some(self.translate_clamped(region, point.x - last.x, point.y - last.y));
                }
                self.phase = DragPhase::MovingRegion { last: point };
            }
            DragPhase::Resizing { handle, last } => {
                let Some(region) = self.region else {
                    self.phase = DragPhase::Idle;
                    return;
                };
                let (resized, handle) =
                    self.resize_clamped(region, handle, point.x - last.x, point.y - last.y);
                self.region = Some(resized);
                self.phase = DragPhase::Resizing {
                    handle,
                    last: point,
                };
            }
        }
    }

    /// A button was released at `point`.
    ///
    /// Returns `Some(Cancelled)` when a secondary release with no region
    /// ends the session.
    pub fn release(&mut self, button: Button, point: Point) -> Option<SelectionOutcome> {
        match button {
            Button::Primary => {
                if let DragPhase::CreatingRegion { anchor } = self.phase {
                    let region = Bounds::from_corners(anchor, self.clamp_to_screen(point));
                    if region.is_degenerate() {
                        log::debug!("selection: discarded zero-area region");
                        self.region = None;
                    } else {
                        self.region = Some(region);
                    }
                }
                self.phase = DragPhase::Idle;
                None
            }
            Button::Secondary => {
                self.phase = DragPhase::Idle;
                self.pending = None;
                if self.region.take().is_some() {
                    log::debug!("selection: region cleared");
                    None
                } else {
                    Some(SelectionOutcome::Cancelled)
                }
            }
            Button::Middle => None,
        }
    }

    /// A completed click. A primary double click on an existing region
    /// accepts it.
    pub fn click(&mut self, button: Button, count: u32) -> Option<SelectionOutcome> {
        if button == Button::Primary
            && count == 2
            && self.region.is_some()
            && self.phase == DragPhase::Idle
        {
            Some(self.key_accept())
        } else {
            None
        }
    }

    /// Enter pressed: accept whatever region exists.
    pub fn key_accept(&self) -> SelectionOutcome {
        SelectionOutcome::Accepted(self.committed())
    }

    /// Escape pressed.
    pub fn key_cancel(&self) -> SelectionOutcome {
        SelectionOutcome::Cancelled
    }

    /// The region as a crop rectangle, or `None` when absent or zero-area.
    pub fn committed(&self) -> Option<CropRect> {
        let region = self.region.filter(|r| !r.is_degenerate())?;
        Some(CropRect::new(
            u32::try_from(region.left).ok()?,
            u32::try_from(region.top).ok()?,
            u32::try_from(region.width()).ok()?,
            u32::try_from(region.height()).ok()?,
        ))
    }

    fn clamp_to_screen(&self, p: Point) -> Point {
        Point::new(p.x.clamp(0, self.screen_width), p.y.clamp(0, self.screen_height))
    }

    /// Move `region` by `(dx, dy)`, stopping each axis at the screen edge
    /// without changing the region size.
    fn translate_clamped(&self, region: CropRegion, dx: i32, dy: i32) -> CropRegion {
        let (left, right) = shift_span(region.left, region.right, dx, self.screen_width);
        let (top, bottom) = shift_span(region.top, region.bottom, dy, self.screen_height);
        Bounds::new(left, top, right, bottom)
    }

    /// Move the edges owned by `handle`, fix up inverted pairs and clamp.
    ///
    /// Returns the new region together with the handle that now sits under
    /// the pointer.
    fn resize_clamped(
        &self,
        region: CropRegion,
        mut handle: Handle,
        dx: i32,
        dy: i32,
    ) -> (CropRegion, Handle) {
        let mut r = region;
        if handle.moves_left() {
            r.left += dx;
        }
        if handle.moves_right() {
            r.right += dx;
        }
        if handle.moves_top() {
            r.top += dy;
        }
        if handle.moves_bottom() {
            r.bottom += dy;
        }

        if r.top > r.bottom {
            std::mem::swap(&mut r.top, &mut r.bottom);
            handle = handle.mirror_vertical();
        }
        if r.left > r.right {
            std::mem::swap(&mut r.left, &mut r.right);
            handle = handle.mirror_horizontal();
        }

        r.left = r.left.max(0);
        r.top = r.top.max(0);
        r.right = r.right.min(self.screen_width);
        r.bottom = r.bottom.min(self.screen_height);
        (r, handle)
    }
}

/// Shift the span `[lo, hi]` by `delta`, keeping it within `[0, limit]`.
fn shift_span(lo: i32, hi: i32, delta: i32, limit: i32) -> (i32, i32) {
    let (new_lo, new_hi) = (lo + delta, hi + delta);
    if new_lo < 0 {
        (0, hi - lo)
    } else if new_hi > limit {
        (lo + limit - hi, limit)
    } else {
        (new_lo, new_hi)
    }
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    const W: u32 = 320;
    const H: u32 = 240;

    #[derive(Debug, Clone)]
    enum Step {
        Press(Point),
        Drag(Point),
        Release(Point),
        Secondary,
        Hover(Point),
    }

    fn point_strategy() -> impl Strategy<Value = Point> {
        (-100i32..420, -100i32..340).prop_map(|(x, y)| Point::new(x, y))
    }

    fn step_strategy() -> impl Strategy<Value = Step> {
        prop_oneof![
            point_strategy().prop_map(Step::Press),
            point_strategy().prop_map(Step::Drag),
            point_strategy().prop_map(Step::Drag),
            point_strategy().prop_map(Step::Release),
            Just(Step::Secondary),
            point_strategy().prop_map(Step::Hover),
        ]
    }

    fn in_screen(r: &CropRegion) -> bool {
        0 <= r.left
            && r.left <= r.right
            && r.right <= W as i32
            && 0 <= r.top
            && r.top <= r.bottom
            && r.bottom <= H as i32
    }

    proptest! {
        /// Property: the region stays ordered and on screen for any input sequence.
        #[test]
        fn prop_region_stays_in_screen(steps in prop::collection::vec(step_strategy(), 1..60)) {
            let mut sel = RegionSelector::new(W, H, 5);
            for step in steps {
                match step {
                    Step::Press(p) => sel.begin(p),
                    Step::Drag(p) => sel.drag(p),
                    Step::Release(p) => { sel.release(Button::Primary, p); }
                    Step::Secondary => { sel.release(Button::Secondary, Point::default()); }
                    Step::Hover(p) => { sel.hover(p); }
                }
                if let Some(r) = sel.current_region() {
                    prop_assert!(in_screen(&r), "region out of bounds: {:?}", r);
                }
            }
        }

        /// Property: an idle region is never zero-area after a primary release.
        #[test]
        fn prop_released_region_nonzero(
            a in point_strategy(),
            b in point_strategy(),
        ) {
            let mut sel = RegionSelector::new(W, H, 5);
            sel.begin(a);
            sel.drag(b);
            sel.release(Button::Primary, b);
            if let Some(r) = sel.current_region() {
                prop_assert!(!r.is_degenerate());
                prop_assert!(sel.committed().is_some());
            }
        }

        /// Property: every inversion maps the handle to its documented mirror,
        /// and dragging on moves only the edges that handle now owns.
        #[test]
        fn prop_inversion_remaps_to_mirror(
            handle_idx in 0usize..8,
            dx in -150i32..150,
            dy in -150i32..150,
            grow in 1i32..50,
        ) {
            let handle = Handle::ALL[handle_idx];
            let mut sel = RegionSelector::new(1000, 1000, 5);
            sel.begin(Point::new(400, 400));
            sel.drag(Point::new(500, 500));
            sel.release(Button::Primary, Point::new(500, 500));

            let region = sel.current_region().unwrap();
            let start = handle.position(&region);
            sel.begin(start);
            sel.drag(start.offset(dx, dy));

            let mut expected = handle;
            if handle.moves_top() && 400 + dy > 500 || handle.moves_bottom() && 500 + dy < 400 {
                expected = expected.mirror_vertical();
            }
            if handle.moves_left() && 400 + dx > 500 || handle.moves_right() && 500 + dx < 400 {
                expected = expected.mirror_horizontal();
            }
            match sel.phase() {
                DragPhase::Resizing { handle: active, .. } => prop_assert_eq!(active, expected),
                other => prop_assert!(false, "unexpected phase {:?}", other),
            }

            // Push the active edges outward so the drag cannot invert again.
            let before = sel.current_region().unwrap();
            let ex = if expected.moves_left() { -grow } else { grow };
            let ey = if expected.moves_top() { -grow } else { grow };
            sel.drag(start.offset(dx + ex, dy + ey));
            let after = sel.current_region().unwrap();

            let shift = |owned: bool, d: i32| if owned { d } else { 0 };
            prop_assert_eq!(after.left, before.left + shift(expected.moves_left(), ex));
            prop_assert_eq!(after.right, before.right + shift(expected.moves_right(), ex));
            prop_assert_eq!(after.top, before.top + shift(expected.moves_top(), ey));
            prop_assert_eq!(after.bottom, before.bottom + shift(expected.moves_bottom(), ey));
        }
    }
}
