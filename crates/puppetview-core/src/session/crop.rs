//! Screenshot cropping session.

use super::{capture_once, RepaintTimer, ScreenCapture, SessionError, SessionStatus};
use crate::geometry::Point;
use crate::input::{Button, Key};
use crate::selection::{Cursor, OverlayFrame, RegionSelector, SelectionOutcome};
use crate::settings::Settings;
use crate::snapshot::{extract_region, Snapshot};

/// Region selection over a frozen screen snapshot.
///
/// `on_result` receives the cropped pixels when the user accepts a
/// non-empty region. It is never called on cancel, or when the accepted
/// region has zero area.
pub struct CropSession<F>
where
    F: FnOnce(Snapshot),
{
    snapshot: Snapshot,
    selector: RegionSelector,
    timer: RepaintTimer,
    on_result: Option<F>,
    status: SessionStatus,
}

impl<F> CropSession<F>
where
    F: FnOnce(Snapshot),
{
    /// Capture the screen and start selecting.
    pub fn start<C>(capture: &mut C, settings: &Settings, on_result: F) -> Result<Self, SessionError>
    where
        C: ScreenCapture + ?Sized,
    {
        let snapshot = capture_once(capture)?;
        Ok(Self::with_snapshot(snapshot, settings, on_result))
    }

    /// Start selecting on an already captured snapshot.
    pub fn with_snapshot(snapshot: Snapshot, settings: &Settings, on_result: F) -> Self {
        let selector = RegionSelector::new(snapshot.width(), snapshot.height(), settings.handle_size);
        let mut timer = RepaintTimer::new(settings.repaint_fps);
        timer.start();
        Self {
            snapshot,
            selector,
            timer,
            on_result: Some(on_result),
            status: SessionStatus::Active,
        }
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn selector(&self) -> &RegionSelector {
        &self.selector
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status == SessionStatus::Active
    }

    /// Repaint tick. Polls the pointer for hover feedback and returns the
    /// frame to draw, or `None` when no repaint is due.
    pub fn tick(&mut self, now_ms: f64, pointer: Point) -> Option<OverlayFrame> {
        if !self.is_active() || !self.timer.poll(now_ms) {
            return None;
        }
        self.selector.hover(pointer);
        Some(OverlayFrame::from_selector(&self.selector))
    }

    /// Current cursor, for hosts that update it outside of ticks.
    pub fn cursor(&self) -> Cursor {
        self.selector.cursor()
    }

    pub fn pointer_pressed(&mut self, button: Button, point: Point) -> SessionStatus {
        if self.is_active() && button == Button::Primary {
            self.selector.begin(point);
        }
        self.status
    }

    pub fn pointer_dragged(&mut self, point: Point) -> SessionStatus {
        if self.is_active() {
            self.selector.drag(point);
        }
        self.status
    }

    pub fn pointer_released(&mut self, button: Button, point: Point) -> SessionStatus {
        if self.is_active() {
            if let Some(outcome) = self.selector.release(button, point) {
                self.finish(outcome);
            }
        }
        self.status
    }

    pub fn clicked(&mut self, button: Button, count: u32) -> SessionStatus {
        if self.is_active() {
            if let Some(outcome) = self.selector.click(button, count) {
                self.finish(outcome);
            }
        }
        self.status
    }

    /// Enter accepts, Escape cancels.
    pub fn key_pressed(&mut self, key: Key) -> SessionStatus {
        if self.is_active() {
            match key {
                Key::Enter => self.finish(self.selector.key_accept()),
                Key::Escape => self.finish(self.selector.key_cancel()),
                _ => {}
            }
        }
        self.status
    }

    fn finish(&mut self, outcome: SelectionOutcome) {
        self.timer.stop();
        self.status = SessionStatus::Finished;

        let SelectionOutcome::Accepted(Some(rect)) = outcome else {
            log::info!("Crop session ended without a region");
            return;
        };
        let Some(cropped) = extract_region(&self.snapshot, rect) else {
            log::debug!("Accepted region {:?} is empty after clamping", rect);
            return;
        };
        log::info!(
            "Cropped {}x{} region at ({}, {})",
            cropped.width(),
            cropped.height(),
            rect.x,
            rect.y
        );
        if let Some(on_result) = self.on_result.take() {
            on_result(cropped);
        }
    }
}
