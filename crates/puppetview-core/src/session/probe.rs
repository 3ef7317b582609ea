//! Color sampling session.

use super::{capture_once, RepaintTimer, ScreenCapture, SessionError, SessionStatus};
use crate::color::{ColorFormat, Loupe};
use crate::geometry::Point;
use crate::input::Key;
use crate::settings::Settings;
use crate::snapshot::Snapshot;
use serde::Serialize;

/// What to paint for one probe repaint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProbeFrame {
    /// Sampled pixel, clamped to the snapshot.
    pub target: Point,
    pub color: [u8; 3],
    /// `color` in the session's format.
    pub text: String,
    pub loupe: Loupe,
}

/// Result of a key press during color sampling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeKeyResponse {
    Ignored,
    /// Move the system pointer here; the sample already follows it.
    MovePointer(Point),
    Finished,
}

/// Pixel color sampling over a frozen screen snapshot.
///
/// `on_result` receives the formatted color of the clicked pixel.
pub struct ColorProbeSession<F>
where
    F: FnOnce(String),
{
    snapshot: Snapshot,
    format: ColorFormat,
    timer: RepaintTimer,
    last: Option<ProbeFrame>,
    on_result: Option<F>,
    status: SessionStatus,
}

impl<F> ColorProbeSession<F>
where
    F: FnOnce(String),
{
    /// Capture the screen and start sampling.
    pub fn start<C>(capture: &mut C, settings: &Settings, on_result: F) -> Result<Self, SessionError>
    where
        C: ScreenCapture + ?Sized,
    {
        let snapshot = capture_once(capture)?;
        Ok(Self::with_snapshot(snapshot, settings, on_result))
    }

    pub fn with_snapshot(snapshot: Snapshot, settings: &Settings, on_result: F) -> Self {
        let mut timer = RepaintTimer::new(settings.repaint_fps);
        timer.start();
        Self {
            snapshot,
            format: settings.color_format,
            timer,
            last: None,
            on_result: Some(on_result),
            status: SessionStatus::Active,
        }
    }

    pub fn format(&self) -> ColorFormat {
        self.format
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn is_active(&self) -> bool {
        self.status == SessionStatus::Active
    }

    /// Most recent sample.
    pub fn last_frame(&self) -> Option<&ProbeFrame> {
        self.last.as_ref()
    }

    fn clamp(&self, p: Point) -> Point {
        let max_x = i32::try_from(self.snapshot.width()).unwrap_or(i32::MAX) - 1;
        let max_y = i32::try_from(self.snapshot.height()).unwrap_or(i32::MAX) - 1;
        Point::new(p.x.clamp(0, max_x), p.y.clamp(0, max_y))
    }

    fn sample(&mut self, pointer: Point) -> &ProbeFrame {
        let target = self.clamp(pointer);
        // Clamped above, so the lookup cannot miss.
        let color = self
            .snapshot
            .pixel(target.x as u32, target.y as u32)
            .unwrap_or_default();
        let (w, h) = (
            i32::try_from(self.snapshot.width()).unwrap_or(i32::MAX),
            i32::try_from(self.snapshot.height()).unwrap_or(i32::MAX),
        );
        self.last.insert(ProbeFrame {
            target,
            color,
            text: self.format.format(color),
            loupe: Loupe::place(target, w, h),
        })
    }

    /// Repaint tick: sample under the pointer when a repaint is due.
    pub fn tick(&mut self, now_ms: f64, pointer: Point) -> Option<ProbeFrame> {
        if !self.is_active() || !self.timer.poll(now_ms) {
            return None;
        }
        Some(self.sample(pointer).clone())
    }

    /// Any click accepts the color under `point`.
    pub fn clicked(&mut self, point: Point) -> SessionStatus {
        if self.is_active() {
            let text = self.sample(point).text.clone();
            self.finish(Some(text));
        }
        self.status
    }

    /// Arrow keys nudge the pointer one pixel, Enter accepts the last sample,
    /// Escape cancels.
    pub fn key_pressed(&mut self, key: Key) -> ProbeKeyResponse {
        if !self.is_active() {
            return ProbeKeyResponse::Finished;
        }
        if let Some((dx, dy)) = key.arrow_delta() {
            let from = self.last.as_ref().map(|f| f.target).unwrap_or_default();
            let target = self.sample(from.offset(dx, dy)).target;
            return ProbeKeyResponse::MovePointer(target);
        }
        match key {
            Key::Escape => {
                self.finish(None);
                ProbeKeyResponse::Finished
            }
            Key::Enter => {
                let text = self.last.as_ref().map(|f| f.text.clone());
                self.finish(text);
                ProbeKeyResponse::Finished
            }
            _ => ProbeKeyResponse::Ignored,
        }
    }

    fn finish(&mut self, text: Option<String>) {
        self.timer.stop();
        self.status = SessionStatus::Finished;
        match text {
            Some(text) => {
                log::info!("Picked color {}", text);
                if let Some(on_result) = self.on_result.take() {
                    on_result(text);
                }
            }
            None => log::info!("Color probe cancelled"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::CaptureError;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn test_snapshot() -> Snapshot {
        let mut pixels = Vec::with_capacity(64 * 48 * 3);
        for y in 0..48u32 {
            for x in 0..64u32 {
                pixels.extend_from_slice(&[x as u8 * 4, y as u8 * 5, 10]);
            }
        }
        Snapshot::new(64, 48, pixels).unwrap()
    }

    fn session(format: ColorFormat) -> (ColorProbeSession<impl FnOnce(String)>, Rc<RefCell<Option<String>>>) {
        let result = Rc::new(RefCell::new(None));
        let sink = Rc::clone(&result);
        let settings = Settings {
            color_format: format,
            ..Settings::default()
        };
        let session = ColorProbeSession::with_snapshot(test_snapshot(), &settings, move |text| {
            *sink.borrow_mut() = Some(text);
        });
        (session, result)
    }

    #[test]
    fn test_start_fails_when_capture_fails() {
        let mut capture = || -> Result<Snapshot, CaptureError> { Err(CaptureError::DisplayUnavailable) };
        let result = ColorProbeSession::start(&mut capture, &Settings::default(), |_| {});
        assert!(matches!(
            result,
            Err(SessionError::Capture(CaptureError::DisplayUnavailable))
        ));
    }

    #[test]
    fn test_tick_samples_pointer() {
        let (mut s, _) = session(ColorFormat::Css);
        let frame = s.tick(0.0, Point::new(3, 2)).unwrap();
        assert_eq!(frame.color, [12, 10, 10]);
        assert_eq!(frame.text, "rgb(12, 10, 10)");
        assert_eq!(frame.target, Point::new(3, 2));
        assert!(s.tick(1.0, Point::new(4, 2)).is_none());
    }

    #[test]
    fn test_sample_clamped_to_snapshot() {
        let (mut s, _) = session(ColorFormat::Html);
        let frame = s.tick(0.0, Point::new(500, -20)).unwrap();
        assert_eq!(frame.target, Point::new(63, 0));
        assert_eq!(frame.text, "#fc000a");
    }

    #[test]
    fn test_click_delivers_text() {
        let (mut s, result) = session(ColorFormat::Hex);
        assert_eq!(s.clicked(Point::new(1, 1)), SessionStatus::Finished);
        assert_eq!(result.borrow().as_deref(), Some("0x04050a"));
        assert!(s.tick(100.0, Point::new(1, 1)).is_none());
    }

    #[test]
    fn test_arrow_keys_nudge_pointer() {
        let (mut s, _) = session(ColorFormat::Rgb);
        s.tick(0.0, Point::new(10, 10));

        assert_eq!(s.key_pressed(Key::Right), ProbeKeyResponse::MovePointer(Point::new(11, 10)));
        assert_eq!(s.key_pressed(Key::Up), ProbeKeyResponse::MovePointer(Point::new(11, 9)));
        assert_eq!(s.last_frame().map(|f| f.text.as_str()), Some("44, 45, 10"));
    }

    #[test]
    fn test_arrow_keys_stop_at_edge() {
        let (mut s, _) = session(ColorFormat::Rgb);
        s.tick(0.0, Point::new(0, 0));
        assert_eq!(s.key_pressed(Key::Left), ProbeKeyResponse::MovePointer(Point::new(0, 0)));
    }

    #[test]
    fn test_escape_cancels() {
        let (mut s, result) = session(ColorFormat::Html);
        s.tick(0.0, Point::new(10, 10));
        assert_eq!(s.key_pressed(Key::Escape), ProbeKeyResponse::Finished);
        assert!(result.borrow().is_none());
        assert_eq!(s.clicked(Point::new(1, 1)), SessionStatus::Finished);
        assert!(result.borrow().is_none());
    }

    #[test]
    fn test_enter_accepts_last_sample() {
        let (mut s, result) = session(ColorFormat::Html);
        s.tick(0.0, Point::new(2, 3));
        assert_eq!(s.key_pressed(Key::Enter), ProbeKeyResponse::Finished);
        assert_eq!(result.borrow().as_deref(), Some("#080f0a"));
    }
}
