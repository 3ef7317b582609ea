//! The set of open image windows.

use crate::settings::WindowSettings;
use crate::snapshot::Snapshot;
use crate::window::{ImageState, ImageWindow, StateError, WindowCommand, WindowEvent};
use serde::{Deserialize, Serialize};

/// Stable handle of an open window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct WindowId(u64);

impl WindowId {
    pub fn get(self) -> u64 {
        self.0
    }
}

/// One window as read back from a saved workspace.
#[derive(Debug, Clone)]
pub struct LoadedWindow {
    pub width: u32,
    pub height: u32,
    /// RGB bytes, row-major.
    pub pixels: Vec<u8>,
    pub state: ImageState,
}

/// Open windows in creation order.
#[derive(Debug, Default)]
pub struct WindowRegistry {
    windows: Vec<(WindowId, ImageWindow)>,
    next_id: u64,
}

impl WindowRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, window: ImageWindow) -> WindowId {
        let id = WindowId(self.next_id);
        self.next_id += 1;
        self.windows.push((id, window));
        id
    }

    pub fn remove(&mut self, id: WindowId) -> Option<ImageWindow> {
        let index = self.windows.iter().position(|(wid, _)| *wid == id)?;
        Some(self.windows.remove(index).1)
    }

    pub fn get(&self, id: WindowId) -> Option<&ImageWindow> {
        self.windows.iter().find(|(wid, _)| *wid == id).map(|(_, w)| w)
    }

    pub fn get_mut(&mut self, id: WindowId) -> Option<&mut ImageWindow> {
        self.windows.iter_mut().find(|(wid, _)| *wid == id).map(|(_, w)| w)
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    pub fn ids(&self) -> Vec<WindowId> {
        self.windows.iter().map(|(id, _)| *id).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (WindowId, &ImageWindow)> {
        self.windows.iter().map(|(id, w)| (*id, w))
    }

    /// React to an event raised by window `id`. A close removes the window
    /// and hands it back.
    pub fn handle(&mut self, id: WindowId, event: WindowEvent) -> Option<ImageWindow> {
        match event {
            WindowEvent::Close => self.remove(id),
            WindowEvent::CopyToClipboard | WindowEvent::ShowMenu => None,
        }
    }

    /// Run a menu command on window `id`.
    ///
    /// Returns the event the window raised, after the registry has acted on
    /// it. Unknown ids are ignored.
    pub fn command(&mut self, id: WindowId, command: WindowCommand) -> Option<WindowEvent> {
        let event = self.get_mut(id)?.apply(command)?;
        self.handle(id, event);
        Some(event)
    }

    pub fn flip_all_horizontal(&mut self) {
        for (_, w) in &mut self.windows {
            w.toggle_flip_horizontal();
        }
    }

    pub fn flip_all_vertical(&mut self) {
        for (_, w) in &mut self.windows {
            w.toggle_flip_vertical();
        }
    }

    pub fn set_all_visible(&mut self, visible: bool) {
        for (_, w) in &mut self.windows {
            w.set_visible(visible);
        }
    }

    /// Close every window. Returns how many were open.
    pub fn close_all(&mut self) -> usize {
        let count = self.windows.len();
        self.windows.clear();
        log::info!("Closed {} image windows", count);
        count
    }

    /// Saved state of every window with its bitmap, in creation order.
    pub fn states(&self) -> Vec<(ImageState, &Snapshot)> {
        self.windows
            .iter()
            .map(|(_, w)| (w.state(), w.bitmap()))
            .collect()
    }

    /// Swap the open windows for a loaded workspace.
    ///
    /// Every window is built before anything is replaced; if one fails, the
    /// current windows stay open and the error is returned.
    pub fn replace_all(
        &mut self,
        loaded: Vec<LoadedWindow>,
        limits: &WindowSettings,
    ) -> Result<Vec<WindowId>, StateError> {
        let built = loaded
            .into_iter()
            .map(|entry| -> Result<ImageWindow, StateError> {
                let bitmap = Snapshot::new(entry.width, entry.height, entry.pixels)?;
                ImageWindow::from_state(bitmap, &entry.state, limits.clone())
            })
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| {
                log::warn!("Workspace load failed, keeping open windows: {}", e);
                e
            })?;

        self.windows.clear();
        let ids = built.into_iter().map(|w| self.add(w)).collect::<Vec<_>>();
        log::info!("Loaded workspace with {} image windows", ids.len());
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Point;

    fn test_window(x: i32) -> ImageWindow {
        let bitmap = Snapshot::new(40, 20, vec![90; 40 * 20 * 3]).unwrap();
        ImageWindow::new(bitmap, Point::new(x, 100), WindowSettings::default())
    }

    fn loaded(width: u32, height: u32, state: ImageState) -> LoadedWindow {
        LoadedWindow {
            width,
            height,
            pixels: vec![0; (width * height * 3) as usize],
            state,
        }
    }

    #[test]
    fn test_add_remove() {
        let mut reg = WindowRegistry::new();
        let a = reg.add(test_window(100));
        let b = reg.add(test_window(200));
        assert_ne!(a, b);
        assert_eq!(reg.len(), 2);

        assert!(reg.remove(a).is_some());
        assert!(reg.remove(a).is_none());
        assert!(reg.get(b).is_some());
        assert_eq!(reg.ids(), vec![b]);
    }

    #[test]
    fn test_close_command_removes_window() {
        let mut reg = WindowRegistry::new();
        let id = reg.add(test_window(100));

        assert_eq!(reg.command(id, WindowCommand::Close), Some(WindowEvent::Close));
        assert!(reg.is_empty());
        assert_eq!(reg.command(id, WindowCommand::Close), None);
    }

    #[test]
    fn test_copy_command_keeps_window() {
        let mut reg = WindowRegistry::new();
        let id = reg.add(test_window(100));
        assert_eq!(
            reg.command(id, WindowCommand::CopyToClipboard),
            Some(WindowEvent::CopyToClipboard)
        );
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn test_bulk_operations() {
        let mut reg = WindowRegistry::new();
        reg.add(test_window(100));
        reg.add(test_window(200));

        reg.flip_all_horizontal();
        reg.flip_all_vertical();
        reg.set_all_visible(false);
        for (_, w) in reg.iter() {
            assert!(w.transform().flip_horizontal());
            assert!(w.transform().flip_vertical());
            assert!(!w.is_visible());
        }

        assert_eq!(reg.close_all(), 2);
        assert!(reg.is_empty());
    }

    #[test]
    fn test_replace_all() {
        let mut reg = WindowRegistry::new();
        reg.add(test_window(100));
        let state = test_window(300).state();

        let ids = reg
            .replace_all(
                vec![loaded(40, 20, state), loaded(40, 20, state)],
                &WindowSettings::default(),
            )
            .unwrap();
        assert_eq!(ids.len(), 2);
        assert_eq!(reg.len(), 2);
        assert_eq!(reg.states()[0].0, state);
    }

    #[test]
    fn test_failed_load_leaves_registry_unchanged() {
        let mut reg = WindowRegistry::new();
        let kept = reg.add(test_window(100));
        let good = test_window(300).state();
        let mut bad = good;
        bad.opacity = f32::NAN;

        let err = reg
            .replace_all(vec![loaded(40, 20, good), loaded(40, 20, bad)], &WindowSettings::default())
            .unwrap_err();
        assert_eq!(err, StateError::NonFinite { field: "opacity" });
        assert_eq!(reg.ids(), vec![kept]);

        let broken_bitmap = LoadedWindow {
            width: 40,
            height: 20,
            pixels: vec![0; 10],
            state: good,
        };
        let err = reg
            .replace_all(vec![broken_bitmap], &WindowSettings::default())
            .unwrap_err();
        assert!(matches!(err, StateError::Bitmap(_)));
        assert_eq!(reg.ids(), vec![kept]);
    }
}
