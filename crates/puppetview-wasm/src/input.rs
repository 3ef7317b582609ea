//! Conversions from DOM event values to core input types.

use puppetview_core::input::{Button, Key};
use puppetview_core::settings::Settings;
use puppetview_core::window::{WindowCommand, WindowEvent};
use wasm_bindgen::JsValue;

/// Map `MouseEvent.button`.
pub(crate) fn button_from_dom(button: i16) -> Option<Button> {
    match button {
        0 => Some(Button::Primary),
        1 => Some(Button::Middle),
        2 => Some(Button::Secondary),
        _ => None,
    }
}

/// Map `KeyboardEvent.key`.
pub(crate) fn key_from_dom(key: &str) -> Option<Key> {
    match key {
        "Enter" => Some(Key::Enter),
        "Escape" | "Esc" => Some(Key::Escape),
        "ArrowUp" => Some(Key::Up),
        "ArrowDown" => Some(Key::Down),
        "ArrowLeft" => Some(Key::Left),
        "ArrowRight" => Some(Key::Right),
        _ => None,
    }
}

pub(crate) fn command_from_name(name: &str) -> Option<WindowCommand> {
    let command = match name {
        "flipHorizontal" => WindowCommand::FlipHorizontal,
        "flipVertical" => WindowCommand::FlipVertical,
        "toggleGreyscale" => WindowCommand::ToggleGreyscale,
        "actualSize" => WindowCommand::ActualSize,
        "resetRotationAndFlip" => WindowCommand::ResetRotationAndFlip,
        "resetOpacity" => WindowCommand::ResetOpacity,
        "toggleCollapsed" => WindowCommand::ToggleCollapsed,
        "copyToClipboard" => WindowCommand::CopyToClipboard,
        "hide" => WindowCommand::Hide,
        "close" => WindowCommand::Close,
        _ => return None,
    };
    Some(command)
}

pub(crate) fn event_name(event: WindowEvent) -> &'static str {
    match event {
        WindowEvent::CopyToClipboard => "copyToClipboard",
        WindowEvent::ShowMenu => "showMenu",
        WindowEvent::Close => "close",
    }
}

/// Settings from a plain JS object; `undefined` and `null` give defaults.
pub(crate) fn settings_from_js(value: JsValue) -> Result<Settings, JsValue> {
    if value.is_undefined() || value.is_null() {
        return Ok(Settings::default());
    }
    let settings: Settings = serde_wasm_bindgen::from_value(value)
        .map_err(|e| JsValue::from_str(&format!("Invalid settings: {}", e)))?;
    Ok(settings.sanitized())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dom_buttons() {
        assert_eq!(button_from_dom(0), Some(Button::Primary));
        assert_eq!(button_from_dom(2), Some(Button::Secondary));
        assert_eq!(button_from_dom(4), None);
    }

    #[test]
    fn test_dom_keys() {
        assert_eq!(key_from_dom("Escape"), Some(Key::Escape));
        assert_eq!(key_from_dom("ArrowLeft"), Some(Key::Left));
        assert_eq!(key_from_dom("a"), None);
    }

    #[test]
    fn test_command_names() {
        assert_eq!(command_from_name("flipVertical"), Some(WindowCommand::FlipVertical));
        assert_eq!(command_from_name("close"), Some(WindowCommand::Close));
        assert_eq!(command_from_name("explode"), None);
        assert_eq!(event_name(WindowEvent::Close), "close");
    }
}
