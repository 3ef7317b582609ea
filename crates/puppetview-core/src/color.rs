//! Color probe: output formats and magnifier placement.

use crate::geometry::{Bounds, Point};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Side length of the magnifier box.
pub const LOUPE_SIZE: i32 = 105;

/// Horizontal gap between the pointer and the magnifier.
pub const LOUPE_GAP: i32 = 10;

/// Pixels sampled on each side of the target inside the magnifier.
pub const SAMPLE_RADIUS: i32 = 6;

/// Label font size under the magnifier.
pub const LABEL_FONT_SIZE: i32 = 12;

/// Padding around the label text.
pub const LABEL_PAD: i32 = 2;

/// How a sampled color is rendered as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColorFormat {
    /// `#rrggbb`
    #[default]
    Html,
    /// `0xrrggbb`
    Hex,
    /// `rgb(r, g, b)`
    Css,
    /// `r, g, b`
    Rgb,
}

impl ColorFormat {
    pub const ALL: [ColorFormat; 4] = [
        ColorFormat::Html,
        ColorFormat::Hex,
        ColorFormat::Css,
        ColorFormat::Rgb,
    ];

    /// Format an RGB triple.
    pub fn format(self, [r, g, b]: [u8; 3]) -> String {
        match self {
            ColorFormat::Html => format!("#{:02x}{:02x}{:02x}", r, g, b),
            ColorFormat::Hex => format!("0x{:02x}{:02x}{:02x}", r, g, b),
            ColorFormat::Css => format!("rgb({}, {}, {})", r, g, b),
            ColorFormat::Rgb => format!("{}, {}, {}", r, g, b),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ColorFormat::Html => "html",
            ColorFormat::Hex => "hex",
            ColorFormat::Css => "css",
            ColorFormat::Rgb => "rgb",
        }
    }
}

impl fmt::Display for ColorFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unknown color format name.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("Unknown color format: {0}")]
pub struct ParseColorFormatError(pub String);

impl FromStr for ColorFormat {
    type Err = ParseColorFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ColorFormat::ALL
            .into_iter()
            .find(|f| f.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| ParseColorFormatError(s.to_string()))
    }
}

/// Placement of the magnifier next to the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Loupe {
    /// Top-left corner of the magnifier box.
    pub origin: Point,
    /// Source pixels scaled up into the box (right/bottom exclusive).
    pub source: Bounds,
    /// Label strip drawn directly under the box.
    pub label: Bounds,
}

impl Loupe {
    /// Place the magnifier for `target` on a `screen_width` x `screen_height`
    /// screen.
    ///
    /// The box sits to the right of the pointer and flips to the left when
    /// it would leave the screen. Vertically it is centered on the pointer
    /// and kept on screen together with its label.
    pub fn place(target: Point, screen_width: i32, screen_height: i32) -> Self {
        let mut x = target.x + LOUPE_GAP;
        if x > screen_width - LOUPE_SIZE {
            x = target.x - LOUPE_SIZE - LOUPE_GAP;
        }
        let x = x.max(0);

        let label_height = LABEL_FONT_SIZE + LABEL_PAD * 2;
        let y_max = screen_height - (LOUPE_SIZE + label_height);
        let y = (target.y - LOUPE_SIZE / 2).min(y_max).max(0);

        Self {
            origin: Point::new(x, y),
            source: Bounds::new(
                target.x - SAMPLE_RADIUS,
                target.y - SAMPLE_RADIUS,
                target.x + SAMPLE_RADIUS + 1,
                target.y + SAMPLE_RADIUS + 1,
            ),
            label: Bounds::new(x, y + LOUPE_SIZE, x + LOUPE_SIZE + 1, y + LOUPE_SIZE + label_height),
        }
    }
}
