pub mod render;
pub mod store;

pub use render::IconRenderer;
pub use store::IconStore;

use image::RgbaImage;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "snake_case")]
pub enum IconStyle {
    /// Circle showing the day of month
    #[default]
    DayNumber,
    /// Fixed themed calendar icon
    Static,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IconColors {
    pub background: [u8; 3],
    pub foreground: [u8; 3],
}

impl Default for IconColors {
    fn default() -> Self {
        Self {
            background: [51, 102, 153],
            foreground: [255, 255, 255],
        }
    }
}

impl IconColors {
    pub fn background_rgba(&self) -> [u8; 4] {
        let [r, g, b] = self.background;
        [r, g, b, 255]
    }

    pub fn foreground_rgba(&self) -> [u8; 4] {
        let [r, g, b] = self.foreground;
        [r, g, b, 255]
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RenderedIcon {
    pub day: u32,
    pub path: PathBuf,
    pub image: RgbaImage,
}

/// What the tray currently shows.
#[derive(Debug, Clone, PartialEq)]
pub enum TrayIconImage {
    Rendered(RenderedIcon),
    /// Icon looked up by name in the desktop icon theme
    Themed(&'static str),
}

impl TrayIconImage {
    /// Day-of-month recovered from the icon file name.
    pub fn rendered_day(&self) -> Option<u32> {
        match self {
            TrayIconImage::Rendered(icon) => store::day_from_path(&icon.path),
            TrayIconImage::Themed(_) => None,
        }
    }
}
