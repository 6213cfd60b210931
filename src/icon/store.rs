use crate::config::constants::ICON_FILE_PREFIX;
use crate::error::Result;
use image::{ImageFormat, RgbaImage};
use log::{debug, warn};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Process-private directory holding the generated day icons.
///
/// The directory and everything in it is removed by [`IconStore::close`] or,
/// failing that, when the store is dropped.
#[derive(Debug)]
pub struct IconStore {
    dir: TempDir,
}

impl IconStore {
    pub fn new() -> Result<Self> {
        let dir = tempfile::Builder::new().prefix(ICON_FILE_PREFIX).tempdir()?;
        debug!("Icon directory: {}", dir.path().display());
        Ok(Self { dir })
    }

    pub fn dir(&self) -> &Path {
        self.dir.path()
    }

    pub fn path_for(&self, day: u32) -> PathBuf {
        self.dir.path().join(file_name(day))
    }

    pub fn save(&self, day: u32, image: &RgbaImage) -> Result<PathBuf> {
        let path = self.path_for(day);
        image.save_with_format(&path, ImageFormat::Png)?;
        Ok(path)
    }

    /// Remove icons for every day except `keep`.
    pub fn prune_except(&self, keep: u32) {
        let Ok(entries) = fs::read_dir(self.dir.path()) else {
            return;
        };
        for entry in entries.flatten() {
            let path = entry.path();
            if matches!(day_from_path(&path), Some(day) if day != keep) {
                if let Err(e) = fs::remove_file(&path) {
                    warn!("Failed to remove stale icon {}: {}", path.display(), e);
                }
            }
        }
    }

    pub fn close(self) -> Result<()> {
        let path = self.dir.path().to_path_buf();
        self.dir.close()?;
        debug!("Removed icon directory {}", path.display());
        Ok(())
    }
}

pub fn file_name(day: u32) -> String {
    format!("{ICON_FILE_PREFIX}{day}.png")
}

/// Day-of-month encoded in an icon file name such as `persian-date-12.png`.
pub fn day_from_path(path: &Path) -> Option<u32> {
    let stem = path.file_stem()?.to_str()?;
    let day: u32 = stem.strip_prefix(ICON_FILE_PREFIX)?.parse().ok()?;
    (1..=31).contains(&day).then_some(day)
}
