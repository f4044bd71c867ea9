//! Optional media found next to the program.
//!
//! Both assets are best effort: when a file is missing or unreadable the
//! problem is logged and the feature that needed it is switched off.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use color_eyre::eyre::{Result, WrapErr as _};
use image::RgbaImage;

use crate::constants::{IMAGE_EXTENSIONS, MUSIC_EXTENSIONS, POPUP_SIZE};

#[derive(Default)]
pub struct Assets {
    pub image: Option<Arc<RgbaImage>>,
    pub music: Option<PathBuf>,
}

impl Assets {
    /// Look in `directory` for a popup image and a music file.
    pub fn discover(directory: &Path) -> Self {
        let image = match find_first(directory, &IMAGE_EXTENSIONS) {
            Ok(Some(path)) => match load_image(&path) {
                Ok(image) => {
                    tracing::info!("Loaded special image: {}", path.display());
                    Some(Arc::new(image))
                }
                Err(error) => {
                    tracing::warn!("Could not load special image: {error:?}");
                    None
                }
            },
            Ok(None) => {
                tracing::info!("No image found, popups are disabled");
                None
            }
            Err(error) => {
                tracing::warn!("Could not search for an image: {error:?}");
                None
            }
        };

        let music = match find_first(directory, &MUSIC_EXTENSIONS) {
            Ok(found) => found,
            Err(error) => {
                tracing::warn!("Could not search for music: {error:?}");
                None
            }
        };
        if music.is_none() {
            tracing::info!("No music files found. Place an MP3, WAV, or OGG file in the directory.");
        }

        Self { image, music }
    }
}

/// The alphabetically first file in `directory` with one of `extensions`,
/// compared case-insensitively.
pub fn find_first(directory: &Path, extensions: &[&str]) -> Result<Option<PathBuf>> {
    let entries = std::fs::read_dir(directory)
        .wrap_err_with(|| format!("Couldn't read directory {}", directory.display()))?;

    let mut matches = Vec::new();
    for entry in entries {
        let path = entry?.path();
        if !path.is_file() {
            continue;
        }
        let Some(extension) = path.extension().and_then(|extension| extension.to_str()) else {
            continue;
        };
        if extensions
            .iter()
            .any(|wanted| wanted.eq_ignore_ascii_case(extension))
        {
            matches.push(path);
        }
    }
    matches.sort();
    Ok(matches.into_iter().next())
}

/// Decode an image, shrinking it so no popup ever needs more pixels than it
/// has.
pub fn load_image(path: &Path) -> Result<RgbaImage> {
    let image = image::open(path)
        .wrap_err_with(|| format!("Couldn't decode image {}", path.display()))?;
    let limit = POPUP_SIZE.1 as u32;
    let image = if image.width() > limit || image.height() > limit {
        image.thumbnail(limit, limit)
    } else {
        image
    };
    Ok(image.into_rgba8())
}
