use std::path::{Path, PathBuf};

use image::{DynamicImage, ImageReader};
use thiserror::Error;

use super::model::{ChannelLayout, LoadedImage};

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Why an image could not be opened. The viewer keeps showing whatever it
/// showed before when any of these is returned.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("no image path given")]
    EmptyPath,

    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("{} has {channels} color channels, only 1, 3 or 4 are supported", path.display())]
    UnsupportedChannels { path: PathBuf, channels: u8 },

    #[error("{} has no pixels", path.display())]
    EmptyImage { path: PathBuf },
}

// ---------------------------------------------------------------------------
// Public entry-points
// ---------------------------------------------------------------------------

/// Turn the text typed into the path field into a path.
///
/// Strips surrounding whitespace and one pair of surrounding quotes, which
/// file managers add when copying a path.
pub fn parse_path_input(input: &str) -> Option<PathBuf> {
    let trimmed = input.trim();
    let unquoted = ['"', '\'']
        .iter()
        .find_map(|q| {
            trimmed
                .strip_prefix(*q)
                .and_then(|rest| rest.strip_suffix(*q))
        })
        .unwrap_or(trimmed)
        .trim();

    if unquoted.is_empty() {
        None
    } else {
        Some(PathBuf::from(unquoted))
    }
}

/// Decode an image file into bottom-up 8-bit pixel rows.
///
/// The format is sniffed from the file contents. Deeper formats are reduced
/// to 8 bits per channel but keep their channel count.
pub fn load_image(path: &Path) -> Result<LoadedImage, LoadError> {
    if path.as_os_str().is_empty() {
        return Err(LoadError::EmptyPath);
    }

    let io_err = |source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    };

    let decoded = ImageReader::open(path)
        .map_err(io_err)?
        .with_guessed_format()
        .map_err(io_err)?
        .decode()
        .map_err(|source| LoadError::Decode {
            path: path.to_path_buf(),
            source,
        })?;

    from_dynamic(decoded, path)
}

/// Convert an already decoded image. Split out so callers holding bytes in
/// memory share the same channel handling.
pub fn from_dynamic(img: DynamicImage, path: &Path) -> Result<LoadedImage, LoadError> {
    let (width, height) = (img.width(), img.height());
    if width == 0 || height == 0 {
        return Err(LoadError::EmptyImage {
            path: path.to_path_buf(),
        });
    }

    let channels = img.color().channel_count();
    let layout = ChannelLayout::from_channel_count(channels).ok_or_else(|| {
        LoadError::UnsupportedChannels {
            path: path.to_path_buf(),
            channels,
        }
    })?;

    // GL texture rows start at the bottom.
    let img = img.flipv();
    let pixels = match layout {
        ChannelLayout::Gray => img.into_luma8().into_raw(),
        ChannelLayout::Rgb => img.into_rgb8().into_raw(),
        ChannelLayout::Rgba => img.into_rgba8().into_raw(),
    };

    Ok(LoadedImage {
        width,
        height,
        layout,
        pixels,
        path: path.to_path_buf(),
    })
}
