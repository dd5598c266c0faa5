use std::fmt;
use std::path::PathBuf;

// ---------------------------------------------------------------------------
// ChannelLayout – supported pixel layouts
// ---------------------------------------------------------------------------

/// Pixel layouts the viewer can upload. Anything else is rejected by the
/// loader before it reaches the GPU.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelLayout {
    Gray,
    Rgb,
    Rgba,
}

impl ChannelLayout {
    /// Map a decoded channel count onto a layout. `None` for 2 or >4.
    pub fn from_channel_count(channels: u8) -> Option<Self> {
        match channels {
            1 => Some(ChannelLayout::Gray),
            3 => Some(ChannelLayout::Rgb),
            4 => Some(ChannelLayout::Rgba),
            _ => None,
        }
    }

    pub fn channel_count(self) -> usize {
        match self {
            ChannelLayout::Gray => 1,
            ChannelLayout::Rgb => 3,
            ChannelLayout::Rgba => 4,
        }
    }

    pub fn short_label(self) -> &'static str {
        match self {
            ChannelLayout::Gray => "R",
            ChannelLayout::Rgb => "RGB",
            ChannelLayout::Rgba => "RGBA",
        }
    }

    /// Label shown in the info panel.
    pub fn long_label(self) -> &'static str {
        match self {
            ChannelLayout::Gray => "Red(R)",
            ChannelLayout::Rgb => "Red Green Blue(RGB)",
            ChannelLayout::Rgba => "Red Green Blue Alpha(RGBA)",
        }
    }
}

impl fmt::Display for ChannelLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.long_label())
    }
}

// ---------------------------------------------------------------------------
// LoadedImage – decoded pixels ready for upload
// ---------------------------------------------------------------------------

/// A decoded image. Rows are stored bottom-up so that row 0 lines up with
/// texture coordinate v = 0.
#[derive(Debug, Clone)]
pub struct LoadedImage {
    pub width: u32,
    pub height: u32,
    pub layout: ChannelLayout,
    /// Tightly packed 8-bit samples, `width * height * channels` bytes.
    pub pixels: Vec<u8>,
    pub path: PathBuf,
}

impl LoadedImage {
    /// Pixel-free descriptor kept in the application state.
    pub fn info(&self) -> ImageInfo {
        ImageInfo {
            width: self.width,
            height: self.height,
            layout: self.layout,
            path: self.path.clone(),
        }
    }

    /// Number of bytes one row occupies.
    pub fn row_len(&self) -> usize {
        self.width as usize * self.layout.channel_count()
    }
}

// ---------------------------------------------------------------------------
// ImageInfo – what the UI knows about the current image
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInfo {
    pub width: u32,
    pub height: u32,
    pub layout: ChannelLayout,
    pub path: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_counts_map_exhaustively() {
        assert_eq!(ChannelLayout::from_channel_count(1), Some(ChannelLayout::Gray));
        assert_eq!(ChannelLayout::from_channel_count(3), Some(ChannelLayout::Rgb));
        assert_eq!(ChannelLayout::from_channel_count(4), Some(ChannelLayout::Rgba));
        for unsupported in [0, 2, 5, 8] {
            assert_eq!(ChannelLayout::from_channel_count(unsupported), None);
        }
    }

    #[test]
    fn layout_round_trips_through_channel_count() {
        for layout in [ChannelLayout::Gray, ChannelLayout::Rgb, ChannelLayout::Rgba] {
            let count = layout.channel_count() as u8;
            assert_eq!(ChannelLayout::from_channel_count(count), Some(layout));
        }
    }

    #[test]
    fn long_label_contains_short_label() {
        assert_eq!(ChannelLayout::Rgba.to_string(), "Red Green Blue Alpha(RGBA)");
        assert!(ChannelLayout::Rgb.long_label().contains(ChannelLayout::Rgb.short_label()));
    }

    #[test]
    fn row_len_accounts_for_channels() {
        let img = LoadedImage {
            width: 3,
            height: 2,
            layout: ChannelLayout::Rgb,
            pixels: vec![0; 18],
            path: PathBuf::from("x.png"),
        };
        assert_eq!(img.row_len(), 9);
        assert_eq!(img.info().width, 3);
    }
}
