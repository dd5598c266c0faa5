/// Data layer: decoding image files into upload-ready pixels.
///
/// Architecture:
/// ```text
///  .png / .jpg / .bmp / .gif / .webp
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  sniff format, decode, flip → LoadedImage | LoadError
///   └──────────┘
///        │
///        ▼
///   ┌─────────────┐
///   │ LoadedImage │  pixels + ChannelLayout, ImageInfo for the UI
///   └─────────────┘
/// ```

pub mod loader;
pub mod model;
