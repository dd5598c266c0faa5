use std::path::Path;

use eframe::egui;
use glam::Vec2;

use crate::config::{self, DEFAULT_DIMENSION, PATH_CAPACITY};
use crate::data::loader::{self, LoadError};
use crate::data::model::{ImageInfo, LoadedImage};
use crate::input::ViewerEvent;
use crate::render::quad::QuadUniforms;
use crate::view::scale::normalized_scale;
use crate::view::transform::{aspect_ratio, ViewTransform};

// ---------------------------------------------------------------------------
// UI visibility flags
// ---------------------------------------------------------------------------

/// Independent panel toggles; any combination may be open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UiFlags {
    pub open_image: bool,
    pub settings: bool,
    pub info: bool,
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full viewer state, independent of rendering.
pub struct AppState {
    pub view: ViewTransform,

    pub ui: UiFlags,

    /// Text of the open-image path field.
    pub path_input: String,

    /// Image currently on the GPU (None until the first successful open).
    pub image: Option<ImageInfo>,

    /// Size of the image viewport in points.
    pub viewport_size: egui::Vec2,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            view: ViewTransform::default(),
            ui: UiFlags::default(),
            path_input: String::with_capacity(PATH_CAPACITY),
            image: None,
            viewport_size: egui::vec2(config::INITIAL_WINDOW_SIZE[0], config::INITIAL_WINDOW_SIZE[1]),
            status_message: None,
        }
    }
}

impl AppState {
    /// Characters the path field accepts; one slot stays reserved.
    pub fn path_char_limit(&self) -> usize {
        PATH_CAPACITY - 1
    }

    pub fn apply(&mut self, event: ViewerEvent) {
        match event {
            ViewerEvent::Resized { width, height } => {
                self.viewport_size = egui::vec2(width, height);
            }
            ViewerEvent::Scrolled(direction) => self.view.scroll(direction),
            ViewerEvent::Pan(direction) => self.view.pan(direction),
            ViewerEvent::ResetView => self.view.reset(),
        }
    }

    pub fn aspect(&self) -> f32 {
        aspect_ratio(self.viewport_size.x, self.viewport_size.y)
    }

    /// Display scale of the current image, or of the placeholder quad.
    pub fn scale(&self) -> Vec2 {
        let (w, h) = self
            .image
            .as_ref()
            .map(|img| (img.width, img.height))
            .unwrap_or((DEFAULT_DIMENSION, DEFAULT_DIMENSION));
        normalized_scale(w, h).unwrap_or(Vec2::ONE)
    }

    pub fn title(&self) -> String {
        if self.image.is_some() {
            config::viewing_title()
        } else {
            config::empty_title()
        }
    }

    pub fn uniforms(&self) -> QuadUniforms {
        QuadUniforms {
            pvm: self.view.compose_matrix(self.aspect()),
            size: self.scale(),
            zoom: self.view.zoom,
            apply_texture: self.image.is_some(),
        }
    }

    /// Open whatever is typed into the path field.
    pub fn open_from_input<F>(&mut self, upload: F) -> bool
    where
        F: FnOnce(&LoadedImage) -> anyhow::Result<()>,
    {
        match loader::parse_path_input(&self.path_input) {
            Some(path) => self.open_path(&path, upload),
            None => {
                self.report_failure(&anyhow::Error::from(LoadError::EmptyPath));
                false
            }
        }
    }

    /// Decode `path` and hand the pixels to `upload`.
    ///
    /// The current image is only replaced when both steps succeed;
    /// otherwise the failure is recorded in `status_message`.
    pub fn open_path<F>(&mut self, path: &Path, upload: F) -> bool
    where
        F: FnOnce(&LoadedImage) -> anyhow::Result<()>,
    {
        let result = loader::load_image(path)
            .map_err(anyhow::Error::from)
            .and_then(|img| upload(&img).map(|()| img));

        match result {
            Ok(img) => {
                log::info!(
                    "Opened {} ({}x{}, {})",
                    path.display(),
                    img.width,
                    img.height,
                    img.layout.short_label()
                );
                self.image = Some(img.info());
                self.status_message = None;
                self.ui.open_image = false;
                true
            }
            Err(e) => {
                self.report_failure(&e);
                false
            }
        }
    }

    fn report_failure(&mut self, e: &anyhow::Error) {
        log::error!("Failed to open image: {e:#}");
        self.status_message = Some(format!("Failed to open image: {e:#}"));
    }
}
