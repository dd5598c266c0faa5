use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;
use eframe::egui::{self, mutex::Mutex};
use eframe::glow;

use crate::config;
use crate::data::model::LoadedImage;
use crate::input::ViewerEvent;
use crate::render::quad::QuadRenderer;
use crate::render::shader::ShaderSources;
use crate::state::AppState;
use crate::ui::panels::{self, UiAction};
use crate::ui::viewport;

// ---------------------------------------------------------------------------
// eframe App implementation
// ---------------------------------------------------------------------------

pub struct QuadViewApp {
    pub state: AppState,
    /// `None` when the GL program could not be built; the UI still runs.
    renderer: Option<Arc<Mutex<QuadRenderer>>>,
    /// Title last sent to the window.
    title: String,
}

impl QuadViewApp {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let mut state = AppState::default();

        let renderer = match cc.gl.as_ref() {
            Some(gl) => {
                let sources = ShaderSources::load(Path::new(config::SHADER_DIR));
                match QuadRenderer::new(gl, &sources) {
                    Ok(renderer) => Some(Arc::new(Mutex::new(renderer))),
                    Err(e) => {
                        log::error!("Failed to set up image rendering: {e:#}");
                        state.status_message = Some(format!("Rendering disabled: {e:#}"));
                        None
                    }
                }
            }
            None => {
                log::error!("No OpenGL context available, images cannot be shown");
                state.status_message = Some("Rendering disabled: no OpenGL context".to_owned());
                None
            }
        };

        Self {
            state,
            renderer,
            title: config::empty_title(),
        }
    }

    /// Open `path`, or the typed path when `None`, uploading through the
    /// frame's GL context.
    fn open(&mut self, frame: &eframe::Frame, path: Option<PathBuf>) {
        let gl = frame.gl().cloned();
        let renderer = self.renderer.clone();
        let upload = move |img: &LoadedImage| -> anyhow::Result<()> {
            let gl = gl.context("no OpenGL context")?;
            let renderer = renderer.context("image rendering is unavailable")?;
            let mut renderer = renderer.lock();
            renderer.upload(&gl, img)
        };

        match path {
            Some(path) => self.state.open_path(&path, upload),
            None => self.state.open_from_input(upload),
        };
    }

    fn handle(&mut self, ctx: &egui::Context, frame: &eframe::Frame, action: UiAction) {
        match action {
            UiAction::OpenTyped => self.open(frame, None),
            UiAction::OpenPicked(path) => self.open(frame, Some(path)),
            UiAction::Close => ctx.send_viewport_cmd(egui::ViewportCommand::Close),
            UiAction::ResetView => self.state.apply(ViewerEvent::ResetView),
        }
    }
}

impl eframe::App for QuadViewApp {
    fn clear_color(&self, _visuals: &egui::Visuals) -> [f32; 4] {
        let [r, g, b] = config::CLEAR_COLOR;
        [r, g, b, 1.0]
    }

    fn update(&mut self, ctx: &egui::Context, frame: &mut eframe::Frame) {
        let mut actions = Vec::new();

        // ---- Top panel: menu bar ----
        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            panels::top_bar(ui, &mut self.state, &mut actions);
        });

        // ---- Floating panels ----
        panels::open_image_window(ctx, &mut self.state, &mut actions);
        panels::settings_window(ctx, &mut self.state);
        panels::info_window(ctx, &mut self.state);

        for action in actions {
            self.handle(ctx, frame, action);
        }

        // ---- Central panel: the image ----
        let frame_input = egui::CentralPanel::default()
            .frame(egui::Frame::default())
            .show(ctx, |ui| {
                viewport::image_viewport(ui, &mut self.state, self.renderer.as_ref())
            })
            .inner;

        if frame_input.wants_continuous_repaint() {
            ctx.request_repaint();
        }

        let title = self.state.title();
        if title != self.title {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title.clone()));
            self.title = title;
        }
    }

    fn on_exit(&mut self, gl: Option<&glow::Context>) {
        if let (Some(gl), Some(renderer)) = (gl, self.renderer.as_ref()) {
            renderer.lock().destroy(gl);
        }
    }
}
