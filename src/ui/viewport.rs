use std::sync::Arc;

use eframe::egui::{self, mutex::Mutex, Align2, Color32, FontId, Ui};
use eframe::egui_glow;

use crate::input::{self, FrameInput};
use crate::render::quad::QuadRenderer;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Image viewport (central panel)
// ---------------------------------------------------------------------------

/// Claim the remaining space, feed this frame's input into the state, then
/// schedule the quad draw with the updated view.
///
/// Returns the gathered input so the caller can decide on repaints.
pub fn image_viewport(
    ui: &mut Ui,
    state: &mut AppState,
    renderer: Option<&Arc<Mutex<QuadRenderer>>>,
) -> FrameInput {
    let (rect, response) = ui.allocate_exact_size(ui.available_size(), egui::Sense::hover());

    let frame_input = FrameInput::gather(ui.ctx(), &response, !state.ui.open_image);
    for event in input::translate(&frame_input, state.viewport_size) {
        state.apply(event);
    }

    let Some(renderer) = renderer else {
        ui.painter().text(
            rect.center(),
            Align2::CENTER_CENTER,
            "Image rendering unavailable (see log)",
            FontId::proportional(16.0),
            Color32::GRAY,
        );
        return frame_input;
    };

    let renderer = Arc::clone(renderer);
    let uniforms = state.uniforms();
    let callback = egui::PaintCallback {
        rect,
        callback: Arc::new(egui_glow::CallbackFn::new(move |_info, painter| {
            renderer.lock().paint(painter.gl(), &uniforms);
        })),
    };
    ui.painter().add(callback);

    frame_input
}
