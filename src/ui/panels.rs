use std::path::PathBuf;

use eframe::egui::{self, Color32, RichText, Ui};

use crate::config::{self, DEFAULT_DIMENSION};
use crate::state::AppState;

/// Requests the panels cannot carry out on their own because they need the
/// GL context or the window.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    OpenTyped,
    OpenPicked(PathBuf),
    Close,
    ResetView,
}

// ---------------------------------------------------------------------------
// Top bar
// ---------------------------------------------------------------------------

/// Render the main menu bar.
pub fn top_bar(ui: &mut Ui, state: &mut AppState, actions: &mut Vec<UiAction>) {
    egui::menu::bar(ui, |ui: &mut Ui| {
        ui.menu_button("File", |ui: &mut Ui| {
            if ui.button("Open An Existing Image").clicked() {
                state.ui.open_image = !state.ui.open_image;
                ui.close_menu();
            }
            if ui.button("Settings").clicked() {
                state.ui.settings = !state.ui.settings;
                ui.close_menu();
            }
            if ui.button("Close").clicked() {
                actions.push(UiAction::Close);
                ui.close_menu();
            }
        });

        ui.menu_button("Tools", |ui: &mut Ui| {
            if ui.button("Get Image Info").clicked() {
                state.ui.info = !state.ui.info;
                ui.close_menu();
            }
            if ui.button("Reset Zoom").clicked() {
                actions.push(UiAction::ResetView);
                ui.close_menu();
            }
        });

        if let Some(msg) = &state.status_message {
            ui.separator();
            ui.label(RichText::new(msg).color(Color32::RED));
        }
    });
}

// ---------------------------------------------------------------------------
// Floating panels
// ---------------------------------------------------------------------------

/// Path entry. Enter in the field behaves like the button.
pub fn open_image_window(ctx: &egui::Context, state: &mut AppState, actions: &mut Vec<UiAction>) {
    let mut open = state.ui.open_image;
    let limit = state.path_char_limit();

    egui::Window::new("Open Image")
        .open(&mut open)
        .fixed_size([350.0, 120.0])
        .resizable(false)
        .collapsible(false)
        .show(ctx, |ui: &mut Ui| {
            ui.label("Image Path : ");
            let response = ui.add(
                egui::TextEdit::singleline(&mut state.path_input)
                    .char_limit(limit)
                    .hint_text("Enter the image path...")
                    .desired_width(f32::INFINITY),
            );
            let submitted =
                response.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter));

            ui.horizontal(|ui: &mut Ui| {
                if ui.button("Open Image").clicked() || submitted {
                    actions.push(UiAction::OpenTyped);
                }
                if ui.button("Browse…").clicked() {
                    if let Some(path) = pick_image_file() {
                        state.path_input = path.display().to_string();
                        actions.push(UiAction::OpenPicked(path));
                    }
                }
            });
        });

    state.ui.open_image = open;
}

/// Static application info.
pub fn settings_window(ctx: &egui::Context, state: &mut AppState) {
    egui::Window::new("Settings")
        .open(&mut state.ui.settings)
        .fixed_size([250.0, 120.0])
        .resizable(false)
        .collapsible(false)
        .show(ctx, |ui: &mut Ui| {
            ui.label(config::APP_AND_VERSION);
            ui.label(format!("Made by {} in {}", config::AUTHOR, config::YEAR));
        });
}

/// Live resolution, channel and zoom readout.
pub fn info_window(ctx: &egui::Context, state: &mut AppState) {
    let lines = info_lines(state);
    egui::Window::new("Image Info")
        .open(&mut state.ui.info)
        .fixed_size([300.0, 120.0])
        .resizable(false)
        .collapsible(false)
        .show(ctx, |ui: &mut Ui| {
            for line in &lines {
                ui.label(line);
            }
        });
}

pub fn info_lines(state: &AppState) -> [String; 4] {
    let (width, height, channels, file) = match &state.image {
        Some(img) => (
            img.width,
            img.height,
            img.layout.long_label(),
            img.path
                .file_name()
                .map(|name| name.to_string_lossy().into_owned())
                .unwrap_or_else(|| img.path.display().to_string()),
        ),
        None => (DEFAULT_DIMENSION, DEFAULT_DIMENSION, "None", "None".to_owned()),
    };
    [
        format!("Resolution : {width}x{height}"),
        format!("Color Channel : {channels}"),
        format!("Zoom : {:.2}x", state.view.zoom.x),
        format!("File : {file}"),
    ]
}

// ---------------------------------------------------------------------------
// File dialog
// ---------------------------------------------------------------------------

pub fn pick_image_file() -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Open image")
        .add_filter("Images", &["png", "jpg", "jpeg", "bmp", "gif", "webp"])
        .add_filter("PNG", &["png"])
        .add_filter("JPEG", &["jpg", "jpeg"])
        .pick_file()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{ChannelLayout, ImageInfo};
    use crate::view::transform::ScrollDirection;

    #[test]
    fn info_before_any_image() {
        let state = AppState::default();
        let [res, channels, zoom, file] = info_lines(&state);
        assert_eq!(res, "Resolution : 500x500");
        assert_eq!(channels, "Color Channel : None");
        assert_eq!(zoom, "Zoom : 1.00x");
        assert_eq!(file, "File : None");
    }

    #[test]
    fn info_tracks_image_and_zoom() {
        let mut state = AppState::default();
        state.image = Some(ImageInfo {
            width: 800,
            height: 600,
            layout: ChannelLayout::Rgba,
            path: PathBuf::from("/pictures/a.png"),
        });
        state.view.scroll(ScrollDirection::In);

        let [res, channels, zoom, file] = info_lines(&state);
        assert_eq!(res, "Resolution : 800x600");
        assert_eq!(channels, "Color Channel : Red Green Blue Alpha(RGBA)");
        assert_eq!(zoom, "Zoom : 1.10x");
        assert_eq!(file, "File : a.png");
    }
}
