use eframe::egui;

// ---------------------------------------------------------------------------
// Application info
// ---------------------------------------------------------------------------

pub const APP_NAME: &str = "QuadView";
pub const APP_AND_VERSION: &str = concat!("QuadView V", env!("CARGO_PKG_VERSION"));
pub const AUTHOR: &str = "QuadView Contributors";
pub const YEAR: u32 = 2024;

// ---------------------------------------------------------------------------
// View limits
// ---------------------------------------------------------------------------

pub const DEFAULT_ZOOM: f32 = 1.0;
pub const MIN_ZOOM: f32 = 0.2;
pub const MAX_ZOOM: f32 = 50.0;

/// Zoom change per mouse-wheel notch.
pub const ZOOM_STEP: f32 = 0.1;

/// Pan distance per frame while a direction key is held.
pub const PAN_STEP: f32 = 0.1;

/// Side length used to size the placeholder quad before any image is open.
pub const DEFAULT_DIMENSION: u32 = 500;

/// Path input capacity, counting one slot for a terminator.
pub const PATH_CAPACITY: usize = 1024;

// ---------------------------------------------------------------------------
// Window
// ---------------------------------------------------------------------------

pub const INITIAL_WINDOW_SIZE: [f32; 2] = [600.0, 600.0];
pub const MIN_WINDOW_SIZE: [f32; 2] = [400.0, 300.0];
pub const CLEAR_COLOR: [f32; 3] = [0.15, 0.15, 0.15];

pub const SHADER_DIR: &str = "shaders";

pub fn empty_title() -> String {
    format!("{APP_NAME}(Empty)")
}

pub fn viewing_title() -> String {
    format!("{APP_NAME}(Viewing An Image)")
}

/// Window options: glow renderer, vsync, resizable with a minimum size.
pub fn native_options() -> eframe::NativeOptions {
    eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(empty_title())
            .with_inner_size(INITIAL_WINDOW_SIZE)
            .with_min_inner_size(MIN_WINDOW_SIZE)
            .with_resizable(true),
        renderer: eframe::Renderer::Glow,
        vsync: true,
        ..Default::default()
    }
}
