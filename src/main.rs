mod app;
mod config;
mod data;
mod input;
mod render;
mod state;
mod ui;
mod view;

use app::QuadViewApp;

fn main() -> eframe::Result {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    eframe::run_native(
        config::APP_NAME,
        config::native_options(),
        Box::new(|cc| Ok(Box::new(QuadViewApp::new(cc)))),
    )
}
