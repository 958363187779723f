mod app;
mod state;
mod ui;

use app::MeasurementMapApp;
use eframe::egui;
use measurement_map::config::AppConfig;

fn main() -> eframe::Result {
    env_logger::init();

    let config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Using default config: {e:#}");
        AppConfig::default()
    });

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([720.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Measurement Map – Radiation & Chemical",
        options,
        Box::new(move |_cc| Ok(Box::new(MeasurementMapApp::new(config)))),
    )
}
