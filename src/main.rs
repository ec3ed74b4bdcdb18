//! # Mapgen Editor Main Entry Point
//!
//! A desktop editor for tile-based mapgen JSON: a symbol grid with
//! terrain/furniture palettes, auto-wall rendering, and loot/monster zone
//! placement. This file initializes logging and starts the main event loop
//! using eframe/egui.

use log::info;

use mapgen_ed::ui::EditorApp;

fn main() {
    env_logger::init();
    info!("mapgen-ed starting...");

    let native_options = eframe::NativeOptions {
        initial_window_size: Some(egui::vec2(1280.0, 800.0)),
        ..Default::default()
    };

    eframe::run_native(
        "Mapgen Editor",
        native_options,
        Box::new(|_cc| Box::new(EditorApp::new())),
    );
    // run_native returns () so there is nothing further to report.
    info!("mapgen-ed exiting.");
}
