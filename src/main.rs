// Quest Calendar Application
// Main entry point

mod interaction;
mod layout;
mod models;
mod services;
mod ui_egui;
mod utils;

use ui_egui::CalendarApp;

fn main() -> eframe::Result<()> {
    // Initialize logging
    env_logger::init();

    log::info!("Starting Quest Calendar");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([520.0, 840.0])
            .with_min_inner_size([360.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Quest Calendar",
        options,
        Box::new(|_cc| Ok(Box::new(CalendarApp::with_demo_data()))),
    )
}
