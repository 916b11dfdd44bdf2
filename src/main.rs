//! WeatherScope - Interactive Seattle weather dashboard
//!
//! Loads a weather CSV and renders one of six chart types chosen from the
//! sidebar, with optional raw-table and summary-statistics views.

mod charts;
mod data;
mod gui;
mod stats;

use anyhow::Context;
use data::WeatherTable;
use eframe::egui;
use gui::WeatherApp;

const DATA_PATH: &str = "seattle-weather.csv";

fn main() -> anyhow::Result<()> {
    env_logger::init();

    // Loaded exactly once; a missing or malformed file is fatal before any
    // window is shown.
    let table =
        WeatherTable::load(DATA_PATH).with_context(|| format!("loading {DATA_PATH}"))?;
    log::info!("loaded {} rows from {DATA_PATH}", table.row_count());

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([1000.0, 650.0])
            .with_title("WeatherScope"),
        ..Default::default()
    };

    eframe::run_native(
        "WeatherScope",
        options,
        Box::new(move |cc| Ok(Box::new(WeatherApp::new(cc, table)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))?;

    Ok(())
}
