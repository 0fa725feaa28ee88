mod app;
mod color;
mod config;
mod data;
mod error;
mod format;
mod geo;
mod state;
mod ui;

use anyhow::Context;
use app::SalaryDashboardApp;
use config::DashboardConfig;
use data::loader::DataSource;
use eframe::egui;
use state::AppState;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = DashboardConfig::default();

    // A dataset that cannot be fetched or parsed is fatal: no window opens.
    let source = DataSource::Url(config.source_url.clone());
    let dataset = source
        .load()
        .with_context(|| format!("loading salary records from {source}"))?;
    log::info!("Loaded {} salary records from {source}", dataset.len());
    if dataset.is_empty() {
        log::warn!("{source} contains no records; every chart will show its placeholder");
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size(config.min_window_size),
        ..Default::default()
    };

    let state = AppState::new(config, source, dataset);
    eframe::run_native(
        "Salary Dashboard – Data Field Salaries",
        options,
        Box::new(move |_cc| Ok(Box::new(SalaryDashboardApp::new(state)))),
    )
    .map_err(|e| anyhow::anyhow!("{e}"))
}
