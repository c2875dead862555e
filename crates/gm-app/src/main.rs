//! Main application entry point

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use eframe::egui;
use tracing::info;
use tracing_subscriber::EnvFilter;

use gm_core::events::events::{DataLoaded, SelectionChanged};
use gm_core::{handler_from_fn, EventBus};
use gm_data::{DashboardConfig, GeoJsonSource, CsvMedalSource, RecordStore};
use gm_views::{Dashboard, DashboardOptions};

mod app;
mod map_painter;

use app::MedalsApp;

/// Read every medal table and the world outlines before the window opens.
/// Any failure here is fatal.
fn load_dashboard(config: &DashboardConfig) -> Result<Dashboard> {
    let runtime = tokio::runtime::Runtime::new().context("Failed to start tokio runtime")?;

    let sources = CsvMedalSource::for_config(config);
    let geometry_source = GeoJsonSource::new(config.geometry_path());

    let (store, geometry) = runtime.block_on(async {
        tokio::join!(RecordStore::load_from(&sources), geometry_source.load())
    });
    let store = store.context("Failed to load medal tables")?;
    let geometry = geometry.with_context(|| format!("Failed to load {}", geometry_source.source_name()))?;

    let options = DashboardOptions {
        highlight_count: config.default_highlight_count,
        color_seed: config.color_seed,
    };
    Ok(Dashboard::with_event_bus(store, geometry, options, event_bus()))
}

/// Bus with the logging handlers attached before the dashboard publishes
/// its first event
fn event_bus() -> Arc<EventBus> {
    let bus = Arc::new(EventBus::new());
    bus.subscribe::<DataLoaded>(handler_from_fn(|event| {
        if let Some(e) = event.as_any().downcast_ref::<DataLoaded>() {
            info!(
                "Loaded {} records for {} countries, {} outlines",
                e.record_count, e.country_count, e.shape_count
            );
        }
    }));
    bus.subscribe::<SelectionChanged>(handler_from_fn(|event| {
        if let Some(e) = event.as_any().downcast_ref::<SelectionChanged>() {
            info!("Selection: {:?}", e.selected);
        }
    }));
    bus
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config_path = std::env::args_os().nth(1).map(PathBuf::from);
    let config = DashboardConfig::load_or_default(config_path.as_deref())
        .context("Failed to read dashboard configuration")?;
    info!("Loading medal data from {}", config.data_dir.display());

    let dashboard = load_dashboard(&config)?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(config.window_size)
            .with_min_inner_size([800.0, 500.0]),
        default_theme: eframe::Theme::Light,
        persist_window: false,
        ..Default::default()
    };

    eframe::run_native(
        "Olympic Medals 2008-2024",
        options,
        Box::new(move |cc| Box::new(MedalsApp::new(cc, dashboard))),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run app: {}", e))?;

    Ok(())
}
