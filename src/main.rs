//! Desktop widget
//!
//! Run with: cargo run --features desktop
//!
//! Configuration comes from `HOWLONG_<KEY>` environment variables, e.g.
//! `HOWLONG_REFRESH_MS=100 HOWLONG_NIGHT_THEME=21-7`.

#[cfg(not(target_arch = "wasm32"))]
fn main() -> eframe::Result<()> {
    use std::cell::RefCell;
    use std::rc::Rc;

    use howlong_today::app::storage::JsonFileStore;
    use howlong_today::app::ClockApp;
    use howlong_today::core::{MemoryStore, SharedStore, WidgetConfig};
    use tracing::{info, warn};
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,howlong_today=debug"));
    fmt().with_env_filter(filter).with_target(true).init();

    let config = WidgetConfig::from_lookup(|key| {
        std::env::var(format!("HOWLONG_{}", key.to_ascii_uppercase())).ok()
    });
    info!(?config, "Configuration loaded");

    let store: SharedStore = match JsonFileStore::default_path().map(JsonFileStore::open) {
        Some(Ok(store)) => {
            info!(path = %store.path().display(), "Using settings file");
            Rc::new(RefCell::new(store))
        }
        Some(Err(e)) => {
            warn!(error = %e, "Failed to open settings file, settings will not persist");
            Rc::new(RefCell::new(MemoryStore::new()))
        }
        None => {
            warn!("No config directory, settings will not persist");
            Rc::new(RefCell::new(MemoryStore::new()))
        }
    };

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([420.0, 640.0])
            .with_min_inner_size([320.0, 480.0]),
        ..Default::default()
    };

    eframe::run_native(
        "How Long Today?",
        options,
        Box::new(move |cc| Ok(Box::new(ClockApp::new(cc, store, &config)))),
    )
}

#[cfg(target_arch = "wasm32")]
fn main() {}
