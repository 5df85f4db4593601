mod app;
mod assistant;
mod catalog;
mod config;
mod error;
mod event;
mod locale;
mod preview;
mod quiz;
mod selection;
mod state;
mod theme;
mod ui;

use app::RoutineApp;
use assistant::AssistantBridge;
use catalog::FileCatalogSource;
use config::Config;
use eframe::egui;
use event::{AppEvent, EventSender};
use selection::store::FileStore;
use state::AppState;
use std::sync::mpsc;
use theme::Theme;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::load();
    let rtl = locale::layout_is_rtl(config.rtl_override);
    info!(
        catalog = %config.catalog_path.display(),
        data_dir = %config.data_dir.display(),
        rtl,
        "starting routine studio"
    );

    let (tx, rx) = mpsc::channel();
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("routine-studio-runtime")
        .build()?;
    let runtime_handle = runtime.handle().clone();
    let _runtime = runtime;

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([1024.0, 640.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Routine Studio",
        native_options,
        Box::new(move |creation_context| {
            egui_extras::install_image_loaders(&creation_context.egui_ctx);
            let events = EventSender::new(tx, creation_context.egui_ctx.clone());

            let source = FileCatalogSource::new(config.catalog_path.clone());
            debug!("loading catalog from {}", source.path().display());
            let catalog_events = events.clone();
            runtime_handle.spawn(async move {
                let result = source.load().await;
                catalog_events.send(AppEvent::CatalogLoaded(result));
            });

            let state = AppState::new(Box::new(FileStore::new(&config.data_dir)));
            let bridge = AssistantBridge::new(
                config.endpoint.clone(),
                config.model.clone(),
                config.timeout_secs,
                events.clone(),
                runtime_handle.clone(),
            );

            let theme = Theme::default();
            theme.apply_visuals(&creation_context.egui_ctx);

            Ok(Box::new(RoutineApp::new(
                rx,
                state,
                bridge,
                events,
                runtime_handle,
                theme,
                rtl,
            )))
        }),
    )?;

    Ok(())
}
