//! Main application entry point.

use gridpaint_app::{AppConfig, AppError, GridPaintApp, load_editor_config};

fn main() -> Result<(), AppError> {
    env_logger::init();
    log::info!("Starting GridPaint");

    let editor_config = load_editor_config()?;
    let app_config = AppConfig::default();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([app_config.width, app_config.height])
            .with_title(app_config.title.clone()),
        ..Default::default()
    };

    eframe::run_native(
        &app_config.title,
        options,
        Box::new(|cc| Ok(Box::new(GridPaintApp::new(cc, editor_config)))),
    )?;
    Ok(())
}
