//! GridPaint Application
//!
//! The eframe shell around the editor: window setup, input translation and
//! native file dialogs.

mod app;
mod file_ops;
pub mod input;

pub use app::{AppConfig, AppError, CONFIG_ENV, GridPaintApp, load_editor_config};
